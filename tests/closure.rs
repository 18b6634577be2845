#[macro_use]
mod common;

#[cfg(test)]
mod closure {
    tests! {
        captures_enclosing_variable in OK, command: run, source: r#"
            fun makeCounter() {
                var count = 0;
                fun increment() {
                    count = count + 1;
                    print count;
                }
                return increment;
            }
            var counter = makeCounter();
            counter();
            counter();
            counter();
        "#,
        "1",
        "2",
        "3",
    }

    tests! {
        independent_closures_do_not_share_state in OK, command: run, source: r#"
            fun makeCounter() {
                var count = 0;
                fun increment() {
                    count = count + 1;
                    return count;
                }
                return increment;
            }
            var a = makeCounter();
            var b = makeCounter();
            print a();
            print a();
            print b();
        "#,
        "1",
        "2",
        "1",
    }

    tests! {
        assign_to_closed_over_variable_is_visible_later in OK, command: run, source: r#"
            var f;
            var g;
            {
                var local = "local";
                fun showLocal() { print local; }
                f = showLocal;
                local = "updated";
                g = showLocal;
            }
            f();
            g();
        "#,
        "updated",
        "updated",
    }
}
