#[macro_use]
mod common;

#[cfg(test)]
mod constructor {
    tests! {
        init_runs_on_construction in OK, command: run, source: r#"
            class Foo {
                init() {
                    print "constructed";
                }
            }
            Foo();
        "#,
        "constructed",
    }

    tests! {
        init_binds_fields in OK, command: run, source: r#"
            class Point {
                init(x, y) {
                    this.x = x;
                    this.y = y;
                }
            }
            var p = Point(3, 4);
            print p.x;
            print p.y;
        "#,
        "3",
        "4",
    }

    tests! {
        init_always_returns_the_instance in OK, command: run, source: r#"
            class Foo {
                init() {
                    return;
                }
            }
            print Foo();
        "#,
        "Foo instance",
    }

    tests! {
        arity_matches_init in ERR, command: run, source: r#"
            class Point {
                init(x, y) {
                    this.x = x;
                    this.y = y;
                }
            }
            Point(1);
        "#,
        "Expected 2 arguments but got 1.",
        "[line 8]",
    }
}
