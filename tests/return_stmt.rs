#[macro_use]
mod common;

#[cfg(test)]
mod return_stmt {
    tests! {
        bare_return_in_function in OK, command: run, source: r#"
            fun early() {
                print "before";
                return;
                print "after";
            }
            early();
        "#,
        "before",
    }

    tests! {
        return_in_nested_block in OK, command: run, source: r#"
            fun test() {
                if (true) {
                    return "ok";
                }
                return "unreached";
            }
            print test();
        "#,
        "ok",
    }

    tests! {
        top_level_return_is_a_compile_error in ERR, command: run, source: "return 1;\n",
        "[line 1] Error at 'return': Can't return from top-level code.",
    }

    tests! {
        return_value_from_initializer_is_a_compile_error in ERR, command: run, source: r#"
            class Foo {
                init() {
                    return 1;
                }
            }
        "#,
        "[line 4] Error at 'return': Can't return a value from an initializer.",
    }
}
