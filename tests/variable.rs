#[macro_use]
mod common;

#[cfg(test)]
mod variable {
    tests! {
        uninitialized_is_nil in OK, command: run, source: r#"
            var a;
            print a;
        "#,
        "nil",
    }

    tests! {
        redeclare_global in OK, command: run, source: r#"
            var a = "first";
            var a = "second";
            print a;
        "#,
        "second",
    }

    tests! {
        redeclare_local_is_a_compile_error in ERR, command: run, source: r#"
            {
                var a = "first";
                var a = "second";
            }
        "#,
        "[line 4] Error at 'a': Already a variable with this name in this scope.",
    }

    tests! {
        self_reference_in_initializer_is_a_compile_error in ERR, command: run, source: r#"
            {
                var a = a;
            }
        "#,
        "[line 3] Error at 'a': Can't read local variable in its own initializer.",
    }

    tests! {
        shadowing in OK, command: run, source: r#"
            var a = "global";
            {
                var a = "local";
                print a;
            }
            print a;
        "#,
        "local",
        "global",
    }
}
