#[macro_use]
mod common;

#[cfg(test)]
mod operator {
    tests! {
        arithmetic in OK, command: run, source: r#"
            print 2 + 3 * 4;
            print (2 + 3) * 4;
            print 10 - 4 / 2;
        "#,
        "14",
        "20",
        "8",
    }

    tests! {
        comparison in OK, command: run, source: r#"
            print 1 < 2;
            print 2 <= 2;
            print 3 > 2;
            print 2 >= 3;
        "#,
        "true",
        "true",
        "true",
        "false",
    }

    tests! {
        equality_across_types_is_false in OK, command: run, source: r#"
            print 1 == "1";
            print nil == false;
            print 1 == 1.0;
        "#,
        "false",
        "false",
        "true",
    }

    tests! {
        not in OK, command: run, source: r#"
            print !true;
            print !false;
            print !nil;
            print !0;
        "#,
        "false",
        "true",
        "true",
        "false",
    }

    tests! {
        negate_non_number_is_a_runtime_error in ERR, command: run, source: r#"
            print -"muffin";
        "#,
        "Operands must be numbers.",
        "[line 2]",
    }

    tests! {
        add_bool_is_a_runtime_error in ERR, command: run, source: r#"
            print true + 1;
        "#,
        "Operands must be two numbers or two strings.",
        "[line 2]",
    }
}
