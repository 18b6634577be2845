#[macro_use]
mod common;

#[cfg(test)]
mod control_flow {
    tests! {
        if_else in OK, command: run, source: r#"
            if (true) print "then"; else print "else";
            if (false) print "then"; else print "else";
        "#,
        "then",
        "else",
    }

    tests! {
        if_without_else in OK, command: run, source: r#"
            if (false) print "unreachable";
            print "after";
        "#,
        "after",
    }

    tests! {
        for_desugars_to_while in OK, command: run, source: r#"
            var sum = 0;
            for (var i = 0; i < 5; i = i + 1) {
                sum = sum + i;
            }
            print sum;
        "#,
        "10",
    }

    tests! {
        for_initializer_scope_does_not_leak in ERR, command: run, source: r#"
            for (var i = 0; i < 1; i = i + 1) {}
            print i;
        "#,
        "Undefined variable 'i'.",
        "[line 3]",
    }
}
