#[macro_use]
mod common;

#[cfg(test)]
mod string {
    tests! {
        literals in OK, command: run, source: r#"
            print "hello";
            print "";
            print "a" + "b";
        "#,
        "hello",
        "",
        "ab",
    }

    tests! {
        multiline in OK, command: run, source: "print \"1\n2\";\n",
        "1",
        "2",
    }

    tests! {
        unterminated in ERR, command: run, source: "\"unterminated",
        "[line 1] Error: Unterminated string.",
    }

    tests! {
        plus_number_is_an_error in ERR, command: run, source: r#"
            print "1" + 2;
        "#,
        "Operands must be two numbers or two strings.",
        "[line 2]",
    }
}
