#[macro_use]
mod common;

#[cfg(test)]
mod number {
    tests! {
        literals in OK, command: run, source: r#"
            print 123;
            print 123.456;
            print 0.001;
            print -0.0;
        "#,
        "123",
        "123.456",
        "0.001",
        "-0",
    }

    tests! {
        division_by_zero in OK, command: run, source: r#"
            print 1 / 0;
            print -1 / 0;
            print 0 / 0;
        "#,
        "inf",
        "-inf",
        "NaN",
    }

    tests! {
        leading_dot_is_its_own_token in OK, command: tokenize, source: ".456",
        "DOT . null",
        "NUMBER 456 456.0",
        "EOF  null",
    }
}
