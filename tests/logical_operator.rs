#[macro_use]
mod common;

#[cfg(test)]
mod logical_operator {
    tests! {
        and_returns_left_if_falsey in OK, command: run, source: r#"
            print false and "unreached";
            print nil and "unreached";
        "#,
        "false",
        "nil",
    }

    tests! {
        and_returns_right_if_left_truthy in OK, command: run, source: r#"
            print true and "right";
            print 1 and 2;
        "#,
        "right",
        "2",
    }

    tests! {
        or_returns_left_if_truthy in OK, command: run, source: r#"
            print 1 or 2;
            print false or "right";
        "#,
        "1",
        "right",
    }

    tests! {
        short_circuits in OK, command: run, source: r#"
            fun bomb() {
                print "should not print";
                return true;
            }
            print false and bomb();
            print true or bomb();
        "#,
        "false",
        "true",
    }
}
