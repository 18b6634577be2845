#[macro_use]
mod common;

#[cfg(test)]
mod block {
    tests! {
        scope in OK, command: run, source: r#"
            var a = "outer";
            {
                var a = "inner";
                print a;
            }
            print a;
        "#,
        "inner",
        "outer",
    }

    tests! {
        empty_block_is_noop in OK, command: run, source: r#"
            {}
            print "ok";
        "#,
        "ok",
    }
}
