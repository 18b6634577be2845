#[macro_use]
mod common;

#[cfg(test)]
mod this {
    tests! {
        refers_to_instance in OK, command: run, source: r#"
            class Cake {
                taste() {
                    var adjective = "delicious";
                    print "The " + this.flavor + " cake is " + adjective + "!";
                }
            }
            var cake = Cake();
            cake.flavor = "German chocolate";
            cake.taste();
        "#,
        "The German chocolate cake is delicious!",
    }

    tests! {
        closure_captures_this in OK, command: run, source: r#"
            class Thing {
                getCallback() {
                    fun localFunction() {
                        print this;
                    }
                    return localFunction;
                }
            }
            var callback = Thing().getCallback();
            callback();
        "#,
        "Thing instance",
    }

    tests! {
        top_level_this_is_a_compile_error in ERR, command: run, source: "print this;\n",
        "[line 1] Error at 'this': Can't use 'this' outside of a class.",
    }

    tests! {
        this_in_top_level_function_is_a_compile_error in ERR, command: run, source: r#"
            fun notAMethod() {
                print this;
            }
        "#,
        "[line 3] Error at 'this': Can't use 'this' outside of a class.",
    }
}
