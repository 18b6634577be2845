use std::cell::RefCell;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::interpreter::{Interpreter, Unwind};
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::FunctionData;

/// A `fun` declaration or class method, together with the environment it
/// closed over at definition time.
pub struct LoxFunction {
    pub name: String,
    params: Vec<String>,
    body: Rc<Vec<crate::stmt::Stmt>>,
    closure: Rc<RefCell<Environment>>,
    is_initializer: bool,
}

impl LoxFunction {
    pub fn new(data: &FunctionData, closure: &Rc<RefCell<Environment>>, is_initializer: bool) -> LoxFunction {
        LoxFunction {
            name: data.name.lexeme.clone(),
            params: data.params.iter().map(|p| p.lexeme.clone()).collect(),
            body: Rc::new(data.body.clone()),
            closure: Rc::clone(closure),
            is_initializer,
        }
    }

    /// Returns a new function identical to this one but whose closure is
    /// extended with `this → instance`.
    pub fn bind(&self, instance: Object) -> LoxFunction {
        let env = Environment::new_enclosed(&self.closure);
        env.borrow_mut().define("this".to_string(), instance);
        LoxFunction {
            name: self.name.clone(),
            params: self.params.clone(),
            body: Rc::clone(&self.body),
            closure: env,
            is_initializer: self.is_initializer,
        }
    }
}

impl Callable for LoxFunction {
    fn arity(&self) -> usize {
        self.params.len()
    }

    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Object>) -> Result<Object, RuntimeError> {
        let env = Environment::new_enclosed(&self.closure);
        for (param, argument) in self.params.iter().zip(arguments) {
            env.borrow_mut().define(param.clone(), argument);
        }

        match interpreter.execute_block(&self.body, env) {
            Ok(()) => {
                if self.is_initializer {
                    Ok(Environment::get_at(&self.closure, 0, "this"))
                } else {
                    Ok(Object::Literal(Literal::Nil))
                }
            }
            Err(Unwind::Return(value)) => {
                if self.is_initializer {
                    Ok(Environment::get_at(&self.closure, 0, "this"))
                } else {
                    Ok(value)
                }
            }
            Err(Unwind::Error(error)) => Err(error),
        }
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}

/// A host-implemented callable. Only `clock` exists.
pub struct NativeFunction {
    name: &'static str,
    arity: usize,
    func: fn(&[Object]) -> Object,
}

impl NativeFunction {
    pub fn clock() -> NativeFunction {
        NativeFunction {
            name: "clock",
            arity: 0,
            func: |_args| {
                let secs = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .expect("system clock is after the epoch")
                    .as_secs_f64();
                Object::Literal(Literal::Number(secs))
            },
        }
    }
}

impl Callable for NativeFunction {
    fn arity(&self) -> usize {
        self.arity
    }

    fn call(&self, _interpreter: &mut Interpreter, arguments: Vec<Object>) -> Result<Object, RuntimeError> {
        Ok((self.func)(&arguments))
    }

    fn name(&self) -> String {
        self.name.to_string()
    }
}
