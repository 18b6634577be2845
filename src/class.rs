use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::RuntimeError;
use crate::function::LoxFunction;
use crate::interpreter::Interpreter;
use crate::object::{Callable, Object};
use crate::token::Token;

/// There is no superclass field: this language surface predates inheritance.
pub struct Class {
    pub name: String,
    methods: HashMap<String, Rc<LoxFunction>>,
}

impl Class {
    pub fn new(name: String, methods: HashMap<String, Rc<LoxFunction>>) -> Class {
        Class { name, methods }
    }

    pub fn find_method(&self, name: &str) -> Option<Rc<LoxFunction>> {
        self.methods.get(name).cloned()
    }

    /// A class's arity is its initializer's, or 0 if it has none.
    pub fn arity(&self) -> usize {
        self.find_method("init").map(|init| init.arity()).unwrap_or(0)
    }

    /// Constructing a class is not routed through [`Callable`]: it needs
    /// the `Rc<Class>` itself (to store on the new instance), which a
    /// `&self`-only trait method can't recover.
    pub fn construct(
        class: &Rc<Class>,
        interpreter: &mut Interpreter,
        arguments: Vec<Object>,
    ) -> Result<Object, RuntimeError> {
        let instance = Rc::new(RefCell::new(Instance::new(Rc::clone(class))));

        if let Some(init) = class.find_method("init") {
            let bound = init.bind(Object::Instance(Rc::clone(&instance)));
            bound.call(interpreter, arguments)?;
        }

        Ok(Object::Instance(instance))
    }
}

pub struct Instance {
    pub class: Rc<Class>,
    fields: HashMap<String, Object>,
}

impl Instance {
    pub fn new(class: Rc<Class>) -> Instance {
        Instance { class, fields: HashMap::new() }
    }

    /// Reads a field, falling back to a bound method. Fields shadow
    /// methods of the same name.
    pub fn get(instance: &Rc<RefCell<Instance>>, name: &Token) -> Result<Object, RuntimeError> {
        let borrowed = instance.borrow();
        if let Some(value) = borrowed.fields.get(&name.lexeme) {
            return Ok(value.clone());
        }
        if let Some(method) = borrowed.class.find_method(&name.lexeme) {
            let bound = method.bind(Object::Instance(Rc::clone(instance)));
            return Ok(Object::Function(Rc::new(bound)));
        }
        Err(RuntimeError { token: name.clone(), message: format!("Undefined property '{}'.", name.lexeme) })
    }

    pub fn set(&mut self, name: &Token, value: Object) {
        self.fields.insert(name.lexeme.clone(), value);
    }
}
