use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::RuntimeError;
use crate::object::Object;
use crate::token::Token;

pub struct Environment {
    values: HashMap<String, Object>,
    enclosing: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new_global() -> Rc<RefCell<Environment>> {
        Rc::new(RefCell::new(Environment { values: HashMap::new(), enclosing: None }))
    }

    pub fn new_enclosed(enclosing: &Rc<RefCell<Environment>>) -> Rc<RefCell<Environment>> {
        Rc::new(RefCell::new(Environment { values: HashMap::new(), enclosing: Some(Rc::clone(enclosing)) }))
    }

    /// Always succeeds: redeclaration in the same scope shadows rather than
    /// erroring (the resolver is the one that rejects that, for locals).
    pub fn define(&mut self, name: String, value: Object) {
        self.values.insert(name, value);
    }

    pub fn get(&self, name: &Token) -> Result<Object, RuntimeError> {
        if let Some(value) = self.values.get(&name.lexeme) {
            return Ok(value.clone());
        }
        if let Some(enclosing) = &self.enclosing {
            return enclosing.borrow().get(name);
        }
        Err(undefined_variable(name))
    }

    pub fn assign(&mut self, name: &Token, value: Object) -> Result<(), RuntimeError> {
        if self.values.contains_key(&name.lexeme) {
            self.values.insert(name.lexeme.clone(), value);
            return Ok(());
        }
        if let Some(enclosing) = &self.enclosing {
            return enclosing.borrow_mut().assign(name, value);
        }
        Err(undefined_variable(name))
    }

    /// Walks exactly `distance` hops up the chain. Only called with
    /// distances the resolver computed, so the chain is guaranteed deep
    /// enough: there is no "not found" case to handle here.
    fn ancestor(env: &Rc<RefCell<Environment>>, distance: usize) -> Rc<RefCell<Environment>> {
        let mut current = Rc::clone(env);
        for _ in 0..distance {
            let next = current
                .borrow()
                .enclosing
                .as_ref()
                .expect("resolver-computed distance exceeds environment chain depth")
                .clone();
            current = next;
        }
        current
    }

    pub fn get_at(env: &Rc<RefCell<Environment>>, distance: usize, name: &str) -> Object {
        Environment::ancestor(env, distance)
            .borrow()
            .values
            .get(name)
            .cloned()
            .expect("resolver guarantees the name exists at this distance")
    }

    pub fn assign_at(env: &Rc<RefCell<Environment>>, distance: usize, name: &Token, value: Object) {
        Environment::ancestor(env, distance).borrow_mut().values.insert(name.lexeme.clone(), value);
    }
}

fn undefined_variable(name: &Token) -> RuntimeError {
    RuntimeError { token: name.clone(), message: format!("Undefined variable '{}'.", name.lexeme) }
}
