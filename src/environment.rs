use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use crate::object::Object;

/// One scope in the chain. `let` writes to the innermost scope, assignment
/// writes to the innermost scope that already binds the name.
#[derive(Default)]
pub struct Environment {
    store: BTreeMap<String, Object>,
    outer: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Self {
        Environment { store: BTreeMap::new(), outer: None }
    }

    pub fn new_enclosed(outer: Rc<RefCell<Environment>>) -> Self {
        Environment { store: BTreeMap::new(), outer: Some(outer) }
    }

    pub fn get(&self, key: &str) -> Option<Object> {
        match self.store.get(key) {
            Some(obj) => Some(obj.clone()),
            None => match &self.outer {
                Some(env) => env.borrow().get(key),
                None      => None,
            },
        }
    }

    pub fn set(&mut self, key: String, value: Object) {
        self.store.insert(key, value);
    }

    /// Rebinds an existing name where it is bound. Returns `false` when no
    /// scope in the chain binds `key`.
    pub fn assign(&mut self, key: &str, value: Object) -> bool {
        if let Some(slot) = self.store.get_mut(key) {
            *slot = value;
            return true;
        }
        match &self.outer {
            Some(env) => env.borrow_mut().assign(key, value),
            None => false,
        }
    }
}
