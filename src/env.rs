// ABOUTME: Environment module for managing variable bindings and scopes

use crate::object::Object;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A `name -> Object` frame with an optional parent link.
///
/// Environments are shared by reference: every `Function` and `Macro` value
/// holds an `Rc` to its defining frame, which realizes lexical closure. A
/// recursive closure bound in its own defining frame forms a reference
/// cycle; such frames stay alive until the process exits.
#[derive(Debug, Default)]
pub struct Environment {
    store: RefCell<HashMap<String, Object>>,
    outer: Option<Rc<Environment>>,
}

impl Environment {
    /// Creates a new top-level environment with no parent.
    pub fn new() -> Rc<Self> {
        Rc::new(Environment {
            store: RefCell::new(HashMap::new()),
            outer: None,
        })
    }

    /// Creates a child environment enclosed by `outer`. Used for function
    /// calls and macro expansion frames.
    pub fn new_enclosed(outer: Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            store: RefCell::new(HashMap::new()),
            outer: Some(outer),
        })
    }

    /// Looks a name up in this frame, then along the parent chain.
    pub fn get(&self, name: &str) -> Option<Object> {
        if let Some(value) = self.store.borrow().get(name) {
            return Some(value.clone());
        }
        self.outer.as_ref().and_then(|outer| outer.get(name))
    }

    /// Binds a name in this frame only; parent frames are never written.
    pub fn set(&self, name: impl Into<String>, value: Object) {
        self.store.borrow_mut().insert(name.into(), value);
    }
}
