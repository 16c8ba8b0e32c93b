use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::interpreter::{evaluator::native, value::core::Value};

/// A lexical scope: one frame of local bindings, a link to its parent, and
/// a handle on the globals map shared by every scope of the same root.
///
/// Scopes are created on function entry and on entry to `do`, loop, and
/// `if` blocks, and are dropped when the block exits. A closure keeps its
/// defining scope alive through the `Rc`, so captured bindings outlive the
/// block that introduced them and assignments to a captured name mutate
/// the original binding.
#[derive(Debug)]
pub struct Scope {
    locals:  RefCell<HashMap<String, Value>>,
    parent:  Option<Rc<Scope>>,
    globals: Rc<RefCell<HashMap<String, Value>>>,
}

impl Scope {
    /// Creates a root scope with the built-in functions installed in its
    /// globals map.
    #[must_use]
    pub fn root() -> Rc<Self> {
        let mut globals = HashMap::new();
        native::install(&mut globals);
        Rc::new(Self { locals:  RefCell::new(HashMap::new()),
                       parent:  None,
                       globals: Rc::new(RefCell::new(globals)), })
    }

    /// Creates a child scope of `parent`, sharing its globals.
    #[must_use]
    pub fn child(parent: &Rc<Self>) -> Rc<Self> {
        Rc::new(Self { locals:  RefCell::new(HashMap::new()),
                       parent:  Some(Rc::clone(parent)),
                       globals: Rc::clone(&parent.globals), })
    }

    /// Looks a name up through the scope chain and then the globals map.
    ///
    /// Returns `None` only when the name is bound nowhere; an explicit
    /// `nil` binding is `Some(Value::Nil)`. Most callers want [`Self::get`]
    /// instead — the distinction only matters for `...`, where an absent
    /// binding is an error rather than `nil`.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Value> {
        let mut scope = self;
        loop {
            if let Some(value) = scope.locals.borrow().get(name) {
                return Some(value.clone());
            }
            match &scope.parent {
                Some(parent) => scope = parent,
                None => break,
            }
        }
        self.globals.borrow().get(name).cloned()
    }

    /// Reads a name, yielding `nil` when it is not bound anywhere.
    /// Reads of undeclared globals are not errors.
    #[must_use]
    pub fn get(&self, name: &str) -> Value {
        self.lookup(name).unwrap_or(Value::Nil)
    }

    /// Assigns to a name.
    ///
    /// If any enclosing scope holds a local of that name, that binding is
    /// updated; otherwise the value is written to the shared globals map.
    pub fn set(&self, name: &str, value: Value) {
        let mut scope = self;
        loop {
            {
                let mut locals = scope.locals.borrow_mut();
                if locals.contains_key(name) {
                    locals.insert(name.to_string(), value);
                    return;
                }
            }
            match &scope.parent {
                Some(parent) => scope = parent,
                None => break,
            }
        }
        self.globals.borrow_mut().insert(name.to_string(), value);
    }

    /// Creates or overwrites a binding in this scope, shadowing any outer
    /// binding of the same name. Used by `local` declarations, function
    /// parameters, and loop induction variables.
    pub fn set_local(&self, name: &str, value: Value) {
        self.locals.borrow_mut().insert(name.to_string(), value);
    }
}
