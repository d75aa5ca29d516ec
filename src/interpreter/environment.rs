use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::interpreter::value::Value;

/// A shared, mutable handle to an [`Environment`].
///
/// Environments are shared between closures, instances and the driver,
/// so they live behind `Rc<RefCell<_>>`. Cycles created by recursive
/// functions or instance methods are accepted leaks; the chains are
/// shallow and die with the interpreter.
pub type EnvRef = Rc<RefCell<Environment>>;

/// A lexical scope: a name-to-value map plus an optional outer scope.
///
/// Identifier lookup consults the local map first and then recurses
/// into the outer environment. Binding always writes into the local
/// map.
///
/// # Example
/// ```
/// use scripta::interpreter::{environment::Environment, value::Value};
///
/// let root = Environment::new();
/// root.borrow_mut().set("x", Value::Integer(1));
///
/// let inner = Environment::enclosed(&root);
/// assert_eq!(inner.borrow().get("x"), Some(Value::Integer(1)));
///
/// inner.borrow_mut().set("x", Value::Integer(2));
/// assert_eq!(inner.borrow().get("x"), Some(Value::Integer(2)));
/// assert_eq!(root.borrow().get("x"), Some(Value::Integer(1)));
/// ```
#[derive(Debug, Default)]
pub struct Environment {
    store: HashMap<String, Value>,
    outer: Option<EnvRef>,
}

impl Environment {
    /// Creates a new root environment with no outer scope.
    #[must_use]
    pub fn new() -> EnvRef {
        Rc::new(RefCell::new(Self::default()))
    }

    /// Creates a new empty environment whose outer scope is `outer`.
    #[must_use]
    pub fn enclosed(outer: &EnvRef) -> EnvRef {
        Rc::new(RefCell::new(Self { store: HashMap::new(),
                                    outer: Some(Rc::clone(outer)), }))
    }

    /// Looks up a name, walking the scope chain outward.
    ///
    /// Returns a clone of the bound value, or `None` if the name is not
    /// bound in any reachable scope.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.store.get(name) {
            return Some(value.clone());
        }
        self.outer.as_ref().and_then(|outer| outer.borrow().get(name))
    }

    /// Binds a name in this scope unconditionally.
    ///
    /// An existing local binding of the same name is replaced; outer
    /// bindings are shadowed, never touched.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.store.insert(name.into(), value);
    }

    /// Updates a binding in this scope, creating it if absent.
    ///
    /// This is the assignment primitive. It deliberately does NOT walk
    /// outward: assigning to a name bound only in an outer scope
    /// silently creates a local shadow instead of mutating the outer
    /// binding.
    ///
    /// # Example
    /// ```
    /// use scripta::interpreter::{environment::Environment, value::Value};
    ///
    /// let root = Environment::new();
    /// root.borrow_mut().set("x", Value::Integer(1));
    ///
    /// let inner = Environment::enclosed(&root);
    /// inner.borrow_mut().reset("x", Value::Integer(9));
    ///
    /// // The outer binding is shadowed, not updated.
    /// assert_eq!(root.borrow().get("x"), Some(Value::Integer(1)));
    /// assert_eq!(inner.borrow().get("x"), Some(Value::Integer(9)));
    /// ```
    pub fn reset(&mut self, name: &str, value: Value) {
        self.store.insert(name.to_owned(), value);
    }

    /// Reports whether this scope (not any outer one) binds `name`.
    #[must_use]
    pub fn binds_locally(&self, name: &str) -> bool {
        self.store.contains_key(name)
    }
}

/// Rewrites an existing binding in the scope that defines it.
///
/// Walks outward from `env` until a scope with a local binding for
/// `name` is found and replaces the value there. Returns `false`
/// without binding anything when no scope defines the name.
///
/// This is the primitive behind the postfix `++`/`--` operators, which
/// must update the defining scope of a possibly captured variable.
///
/// # Example
/// ```
/// use scripta::interpreter::{
///     environment::{Environment, rebind},
///     value::Value,
/// };
///
/// let root = Environment::new();
/// root.borrow_mut().set("count", Value::Integer(0));
///
/// let inner = Environment::enclosed(&root);
/// assert!(rebind(&inner, "count", Value::Integer(1)));
/// assert_eq!(root.borrow().get("count"), Some(Value::Integer(1)));
///
/// assert!(!rebind(&inner, "missing", Value::Null));
/// ```
pub fn rebind(env: &EnvRef, name: &str, value: Value) -> bool {
    let mut current = Rc::clone(env);
    loop {
        let next = {
            let mut scope = current.borrow_mut();
            if scope.binds_locally(name) {
                scope.store.insert(name.to_owned(), value);
                return true;
            }
            match &scope.outer {
                Some(outer) => Rc::clone(outer),
                None => return false,
            }
        };
        current = next;
    }
}
