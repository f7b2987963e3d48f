use std::{cell::RefCell, collections::HashMap, fmt, rc::Rc};

use crate::{
    ast::Position,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Shared handle to an environment record.
///
/// Records are reference counted so closures and nested scopes can keep their
/// parents alive; the global record lives as long as the [`Context`] that
/// created it.
///
/// [`Context`]: crate::interpreter::evaluator::core::Context
pub type EnvRef = Rc<RefCell<Environment>>;

/// What kind of scope a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// The process-wide record at the root of every chain.
    Global,
    /// The record created for one function invocation.
    Function,
    /// A block, `catch` clause, or the lexical record of an evaluated
    /// sub-program.
    Block,
}

/// A single name to value slot.
#[derive(Debug, Clone)]
pub struct Binding {
    /// Current value.
    pub value:   Value,
    /// `false` for `const` bindings.
    pub mutable: bool,
}

/// An environment record: bindings plus a link to the enclosing record.
///
/// Lookup walks from the innermost record outwards until it reaches the
/// global record, which has no parent. `var` and function declarations live
/// in the nearest `Function` or `Global` record, `let` and `const` in the
/// record they are declared in.
pub struct Environment {
    kind:     ScopeKind,
    bindings: HashMap<String, Binding>,
    parent:   Option<EnvRef>,
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.bindings.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Environment")
         .field("kind", &self.kind)
         .field("bindings", &names)
         .field("has_parent", &self.parent.is_some())
         .finish()
    }
}

impl Environment {
    /// Creates the global record.
    #[must_use]
    pub fn new_global() -> EnvRef {
        Rc::new(RefCell::new(Self { kind:     ScopeKind::Global,
                                    bindings: HashMap::new(),
                                    parent:   None, }))
    }

    /// Creates an empty record of `kind` whose parent is `parent`.
    #[must_use]
    pub fn new_child(parent: &EnvRef, kind: ScopeKind) -> EnvRef {
        Rc::new(RefCell::new(Self { kind,
                                    bindings: HashMap::new(),
                                    parent: Some(Rc::clone(parent)) }))
    }

    /// The kind of this record.
    #[must_use]
    pub const fn kind(&self) -> ScopeKind {
        self.kind
    }

    /// Whether this record itself binds `name`, ignoring its parents.
    #[must_use]
    pub fn has_own(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Resolves `name` by walking the chain from `env` outwards.
    ///
    /// ## Example
    /// ```
    /// use evalon::interpreter::{
    ///     evaluator::environment::{Environment, ScopeKind},
    ///     value::core::Value,
    /// };
    ///
    /// let global = Environment::new_global();
    /// Environment::declare(&global, "x", Value::Number(1.0), true);
    ///
    /// let inner = Environment::new_child(&global, ScopeKind::Function);
    /// Environment::declare(&inner, "y", Value::Number(2.0), true);
    ///
    /// assert_eq!(Environment::lookup(&inner, "x"), Some(Value::Number(1.0)));
    /// assert_eq!(Environment::lookup(&global, "y"), None);
    /// ```
    #[must_use]
    pub fn lookup(env: &EnvRef, name: &str) -> Option<Value> {
        let mut current = Rc::clone(env);
        loop {
            let parent = {
                let record = current.borrow();
                if let Some(binding) = record.bindings.get(name) {
                    return Some(binding.value.clone());
                }
                record.parent.clone()?
            };
            current = parent;
        }
    }

    /// Assigns to the nearest binding of `name`.
    ///
    /// An unresolvable name becomes a new binding of the global record.
    ///
    /// # Errors
    /// `AssignmentToConstant` when the nearest binding is a `const`.
    pub fn assign(env: &EnvRef, name: &str, value: Value, position: Position) -> EvalResult<()> {
        let mut current = Rc::clone(env);
        loop {
            let parent = {
                let mut record = current.borrow_mut();
                if let Some(binding) = record.bindings.get_mut(name) {
                    if !binding.mutable {
                        return Err(RuntimeError::AssignmentToConstant { name: name.to_string(),
                                                                        position });
                    }
                    binding.value = value;
                    return Ok(());
                }
                record.parent.clone()
            };
            match parent {
                Some(parent) => current = parent,
                None => {
                    Self::declare(&current, name, value, true);
                    return Ok(());
                },
            }
        }
    }

    /// Creates or replaces a binding in `env` itself.
    pub fn declare(env: &EnvRef, name: &str, value: Value, mutable: bool) {
        env.borrow_mut()
           .bindings
           .insert(name.to_string(), Binding { value, mutable });
    }

    /// Declares a `var` in the nearest function or global record of `env`.
    ///
    /// An existing binding keeps its value, so re-declaring a variable never
    /// resets it.
    pub fn declare_var(env: &EnvRef, name: &str) {
        let scope = Self::variable_scope(env);
        let mut record = scope.borrow_mut();
        record.bindings
              .entry(name.to_string())
              .or_insert(Binding { value:   Value::Undefined,
                                   mutable: true, });
    }

    /// The nearest record that is not a block: where `var` declarations of
    /// code running in `env` end up.
    #[must_use]
    pub fn variable_scope(env: &EnvRef) -> EnvRef {
        let mut current = Rc::clone(env);
        loop {
            let parent = {
                let record = current.borrow();
                if record.kind != ScopeKind::Block {
                    break;
                }
                record.parent.clone()
            };
            match parent {
                Some(parent) => current = parent,
                None => break,
            }
        }
        current
    }

    /// Writes a global binding on behalf of the global object.
    ///
    /// Writes to a `const` binding are ignored, as property writes on a
    /// non-writable property are in sloppy code.
    pub fn set_global_property(env: &EnvRef, name: &str, value: Value) {
        let mut record = env.borrow_mut();
        match record.bindings.get_mut(name) {
            Some(binding) if binding.mutable => binding.value = value,
            Some(_) => {},
            None => {
                record.bindings
                      .insert(name.to_string(), Binding { value, mutable: true });
            },
        }
    }
}
