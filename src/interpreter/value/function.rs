use std::{fmt, rc::Rc};

use crate::{
    ast::FunctionDef,
    interpreter::{evaluator::environment::EnvRef, value::object::ErrorKind},
};

/// A function value created from a declaration, function expression or arrow.
///
/// The closure captures the environment record that was current when it was
/// created; calls run in a fresh function record whose parent is that
/// captured record.
pub struct Closure {
    /// The definition shared with the syntax tree.
    pub def: Rc<FunctionDef>,
    /// The captured environment.
    pub env: EnvRef,
}

impl Closure {
    /// Creates a closure over `env`.
    #[must_use]
    pub fn new(def: Rc<FunctionDef>, env: EnvRef) -> Rc<Self> {
        Rc::new(Self { def, env })
    }

    /// The declared name of the function, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.def.name.as_deref()
    }
}

impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Function: {}]", self.name().unwrap_or("anonymous"))
    }
}

/// Identifies a host builtin.
///
/// Builtins carry no state, so two values holding the same variant are the
/// same function. In particular `Builtin::Eval` is the one and only
/// evaluation primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    /// `eval`
    Eval,
    /// `print`
    Print,
    /// `assert`
    Assert,
    /// `String`
    String,
    /// `Object`
    Object,
    /// `Error` and its subtypes.
    Error(ErrorKind),
}

impl Builtin {
    /// The global name the builtin is installed under.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Eval => "eval",
            Self::Print => "print",
            Self::Assert => "assert",
            Self::String => "String",
            Self::Object => "Object",
            Self::Error(kind) => kind.name(),
        }
    }
}
