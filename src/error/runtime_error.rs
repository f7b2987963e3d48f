use thiserror::Error;

use crate::{
    ast::Position,
    error::ParseError,
    interpreter::value::{core::Value, object::ErrorKind},
};

/// Represents all errors that can occur during evaluation and runtime.
///
/// Every variant except [`RuntimeError::Thrown`] is raised by the engine
/// itself. When a `try` statement catches one of them it is converted into an
/// error object whose `name` is [`RuntimeError::kind`] and whose `message` is
/// [`RuntimeError::message`].
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Read of an identifier that no environment record binds.
    #[error("ReferenceError: '{name}' is not defined")]
    UnknownVariable {
        /// The name of the variable.
        name:     String,
        /// Where the reference appeared.
        position: Position,
    },
    /// Attempted to call something that is not callable.
    #[error("TypeError: {callee} is not a function")]
    NotCallable {
        /// Source-ish description of the callee.
        callee:   String,
        /// Where the call appeared.
        position: Position,
    },
    /// Attempted `new` on something that is not a constructor.
    #[error("TypeError: {callee} is not a constructor")]
    NotConstructor {
        /// Source-ish description of the callee.
        callee:   String,
        /// Where the `new` expression appeared.
        position: Position,
    },
    /// Assignment to a `const` binding.
    #[error("TypeError: Assignment to constant variable.")]
    AssignmentToConstant {
        /// The name of the binding.
        name:     String,
        /// Where the assignment appeared.
        position: Position,
    },
    /// Property access on `undefined` or `null`.
    #[error("TypeError: Cannot access property '{property}' of {base}")]
    PropertyOfNullish {
        /// The property name.
        property: String,
        /// `undefined` or `null`.
        base:     &'static str,
        /// Where the access appeared.
        position: Position,
    },
    /// The configured call depth was exceeded.
    #[error("RangeError: Maximum call stack size exceeded")]
    CallStackExceeded {
        /// Where the call appeared.
        position: Position,
    },
    /// Source text handed to `eval` failed to compile.
    #[error("SyntaxError: {0}")]
    Syntax(#[from] ParseError),
    /// A value raised by `throw` (or by a host builtin) that nobody caught.
    #[error("Uncaught {0}")]
    Thrown(Value),
}

impl RuntimeError {
    /// The error constructor an engine-raised error corresponds to.
    ///
    /// Thrown values report [`ErrorKind::Error`]; their own `name` property is
    /// what scripts observe.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownVariable { .. } => ErrorKind::ReferenceError,
            Self::NotCallable { .. }
            | Self::NotConstructor { .. }
            | Self::AssignmentToConstant { .. }
            | Self::PropertyOfNullish { .. } => ErrorKind::TypeError,
            Self::CallStackExceeded { .. } => ErrorKind::RangeError,
            Self::Syntax(_) => ErrorKind::SyntaxError,
            Self::Thrown(_) => ErrorKind::Error,
        }
    }

    /// The message without the `Kind: ` prefix.
    ///
    /// ## Example
    /// ```
    /// use evalon::{
    ///     ast::Position,
    ///     error::RuntimeError,
    /// };
    ///
    /// let err = RuntimeError::UnknownVariable { name:     "j".to_string(),
    ///                                           position: Position::START, };
    /// assert_eq!(err.message(), "'j' is not defined");
    /// ```
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Syntax(err) => err.to_string(),
            Self::Thrown(value) => value.to_display_string(),
            other => {
                let full = other.to_string();
                let prefix = format!("{}: ", other.kind().name());
                full.strip_prefix(&prefix).map_or(full.clone(), str::to_string)
            },
        }
    }
}
