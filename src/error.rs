use thiserror::Error;

/// Parsing errors.
///
/// Defines the syntax errors reported while lexing and parsing source code.
/// Every syntax error carries the 1-based line and column where parsing
/// stopped, and its message is exactly what a `SyntaxError` raised by `eval`
/// exposes as `message`.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation: errors the
/// engine raises itself (`ReferenceError`, `TypeError`, `RangeError`), syntax
/// errors surfaced through `eval`, and arbitrary values thrown by the program.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Any failure of a top-level run: the program did not compile, or it raised
/// an exception nobody caught.
#[derive(Debug, Error)]
pub enum Error {
    /// The program text is not syntactically valid.
    #[error("SyntaxError: {0}")]
    Parse(#[from] ParseError),
    /// Execution ended with an uncaught exception.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}
