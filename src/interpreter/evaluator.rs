/// Binary operator evaluation logic.
///
/// Handles arithmetic, string concatenation, relational comparison and both
/// equality operators.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements negation, numeric conversion, logical not, `typeof` and the
/// update operators.
pub mod unary;

/// Core evaluation logic and context management.
///
/// Contains the runtime context, the completion model, expression evaluation,
/// statement execution and declaration hoisting.
pub mod core;

/// Environment records.
///
/// The chain of scopes bindings are resolved through, from block records up
/// to the global record.
pub mod environment;

/// Execution of `while` and `for` loops.
pub mod loops;

/// `try`, `catch` and `finally`.
///
/// Converts engine errors into the error objects scripts observe.
pub mod exception;

/// Utility functions for evaluation.
///
/// Provides assignment references, property access and callee descriptions
/// shared by the evaluation logic.
pub mod utils;

/// Function evaluation.
///
/// Handles closure and builtin calls, construction, and the builtin table.
pub mod function;
