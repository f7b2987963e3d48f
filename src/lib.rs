//! # evalon
//!
//! evalon is a small interpreter for a JavaScript subset written in Rust,
//! built around the semantics of `eval`. A call written as a bare `eval(...)`
//! runs its source in the caller's scope; every other way of reaching the
//! evaluation primitive runs the source as top-level code in the global
//! scope.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    config::Config,
    error::Error,
    interpreter::{evaluator::core::Context, value::core::Value},
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` enums and related types
/// that represent the syntactic structure of source code as a tree. The AST is
/// built by the parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source positions to AST nodes for error reporting.
/// - Records the call-site shape of every call.
pub mod ast;
/// Engine configuration.
///
/// Holds the limits and output options a [`Context`] is created with.
pub mod config;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while compiling or
/// running code, with the positions where they occurred.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (parser, evaluator).
/// - Attaches line and column numbers for context.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, `eval` dispatch and
/// value representations to provide a complete runtime for source code.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Provides entry points for compiling and running user code.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General helpers shared across the interpreter.
///
/// # Responsibilities
/// - Convert numbers to and from their textual form.
pub mod util;

/// Compiles and runs a program in a fresh context.
///
/// # Returns
/// The completion value of the program: the value of its last
/// value-producing statement, or `undefined` when there is none.
///
/// # Errors
/// [`Error::Parse`] when the program does not compile, [`Error::Runtime`] when
/// it ends with an uncaught exception.
///
/// # Examples
/// ```
/// use evalon::{config::Config, interpreter::value::core::Value, run};
///
/// let config = Config::default();
/// assert_eq!(run("eval('1 + 2')", &config).unwrap(), Value::Number(3.0));
/// assert_eq!(run("var a = 1;", &config).unwrap(), Value::Undefined);
///
/// let err = run("missing", &config).unwrap_err();
/// assert_eq!(err.to_string(), "ReferenceError: 'missing' is not defined");
/// ```
pub fn run(source: &str, config: &Config) -> Result<Value, Error> {
    Context::new(config.clone()).run(source)
}

/// Runs a program with the default configuration.
///
/// If execution succeeds, it returns `Ok(())`, printing the completion value
/// first when `auto_print` is set and the value is not `undefined`.
///
/// # Errors
/// Returns an error if parsing fails or the program raises an uncaught
/// exception.
///
/// # Examples
/// ```
/// use evalon::get_result;
///
/// let source = "var result = eval('2 + 2'); assert(result === 4)";
/// assert!(get_result(source, false).is_ok());
///
/// // 'x' is not defined
/// let source = "var y = x + 1";
/// assert!(get_result(source, false).is_err());
/// ```
pub fn get_result(source: &str, auto_print: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config { print_result: auto_print,
                          ..Config::default() };
    let value = run(source, &config)?;

    if config.print_result && !matches!(value, Value::Undefined) {
        println!("{value}");
    }

    Ok(())
}
