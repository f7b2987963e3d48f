use tracing::debug;

use crate::{ast::Program, error::ParseError, interpreter::lexer::tokenize};

/// Core parsing state and the expression entry point.
///
/// Contains the token stream the other parser modules share, the program
/// entry point, and the assignment and conditional levels of the expression
/// grammar.
pub mod core;

/// Unary, postfix, call, member and primary expressions.
///
/// Handles prefix operators, update operators, calls (including recording the
/// call-site shape), `new`, property access, literals, object literals,
/// function expressions and arrow functions.
pub mod unary;

/// Binary operator parsing.
///
/// Implements the precedence levels from logical OR down to multiplication.
pub mod binary;

/// Block parsing.
///
/// Parses brace-delimited statement lists.
pub mod block;

/// Utility functions for the parser.
///
/// Provides helpers for comma-separated lists, identifiers, parameter lists and
/// property names.
pub mod utils;

/// Statement parsing.
///
/// Implements declarations, control flow, `try`, and expression statements,
/// including automatic semicolon insertion.
pub mod statement;

/// Compiles source text into an executable [`Program`].
///
/// This is the sub-program compiler used both for top-level scripts and for
/// strings handed to `eval`.
///
/// ## Errors
/// Returns a [`ParseError`] positioned just past the last token that was
/// consumed successfully.
///
/// ## Example
/// ```
/// use evalon::interpreter::parser::compile;
///
/// assert_eq!(compile("1;;;").unwrap().statements.len(), 3);
///
/// let err = compile("{").unwrap_err();
/// assert_eq!(err.to_string(),
///            "Unexpected token Eof. Expected CurlyClose (line: 1, column: 2)");
/// ```
pub fn compile(source: &str) -> Result<Program, ParseError> {
    let tokens = tokenize(source)?;
    let mut stream = self::core::TokenStream::new(&tokens);
    let program = self::core::parse_program(&mut stream)?;
    debug!(statements = program.statements.len(), "compiled program");
    Ok(program)
}
