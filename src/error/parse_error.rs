use thiserror::Error;

use crate::ast::Position;

/// Represents all errors that can occur during lexing or parsing.
///
/// The `Display` output is the message carried by the `SyntaxError` that
/// `eval` raises, e.g.
/// `Unexpected token Eof. Expected CurlyClose (line: 1, column: 2)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Found a token the grammar does not allow at this point.
    #[error("Unexpected token {found}. Expected {expected} ({position})")]
    UnexpectedToken {
        /// Kind name of the token encountered (`Eof`, `Identifier`, ...).
        found:    &'static str,
        /// What the parser was looking for.
        expected: String,
        /// Position just past the last successfully consumed token.
        position: Position,
    },
    /// The lexer could not form a token from the input.
    #[error("Invalid token '{text}' ({position})")]
    InvalidToken {
        /// The offending source text.
        text:     String,
        /// Position of the offending text.
        position: Position,
    },
    /// The left-hand side of an assignment or update is not a reference.
    #[error("Invalid left-hand side in assignment ({position})")]
    InvalidAssignmentTarget {
        /// Position just past the last successfully consumed token.
        position: Position,
    },
    /// `return`, `break` or `continue` used where it has no meaning.
    #[error("Illegal {keyword} statement ({position})")]
    IllegalStatement {
        /// The keyword (`return`, `break`, `continue`).
        keyword:  &'static str,
        /// Position of the keyword.
        position: Position,
    },
}

impl ParseError {
    /// The position the error refers to.
    #[must_use]
    pub const fn position(&self) -> crate::ast::Position {
        match self {
            Self::UnexpectedToken { position, .. }
            | Self::InvalidToken { position, .. }
            | Self::InvalidAssignmentTarget { position }
            | Self::IllegalStatement { position, .. } => *position,
        }
    }

    /// The 1-based line of the error.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.position().line
    }

    /// The 1-based column of the error.
    #[must_use]
    pub const fn column(&self) -> usize {
        self.position().column
    }
}
