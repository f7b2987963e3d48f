use crate::{
    ast::Statement,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, TokenStream},
            statement::parse_statement,
        },
    },
};

/// Parses the statements of a block delimited by braces.
///
/// A block consists of zero or more statements. Parsing continues until a
/// closing `}` token is encountered; running out of input first is an error
/// reported just past the last consumed token, so `{` alone fails with
/// `Unexpected token Eof. Expected CurlyClose (line: 1, column: 2)`.
///
/// Grammar: `block := "{" statement* "}"`
///
/// # Parameters
/// - `tokens`: Token stream positioned after the opening brace.
///
/// # Returns
/// The statements of the block.
pub fn parse_block(tokens: &mut TokenStream) -> ParseResult<Vec<Statement>> {
    let mut statements = Vec::new();

    loop {
        match tokens.peek() {
            Token::CurlyClose => {
                tokens.next();
                break;
            },
            Token::Eof => return Err(tokens.unexpected(Token::CurlyClose.name())),
            _ => statements.push(parse_statement(tokens)?),
        }
    }

    Ok(statements)
}
