use crate::{
    ast::Expr,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, TokenStream, parse_expression},
    },
    util::num::format_number,
};

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by argument lists and parameter lists. It repeatedly
/// calls `parse_item` to parse one element, expecting either:
///
/// - a comma, to continue the list, or
/// - the specified closing token, to end it.
///
/// An immediately encountered closing token produces an empty list.
///
/// Grammar (simplified): `list := item ("," item)*`
///
/// # Parameters
/// - `tokens`: Token stream positioned after the opening token.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token that terminates the list.
///
/// # Errors
/// Returns a `ParseError` if an item fails to parse or if neither a comma nor
/// the closing token follows an item.
pub(in crate::interpreter::parser) fn parse_comma_separated<T>(
    tokens: &mut TokenStream,
    parse_item: impl Fn(&mut TokenStream) -> ParseResult<T>,
    closing: &Token)
    -> ParseResult<Vec<T>> {
    let mut items = Vec::new();
    if tokens.eat(closing) {
        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        if tokens.eat(&Token::Comma) {
            continue;
        }
        tokens.expect(closing)?;
        break;
    }
    Ok(items)
}

/// Parses call arguments up to and including the closing `)`.
pub(in crate::interpreter::parser) fn parse_arguments(tokens: &mut TokenStream)
                                                      -> ParseResult<Vec<Expr>> {
    parse_comma_separated(tokens, parse_expression, &Token::ParenClose)
}

/// Parses parameter names up to and including the closing `)`.
pub(in crate::interpreter::parser) fn parse_params(tokens: &mut TokenStream)
                                                   -> ParseResult<Vec<String>> {
    parse_comma_separated(tokens, parse_identifier, &Token::ParenClose)
}

/// Parses a plain identifier and returns its name.
///
/// # Errors
/// `UnexpectedToken` if the next token is not an identifier.
pub(in crate::interpreter::parser) fn parse_identifier(tokens: &mut TokenStream)
                                                       -> ParseResult<String> {
    match tokens.peek() {
        Token::Identifier(name) => {
            tokens.next();
            Ok(name.clone())
        },
        _ => Err(tokens.unexpected(Token::Identifier(String::new()).name())),
    }
}

/// Parses a property name: an identifier, a reserved word, a string literal
/// or a number (converted to its string form).
pub(in crate::interpreter::parser) fn parse_property_name(tokens: &mut TokenStream)
                                                          -> ParseResult<String> {
    let name = match tokens.peek() {
        Token::Identifier(name) | Token::StringLiteral(name) => name.clone(),
        Token::NumericLiteral(n) => format_number(*n),
        other => match other.keyword() {
            Some(word) => word.to_string(),
            None => return Err(tokens.unexpected("property name")),
        },
    };
    tokens.next();
    Ok(name)
}
