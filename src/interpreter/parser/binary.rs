use crate::{
    ast::{BinaryOperator, Expr, LogicalOperator},
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, TokenStream},
            unary::parse_unary,
        },
    },
};

/// Parses logical OR expressions.
///
/// The rule is: `logical_or := logical_and ("||" logical_and)*`
pub fn parse_logical_or(tokens: &mut TokenStream) -> ParseResult<Expr> {
    let mut left = parse_logical_and(tokens)?;
    while tokens.peek() == &Token::DoublePipe {
        let position = left.position();
        tokens.next();
        let right = parse_logical_and(tokens)?;
        left = Expr::Logical { left: Box::new(left),
                               op: LogicalOperator::Or,
                               right: Box::new(right),
                               position };
    }
    Ok(left)
}

/// Parses logical AND expressions.
///
/// The rule is: `logical_and := equality ("&&" equality)*`
pub fn parse_logical_and(tokens: &mut TokenStream) -> ParseResult<Expr> {
    let mut left = parse_equality(tokens)?;
    while tokens.peek() == &Token::DoubleAmpersand {
        let position = left.position();
        tokens.next();
        let right = parse_equality(tokens)?;
        left = Expr::Logical { left: Box::new(left),
                               op: LogicalOperator::And,
                               right: Box::new(right),
                               position };
    }
    Ok(left)
}

/// Parses equality expressions.
///
/// Handles the left-associative operators `==`, `!=`, `===` and `!==`.
///
/// The rule is: `equality := relational (("==" | "!=" | "===" | "!==")
/// relational)*`
pub fn parse_equality(tokens: &mut TokenStream) -> ParseResult<Expr> {
    parse_left_associative(tokens, parse_relational, |op| {
        matches!(op,
                 BinaryOperator::Equal
                 | BinaryOperator::NotEqual
                 | BinaryOperator::StrictEqual
                 | BinaryOperator::StrictNotEqual)
    })
}

/// Parses relational expressions.
///
/// The rule is: `relational := additive (("<" | "<=" | ">" | ">=") additive)*`
pub fn parse_relational(tokens: &mut TokenStream) -> ParseResult<Expr> {
    parse_left_associative(tokens, parse_additive, |op| {
        matches!(op,
                 BinaryOperator::Less
                 | BinaryOperator::LessEqual
                 | BinaryOperator::Greater
                 | BinaryOperator::GreaterEqual)
    })
}

/// Parses addition and subtraction expressions.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
pub fn parse_additive(tokens: &mut TokenStream) -> ParseResult<Expr> {
    parse_left_associative(tokens, parse_multiplicative, |op| {
        matches!(op, BinaryOperator::Add | BinaryOperator::Sub)
    })
}

/// Parses multiplication-level expressions.
///
/// The rule is: `multiplicative := unary (("*" | "/" | "%") unary)*`
pub fn parse_multiplicative(tokens: &mut TokenStream) -> ParseResult<Expr> {
    parse_left_associative(tokens, parse_unary, |op| {
        matches!(op,
                 BinaryOperator::Mul | BinaryOperator::Div | BinaryOperator::Mod)
    })
}

/// Folds one precedence level of left-associative binary operators.
///
/// # Parameters
/// - `tokens`: Token stream.
/// - `operand`: Parser for the next-higher precedence level.
/// - `accepts`: Which operators belong to this level.
///
/// # Returns
/// An `Expr::Binary` tree, or the single operand when no operator follows.
fn parse_left_associative(tokens: &mut TokenStream,
                          operand: fn(&mut TokenStream) -> ParseResult<Expr>,
                          accepts: fn(BinaryOperator) -> bool)
                          -> ParseResult<Expr> {
    let mut left = operand(tokens)?;
    loop {
        if let Some(op) = token_to_binary_operator(tokens.peek())
           && accepts(op)
        {
            let position = left.position();
            tokens.next();
            let right = operand(tokens)?;
            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  position };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Maps a token to the binary operator it denotes, if any.
///
/// ## Example
/// ```
/// use evalon::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::EqualsEqualsEquals),
///            Some(BinaryOperator::StrictEqual));
/// assert_eq!(token_to_binary_operator(&Token::Comma), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    let op = match token {
        Token::Plus => BinaryOperator::Add,
        Token::Minus => BinaryOperator::Sub,
        Token::Asterisk => BinaryOperator::Mul,
        Token::Slash => BinaryOperator::Div,
        Token::Percent => BinaryOperator::Mod,
        Token::EqualsEquals => BinaryOperator::Equal,
        Token::ExclamationMarkEquals => BinaryOperator::NotEqual,
        Token::EqualsEqualsEquals => BinaryOperator::StrictEqual,
        Token::ExclamationMarkEqualsEquals => BinaryOperator::StrictNotEqual,
        Token::LessThan => BinaryOperator::Less,
        Token::LessThanEquals => BinaryOperator::LessEqual,
        Token::GreaterThan => BinaryOperator::Greater,
        Token::GreaterThanEquals => BinaryOperator::GreaterEqual,
        _ => return None,
    };
    Some(op)
}
