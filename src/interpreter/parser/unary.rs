use std::rc::Rc;

use crate::{
    ast::{CallSite, Expr, FunctionBody, FunctionDef, LiteralValue, Position, UnaryOperator},
    error::ParseError,
    interpreter::{
        eval::call_site::classify_callee,
        lexer::Token,
        parser::{
            block::parse_block,
            core::{ParseResult, TokenStream, parse_expression},
            utils::{parse_arguments, parse_identifier, parse_params, parse_property_name},
        },
    },
};

/// Parses a unary expression.
///
/// Supports prefix operators:
/// - `-`  (numeric negation)
/// - `+`  (numeric conversion)
/// - `!`  (logical not)
/// - `typeof`
/// - `++` and `--` (prefix update)
///
/// Unary operators are right-associative, so an input like `!-x` is parsed as
/// `!( -x )`.
///
/// Grammar:
/// ```text
///     unary := ("-" | "+" | "!" | "typeof") unary
///            | ("++" | "--") unary
///            | postfix
/// ```
/// # Errors
/// Returns `InvalidAssignmentTarget` when a prefix update is applied to
/// something other than an identifier or property access.
pub(crate) fn parse_unary(tokens: &mut TokenStream) -> ParseResult<Expr> {
    let position = tokens.position();
    let op = match tokens.peek() {
        Token::Minus => UnaryOperator::Negate,
        Token::Plus => UnaryOperator::Plus,
        Token::ExclamationMark => UnaryOperator::Not,
        Token::Typeof => UnaryOperator::Typeof,
        Token::PlusPlus | Token::MinusMinus => {
            let increment = tokens.next() == &Token::PlusPlus;
            let target = parse_unary(tokens)?;
            if !target.is_reference() {
                return Err(ParseError::InvalidAssignmentTarget { position: tokens.last_end() });
            }
            return Ok(Expr::Update { target: Box::new(target),
                                     increment,
                                     prefix: true,
                                     position });
        },
        _ => return parse_postfix(tokens),
    };
    tokens.next();
    let expr = parse_unary(tokens)?;

    Ok(Expr::Unary { op,
                     expr: Box::new(expr),
                     position })
}

/// Parses a postfix update (`x++`, `x--`).
///
/// A line terminator between the operand and the operator ends the expression
/// instead, so that
/// ```text
///     a
///     ++b
/// ```
/// reads as two statements.
fn parse_postfix(tokens: &mut TokenStream) -> ParseResult<Expr> {
    let expr = parse_call_member(tokens)?;

    let increment = match tokens.peek() {
        Token::PlusPlus if !tokens.newline_before() => true,
        Token::MinusMinus if !tokens.newline_before() => false,
        _ => return Ok(expr),
    };
    if !expr.is_reference() {
        return Err(ParseError::InvalidAssignmentTarget { position: tokens.last_end() });
    }
    tokens.next();

    let position = expr.position();
    Ok(Expr::Update { target: Box::new(expr),
                      increment,
                      prefix: false,
                      position })
}

/// Parses calls and property accesses applied to a primary expression.
///
/// Each call records the syntactic shape of its callee. A callee wrapped in
/// parentheses never counts as a bare `eval` reference, so `(eval)(src)` is an
/// ordinary call.
///
/// Grammar:
/// ```text
///     call_member := (new_expression | primary) call_tail*
///     call_tail   := "(" arguments ")" | "." name | "[" expression "]"
/// ```
fn parse_call_member(tokens: &mut TokenStream) -> ParseResult<Expr> {
    let parenthesized = tokens.peek() == &Token::ParenOpen;
    let mut node = if tokens.peek() == &Token::New {
        parse_new(tokens)?
    } else {
        parse_primary(tokens)?
    };
    let mut first_tail = true;

    loop {
        let position = node.position();
        match tokens.peek() {
            Token::ParenOpen => {
                tokens.next();
                let arguments = parse_arguments(tokens)?;
                let call_site = if parenthesized && first_tail {
                    CallSite::Ordinary
                } else {
                    classify_callee(&node)
                };
                node = Expr::Call { callee: Box::new(node),
                                    arguments,
                                    call_site,
                                    position };
            },
            Token::Period | Token::BracketOpen => node = parse_member_tail(tokens, node)?,
            _ => break,
        }
        first_tail = false;
    }
    Ok(node)
}

/// Parses one `.name` or `[expr]` access applied to `object`.
fn parse_member_tail(tokens: &mut TokenStream, object: Expr) -> ParseResult<Expr> {
    let position = object.position();
    if tokens.eat(&Token::Period) {
        let property = parse_property_name(tokens)?;
        return Ok(Expr::Member { object: Box::new(object),
                                 property,
                                 position });
    }

    tokens.expect(&Token::BracketOpen)?;
    let index = parse_expression(tokens)?;
    tokens.expect(&Token::BracketClose)?;
    Ok(Expr::Index { object: Box::new(object),
                     index: Box::new(index),
                     position })
}

/// Parses `new Callee(args)`.
///
/// The callee is a primary expression followed by property accesses only; the
/// argument list is optional (`new Object` is allowed).
fn parse_new(tokens: &mut TokenStream) -> ParseResult<Expr> {
    let position = tokens.position();
    tokens.expect(&Token::New)?;

    let mut callee = if tokens.peek() == &Token::New {
        parse_new(tokens)?
    } else {
        parse_primary(tokens)?
    };
    while matches!(tokens.peek(), Token::Period | Token::BracketOpen) {
        callee = parse_member_tail(tokens, callee)?;
    }

    let arguments = if tokens.eat(&Token::ParenOpen) {
        parse_arguments(tokens)?
    } else {
        Vec::new()
    };

    Ok(Expr::New { callee: Box::new(callee),
                   arguments,
                   position })
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar and include:
/// - numeric, string, boolean and `null` literals
/// - identifiers
/// - parenthesized expressions
/// - object literals (`{ ... }`)
/// - function expressions
///
/// Grammar (simplified):
/// ```text
///     primary := literal
///              | identifier
///              | "(" expression ")"
///              | "{" properties "}"
///              | function_expression
/// ```
/// # Errors
/// `UnexpectedToken` when the next token cannot start an expression.
pub(crate) fn parse_primary(tokens: &mut TokenStream) -> ParseResult<Expr> {
    let position = tokens.position();
    let value = match tokens.peek() {
        Token::NumericLiteral(n) => LiteralValue::Number(*n),
        Token::StringLiteral(s) => LiteralValue::String(Rc::from(s.as_str())),
        Token::BoolLiteral(b) => LiteralValue::Bool(*b),
        Token::NullLiteral => LiteralValue::Null,
        Token::Identifier(_) => {
            let name = parse_identifier(tokens)?;
            return Ok(Expr::Identifier { name, position });
        },
        Token::ParenOpen => return parse_grouping(tokens),
        Token::CurlyOpen => return parse_object_literal(tokens),
        Token::Function => return parse_function_expression(tokens),
        _ => return Err(tokens.unexpected("primary expression")),
    };
    tokens.next();

    Ok(Expr::Literal { value, position })
}

/// Parses a parenthesized expression.
///
/// Grammar: `grouping := "(" expression ")"`
fn parse_grouping(tokens: &mut TokenStream) -> ParseResult<Expr> {
    tokens.expect(&Token::ParenOpen)?;
    let expr = parse_expression(tokens)?;
    tokens.expect(&Token::ParenClose)?;
    Ok(expr)
}

/// Parses an object literal.
///
/// Keys may be identifiers, reserved words, strings or numbers. A trailing
/// comma is accepted.
///
/// Grammar: `object := "{" (name ":" expression ("," name ":" expression)*
/// ","?)? "}"`
fn parse_object_literal(tokens: &mut TokenStream) -> ParseResult<Expr> {
    let position = tokens.position();
    tokens.expect(&Token::CurlyOpen)?;

    let mut properties = Vec::new();
    while !tokens.eat(&Token::CurlyClose) {
        let key = parse_property_name(tokens)?;
        tokens.expect(&Token::Colon)?;
        let value = parse_expression(tokens)?;
        properties.push((key, value));

        if !tokens.eat(&Token::Comma) {
            tokens.expect(&Token::CurlyClose)?;
            break;
        }
    }

    Ok(Expr::Object { properties, position })
}

/// Parses `function name?(params) { body }` in expression position.
fn parse_function_expression(tokens: &mut TokenStream) -> ParseResult<Expr> {
    let position = tokens.position();
    tokens.expect(&Token::Function)?;

    let name = if matches!(tokens.peek(), Token::Identifier(_)) {
        Some(parse_identifier(tokens)?)
    } else {
        None
    };

    let def = parse_function_rest(tokens, name, position)?;
    Ok(Expr::Function(def))
}

/// Parses the parameter list and block body shared by function declarations
/// and function expressions.
///
/// # Parameters
/// - `tokens`: Token stream positioned at `(`.
/// - `name`: The function name, if any.
/// - `position`: Position of the `function` keyword.
pub(crate) fn parse_function_rest(tokens: &mut TokenStream,
                                  name: Option<String>,
                                  position: Position)
                                  -> ParseResult<Rc<FunctionDef>> {
    tokens.expect(&Token::ParenOpen)?;
    let params = parse_params(tokens)?;
    let body = parse_function_body(tokens)?;

    Ok(Rc::new(FunctionDef { name,
                             params,
                             body: FunctionBody::Block(body),
                             is_arrow: false,
                             position }))
}

/// Parses an arrow function.
///
/// Grammar:
/// ```text
///     arrow := (identifier | "(" params ")") "=>" (block | expression)
/// ```
pub(crate) fn parse_arrow_function(tokens: &mut TokenStream) -> ParseResult<Expr> {
    let position = tokens.position();
    let params = if tokens.eat(&Token::ParenOpen) {
        parse_params(tokens)?
    } else {
        vec![parse_identifier(tokens)?]
    };
    tokens.expect(&Token::Arrow)?;

    let body = if tokens.peek() == &Token::CurlyOpen {
        FunctionBody::Block(parse_function_body(tokens)?)
    } else {
        let outer_loops = std::mem::take(&mut tokens.loop_depth);
        tokens.function_depth += 1;
        let expr = parse_expression(tokens);
        tokens.function_depth -= 1;
        tokens.loop_depth = outer_loops;
        FunctionBody::Expression(Box::new(expr?))
    };

    Ok(Expr::Function(Rc::new(FunctionDef { name: None,
                                            params,
                                            body,
                                            is_arrow: true,
                                            position })))
}

/// Parses `{ statements }` as a function body.
///
/// Inside the body `return` is legal and enclosing loops are not visible to
/// `break`/`continue`.
fn parse_function_body(tokens: &mut TokenStream) -> ParseResult<Vec<crate::ast::Statement>> {
    tokens.expect(&Token::CurlyOpen)?;
    let outer_loops = std::mem::take(&mut tokens.loop_depth);
    tokens.function_depth += 1;

    let body = parse_block(tokens);

    tokens.function_depth -= 1;
    tokens.loop_depth = outer_loops;
    body
}
