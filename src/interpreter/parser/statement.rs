use crate::{
    ast::{CatchClause, DeclarationKind, Declarator, Statement},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            block::parse_block,
            core::{ParseResult, TokenStream, parse_expression},
            unary::parse_function_rest,
            utils::parse_identifier,
        },
    },
};

/// Parses a single statement.
///
/// A statement may be one of:
/// - a block or an empty statement,
/// - a `var`, `let` or `const` declaration,
/// - a function declaration,
/// - `return`, `if`, `while`, `for`, `break`, `continue`, `throw` or `try`,
/// - an expression used as a statement.
///
/// The leading token decides which; anything not starting with a statement
/// keyword is parsed as an expression statement.
///
/// # Parameters
/// - `tokens`: Token stream positioned at the start of the statement.
///
/// # Returns
/// A parsed [`Statement`] node.
pub fn parse_statement(tokens: &mut TokenStream) -> ParseResult<Statement> {
    let position = tokens.position();

    match tokens.peek() {
        Token::CurlyOpen => {
            tokens.next();
            let statements = parse_block(tokens)?;
            Ok(Statement::Block { statements, position })
        },
        Token::Semicolon => {
            tokens.next();
            Ok(Statement::Empty { position })
        },
        Token::Var | Token::Let | Token::Const => {
            let statement = parse_variable_declaration(tokens)?;
            consume_semicolon(tokens)?;
            Ok(statement)
        },
        Token::Function => parse_function_declaration(tokens),
        Token::Return => parse_return(tokens),
        Token::If => parse_if(tokens),
        Token::While => parse_while(tokens),
        Token::For => parse_for(tokens),
        Token::Break | Token::Continue => parse_loop_jump(tokens),
        Token::Throw => parse_throw(tokens),
        Token::Try => parse_try(tokens),
        _ => {
            let expr = parse_expression(tokens)?;
            consume_semicolon(tokens)?;
            Ok(Statement::Expression { expr, position })
        },
    }
}

/// Ends a statement.
///
/// A `;` is consumed when present. Otherwise a semicolon is implied before
/// `}`, at end of input, or when the next token starts a new line.
///
/// # Errors
/// `UnexpectedToken` expecting `Semicolon` in every other case.
fn consume_semicolon(tokens: &mut TokenStream) -> ParseResult<()> {
    if tokens.eat(&Token::Semicolon) {
        return Ok(());
    }
    match tokens.peek() {
        Token::CurlyClose | Token::Eof => Ok(()),
        _ if tokens.newline_before() => Ok(()),
        _ => Err(tokens.unexpected(Token::Semicolon.name())),
    }
}

/// Parses a variable declaration without its terminating semicolon.
///
/// A declaration has the form `var|let|const name (= init)? ("," name (=
/// init)?)*`. `const` declarations require an initializer.
///
/// # Errors
/// Returns a `ParseError` if a name is missing, a `const` lacks its
/// initializer, or an initializer fails to parse.
fn parse_variable_declaration(tokens: &mut TokenStream) -> ParseResult<Statement> {
    let position = tokens.position();
    let kind = match tokens.next() {
        Token::Let => DeclarationKind::Let,
        Token::Const => DeclarationKind::Const,
        _ => DeclarationKind::Var,
    };

    let mut declarations = Vec::new();
    loop {
        let name = parse_identifier(tokens)?;
        let init = if tokens.eat(&Token::Equals) {
            Some(parse_expression(tokens)?)
        } else if kind == DeclarationKind::Const {
            return Err(tokens.unexpected(Token::Equals.name()));
        } else {
            None
        };
        declarations.push(Declarator { name, init });

        if !tokens.eat(&Token::Comma) {
            break;
        }
    }

    Ok(Statement::VariableDeclaration { kind,
                                        declarations,
                                        position })
}

/// Parses `function name(params) { body }` in statement position.
fn parse_function_declaration(tokens: &mut TokenStream) -> ParseResult<Statement> {
    let position = tokens.position();
    tokens.expect(&Token::Function)?;
    let name = parse_identifier(tokens)?;

    let def = parse_function_rest(tokens, Some(name), position)?;
    Ok(Statement::FunctionDeclaration(def))
}

/// Parses `return expr?;`.
///
/// The returned expression must start on the same line as `return`.
///
/// # Errors
/// `IllegalStatement` outside of a function body.
fn parse_return(tokens: &mut TokenStream) -> ParseResult<Statement> {
    let position = tokens.position();
    if tokens.function_depth == 0 {
        return Err(ParseError::IllegalStatement { keyword: "return",
                                                  position });
    }
    tokens.next();

    let value = match tokens.peek() {
        Token::Semicolon | Token::CurlyClose | Token::Eof => None,
        _ if tokens.newline_before() => None,
        _ => Some(parse_expression(tokens)?),
    };
    consume_semicolon(tokens)?;

    Ok(Statement::Return { value, position })
}

/// Parses an `if` statement with an optional `else` branch.
///
/// Grammar: `if := "if" "(" expression ")" statement ("else" statement)?`
fn parse_if(tokens: &mut TokenStream) -> ParseResult<Statement> {
    let position = tokens.position();
    tokens.expect(&Token::If)?;
    tokens.expect(&Token::ParenOpen)?;
    let condition = parse_expression(tokens)?;
    tokens.expect(&Token::ParenClose)?;

    let then_branch = Box::new(parse_statement(tokens)?);
    let else_branch = if tokens.eat(&Token::Else) {
        Some(Box::new(parse_statement(tokens)?))
    } else {
        None
    };

    Ok(Statement::If { condition,
                       then_branch,
                       else_branch,
                       position })
}

/// Parses a `while` loop.
///
/// Grammar: `while := "while" "(" expression ")" statement`
fn parse_while(tokens: &mut TokenStream) -> ParseResult<Statement> {
    let position = tokens.position();
    tokens.expect(&Token::While)?;
    tokens.expect(&Token::ParenOpen)?;
    let condition = parse_expression(tokens)?;
    tokens.expect(&Token::ParenClose)?;

    let body = Box::new(parse_loop_body(tokens)?);
    Ok(Statement::While { condition,
                          body,
                          position })
}

/// Parses a C-style `for` loop.
///
/// Grammar:
/// ```text
///     for := "for" "(" (declaration | expression)? ";" expression? ";"
///            expression? ")" statement
/// ```
fn parse_for(tokens: &mut TokenStream) -> ParseResult<Statement> {
    let position = tokens.position();
    tokens.expect(&Token::For)?;
    tokens.expect(&Token::ParenOpen)?;

    let init = match tokens.peek() {
        Token::Semicolon => None,
        Token::Var | Token::Let | Token::Const => {
            Some(Box::new(parse_variable_declaration(tokens)?))
        },
        _ => {
            let init_position = tokens.position();
            let expr = parse_expression(tokens)?;
            Some(Box::new(Statement::Expression { expr,
                                                  position: init_position }))
        },
    };
    tokens.expect(&Token::Semicolon)?;

    let condition = if tokens.peek() == &Token::Semicolon {
        None
    } else {
        Some(parse_expression(tokens)?)
    };
    tokens.expect(&Token::Semicolon)?;

    let update = if tokens.peek() == &Token::ParenClose {
        None
    } else {
        Some(parse_expression(tokens)?)
    };
    tokens.expect(&Token::ParenClose)?;

    let body = Box::new(parse_loop_body(tokens)?);
    Ok(Statement::For { init,
                        condition,
                        update,
                        body,
                        position })
}

/// Parses a loop body, inside which `break` and `continue` are legal.
fn parse_loop_body(tokens: &mut TokenStream) -> ParseResult<Statement> {
    tokens.loop_depth += 1;
    let body = parse_statement(tokens);
    tokens.loop_depth -= 1;
    body
}

/// Parses `break;` or `continue;`.
///
/// # Errors
/// `IllegalStatement` outside of a loop body.
fn parse_loop_jump(tokens: &mut TokenStream) -> ParseResult<Statement> {
    let position = tokens.position();
    let is_break = tokens.peek() == &Token::Break;
    if tokens.loop_depth == 0 {
        return Err(ParseError::IllegalStatement { keyword: if is_break {
                                                      "break"
                                                  } else {
                                                      "continue"
                                                  },
                                                  position });
    }
    tokens.next();
    consume_semicolon(tokens)?;

    Ok(if is_break {
        Statement::Break { position }
    } else {
        Statement::Continue { position }
    })
}

/// Parses `throw expr;`.
///
/// The thrown expression must start on the same line as `throw`.
fn parse_throw(tokens: &mut TokenStream) -> ParseResult<Statement> {
    let position = tokens.position();
    tokens.expect(&Token::Throw)?;
    if tokens.newline_before() {
        return Err(tokens.unexpected("expression on the same line as throw"));
    }
    let value = parse_expression(tokens)?;
    consume_semicolon(tokens)?;

    Ok(Statement::Throw { value, position })
}

/// Parses a `try` statement.
///
/// Grammar:
/// ```text
///     try := "try" block ("catch" ("(" identifier ")")? block)? ("finally" block)?
/// ```
/// At least one of the `catch` and `finally` clauses must be present.
fn parse_try(tokens: &mut TokenStream) -> ParseResult<Statement> {
    let position = tokens.position();
    tokens.expect(&Token::Try)?;
    tokens.expect(&Token::CurlyOpen)?;
    let block = parse_block(tokens)?;

    let handler = if tokens.eat(&Token::Catch) {
        let param = if tokens.eat(&Token::ParenOpen) {
            let name = parse_identifier(tokens)?;
            tokens.expect(&Token::ParenClose)?;
            Some(name)
        } else {
            None
        };
        tokens.expect(&Token::CurlyOpen)?;
        Some(CatchClause { param,
                           body: parse_block(tokens)? })
    } else {
        None
    };

    let finalizer = if tokens.eat(&Token::Finally) {
        tokens.expect(&Token::CurlyOpen)?;
        Some(parse_block(tokens)?)
    } else {
        None
    };

    if handler.is_none() && finalizer.is_none() {
        return Err(tokens.unexpected(Token::Catch.name()));
    }

    Ok(Statement::Try { block,
                        handler,
                        finalizer,
                        position })
}
