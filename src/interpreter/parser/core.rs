use crate::{
    ast::{BinaryOperator, Expr, Position, Program},
    error::ParseError,
    interpreter::{
        lexer::{SpannedToken, Token},
        parser::{binary::parse_logical_or, statement::parse_statement, unary::parse_arrow_function},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// The token cursor shared by all parsing functions.
///
/// Besides the current position it remembers where the last consumed token
/// ended, which is where syntax errors are reported, and how deeply the parser
/// is nested inside functions and loops, which decides whether `return`,
/// `break` and `continue` are legal.
///
/// The stream is cheap to clone; cloning is how the parser looks ahead.
#[derive(Clone)]
pub struct TokenStream<'a> {
    tokens:             &'a [SpannedToken],
    index:              usize,
    last_end:           Position,
    pub function_depth: usize,
    pub loop_depth:     usize,
}

impl<'a> TokenStream<'a> {
    /// Creates a stream over `tokens`, which must end with [`Token::Eof`].
    #[must_use]
    pub const fn new(tokens: &'a [SpannedToken]) -> Self {
        Self { tokens,
               index: 0,
               last_end: Position::START,
               function_depth: 0,
               loop_depth: 0 }
    }

    fn current(&self) -> &'a SpannedToken {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[self.index.min(last)]
    }

    /// The next token, without consuming it.
    #[must_use]
    pub fn peek(&self) -> &'a Token {
        &self.current().token
    }

    /// The token `n` places after the next one, without consuming anything.
    #[must_use]
    pub fn peek_nth(&self, n: usize) -> &'a Token {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[(self.index + n).min(last)].token
    }

    /// Whether a line terminator separates the next token from the previous
    /// one.
    #[must_use]
    pub fn newline_before(&self) -> bool {
        self.current().newline_before
    }

    /// Start position of the next token.
    #[must_use]
    pub fn position(&self) -> Position {
        self.current().start
    }

    /// Position just past the last consumed token.
    #[must_use]
    pub const fn last_end(&self) -> Position {
        self.last_end
    }

    /// Consumes and returns the next token. At the end of input this keeps
    /// returning [`Token::Eof`].
    pub fn next(&mut self) -> &'a Token {
        let current = self.current();
        if current.token != Token::Eof {
            self.index += 1;
            self.last_end = current.end;
        }
        &current.token
    }

    /// Consumes the next token if it equals `token`.
    pub fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == token {
            self.next();
            return true;
        }
        false
    }

    /// Consumes the next token, which must equal `token`.
    ///
    /// # Errors
    /// `UnexpectedToken` naming `token` as the expectation.
    pub fn expect(&mut self, token: &Token) -> ParseResult<()> {
        if self.eat(token) {
            return Ok(());
        }
        Err(self.unexpected(token.name()))
    }

    /// Builds the error for an unexpected next token.
    #[must_use]
    pub fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::UnexpectedToken { found:    self.peek().name(),
                                      expected: expected.to_string(),
                                      position: self.last_end, }
    }
}

/// Parses a whole program: statements until end of input.
///
/// Grammar: `program := statement* Eof`
///
/// # Parameters
/// - `tokens`: The token stream, positioned at its start.
///
/// # Returns
/// The [`Program`] holding every top-level statement.
pub fn parse_program(tokens: &mut TokenStream) -> ParseResult<Program> {
    let mut statements = Vec::new();

    while tokens.peek() != &Token::Eof {
        statements.push(parse_statement(tokens)?);
    }

    Ok(Program { statements })
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, assignment, and recursively descends through the
/// precedence hierarchy.
///
/// Grammar:
/// ```text
///     expression := arrow_function
///                 | conditional (assignment_operator expression)?
/// ```
/// Assignment is right-associative, so `a = b = 1` assigns `1` to both.
///
/// # Errors
/// - `InvalidAssignmentTarget` if the left side of an assignment is not an
///   identifier or property access.
/// - Propagates any errors from sub-expression parsing.
pub fn parse_expression(tokens: &mut TokenStream) -> ParseResult<Expr> {
    if is_arrow_function_ahead(tokens) {
        return parse_arrow_function(tokens);
    }

    let position = tokens.position();
    let left = parse_conditional(tokens)?;

    let op = match tokens.peek() {
        Token::Equals => None,
        Token::PlusEquals => Some(BinaryOperator::Add),
        Token::MinusEquals => Some(BinaryOperator::Sub),
        Token::AsteriskEquals => Some(BinaryOperator::Mul),
        Token::SlashEquals => Some(BinaryOperator::Div),
        Token::PercentEquals => Some(BinaryOperator::Mod),
        _ => return Ok(left),
    };
    if !left.is_reference() {
        return Err(ParseError::InvalidAssignmentTarget { position: tokens.last_end() });
    }
    tokens.next();

    let value = parse_expression(tokens)?;
    Ok(Expr::Assign { target: Box::new(left),
                      op,
                      value: Box::new(value),
                      position })
}

/// Parses a conditional (`cond ? a : b`) expression.
///
/// Grammar: `conditional := logical_or ("?" expression ":" expression)?`
pub fn parse_conditional(tokens: &mut TokenStream) -> ParseResult<Expr> {
    let position = tokens.position();
    let condition = parse_logical_or(tokens)?;

    if !tokens.eat(&Token::QuestionMark) {
        return Ok(condition);
    }
    let then_expr = parse_expression(tokens)?;
    tokens.expect(&Token::Colon)?;
    let else_expr = parse_expression(tokens)?;

    Ok(Expr::Conditional { condition: Box::new(condition),
                           then_expr: Box::new(then_expr),
                           else_expr: Box::new(else_expr),
                           position })
}

/// Looks ahead for the start of an arrow function without consuming input.
///
/// Matches `ident =>` and `( ... ) =>` with balanced parentheses.
fn is_arrow_function_ahead(tokens: &TokenStream) -> bool {
    match tokens.peek() {
        Token::Identifier(_) => tokens.peek_nth(1) == &Token::Arrow,
        Token::ParenOpen => {
            let mut lookahead = tokens.clone();
            lookahead.next();
            let mut parens = 1usize;
            while parens > 0 {
                match lookahead.next() {
                    Token::ParenOpen => parens += 1,
                    Token::ParenClose => parens -= 1,
                    Token::Eof => return false,
                    _ => {},
                }
            }
            lookahead.peek() == &Token::Arrow
        },
        _ => false,
    }
}
