use logos::{Lexer, Logos};
use strum::IntoStaticStr;

use crate::{ast::Position, error::ParseError};

/// Represents a lexical token in the source input.
///
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// The variant names double as the token names used in syntax error
/// messages, e.g. `Unexpected token Eof. Expected CurlyClose`.
#[derive(Logos, IntoStaticStr, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Numeric literals such as `42`, `3.14`, `.5` or `2e10`.
    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?", parse_number)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", parse_number)]
    NumericLiteral(f64),
    /// String literals in single or double quotes, escapes resolved.
    #[regex(r#""([^"\\\n]|\\[^\n])*""#, parse_string)]
    #[regex(r"'([^'\\\n]|\\[^\n])*'", parse_string)]
    StringLiteral(String),
    /// `true` or `false`.
    #[token("true", |_| true)]
    #[token("false", |_| false)]
    BoolLiteral(bool),
    /// `null`
    #[token("null")]
    NullLiteral,
    /// `var`
    #[token("var")]
    Var,
    /// `let`
    #[token("let")]
    Let,
    /// `const`
    #[token("const")]
    Const,
    /// `function`
    #[token("function")]
    Function,
    /// `return`
    #[token("return")]
    Return,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `while`
    #[token("while")]
    While,
    /// `for`
    #[token("for")]
    For,
    /// `break`
    #[token("break")]
    Break,
    /// `continue`
    #[token("continue")]
    Continue,
    /// `new`
    #[token("new")]
    New,
    /// `typeof`
    #[token("typeof")]
    Typeof,
    /// `throw`
    #[token("throw")]
    Throw,
    /// `try`
    #[token("try")]
    Try,
    /// `catch`
    #[token("catch")]
    Catch,
    /// `finally`
    #[token("finally")]
    Finally,
    /// Identifier tokens such as `x`, `eval` or `$value`.
    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `// Comments.`
    #[regex(r"//[^\n]*", logos::skip, allow_greedy = true)]
    Comment,
    /// ```
    /// /* Multi line comments. */
    /// ```
    #[regex(r"/\*[^*]*\*+([^/*][^*]*\*+)*/", block_comment)]
    MultiLineComment,
    /// `{`
    #[token("{")]
    CurlyOpen,
    /// `}`
    #[token("}")]
    CurlyClose,
    /// `(`
    #[token("(")]
    ParenOpen,
    /// `)`
    #[token(")")]
    ParenClose,
    /// `[`
    #[token("[")]
    BracketOpen,
    /// `]`
    #[token("]")]
    BracketClose,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `,`
    #[token(",")]
    Comma,
    /// `.`
    #[token(".")]
    Period,
    /// `:`
    #[token(":")]
    Colon,
    /// `?`
    #[token("?")]
    QuestionMark,
    /// `=>`
    #[token("=>")]
    Arrow,
    /// `=`
    #[token("=")]
    Equals,
    /// `+=`
    #[token("+=")]
    PlusEquals,
    /// `-=`
    #[token("-=")]
    MinusEquals,
    /// `*=`
    #[token("*=")]
    AsteriskEquals,
    /// `/=`
    #[token("/=")]
    SlashEquals,
    /// `%=`
    #[token("%=")]
    PercentEquals,
    /// `++`
    #[token("++")]
    PlusPlus,
    /// `--`
    #[token("--")]
    MinusMinus,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Asterisk,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `===`
    #[token("===")]
    EqualsEqualsEquals,
    /// `==`
    #[token("==")]
    EqualsEquals,
    /// `!==`
    #[token("!==")]
    ExclamationMarkEqualsEquals,
    /// `!=`
    #[token("!=")]
    ExclamationMarkEquals,
    /// `<=`
    #[token("<=")]
    LessThanEquals,
    /// `>=`
    #[token(">=")]
    GreaterThanEquals,
    /// `<`
    #[token("<")]
    LessThan,
    /// `>`
    #[token(">")]
    GreaterThan,
    /// `&&`
    #[token("&&")]
    DoubleAmpersand,
    /// `||`
    #[token("||")]
    DoublePipe,
    /// `!`
    #[token("!")]
    ExclamationMark,
    /// Line terminators. Skipped, but recorded for semicolon insertion.
    #[token("\n", newline)]
    NewLine,
    /// Spaces, tabs, carriage returns and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
    /// End of input. Never produced by the lexer itself; [`tokenize`] appends
    /// it.
    Eof,
}

impl Token {
    /// The token kind name used in error messages.
    ///
    /// ## Example
    /// ```
    /// use evalon::interpreter::lexer::Token;
    ///
    /// assert_eq!(Token::CurlyClose.name(), "CurlyClose");
    /// assert_eq!(Token::Identifier("x".into()).name(), "Identifier");
    /// ```
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// The source text of a keyword or word literal token.
    ///
    /// Used where reserved words are valid property names, as in `e.catch` or
    /// `{ new: 1 }`.
    #[must_use]
    pub const fn keyword(&self) -> Option<&'static str> {
        let text = match self {
            Self::BoolLiteral(true) => "true",
            Self::BoolLiteral(false) => "false",
            Self::NullLiteral => "null",
            Self::Var => "var",
            Self::Let => "let",
            Self::Const => "const",
            Self::Function => "function",
            Self::Return => "return",
            Self::If => "if",
            Self::Else => "else",
            Self::While => "while",
            Self::For => "for",
            Self::Break => "break",
            Self::Continue => "continue",
            Self::New => "new",
            Self::Typeof => "typeof",
            Self::Throw => "throw",
            Self::Try => "try",
            Self::Catch => "catch",
            Self::Finally => "finally",
            _ => return None,
        };
        Some(text)
    }
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line and where it starts, for positions, and whether a
/// line terminator was skipped since the previous token, for semicolon
/// insertion.
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line:           usize,
    /// Byte offset at which the current line starts.
    pub line_start:     usize,
    /// Whether a line terminator was skipped since the last token.
    pub newline_before: bool,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line:           1,
               line_start:     0,
               newline_before: false, }
    }
}

/// A token together with where it sits in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    /// The token.
    pub token:          Token,
    /// Position of the first character of the token.
    pub start:          Position,
    /// Position just past the last character of the token.
    pub end:            Position,
    /// Whether a line terminator precedes the token.
    pub newline_before: bool,
}

/// Splits `source` into tokens, appending a final [`Token::Eof`].
///
/// ## Errors
/// Returns [`ParseError::InvalidToken`] for input that does not form a token,
/// such as an unterminated string or a stray `#`.
///
/// ## Example
/// ```
/// use evalon::{ast::Position, interpreter::lexer::{Token, tokenize}};
///
/// let tokens = tokenize("{").unwrap();
/// assert_eq!(tokens[0].token, Token::CurlyOpen);
/// assert_eq!(tokens[1].token, Token::Eof);
/// assert_eq!(tokens[1].start, Position::new(1, 2));
/// ```
pub fn tokenize(source: &str) -> Result<Vec<SpannedToken>, ParseError> {
    let mut lexer = Token::lexer_with_extras(source, LexerExtras::default());
    let mut tokens = Vec::new();

    while let Some(token) = lexer.next() {
        let span = lexer.span();
        let start = position_at(source, &lexer.extras, span.start);
        let Ok(token) = token else {
            return Err(ParseError::InvalidToken { text:     lexer.slice().to_string(),
                                                  position: start, });
        };
        let end = Position::new(start.line,
                                start.column + lexer.slice().chars().count());
        tokens.push(SpannedToken { token,
                                   start,
                                   end,
                                   newline_before: lexer.extras.newline_before });
        lexer.extras.newline_before = false;
    }

    let eof = position_at(source, &lexer.extras, source.len());
    tokens.push(SpannedToken { token:          Token::Eof,
                               start:          eof,
                               end:            eof,
                               newline_before: lexer.extras.newline_before, });
    Ok(tokens)
}

/// Converts a byte offset on the current line into a position.
fn position_at(source: &str, extras: &LexerExtras, offset: usize) -> Position {
    let start = extras.line_start.min(offset);
    let column = source.get(start..offset)
                       .map_or(0, |prefix| prefix.chars().count());
    Position::new(extras.line, column + 1)
}

/// Parses a numeric literal from the current token slice.
fn parse_number(lex: &Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Parses a quoted string literal, resolving escape sequences.
///
/// Unknown escapes resolve to the escaped character itself.
fn parse_string(lex: &Lexer<Token>) -> String {
    let slice = lex.slice();
    let inner = &slice[1..slice.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => {},
        }
    }
    out
}

/// Records a skipped line terminator.
fn newline(lex: &mut Lexer<Token>) -> logos::Skip {
    lex.extras.line += 1;
    lex.extras.line_start = lex.span().end;
    lex.extras.newline_before = true;
    logos::Skip
}

/// Skips a block comment, keeping line tracking in sync with any line
/// terminators inside it.
fn block_comment(lex: &mut Lexer<Token>) -> logos::Skip {
    let comment = lex.slice();
    if let Some(last) = comment.rfind('\n') {
        lex.extras.line += comment.matches('\n').count();
        lex.extras.line_start = lex.span().start + last + 1;
        lex.extras.newline_before = true;
    }
    logos::Skip
}
