use std::{fmt, rc::Rc};

/// A 1-based source position.
///
/// Lines and columns both start at 1. Columns count characters, not bytes, so
/// a position stays meaningful for sources containing non-ASCII text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Line number, starting at 1.
    pub line:   usize,
    /// Column number, starting at 1.
    pub column: usize,
}

impl Position {
    /// The position of the first character of a source text.
    pub const START: Self = Self { line:   1,
                                   column: 1, };

    /// Creates a position from a line and a column.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line: {}, column: {}", self.line, self.column)
    }
}

/// Represents a literal value in the language.
///
/// `LiteralValue` covers the raw constants that can appear directly in source
/// code. It is converted into a runtime `Value` every time the literal is
/// evaluated.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A numeric literal such as `42` or `2.5e3`.
    Number(f64),
    /// A string literal, escapes already resolved.
    String(Rc<str>),
    /// `true` or `false`.
    Bool(bool),
    /// `null`.
    Null,
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::String(Rc::from(value))
    }
}

/// The syntactic shape of the callee of a call expression.
///
/// Computed once by the parser. Only a bare identifier spelled `eval` can make
/// a call eligible for direct eval; whether it actually is a direct eval is
/// decided at run time from the value that identifier resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallSite {
    /// The callee is written as the bare identifier `eval`.
    EvalReference,
    /// Any other callee: member access, parenthesised expression, other
    /// identifier names, call results.
    Ordinary,
}

/// An abstract syntax tree (AST) node representing an expression.
///
/// Every variant records the position where it starts, which is used for
/// runtime error messages.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value.
    Literal {
        /// The constant value.
        value:    LiteralValue,
        /// Position in the source code.
        position: Position,
    },
    /// Reference to a binding by name.
    Identifier {
        /// Name of the binding.
        name:     String,
        /// Position in the source code.
        position: Position,
    },
    /// A prefix unary operation.
    Unary {
        /// The unary operator to apply.
        op:       UnaryOperator,
        /// The operand expression.
        expr:     Box<Self>,
        /// Position in the source code.
        position: Position,
    },
    /// An arithmetic, comparison or equality operation.
    Binary {
        /// Left operand.
        left:     Box<Self>,
        /// The operator.
        op:       BinaryOperator,
        /// Right operand.
        right:    Box<Self>,
        /// Position in the source code.
        position: Position,
    },
    /// A short-circuiting `&&` or `||`.
    Logical {
        /// Left operand, always evaluated.
        left:     Box<Self>,
        /// The operator.
        op:       LogicalOperator,
        /// Right operand, evaluated only when needed.
        right:    Box<Self>,
        /// Position in the source code.
        position: Position,
    },
    /// `cond ? a : b`.
    Conditional {
        /// The condition.
        condition: Box<Self>,
        /// Value when the condition is truthy.
        then_expr: Box<Self>,
        /// Value when the condition is falsy.
        else_expr: Box<Self>,
        /// Position in the source code.
        position:  Position,
    },
    /// Simple (`=`) or compound (`+=`, `-=`, ...) assignment.
    Assign {
        /// Identifier or member expression being assigned.
        target:   Box<Self>,
        /// `None` for `=`, the combining operator for compound assignment.
        op:       Option<BinaryOperator>,
        /// The assigned expression.
        value:    Box<Self>,
        /// Position in the source code.
        position: Position,
    },
    /// `++x`, `x++`, `--x` or `x--`.
    Update {
        /// Identifier or member expression being updated.
        target:    Box<Self>,
        /// `true` for `++`, `false` for `--`.
        increment: bool,
        /// `true` when the operator precedes its operand.
        prefix:    bool,
        /// Position in the source code.
        position:  Position,
    },
    /// Function call expression (e.g. `f(x)`).
    Call {
        /// The callee expression.
        callee:    Box<Self>,
        /// Argument expressions, evaluated left to right.
        arguments: Vec<Self>,
        /// Syntactic shape of the callee.
        call_site: CallSite,
        /// Position in the source code.
        position:  Position,
    },
    /// `new Callee(args)`.
    New {
        /// The constructor expression.
        callee:    Box<Self>,
        /// Argument expressions.
        arguments: Vec<Self>,
        /// Position in the source code.
        position:  Position,
    },
    /// Property access with a static name (`object.name`).
    Member {
        /// The object expression.
        object:   Box<Self>,
        /// The property name.
        property: String,
        /// Position in the source code.
        position: Position,
    },
    /// Property access with a computed key (`object[key]`).
    Index {
        /// The object expression.
        object:   Box<Self>,
        /// The key expression, converted to a string.
        index:    Box<Self>,
        /// Position in the source code.
        position: Position,
    },
    /// Function expression or arrow function.
    Function(Rc<FunctionDef>),
    /// Object literal `{ key: value, ... }`.
    Object {
        /// Properties in source order.
        properties: Vec<(String, Self)>,
        /// Position in the source code.
        position:   Position,
    },
}

impl Expr {
    /// Gets the source position from `self`.
    ///
    /// ## Example
    /// ```
    /// use evalon::ast::{Expr, Position};
    ///
    /// let expr = Expr::Identifier { name:     "x".to_string(),
    ///                               position: Position::new(5, 3), };
    ///
    /// assert_eq!(expr.position(), Position::new(5, 3));
    /// ```
    #[must_use]
    pub fn position(&self) -> Position {
        match self {
            Self::Literal { position, .. }
            | Self::Identifier { position, .. }
            | Self::Unary { position, .. }
            | Self::Binary { position, .. }
            | Self::Logical { position, .. }
            | Self::Conditional { position, .. }
            | Self::Assign { position, .. }
            | Self::Update { position, .. }
            | Self::Call { position, .. }
            | Self::New { position, .. }
            | Self::Member { position, .. }
            | Self::Index { position, .. }
            | Self::Object { position, .. } => *position,
            Self::Function(def) => def.position,
        }
    }

    /// Whether the expression may appear on the left of an assignment.
    #[must_use]
    pub const fn is_reference(&self) -> bool {
        matches!(self,
                 Self::Identifier { .. } | Self::Member { .. } | Self::Index { .. })
    }
}

/// Body of a function.
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionBody {
    /// `{ statements }`.
    Block(Vec<Statement>),
    /// The concise body of an arrow function, `x => x + 1`.
    Expression(Box<Expr>),
}

/// A function declaration, function expression or arrow function.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// The function name, if any.
    pub name:     Option<String>,
    /// The parameter names.
    pub params:   Vec<String>,
    /// The function body.
    pub body:     FunctionBody,
    /// `true` for `=>` functions.
    pub is_arrow: bool,
    /// Position in the source code.
    pub position: Position,
}

/// How a declaration binds its names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    /// `var`, hoisted to the enclosing function or global record.
    Var,
    /// `let`, scoped to the enclosing block.
    Let,
    /// `const`, scoped to the enclosing block and not reassignable.
    Const,
}

/// One `name = init` item of a declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Declarator {
    /// The declared name.
    pub name: String,
    /// The initializer, if present.
    pub init: Option<Expr>,
}

/// Represents a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// An expression evaluated for its value.
    Expression {
        /// The expression to evaluate.
        expr:     Expr,
        /// Position in the source code.
        position: Position,
    },
    /// `var`, `let` or `const` declaration.
    VariableDeclaration {
        /// Declaration kind.
        kind:         DeclarationKind,
        /// The declared names and their initializers.
        declarations: Vec<Declarator>,
        /// Position in the source code.
        position:     Position,
    },
    /// `function name(params) { ... }`.
    FunctionDeclaration(Rc<FunctionDef>),
    /// `return expr;`
    Return {
        /// The returned expression, if any.
        value:    Option<Expr>,
        /// Position in the source code.
        position: Position,
    },
    /// `if (cond) stmt else stmt`.
    If {
        /// The condition.
        condition:   Expr,
        /// Statement run when the condition is truthy.
        then_branch: Box<Self>,
        /// Statement run when the condition is falsy.
        else_branch: Option<Box<Self>>,
        /// Position in the source code.
        position:    Position,
    },
    /// `while (cond) stmt`.
    While {
        /// The loop condition.
        condition: Expr,
        /// The loop body.
        body:      Box<Self>,
        /// Position in the source code.
        position:  Position,
    },
    /// `for (init; cond; update) stmt`.
    For {
        /// Initializer statement (declaration or expression).
        init:      Option<Box<Self>>,
        /// Loop condition; absent means always true.
        condition: Option<Expr>,
        /// Update expression run after each iteration.
        update:    Option<Expr>,
        /// The loop body.
        body:      Box<Self>,
        /// Position in the source code.
        position:  Position,
    },
    /// `{ statements }`.
    Block {
        /// Statements inside the block.
        statements: Vec<Self>,
        /// Position in the source code.
        position:   Position,
    },
    /// A lone `;`.
    Empty {
        /// Position in the source code.
        position: Position,
    },
    /// `break;`
    Break {
        /// Position in the source code.
        position: Position,
    },
    /// `continue;`
    Continue {
        /// Position in the source code.
        position: Position,
    },
    /// `throw expr;`
    Throw {
        /// The thrown expression.
        value:    Expr,
        /// Position in the source code.
        position: Position,
    },
    /// `try { } catch (e) { } finally { }`.
    Try {
        /// The protected block.
        block:     Vec<Self>,
        /// The catch clause: optional parameter name and body.
        handler:   Option<CatchClause>,
        /// The finally block.
        finalizer: Option<Vec<Self>>,
        /// Position in the source code.
        position:  Position,
    },
}

/// The `catch` part of a `try` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    /// Name bound to the caught value.
    pub param: Option<String>,
    /// Statements of the handler.
    pub body:  Vec<Statement>,
}

impl Statement {
    /// Gets the source position from `self`.
    #[must_use]
    pub fn position(&self) -> Position {
        match self {
            Self::Expression { position, .. }
            | Self::VariableDeclaration { position, .. }
            | Self::Return { position, .. }
            | Self::If { position, .. }
            | Self::While { position, .. }
            | Self::For { position, .. }
            | Self::Block { position, .. }
            | Self::Empty { position }
            | Self::Break { position }
            | Self::Continue { position }
            | Self::Throw { position, .. }
            | Self::Try { position, .. } => *position,
            Self::FunctionDeclaration(def) => def.position,
        }
    }
}

/// A compiled sub-program: the executable unit produced by the compiler.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// Top-level statements in source order.
    pub statements: Vec<Statement>,
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition or string concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Remainder (`%`)
    Mod,
    /// Loose equality (`==`)
    Equal,
    /// Loose inequality (`!=`)
    NotEqual,
    /// Strict equality (`===`)
    StrictEqual,
    /// Strict inequality (`!==`)
    StrictNotEqual,
    /// Less than (`<`)
    Less,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    Greater,
    /// Greater than or equal (`>=`)
    GreaterEqual,
}

/// Short-circuiting operators.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LogicalOperator {
    /// `&&`
    And,
    /// `||`
    Or,
}

/// Represents a prefix unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Numeric negation (`-`)
    Negate,
    /// Numeric conversion (`+`)
    Plus,
    /// Logical not (`!`)
    Not,
    /// `typeof`
    Typeof,
}
