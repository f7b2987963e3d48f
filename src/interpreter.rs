/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the AST, evaluates expressions and statements,
/// manages environment records, calls functions and produces completion
/// values. It is the core execution engine of the interpreter.
///
/// # Responsibilities
/// - Evaluates AST nodes, performing all supported operations.
/// - Handles bindings, functions, exceptions and control flow.
/// - Reports runtime errors such as unresolved references or calls of
///   non-functions.
pub mod evaluator;
/// Direct and indirect `eval`.
///
/// A call to the evaluation primitive runs a source string in one of two
/// modes. Which one is decided by the call site, not by the function value:
/// only a call written as a bare `eval(...)` whose callee resolves to the
/// primitive is direct and sees the caller's bindings. Every other way of
/// reaching the primitive, such as `global.eval(...)` or an alias, runs the
/// source as top-level code.
///
/// # Responsibilities
/// - Classifies call sites.
/// - Resolves the scope a sub-program runs in.
/// - Evaluates arguments, compiles the source and runs it.
pub mod eval;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (tokenizer) reads the raw source text and produces a stream of
/// tokens, each corresponding to meaningful language elements such as numbers,
/// strings, identifiers, keywords and operators. This is the first stage of
/// interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with start and end
///   positions.
/// - Records line breaks for automatic semicolon insertion.
/// - Reports lexical errors for invalid input.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and constructs
/// an AST that represents the syntactic structure of statements and
/// expressions.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (expressions, statements).
/// - Validates grammar, reporting errors with line and column.
/// - Marks every call with the syntactic shape of its callee.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares the value types used during interpretation: the
/// primitives, objects, closures and host builtins, together with the
/// conversions and equality relations between them.
///
/// # Responsibilities
/// - Defines the `Value` enum and all supported value variants.
/// - Implements type conversion and comparison.
/// - Identifies the evaluation primitive among the builtins.
pub mod value;

pub use parser::compile;
