use crate::{
    ast::{CallSite, Expr},
    interpreter::value::core::Value,
};

/// The identifier that makes a call site eligible for direct eval.
pub const EVAL_NAME: &str = "eval";

/// How a call is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalMode {
    /// The call site spells `eval` and that name currently resolves to the
    /// evaluation primitive: the source runs in the caller's scope.
    Direct,
    /// Any other call. The callee is invoked as an ordinary function; when it
    /// happens to be the evaluation primitive, the source runs against the
    /// global record.
    Indirect,
}

/// Computes the syntactic shape of a callee.
///
/// Only a bare identifier named [`EVAL_NAME`] qualifies. Property accesses,
/// other names and computed callees are ordinary.
///
/// ## Example
/// ```
/// use evalon::{
///     ast::{CallSite, Expr, Position},
///     interpreter::eval::call_site::classify_callee,
/// };
///
/// let eval = Expr::Identifier { name:     "eval".to_string(),
///                               position: Position::START, };
/// assert_eq!(classify_callee(&eval), CallSite::EvalReference);
///
/// let alias = Expr::Identifier { name:     "eval1".to_string(),
///                                position: Position::START, };
/// assert_eq!(classify_callee(&alias), CallSite::Ordinary);
/// ```
#[must_use]
pub fn classify_callee(callee: &Expr) -> CallSite {
    match callee {
        Expr::Identifier { name, .. } if name == EVAL_NAME => CallSite::EvalReference,
        _ => CallSite::Ordinary,
    }
}

/// Decides between direct and indirect dispatch.
///
/// The decision has two parts: the call-site shape fixed at parse time, and
/// the value the callee resolved to for this particular call. Both must point
/// at the evaluation primitive for a direct eval.
///
/// ## Example
/// ```
/// use evalon::{
///     ast::CallSite,
///     interpreter::{
///         eval::call_site::{EvalMode, classify},
///         value::{core::Value, function::Builtin},
///     },
/// };
///
/// let eval = Value::Builtin(Builtin::Eval);
/// assert_eq!(classify(CallSite::EvalReference, &eval), EvalMode::Direct);
/// assert_eq!(classify(CallSite::Ordinary, &eval), EvalMode::Indirect);
/// assert_eq!(classify(CallSite::EvalReference, &Value::Undefined), EvalMode::Indirect);
/// ```
#[must_use]
pub const fn classify(call_site: CallSite, callee: &Value) -> EvalMode {
    match call_site {
        CallSite::EvalReference if callee.is_eval_primitive() => EvalMode::Direct,
        _ => EvalMode::Indirect,
    }
}
