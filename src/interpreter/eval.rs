/// Call-site classification.
///
/// Records whether a callee is spelled `eval` and combines that with the
/// callee's runtime value into an [`EvalMode`](call_site::EvalMode).
pub mod call_site;

/// Scope resolution.
///
/// Maps an eval mode to the environment record the sub-program runs against.
pub mod scope;

/// The eval dispatcher.
///
/// Evaluates call arguments, gates on the first argument's type, compiles the
/// source and runs it in the resolved scope.
pub mod dispatch;
