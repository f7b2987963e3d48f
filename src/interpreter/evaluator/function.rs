/// Host builtins.
///
/// Contains the table of functions installed in the global record, among them
/// the evaluation primitive, and the code that installs them.
pub mod builtin;

/// Function calls and construction.
///
/// Runs closures in their own function record and dispatches builtin calls
/// and `new` expressions.
pub mod core;
