/// Object values.
///
/// Defines `Object`, the shared, identity-compared heap value behind plain
/// objects, boxed strings, error objects and the global object, together with
/// the `ErrorKind` catalogue of error constructors.
pub mod object;

/// Callable values.
///
/// Defines closures created from function definitions and the identities of
/// the host builtins, including the evaluation primitive.
pub mod function;

pub mod core;
