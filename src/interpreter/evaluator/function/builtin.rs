use std::rc::Rc;

use crate::{
    ast::Position,
    error::RuntimeError,
    interpreter::{
        eval::scope::ResolvedScope,
        evaluator::{
            core::{Context, EvalResult},
            environment::{EnvRef, Environment},
        },
        value::{
            core::Value,
            function::Builtin,
            object::{ErrorKind, Object, ObjectKind},
        },
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin receives the context, the evaluated argument values and the
/// position of the call.
type BuiltinFn = fn(&mut Context, Vec<Value>, Position) -> EvalResult<Value>;

/// Defines the host builtins by generating a lookup table and a list of their
/// identities.
///
/// Each entry provides:
/// - the [`Builtin`] identity, which also gives its global name,
/// - the handler run when the builtin is called,
/// - the handler run by `new`, or `None` when it is not a constructor.
///
/// The macro produces:
/// - `BuiltinDef` (internal metadata),
/// - `BUILTIN_TABLE` (static table for lookup),
/// - `BUILTIN_FUNCTIONS` (public list of builtins, in installation order).
macro_rules! builtin_functions {
    (
        $(
            $builtin:expr => {
                call: $call:expr,
                construct: $construct:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            builtin:   Builtin,
            call:      BuiltinFn,
            construct: Option<BuiltinFn>,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { builtin: $builtin, call: $call, construct: $construct },
            )*
        ];
        pub const BUILTIN_FUNCTIONS: &[Builtin] = &[
            $($builtin,)*
        ];
    };
}

builtin_functions! {
    Builtin::Eval   => { call: eval_fn, construct: None },
    Builtin::Print  => { call: print_fn, construct: None },
    Builtin::Assert => { call: assert_fn, construct: None },
    Builtin::String => { call: string_fn, construct: Some(new_string_fn) },
    Builtin::Object => { call: object_fn, construct: Some(object_fn) },
    Builtin::Error(ErrorKind::Error)          => { call: error_ctor, construct: Some(error_ctor) },
    Builtin::Error(ErrorKind::TypeError)      => { call: type_error_ctor, construct: Some(type_error_ctor) },
    Builtin::Error(ErrorKind::ReferenceError) => { call: reference_error_ctor, construct: Some(reference_error_ctor) },
    Builtin::Error(ErrorKind::SyntaxError)    => { call: syntax_error_ctor, construct: Some(syntax_error_ctor) },
    Builtin::Error(ErrorKind::RangeError)     => { call: range_error_ctor, construct: Some(range_error_ctor) },
}

/// Populates the global record.
///
/// Installs every builtin under its name, the global object as `global` and
/// `globalThis`, and the constants `undefined`, `NaN` and `Infinity`.
pub(crate) fn install_globals(global: &EnvRef, global_object: &Rc<Object>) {
    for builtin in BUILTIN_FUNCTIONS {
        Environment::declare(global, builtin.name(), Value::Builtin(*builtin), true);
    }
    for name in ["global", "globalThis"] {
        Environment::declare(global, name, Value::Object(Rc::clone(global_object)), true);
    }
    Environment::declare(global, "undefined", Value::Undefined, false);
    Environment::declare(global, "NaN", Value::Number(f64::NAN), false);
    Environment::declare(global, "Infinity", Value::Number(f64::INFINITY), false);
}

impl Context {
    /// Calls a builtin with already evaluated arguments.
    ///
    /// Calling [`Builtin::Eval`] this way is an indirect eval: the source runs
    /// against the global record.
    pub(crate) fn call_builtin(&mut self,
                               builtin: Builtin,
                               args: Vec<Value>,
                               position: Position)
                               -> EvalResult<Value> {
        match BUILTIN_TABLE.iter().find(|def| def.builtin == builtin) {
            Some(def) => (def.call)(self, args, position),
            None => Err(RuntimeError::NotCallable { callee: builtin.name().to_string(),
                                                    position }),
        }
    }

    /// Runs `new` on a builtin.
    pub(crate) fn construct_builtin(&mut self,
                                    builtin: Builtin,
                                    args: Vec<Value>,
                                    position: Position)
                                    -> EvalResult<Value> {
        match BUILTIN_TABLE.iter()
                           .find(|def| def.builtin == builtin)
                           .and_then(|def| def.construct)
        {
            Some(construct) => construct(self, args, position),
            None => Err(RuntimeError::NotConstructor { callee: builtin.name().to_string(),
                                                       position }),
        }
    }
}

/// `eval` reached as a value: always an indirect eval against the global
/// record.
fn eval_fn(ctx: &mut Context, args: Vec<Value>, position: Position) -> EvalResult<Value> {
    ctx.perform_eval(&args, ResolvedScope::Global, position)
}

/// Writes the arguments to standard output, separated by spaces.
///
/// # Example
/// ```
/// use evalon::{
///     ast::Position,
///     config::Config,
///     interpreter::{
///         evaluator::{core::Context, function::builtin::print_fn},
///         value::core::Value,
///     },
/// };
///
/// let mut context = Context::new(Config::default());
/// let result = print_fn(&mut context, vec![Value::from("a"), Value::Number(1.0)], Position::START);
/// assert_eq!(result.unwrap(), Value::Undefined);
/// ```
pub fn print_fn(_: &mut Context, args: Vec<Value>, _: Position) -> EvalResult<Value> {
    let line = args.iter()
                   .map(Value::to_display_string)
                   .collect::<Vec<_>>()
                   .join(" ");
    println!("{line}");
    Ok(Value::Undefined)
}

/// Throws an `Error` when the first argument is falsy.
///
/// The thrown error's message is the second argument when given, otherwise
/// `Assertion failed`.
pub fn assert_fn(_: &mut Context, args: Vec<Value>, _: Position) -> EvalResult<Value> {
    if args.first().is_some_and(Value::to_boolean) {
        return Ok(Value::Undefined);
    }
    let message = args.get(1)
                      .map_or_else(|| "Assertion failed".to_string(), Value::to_display_string);
    Err(RuntimeError::Thrown(Value::Object(Object::error(ErrorKind::Error, &message))))
}

/// `String(value)`: converts to a primitive string.
fn string_fn(_: &mut Context, args: Vec<Value>, _: Position) -> EvalResult<Value> {
    Ok(Value::from(string_argument(&args)))
}

/// `new String(value)`: a boxed string, which is an object and not a string.
fn new_string_fn(_: &mut Context, args: Vec<Value>, _: Position) -> EvalResult<Value> {
    let text: Rc<str> = Rc::from(string_argument(&args));
    Ok(Value::Object(Object::new(ObjectKind::StringWrapper(text))))
}

fn string_argument(args: &[Value]) -> String {
    args.first()
        .map_or_else(String::new, |value| value.to_primitive().to_display_string())
}

/// `Object(value)` and `new Object(value)`: the value itself when it is an
/// object, otherwise a fresh plain object.
fn object_fn(_: &mut Context, args: Vec<Value>, _: Position) -> EvalResult<Value> {
    match args.into_iter().next() {
        Some(object @ Value::Object(_)) => Ok(object),
        _ => Ok(Value::Object(Object::new(ObjectKind::Plain))),
    }
}

fn error_fn(kind: ErrorKind, args: &[Value]) -> Value {
    let message = match args.first() {
        None | Some(Value::Undefined) => String::new(),
        Some(value) => value.to_display_string(),
    };
    Value::Object(Object::error(kind, &message))
}

macro_rules! error_constructors {
    ($($name:ident => $kind:ident),* $(,)?) => {
        $(
            fn $name(_: &mut Context, args: Vec<Value>, _: Position) -> EvalResult<Value> {
                Ok(error_fn(ErrorKind::$kind, &args))
            }
        )*
    };
}

error_constructors! {
    error_ctor           => Error,
    type_error_ctor      => TypeError,
    reference_error_ctor => ReferenceError,
    syntax_error_ctor    => SyntaxError,
    range_error_ctor     => RangeError,
}
