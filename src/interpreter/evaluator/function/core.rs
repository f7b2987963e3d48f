use std::rc::Rc;

use crate::{
    ast::{Expr, FunctionBody, Position},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Completion, Context, EvalResult},
            environment::{Environment, ScopeKind},
            utils::describe_callee,
        },
        value::{
            core::Value,
            function::Closure,
            object::{Object, ObjectKind},
        },
    },
};

impl Context {
    /// Calls a function value with already evaluated arguments.
    ///
    /// Closures run in a new function record; builtins run their host
    /// handler. No special scoping applies: calling the evaluation primitive
    /// here is an indirect eval.
    ///
    /// # Errors
    /// `NotCallable` when `function` is neither a closure nor a builtin, and
    /// whatever the function itself raises.
    ///
    /// # Example
    /// ```
    /// use evalon::{
    ///     ast::Position,
    ///     config::Config,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let mut context = Context::new(Config::default());
    /// let square = context.run("(x) => x * x").unwrap();
    ///
    /// let result = context.call_function(&square, vec![Value::Number(7.0)], Position::START);
    /// assert_eq!(result.unwrap(), Value::Number(49.0));
    /// ```
    pub fn call_function(&mut self,
                         function: &Value,
                         args: Vec<Value>,
                         position: Position)
                         -> EvalResult<Value> {
        match function {
            Value::Function(closure) => self.call_closure(closure, args, position),
            Value::Builtin(builtin) => self.call_builtin(*builtin, args, position),
            other => Err(RuntimeError::NotCallable { callee: other.to_display_string(),
                                                     position }),
        }
    }

    /// Executes a closure.
    ///
    /// Parameters are bound in a fresh function record whose parent is the
    /// captured record; missing arguments are `undefined` and extra ones are
    /// ignored. Declarations in the body are hoisted before it runs.
    ///
    /// # Returns
    /// The value of the first `return` executed, `undefined` when the body
    /// runs off its end, or the value of a concise arrow body.
    fn call_closure(&mut self,
                    closure: &Rc<Closure>,
                    args: Vec<Value>,
                    position: Position)
                    -> EvalResult<Value> {
        self.with_call_depth(position, |ctx| {
                let env = Environment::new_child(&closure.env, ScopeKind::Function);
                let mut args = args.into_iter();
                for param in &closure.def.params {
                    Environment::declare(&env, param, args.next().unwrap_or(Value::Undefined), true);
                }

                match &closure.def.body {
                    FunctionBody::Expression(expr) => ctx.eval(expr, &env),
                    FunctionBody::Block(statements) => {
                        Self::hoist_declarations(statements, &env);
                        match ctx.exec_statements(statements, &env)? {
                            Completion::Return(value) => Ok(value),
                            _ => Ok(Value::Undefined),
                        }
                    },
                }
            })
    }

    /// Evaluates `new callee(args)` once the callee and arguments are known.
    ///
    /// Builtins with a constructor run it. A non-arrow closure is called and
    /// its result is kept when it is an object, otherwise a fresh plain object
    /// is produced.
    ///
    /// # Errors
    /// `NotConstructor` for arrows, non-constructor builtins and non-functions.
    pub(crate) fn construct(&mut self,
                            constructor: &Value,
                            args: Vec<Value>,
                            callee: &Expr,
                            position: Position)
                            -> EvalResult<Value> {
        match constructor {
            Value::Builtin(builtin) => self.construct_builtin(*builtin, args, position),
            Value::Function(closure) if !closure.def.is_arrow => {
                match self.call_closure(closure, args, position)? {
                    object @ Value::Object(_) => Ok(object),
                    _ => Ok(Value::Object(Object::new(ObjectKind::Plain))),
                }
            },
            _ => Err(RuntimeError::NotConstructor { callee: describe_callee(callee),
                                                    position }),
        }
    }
}
