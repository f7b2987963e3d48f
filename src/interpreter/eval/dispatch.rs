use std::rc::Rc;

use tracing::debug;

use crate::{
    ast::{CallSite, Expr, Position},
    error::RuntimeError,
    interpreter::{
        eval::{
            call_site::{EvalMode, classify},
            scope::{ResolvedScope, resolve},
        },
        evaluator::{
            core::{Context, EvalResult},
            environment::EnvRef,
            utils::describe_callee,
        },
        parser::compile,
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a call expression.
    ///
    /// The callee is evaluated first, then every argument from left to right.
    /// An argument that raises stops evaluation there and nothing is called.
    /// Only then is the call classified: a direct eval runs the source in
    /// `env`, anything else is an ordinary call of the callee value.
    pub(crate) fn eval_call(&mut self,
                            callee: &Expr,
                            arguments: &[Expr],
                            call_site: CallSite,
                            position: Position,
                            env: &EnvRef)
                            -> EvalResult<Value> {
        let function = self.eval(callee, env)?;
        let args = self.eval_arguments(arguments, env)?;

        let mode = classify(call_site, &function);
        if call_site == CallSite::EvalReference || function.is_eval_primitive() {
            debug!(callee = %describe_callee(callee), ?call_site, ?mode, %position, "classified eval call");
        }

        match mode {
            EvalMode::Direct => self.perform_eval(&args, resolve(mode, env), position),
            EvalMode::Indirect => {
                if !function.is_callable() {
                    return Err(RuntimeError::NotCallable { callee: describe_callee(callee),
                                                           position });
                }
                self.call_function(&function, args, position)
            },
        }
    }

    /// Runs the evaluation primitive on already evaluated arguments.
    ///
    /// Only a primitive string as first argument is compiled and run; any
    /// other first argument, including a boxed string, is returned unchanged.
    /// Arguments after the first are ignored.
    ///
    /// # Parameters
    /// - `args`: The evaluated arguments of the call.
    /// - `scope`: Where the sub-program runs.
    /// - `position`: Position of the call, for depth errors.
    ///
    /// # Returns
    /// The completion value of the sub-program, `undefined` when it has none.
    ///
    /// # Errors
    /// - `Syntax` when the source does not compile.
    /// - `CallStackExceeded` when evaluations nest too deeply.
    /// - Whatever the sub-program raises, unchanged.
    ///
    /// ## Example
    /// ```
    /// use evalon::{
    ///     ast::Position,
    ///     config::Config,
    ///     interpreter::{eval::scope::ResolvedScope, evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let mut context = Context::new(Config::default());
    ///
    /// let sum = context.perform_eval(&[Value::from("1 + 2")], ResolvedScope::Global, Position::START);
    /// assert_eq!(sum.unwrap(), Value::Number(3.0));
    ///
    /// let empty = context.perform_eval(&[Value::from("")], ResolvedScope::Global, Position::START);
    /// assert_eq!(empty.unwrap(), Value::Undefined);
    ///
    /// let other = context.perform_eval(&[Value::Number(7.0)], ResolvedScope::Global, Position::START);
    /// assert_eq!(other.unwrap(), Value::Number(7.0));
    /// ```
    pub fn perform_eval(&mut self,
                        args: &[Value],
                        scope: ResolvedScope,
                        position: Position)
                        -> EvalResult<Value> {
        let source = match args.first() {
            Some(Value::String(source)) => Rc::clone(source),
            other => return Ok(other.cloned().unwrap_or(Value::Undefined)),
        };

        let program = compile(&source)?;
        debug!(statements = program.statements.len(), "compiled eval source");

        let env = scope.sub_program_env(&self.global);
        self.with_call_depth(position, |ctx| ctx.run_program(&program, &env))
    }
}
