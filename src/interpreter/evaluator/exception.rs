use tracing::trace;

use crate::{
    ast::{CatchClause, Statement},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Completion, Context, EvalResult},
            environment::{EnvRef, Environment, ScopeKind},
        },
        value::{core::Value, object::Object},
    },
};

impl Context {
    /// Executes `try { block } catch (param) { handler } finally { finalizer }`.
    ///
    /// Engine errors reaching a handler are converted to error objects first.
    /// The finalizer always runs; if it completes abruptly (including by
    /// raising) that outcome replaces the one of the block or handler.
    pub(crate) fn exec_try(&mut self,
                           block: &[Statement],
                           handler: Option<&CatchClause>,
                           finalizer: Option<&[Statement]>,
                           env: &EnvRef)
                           -> EvalResult<Completion> {
        let mut outcome = self.exec_block(block, env);

        if let Some(handler) = handler
           && let Err(error) = outcome
        {
            trace!(%error, "caught");
            let caught = Self::error_to_value(error);
            let handler_env = Environment::new_child(env, ScopeKind::Block);
            if let Some(param) = &handler.param {
                Environment::declare(&handler_env, param, caught, true);
            }
            outcome = self.exec_block(&handler.body, &handler_env);
        }

        if let Some(finalizer) = finalizer {
            match self.exec_block(finalizer, env)? {
                Completion::Normal(_) => {},
                abrupt => return Ok(abrupt),
            }
        }

        Ok(outcome?.update_empty(Some(Value::Undefined)))
    }

    /// The value a `catch` clause observes for `error`.
    ///
    /// Thrown values are passed through unchanged. Errors raised by the
    /// engine become error objects whose `name` is the error kind and whose
    /// `message` is the error message without that prefix.
    ///
    /// ## Example
    /// ```
    /// use evalon::{
    ///     ast::Position,
    ///     error::RuntimeError,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let error = RuntimeError::UnknownVariable { name:     "j".to_string(),
    ///                                             position: Position::START, };
    /// let Value::Object(object) = Context::error_to_value(error) else {
    ///     panic!("expected an error object");
    /// };
    /// assert_eq!(object.get("name"), Value::from("ReferenceError"));
    /// assert_eq!(object.get("message"), Value::from("'j' is not defined"));
    /// ```
    #[must_use]
    pub fn error_to_value(error: RuntimeError) -> Value {
        match error {
            RuntimeError::Thrown(value) => value,
            other => Value::Object(Object::error(other.kind(), &other.message())),
        }
    }
}
