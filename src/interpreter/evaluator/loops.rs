use crate::{
    ast::{DeclarationKind, Expr, Statement},
    interpreter::{
        evaluator::{
            core::{Completion, Context, EvalResult},
            environment::{EnvRef, Environment, ScopeKind},
        },
        value::core::Value,
    },
};

/// What the loop driver should do after one run of the body.
enum Step {
    Next,
    Exit(Completion),
}

impl Context {
    /// Executes a `while` loop.
    ///
    /// The completion value is the value of the last body run that produced
    /// one, or `undefined` when the body never did.
    pub(crate) fn exec_while(&mut self,
                             condition: &Expr,
                             body: &Statement,
                             env: &EnvRef)
                             -> EvalResult<Completion> {
        let mut last = None;
        while self.eval(condition, env)?.to_boolean() {
            if let Step::Exit(completion) = self.run_loop_body(body, env, &mut last)? {
                return Ok(completion);
            }
        }
        Ok(Completion::Normal(Some(last.unwrap_or(Value::Undefined))))
    }

    /// Executes a C-style `for` loop.
    ///
    /// A `let` or `const` initializer is scoped to a block record wrapping the
    /// loop; a `var` initializer was already hoisted.
    pub(crate) fn exec_for(&mut self,
                           init: Option<&Statement>,
                           condition: Option<&Expr>,
                           update: Option<&Expr>,
                           body: &Statement,
                           env: &EnvRef)
                           -> EvalResult<Completion> {
        let loop_env = match init {
            Some(Statement::VariableDeclaration { kind: DeclarationKind::Let | DeclarationKind::Const,
                                                  .. }) => {
                Environment::new_child(env, ScopeKind::Block)
            },
            _ => EnvRef::clone(env),
        };
        if let Some(init) = init {
            self.exec_statement(init, &loop_env)?;
        }

        let mut last = None;
        loop {
            if let Some(condition) = condition
               && !self.eval(condition, &loop_env)?.to_boolean()
            {
                break;
            }
            if let Step::Exit(completion) = self.run_loop_body(body, &loop_env, &mut last)? {
                return Ok(completion);
            }
            if let Some(update) = update {
                self.eval(update, &loop_env)?;
            }
        }
        Ok(Completion::Normal(Some(last.unwrap_or(Value::Undefined))))
    }

    /// Runs the body once, folding its value into `last`.
    fn run_loop_body(&mut self,
                     body: &Statement,
                     env: &EnvRef,
                     last: &mut Option<Value>)
                     -> EvalResult<Step> {
        match self.exec_statement(body, env)? {
            Completion::Normal(value) | Completion::Continue(value) => {
                if value.is_some() {
                    *last = value;
                }
                Ok(Step::Next)
            },
            Completion::Break(value) => {
                let value = value.or_else(|| last.take()).unwrap_or(Value::Undefined);
                Ok(Step::Exit(Completion::Normal(Some(value))))
            },
            Completion::Return(value) => Ok(Step::Exit(Completion::Return(value))),
        }
    }
}
