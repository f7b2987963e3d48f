use crate::{
    ast::{Expr, Position, UnaryOperator},
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            environment::{EnvRef, Environment},
        },
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a prefix unary operator applied to `expr`.
    ///
    /// `typeof` on an identifier that resolves nowhere yields `"undefined"`
    /// instead of raising a `ReferenceError`.
    pub(crate) fn eval_unary_op(&mut self,
                                op: UnaryOperator,
                                expr: &Expr,
                                env: &EnvRef)
                                -> EvalResult<Value> {
        if op == UnaryOperator::Typeof
           && let Expr::Identifier { name, .. } = expr
        {
            let value = Environment::lookup(env, name).unwrap_or(Value::Undefined);
            return Ok(Self::eval_unary(op, &value));
        }

        let value = self.eval(expr, env)?;
        Ok(Self::eval_unary(op, &value))
    }

    /// Evaluates a unary operation on a value.
    ///
    /// Supported operators:
    /// - `Negate`: numeric negation.
    /// - `Plus`: conversion to a number.
    /// - `Not`: boolean negation of the value's truthiness.
    /// - `Typeof`: the type name as a string.
    ///
    /// # Example
    /// ```
    /// use evalon::{
    ///     ast::UnaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let v = Context::eval_unary(UnaryOperator::Negate, &Value::from("5"));
    /// assert_eq!(v, Value::Number(-5.0));
    ///
    /// let v = Context::eval_unary(UnaryOperator::Not, &Value::from(""));
    /// assert_eq!(v, Value::Bool(true));
    ///
    /// let v = Context::eval_unary(UnaryOperator::Typeof, &Value::Null);
    /// assert_eq!(v, Value::from("object"));
    /// ```
    #[must_use]
    pub fn eval_unary(op: UnaryOperator, value: &Value) -> Value {
        match op {
            UnaryOperator::Negate => Value::Number(-value.to_number()),
            UnaryOperator::Plus => Value::Number(value.to_number()),
            UnaryOperator::Not => Value::Bool(!value.to_boolean()),
            UnaryOperator::Typeof => Value::from(value.type_of()),
        }
    }

    /// Evaluates `++` or `--` on a reference.
    ///
    /// # Returns
    /// The new numeric value for prefix forms, the old one for postfix forms.
    pub(crate) fn eval_update(&mut self,
                              target: &Expr,
                              increment: bool,
                              prefix: bool,
                              position: Position,
                              env: &EnvRef)
                              -> EvalResult<Value> {
        let reference = self.resolve_reference(target, env)?;
        let old = Self::get_reference(&reference, position, env)?.to_number();
        let new = if increment { old + 1.0 } else { old - 1.0 };
        Self::put_reference(&reference, Value::Number(new), position, env)?;

        Ok(Value::Number(if prefix { new } else { old }))
    }
}
