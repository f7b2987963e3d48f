use std::cmp::Ordering;

use crate::{
    ast::BinaryOperator,
    interpreter::{evaluator::core::Context, value::core::Value},
};

impl Context {
    /// Evaluates a binary operation between two values.
    ///
    /// - `+` concatenates when either operand is a string after conversion to
    ///   a primitive, otherwise adds numerically.
    /// - `-`, `*`, `/` and `%` always work on numbers.
    /// - Relational operators compare two strings by code unit and everything
    ///   else numerically; a comparison involving `NaN` is `false`.
    /// - Equality operators use [`Value::strict_equals`] and
    ///   [`Value::loose_equals`].
    ///
    /// No binary operation can fail.
    ///
    /// # Example
    /// ```
    /// use evalon::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let sum = Context::eval_binary(BinaryOperator::Add, &Value::Number(1.0), &Value::Number(2.0));
    /// assert_eq!(sum, Value::Number(3.0));
    ///
    /// let text = Context::eval_binary(BinaryOperator::Add, &Value::from("a"), &Value::Number(1.0));
    /// assert_eq!(text, Value::from("a1"));
    /// ```
    #[must_use]
    pub fn eval_binary(op: BinaryOperator, left: &Value, right: &Value) -> Value {
        match op {
            BinaryOperator::Add => add(left, right),
            BinaryOperator::Sub => Value::Number(left.to_number() - right.to_number()),
            BinaryOperator::Mul => Value::Number(left.to_number() * right.to_number()),
            BinaryOperator::Div => Value::Number(left.to_number() / right.to_number()),
            BinaryOperator::Mod => Value::Number(left.to_number() % right.to_number()),
            BinaryOperator::Equal => Value::Bool(left.loose_equals(right)),
            BinaryOperator::NotEqual => Value::Bool(!left.loose_equals(right)),
            BinaryOperator::StrictEqual => Value::Bool(left.strict_equals(right)),
            BinaryOperator::StrictNotEqual => Value::Bool(!left.strict_equals(right)),
            BinaryOperator::Less => compare(left, right, Ordering::is_lt),
            BinaryOperator::LessEqual => compare(left, right, Ordering::is_le),
            BinaryOperator::Greater => compare(left, right, Ordering::is_gt),
            BinaryOperator::GreaterEqual => compare(left, right, Ordering::is_ge),
        }
    }
}

fn add(left: &Value, right: &Value) -> Value {
    let left = left.to_primitive();
    let right = right.to_primitive();
    if matches!(left, Value::String(_)) || matches!(right, Value::String(_)) {
        let mut text = left.to_display_string();
        text.push_str(&right.to_display_string());
        return Value::from(text);
    }
    Value::Number(left.to_number() + right.to_number())
}

fn compare(left: &Value, right: &Value, accept: fn(Ordering) -> bool) -> Value {
    let left = left.to_primitive();
    let right = right.to_primitive();
    let ordering = match (&left, &right) {
        (Value::String(a), Value::String(b)) => Some(a.encode_utf16().cmp(b.encode_utf16())),
        _ => left.to_number().partial_cmp(&right.to_number()),
    };
    Value::Bool(ordering.is_some_and(accept))
}
