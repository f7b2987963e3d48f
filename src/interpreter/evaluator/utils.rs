use crate::{
    ast::{BinaryOperator, Expr, Position},
    error::{ParseError, RuntimeError},
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            environment::{EnvRef, Environment},
        },
        value::core::Value,
    },
};

/// The place an assignment or update writes to.
///
/// The base and key of a property reference are evaluated once, before the
/// right-hand side.
pub(crate) enum Reference {
    /// A binding resolved through the environment chain.
    Binding(String),
    /// A property of an already evaluated base value.
    Property {
        /// The value the property belongs to.
        base: Value,
        /// The property name.
        key:  String,
    },
}

impl Context {
    /// Evaluates the parts of an assignment target.
    pub(crate) fn resolve_reference(&mut self, target: &Expr, env: &EnvRef) -> EvalResult<Reference> {
        match target {
            Expr::Member { object, property, .. } => {
                Ok(Reference::Property { base: self.eval(object, env)?,
                                         key:  property.clone(), })
            },
            Expr::Index { object, index, .. } => {
                let base = self.eval(object, env)?;
                let key = self.eval(index, env)?.to_display_string();
                Ok(Reference::Property { base, key })
            },
            Expr::Identifier { name, .. } => Ok(Reference::Binding(name.clone())),
            other => Err(ParseError::InvalidAssignmentTarget { position: other.position() }.into()),
        }
    }

    /// Reads the current value of a reference.
    pub(crate) fn get_reference(reference: &Reference,
                                position: Position,
                                env: &EnvRef)
                                -> EvalResult<Value> {
        match reference {
            Reference::Binding(name) => Self::lookup(name, position, env),
            Reference::Property { base, key } => Self::get_property(base, key, position),
        }
    }

    /// Writes `value` through a reference.
    pub(crate) fn put_reference(reference: &Reference,
                                value: Value,
                                position: Position,
                                env: &EnvRef)
                                -> EvalResult<()> {
        match reference {
            Reference::Binding(name) => Environment::assign(env, name, value, position),
            Reference::Property { base, key } => Self::set_property(base, key, value, position),
        }
    }

    /// Evaluates `target = value` or a compound assignment such as
    /// `target += value`.
    ///
    /// The target is resolved first; for compound assignments its current
    /// value is read before the right-hand side is evaluated.
    ///
    /// # Returns
    /// The assigned value.
    pub(crate) fn eval_assignment(&mut self,
                                  target: &Expr,
                                  op: Option<BinaryOperator>,
                                  value: &Expr,
                                  position: Position,
                                  env: &EnvRef)
                                  -> EvalResult<Value> {
        let reference = self.resolve_reference(target, env)?;

        let value = match op {
            None => self.eval(value, env)?,
            Some(op) => {
                let current = Self::get_reference(&reference, position, env)?;
                let rhs = self.eval(value, env)?;
                Self::eval_binary(op, &current, &rhs)
            },
        };

        Self::put_reference(&reference, value.clone(), position, env)?;
        Ok(value)
    }

    /// Reads property `key` of `base`.
    ///
    /// Strings expose `length` and their characters by index; functions expose
    /// `name`. Missing properties read as `undefined`.
    ///
    /// # Errors
    /// `PropertyOfNullish` when `base` is `undefined` or `null`.
    ///
    /// # Example
    /// ```
    /// use evalon::{
    ///     ast::Position,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let text = Value::from("abc");
    /// assert_eq!(Context::get_property(&text, "length", Position::START).unwrap(),
    ///            Value::Number(3.0));
    /// assert_eq!(Context::get_property(&text, "1", Position::START).unwrap(),
    ///            Value::from("b"));
    /// assert!(Context::get_property(&Value::Null, "x", Position::START).is_err());
    /// ```
    pub fn get_property(base: &Value, key: &str, position: Position) -> EvalResult<Value> {
        match base {
            Value::Undefined | Value::Null => {
                Err(RuntimeError::PropertyOfNullish { property: key.to_string(),
                                                      base: nullish_name(base),
                                                      position })
            },
            Value::Object(object) => Ok(object.get(key)),
            Value::String(text) => {
                if key == "length" {
                    #[allow(clippy::cast_precision_loss)]
                    let length = text.encode_utf16().count() as f64;
                    return Ok(Value::Number(length));
                }
                let unit = key.parse::<usize>()
                              .ok()
                              .and_then(|index| text.encode_utf16().nth(index));
                Ok(unit.map_or(Value::Undefined, |unit| {
                           Value::from(String::from_utf16_lossy(&[unit]))
                       }))
            },
            Value::Function(closure) if key == "name" => Ok(Value::from(closure.name().unwrap_or(""))),
            Value::Builtin(builtin) if key == "name" => Ok(Value::from(builtin.name())),
            _ => Ok(Value::Undefined),
        }
    }

    /// Writes property `key` of `base`.
    ///
    /// Writes to primitives are silently dropped.
    ///
    /// # Errors
    /// `PropertyOfNullish` when `base` is `undefined` or `null`.
    pub fn set_property(base: &Value, key: &str, value: Value, position: Position) -> EvalResult<()> {
        match base {
            Value::Undefined | Value::Null => {
                Err(RuntimeError::PropertyOfNullish { property: key.to_string(),
                                                      base: nullish_name(base),
                                                      position })
            },
            Value::Object(object) => {
                object.set(key, value);
                Ok(())
            },
            _ => Ok(()),
        }
    }
}

/// A short source-like description of a callee, for error messages.
///
/// ## Example
/// ```
/// use evalon::{
///     interpreter::{evaluator::utils::describe_callee, parser::compile},
///     ast::Statement,
/// };
///
/// let program = compile("a.b.c").unwrap();
/// let Statement::Expression { expr, .. } = &program.statements[0] else {
///     panic!("expected an expression statement");
/// };
/// assert_eq!(describe_callee(expr), "a.b.c");
/// ```
#[must_use]
pub fn describe_callee(callee: &Expr) -> String {
    match callee {
        Expr::Identifier { name, .. } => name.clone(),
        Expr::Member { object, property, .. } => format!("{}.{property}", describe_callee(object)),
        Expr::Index { object, .. } => format!("{}[...]", describe_callee(object)),
        Expr::Call { callee, .. } => format!("{}(...)", describe_callee(callee)),
        _ => "expression".to_string(),
    }
}

const fn nullish_name(base: &Value) -> &'static str {
    if matches!(base, Value::Null) { "null" } else { "undefined" }
}
