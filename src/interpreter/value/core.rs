use std::{fmt, rc::Rc};

use crate::{
    ast::LiteralValue,
    interpreter::value::{
        function::{Builtin, Closure},
        object::{Object, ObjectKind},
    },
    util::num::{format_number, string_to_number},
};

/// Represents a runtime value in the interpreter.
///
/// Primitive values are stored inline. Objects and closures are shared through
/// `Rc` and compare by identity. Host builtins compare by which builtin they
/// are, so the evaluation primitive is recognised no matter how many bindings
/// refer to it.
#[derive(Debug, Clone)]
pub enum Value {
    /// `undefined`, also the completion value of a sub-program that produces
    /// nothing.
    Undefined,
    /// `null`.
    Null,
    /// `true` or `false`.
    Bool(bool),
    /// A double precision number.
    Number(f64),
    /// A primitive string. Only this variant is parsed by `eval`.
    String(Rc<str>),
    /// Any object.
    Object(Rc<Object>),
    /// A function declared in the program.
    Function(Rc<Closure>),
    /// A function provided by the host.
    Builtin(Builtin),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(Rc::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(Rc::from(v))
    }
}

impl From<&LiteralValue> for Value {
    fn from(v: &LiteralValue) -> Self {
        match v {
            LiteralValue::Number(n) => Self::Number(*n),
            LiteralValue::String(s) => Self::String(Rc::clone(s)),
            LiteralValue::Bool(b) => Self::Bool(*b),
            LiteralValue::Null => Self::Null,
        }
    }
}

impl PartialEq for Value {
    /// Strict equality (`===`).
    fn eq(&self, other: &Self) -> bool {
        self.strict_equals(other)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_display_string())
    }
}

impl Value {
    /// Whether this value is the evaluation primitive.
    ///
    /// ## Example
    /// ```
    /// use evalon::interpreter::value::{core::Value, function::Builtin};
    ///
    /// assert!(Value::Builtin(Builtin::Eval).is_eval_primitive());
    /// assert!(!Value::Builtin(Builtin::Print).is_eval_primitive());
    /// assert!(!Value::from("eval").is_eval_primitive());
    /// ```
    #[must_use]
    pub const fn is_eval_primitive(&self) -> bool {
        matches!(self, Self::Builtin(Builtin::Eval))
    }

    /// Whether the value can be invoked.
    #[must_use]
    pub const fn is_callable(&self) -> bool {
        matches!(self, Self::Function(_) | Self::Builtin(_))
    }

    /// The result of the `typeof` operator.
    #[must_use]
    pub const fn type_of(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null | Self::Object(_) => "object",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Function(_) | Self::Builtin(_) => "function",
        }
    }

    /// Converts the value to a boolean following the usual truthiness rules.
    ///
    /// `undefined`, `null`, `false`, `0`, `NaN` and the empty string are falsy;
    /// everything else, including every object, is truthy.
    #[must_use]
    pub fn to_boolean(&self) -> bool {
        match self {
            Self::Undefined | Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::String(s) => !s.is_empty(),
            Self::Object(_) | Self::Function(_) | Self::Builtin(_) => true,
        }
    }

    /// Converts an object to a primitive; primitives are returned unchanged.
    ///
    /// Boxed strings unwrap to their string, every other object converts to
    /// its display string.
    #[must_use]
    pub fn to_primitive(&self) -> Self {
        match self {
            Self::Object(obj) => match obj.kind() {
                ObjectKind::StringWrapper(s) => Self::String(Rc::clone(s)),
                _ => Self::from(self.to_display_string()),
            },
            Self::Function(_) | Self::Builtin(_) => Self::from(self.to_display_string()),
            other => other.clone(),
        }
    }

    /// Converts the value to a number.
    ///
    /// ## Example
    /// ```
    /// use evalon::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::from(" 42 ").to_number(), 42.0);
    /// assert_eq!(Value::Bool(true).to_number(), 1.0);
    /// assert!(Value::Undefined.to_number().is_nan());
    /// ```
    #[must_use]
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Undefined => f64::NAN,
            Self::Null => 0.0,
            Self::Bool(b) => f64::from(u8::from(*b)),
            Self::Number(n) => *n,
            Self::String(s) => string_to_number(s),
            Self::Object(_) | Self::Function(_) | Self::Builtin(_) => {
                self.to_primitive().to_number()
            },
        }
    }

    /// Converts the value to the string the language would produce.
    #[must_use]
    pub fn to_display_string(&self) -> String {
        match self {
            Self::Undefined => "undefined".to_string(),
            Self::Null => "null".to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => format_number(*n),
            Self::String(s) => s.to_string(),
            Self::Object(obj) => obj.to_display_string(),
            Self::Function(closure) => {
                format!("function {}() {{ [code] }}", closure.name().unwrap_or(""))
            },
            Self::Builtin(builtin) => format!("function {}() {{ [native code] }}", builtin.name()),
        }
    }

    /// Strict equality (`===`).
    ///
    /// Numbers compare numerically (`NaN` is unequal to itself), strings by
    /// content, objects and closures by identity.
    #[must_use]
    pub fn strict_equals(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            #[allow(clippy::float_cmp)]
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => Rc::ptr_eq(a, b),
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            (Self::Builtin(a), Self::Builtin(b)) => a == b,
            _ => false,
        }
    }

    /// Loose equality (`==`).
    ///
    /// `null` and `undefined` equal each other and nothing else; numbers,
    /// strings and booleans are compared numerically when their types differ;
    /// objects compared against primitives are converted to primitives first.
    ///
    /// ## Example
    /// ```
    /// use evalon::interpreter::value::core::Value;
    ///
    /// assert!(Value::Null.loose_equals(&Value::Undefined));
    /// assert!(Value::from("1").loose_equals(&Value::Number(1.0)));
    /// assert!(!Value::Null.loose_equals(&Value::Number(0.0)));
    /// ```
    #[must_use]
    pub fn loose_equals(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined | Self::Null, Self::Undefined | Self::Null) => true,
            (Self::Undefined | Self::Null, _) | (_, Self::Undefined | Self::Null) => false,
            (Self::Number(_), Self::String(_))
            | (Self::String(_), Self::Number(_))
            | (Self::Bool(_), _)
            | (_, Self::Bool(_)) => {
                if self.type_of() == other.type_of() {
                    return self.strict_equals(other);
                }
                #[allow(clippy::float_cmp)]
                let equal = self.to_number() == other.to_number();
                equal
            },
            (Self::Object(_) | Self::Function(_) | Self::Builtin(_),
             Self::Number(_) | Self::String(_)) => self.to_primitive().loose_equals(other),
            (Self::Number(_) | Self::String(_),
             Self::Object(_) | Self::Function(_) | Self::Builtin(_)) => {
                self.loose_equals(&other.to_primitive())
            },
            _ => self.strict_equals(other),
        }
    }
}
