use std::{
    cell::RefCell,
    collections::HashMap,
    fmt,
    rc::{Rc, Weak},
};

use crate::interpreter::{evaluator::environment::Environment, value::core::Value};

/// The error constructors known to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// `Error`
    Error,
    /// `TypeError`
    TypeError,
    /// `ReferenceError`
    ReferenceError,
    /// `SyntaxError`
    SyntaxError,
    /// `RangeError`
    RangeError,
}

impl ErrorKind {
    /// The constructor name, which is also the `name` property of instances.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::TypeError => "TypeError",
            Self::ReferenceError => "ReferenceError",
            Self::SyntaxError => "SyntaxError",
            Self::RangeError => "RangeError",
        }
    }
}

/// What kind of object a value is, beyond its ordinary properties.
pub enum ObjectKind {
    /// An ordinary object.
    Plain,
    /// A boxed string created by `new String(...)`. It converts to its string
    /// but is not itself a primitive string.
    StringWrapper(Rc<str>),
    /// An error object; `name` and `message` live in the properties.
    Error(ErrorKind),
    /// The global object. Its properties are the bindings of the global
    /// environment record, which it refers to without owning.
    Global(Weak<RefCell<Environment>>),
}

/// A heap object: a kind plus a mutable property map.
pub struct Object {
    kind:       ObjectKind,
    properties: RefCell<HashMap<String, Value>>,
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.kind {
            ObjectKind::Plain => "Object",
            ObjectKind::StringWrapper(_) => "String",
            ObjectKind::Error(kind) => kind.name(),
            ObjectKind::Global(_) => "global",
        };
        write!(f, "[object {kind}]")
    }
}

impl Object {
    /// Creates an object of the given kind with no properties.
    #[must_use]
    pub fn new(kind: ObjectKind) -> Rc<Self> {
        Rc::new(Self { kind,
                       properties: RefCell::new(HashMap::new()) })
    }

    /// Creates a plain object holding the given properties.
    #[must_use]
    pub fn with_properties(properties: HashMap<String, Value>) -> Rc<Self> {
        Rc::new(Self { kind:       ObjectKind::Plain,
                       properties: RefCell::new(properties), })
    }

    /// Creates an error object with `name` and `message` properties.
    ///
    /// ## Example
    /// ```
    /// use evalon::interpreter::value::{core::Value, object::{ErrorKind, Object}};
    ///
    /// let err = Object::error(ErrorKind::TypeError, "boom");
    /// assert_eq!(err.get("name"), Value::from("TypeError"));
    /// assert_eq!(err.to_display_string(), "TypeError: boom");
    /// ```
    #[must_use]
    pub fn error(kind: ErrorKind, message: &str) -> Rc<Self> {
        let object = Self::new(ObjectKind::Error(kind));
        object.set("name", Value::from(kind.name()));
        object.set("message", Value::from(message));
        object
    }

    /// The kind of this object.
    #[must_use]
    pub const fn kind(&self) -> &ObjectKind {
        &self.kind
    }

    /// Reads a property; missing properties read as `undefined`.
    #[must_use]
    pub fn get(&self, key: &str) -> Value {
        match &self.kind {
            ObjectKind::Global(env) => env.upgrade()
                                          .and_then(|env| Environment::lookup(&env, key))
                                          .unwrap_or(Value::Undefined),
            ObjectKind::StringWrapper(s) if key == "length" => {
                #[allow(clippy::cast_precision_loss)]
                let length = s.encode_utf16().count() as f64;
                Value::Number(length)
            },
            _ => self.properties
                     .borrow()
                     .get(key)
                     .cloned()
                     .unwrap_or(Value::Undefined),
        }
    }

    /// Writes a property, creating it when missing.
    ///
    /// Writing to the global object writes the global binding of that name.
    pub fn set(&self, key: &str, value: Value) {
        match &self.kind {
            ObjectKind::Global(env) => {
                if let Some(env) = env.upgrade() {
                    Environment::set_global_property(&env, key, value);
                }
            },
            _ => {
                self.properties.borrow_mut().insert(key.to_string(), value);
            },
        }
    }

    /// Converts the object to the string the language would produce.
    #[must_use]
    pub fn to_display_string(&self) -> String {
        match &self.kind {
            ObjectKind::Plain => "[object Object]".to_string(),
            ObjectKind::StringWrapper(s) => s.to_string(),
            ObjectKind::Error(_) => {
                let name = self.get("name").to_display_string();
                let message = self.get("message").to_display_string();
                if message.is_empty() {
                    name
                } else {
                    format!("{name}: {message}")
                }
            },
            ObjectKind::Global(_) => "[object global]".to_string(),
        }
    }
}
