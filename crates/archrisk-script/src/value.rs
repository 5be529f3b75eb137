//! Runtime values and the static kind lattice.

use std::fmt;

/// A value produced by evaluating an expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    String(String),
    List(Vec<Value>),
}

/// Static value kind of an expression. `Any` means the kind is only known
/// at evaluation time (variable references).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Bool,
    String,
    List,
    Any,
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Bool(_) => Kind::Bool,
            Value::String(_) => Kind::String,
            Value::List(_) => Kind::List,
        }
    }
}

impl Kind {
    /// Whether a node of this static kind may appear where `required` is
    /// expected. `Any` defers the check to evaluation time.
    pub fn satisfies(self, required: Kind) -> bool {
        self == required || self == Kind::Any || required == Kind::Any
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Bool => "bool",
            Kind::String => "string",
            Kind::List => "list",
            Kind::Any => "any",
        };
        f.write_str(name)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Value {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Value {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Value {
        Value::String(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Value {
        Value::List(value)
    }
}
