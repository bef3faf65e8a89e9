//! Raw atomic values produced by token mappers

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Raw value of an atom, as produced by a token type's mapper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// 64-bit integer value
    Int(i64),
    /// 64-bit floating-point value
    Float(f64),
    /// Text value
    Text(String),
}

impl Value {
    /// Get the type name of the value
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::Text(_) => "Text",
        }
    }

    /// Check if value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Borrow the text of a `Text` value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            // integral floats keep a fraction so they read back as floats
            Value::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{:.1}", x),
            Value::Float(x) => write!(f, "{}", x),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// Scalar type held by the atoms of a tree representation
///
/// `Value::Null` never reaches [`Scalar::from_value`]: representations store
/// it as an atom without a value.
pub trait Scalar: Clone + fmt::Debug + PartialEq {
    /// Type name used when the atom holds no value
    const TYPE_NAME: &'static str;

    /// Convert a non-null raw value into this scalar type
    fn from_value(value: Value) -> Result<Self>;

    /// Convert back into a raw value
    fn to_value(&self) -> Value;

    /// Type name of this particular scalar
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }
}

impl Scalar for Value {
    const TYPE_NAME: &'static str = "Null";

    fn from_value(value: Value) -> Result<Self> {
        Ok(value)
    }

    fn to_value(&self) -> Value {
        self.clone()
    }

    fn type_name(&self) -> &'static str {
        Value::type_name(self)
    }
}

impl Scalar for String {
    const TYPE_NAME: &'static str = "Text";

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Text(s) => Ok(s),
            other => Err(Error::conversion(Self::TYPE_NAME, other.type_name())),
        }
    }

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl Scalar for i64 {
    const TYPE_NAME: &'static str = "Int";

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Int(n) => Ok(n),
            Value::Bool(b) => Ok(i64::from(b)),
            Value::Text(ref s) => s
                .trim()
                .parse()
                .map_err(|_| Error::conversion(Self::TYPE_NAME, &value)),
            other => Err(Error::conversion(Self::TYPE_NAME, other.type_name())),
        }
    }

    fn to_value(&self) -> Value {
        Value::Int(*self)
    }
}

impl Scalar for f64 {
    const TYPE_NAME: &'static str = "Float";

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Float(x) => Ok(x),
            Value::Int(n) => Ok(n as f64),
            Value::Text(ref s) => s
                .trim()
                .parse()
                .map_err(|_| Error::conversion(Self::TYPE_NAME, &value)),
            other => Err(Error::conversion(Self::TYPE_NAME, other.type_name())),
        }
    }

    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl Scalar for bool {
    const TYPE_NAME: &'static str = "Bool";

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(Error::conversion(Self::TYPE_NAME, other.type_name())),
        }
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}
