// Parsed values and their type discriminants.
use serde::Serialize;

/// Discriminant of a [`Value`]. Ordinals are stable.
///
/// `String`, `Array` and `Object` are reserved: the parser does not produce them yet.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ValueType {
    Null = 0,
    False = 1,
    True = 2,
    Number = 3,
    String = 4,
    Array = 5,
    Object = 6,
}

impl ValueType {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::Null => "null",
            ValueType::False => "false",
            ValueType::True => "true",
            ValueType::Number => "number",
            ValueType::String => "string",
            ValueType::Array => "array",
            ValueType::Object => "object",
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

/// A parsed JSON value. Owns no borrowed input.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[non_exhaustive]
pub enum Value {
    #[default]
    Null,
    False,
    True,
    Number(f64),
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::False => ValueType::False,
            Value::True => ValueType::True,
            Value::Number(_) => ValueType::Number,
        }
    }

    /// Numeric payload.
    ///
    /// # Panics
    ///
    /// Panics if the value is not a number. Check [`Value::value_type`] first, or use
    /// [`Value::as_number`].
    pub fn number(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
            other => panic!(
                "number requested from a {} value",
                other.value_type().as_str()
            ),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::True => Some(true),
            Value::False => Some(false),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        if value { Value::True } else { Value::False }
    }
}

pub fn get_type(value: &Value) -> ValueType {
    value.value_type()
}

/// # Panics
///
/// Panics unless `value` is a number.
pub fn get_number(value: &Value) -> f64 {
    value.number()
}
