//! The plain value tree.
//!
//! [`parse`](crate::parse) and [`get_node_value`](crate::get_node_value)
//! materialize documents into [`Value`]s: the usual JSON shapes, with
//! numbers widened to `f64` so the JSON5 extensions (`Infinity`, `NaN`,
//! hexadecimal integers) fit alongside ordinary decimals.
use alloc::{collections::BTreeMap, string::String, vec::Vec};

/// Object members, keyed by decoded property name. When a document repeats a
/// key, materialization keeps the later occurrence.
pub type Map = BTreeMap<String, Value>;

/// Array elements in document order.
pub type Array = Vec<Value>;

/// A materialized JSON5 value.
///
/// # Examples
///
/// ```
/// use json5edit::{parse, ParseOptions, Value};
///
/// let mut errors = Vec::new();
/// let value = parse("[1, 'two']", &mut errors, ParseOptions::default()).unwrap();
/// assert_eq!(
///     value,
///     Value::Array(vec![Value::Number(1.0), Value::String("two".into())])
/// );
/// ```
// serde is derived only for test builds and under the optional `serde`
// feature; plain builds carry no serialization machinery.
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize, serde::Deserialize)
)]
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    Array(Array),
    Object(Map),
}

/// Narrowing accessors. Each returns `Some` only for its own variant, so
/// chains like `value.as_object().and_then(|o| o.get("key"))` read cleanly.
impl Value {
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(elements) => Some(elements),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Self::Object(members) => Some(members),
            _ => None,
        }
    }
}

/// Variant predicates.
impl Value {
    /// `true` for [`Value::Null`].
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// `true` for [`Value::Boolean`].
    #[must_use]
    pub fn is_bool(&self) -> bool {
        self.as_bool().is_some()
    }

    /// `true` for [`Value::Number`].
    #[must_use]
    pub fn is_number(&self) -> bool {
        self.as_f64().is_some()
    }

    /// `true` for [`Value::String`].
    #[must_use]
    pub fn is_string(&self) -> bool {
        self.as_str().is_some()
    }

    /// `true` for [`Value::Array`].
    #[must_use]
    pub fn is_array(&self) -> bool {
        self.as_array().is_some()
    }

    /// `true` for [`Value::Object`].
    #[must_use]
    pub fn is_object(&self) -> bool {
        self.as_object().is_some()
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Array> for Value {
    fn from(elements: Array) -> Self {
        Self::Array(elements)
    }
}

impl From<Map> for Value {
    fn from(members: Map) -> Self {
        Self::Object(members)
    }
}
