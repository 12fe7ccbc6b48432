//! Property values of a DFM object.
//!
//! [`PropertyValue`] is a closed set of ten variants, one per literal form of
//! the text format:
//!
//! | Variant | DFM syntax |
//! |---|---|
//! | `Int` | `123`, `-5` |
//! | `Float` | `1.500000000000000000`, `1E16` |
//! | `Bool` | `True`, `False` |
//! | `String` | `'text'#13#10'more'` |
//! | `Identifier` | `clRed`, `Device.Action` |
//! | `Set` | `[akLeft, akTop]` |
//! | `Tuple` | `(800 600)` |
//! | `Bytes` | `{0123ABCD}` |
//! | `Items` | `<item ... end>` |
//! | `Object` | a nested `object ... end` |
//!
//! ## Creating Values
//!
//! ```rust
//! use dfm::PropertyValue;
//!
//! let left = PropertyValue::from(12);
//! let caption = PropertyValue::from("OK");
//! let color = PropertyValue::identifier("clBtnFace");
//!
//! assert_eq!(left.as_i64(), Some(12));
//! assert_eq!(caption.as_str(), Some("OK"));
//! assert!(color.is_identifier());
//! ```

use crate::object::{Object, Property};
use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One item of an item list: a property bag shaped like an anonymous
/// object's body.
pub type Item = Vec<Property>;

/// The value of a [`Property`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Int(i64),
    /// NaN and infinities are not valid in DFM files and print as `0`.
    Float(f64),
    Bool(bool),
    /// Decoded text, without quotes and with `''` and `#N` resolved.
    String(String),
    /// A symbolic constant such as `clYellow`, stored verbatim.
    Identifier(String),
    Set(Vec<PropertyValue>),
    Tuple(Vec<PropertyValue>),
    Bytes(Vec<u8>),
    Items(Vec<Item>),
    Object(Box<Object>),
}

impl PropertyValue {
    pub fn identifier(name: impl Into<String>) -> Self {
        PropertyValue::Identifier(name.into())
    }

    /// A short name of the variant, used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::Int(_) => "integer",
            PropertyValue::Float(_) => "float",
            PropertyValue::Bool(_) => "boolean",
            PropertyValue::String(_) => "string",
            PropertyValue::Identifier(_) => "identifier",
            PropertyValue::Set(_) => "set",
            PropertyValue::Tuple(_) => "tuple",
            PropertyValue::Bytes(_) => "bytes",
            PropertyValue::Items(_) => "item list",
            PropertyValue::Object(_) => "object",
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_int(&self) -> bool {
        matches!(self, PropertyValue::Int(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, PropertyValue::Float(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, PropertyValue::Bool(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, PropertyValue::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_identifier(&self) -> bool {
        matches!(self, PropertyValue::Identifier(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, PropertyValue::Object(_))
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            PropertyValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as `f64`. Integers are widened.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropertyValue::Float(f) => Some(*f),
            PropertyValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the text of a `String` value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            PropertyValue::Identifier(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements of a `Set` or a `Tuple`.
    #[must_use]
    pub fn as_list(&self) -> Option<&[PropertyValue]> {
        match self {
            PropertyValue::Set(v) | PropertyValue::Tuple(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            PropertyValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_items(&self) -> Option<&[Item]> {
        match self {
            PropertyValue::Items(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            PropertyValue::Object(obj) => Some(obj),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            PropertyValue::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Returns `true` if no text in this value, including nested objects and
    /// string contents, contains a non-ASCII character.
    #[must_use]
    pub fn is_ascii(&self) -> bool {
        match self {
            PropertyValue::Int(_)
            | PropertyValue::Float(_)
            | PropertyValue::Bool(_)
            | PropertyValue::Bytes(_) => true,
            PropertyValue::String(s) | PropertyValue::Identifier(s) => s.is_ascii(),
            PropertyValue::Set(v) | PropertyValue::Tuple(v) => v.iter().all(Self::is_ascii),
            PropertyValue::Items(items) => items.iter().flatten().all(Property::is_ascii),
            PropertyValue::Object(obj) => obj.is_ascii(),
        }
    }
}

/// Prints the value the way it appears after `Name = ` at the top level of
/// an object.
impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::printer::value_to_string(self))
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        PropertyValue::Int(i64::from(value))
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Int(value)
    }
}

impl From<u32> for PropertyValue {
    fn from(value: u32) -> Self {
        PropertyValue::Int(i64::from(value))
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Float(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::String(value)
    }
}

impl From<Vec<u8>> for PropertyValue {
    fn from(value: Vec<u8>) -> Self {
        PropertyValue::Bytes(value)
    }
}

impl From<Object> for PropertyValue {
    fn from(value: Object) -> Self {
        PropertyValue::Object(Box::new(value))
    }
}

// TryFrom implementations for extracting values from PropertyValue
impl TryFrom<PropertyValue> for i64 {
    type Error = Error;

    fn try_from(value: PropertyValue) -> crate::Result<Self> {
        match value {
            PropertyValue::Int(i) => Ok(i),
            other => Err(Error::custom(format!(
                "expected integer, found {}",
                other.type_name()
            ))),
        }
    }
}

impl TryFrom<PropertyValue> for f64 {
    type Error = Error;

    fn try_from(value: PropertyValue) -> crate::Result<Self> {
        value.as_f64().ok_or_else(|| {
            Error::custom(format!("expected float, found {}", value.type_name()))
        })
    }
}

impl TryFrom<PropertyValue> for bool {
    type Error = Error;

    fn try_from(value: PropertyValue) -> crate::Result<Self> {
        match value {
            PropertyValue::Bool(b) => Ok(b),
            other => Err(Error::custom(format!(
                "expected boolean, found {}",
                other.type_name()
            ))),
        }
    }
}

impl TryFrom<PropertyValue> for String {
    type Error = Error;

    fn try_from(value: PropertyValue) -> crate::Result<Self> {
        match value {
            PropertyValue::String(s) => Ok(s),
            other => Err(Error::custom(format!(
                "expected string, found {}",
                other.type_name()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        assert_eq!(PropertyValue::Int(3).as_f64(), Some(3.0));
        assert_eq!(PropertyValue::Float(0.5).as_i64(), None);
        assert_eq!(PropertyValue::from(true).as_bool(), Some(true));
        assert_eq!(
            PropertyValue::Tuple(vec![PropertyValue::Int(1)]).as_list(),
            Some(&[PropertyValue::Int(1)][..])
        );
        assert_eq!(PropertyValue::identifier("clRed").as_str(), None);
        assert_eq!(
            PropertyValue::identifier("clRed").as_identifier(),
            Some("clRed")
        );
    }

    #[test]
    fn test_try_from() {
        assert_eq!(i64::try_from(PropertyValue::Int(-4)).unwrap(), -4);
        assert_eq!(f64::try_from(PropertyValue::Int(2)).unwrap(), 2.0);
        assert!(bool::try_from(PropertyValue::from("True")).is_err());
        let err = String::try_from(PropertyValue::Bytes(vec![1])).unwrap_err();
        assert_eq!(err.to_string(), "Error: expected string, found bytes");
    }

    #[test]
    fn test_is_ascii_looks_into_nested_values() {
        assert!(PropertyValue::from("plain").is_ascii());
        assert!(!PropertyValue::from("ä").is_ascii());
        assert!(!PropertyValue::Set(vec![PropertyValue::identifier("ä")]).is_ascii());
        assert!(!PropertyValue::Items(vec![vec![Property::new("ä", 0)]]).is_ascii());
        assert!(PropertyValue::Bytes(vec![0xFF]).is_ascii());
    }

    #[test]
    fn test_display_uses_printer() {
        assert_eq!(PropertyValue::Float(1.0).to_string(), "1.000000000000000000");
        assert_eq!(
            PropertyValue::Set(vec![
                PropertyValue::identifier("akLeft"),
                PropertyValue::identifier("akTop")
            ])
            .to_string(),
            "[akLeft, akTop]"
        );
    }
}
