//! The object tree: [`Object`], [`ObjectKind`] and [`Property`].
//!
//! A DFM file holds one root object. Child objects are stored as property
//! values, in the same list as plain properties, so their relative order is
//! kept when printing:
//!
//! ```text
//! object Form1: TForm1
//!   Left = 0
//!   object Button1: TButton
//!     Caption = 'OK'
//!   end
//!   Top = 0
//! end
//! ```
//!
//! The tree is plain owned data. Callers may edit it freely before printing
//! it again.
//!
//! ```rust
//! use dfm::{Object, PropertyValue};
//!
//! let mut form = dfm::from_str("object Form1: TForm1\n  Caption = 'Old'\nend").unwrap();
//! form.set("Caption", "New");
//! assert_eq!(form.get("Caption").and_then(PropertyValue::as_str), Some("New"));
//! ```

use crate::value::PropertyValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The keyword that introduces an object.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    /// `object`
    #[default]
    Plain,
    /// `inherited`
    Inherited,
    /// `inline`
    Inline,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 3] = [ObjectKind::Plain, ObjectKind::Inherited, ObjectKind::Inline];

    /// The lower-case keyword for this kind.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            ObjectKind::Plain => "object",
            ObjectKind::Inherited => "inherited",
            ObjectKind::Inline => "inline",
        }
    }

    /// Looks up the kind for a keyword, ignoring ASCII case.
    #[must_use]
    pub fn from_keyword(word: &str) -> Option<ObjectKind> {
        Self::ALL
            .into_iter()
            .find(|kind| word.eq_ignore_ascii_case(kind.keyword()))
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A named value inside an [`Object`] or an item.
///
/// The name may contain dots, e.g. `Font.Height`; they are part of the name.
/// Names need not be unique within one object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub value: PropertyValue,
}

impl Property {
    pub fn new(name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        Property {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Wraps a child object in a property named after it.
    pub fn object(child: Object) -> Self {
        Property {
            name: child.name.clone(),
            value: PropertyValue::Object(Box::new(child)),
        }
    }

    pub(crate) fn is_ascii(&self) -> bool {
        self.name.is_ascii() && self.value.is_ascii()
    }
}

/// One component of a form: a `TForm`, `TPanel`, `TMenuItem`, ...
///
/// # Examples
///
/// ```rust
/// use dfm::{Object, ObjectKind, Property};
///
/// let panel = Object::new("Panel1", "TPanel")
///     .with_kind(ObjectKind::Inherited)
///     .with_index(2)
///     .with_property(Property::new("Left", 8));
///
/// assert_eq!(
///     panel.to_string(),
///     "inherited Panel1: TPanel [2]\r\n  Left = 8\r\nend\r\n"
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Object {
    /// Empty for anonymous objects like `object TMenuItem`.
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub kind: ObjectKind,
    /// The `[N]` after the type, if present.
    pub index: Option<usize>,
    pub properties: Vec<Property>,
}

impl Object {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Object {
            name: name.into(),
            type_name: type_name.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: ObjectKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    #[must_use]
    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    #[inline]
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty()
    }

    /// Returns the value of the first property called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.value)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut PropertyValue> {
        self.properties
            .iter_mut()
            .find(|p| p.name == name)
            .map(|p| &mut p.value)
    }

    /// Replaces the value of the first property called `name`, or appends a
    /// new property if there is none. Returns the previous value.
    pub fn set(
        &mut self,
        name: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Option<PropertyValue> {
        let name = name.into();
        let value = value.into();
        match self.get_mut(&name) {
            Some(slot) => Some(std::mem::replace(slot, value)),
            None => {
                self.properties.push(Property { name, value });
                None
            }
        }
    }

    /// Iterates over the direct child objects, in order.
    pub fn children(&self) -> impl Iterator<Item = &Object> {
        self.properties.iter().filter_map(|p| p.value.as_object())
    }

    /// Finds a named object among all descendants, depth first.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Object> {
        self.children().find_map(|child| {
            if child.name == name {
                Some(child)
            } else {
                child.find(name)
            }
        })
    }

    /// Returns `true` if no name, type, identifier or string anywhere in the
    /// tree contains a non-ASCII character.
    #[must_use]
    pub fn is_ascii(&self) -> bool {
        self.name.is_ascii()
            && self.type_name.is_ascii()
            && self.properties.iter().all(Property::is_ascii)
    }

    /// The printed form as bytes, starting with a UTF-8 byte order mark if the
    /// tree is not pure ASCII. Same as [`crate::to_vec`].
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        crate::to_vec(self)
    }
}

/// The printed DFM code, without byte order mark.
impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::to_string(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> Object {
        Object::new("Form1", "TForm1")
            .with_property(Property::new("Left", 0))
            .with_property(Property::object(
                Object::new("Panel1", "TPanel").with_property(Property::object(
                    Object::new("Button1", "TButton").with_property(Property::new("Caption", "OK")),
                )),
            ))
            .with_property(Property::new("Left", 5))
    }

    #[test]
    fn test_keywords() {
        assert_eq!(ObjectKind::from_keyword("INHERITED"), Some(ObjectKind::Inherited));
        assert_eq!(ObjectKind::from_keyword("Inline"), Some(ObjectKind::Inline));
        assert_eq!(ObjectKind::from_keyword("end"), None);
        assert_eq!(ObjectKind::Plain.to_string(), "object");
    }

    #[test]
    fn test_get_returns_first_duplicate() {
        assert_eq!(form().get("Left"), Some(&PropertyValue::Int(0)));
        assert_eq!(form().get("Top"), None);
    }

    #[test]
    fn test_set_replaces_or_appends() {
        let mut obj = form();
        assert_eq!(obj.set("Left", 7), Some(PropertyValue::Int(0)));
        assert_eq!(obj.set("Top", 1), None);
        assert_eq!(obj.properties.len(), 4);
        assert_eq!(obj.properties[0].value, PropertyValue::Int(7));
        assert_eq!(obj.properties[2].value, PropertyValue::Int(5));
    }

    #[test]
    fn test_children_and_find() {
        let obj = form();
        let names: Vec<&str> = obj.children().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Panel1"]);
        let button = obj.find("Button1").unwrap();
        assert_eq!(button.type_name, "TButton");
        assert!(obj.find("Missing").is_none());
    }

    #[test]
    fn test_property_object_copies_name() {
        let prop = Property::object(Object::new("", "TMenuItem"));
        assert_eq!(prop.name, "");
        assert!(prop.value.is_object());
    }

    #[test]
    fn test_is_ascii() {
        assert!(form().is_ascii());
        assert!(!Object::new("ä", "T").is_ascii());
        assert!(!Object::new("a", "Tä").is_ascii());
        let nested = form().with_property(Property::object(Object::new("b", "Tö")));
        assert!(!nested.is_ascii());
    }
}
