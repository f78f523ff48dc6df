// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dynamically typed property values.
//!
//! This module provides [`PropertyValue`], the value held by every property
//! slot, and [`PropertyType`] for converting between it and concrete Rust
//! types at the typed accessor boundary.

use alloc::string::{String, ToString};
use core::fmt;

use crate::kind::PropertyKind;

/// The value of a property.
///
/// Every property starts out as [`PropertyValue::Undefined`]. Equality is
/// structural, so writing an equal value is a no-op.
///
/// # Example
///
/// ```rust
/// use trellis_property::PropertyValue;
///
/// let value = PropertyValue::from("warning");
/// assert_eq!(value.as_str(), Some("warning"));
/// assert_eq!(value.to_string(), "warning");
///
/// assert!(PropertyValue::default().is_undefined());
/// assert_eq!(PropertyValue::from(7_i64).to_string(), "7");
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub enum PropertyValue {
    /// No value has been set.
    #[default]
    Undefined,
    /// Text.
    String(String),
    /// A flag.
    Boolean(bool),
    /// An integer.
    Number(i64),
    /// Structured data.
    Json(serde_json::Value),
}

impl PropertyValue {
    /// Returns `true` for [`PropertyValue::Undefined`].
    #[must_use]
    #[inline]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Returns the text of a [`PropertyValue::String`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the flag of a [`PropertyValue::Boolean`].
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Returns the integer of a [`PropertyValue::Number`].
    #[must_use]
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(number) => Some(*number),
            _ => None,
        }
    }

    /// Returns the data of a [`PropertyValue::Json`].
    #[must_use]
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Converts any defined value into JSON.
    ///
    /// Returns `None` for [`PropertyValue::Undefined`].
    #[must_use]
    pub fn to_json(&self) -> Option<serde_json::Value> {
        match self {
            Self::Undefined => None,
            Self::String(text) => Some(serde_json::Value::String(text.clone())),
            Self::Boolean(flag) => Some(serde_json::Value::Bool(*flag)),
            Self::Number(number) => Some(serde_json::Value::from(*number)),
            Self::Json(value) => Some(value.clone()),
        }
    }

    /// Builds a value from a JSON literal found in a declaration.
    ///
    /// `Json` properties keep the literal as is. For the other kinds, JSON
    /// strings, booleans and integers map onto the matching variant, `null`
    /// is [`PropertyValue::Undefined`], and anything else is kept as JSON.
    #[must_use]
    pub fn from_literal(kind: PropertyKind, literal: &serde_json::Value) -> Self {
        if kind == PropertyKind::Json {
            return Self::Json(literal.clone());
        }
        match literal {
            serde_json::Value::Null => Self::Undefined,
            serde_json::Value::String(text) => Self::String(text.clone()),
            serde_json::Value::Bool(flag) => Self::Boolean(*flag),
            serde_json::Value::Number(number) => match number.as_i64() {
                Some(integer) => Self::Number(integer),
                None => Self::Json(literal.clone()),
            },
            other => Self::Json(other.clone()),
        }
    }
}

/// Display text used for `String`, `Number` and `Raw` attributes.
///
/// [`PropertyValue::Undefined`] displays as the empty string.
impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => Ok(()),
            Self::String(text) => f.write_str(text),
            Self::Boolean(flag) => write!(f, "{flag}"),
            Self::Number(number) => write!(f, "{number}"),
            Self::Json(value) => write!(f, "{value}"),
        }
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<serde_json::Value> for PropertyValue {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for PropertyValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Undefined, Into::into)
    }
}

/// A Rust type that can be read from and written to a property slot.
///
/// This is what makes [`Property<T>`](crate::Property) handles type-safe.
pub trait PropertyType: Sized + 'static {
    /// The kind a property of this type is usually declared with.
    const KIND: PropertyKind;

    /// Reads a value of this type, or `None` if the slot holds something else.
    fn from_value(value: &PropertyValue) -> Option<Self>;

    /// Wraps this value for storage.
    fn into_value(self) -> PropertyValue;
}

impl PropertyType for String {
    const KIND: PropertyKind = PropertyKind::String;

    fn from_value(value: &PropertyValue) -> Option<Self> {
        value.as_str().map(ToString::to_string)
    }

    fn into_value(self) -> PropertyValue {
        PropertyValue::String(self)
    }
}

impl PropertyType for bool {
    const KIND: PropertyKind = PropertyKind::Boolean;

    fn from_value(value: &PropertyValue) -> Option<Self> {
        value.as_bool()
    }

    fn into_value(self) -> PropertyValue {
        PropertyValue::Boolean(self)
    }
}

impl PropertyType for i64 {
    const KIND: PropertyKind = PropertyKind::Number;

    fn from_value(value: &PropertyValue) -> Option<Self> {
        value.as_number()
    }

    fn into_value(self) -> PropertyValue {
        PropertyValue::Number(self)
    }
}

impl PropertyType for serde_json::Value {
    const KIND: PropertyKind = PropertyKind::Json;

    fn from_value(value: &PropertyValue) -> Option<Self> {
        value.to_json()
    }

    fn into_value(self) -> PropertyValue {
        PropertyValue::Json(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use serde_json::json;

    #[test]
    fn accessors_match_variants() {
        assert_eq!(PropertyValue::from("a").as_str(), Some("a"));
        assert_eq!(PropertyValue::from(true).as_bool(), Some(true));
        assert_eq!(PropertyValue::from(3_i32).as_number(), Some(3));
        assert_eq!(PropertyValue::from(json!([1])).as_json(), Some(&json!([1])));
        assert_eq!(PropertyValue::from("a").as_bool(), None);
    }

    #[test]
    fn option_maps_none_to_undefined() {
        assert!(PropertyValue::from(None::<bool>).is_undefined());
        assert_eq!(PropertyValue::from(Some(false)), PropertyValue::Boolean(false));
    }

    #[test]
    fn literal_for_json_kind_is_kept_whole() {
        let literal = json!({"a": "av"});
        assert_eq!(
            PropertyValue::from_literal(PropertyKind::Json, &literal),
            PropertyValue::Json(literal)
        );
        assert_eq!(
            PropertyValue::from_literal(PropertyKind::Json, &json!(null)),
            PropertyValue::Json(json!(null))
        );
    }

    #[test]
    fn literal_for_other_kinds_maps_scalars() {
        assert_eq!(
            PropertyValue::from_literal(PropertyKind::String, &json!("x")),
            PropertyValue::from("x")
        );
        assert_eq!(
            PropertyValue::from_literal(PropertyKind::Boolean, &json!(false)),
            PropertyValue::Boolean(false)
        );
        assert_eq!(
            PropertyValue::from_literal(PropertyKind::Number, &json!(12)),
            PropertyValue::Number(12)
        );
        assert_eq!(
            PropertyValue::from_literal(PropertyKind::Number, &json!(1.5)),
            PropertyValue::Json(json!(1.5))
        );
        assert!(PropertyValue::from_literal(PropertyKind::String, &json!(null)).is_undefined());
    }

    #[test]
    fn display_forms() {
        assert_eq!(PropertyValue::Undefined.to_string(), "");
        assert_eq!(PropertyValue::Boolean(false).to_string(), "false");
        assert_eq!(PropertyValue::Number(-4).to_string(), "-4");
        assert_eq!(PropertyValue::Json(json!({"a": 1})).to_string(), "{\"a\":1}");
    }

    #[test]
    fn typed_conversions() {
        assert_eq!(String::from_value(&PropertyValue::from("x")), Some("x".to_string()));
        assert_eq!(bool::from_value(&PropertyValue::Number(1)), None);
        assert_eq!(
            serde_json::Value::from_value(&PropertyValue::Number(1)),
            Some(json!(1))
        );
        assert_eq!(serde_json::Value::from_value(&PropertyValue::Undefined), None);
        assert_eq!(7_i64.into_value(), PropertyValue::Number(7));
    }
}
