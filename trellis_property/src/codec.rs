// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute codec.
//!
//! Converts between the string form of an attribute and a [`PropertyValue`].
//! An absent attribute is `None` on both sides.
//!
//! | Kind | Decode | Encode |
//! |------|--------|--------|
//! | `String`, `Raw` | the text | display text |
//! | `Boolean` | attribute present | `""` unless `false` |
//! | `Number` | leading base-10 integer | display text |
//! | `Json` | swap `'`/`"`, parse | serialize, swap `"`/`'` |
//!
//! [`PropertyValue::Undefined`] always encodes to an absent attribute.
//!
//! The Json form swaps every single quote with a double quote and back,
//! rather than only replacing one with the other. The swap is its own
//! inverse, so any serialized value round-trips, including strings that
//! contain quote characters:
//!
//! ```rust
//! use serde_json::json;
//! use trellis_property::{codec, PropertyKind, PropertyValue};
//!
//! let value = PropertyValue::Json(json!({"quote": "it's \"fine\""}));
//! let text = codec::encode(PropertyKind::Json, &value).unwrap();
//! assert_eq!(text, r#"{'quote':'it"s \'fine\''}"#);
//! assert_eq!(codec::decode(PropertyKind::Json, Some(&text)), Ok(value));
//!
//! // Hand-written single-quoted text decodes too.
//! assert_eq!(
//!     codec::decode(PropertyKind::Json, Some("{'a':2}")),
//!     Ok(PropertyValue::Json(json!({"a": 2})))
//! );
//! ```

use alloc::string::{String, ToString};

use crate::diagnostics::CodecError;
use crate::kind::PropertyKind;
use crate::value::PropertyValue;

/// Decodes attribute text into a property value.
///
/// # Errors
///
/// Returns [`CodecError::Json`] when a `Json` attribute holds text that does
/// not parse, either with quotes swapped or as written.
pub fn decode(kind: PropertyKind, attribute: Option<&str>) -> Result<PropertyValue, CodecError> {
    match kind {
        PropertyKind::Boolean => Ok(PropertyValue::Boolean(attribute.is_some())),
        PropertyKind::String | PropertyKind::Raw => {
            Ok(attribute.map_or(PropertyValue::Undefined, PropertyValue::from))
        }
        PropertyKind::Number => Ok(attribute
            .and_then(parse_integer)
            .map_or(PropertyValue::Undefined, PropertyValue::Number)),
        PropertyKind::Json => match attribute {
            None => Ok(PropertyValue::Undefined),
            Some(text) if text.trim().is_empty() => Ok(PropertyValue::Undefined),
            Some(text) => parse_json(text).map(PropertyValue::Json),
        },
    }
}

/// Encodes a property value as attribute text.
///
/// Returns `None` when the attribute should be removed.
#[must_use]
pub fn encode(kind: PropertyKind, value: &PropertyValue) -> Option<String> {
    if value.is_undefined() {
        return None;
    }
    match kind {
        PropertyKind::Boolean => match value {
            PropertyValue::Boolean(false) => None,
            _ => Some(String::new()),
        },
        PropertyKind::Json => value
            .to_json()
            .map(|json| swap_quotes(&json.to_string())),
        PropertyKind::String | PropertyKind::Number | PropertyKind::Raw => {
            Some(value.to_string())
        }
    }
}

fn parse_json(text: &str) -> Result<serde_json::Value, CodecError> {
    serde_json::from_str(&swap_quotes(text)).or_else(|swapped_err| {
        serde_json::from_str(text).map_err(|_| CodecError::Json(swapped_err.to_string()))
    })
}

/// Exchanges `'` and `"`, leaving every other character alone.
fn swap_quotes(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\'' => '"',
            '"' => '\'',
            other => other,
        })
        .collect()
}

/// Parses the leading base-10 integer of `text`.
///
/// Leading whitespace and a single sign are accepted, and parsing stops at the
/// first non-digit. Returns `None` when there are no digits or the value does
/// not fit in an `i64`.
fn parse_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let mut result: i64 = 0;
    for digit in digits[..end].bytes() {
        let digit = i64::from(digit - b'0');
        result = result.checked_mul(10)?;
        result = if negative {
            result.checked_sub(digit)?
        } else {
            result.checked_add(digit)?
        };
    }
    Some(result)
}
