// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property kind tags.

use core::fmt;

/// The declared kind of a property.
///
/// The kind decides how a property's value is encoded into its reflected
/// attribute and decoded back out of it (see [`codec`](crate::codec)).
///
/// # Example
///
/// ```rust
/// use trellis_property::PropertyKind;
///
/// assert_eq!(PropertyKind::from_name("Boolean"), Some(PropertyKind::Boolean));
/// assert_eq!(PropertyKind::from_name("Date"), None);
/// assert_eq!(PropertyKind::Json.to_string(), "Json");
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    /// Plain text, reflected verbatim.
    String,
    /// A flag, reflected as the presence of the attribute.
    Boolean,
    /// A base-10 integer.
    Number,
    /// An arbitrary JSON value, reflected with swapped quote characters.
    Json,
    /// A declared kind outside the supported set.
    ///
    /// Values pass through unchanged and are reflected as their display text.
    Raw,
}

impl PropertyKind {
    /// Looks up a supported kind by its declared name.
    ///
    /// Returns `None` for names outside `String`, `Boolean`, `Number` and `Json`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "String" => Some(Self::String),
            "Boolean" => Some(Self::Boolean),
            "Number" => Some(Self::Number),
            "Json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Returns the declared name of this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Boolean => "Boolean",
            Self::Number => "Number",
            Self::Json => "Json",
            Self::Raw => "Raw",
        }
    }

    /// Returns `false` for [`PropertyKind::Raw`].
    #[must_use]
    #[inline]
    pub const fn is_supported(self) -> bool {
        !matches!(self, Self::Raw)
    }

    /// Returns `true` if a property of this kind can be read and written
    /// through a handle of kind `requested`.
    ///
    /// [`PropertyKind::Raw`] passes values through unchanged, so any handle
    /// fits it.
    #[must_use]
    #[inline]
    pub fn accepts(self, requested: Self) -> bool {
        self == requested || self == Self::Raw
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for kind in [
            PropertyKind::String,
            PropertyKind::Boolean,
            PropertyKind::Number,
            PropertyKind::Json,
        ] {
            assert_eq!(PropertyKind::from_name(kind.name()), Some(kind));
            assert!(kind.is_supported());
        }
    }

    #[test]
    fn raw_is_not_declarable_by_name() {
        assert_eq!(PropertyKind::from_name("Raw"), None);
        assert!(!PropertyKind::Raw.is_supported());
    }

    #[test]
    fn handles_must_match_the_declared_kind() {
        assert!(PropertyKind::Number.accepts(PropertyKind::Number));
        assert!(!PropertyKind::Number.accepts(PropertyKind::Boolean));
        assert!(!PropertyKind::String.accepts(PropertyKind::Json));
        assert!(PropertyKind::Raw.accepts(PropertyKind::String));
    }

    #[test]
    fn names_are_case_sensitive() {
        assert_eq!(PropertyKind::from_name("string"), None);
        assert_eq!(PropertyKind::from_name(""), None);
    }
}
