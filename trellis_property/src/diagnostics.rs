// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Non-fatal diagnostics.
//!
//! Declaration mistakes and bad attribute text degrade a feature instead of
//! failing. Each one is a [`Warning`], logged through `tracing` when it is
//! reported and kept in a [`Diagnostics`] list for later inspection.

use alloc::string::String;
use alloc::vec::Vec;

use crate::kind::PropertyKind;

/// A recoverable problem with a property declaration or value.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Warning {
    /// The declaration map itself is not a JSON object.
    #[error("property declarations should be an object; found {found}")]
    MalformedDeclarations {
        /// JSON text of what was found instead.
        found: String,
    },
    /// A declaration entry is not a JSON object. The property is skipped.
    #[error("the property `{property}` should be an object")]
    MalformedDefinition {
        /// The property name.
        property: String,
    },
    /// A declaration names a kind outside the supported set.
    #[error("the property `{property}` has unsupported type {kind}; values pass through unchanged")]
    UnsupportedKind {
        /// The property name.
        property: String,
        /// The declared kind, as written.
        kind: String,
    },
    /// `reflectToAttribute` is present but not a non-empty string.
    #[error("the property `{property}` has an invalid reflectToAttribute; it will not be reflected")]
    InvalidAttribute {
        /// The property name.
        property: String,
    },
    /// A property name was declared twice. The first declaration is kept.
    #[error("the property `{property}` is already declared")]
    DuplicateProperty {
        /// The property name.
        property: String,
    },
    /// Two properties reflect to the same attribute. The first binding is kept.
    #[error("the attribute `{attribute}` is already bound to `{existing}`; `{property}` will not be reflected")]
    DuplicateAttribute {
        /// The attribute name.
        attribute: String,
        /// The property that was refused the binding.
        property: String,
        /// The property that holds the binding.
        existing: String,
    },
    /// The schema cannot address any more properties.
    #[error("too many properties; `{property}` was skipped")]
    CapacityExceeded {
        /// The property name.
        property: String,
    },
    /// A default override names a property that is not declared.
    #[error("a default override names the undeclared property `{property}`")]
    UnknownOverride {
        /// The property name.
        property: String,
    },
    /// Default overrides arrived after the schema was already resolved.
    #[error("default overrides were registered after the schema was resolved and are ignored")]
    LateOverride,
    /// An observer name does not resolve on the component.
    #[error("method `{observer}` for property `{property}` is not defined")]
    MissingObserver {
        /// The property name.
        property: String,
        /// The observer name that did not resolve.
        observer: String,
    },
    /// A typed handle does not match the declared kind of its property.
    #[error("the property `{property}` is declared {declared} but accessed as {requested}")]
    KindMismatch {
        /// The property name.
        property: String,
        /// The declared kind.
        declared: PropertyKind,
        /// The kind of the handle.
        requested: PropertyKind,
    },
    /// A write named a property that is not declared.
    #[error("the property `{property}` is not declared")]
    UnknownProperty {
        /// The property name.
        property: String,
    },
    /// Attribute text could not be decoded.
    #[error("attribute `{attribute}` of property `{property}` could not be decoded")]
    Decode {
        /// The property name.
        property: String,
        /// The attribute name.
        attribute: String,
        /// What went wrong.
        #[source]
        source: CodecError,
    },
    /// The task queue refused the deferred render.
    #[error("a render could not be scheduled: {reason}")]
    RenderDropped {
        /// Why the task queue refused.
        reason: String,
    },
}

impl Warning {
    /// Returns the property this warning is about, if any.
    #[must_use]
    pub fn property(&self) -> Option<&str> {
        match self {
            Self::MalformedDefinition { property }
            | Self::UnsupportedKind { property, .. }
            | Self::InvalidAttribute { property }
            | Self::DuplicateProperty { property }
            | Self::DuplicateAttribute { property, .. }
            | Self::CapacityExceeded { property }
            | Self::UnknownOverride { property }
            | Self::MissingObserver { property, .. }
            | Self::KindMismatch { property, .. }
            | Self::UnknownProperty { property }
            | Self::Decode { property, .. } => Some(property),
            Self::MalformedDeclarations { .. } | Self::LateOverride | Self::RenderDropped { .. } => {
                None
            }
        }
    }

    /// Returns the attribute this warning is about, if any.
    #[must_use]
    pub fn attribute(&self) -> Option<&str> {
        match self {
            Self::DuplicateAttribute { attribute, .. } | Self::Decode { attribute, .. } => {
                Some(attribute)
            }
            _ => None,
        }
    }

    /// Returns the property kind involved, as declared.
    #[must_use]
    pub fn kind(&self) -> Option<&str> {
        match self {
            Self::UnsupportedKind { kind, .. } => Some(kind),
            Self::KindMismatch { declared, .. } => Some(declared.name()),
            _ => None,
        }
    }
}

/// Failure to decode attribute text.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The text is not JSON, with or without quote substitution.
    #[error("invalid JSON: {0}")]
    Json(String),
}

/// An append-only list of reported [`Warning`]s.
///
/// A list made with [`Diagnostics::bounded`] stops keeping warnings once it
/// is full. Later ones are still logged and counted by
/// [`Diagnostics::dropped`].
///
/// # Example
///
/// ```rust
/// use trellis_property::{Diagnostics, Warning};
///
/// let mut diagnostics = Diagnostics::new();
/// diagnostics.report(Warning::LateOverride);
/// assert_eq!(diagnostics.warnings(), &[Warning::LateOverride]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
    limit: Option<usize>,
    dropped: usize,
}

impl Diagnostics {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty list that keeps at most `limit` warnings.
    #[must_use]
    pub fn bounded(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Logs `warning` and keeps it, unless the list is full.
    pub fn report(&mut self, warning: Warning) {
        tracing::warn!(
            target: "trellis",
            property = warning.property(),
            attribute = warning.attribute(),
            kind = warning.kind(),
            "{warning}"
        );
        if self.limit.is_some_and(|limit| self.warnings.len() >= limit) {
            self.dropped += 1;
            return;
        }
        self.warnings.push(warning);
    }

    /// Returns how many warnings were logged but not kept.
    #[must_use]
    #[inline]
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Returns every warning reported so far, oldest first.
    #[must_use]
    #[inline]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Returns `true` if nothing was reported.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Returns the number of reported warnings.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.warnings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn messages_name_the_property() {
        let warning = Warning::MissingObserver {
            property: "header".to_string(),
            observer: "header_changed".to_string(),
        };
        assert_eq!(
            warning.to_string(),
            "method `header_changed` for property `header` is not defined"
        );
    }

    #[test]
    fn decode_warning_keeps_source() {
        use core::error::Error;

        let warning = Warning::Decode {
            property: "options".to_string(),
            attribute: "my-options".to_string(),
            source: CodecError::Json("expected value".to_string()),
        };
        let source = warning.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("invalid JSON: expected value"));
    }

    #[test]
    fn report_accumulates_in_order() {
        let mut diagnostics = Diagnostics::new();
        assert!(diagnostics.is_empty());
        diagnostics.report(Warning::LateOverride);
        diagnostics.report(Warning::UnknownProperty {
            property: "x".to_string(),
        });
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics.warnings()[0], Warning::LateOverride);
    }

    #[test]
    fn bounded_list_keeps_the_oldest() {
        let mut diagnostics = Diagnostics::bounded(2);
        for property in ["a", "b", "c", "d"] {
            diagnostics.report(Warning::UnknownProperty {
                property: property.to_string(),
            });
        }
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics.dropped(), 2);
        assert_eq!(diagnostics.warnings()[1].property(), Some("b"));
    }

    #[test]
    fn fields_for_logging() {
        let decode = Warning::Decode {
            property: "options".to_string(),
            attribute: "my-options".to_string(),
            source: CodecError::Json("expected value".to_string()),
        };
        assert_eq!(decode.property(), Some("options"));
        assert_eq!(decode.attribute(), Some("my-options"));
        assert_eq!(decode.kind(), None);

        let mismatch = Warning::KindMismatch {
            property: "level".to_string(),
            declared: PropertyKind::Number,
            requested: PropertyKind::Boolean,
        };
        assert_eq!(mismatch.kind(), Some("Number"));
        assert_eq!(mismatch.attribute(), None);
        assert_eq!(
            mismatch.to_string(),
            "the property `level` is declared Number but accessed as Boolean"
        );

        assert_eq!(Warning::LateOverride.property(), None);
    }
}
