// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute to property lookup.

use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashMap;

use crate::id::PropertyId;

/// Maps reflected attribute names back to the properties bound to them.
///
/// The set of attributes in the index is exactly the set an element observes.
/// Iteration follows declaration order.
#[derive(Clone, Debug, Default)]
pub struct AttributeIndex {
    bindings: Vec<(String, PropertyId)>,
    by_attribute: HashMap<String, PropertyId>,
}

impl AttributeIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `attribute` to `property`.
    ///
    /// Returns the property already holding the binding, leaving it in place,
    /// if the attribute is taken.
    pub fn bind(&mut self, attribute: &str, property: PropertyId) -> Result<(), PropertyId> {
        if let Some(existing) = self.by_attribute.get(attribute) {
            return Err(*existing);
        }
        self.by_attribute.insert(attribute.into(), property);
        self.bindings.push((attribute.into(), property));
        Ok(())
    }

    /// Returns the property bound to `attribute`.
    #[must_use]
    pub fn property(&self, attribute: &str) -> Option<PropertyId> {
        self.by_attribute.get(attribute).copied()
    }

    /// Returns `true` if `attribute` is observed.
    #[must_use]
    pub fn contains(&self, attribute: &str) -> bool {
        self.by_attribute.contains_key(attribute)
    }

    /// Returns the observed attribute names, in declaration order.
    pub fn attributes(&self) -> impl Iterator<Item = &str> + '_ {
        self.bindings.iter().map(|(attribute, _)| attribute.as_str())
    }

    /// Returns `(attribute, property)` pairs, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, PropertyId)> + '_ {
        self.bindings
            .iter()
            .map(|(attribute, property)| (attribute.as_str(), *property))
    }

    /// Returns the number of bound attributes.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` if no attribute is bound.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
