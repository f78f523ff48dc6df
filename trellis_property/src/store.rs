// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-instance property storage.
//!
//! This module provides [`InstanceStore`], the sparse map from property to
//! current value owned by each element.
//!
//! # Implementation
//!
//! Like a `vector_map`, entries live in a vector sorted by [`PropertyId`]
//! and are found by binary search. Elements rarely declare more than a handful
//! of properties, so the first few entries are kept inline.

use smallvec::SmallVec;

use crate::id::PropertyId;
use crate::value::PropertyValue;

/// Inline capacity for stored values.
const INLINE_CAPACITY: usize = 8;

static UNDEFINED: PropertyValue = PropertyValue::Undefined;

/// Current property values of one element.
///
/// Slots that were never written, or were written with
/// [`PropertyValue::Undefined`], take no space and read as `Undefined`.
///
/// # Example
///
/// ```rust
/// use trellis_property::{InstanceStore, PropertyId, PropertyValue};
///
/// let header = PropertyId::new(0);
/// let mut store = InstanceStore::new();
/// assert!(store.get(header).is_undefined());
///
/// let old = store.replace(header, PropertyValue::from("Hi"));
/// assert!(old.is_undefined());
/// assert_eq!(store.get(header).as_str(), Some("Hi"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct InstanceStore {
    /// Defined values, sorted by [`PropertyId`].
    entries: SmallVec<[(PropertyId, PropertyValue); INLINE_CAPACITY]>,
}

impl InstanceStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current value of `property`.
    #[must_use]
    pub fn get(&self, property: PropertyId) -> &PropertyValue {
        match self.find(property) {
            Ok(index) => &self.entries[index].1,
            Err(_) => &UNDEFINED,
        }
    }

    /// Stores `value` and returns the value it replaced.
    pub fn replace(&mut self, property: PropertyId, value: PropertyValue) -> PropertyValue {
        match (self.find(property), value.is_undefined()) {
            (Ok(index), true) => self.entries.remove(index).1,
            (Ok(index), false) => core::mem::replace(&mut self.entries[index].1, value),
            (Err(_), true) => PropertyValue::Undefined,
            (Err(index), false) => {
                self.entries.insert(index, (property, value));
                PropertyValue::Undefined
            }
        }
    }

    /// Returns `true` if `property` holds a defined value.
    #[must_use]
    pub fn contains(&self, property: PropertyId) -> bool {
        self.find(property).is_ok()
    }

    /// Returns the number of defined values.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if every slot is undefined.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the defined values, ordered by [`PropertyId`].
    pub fn iter(&self) -> impl Iterator<Item = (PropertyId, &PropertyValue)> + '_ {
        self.entries.iter().map(|(id, value)| (*id, value))
    }

    fn find(&self, property: PropertyId) -> Result<usize, usize> {
        self.entries.binary_search_by_key(&property, |(id, _)| *id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn unwritten_slots_read_undefined() {
        let store = InstanceStore::new();
        assert!(store.is_empty());
        assert!(store.get(PropertyId::new(5)).is_undefined());
        assert!(!store.contains(PropertyId::new(5)));
    }

    #[test]
    fn replace_returns_previous() {
        let mut store = InstanceStore::new();
        let id = PropertyId::new(1);
        assert!(store.replace(id, PropertyValue::Number(1)).is_undefined());
        assert_eq!(store.replace(id, PropertyValue::Number(2)), PropertyValue::Number(1));
        assert_eq!(store.get(id), &PropertyValue::Number(2));
    }

    #[test]
    fn undefined_clears_the_slot() {
        let mut store = InstanceStore::new();
        let id = PropertyId::new(1);
        store.replace(id, PropertyValue::Boolean(true));
        assert_eq!(store.replace(id, PropertyValue::Undefined), PropertyValue::Boolean(true));
        assert!(store.is_empty());
        assert!(store.replace(id, PropertyValue::Undefined).is_undefined());
    }

    #[test]
    fn entries_stay_sorted() {
        let mut store = InstanceStore::new();
        for index in [4_u16, 0, 9, 2] {
            store.replace(PropertyId::new(index), PropertyValue::from(i64::from(index)));
        }
        let ids: Vec<u16> = store.iter().map(|(id, _)| id.index()).collect();
        assert_eq!(ids, [0, 2, 4, 9]);
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn spills_past_inline_capacity() {
        let mut store = InstanceStore::new();
        for index in 0..20_u16 {
            store.replace(PropertyId::new(index), PropertyValue::Number(i64::from(index)));
        }
        assert_eq!(store.len(), 20);
        assert_eq!(store.get(PropertyId::new(17)), &PropertyValue::Number(17));
    }
}
