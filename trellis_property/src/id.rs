// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property identification types.
//!
//! This module provides [`PropertyId`] for runtime property identification and
//! [`Property<T>`] for typed accessor handles.

use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;

/// A runtime property identifier.
///
/// This is the position of a property in its [`PropertySchema`](crate::PropertySchema),
/// in declaration order. It is only meaningful for the schema that issued it.
///
/// # Example
///
/// ```rust
/// use trellis_property::PropertyId;
///
/// let id = PropertyId::new(3);
/// assert_eq!(id.index(), 3);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PropertyId(u16);

impl PropertyId {
    /// Creates a property ID from a schema position.
    ///
    /// This is typically called by [`SchemaBuilder`](crate::SchemaBuilder)
    /// rather than directly.
    #[must_use]
    #[inline]
    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    /// Returns the schema position of this property.
    #[must_use]
    #[inline]
    pub const fn index(self) -> u16 {
        self.0
    }
}

impl fmt::Debug for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PropertyId").field(&self.0).finish()
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PropertyId({})", self.0)
    }
}

/// A typed accessor handle.
///
/// Returned by [`SchemaBuilder::property`](crate::SchemaBuilder::property).
/// The phantom type fixes the Rust type used by typed getters and setters, so
/// a `Property<bool>` can only be written with a `bool`.
///
/// ```rust
/// use trellis_property::{Property, PropertyDefinition, SchemaBuilder};
///
/// struct Toggle;
///
/// let mut builder = SchemaBuilder::<Toggle>::new();
/// let checked: Property<bool> = builder.property("checked", PropertyDefinition::boolean());
/// assert_eq!(checked.id().index(), 0);
/// ```
pub struct Property<T> {
    id: PropertyId,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Property<T> {
    /// Creates a typed handle from a property ID.
    ///
    /// The caller is responsible for pairing the ID with the Rust type the
    /// property holds; typed reads of a mismatched type return `None`.
    #[must_use]
    #[inline]
    pub const fn from_id(id: PropertyId) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }

    /// Returns the underlying property ID.
    #[must_use]
    #[inline]
    pub const fn id(self) -> PropertyId {
        self.id
    }
}

// Manual impls so `T` needs no bounds.

impl<T> Copy for Property<T> {}

impl<T> Clone for Property<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> PartialEq for Property<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Property<T> {}

impl<T> Hash for Property<T> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("id", &self.id)
            .field("type", &core::any::type_name::<T>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::string::String;

    #[test]
    fn property_id_formatting() {
        let id = PropertyId::new(42);
        assert_eq!(format!("{:?}", id), "PropertyId(42)");
        assert_eq!(format!("{}", id), "PropertyId(42)");
    }

    #[test]
    fn handles_compare_by_id() {
        let a: Property<String> = Property::from_id(PropertyId::new(1));
        let b: Property<String> = Property::from_id(PropertyId::new(1));
        let c: Property<String> = Property::from_id(PropertyId::new(2));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn handle_debug_names_type() {
        let handle: Property<bool> = Property::from_id(PropertyId::new(0));
        let debug = format!("{:?}", handle);
        assert!(debug.contains("bool"), "debug output was {debug}");
    }

    #[test]
    fn handle_is_id_sized() {
        use core::mem::size_of;
        assert_eq!(size_of::<Property<String>>(), size_of::<PropertyId>());
    }
}
