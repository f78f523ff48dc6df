// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property definitions.
//!
//! This module provides [`PropertyDefinition`], the declaration of a single
//! property, together with its default-value and observer references.

use alloc::string::String;
use core::fmt;

use crate::kind::PropertyKind;
use crate::value::PropertyValue;

/// Callback invoked when a property value changes.
///
/// Receives the component, the new value and the old value, in that order.
pub type Observer<C> = fn(&mut C, &PropertyValue, &PropertyValue);

/// The default value of a property.
#[derive(Clone, Debug)]
pub enum DefaultValue {
    /// A fixed value shared by every instance.
    Literal(PropertyValue),
    /// A factory run once per instance, for values that must not be shared.
    Factory(fn() -> PropertyValue),
}

impl DefaultValue {
    /// Produces the value for a new instance.
    #[must_use]
    pub fn produce(&self) -> PropertyValue {
        match self {
            Self::Literal(value) => value.clone(),
            Self::Factory(factory) => factory(),
        }
    }
}

/// Reference to the observer of a property.
pub enum ObserverRef<C> {
    /// An observer looked up by name on the component when an instance is
    /// created.
    Named(String),
    /// An observer bound at declaration time.
    Callback(Observer<C>),
}

// Manual impls since `C` is only used behind a function pointer.

impl<C> Clone for ObserverRef<C> {
    fn clone(&self) -> Self {
        match self {
            Self::Named(name) => Self::Named(name.clone()),
            Self::Callback(callback) => Self::Callback(*callback),
        }
    }
}

impl<C> fmt::Debug for ObserverRef<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.debug_tuple("Named").field(name).finish(),
            Self::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

/// The declaration of a single property.
///
/// # Example
///
/// ```rust
/// use trellis_property::{PropertyDefinition, PropertyKind, PropertyValue};
///
/// struct Alert;
///
/// let definition = PropertyDefinition::<Alert>::string()
///     .value("warning")
///     .reflect_to_attribute("type-name");
///
/// assert_eq!(definition.kind(), PropertyKind::String);
/// assert_eq!(definition.attribute(), Some("type-name"));
/// assert_eq!(
///     definition.default_value().map(|d| d.produce()),
///     Some(PropertyValue::from("warning"))
/// );
/// ```
pub struct PropertyDefinition<C> {
    kind: PropertyKind,
    default: Option<DefaultValue>,
    observer: Option<ObserverRef<C>>,
    reflect_to_attribute: Option<String>,
}

impl<C> PropertyDefinition<C> {
    /// Creates a definition of the given kind with no default, no observer and
    /// no attribute binding.
    #[must_use]
    pub fn new(kind: PropertyKind) -> Self {
        Self {
            kind,
            default: None,
            observer: None,
            reflect_to_attribute: None,
        }
    }

    /// Shorthand for `PropertyDefinition::new(PropertyKind::String)`.
    #[must_use]
    pub fn string() -> Self {
        Self::new(PropertyKind::String)
    }

    /// Shorthand for `PropertyDefinition::new(PropertyKind::Boolean)`.
    #[must_use]
    pub fn boolean() -> Self {
        Self::new(PropertyKind::Boolean)
    }

    /// Shorthand for `PropertyDefinition::new(PropertyKind::Number)`.
    #[must_use]
    pub fn number() -> Self {
        Self::new(PropertyKind::Number)
    }

    /// Shorthand for `PropertyDefinition::new(PropertyKind::Json)`.
    #[must_use]
    pub fn json() -> Self {
        Self::new(PropertyKind::Json)
    }

    /// Sets a literal default value.
    #[must_use]
    pub fn value(mut self, value: impl Into<PropertyValue>) -> Self {
        self.default = Some(DefaultValue::Literal(value.into()));
        self
    }

    /// Sets a default value factory, run once per instance.
    #[must_use]
    pub fn value_with(mut self, factory: fn() -> PropertyValue) -> Self {
        self.default = Some(DefaultValue::Factory(factory));
        self
    }

    /// Names the observer, resolved against the component per instance.
    #[must_use]
    pub fn observer(mut self, name: impl Into<String>) -> Self {
        self.observer = Some(ObserverRef::Named(name.into()));
        self
    }

    /// Binds the observer directly.
    #[must_use]
    pub fn observer_fn(mut self, callback: Observer<C>) -> Self {
        self.observer = Some(ObserverRef::Callback(callback));
        self
    }

    /// Reflects the property to the named attribute.
    ///
    /// An empty name is reported when the schema is resolved and the
    /// property is left unbound.
    #[must_use]
    pub fn reflect_to_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.reflect_to_attribute = Some(attribute.into());
        self
    }

    /// Returns the declared kind.
    #[must_use]
    #[inline]
    pub fn kind(&self) -> PropertyKind {
        self.kind
    }

    /// Returns the default value, if any.
    #[must_use]
    #[inline]
    pub fn default_value(&self) -> Option<&DefaultValue> {
        self.default.as_ref()
    }

    /// Returns the observer reference, if any.
    #[must_use]
    #[inline]
    pub fn observer_ref(&self) -> Option<&ObserverRef<C>> {
        self.observer.as_ref()
    }

    /// Returns the reflected attribute name when it is usable (non-empty).
    #[must_use]
    pub fn attribute(&self) -> Option<&str> {
        self.reflect_to_attribute
            .as_deref()
            .filter(|attribute| !attribute.is_empty())
    }

    /// Returns `true` if an attribute was declared but is empty.
    #[must_use]
    pub(crate) fn has_invalid_attribute(&self) -> bool {
        self.reflect_to_attribute
            .as_deref()
            .is_some_and(str::is_empty)
    }

    pub(crate) fn set_default(&mut self, value: PropertyValue) {
        self.default = Some(DefaultValue::Literal(value));
    }

    pub(crate) fn clear_attribute(&mut self) {
        self.reflect_to_attribute = None;
    }
}

impl<C> Clone for PropertyDefinition<C> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            default: self.default.clone(),
            observer: self.observer.clone(),
            reflect_to_attribute: self.reflect_to_attribute.clone(),
        }
    }
}

// Manual Debug impl since `C` need not be Debug
impl<C> fmt::Debug for PropertyDefinition<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDefinition")
            .field("kind", &self.kind)
            .field("default", &self.default)
            .field("observer", &self.observer)
            .field("reflect_to_attribute", &self.reflect_to_attribute)
            .finish()
    }
}
