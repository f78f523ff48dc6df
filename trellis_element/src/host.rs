// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute storage provided by the host platform.

use alloc::string::String;
use alloc::vec::Vec;

/// A change to one attribute, as reported by the host.
///
/// `None` means the attribute is absent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeMutation {
    /// The attribute name.
    pub name: String,
    /// The text before the change.
    pub old_value: Option<String>,
    /// The text after the change.
    pub new_value: Option<String>,
}

impl AttributeMutation {
    /// Returns `true` if the text actually changed.
    #[must_use]
    pub fn is_change(&self) -> bool {
        self.old_value != self.new_value
    }
}

/// The attribute primitives of the element's host.
///
/// Writes report the resulting [`AttributeMutation`]; the element feeds it
/// into its attribute-changed path, which is the only way a reflected value
/// reaches the property store. Hosts that deliver their own change
/// notifications may instead call
/// [`Element::attribute_changed_callback`](crate::Element::attribute_changed_callback)
/// and return the mutation unchanged; duplicate notifications are ignored.
pub trait AttributeHost {
    /// Returns the text of `name`, or `None` if absent.
    fn get_attribute(&self, name: &str) -> Option<String>;

    /// Returns `true` if `name` is present.
    fn has_attribute(&self, name: &str) -> bool {
        self.get_attribute(name).is_some()
    }

    /// Sets `name` to `value`.
    fn set_attribute(&mut self, name: &str, value: &str) -> AttributeMutation;

    /// Removes `name`.
    fn remove_attribute(&mut self, name: &str) -> AttributeMutation;
}

/// An in-memory attribute list.
///
/// Keeps attributes in insertion order, like a DOM element's attribute list.
/// Useful for headless rendering and tests.
///
/// ```rust
/// use trellis_element::{AttributeHost, AttributeMap};
///
/// let mut attributes = AttributeMap::new().with("header", "Hi");
/// assert_eq!(attributes.get_attribute("header").as_deref(), Some("Hi"));
///
/// let mutation = attributes.remove_attribute("header");
/// assert_eq!(mutation.old_value.as_deref(), Some("Hi"));
/// assert!(!attributes.has_attribute("header"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributeMap {
    attributes: Vec<(String, String)>,
}

impl AttributeMap {
    /// Creates an empty attribute list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value` while building.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        self.set_attribute(&name, &value);
        self
    }

    /// Returns the number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns `true` if there are no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Returns `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|(key, _)| key == name)
    }
}

impl AttributeHost for AttributeMap {
    fn get_attribute(&self, name: &str) -> Option<String> {
        self.position(name)
            .map(|position| self.attributes[position].1.clone())
    }

    fn has_attribute(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    fn set_attribute(&mut self, name: &str, value: &str) -> AttributeMutation {
        let old_value = match self.position(name) {
            Some(position) => Some(core::mem::replace(
                &mut self.attributes[position].1,
                value.into(),
            )),
            None => {
                self.attributes.push((name.into(), value.into()));
                None
            }
        };
        AttributeMutation {
            name: name.into(),
            old_value,
            new_value: Some(value.into()),
        }
    }

    fn remove_attribute(&mut self, name: &str) -> AttributeMutation {
        let old_value = self
            .position(name)
            .map(|position| self.attributes.remove(position).1);
        AttributeMutation {
            name: name.into(),
            old_value,
            new_value: None,
        }
    }
}
