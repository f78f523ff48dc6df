// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Schema declaration and resolution.
//!
//! This module provides [`SchemaBuilder`] for collecting property
//! declarations, [`DefaultOverrides`] for type-level default changes, and the
//! resolved [`PropertySchema`] shared by every instance of a component type.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use hashbrown::HashMap;

use crate::declaration;
use crate::definition::PropertyDefinition;
use crate::diagnostics::{Diagnostics, Warning};
use crate::id::{Property, PropertyId};
use crate::index::AttributeIndex;
use crate::kind::PropertyKind;
use crate::value::{PropertyType, PropertyValue};

/// Type-level replacement defaults, keyed by property name.
///
/// Lets a consumer change defaults without redeclaring the schema.
///
/// ```rust
/// use trellis_property::{DefaultOverrides, PropertyValue};
///
/// let overrides = DefaultOverrides::new()
///     .with("header", "Welcome")
///     .with("count", 3_i64);
/// assert_eq!(overrides.get("count"), Some(&PropertyValue::Number(3)));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DefaultOverrides {
    values: Vec<(String, PropertyValue)>,
}

impl DefaultOverrides {
    /// Creates an empty override map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the override for `property`.
    #[must_use]
    pub fn with(mut self, property: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.insert(property, value);
        self
    }

    /// Adds or replaces the override for `property`.
    pub fn insert(&mut self, property: impl Into<String>, value: impl Into<PropertyValue>) {
        let property = property.into();
        let value = value.into();
        match self.values.iter_mut().find(|(name, _)| *name == property) {
            Some((_, slot)) => *slot = value,
            None => self.values.push((property, value)),
        }
    }

    /// Returns the override for `property`.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&PropertyValue> {
        self.values
            .iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value)
    }

    /// Returns the overrides, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> + '_ {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Returns `true` if there are no overrides.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<PropertyValue>> FromIterator<(K, V)> for DefaultOverrides {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut overrides = Self::new();
        for (property, value) in iter {
            overrides.insert(property, value);
        }
        overrides
    }
}

/// Collects the property declarations of a component type.
///
/// Declarations keep their order. A second declaration under an existing name
/// is reported and ignored.
///
/// # Example
///
/// ```rust
/// use trellis_property::{DefaultOverrides, PropertyDefinition, SchemaBuilder};
///
/// struct Alert;
///
/// let mut builder = SchemaBuilder::<Alert>::new();
/// builder.property::<String>(
///     "type_name",
///     PropertyDefinition::string().value("warning").reflect_to_attribute("type-name"),
/// );
/// builder.property::<bool>("open", PropertyDefinition::boolean().value(false));
///
/// let schema = builder.resolve(Some(&DefaultOverrides::new().with("type_name", "error")));
/// let entry = schema.entry_by_name("type_name").unwrap();
/// assert_eq!(entry.definition().default_value().unwrap().produce().as_str(), Some("error"));
/// assert!(schema.warnings().is_empty());
/// ```
pub struct SchemaBuilder<C> {
    entries: Vec<(String, PropertyDefinition<C>)>,
    by_name: HashMap<String, PropertyId>,
    diagnostics: Diagnostics,
}

impl<C> SchemaBuilder<C> {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            by_name: HashMap::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Declares a property read and written as `T`.
    ///
    /// On a duplicate name the existing declaration is kept and its handle is
    /// returned. A `T` that does not fit the definition's kind is reported;
    /// reads through the handle then return `None` and writes are refused.
    pub fn property<T: PropertyType>(
        &mut self,
        name: &str,
        definition: PropertyDefinition<C>,
    ) -> Property<T> {
        let declared = definition.kind();
        if !declared.accepts(T::KIND) {
            self.diagnostics.report(Warning::KindMismatch {
                property: name.into(),
                declared,
                requested: T::KIND,
            });
        }
        let id = self.declare(name, definition);
        Property::from_id(id.unwrap_or(PropertyId::new(u16::MAX)))
    }

    /// Declares a property and returns its ID.
    ///
    /// Returns the existing ID for a duplicate name, and `None` when the
    /// schema is full.
    pub fn declare(&mut self, name: &str, definition: PropertyDefinition<C>) -> Option<PropertyId> {
        if let Some(existing) = self.by_name.get(name) {
            self.diagnostics.report(Warning::DuplicateProperty {
                property: name.into(),
            });
            return Some(*existing);
        }
        let Ok(index) = u16::try_from(self.entries.len()) else {
            self.diagnostics.report(Warning::CapacityExceeded {
                property: name.into(),
            });
            return None;
        };
        // `u16::MAX` is kept free as the handle for rejected declarations.
        if index == u16::MAX {
            self.diagnostics.report(Warning::CapacityExceeded {
                property: name.into(),
            });
            return None;
        }
        let id = PropertyId::new(index);
        self.entries.push((name.into(), definition));
        self.by_name.insert(name.into(), id);
        Some(id)
    }

    /// Declares every property in a JSON declaration map.
    ///
    /// Each key is a property name and each value an object with the optional
    /// fields `type`, `value`, `observer` and `reflectToAttribute`:
    ///
    /// ```rust
    /// use serde_json::json;
    /// use trellis_property::{PropertyKind, SchemaBuilder};
    ///
    /// struct Example;
    ///
    /// let mut builder = SchemaBuilder::<Example>::new();
    /// builder.declare_json(&json!({
    ///     "header": { "type": "String", "value": "Init name", "reflectToAttribute": "header" },
    ///     "broken": 5,
    ///     "when": { "type": "Date" }
    /// }));
    /// let schema = builder.resolve(None);
    ///
    /// assert!(schema.id("broken").is_none());
    /// assert_eq!(schema.entry_by_name("when").unwrap().kind(), PropertyKind::Raw);
    /// assert_eq!(schema.warnings().len(), 2);
    /// ```
    ///
    /// With the `std` feature, declarations keep the order they were written
    /// in. Without it `serde_json` sorts map keys, so declarations made this
    /// way are ordered by name.
    pub fn declare_json(&mut self, declarations: &serde_json::Value) {
        declaration::declare_all(self, declarations);
    }

    pub(crate) fn report(&mut self, warning: Warning) {
        self.diagnostics.report(warning);
    }

    /// Returns the number of declared properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves the declarations into a schema.
    ///
    /// Overrides are applied to defaults first. Then each attribute binding is
    /// checked: empty names and attributes already bound to an earlier
    /// property are reported and left unbound.
    #[must_use]
    pub fn resolve(self, overrides: Option<&DefaultOverrides>) -> PropertySchema<C> {
        let Self {
            entries,
            by_name,
            mut diagnostics,
        } = self;
        let mut entries: Vec<PropertyEntry<C>> = entries
            .into_iter()
            .map(|(name, definition)| PropertyEntry { name, definition })
            .collect();

        if let Some(overrides) = overrides {
            for (property, value) in overrides.iter() {
                match by_name.get(property) {
                    Some(id) => entries[usize::from(id.index())]
                        .definition
                        .set_default(value.clone()),
                    None => diagnostics.report(Warning::UnknownOverride {
                        property: property.into(),
                    }),
                }
            }
        }

        let mut index = AttributeIndex::new();
        for position in 0..entries.len() {
            if entries[position].definition.has_invalid_attribute() {
                diagnostics.report(Warning::InvalidAttribute {
                    property: entries[position].name.clone(),
                });
                entries[position].definition.clear_attribute();
                continue;
            }
            #[expect(clippy::cast_possible_truncation, reason = "positions fit in u16 by construction")]
            let id = PropertyId::new(position as u16);
            let bound = match entries[position].attribute() {
                Some(attribute) => index.bind(attribute, id),
                None => continue,
            };
            if let Err(existing) = bound {
                let entry = &entries[position];
                let warning = Warning::DuplicateAttribute {
                    attribute: entry.attribute().unwrap_or_default().into(),
                    property: entry.name.clone(),
                    existing: entries[usize::from(existing.index())].name.clone(),
                };
                diagnostics.report(warning);
                entries[position].definition.clear_attribute();
            }
        }

        tracing::debug!(
            target: "trellis",
            properties = entries.len(),
            attributes = index.len(),
            "resolved property schema"
        );

        PropertySchema {
            entries,
            by_name,
            index,
            diagnostics,
        }
    }
}

impl<C> Default for SchemaBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for SchemaBuilder<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaBuilder")
            .field("entries", &self.entries)
            .field("warnings", &self.diagnostics.len())
            .finish_non_exhaustive()
    }
}

/// A resolved property and its definition.
pub struct PropertyEntry<C> {
    name: String,
    definition: PropertyDefinition<C>,
}

impl<C> PropertyEntry<C> {
    /// Returns the property name.
    #[must_use]
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the resolved definition, with overrides applied.
    #[must_use]
    #[inline]
    pub fn definition(&self) -> &PropertyDefinition<C> {
        &self.definition
    }

    /// Returns the declared kind.
    #[must_use]
    #[inline]
    pub fn kind(&self) -> PropertyKind {
        self.definition.kind()
    }

    /// Returns the bound attribute, if the binding survived resolution.
    #[must_use]
    #[inline]
    pub fn attribute(&self) -> Option<&str> {
        self.definition.attribute()
    }
}

impl<C> fmt::Debug for PropertyEntry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyEntry")
            .field("name", &self.name)
            .field("definition", &self.definition)
            .finish()
    }
}

/// The resolved properties of a component type.
///
/// A schema is resolved once per type and shared read-only by every
/// instance. Entries are addressed by [`PropertyId`] in declaration order.
pub struct PropertySchema<C> {
    entries: Vec<PropertyEntry<C>>,
    by_name: HashMap<String, PropertyId>,
    index: AttributeIndex,
    diagnostics: Diagnostics,
}

impl<C> PropertySchema<C> {
    /// Returns the number of properties.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the type declares no properties.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up a property by name.
    #[must_use]
    pub fn id(&self, name: &str) -> Option<PropertyId> {
        self.by_name.get(name).copied()
    }

    /// Returns the entry for `id`.
    #[must_use]
    pub fn get(&self, id: PropertyId) -> Option<&PropertyEntry<C>> {
        self.entries.get(usize::from(id.index()))
    }

    /// Returns the entry for `name`.
    #[must_use]
    pub fn entry_by_name(&self, name: &str) -> Option<&PropertyEntry<C>> {
        self.id(name).and_then(|id| self.get(id))
    }

    /// Returns every entry with its ID, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (PropertyId, &PropertyEntry<C>)> + '_ {
        self.entries.iter().enumerate().map(|(position, entry)| {
            #[expect(clippy::cast_possible_truncation, reason = "positions fit in u16 by construction")]
            let id = PropertyId::new(position as u16);
            (id, entry)
        })
    }

    /// Returns the attribute to property index.
    #[must_use]
    #[inline]
    pub fn attribute_index(&self) -> &AttributeIndex {
        &self.index
    }

    /// Returns the attribute names an element of this type observes.
    pub fn observed_attributes(&self) -> impl Iterator<Item = &str> + '_ {
        self.index.attributes()
    }

    /// Returns the warnings reported while declaring and resolving.
    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        self.diagnostics.warnings()
    }
}

impl<C> fmt::Debug for PropertySchema<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertySchema")
            .field("entries", &self.entries)
            .field("index", &self.index)
            .field("warnings", &self.diagnostics.warnings())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    struct Card;

    #[test]
    fn ids_follow_declaration_order() {
        let mut builder = SchemaBuilder::<Card>::new();
        let a = builder.property::<String>("a", PropertyDefinition::string());
        let b = builder.property::<bool>("b", PropertyDefinition::boolean());
        assert_eq!(a.id().index(), 0);
        assert_eq!(b.id().index(), 1);

        let schema = builder.resolve(None);
        let names: Vec<_> = schema.iter().map(|(_, entry)| entry.name()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn duplicate_name_keeps_first() {
        let mut builder = SchemaBuilder::<Card>::new();
        let first = builder.property::<String>("header", PropertyDefinition::string().value("one"));
        let second = builder.property::<String>("header", PropertyDefinition::string().value("two"));
        assert_eq!(first, second);

        let schema = builder.resolve(None);
        assert_eq!(schema.len(), 1);
        let default = schema.get(first.id()).unwrap().definition().default_value().unwrap();
        assert_eq!(default.produce().as_str(), Some("one"));
        assert_eq!(
            schema.warnings(),
            &[Warning::DuplicateProperty {
                property: "header".to_string()
            }]
        );
    }

    #[test]
    fn handle_of_another_kind_is_reported() {
        let mut builder = SchemaBuilder::<Card>::new();
        let level = builder.property::<bool>("level", PropertyDefinition::number().value(3_i64));
        builder.property::<String>("since", PropertyDefinition::new(PropertyKind::Raw));

        let schema = builder.resolve(None);
        assert_eq!(schema.get(level.id()).unwrap().kind(), PropertyKind::Number);
        assert_eq!(
            schema.warnings(),
            &[Warning::KindMismatch {
                property: "level".to_string(),
                declared: PropertyKind::Number,
                requested: PropertyKind::Boolean,
            }]
        );
    }

    #[test]
    fn overrides_replace_defaults() {
        let mut builder = SchemaBuilder::<Card>::new();
        builder.property::<i64>("count", PropertyDefinition::number().value(1_i64));
        builder.property::<i64>("limit", PropertyDefinition::number());
        let overrides = DefaultOverrides::new().with("count", 5_i64).with("limit", 9_i64);

        let schema = builder.resolve(Some(&overrides));
        let produce = |name: &str| {
            schema
                .entry_by_name(name)
                .and_then(|entry| entry.definition().default_value())
                .map(|default| default.produce())
        };
        assert_eq!(produce("count"), Some(PropertyValue::Number(5)));
        assert_eq!(produce("limit"), Some(PropertyValue::Number(9)));
        assert!(schema.warnings().is_empty());
    }

    #[test]
    fn unknown_override_is_reported() {
        let builder = SchemaBuilder::<Card>::new();
        let overrides = DefaultOverrides::new().with("ghost", true);
        let schema = builder.resolve(Some(&overrides));
        assert_eq!(
            schema.warnings(),
            &[Warning::UnknownOverride {
                property: "ghost".to_string()
            }]
        );
    }

    #[test]
    fn empty_attribute_leaves_property_unbound() {
        let mut builder = SchemaBuilder::<Card>::new();
        let header = builder.property::<String>(
            "header",
            PropertyDefinition::string().reflect_to_attribute(""),
        );
        let schema = builder.resolve(None);
        assert!(schema.attribute_index().is_empty());
        assert!(schema.get(header.id()).unwrap().attribute().is_none());
        assert_eq!(
            schema.warnings(),
            &[Warning::InvalidAttribute {
                property: "header".to_string()
            }]
        );
    }

    #[test]
    fn shared_attribute_binds_first_property() {
        let mut builder = SchemaBuilder::<Card>::new();
        let first = builder.property::<String>(
            "title",
            PropertyDefinition::string().reflect_to_attribute("title"),
        );
        let second = builder.property::<String>(
            "heading",
            PropertyDefinition::string().reflect_to_attribute("title"),
        );
        let schema = builder.resolve(None);

        assert_eq!(schema.attribute_index().property("title"), Some(first.id()));
        assert!(schema.get(second.id()).unwrap().attribute().is_none());
        assert_eq!(schema.observed_attributes().count(), 1);
        assert!(matches!(
            &schema.warnings()[0],
            Warning::DuplicateAttribute { existing, .. } if existing == "title"
        ));
    }

    #[test]
    fn observed_attributes_are_the_bound_ones() {
        let mut builder = SchemaBuilder::<Card>::new();
        builder.property::<String>("header", PropertyDefinition::string().reflect_to_attribute("header"));
        builder.property::<String>("plain", PropertyDefinition::string());
        builder.property::<bool>("flag", PropertyDefinition::boolean().reflect_to_attribute("my-flag"));
        let schema = builder.resolve(None);
        assert_eq!(
            schema.observed_attributes().collect::<Vec<_>>(),
            vec!["header", "my-flag"]
        );
    }

    #[test]
    fn overrides_collect_from_pairs() {
        let overrides: DefaultOverrides = [("a", 1_i64), ("b", 2_i64), ("a", 3_i64)]
            .into_iter()
            .collect();
        assert_eq!(overrides.get("a"), Some(&PropertyValue::Number(3)));
        assert_eq!(overrides.iter().count(), 2);
    }
}
