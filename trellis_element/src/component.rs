// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The contract a concrete element implements.

use core::fmt;

use trellis_property::{
    InstanceStore, Observer, Property, PropertyId, PropertySchema, PropertyType, PropertyValue,
    SchemaBuilder,
};

/// A concrete element type.
///
/// The component value holds the element's own state. Its properties are
/// declared once per type in [`declare_properties`](Self::declare_properties)
/// and stored by the surrounding [`Element`](crate::Element), which hands them
/// back to [`render`](Self::render) as a [`PropertyView`].
///
/// # Example
///
/// ```rust
/// use trellis_element::{Component, PropertyView};
/// use trellis_property::{Observer, PropertyDefinition, PropertyValue, SchemaBuilder};
///
/// #[derive(Default)]
/// struct Greeting {
///     output: String,
///     changes: u32,
/// }
///
/// impl Greeting {
///     fn name_changed(&mut self, _new: &PropertyValue, _old: &PropertyValue) {
///         self.changes += 1;
///     }
/// }
///
/// impl Component for Greeting {
///     fn declare_properties(properties: &mut SchemaBuilder<Self>) {
///         properties.property::<String>(
///             "name",
///             PropertyDefinition::string()
///                 .value("world")
///                 .observer("name_changed")
///                 .reflect_to_attribute("name"),
///         );
///     }
///
///     fn observer(name: &str) -> Option<Observer<Self>> {
///         match name {
///             "name_changed" => Some(Self::name_changed),
///             _ => None,
///         }
///     }
///
///     fn render(&mut self, properties: &PropertyView<'_, Self>) {
///         let name = properties.value("name").and_then(PropertyValue::as_str).unwrap_or("");
///         self.output = format!("Hello, {name}!");
///     }
/// }
/// ```
pub trait Component: Sized + 'static {
    /// Declares the properties of this type.
    ///
    /// Called once, when the first element of the type is created. The
    /// default declares nothing.
    fn declare_properties(properties: &mut SchemaBuilder<Self>) {
        let _ = properties;
    }

    /// Looks up a named observer.
    ///
    /// Definitions that name an observer are resolved through this once per
    /// element. Names without an observer are reported and never invoked.
    fn observer(name: &str) -> Option<Observer<Self>> {
        let _ = name;
        None
    }

    /// Produces the element's output from its current properties.
    ///
    /// Runs on a deferred task, at most once per task-queue turn.
    fn render(&mut self, properties: &PropertyView<'_, Self>);

    /// Returns `true` to skip the automatic render on attachment.
    ///
    /// The element then renders on the first property change, or when
    /// [`Element::request_render`](crate::Element::request_render) is called.
    fn manual_first_render(&self) -> bool {
        false
    }
}

/// Read access to an element's properties during render.
pub struct PropertyView<'a, C> {
    schema: &'a PropertySchema<C>,
    store: &'a InstanceStore,
}

impl<'a, C> PropertyView<'a, C> {
    pub(crate) fn new(schema: &'a PropertySchema<C>, store: &'a InstanceStore) -> Self {
        Self { schema, store }
    }

    /// Reads a typed property.
    ///
    /// Returns `None` while the property is undefined or holds another type.
    #[must_use]
    pub fn get<T: PropertyType>(&self, property: Property<T>) -> Option<T> {
        T::from_value(self.store.get(property.id()))
    }

    /// Reads a property by ID.
    #[must_use]
    pub fn value_of(&self, property: PropertyId) -> &'a PropertyValue {
        self.store.get(property)
    }

    /// Reads a property by name.
    ///
    /// Returns `None` if no such property is declared.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&'a PropertyValue> {
        self.schema.id(name).map(|id| self.store.get(id))
    }

    /// Returns `(name, value)` for every declared property, in declaration
    /// order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a PropertyValue)> + 'a {
        let store = self.store;
        self.schema
            .iter()
            .map(move |(id, entry)| (entry.name(), store.get(id)))
    }

    /// Returns the schema of the element's type.
    #[must_use]
    pub fn schema(&self) -> &'a PropertySchema<C> {
        self.schema
    }
}

impl<C> fmt::Debug for PropertyView<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
