// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Type-level element registration.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::OnceCell;
use core::fmt;

use trellis_property::{DefaultOverrides, Diagnostics, PropertySchema, SchemaBuilder, Warning};

use crate::component::Component;
use crate::element::Element;
use crate::host::AttributeHost;
use crate::scheduler::RenderScheduler;

/// The type-level half of an element: its resolved schema and default
/// overrides.
///
/// The schema is resolved from [`Component::declare_properties`] when it is
/// first needed and then shared, read-only, by every element the class
/// creates.
///
/// ```rust
/// use trellis_element::{Component, ElementClass, PropertyView};
/// use trellis_property::{DefaultOverrides, PropertyDefinition, SchemaBuilder};
///
/// struct Badge;
///
/// impl Component for Badge {
///     fn declare_properties(properties: &mut SchemaBuilder<Self>) {
///         properties.property::<String>(
///             "label",
///             PropertyDefinition::string().value("new").reflect_to_attribute("label"),
///         );
///         properties.property::<bool>("muted", PropertyDefinition::boolean());
///     }
///
///     fn render(&mut self, _: &PropertyView<'_, Self>) {}
/// }
///
/// let mut class = ElementClass::<Badge>::new();
/// class.override_default_values(DefaultOverrides::new().with("label", "beta"));
///
/// assert_eq!(class.observed_attributes(), ["label"]);
/// let schema = class.schema();
/// let label = schema.entry_by_name("label").unwrap();
/// assert_eq!(
///     label.definition().default_value().unwrap().produce().as_str(),
///     Some("beta")
/// );
/// ```
pub struct ElementClass<C> {
    overrides: Option<DefaultOverrides>,
    schema: OnceCell<Rc<PropertySchema<C>>>,
    diagnostics: Diagnostics,
}

impl<C: Component> ElementClass<C> {
    /// Creates a class with no overrides and an unresolved schema.
    #[must_use]
    pub fn new() -> Self {
        Self {
            overrides: None,
            schema: OnceCell::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Registers replacement defaults for this type.
    ///
    /// Meant to be called once, before the first element is created. A later
    /// call replaces earlier overrides; a call after the schema was resolved
    /// is reported and ignored.
    pub fn override_default_values(&mut self, overrides: DefaultOverrides) {
        if self.schema.get().is_some() {
            self.diagnostics.report(Warning::LateOverride);
            return;
        }
        self.overrides = Some(overrides);
    }

    /// Returns the resolved schema, resolving it on first use.
    pub fn schema(&self) -> Rc<PropertySchema<C>> {
        Rc::clone(self.schema.get_or_init(|| {
            let mut builder = SchemaBuilder::new();
            C::declare_properties(&mut builder);
            Rc::new(builder.resolve(self.overrides.as_ref()))
        }))
    }

    /// Returns the attribute names elements of this type observe.
    ///
    /// This is exactly the set of valid `reflect_to_attribute` names.
    #[must_use]
    pub fn observed_attributes(&self) -> Vec<String> {
        self.schema()
            .observed_attributes()
            .map(String::from)
            .collect()
    }

    /// Creates an element around `component`, attached to nothing yet.
    ///
    /// Defaults are applied right away; the element starts out
    /// [`Lifecycle::Uninitialized`](crate::Lifecycle::Uninitialized).
    pub fn create<H: AttributeHost + 'static>(
        &self,
        component: C,
        host: H,
        scheduler: Rc<dyn RenderScheduler>,
    ) -> Element<C, H> {
        Element::new(self.schema(), component, host, scheduler)
    }

    /// Returns warnings reported by the class itself, such as late overrides.
    ///
    /// Declaration warnings live on the [`schema`](Self::schema).
    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        self.diagnostics.warnings()
    }
}

impl<C: Component> Default for ElementClass<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for ElementClass<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementClass")
            .field("overrides", &self.overrides)
            .field("schema", &self.schema.get())
            .field("warnings", &self.diagnostics.warnings())
            .finish()
    }
}
