// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element instances: property storage, attribute reflection and render
//! batching.

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use trellis_property::{
    codec, Diagnostics, InstanceStore, Observer, ObserverRef, Property, PropertyId, PropertyKind,
    PropertySchema, PropertyType, PropertyValue, Warning,
};

use crate::batch::RenderBatch;
use crate::component::{Component, PropertyView};
use crate::host::AttributeHost;
use crate::scheduler::RenderScheduler;

/// How many warnings an element keeps. Later ones are only logged.
pub const MAX_WARNINGS: usize = 64;

/// Where an element is in its attach sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    /// Constructed, never attached. Writes store values and call observers
    /// but do not render.
    Uninitialized,
    /// Synchronizing attributes and properties during attachment.
    Initializing,
    /// Attached at least once. Every accepted write schedules a render.
    Ready,
}

/// A live element: a [`Component`] together with its property store, its
/// attributes and its render batch.
///
/// `Element` is a cheap handle; clones refer to the same element. The deferred
/// render task holds only a weak reference, so dropping every handle cancels
/// a pending render.
///
/// # Writes
///
/// A property write that does not change the stored value is ignored. While
/// the element is attached, a write to a property bound to an attribute is
/// encoded and written to the attribute instead; the resulting attribute
/// change is what updates the store. Every other write is stored directly.
/// Either way the property's observer runs synchronously with `(new, old)`.
///
/// # Panics
///
/// Observers and [`Component::render`] run while the element is borrowed.
/// Calling back into the same element from inside them through a captured
/// handle panics.
pub struct Element<C, H> {
    inner: Rc<RefCell<ElementInner<C, H>>>,
}

struct ElementInner<C, H> {
    this: Weak<RefCell<Self>>,
    schema: Rc<PropertySchema<C>>,
    component: C,
    host: H,
    store: InstanceStore,
    observers: Vec<Option<Observer<C>>>,
    lifecycle: Lifecycle,
    connected: bool,
    batch: RenderBatch,
    scheduler: Rc<dyn RenderScheduler>,
    diagnostics: Diagnostics,
    renders: u64,
}

impl<C: Component, H: AttributeHost + 'static> Element<C, H> {
    pub(crate) fn new(
        schema: Rc<PropertySchema<C>>,
        component: C,
        host: H,
        scheduler: Rc<dyn RenderScheduler>,
    ) -> Self {
        let observers = alloc::vec![None; schema.len()];
        let inner = Rc::new_cyclic(|this| {
            RefCell::new(ElementInner {
                this: this.clone(),
                schema,
                component,
                host,
                store: InstanceStore::new(),
                observers,
                lifecycle: Lifecycle::Uninitialized,
                connected: false,
                batch: RenderBatch::new(),
                scheduler,
                diagnostics: Diagnostics::bounded(MAX_WARNINGS),
                renders: 0,
            })
        });
        inner.borrow_mut().initialize();
        Self { inner }
    }

    /// The element was attached to the document.
    ///
    /// Each attribute-bound property, in declaration order, is set from its
    /// attribute if present, or otherwise written out to it. The element is
    /// then [`Lifecycle::Ready`] and, unless
    /// [`Component::manual_first_render`] says otherwise, schedules a render.
    pub fn connected_callback(&self) {
        self.inner.borrow_mut().connect();
    }

    /// The element was detached from the document.
    ///
    /// Later writes are stored directly until the element is attached again.
    pub fn disconnected_callback(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.connected = false;
        tracing::debug!(target: "trellis", "element disconnected");
    }

    /// An attribute changed on the host.
    ///
    /// Only hosts that report changes on their own need to call this;
    /// [`set_attribute`](Self::set_attribute) and
    /// [`remove_attribute`](Self::remove_attribute) feed their own changes
    /// back. Unchanged text, unobserved attributes and text that decodes to
    /// the stored value are ignored.
    pub fn attribute_changed_callback(
        &self,
        name: &str,
        old_value: Option<&str>,
        new_value: Option<&str>,
    ) {
        self.inner
            .borrow_mut()
            .attribute_changed(name, old_value, new_value);
    }

    /// Reads a typed property.
    ///
    /// Returns `None` while the property is undefined or holds another type.
    #[must_use]
    pub fn get<T: PropertyType>(&self, property: Property<T>) -> Option<T> {
        T::from_value(self.inner.borrow().store.get(property.id()))
    }

    /// Reads a property by name.
    ///
    /// Returns `None` if no such property is declared.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<PropertyValue> {
        let inner = self.inner.borrow();
        let id = inner.schema.id(name)?;
        Some(inner.store.get(id).clone())
    }

    /// Writes a typed property.
    ///
    /// A handle whose type does not fit the declared kind is reported and the
    /// write is ignored.
    pub fn set<T: PropertyType>(&self, property: Property<T>, value: T) {
        let mut inner = self.inner.borrow_mut();
        let id = property.id();
        let Some(entry) = inner.schema.get(id) else {
            inner.diagnostics.report(Warning::UnknownProperty {
                property: id.to_string(),
            });
            return;
        };
        let declared = entry.kind();
        if !declared.accepts(T::KIND) {
            let property = entry.name().into();
            inner.diagnostics.report(Warning::KindMismatch {
                property,
                declared,
                requested: T::KIND,
            });
            return;
        }
        inner.write(id, value.into_value());
    }

    /// Writes a property by name.
    ///
    /// Writing a name that is not declared is reported and ignored.
    pub fn set_value(&self, name: &str, value: impl Into<PropertyValue>) {
        let mut inner = self.inner.borrow_mut();
        let Some(id) = inner.schema.id(name) else {
            inner.diagnostics.report(Warning::UnknownProperty {
                property: name.into(),
            });
            return;
        };
        inner.write(id, value.into());
    }

    /// Returns the text of attribute `name` on the host.
    #[must_use]
    pub fn get_attribute(&self, name: &str) -> Option<String> {
        self.inner.borrow().host.get_attribute(name)
    }

    /// Sets attribute `name` on the host, as markup or script would.
    pub fn set_attribute(&self, name: &str, value: &str) {
        let mut inner = self.inner.borrow_mut();
        let mutation = inner.host.set_attribute(name, value);
        inner.apply_mutation(&mutation.name, mutation.old_value, mutation.new_value);
    }

    /// Removes attribute `name` from the host.
    pub fn remove_attribute(&self, name: &str) {
        let mut inner = self.inner.borrow_mut();
        let mutation = inner.host.remove_attribute(name);
        inner.apply_mutation(&mutation.name, mutation.old_value, mutation.new_value);
    }

    /// Schedules a render, whatever the lifecycle.
    ///
    /// Requests made while one is pending are folded into it.
    pub fn request_render(&self) {
        self.inner.borrow_mut().schedule_render();
    }

    /// Returns `true` while the element is attached.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.inner.borrow().connected
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub fn lifecycle(&self) -> Lifecycle {
        self.inner.borrow().lifecycle
    }

    /// Returns `true` if a render is scheduled but has not run yet.
    #[must_use]
    pub fn is_render_pending(&self) -> bool {
        self.inner.borrow().batch.is_pending()
    }

    /// Returns how many times the component has rendered.
    #[must_use]
    pub fn render_count(&self) -> u64 {
        self.inner.borrow().renders
    }

    /// Returns the warnings reported by this element, oldest first.
    ///
    /// At most [`MAX_WARNINGS`] are kept. Declaration warnings are kept on the
    /// [`schema`](Self::schema) instead.
    #[must_use]
    pub fn warnings(&self) -> Vec<Warning> {
        self.inner.borrow().diagnostics.warnings().to_vec()
    }

    /// Returns how many warnings were logged after the list was full.
    #[must_use]
    pub fn dropped_warnings(&self) -> usize {
        self.inner.borrow().diagnostics.dropped()
    }

    /// Runs `f` with the component.
    pub fn with_component<R>(&self, f: impl FnOnce(&C) -> R) -> R {
        f(&self.inner.borrow().component)
    }

    /// Runs `f` with the host.
    pub fn with_host<R>(&self, f: impl FnOnce(&H) -> R) -> R {
        f(&self.inner.borrow().host)
    }

    /// Returns the schema shared by every element of this type.
    #[must_use]
    pub fn schema(&self) -> Rc<PropertySchema<C>> {
        Rc::clone(&self.inner.borrow().schema)
    }
}

impl<C, H> Clone for Element<C, H> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<C, H> fmt::Debug for Element<C, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Element");
        if let Ok(inner) = self.inner.try_borrow() {
            debug
                .field("lifecycle", &inner.lifecycle)
                .field("connected", &inner.connected)
                .field("properties", &PropertyView::new(&inner.schema, &inner.store))
                .field("render_pending", &inner.batch.is_pending())
                .field("renders", &inner.renders);
        }
        debug.finish_non_exhaustive()
    }
}

impl<C: Component, H: AttributeHost + 'static> ElementInner<C, H> {
    /// Binds observers and applies defaults, property by property.
    ///
    /// An observer sees only the properties declared before its own.
    fn initialize(&mut self) {
        let schema = Rc::clone(&self.schema);
        for (id, entry) in schema.iter() {
            let slot = usize::from(id.index());
            match entry.definition().observer_ref() {
                Some(ObserverRef::Named(name)) => match C::observer(name) {
                    Some(observer) => self.observers[slot] = Some(observer),
                    None => self.diagnostics.report(Warning::MissingObserver {
                        property: entry.name().into(),
                        observer: name.clone(),
                    }),
                },
                Some(ObserverRef::Callback(observer)) => self.observers[slot] = Some(*observer),
                None => {}
            }

            let Some(default) = entry.definition().default_value() else {
                continue;
            };
            let value = default.produce();
            match entry.attribute() {
                // Store what the attribute would hold.
                Some(_) => {
                    let value = normalize(entry.kind(), &value);
                    if *self.store.get(id) != value {
                        self.commit(id, value);
                    }
                }
                None => self.write(id, value),
            }
        }
    }

    fn connect(&mut self) {
        self.connected = true;
        self.lifecycle = Lifecycle::Initializing;

        let schema = Rc::clone(&self.schema);
        for (attribute, id) in schema.attribute_index().iter() {
            let Some(entry) = schema.get(id) else {
                continue;
            };
            match self.host.get_attribute(attribute) {
                Some(text) => self.attribute_changed(attribute, None, Some(&text)),
                None => {
                    let current = self.store.get(id).clone();
                    self.reflect(entry.kind(), attribute, &current);
                }
            }
        }

        self.lifecycle = Lifecycle::Ready;
        tracing::debug!(
            target: "trellis",
            attributes = schema.attribute_index().len(),
            "element connected"
        );
        if !self.component.manual_first_render() {
            self.schedule_render();
        }
    }

    fn write(&mut self, id: PropertyId, value: PropertyValue) {
        if *self.store.get(id) == value {
            return;
        }
        let schema = Rc::clone(&self.schema);
        let Some(entry) = schema.get(id) else {
            return;
        };
        match entry.attribute() {
            Some(attribute) if self.connected => self.reflect(entry.kind(), attribute, &value),
            _ => self.commit(id, value),
        }
    }

    /// Writes `value` to `attribute` and feeds the change back.
    fn reflect(&mut self, kind: PropertyKind, attribute: &str, value: &PropertyValue) {
        let mutation = match codec::encode(kind, value) {
            Some(text) => self.host.set_attribute(attribute, &text),
            None => self.host.remove_attribute(attribute),
        };
        self.apply_mutation(&mutation.name, mutation.old_value, mutation.new_value);
    }

    fn apply_mutation(&mut self, name: &str, old: Option<String>, new: Option<String>) {
        self.attribute_changed(name, old.as_deref(), new.as_deref());
    }

    fn attribute_changed(&mut self, name: &str, old: Option<&str>, new: Option<&str>) {
        if old == new {
            return;
        }
        let schema = Rc::clone(&self.schema);
        let Some(id) = schema.attribute_index().property(name) else {
            return;
        };
        let Some(entry) = schema.get(id) else {
            return;
        };
        let value = match codec::decode(entry.kind(), new) {
            Ok(value) => value,
            Err(source) => {
                self.diagnostics.report(Warning::Decode {
                    property: entry.name().into(),
                    attribute: name.into(),
                    source,
                });
                PropertyValue::Undefined
            }
        };
        if *self.store.get(id) != value {
            self.commit(id, value);
        }
    }

    /// Stores `value`, notifies the observer and requests a render.
    fn commit(&mut self, id: PropertyId, value: PropertyValue) {
        let old = self.store.replace(id, value);
        tracing::trace!(
            target: "trellis",
            property = self.schema.get(id).map(|entry| entry.name()),
            "property changed"
        );
        if let Some(observer) = self.observers.get(usize::from(id.index())).copied().flatten() {
            observer(&mut self.component, self.store.get(id), &old);
        }
        if self.lifecycle == Lifecycle::Ready {
            self.schedule_render();
        }
    }

    fn schedule_render(&mut self) {
        if !self.batch.arm() {
            return;
        }
        let this = self.this.clone();
        let task = async move {
            if let Some(inner) = this.upgrade() {
                inner.borrow_mut().flush();
            }
        };
        if let Err(error) = self.scheduler.defer(Box::pin(task)) {
            self.batch.take();
            self.diagnostics.report(Warning::RenderDropped {
                reason: error.to_string(),
            });
        }
    }

    fn flush(&mut self) {
        if !self.batch.take() {
            return;
        }
        self.renders += 1;
        tracing::trace!(target: "trellis", renders = self.renders, "rendering element");
        let Self {
            component,
            schema,
            store,
            ..
        } = self;
        component.render(&PropertyView::new(schema, store));
    }
}

/// Passes `value` through the attribute codec.
fn normalize(kind: PropertyKind, value: &PropertyValue) -> PropertyValue {
    let text = codec::encode(kind, value);
    codec::decode(kind, text.as_deref()).unwrap_or(PropertyValue::Undefined)
}
