// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Element: custom elements with reflected properties.
//!
//! This crate provides the instance half of reflected element properties.
//! A [`Component`] declares its properties once per type; an
//! [`ElementClass`] resolves that declaration into a shared schema and
//! creates [`Element`]s, each of which owns a property store, an
//! [`AttributeHost`] and a render batch.
//!
//! ## Lifecycle
//!
//! - On creation, observers are bound and defaults are stored. Observers run;
//!   nothing renders.
//! - On [`Element::connected_callback`], each attribute-bound property takes
//!   its value from the attribute if present and otherwise writes itself out
//!   to it. The element becomes [`Lifecycle::Ready`] and schedules its first
//!   render.
//! - From then on, every accepted write runs the observer and schedules a
//!   render.
//!
//! ## Batched rendering
//!
//! Renders are deferred to a [`RenderScheduler`], normally a
//! `futures::executor::LocalSpawner`. However many writes happen before the
//! scheduler runs, the component renders once, and sees all of them.
//!
//! ```rust
//! use std::rc::Rc;
//!
//! use futures::executor::LocalPool;
//! use trellis_element::{AttributeMap, Component, ElementClass, PropertyView};
//! use trellis_property::{PropertyDefinition, PropertyValue, SchemaBuilder};
//!
//! #[derive(Default)]
//! struct Label {
//!     text: String,
//! }
//!
//! impl Component for Label {
//!     fn declare_properties(properties: &mut SchemaBuilder<Self>) {
//!         properties.property::<String>(
//!             "caption",
//!             PropertyDefinition::string().value("draft").reflect_to_attribute("caption"),
//!         );
//!         properties.property::<i64>("size", PropertyDefinition::number().value(12));
//!     }
//!
//!     fn render(&mut self, properties: &PropertyView<'_, Self>) {
//!         let caption = properties.value("caption").and_then(PropertyValue::as_str);
//!         let size = properties.value("size").and_then(PropertyValue::as_number);
//!         self.text = format!("{}@{}", caption.unwrap_or(""), size.unwrap_or(0));
//!     }
//! }
//!
//! let mut pool = LocalPool::new();
//! let class = ElementClass::<Label>::new();
//! let element = class.create(
//!     Label::default(),
//!     AttributeMap::new().with("caption", "final"),
//!     Rc::new(pool.spawner()),
//! );
//!
//! element.connected_callback();
//! element.set_value("size", 14);
//! element.set_value("size", 16);
//! pool.run_until_stalled();
//!
//! assert_eq!(element.render_count(), 1);
//! element.with_component(|label| assert_eq!(label.text, "final@16"));
//!
//! element.set_value("caption", "shipped");
//! assert_eq!(element.get_attribute("caption").as_deref(), Some("shipped"));
//! ```
//!
//! ## Diagnostics
//!
//! Nothing here fails. Declaration mistakes, unknown property names and
//! undecodable attribute text are logged through `tracing` under the
//! `trellis` target and kept as [`Warning`](trellis_property::Warning)s on
//! the schema or element.
//!
//! ## `no_std` Support
//!
//! With default features disabled this crate is `no_std` and uses `alloc`.
//! The `std` feature, on by default, brings in the `futures` executor.

#![no_std]

extern crate alloc;

mod batch;
mod class;
mod component;
mod element;
mod host;
mod scheduler;

pub use batch::RenderBatch;
pub use class::ElementClass;
pub use component::{Component, PropertyView};
pub use element::{Element, Lifecycle, MAX_WARNINGS};
pub use host::{AttributeHost, AttributeMap, AttributeMutation};
pub use scheduler::RenderScheduler;
