// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Property: declarative element property schemas.
//!
//! This crate provides the type-level half of reflected element properties:
//! the declaration of each property, the schema those declarations resolve
//! into, the per-instance value store, and the codec that maps property
//! values to and from HTML attribute strings. The element lifecycle and the
//! render scheduler live in `trellis_element`.
//!
//! ## Core Concepts
//!
//! ### Declarations
//!
//! A [`PropertyDefinition`] names a [`PropertyKind`], an optional default
//! value, an optional observer, and an optional attribute to reflect to.
//! Definitions are collected by a [`SchemaBuilder`], either through typed
//! calls or from a JSON declaration map.
//!
//! ### Resolution
//!
//! [`SchemaBuilder::resolve`] merges type-level [`DefaultOverrides`], checks
//! attribute bindings, and produces a [`PropertySchema`] with its
//! [`AttributeIndex`]. Mistakes in declarations never abort resolution; they
//! are reported as [`Warning`]s through `tracing` and kept on the schema.
//!
//! ### Attribute codec
//!
//! The [`codec`] module converts between attribute text and
//! [`PropertyValue`]s:
//!
//! | Kind | Attribute form |
//! |------|----------------|
//! | `String` | the raw text |
//! | `Boolean` | presence of the attribute |
//! | `Number` | a base-10 integer |
//! | `Json` | JSON with `'` and `"` swapped |
//!
//! ## Quick Start
//!
//! ```rust
//! use trellis_property::{
//!     codec, InstanceStore, PropertyDefinition, PropertyKind, PropertyValue, SchemaBuilder,
//! };
//!
//! struct Card;
//!
//! let mut builder = SchemaBuilder::<Card>::new();
//! let header = builder.property::<String>(
//!     "header",
//!     PropertyDefinition::string()
//!         .value("Hello")
//!         .reflect_to_attribute("header"),
//! );
//! let schema = builder.resolve(None);
//!
//! assert_eq!(schema.observed_attributes().collect::<Vec<_>>(), ["header"]);
//! assert_eq!(schema.attribute_index().property("header"), Some(header.id()));
//!
//! let mut store = InstanceStore::new();
//! store.replace(header.id(), PropertyValue::from("Hi"));
//! assert_eq!(store.get(header.id()).as_str(), Some("Hi"));
//!
//! let text = codec::encode(PropertyKind::Json, &PropertyValue::Json(serde_json::json!({"a": 1})));
//! assert_eq!(text.as_deref(), Some("{'a':1}"));
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

pub mod codec;
mod declaration;
mod definition;
mod diagnostics;
mod id;
mod index;
mod kind;
mod schema;
mod store;
mod value;

pub use definition::{DefaultValue, Observer, ObserverRef, PropertyDefinition};
pub use diagnostics::{CodecError, Diagnostics, Warning};
pub use id::{Property, PropertyId};
pub use index::AttributeIndex;
pub use kind::PropertyKind;
pub use schema::{DefaultOverrides, PropertyEntry, PropertySchema, SchemaBuilder};
pub use store::InstanceStore;
pub use value::{PropertyType, PropertyValue};
