// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Demo elements for Trellis.
//!
//! [`HeaderCard`] declares one reflected property of each supported kind and
//! renders a plain-text summary of them.
//!
//! Run:
//! - `cargo run -p trellis_demos --example reflected_card`

use std::fmt::Write as _;

use serde_json::json;
use trellis_element::{Component, PropertyView};
use trellis_property::{Observer, PropertyDefinition, PropertyValue, SchemaBuilder};

/// Tag name the card registers under.
pub const TAG_NAME: &str = "header-card";

/// A card with a header, a type name, JSON options and a flag.
#[derive(Debug, Default)]
pub struct HeaderCard {
    text: String,
    header_updates: usize,
}

impl HeaderCard {
    /// Returns the output of the last render.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns how many times the header observer ran.
    pub fn header_updates(&self) -> usize {
        self.header_updates
    }

    fn header_called(&mut self, new: &PropertyValue, old: &PropertyValue) {
        self.header_updates += 1;
        tracing::info!(tag = TAG_NAME, header = %new, previous = %old, "header has been updated");
    }
}

impl Component for HeaderCard {
    fn declare_properties(properties: &mut SchemaBuilder<Self>) {
        properties.property::<String>(
            "header",
            PropertyDefinition::string()
                .value("Init name")
                .observer("header_called")
                .reflect_to_attribute("header"),
        );
        properties.property::<String>(
            "typeName",
            PropertyDefinition::string()
                .value("warning")
                .reflect_to_attribute("type-name"),
        );
        properties.property::<serde_json::Value>(
            "myOptions",
            PropertyDefinition::json()
                .value(json!({ "a": "av" }))
                .reflect_to_attribute("my-options"),
        );
        properties.property::<bool>(
            "myFlag",
            PropertyDefinition::boolean()
                .value(false)
                .reflect_to_attribute("my-flag"),
        );
    }

    fn observer(name: &str) -> Option<Observer<Self>> {
        match name {
            "header_called" => Some(Self::header_called),
            _ => None,
        }
    }

    fn render(&mut self, properties: &PropertyView<'_, Self>) {
        self.text.clear();
        for (name, value) in properties.iter() {
            let _ = writeln!(self.text, "this.{name}: {value}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use futures::executor::LocalPool;
    use trellis_element::{AttributeMap, ElementClass};

    use super::*;

    #[test]
    fn card_renders_attribute_values() {
        let mut pool = LocalPool::new();
        let class = ElementClass::<HeaderCard>::new();
        let card = class.create(
            HeaderCard::default(),
            AttributeMap::new()
                .with("header", "Hello")
                .with("my-options", "{'a':'b'}"),
            Rc::new(pool.spawner()),
        );
        card.connected_callback();
        pool.run_until_stalled();

        card.with_component(|card| {
            assert_eq!(
                card.text(),
                "this.header: Hello\n\
                 this.typeName: warning\n\
                 this.myOptions: {\"a\":\"b\"}\n\
                 this.myFlag: false\n"
            );
            assert_eq!(card.header_updates(), 2);
        });
        assert_eq!(card.get_attribute("type-name").as_deref(), Some("warning"));
        assert_eq!(card.get_attribute("my-flag"), None);
    }
}
