// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reflected card.
//!
//! Attach a `HeaderCard` to an in-memory attribute map, change it from both
//! sides, and print each batched render.
//!
//! Run:
//! - `cargo run -p trellis_demos --example reflected_card`
//! - `RUST_LOG=trellis=trace cargo run -p trellis_demos --example reflected_card`

use std::rc::Rc;

use futures::executor::LocalPool;
use serde_json::json;
use tracing_subscriber::EnvFilter;
use trellis_demos::{HeaderCard, TAG_NAME};
use trellis_element::{AttributeMap, Element, ElementClass};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut pool = LocalPool::new();
    let class = ElementClass::<HeaderCard>::new();
    println!("<{TAG_NAME}> observes {:?}", class.observed_attributes());

    let card = class.create(
        HeaderCard::default(),
        AttributeMap::new().with("header", "Hi"),
        Rc::new(pool.spawner()),
    );
    card.connected_callback();
    pool.run_until_stalled();
    print_card(&card);

    // Three writes, one render.
    card.set_value("header", "Updated");
    card.set_value("myFlag", true);
    card.set_value("myOptions", json!({ "a": "it's" }));
    pool.run_until_stalled();
    print_card(&card);

    // Markup wins the other way round.
    card.set_attribute("type-name", "error");
    card.remove_attribute("my-flag");
    pool.run_until_stalled();
    print_card(&card);

    for warning in card.warnings() {
        println!("warning: {warning}");
    }
}

fn print_card(card: &Element<HeaderCard, AttributeMap>) {
    card.with_host(|attributes| {
        let markup: Vec<_> = attributes
            .iter()
            .map(|(name, value)| format!("{name}=\"{value}\""))
            .collect();
        println!("<{TAG_NAME} {}>", markup.join(" "));
    });
    card.with_component(|card| print!("{}", card.text()));
    println!("renders: {}\n", card.render_count());
}
