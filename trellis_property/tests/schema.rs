// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `trellis_property` crate.
//!
//! These resolve declaration maps the way an element type would, and check
//! the codec against values stored in an `InstanceStore`.

use serde_json::json;
use trellis_property::{
    codec, DefaultOverrides, InstanceStore, ObserverRef, PropertyKind, PropertySchema,
    PropertyValue, SchemaBuilder, Warning,
};

struct Card;

fn card_schema(overrides: Option<&DefaultOverrides>) -> PropertySchema<Card> {
    let mut builder = SchemaBuilder::<Card>::new();
    builder.declare_json(&json!({
        "header": {
            "type": "String",
            "value": "Init name",
            "observer": "_headerCalled",
            "reflectToAttribute": "header"
        },
        "typeName": { "type": "String", "value": "warning", "reflectToAttribute": "type-name" },
        "myOptions": { "type": "Json", "value": { "a": "av" }, "reflectToAttribute": "my-options" },
        "myFlag": { "type": "Boolean", "value": false, "reflectToAttribute": "my-flag" }
    }));
    builder.resolve(overrides)
}

#[test]
fn declaration_map_resolves() {
    let schema = card_schema(None);

    assert_eq!(schema.len(), 4);
    assert!(schema.warnings().is_empty());

    let header = schema.entry_by_name("header").unwrap();
    assert_eq!(header.kind(), PropertyKind::String);
    assert!(matches!(
        header.definition().observer_ref(),
        Some(ObserverRef::Named(name)) if name == "_headerCalled"
    ));

    let options = schema.entry_by_name("myOptions").unwrap();
    assert_eq!(options.kind(), PropertyKind::Json);
    assert_eq!(
        options.definition().default_value().unwrap().produce(),
        PropertyValue::Json(json!({ "a": "av" }))
    );

    let attributes: Vec<_> = schema.observed_attributes().collect();
    assert_eq!(attributes, ["header", "type-name", "my-options", "my-flag"]);
    for attribute in attributes {
        let id = schema.attribute_index().property(attribute).unwrap();
        assert_eq!(schema.get(id).unwrap().attribute(), Some(attribute));
    }
}

#[test]
fn json_declarations_keep_written_order() {
    let mut builder = SchemaBuilder::<Card>::new();
    builder.declare_json(&json!({
        "zeta": { "type": "String", "reflectToAttribute": "zeta" },
        "alpha": { "type": "Number", "reflectToAttribute": "alpha" }
    }));
    let schema = builder.resolve(None);

    let names: Vec<_> = schema.iter().map(|(_, entry)| entry.name()).collect();
    assert_eq!(names, ["zeta", "alpha"]);
    let attributes: Vec<_> = schema.observed_attributes().collect();
    assert_eq!(attributes, ["zeta", "alpha"]);
}

#[test]
fn overrides_and_typos() {
    let overrides = DefaultOverrides::new()
        .with("typeName", "info")
        .with("typname", "error");
    let schema = card_schema(Some(&overrides));

    let type_name = schema.entry_by_name("typeName").unwrap();
    assert_eq!(
        type_name.definition().default_value().unwrap().produce(),
        PropertyValue::from("info")
    );
    assert_eq!(
        schema.warnings(),
        [Warning::UnknownOverride {
            property: "typname".into()
        }]
    );
}

#[test]
fn malformed_declarations_are_reported() {
    let mut builder = SchemaBuilder::<Card>::new();
    builder.declare_json(&json!(["header"]));
    builder.declare_json(&json!({
        "count": { "type": "Number", "reflectToAttribute": 3 },
        "when": { "value": "now" }
    }));
    let schema = builder.resolve(None);

    assert_eq!(schema.len(), 2);
    assert_eq!(schema.entry_by_name("when").unwrap().kind(), PropertyKind::Raw);
    assert!(schema.attribute_index().is_empty());

    let warnings = schema.warnings();
    assert!(matches!(warnings[0], Warning::MalformedDeclarations { .. }));
    assert!(warnings.contains(&Warning::InvalidAttribute {
        property: "count".into()
    }));
    assert!(warnings.contains(&Warning::UnsupportedKind {
        property: "when".into(),
        kind: "<missing>".into()
    }));
}

#[test]
fn stored_values_survive_their_attribute_text() {
    let schema = card_schema(None);
    let mut store = InstanceStore::new();

    for (id, entry) in schema.iter() {
        let default = entry.definition().default_value().unwrap().produce();
        let text = codec::encode(entry.kind(), &default);
        let decoded = codec::decode(entry.kind(), text.as_deref()).unwrap();
        assert_eq!(decoded, default, "{} did not survive", entry.name());
        store.replace(id, decoded);
    }

    // `false` has no attribute form, but presence decoding gives it back.
    let flag = schema.id("myFlag").unwrap();
    assert_eq!(store.get(flag), &PropertyValue::Boolean(false));
    assert_eq!(store.len(), 4);
}

#[test]
fn json_text_with_both_quote_styles() {
    let value = PropertyValue::Json(json!({ "say": "don't \"panic\"" }));
    let text = codec::encode(PropertyKind::Json, &value).unwrap();
    assert_eq!(text, r#"{'say':'don"t \'panic\''}"#);
    assert_eq!(codec::decode(PropertyKind::Json, Some(text.as_str())), Ok(value));
}
