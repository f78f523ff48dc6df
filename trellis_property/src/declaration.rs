// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON-shaped property declarations.

use alloc::string::{String, ToString};
use serde_json::Value;

use crate::definition::PropertyDefinition;
use crate::diagnostics::Warning;
use crate::kind::PropertyKind;
use crate::schema::SchemaBuilder;
use crate::value::PropertyValue;

const TYPE: &str = "type";
const VALUE: &str = "value";
const OBSERVER: &str = "observer";
const REFLECT_TO_ATTRIBUTE: &str = "reflectToAttribute";

pub(crate) fn declare_all<C>(builder: &mut SchemaBuilder<C>, declarations: &Value) {
    let Some(map) = declarations.as_object() else {
        builder.report(Warning::MalformedDeclarations {
            found: declarations.to_string(),
        });
        return;
    };
    for (property, declaration) in map {
        if let Some(definition) = parse_definition(builder, property, declaration) {
            builder.declare(property, definition);
        }
    }
}

fn parse_definition<C>(
    builder: &mut SchemaBuilder<C>,
    property: &str,
    declaration: &Value,
) -> Option<PropertyDefinition<C>> {
    let Some(fields) = declaration.as_object() else {
        builder.report(Warning::MalformedDefinition {
            property: property.into(),
        });
        return None;
    };

    let kind = match fields.get(TYPE) {
        Some(Value::String(name)) => PropertyKind::from_name(name),
        _ => None,
    };
    let kind = kind.unwrap_or_else(|| {
        builder.report(Warning::UnsupportedKind {
            property: property.into(),
            kind: fields.get(TYPE).map_or_else(|| String::from("<missing>"), Value::to_string),
        });
        PropertyKind::Raw
    });

    let mut definition = PropertyDefinition::new(kind);
    if let Some(literal) = fields.get(VALUE).filter(|literal| !literal.is_null()) {
        definition = definition.value(PropertyValue::from_literal(kind, literal));
    }
    match fields.get(OBSERVER) {
        None | Some(Value::Null) => {}
        Some(Value::String(name)) => definition = definition.observer(name.as_str()),
        Some(other) => builder.report(Warning::MissingObserver {
            property: property.into(),
            observer: other.to_string(),
        }),
    }
    match fields.get(REFLECT_TO_ATTRIBUTE) {
        None => {}
        // Empty names are reported by the resolver.
        Some(Value::String(attribute)) => {
            definition = definition.reflect_to_attribute(attribute.as_str());
        }
        Some(_) => builder.report(Warning::InvalidAttribute {
            property: property.into(),
        }),
    }
    Some(definition)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::ObserverRef;
    use alloc::vec::Vec;
    use serde_json::json;

    struct Example;

    fn resolve(declarations: Value) -> crate::PropertySchema<Example> {
        let mut builder = SchemaBuilder::<Example>::new();
        builder.declare_json(&declarations);
        builder.resolve(None)
    }

    #[test]
    fn full_declaration() {
        let schema = resolve(json!({
            "header": {
                "type": "String",
                "value": "Init name",
                "observer": "header_changed",
                "reflectToAttribute": "header"
            }
        }));
        let entry = schema.entry_by_name("header").unwrap();
        assert_eq!(entry.kind(), PropertyKind::String);
        assert_eq!(entry.attribute(), Some("header"));
        assert_eq!(
            entry.definition().default_value().unwrap().produce(),
            PropertyValue::from("Init name")
        );
        assert!(matches!(
            entry.definition().observer_ref(),
            Some(ObserverRef::Named(name)) if name == "header_changed"
        ));
        assert!(schema.warnings().is_empty());
    }

    #[test]
    fn json_default_is_kept_whole() {
        let schema = resolve(json!({
            "myOptions": { "type": "Json", "value": { "a": "av" } }
        }));
        let entry = schema.entry_by_name("myOptions").unwrap();
        assert_eq!(
            entry.definition().default_value().unwrap().produce(),
            PropertyValue::Json(json!({ "a": "av" }))
        );
    }

    #[test]
    fn non_object_entry_is_skipped() {
        let schema = resolve(json!({ "broken": "String", "ok": { "type": "Boolean" } }));
        assert!(schema.id("broken").is_none());
        assert!(schema.id("ok").is_some());
        assert_eq!(
            schema.warnings(),
            &[Warning::MalformedDefinition {
                property: "broken".to_string()
            }]
        );
    }

    #[test]
    fn unsupported_and_missing_types_are_raw() {
        let schema = resolve(json!({
            "when": { "type": "Date" },
            "what": {}
        }));
        assert_eq!(schema.entry_by_name("when").unwrap().kind(), PropertyKind::Raw);
        assert_eq!(schema.entry_by_name("what").unwrap().kind(), PropertyKind::Raw);
        let kinds: Vec<_> = schema
            .warnings()
            .iter()
            .filter_map(|warning| match warning {
                Warning::UnsupportedKind { kind, .. } => Some(kind.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(kinds, ["<missing>", "\"Date\""]);
    }

    #[test]
    fn non_string_attribute_is_dropped() {
        let schema = resolve(json!({
            "count": { "type": "Number", "reflectToAttribute": 3 }
        }));
        assert!(schema.attribute_index().is_empty());
        assert_eq!(
            schema.warnings(),
            &[Warning::InvalidAttribute {
                property: "count".to_string()
            }]
        );
    }

    #[test]
    fn null_value_means_no_default() {
        let schema = resolve(json!({ "a": { "type": "String", "value": null } }));
        assert!(schema.entry_by_name("a").unwrap().definition().default_value().is_none());
    }

    #[test]
    fn top_level_must_be_an_object() {
        let schema = resolve(json!([1, 2]));
        assert!(schema.is_empty());
        assert!(matches!(
            schema.warnings(),
            [Warning::MalformedDeclarations { .. }]
        ));
    }
}
