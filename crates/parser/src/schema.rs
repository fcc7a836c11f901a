//! Schema normalization
//!
//! Converts raw JSON-Schema-like nodes into canonical `SchemaNode`s. Inputs
//! must be reference-free; normalization recurses without a depth limit and
//! terminates because the source document is finite. Depth capping is a
//! generation concern, not a normalization one.

use crate::openapi::RawSchema;
use apicanon_common::{SchemaNode, SchemaType};
use std::collections::BTreeMap;

/// Normalize an optional raw schema; absence yields an `any` node
pub fn normalize_opt(raw: Option<&RawSchema>) -> SchemaNode {
    match raw {
        Some(schema) => normalize(schema),
        None => SchemaNode::any(),
    }
}

/// Normalize one raw schema node recursively
pub fn normalize(raw: &RawSchema) -> SchemaNode {
    let mut node = SchemaNode {
        schema_type: resolve_type(raw),
        format: raw.format.clone(),
        description: raw.description.clone(),
        enum_values: raw.enum_values.clone(),
        pattern: raw.pattern.clone(),
        min_length: raw.min_length,
        max_length: raw.max_length,
        minimum: raw.minimum,
        maximum: raw.maximum,
        example: raw.example.clone(),
        default_value: raw.default_value.clone(),
        nullable: raw.nullable,
        read_only: raw.read_only,
        write_only: raw.write_only,
        ..SchemaNode::default()
    };

    if node.schema_type == SchemaType::Object {
        node.required = raw.required.clone();

        let mut properties = BTreeMap::new();
        if let Some(ref declared) = raw.properties {
            for (name, prop) in declared {
                properties.insert(name.clone(), normalize(prop));
            }
        }
        // An object with no declared properties still gets an empty map
        node.properties = Some(properties);
    }

    if node.schema_type == SchemaType::Array {
        node.items = raw.items.as_deref().map(|items| Box::new(normalize(items)));
    }

    // Composition keywords are normalized member-wise and attached
    // independently; a node may carry all three alongside its own type
    node.one_of = raw
        .one_of
        .as_ref()
        .map(|members| members.iter().map(normalize).collect());
    node.any_of = raw
        .any_of
        .as_ref()
        .map(|members| members.iter().map(normalize).collect());
    node.all_of = raw
        .all_of
        .as_ref()
        .map(|members| members.iter().map(normalize).collect());

    node
}

/// Absence of a type with `properties` present implies `object`
fn resolve_type(raw: &RawSchema) -> SchemaType {
    match raw.schema_type.as_deref() {
        Some("string") => SchemaType::String,
        Some("number") => SchemaType::Number,
        Some("integer") => SchemaType::Integer,
        Some("boolean") => SchemaType::Boolean,
        Some("array") => SchemaType::Array,
        Some("object") => SchemaType::Object,
        Some("null") => SchemaType::Null,
        Some(_) => SchemaType::Any,
        None if raw.properties.is_some() => SchemaType::Object,
        None => SchemaType::Any,
    }
}
