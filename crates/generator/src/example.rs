//! Example request body synthesis
//!
//! Generates a plausible JSON value from a schema node. Generation is
//! depth-capped: nodes nested beyond the cap yield `null`, which bounds the
//! output even for nominally deep schemas. A literal `example` on a node
//! always wins over synthesis.

use apicanon_common::{SchemaNode, SchemaType};
use serde_json::{Map, Value};

/// Nodes nested deeper than this yield `null`
const MAX_DEPTH: usize = 5;

/// Whether optional object properties appear in generated bodies
///
/// Required properties are always included; this policy only governs the
/// rest. The default includes everything so that output is deterministic and
/// shows the full surface of the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptionalFieldPolicy {
    #[default]
    Include,
    Omit,
}

/// Example value generator
#[derive(Debug, Clone, Copy, Default)]
pub struct ExampleGenerator {
    policy: OptionalFieldPolicy,
}

impl ExampleGenerator {
    pub fn new(policy: OptionalFieldPolicy) -> Self {
        Self { policy }
    }

    /// Generate an example value for a schema
    pub fn generate(&self, schema: &SchemaNode) -> Value {
        self.generate_at(schema, 0)
    }

    fn generate_at(&self, schema: &SchemaNode, depth: usize) -> Value {
        if depth > MAX_DEPTH {
            return Value::Null;
        }

        if let Some(ref example) = schema.example {
            return example.clone();
        }

        match schema.schema_type {
            SchemaType::String => match first_enum_value(schema) {
                Some(value) => value,
                None if schema.format.as_deref() == Some("email") => {
                    Value::String("user@example.com".to_string())
                }
                None => Value::String("string".to_string()),
            },

            SchemaType::Number | SchemaType::Integer => {
                first_enum_value(schema).unwrap_or_else(|| Value::from(0))
            }

            SchemaType::Boolean => Value::Bool(true),

            SchemaType::Array => match schema.items {
                Some(ref items) => Value::Array(vec![self.generate_at(items, depth + 1)]),
                None => Value::Array(vec![]),
            },

            SchemaType::Object => {
                let mut object = Map::new();
                if let Some(ref properties) = schema.properties {
                    for (name, property) in properties {
                        let required = schema.required.iter().any(|r| r == name);
                        if required || self.policy == OptionalFieldPolicy::Include {
                            object.insert(name.clone(), self.generate_at(property, depth + 1));
                        }
                    }
                }
                Value::Object(object)
            }

            SchemaType::Null | SchemaType::Any => Value::Null,
        }
    }
}

fn first_enum_value(schema: &SchemaNode) -> Option<Value> {
    schema
        .enum_values
        .as_ref()
        .and_then(|values| values.first())
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(json: serde_json::Value) -> SchemaNode {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_literal_example_always_wins() {
        let schema = node(json!({"type": "string", "example": "fluffy"}));
        let value = ExampleGenerator::default().generate(&schema);
        assert_eq!(value, json!("fluffy"));
    }

    #[test]
    fn test_enum_yields_first_value() {
        let schema = node(json!({"type": "string", "enum": ["available", "sold"]}));
        let value = ExampleGenerator::default().generate(&schema);
        assert_eq!(value, json!("available"));
    }

    #[test]
    fn test_email_format_yields_fixed_address() {
        let schema = node(json!({"type": "string", "format": "email"}));
        let value = ExampleGenerator::default().generate(&schema);
        assert_eq!(value, json!("user@example.com"));
    }

    #[test]
    fn test_required_fields_always_included() {
        let schema = node(json!({
            "type": "object",
            "required": ["name"],
            "properties": {
                "name": {"type": "string"},
                "age": {"type": "integer"}
            }
        }));

        for policy in [OptionalFieldPolicy::Include, OptionalFieldPolicy::Omit] {
            let value = ExampleGenerator::new(policy).generate(&schema);
            assert!(value.get("name").is_some());
        }
    }

    #[test]
    fn test_optional_field_policy() {
        let schema = node(json!({
            "type": "object",
            "required": ["name"],
            "properties": {
                "name": {"type": "string"},
                "age": {"type": "integer"}
            }
        }));

        let full = ExampleGenerator::new(OptionalFieldPolicy::Include).generate(&schema);
        assert_eq!(full["age"], json!(0));

        let lean = ExampleGenerator::new(OptionalFieldPolicy::Omit).generate(&schema);
        assert!(lean.get("age").is_none());
    }

    #[test]
    fn test_depth_cap_yields_null_beyond_five() {
        // Nominal depth 8, well past the cap
        let mut inner = json!({"type": "string"});
        for _ in 0..8 {
            inner = json!({
                "type": "object",
                "required": ["next"],
                "properties": {"next": inner}
            });
        }
        let schema = node(inner);

        let mut value = ExampleGenerator::default().generate(&schema);
        for _ in 0..MAX_DEPTH {
            value = value["next"].clone();
        }
        // One level past the cap collapses to null
        assert_eq!(value["next"], Value::Null);
    }

    #[test]
    fn test_array_without_items_is_empty() {
        let schema = node(json!({"type": "array"}));
        assert_eq!(ExampleGenerator::default().generate(&schema), json!([]));
    }
}
