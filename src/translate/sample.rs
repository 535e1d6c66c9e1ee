//! Schemas synthesized from runtime values, for open (string → dynamic) maps.
//!
//! Only the entries actually present contribute, and every observed key is
//! required. Nothing here looks at declared types.
use serde_json::{Map, Value};

use crate::schema::{SchemaNode, ITEMS_KEY};
use super::scalar::apply_email_hint;

/// Object schema with one property per observed entry. A missing or empty
/// sample yields `{ "type": "object", "properties": {} }`.
pub fn open_map_node(sample: Option<&Map<String, Value>>) -> SchemaNode {
    let mut properties = SchemaNode::new();
    let mut required = Vec::new();
    for (key, value) in sample.into_iter().flatten() {
        let mut node = value_node(value);
        apply_email_hint(&mut node, key);
        properties.insert(key.clone(), node);
        required.push(key.clone());
    }
    SchemaNode::object(properties, required)
}

/// Schema for a single runtime value.
pub fn value_node(value: &Value) -> SchemaNode {
    match value {
        Value::Null => SchemaNode::typed("null"),
        Value::Bool(_) => SchemaNode::typed("boolean"),
        Value::Number(n) if n.is_i64() || n.is_u64() => SchemaNode::typed("integer"),
        Value::Number(_) => SchemaNode::typed("number"),
        Value::String(_) => SchemaNode::typed("string"),
        Value::Array(xs) => {
            // first non-null element stands in for the element type
            let items = xs
                .iter()
                .find(|x| !x.is_null())
                .map(value_node)
                .unwrap_or_default();
            let mut node = SchemaNode::typed("array");
            node.insert(ITEMS_KEY, items);
            node
        }
        Value::Object(map) => open_map_node(Some(map)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn to_json(node: &SchemaNode) -> Value {
        serde_json::to_value(node).unwrap()
    }

    #[test]
    fn observed_entries_become_required_properties() {
        let sample = json!({ "name": "eli", "age": 50 });
        let node = open_map_node(sample.as_object());
        assert_eq!(
            to_json(&node),
            json!({
                "type": "object",
                "properties": { "name": { "type": "string" }, "age": { "type": "integer" } },
                "required": ["name", "age"]
            }),
        );
    }

    #[test]
    fn empty_or_missing_sample_has_no_required() {
        let empty = json!({});
        let expected = json!({ "type": "object", "properties": {} });
        assert_eq!(to_json(&open_map_node(empty.as_object())), expected);
        assert_eq!(to_json(&open_map_node(None)), expected);
    }

    #[test]
    fn nested_values() {
        let sample = json!({
            "score": 4.5,
            "tags": [null, "a"],
            "none": [],
            "owner": { "email": "eli@example.com", "active": true },
            "gone": null
        });
        assert_eq!(
            to_json(&open_map_node(sample.as_object())),
            json!({
                "type": "object",
                "properties": {
                    "score": { "type": "number" },
                    "tags": { "type": "array", "items": { "type": "string" } },
                    "none": { "type": "array", "items": {} },
                    "owner": {
                        "type": "object",
                        "properties": {
                            "email": { "type": "string", "format": "email" },
                            "active": { "type": "boolean" }
                        },
                        "required": ["email", "active"]
                    },
                    "gone": { "type": "null" }
                },
                "required": ["score", "tags", "none", "owner", "gone"]
            }),
        );
    }
}
