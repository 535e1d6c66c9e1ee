//! Schema tree: ordered key/value fragments plus the root document wrapper.
//!
//! Key order is insertion order, so serialization is deterministic and the
//! root always reads `$schema`, `title`, `type`, `properties`, `required`.
use indexmap::IndexMap;
use serde::Serialize;

pub const SCHEMA_KEY: &str = "$schema";
pub const TITLE_KEY: &str = "title";
pub const TYPE_KEY: &str = "type";
pub const PROPERTIES_KEY: &str = "properties";
pub const REQUIRED_KEY: &str = "required";
pub const ITEMS_KEY: &str = "items";
pub const ENUM_KEY: &str = "enum";
pub const FORMAT_KEY: &str = "format";
pub const COMMENT_KEY: &str = "$comment";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SchemaNode(IndexMap<String, SchemaValue>);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SchemaValue {
    String(String),
    List(Vec<String>),
    Node(SchemaNode),
}

/// Root of a generated schema. Discarded after serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SchemaDocument {
    root: SchemaNode,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl SchemaNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// `{ "type": <tag> }`
    pub fn typed(tag: &str) -> Self {
        let mut node = Self::new();
        node.insert(TYPE_KEY, tag);
        node
    }

    /// `{ "type": "object", "properties": <properties>, "required": [..] }`,
    /// omitting `required` when empty.
    pub fn object(properties: SchemaNode, required: Vec<String>) -> Self {
        let mut node = Self::typed("object");
        node.insert(PROPERTIES_KEY, properties);
        if !required.is_empty() {
            node.insert(REQUIRED_KEY, required);
        }
        node
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<SchemaValue>) -> Option<SchemaValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&SchemaValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The single `type` tag, if present and not a union.
    pub fn type_tag(&self) -> Option<&str> {
        match self.get(TYPE_KEY) {
            Some(SchemaValue::String(tag)) => Some(tag),
            _ => None,
        }
    }

    /// Rewrite `type: T` into `type: [T, "null"]`.
    pub fn make_nullable(&mut self) {
        if let Some(tag) = self.type_tag().map(str::to_string) {
            self.insert(TYPE_KEY, vec![tag, "null".to_string()]);
        }
    }

    /// Copy of this node with `$schema` and `title` placed in front.
    pub fn with_root_annotations(self, schema_url: &str, title: &str) -> Self {
        let mut root = Self::new();
        root.insert(SCHEMA_KEY, schema_url);
        root.insert(TITLE_KEY, title);
        root.0.extend(self.0);
        root
    }
}

impl From<&str> for SchemaValue {
    fn from(value: &str) -> Self {
        SchemaValue::String(value.to_string())
    }
}

impl From<String> for SchemaValue {
    fn from(value: String) -> Self {
        SchemaValue::String(value)
    }
}

impl From<Vec<String>> for SchemaValue {
    fn from(value: Vec<String>) -> Self {
        SchemaValue::List(value)
    }
}

impl From<SchemaNode> for SchemaValue {
    fn from(value: SchemaNode) -> Self {
        SchemaValue::Node(value)
    }
}

impl SchemaValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SchemaValue::String(s) => Some(s),
            _ => None,
        }
    }
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            SchemaValue::List(xs) => Some(xs),
            _ => None,
        }
    }
    pub fn as_node(&self) -> Option<&SchemaNode> {
        match self {
            SchemaValue::Node(node) => Some(node),
            _ => None,
        }
    }
}

impl SchemaDocument {
    pub fn new(root: SchemaNode) -> Self {
        Self { root }
    }

    /// `{ "type": "null" }`, the document for an absent input.
    pub fn null() -> Self {
        Self::new(SchemaNode::typed("null"))
    }

    pub fn root(&self) -> &SchemaNode {
        &self.root
    }

    pub fn into_root(self) -> SchemaNode {
        self.root
    }

    pub fn title(&self) -> Option<&str> {
        self.root.get(TITLE_KEY).and_then(SchemaValue::as_str)
    }

    /// Replace the title in place; keeps its position in the key order.
    /// Documents without a title (the null document) are left untouched.
    pub fn set_title(&mut self, title: impl Into<String>) {
        if let Some(slot) = self.root.0.get_mut(TITLE_KEY) {
            *slot = SchemaValue::String(title.into());
        }
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        // a SchemaNode only ever holds strings, string lists and maps
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    pub fn to_json_string(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
