//! Type → JSON Schema translation.
//!
//! Walks a [`TypeDescriptor`] (and, where available, a sample value serialized
//! to `serde_json::Value`) and emits a [`SchemaNode`] tree:
//! - properties are visited in declaration order;
//! - `Option<T>` marks a property as not required, everything else is required;
//! - open maps are typed from their observed entries, typed maps from their
//!   declared key/value types;
//! - an object type already on the current recursion path is truncated to a
//!   placeholder instead of recursing.
//!
//! The translator is pure: no I/O, no logging, no shared state.
pub mod sample;
pub mod scalar;

use std::any::TypeId;

use serde::Serialize;
use serde_json::Value;

use crate::descriptor::{ObjectType, ScalarKind, TypeDescriptor};
use crate::describe::Describe;
use crate::schema::{SchemaDocument, SchemaNode, COMMENT_KEY, ENUM_KEY, ITEMS_KEY};
use crate::settings::GeneratorSettings;

#[derive(Debug, Clone)]
pub struct SchemaGenerator {
    schema_url: String,
}

/// Object types currently being expanded, outermost first.
type VisitPath = Vec<TypeId>;

impl SchemaGenerator {
    pub fn new(settings: &GeneratorSettings) -> Self {
        Self::with_schema_url(settings.schema_url.clone())
    }

    pub fn with_schema_url(schema_url: impl Into<String>) -> Self {
        Self { schema_url: schema_url.into() }
    }

    pub fn schema_url(&self) -> &str {
        &self.schema_url
    }

    /// Schema for `value`'s type, using the value itself as the sample.
    ///
    /// An absent value (or a `None` behind a nullable type) yields
    /// `{ "type": "null" }`.
    pub fn generate<T>(&self, value: Option<&T>) -> SchemaDocument
    where
        T: Describe + Serialize + ?Sized,
    {
        let Some(value) = value else {
            return SchemaDocument::null();
        };
        let ty = T::describe();
        // a value that fails to serialize still has a type; it just has no sample
        let sample = serde_json::to_value(value).ok();
        let null_capable = ty.is_nullable() || matches!(ty, TypeDescriptor::Dynamic);
        if null_capable && matches!(sample, Some(Value::Null)) {
            return SchemaDocument::null();
        }
        SchemaDocument::new(self.generate_for_type(&ty, sample.as_ref(), true))
    }

    /// Schema for an untyped JSON document.
    pub fn generate_json(&self, value: &Value) -> SchemaDocument {
        if value.is_null() {
            return SchemaDocument::null();
        }
        SchemaDocument::new(self.generate_for_type(&TypeDescriptor::Dynamic, Some(value), true))
    }

    /// Schema for `T` alone, without a sample.
    pub fn generate_type<T: Describe + ?Sized>(&self) -> SchemaDocument {
        SchemaDocument::new(self.generate_for_type(&T::describe(), None, true))
    }

    /// The recursive step: always an object node with `properties`, plus
    /// `required` when non-empty. Root nodes lead with `$schema` and `title`.
    pub fn generate_for_type(&self, ty: &TypeDescriptor, sample: Option<&Value>, is_root: bool) -> SchemaNode {
        let mut path = VisitPath::new();
        let node = self.object_like(ty, sample, &mut path);
        if is_root {
            node.with_root_annotations(&self.schema_url, &ty.name())
        } else {
            node
        }
    }

    // ————————————————————————————————————————————————————————————————————————
    // INTERNAL
    // ————————————————————————————————————————————————————————————————————————

    fn object_like(&self, ty: &TypeDescriptor, sample: Option<&Value>, path: &mut VisitPath) -> SchemaNode {
        let sample = sample.filter(|v| !v.is_null());
        match ty.unwrap_nullable().0 {
            TypeDescriptor::Object(obj) => self.object_node(obj, sample, path),
            TypeDescriptor::OpenMap | TypeDescriptor::Dynamic => {
                sample::open_map_node(sample.and_then(Value::as_object))
            }
            TypeDescriptor::TypedMap { key, value } => self.typed_map_node(key, value, path),
            // non-composite roots have no properties to report
            _ => SchemaNode::object(SchemaNode::new(), Vec::new()),
        }
    }

    fn object_node(&self, obj: &ObjectType, sample: Option<&Value>, path: &mut VisitPath) -> SchemaNode {
        if path.contains(&obj.id()) {
            let mut node = SchemaNode::object(SchemaNode::new(), Vec::new());
            node.insert(COMMENT_KEY, format!("recursive reference to {}", obj.name()));
            return node;
        }
        path.push(obj.id());

        let mut properties = SchemaNode::new();
        let mut required = Vec::new();
        for prop in obj.properties() {
            let field_sample = sample.and_then(|s| s.get(&prop.name));
            let node = self.property_node(&prop.name, &prop.ty, field_sample, path);
            // a repeated name keeps its last declaration
            if properties.insert(prop.name.clone(), node).is_some() {
                required.retain(|name| *name != prop.name);
            }
            if prop.is_required() {
                required.push(prop.name);
            }
        }

        path.pop();
        SchemaNode::object(properties, required)
    }

    fn property_node(&self, name: &str, ty: &TypeDescriptor, sample: Option<&Value>, path: &mut VisitPath) -> SchemaNode {
        let (inner, nullable) = ty.unwrap_nullable();
        let sample = sample.filter(|v| !v.is_null());
        let mut node = self.type_node(inner, sample, path);
        let string_like = match inner {
            TypeDescriptor::Scalar(ScalarKind::String | ScalarKind::Char) => true,
            TypeDescriptor::Dynamic => sample.is_some_and(Value::is_string),
            _ => false,
        };
        if string_like {
            scalar::apply_email_hint(&mut node, name);
        }
        // only composites take the `[base, "null"]` pair
        if nullable && matches!(node.type_tag(), Some("object" | "array")) {
            node.make_nullable();
        }
        node
    }

    /// Schema for a (non-nullable) type in any position.
    fn type_node(&self, ty: &TypeDescriptor, sample: Option<&Value>, path: &mut VisitPath) -> SchemaNode {
        match ty {
            TypeDescriptor::Nullable(inner) => self.type_node(inner, sample, path),
            TypeDescriptor::OpenMap => sample::open_map_node(sample.and_then(Value::as_object)),
            TypeDescriptor::TypedMap { key, value } => self.typed_map_node(key, value, path),
            TypeDescriptor::Array(item) => {
                let mut node = SchemaNode::typed("array");
                node.insert(ITEMS_KEY, self.type_node(item, None, path));
                node
            }
            TypeDescriptor::Enum(e) => {
                let mut node = SchemaNode::typed("string");
                node.insert(ENUM_KEY, e.members.clone());
                node
            }
            TypeDescriptor::Scalar(kind) => scalar::scalar_node(*kind),
            TypeDescriptor::Object(obj) => self.object_node(obj, sample, path),
            TypeDescriptor::Dynamic => match sample {
                Some(value) => sample::value_node(value),
                None => SchemaNode::object(SchemaNode::new(), Vec::new()),
            },
        }
    }

    /// `{ key, value }` pair schema for homogeneously typed maps.
    fn typed_map_node(&self, key: &TypeDescriptor, value: &TypeDescriptor, path: &mut VisitPath) -> SchemaNode {
        let mut properties = SchemaNode::new();
        properties.insert("key", self.property_node("key", key, None, path));
        properties.insert("value", self.property_node("value", value, None, path));
        SchemaNode::object(properties, vec!["key".to_string(), "value".to_string()])
    }
}

// ------------------------------- Tests ------------------------------------ //
