use once_cell::sync::Lazy;
use regex::Regex;

use crate::descriptor::ScalarKind;
use crate::schema::{SchemaNode, FORMAT_KEY};

static EMAIL_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)email").expect("static regex"));

/// JSON Schema `type` tag for a scalar. Unrecognized kinds fall back to `string`.
pub fn type_tag(kind: ScalarKind) -> &'static str {
    match kind {
        ScalarKind::Bool => "boolean",
        ScalarKind::I8 | ScalarKind::I16 | ScalarKind::I32 | ScalarKind::I64 | ScalarKind::I128
        | ScalarKind::ISize
        | ScalarKind::U8 | ScalarKind::U16 | ScalarKind::U32 | ScalarKind::U64 | ScalarKind::U128
        | ScalarKind::USize => "integer",
        ScalarKind::F32 | ScalarKind::F64 | ScalarKind::Decimal => "number",
        ScalarKind::Char
        | ScalarKind::String
        | ScalarKind::Uri
        | ScalarKind::Uuid
        | ScalarKind::Date
        | ScalarKind::Time
        | ScalarKind::DateTime
        | ScalarKind::Other(_) => "string",
    }
}

/// `format` hint for the extended scalars.
pub fn format_hint(kind: ScalarKind) -> Option<&'static str> {
    match kind {
        ScalarKind::Uri => Some("uri"),
        ScalarKind::Uuid => Some("uuid"),
        ScalarKind::Date => Some("date"),
        ScalarKind::Time => Some("time"),
        ScalarKind::DateTime => Some("date-time"),
        _ => None,
    }
}

pub fn scalar_node(kind: ScalarKind) -> SchemaNode {
    let mut node = SchemaNode::typed(type_tag(kind));
    if let Some(format) = format_hint(kind) {
        node.insert(FORMAT_KEY, format);
    }
    node
}

/// String-typed properties named like `*email*` get `format: "email"`,
/// unless a format is already set.
pub fn apply_email_hint(node: &mut SchemaNode, property_name: &str) {
    if node.type_tag() == Some("string")
        && !node.contains_key(FORMAT_KEY)
        && EMAIL_NAME.is_match(property_name)
    {
        node.insert(FORMAT_KEY, "email");
    }
}
