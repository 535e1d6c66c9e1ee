//! Generate JSON Schema documents from Rust types and values.
//!
//! A type opts in through [`Describe`]; [`SchemaGenerator`] walks its
//! [`TypeDescriptor`] (plus an optional sample value) and produces a
//! [`SchemaDocument`]. [`SchemaWriter`] persists documents to disk.
pub mod describe;
pub mod descriptor;
pub mod error;
pub mod schema;
pub mod settings;
pub mod translate;
pub mod writer;

pub use describe::Describe;
pub use descriptor::{EnumType, ObjectType, Property, ScalarKind, TypeDescriptor};
pub use error::{Error, Result};
pub use schema::{SchemaDocument, SchemaNode, SchemaValue};
pub use settings::GeneratorSettings;
pub use translate::SchemaGenerator;
pub use writer::{SchemaWriter, WrittenSchema};
