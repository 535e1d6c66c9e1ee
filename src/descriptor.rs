// Strongly-typed view of a Rust type's shape. No serde_json::Value here.
//
// Descriptors are produced by `Describe` impls and consumed by the translator.
// Object properties are built lazily so a self-referential type can be
// described without looping; the translator owns cycle handling.

use std::any::TypeId;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum TypeDescriptor {
    Scalar(ScalarKind),
    Enum(EnumType),
    Array(Box<TypeDescriptor>),  // Vec<T>, [T; N], sets
    OpenMap,                     // string keys → dynamic values
    TypedMap {
        key: Box<TypeDescriptor>,
        value: Box<TypeDescriptor>,
    },
    Dynamic,                     // shape only known from a sample (serde_json::Value)
    Object(ObjectType),
    Nullable(Box<TypeDescriptor>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    I8, I16, I32, I64, I128, ISize,
    U8, U16, U32, U64, U128, USize,
    F32, F64,
    Decimal,
    Char,
    String,
    Uri,
    Uuid,
    Date,
    Time,
    DateTime,
    /// Anything the mapping table does not recognize; emitted as a plain string.
    Other(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType {
    pub name: String,
    pub members: Vec<String>,    // declaration order
}

/// A composite type with named properties.
///
/// Identity is the Rust `TypeId`, not the name, so two types that happen to
/// share a name in different modules are never confused during cycle checks.
#[derive(Clone)]
pub struct ObjectType {
    id: TypeId,
    name: String,
    properties: fn() -> Vec<Property>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub ty: TypeDescriptor,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl TypeDescriptor {
    /// Object descriptor for `T` whose properties are produced on demand.
    pub fn object<T: 'static + ?Sized>(name: impl Into<String>, properties: fn() -> Vec<Property>) -> Self {
        TypeDescriptor::Object(ObjectType {
            id: TypeId::of::<T>(),
            name: name.into(),
            properties,
        })
    }

    pub fn enumeration<I, S>(name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TypeDescriptor::Enum(EnumType {
            name: name.into(),
            members: members.into_iter().map(Into::into).collect(),
        })
    }

    pub fn array(item: TypeDescriptor) -> Self {
        TypeDescriptor::Array(Box::new(item))
    }

    /// Wrap in `Nullable`, collapsing `Option<Option<T>>` into a single layer.
    pub fn nullable(inner: TypeDescriptor) -> Self {
        match inner {
            TypeDescriptor::Nullable(_) => inner,
            other => TypeDescriptor::Nullable(Box::new(other)),
        }
    }

    /// Pick the map variant up front: `String → Dynamic` is an open map,
    /// everything else is a homogeneously typed map.
    pub fn map(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        match (&key, &value) {
            (TypeDescriptor::Scalar(ScalarKind::String), TypeDescriptor::Dynamic) => TypeDescriptor::OpenMap,
            _ => TypeDescriptor::TypedMap {
                key: Box::new(key),
                value: Box::new(value),
            },
        }
    }

    /// Strip the nullable wrapper, reporting whether one was present.
    pub fn unwrap_nullable(&self) -> (&TypeDescriptor, bool) {
        match self {
            TypeDescriptor::Nullable(inner) => (inner.unwrap_nullable().0, true),
            other => (other, false),
        }
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, TypeDescriptor::Nullable(_))
    }

    /// Human-facing name, used for the root `title`.
    pub fn name(&self) -> String {
        match self {
            TypeDescriptor::Scalar(kind) => kind.name().to_string(),
            TypeDescriptor::Enum(e) => e.name.clone(),
            TypeDescriptor::Array(item) => format!("ArrayOf{}", item.name()),
            TypeDescriptor::OpenMap => "Map".to_string(),
            TypeDescriptor::TypedMap { key, value } => format!("MapOf{}To{}", key.name(), value.name()),
            TypeDescriptor::Dynamic => "Value".to_string(),
            TypeDescriptor::Object(obj) => obj.name.clone(),
            TypeDescriptor::Nullable(inner) => inner.name(),
        }
    }
}

impl ScalarKind {
    pub fn name(&self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::I8 => "i8",
            ScalarKind::I16 => "i16",
            ScalarKind::I32 => "i32",
            ScalarKind::I64 => "i64",
            ScalarKind::I128 => "i128",
            ScalarKind::ISize => "isize",
            ScalarKind::U8 => "u8",
            ScalarKind::U16 => "u16",
            ScalarKind::U32 => "u32",
            ScalarKind::U64 => "u64",
            ScalarKind::U128 => "u128",
            ScalarKind::USize => "usize",
            ScalarKind::F32 => "f32",
            ScalarKind::F64 => "f64",
            ScalarKind::Decimal => "decimal",
            ScalarKind::Char => "char",
            ScalarKind::String => "String",
            ScalarKind::Uri => "Url",
            ScalarKind::Uuid => "Uuid",
            ScalarKind::Date => "NaiveDate",
            ScalarKind::Time => "NaiveTime",
            ScalarKind::DateTime => "DateTime",
            ScalarKind::Other(name) => name,
        }
    }
}

impl ObjectType {
    pub fn id(&self) -> TypeId {
        self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    /// Declared properties, in declaration order.
    pub fn properties(&self) -> Vec<Property> {
        (self.properties)()
    }
}

impl PartialEq for ObjectType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl fmt::Debug for ObjectType {
    // properties are lazy; printing them could recurse forever
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectType").field("name", &self.name).finish_non_exhaustive()
    }
}

impl Property {
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self { name: name.into(), ty }
    }

    /// Property whose descriptor comes from `T: Describe`.
    pub fn of<T: crate::Describe + ?Sized>(name: impl Into<String>) -> Self {
        Self::new(name, T::describe())
    }

    /// Required unless wrapped in `Nullable`; no nullability metadata means required.
    pub fn is_required(&self) -> bool {
        !self.ty.is_nullable()
    }
}
