//! `Describe`: compile-time type descriptors for schema generation.
//!
//! Domain types opt in by implementing [`Describe`], usually through
//! [`describe_object!`](crate::describe_object) and
//! [`describe_enum!`](crate::describe_enum). Common std, `chrono`, `uuid`,
//! `url`, `indexmap` and `serde_json` types are covered here.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};

use crate::descriptor::{ScalarKind, TypeDescriptor};

pub trait Describe {
    fn describe() -> TypeDescriptor;
}

// ------------------------------- Scalars ---------------------------------- //

macro_rules! describe_scalar {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn describe() -> TypeDescriptor {
                    TypeDescriptor::Scalar(ScalarKind::$kind)
                }
            }
        )*
    };
}

describe_scalar! {
    bool => Bool,
    i8 => I8, i16 => I16, i32 => I32, i64 => I64, i128 => I128, isize => ISize,
    u8 => U8, u16 => U16, u32 => U32, u64 => U64, u128 => U128, usize => USize,
    f32 => F32, f64 => F64,
    char => Char,
    String => String,
    str => String,
    uuid::Uuid => Uuid,
    url::Url => Uri,
    chrono::NaiveDate => Date,
    chrono::NaiveTime => Time,
    chrono::NaiveDateTime => DateTime,
}

impl<Tz: chrono::TimeZone> Describe for chrono::DateTime<Tz> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::Scalar(ScalarKind::DateTime)
    }
}

impl Describe for Cow<'_, str> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::Scalar(ScalarKind::String)
    }
}

// ------------------------------ Wrappers ---------------------------------- //

impl<T: Describe + ?Sized> Describe for &T {
    fn describe() -> TypeDescriptor { T::describe() }
}

impl<T: Describe + ?Sized> Describe for Box<T> {
    fn describe() -> TypeDescriptor { T::describe() }
}

impl<T: Describe + ?Sized> Describe for Rc<T> {
    fn describe() -> TypeDescriptor { T::describe() }
}

impl<T: Describe + ?Sized> Describe for Arc<T> {
    fn describe() -> TypeDescriptor { T::describe() }
}

impl<T: Describe> Describe for Option<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::nullable(T::describe())
    }
}

// ----------------------------- Collections -------------------------------- //

macro_rules! describe_sequence {
    ($($ty:ident),* $(,)?) => {
        $(
            impl<T: Describe> Describe for $ty<T> {
                fn describe() -> TypeDescriptor {
                    TypeDescriptor::array(T::describe())
                }
            }
        )*
    };
}

describe_sequence!(Vec, VecDeque, BTreeSet);

impl<T: Describe, S> Describe for HashSet<T, S> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::array(T::describe())
    }
}

impl<T: Describe, S> Describe for IndexSet<T, S> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::array(T::describe())
    }
}

impl<T: Describe> Describe for [T] {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::array(T::describe())
    }
}

impl<T: Describe, const N: usize> Describe for [T; N] {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::array(T::describe())
    }
}

// -------------------------------- Maps ------------------------------------ //

impl<K: Describe, V: Describe, S> Describe for HashMap<K, V, S> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::map(K::describe(), V::describe())
    }
}

impl<K: Describe, V: Describe> Describe for BTreeMap<K, V> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::map(K::describe(), V::describe())
    }
}

impl<K: Describe, V: Describe, S> Describe for IndexMap<K, V, S> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::map(K::describe(), V::describe())
    }
}

// ------------------------------ Dynamic ----------------------------------- //

impl Describe for serde_json::Value {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::Dynamic
    }
}

impl Describe for serde_json::Map<String, serde_json::Value> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::OpenMap
    }
}

// ---------------------------- Declarations -------------------------------- //

/// Implement [`Describe`] for a struct by listing its serialized property
/// names and types in declaration order.
///
/// ```
/// use jsonschema_gen::describe_object;
///
/// struct Engine { kind: String, horsepower: i32 }
///
/// describe_object!(Engine {
///     "Type": String,
///     "Horsepower": i32,
/// });
/// ```
///
/// The title defaults to the type's identifier; use `Type as "Name" { .. }`
/// to override it.
#[macro_export]
macro_rules! describe_object {
    (@impl $ty:ty, $name:expr, $($field:literal : $fty:ty),*) => {
        impl $crate::Describe for $ty {
            fn describe() -> $crate::TypeDescriptor {
                $crate::TypeDescriptor::object::<$ty>($name, || {
                    ::std::vec![$($crate::Property::of::<$fty>($field)),*]
                })
            }
        }
    };
    ($ty:ident as $name:literal { $($field:literal : $fty:ty),* $(,)? }) => {
        $crate::describe_object!(@impl $ty, $name, $($field : $fty),*);
    };
    ($ty:ident { $($field:literal : $fty:ty),* $(,)? }) => {
        $crate::describe_object!(@impl $ty, stringify!($ty), $($field : $fty),*);
    };
}

/// Implement [`Describe`] for a unit-only enum. Members are listed in
/// declaration order and emitted by name.
///
/// ```
/// use jsonschema_gen::describe_enum;
///
/// enum CarColor { White, Black }
///
/// describe_enum!(CarColor { White, Black });
/// ```
#[macro_export]
macro_rules! describe_enum {
    ($ty:ident { $($member:ident),* $(,)? }) => {
        impl $crate::Describe for $ty {
            fn describe() -> $crate::TypeDescriptor {
                $crate::TypeDescriptor::enumeration(
                    stringify!($ty),
                    [$(stringify!($member)),*],
                )
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Property;
    use pretty_assertions::assert_eq;

    #[allow(dead_code)]
    struct Engine;
    #[allow(dead_code)]
    struct Garage;
    #[allow(dead_code)]
    enum CarColor { White, Black }

    crate::describe_object!(Engine {
        "Type": Option<String>,
        "Horsepower": i32,
    });

    crate::describe_object!(Garage as "CarGarage" {
        "Cars": Vec<Engine>,
    });

    crate::describe_enum!(CarColor { White, Black });

    #[test]
    fn scalars_map_to_kinds() {
        assert_eq!(i32::describe(), TypeDescriptor::Scalar(ScalarKind::I32));
        assert_eq!(<&str>::describe(), TypeDescriptor::Scalar(ScalarKind::String));
        assert_eq!(uuid::Uuid::describe(), TypeDescriptor::Scalar(ScalarKind::Uuid));
        assert_eq!(url::Url::describe(), TypeDescriptor::Scalar(ScalarKind::Uri));
        assert_eq!(
            chrono::DateTime::<chrono::Utc>::describe(),
            TypeDescriptor::Scalar(ScalarKind::DateTime),
        );
    }

    #[test]
    fn wrappers_are_transparent() {
        assert_eq!(Box::<u8>::describe(), u8::describe());
        assert_eq!(Arc::<String>::describe(), String::describe());
        assert_eq!(
            Option::<Option<i64>>::describe(),
            TypeDescriptor::nullable(TypeDescriptor::Scalar(ScalarKind::I64)),
        );
    }

    #[test]
    fn collections_and_maps() {
        assert_eq!(
            <[bool; 3]>::describe(),
            TypeDescriptor::array(TypeDescriptor::Scalar(ScalarKind::Bool)),
        );
        assert_eq!(HashMap::<String, serde_json::Value>::describe(), TypeDescriptor::OpenMap);
        assert_eq!(
            BTreeMap::<String, f64>::describe(),
            TypeDescriptor::map(
                TypeDescriptor::Scalar(ScalarKind::String),
                TypeDescriptor::Scalar(ScalarKind::F64),
            ),
        );
    }

    #[test]
    fn declared_objects_and_enums() {
        let TypeDescriptor::Object(engine) = Engine::describe() else {
            panic!("expected object descriptor");
        };
        assert_eq!(engine.name(), "Engine");
        assert_eq!(
            engine.properties(),
            vec![
                Property::of::<Option<String>>("Type"),
                Property::of::<i32>("Horsepower"),
            ],
        );

        assert_eq!(Garage::describe().name(), "CarGarage");

        assert_eq!(
            CarColor::describe(),
            TypeDescriptor::enumeration("CarColor", ["White", "Black"]),
        );
    }
}
