//! Classification of type references into [`TypeDescriptor`]s.
//!
//! Rules, first match wins:
//! 1. a known scalar name: string, primitive (bool, temporal, identifier)
//!    or numeric;
//! 2. a declared enum;
//! 3. a nullable wrapper with one argument;
//! 4. an array, or a sequence/set container with one argument;
//! 5. anything else is a complex record identified by its full reference,
//!    type arguments included, so `Wrapper<A>` and `Wrapper<B>` differ.
//!
//! Names are matched case-insensitively after stripping any namespace or
//! module path, so `int`, `Int32`, `System.Int32` and `i32` agree.

use std::collections::HashMap;

use mapplan_model::{NumericKind, PrimitiveKind, TypeDescriptor, TypeId, TypeRef};

const NULLABLE_WRAPPERS: &[&str] = &["nullable", "option", "optional"];

const CONTAINERS: &[&str] = &[
    "list",
    "ilist",
    "ireadonlylist",
    "icollection",
    "ireadonlycollection",
    "collection",
    "ienumerable",
    "enumerable",
    "sequence",
    "seq",
    "array",
    "vec",
    "vecdeque",
    "linkedlist",
    "hashset",
    "btreeset",
    "iset",
    "set",
    "sortedset",
    "immutablelist",
    "immutablearray",
];

/// Classifies a single type reference. Pure and total.
pub fn classify(ty: &TypeRef) -> TypeDescriptor {
    match ty {
        TypeRef::Enum(id) => TypeDescriptor::Enum(id.clone()),
        TypeRef::Record(id) => TypeDescriptor::Complex(id.clone()),
        TypeRef::Array(element) => TypeDescriptor::enumerable_of(classify(element)),
        TypeRef::Named { name, args } => {
            let simple = simple_name(name);
            if args.is_empty()
                && let Some(scalar) = scalar_descriptor(&simple)
            {
                return scalar;
            }
            if let [inner] = args.as_slice() {
                if NULLABLE_WRAPPERS.contains(&simple.as_str()) {
                    return TypeDescriptor::nullable_of(classify(inner));
                }
                if CONTAINERS.contains(&simple.as_str()) {
                    return TypeDescriptor::enumerable_of(classify(inner));
                }
            }
            if args.is_empty() {
                TypeDescriptor::Complex(TypeId::new(name.as_str()))
            } else {
                TypeDescriptor::Complex(TypeId::new(ty.to_string()))
            }
        }
    }
}

/// Lowercased name without namespace (`System.Int32`) or path (`std::string::String`).
fn simple_name(name: &str) -> String {
    let tail = name.rsplit("::").next().unwrap_or(name);
    let tail = tail.rsplit('.').next().unwrap_or(tail);
    tail.to_ascii_lowercase()
}

fn scalar_descriptor(simple: &str) -> Option<TypeDescriptor> {
    if matches!(simple, "string" | "str") {
        return Some(TypeDescriptor::String);
    }
    if let Some(kind) = numeric_kind(simple) {
        return Some(TypeDescriptor::Numeric(kind));
    }
    primitive_kind(simple).map(TypeDescriptor::Primitive)
}

fn numeric_kind(simple: &str) -> Option<NumericKind> {
    let kind = match simple {
        "sbyte" | "i8" | "int8" => NumericKind::Int8,
        "short" | "i16" | "int16" => NumericKind::Int16,
        "int" | "integer" | "i32" | "int32" => NumericKind::Int32,
        "long" | "i64" | "int64" | "isize" | "nint" => NumericKind::Int64,
        "i128" | "int128" => NumericKind::Int128,
        "byte" | "u8" | "uint8" => NumericKind::UInt8,
        "ushort" | "u16" | "uint16" => NumericKind::UInt16,
        "uint" | "u32" | "uint32" => NumericKind::UInt32,
        "ulong" | "u64" | "uint64" | "usize" | "nuint" => NumericKind::UInt64,
        "u128" | "uint128" => NumericKind::UInt128,
        "float" | "single" | "f32" | "float32" => NumericKind::Float32,
        "double" | "f64" | "float64" => NumericKind::Float64,
        "decimal" | "bigdecimal" => NumericKind::Decimal,
        _ => return None,
    };
    Some(kind)
}

fn primitive_kind(simple: &str) -> Option<PrimitiveKind> {
    let kind = match simple {
        "bool" | "boolean" => PrimitiveKind::Bool,
        "char" => PrimitiveKind::Char,
        "datetime" | "naivedatetime" | "instant" | "timestamp" => PrimitiveKind::DateTime,
        "datetimeoffset" | "offsetdatetime" | "zoneddatetime" => PrimitiveKind::DateTimeOffset,
        "dateonly" | "date" | "naivedate" | "localdate" => PrimitiveKind::Date,
        "timeonly" | "time" | "naivetime" | "localtime" => PrimitiveKind::Time,
        "timespan" | "duration" => PrimitiveKind::Duration,
        "guid" | "uuid" => PrimitiveKind::Guid,
        "uri" | "url" => PrimitiveKind::Uri,
        _ => return None,
    };
    Some(kind)
}

/// Session-scoped classifier computing each distinct reference once.
#[derive(Debug, Default)]
pub struct Classifier {
    cache: HashMap<TypeRef, TypeDescriptor>,
}

impl Classifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classify(&mut self, ty: &TypeRef) -> TypeDescriptor {
        if let Some(hit) = self.cache.get(ty) {
            return hit.clone();
        }
        let descriptor = classify(ty);
        self.cache.insert(ty.clone(), descriptor.clone());
        descriptor
    }

    /// Number of distinct references classified so far.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> TypeRef {
        text.parse().unwrap()
    }

    #[test]
    fn scalar_names_across_hosts() {
        for name in ["int", "Int32", "System.Int32", "i32"] {
            assert_eq!(
                classify(&parse(name)),
                TypeDescriptor::Numeric(NumericKind::Int32),
                "{name}"
            );
        }
        assert_eq!(classify(&parse("std::string::String")), TypeDescriptor::String);
        assert_eq!(classify(&parse("decimal")), TypeDescriptor::Numeric(NumericKind::Decimal));
        assert_eq!(
            classify(&parse("System.Guid")),
            TypeDescriptor::Primitive(PrimitiveKind::Guid)
        );
        assert_eq!(
            classify(&parse("DateTime")),
            TypeDescriptor::Primitive(PrimitiveKind::DateTime)
        );
    }

    #[test]
    fn wrappers_and_containers_recurse() {
        assert_eq!(
            classify(&parse("Int64?")),
            TypeDescriptor::nullable_of(TypeDescriptor::Numeric(NumericKind::Int64))
        );
        assert_eq!(
            classify(&parse("Option<bool>")),
            TypeDescriptor::nullable_of(TypeDescriptor::Primitive(PrimitiveKind::Bool))
        );
        assert_eq!(
            classify(&TypeRef::list(TypeRef::record("OrderItem"))),
            TypeDescriptor::enumerable_of(TypeDescriptor::Complex(TypeId::new("OrderItem")))
        );
        assert_eq!(
            classify(&parse("String[]")),
            TypeDescriptor::enumerable_of(TypeDescriptor::String)
        );
        assert_eq!(
            classify(&parse("HashSet<Status>")),
            TypeDescriptor::enumerable_of(TypeDescriptor::Complex(TypeId::new("Status")))
        );
    }

    #[test]
    fn enums_and_fallback_records() {
        assert_eq!(
            classify(&TypeRef::enumeration("Status")),
            TypeDescriptor::Enum(TypeId::new("Status"))
        );
        assert_eq!(
            classify(&parse("Address")),
            TypeDescriptor::Complex(TypeId::new("Address"))
        );
        // Unrecognised generics and wrong arities fall through to records
        // keyed by the whole reference.
        assert_eq!(
            classify(&parse("Dictionary<String, Int32>")),
            TypeDescriptor::Complex(TypeId::new("Dictionary<String, Int32>"))
        );
        assert_eq!(
            classify(&parse("List<String, Int32>")),
            TypeDescriptor::Complex(TypeId::new("List<String, Int32>"))
        );
    }

    #[test]
    fn generic_arguments_distinguish_records() {
        assert_ne!(
            classify(&parse("Dictionary<String, Int32>")),
            classify(&parse("Dictionary<Int32, String>"))
        );
        assert_ne!(classify(&parse("Wrapper<A>")), classify(&parse("Wrapper<B>")));
        assert_eq!(classify(&parse("Wrapper<A>")), classify(&parse("Wrapper<A>")));
    }

    #[test]
    fn classifier_caches_per_distinct_reference() {
        let mut classifier = Classifier::new();
        let first = classifier.classify(&parse("List<Int32>"));
        let second = classifier.classify(&parse("List<Int32>"));
        classifier.classify(&parse("Int32"));
        assert_eq!(first, second);
        assert_eq!(classifier.len(), 2);
    }
}
