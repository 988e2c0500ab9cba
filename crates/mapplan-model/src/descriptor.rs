//! Classification results for type references.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::TypeId;

/// Non-numeric scalar kinds other than strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PrimitiveKind {
    Bool,
    Char,
    DateTime,
    DateTimeOffset,
    Date,
    Time,
    Duration,
    Guid,
    Uri,
}

impl PrimitiveKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveKind::Bool => "Bool",
            PrimitiveKind::Char => "Char",
            PrimitiveKind::DateTime => "DateTime",
            PrimitiveKind::DateTimeOffset => "DateTimeOffset",
            PrimitiveKind::Date => "Date",
            PrimitiveKind::Time => "Time",
            PrimitiveKind::Duration => "Duration",
            PrimitiveKind::Guid => "Guid",
            PrimitiveKind::Uri => "Uri",
        }
    }
}

/// Fixed-width integer, floating-point and decimal kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NumericKind {
    Int8,
    Int16,
    Int32,
    Int64,
    Int128,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    UInt128,
    Float32,
    Float64,
    Decimal,
}

impl NumericKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NumericKind::Int8 => "Int8",
            NumericKind::Int16 => "Int16",
            NumericKind::Int32 => "Int32",
            NumericKind::Int64 => "Int64",
            NumericKind::Int128 => "Int128",
            NumericKind::UInt8 => "UInt8",
            NumericKind::UInt16 => "UInt16",
            NumericKind::UInt32 => "UInt32",
            NumericKind::UInt64 => "UInt64",
            NumericKind::UInt128 => "UInt128",
            NumericKind::Float32 => "Float32",
            NumericKind::Float64 => "Float64",
            NumericKind::Decimal => "Decimal",
        }
    }

    pub fn is_integer(&self) -> bool {
        !matches!(
            self,
            NumericKind::Float32 | NumericKind::Float64 | NumericKind::Decimal
        )
    }

    pub fn is_signed(&self) -> bool {
        !matches!(
            self,
            NumericKind::UInt8
                | NumericKind::UInt16
                | NumericKind::UInt32
                | NumericKind::UInt64
                | NumericKind::UInt128
        )
    }

    /// Storage width in bits. Decimal is counted as 128.
    pub fn bits(&self) -> u32 {
        match self {
            NumericKind::Int8 | NumericKind::UInt8 => 8,
            NumericKind::Int16 | NumericKind::UInt16 => 16,
            NumericKind::Int32 | NumericKind::UInt32 | NumericKind::Float32 => 32,
            NumericKind::Int64 | NumericKind::UInt64 | NumericKind::Float64 => 64,
            NumericKind::Int128 | NumericKind::UInt128 | NumericKind::Decimal => 128,
        }
    }

    /// Returns true when every value of `self` is exactly representable in
    /// `target`.
    ///
    /// Plans record a numeric conversion either way; this only feeds the
    /// narrowing diagnostic.
    pub fn widens_to(&self, target: NumericKind) -> bool {
        if *self == target {
            return true;
        }
        match (self.is_integer(), target.is_integer()) {
            (true, true) => match (self.is_signed(), target.is_signed()) {
                (true, false) => false,
                (false, true) => target.bits() > self.bits(),
                _ => target.bits() >= self.bits(),
            },
            // Mantissa widths: f32 holds 24 bits, f64 53, decimal 96.
            (true, false) => match target {
                NumericKind::Float32 => self.bits() <= 16,
                NumericKind::Float64 => self.bits() <= 32,
                _ => self.bits() <= 64,
            },
            (false, true) => false,
            (false, false) => {
                matches!((self, target), (NumericKind::Float32, NumericKind::Float64))
            }
        }
    }
}

/// The classification of one type reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeDescriptor {
    Primitive(PrimitiveKind),
    String,
    Numeric(NumericKind),
    Enum(TypeId),
    NullableOf(Box<TypeDescriptor>),
    EnumerableOf(Box<TypeDescriptor>),
    Complex(TypeId),
}

impl TypeDescriptor {
    pub fn nullable_of(inner: TypeDescriptor) -> Self {
        TypeDescriptor::NullableOf(Box::new(inner))
    }

    pub fn enumerable_of(element: TypeDescriptor) -> Self {
        TypeDescriptor::EnumerableOf(Box::new(element))
    }

    /// Strips one level of nullability, if present.
    pub fn unwrap_nullable(&self) -> &TypeDescriptor {
        match self {
            TypeDescriptor::NullableOf(inner) => inner,
            other => other,
        }
    }

    /// Primitive, string, numeric and enum descriptors.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            TypeDescriptor::Primitive(_)
                | TypeDescriptor::String
                | TypeDescriptor::Numeric(_)
                | TypeDescriptor::Enum(_)
        )
    }

    pub fn complex_id(&self) -> Option<&TypeId> {
        match self {
            TypeDescriptor::Complex(id) => Some(id),
            _ => None,
        }
    }

    pub fn element(&self) -> Option<&TypeDescriptor> {
        match self {
            TypeDescriptor::EnumerableOf(element) => Some(element),
            _ => None,
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Primitive(kind) => f.write_str(kind.as_str()),
            TypeDescriptor::String => f.write_str("String"),
            TypeDescriptor::Numeric(kind) => f.write_str(kind.as_str()),
            TypeDescriptor::Enum(id) => write!(f, "enum {id}"),
            TypeDescriptor::NullableOf(inner) => write!(f, "{inner}?"),
            TypeDescriptor::EnumerableOf(element) => write!(f, "[{element}]"),
            TypeDescriptor::Complex(id) => write!(f, "{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_widening_respects_sign_and_width() {
        assert!(NumericKind::Int32.widens_to(NumericKind::Int64));
        assert!(!NumericKind::Int64.widens_to(NumericKind::Int32));
        assert!(NumericKind::UInt16.widens_to(NumericKind::Int32));
        assert!(!NumericKind::UInt32.widens_to(NumericKind::Int32));
        assert!(!NumericKind::Int8.widens_to(NumericKind::UInt64));
    }

    #[test]
    fn float_and_decimal_widening() {
        assert!(NumericKind::Int32.widens_to(NumericKind::Float64));
        assert!(!NumericKind::Int64.widens_to(NumericKind::Float64));
        assert!(NumericKind::Int64.widens_to(NumericKind::Decimal));
        assert!(NumericKind::Float32.widens_to(NumericKind::Float64));
        assert!(!NumericKind::Float64.widens_to(NumericKind::Decimal));
        assert!(!NumericKind::Decimal.widens_to(NumericKind::Int64));
    }

    #[test]
    fn unwrap_nullable_strips_one_level() {
        let nested = TypeDescriptor::nullable_of(TypeDescriptor::nullable_of(
            TypeDescriptor::String,
        ));
        assert_eq!(
            nested.unwrap_nullable(),
            &TypeDescriptor::nullable_of(TypeDescriptor::String)
        );
        assert_eq!(TypeDescriptor::String.unwrap_nullable(), &TypeDescriptor::String);
    }
}
