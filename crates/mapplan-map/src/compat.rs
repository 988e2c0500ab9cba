//! Type compatibility between a source and a destination property.
//!
//! The evaluation here is pure: it only looks at descriptors. Converter
//! overrides, conditions and the recursion into nested plans are layered
//! on top by the session.

use mapplan_model::{ConverterSignature, NumericKind, TypeDescriptor, TypeId};

use crate::classify::Classifier;

/// How two descriptors connect, before nested plans are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Compatibility {
    Direct,
    NumericWiden { from: NumericKind, to: NumericKind },
    CollectionOfPrimitive,
    /// Needs a plan for `(source, dest)`; `collection` selects element-wise projection.
    Nested {
        collection: bool,
        source: TypeId,
        dest: TypeId,
    },
    Incompatible,
}

/// Connects `source` to `dest` without converters.
///
/// Identity wins first, then identity after stripping one level of
/// nullability from the source, the destination, or both. The remaining
/// rules all work on the descriptors stripped on both sides.
pub fn evaluate_types(source: &TypeDescriptor, dest: &TypeDescriptor) -> Compatibility {
    let (bare_source, bare_dest) = (source.unwrap_nullable(), dest.unwrap_nullable());
    if source == dest || bare_source == dest || source == bare_dest || bare_source == bare_dest {
        return Compatibility::Direct;
    }
    let (source, dest) = (bare_source, bare_dest);

    match (source, dest) {
        (TypeDescriptor::Numeric(from), TypeDescriptor::Numeric(to)) => {
            Compatibility::NumericWiden {
                from: *from,
                to: *to,
            }
        }
        (TypeDescriptor::EnumerableOf(from), TypeDescriptor::EnumerableOf(to)) => {
            let (from, to) = (from.unwrap_nullable(), to.unwrap_nullable());
            if from.is_scalar() && to.is_scalar() {
                return Compatibility::CollectionOfPrimitive;
            }
            match (from.complex_id(), to.complex_id()) {
                (Some(source), Some(dest)) => Compatibility::Nested {
                    collection: true,
                    source: source.clone(),
                    dest: dest.clone(),
                },
                _ => Compatibility::Incompatible,
            }
        }
        (TypeDescriptor::Complex(source), TypeDescriptor::Complex(dest)) => Compatibility::Nested {
            collection: false,
            source: source.clone(),
            dest: dest.clone(),
        },
        _ => Compatibility::Incompatible,
    }
}

/// True when the converter's declared input and output classify exactly as
/// the source and destination descriptors. Nullability is not relaxed here.
pub fn converter_applies(
    signature: &ConverterSignature,
    source: &TypeDescriptor,
    dest: &TypeDescriptor,
    classifier: &mut Classifier,
) -> bool {
    classifier.classify(&signature.input) == *source && classifier.classify(&signature.output) == *dest
}
