//! Collaborator contracts consumed by a resolution session.

use mapplan_model::{ConverterId, ConverterSignature, PairOverrides, PlanKey, TypeId, TypeSchema};

/// Supplies schemas by type identity. Property order must be stable.
pub trait SchemaProvider {
    fn schema(&self, id: &TypeId) -> Option<&TypeSchema>;
}

/// Supplies the overrides declared for a (source, destination) pair.
///
/// `None` means nothing was configured for the pair, which behaves the same
/// as an empty [`PairOverrides`].
pub trait OverrideProvider {
    fn overrides(&self, key: &PlanKey) -> Option<&PairOverrides>;
}

/// Resolves converter references to their declared signatures.
pub trait ConverterRegistry {
    fn converter(&self, id: &ConverterId) -> Option<&ConverterSignature>;
}

/// Root pairs registered up front, in registration order.
pub trait MappingDeclarations {
    fn declared_pairs(&self) -> Vec<PlanKey>;
}

/// Everything a session reads from.
pub trait ResolutionInputs: SchemaProvider + OverrideProvider + ConverterRegistry {}

impl<T> ResolutionInputs for T where T: SchemaProvider + OverrideProvider + ConverterRegistry {}
