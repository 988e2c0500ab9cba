//! Resolved mapping plans.
//!
//! A [`MappingPlan`] lists, in destination declaration order, how each mapped
//! destination property is populated. Nested record and collection mappings
//! refer to other plans by [`PlanKey`]; the plans themselves live side by side
//! in a [`PlanSet`], so a self-referential type graph is just a key that
//! points back at an ancestor.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::diagnostic::Diagnostic;
use crate::ids::{ConverterId, PlanKey, TypeId};
use crate::schema::PropertySchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingKind {
    /// Assign the source value as is.
    Direct,
    /// Numeric conversion between kinds. Range checks belong to the consumer.
    NumericWiden,
    /// Populate a record from a record through the referenced plan.
    NestedObject(PlanKey),
    /// Copy a sequence of scalars into a sequence.
    CollectionOfPrimitive,
    /// Project each element through the referenced plan.
    CollectionOfComplex(PlanKey),
    /// Populate through a registered converter.
    Converter(ConverterId),
    /// Apply `inner` only when the named boolean source property is true.
    Conditional {
        inner: Box<MappingKind>,
        condition: String,
    },
}

impl MappingKind {
    #[must_use]
    pub fn when(self, condition: impl Into<String>) -> Self {
        MappingKind::Conditional {
            inner: Box::new(self),
            condition: condition.into(),
        }
    }

    /// The kind with any conditional wrapper removed.
    pub fn unconditional(&self) -> &MappingKind {
        match self {
            MappingKind::Conditional { inner, .. } => inner.unconditional(),
            other => other,
        }
    }

    pub fn condition(&self) -> Option<&str> {
        match self {
            MappingKind::Conditional { condition, .. } => Some(condition),
            _ => None,
        }
    }

    /// The plan this mapping delegates to, if any.
    pub fn nested_plan(&self) -> Option<&PlanKey> {
        match self.unconditional() {
            MappingKind::NestedObject(key) | MappingKind::CollectionOfComplex(key) => Some(key),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MappingKind::Direct => "Direct",
            MappingKind::NumericWiden => "NumericWiden",
            MappingKind::NestedObject(_) => "NestedObject",
            MappingKind::CollectionOfPrimitive => "CollectionOfPrimitive",
            MappingKind::CollectionOfComplex(_) => "CollectionOfComplex",
            MappingKind::Converter(_) => "Converter",
            MappingKind::Conditional { .. } => "Conditional",
        }
    }
}

impl fmt::Display for MappingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MappingKind::NestedObject(key) | MappingKind::CollectionOfComplex(key) => {
                write!(f, "{}({key})", self.label())
            }
            MappingKind::Converter(id) => write!(f, "Converter({id})"),
            MappingKind::Conditional { inner, condition } => {
                write!(f, "{inner} when {condition}")
            }
            other => f.write_str(other.label()),
        }
    }
}

/// How one destination property is populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyMapping {
    pub destination: PropertySchema,
    /// Name of the source property read.
    pub source: String,
    pub kind: MappingKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingPlan {
    pub source_id: TypeId,
    pub dest_id: TypeId,
    pub mappings: Vec<PropertyMapping>,
}

impl MappingPlan {
    pub fn empty(key: &PlanKey) -> Self {
        Self {
            source_id: key.source.clone(),
            dest_id: key.dest.clone(),
            mappings: Vec::new(),
        }
    }

    pub fn key(&self) -> PlanKey {
        PlanKey::new(self.source_id.clone(), self.dest_id.clone())
    }

    pub fn mapping(&self, destination: &str) -> Option<&PropertyMapping> {
        self.mappings
            .iter()
            .find(|m| m.destination.name == destination)
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Keys of the plans referenced by this plan's mappings, in mapping order.
    pub fn nested_keys(&self) -> impl Iterator<Item = &PlanKey> {
        self.mappings.iter().filter_map(|m| m.kind.nested_plan())
    }
}

/// The result of one resolution session: a root plan, every plan reachable
/// from it, and whatever diagnostics the session collected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSet {
    pub root: PlanKey,
    #[serde(with = "plans_as_seq")]
    pub plans: BTreeMap<PlanKey, MappingPlan>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl PlanSet {
    /// The plan for [`PlanSet::root`]. `None` only for a hand-assembled or
    /// deserialized set that left it out.
    pub fn root_plan(&self) -> Option<&MappingPlan> {
        self.plans.get(&self.root)
    }

    pub fn plan(&self, key: &PlanKey) -> Option<&MappingPlan> {
        self.plans.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MappingPlan> {
        self.plans.values()
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    /// Plans other than the root, in key order.
    pub fn nested(&self) -> impl Iterator<Item = &MappingPlan> {
        self.plans
            .iter()
            .filter(|(key, _)| **key != self.root)
            .map(|(_, plan)| plan)
    }
}

// JSON object keys must be strings, so plans are written as a list and
// re-keyed on the way back in.
mod plans_as_seq {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer, Serializer};

    use super::MappingPlan;
    use crate::ids::PlanKey;

    pub fn serialize<S: Serializer>(
        plans: &BTreeMap<PlanKey, MappingPlan>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(plans.values())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<PlanKey, MappingPlan>, D::Error> {
        let plans = Vec::<MappingPlan>::deserialize(deserializer)?;
        Ok(plans.into_iter().map(|plan| (plan.key(), plan)).collect())
    }
}
