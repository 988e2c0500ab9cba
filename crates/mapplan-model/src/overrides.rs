//! Per-property directives that adjust how a destination is populated.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::ids::{ConverterId, PlanKey};
use crate::type_ref::TypeRef;

/// A single directive attached to a destination property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyOverride {
    /// Read from the named source property instead of the same-named one.
    Rename(String),
    /// Leave the destination property out of the plan.
    Ignore,
    /// Populate through the named converter.
    Convert(ConverterId),
    /// Only populate when the named boolean source property is true.
    Condition(String),
}

impl PropertyOverride {
    pub fn kind_name(&self) -> &'static str {
        match self {
            PropertyOverride::Rename(_) => "rename",
            PropertyOverride::Ignore => "ignore",
            PropertyOverride::Convert(_) => "convert",
            PropertyOverride::Condition(_) => "condition",
        }
    }
}

/// Every override attached to one destination property, one slot per kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyOverrides {
    pub rename: Option<String>,
    pub ignore: bool,
    pub convert: Option<ConverterId>,
    pub condition: Option<String>,
}

impl PropertyOverrides {
    /// Stores `directive` in its slot. Returns false when the slot is taken.
    pub fn set(&mut self, directive: PropertyOverride) -> bool {
        match directive {
            PropertyOverride::Rename(name) => fill(&mut self.rename, name),
            PropertyOverride::Ignore => !std::mem::replace(&mut self.ignore, true),
            PropertyOverride::Convert(id) => fill(&mut self.convert, id),
            PropertyOverride::Condition(name) => fill(&mut self.condition, name),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rename.is_none() && !self.ignore && self.convert.is_none() && self.condition.is_none()
    }
}

fn fill<T>(slot: &mut Option<T>, value: T) -> bool {
    if slot.is_some() {
        return false;
    }
    *slot = Some(value);
    true
}

/// The overrides declared for one (source, destination) pair, keyed by
/// destination property name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairOverrides {
    pub key: PlanKey,
    properties: BTreeMap<String, PropertyOverrides>,
}

impl PairOverrides {
    pub fn new(key: PlanKey) -> Self {
        Self {
            key,
            properties: BTreeMap::new(),
        }
    }

    /// Attaches `directive` to the destination property `property`.
    ///
    /// # Errors
    ///
    /// Blank property, source or converter names, and a second directive of
    /// the same kind for one property, are rejected.
    pub fn add(&mut self, property: &str, directive: PropertyOverride) -> Result<()> {
        let property = property.trim();
        if property.is_empty() {
            return Err(ModelError::BlankName { what: "property" });
        }
        let blank = match &directive {
            PropertyOverride::Rename(name) => name.trim().is_empty().then_some("source property"),
            PropertyOverride::Condition(name) => {
                name.trim().is_empty().then_some("condition property")
            }
            PropertyOverride::Convert(id) => id.as_str().is_empty().then_some("converter"),
            PropertyOverride::Ignore => None,
        };
        if let Some(what) = blank {
            return Err(ModelError::BlankName { what });
        }
        let kind = directive.kind_name();
        let slot = self.properties.entry(property.to_string()).or_default();
        if !slot.set(directive) {
            return Err(ModelError::DuplicateOverride {
                pair: self.key.clone(),
                property: property.to_string(),
                kind,
            });
        }
        Ok(())
    }

    pub fn get(&self, property: &str) -> Option<&PropertyOverrides> {
        self.properties.get(property)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyOverrides)> {
        self.properties.iter().map(|(name, o)| (name.as_str(), o))
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// Declared input and output types of a value converter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConverterSignature {
    pub input: TypeRef,
    pub output: TypeRef,
}
