//! In-memory schema arena with per-pair overrides and converters.
//!
//! [`MappingCatalog`] interns schemas by [`TypeId`] and implements every
//! provider trait, so it can be handed straight to a
//! [`Planner`](crate::Planner). Per-property overrides are set through the
//! fluent [`PairConfig`] returned by [`MappingCatalog::configure`].

use std::collections::BTreeMap;

use mapplan_model::{
    ConverterId, ConverterSignature, ModelError, PairOverrides, PlanKey, PropertyOverride,
    Result, TypeId, TypeRef, TypeSchema,
};

use crate::provider::{ConverterRegistry, MappingDeclarations, OverrideProvider, SchemaProvider};

#[derive(Debug, Clone, Default)]
pub struct MappingCatalog {
    schemas: BTreeMap<TypeId, TypeSchema>,
    overrides: BTreeMap<PlanKey, PairOverrides>,
    converters: BTreeMap<ConverterId, ConverterSignature>,
    declarations: Vec<PlanKey>,
}

impl MappingCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a schema.
    ///
    /// # Errors
    ///
    /// Rejects schemas that fail [`TypeSchema::validate`] and ids that are
    /// already registered.
    pub fn add_schema(&mut self, schema: TypeSchema) -> Result<&mut Self> {
        schema.validate()?;
        if self.schemas.contains_key(&schema.id) {
            return Err(ModelError::DuplicateSchema(schema.id));
        }
        tracing::trace!(type_id = %schema.id, properties = schema.properties.len(), "schema registered");
        self.schemas.insert(schema.id.clone(), schema);
        Ok(self)
    }

    /// Registers a converter with its declared input and output types.
    ///
    /// # Errors
    ///
    /// Blank and already registered converter ids are rejected.
    pub fn add_converter(
        &mut self,
        id: impl Into<String>,
        input: TypeRef,
        output: TypeRef,
    ) -> Result<&mut Self> {
        let id = ConverterId::new(id.into());
        if id.as_str().is_empty() {
            return Err(ModelError::BlankName { what: "converter" });
        }
        if self.converters.contains_key(&id) {
            return Err(ModelError::DuplicateConverter(id.as_str().to_string()));
        }
        self.converters
            .insert(id, ConverterSignature { input, output });
        Ok(self)
    }

    /// Opens the override set for `source -> dest`, creating it if needed.
    pub fn configure(&mut self, source: impl Into<TypeId>, dest: impl Into<TypeId>) -> PairConfig<'_> {
        let key = PlanKey::new(source, dest);
        let overrides = self
            .overrides
            .entry(key.clone())
            .or_insert_with(|| PairOverrides::new(key));
        PairConfig { overrides }
    }

    /// Registers `source -> dest` as a root pair. Returns false for a repeat.
    pub fn declare(&mut self, source: impl Into<TypeId>, dest: impl Into<TypeId>) -> bool {
        let key = PlanKey::new(source, dest);
        if self.declarations.contains(&key) {
            return false;
        }
        self.declarations.push(key);
        true
    }

    /// Registers both directions between `a` and `b`.
    pub fn declare_bidirectional(&mut self, a: impl Into<TypeId>, b: impl Into<TypeId>) {
        let key = PlanKey::new(a, b);
        let reversed = key.reversed();
        self.declare(key.source, key.dest);
        self.declare(reversed.source, reversed.dest);
    }

    pub fn schemas(&self) -> impl Iterator<Item = &TypeSchema> {
        self.schemas.values()
    }

    pub fn converters(&self) -> impl Iterator<Item = (&ConverterId, &ConverterSignature)> {
        self.converters.iter()
    }

    pub fn contains(&self, id: &TypeId) -> bool {
        self.schemas.contains_key(id)
    }
}

impl SchemaProvider for MappingCatalog {
    fn schema(&self, id: &TypeId) -> Option<&TypeSchema> {
        self.schemas.get(id)
    }
}

impl OverrideProvider for MappingCatalog {
    fn overrides(&self, key: &PlanKey) -> Option<&PairOverrides> {
        self.overrides.get(key)
    }
}

impl ConverterRegistry for MappingCatalog {
    fn converter(&self, id: &ConverterId) -> Option<&ConverterSignature> {
        self.converters.get(id)
    }
}

impl MappingDeclarations for MappingCatalog {
    fn declared_pairs(&self) -> Vec<PlanKey> {
        self.declarations.clone()
    }
}

/// Fluent per-property configuration for one pair.
///
/// Each method names a destination property. Setting the same kind of
/// override twice on one property is an error.
pub struct PairConfig<'c> {
    overrides: &'c mut PairOverrides,
}

impl PairConfig<'_> {
    /// Reads `property` from `source_property` instead of the same-named one.
    pub fn rename(&mut self, property: &str, source_property: &str) -> Result<&mut Self> {
        self.add(property, PropertyOverride::Rename(source_property.trim().to_string()))
    }

    pub fn ignore(&mut self, property: &str) -> Result<&mut Self> {
        self.add(property, PropertyOverride::Ignore)
    }

    pub fn convert(&mut self, property: &str, converter: &str) -> Result<&mut Self> {
        self.add(property, PropertyOverride::Convert(ConverterId::new(converter)))
    }

    /// Maps `property` only when the boolean source property `condition` is true.
    pub fn when(&mut self, property: &str, condition: &str) -> Result<&mut Self> {
        self.add(property, PropertyOverride::Condition(condition.trim().to_string()))
    }

    pub fn key(&self) -> &PlanKey {
        &self.overrides.key
    }

    fn add(&mut self, property: &str, directive: PropertyOverride) -> Result<&mut Self> {
        self.overrides.add(property, directive)?;
        Ok(self)
    }
}
