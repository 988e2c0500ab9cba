//! Structural descriptions of record types.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::ids::TypeId;
use crate::type_ref::TypeRef;

/// One property of a record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySchema {
    pub name: String,
    pub ty: TypeRef,
    pub readable: bool,
    pub writable: bool,
}

impl PropertySchema {
    /// A readable and writable property.
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            readable: true,
            writable: true,
        }
    }

    /// A property with a getter only (computed or init-less).
    pub fn read_only(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            writable: false,
            ..Self::new(name, ty)
        }
    }

    /// A property with a setter only.
    pub fn write_only(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            readable: false,
            ..Self::new(name, ty)
        }
    }
}

/// A record type: its identity and its properties in declaration order.
///
/// Declaration order is significant; plans list their mappings in the order
/// the destination declares its properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSchema {
    pub id: TypeId,
    pub properties: Vec<PropertySchema>,
}

impl TypeSchema {
    pub fn new(id: impl Into<TypeId>) -> Self {
        Self {
            id: id.into(),
            properties: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_property(mut self, property: PropertySchema) -> Self {
        self.properties.push(property);
        self
    }

    pub fn property(&self, name: &str) -> Option<&PropertySchema> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Looks a property up ignoring ASCII case. An exact match wins over a
    /// case-insensitive one; otherwise the first in declaration order.
    pub fn property_ignore_case(&self, name: &str) -> Option<&PropertySchema> {
        self.property(name).or_else(|| {
            self.properties
                .iter()
                .find(|p| p.name.eq_ignore_ascii_case(name))
        })
    }

    pub fn writable_properties(&self) -> impl Iterator<Item = &PropertySchema> {
        self.properties.iter().filter(|p| p.writable)
    }

    /// Checks the identity and property-name invariants a schema set relies on.
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(ModelError::EmptyTypeId);
        }
        let mut seen = BTreeSet::new();
        for property in &self.properties {
            if property.name.trim().is_empty() {
                return Err(ModelError::BlankName { what: "property" });
            }
            if !seen.insert(property.name.as_str()) {
                return Err(ModelError::DuplicateProperty {
                    type_id: self.id.clone(),
                    property: property.name.clone(),
                });
            }
        }
        Ok(())
    }
}
