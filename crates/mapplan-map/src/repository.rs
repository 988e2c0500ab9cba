//! JSON catalog documents.
//!
//! A catalog document is the on-disk form of a [`MappingCatalog`]: enum
//! names, record types with textual type references, converter signatures
//! and mapping declarations with their per-property overrides.
//!
//! ```json
//! {
//!   "enums": ["Status"],
//!   "types": [
//!     { "id": "Order", "properties": [
//!       { "name": "Items", "type": "List<OrderItem>" },
//!       { "name": "Total", "type": "decimal", "writable": false }
//!     ] }
//!   ],
//!   "converters": [{ "id": "DateToText", "input": "DateTime", "output": "String" }],
//!   "mappings": [
//!     { "source": "Order", "dest": "OrderDto", "bidirectional": false,
//!       "overrides": [{ "property": "Placed", "convert": "DateToText" }] }
//!   ]
//! }
//! ```
//!
//! Bare names that match a declared enum or type become
//! [`TypeRef::Enum`] / [`TypeRef::Record`] when the document is turned into
//! a catalog; everything else is classified by name.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use mapplan_model::{PropertySchema, TypeId, TypeRef, TypeSchema};

use crate::catalog::MappingCatalog;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enums: Vec<String>,
    #[serde(default)]
    pub types: Vec<TypeDocument>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub converters: Vec<ConverterDocument>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mappings: Vec<MappingDocument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDocument {
    pub id: String,
    #[serde(default)]
    pub properties: Vec<PropertyDocument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDocument {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default = "enabled")]
    pub readable: bool,
    #[serde(default = "enabled")]
    pub writable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConverterDocument {
    pub id: String,
    pub input: String,
    pub output: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingDocument {
    pub source: String,
    pub dest: String,
    /// Also declare `dest -> source`. Overrides still apply to `source -> dest` only.
    #[serde(default)]
    pub bidirectional: bool,
    /// When false the entry only carries overrides and is not a root pair.
    #[serde(default = "enabled")]
    pub declared: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overrides: Vec<OverrideDocument>,
}

/// Overrides for one destination property. Any combination may be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideDocument {
    pub property: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rename: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub ignore: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub convert: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<String>,
}

fn enabled() -> bool {
    true
}

impl CatalogDocument {
    /// Builds the in-memory catalog, resolving enum and record names.
    pub fn into_catalog(self) -> Result<MappingCatalog> {
        let enums: BTreeSet<&str> = self.enums.iter().map(String::as_str).collect();
        let records: BTreeSet<&str> = self.types.iter().map(|t| t.id.as_str()).collect();
        if let Some(clash) = enums.intersection(&records).next() {
            bail!("`{clash}` is declared both as an enum and as a type");
        }
        let named = |name: &str| {
            if enums.contains(name) {
                Some(TypeRef::enumeration(name))
            } else if records.contains(name) {
                Some(TypeRef::record(name))
            } else {
                None
            }
        };
        let parse = |text: &str| -> Result<TypeRef> {
            let parsed: TypeRef = text.parse()?;
            Ok(parsed.resolve_names(&named))
        };

        let mut catalog = MappingCatalog::new();
        for ty in &self.types {
            let mut schema = TypeSchema::new(TypeId::new(ty.id.as_str()));
            for property in &ty.properties {
                let parsed = parse(&property.ty).with_context(|| {
                    format!("type of property `{}` on `{}`", property.name, ty.id)
                })?;
                schema.properties.push(PropertySchema {
                    name: property.name.clone(),
                    ty: parsed,
                    readable: property.readable,
                    writable: property.writable,
                });
            }
            catalog
                .add_schema(schema)
                .with_context(|| format!("register type `{}`", ty.id))?;
        }

        for converter in &self.converters {
            let input = parse(&converter.input)
                .with_context(|| format!("input type of converter `{}`", converter.id))?;
            let output = parse(&converter.output)
                .with_context(|| format!("output type of converter `{}`", converter.id))?;
            catalog
                .add_converter(converter.id.as_str(), input, output)
                .with_context(|| format!("register converter `{}`", converter.id))?;
        }

        for mapping in &self.mappings {
            apply_mapping(&mut catalog, mapping)
                .with_context(|| format!("mapping `{}` -> `{}`", mapping.source, mapping.dest))?;
        }
        Ok(catalog)
    }
}

fn apply_mapping(catalog: &mut MappingCatalog, mapping: &MappingDocument) -> Result<()> {
    let mut config = catalog.configure(mapping.source.as_str(), mapping.dest.as_str());
    for entry in &mapping.overrides {
        let property = entry.property.as_str();
        if let Some(source) = &entry.rename {
            config.rename(property, source)?;
        }
        if entry.ignore {
            config.ignore(property)?;
        }
        if let Some(converter) = &entry.convert {
            config.convert(property, converter)?;
        }
        if let Some(condition) = &entry.when {
            config.when(property, condition)?;
        }
    }
    if mapping.declared {
        if mapping.bidirectional {
            catalog.declare_bidirectional(mapping.source.as_str(), mapping.dest.as_str());
        } else {
            catalog.declare(mapping.source.as_str(), mapping.dest.as_str());
        }
    }
    Ok(())
}

/// Reads a catalog document from a JSON file.
pub fn load_document(path: &Path) -> Result<CatalogDocument> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("read catalog {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parse catalog {}", path.display()))
}

/// Writes a catalog document as pretty JSON, creating parent directories.
pub fn save_document(path: &Path, document: &CatalogDocument) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(document).context("serialize catalog")?;
    fs::write(path, json).with_context(|| format!("write catalog {}", path.display()))
}

/// Reads a catalog document and builds the catalog it describes.
pub fn load_catalog(path: &Path) -> Result<MappingCatalog> {
    load_document(path)?
        .into_catalog()
        .with_context(|| format!("load catalog {}", path.display()))
}
