//! Mapping plan resolution.
//!
//! Given a source and a destination record schema, resolve which
//! destination properties are populated from which source properties and
//! how: direct assignment, numeric conversion, a registered converter, or
//! recursion into nested record and collection plans.
//!
//! ```
//! use mapplan_map::{MappingCatalog, Planner};
//! use mapplan_model::{MappingKind, PropertySchema, ResolveOptions, TypeRef, TypeSchema};
//!
//! let mut catalog = MappingCatalog::new();
//! catalog
//!     .add_schema(TypeSchema::new("Person").with_property(PropertySchema::new("Age", TypeRef::named("Int32"))))
//!     .unwrap()
//!     .add_schema(TypeSchema::new("PersonDto").with_property(PropertySchema::new("Age", TypeRef::named("Int64"))))
//!     .unwrap();
//!
//! let plans = Planner::new(&catalog, ResolveOptions::default()).plan("Person", "PersonDto");
//! assert_eq!(plans.root_plan().unwrap().mappings[0].kind, MappingKind::NumericWiden);
//! ```

#![deny(unsafe_code)]

pub mod catalog;
pub mod classify;
pub mod compat;
pub mod correspondence;
pub mod planner;
pub mod provider;
pub mod repository;
pub mod session;

pub use catalog::{MappingCatalog, PairConfig};
pub use classify::{Classifier, classify};
pub use compat::{Compatibility, evaluate_types};
pub use correspondence::{Correspondence, SourceMatch, resolve};
pub use planner::Planner;
pub use provider::{
    ConverterRegistry, MappingDeclarations, OverrideProvider, ResolutionInputs, SchemaProvider,
};
pub use repository::{
    CatalogDocument, ConverterDocument, MappingDocument, OverrideDocument, PropertyDocument,
    TypeDocument, load_catalog, load_document, save_document,
};
pub use session::PlanSession;
