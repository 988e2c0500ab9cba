//! Data model for mapping plan resolution.
//!
//! Schemas, type references and overrides go in; [`MappingPlan`]s and
//! [`Diagnostic`]s come out. Nothing here performs resolution.

pub mod descriptor;
pub mod diagnostic;
pub mod error;
pub mod ids;
pub mod options;
pub mod overrides;
pub mod plan;
pub mod schema;
pub mod type_ref;

pub use descriptor::{NumericKind, PrimitiveKind, TypeDescriptor};
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use error::{ModelError, Result};
pub use ids::{ConverterId, PlanKey, TypeId};
pub use options::{DiagnosticMode, NameMatching, ResolveOptions};
pub use overrides::{ConverterSignature, PairOverrides, PropertyOverride, PropertyOverrides};
pub use plan::{MappingKind, MappingPlan, PlanSet, PropertyMapping};
pub use schema::{PropertySchema, TypeSchema};
pub use type_ref::TypeRef;
