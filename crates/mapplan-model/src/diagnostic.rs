//! Notes about properties a plan leaves out or degrades.
//!
//! Resolution never fails; these are collected only when
//! [`DiagnosticMode::Collect`](crate::DiagnosticMode) is selected, and the
//! plans are the same either way.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::descriptor::NumericKind;
use crate::ids::{ConverterId, PlanKey, TypeId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub pair: PlanKey,
    /// Destination property concerned; `None` for pair-level notes.
    pub property: Option<String>,
    pub kind: DiagnosticKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// No source property has the destination property's name.
    NoCorrespondence,
    /// A rename names a source property that does not exist.
    DanglingRename { source: String },
    /// The corresponding source property has no getter.
    SourceNotReadable { source: String },
    /// Source and destination types cannot be connected.
    Incompatible { source: String },
    /// A convert override names a converter that is not registered.
    UnknownConverter { converter: ConverterId },
    /// The converter's declared types do not match the property pair.
    ConverterMismatch { converter: ConverterId },
    /// The condition property is missing, unreadable or not boolean.
    InvalidCondition { condition: String },
    /// No schema is available for a type the plan needs.
    MissingSchema { type_id: TypeId },
    /// The numeric conversion can lose range or precision.
    NarrowingConversion { from: NumericKind, to: NumericKind },
}

impl DiagnosticKind {
    /// True when the destination property is left out of the plan.
    pub fn is_omission(&self) -> bool {
        !matches!(
            self,
            DiagnosticKind::UnknownConverter { .. }
                | DiagnosticKind::ConverterMismatch { .. }
                | DiagnosticKind::InvalidCondition { .. }
                | DiagnosticKind::NarrowingConversion { .. }
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pair)?;
        if let Some(property) = &self.property {
            write!(f, " [{property}]")?;
        }
        f.write_str(": ")?;
        match &self.kind {
            DiagnosticKind::NoCorrespondence => f.write_str("no source property with this name"),
            DiagnosticKind::DanglingRename { source } => {
                write!(f, "renamed source property '{source}' does not exist")
            }
            DiagnosticKind::SourceNotReadable { source } => {
                write!(f, "source property '{source}' is not readable")
            }
            DiagnosticKind::Incompatible { source } => {
                write!(f, "source property '{source}' has an incompatible type")
            }
            DiagnosticKind::UnknownConverter { converter } => {
                write!(f, "converter '{converter}' is not registered; override ignored")
            }
            DiagnosticKind::ConverterMismatch { converter } => {
                write!(f, "converter '{converter}' does not fit the property types; override ignored")
            }
            DiagnosticKind::InvalidCondition { condition } => {
                write!(f, "condition '{condition}' is not a readable boolean source property; mapped unconditionally")
            }
            DiagnosticKind::MissingSchema { type_id } => {
                write!(f, "no schema available for '{type_id}'")
            }
            DiagnosticKind::NarrowingConversion { from, to } => write!(
                f,
                "numeric conversion {} -> {} may lose range or precision",
                from.as_str(),
                to.as_str()
            ),
        }
    }
}
