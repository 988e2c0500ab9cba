use thiserror::Error;

use crate::ids::{PlanKey, TypeId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("type id must not be empty")]
    EmptyTypeId,
    #[error("{what} name must not be blank")]
    BlankName { what: &'static str },
    #[error("invalid type reference '{input}': {reason}")]
    InvalidTypeRef { input: String, reason: String },
    #[error("schema for '{0}' is already registered")]
    DuplicateSchema(TypeId),
    #[error("type '{type_id}' declares property '{property}' more than once")]
    DuplicateProperty { type_id: TypeId, property: String },
    #[error("{kind} override already set for property '{property}' of {pair}")]
    DuplicateOverride {
        pair: PlanKey,
        property: String,
        kind: &'static str,
    },
    #[error("converter '{0}' is already registered")]
    DuplicateConverter(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
