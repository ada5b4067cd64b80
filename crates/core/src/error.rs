use std::collections::BTreeMap;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Several named form fields failed validation at once.
    #[error("Validation failed for {} field(s)", .0.len())]
    InvalidFields(BTreeMap<String, String>),

    #[error("Internal error: {0}")]
    Internal(String),
}
