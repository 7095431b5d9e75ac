use thiserror::Error;

/// Errors surfaced by registry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("type name must not be empty")]
    EmptyTypeName,
    #[error("no handler registered for type `{type_name}`")]
    NotFound { type_name: String },
}

impl RegistryError {
    pub fn not_found(type_name: impl Into<String>) -> Self {
        RegistryError::NotFound {
            type_name: type_name.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RegistryError::NotFound { .. })
    }
}
