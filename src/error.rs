use thiserror::Error;

use crate::validation::Validation;

/// Raised when a field's rules reject the supplied arguments.
///
/// Carries the full [`Validation`] so callers can pull out per-attribute messages.
#[derive(Error, Debug, Clone)]
#[error("Validation failed: {}", .validation.summary())]
pub struct ValidationError {
    validation: Validation,
}

impl ValidationError {
    pub fn new(validation: Validation) -> Self {
        Self { validation }
    }

    pub fn validation(&self) -> &Validation {
        &self.validation
    }

    pub fn into_validation(self) -> Validation {
        self.validation
    }
}

#[derive(Error, Debug)]
pub enum FieldError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Unknown validation rule: {0}")]
    UnknownRule(String),

    #[error("Invalid validation rule '{rule}': {reason}")]
    InvalidRule { rule: String, reason: String },

    #[error("Unknown type: {0}")]
    UnknownType(String),

    #[error("Invalid type reference: {0}")]
    InvalidTypeRef(String),

    #[error("Invalid global ID: {0}")]
    InvalidGlobalId(String),

    #[error("Field not found: {0}")]
    FieldNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Project not initialized. Run 'gqlfield init' first.")]
    NotInitialized,

    #[error("Project already initialized at {0}")]
    AlreadyInitialized(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Resolver(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, FieldError>;
