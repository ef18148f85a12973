use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("The given blueprint already exists: {0}")]
    AlreadyExists(String),

    #[error("Blueprint not found: {author}/{name}")]
    BlueprintNotFound { author: String, name: String },

    #[error("No blueprints found for author: {0}")]
    AuthorNotFound(String),

    #[error("Invalid blueprint: {0}")]
    InvalidBlueprint(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl StoreError {
    /// True for both the key lookup miss and the empty author query
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::BlueprintNotFound { .. } | StoreError::AuthorNotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
