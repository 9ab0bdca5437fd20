#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Resource already exists: {0}")]
    AlreadyExists(String),
}
