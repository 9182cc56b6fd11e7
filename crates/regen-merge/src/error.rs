//! Error types for regen-merge

/// Result type for regen-merge operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving a regeneration merge
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Content(#[from] regen_content::Error),

    #[error("Three-way merge failed: {message}")]
    Merge { message: String },
}

impl Error {
    pub fn merge(message: impl Into<String>) -> Self {
        Self::Merge {
            message: message.into(),
        }
    }
}
