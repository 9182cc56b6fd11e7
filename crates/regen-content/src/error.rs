//! Error types for regen-content

/// Result type for regen-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in regen-content operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Malformed anchor footer: {reason}")]
    MalformedFooter { reason: String },
}

impl Error {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedFooter {
            reason: reason.into(),
        }
    }
}
