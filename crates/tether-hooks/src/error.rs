use thiserror::Error;

/// Failure reported by a [`crate::TitleTarget`].
#[derive(Debug, Error)]
pub enum TitleError {
    #[error("title target is unavailable")]
    Unavailable,
    #[error("title rejected: {0}")]
    Rejected(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
