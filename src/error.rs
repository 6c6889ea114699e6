//! Error handling and custom error types
//!
//! Provides unified error handling across the application using thiserror.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Text backend failure: {0}")]
    UpstreamFailure(String),

    #[error("Paragraph is {length} characters, below the 450-character minimum")]
    LengthViolation { length: usize },

    #[error("Image backend failure: {0}")]
    ImageBackend(String),

    #[error("Generic error: {0}")]
    Generic(String),
}

pub type Result<T> = std::result::Result<T, Error>;
