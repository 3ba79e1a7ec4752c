//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.

use std::fmt;

use crate::cms::CmsError;

#[derive(Debug)]
pub enum ContentError {
    /// Record not found in the requested locale
    NotFound,
    /// Validation error with message
    Validation(String),
    /// CMS failure or unusable CMS payload
    Upstream(String),
    /// Generic internal error
    Internal(String),
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentError::NotFound => write!(f, "Record not found"),
            ContentError::Validation(msg) => write!(f, "Validation error: {}", msg),
            ContentError::Upstream(msg) => write!(f, "Content source error: {}", msg),
            ContentError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ContentError {}

// Conversion from CMS client errors (used in the services layer)
impl From<CmsError> for ContentError {
    fn from(e: CmsError) -> Self {
        ContentError::Upstream(e.to_string())
    }
}
