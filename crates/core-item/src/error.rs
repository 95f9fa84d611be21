//! Errors surfaced to item callers.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ItemError {
    /// The pattern failed to compile; reported before any line is scanned.
    #[error("invalid regex pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
