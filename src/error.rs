//! Error type shared by every event computation.
//!
//! Searches that exhaust their horizon and bodies that never cross the
//! horizon are reported through result statuses, not through this type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AstroError {
    /// The satellite element set could not be parsed.
    #[error("malformed element set: {0}")]
    MalformedElements(String),

    /// SGP4 propagation failed for the requested instant (decayed orbit, epoch too far away).
    #[error("satellite propagation failed: {0}")]
    Propagation(String),

    /// SOFA rejected the observed-place computation for a star.
    #[error("star position failed: {0}")]
    StarPosition(String),

    /// An instant that cannot be represented as a calendar timestamp.
    #[error("instant out of range: {0} s")]
    TimeOutOfRange(f64),

    /// Observer configuration could not be read.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AstroError>;
