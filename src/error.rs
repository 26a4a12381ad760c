//! Crate-wide error taxonomy.
//!
//! Every failure the driver can surface is classified here. There are no
//! automatic retries anywhere in the crate: errors are detected, classified,
//! and returned to the caller, who may wrap the training loop in their own
//! retry policy.

/// Result alias used throughout the crate.
pub type OptResult<T> = Result<T, OptError>;

#[derive(thiserror::Error, Debug)]
pub enum OptError {
    /// Paired data containers disagree on observation count. Fatal at subset
    /// construction time.
    #[error("size mismatch: paired sources report {expected} and {got} observations")]
    SizeMismatch { expected: usize, got: usize },

    /// An index fell outside the valid bounds. Fatal for the specific call;
    /// no state is corrupted.
    #[error("index {index} out of range for length {len}")]
    OutOfRange { index: usize, len: usize },

    /// Gradient length disagrees with the parameter length an update rule has
    /// already established. Signals a caller/objective bug.
    #[error("shape mismatch: update rule expects length {expected}, gradient has length {got}")]
    ShapeMismatch { expected: usize, got: usize },

    /// The external objective failed while computing a value or gradient.
    #[error("objective error: {0}")]
    Objective(String),

    /// A training configuration could not be parsed or named an unknown
    /// algorithm.
    #[error("invalid configuration: {0}")]
    Config(String),
}
