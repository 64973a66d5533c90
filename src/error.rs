// src/error.rs

use thiserror::Error;

/// Failure signals of the numeric core. All of these are deterministic
/// functions of the caller's input and are surfaced synchronously.
#[derive(Debug, Error)]
pub enum PredictorError {
    /// A value left the domain a formula is defined on, e.g. a flat data
    /// range (`high == low`) or a squashed output at exactly 0 or 1.
    #[error("numeric domain error: {0}")]
    NumericDomain(String),

    /// A sample window is too small to build the network, or a prediction
    /// window does not match the network's configured input length.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),
}
