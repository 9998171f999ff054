//! Error types returned by filter construction, parameter calculation and
//! filter operations.

use thiserror::Error;

/// Errors that can occur when sizing, building or using a [`Bloom`] filter.
///
/// [`Bloom`]: crate::Bloom
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BloomError {
    #[error("bit array size cannot be less than 64: {size}")]
    SizeTooSmall { size: usize },

    #[error("no hash function is defined")]
    NoHashFunctions,

    #[error("expected item count must be greater than zero")]
    InvalidItemCount,

    #[error("invalid false positive rate: {rate} (must be between 0 and 1, exclusive)")]
    InvalidFalsePositiveRate { rate: f64 },
}
