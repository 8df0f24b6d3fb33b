//! Error types for decoder configuration and frame handling

use crate::reed_solomon::RsError;
use thiserror::Error;

/// Errors that reject a decoder configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Interleaving depth must be at least one
    #[error("Number of interleaved codewords must be positive")]
    ZeroCodewords,

    /// Interleaving depth above the supported maximum
    #[error("Interleaving depth {depth} exceeds maximum {max}")]
    TooManyCodewords { depth: usize, max: usize },

    /// Field exponent without a code definition
    #[error("Unsupported basis {0}: expected a field exponent in 3..=8")]
    UnsupportedBasis(u32),

    /// Dual basis requested for a field other than GF(2^8)
    #[error("Dual basis is only defined for basis 8, got basis {0}")]
    DualBasisUnsupported(u32),

    /// Stream codeword length cannot hold data and parity
    #[error("Codeword length {len} outside {min}..={max}")]
    CodewordLength { len: usize, min: usize, max: usize },

    /// Code construction failed
    #[error("Reed-Solomon code: {0}")]
    Code(#[from] RsError),
}

/// Errors for one interleaved frame
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    /// Frame length is not a multiple of the interleaving depth
    #[error("Frame length {len} is not a multiple of {depth} codewords")]
    NotInterleaved { len: usize, depth: usize },

    /// Per-codeword length cannot be a codeword of this code
    #[error("Codeword length {len} outside {min}..={max}")]
    CodewordLength { len: usize, min: usize, max: usize },

    /// Payload length cannot be split into data blocks
    #[error("Payload length {len} does not split into {depth} blocks of 1..={max} bytes")]
    PayloadLength { len: usize, depth: usize, max: usize },

    /// At least one codeword exceeded its correction capacity
    #[error("{failed} of {total} codewords uncorrectable")]
    Uncorrectable { failed: usize, total: usize },

    /// Codec failure while encoding
    #[error("Reed-Solomon code: {0}")]
    Code(#[from] RsError),
}

/// Type alias for Result with FrameError
pub type Result<T> = std::result::Result<T, FrameError>;
