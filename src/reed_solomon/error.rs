//! Error types for Reed-Solomon coding

use thiserror::Error;

/// Errors raised while building a code or decoding a codeword
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RsError {
    /// Symbol size outside the supported range
    #[error("Unsupported symbol size: {0} bits")]
    UnsupportedSymbolSize(u32),

    /// Field polynomial does not generate the whole multiplicative group
    #[error("Polynomial {gfpoly:#x} is not primitive for GF(2^{symsize})")]
    NonPrimitivePolynomial { gfpoly: u32, symsize: u32 },

    /// Code parameters are inconsistent with the field
    #[error("Invalid code parameters: {0}")]
    InvalidParameters(String),

    /// Codeword or message length not usable with this code
    #[error("Invalid length: got {got}, expected {expected}")]
    InvalidLength { got: usize, expected: String },

    /// A byte holds a value outside the field
    #[error("Symbol {value:#x} at position {position} is outside GF(2^{symsize})")]
    SymbolOutOfRange {
        position: usize,
        value: u8,
        symsize: u32,
    },

    /// More errors than the code can correct
    #[error("Too many errors: {found} > {max}")]
    TooManyErrors { found: usize, max: usize },

    /// Chien search did not find one root per error
    #[error("Chien search found {found} roots, expected {expected}")]
    ChienSearchFailed { found: usize, expected: usize },

    /// Error located in the zero padding of a shortened codeword
    #[error("Error located in shortened region at power {0}")]
    ErrorInPadding(usize),

    /// Correction produced a word that is still not a codeword
    #[error("Error correction produced inconsistent result")]
    CorrectionFailed,
}

impl RsError {
    /// Whether the error means the received word was uncorrectable, as
    /// opposed to the caller handing in something malformed
    pub fn is_uncorrectable(&self) -> bool {
        matches!(
            self,
            RsError::TooManyErrors { .. }
                | RsError::ChienSearchFailed { .. }
                | RsError::ErrorInPadding(_)
                | RsError::CorrectionFailed
                | RsError::SymbolOutOfRange { .. }
        )
    }
}

/// Type alias for Result with RsError
pub type RsResult<T> = std::result::Result<T, RsError>;
