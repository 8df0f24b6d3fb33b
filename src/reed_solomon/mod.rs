//! Reed-Solomon Error Correction Module
//!
//! This module provides the per-codeword Reed-Solomon codes used by the
//! interleaved decoder: GF(2^m) arithmetic, a systematic encoder, an
//! error-correcting decoder and the CCSDS dual-basis representation.

pub mod codec;
pub mod dual_basis;
pub mod error;
pub mod galois;
pub mod params;

pub use codec::ReedSolomon;
pub use dual_basis::DualBasisCodec;
pub use error::{RsError, RsResult};
pub use galois::GaloisField;
pub use params::CodeParams;

/// A Reed-Solomon code as seen by the frame decoder
///
/// Implemented by the conventional codec and by the dual-basis wrapper,
/// so the decoder can pick the symbol representation at configuration
/// time.
pub trait BlockCode: Send + Sync + std::fmt::Debug {
    /// Parameters of the underlying code
    fn params(&self) -> &CodeParams;

    /// Compute parity symbols for up to k data symbols
    fn encode(&self, data: &[u8]) -> RsResult<Vec<u8>>;

    /// Correct a codeword in place, returning the corrected symbol count
    fn decode(&self, codeword: &mut [u8]) -> RsResult<usize>;
}
