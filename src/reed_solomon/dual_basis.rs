//! CCSDS dual-basis symbol representation
//!
//! CCSDS telemetry transmits RS(255,223) symbols in Berlekamp's dual
//! basis. Decoding converts every received byte to the conventional
//! basis, runs the ordinary codec and converts back.

use super::codec::ReedSolomon;
use super::error::{RsError, RsResult};
use super::params::CodeParams;
use super::BlockCode;
use std::sync::OnceLock;

/// Rows of the conventional-to-dual transformation matrix
const TAL: [u8; 8] = [0x8d, 0xef, 0xec, 0x86, 0xfa, 0x99, 0xaf, 0x7b];

/// Conversion tables in both directions
pub struct DualBasisTables {
    /// conventional → dual
    pub to_dual: [u8; 256],
    /// dual → conventional
    pub to_conventional: [u8; 256],
}

impl DualBasisTables {
    fn new() -> Self {
        let mut to_dual = [0u8; 256];
        let mut to_conventional = [0u8; 256];
        for value in 0..256usize {
            let mut dual = 0u8;
            for bit in 0..8 {
                if value & (1 << bit) != 0 {
                    dual ^= TAL[7 - bit];
                }
            }
            to_dual[value] = dual;
            to_conventional[dual as usize] = value as u8;
        }
        Self {
            to_dual,
            to_conventional,
        }
    }
}

/// Global conversion tables
pub fn dual_basis_tables() -> &'static DualBasisTables {
    static TABLES: OnceLock<DualBasisTables> = OnceLock::new();
    TABLES.get_or_init(DualBasisTables::new)
}

#[inline]
pub fn to_dual(conventional: u8) -> u8 {
    dual_basis_tables().to_dual[conventional as usize]
}

#[inline]
pub fn to_conventional(dual: u8) -> u8 {
    dual_basis_tables().to_conventional[dual as usize]
}

/// CCSDS RS(255,223) codec operating on dual-basis symbols
#[derive(Debug, Clone)]
pub struct DualBasisCodec {
    inner: ReedSolomon,
}

impl DualBasisCodec {
    /// CCSDS RS(255,223) in the dual basis
    pub fn new() -> RsResult<Self> {
        Self::with_params(CodeParams::ccsds())
    }

    /// Dual basis is only defined for GF(2^8) codes
    pub fn with_params(params: CodeParams) -> RsResult<Self> {
        if params.symsize != 8 {
            return Err(RsError::InvalidParameters(format!(
                "dual basis requires 8-bit symbols, got {}",
                params.symsize
            )));
        }
        Ok(Self {
            inner: ReedSolomon::new(params)?,
        })
    }
}

impl BlockCode for DualBasisCodec {
    fn params(&self) -> &CodeParams {
        self.inner.params()
    }

    fn encode(&self, data: &[u8]) -> RsResult<Vec<u8>> {
        let conventional: Vec<u8> = data.iter().map(|&b| to_conventional(b)).collect();
        let mut parity = self.inner.encode_parity(&conventional)?;
        parity.iter_mut().for_each(|b| *b = to_dual(*b));
        Ok(parity)
    }

    fn decode(&self, codeword: &mut [u8]) -> RsResult<usize> {
        let mut conventional: Vec<u8> = codeword.iter().map(|&b| to_conventional(b)).collect();
        let corrected = self.inner.decode(&mut conventional)?;
        for (out, &b) in codeword.iter_mut().zip(&conventional) {
            *out = to_dual(b);
        }
        Ok(corrected)
    }
}
