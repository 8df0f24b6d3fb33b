//! Code parameters for the supported Reed-Solomon codes

use super::error::{RsError, RsResult};
use super::galois::{MAX_SYMSIZE, MIN_SYMSIZE};

/// CCSDS GF(2^8) field polynomial: x⁸ + x⁷ + x² + x + 1
pub const CCSDS_GFPOLY: u32 = 0x187;
/// CCSDS first consecutive root
pub const CCSDS_FCR: usize = 112;
/// CCSDS primitive element used for the generator roots
pub const CCSDS_PRIM: usize = 11;
/// CCSDS RS(255,223) parity symbols
pub const CCSDS_NROOTS: usize = 32;

/// Parameters of a Reed-Solomon code over GF(2^symsize)
///
/// The generator polynomial has the `nroots` roots
/// `α^(prim·(fcr+i))` for `i` in `0..nroots`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeParams {
    /// Bits per symbol
    pub symsize: u32,
    /// Field generator polynomial
    pub gfpoly: u32,
    /// First consecutive root, as a power of the primitive element
    pub fcr: usize,
    /// Primitive element index used to step between roots
    pub prim: usize,
    /// Number of parity symbols
    pub nroots: usize,
}

impl CodeParams {
    /// CCSDS RS(255,223), conventional basis
    pub const fn ccsds() -> Self {
        Self {
            symsize: 8,
            gfpoly: CCSDS_GFPOLY,
            fcr: CCSDS_FCR,
            prim: CCSDS_PRIM,
            nroots: CCSDS_NROOTS,
        }
    }

    /// Default code for a field exponent.
    ///
    /// Basis 8 selects the CCSDS RS(255,223) code; smaller fields use a
    /// narrow-sense code with `fcr = prim = 1`.
    pub fn for_basis(basis: u32) -> RsResult<Self> {
        let (gfpoly, nroots) = match basis {
            3 => (0x0b, 2),
            4 => (0x13, 4),
            5 => (0x25, 4),
            6 => (0x43, 8),
            7 => (0x89, 16),
            8 => return Ok(Self::ccsds()),
            _ => return Err(RsError::UnsupportedSymbolSize(basis)),
        };
        Ok(Self {
            symsize: basis,
            gfpoly,
            fcr: 1,
            prim: 1,
            nroots,
        })
    }

    /// Full codeword length n = 2^symsize - 1
    pub fn n(&self) -> usize {
        (1usize << self.symsize) - 1
    }

    /// Full message length k = n - nroots
    pub fn k(&self) -> usize {
        self.n() - self.nroots
    }

    /// Correctable symbol errors per codeword
    pub fn t(&self) -> usize {
        self.nroots / 2
    }

    /// Check the parameters against each other.
    ///
    /// `prim` must be coprime with n so the generator roots are distinct.
    pub fn validate(&self) -> RsResult<()> {
        if !(MIN_SYMSIZE..=MAX_SYMSIZE).contains(&self.symsize) {
            return Err(RsError::UnsupportedSymbolSize(self.symsize));
        }
        let n = self.n();
        if self.nroots == 0 || self.nroots >= n {
            return Err(RsError::InvalidParameters(format!(
                "nroots {} must be in 1..{}",
                self.nroots, n
            )));
        }
        if self.fcr >= n {
            return Err(RsError::InvalidParameters(format!(
                "fcr {} must be below {}",
                self.fcr, n
            )));
        }
        if self.prim == 0 || self.prim >= n || gcd(self.prim, n) != 1 {
            return Err(RsError::InvalidParameters(format!(
                "prim {} must be coprime with {}",
                self.prim, n
            )));
        }
        Ok(())
    }
}

/// GCD function as used for the primitive element check
pub fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}
