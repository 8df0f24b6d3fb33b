//! Galois Field GF(2^m) arithmetic for Reed-Solomon operations
//!
//! Fields from GF(2^3) up to GF(2^8) are supported, one symbol per byte.
//! Arithmetic uses logarithm/antilogarithm tables built from a primitive
//! field polynomial. The antilog table is doubled so that products never
//! need a modulo reduction.
//!
//! ## Field polynomials
//!
//! - **GF(2^8) CCSDS**: 0x187 (x⁸ + x⁷ + x² + x + 1)
//! - **GF(2^8) conventional**: 0x11D (x⁸ + x⁴ + x³ + x² + 1)
//!
//! The smaller fields use the usual low-weight primitive trinomials, see
//! [`super::params::CodeParams::for_basis`].

use super::error::{RsError, RsResult};

/// Smallest supported symbol size in bits
pub const MIN_SYMSIZE: u32 = 3;
/// Largest supported symbol size in bits (one symbol per byte)
pub const MAX_SYMSIZE: u32 = 8;

/// Precomputed logarithm and exponential tables for GF(2^m)
#[derive(Clone)]
pub struct GaloisField {
    symsize: u32,
    gfpoly: u32,
    log_table: Vec<u16>,
    exp_table: Vec<u8>, // 2x size to avoid modulo in products
}

impl GaloisField {
    /// Build the tables for GF(2^symsize) generated by `gfpoly`.
    ///
    /// Fails if the symbol size is unsupported or if `gfpoly` is not
    /// primitive (the powers of x do not cycle through every non-zero
    /// element).
    pub fn new(symsize: u32, gfpoly: u32) -> RsResult<Self> {
        if !(MIN_SYMSIZE..=MAX_SYMSIZE).contains(&symsize) {
            return Err(RsError::UnsupportedSymbolSize(symsize));
        }
        if gfpoly >> symsize != 1 {
            return Err(RsError::NonPrimitivePolynomial { gfpoly, symsize });
        }

        let count = 1usize << symsize;
        let limit = count - 1;
        let mut gf = GaloisField {
            symsize,
            gfpoly,
            log_table: vec![0; count],
            exp_table: vec![0; 2 * limit],
        };

        let mut value = 1u32;
        for i in 0..limit {
            if i > 0 && value == 1 {
                // Cycle closed early: polynomial is not primitive
                return Err(RsError::NonPrimitivePolynomial { gfpoly, symsize });
            }
            gf.exp_table[i] = value as u8;
            gf.log_table[value as usize] = i as u16;

            value <<= 1;
            if value & count as u32 != 0 {
                value ^= gfpoly;
            }
        }
        if value != 1 {
            return Err(RsError::NonPrimitivePolynomial { gfpoly, symsize });
        }

        for i in limit..2 * limit {
            gf.exp_table[i] = gf.exp_table[i - limit];
        }

        // log(0) is undefined; mark it with the field order
        gf.log_table[0] = limit as u16;
        Ok(gf)
    }

    /// Symbol size in bits
    pub fn symsize(&self) -> u32 {
        self.symsize
    }

    /// Field polynomial used to build the tables
    pub fn gfpoly(&self) -> u32 {
        self.gfpoly
    }

    /// Number of non-zero elements, which is also the full codeword length
    #[inline]
    pub fn order(&self) -> usize {
        (1usize << self.symsize) - 1
    }

    /// Whether `symbol` is an element of the field
    #[inline]
    pub fn contains(&self, symbol: u8) -> bool {
        (symbol as usize) <= self.order()
    }

    /// Reduce an exponent modulo the field order
    #[inline]
    pub fn modnn(&self, x: usize) -> usize {
        x % self.order()
    }

    /// α^power
    #[inline]
    pub fn exp(&self, power: usize) -> u8 {
        self.exp_table[self.modnn(power)]
    }

    /// Discrete logarithm of a non-zero element
    #[inline]
    pub fn log(&self, a: u8) -> usize {
        debug_assert!(a != 0, "log of zero in Galois Field");
        self.log_table[a as usize] as usize
    }

    /// Add two elements - this is just XOR
    #[inline]
    pub fn add(&self, a: u8, b: u8) -> u8 {
        a ^ b
    }

    /// Multiply two elements
    #[inline]
    pub fn mul(&self, a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        let log_a = self.log_table[a as usize] as usize;
        let log_b = self.log_table[b as usize] as usize;
        self.exp_table[log_a + log_b]
    }

    /// Divide `a` by a non-zero `b`
    #[inline]
    pub fn div(&self, a: u8, b: u8) -> u8 {
        assert!(b != 0, "Division by zero in Galois Field");
        if a == 0 {
            return 0;
        }
        let log_a = self.log_table[a as usize] as usize;
        let log_b = self.log_table[b as usize] as usize;
        self.exp_table[log_a + self.order() - log_b]
    }

    /// Raise an element to a power
    #[inline]
    pub fn pow(&self, base: u8, exponent: usize) -> u8 {
        if exponent == 0 {
            return 1;
        }
        if base == 0 {
            return 0;
        }
        let log_base = self.log_table[base as usize] as usize;
        self.exp_table[(log_base * exponent) % self.order()]
    }

    /// Multiplicative inverse of a non-zero element
    #[inline]
    pub fn inverse(&self, a: u8) -> u8 {
        assert!(a != 0, "Cannot invert zero in Galois Field");
        let log_a = self.log_table[a as usize] as usize;
        self.exp_table[self.order() - log_a]
    }

    /// Evaluate a polynomial stored lowest degree first
    pub fn eval_poly(&self, poly: &[u8], x: u8) -> u8 {
        poly.iter()
            .rev()
            .fold(0u8, |acc, &coeff| self.mul(acc, x) ^ coeff)
    }
}

impl std::fmt::Debug for GaloisField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GaloisField")
            .field("symsize", &self.symsize)
            .field("gfpoly", &format_args!("{:#x}", self.gfpoly))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_galois_field_basic_operations() {
        let gf = GaloisField::new(8, 0x11D).unwrap();

        assert_eq!(gf.add(5, 3), 5 ^ 3);

        // Multiplicative identity
        assert_eq!(gf.mul(1, 42), 42);
        assert_eq!(gf.mul(42, 1), 42);

        for a in 1..=255u8 {
            assert_eq!(gf.mul(a, gf.inverse(a)), 1, "Failed for a = {}", a);
        }
    }

    #[test]
    fn test_conventional_gf256_wraps() {
        let gf = GaloisField::new(8, 0x11D).unwrap();
        assert_eq!(gf.exp(0), 1);
        assert_eq!(gf.exp(1), 2);
        // x^8 mod (x^8+x^4+x^3+x^2+1) = x^4+x^3+x^2+1
        assert_eq!(gf.exp(8), 0x1D);
        assert_eq!(gf.exp(255), 1);
    }

    #[test]
    fn test_galois_field_division() {
        let gf = GaloisField::new(8, 0x187).unwrap();
        for a in 1..20u8 {
            for b in 1..20u8 {
                let quotient = gf.div(a, b);
                assert_eq!(gf.mul(quotient, b), a, "Failed for a = {}, b = {}", a, b);
            }
        }
    }

    #[test]
    fn test_small_field_tables() {
        let gf = GaloisField::new(4, 0x13).unwrap();
        assert_eq!(gf.order(), 15);
        assert!(gf.contains(15));
        assert!(!gf.contains(16));
        assert_eq!(gf.exp(4), 0x3); // x^4 = x + 1
        assert_eq!(gf.pow(2, 15), 1);
    }

    #[test]
    fn test_rejects_non_primitive_polynomial() {
        // x^4 + x^3 + x^2 + x + 1 is irreducible but has order 5
        assert!(matches!(
            GaloisField::new(4, 0x1F),
            Err(RsError::NonPrimitivePolynomial { .. })
        ));
        // Degree does not match the symbol size
        assert!(GaloisField::new(8, 0x13).is_err());
    }

    #[test]
    fn test_rejects_unsupported_symbol_size() {
        assert!(matches!(
            GaloisField::new(2, 0x7),
            Err(RsError::UnsupportedSymbolSize(2))
        ));
        assert!(GaloisField::new(9, 0x211).is_err());
    }

    #[test]
    fn test_eval_poly() {
        let gf = GaloisField::new(8, 0x11D).unwrap();
        // p(x) = 1 + x, p(1) = 0 in characteristic 2
        assert_eq!(gf.eval_poly(&[1, 1], 1), 0);
        assert_eq!(gf.eval_poly(&[7], 99), 7);
        assert_eq!(gf.eval_poly(&[0, 1], 5), 5);
    }
}
