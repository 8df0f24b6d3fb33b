//! Systematic Reed-Solomon encoder and decoder
//!
//! Codewords are stored highest degree first: byte 0 is the coefficient
//! of x^(len-1), data symbols come before the `nroots` parity symbols.
//! Shortened codewords (`len < n`) behave as if the missing leading
//! symbols were zero.
//!
//! Decoding follows the classic chain:
//!
//! 1. syndromes `S_i = r(α^(prim·(fcr+i)))`
//! 2. Berlekamp-Massey for the error locator Λ(x)
//! 3. Chien search over every power of α
//! 4. Forney for the error magnitudes
//! 5. syndrome re-check of the corrected word

use super::error::{RsError, RsResult};
use super::galois::GaloisField;
use super::params::CodeParams;
use super::BlockCode;
use smallvec::SmallVec;

/// Error positions for one codeword; t is at most 16 for the CCSDS code
type Corrections = SmallVec<[(usize, u8); 16]>;

/// Reed-Solomon encoder and decoder over GF(2^m)
#[derive(Debug, Clone)]
pub struct ReedSolomon {
    params: CodeParams,
    gf: GaloisField,
    /// Generator polynomial coefficients, highest degree first (monic)
    generator: Vec<u8>,
}

impl ReedSolomon {
    /// Create a codec for the given parameters
    pub fn new(params: CodeParams) -> RsResult<Self> {
        params.validate()?;
        let gf = GaloisField::new(params.symsize, params.gfpoly)?;
        let generator = Self::build_generator(&gf, &params);
        Ok(Self {
            params,
            gf,
            generator,
        })
    }

    /// Build `g(x) = ∏ (x - α^(prim·(fcr+i)))`
    fn build_generator(gf: &GaloisField, params: &CodeParams) -> Vec<u8> {
        let nroots = params.nroots;
        let mut gen = vec![0u8; nroots + 1];
        gen[nroots] = 1;

        for i in 0..nroots {
            let root = gf.exp(params.prim * (params.fcr + i));
            let mut next = vec![0u8; nroots + 1];
            for j in 0..=nroots {
                if gen[j] != 0 {
                    if j > 0 {
                        next[j - 1] ^= gen[j];
                    }
                    next[j] ^= gf.mul(gen[j], root);
                }
            }
            gen = next;
        }

        gen
    }

    /// Field the code operates over
    pub fn field(&self) -> &GaloisField {
        &self.gf
    }

    /// Generator polynomial, highest degree first
    pub fn generator(&self) -> &[u8] {
        &self.generator
    }

    fn check_symbols(&self, symbols: &[u8]) -> RsResult<()> {
        match symbols.iter().position(|&s| !self.gf.contains(s)) {
            Some(position) => Err(RsError::SymbolOutOfRange {
                position,
                value: symbols[position],
                symsize: self.params.symsize,
            }),
            None => Ok(()),
        }
    }

    fn check_codeword_len(&self, len: usize) -> RsResult<()> {
        let n = self.params.n();
        if len <= self.params.nroots || len > n {
            return Err(RsError::InvalidLength {
                got: len,
                expected: format!("{}..={}", self.params.nroots + 1, n),
            });
        }
        Ok(())
    }

    /// Compute the parity symbols for `data` (at most k symbols).
    pub fn encode_parity(&self, data: &[u8]) -> RsResult<Vec<u8>> {
        if data.is_empty() || data.len() > self.params.k() {
            return Err(RsError::InvalidLength {
                got: data.len(),
                expected: format!("1..={}", self.params.k()),
            });
        }
        self.check_symbols(data)?;

        let nroots = self.params.nroots;
        let mut remainder = vec![0u8; nroots];
        for &symbol in data {
            let feedback = symbol ^ remainder[0];
            remainder.copy_within(1.., 0);
            remainder[nroots - 1] = 0;
            if feedback != 0 {
                for (r, &g) in remainder.iter_mut().zip(&self.generator[1..]) {
                    *r ^= self.gf.mul(feedback, g);
                }
            }
        }
        Ok(remainder)
    }

    /// Encode `data` into a full systematic codeword `data ‖ parity`
    pub fn encode_codeword(&self, data: &[u8]) -> RsResult<Vec<u8>> {
        let parity = self.encode_parity(data)?;
        let mut codeword = Vec::with_capacity(data.len() + parity.len());
        codeword.extend_from_slice(data);
        codeword.extend_from_slice(&parity);
        Ok(codeword)
    }

    /// Syndromes of a received word, lowest index first
    fn syndromes(&self, received: &[u8]) -> Vec<u8> {
        (0..self.params.nroots)
            .map(|i| {
                let root = self.gf.exp(self.params.prim * (self.params.fcr + i));
                received
                    .iter()
                    .fold(0u8, |acc, &c| self.gf.mul(acc, root) ^ c)
            })
            .collect()
    }

    /// Berlekamp-Massey: returns the error locator (lowest degree first)
    /// and the linear complexity L
    fn berlekamp_massey(&self, syndromes: &[u8]) -> (Vec<u8>, usize) {
        let nsym = syndromes.len();
        let gf = &self.gf;

        let mut c = vec![0u8; nsym + 1];
        c[0] = 1;
        let mut b = c.clone();

        let mut l = 0usize;
        let mut m = 1usize;
        let mut bb = 1u8;

        for n in 0..nsym {
            let mut d = syndromes[n];
            for i in 1..=l {
                d ^= gf.mul(c[i], syndromes[n - i]);
            }

            if d == 0 {
                m += 1;
                continue;
            }

            let coeff = gf.div(d, bb);
            let previous = c.clone();
            for i in 0..=nsym - m {
                c[i + m] ^= gf.mul(coeff, b[i]);
            }

            if 2 * l <= n {
                l = n + 1 - l;
                b = previous;
                bb = d;
                m = 1;
            } else {
                m += 1;
            }
        }

        c.truncate(l + 1);
        (c, l)
    }

    /// Locate and size the errors of a word with non-zero syndromes
    fn find_corrections(&self, len: usize, syndromes: &[u8]) -> RsResult<Corrections> {
        let gf = &self.gf;
        let n = self.params.n();
        let nroots = self.params.nroots;
        let prim = self.params.prim;

        let (sigma, errors) = self.berlekamp_massey(syndromes);
        if errors > self.params.t() {
            return Err(RsError::TooManyErrors {
                found: errors,
                max: self.params.t(),
            });
        }

        // Chien search: Λ(Z^-1) = 0 with Z = α^(prim·p) for an error at power p
        let mut powers: SmallVec<[usize; 16]> = SmallVec::new();
        for p in 0..n {
            let z_inv = gf.exp(n - (prim * p) % n);
            if gf.eval_poly(&sigma, z_inv) == 0 {
                if p >= len {
                    return Err(RsError::ErrorInPadding(p));
                }
                powers.push(p);
            }
        }
        if powers.len() != errors {
            return Err(RsError::ChienSearchFailed {
                found: powers.len(),
                expected: errors,
            });
        }

        // Error evaluator Ω(x) = S(x)·Λ(x) mod x^nroots
        let mut omega = vec![0u8; nroots];
        for (i, o) in omega.iter_mut().enumerate() {
            for (j, &s) in sigma.iter().enumerate().take(i + 1) {
                *o ^= gf.mul(s, syndromes[i - j]);
            }
        }

        let fcr = self.params.fcr as i64;
        let mut corrections = Corrections::new();
        for &p in &powers {
            let z_inv = gf.exp(n - (prim * p) % n);

            // Formal derivative keeps only the odd powers
            let mut sigma_prime = 0u8;
            for k in (1..sigma.len()).step_by(2) {
                sigma_prime ^= gf.mul(sigma[k], gf.pow(z_inv, k - 1));
            }
            if sigma_prime == 0 {
                return Err(RsError::CorrectionFailed);
            }

            // Y = Z^(1-fcr) · Ω(Z^-1) / Λ'(Z^-1)
            let factor_log = ((prim * p) as i64 * (1 - fcr)).rem_euclid(n as i64) as usize;
            let magnitude = gf.div(
                gf.mul(gf.exp(factor_log), gf.eval_poly(&omega, z_inv)),
                sigma_prime,
            );
            corrections.push((len - 1 - p, magnitude));
        }

        Ok(corrections)
    }

    /// Correct `codeword` in place.
    ///
    /// Returns the number of corrected symbols. On failure the codeword
    /// is left untouched.
    pub fn decode(&self, codeword: &mut [u8]) -> RsResult<usize> {
        self.check_codeword_len(codeword.len())?;
        self.check_symbols(codeword)?;

        let syndromes = self.syndromes(codeword);
        if syndromes.iter().all(|&s| s == 0) {
            return Ok(0);
        }

        let corrections = self.find_corrections(codeword.len(), &syndromes)?;
        for &(index, magnitude) in &corrections {
            codeword[index] ^= magnitude;
        }

        if self.syndromes(codeword).iter().any(|&s| s != 0) {
            for &(index, magnitude) in &corrections {
                codeword[index] ^= magnitude;
            }
            return Err(RsError::CorrectionFailed);
        }

        log::trace!(
            "RS({},{}) corrected {} symbols",
            codeword.len(),
            codeword.len() - self.params.nroots,
            corrections.len()
        );
        Ok(corrections.len())
    }
}

impl BlockCode for ReedSolomon {
    fn params(&self) -> &CodeParams {
        &self.params
    }

    fn encode(&self, data: &[u8]) -> RsResult<Vec<u8>> {
        self.encode_parity(data)
    }

    fn decode(&self, codeword: &mut [u8]) -> RsResult<usize> {
        ReedSolomon::decode(self, codeword)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ccsds() -> ReedSolomon {
        ReedSolomon::new(CodeParams::ccsds()).unwrap()
    }

    #[test]
    fn test_generator_is_monic() {
        let rs = ccsds();
        assert_eq!(rs.generator().len(), 33);
        assert_eq!(rs.generator()[0], 1);
    }

    #[test]
    fn test_generator_vanishes_at_roots() {
        let rs = ccsds();
        let gf = rs.field();
        let lowest_first: Vec<u8> = rs.generator().iter().rev().copied().collect();
        for i in 0..32 {
            let root = gf.exp(11 * (112 + i));
            assert_eq!(gf.eval_poly(&lowest_first, root), 0, "root {}", i);
        }
    }

    #[test]
    fn test_ccsds_generator_is_palindromic() {
        // The CCSDS roots are symmetric around α^(11·127.5)
        let rs = ccsds();
        let gen = rs.generator();
        for i in 0..gen.len() {
            assert_eq!(gen[i], gen[gen.len() - 1 - i]);
        }
    }

    #[test]
    fn test_clean_codeword_decodes() {
        let rs = ccsds();
        let data: Vec<u8> = (0..223).map(|i| (i * 7 + 3) as u8).collect();
        let mut codeword = rs.encode_codeword(&data).unwrap();
        assert_eq!(codeword.len(), 255);
        assert_eq!(rs.decode(&mut codeword), Ok(0));
        assert_eq!(&codeword[..223], &data[..]);
    }

    #[test]
    fn test_corrects_single_error() {
        let rs = ccsds();
        let data = vec![0x5Au8; 223];
        let mut codeword = rs.encode_codeword(&data).unwrap();
        codeword[10] ^= 0xFF;
        assert_eq!(rs.decode(&mut codeword), Ok(1));
        assert_eq!(&codeword[..223], &data[..]);
    }

    #[test]
    fn test_corrects_parity_error() {
        let rs = ccsds();
        let data = vec![0x11u8; 223];
        let clean = rs.encode_codeword(&data).unwrap();
        let mut codeword = clean.clone();
        codeword[254] ^= 0x01;
        assert_eq!(rs.decode(&mut codeword), Ok(1));
        assert_eq!(codeword, clean);
    }

    #[test]
    fn test_corrects_t_errors() {
        let rs = ccsds();
        let data: Vec<u8> = (0..223).map(|i| (i * 13) as u8).collect();
        let clean = rs.encode_codeword(&data).unwrap();
        let mut codeword = clean.clone();
        for i in 0..16 {
            codeword[i * 15] ^= (i as u8 + 1).wrapping_mul(0x11);
        }
        assert_eq!(rs.decode(&mut codeword), Ok(16));
        assert_eq!(codeword, clean);
    }

    #[test]
    fn test_uncorrectable_leaves_word_untouched() {
        let rs = ccsds();
        let data: Vec<u8> = (0..223).map(|i| (i * 3) as u8).collect();
        let mut codeword = rs.encode_codeword(&data).unwrap();
        for i in 0..17 {
            codeword[i * 14 + 1] ^= 0x5A;
        }
        let received = codeword.clone();
        let result = rs.decode(&mut codeword);
        assert!(result.is_err(), "17 errors must not decode with t = 16");
        assert!(result.unwrap_err().is_uncorrectable());
        assert_eq!(codeword, received);
    }

    #[test]
    fn test_shortened_codeword() {
        let rs = ccsds();
        let data: Vec<u8> = (0..100).map(|i| i as u8).collect();
        let clean = rs.encode_codeword(&data).unwrap();
        assert_eq!(clean.len(), 132);
        let mut codeword = clean.clone();
        codeword[0] ^= 0x80;
        codeword[50] ^= 0x01;
        codeword[131] ^= 0x33;
        assert_eq!(rs.decode(&mut codeword), Ok(3));
        assert_eq!(codeword, clean);
    }

    #[test]
    fn test_small_field_roundtrip() {
        for basis in 3..=7 {
            let params = CodeParams::for_basis(basis).unwrap();
            let rs = ReedSolomon::new(params).unwrap();
            let mask = params.n() as u8;
            let data: Vec<u8> = (0..params.k()).map(|i| ((i * 5 + 1) as u8) & mask).collect();
            let clean = rs.encode_codeword(&data).unwrap();
            let mut codeword = clean.clone();
            for e in 0..params.t() {
                codeword[e * 2] ^= 1;
            }
            assert_eq!(rs.decode(&mut codeword), Ok(params.t()), "basis {}", basis);
            assert_eq!(codeword, clean);
        }
    }

    #[test]
    fn test_symbol_out_of_range() {
        let rs = ReedSolomon::new(CodeParams::for_basis(4).unwrap()).unwrap();
        let mut codeword = vec![0u8; 15];
        codeword[3] = 0x10;
        assert!(matches!(
            rs.decode(&mut codeword),
            Err(RsError::SymbolOutOfRange { position: 3, .. })
        ));
        assert!(rs.encode_parity(&[0x20]).is_err());
    }

    #[test]
    fn test_invalid_lengths() {
        let rs = ccsds();
        assert!(matches!(
            rs.decode(&mut vec![0u8; 32]),
            Err(RsError::InvalidLength { got: 32, .. })
        ));
        assert!(rs.decode(&mut vec![0u8; 256]).is_err());
        assert!(rs.encode_parity(&[0u8; 224]).is_err());
        assert!(rs.encode_parity(&[]).is_err());
    }

    #[test]
    fn test_narrow_sense_code_with_fcr_zero() {
        let params = CodeParams {
            symsize: 8,
            gfpoly: 0x11D,
            fcr: 0,
            prim: 1,
            nroots: 16,
        };
        let rs = ReedSolomon::new(params).unwrap();
        let data: Vec<u8> = (0..239).map(|i| (255 - i) as u8).collect();
        let clean = rs.encode_codeword(&data).unwrap();
        let mut codeword = clean.clone();
        for i in 0..8 {
            codeword[i * 30] ^= 0xA5;
        }
        assert_eq!(rs.decode(&mut codeword), Ok(8));
        assert_eq!(codeword, clean);
    }
}
