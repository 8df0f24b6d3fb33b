//! Configuration for the interleaved decoder

use super::error::ConfigError;
use crate::reed_solomon::{CodeParams, RsError};

/// Largest accepted interleaving depth
pub const MAX_CODEWORDS: usize = 256;

/// Representation of the RS symbols on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SymbolBasis {
    /// Symbols are field elements in the polynomial basis
    #[default]
    Conventional,
    /// CCSDS Berlekamp dual basis (GF(2^8) only)
    Dual,
}

/// Configuration for the interleaved Reed-Solomon decoder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Report per-codeword corrections and failures
    pub verbose: bool,
    /// Field exponent: symbols live in GF(2^basis)
    pub basis: u32,
    /// Interleaving depth
    pub codewords: usize,
    /// Symbol representation
    pub symbol_basis: SymbolBasis,
    /// Stream-mode codeword length (None = full length 2^basis - 1)
    pub codeword_len: Option<usize>,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            basis: 8, // CCSDS RS(255,223)
            codewords: 4,
            symbol_basis: SymbolBasis::Conventional,
            codeword_len: None,
        }
    }
}

impl DecoderConfig {
    pub fn new(verbose: bool, basis: u32, codewords: usize) -> Self {
        Self {
            verbose,
            basis,
            codewords,
            ..Self::default()
        }
    }

    pub fn with_symbol_basis(mut self, symbol_basis: SymbolBasis) -> Self {
        self.symbol_basis = symbol_basis;
        self
    }

    pub fn with_codeword_len(mut self, len: usize) -> Self {
        self.codeword_len = Some(len);
        self
    }

    pub fn from_args(matches: &clap::ArgMatches) -> Self {
        let basis = matches.get_one::<u32>("basis").copied().unwrap_or(8);
        let codewords = matches.get_one::<usize>("codewords").copied().unwrap_or(4);
        let symbol_basis = if matches.get_flag("dual-basis") {
            SymbolBasis::Dual
        } else {
            SymbolBasis::Conventional
        };

        Self {
            verbose: matches.get_flag("verbose"),
            basis,
            codewords,
            symbol_basis,
            codeword_len: matches.get_one::<usize>("codeword-len").copied(),
        }
    }

    /// Code parameters selected by `basis`
    pub fn code_params(&self) -> Result<CodeParams, ConfigError> {
        CodeParams::for_basis(self.basis).map_err(|err| match err {
            RsError::UnsupportedSymbolSize(basis) => ConfigError::UnsupportedBasis(basis),
            other => ConfigError::Code(other),
        })
    }

    /// Codeword length used in stream mode
    pub fn effective_codeword_len(&self) -> Result<usize, ConfigError> {
        let params = self.code_params()?;
        Ok(self.codeword_len.unwrap_or_else(|| params.n()))
    }

    /// Reject configurations the decoder cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.codewords == 0 {
            return Err(ConfigError::ZeroCodewords);
        }
        if self.codewords > MAX_CODEWORDS {
            return Err(ConfigError::TooManyCodewords {
                depth: self.codewords,
                max: MAX_CODEWORDS,
            });
        }

        let params = self.code_params()?;
        if self.symbol_basis == SymbolBasis::Dual && params.symsize != 8 {
            return Err(ConfigError::DualBasisUnsupported(self.basis));
        }

        let len = self.codeword_len.unwrap_or_else(|| params.n());
        if len <= params.nroots || len > params.n() {
            return Err(ConfigError::CodewordLength {
                len,
                min: params.nroots + 1,
                max: params.n(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = DecoderConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.effective_codeword_len(), Ok(255));
    }

    #[test]
    fn test_rejects_zero_codewords() {
        assert_eq!(
            DecoderConfig::new(false, 8, 0).validate(),
            Err(ConfigError::ZeroCodewords)
        );
    }

    #[test]
    fn test_rejects_unsupported_basis() {
        assert_eq!(
            DecoderConfig::new(false, 2, 4).validate(),
            Err(ConfigError::UnsupportedBasis(2))
        );
        assert_eq!(
            DecoderConfig::new(false, 16, 4).validate(),
            Err(ConfigError::UnsupportedBasis(16))
        );
    }

    #[test]
    fn test_rejects_dual_basis_on_small_field() {
        let config = DecoderConfig::new(false, 4, 2).with_symbol_basis(SymbolBasis::Dual);
        assert_eq!(config.validate(), Err(ConfigError::DualBasisUnsupported(4)));
    }

    #[test]
    fn test_codeword_length_bounds() {
        let base = DecoderConfig::new(false, 8, 1);
        assert!(base.clone().with_codeword_len(33).validate().is_ok());
        assert!(base.clone().with_codeword_len(32).validate().is_err());
        assert!(base.clone().with_codeword_len(256).validate().is_err());
    }
}
