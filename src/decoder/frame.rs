//! Interleaved frame coding
//!
//! A frame holds `depth` codewords of `len` symbols each, interleaved
//! symbol by symbol. The decoded payload keeps the same interleaving
//! with the parity symbols of every codeword removed.

use super::config::{DecoderConfig, SymbolBasis};
use super::error::{ConfigError, FrameError, Result};
use crate::interleave::{deinterleave, scatter};
use crate::reed_solomon::{BlockCode, CodeParams, DualBasisCodec, ReedSolomon, RsError};
use rayon::prelude::*;
use smallvec::SmallVec;

/// Result of decoding one codeword
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodewordStatus {
    /// Decoded, with this many symbols corrected
    Corrected(usize),
    /// Uncorrectable
    Failed(RsError),
}

impl CodewordStatus {
    /// Whether the codeword decoded
    pub fn is_ok(&self) -> bool {
        matches!(self, CodewordStatus::Corrected(_))
    }
}

/// Per-codeword results of one frame
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrameOutcome {
    pub codewords: SmallVec<[CodewordStatus; 8]>,
}

impl FrameOutcome {
    /// Whether every codeword decoded
    pub fn is_ok(&self) -> bool {
        self.codewords.iter().all(CodewordStatus::is_ok)
    }

    /// Total symbols corrected across the decoded codewords
    pub fn corrected(&self) -> usize {
        self.codewords
            .iter()
            .map(|status| match status {
                CodewordStatus::Corrected(n) => *n,
                CodewordStatus::Failed(_) => 0,
            })
            .sum()
    }

    /// Number of uncorrectable codewords
    pub fn failed(&self) -> usize {
        self.codewords.iter().filter(|s| !s.is_ok()).count()
    }

    /// Convert into an error when any codeword failed
    pub fn into_result(self) -> Result<Self> {
        if self.is_ok() {
            Ok(self)
        } else {
            Err(FrameError::Uncorrectable {
                failed: self.failed(),
                total: self.codewords.len(),
            })
        }
    }
}

/// Reed-Solomon code applied across an interleaved frame
#[derive(Debug)]
pub struct InterleavedCode {
    code: Box<dyn BlockCode>,
    depth: usize,
    codeword_len: usize,
}

impl InterleavedCode {
    /// Build the code described by a validated configuration
    pub fn from_config(config: &DecoderConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        let params = config.code_params()?;
        let code: Box<dyn BlockCode> = match config.symbol_basis {
            SymbolBasis::Conventional => Box::new(ReedSolomon::new(params)?),
            SymbolBasis::Dual => Box::new(DualBasisCodec::with_params(params)?),
        };
        Ok(Self {
            code,
            depth: config.codewords,
            codeword_len: config.effective_codeword_len()?,
        })
    }

    /// Parameters of the per-codeword code
    pub fn params(&self) -> &CodeParams {
        self.code.params()
    }

    /// Interleaving depth
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Stream-mode codeword length
    pub fn codeword_len(&self) -> usize {
        self.codeword_len
    }

    /// Bytes of one stream-mode frame
    pub fn frame_len(&self) -> usize {
        self.codeword_len * self.depth
    }

    /// Payload bytes of one stream-mode frame
    pub fn payload_len(&self) -> usize {
        (self.codeword_len - self.params().nroots) * self.depth
    }

    /// Per-codeword length of a frame of `len` bytes, if it can be decoded
    pub fn codeword_len_for(&self, len: usize) -> Result<usize> {
        if len % self.depth != 0 {
            return Err(FrameError::NotInterleaved {
                len,
                depth: self.depth,
            });
        }
        let codeword_len = len / self.depth;
        let params = self.params();
        if codeword_len <= params.nroots || codeword_len > params.n() {
            return Err(FrameError::CodewordLength {
                len: codeword_len,
                min: params.nroots + 1,
                max: params.n(),
            });
        }
        Ok(codeword_len)
    }

    /// Decode one frame whose length is already known to be valid.
    ///
    /// `out` must hold `frame.len() - nroots·depth` bytes; its contents
    /// are only meaningful when the outcome is ok. Every codeword is
    /// decoded even after a failure.
    pub fn decode_into(&self, frame: &[u8], out: &mut [u8]) -> FrameOutcome {
        let codeword_len = frame.len() / self.depth;
        let data_len = codeword_len - self.params().nroots;
        debug_assert_eq!(out.len(), data_len * self.depth);

        let mut codeword: SmallVec<[u8; 255]> = SmallVec::from_elem(0, codeword_len);
        let mut outcome = FrameOutcome::default();
        for index in 0..self.depth {
            deinterleave(frame, self.depth, index, &mut codeword);
            let status = match self.code.decode(&mut codeword) {
                Ok(corrected) => {
                    scatter(&codeword[..data_len], self.depth, index, out);
                    CodewordStatus::Corrected(corrected)
                }
                Err(err) => CodewordStatus::Failed(err),
            };
            outcome.codewords.push(status);
        }
        outcome
    }

    /// Decode a frame of any valid length, returning the payload and the
    /// per-codeword outcome
    pub fn decode_frame(&self, frame: &[u8]) -> Result<(Vec<u8>, FrameOutcome)> {
        let codeword_len = self.codeword_len_for(frame.len())?;
        let mut payload = vec![0u8; (codeword_len - self.params().nroots) * self.depth];
        let outcome = self.decode_into(frame, &mut payload);
        Ok((payload, outcome))
    }

    /// Decode consecutive stream-mode frames in parallel.
    ///
    /// Trailing bytes that do not fill a frame are ignored.
    pub fn decode_frames(&self, input: &[u8]) -> Vec<(Vec<u8>, FrameOutcome)> {
        let payload_len = self.payload_len();
        input
            .par_chunks_exact(self.frame_len())
            .map(|frame| {
                let mut payload = vec![0u8; payload_len];
                let outcome = self.decode_into(frame, &mut payload);
                (payload, outcome)
            })
            .collect()
    }

    /// Encode an interleaved payload into a frame.
    ///
    /// The payload must split into `depth` blocks of 1..=k bytes; the
    /// resulting codewords are shortened when blocks are shorter than k.
    pub fn encode_frame(&self, payload: &[u8]) -> Result<Vec<u8>> {
        let params = *self.params();
        let data_len = payload.len() / self.depth;
        if payload.len() % self.depth != 0 || data_len == 0 || data_len > params.k() {
            return Err(FrameError::PayloadLength {
                len: payload.len(),
                depth: self.depth,
                max: params.k(),
            });
        }

        let codeword_len = data_len + params.nroots;
        let mut frame = vec![0u8; codeword_len * self.depth];
        let mut data = vec![0u8; data_len];
        for index in 0..self.depth {
            deinterleave(payload, self.depth, index, &mut data);
            let mut codeword = data.clone();
            codeword.extend(self.code.encode(&data)?);
            scatter(&codeword, self.depth, index, &mut frame);
        }
        Ok(frame)
    }
}
