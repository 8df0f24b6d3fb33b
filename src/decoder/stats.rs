//! Decode statistics

use super::frame::{CodewordStatus, FrameOutcome};
use std::fmt;

/// Running counters kept by the decoder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeStats {
    pub frames_decoded: u64,
    pub frames_dropped: u64,
    pub codewords_decoded: u64,
    pub codewords_failed: u64,
    pub symbols_corrected: u64,
}

impl DecodeStats {
    /// Account for one frame
    pub fn record(&mut self, outcome: &FrameOutcome) {
        for status in &outcome.codewords {
            match status {
                CodewordStatus::Corrected(n) => {
                    self.codewords_decoded += 1;
                    self.symbols_corrected += *n as u64;
                }
                CodewordStatus::Failed(_) => self.codewords_failed += 1,
            }
        }
        if outcome.is_ok() {
            self.frames_decoded += 1;
        } else {
            self.frames_dropped += 1;
        }
    }

    /// Frames seen so far
    pub fn frames_total(&self) -> u64 {
        self.frames_decoded + self.frames_dropped
    }
}

impl fmt::Display for DecodeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} frames decoded, {} dropped; {} codewords decoded, {} failed; {} symbols corrected",
            self.frames_decoded,
            self.frames_dropped,
            self.codewords_decoded,
            self.codewords_failed,
            self.symbols_corrected
        )
    }
}
