//! Console reporter
//!
//! Writes one-line reports to standard error, keeping standard output
//! free for decoded data.

use super::DecodeReporter;
use crate::decoder::{CodewordStatus, DecodeStats};

/// Console implementation for decode reports
#[derive(Default)]
pub struct ConsoleDecodeReporter;

impl ConsoleDecodeReporter {
    pub fn new() -> Self {
        Self
    }
}

impl DecodeReporter for ConsoleDecodeReporter {
    fn report_codeword(&self, frame: u64, codeword: usize, status: &CodewordStatus) {
        match status {
            CodewordStatus::Corrected(n) => eprintln!(
                "Frame {} codeword {}: Reed-Solomon decode corrected {} bytes",
                frame, codeword, n
            ),
            CodewordStatus::Failed(err) => eprintln!(
                "Frame {} codeword {}: Reed-Solomon decode fail ({})",
                frame, codeword, err
            ),
        }
    }

    fn report_frame_dropped(&self, frame: u64, failed: usize, total: usize) {
        eprintln!(
            "Frame {} dropped: {} of {} codewords uncorrectable",
            frame, failed, total
        );
    }

    fn report_error(&self, error: &str) {
        eprintln!("Error: {}", error);
    }

    fn report_stats(&self, stats: &DecodeStats) {
        eprintln!("{}", stats);
    }
}
