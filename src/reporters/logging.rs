//! Reporter forwarding to the `log` facade

use super::DecodeReporter;
use crate::decoder::{CodewordStatus, DecodeStats};

/// Sends decode reports to the installed logger
#[derive(Default)]
pub struct LogDecodeReporter;

impl LogDecodeReporter {
    pub fn new() -> Self {
        Self
    }
}

impl DecodeReporter for LogDecodeReporter {
    fn report_codeword(&self, frame: u64, codeword: usize, status: &CodewordStatus) {
        match status {
            CodewordStatus::Corrected(n) => {
                log::info!("frame {} codeword {}: corrected {} bytes", frame, codeword, n)
            }
            CodewordStatus::Failed(err) => {
                log::warn!("frame {} codeword {}: decode failed: {}", frame, codeword, err)
            }
        }
    }

    fn report_frame_dropped(&self, frame: u64, failed: usize, total: usize) {
        log::warn!(
            "frame {} dropped: {}/{} codewords uncorrectable",
            frame,
            failed,
            total
        );
    }

    fn report_error(&self, error: &str) {
        log::error!("{}", error);
    }

    fn report_stats(&self, stats: &DecodeStats) {
        log::info!("{}", stats);
    }
}
