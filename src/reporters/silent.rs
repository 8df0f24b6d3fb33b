//! Silent reporter
//!
//! Provides a no-output implementation for testing or when quiet operation is desired.

use super::DecodeReporter;
use crate::decoder::{CodewordStatus, DecodeStats};

/// Silent implementation for decode reports
#[derive(Default)]
pub struct SilentDecodeReporter;

impl SilentDecodeReporter {
    pub fn new() -> Self {
        Self
    }
}

impl DecodeReporter for SilentDecodeReporter {
    fn report_codeword(&self, _frame: u64, _codeword: usize, _status: &CodewordStatus) {}
    fn report_frame_dropped(&self, _frame: u64, _failed: usize, _total: usize) {}
    fn report_error(&self, _error: &str) {}
    fn report_stats(&self, _stats: &DecodeStats) {}
}
