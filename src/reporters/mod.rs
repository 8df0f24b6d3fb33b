//! Verbose decode reporting
//!
//! This module provides the trait the decoder reports per-codeword results
//! through when verbose mode is on, decoupling the decode path from
//! output formatting. Reports never go to the data output.

mod console;
mod logging;
mod silent;

pub use console::ConsoleDecodeReporter;
pub use logging::LogDecodeReporter;
pub use silent::SilentDecodeReporter;

use crate::decoder::{CodewordStatus, DecodeStats};

/// Trait for reporting decode progress and results
pub trait DecodeReporter: Send + Sync {
    /// Report the result of one codeword of frame `frame`
    fn report_codeword(&self, frame: u64, codeword: usize, status: &CodewordStatus);

    /// Report that a frame was dropped because of uncorrectable codewords
    fn report_frame_dropped(&self, frame: u64, failed: usize, total: usize);

    /// Report an input the decoder rejected outright
    fn report_error(&self, error: &str);

    /// Report accumulated statistics
    fn report_stats(&self, stats: &DecodeStats);
}
