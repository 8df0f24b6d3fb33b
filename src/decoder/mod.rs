//! Interleaved Reed-Solomon decoder block
//!
//! `DecodeRsInterleaved` decodes frames made of `codewords` interleaved
//! RS codewords, both from the byte stream (`forecast`/`general_work`)
//! and from PDUs delivered on the `in` message port.
//!
//! ## Failure policy
//!
//! A frame is forwarded only when every one of its codewords decodes.
//! Otherwise the frame is dropped: its input is consumed and nothing is
//! produced for it.
//!
//! ## Output granularity
//!
//! Output comes in whole frame payloads. `output_multiple` reports the
//! payload size and `general_work` rejects smaller non-zero requests
//! with `WorkError::OutputMultiple` instead of idling.
//!
//! ## Configuration updates
//!
//! The active configuration and the code built from it form one
//! immutable snapshot behind an `RwLock<Arc<_>>`. Each call clones the
//! `Arc` on entry, so a `Reconfigure` arriving on the `ctrl` port swaps
//! the snapshot without disturbing a decode in flight.

mod config;
mod error;
mod frame;
mod stats;

pub use config::{DecoderConfig, SymbolBasis, MAX_CODEWORDS};
pub use error::{ConfigError, FrameError, Result};
pub use frame::{CodewordStatus, FrameOutcome, InterleavedCode};
pub use stats::DecodeStats;

use crate::block::{
    Block, Control, DiscardSink, Message, MessageError, MessageResult, MessageSink, Pdu,
    WorkError, WorkResult, WorkStatus,
};
use crate::reporters::{DecodeReporter, LogDecodeReporter};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

/// Inbound PDU port
pub const PORT_IN: &str = "in";
/// Outbound PDU port
pub const PORT_OUT: &str = "out";
/// Inbound control port
pub const PORT_CTRL: &str = "ctrl";

/// Configuration snapshot shared by in-flight calls
#[derive(Debug)]
struct DecoderState {
    config: DecoderConfig,
    code: Arc<InterleavedCode>,
}

impl DecoderState {
    fn build(config: DecoderConfig) -> std::result::Result<Self, ConfigError> {
        let code = InterleavedCode::from_config(&config)?;
        Ok(Self {
            config,
            code: Arc::new(code),
        })
    }
}

/// Interleaved Reed-Solomon decoder block
pub struct DecodeRsInterleaved {
    state: RwLock<Arc<DecoderState>>,
    stats: Mutex<DecodeStats>,
    sink: Arc<dyn MessageSink>,
    reporter: Arc<dyn DecodeReporter>,
}

impl DecodeRsInterleaved {
    /// Create a decoder for `codewords` interleaved codewords over GF(2^basis)
    pub fn new(verbose: bool, basis: u32, codewords: usize) -> std::result::Result<Self, ConfigError> {
        Self::with_config(DecoderConfig::new(verbose, basis, codewords))
    }

    /// Create a decoder from a full configuration, failing fast if it is invalid
    pub fn with_config(config: DecoderConfig) -> std::result::Result<Self, ConfigError> {
        let state = DecoderState::build(config)?;
        log::debug!(
            "decoder configured: RS({},{}) over GF(2^{}), depth {}",
            state.code.codeword_len(),
            state.code.codeword_len() - state.code.params().nroots,
            state.config.basis,
            state.config.codewords
        );
        Ok(Self {
            state: RwLock::new(Arc::new(state)),
            stats: Mutex::new(DecodeStats::default()),
            sink: Arc::new(DiscardSink),
            reporter: Arc::new(LogDecodeReporter),
        })
    }

    /// Publish decoded PDUs to `sink`
    pub fn with_sink(mut self, sink: Arc<dyn MessageSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Send verbose reports to `reporter`
    pub fn with_reporter(mut self, reporter: Arc<dyn DecodeReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    fn snapshot(&self) -> Arc<DecoderState> {
        Arc::clone(&self.state.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn replace_state(&self, state: DecoderState) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(state);
    }

    /// Current configuration
    pub fn config(&self) -> DecoderConfig {
        self.snapshot().config.clone()
    }

    /// Code the current configuration decodes with
    pub fn code(&self) -> Arc<InterleavedCode> {
        Arc::clone(&self.snapshot().code)
    }

    /// Statistics accumulated since construction or the last reset
    pub fn stats(&self) -> DecodeStats {
        *self.stats.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the configuration; the old one stays active on error
    pub fn reconfigure(&self, config: DecoderConfig) -> std::result::Result<(), ConfigError> {
        let state = DecoderState::build(config)?;
        log::info!(
            "decoder reconfigured: basis {}, {} codewords of {} bytes",
            state.config.basis,
            state.config.codewords,
            state.code.codeword_len()
        );
        self.replace_state(state);
        Ok(())
    }

    /// Toggle verbose reporting, keeping the current code
    pub fn set_verbose(&self, verbose: bool) {
        let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let mut config = guard.config.clone();
        config.verbose = verbose;
        let code = Arc::clone(&guard.code);
        *guard = Arc::new(DecoderState { config, code });
    }

    /// Zero the decode statistics
    pub fn reset_stats(&self) {
        *self.stats.lock().unwrap_or_else(PoisonError::into_inner) = DecodeStats::default();
    }

    /// Account for a decoded frame and emit verbose reports.
    ///
    /// Returns whether the frame should be forwarded.
    fn record(&self, state: &DecoderState, frame: &[u8], outcome: &FrameOutcome) -> bool {
        let frame_index = {
            let mut stats = self.stats.lock().unwrap_or_else(PoisonError::into_inner);
            let index = stats.frames_total();
            stats.record(outcome);
            index
        };

        if state.config.verbose {
            for (codeword, status) in outcome.codewords.iter().enumerate() {
                self.reporter.report_codeword(frame_index, codeword, status);
            }
        }

        if outcome.is_ok() {
            log::debug!(
                "frame {}: {} symbols corrected",
                frame_index,
                outcome.corrected()
            );
            return true;
        }

        if state.config.verbose {
            self.reporter.report_frame_dropped(
                frame_index,
                outcome.failed(),
                outcome.codewords.len(),
            );
        }
        log::debug!(
            "frame {}: dropped, {} codewords uncorrectable",
            frame_index,
            outcome.failed()
        );
        log::trace!("frame {} bytes: {}", frame_index, hex::encode(frame));
        false
    }

    /// Decode a PDU and publish the payload on `out` when it decodes
    fn decode_pdu(&self, pdu: Pdu) -> MessageResult<()> {
        let state = self.snapshot();
        let (payload, outcome) = match state.code.decode_frame(&pdu.data) {
            Ok(decoded) => decoded,
            Err(err) => {
                if state.config.verbose {
                    self.reporter.report_error(&err.to_string());
                }
                log::warn!("rejecting {} byte PDU: {}", pdu.len(), err);
                return Err(err.into());
            }
        };

        if self.record(&state, &pdu.data, &outcome) {
            self.sink.publish(
                PORT_OUT,
                Pdu {
                    meta: pdu.meta,
                    data: payload,
                },
            );
        }
        Ok(())
    }

    /// Decode every whole stream-mode frame of `input` in parallel.
    ///
    /// Outcomes are accounted in frame order, so statistics and verbose
    /// reports match what `general_work` would give. Trailing bytes that
    /// do not fill a frame are ignored.
    pub fn decode_stream(&self, input: &[u8]) -> Vec<u8> {
        let state = self.snapshot();
        let frame_len = state.code.frame_len();
        let results = state.code.decode_frames(input);

        let mut output = Vec::with_capacity(results.len() * state.code.payload_len());
        for (frame, (payload, outcome)) in input.chunks_exact(frame_len).zip(results) {
            if self.record(&state, frame, &outcome) {
                output.extend_from_slice(&payload);
            }
        }
        output
    }

    fn apply_control(&self, control: Control) -> MessageResult<()> {
        match control {
            Control::SetVerbose(verbose) => self.set_verbose(verbose),
            Control::Reconfigure(config) => self.reconfigure(config)?,
            Control::ResetStats => self.reset_stats(),
        }
        Ok(())
    }

    fn check_ports(
        &self,
        ninput_items: &[usize],
        input_items: &[&[u8]],
        output_items: &[&mut [u8]],
    ) -> WorkResult<()> {
        if input_items.len() != 1 || ninput_items.len() != 1 {
            return Err(WorkError::PortCount {
                direction: "input",
                expected: 1,
                got: input_items.len().max(ninput_items.len()),
            });
        }
        if output_items.len() != 1 {
            return Err(WorkError::PortCount {
                direction: "output",
                expected: 1,
                got: output_items.len(),
            });
        }
        if input_items[0].len() < ninput_items[0] {
            return Err(WorkError::ShortBuffer {
                direction: "input",
                port: 0,
                len: input_items[0].len(),
                needed: ninput_items[0],
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for DecodeRsInterleaved {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodeRsInterleaved")
            .field("config", &self.config())
            .field("stats", &self.stats())
            .finish()
    }
}

impl Block for DecodeRsInterleaved {
    fn name(&self) -> &str {
        "decode_rs_interleaved"
    }

    fn message_ports_in(&self) -> &[&'static str] {
        &[PORT_IN, PORT_CTRL]
    }

    fn message_ports_out(&self) -> &[&'static str] {
        &[PORT_OUT]
    }

    fn output_multiple(&self) -> usize {
        self.code().payload_len()
    }

    fn forecast(&self, noutput_items: usize, ninput_items_required: &mut [usize]) {
        let code = self.code();
        let frames = noutput_items.max(1).div_ceil(code.payload_len());
        for required in ninput_items_required.iter_mut() {
            *required = frames * code.frame_len();
        }
    }

    fn general_work(
        &self,
        noutput_items: usize,
        ninput_items: &[usize],
        input_items: &[&[u8]],
        output_items: &mut [&mut [u8]],
    ) -> WorkResult<WorkStatus> {
        self.check_ports(ninput_items, input_items, output_items)?;

        let state = self.snapshot();
        let input = &input_items[0][..ninput_items[0]];
        let output = &mut *output_items[0];
        let noutput_items = noutput_items.min(output.len());

        let frame_len = state.code.frame_len();
        let payload_len = state.code.payload_len();
        if noutput_items > 0 && noutput_items < payload_len {
            return Err(WorkError::OutputMultiple {
                requested: noutput_items,
                multiple: payload_len,
            });
        }

        let frames = (input.len() / frame_len).min(noutput_items / payload_len);
        if frames == 0 {
            return Ok(WorkStatus::idle(1));
        }

        let mut produced = 0;
        for frame in input.chunks_exact(frame_len).take(frames) {
            let out = &mut output[produced..produced + payload_len];
            let outcome = state.code.decode_into(frame, out);
            if self.record(&state, frame, &outcome) {
                produced += payload_len;
            }
        }

        Ok(WorkStatus::single(frames * frame_len, produced))
    }

    fn handle_message(&self, port: &str, message: Message) -> MessageResult<()> {
        match (port, message) {
            (PORT_IN, Message::Pdu(pdu)) => self.decode_pdu(pdu),
            (PORT_CTRL, Message::Control(control)) => self.apply_control(control),
            (PORT_IN | PORT_CTRL, message) => Err(MessageError::UnexpectedMessage {
                port: port.to_string(),
                kind: message.kind(),
            }),
            (other, _) => Err(MessageError::UnknownPort(other.to_string())),
        }
    }
}
