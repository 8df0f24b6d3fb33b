//! Interleaved Reed-Solomon decoding for streaming dataflow hosts.
//!
//! The crate is built around [`decoder::DecodeRsInterleaved`], a block that
//! plugs into a host scheduler through the [`block::Block`] trait. It takes
//! frames of interleaved RS codewords from a byte stream or from PDUs,
//! corrects every codeword, and forwards the de-interleaved payload.

pub mod args;
pub mod block;
pub mod decoder;
pub mod interleave;
pub mod pdu;
pub mod reed_solomon;
pub mod reporters;

pub use args::parse_args;
pub use block::{Block, Control, Message, MessageSink, Pdu, QueueSink, WorkStatus};
pub use decoder::{DecodeRsInterleaved, DecodeStats, DecoderConfig, SymbolBasis};
