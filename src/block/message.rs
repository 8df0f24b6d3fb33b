//! Message types exchanged with the host's message bus

use crate::decoder::DecoderConfig;
use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use std::sync::mpsc;
use std::sync::{Mutex, PoisonError};

/// Value stored in PDU metadata
#[derive(Debug, Clone, PartialEq)]
pub enum MetaValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
}

/// Protocol data unit: metadata plus a byte vector
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pdu {
    pub meta: FxHashMap<String, MetaValue>,
    pub data: Vec<u8>,
}

impl Pdu {
    /// PDU with empty metadata
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            meta: FxHashMap::default(),
            data,
        }
    }

    /// Add a metadata entry
    pub fn with_meta(mut self, key: impl Into<String>, value: MetaValue) -> Self {
        self.meta.insert(key.into(), value);
        self
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Control commands accepted by the decoder
#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    /// Switch verbose reporting on or off
    SetVerbose(bool),
    /// Replace the whole configuration
    Reconfigure(DecoderConfig),
    /// Zero the decode statistics
    ResetStats,
}

/// Inbound message
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Pdu(Pdu),
    Control(Control),
}

impl Message {
    /// Short name of the message kind, for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Message::Pdu(_) => "pdu",
            Message::Control(_) => "control",
        }
    }
}

impl From<Pdu> for Message {
    fn from(pdu: Pdu) -> Self {
        Message::Pdu(pdu)
    }
}

impl From<Control> for Message {
    fn from(control: Control) -> Self {
        Message::Control(control)
    }
}

/// Destination for PDUs a block publishes
pub trait MessageSink: Send + Sync {
    fn publish(&self, port: &str, pdu: Pdu);
}

/// Sink that drops everything
#[derive(Debug, Default)]
pub struct DiscardSink;

impl MessageSink for DiscardSink {
    fn publish(&self, port: &str, pdu: Pdu) {
        log::debug!("Discarding {} byte PDU published on '{}'", pdu.len(), port);
    }
}

/// Sink that queues published PDUs until drained
#[derive(Debug, Default)]
pub struct QueueSink {
    queue: Mutex<VecDeque<(String, Pdu)>>,
}

impl QueueSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every queued `(port, pdu)` pair, oldest first
    pub fn drain(&self) -> Vec<(String, Pdu)> {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MessageSink for QueueSink {
    fn publish(&self, port: &str, pdu: Pdu) {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back((port.to_string(), pdu));
    }
}

impl MessageSink for mpsc::Sender<Pdu> {
    fn publish(&self, port: &str, pdu: Pdu) {
        if self.send(pdu).is_err() {
            log::warn!("Receiver for port '{}' is gone, PDU dropped", port);
        }
    }
}
