//! Error types for the host contract

use crate::decoder::{ConfigError, FrameError};
use thiserror::Error;

/// Errors from a `general_work` call that breaks the host contract
#[derive(Debug, Error)]
pub enum WorkError {
    #[error("Expected {expected} {direction} ports, got {got}")]
    PortCount {
        direction: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("Requested {requested} output items, below the output multiple of {multiple}")]
    OutputMultiple { requested: usize, multiple: usize },
    #[error("Buffer on {direction} port {port} holds {len} items, {needed} announced")]
    ShortBuffer {
        direction: &'static str,
        port: usize,
        len: usize,
        needed: usize,
    },
}

/// Errors from inbound message handling
#[derive(Debug, Error)]
pub enum MessageError {
    #[error("Unknown message port '{0}'")]
    UnknownPort(String),

    #[error("Port '{port}' does not accept {kind} messages")]
    UnexpectedMessage { port: String, kind: &'static str },

    #[error("Malformed frame: {0}")]
    Frame(#[from] FrameError),

    #[error("Reconfiguration rejected: {0}")]
    Rejected(#[from] ConfigError),
}

/// Type alias for work results
pub type WorkResult<T> = std::result::Result<T, WorkError>;

/// Type alias for message handling results
pub type MessageResult<T> = std::result::Result<T, MessageError>;
