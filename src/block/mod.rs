//! Host-facing block contract
//!
//! A dataflow host drives a block through three entry points:
//!
//! - `forecast`: how many input items are needed for a number of output items
//! - `general_work`: consume some input, produce some output, report both counts
//! - `handle_message`: asynchronous delivery of a message on a named port
//!
//! All three take `&self`. The host may call `handle_message` from its
//! message thread while the scheduler thread is inside `general_work`,
//! so implementations keep their mutable state behind locks.

mod error;
mod message;

pub use error::{MessageError, MessageResult, WorkError, WorkResult};
pub use message::{
    Control, DiscardSink, MessageSink, MetaValue, Message, Pdu, QueueSink,
};

use smallvec::SmallVec;

/// Items consumed and produced by one `general_work` call
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WorkStatus {
    /// Items consumed on each input port
    pub consumed: SmallVec<[usize; 2]>,
    /// Items written to every output port
    pub produced: usize,
}

impl WorkStatus {
    /// Status of a single-input block
    pub fn single(consumed: usize, produced: usize) -> Self {
        let mut ports = SmallVec::new();
        ports.push(consumed);
        Self {
            consumed: ports,
            produced,
        }
    }

    /// Nothing consumed and nothing produced
    pub fn idle(num_inputs: usize) -> Self {
        Self {
            consumed: SmallVec::from_elem(0, num_inputs),
            produced: 0,
        }
    }
}

/// A scheduled processing node
pub trait Block: Send + Sync {
    /// Debug name of the block
    fn name(&self) -> &str;

    /// Number of streaming input ports
    fn num_inputs(&self) -> usize {
        1
    }

    /// Number of streaming output ports
    fn num_outputs(&self) -> usize {
        1
    }

    /// Message ports accepting inbound messages
    fn message_ports_in(&self) -> &[&'static str] {
        &[]
    }

    /// Message ports the block publishes on
    fn message_ports_out(&self) -> &[&'static str] {
        &[]
    }

    /// Granularity of the output, in items.
    ///
    /// Hosts must call `general_work` with `noutput_items` a multiple of
    /// this value; smaller requests cannot produce anything.
    fn output_multiple(&self) -> usize {
        1
    }

    /// Fill `ninput_items_required` (one slot per input port) with the
    /// input needed to produce `noutput_items`
    fn forecast(&self, noutput_items: usize, ninput_items_required: &mut [usize]);

    /// Transform available input into at most `noutput_items` output items
    fn general_work(
        &self,
        noutput_items: usize,
        ninput_items: &[usize],
        input_items: &[&[u8]],
        output_items: &mut [&mut [u8]],
    ) -> WorkResult<WorkStatus>;

    /// Handle a message delivered on `port`
    fn handle_message(&self, port: &str, message: Message) -> MessageResult<()>;
}
