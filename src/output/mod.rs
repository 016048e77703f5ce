//! Output module
//!
//! Emits Singer messages: SCHEMA before a stream's records, RECORD per row
//! and STATE after every completed chunk.

mod message;
mod sink;

pub use message::Message;
pub use sink::{JsonLinesSink, MemorySink, MessageSink};
