//! Message sinks
//!
//! `JsonLinesSink` writes one JSON document per line, the format consumed by
//! Singer targets. `MemorySink` collects messages for inspection.

use super::message::Message;
use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::schema::StreamSchema;
use crate::state::SyncState;
use crate::types::Record;
use chrono::{DateTime, Utc};
use std::io::Write;

/// Destination of tap output
pub trait MessageSink: Send {
    /// Write one message
    fn emit(&mut self, message: Message) -> Result<()>;

    /// Write the discovered catalog
    fn emit_catalog(&mut self, catalog: &Catalog) -> Result<()>;

    fn emit_schema(
        &mut self,
        stream: &str,
        schema: &StreamSchema,
        key_properties: &[String],
    ) -> Result<()> {
        self.emit(Message::Schema {
            stream: stream.to_string(),
            schema: schema.clone(),
            key_properties: key_properties.to_vec(),
        })
    }

    fn emit_record(
        &mut self,
        stream: &str,
        record: Record,
        time_extracted: DateTime<Utc>,
    ) -> Result<()> {
        self.emit(Message::Record {
            stream: stream.to_string(),
            record,
            time_extracted,
        })
    }

    fn emit_state(&mut self, state: &SyncState) -> Result<()> {
        self.emit(Message::State {
            value: state.clone(),
        })
    }
}

// ============================================================================
// JSON Lines
// ============================================================================

/// Writes messages as JSON lines
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl JsonLinesSink<std::io::Stdout> {
    /// Sink writing to standard output
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consume the sink and return the writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_line(&mut self, value: &impl serde::Serialize) -> Result<()> {
        serde_json::to_writer(&mut self.writer, value)
            .map_err(|e| Error::output(format!("Failed to serialize message: {e}")))?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

impl<W: Write + Send> MessageSink for JsonLinesSink<W> {
    fn emit(&mut self, message: Message) -> Result<()> {
        let is_state = matches!(message, Message::State { .. });
        self.write_line(&message)?;
        // State must reach the target before the next chunk starts
        if is_state {
            self.writer.flush()?;
        }
        Ok(())
    }

    fn emit_catalog(&mut self, catalog: &Catalog) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, catalog)
            .map_err(|e| Error::output(format!("Failed to serialize catalog: {e}")))?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

// ============================================================================
// Memory
// ============================================================================

/// Collects messages in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    /// Messages in emission order
    pub messages: Vec<Message>,
    /// Last emitted catalog
    pub catalog: Option<Catalog>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records emitted for a stream
    pub fn records(&self, stream: &str) -> Vec<&Record> {
        self.messages
            .iter()
            .filter_map(|m| match m {
                Message::Record {
                    stream: s, record, ..
                } if s == stream => Some(record),
                _ => None,
            })
            .collect()
    }

    /// Emitted states in order
    pub fn states(&self) -> Vec<&SyncState> {
        self.messages
            .iter()
            .filter_map(|m| match m {
                Message::State { value } => Some(value),
                _ => None,
            })
            .collect()
    }

    /// Streams that received a schema, in order
    pub fn schema_streams(&self) -> Vec<&str> {
        self.messages
            .iter()
            .filter_map(|m| match m {
                Message::Schema { stream, .. } => Some(stream.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl MessageSink for MemorySink {
    fn emit(&mut self, message: Message) -> Result<()> {
        self.messages.push(message);
        Ok(())
    }

    fn emit_catalog(&mut self, catalog: &Catalog) -> Result<()> {
        self.catalog = Some(catalog.clone());
        Ok(())
    }
}
