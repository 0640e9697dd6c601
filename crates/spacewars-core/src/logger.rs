//! Append-only game log.
//!
//! The [`Logger`] records human-readable lifecycle messages ("Game state
//! changed to: running", "Spaceship viper destroyed") in the order they
//! happen. It is part of the serialized world state. Entries are never removed
//! except by [`Logger::clear`], which only a game reset uses.
//!
//! Every append is mirrored to `tracing` at `INFO` so hosts with a subscriber
//! installed see the same stream.

use serde::{Deserialize, Serialize};

/// A single log record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    tick: u64,
    message: String,
}

impl LogEntry {
    /// Creates a new entry.
    #[must_use]
    pub fn new(tick: u64, message: impl Into<String>) -> Self {
        Self {
            tick,
            message: message.into(),
        }
    }

    /// Simulation tick at which the entry was appended.
    #[must_use]
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// The message text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Ordered, append-only log sink.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Logger {
    entries: Vec<LogEntry>,
}

impl Logger {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends a message stamped with `tick`.
    pub fn append(&mut self, tick: u64, message: impl Into<String>) {
        let entry = LogEntry::new(tick, message);
        tracing::info!(tick, "{}", entry.message());
        self.entries.push(entry);
    }

    /// Entries in the order they were appended.
    #[must_use]
    pub fn logs(&self) -> &[LogEntry] {
        &self.entries
    }

    /// The most recent entry, if any.
    #[must_use]
    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been logged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
