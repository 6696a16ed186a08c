//! The append-only memory sink for effect strings.

/// Where effect strings land after each update.
///
/// The engine only ever appends, in application order, and never reads
/// entries back. Implementors wire this to whatever associative memory
/// the surrounding simulation uses.
pub trait MemorySink {
    /// Append one entry.
    fn record(&mut self, entry: String);

    /// Append many entries, preserving order.
    fn extend(&mut self, entries: Vec<String>) {
        for entry in entries {
            self.record(entry);
        }
    }
}

/// An in-memory sink that keeps every entry.
#[derive(Debug, Clone, Default)]
pub struct BufferedMemory {
    entries: Vec<String>,
}

impl BufferedMemory {
    /// An empty sink.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Every recorded entry, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

impl MemorySink for BufferedMemory {
    fn record(&mut self, entry: String) {
        self.entries.push(entry);
    }
}
