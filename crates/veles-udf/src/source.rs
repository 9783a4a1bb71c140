//! Stream source adapters.
//!
//! [`StreamSource`] is the hook surface any concrete producer/consumer
//! implements — an in-memory list, a generator, a network feed. The defaults
//! describe an adapter with no hooks bound: both probes false, `read` already
//! exhausted, `write` refused. Adapters override only what they support, so
//! an unreadable adapter never grows a callable `read`.

use std::collections::VecDeque;

use tracing::debug;
use veles_core::Value;

use crate::memtracker::MemTracker;
use crate::stream::{StreamError, StreamItem};

/// Hook surface for stream backends.
pub trait StreamSource: Send {
    /// True when a read hook is bound.
    fn readable(&self) -> bool {
        false
    }

    /// True when a write hook is bound.
    fn writable(&self) -> bool {
        false
    }

    /// Pulls the next value. Only invoked through [`Stream::read`] after a
    /// successful `readable` probe. Must keep returning [`StreamItem::End`]
    /// once exhausted.
    ///
    /// [`Stream::read`]: crate::stream::Stream::read
    fn read(&mut self) -> StreamItem {
        StreamItem::End
    }

    /// Accepts a value. Only invoked through [`Stream::write`] after a
    /// successful `writable` probe.
    ///
    /// [`Stream::write`]: crate::stream::Stream::write
    fn write(&mut self, value: Value) -> Result<(), StreamError> {
        Err(StreamError::NotWritable(value))
    }

    /// Releases source-side resources. Invoked exactly once, during stream
    /// teardown, before the wrapper itself is reclaimed.
    fn close(&mut self) {}
}

/// Degenerate adapter with no hooks bound. Legal: only teardown is
/// meaningful on a stream wrapping it.
#[derive(Debug, Default)]
pub struct NullSource;

impl StreamSource for NullSource {}

/// Read-only adapter over a fixed queue of values.
pub struct MemorySource {
    queue: VecDeque<Value>,
}

impl MemorySource {
    pub fn new(values: Vec<Value>) -> Self {
        Self {
            queue: values.into(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl StreamSource for MemorySource {
    fn readable(&self) -> bool {
        true
    }

    fn read(&mut self) -> StreamItem {
        match self.queue.pop_front() {
            Some(value) => StreamItem::Next(value),
            None => StreamItem::End,
        }
    }

    fn close(&mut self) {
        if !self.queue.is_empty() {
            debug!(unread = self.queue.len(), "memory source closed early");
            self.queue.clear();
        }
    }
}

/// Write-only adapter collecting values in memory.
///
/// Optionally charges each accepted value's footprint to a [`MemTracker`]
/// and releases the total at close; a denied charge rejects the write.
pub struct MemorySink<'t> {
    values: Vec<Value>,
    tracker: Option<&'t dyn MemTracker>,
    charged: u64,
}

impl MemorySink<'static> {
    pub fn new() -> Self {
        Self {
            values: Vec::new(),
            tracker: None,
            charged: 0,
        }
    }
}

impl Default for MemorySink<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'t> MemorySink<'t> {
    /// A sink that reports every accepted value to `tracker`.
    pub fn tracked(tracker: &'t dyn MemTracker) -> Self {
        Self {
            values: Vec::new(),
            tracker: Some(tracker),
            charged: 0,
        }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Hands the collected values to the caller, leaving the sink empty.
    pub fn take_values(&mut self) -> Vec<Value> {
        std::mem::take(&mut self.values)
    }
}

impl StreamSource for MemorySink<'_> {
    fn writable(&self) -> bool {
        true
    }

    fn write(&mut self, value: Value) -> Result<(), StreamError> {
        if let Some(tracker) = self.tracker {
            let bytes = value.size() as u64;
            tracker
                .charge(bytes)
                .map_err(|e| StreamError::Sink(e.to_string()))?;
            self.charged += bytes;
        }
        self.values.push(value);
        Ok(())
    }

    fn close(&mut self) {
        // The invocation is over: give the reservation back. The collected
        // values stay with the sink's owner.
        if let Some(tracker) = self.tracker {
            if self.charged > 0 {
                tracker.release(self.charged);
                self.charged = 0;
            }
        }
    }
}
