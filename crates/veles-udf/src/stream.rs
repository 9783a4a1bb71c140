//! Stream abstraction over runtime values.
//!
//! A [`Stream`] is a thin, synchronous conduit between a UDF and a concrete
//! source or sink adapter. It does no buffering, retrying, or transformation;
//! it probes the adapter's capabilities and delegates. Capability probes are
//! mandatory: reading an unreadable stream or writing an unwritable one is a
//! reported error, never a wild dispatch.

use thiserror::Error;
use tracing::debug;
use veles_core::Value;

use crate::source::StreamSource;

/// Outcome of a single stream read.
///
/// `End` is the reserved end-of-data sentinel. It is a distinct variant, not
/// a value, so it can never collide with a legitimately constructed [`Value`].
/// Sources keep returning `End` once exhausted.
#[derive(Debug)]
pub enum StreamItem {
    Next(Value),
    End,
}

impl StreamItem {
    pub fn is_end(&self) -> bool {
        matches!(self, StreamItem::End)
    }
}

/// Stream operation errors
#[derive(Debug, Error)]
pub enum StreamError {
    /// `read` called on a stream with no read hook bound.
    #[error("stream is not readable")]
    NotReadable,
    /// `write` called on a stream with no write hook bound. The rejected
    /// value is handed back untouched.
    #[error("stream is not writable")]
    NotWritable(Value),
    /// The sink accepted the call but refused the value.
    #[error("sink rejected value: {0}")]
    Sink(String),
}

enum SourceHandle<'a> {
    /// The stream owns its adapter and releases it at teardown.
    Owned(Box<dyn StreamSource + 'a>),
    /// The adapter outlives the stream; teardown only runs its close hook.
    Borrowed(&'a mut (dyn StreamSource + 'a)),
}

/// A sequence conduit over [`Value`]s, decoupled from its backing adapter.
///
/// Teardown is two-phase and runs exactly once: the adapter's `close` hook
/// fires first (releasing source-side resources), then the wrapper itself is
/// reclaimed — and with it the adapter, when the stream owns it.
pub struct Stream<'a> {
    source: SourceHandle<'a>,
}

impl<'a> Stream<'a> {
    /// Wraps an adapter the stream will own.
    pub fn new(source: impl StreamSource + 'a) -> Self {
        Self {
            source: SourceHandle::Owned(Box::new(source)),
        }
    }

    /// Wraps a caller-owned adapter. The adapter survives the stream; only
    /// its `close` hook runs at teardown.
    pub fn wrap(source: &'a mut (dyn StreamSource + 'a)) -> Self {
        Self {
            source: SourceHandle::Borrowed(source),
        }
    }

    pub fn source(&self) -> &dyn StreamSource {
        match &self.source {
            SourceHandle::Owned(s) => s.as_ref(),
            SourceHandle::Borrowed(s) => &**s,
        }
    }

    fn source_mut(&mut self) -> &mut dyn StreamSource {
        match &mut self.source {
            SourceHandle::Owned(s) => s.as_mut(),
            SourceHandle::Borrowed(s) => &mut **s,
        }
    }

    /// True iff the adapter has a read hook bound.
    pub fn readable(&self) -> bool {
        self.source().readable()
    }

    /// True iff the adapter has a write hook bound.
    pub fn writable(&self) -> bool {
        self.source().writable()
    }

    /// Pulls the next value from the adapter.
    ///
    /// Returns [`StreamItem::End`] at exhaustion, and keeps returning it on
    /// further reads. Unreadable streams report [`StreamError::NotReadable`].
    pub fn read(&mut self) -> Result<StreamItem, StreamError> {
        if !self.readable() {
            return Err(StreamError::NotReadable);
        }
        Ok(self.source_mut().read())
    }

    /// Pushes a value into the adapter, propagating whatever status the sink
    /// produces. Unwritable streams hand the value back in
    /// [`StreamError::NotWritable`].
    pub fn write(&mut self, value: Value) -> Result<(), StreamError> {
        if !self.writable() {
            return Err(StreamError::NotWritable(value));
        }
        self.source_mut().write(value)
    }

    /// Explicit teardown. Equivalent to dropping the stream.
    pub fn destroy(self) {
        drop(self);
    }
}

impl Drop for Stream<'_> {
    fn drop(&mut self) {
        // Source resources go first; the wrapper (and an owned adapter) are
        // reclaimed only after the hook has run.
        self.source_mut().close();
        debug!(
            owned = matches!(self.source, SourceHandle::Owned(_)),
            "stream closed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{MemorySink, MemorySource, NullSource};
    use veles_core::Boolean;

    #[test]
    fn test_null_stream_has_no_capabilities() {
        let s = Stream::new(NullSource);
        assert!(!s.readable());
        assert!(!s.writable());
    }

    #[test]
    fn test_read_on_unreadable_stream_is_reported() {
        let mut s = Stream::new(NullSource);
        assert!(matches!(s.read(), Err(StreamError::NotReadable)));
    }

    #[test]
    fn test_write_on_unwritable_stream_hands_value_back() {
        let mut s = Stream::new(NullSource);
        let err = s.write(Boolean::new(true)).unwrap_err();
        match err {
            StreamError::NotWritable(v) => assert_eq!(Boolean::get(&v), Some(true)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_read_only_stream_capabilities() {
        let s = Stream::new(MemorySource::new(vec![]));
        assert!(s.readable());
        assert!(!s.writable());
    }

    #[test]
    fn test_write_only_stream_capabilities() {
        let s = Stream::new(MemorySink::new());
        assert!(!s.readable());
        assert!(s.writable());
    }

    #[test]
    fn test_borrowed_source_survives_stream_teardown() {
        let mut sink = MemorySink::new();
        {
            let mut s = Stream::wrap(&mut sink);
            s.write(Boolean::new(false)).unwrap();
        }
        // The stream is gone; the caller-owned adapter still holds the value.
        assert_eq!(sink.values().len(), 1);
    }
}
