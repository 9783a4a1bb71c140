//! Tests for stream capability probing and teardown ordering

use veles_core::{Boolean, Tag};
use veles_udf::{MemorySink, MemorySource, QuotaTracker, Stream, StreamError, StreamItem, StreamSource};

fn read_bool(stream: &mut Stream<'_>) -> Option<bool> {
    match stream.read().expect("stream must be readable") {
        StreamItem::Next(v) => {
            let b = Boolean::get(&v).expect("expected a boolean value");
            v.destroy(Tag::Boolean).unwrap();
            Some(b)
        }
        StreamItem::End => None,
    }
}

#[test]
fn test_fixed_source_yields_elements_then_idempotent_end() {
    let source = MemorySource::new(vec![
        Boolean::new(true),
        Boolean::new(false),
        Boolean::new(true),
    ]);
    let mut stream = Stream::new(source);

    assert_eq!(read_bool(&mut stream), Some(true));
    assert_eq!(read_bool(&mut stream), Some(false));
    assert_eq!(read_bool(&mut stream), Some(true));
    // Fourth read hits the end sentinel, fifth stays there.
    assert_eq!(read_bool(&mut stream), None);
    assert_eq!(read_bool(&mut stream), None);
}

#[test]
fn test_copy_pipeline_preserves_order() {
    let mut reader = Stream::new(MemorySource::new(vec![
        Boolean::new(false),
        Boolean::new(false),
        Boolean::new(true),
    ]));
    let mut sink = MemorySink::new();
    {
        let mut writer = Stream::wrap(&mut sink);
        loop {
            match reader.read().unwrap() {
                StreamItem::Next(v) => writer.write(v).unwrap(),
                StreamItem::End => break,
            }
        }
    }
    let copied: Vec<_> = sink.take_values().iter().map(Boolean::get).collect();
    assert_eq!(copied, vec![Some(false), Some(false), Some(true)]);
}

/// Adapter that records how its hooks were exercised.
#[derive(Default)]
struct ProbeSource {
    close_calls: usize,
    reads: usize,
}

impl StreamSource for ProbeSource {
    fn readable(&self) -> bool {
        true
    }

    fn read(&mut self) -> StreamItem {
        self.reads += 1;
        StreamItem::End
    }

    fn close(&mut self) {
        self.close_calls += 1;
    }
}

#[test]
fn test_teardown_runs_close_hook_exactly_once() {
    let mut source = ProbeSource::default();
    {
        let mut stream = Stream::wrap(&mut source);
        assert!(stream.read().unwrap().is_end());
    }
    assert_eq!(source.close_calls, 1);
    assert_eq!(source.reads, 1);
}

#[test]
fn test_explicit_destroy_matches_drop_teardown() {
    let mut source = ProbeSource::default();
    let stream = Stream::wrap(&mut source);
    stream.destroy();
    assert_eq!(source.close_calls, 1);
}

#[test]
fn test_tracked_sink_denial_propagates_through_stream() {
    // Quota fits exactly one boolean payload.
    let tracker = QuotaTracker::new(std::mem::size_of::<Boolean>() as u64);
    let mut stream = Stream::new(MemorySink::tracked(&tracker));

    stream.write(Boolean::new(true)).unwrap();
    let err = stream.write(Boolean::new(false)).unwrap_err();
    assert!(matches!(err, StreamError::Sink(_)));

    // Teardown releases the reservation back to the tracker.
    stream.destroy();
    assert_eq!(tracker.used(), 0);
}

#[test]
fn test_probe_violations_are_reported_not_undefined() {
    let mut read_only = Stream::new(MemorySource::new(vec![]));
    match read_only.write(Boolean::new(true)) {
        Err(StreamError::NotWritable(v)) => assert_eq!(Boolean::get(&v), Some(true)),
        other => panic!("unexpected outcome: {other:?}"),
    }

    let mut write_only = Stream::new(MemorySink::new());
    assert!(matches!(write_only.read(), Err(StreamError::NotReadable)));
}
