//! Append-only buffer of captured requests.

use super::types::RequestRecord;
use parking_lot::Mutex;
use tracing::debug;

/// Shared capture buffer. Growth is bounded only by explicit resets.
#[derive(Debug)]
pub struct RequestRecorder {
    records: Mutex<Vec<RequestRecord>>,
    enabled: bool,
}

impl RequestRecorder {
    pub fn new() -> Self {
        Self::with_enabled(true)
    }

    /// A recorder that drops every record when `enabled` is false.
    pub fn with_enabled(enabled: bool) -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn append(&self, record: RequestRecord) {
        if !self.enabled {
            return;
        }
        debug!("Recording {} {}", record.method, record.path);
        self.records.lock().push(record);
    }

    /// Replace the buffer with a fresh empty one and return the fresh
    /// buffer's contents, which is always empty.
    pub fn reset(&self) -> Vec<RequestRecord> {
        let dropped = std::mem::take(&mut *self.records.lock());
        debug!("Request recorder reset ({} records dropped)", dropped.len());
        Vec::new()
    }

    /// Point-in-time copy in insertion order.
    pub fn snapshot(&self) -> Vec<RequestRecord> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for RequestRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::InboundRequest;
    use hyper::{Method, Uri};
    use std::sync::Arc;

    fn record(path: &'static str) -> RequestRecord {
        RequestRecord::capture(&InboundRequest::new(Method::GET, Uri::from_static(path)))
    }

    #[test]
    fn test_append_keeps_insertion_order() {
        let recorder = RequestRecorder::new();
        recorder.append(record("/one"));
        recorder.append(record("/two"));

        let paths: Vec<String> = recorder.snapshot().into_iter().map(|r| r.path).collect();
        assert_eq!(paths, vec!["/one", "/two"]);
    }

    #[test]
    fn test_reset_returns_empty_buffer() {
        let recorder = RequestRecorder::new();
        recorder.append(record("/one"));

        assert!(recorder.reset().is_empty());
        assert!(recorder.is_empty());
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let recorder = RequestRecorder::new();
        recorder.append(record("/one"));
        let snapshot = recorder.snapshot();
        recorder.append(record("/two"));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(recorder.len(), 2);
    }

    #[test]
    fn test_disabled_recorder_drops_records() {
        let recorder = RequestRecorder::with_enabled(false);
        recorder.append(record("/one"));
        assert!(recorder.is_empty());
    }

    #[test]
    fn test_concurrent_appends() {
        let recorder = Arc::new(RequestRecorder::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let recorder = Arc::clone(&recorder);
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        recorder.append(record("/c"));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(recorder.len(), 400);
    }

    #[test]
    fn test_reset_during_appends_returns_empty() {
        let recorder = Arc::new(RequestRecorder::new());
        let writer = {
            let recorder = Arc::clone(&recorder);
            std::thread::spawn(move || {
                for _ in 0..2000 {
                    recorder.append(record("/busy"));
                }
            })
        };
        for _ in 0..200 {
            assert!(recorder.reset().is_empty());
        }
        writer.join().unwrap();
    }
}
