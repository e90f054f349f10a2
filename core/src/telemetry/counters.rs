//! telemetry/counters.rs
//! Per-codec call and byte counters.
//!
//! Codecs are shared by reference across threads, so counters are atomics
//! updated with relaxed ordering; a snapshot is a point-in-time read, not a
//! consistent cut.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::telemetry::snapshot::TelemetrySnapshot;
use crate::types::{CodecError, CodecKind};

#[derive(Debug, Default)]
pub struct CodecCounters {
    compress_calls: AtomicU64,
    decompress_calls: AtomicU64,
    failures: AtomicU64,
    corrupt_inputs: AtomicU64,
    bytes_plaintext: AtomicU64,
    bytes_compressed: AtomicU64,
}

impl CodecCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// One successful compression of `plain` bytes into `compressed` bytes.
    pub fn add_compress(&self, plain: usize, compressed: usize) {
        self.compress_calls.fetch_add(1, Ordering::Relaxed);
        self.bytes_plaintext.fetch_add(plain as u64, Ordering::Relaxed);
        self.bytes_compressed.fetch_add(compressed as u64, Ordering::Relaxed);
    }

    /// One successful decompression of `compressed` bytes into `plain` bytes.
    pub fn add_decompress(&self, compressed: usize, plain: usize) {
        self.decompress_calls.fetch_add(1, Ordering::Relaxed);
        self.bytes_plaintext.fetch_add(plain as u64, Ordering::Relaxed);
        self.bytes_compressed.fetch_add(compressed as u64, Ordering::Relaxed);
    }

    pub fn add_failure(&self, err: CodecError) {
        self.failures.fetch_add(1, Ordering::Relaxed);
        if err == CodecError::CorruptInput {
            self.corrupt_inputs.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self, codec: CodecKind) -> TelemetrySnapshot {
        TelemetrySnapshot::from_totals(
            codec,
            self.compress_calls.load(Ordering::Relaxed),
            self.decompress_calls.load(Ordering::Relaxed),
            self.failures.load(Ordering::Relaxed),
            self.corrupt_inputs.load(Ordering::Relaxed),
            self.bytes_plaintext.load(Ordering::Relaxed),
            self.bytes_compressed.load(Ordering::Relaxed),
        )
    }
}
