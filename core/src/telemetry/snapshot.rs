//! telemetry/snapshot.rs
//! Immutable telemetry view of one codec instance.

use serde::{Deserialize, Serialize};

use crate::types::CodecKind;
use crate::utils::ratio;

/// Point-in-time counters of one codec instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub codec: CodecKind,
    pub compress_calls: u64,
    pub decompress_calls: u64,
    pub failures: u64,
    pub corrupt_inputs: u64,
    pub bytes_plaintext: u64,
    pub bytes_compressed: u64,
    pub compression_ratio: f64,
}

impl TelemetrySnapshot {
    pub fn from_totals(
        codec: CodecKind,
        compress_calls: u64,
        decompress_calls: u64,
        failures: u64,
        corrupt_inputs: u64,
        bytes_plaintext: u64,
        bytes_compressed: u64,
    ) -> Self {
        Self {
            codec,
            compress_calls,
            decompress_calls,
            failures,
            corrupt_inputs,
            bytes_plaintext,
            bytes_compressed,
            compression_ratio: ratio(bytes_compressed, bytes_plaintext),
        }
    }

    pub fn successful_calls(&self) -> u64 {
        self.compress_calls + self.decompress_calls
    }

    /// Internal consistency:
    /// - `corrupt_inputs <= failures`
    /// - ratio is a finite, non-negative number
    pub fn sanity_check(&self) -> bool {
        self.corrupt_inputs <= self.failures
            && self.compression_ratio.is_finite()
            && self.compression_ratio >= 0.0
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
