use std::fmt;
use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};

use crate::{constants::status_codes, utils::enum_name_or_hex};

/// Outcome of a codec call as seen by a host.
/// - `#[repr(i32)]` so the value crosses the C boundary unchanged.
/// - Carries no payload beyond its kind.
#[repr(i32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum StatusCode {
    Ok                   = status_codes::OK,
    InitializationFailed = status_codes::INITIALIZATION_FAILED,
    CorruptInput         = status_codes::CORRUPT_INPUT,
    OutputTooSmall       = status_codes::OUTPUT_TOO_SMALL,
    InternalError        = status_codes::INTERNAL_ERROR,
}

impl StatusCode {
    /// Status of a finished call.
    pub fn of<T>(result: &CodecResult<T>) -> Self {
        match result {
            Ok(_) => StatusCode::Ok,
            Err(e) => e.status(),
        }
    }

    pub fn is_ok(self) -> bool {
        self == StatusCode::Ok
    }

    /// Variant name for known raw values, hex otherwise.
    pub fn describe(raw: i32) -> String {
        enum_name_or_hex::<StatusCode>(raw)
    }
}

impl From<CodecError> for StatusCode {
    fn from(e: CodecError) -> Self {
        e.status()
    }
}

/// Failure kinds shared by both codec families.
///
/// Every failure is returned to the immediate caller; nothing is recovered
/// internally.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum CodecError {
    /// The underlying library could not set itself up. Fatal, not retryable.
    #[error("codec library failed to initialize")]
    InitializationFailed,

    /// Compressed data is malformed or truncated.
    #[error("compressed input is corrupt or truncated")]
    CorruptInput,

    /// Destination capacity cannot hold the result.
    #[error("output buffer too small")]
    OutputTooSmall,

    /// Unexpected status from the underlying algorithm.
    #[error("internal codec error")]
    InternalError,
}

impl CodecError {
    pub fn status(self) -> StatusCode {
        match self {
            CodecError::InitializationFailed => StatusCode::InitializationFailed,
            CodecError::CorruptInput         => StatusCode::CorruptInput,
            CodecError::OutputTooSmall       => StatusCode::OutputTooSmall,
            CodecError::InternalError        => StatusCode::InternalError,
        }
    }
}

pub type CodecResult<T> = Result<T, CodecError>;

/// LZO compression tier.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum LzoMode {
    /// Single-pass greedy matching.
    #[default]
    Fast,
    /// Exhaustive chain search with lazy evaluation. Slower, smaller output.
    Thorough,
}

impl LzoMode {
    /// Hosts pass an integer flag: nonzero selects the fast tier.
    pub fn from_fast_flag(fast: bool) -> Self {
        if fast { LzoMode::Fast } else { LzoMode::Thorough }
    }
}

impl fmt::Display for LzoMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LzoMode::Fast     => f.write_str("fast"),
            LzoMode::Thorough => f.write_str("thorough"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodecKind {
    Lzo,
    Zlib,
}

impl fmt::Display for CodecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecKind::Lzo  => f.write_str("lzo"),
            CodecKind::Zlib => f.write_str("zlib"),
        }
    }
}
