//! compression/lzo1x/mod.rs
//! LZO1X bit-stream engine.
//!
//! Stream layout:
//! - optional first byte `> 17`: a literal run of `byte - 17` bytes
//! - instructions: literal runs and M1/M2/M3/M4 back-references, each
//!   back-reference carrying 0..=3 trailing literals in its low two bits
//! - end marker `11 00 00` (an M4 reference with distance zero)
//!
//! The engine speaks its own status vocabulary (`LzoError`); translation to
//! `CodecError` happens in `codecs::lzo`.

mod encode;
pub mod compress;
pub mod decompress;
pub mod workmem;

use std::fmt;
use std::sync::OnceLock;

pub use compress::{compress_fast, compress_thorough};
pub use decompress::decompress;
pub use workmem::WorkMemory;

/// Engine status codes, numbered as the published LZO constants.
#[repr(i32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LzoError {
    /// Generic failure, also reported by a failed `init`.
    Error             = -1,
    /// Stream ended before an instruction or literal run was complete.
    InputOverrun      = -4,
    /// Output region too small for the decoded or encoded data.
    OutputOverrun     = -5,
    /// Back-reference points before the start of the output.
    LookbehindOverrun = -6,
    /// Bytes left over after the end marker.
    InputNotConsumed  = -8,
}

impl fmt::Display for LzoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            LzoError::Error             => "lzo error",
            LzoError::InputOverrun      => "input overrun",
            LzoError::OutputOverrun     => "output overrun",
            LzoError::LookbehindOverrun => "lookbehind overrun",
            LzoError::InputNotConsumed  => "input not consumed",
        };
        write!(f, "{} ({})", msg, *self as i32)
    }
}

impl std::error::Error for LzoError {}

/// Largest output any compressor tier can produce for `len` input bytes.
pub const fn worst_compress(len: usize) -> usize {
    len + len / 16 + 64 + 3
}

static INIT: OnceLock<Result<(), LzoError>> = OnceLock::new();

const PROBE: &[u8] = b"lzo1x probe: abcabcabcabcabc 0000000000000000 lzo1x probe";

/// One-time engine self-check.
///
/// The result is computed once per process and cached; a failure is never
/// retried.
pub fn init() -> Result<(), LzoError> {
    *INIT.get_or_init(self_check)
}

fn self_check() -> Result<(), LzoError> {
    if usize::BITS < 32 || WorkMemory::BYTES == 0 {
        return Err(LzoError::Error);
    }

    let mut wrk = WorkMemory::new();
    let mut packed = vec![0u8; worst_compress(PROBE.len())];
    let mut unpacked = vec![0u8; PROBE.len()];

    let n = compress_fast(PROBE, &mut packed, &mut wrk)?;
    let m = decompress(&packed[..n], &mut unpacked)?;
    if m != PROBE.len() || unpacked != PROBE {
        return Err(LzoError::Error);
    }
    Ok(())
}
