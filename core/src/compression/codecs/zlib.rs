//! codecs/zlib.rs
//! zlib (DEFLATE with zlib header) codec boundary via flate2.
//!
//! Both directions run flate2's raw `Compress` / `Decompress` state machines
//! directly over the caller's slices, so the destination capacity is enforced
//! natively and nothing is buffered behind the caller's back. A fresh state
//! is built per call; the codec itself only holds counters.

use flate2::{Compress, Compression, Decompress, FlushCompress, FlushDecompress, Status};
use tracing::{debug, error, trace};

use crate::compression::types::BufferCodec;
use crate::constants::{zlib_levels, DEFAULT_LEVEL_ZLIB};
use crate::telemetry::{CodecCounters, TelemetrySnapshot};
use crate::types::{CodecError, CodecKind, CodecResult};

/// Resolve a zlib integer level. Out-of-range levels are the stream error
/// zlib itself would report.
pub fn zlib_level(level: i32) -> CodecResult<Compression> {
    match level {
        zlib_levels::DEFAULT => Ok(Compression::new(DEFAULT_LEVEL_ZLIB)),
        zlib_levels::NO_COMPRESSION..=zlib_levels::BEST_COMPRESSION => Ok(Compression::new(level as u32)),
        other => {
            error!(level = other, "invalid zlib compression level");
            Err(CodecError::InternalError)
        }
    }
}

#[derive(Default)]
pub struct ZlibCodec {
    counters: CodecCounters,
}

impl ZlibCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Destination size that always suffices for `compress`.
    ///
    /// zlib's own `compressBound` is too tight for the deflate backend: on
    /// incompressible input its fast levels run a little past it. This bound
    /// covers every level and is never below zlib's.
    pub fn compress_bound(src_len: usize) -> usize {
        src_len + (src_len >> 8) + 64
    }

    /// Compress `src` into `dst` at `level` (`-1` default, `0..=9`).
    /// On failure nothing meaningful is left in `dst`.
    pub fn compress(&self, level: i32, src: &[u8], dst: &mut [u8]) -> CodecResult<usize> {
        let result = zlib_level(level).and_then(|lvl| deflate_into(lvl, src, dst));
        match result {
            Ok(n) => {
                trace!(level, src_len = src.len(), out_len = n, "zlib compressed");
                self.counters.add_compress(src.len(), n);
            }
            Err(e) => self.counters.add_failure(e),
        }
        result
    }

    /// Decompress `src` into `dst`; `dst.len()` is the capacity.
    /// An empty `src` decodes to zero bytes.
    pub fn decompress(&self, src: &[u8], dst: &mut [u8]) -> CodecResult<usize> {
        let result = if src.is_empty() { Ok(0) } else { inflate_into(src, dst) };
        match result {
            Ok(n) => {
                trace!(src_len = src.len(), out_len = n, "zlib decompressed");
                self.counters.add_decompress(src.len(), n);
            }
            Err(e) => self.counters.add_failure(e),
        }
        result
    }

    pub fn telemetry(&self) -> TelemetrySnapshot {
        self.counters.snapshot(CodecKind::Zlib)
    }
}

fn deflate_into(level: Compression, src: &[u8], dst: &mut [u8]) -> CodecResult<usize> {
    let mut z = Compress::new(level, true);

    loop {
        let consumed = z.total_in() as usize;
        let written = z.total_out() as usize;

        let status = z
            .compress(&src[consumed..], &mut dst[written..], FlushCompress::Finish)
            .map_err(|e| {
                error!(error = %e, "zlib deflate failed");
                CodecError::InternalError
            })?;

        let now_written = z.total_out() as usize;
        match status {
            Status::StreamEnd => return Ok(now_written),
            Status::Ok | Status::BufError => {
                let stalled = z.total_in() as usize == consumed && now_written == written;
                if now_written == dst.len() || stalled {
                    debug!(capacity = dst.len(), src_len = src.len(), "zlib output buffer too small");
                    return Err(CodecError::OutputTooSmall);
                }
            }
        }
    }
}

/// Mirrors zlib's `uncompress`: running out of output is `OutputTooSmall`,
/// stalling with room left (truncated stream) or a data error is
/// `CorruptInput`.
fn inflate_into(src: &[u8], dst: &mut [u8]) -> CodecResult<usize> {
    let mut z = Decompress::new(true);

    loop {
        let consumed = z.total_in() as usize;
        let written = z.total_out() as usize;

        let status = z
            .decompress(&src[consumed..], &mut dst[written..], FlushDecompress::Finish)
            .map_err(|e| {
                debug!(error = %e, src_len = src.len(), "zlib inflate failed");
                CodecError::CorruptInput
            })?;

        let now_written = z.total_out() as usize;
        match status {
            Status::StreamEnd => return Ok(now_written),
            Status::Ok | Status::BufError => {
                if now_written == dst.len() {
                    debug!(capacity = dst.len(), src_len = src.len(), "zlib output buffer too small");
                    return Err(CodecError::OutputTooSmall);
                }
                if z.total_in() as usize == consumed && now_written == written {
                    debug!(src_len = src.len(), "zlib stream truncated");
                    return Err(CodecError::CorruptInput);
                }
            }
        }
    }
}

impl BufferCodec for ZlibCodec {
    type Level = i32;

    fn kind(&self) -> CodecKind {
        CodecKind::Zlib
    }

    fn compress_into(&self, src: &[u8], level: i32, dst: &mut [u8]) -> CodecResult<usize> {
        self.compress(level, src, dst)
    }

    fn decompress_into(&self, src: &[u8], dst: &mut [u8]) -> CodecResult<usize> {
        self.decompress(src, dst)
    }

    fn compress_bound(&self, src_len: usize) -> usize {
        Self::compress_bound(src_len)
    }
}
