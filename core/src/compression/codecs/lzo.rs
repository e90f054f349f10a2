//! codecs/lzo.rs
//! LZO1X codec boundary: work memory, staging, capacity checks.
//!
//! Design notes:
//! - One `WorkMemory` per codec instance, guarded by a mutex held for the
//!   whole compression call. It is re-zeroed before every compression.
//! - The engine compresses into a staging buffer sized to its worst case,
//!   then exactly the produced bytes are copied into the caller's slice.
//!   The staging `Vec` is dropped on every exit path.
//! - Decompression writes straight into the caller's slice; its length is
//!   the capacity bound the engine enforces.

use std::sync::{Mutex, MutexGuard};

use tracing::{debug, error, trace};

use crate::compression::lzo1x::{self, worst_compress, LzoError, WorkMemory};
use crate::compression::types::BufferCodec;
use crate::telemetry::{CodecCounters, TelemetrySnapshot};
use crate::types::{CodecError, CodecKind, CodecResult, LzoMode};

/// Decoder statuses seen by a caller.
impl From<LzoError> for CodecError {
    fn from(e: LzoError) -> Self {
        match e {
            LzoError::OutputOverrun => CodecError::OutputTooSmall,
            LzoError::InputOverrun
            | LzoError::LookbehindOverrun
            | LzoError::InputNotConsumed => CodecError::CorruptInput,
            LzoError::Error => CodecError::InternalError,
        }
    }
}

pub struct LzoCodec {
    work: Mutex<WorkMemory>,
    counters: CodecCounters,
}

impl LzoCodec {
    /// Allocate a codec with its own work memory.
    pub fn new() -> Self {
        Self {
            work: Mutex::new(WorkMemory::new()),
            counters: CodecCounters::new(),
        }
    }

    /// Engine setup check. Cheap after the first call; a failure is final.
    pub fn initialize() -> CodecResult<()> {
        lzo1x::init().map_err(|e| {
            error!(error = %e, "lzo engine failed to initialize");
            CodecError::InitializationFailed
        })
    }

    /// Staging size for `src_len` input bytes.
    pub fn worst_case_size(src_len: usize) -> usize {
        worst_compress(src_len)
    }

    /// Decompress `src` into `dst`, returning the decompressed length.
    ///
    /// `dst.len()` is the capacity: a stream that would write past it fails
    /// with `OutputTooSmall`. An empty `src` decodes to zero bytes.
    pub fn decompress(&self, src: &[u8], dst: &mut [u8]) -> CodecResult<usize> {
        let result = Self::initialize().and_then(|_| {
            if src.is_empty() {
                return Ok(0);
            }
            lzo1x::decompress(src, dst).map_err(|e| {
                debug!(error = %e, src_len = src.len(), capacity = dst.len(), "lzo decompress failed");
                CodecError::from(e)
            })
        });
        self.record(result, |c, n| c.add_decompress(src.len(), n))
    }

    /// Compress `src` into `dst`, returning the compressed length.
    ///
    /// Fails with `OutputTooSmall` when the produced stream does not fit in
    /// `dst`; nothing is written to `dst` in that case.
    pub fn compress(&self, src: &[u8], mode: LzoMode, dst: &mut [u8]) -> CodecResult<usize> {
        let result = Self::initialize().and_then(|_| self.compress_staged(src, mode, dst));
        self.record(result, |c, n| c.add_compress(src.len(), n))
    }

    fn compress_staged(&self, src: &[u8], mode: LzoMode, dst: &mut [u8]) -> CodecResult<usize> {
        let mut staging = vec![0u8; worst_compress(src.len())];

        let produced = {
            let mut wrk = self.lock_work();
            wrk.clear();
            match mode {
                LzoMode::Fast => lzo1x::compress_fast(src, &mut staging, &mut wrk),
                LzoMode::Thorough => lzo1x::compress_thorough(src, &mut staging, &mut wrk),
            }
        };

        let n = produced.map_err(|e| {
            error!(error = %e, %mode, src_len = src.len(), "lzo compressor failed");
            CodecError::InternalError
        })?;

        let capacity = dst.len();
        let out = dst.get_mut(..n).ok_or_else(|| {
            debug!(needed = n, capacity, "lzo output buffer too small");
            CodecError::OutputTooSmall
        })?;
        out.copy_from_slice(&staging[..n]);
        trace!(%mode, src_len = src.len(), out_len = n, "lzo compressed");
        Ok(n)
    }

    /// The area is re-zeroed before use, so a lock poisoned by a panicking
    /// caller is still safe to take over.
    fn lock_work(&self) -> MutexGuard<'_, WorkMemory> {
        self.work.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(
        &self,
        result: CodecResult<usize>,
        on_ok: impl FnOnce(&CodecCounters, usize),
    ) -> CodecResult<usize> {
        match result {
            Ok(n) => on_ok(&self.counters, n),
            Err(e) => self.counters.add_failure(e),
        }
        result
    }

    pub fn telemetry(&self) -> TelemetrySnapshot {
        self.counters.snapshot(CodecKind::Lzo)
    }
}

impl Default for LzoCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl BufferCodec for LzoCodec {
    type Level = LzoMode;

    fn kind(&self) -> CodecKind {
        CodecKind::Lzo
    }

    fn compress_into(&self, src: &[u8], level: LzoMode, dst: &mut [u8]) -> CodecResult<usize> {
        self.compress(src, level, dst)
    }

    fn decompress_into(&self, src: &[u8], dst: &mut [u8]) -> CodecResult<usize> {
        self.decompress(src, dst)
    }

    fn compress_bound(&self, src_len: usize) -> usize {
        Self::worst_case_size(src_len)
    }
}
