//! bufcodec (C ABI)
//!
//! Four per-buffer entry points over bufcodec-core, plus two sizing helpers.
//!
//! Buffer rules:
//! - `src` must be valid for `src_len` bytes; it may be NULL when `src_len` is 0.
//! - `*dst_len` is the destination capacity on entry and the number of bytes
//!   written on return (0 on any failure).
//! - The return value is a `StatusCode` (0 = success, negative = failure).
//!
//! # Safety
//! Callers are responsible for pointer validity, as with any C interface.
//! No panic crosses the boundary; one is reported as `InternalError`.
#![allow(non_snake_case)]
#![allow(clippy::not_unsafe_ptr_arg_deref)]

use std::panic::{self, AssertUnwindSafe};
use std::slice;
use std::sync::OnceLock;

use bufcodec_core::prelude::*;
use bufcodec_core::utils::reported_len;
use libc::{c_int, c_uint};
use tracing::{debug, error};

static LZO: OnceLock<LzoCodec> = OnceLock::new();
static ZLIB: OnceLock<ZlibCodec> = OnceLock::new();

/// Process-wide LZO codec. Its work memory is lock-guarded, so sharing one
/// instance between host threads is sound.
pub fn lzo_codec() -> &'static LzoCodec {
    LZO.get_or_init(LzoCodec::new)
}

pub fn zlib_codec() -> &'static ZlibCodec {
    ZLIB.get_or_init(ZlibCodec::new)
}

// ============================================================================
// Entry points
// ============================================================================

/// Decompresses an LZO1X stream.
///
/// # Arguments
/// * `src`, `src_len` - compressed input
/// * `dst` - destination buffer
/// * `dst_len` - in: capacity of `dst`; out: decompressed length
#[no_mangle]
pub extern "C" fn LZODecompress(
    src: *const u8,
    src_len: c_uint,
    dst: *mut u8,
    dst_len: *mut c_uint,
) -> c_int {
    boundary("LZODecompress", dst_len, |capacity| {
        let src = input(src, src_len)?;
        let dst = output(dst, capacity)?;
        lzo_codec().decompress(src, dst)
    })
}

/// Compresses with LZO1X. `fast` nonzero selects the fast tier.
///
/// A destination of `LZOWorstCaseSize(src_len)` bytes always suffices.
#[no_mangle]
pub extern "C" fn LZOCompress(
    src: *const u8,
    src_len: c_uint,
    dst: *mut u8,
    dst_len: *mut c_uint,
    fast: c_int,
) -> c_int {
    boundary("LZOCompress", dst_len, |capacity| {
        let src = input(src, src_len)?;
        let dst = output(dst, capacity)?;
        lzo_codec().compress(src, LzoMode::from_fast_flag(fast != 0), dst)
    })
}

/// Decompresses a zlib stream.
#[no_mangle]
pub extern "C" fn ZlibDecompress(
    src: *const u8,
    src_len: c_uint,
    dst: *mut u8,
    dst_len: *mut c_uint,
) -> c_int {
    boundary("ZlibDecompress", dst_len, |capacity| {
        let src = input(src, src_len)?;
        let dst = output(dst, capacity)?;
        zlib_codec().decompress(src, dst)
    })
}

/// Compresses into a zlib stream. `level` is -1 (default) or 0..=9.
#[no_mangle]
pub extern "C" fn ZlibCompress(
    level: c_int,
    src: *const u8,
    src_len: c_uint,
    dst: *mut u8,
    dst_len: *mut c_uint,
) -> c_int {
    boundary("ZlibCompress", dst_len, |capacity| {
        let src = input(src, src_len)?;
        let dst = output(dst, capacity)?;
        zlib_codec().compress(level, src, dst)
    })
}

/// Destination size that always suffices for `LZOCompress`. Saturates.
#[no_mangle]
pub extern "C" fn LZOWorstCaseSize(src_len: c_uint) -> c_uint {
    saturate(LzoCodec::worst_case_size(src_len as usize))
}

/// Destination size that always suffices for `ZlibCompress`. Saturates.
#[no_mangle]
pub extern "C" fn ZlibCompressBound(src_len: c_uint) -> c_uint {
    saturate(ZlibCodec::compress_bound(src_len as usize))
}

// ============================================================================
// Helpers
// ============================================================================

/// Reads the capacity, runs `op` with panics contained, then writes the
/// reported length back.
fn boundary(
    name: &'static str,
    dst_len: *mut c_uint,
    op: impl FnOnce(c_uint) -> CodecResult<usize>,
) -> c_int {
    if dst_len.is_null() {
        error!(entry = name, "null dst_len");
        return StatusCode::InternalError as c_int;
    }

    let capacity = unsafe { *dst_len };
    let result = panic::catch_unwind(AssertUnwindSafe(|| op(capacity))).unwrap_or_else(|_| {
        error!(entry = name, "panic contained at C boundary");
        Err(CodecError::InternalError)
    });

    // Written length never exceeds the c_uint capacity it came from.
    unsafe { *dst_len = reported_len(&result) as c_uint };

    let code = StatusCode::of(&result) as c_int;
    if code != StatusCode::Ok as c_int {
        debug!(entry = name, status = %StatusCode::describe(code), "call failed");
    }
    code
}

fn input<'a>(ptr: *const u8, len: c_uint) -> CodecResult<&'a [u8]> {
    if len == 0 {
        return Ok(&[]);
    }
    if ptr.is_null() {
        error!(len, "null source buffer");
        return Err(CodecError::InternalError);
    }
    Ok(unsafe { slice::from_raw_parts(ptr, len as usize) })
}

fn output<'a>(ptr: *mut u8, len: c_uint) -> CodecResult<&'a mut [u8]> {
    if len == 0 {
        return Ok(Default::default());
    }
    if ptr.is_null() {
        error!(len, "null destination buffer");
        return Err(CodecError::InternalError);
    }
    Ok(unsafe { slice::from_raw_parts_mut(ptr, len as usize) })
}

fn saturate(n: usize) -> c_uint {
    c_uint::try_from(n).unwrap_or(c_uint::MAX)
}
