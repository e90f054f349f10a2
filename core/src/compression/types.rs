//! compression/types.rs
//! Uniform call contract shared by both codec families.

use crate::types::{CodecError, CodecKind, CodecResult};

/// One-shot buffer codec.
///
/// Inputs are read-only for the duration of a call. Outputs are
/// caller-allocated; implementations never write past `dst.len()` and report
/// the number of bytes actually written.
///
/// `Sync` is required: a single instance may be shared between threads.
pub trait BufferCodec: Send + Sync {
    /// Speed/ratio selector: `LzoMode` or a zlib level.
    type Level: Copy;

    fn kind(&self) -> CodecKind;

    /// Compress `src` into `dst`, returning the compressed length.
    fn compress_into(&self, src: &[u8], level: Self::Level, dst: &mut [u8]) -> CodecResult<usize>;

    /// Decompress `src` into `dst`, returning the decompressed length.
    fn decompress_into(&self, src: &[u8], dst: &mut [u8]) -> CodecResult<usize>;

    /// Destination size that always suffices for `compress_into`.
    fn compress_bound(&self, src_len: usize) -> usize;

    fn compress_to_vec(&self, src: &[u8], level: Self::Level) -> CodecResult<Vec<u8>> {
        let mut out = vec![0u8; self.compress_bound(src.len())];
        let n = self.compress_into(src, level, &mut out)?;
        out.truncate(n);
        Ok(out)
    }

    /// Decompress into a buffer of the out-of-band recorded size.
    /// A stream that decodes to any other length is treated as corrupt.
    fn decompress_to_vec(&self, src: &[u8], original_len: usize) -> CodecResult<Vec<u8>> {
        let mut out = vec![0u8; original_len];
        let n = self.decompress_into(src, &mut out)?;
        if n != original_len {
            return Err(CodecError::CorruptInput);
        }
        Ok(out)
    }
}
