//! bufcodec-core
//!
//! Resource-safe, error-safe buffer codecs.
//! Two independent families behind one synchronous contract:
//! LZO1X (fast / thorough) and zlib (DEFLATE).
//! No I/O, no framing, no FFI.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;

// Codecs and the LZO1X engine
pub mod compression;
pub mod telemetry;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::compression::{BufferCodec, LzoCodec, ZlibCodec};
    pub use crate::types::{CodecError, CodecKind, CodecResult, LzoMode, StatusCode};
}
