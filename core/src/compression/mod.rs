//! compression/mod.rs
//! Buffer codecs and the engine they wrap.
//!
//! - `lzo1x` is the LZ77-family engine; the codec layer treats it as a black
//!   box with its own status vocabulary.
//! - `codecs` holds the boundary types hosts call: work-memory ownership,
//!   staging buffers, capacity checks and status translation.

pub mod constants;
pub mod types;
pub mod lzo1x;
pub mod codecs;

pub use constants::*;
pub use types::*;
pub use codecs::*;
