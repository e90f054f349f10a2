//! compression/codecs/mod.rs
//! The two codec families. Each owns its own resources; they share only the
//! status vocabulary and the `BufferCodec` contract.

pub mod lzo;
pub mod zlib;

pub use lzo::*;
pub use zlib::*;
