use std::fmt;
use num_enum::TryFromPrimitive;

use crate::types::CodecResult;

pub fn enum_name_or_hex<T>(raw: T::Primitive) -> String
where
    T: TryFromPrimitive + fmt::Debug,
    T::Primitive: fmt::LowerHex,
{
    match T::try_from_primitive(raw) {
        Ok(variant) => format!("{:?}", variant),
        Err(_) => format!("0x{:x}", raw),
    }
}

/// Byte count a finished call reports to its host: zero on any failure.
pub fn reported_len(result: &CodecResult<usize>) -> usize {
    match result {
        Ok(n) => *n,
        Err(_) => 0,
    }
}

/// Ratio of compressed to plaintext bytes, 0.0 when nothing was seen.
pub fn ratio(compressed: u64, plaintext: u64) -> f64 {
    if plaintext > 0 {
        compressed as f64 / plaintext as f64
    } else {
        0.0
    }
}
