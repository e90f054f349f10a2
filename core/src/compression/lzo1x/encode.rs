//! compression/lzo1x/encode.rs
//! Instruction writer shared by both compressor tiers.

use crate::compression::constants::{
    lzo1x_limits::*, lzo1x_markers, LZO1X_FIRST_RUN_MAX,
};
use crate::constants::LZO_EOS_MARKER;

use super::LzoError;

/// Bounded writer over the destination region.
pub(super) struct Sink<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> Sink<'a> {
    pub(super) fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub(super) fn len(&self) -> usize {
        self.pos
    }

    #[inline]
    fn push(&mut self, b: u8) -> Result<(), LzoError> {
        let slot = self.buf.get_mut(self.pos).ok_or(LzoError::OutputOverrun)?;
        *slot = b;
        self.pos += 1;
        Ok(())
    }

    fn extend(&mut self, bytes: &[u8]) -> Result<(), LzoError> {
        let end = self.pos + bytes.len();
        let dst = self.buf.get_mut(self.pos..end).ok_or(LzoError::OutputOverrun)?;
        dst.copy_from_slice(bytes);
        self.pos = end;
        Ok(())
    }

    /// OR `bits` into the byte `back` positions behind the cursor.
    fn or_back(&mut self, back: usize, bits: u8) -> Result<(), LzoError> {
        let idx = self.pos.checked_sub(back).ok_or(LzoError::Error)?;
        self.buf[idx] |= bits;
        Ok(())
    }

    /// Length extension: a zero byte per 255, then the remainder (>= 1).
    fn push_run_length(&mut self, mut n: usize) -> Result<(), LzoError> {
        while n > 255 {
            self.push(0)?;
            n -= 255;
        }
        self.push(n as u8)
    }
}

/// Emit a literal run.
///
/// Runs of 1..=3 bytes after a back-reference ride in the low two bits of
/// that reference (always the second-to-last byte written).
pub(super) fn emit_literals(sink: &mut Sink<'_>, lits: &[u8]) -> Result<(), LzoError> {
    let n = lits.len();
    if n == 0 {
        return Ok(());
    }

    if sink.len() == 0 && n <= LZO1X_FIRST_RUN_MAX {
        sink.push(17 + n as u8)?;
    } else if n <= 3 {
        sink.or_back(2, n as u8)?;
    } else if n <= 18 {
        sink.push((n - 3) as u8)?;
    } else {
        sink.push(0)?;
        sink.push_run_length(n - 18)?;
    }
    sink.extend(lits)
}

/// Emit a back-reference of `len` bytes at distance `off`.
///
/// `last_lit` is the length of the literal run emitted just before; the
/// short M1 form for 3-byte matches is only legal after a run of four or more.
pub(super) fn emit_match(
    sink: &mut Sink<'_>,
    len: usize,
    off: usize,
    last_lit: usize,
) -> Result<(), LzoError> {
    debug_assert!(len >= MIN_MATCH && off >= 1 && off <= M4_MAX_OFFSET);

    if len <= M2_MAX_LEN && off <= M2_MAX_OFFSET {
        let o = off - 1;
        sink.push((((len - 1) << 5) | ((o & 7) << 2)) as u8)?;
        sink.push((o >> 3) as u8)
    } else if len == MIN_MATCH && off <= M1_MAX_OFFSET + M2_MAX_OFFSET && last_lit >= 4 {
        let o = off - 1 - M2_MAX_OFFSET;
        sink.push(lzo1x_markers::M1 | ((o & 3) << 2) as u8)?;
        sink.push((o >> 2) as u8)
    } else if off <= M3_MAX_OFFSET {
        let o = off - 1;
        if len <= M3_MAX_LEN {
            sink.push(lzo1x_markers::M3 | (len - 2) as u8)?;
        } else {
            sink.push(lzo1x_markers::M3)?;
            sink.push_run_length(len - M3_MAX_LEN)?;
        }
        sink.push((o << 2) as u8)?;
        sink.push((o >> 6) as u8)
    } else {
        let o = off - M3_MAX_OFFSET;
        let high = ((o & 0x4000) >> 11) as u8;
        if len <= M4_MAX_LEN {
            sink.push(lzo1x_markers::M4 | high | (len - 2) as u8)?;
        } else {
            sink.push(lzo1x_markers::M4 | high)?;
            sink.push_run_length(len - M4_MAX_LEN)?;
        }
        sink.push((o << 2) as u8)?;
        sink.push(((o >> 6) & 0xff) as u8)
    }
}

/// Flush trailing literals and write the end marker.
pub(super) fn finish(mut sink: Sink<'_>, tail: &[u8]) -> Result<usize, LzoError> {
    emit_literals(&mut sink, tail)?;
    sink.extend(&LZO_EOS_MARKER)?;
    Ok(sink.len())
}

/// Whether a match is worth encoding: 3-byte matches only pay off in the
/// two-byte M1/M2 forms.
#[inline]
pub(super) fn worth_encoding(len: usize, off: usize, last_lit: usize) -> bool {
    if len > MIN_MATCH {
        return true;
    }
    len == MIN_MATCH
        && (off <= M2_MAX_OFFSET || (off <= M1_MAX_OFFSET + M2_MAX_OFFSET && last_lit >= 4))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_run_uses_single_byte_header() {
        let mut buf = [0u8; 16];
        let mut sink = Sink::new(&mut buf);
        emit_literals(&mut sink, b"abc").unwrap();
        assert_eq!(sink.len(), 4);
        assert_eq!(&buf[..4], &[20, b'a', b'b', b'c']);
    }

    #[test]
    fn short_run_after_match_is_stuffed() {
        let mut buf = [0u8; 16];
        let mut sink = Sink::new(&mut buf);
        emit_literals(&mut sink, b"abcd").unwrap();
        emit_match(&mut sink, 4, 4, 4).unwrap();
        emit_literals(&mut sink, b"xy").unwrap();
        let n = sink.len();
        // M2: len 4, off 4 -> ((4-1) << 5) | ((3 & 7) << 2) = 0x6c, then 3 >> 3 = 0
        assert_eq!(&buf[5..n], &[0x6c | 2, 0x00, b'x', b'y']);
    }

    #[test]
    fn long_run_uses_length_extension() {
        let lits = vec![7u8; 300];
        let mut buf = vec![0u8; 400];
        let mut sink = Sink::new(&mut buf);
        sink.push(0xaa).unwrap();
        emit_literals(&mut sink, &lits).unwrap();
        // 300 - 18 = 282 = 255 + 27
        assert_eq!(&buf[1..4], &[0, 0, 27]);
    }

    #[test]
    fn sink_refuses_to_overrun() {
        let mut buf = [0u8; 2];
        let mut sink = Sink::new(&mut buf);
        assert_eq!(emit_literals(&mut sink, b"abcd"), Err(LzoError::OutputOverrun));
    }

    #[test]
    fn three_byte_matches_need_short_encoding() {
        assert!(worth_encoding(3, M2_MAX_OFFSET, 0));
        assert!(worth_encoding(3, M2_MAX_OFFSET + 1, 4));
        assert!(!worth_encoding(3, M2_MAX_OFFSET + 1, 3));
        assert!(!worth_encoding(3, M3_MAX_OFFSET, 9));
        assert!(worth_encoding(4, M4_MAX_OFFSET, 0));
    }
}
