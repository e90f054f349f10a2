//! compression/lzo1x/decompress.rs
//! Capacity-bounded LZO1X decoder.
//!
//! Every read is checked against the source length and every write against
//! the destination length, so a malformed or hostile stream ends in an
//! `LzoError`, never in an out-of-bounds access.

use crate::compression::constants::lzo1x_limits::{M2_MAX_OFFSET, M3_MAX_OFFSET};

use super::LzoError;

struct Reader<'a> {
    src: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    #[inline]
    fn byte(&mut self) -> Result<usize, LzoError> {
        let b = *self.src.get(self.pos).ok_or(LzoError::InputOverrun)?;
        self.pos += 1;
        Ok(b as usize)
    }

    #[inline]
    fn le16(&mut self) -> Result<usize, LzoError> {
        let lo = self.byte()?;
        let hi = self.byte()?;
        Ok(lo | (hi << 8))
    }

    /// Zero bytes count 255 each, the first nonzero byte ends the run.
    fn run_length(&mut self) -> Result<usize, LzoError> {
        let mut n = 0usize;
        loop {
            match self.byte()? {
                0 => n += 255,
                b => return Ok(n + b),
            }
        }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], LzoError> {
        let end = self.pos.checked_add(n).ok_or(LzoError::InputOverrun)?;
        let bytes = self.src.get(self.pos..end).ok_or(LzoError::InputOverrun)?;
        self.pos = end;
        Ok(bytes)
    }

    fn exhausted(&self) -> bool {
        self.pos >= self.src.len()
    }
}

struct Writer<'a> {
    dst: &'a mut [u8],
    pos: usize,
}

impl<'a> Writer<'a> {
    fn literals(&mut self, bytes: &[u8]) -> Result<(), LzoError> {
        let end = self.pos + bytes.len();
        let out = self.dst.get_mut(self.pos..end).ok_or(LzoError::OutputOverrun)?;
        out.copy_from_slice(bytes);
        self.pos = end;
        Ok(())
    }

    /// Copy `len` bytes from `dist` back; source and target may overlap.
    fn back_reference(&mut self, dist: usize, len: usize) -> Result<(), LzoError> {
        if dist == 0 || dist > self.pos {
            return Err(LzoError::LookbehindOverrun);
        }
        let end = match self.pos.checked_add(len) {
            Some(end) if end <= self.dst.len() => end,
            _ => return Err(LzoError::OutputOverrun),
        };
        let from = self.pos - dist;
        if dist >= len {
            self.dst.copy_within(from..from + len, self.pos);
        } else {
            for i in 0..len {
                self.dst[self.pos + i] = self.dst[from + i];
            }
        }
        self.pos = end;
        Ok(())
    }
}

/// Decode `src` into `dst`, returning the number of bytes written.
pub fn decompress(src: &[u8], dst: &mut [u8]) -> Result<usize, LzoError> {
    let mut input = Reader { src, pos: 0 };
    let mut out = Writer { dst, pos: 0 };

    // Trailing literals copied after the previous instruction; 4 means the
    // previous instruction was itself a literal run.
    let mut state = 0usize;

    let first = *src.first().ok_or(LzoError::InputOverrun)? as usize;
    if first > 17 {
        input.pos = 1;
        let n = first - 17;
        out.literals(input.take(n)?)?;
        state = n.min(4);
    }

    loop {
        let inst = input.byte()?;

        let (len, dist, trailing) = if inst >= 64 {
            // M2: 3..=8 bytes within 2 KiB
            let next = input.byte()?;
            let len = (inst >> 5) + 1;
            let dist = ((inst >> 2) & 7) + (next << 3) + 1;
            (len, dist, inst & 3)
        } else if inst >= 32 {
            // M3: any length within 16 KiB
            let mut len = inst & 31;
            if len == 0 {
                len = 31 + input.run_length()?;
            }
            let word = input.le16()?;
            (len + 2, (word >> 2) + 1, word & 3)
        } else if inst >= 16 {
            // M4: any length within 48 KiB, distance zero ends the stream
            let mut len = inst & 7;
            if len == 0 {
                len = 7 + input.run_length()?;
            }
            let word = input.le16()?;
            let dist = ((inst & 8) << 11) + (word >> 2);
            if dist == 0 {
                break;
            }
            (len + 2, dist + M3_MAX_OFFSET, word & 3)
        } else if state == 0 {
            // Literal run of 4 or more bytes
            let mut n = inst;
            if n == 0 {
                n = 15 + input.run_length()?;
            }
            out.literals(input.take(n + 3)?)?;
            state = 4;
            continue;
        } else if state < 4 {
            // M1: 2 bytes within 1 KiB, after a short literal tail
            let next = input.byte()?;
            (2, (inst >> 2) + (next << 2) + 1, inst & 3)
        } else {
            // M1: 3 bytes in the 2..3 KiB band, after a literal run
            let next = input.byte()?;
            (3, (inst >> 2) + (next << 2) + M2_MAX_OFFSET + 1, inst & 3)
        };

        out.back_reference(dist, len)?;
        out.literals(input.take(trailing)?)?;
        state = trailing;
    }

    if input.exhausted() {
        Ok(out.pos)
    } else {
        Err(LzoError::InputNotConsumed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_hand_built_stream() {
        // "abc" + M2(len 6, dist 3) + end marker
        let stream = [20, b'a', b'b', b'c', 0xa8, 0x00, 0x11, 0x00, 0x00];
        let mut out = [0u8; 9];
        assert_eq!(decompress(&stream, &mut out), Ok(9));
        assert_eq!(&out, b"abcabcabc");
    }

    #[test]
    fn end_marker_alone_is_empty_output() {
        let mut out = [0u8; 0];
        assert_eq!(decompress(&[0x11, 0x00, 0x00], &mut out), Ok(0));
    }

    #[test]
    fn empty_source_is_input_overrun() {
        let mut out = [0u8; 4];
        assert_eq!(decompress(&[], &mut out), Err(LzoError::InputOverrun));
    }

    #[test]
    fn missing_end_marker_is_input_overrun() {
        let stream = [20, b'a', b'b', b'c', 0xa8, 0x00];
        let mut out = [0u8; 16];
        assert_eq!(decompress(&stream, &mut out), Err(LzoError::InputOverrun));
    }

    #[test]
    fn short_destination_is_output_overrun() {
        let stream = [20, b'a', b'b', b'c', 0xa8, 0x00, 0x11, 0x00, 0x00];
        let mut out = [0u8; 8];
        assert_eq!(decompress(&stream, &mut out), Err(LzoError::OutputOverrun));
    }

    #[test]
    fn reference_before_start_is_lookbehind_overrun() {
        // one literal, then M2 with distance 4
        let stream = [18, b'x', 0x6c, 0x00, 0x11, 0x00, 0x00];
        let mut out = [0u8; 16];
        assert_eq!(decompress(&stream, &mut out), Err(LzoError::LookbehindOverrun));
    }

    #[test]
    fn trailing_garbage_is_input_not_consumed() {
        let stream = [0x11, 0x00, 0x00, 0xff];
        let mut out = [0u8; 4];
        assert_eq!(decompress(&stream, &mut out), Err(LzoError::InputNotConsumed));
    }

    #[test]
    fn decodes_short_m1_after_literal_tail() {
        // "ab" + M2(len 3, dist 2) carrying one trailing literal "z",
        // then the two-byte M1 form (len 2, dist 1)
        let stream = [
            19, b'a', b'b',
            ((3 - 1) << 5) | (1 << 2) | 1, 0x00, b'z',
            0x00, 0x00,
            0x11, 0x00, 0x00,
        ];
        let mut out = [0u8; 8];
        assert_eq!(decompress(&stream, &mut out), Ok(8));
        assert_eq!(&out, b"ababazzz");
    }
}
