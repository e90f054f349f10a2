//! compression/lzo1x/compress.rs
//! LZO1X compressors.
//!
//! ## Tiers
//!
//! - **Fast**: one hash probe per position into a single-entry table, first
//!   hit wins, literal stretches are skipped at an accelerating stride.
//! - **Thorough**: hash chains over 3-byte prefixes, the whole chain (up to
//!   `LZO1X_MAX_CHAIN` links) is searched for the longest match, and a match
//!   is deferred by one byte when the next position has a longer one.
//!
//! Both tiers write only through a bounded `Sink`; a destination smaller than
//! `worst_compress(src.len())` may fail with `OutputOverrun`, never overflow.

use crate::compression::constants::{
    lzo1x_limits::{M4_MAX_OFFSET, MIN_MATCH},
    LZO1X_FAST_DICT_BITS, LZO1X_HEAD_BITS, LZO1X_MAX_CHAIN, LZO1X_NICE_LEN, LZO1X_WINDOW_SIZE,
};

use super::encode::{emit_literals, emit_match, finish, worth_encoding, Sink};
use super::{LzoError, WorkMemory};

const WINDOW_MASK: usize = LZO1X_WINDOW_SIZE - 1;

#[inline(always)]
fn hash4(src: &[u8], pos: usize, bits: u32) -> usize {
    let v = u32::from_le_bytes([src[pos], src[pos + 1], src[pos + 2], src[pos + 3]]);
    (v.wrapping_mul(0x9e37_79b1) >> (32 - bits)) as usize
}

#[inline(always)]
fn hash3(src: &[u8], pos: usize) -> usize {
    let v = u32::from_le_bytes([src[pos], src[pos + 1], src[pos + 2], 0]);
    (v.wrapping_mul(0x9e37_79b1) >> (32 - LZO1X_HEAD_BITS)) as usize
}

/// Length of the common prefix of `src[a..]` and `src[b..]`, `a < b`.
#[inline]
fn common_len(src: &[u8], a: usize, b: usize) -> usize {
    src[a..]
        .iter()
        .zip(&src[b..])
        .take_while(|(x, y)| x == y)
        .count()
}

/// Greedy single-probe compressor.
pub fn compress_fast(src: &[u8], dst: &mut [u8], wrk: &mut WorkMemory) -> Result<usize, LzoError> {
    let mut sink = Sink::new(dst);
    let dict = &mut wrk.head[..1 << LZO1X_FAST_DICT_BITS];

    let mut ip = 0usize;
    let mut lit_start = 0usize;

    while ip + 4 <= src.len() {
        let h = hash4(src, ip, LZO1X_FAST_DICT_BITS);
        let candidate = dict[h];
        dict[h] = ip + 1;

        if candidate != 0 {
            let m = candidate - 1;
            let off = ip - m;
            if off <= M4_MAX_OFFSET && src[m..m + 4] == src[ip..ip + 4] {
                let len = 4 + common_len(src, m + 4, ip + 4);
                let lit_len = ip - lit_start;
                emit_literals(&mut sink, &src[lit_start..ip])?;
                emit_match(&mut sink, len, off, lit_len)?;
                ip += len;
                lit_start = ip;
                continue;
            }
        }

        ip += 1 + ((ip - lit_start) >> 5);
    }

    finish(sink, &src[lit_start..])
}

/// Hash-chain match finder over the full work area.
struct ChainFinder<'s, 'w> {
    src: &'s [u8],
    head: &'w mut [usize],
    chain: &'w mut [usize],
}

impl<'s, 'w> ChainFinder<'s, 'w> {
    fn new(src: &'s [u8], wrk: &'w mut WorkMemory) -> Self {
        Self {
            src,
            head: &mut wrk.head,
            chain: &mut wrk.chain,
        }
    }

    #[inline]
    fn insert(&mut self, pos: usize) {
        if pos + MIN_MATCH > self.src.len() {
            return;
        }
        let h = hash3(self.src, pos);
        self.chain[pos & WINDOW_MASK] = self.head[h];
        self.head[h] = pos + 1;
    }

    /// Longest worthwhile match for `pos` among already inserted positions.
    /// Returns `(len, off)`.
    fn find(&self, pos: usize, last_lit: usize) -> Option<(usize, usize)> {
        let src = self.src;
        if pos + MIN_MATCH > src.len() {
            return None;
        }

        let mut best_len = MIN_MATCH - 1;
        let mut best_off = 0;
        let mut candidate = self.head[hash3(src, pos)];
        let mut depth = 0;

        while candidate != 0 && depth < LZO1X_MAX_CHAIN {
            let m = candidate - 1;
            let off = pos - m;
            if off > M4_MAX_OFFSET {
                break;
            }
            if pos + best_len >= src.len() {
                break;
            }

            if src[m + best_len] == src[pos + best_len] {
                let len = common_len(src, m, pos);
                if len > best_len && worth_encoding(len, off, last_lit) {
                    best_len = len;
                    best_off = off;
                    if len >= LZO1X_NICE_LEN {
                        break;
                    }
                }
            }

            candidate = self.chain[m & WINDOW_MASK];
            depth += 1;
        }

        if best_off == 0 { None } else { Some((best_len, best_off)) }
    }
}

/// Exhaustive chain-search compressor with one-step lazy evaluation.
pub fn compress_thorough(src: &[u8], dst: &mut [u8], wrk: &mut WorkMemory) -> Result<usize, LzoError> {
    let mut sink = Sink::new(dst);
    let mut finder = ChainFinder::new(src, wrk);

    let mut ip = 0usize;
    let mut lit_start = 0usize;

    while ip + MIN_MATCH <= src.len() {
        let lit_len = ip - lit_start;
        let found = finder.find(ip, lit_len);
        finder.insert(ip);

        let Some((len, off)) = found else {
            ip += 1;
            continue;
        };

        if len < LZO1X_NICE_LEN {
            if let Some((next_len, _)) = finder.find(ip + 1, lit_len + 1) {
                if next_len > len {
                    ip += 1;
                    continue;
                }
            }
        }

        emit_literals(&mut sink, &src[lit_start..ip])?;
        emit_match(&mut sink, len, off, lit_len)?;
        for p in ip + 1..ip + len {
            finder.insert(p);
        }
        ip += len;
        lit_start = ip;
    }

    finish(sink, &src[lit_start..])
}
