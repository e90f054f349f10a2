//! compression/lzo1x/workmem.rs
//! Scratch tables for the match finders.

use std::mem::size_of;

use crate::compression::constants::{LZO1X_HEAD_BITS, LZO1X_WINDOW_SIZE};

const HEAD_SIZE: usize = 1 << LZO1X_HEAD_BITS;
const CHAIN_SIZE: usize = LZO1X_WINDOW_SIZE;

/// Match-finder work area.
///
/// Slots hold `position + 1`; zero means empty. A table left over from a
/// previous call would hand the next call positions from a different input,
/// so `clear` must run before every compression.
pub struct WorkMemory {
    /// Hash of the bytes at a position -> most recent position with that hash.
    pub(crate) head: Vec<usize>,
    /// Ring indexed by `position & (WINDOW_SIZE - 1)` -> previous position
    /// with the same hash.
    pub(crate) chain: Vec<usize>,
}

impl WorkMemory {
    /// Size of the work area for the most demanding (thorough) tier.
    pub const BYTES: usize = (HEAD_SIZE + CHAIN_SIZE) * size_of::<usize>();

    pub fn new() -> Self {
        Self {
            head: vec![0; HEAD_SIZE],
            chain: vec![0; CHAIN_SIZE],
        }
    }

    /// Re-zero both tables.
    pub fn clear(&mut self) {
        self.head.fill(0);
        self.chain.fill(0);
    }

    pub fn is_clear(&self) -> bool {
        self.head.iter().all(|&s| s == 0) && self.chain.iter().all(|&s| s == 0)
    }
}

impl Default for WorkMemory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_work_memory_is_clear() {
        let wrk = WorkMemory::new();
        assert!(wrk.is_clear());
        assert_eq!(wrk.head.len(), HEAD_SIZE);
        assert_eq!(wrk.chain.len(), CHAIN_SIZE);
    }

    #[test]
    fn clear_resets_every_slot() {
        let mut wrk = WorkMemory::new();
        wrk.head[7] = 42;
        wrk.chain[CHAIN_SIZE - 1] = 9;
        assert!(!wrk.is_clear());
        wrk.clear();
        assert!(wrk.is_clear());
    }
}
