/// LZO1X back-reference limits.
/// Offsets are distances back from the current output position (>= 1).
pub mod lzo1x_limits {
    pub const M1_MAX_OFFSET: usize = 0x0400;
    pub const M2_MAX_OFFSET: usize = 0x0800;
    pub const M3_MAX_OFFSET: usize = 0x4000;
    pub const M4_MAX_OFFSET: usize = 0xbfff;

    pub const MIN_MATCH: usize  = 3;
    pub const M2_MAX_LEN: usize = 8;
    pub const M3_MAX_LEN: usize = 33;
    pub const M4_MAX_LEN: usize = 9;
}

/// LZO1X instruction markers (high bits of an instruction byte).
pub mod lzo1x_markers {
    pub const M1: u8 = 0;
    pub const M2: u8 = 64;
    pub const M3: u8 = 32;
    pub const M4: u8 = 16;
}

/// Longest literal run that fits the single first-byte encoding.
pub const LZO1X_FIRST_RUN_MAX: usize = 238;

/// Match finder table geometry.
pub const LZO1X_HEAD_BITS: u32 = 16;
pub const LZO1X_FAST_DICT_BITS: u32 = 15;
pub const LZO1X_WINDOW_SIZE: usize = 1 << 16;

/// Chain depth for the thorough tier.
pub const LZO1X_MAX_CHAIN: usize = 4096;

/// Stop searching once a match this long is found.
pub const LZO1X_NICE_LEN: usize = 0x800;
