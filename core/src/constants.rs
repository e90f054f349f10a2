/// zlib compression level bounds.
/// `-1` is zlib's "pick the default" sentinel.
pub mod zlib_levels {
    pub const DEFAULT: i32          = -1;
    pub const NO_COMPRESSION: i32   = 0;
    pub const BEST_SPEED: i32       = 1;
    pub const BEST_COMPRESSION: i32 = 9;
}

/// Level used when a caller passes the default sentinel.
pub const DEFAULT_LEVEL_ZLIB: u32 = 6;

/// Raw status integers crossing the C boundary.
pub mod status_codes {
    pub const OK: i32                    = 0;
    pub const INITIALIZATION_FAILED: i32 = -1;
    pub const CORRUPT_INPUT: i32         = -2;
    pub const OUTPUT_TOO_SMALL: i32      = -3;
    pub const INTERNAL_ERROR: i32        = -4;
}

/// Minimal end-of-stream frame emitted by the LZO1X compressor.
pub const LZO_EOS_MARKER: [u8; 3] = [0x11, 0x00, 0x00];
