#[cfg(test)]
mod lzo_codec_tests {
    use bufcodec_core::compression::LzoCodec;
    use bufcodec_core::constants::LZO_EOS_MARKER;
    use bufcodec_core::prelude::*;
    use rand::{rngs::StdRng, RngCore, SeedableRng};

    fn sample_text(len: usize) -> Vec<u8> {
        b"the quick brown fox jumps over the lazy dog; "
            .iter()
            .cycle()
            .take(len)
            .copied()
            .collect()
    }

    fn random_bytes(len: usize, seed: u64) -> Vec<u8> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut buf = vec![0u8; len];
        rng.fill_bytes(&mut buf);
        buf
    }

    #[test]
    fn initialize_succeeds_and_is_repeatable() {
        assert_eq!(LzoCodec::initialize(), Ok(()));
        assert_eq!(LzoCodec::initialize(), Ok(()));
    }

    #[test]
    fn zeros_compress_small_and_round_trip() {
        let codec = LzoCodec::new();
        let input = [0u8; 64];
        let mut packed = vec![0u8; LzoCodec::worst_case_size(input.len())];

        let n = codec.compress(&input, LzoMode::Fast, &mut packed).unwrap();
        assert!(n < 64, "64 zero bytes should shrink, got {n}");
        assert!(packed[..n].ends_with(&LZO_EOS_MARKER));

        let mut out = [0xffu8; 64];
        assert_eq!(codec.decompress(&packed[..n], &mut out), Ok(64));
        assert_eq!(out, input);
    }

    #[test]
    fn both_modes_round_trip_text() {
        let codec = LzoCodec::new();
        let input = sample_text(20_000);

        for mode in [LzoMode::Fast, LzoMode::Thorough] {
            let packed = codec.compress_to_vec(&input, mode).unwrap();
            assert!(packed.len() < input.len() / 4, "{mode}: poor ratio {}", packed.len());
            let out = codec.decompress_to_vec(&packed, input.len()).unwrap();
            assert_eq!(out, input, "{mode}");
        }
    }

    #[test]
    fn thorough_is_never_larger_than_fast_on_text() {
        let codec = LzoCodec::new();
        let input = sample_text(8_192);
        let fast = codec.compress_to_vec(&input, LzoMode::Fast).unwrap();
        let thorough = codec.compress_to_vec(&input, LzoMode::Thorough).unwrap();
        assert!(thorough.len() <= fast.len());
    }

    #[test]
    fn incompressible_input_fits_worst_case() {
        let codec = LzoCodec::new();
        let input = random_bytes(64 * 1024, 7);

        for mode in [LzoMode::Fast, LzoMode::Thorough] {
            let mut packed = vec![0u8; LzoCodec::worst_case_size(input.len())];
            let n = codec.compress(&input, mode, &mut packed).unwrap();
            assert!(n <= packed.len());

            let mut out = vec![0u8; input.len()];
            assert_eq!(codec.decompress(&packed[..n], &mut out), Ok(input.len()));
            assert_eq!(out, input);
        }
    }

    #[test]
    fn empty_input_compresses_to_end_marker() {
        let codec = LzoCodec::new();
        let mut packed = [0u8; 16];
        let n = codec.compress(&[], LzoMode::Thorough, &mut packed).unwrap();
        assert_eq!(&packed[..n], &LZO_EOS_MARKER);

        let mut out = [0u8; 0];
        assert_eq!(codec.decompress(&packed[..n], &mut out), Ok(0));
    }

    #[test]
    fn empty_source_decompresses_to_nothing() {
        let codec = LzoCodec::new();
        let mut out = [0u8; 8];
        assert_eq!(codec.decompress(&[], &mut out), Ok(0));
    }

    #[test]
    fn compress_into_small_buffer_is_output_too_small_and_untouched() {
        let codec = LzoCodec::new();
        let input = random_bytes(1_000, 11);
        let mut dst = [0xaau8; 100];

        assert_eq!(
            codec.compress(&input, LzoMode::Fast, &mut dst),
            Err(CodecError::OutputTooSmall)
        );
        assert!(dst.iter().all(|&b| b == 0xaa));
    }

    #[test]
    fn decompress_into_small_buffer_is_output_too_small() {
        let codec = LzoCodec::new();
        let input = sample_text(4_096);
        let packed = codec.compress_to_vec(&input, LzoMode::Thorough).unwrap();

        let mut out = vec![0u8; input.len() - 1];
        assert_eq!(codec.decompress(&packed, &mut out), Err(CodecError::OutputTooSmall));
    }

    #[test]
    fn truncated_stream_is_corrupt() {
        let codec = LzoCodec::new();
        let input = sample_text(4_096);
        let packed = codec.compress_to_vec(&input, LzoMode::Fast).unwrap();

        let mut out = vec![0u8; input.len()];
        for cut in [1, 2, 3, packed.len() / 2] {
            let truncated = &packed[..packed.len() - cut];
            assert_eq!(
                codec.decompress(truncated, &mut out),
                Err(CodecError::CorruptInput),
                "cut {cut}"
            );
        }
    }

    #[test]
    fn trailing_bytes_are_corrupt() {
        let codec = LzoCodec::new();
        let mut packed = codec.compress_to_vec(b"hello hello hello", LzoMode::Fast).unwrap();
        packed.push(0x00);

        let mut out = [0u8; 64];
        assert_eq!(codec.decompress(&packed, &mut out), Err(CodecError::CorruptInput));
    }

    #[test]
    fn reference_before_output_start_is_corrupt() {
        let codec = LzoCodec::new();
        let stream = [18, b'x', 0x6c, 0x00, 0x11, 0x00, 0x00];
        let mut out = [0u8; 16];
        assert_eq!(codec.decompress(&stream, &mut out), Err(CodecError::CorruptInput));
    }

    #[test]
    fn decompress_to_vec_rejects_wrong_recorded_size() {
        let codec = LzoCodec::new();
        let input = sample_text(1_000);
        let packed = codec.compress_to_vec(&input, LzoMode::Fast).unwrap();

        assert_eq!(
            codec.decompress_to_vec(&packed, input.len() + 10),
            Err(CodecError::CorruptInput)
        );
        assert_eq!(
            codec.decompress_to_vec(&packed, input.len() - 10),
            Err(CodecError::OutputTooSmall)
        );
    }

    #[test]
    fn compression_is_deterministic_across_instances() {
        let input = sample_text(10_000);
        let a = LzoCodec::new().compress_to_vec(&input, LzoMode::Thorough).unwrap();
        let b = LzoCodec::new().compress_to_vec(&input, LzoMode::Thorough).unwrap();
        let codec = LzoCodec::new();
        let c1 = codec.compress_to_vec(&input, LzoMode::Thorough).unwrap();
        let c2 = codec.compress_to_vec(&input, LzoMode::Thorough).unwrap();
        assert_eq!(a, b);
        assert_eq!(c1, c2);
        assert_eq!(a, c1);
    }
}
