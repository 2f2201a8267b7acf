//! Sample encoding
//!
//! A sample is an `f32` stored as its IEEE-754 bit pattern, most
//! significant byte first. This is a reinterpretation, not a conversion,
//! so every value (NaN payloads included) survives a round trip.

/// Bytes occupied by one encoded sample
pub const SAMPLE_SIZE: usize = 4;

/// Encoded sample
pub type SampleBytes = [u8; SAMPLE_SIZE];

/// Encode a sample as big-endian IEEE-754 bytes
#[inline]
pub fn encode(value: f32) -> SampleBytes {
    value.to_bits().to_be_bytes()
}

/// Decode a sample from big-endian IEEE-754 bytes
#[inline]
pub fn decode(bytes: SampleBytes) -> f32 {
    f32::from_bits(u32::from_be_bytes(bytes))
}

/// Byte address of the sample at `index`
///
/// Returns `None` if the address does not fit the 16-bit address space.
pub fn sample_address(index: usize) -> Option<u16> {
    index
        .checked_mul(SAMPLE_SIZE)
        .and_then(|addr| u16::try_from(addr).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encode_is_msb_first() {
        // 1.0 = 0x3F80_0000
        assert_eq!(encode(1.0), [0x3F, 0x80, 0x00, 0x00]);
        // -2.5 = 0xC020_0000
        assert_eq!(encode(-2.5), [0xC0, 0x20, 0x00, 0x00]);
    }

    #[test]
    fn test_decode_known_pattern() {
        // 3.3 rounds to 0x4053_3333 in f32
        assert_eq!(decode([0x40, 0x53, 0x33, 0x33]), 3.3f32);
    }

    #[test]
    fn test_nan_payload_preserved() {
        let nan = f32::from_bits(0x7FC0_1234);
        assert_eq!(decode(encode(nan)).to_bits(), 0x7FC0_1234);
    }

    #[test]
    fn test_sample_address() {
        assert_eq!(sample_address(0), Some(0));
        assert_eq!(sample_address(999), Some(3996));
        assert_eq!(sample_address(16_383), Some(65_532));
        assert_eq!(sample_address(16_384), None);
    }

    proptest! {
        #[test]
        fn prop_roundtrip_is_bit_exact(bits in any::<u32>()) {
            let value = f32::from_bits(bits);
            prop_assume!(value.is_finite());
            prop_assert_eq!(decode(encode(value)).to_bits(), bits);
        }

        #[test]
        fn prop_roundtrip_finite(
            value in proptest::num::f32::NORMAL
                | proptest::num::f32::SUBNORMAL
                | proptest::num::f32::ZERO
        ) {
            prop_assert_eq!(decode(encode(value)).to_bits(), value.to_bits());
        }
    }
}
