//! 32-bit word utilities for the SHA-1 construction

/// Rotate a 32-bit word left by `n` bits
#[inline]
pub fn rotl(x: u32, n: u32) -> u32 {
    x.rotate_left(n % 32)
}

/// XOR-fold any number of 32-bit words
#[inline]
pub fn xor_fold(words: &[u32]) -> u32 {
    words.iter().fold(0, |acc, w| acc ^ w)
}

/// Sum any number of 32-bit words modulo 2^32
#[inline]
pub fn add_mod32(words: &[u32]) -> u32 {
    words.iter().fold(0u32, |acc, w| acc.wrapping_add(*w))
}

/// Split a byte slice into big-endian 32-bit words.
///
/// The slice length must be a multiple of 4.
pub fn be_words(bytes: &[u8]) -> Vec<u32> {
    debug_assert!(bytes.len() % 4 == 0);
    bytes
        .chunks_exact(4)
        .map(|c| u32::from_be_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}

/// Join 32-bit words back into big-endian bytes
pub fn be_bytes(words: &[u32]) -> Vec<u8> {
    words.iter().flat_map(|w| w.to_be_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotl_by_one_matches_shift_or() {
        for x in [0u32, 1, 0x8000_0000, 0xDEAD_BEEF, u32::MAX] {
            assert_eq!(rotl(x, 1), (x << 1) | (x >> 31));
        }
    }

    #[test]
    fn test_rotl_wraps_at_32() {
        assert_eq!(rotl(0x1234_5678, 32), 0x1234_5678);
        assert_eq!(rotl(0x1234_5678, 36), rotl(0x1234_5678, 4));
    }

    #[test]
    fn test_xor_fold() {
        assert_eq!(xor_fold(&[]), 0);
        assert_eq!(xor_fold(&[0xFF00, 0x00FF]), 0xFFFF);
        assert_eq!(xor_fold(&[0xAAAA, 0xAAAA, 0x5555]), 0x5555);
    }

    #[test]
    fn test_add_mod32_wraps() {
        assert_eq!(add_mod32(&[u32::MAX, 1]), 0);
        assert_eq!(add_mod32(&[u32::MAX, 2]), 1);
        assert_eq!(add_mod32(&[1, 2, 3]), 6);
    }

    #[test]
    fn test_be_words_round_trip() {
        let bytes = [0x01, 0x02, 0x03, 0x04, 0xFF, 0xFE, 0xFD, 0xFC];
        let words = be_words(&bytes);
        assert_eq!(words, vec![0x0102_0304, 0xFFFE_FDFC]);
        assert_eq!(be_bytes(&words), bytes.to_vec());
    }
}
