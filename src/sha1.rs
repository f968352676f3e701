//! SHA-1 built from first principles
//!
//! Implements the full FIPS 180-1 construction: merkle-damgard padding, the
//! 80-word message schedule and the 80-round compression function, producing
//! the canonical 160-bit big-endian digest. The digest doubles as an integer
//! operand for the signature scheme.
//!
//! SHA-1 is cryptographically broken for collision resistance; it is kept
//! here because the signature scheme in this crate is a reference
//! construction, not a production one.

use std::fmt;

use num_bigint::BigUint;

use crate::bits::{add_mod32, be_words, rotl, xor_fold};

/// Initial chaining values (FIPS 180-1)
const H_INIT: [u32; 5] = [0x6745_2301, 0xEFCD_AB89, 0x98BA_DCFE, 0x1032_5476, 0xC3D2_E1F0];

/// Round constants, one per 20-round band
const K: [u32; 4] = [0x5A82_7999, 0x6ED9_EBA1, 0x8F1B_BCDC, 0xCA62_C1D6];

/// A 160-bit SHA-1 digest
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Digest(pub [u8; 20]);

impl Digest {
    /// The raw big-endian digest bytes
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// The digest as an unsigned integer, for use in signature arithmetic
    pub fn to_biguint(&self) -> BigUint {
        BigUint::from_bytes_be(&self.0)
    }

    /// Lowercase hex rendering of the digest
    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// Compute the SHA-1 digest of a byte sequence
pub fn sha1(message: &[u8]) -> Digest {
    let padded = pad(message);
    let mut h = H_INIT;

    for block in padded.chunks_exact(64) {
        let w = schedule(block);
        h = compress(&h, &w);
    }

    let mut out = [0u8; 20];
    for (chunk, word) in out.chunks_exact_mut(4).zip(h.iter()) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }
    Digest(out)
}

/// SHA-1 digest as a 160-bit integer
pub fn sha1_int(message: &[u8]) -> BigUint {
    sha1(message).to_biguint()
}

/// Pad a message to a multiple of 64 bytes: a single 0x80 byte, zeros up to
/// 56 mod 64, then the message bit length as an 8-byte big-endian integer.
fn pad(message: &[u8]) -> Vec<u8> {
    let bit_len = (message.len() as u64) * 8;

    let mut padded = message.to_vec();
    padded.push(0x80);
    while padded.len() % 64 != 56 {
        padded.push(0x00);
    }
    padded.extend_from_slice(&bit_len.to_be_bytes());

    padded
}

/// Expand one 64-byte block into the 80-word message schedule:
/// `W[t] = ROTL1(W[t-3] ^ W[t-8] ^ W[t-14] ^ W[t-16])` for t in 16..80.
fn schedule(block: &[u8]) -> [u32; 80] {
    let mut w = [0u32; 80];
    w[..16].copy_from_slice(&be_words(block));

    for t in 16..80 {
        w[t] = rotl(xor_fold(&[w[t - 3], w[t - 8], w[t - 14], w[t - 16]]), 1);
    }

    w
}

/// The per-band boolean function: Ch, Parity, Maj, Parity
fn f(t: usize, x: u32, y: u32, z: u32) -> u32 {
    match t / 20 {
        0 => (x & y) | (!x & z),
        1 | 3 => x ^ y ^ z,
        2 => (x & y) | (x & z) | (y & z),
        _ => unreachable!("t < 80"),
    }
}

/// Run the 80-round compression function over one scheduled block and fold
/// the result into the running digest.
fn compress(h: &[u32; 5], w: &[u32; 80]) -> [u32; 5] {
    let [mut a, mut b, mut c, mut d, mut e] = *h;

    for t in 0..80 {
        let temp = add_mod32(&[rotl(a, 5), f(t, b, c, d), e, K[t / 20], w[t]]);
        e = d;
        d = c;
        c = rotl(b, 30);
        b = a;
        a = temp;
    }

    [
        add_mod32(&[h[0], a]),
        add_mod32(&[h[1], b]),
        add_mod32(&[h[2], c]),
        add_mod32(&[h[3], d]),
        add_mod32(&[h[4], e]),
    ]
}
