//! Value records crossing the library boundary, and tunables

use std::fmt;

use num_bigint::BigUint;
use num_traits::One;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{DlError, Result};
use crate::keys::PublicKey;

/// Default modulus size in bits
pub const DEFAULT_PRIME_BITS: u64 = 100;

/// Default plaintext block size in bytes; must stay strictly below
/// `DEFAULT_PRIME_BITS / 8` so every block value is representable mod p
pub const DEFAULT_BLOCK_BYTES: usize = 8;

/// Tunables for group generation and the bounded search loops
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElGamalConfig {
    /// Bit length of the prime modulus
    pub prime_bits: u64,
    /// Plaintext block length in bytes; `8 * block_bytes` must be < `prime_bits`
    pub block_bytes: usize,
    /// Miller-Rabin witness rounds
    pub primality_test_rounds: usize,
    /// Cap on safe-prime candidates per search
    pub max_prime_attempts: usize,
    /// Cap on primitive-root candidates per prime
    pub max_root_attempts: usize,
    /// Cap on whole (p, g) regenerations waiting for `gcd(g, p-1) = 1`
    pub max_pair_attempts: usize,
    /// Cap on signing-nonce candidates per signature
    pub max_nonce_attempts: usize,
}

impl Default for ElGamalConfig {
    fn default() -> Self {
        ElGamalConfig {
            prime_bits: DEFAULT_PRIME_BITS,
            block_bytes: DEFAULT_BLOCK_BYTES,
            primality_test_rounds: 20,
            max_prime_attempts: 100_000,
            max_root_attempts: 10_000,
            max_pair_attempts: 100,
            max_nonce_attempts: 10_000,
        }
    }
}

impl ElGamalConfig {
    /// Check the block/modulus size relation from the data model
    pub fn validate(&self) -> Result<()> {
        if self.block_bytes == 0 {
            return Err(DlError::InvalidParameter(
                "block length must be non-zero".to_string(),
            ));
        }
        if (self.block_bytes as u64) * 8 >= self.prime_bits {
            return Err(DlError::InvalidParameter(format!(
                "block length of {} bytes does not fit below a {}-bit modulus",
                self.block_bytes, self.prime_bits
            )));
        }
        Ok(())
    }
}

/// An ElGamal ciphertext: the ephemeral Diffie-Hellman value `ck = g^r mod p`
/// and the masked plaintext `c = m * y^r mod p`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CipherPacket {
    pub(crate) ck: BigUint,
    pub(crate) c: BigUint,
}

impl CipherPacket {
    pub fn new(ck: BigUint, c: BigUint) -> Self {
        CipherPacket { ck, c }
    }

    /// The ephemeral key component `g^r mod p`
    pub fn ephemeral_key(&self) -> &BigUint {
        &self.ck
    }

    /// The masked plaintext component
    pub fn masked(&self) -> &BigUint {
        &self.c
    }

    /// Range-check both components against the recipient's modulus
    pub fn validate(&self, public_key: &PublicKey) -> Result<()> {
        let p = public_key.modulus();
        if &self.ck >= p {
            return Err(DlError::MalformedPacket(
                "ephemeral key ck is not below the modulus".to_string(),
            ));
        }
        if &self.c >= p {
            return Err(DlError::MalformedPacket(
                "masked component c is not below the modulus".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for CipherPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CipherPacket({} bytes)",
            self.ck.to_bytes_be().len() + self.c.to_bytes_be().len()
        )
    }
}

/// An ElGamal signature over a message: the original bytes plus the pair
/// `(r, s)` with `r = g^k mod p` and `s = (h - d*r) * k^-1 mod (p-1)`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SignaturePacket {
    pub(crate) m: Vec<u8>,
    pub(crate) r: BigUint,
    pub(crate) s: BigUint,
}

impl SignaturePacket {
    pub fn new(m: Vec<u8>, r: BigUint, s: BigUint) -> Self {
        SignaturePacket { m, r, s }
    }

    /// The signed message bytes
    pub fn message(&self) -> &[u8] {
        &self.m
    }

    /// The commitment `r = g^k mod p`
    pub fn r(&self) -> &BigUint {
        &self.r
    }

    /// The response `s`
    pub fn s(&self) -> &BigUint {
        &self.s
    }

    /// Range-check `r < p` and `s < p - 1`
    pub fn validate(&self, public_key: &PublicKey) -> Result<()> {
        let p = public_key.modulus();
        if &self.r >= p {
            return Err(DlError::MalformedPacket(
                "signature r is not below the modulus".to_string(),
            ));
        }
        if self.s >= p - BigUint::one() {
            return Err(DlError::MalformedPacket(
                "signature s is not below the group order".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for SignaturePacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SignaturePacket({} message bytes)", self.m.len())
    }
}
