//! ElGamal encryption and decryption
//!
//! Confidentiality only: a corrupted packet decrypts to a different,
//! unvalidated integer. Callers needing authenticity pair this with the
//! signature scheme in [`crate::signature`].

use num_bigint::BigUint;
use rand::rngs::OsRng;
use rand::{CryptoRng, Rng};

use crate::arith::{mod_exp, mod_inverse, random_exponent};
use crate::error::{DlError, Result};
use crate::keys::{KeyPair, PrivateKey, PublicKey};
use crate::types::CipherPacket;

/// ElGamal cipher over a recipient's public key
#[derive(Clone, Debug)]
pub struct Cipher {
    pub public_key: PublicKey,
}

impl Cipher {
    pub fn new(public_key: PublicKey) -> Self {
        Cipher { public_key }
    }

    /// Encrypt a single integer block, requiring `0 <= block < p`.
    ///
    /// A fresh ephemeral exponent is drawn from the OS CSPRNG on every call;
    /// reusing one across calls breaks the scheme.
    pub fn encrypt(&self, block: &BigUint) -> Result<CipherPacket> {
        self.encrypt_with_rng(block, &mut OsRng)
    }

    /// Encrypt with an explicit RNG (must be cryptographically secure)
    pub fn encrypt_with_rng<R: Rng + CryptoRng>(
        &self,
        block: &BigUint,
        rng: &mut R,
    ) -> Result<CipherPacket> {
        let p = &self.public_key.p;
        if block >= p {
            return Err(DlError::InvalidBlock);
        }

        let r = random_exponent(p, rng);
        let shared = mod_exp(&self.public_key.y, &r, p);

        Ok(CipherPacket {
            ck: mod_exp(&self.public_key.g, &r, p),
            c: (block * shared) % p,
        })
    }

    /// Decrypt a packet with the matching private key.
    ///
    /// The packet is range-validated first; out-of-range components are
    /// rejected as [`DlError::MalformedPacket`].
    pub fn decrypt(&self, packet: &CipherPacket, private_key: &PrivateKey) -> Result<BigUint> {
        packet.validate(&self.public_key)?;

        let p = &self.public_key.p;
        let shared = mod_exp(&packet.ck, &private_key.d, p);
        let shared_inv = mod_inverse(&shared, p)?;

        Ok((&packet.c * shared_inv) % p)
    }
}

/// One-shot encryption under a public key
pub fn encrypt(block: &BigUint, public_key: &PublicKey) -> Result<CipherPacket> {
    Cipher::new(public_key.clone()).encrypt(block)
}

/// One-shot decryption with a key pair
pub fn decrypt(packet: &CipherPacket, keypair: &KeyPair) -> Result<BigUint> {
    Cipher::new(keypair.public_key.clone()).decrypt(packet, &keypair.private_key)
}
