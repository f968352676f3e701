//! # dlcrypt
//!
//! A reference implementation of the full asymmetric-crypto pipeline, built
//! from first principles:
//!
//! - Safe-prime group generation: `p = 2q + 1` with a primitive root `g`
//!   satisfying `gcd(g, p - 1) = 1`
//! - ElGamal key generation, encryption and decryption
//! - ElGamal signatures over a from-scratch SHA-1 digest
//! - Message blocking with explicit per-block byte lengths
//!
//! All secret and ephemeral values come from the operating-system CSPRNG by
//! default; every generating API has a `_with_rng` variant for deterministic
//! testing with a seeded `StdRng`. Search loops (safe prime, primitive root,
//! signing nonce) are bounded and report exhaustion as typed errors.
//!
//! This crate is a teaching reference, not production cryptography: there is
//! no timing side-channel hardening, SHA-1 is collision-broken, and
//! encryption carries no integrity check.
//!
//! ## Example
//!
//! ```rust
//! use dlcrypt::{Cipher, KeyPair, sign, verify};
//! use num_bigint::BigUint;
//!
//! let keypair = KeyPair::generate(100).expect("key generation failed");
//!
//! // Confidentiality
//! let cipher = Cipher::new(keypair.public_key.clone());
//! let block = BigUint::from(0x41u32);
//! let packet = cipher.encrypt(&block).unwrap();
//! assert_eq!(cipher.decrypt(&packet, &keypair.private_key).unwrap(), block);
//!
//! // Authenticity
//! let signature = sign(b"A", &keypair).unwrap();
//! assert!(verify(&signature, &keypair.public_key).unwrap());
//! ```

pub mod arith;
pub mod bits;
pub mod blocks;
pub mod cipher;
pub mod error;
pub mod group;
pub mod keys;
pub mod sha1;
pub mod signature;
pub mod types;

// Re-export main types for convenience
pub use blocks::{join_blocks, split_blocks, Block};
pub use cipher::{decrypt, encrypt, Cipher};
pub use error::{DlError, Result};
pub use group::GroupParams;
pub use keys::{KeyPair, PrivateKey, PublicKey};
pub use sha1::{sha1, sha1_int, Digest};
pub use signature::{sign, sign_with_rng, verify};
pub use types::{
    CipherPacket, ElGamalConfig, SignaturePacket, DEFAULT_BLOCK_BYTES, DEFAULT_PRIME_BITS,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
