//! Error types for the dlcrypt library

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DlError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DlError {
    #[error("No modular inverse: operand and modulus are not coprime")]
    NoInverse,

    #[error("Safe prime / primitive root search for {bits} bits exhausted after {attempts} attempts")]
    PrimeGenerationExhausted { bits: u64, attempts: usize },

    #[error("Signing nonce search exhausted after {attempts} attempts")]
    NonceExhausted { attempts: usize },

    #[error("Plaintext block does not fit below the modulus")]
    InvalidBlock,

    #[error("Malformed packet: {0}")]
    MalformedPacket(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}
