//! Message blocking
//!
//! Splits a byte message into fixed-size integer blocks suitable for the
//! cipher and rejoins them afterwards. Each block records its original byte
//! length, so values with leading zero bytes survive the round trip intact.

use num_bigint::BigUint;

use crate::error::{DlError, Result};

/// One plaintext block: its integer value plus the byte length it was cut
/// from. The length cannot be inferred from the value alone because leading
/// zero bytes vanish in the integer representation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    value: BigUint,
    len: usize,
}

impl Block {
    /// Interpret bytes as a big-endian integer block
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Block {
            value: BigUint::from_bytes_be(bytes),
            len: bytes.len(),
        }
    }

    /// Rebuild a block from a recovered integer and its recorded byte length.
    ///
    /// Fails with [`DlError::InvalidBlock`] when the value needs more bytes
    /// than the length allows, which signals a decryption gone wrong.
    pub fn from_value(value: BigUint, len: usize) -> Result<Self> {
        if value.to_bytes_be().len() > len && value != BigUint::from(0u32) {
            return Err(DlError::InvalidBlock);
        }
        Ok(Block { value, len })
    }

    /// The block as an integer operand for the cipher
    pub fn value(&self) -> &BigUint {
        &self.value
    }

    /// The original byte length
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The block's bytes, left-padded with zeros back to its recorded length
    pub fn to_bytes(&self) -> Vec<u8> {
        let raw = self.value.to_bytes_be();
        let mut out = vec![0u8; self.len];
        if self.value > BigUint::from(0u32) {
            out[self.len - raw.len()..].copy_from_slice(&raw);
        }
        out
    }
}

/// Split a message into blocks of at most `block_bytes` bytes; the final
/// block keeps its shorter length.
pub fn split_blocks(message: &[u8], block_bytes: usize) -> Result<Vec<Block>> {
    if block_bytes == 0 {
        return Err(DlError::InvalidParameter(
            "block length must be non-zero".to_string(),
        ));
    }

    Ok(message.chunks(block_bytes).map(Block::from_bytes).collect())
}

/// Rejoin blocks into the original message bytes
pub fn join_blocks(blocks: &[Block]) -> Vec<u8> {
    blocks.iter().flat_map(|b| b.to_bytes()).collect()
}

/// Check that `block_bytes`-byte blocks always fit below the modulus
pub fn block_fits(block_bytes: usize, modulus: &BigUint) -> bool {
    (block_bytes as u64) * 8 < modulus.bits()
}
