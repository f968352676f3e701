//! Safe-prime group generation
//!
//! Produces the shared group parameters `(p, g)`: a safe prime `p = 2q + 1`
//! with `q` prime, and a primitive root `g` of the multiplicative group mod
//! `p`. Because the group order is `2q`, an element is a primitive root
//! exactly when `g^2 mod p != 1` and `g^q mod p != 1`. On top of that the
//! whole pair is regenerated until `gcd(g, p - 1) = 1`; a root sharing a
//! factor with the group order invites subgroup-confinement attacks.
//!
//! Every search loop carries a hard attempt cap so degenerate inputs surface
//! as typed errors instead of hangs.

use std::fmt;

use num_bigint::{BigUint, RandBigInt, ToBigUint};
use num_traits::One;
use rand::rngs::OsRng;
use rand::{CryptoRng, Rng};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::arith::{gcd, is_probable_prime, mod_exp};
use crate::error::{DlError, Result};
use crate::types::ElGamalConfig;

/// Smallest modulus size for which a safe prime and root search is meaningful
pub const MIN_PRIME_BITS: u64 = 8;

/// Shared group parameters: safe prime `p = 2q + 1` and primitive root `g`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GroupParams {
    pub(crate) p: BigUint,
    pub(crate) q: BigUint,
    pub(crate) g: BigUint,
}

impl GroupParams {
    /// Generate group parameters with default configuration, using the
    /// operating-system CSPRNG.
    pub fn generate(prime_bits: u64) -> Result<Self> {
        let config = ElGamalConfig {
            prime_bits,
            ..ElGamalConfig::default()
        };
        Self::generate_with_rng(&config, &mut OsRng)
    }

    /// Generate group parameters with an explicit configuration and RNG.
    ///
    /// The RNG must be cryptographically secure; prime candidates feed
    /// directly into key material.
    pub fn generate_with_rng<R: Rng + CryptoRng>(
        config: &ElGamalConfig,
        rng: &mut R,
    ) -> Result<Self> {
        if config.prime_bits < MIN_PRIME_BITS {
            return Err(DlError::InvalidParameter(format!(
                "prime bit length must be at least {}, got {}",
                MIN_PRIME_BITS, config.prime_bits
            )));
        }

        for _ in 0..config.max_pair_attempts {
            let (p, q) = generate_safe_prime(config, rng)?;
            let g = find_primitive_root(&p, &q, config, rng)?;

            // Reject roots not coprime with the group order and retry the
            // whole pair, as a fresh p changes the order itself.
            if gcd(&g, &(&p - BigUint::one())).is_one() {
                return Ok(GroupParams { p, q, g });
            }
        }

        Err(DlError::PrimeGenerationExhausted {
            bits: config.prime_bits,
            attempts: config.max_pair_attempts,
        })
    }

    /// The prime modulus `p`
    pub fn prime(&self) -> &BigUint {
        &self.p
    }

    /// The Sophie Germain prime `q = (p - 1) / 2`
    pub fn subgroup_order(&self) -> &BigUint {
        &self.q
    }

    /// The primitive root `g`
    pub fn root(&self) -> &BigUint {
        &self.g
    }

    /// Bit size of the modulus
    pub fn bit_size(&self) -> u64 {
        self.p.bits()
    }

    /// Re-check every invariant the generator guarantees
    pub fn validate(&self) -> Result<()> {
        let one = BigUint::one();
        let two = 2u32.to_biguint().unwrap();
        let mut rng = OsRng;

        if &self.q * 2u32 + 1u32 != self.p {
            return Err(DlError::InvalidParameter(
                "p is not 2q + 1".to_string(),
            ));
        }
        if !is_probable_prime(&self.p, 20, &mut rng) || !is_probable_prime(&self.q, 20, &mut rng) {
            return Err(DlError::InvalidParameter(
                "p and q must both be prime".to_string(),
            ));
        }
        if self.g <= one || self.g >= self.p {
            return Err(DlError::InvalidParameter(
                "root g must be in range (1, p)".to_string(),
            ));
        }
        if mod_exp(&self.g, &two, &self.p) == one || mod_exp(&self.g, &self.q, &self.p) == one {
            return Err(DlError::InvalidParameter(
                "g is not a primitive root".to_string(),
            ));
        }
        if !gcd(&self.g, &(&self.p - &one)).is_one() {
            return Err(DlError::InvalidParameter(
                "g must be coprime with p - 1".to_string(),
            ));
        }

        Ok(())
    }
}

impl fmt::Display for GroupParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GroupParams({} bits)", self.bit_size())
    }
}

/// Search for a safe prime: sample prime candidates `q` of `prime_bits - 1`
/// bits and accept once `p = 2q + 1` also tests prime.
fn generate_safe_prime<R: Rng + CryptoRng>(
    config: &ElGamalConfig,
    rng: &mut R,
) -> Result<(BigUint, BigUint)> {
    let q_bits = config.prime_bits - 1;

    for _ in 0..config.max_prime_attempts {
        let mut q = rng.gen_biguint(q_bits);
        q |= BigUint::one(); // odd
        q |= BigUint::one() << (q_bits - 1); // exact bit length

        if !is_probable_prime(&q, config.primality_test_rounds, rng) {
            continue;
        }

        let p = &q * 2u32 + 1u32;
        if is_probable_prime(&p, config.primality_test_rounds, rng) {
            return Ok((p, q));
        }
    }

    Err(DlError::PrimeGenerationExhausted {
        bits: config.prime_bits,
        attempts: config.max_prime_attempts,
    })
}

/// Search for a primitive root of the group of order `2q`: random candidates
/// in `[2, p - 2]` pass once neither `g^2` nor `g^q` is 1 mod p.
fn find_primitive_root<R: Rng + CryptoRng>(
    p: &BigUint,
    q: &BigUint,
    config: &ElGamalConfig,
    rng: &mut R,
) -> Result<BigUint> {
    let one = BigUint::one();
    let two = 2u32.to_biguint().unwrap();
    let p_minus_1 = p - &one;

    for _ in 0..config.max_root_attempts {
        let g = rng.gen_biguint_range(&two, &p_minus_1);

        if mod_exp(&g, &two, p) != one && mod_exp(&g, q, p) != one {
            return Ok(g);
        }
    }

    Err(DlError::PrimeGenerationExhausted {
        bits: p.bits(),
        attempts: config.max_root_attempts,
    })
}
