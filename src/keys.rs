//! Key generation and management

use std::fmt;

use num_bigint::{BigUint, ToBigUint};
use num_traits::One;
use rand::rngs::OsRng;
use rand::{CryptoRng, Rng};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::arith::{mod_exp, random_exponent};
use crate::error::{DlError, Result};
use crate::group::GroupParams;
use crate::types::ElGamalConfig;

/// ElGamal public key
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PublicKey {
    pub(crate) y: BigUint, // g^d mod p
    pub(crate) g: BigUint, // primitive root
    pub(crate) p: BigUint, // safe prime modulus
}

impl PublicKey {
    pub fn new(y: BigUint, g: BigUint, p: BigUint) -> Self {
        PublicKey { y, g, p }
    }

    /// The prime modulus
    pub fn modulus(&self) -> &BigUint {
        &self.p
    }

    /// The group generator
    pub fn generator(&self) -> &BigUint {
        &self.g
    }

    /// The public component `g^d mod p`
    pub fn public_component(&self) -> &BigUint {
        &self.y
    }

    /// Bit size of the modulus
    pub fn bit_size(&self) -> u64 {
        self.p.bits()
    }

    /// Range-check every component
    pub fn validate(&self) -> Result<()> {
        if self.p <= 2u32.to_biguint().unwrap() {
            return Err(DlError::InvalidParameter(
                "modulus p must be > 2".to_string(),
            ));
        }
        if self.g <= BigUint::one() || self.g >= self.p {
            return Err(DlError::InvalidParameter(
                "generator g must be in range (1, p)".to_string(),
            ));
        }
        if self.y <= BigUint::one() || self.y >= self.p {
            return Err(DlError::InvalidParameter(
                "public component y must be in range (1, p)".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({} bits)", self.bit_size())
    }
}

/// ElGamal private key: the secret scalar `d`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PrivateKey {
    pub(crate) d: BigUint,
}

impl PrivateKey {
    pub fn new(d: BigUint) -> Self {
        PrivateKey { d }
    }

    /// The secret exponent
    pub fn secret_exponent(&self) -> &BigUint {
        &self.d
    }
}

impl fmt::Display for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKey(***)")
    }
}

/// An atomically generated ElGamal key pair; `y = g^d mod p` by construction
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KeyPair {
    pub public_key: PublicKey,
    pub private_key: PrivateKey,
}

impl KeyPair {
    /// Generate a key pair over a fresh safe-prime group, using the
    /// operating-system CSPRNG.
    ///
    /// # Example
    ///
    /// ```rust
    /// use dlcrypt::KeyPair;
    ///
    /// let keypair = KeyPair::generate(100).expect("key generation failed");
    /// assert_eq!(keypair.bit_size(), 100);
    /// ```
    pub fn generate(prime_bits: u64) -> Result<Self> {
        let config = ElGamalConfig {
            prime_bits,
            ..ElGamalConfig::default()
        };
        Self::generate_with_rng(&config, &mut OsRng)
    }

    /// Generate a key pair with explicit configuration and RNG; the RNG must
    /// be cryptographically secure.
    pub fn generate_with_rng<R: Rng + CryptoRng>(
        config: &ElGamalConfig,
        rng: &mut R,
    ) -> Result<Self> {
        let params = GroupParams::generate_with_rng(config, rng)?;
        Self::from_group_with_rng(&params, rng)
    }

    /// Generate a key pair over existing group parameters
    pub fn from_group_with_rng<R: Rng + CryptoRng>(
        params: &GroupParams,
        rng: &mut R,
    ) -> Result<Self> {
        let d = random_exponent(params.prime(), rng);
        let y = mod_exp(params.root(), &d, params.prime());

        let public_key = PublicKey {
            y,
            g: params.root().clone(),
            p: params.prime().clone(),
        };
        public_key.validate()?;

        Ok(KeyPair {
            public_key,
            private_key: PrivateKey { d },
        })
    }

    /// Rebuild a key pair from existing components, recomputing `y`
    pub fn from_components(p: BigUint, g: BigUint, d: BigUint) -> Result<Self> {
        let y = mod_exp(&g, &d, &p);
        let public_key = PublicKey { y, g, p };
        public_key.validate()?;

        Ok(KeyPair {
            public_key,
            private_key: PrivateKey { d },
        })
    }

    /// Bit size of the modulus
    pub fn bit_size(&self) -> u64 {
        self.public_key.bit_size()
    }
}

impl fmt::Display for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyPair({} bits)", self.bit_size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn small_config() -> ElGamalConfig {
        ElGamalConfig {
            prime_bits: 64,
            ..ElGamalConfig::default()
        }
    }

    #[test]
    fn test_key_generation_consistency() {
        let keypair =
            KeyPair::generate_with_rng(&small_config(), &mut StdRng::seed_from_u64(42)).unwrap();
        keypair.public_key.validate().unwrap();

        // y must equal g^d mod p for the lifetime of the pair
        let pk = &keypair.public_key;
        assert_eq!(
            pk.y,
            mod_exp(&pk.g, keypair.private_key.secret_exponent(), &pk.p)
        );
    }

    #[test]
    fn test_private_exponent_in_range() {
        let keypair =
            KeyPair::generate_with_rng(&small_config(), &mut StdRng::seed_from_u64(1)).unwrap();
        let d = keypair.private_key.secret_exponent();
        let p = keypair.public_key.modulus();

        assert!(d >= &2u32.to_biguint().unwrap());
        assert!(d <= &(p - 2u32.to_biguint().unwrap()));
    }

    #[test]
    fn test_key_validation() {
        let invalid = PublicKey {
            y: BigUint::one(),
            g: BigUint::one(),
            p: 2u32.to_biguint().unwrap(),
        };
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_from_components_recomputes_y() {
        let keypair =
            KeyPair::generate_with_rng(&small_config(), &mut StdRng::seed_from_u64(5)).unwrap();
        let rebuilt = KeyPair::from_components(
            keypair.public_key.p.clone(),
            keypair.public_key.g.clone(),
            keypair.private_key.d.clone(),
        )
        .unwrap();

        assert_eq!(rebuilt.public_key, keypair.public_key);
    }

    #[test]
    fn test_private_key_display_is_masked() {
        let key = PrivateKey::new(12345u32.to_biguint().unwrap());
        assert_eq!(key.to_string(), "PrivateKey(***)");
    }
}
