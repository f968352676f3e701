//! ElGamal signatures over the SHA-1 digest
//!
//! Signing commits to a one-time nonce `k` coprime with the group order:
//! `r = g^k mod p`, `s = (h - d*r) * k^-1 mod (p - 1)` where `h` is the
//! SHA-1 digest of the message as an integer. Verification accepts iff
//! `g^h == y^r * r^s (mod p)`.

use num_bigint::{BigUint, ToBigInt};
use num_integer::Integer;
use num_traits::One;
use rand::rngs::OsRng;
use rand::{CryptoRng, Rng};

use crate::arith::{gcd, mod_exp, mod_inverse, random_exponent};
use crate::error::{DlError, Result};
use crate::keys::{KeyPair, PublicKey};
use crate::sha1::sha1_int;
use crate::types::{ElGamalConfig, SignaturePacket};

/// Sign a message with the default nonce-search budget and the OS CSPRNG
pub fn sign(message: &[u8], keypair: &KeyPair) -> Result<SignaturePacket> {
    sign_with_rng(message, keypair, &ElGamalConfig::default(), &mut OsRng)
}

/// Sign with an explicit configuration and RNG.
///
/// The nonce must be unique per signature; a repeated nonce leaks the private
/// key, which is why it comes from a CSPRNG even in tests.
pub fn sign_with_rng<R: Rng + CryptoRng>(
    message: &[u8],
    keypair: &KeyPair,
    config: &ElGamalConfig,
    rng: &mut R,
) -> Result<SignaturePacket> {
    let pk = &keypair.public_key;
    let p = &pk.p;
    let order = p - BigUint::one();

    let h = sha1_int(message);

    // Nonce k in [2, p-2] with gcd(k, p-1) = 1, bounded search
    let k = find_nonce(p, &order, config, rng)?;

    let r = mod_exp(&pk.g, &k, p);
    let k_inv = mod_inverse(&k, &order)?;

    // s = (h - d*r) * k^-1 mod (p-1); intermediates go negative, so the
    // computation runs over BigInt and floor-mod lands in [0, p-1)
    let order_int = order.to_bigint().expect("BigUint always converts to BigInt");
    let s = ((h.to_bigint().unwrap() - keypair.private_key.d.to_bigint().unwrap() * r.to_bigint().unwrap())
        * k_inv.to_bigint().unwrap())
    .mod_floor(&order_int);

    Ok(SignaturePacket {
        m: message.to_vec(),
        r,
        s: s.to_biguint().expect("floor-mod of a positive modulus is non-negative"),
    })
}

/// Verify a signature packet against the signer's public key.
///
/// Out-of-range `r`/`s` are rejected as [`DlError::MalformedPacket`] before
/// any arithmetic.
pub fn verify(packet: &SignaturePacket, public_key: &PublicKey) -> Result<bool> {
    packet.validate(public_key)?;

    let p = &public_key.p;
    let h = sha1_int(&packet.m);

    let lhs = mod_exp(&public_key.g, &h, p);
    let rhs = (mod_exp(&public_key.y, &packet.r, p) * mod_exp(&packet.r, &packet.s, p)) % p;

    Ok(lhs == rhs)
}

fn find_nonce<R: Rng + CryptoRng>(
    p: &BigUint,
    order: &BigUint,
    config: &ElGamalConfig,
    rng: &mut R,
) -> Result<BigUint> {
    for _ in 0..config.max_nonce_attempts {
        let k = random_exponent(p, rng);
        if gcd(&k, order).is_one() {
            return Ok(k);
        }
    }

    Err(DlError::NonceExhausted {
        attempts: config.max_nonce_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn test_keypair(seed: u64) -> (KeyPair, ElGamalConfig) {
        let config = ElGamalConfig {
            prime_bits: 64,
            ..ElGamalConfig::default()
        };
        let keypair =
            KeyPair::generate_with_rng(&config, &mut StdRng::seed_from_u64(seed)).unwrap();
        (keypair, config)
    }

    #[test]
    fn test_sign_verify_round_trip() {
        let (keypair, config) = test_keypair(42);
        let mut rng = StdRng::seed_from_u64(1);

        let packet = sign_with_rng(b"A", &keypair, &config, &mut rng).unwrap();
        assert!(verify(&packet, &keypair.public_key).unwrap());
    }

    #[test]
    fn test_tampered_message_fails() {
        let (keypair, config) = test_keypair(7);
        let mut rng = StdRng::seed_from_u64(2);

        let mut packet = sign_with_rng(b"pay 10 coins", &keypair, &config, &mut rng).unwrap();
        packet.m[0] ^= 0x01;
        assert!(!verify(&packet, &keypair.public_key).unwrap());
    }

    #[test]
    fn test_tampered_s_fails() {
        let (keypair, config) = test_keypair(11);
        let mut rng = StdRng::seed_from_u64(3);

        let mut packet = sign_with_rng(b"A", &keypair, &config, &mut rng).unwrap();
        let order = keypair.public_key.modulus() - BigUint::one();
        packet.s = (&packet.s + BigUint::one()) % &order;
        assert!(!verify(&packet, &keypair.public_key).unwrap());
    }

    #[test]
    fn test_tampered_r_fails() {
        let (keypair, config) = test_keypair(13);
        let mut rng = StdRng::seed_from_u64(4);

        let mut packet = sign_with_rng(b"A", &keypair, &config, &mut rng).unwrap();
        packet.r = (&packet.r + BigUint::one()) % keypair.public_key.modulus();
        assert!(!verify(&packet, &keypair.public_key).unwrap());
    }

    #[test]
    fn test_out_of_range_r_is_malformed() {
        let (keypair, config) = test_keypair(17);
        let mut rng = StdRng::seed_from_u64(5);

        let mut packet = sign_with_rng(b"A", &keypair, &config, &mut rng).unwrap();
        packet.r = keypair.public_key.modulus().clone();
        assert!(matches!(
            verify(&packet, &keypair.public_key),
            Err(DlError::MalformedPacket(_))
        ));
    }

    #[test]
    fn test_wrong_key_fails() {
        let (signer, config) = test_keypair(19);
        let (other, _) = test_keypair(23);
        let mut rng = StdRng::seed_from_u64(6);

        let packet = sign_with_rng(b"A", &signer, &config, &mut rng).unwrap();
        assert!(!verify(&packet, &other.public_key).unwrap());
    }

    #[test]
    fn test_nonce_exhaustion_reported() {
        let (keypair, mut config) = test_keypair(29);
        config.max_nonce_attempts = 0;

        assert_eq!(
            sign_with_rng(b"A", &keypair, &config, &mut StdRng::seed_from_u64(7)),
            Err(DlError::NonceExhausted { attempts: 0 })
        );
    }

    #[test]
    fn test_signature_binds_message_content() {
        let (keypair, config) = test_keypair(31);
        let mut rng = StdRng::seed_from_u64(8);

        let packet = sign_with_rng(b"message one", &keypair, &config, &mut rng).unwrap();
        let forged = SignaturePacket::new(
            b"message two".to_vec(),
            packet.r().clone(),
            packet.s().clone(),
        );
        assert!(!verify(&forged, &keypair.public_key).unwrap());
    }
}
