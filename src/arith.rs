//! Arbitrary-precision modular arithmetic primitives
//!
//! Pure functions over `BigUint`/`BigInt`; everything else in the crate is
//! built on top of these.

use num_bigint::{BigInt, BigUint, RandBigInt, ToBigInt, ToBigUint};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::{CryptoRng, Rng};

use crate::error::{DlError, Result};

/// Modular exponentiation: base^exp mod modulus
pub fn mod_exp(base: &BigUint, exp: &BigUint, modulus: &BigUint) -> BigUint {
    base.modpow(exp, modulus)
}

/// Greatest common divisor
pub fn gcd(a: &BigUint, b: &BigUint) -> BigUint {
    a.gcd(b)
}

/// Compute the modular multiplicative inverse of `a` modulo `m`.
///
/// Fails with [`DlError::NoInverse`] when `gcd(a, m) != 1`.
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Result<BigUint> {
    let m_int = m.to_bigint().expect("BigUint always converts to BigInt");
    let (g, x, _) = extended_gcd(&a.to_bigint().expect("BigUint always converts to BigInt"), &m_int);

    if g != BigInt::one() {
        return Err(DlError::NoInverse);
    }

    // mod_floor lands in [0, m) even for negative x
    let x = x.mod_floor(&m_int);
    Ok(x.to_biguint().expect("floor-mod of a positive modulus is non-negative"))
}

/// Extended Euclidean algorithm (BigInt to carry negative intermediates)
fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    if a.is_zero() {
        return (b.clone(), BigInt::zero(), BigInt::one());
    }

    let (g, x1, y1) = extended_gcd(&b.mod_floor(a), a);
    let x = y1 - (b / a) * &x1;
    let y = x1;

    (g, x, y)
}

/// Miller-Rabin primality test with `k` random witnesses
pub fn is_probable_prime<R: Rng + CryptoRng>(n: &BigUint, k: usize, rng: &mut R) -> bool {
    let two = 2u32.to_biguint().unwrap();
    let three = 3u32.to_biguint().unwrap();

    if n < &two {
        return false;
    }
    if n == &two || n == &three {
        return true;
    }
    if n.is_even() {
        return false;
    }

    let n_minus_1 = n - BigUint::one();
    let (s, d) = factor_powers_of_two(&n_minus_1);

    'witness: for _ in 0..k {
        let a = rng.gen_biguint_range(&two, &n_minus_1);
        let mut x = mod_exp(&a, &d, n);

        if x == BigUint::one() || x == n_minus_1 {
            continue;
        }

        for _ in 0..s - 1 {
            x = mod_exp(&x, &two, n);
            if x == n_minus_1 {
                continue 'witness;
            }
        }

        return false;
    }

    true
}

/// Factor out powers of 2: n = 2^s * d with d odd
pub fn factor_powers_of_two(n: &BigUint) -> (u64, BigUint) {
    let mut s = 0;
    let mut d = n.clone();

    while d.is_even() {
        d >>= 1;
        s += 1;
    }

    (s, d)
}

/// Sample a uniform value in `[2, p - 2]`, the exponent range shared by
/// private scalars, ephemeral keys and signing nonces.
pub fn random_exponent<R: Rng + CryptoRng>(p: &BigUint, rng: &mut R) -> BigUint {
    let two = 2u32.to_biguint().unwrap();
    // gen_biguint_range is half-open, so the upper bound p-1 yields p-2 inclusive
    rng.gen_biguint_range(&two, &(p - BigUint::one()))
}
