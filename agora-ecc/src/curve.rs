//! Fixed curve parameter sets.
//!
//! The constants are kept as fixed-width `U256` values so they can be written
//! down at compile time. Curve objects lift them into arbitrary precision
//! integers when they are constructed.
use crate::U256;

use bigint::Encoding;
use num_bigint::BigUint;

/// Parameters shared by both curve shapes.
pub trait Curve: Clone + Copy + std::fmt::Debug + PartialEq + Eq + Send + Sync {
    const PRIME_MODULUS: U256;
    const ORDER: U256;
    const GENERATOR_X: U256;
    const GENERATOR_Y: U256;
    /// `a` in `y^2 = x^3 + ax + b`, or `A` in `y^2 = x^3 + Ax^2 + x`.
    const COEFF_A: U256;
}

/// Parameters of a short Weierstrass curve `y^2 = x^3 + ax + b`.
pub trait WeierstrassParams: Curve {
    const COEFF_B: U256;
}

/// Parameters of a Montgomery curve `y^2 = x^3 + Ax^2 + x`.
pub trait MontgomeryParams: Curve {}

/// SEC2 v2 section 2.4.1
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Secp256k1;

impl Curve for Secp256k1 {
    const PRIME_MODULUS: U256 =
        U256::from_be_hex("fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f");
    const ORDER: U256 =
        U256::from_be_hex("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141");
    const GENERATOR_X: U256 =
        U256::from_be_hex("79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798");
    const GENERATOR_Y: U256 =
        U256::from_be_hex("483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8");
    const COEFF_A: U256 = U256::ZERO;
}

impl WeierstrassParams for Secp256k1 {
    const COEFF_B: U256 = U256::from_u8(7);
}

/// RFC 7748 section 4.1
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Curve25519;

impl Curve for Curve25519 {
    const PRIME_MODULUS: U256 =
        U256::from_be_hex("7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed");
    const ORDER: U256 =
        U256::from_be_hex("1000000000000000000000000000000014def9dea2f79cd65812631a5cf5d3ed");
    const GENERATOR_X: U256 = U256::from_u8(9);
    const GENERATOR_Y: U256 =
        U256::from_be_hex("20ae19a1b8a086b4e01edd2c7748d14c923d4d7e6d7c61b229e9c5a27eced3d9");
    const COEFF_A: U256 = U256::from_u32(486662);
}

impl MontgomeryParams for Curve25519 {}

pub(crate) fn to_biguint(number: &U256) -> BigUint {
    BigUint::from_bytes_be(&number.to_be_bytes())
}
