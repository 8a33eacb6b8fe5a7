#![deny(clippy::dbg_macro)]
#![deny(clippy::all)]

//! Elliptic curve arithmetic over a short Weierstrass curve (secp256k1) and a
//! Montgomery curve (Curve25519), plus ECDSA on top of the Weierstrass group.
//!
//! All curve and signer objects are immutable after construction and every
//! operation returns freshly owned values, so a single curve can be shared
//! between threads without locking.
//!
//! ```
//! use agora_ecc::{CurveGroup, WeierstrassCurve};
//! use num_bigint::BigUint;
//!
//! let curve = WeierstrassCurve::secp256k1();
//! let g = curve.generator().unwrap().clone();
//! let g5 = curve.mul(&g, &BigUint::from(5u8));
//! let encoded = curve.encode(&g5, true).unwrap();
//! assert_eq!(encoded.len(), 33);
//! assert_eq!(curve.decode(&encoded).unwrap(), g5);
//! ```

pub mod arithmetic;
pub mod curve;
pub mod ecdsa;
mod group;
mod hasher;
pub mod montgomery;
pub mod parse;
pub mod rng;
pub mod weierstrass;

pub use arithmetic::{Point, PrimeField, ProjectivePoint};
pub use bigint::U256;
pub use ecdsa::{Ecdsa, KeyPair, Signature};
pub use group::CurveGroup;
pub use hasher::MessageHasher;
pub use montgomery::MontgomeryCurve;
pub use weierstrass::WeierstrassCurve;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EccError {
    #[error("singular curve or non-prime modulus")]
    SingularCurve,
    #[error("point is not on the curve")]
    PointNotOnCurve,
    #[error("invalid encoding prefix: {0:#04x}, expected one of 0x02, 0x03, 0x04")]
    InvalidEncodingPrefix(u8),
    #[error("invalid encoding length: expected {expected}, got {actual}")]
    InvalidEncodingLength { expected: usize, actual: usize },
    #[error("the identity element has no byte encoding")]
    IdentityNotEncodable,
    #[error("secure random source is unavailable")]
    RandomnessUnavailable,
    #[error("curve has no base point")]
    MissingBasePoint,
    #[error("pubkey-privkey mismatch")]
    InvalidKeypair,
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

mod sealed {
    /// Implemented only by the two curve shapes of this crate.
    pub trait Sealed {}
}
