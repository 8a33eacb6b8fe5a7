//! ECDSA over a short Weierstrass curve with a base point of prime order.
mod keypair;
mod signature;

pub use keypair::KeyPair;
pub use signature::Signature;

use crate::arithmetic::{Modular, Point, PrimeField};
use crate::curve::{to_biguint, Curve, Secp256k1};
use crate::hasher::MessageHasher;
use crate::rng::random_nonzero_below;
use crate::weierstrass::WeierstrassCurve;
use crate::EccError;

use log::debug;
use num_bigint::BigUint;
use num_traits::Zero;
use rand_core::{CryptoRng, RngCore};
use sha3::{Digest, Sha3_256};

use std::marker::PhantomData;

// Degenerate draws happen with probability about 2/n on a real curve.
const MAX_NONCE_DRAWS: usize = 64;

pub struct Ecdsa<D: Digest = Sha3_256> {
    curve: WeierstrassCurve,
    generator: Point,
    // arithmetic modulo the group order
    scalars: PrimeField,
    _digest: PhantomData<D>,
}

impl Ecdsa<Sha3_256> {
    pub fn secp256k1() -> Self {
        Self {
            curve: WeierstrassCurve::secp256k1(),
            generator: Point::new(
                to_biguint(&Secp256k1::GENERATOR_X),
                to_biguint(&Secp256k1::GENERATOR_Y),
            ),
            scalars: PrimeField::new(to_biguint(&Secp256k1::ORDER)),
            _digest: PhantomData,
        }
    }
}

impl<D: Digest> Ecdsa<D> {
    /// Fails with [`EccError::MissingBasePoint`] if `curve` has no generator.
    pub fn new(curve: WeierstrassCurve) -> Result<Self, EccError> {
        let generator = curve.generator().cloned().ok_or(EccError::MissingBasePoint)?;
        let order = curve.order().cloned().ok_or(EccError::MissingBasePoint)?;
        Ok(Self {
            curve,
            generator,
            scalars: PrimeField::new(order),
            _digest: PhantomData,
        })
    }

    pub fn curve(&self) -> &WeierstrassCurve {
        &self.curve
    }

    pub fn order(&self) -> &BigUint {
        self.scalars.modulus()
    }

    /// Byte width of a single signature component.
    pub fn scalar_len(&self) -> usize {
        self.scalars.byte_len()
    }

    pub fn generate_keypair<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
    ) -> Result<KeyPair, EccError> {
        KeyPair::random(&self.curve, rng)
    }

    /// The message digest read as a big-endian integer, not reduced.
    pub fn hash_to_int(&self, message: &[u8]) -> BigUint {
        MessageHasher::<D>::hash(message)
    }

    /// Signs `message`, drawing fresh nonces until neither `r` nor `s`
    /// vanishes.
    pub fn sign<R: RngCore + CryptoRng>(
        &self,
        message: &[u8],
        privkey: &BigUint,
        rng: &mut R,
    ) -> Result<Signature, EccError> {
        if privkey.is_zero() || privkey >= self.order() {
            return Err(EccError::InvalidParameter(
                "private key must lie in [1, n)".to_string(),
            ));
        }
        for _ in 0..MAX_NONCE_DRAWS {
            let nonce = random_nonzero_below(rng, self.order())?;
            match self.sign_with_nonce(message, privkey, &nonce) {
                Some(signature) => return Ok(signature),
                None => debug!("degenerate signature, drawing a new nonce"),
            }
        }
        Err(EccError::InvalidParameter(format!(
            "no valid signature after {} nonces",
            MAX_NONCE_DRAWS
        )))
    }

    /// Signs with a caller-chosen nonce. Returns `None` if the private key is
    /// outside `[1, n)`, the nonce is zero mod `n`, or `r` or `s` comes out zero.
    ///
    /// Reusing a nonce for two different messages reveals the private key.
    pub fn sign_with_nonce(
        &self,
        message: &[u8],
        privkey: &BigUint,
        nonce: &BigUint,
    ) -> Option<Signature> {
        if privkey.is_zero() || privkey >= self.order() {
            return None;
        }
        let nonce_inv = self.scalars.inverse(nonce)?;
        let point = self.curve.mul(&self.generator, nonce);
        let r = self.scalars.reduce(point.x()?);
        if r.is_zero() {
            return None;
        }
        let hash = self.hash_to_int(message);
        let s = self.scalars.mul(
            &self.scalars.add(&hash, &self.scalars.mul(privkey, &r)),
            &nonce_inv,
        );
        if s.is_zero() {
            return None;
        }
        Some(Signature::new(r, s))
    }

    pub fn verify(&self, message: &[u8], signature: &Signature, pubkey: &Point) -> bool {
        let n = self.order();
        let (r, s) = (signature.r(), signature.s());
        if r.is_zero() || r >= n || s.is_zero() || s >= n {
            return false;
        }
        if pubkey.is_identity() || !self.curve.is_on_curve(pubkey) {
            return false;
        }
        let s_inv = match self.scalars.inverse(s) {
            Some(inverse) => inverse,
            None => return false,
        };

        let hash = self.hash_to_int(message);
        let u1 = self.scalars.mul(&hash, &s_inv);
        let u2 = self.scalars.mul(r, &s_inv);
        let point = self.curve.add(
            &self.curve.mul(&self.generator, &u1),
            &self.curve.mul(pubkey, &u2),
        );
        match point.x() {
            Some(x) => &self.scalars.reduce(x) == r,
            None => false,
        }
    }
}
