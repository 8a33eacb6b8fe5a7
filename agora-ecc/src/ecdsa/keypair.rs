use crate::arithmetic::Point;
use crate::rng::random_nonzero_below;
use crate::weierstrass::WeierstrassCurve;
use crate::EccError;

use num_bigint::BigUint;
use num_traits::Zero;
use rand_core::{CryptoRng, RngCore};

/// A private scalar in `[1, n)` together with its public point `privkey * G`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyPair {
    privkey: BigUint,
    pubkey: Point,
}

impl KeyPair {
    pub fn new(curve: &WeierstrassCurve, privkey: BigUint) -> Result<Self, EccError> {
        let (generator, order) = base_point(curve)?;
        if privkey.is_zero() || &privkey >= order {
            return Err(EccError::InvalidParameter(
                "private key must lie in [1, n)".to_string(),
            ));
        }
        let pubkey = curve.mul(generator, &privkey);
        Ok(Self { privkey, pubkey })
    }

    pub fn new_checked(
        curve: &WeierstrassCurve,
        privkey: BigUint,
        pubkey: Point,
    ) -> Result<Self, EccError> {
        let keypair = Self::new(curve, privkey)?;
        if keypair.pubkey != pubkey {
            Err(EccError::InvalidKeypair)
        } else {
            Ok(keypair)
        }
    }

    pub fn random<R: RngCore + CryptoRng>(
        curve: &WeierstrassCurve,
        rng: &mut R,
    ) -> Result<Self, EccError> {
        let (_, order) = base_point(curve)?;
        let privkey = random_nonzero_below(rng, order)?;
        Self::new(curve, privkey)
    }

    pub fn pubkey(&self) -> &Point {
        &self.pubkey
    }

    pub fn privkey(&self) -> &BigUint {
        &self.privkey
    }
}

fn base_point(curve: &WeierstrassCurve) -> Result<(&Point, &BigUint), EccError> {
    curve
        .generator()
        .zip(curve.order())
        .ok_or(EccError::MissingBasePoint)
}
