//! `(X : Z)` arithmetic on Montgomery curves `y^2 = x^3 + Ax^2 + x mod p`.
//!
//! Only the `x` coordinate is tracked, so addition is differential: the sum
//! `P + Q` can only be computed when `P - Q` is known.
use crate::arithmetic::{is_probably_prime, Modular, Point, PrimeField, ProjectivePoint};
use crate::curve::{to_biguint, Curve25519, MontgomeryParams};
use crate::rng::random_below;
use crate::EccError;

use log::{debug, trace};
use num_bigint::BigUint;
use num_traits::Zero;
use rand_core::{CryptoRng, RngCore};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MontgomeryCurve {
    a: BigUint,
    field: PrimeField,
    generator: ProjectivePoint,
    order: BigUint,
}

impl MontgomeryCurve {
    /// Fails with [`EccError::SingularCurve`] if `p` is not a probable prime
    /// or `A^2 = 4 mod p`, and with [`EccError::PointNotOnCurve`] if the
    /// generator's `x` has no matching `y`.
    pub fn new(
        a: BigUint,
        p: BigUint,
        generator_x: BigUint,
        order: BigUint,
    ) -> Result<Self, EccError> {
        if !is_probably_prime(&p) {
            return Err(EccError::SingularCurve);
        }
        let field = PrimeField::new(p);
        let a = field.reduce(&a);
        if field.square(&a) == field.reduce(&BigUint::from(4u8)) {
            return Err(EccError::SingularCurve);
        }
        if order.is_zero() {
            return Err(EccError::InvalidParameter(
                "base point order must be positive".to_string(),
            ));
        }
        let curve = Self {
            a,
            generator: ProjectivePoint::from_affine(field.reduce(&generator_x)),
            field,
            order,
        };
        if !curve.is_valid(&curve.generator) {
            return Err(EccError::PointNotOnCurve);
        }
        trace!(
            "montgomery curve A = {} over a {}-bit field",
            curve.a,
            curve.field.modulus().bits()
        );
        Ok(curve)
    }

    pub fn from_params<C: MontgomeryParams>() -> Self {
        Self {
            a: to_biguint(&C::COEFF_A),
            field: PrimeField::new(to_biguint(&C::PRIME_MODULUS)),
            generator: ProjectivePoint::from_affine(to_biguint(&C::GENERATOR_X)),
            order: to_biguint(&C::ORDER),
        }
    }

    pub fn curve25519() -> Self {
        Self::from_params::<Curve25519>()
    }

    pub fn a(&self) -> &BigUint {
        &self.a
    }

    pub fn field(&self) -> &PrimeField {
        &self.field
    }

    pub fn generator(&self) -> &ProjectivePoint {
        &self.generator
    }

    pub fn order(&self) -> &BigUint {
        &self.order
    }

    /// Affine `x = X / Z`, `None` for the identity.
    pub fn to_affine_x(&self, point: &ProjectivePoint) -> Option<BigUint> {
        let z_inv = self.field.inverse(point.z())?;
        Some(self.field.mul(point.x(), &z_inv))
    }

    /// Projective equality, `X1 * Z2 = X2 * Z1`.
    pub fn equivalent(&self, lhs: &ProjectivePoint, rhs: &ProjectivePoint) -> bool {
        match (lhs.is_identity(), rhs.is_identity()) {
            (true, true) => true,
            (false, false) => {
                self.field.mul(lhs.x(), rhs.z()) == self.field.mul(rhs.x(), lhs.z())
            }
            _ => false,
        }
    }

    /// Ladder step addition with the generator as the known difference
    /// `lhs - rhs`.
    pub fn add(&self, lhs: &ProjectivePoint, rhs: &ProjectivePoint) -> ProjectivePoint {
        self.differential_add(lhs, rhs, &self.generator)
    }

    /// Computes `lhs + rhs` given `difference = lhs - rhs`.
    ///
    /// `X = Zd * (X1 X2 - Z1 Z2)^2`, `Z = Xd * (X1 Z2 - X2 Z1)^2`. With an
    /// affine difference `(xd : 1)` this is the plain ladder formula.
    pub fn differential_add(
        &self,
        lhs: &ProjectivePoint,
        rhs: &ProjectivePoint,
        difference: &ProjectivePoint,
    ) -> ProjectivePoint {
        if lhs.is_identity() {
            return rhs.clone();
        }
        if rhs.is_identity() {
            return lhs.clone();
        }
        if lhs == rhs {
            return self.double(lhs);
        }
        let f = &self.field;
        let xx = f.mul(lhs.x(), rhs.x());
        let zz = f.mul(lhs.z(), rhs.z());
        let xz = f.mul(lhs.x(), rhs.z());
        let zx = f.mul(rhs.x(), lhs.z());
        ProjectivePoint::new(
            f.mul(difference.z(), &f.square(&f.sub(&xx, &zz))),
            f.mul(difference.x(), &f.square(&f.sub(&xz, &zx))),
        )
    }

    pub fn double(&self, point: &ProjectivePoint) -> ProjectivePoint {
        let f = &self.field;
        let x2 = f.square(point.x());
        let z2 = f.square(point.z());
        let xz = f.mul(point.x(), point.z());
        // X^2 + A X Z + Z^2
        let inner = f.add(&f.add(&x2, &f.mul(&self.a, &xz)), &z2);
        ProjectivePoint::new(
            f.square(&f.sub(&x2, &z2)),
            f.mul(&f.mul(&BigUint::from(4u8), &xz), &inner),
        )
    }

    /// Two-accumulator ladder over the bits of `scalar`, highest set bit
    /// first. The accumulators always differ by `point`, which is used as
    /// the difference of every addition.
    pub fn mul(&self, point: &ProjectivePoint, scalar: &BigUint) -> ProjectivePoint {
        let mut r0 = ProjectivePoint::identity();
        let mut r1 = point.clone();
        for bit in (0..scalar.bits()).rev() {
            if scalar.bit(bit) {
                r0 = self.differential_add(&r0, &r1, point);
                r1 = self.double(&r1);
            } else {
                r1 = self.differential_add(&r0, &r1, point);
                r0 = self.double(&r0);
            }
        }
        r0
    }

    // x^3 + A x^2 + x
    fn rhs(&self, x: &BigUint) -> BigUint {
        let f = &self.field;
        let x2 = f.square(x);
        f.add(&f.add(&f.mul(&x2, x), &f.mul(&self.a, &x2)), x)
    }

    /// One of the two `y` coordinates belonging to `point`.
    pub fn eval(&self, point: &ProjectivePoint) -> Result<BigUint, EccError> {
        let x = self.to_affine_x(point).ok_or_else(|| {
            EccError::InvalidParameter("the identity has no affine coordinates".to_string())
        })?;
        self.field.sqrt(&self.rhs(&x)).ok_or(EccError::PointNotOnCurve)
    }

    /// The full affine point `(x, y)` with one of the two possible `y`s.
    pub fn to_affine(&self, point: &ProjectivePoint) -> Result<Point, EccError> {
        match self.to_affine_x(point) {
            None => Ok(Point::Identity),
            Some(x) => {
                let y = self.eval(point)?;
                Ok(Point::new(x, y))
            }
        }
    }

    /// `true` for the identity and for points whose `x` lies on the curve
    /// rather than on its quadratic twist.
    pub fn is_valid(&self, point: &ProjectivePoint) -> bool {
        match self.to_affine_x(point) {
            None => true,
            Some(x) => self.field.is_square(&self.rhs(&x)),
        }
    }

    /// Little-endian `u` coordinate as in RFC 7748, 32 bytes for
    /// curve25519.
    pub fn encode(&self, point: &ProjectivePoint) -> Result<Vec<u8>, EccError> {
        let x = self
            .to_affine_x(point)
            .ok_or(EccError::IdentityNotEncodable)?;
        Ok(self.field.to_le_bytes(&x))
    }

    /// Inverse of [`encode`](Self::encode). The most significant bit is
    /// ignored and non-canonical values are reduced, but `u` coordinates on
    /// the twist are rejected.
    pub fn decode(&self, bytes: &[u8]) -> Result<ProjectivePoint, EccError> {
        let len = self.field.byte_len();
        if bytes.len() != len {
            return Err(EccError::InvalidEncodingLength {
                expected: len,
                actual: bytes.len(),
            });
        }
        // bits above the modulus width, the top bit for curve25519
        let excess_bits = (len as u64 * 8 - self.field.modulus().bits()) as u32;
        let mut masked = bytes.to_vec();
        masked[len - 1] &= 0xff >> excess_bits;
        let point = ProjectivePoint::from_affine(self.field.from_le_bytes(&masked));
        if !self.is_valid(&point) {
            return Err(EccError::PointNotOnCurve);
        }
        Ok(point)
    }

    /// Draws `x` from `[0, n)` until it is the `x` coordinate of a curve
    /// point.
    pub fn random_point<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
    ) -> Result<ProjectivePoint, EccError> {
        loop {
            let point = ProjectivePoint::from_affine(random_below(rng, &self.order)?);
            if self.is_valid(&point) {
                return Ok(point);
            }
            debug!("x = {:x} lies on the twist, resampling", point.x());
        }
    }
}

impl Default for MontgomeryCurve {
    fn default() -> Self {
        Self::curve25519()
    }
}

/// Turns 32 random bytes into an X25519 scalar: the low three bits are
/// cleared, bit 255 is cleared and bit 254 is set.
pub fn clamp_scalar(mut bytes: [u8; 32]) -> BigUint {
    bytes[0] &= 248;
    bytes[31] &= 127;
    bytes[31] |= 64;
    BigUint::from_bytes_le(&bytes)
}
