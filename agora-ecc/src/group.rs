use crate::arithmetic::{Point, ProjectivePoint};
use crate::montgomery::MontgomeryCurve;
use crate::sealed::Sealed;
use crate::weierstrass::WeierstrassCurve;
use crate::EccError;

use num_bigint::BigUint;
use rand_core::{CryptoRng, RngCore};

/// Operations shared by the two curve shapes of this crate.
///
/// The trait is sealed, it is implemented by [`WeierstrassCurve`] and
/// [`MontgomeryCurve`] only.
pub trait CurveGroup: Sealed {
    type Point: Clone + std::fmt::Debug + PartialEq;

    fn identity(&self) -> Self::Point;
    fn generator(&self) -> Option<&Self::Point>;
    fn order(&self) -> Option<&BigUint>;
    fn add(&self, lhs: &Self::Point, rhs: &Self::Point) -> Self::Point;
    fn double(&self, point: &Self::Point) -> Self::Point;
    fn mul(&self, point: &Self::Point, scalar: &BigUint) -> Self::Point;
    fn is_valid(&self, point: &Self::Point) -> bool;
    /// Group element equality, which is not representation equality for
    /// projective points.
    fn points_equal(&self, lhs: &Self::Point, rhs: &Self::Point) -> bool;
    /// `compressed` is ignored by curves that only have one encoding.
    fn encode(&self, point: &Self::Point, compressed: bool) -> Result<Vec<u8>, EccError>;
    fn decode(&self, bytes: &[u8]) -> Result<Self::Point, EccError>;
    fn random_point<R: RngCore + CryptoRng>(&self, rng: &mut R)
        -> Result<Self::Point, EccError>;
}

impl Sealed for WeierstrassCurve {}
impl Sealed for MontgomeryCurve {}

impl CurveGroup for WeierstrassCurve {
    type Point = Point;

    fn identity(&self) -> Point {
        Point::Identity
    }

    fn generator(&self) -> Option<&Point> {
        WeierstrassCurve::generator(self)
    }

    fn order(&self) -> Option<&BigUint> {
        WeierstrassCurve::order(self)
    }

    fn add(&self, lhs: &Point, rhs: &Point) -> Point {
        WeierstrassCurve::add(self, lhs, rhs)
    }

    fn double(&self, point: &Point) -> Point {
        WeierstrassCurve::double(self, point)
    }

    fn mul(&self, point: &Point, scalar: &BigUint) -> Point {
        WeierstrassCurve::mul(self, point, scalar)
    }

    fn is_valid(&self, point: &Point) -> bool {
        self.is_on_curve(point)
    }

    fn points_equal(&self, lhs: &Point, rhs: &Point) -> bool {
        lhs == rhs
    }

    fn encode(&self, point: &Point, compressed: bool) -> Result<Vec<u8>, EccError> {
        WeierstrassCurve::encode(self, point, compressed)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Point, EccError> {
        WeierstrassCurve::decode(self, bytes)
    }

    fn random_point<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Result<Point, EccError> {
        WeierstrassCurve::random_point(self, rng)
    }
}

impl CurveGroup for MontgomeryCurve {
    type Point = ProjectivePoint;

    fn identity(&self) -> ProjectivePoint {
        ProjectivePoint::identity()
    }

    fn generator(&self) -> Option<&ProjectivePoint> {
        Some(MontgomeryCurve::generator(self))
    }

    fn order(&self) -> Option<&BigUint> {
        Some(MontgomeryCurve::order(self))
    }

    fn add(&self, lhs: &ProjectivePoint, rhs: &ProjectivePoint) -> ProjectivePoint {
        MontgomeryCurve::add(self, lhs, rhs)
    }

    fn double(&self, point: &ProjectivePoint) -> ProjectivePoint {
        MontgomeryCurve::double(self, point)
    }

    fn mul(&self, point: &ProjectivePoint, scalar: &BigUint) -> ProjectivePoint {
        MontgomeryCurve::mul(self, point, scalar)
    }

    fn is_valid(&self, point: &ProjectivePoint) -> bool {
        MontgomeryCurve::is_valid(self, point)
    }

    fn points_equal(&self, lhs: &ProjectivePoint, rhs: &ProjectivePoint) -> bool {
        self.equivalent(lhs, rhs)
    }

    fn encode(&self, point: &ProjectivePoint, _compressed: bool) -> Result<Vec<u8>, EccError> {
        MontgomeryCurve::encode(self, point)
    }

    fn decode(&self, bytes: &[u8]) -> Result<ProjectivePoint, EccError> {
        MontgomeryCurve::decode(self, bytes)
    }

    fn random_point<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
    ) -> Result<ProjectivePoint, EccError> {
        MontgomeryCurve::random_point(self, rng)
    }
}
