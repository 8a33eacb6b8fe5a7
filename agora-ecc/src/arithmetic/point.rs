use num_bigint::BigUint;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

use std::fmt;

/// Affine point of a short Weierstrass curve.
///
/// The identity is its own variant so it never collides with a finite point
/// that happens to have `(0, 0)` coordinates.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Point {
    Identity,
    Affine { x: BigUint, y: BigUint },
}

impl Point {
    pub fn new(x: BigUint, y: BigUint) -> Self {
        Self::Affine { x, y }
    }

    pub fn is_identity(&self) -> bool {
        matches!(self, Self::Identity)
    }

    pub fn x(&self) -> Option<&BigUint> {
        match self {
            Self::Identity => None,
            Self::Affine { x, .. } => Some(x),
        }
    }

    pub fn y(&self) -> Option<&BigUint> {
        match self {
            Self::Identity => None,
            Self::Affine { y, .. } => Some(y),
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Identity => write!(f, "identity"),
            Self::Affine { x, y } => {
                writeln!(f)?;
                writeln!(f, "x: {:x}", x)?;
                writeln!(f, "y: {:x}", y)
            }
        }
    }
}

/// Point of a Montgomery curve in `(X : Z)` coordinates, affine `x = X / Z`.
///
/// `Z = 0` is the identity. Derived equality compares representations, use
/// [`MontgomeryCurve::equivalent`](crate::MontgomeryCurve::equivalent) for
/// projective equality.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectivePoint {
    x: BigUint,
    z: BigUint,
}

impl ProjectivePoint {
    pub fn new(x: BigUint, z: BigUint) -> Self {
        Self { x, z }
    }

    pub fn from_affine(x: BigUint) -> Self {
        Self { x, z: BigUint::one() }
    }

    pub fn identity() -> Self {
        Self {
            x: BigUint::one(),
            z: BigUint::zero(),
        }
    }

    pub fn is_identity(&self) -> bool {
        self.z.is_zero()
    }

    pub fn x(&self) -> &BigUint {
        &self.x
    }

    pub fn z(&self) -> &BigUint {
        &self.z
    }
}

impl fmt::Display for ProjectivePoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "x: {:x}", self.x)?;
        writeln!(f, "z: {:x}", self.z)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn identity_is_distinct_from_origin() {
        let origin = Point::new(BigUint::zero(), BigUint::zero());
        assert!(!origin.is_identity());
        assert_ne!(origin, Point::Identity);
        assert_eq!(origin.x(), Some(&BigUint::zero()));
        assert_eq!(Point::Identity.x(), None);
        assert_eq!(Point::Identity.y(), None);
    }

    #[test]
    fn projective_identity() {
        assert!(ProjectivePoint::identity().is_identity());
        assert!(ProjectivePoint::new(BigUint::from(5u8), BigUint::zero()).is_identity());
        let p = ProjectivePoint::from_affine(BigUint::from(9u8));
        assert!(!p.is_identity());
        assert_eq!(p.z(), &BigUint::one());
    }

    #[test]
    fn serde_roundtrip() {
        let p = Point::new(BigUint::from(3u8), BigUint::from(10u8));
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(serde_json::from_str::<Point>(&json).unwrap(), p);
        let json = serde_json::to_string(&Point::Identity).unwrap();
        assert_eq!(serde_json::from_str::<Point>(&json).unwrap(), Point::Identity);
    }
}
