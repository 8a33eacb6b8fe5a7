//! Affine group law of short Weierstrass curves `y^2 = x^3 + ax + b mod p`.
use crate::arithmetic::{is_probably_prime, Modular, Point, PrimeField};
use crate::curve::{to_biguint, Secp256k1, WeierstrassParams};
use crate::rng::random_below;
use crate::EccError;

use log::{debug, trace};
use num_bigint::BigUint;
use num_traits::Zero;
use rand_core::{CryptoRng, RngCore};

const PREFIX_EVEN: u8 = 0x02;
const PREFIX_ODD: u8 = 0x03;
const PREFIX_UNCOMPRESSED: u8 = 0x04;

#[derive(Clone, Debug, PartialEq, Eq)]
struct BasePoint {
    generator: Point,
    order: BigUint,
}

/// A non-singular short Weierstrass curve over a prime field, optionally
/// carrying a base point of known order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeierstrassCurve {
    a: BigUint,
    b: BigUint,
    field: PrimeField,
    base: Option<BasePoint>,
}

impl WeierstrassCurve {
    /// Fails with [`EccError::SingularCurve`] if `p` is not a probable prime
    /// or if the discriminant `4a^3 + 27b^2` vanishes mod `p`.
    pub fn new(a: BigUint, b: BigUint, p: BigUint) -> Result<Self, EccError> {
        if !is_probably_prime(&p) {
            return Err(EccError::SingularCurve);
        }
        let field = PrimeField::new(p);
        let a = field.reduce(&a);
        let b = field.reduce(&b);

        let a3 = field.mul(&field.square(&a), &a);
        let discriminant = field.add(
            &field.mul(&BigUint::from(4u8), &a3),
            &field.mul(&BigUint::from(27u8), &field.square(&b)),
        );
        if discriminant.is_zero() {
            return Err(EccError::SingularCurve);
        }

        trace!(
            "weierstrass curve a = {:x}, b = {:x} over a {}-bit field",
            a,
            b,
            field.modulus().bits()
        );
        Ok(Self {
            a,
            b,
            field,
            base: None,
        })
    }

    /// Attaches a generator of the given order. The order must be a probable
    /// prime and annihilate the generator.
    pub fn with_base_point(mut self, generator: Point, order: BigUint) -> Result<Self, EccError> {
        if generator.is_identity() || !self.is_on_curve(&generator) {
            return Err(EccError::PointNotOnCurve);
        }
        if !is_probably_prime(&order) {
            return Err(EccError::InvalidParameter(
                "base point order must be prime".to_string(),
            ));
        }
        if !self.mul(&generator, &order).is_identity() {
            return Err(EccError::InvalidParameter(
                "base point order does not annihilate the generator".to_string(),
            ));
        }
        self.base = Some(BasePoint { generator, order });
        Ok(self)
    }

    /// Builds a curve from a compile-time parameter set. The constants are
    /// trusted and not re-validated.
    pub fn from_params<C: WeierstrassParams>() -> Self {
        Self {
            a: to_biguint(&C::COEFF_A),
            b: to_biguint(&C::COEFF_B),
            field: PrimeField::new(to_biguint(&C::PRIME_MODULUS)),
            base: Some(BasePoint {
                generator: Point::new(to_biguint(&C::GENERATOR_X), to_biguint(&C::GENERATOR_Y)),
                order: to_biguint(&C::ORDER),
            }),
        }
    }

    pub fn secp256k1() -> Self {
        Self::from_params::<Secp256k1>()
    }

    pub fn a(&self) -> &BigUint {
        &self.a
    }

    pub fn b(&self) -> &BigUint {
        &self.b
    }

    pub fn field(&self) -> &PrimeField {
        &self.field
    }

    pub fn generator(&self) -> Option<&Point> {
        self.base.as_ref().map(|base| &base.generator)
    }

    pub fn order(&self) -> Option<&BigUint> {
        self.base.as_ref().map(|base| &base.order)
    }

    /// Right-hand side of the curve equation, `x^3 + ax + b`.
    fn rhs(&self, x: &BigUint) -> BigUint {
        let x3 = self.field.mul(&self.field.square(x), x);
        let ax = self.field.mul(&self.a, x);
        self.field.add(&self.field.add(&x3, &ax), &self.b)
    }

    pub fn is_on_curve(&self, point: &Point) -> bool {
        match point {
            Point::Identity => true,
            Point::Affine { x, y } => {
                let p = self.field.modulus();
                x < p && y < p && self.field.square(y) == self.rhs(x)
            }
        }
    }

    pub fn add(&self, lhs: &Point, rhs: &Point) -> Point {
        let (x1, y1, x2, y2) = match (lhs, rhs) {
            (Point::Identity, _) => return rhs.clone(),
            (_, Point::Identity) => return lhs.clone(),
            (Point::Affine { x: x1, y: y1 }, Point::Affine { x: x2, y: y2 }) => (x1, y1, x2, y2),
        };
        if lhs == rhs {
            return self.double(lhs);
        }

        // a zero denominator means rhs = -lhs
        let denominator = match self.field.inverse(&self.field.sub(x2, x1)) {
            Some(inverse) => inverse,
            None => return Point::Identity,
        };
        let slope = self.field.mul(&self.field.sub(y2, y1), &denominator);
        self.chord(&slope, x1, y1, x2)
    }

    pub fn double(&self, point: &Point) -> Point {
        let (x, y) = match point {
            Point::Identity => return Point::Identity,
            Point::Affine { x, y } => (x, y),
        };

        // a vertical tangent (y = 0) has no inverse
        let denominator = match self.field.inverse(&self.field.add(y, y)) {
            Some(inverse) => inverse,
            None => return Point::Identity,
        };
        let numerator = self.field.add(
            &self.field.mul(&BigUint::from(3u8), &self.field.square(x)),
            &self.a,
        );
        let slope = self.field.mul(&numerator, &denominator);
        self.chord(&slope, x, y, x)
    }

    // x3 = s^2 - x1 - x2, y3 = s(x1 - x3) - y1
    fn chord(&self, slope: &BigUint, x1: &BigUint, y1: &BigUint, x2: &BigUint) -> Point {
        let x3 = self
            .field
            .sub(&self.field.sub(&self.field.square(slope), x1), x2);
        let y3 = self
            .field
            .sub(&self.field.mul(slope, &self.field.sub(x1, &x3)), y1);
        Point::new(x3, y3)
    }

    pub fn negate(&self, point: &Point) -> Point {
        match point {
            Point::Identity => Point::Identity,
            Point::Affine { x, y } => Point::new(x.clone(), self.field.neg(y)),
        }
    }

    pub fn sub(&self, lhs: &Point, rhs: &Point) -> Point {
        self.add(lhs, &self.negate(rhs))
    }

    /// Most-significant-bit-first double-and-add.
    ///
    /// The accumulator starts at `point` for the top set bit of `scalar`, so a
    /// zero scalar is answered with the identity up front. Once an
    /// intermediate doubling collapses to the identity it stays there under
    /// doubling and later additions restart from `point`.
    pub fn mul(&self, point: &Point, scalar: &BigUint) -> Point {
        if scalar.is_zero() || point.is_identity() {
            return Point::Identity;
        }
        let mut acc = point.clone();
        for bit in (0..scalar.bits() - 1).rev() {
            acc = self.double(&acc);
            if scalar.bit(bit) {
                acc = self.add(&acc, point);
            }
        }
        acc
    }

    /// Recovers a `y` with `y^2 = x^3 + ax + b`, failing with
    /// [`EccError::PointNotOnCurve`] when the right-hand side is a
    /// non-residue. The other root is `p - y`.
    pub fn eval(&self, x: &BigUint) -> Result<BigUint, EccError> {
        let y2 = self.rhs(x);
        if self.field.legendre(&y2) == -1 {
            return Err(EccError::PointNotOnCurve);
        }
        self.field.sqrt(&y2).ok_or(EccError::PointNotOnCurve)
    }

    /// SEC1 encoding: `04 || X || Y`, or `02 || X` / `03 || X` depending on
    /// the parity of `Y`.
    pub fn encode(&self, point: &Point, compressed: bool) -> Result<Vec<u8>, EccError> {
        let (x, y) = match point {
            Point::Identity => return Err(EccError::IdentityNotEncodable),
            Point::Affine { x, y } => (x, y),
        };
        let width = self.field.byte_len();
        let mut encoded = Vec::with_capacity(1 + 2 * width);
        if compressed {
            let prefix = if self.field.is_odd(y) {
                PREFIX_ODD
            } else {
                PREFIX_EVEN
            };
            encoded.push(prefix);
            encoded.extend_from_slice(&self.field.to_be_bytes(x));
        } else {
            encoded.push(PREFIX_UNCOMPRESSED);
            encoded.extend_from_slice(&self.field.to_be_bytes(x));
            encoded.extend_from_slice(&self.field.to_be_bytes(y));
        }
        Ok(encoded)
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<Point, EccError> {
        let width = self.field.byte_len();
        let (&prefix, body) = bytes.split_first().ok_or(EccError::InvalidEncodingLength {
            expected: 1 + width,
            actual: 0,
        })?;

        match prefix {
            PREFIX_UNCOMPRESSED => {
                check_len(bytes, 1 + 2 * width)?;
                let point = Point::new(
                    BigUint::from_bytes_be(&body[..width]),
                    BigUint::from_bytes_be(&body[width..]),
                );
                if !self.is_on_curve(&point) {
                    return Err(EccError::PointNotOnCurve);
                }
                Ok(point)
            }
            PREFIX_EVEN | PREFIX_ODD => {
                check_len(bytes, 1 + width)?;
                let x = BigUint::from_bytes_be(body);
                if &x >= self.field.modulus() {
                    return Err(EccError::PointNotOnCurve);
                }
                let mut y = self.eval(&x)?;
                let want_odd = prefix == PREFIX_ODD;
                if self.field.is_odd(&y) != want_odd {
                    if y.is_zero() {
                        return Err(EccError::PointNotOnCurve);
                    }
                    y = self.field.neg(&y);
                }
                Ok(Point::new(x, y))
            }
            other => Err(EccError::InvalidEncodingPrefix(other)),
        }
    }

    /// Samples `x` uniformly from the field until it lands on the curve, then
    /// picks one of the two roots at random.
    pub fn random_point<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Result<Point, EccError> {
        loop {
            let x = random_below(rng, self.field.modulus())?;
            match self.eval(&x) {
                Ok(y) => {
                    let flip = random_below(rng, &BigUint::from(2u8))?;
                    let y = if flip.is_zero() { y } else { self.field.neg(&y) };
                    return Ok(Point::new(x, y));
                }
                Err(_) => debug!("x = {:x} is not on the curve, resampling", x),
            }
        }
    }
}

fn check_len(bytes: &[u8], expected: usize) -> Result<(), EccError> {
    if bytes.len() != expected {
        return Err(EccError::InvalidEncodingLength {
            expected,
            actual: bytes.len(),
        });
    }
    Ok(())
}

impl Default for WeierstrassCurve {
    fn default() -> Self {
        Self::secp256k1()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use num_traits::One;
    use rand_core::OsRng;

    fn hex(s: &str) -> BigUint {
        BigUint::parse_bytes(s.as_bytes(), 16).unwrap()
    }

    fn small(n: u32) -> BigUint {
        BigUint::from(n)
    }

    fn generator() -> Point {
        WeierstrassCurve::secp256k1().generator().unwrap().clone()
    }

    #[test]
    fn construction() {
        assert_eq!(
            WeierstrassCurve::new(small(0), small(0), small(23)),
            Err(EccError::SingularCurve)
        );
        // 4 * 3^3 + 27 * 1^2 = 135 = 0 mod 5
        assert_eq!(
            WeierstrassCurve::new(small(3), small(1), small(5)),
            Err(EccError::SingularCurve)
        );
        assert_eq!(
            WeierstrassCurve::new(small(1), small(1), small(21)),
            Err(EccError::SingularCurve)
        );
        let p = WeierstrassCurve::secp256k1().field().modulus().clone();
        let curve = WeierstrassCurve::new(small(0), small(7), p).unwrap();
        assert_eq!(curve.generator(), None);
        assert_eq!(curve.order(), None);

        let with_base = curve
            .clone()
            .with_base_point(generator(), WeierstrassCurve::secp256k1().order().unwrap().clone())
            .unwrap();
        assert_eq!(with_base, WeierstrassCurve::secp256k1());
        assert_eq!(
            curve.with_base_point(Point::new(small(1), small(1)), small(7)),
            Err(EccError::PointNotOnCurve)
        );
    }

    #[test]
    fn base_point_order_is_validated() {
        let secp = WeierstrassCurve::secp256k1();
        let n = secp.order().unwrap().clone();
        let curve = WeierstrassCurve::new(small(0), small(7), secp.field().modulus().clone()).unwrap();

        // n - 2 is odd, but neither prime nor the order of G
        assert!(matches!(
            curve.clone().with_base_point(generator(), &n - small(2)),
            Err(EccError::InvalidParameter(_))
        ));
        assert!(matches!(
            curve.clone().with_base_point(generator(), small(15)),
            Err(EccError::InvalidParameter(_))
        ));
        // prime, but not the order of G
        assert!(matches!(
            curve.clone().with_base_point(generator(), small(7)),
            Err(EccError::InvalidParameter(_))
        ));
        assert!(matches!(
            curve.with_base_point(generator(), BigUint::zero()),
            Err(EccError::InvalidParameter(_))
        ));

        let tiny = WeierstrassCurve::new(small(0), small(2), small(5)).unwrap();
        let two_torsion = Point::new(small(2), small(0));
        assert!(tiny.clone().with_base_point(two_torsion.clone(), small(2)).is_ok());
        assert!(matches!(
            tiny.with_base_point(two_torsion, small(3)),
            Err(EccError::InvalidParameter(_))
        ));
    }

    #[test]
    fn on_curve_check() {
        let curve = WeierstrassCurve::secp256k1();
        let g = generator();
        assert!(curve.is_on_curve(&g));
        assert!(curve.is_on_curve(&Point::Identity));
        assert!(curve.is_on_curve(&curve.double(&g)));
        assert!(curve.is_on_curve(&curve.mul(&g, &small(123456))));
        assert!(!curve.is_on_curve(&Point::new(small(1), small(1))));
        // coordinates outside the field are rejected even if congruent
        let (x, y) = (g.x().unwrap(), g.y().unwrap());
        let shifted = Point::new(x + curve.field().modulus(), y.clone());
        assert!(!curve.is_on_curve(&shifted));
    }

    #[test]
    fn point_addition() {
        let curve = WeierstrassCurve::secp256k1();
        let g = generator();
        let g2 = curve.double(&g);
        assert_eq!(
            g2,
            Point::new(
                hex("c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5"),
                hex("1ae168fea63dc339a3c58419466ceaeef7f632653266d0e1236431a950cfe52a"),
            )
        );
        assert_eq!(curve.add(&g, &g), g2);

        let random_double = curve.double(&Point::new(
            hex("B8F0170E293FCC9291BEE2665E9CA9B25D3B11810ED68D9EA0CB440D7064E4DA"),
            hex("0691AA44502212591132AA6F27582B78F9976998DE355C4EE5960DB05AC0A2A3"),
        ));
        assert!(curve.is_on_curve(&random_double));
        assert_eq!(
            random_double,
            Point::new(
                hex("d99bdf80fe99540ed7c33669cc43ac72fa2fa2c14b731ae6758c1c17eaf7b26e"),
                hex("cac2c38a379655150567315c7cf7f596585b577b28e03108b0d2df2b9c83af52"),
            )
        );

        let g4 = curve.mul(&g, &small(4));
        assert_eq!(curve.double(&g2), g4);
        assert_eq!(curve.add(&g2, &g2), g4);
        let g5 = curve.mul(&g, &small(5));
        assert_eq!(
            g5,
            Point::new(
                hex("2f8bde4d1a07209355b4a7250a5c5128e88b84bddc619ab7cba8d569b240efe4"),
                hex("d8ac222636e5e3d6d4dba9dda6c9c426f788271bab0d6840dca87d3aa6ac62d6"),
            )
        );
        assert_eq!(curve.add(&g4, &g), g5);
        assert_eq!(curve.sub(&g5, &g), g4);
    }

    #[test]
    fn identity_and_inverses() {
        let curve = WeierstrassCurve::secp256k1();
        let g = generator();
        let neg_g = curve.negate(&g);
        assert!(curve.is_on_curve(&neg_g));
        assert_eq!(curve.add(&g, &neg_g), Point::Identity);
        assert_eq!(curve.add(&Point::Identity, &g), g);
        assert_eq!(curve.add(&g, &Point::Identity), g);
        assert_eq!(curve.double(&Point::Identity), Point::Identity);
        assert_eq!(curve.negate(&Point::Identity), Point::Identity);
        assert_eq!(curve.negate(&neg_g), g);
    }

    #[test]
    fn vertical_tangent_doubles_to_identity() {
        // y^2 = x^3 + 2 over F_5, (2, 0) has order two
        let curve = WeierstrassCurve::new(small(0), small(2), small(5)).unwrap();
        let two_torsion = Point::new(small(2), small(0));
        assert!(curve.is_on_curve(&two_torsion));
        assert_eq!(curve.double(&two_torsion), Point::Identity);
        assert_eq!(curve.mul(&two_torsion, &small(2)), Point::Identity);
        assert_eq!(curve.mul(&two_torsion, &small(3)), two_torsion);
    }

    #[test]
    fn scalar_multiplication() {
        let curve = WeierstrassCurve::secp256k1();
        let g = generator();
        let n = curve.order().unwrap().clone();

        assert_eq!(curve.mul(&g, &BigUint::zero()), Point::Identity);
        assert_eq!(curve.mul(&g, &BigUint::one()), g);
        assert_eq!(curve.mul(&Point::Identity, &small(12)), Point::Identity);
        assert_eq!(curve.mul(&g, &n), Point::Identity);
        assert_eq!(curve.mul(&g, &(&n + BigUint::one())), g);
        assert_eq!(curve.mul(&g, &(&n - BigUint::one())), curve.negate(&g));
        // the accumulator passes through the identity on the way
        let two_n_plus_one = &n + &n + BigUint::one();
        assert_eq!(curve.mul(&g, &two_n_plus_one), g);

        let mut g12 = Point::Identity;
        for _ in 0..12 {
            g12 = curve.add(&g12, &g);
        }
        assert_eq!(curve.mul(&g, &small(12)), g12);
    }

    #[test]
    fn commutativity_and_distributivity() {
        let curve = WeierstrassCurve::secp256k1();
        let g = generator();
        let n = curve.order().unwrap();
        let mut rng = OsRng;
        for _ in 0..16 {
            let a = random_below(&mut rng, n).unwrap();
            let b = random_below(&mut rng, n).unwrap();
            let p = curve.mul(&g, &a);
            let q = curve.mul(&g, &b);
            let pq = curve.add(&p, &q);
            assert_eq!(pq, curve.add(&q, &p));
            assert_eq!(pq, curve.mul(&g, &(&a + &b)));
        }
    }

    #[test]
    fn eval_recovers_both_roots() {
        let curve = WeierstrassCurve::secp256k1();
        let g = generator();
        let y = curve.eval(g.x().unwrap()).unwrap();
        assert!(&y == g.y().unwrap() || y == curve.field().neg(g.y().unwrap()));
        // x^3 + 7 is a non-residue for x = 5
        assert_eq!(curve.eval(&small(5)), Err(EccError::PointNotOnCurve));
    }

    #[test]
    fn generator_encoding() {
        let curve = WeierstrassCurve::secp256k1();
        let g = generator();
        let compressed = curve.encode(&g, true).unwrap();
        assert_eq!(compressed.len(), 33);
        assert_eq!(compressed[0], 0x02);
        assert_eq!(
            &compressed[1..],
            &g.x().unwrap().to_bytes_be()[..],
        );
        let uncompressed = curve.encode(&g, false).unwrap();
        assert_eq!(uncompressed.len(), 65);
        assert_eq!(uncompressed[0], 0x04);
        assert_eq!(curve.decode(&compressed).unwrap(), g);
        assert_eq!(curve.decode(&uncompressed).unwrap(), g);

        let neg_g = curve.negate(&g);
        let compressed = curve.encode(&neg_g, true).unwrap();
        assert_eq!(compressed[0], 0x03);
        assert_eq!(curve.decode(&compressed).unwrap(), neg_g);

        assert_eq!(
            curve.encode(&Point::Identity, true),
            Err(EccError::IdentityNotEncodable)
        );
    }

    #[test]
    fn encoding_roundtrip() {
        let curve = WeierstrassCurve::secp256k1();
        let g = generator();
        let n = curve.order().unwrap();
        let mut rng = OsRng;
        for _ in 0..32 {
            let k = random_below(&mut rng, n).unwrap();
            let point = curve.mul(&g, &k);
            if point.is_identity() {
                continue;
            }
            for compressed in [true, false] {
                let encoded = curve.encode(&point, compressed).unwrap();
                assert_eq!(curve.decode(&encoded).unwrap(), point);
            }
        }
        for _ in 0..32 {
            let point = curve.random_point(&mut rng).unwrap();
            assert!(curve.is_on_curve(&point));
            let encoded = curve.encode(&point, true).unwrap();
            assert_eq!(curve.decode(&encoded).unwrap(), point);
        }
    }

    #[test]
    fn decode_rejects_malformed_input() {
        let curve = WeierstrassCurve::secp256k1();
        let mut encoded = curve.encode(&generator(), true).unwrap();
        for prefix in [0x00u8, 0x01, 0x05, 0x06, 0xff] {
            encoded[0] = prefix;
            assert_eq!(
                curve.decode(&encoded),
                Err(EccError::InvalidEncodingPrefix(prefix))
            );
        }
        assert_eq!(
            curve.decode(&[]),
            Err(EccError::InvalidEncodingLength {
                expected: 33,
                actual: 0
            })
        );
        encoded[0] = 0x02;
        assert_eq!(
            curve.decode(&encoded[..32]),
            Err(EccError::InvalidEncodingLength {
                expected: 33,
                actual: 32
            })
        );
        let mut uncompressed = curve.encode(&generator(), false).unwrap();
        uncompressed[64] ^= 1;
        assert_eq!(curve.decode(&uncompressed), Err(EccError::PointNotOnCurve));

        let mut not_on_curve = vec![0x02];
        not_on_curve.extend_from_slice(&curve.field().to_be_bytes(&small(5)));
        assert_eq!(curve.decode(&not_on_curve), Err(EccError::PointNotOnCurve));

        let mut too_large = vec![0x02];
        too_large.extend_from_slice(&[0xff; 32]);
        assert_eq!(curve.decode(&too_large), Err(EccError::PointNotOnCurve));
    }

    #[test]
    fn small_curve_encoding_width() {
        // y^2 = x^3 + x + 1 over F_23, the textbook example with 28 points
        let curve = WeierstrassCurve::new(small(1), small(1), small(23)).unwrap();
        let point = Point::new(small(3), small(10));
        assert!(curve.is_on_curve(&point));
        let encoded = curve.encode(&point, true).unwrap();
        assert_eq!(encoded, vec![0x02, 0x03]);
        assert_eq!(curve.decode(&encoded).unwrap(), point);
        assert_eq!(curve.double(&point), Point::new(small(7), small(12)));
        assert_eq!(
            curve.add(&point, &Point::new(small(9), small(7))),
            Point::new(small(17), small(20))
        );
    }
}
