use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

/// Arithmetic modulo a fixed integer.
///
/// Every method takes its operands by reference and returns a new, fully
/// reduced value in `[0, modulus)`. Operands do not need to be reduced.
pub trait Modular {
    fn modulus(&self) -> &BigUint;

    fn reduce(&self, number: &BigUint) -> BigUint {
        number % self.modulus()
    }

    fn add(&self, lhs: &BigUint, rhs: &BigUint) -> BigUint {
        (lhs + rhs) % self.modulus()
    }

    fn sub(&self, lhs: &BigUint, rhs: &BigUint) -> BigUint {
        let modulus = self.modulus();
        ((lhs % modulus) + modulus - (rhs % modulus)) % modulus
    }

    fn neg(&self, number: &BigUint) -> BigUint {
        self.sub(&BigUint::zero(), number)
    }

    fn mul(&self, lhs: &BigUint, rhs: &BigUint) -> BigUint {
        (lhs * rhs) % self.modulus()
    }

    fn square(&self, number: &BigUint) -> BigUint {
        self.mul(number, number)
    }

    fn pow(&self, base: &BigUint, exponent: &BigUint) -> BigUint {
        base.modpow(exponent, self.modulus())
    }

    /// Returns `None` when `number` shares a factor with the modulus (in
    /// particular when it is zero).
    fn inverse(&self, number: &BigUint) -> Option<BigUint> {
        self.reduce(number).modinv(self.modulus())
    }
}

/// The field of integers modulo an odd prime `p`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrimeField {
    modulus: BigUint,
}

impl Modular for PrimeField {
    fn modulus(&self) -> &BigUint {
        &self.modulus
    }
}

impl PrimeField {
    /// The modulus is assumed to be prime; callers that accept untrusted
    /// moduli check it with [`is_probably_prime`](super::is_probably_prime)
    /// first.
    pub fn new(modulus: BigUint) -> Self {
        Self { modulus }
    }

    /// Number of bytes needed to hold any element.
    pub fn byte_len(&self) -> usize {
        ((self.modulus.bits() + 7) / 8) as usize
    }

    /// Fixed-width big-endian encoding of the reduced element.
    pub fn to_be_bytes(&self, number: &BigUint) -> Vec<u8> {
        let bytes = self.reduce(number).to_bytes_be();
        let mut padded = vec![0u8; self.byte_len()];
        padded[self.byte_len() - bytes.len()..].copy_from_slice(&bytes);
        padded
    }

    /// Fixed-width little-endian encoding of the reduced element.
    pub fn to_le_bytes(&self, number: &BigUint) -> Vec<u8> {
        let mut bytes = self.reduce(number).to_bytes_le();
        bytes.resize(self.byte_len(), 0);
        bytes
    }

    pub fn from_be_bytes(&self, bytes: &[u8]) -> BigUint {
        self.reduce(&BigUint::from_bytes_be(bytes))
    }

    pub fn from_le_bytes(&self, bytes: &[u8]) -> BigUint {
        self.reduce(&BigUint::from_bytes_le(bytes))
    }

    /// Legendre symbol of `number`: `0` if it is divisible by `p`, `1` for a
    /// quadratic residue and `-1` for a non-residue.
    pub fn legendre(&self, number: &BigUint) -> i8 {
        let reduced = self.reduce(number);
        if reduced.is_zero() {
            return 0;
        }
        let exponent = (&self.modulus - BigUint::one()) >> 1u32;
        if self.pow(&reduced, &exponent).is_one() {
            1
        } else {
            -1
        }
    }

    pub fn is_square(&self, number: &BigUint) -> bool {
        self.legendre(number) != -1
    }

    /// One of the two square roots of `number`, or `None` for a non-residue.
    pub fn sqrt(&self, number: &BigUint) -> Option<BigUint> {
        let reduced = self.reduce(number);
        if reduced.is_zero() || self.modulus == BigUint::from(2u8) {
            return Some(reduced);
        }
        if self.legendre(&reduced) != 1 {
            return None;
        }

        let residue_mod_8 = self.modulus.iter_u32_digits().next().unwrap_or(0) & 7;
        let root = match residue_mod_8 {
            3 | 7 => {
                // p = 3 mod 4: a^((p + 1) / 4)
                let exponent = (&self.modulus + BigUint::one()) >> 2u32;
                self.pow(&reduced, &exponent)
            }
            5 => self.sqrt_5_mod_8(&reduced),
            _ => self.tonelli_shanks(&reduced),
        };
        debug_assert_eq!(self.square(&root), reduced);
        Some(root)
    }

    // Atkin's variant: a^((p + 3) / 8), corrected by sqrt(-1) = 2^((p - 1) / 4)
    // when it squares to -a.
    fn sqrt_5_mod_8(&self, residue: &BigUint) -> BigUint {
        let exponent = (&self.modulus + BigUint::from(3u8)) >> 3u32;
        let candidate = self.pow(residue, &exponent);
        if &self.square(&candidate) == residue {
            candidate
        } else {
            let exponent = (&self.modulus - BigUint::one()) >> 2u32;
            let sqrt_minus_one = self.pow(&BigUint::from(2u8), &exponent);
            self.mul(&candidate, &sqrt_minus_one)
        }
    }

    fn tonelli_shanks(&self, residue: &BigUint) -> BigUint {
        let one = BigUint::one();
        let p_minus_one = &self.modulus - &one;
        let two_adicity = p_minus_one.trailing_zeros().unwrap_or(0);
        let odd_part = &p_minus_one >> two_adicity;

        let mut non_residue = BigUint::from(2u8);
        while self.legendre(&non_residue) != -1 {
            non_residue += 1u32;
        }

        let mut order = two_adicity;
        let mut c = self.pow(&non_residue, &odd_part);
        let mut t = self.pow(residue, &odd_part);
        let mut root = self.pow(residue, &((&odd_part + &one) >> 1u32));

        while !t.is_one() {
            let mut i = 0u64;
            let mut t_pow = t.clone();
            while !t_pow.is_one() {
                t_pow = self.square(&t_pow);
                i += 1;
            }
            let mut b = c.clone();
            for _ in 0..order - i - 1 {
                b = self.square(&b);
            }
            order = i;
            c = self.square(&b);
            t = self.mul(&t, &c);
            root = self.mul(&root, &b);
        }
        root
    }

    pub fn is_odd(&self, number: &BigUint) -> bool {
        self.reduce(number).is_odd()
    }
}
