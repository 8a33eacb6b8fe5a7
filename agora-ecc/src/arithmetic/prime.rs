use num_bigint::BigUint;
use num_traits::{One, Zero};

const WITNESSES: [u32; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Miller-Rabin test with the first twelve primes as witnesses.
///
/// Deterministic below 3.3 * 10^24, probabilistic above that.
pub fn is_probably_prime(candidate: &BigUint) -> bool {
    let one = BigUint::one();
    let two = BigUint::from(2u8);
    if candidate < &two {
        return false;
    }
    for witness in WITNESSES {
        let witness = BigUint::from(witness);
        if candidate == &witness {
            return true;
        }
        if (candidate % &witness).is_zero() {
            return false;
        }
    }

    let candidate_minus_one = candidate - &one;
    let two_adicity = candidate_minus_one.trailing_zeros().unwrap_or(0);
    let odd_part = &candidate_minus_one >> two_adicity;

    'witness: for witness in WITNESSES {
        let mut x = BigUint::from(witness).modpow(&odd_part, candidate);
        if x == one || x == candidate_minus_one {
            continue;
        }
        for _ in 1..two_adicity {
            x = x.modpow(&two, candidate);
            if x == candidate_minus_one {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::curve::{to_biguint, Curve, Curve25519, Secp256k1};

    #[test]
    fn small_numbers() {
        let primes: Vec<u32> = (0..200u32)
            .filter(|n| is_probably_prime(&BigUint::from(*n)))
            .collect();
        let expected = vec![
            2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83,
            89, 97, 101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179,
            181, 191, 193, 197, 199,
        ];
        assert_eq!(primes, expected);
    }

    #[test]
    fn strong_pseudoprimes() {
        // Carmichael numbers and strong pseudoprimes to small bases
        for composite in [561u64, 1105, 2047, 3215031751, 25326001] {
            assert!(!is_probably_prime(&BigUint::from(composite)));
        }
    }

    #[test]
    fn curve_parameters_are_prime() {
        assert!(is_probably_prime(&to_biguint(&Secp256k1::PRIME_MODULUS)));
        assert!(is_probably_prime(&to_biguint(&Secp256k1::ORDER)));
        assert!(is_probably_prime(&to_biguint(&Curve25519::PRIME_MODULUS)));
        assert!(is_probably_prime(&to_biguint(&Curve25519::ORDER)));
        assert!(!is_probably_prime(
            &(to_biguint(&Secp256k1::PRIME_MODULUS) + BigUint::from(2u8))
        ));
    }
}
