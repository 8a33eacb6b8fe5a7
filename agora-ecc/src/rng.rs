//! Uniform sampling of big integers from a cryptographically secure source.
use crate::EccError;

use num_bigint::BigUint;
use num_traits::Zero;
use rand_core::{CryptoRng, RngCore};

/// Draws a uniformly distributed integer in `[0, bound)`.
///
/// Uses rejection sampling over the smallest bit mask covering `bound`, so the
/// expected number of draws is below two. A failing source is reported as
/// [`EccError::RandomnessUnavailable`] instead of falling back to anything
/// predictable.
pub fn random_below<R: RngCore + CryptoRng>(
    rng: &mut R,
    bound: &BigUint,
) -> Result<BigUint, EccError> {
    if bound.is_zero() {
        return Err(EccError::InvalidParameter(
            "upper bound of a random draw must be positive".to_string(),
        ));
    }
    let bits = bound.bits();
    let byte_len = ((bits + 7) / 8) as usize;
    let excess_bits = (byte_len as u64 * 8 - bits) as u32;
    let mut buffer = vec![0u8; byte_len];
    loop {
        rng.try_fill_bytes(&mut buffer)
            .map_err(|_| EccError::RandomnessUnavailable)?;
        buffer[0] &= 0xff >> excess_bits;
        let candidate = BigUint::from_bytes_be(&buffer);
        if &candidate < bound {
            return Ok(candidate);
        }
    }
}

/// Draws a uniformly distributed integer in `[1, bound)`.
pub fn random_nonzero_below<R: RngCore + CryptoRng>(
    rng: &mut R,
    bound: &BigUint,
) -> Result<BigUint, EccError> {
    loop {
        let candidate = random_below(rng, bound)?;
        if !candidate.is_zero() {
            return Ok(candidate);
        }
    }
}
