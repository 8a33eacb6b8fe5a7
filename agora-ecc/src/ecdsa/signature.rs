use crate::EccError;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    r: BigUint,
    s: BigUint,
}

impl Signature {
    pub fn new(r: BigUint, s: BigUint) -> Self {
        Self { r, s }
    }

    pub fn r(&self) -> &BigUint {
        &self.r
    }

    pub fn s(&self) -> &BigUint {
        &self.s
    }

    /// `r || s`, each big-endian and left-padded to `width` bytes.
    pub fn to_bytes(&self, width: usize) -> Result<Vec<u8>, EccError> {
        let mut bytes = Vec::with_capacity(2 * width);
        for component in [&self.r, &self.s] {
            let encoded = component.to_bytes_be();
            if encoded.len() > width {
                return Err(EccError::InvalidParameter(format!(
                    "signature component does not fit into {} bytes",
                    width
                )));
            }
            bytes.resize(bytes.len() + width - encoded.len(), 0);
            bytes.extend_from_slice(&encoded);
        }
        Ok(bytes)
    }

    /// Splits `bytes` into two equally long big-endian halves.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EccError> {
        if bytes.is_empty() || bytes.len() % 2 != 0 {
            return Err(EccError::InvalidParameter(format!(
                "signature of {} bytes does not split into two non-empty halves",
                bytes.len()
            )));
        }
        let (r, s) = bytes.split_at(bytes.len() / 2);
        Ok(Self::new(
            BigUint::from_bytes_be(r),
            BigUint::from_bytes_be(s),
        ))
    }
}
