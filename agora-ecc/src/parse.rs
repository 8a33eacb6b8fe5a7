//! Hex and JSON inputs: custom curve parameters, scalars, public keys and
//! signatures.
use crate::arithmetic::Point;
use crate::ecdsa::Signature;
use crate::weierstrass::WeierstrassCurve;
use crate::EccError;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// Short Weierstrass curve parameters as `0x`-prefixed or bare hex strings.
///
/// The base point is optional, but `gx`, `gy` and `n` must be given
/// together.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeierstrassConfig {
    pub a: String,
    pub b: String,
    pub p: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gx: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<String>,
}

impl TryFrom<WeierstrassConfig> for WeierstrassCurve {
    type Error = EccError;
    fn try_from(config: WeierstrassConfig) -> Result<Self, Self::Error> {
        let curve = WeierstrassCurve::new(
            parse_hex_scalar(&config.a)?,
            parse_hex_scalar(&config.b)?,
            parse_hex_scalar(&config.p)?,
        )?;
        match (config.gx, config.gy, config.n) {
            (None, None, None) => Ok(curve),
            (Some(gx), Some(gy), Some(n)) => {
                let generator = Point::new(parse_hex_scalar(&gx)?, parse_hex_scalar(&gy)?);
                curve.with_base_point(generator, parse_hex_scalar(&n)?)
            }
            _ => Err(EccError::InvalidParameter(
                "gx, gy and n must be given together".to_string(),
            )),
        }
    }
}

pub fn parse_hex_scalar(hex_str: &str) -> Result<BigUint, EccError> {
    let trimmed = hex_str.trim().trim_start_matches("0x");
    // NOTE `parse_bytes` accepts underscores, plain hex digits only here
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(EccError::InvalidParameter(format!(
            "invalid hex number: {}",
            hex_str
        )));
    }
    BigUint::parse_bytes(trimmed.as_bytes(), 16)
        .ok_or_else(|| EccError::InvalidParameter(format!("invalid hex number: {}", hex_str)))
}

fn parse_hex_bytes(hex_str: &str) -> Result<Vec<u8>, EccError> {
    hex::decode(hex_str.trim().trim_start_matches("0x"))
        .map_err(|e| EccError::InvalidParameter(e.to_string()))
}

/// SEC1 encoded public key, compressed or uncompressed.
pub fn parse_pubkey(curve: &WeierstrassCurve, pubkey: &str) -> Result<Point, EccError> {
    curve.decode(&parse_hex_bytes(pubkey)?)
}

/// `r || s` with equally long halves. A trailing recovery byte, as produced
/// by Ethereum wallets, is dropped.
pub fn parse_signature(signature: &str) -> Result<Signature, EccError> {
    let mut bytes = parse_hex_bytes(signature)?;
    if bytes.len() % 2 == 1 {
        bytes.pop();
    }
    Signature::from_bytes(&bytes)
}
