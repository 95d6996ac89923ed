//! Group algebra over secp256k1
//!
//! All public values in sigma statements are points on the curve,
//! carried as 33-byte compressed SEC1 encodings. Secret exponents are
//! 32-byte big-endian scalars, nonzero and below the group order.

use std::fmt;

use k256::elliptic_curve::sec1::ToEncodedPoint;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{ProverError, Result};

/// Size of a compressed SEC1 point encoding
pub const GROUP_ELEMENT_SIZE: usize = 33;

/// Size of a big-endian scalar encoding
pub const SECRET_EXPONENT_SIZE: usize = 32;

/// A point on the secp256k1 curve (compressed, 33 bytes)
///
/// Construction validates the encoding against the curve equation; the
/// identity has no 33-byte compressed encoding and is rejected with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupElement([u8; GROUP_ELEMENT_SIZE]);

impl GroupElement {
    /// Parse and validate a compressed SEC1 encoding
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != GROUP_ELEMENT_SIZE {
            return Err(ProverError::InvalidGroupElement(format!(
                "expected {} bytes, got {}",
                GROUP_ELEMENT_SIZE,
                bytes.len()
            )));
        }
        k256::PublicKey::from_sec1_bytes(bytes)
            .map_err(|e| ProverError::InvalidGroupElement(format!("not a curve point: {}", e)))?;
        let mut buf = [0u8; GROUP_ELEMENT_SIZE];
        buf.copy_from_slice(bytes);
        Ok(Self(buf))
    }

    /// Parse from a hex string
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s)
            .map_err(|e| ProverError::InvalidGroupElement(format!("invalid hex: {}", e)))?;
        Self::from_bytes(&bytes)
    }

    /// The fixed generator of the group
    pub fn generator() -> Self {
        let encoded = k256::AffinePoint::GENERATOR.to_encoded_point(true);
        let mut buf = [0u8; GROUP_ELEMENT_SIZE];
        buf.copy_from_slice(encoded.as_bytes());
        Self(buf)
    }

    /// Get the compressed bytes
    pub fn as_bytes(&self) -> &[u8; GROUP_ELEMENT_SIZE] {
        &self.0
    }

    /// Convert to hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Raise this element to a secret exponent
    ///
    /// A nonzero exponent applied to a non-identity point cannot land on
    /// the identity, so the result always has a compressed encoding.
    pub fn exp(&self, exponent: &SecretExponent) -> Result<GroupElement> {
        let point = self.to_public_key()?;
        let scalar = exponent.to_nonzero_scalar()?;
        let product = point.to_projective() * *scalar;
        let encoded = product.to_affine().to_encoded_point(true);
        let bytes: [u8; GROUP_ELEMENT_SIZE] = encoded
            .as_bytes()
            .try_into()
            .map_err(|_| ProverError::InvalidGroupElement("exponentiation produced the identity".to_string()))?;
        Ok(GroupElement(bytes))
    }

    /// Convert to a k256 public key
    pub fn to_public_key(&self) -> Result<k256::PublicKey> {
        k256::PublicKey::from_sec1_bytes(&self.0)
            .map_err(|e| ProverError::InvalidGroupElement(format!("not a curve point: {}", e)))
    }
}

impl AsRef<[u8]> for GroupElement {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for GroupElement {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(self.0))
    }
}

impl<'de> Deserialize<'de> for GroupElement {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        GroupElement::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// A secret exponent: nonzero scalar below the secp256k1 group order
///
/// Held as big-endian bytes and wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretExponent([u8; SECRET_EXPONENT_SIZE]);

impl SecretExponent {
    /// Validate and wrap a big-endian scalar encoding
    pub fn from_bytes(bytes: [u8; SECRET_EXPONENT_SIZE]) -> Result<Self> {
        k256::SecretKey::from_slice(&bytes).map_err(|_| {
            ProverError::InvalidSecret(
                "exponent must be nonzero and below the group order".to_string(),
            )
        })?;
        Ok(Self(bytes))
    }

    /// Parse from a hex string
    pub fn from_hex(s: &str) -> Result<Self> {
        let mut decoded =
            hex::decode(s).map_err(|e| ProverError::InvalidSecret(format!("invalid hex: {}", e)))?;
        if decoded.len() != SECRET_EXPONENT_SIZE {
            let len = decoded.len();
            decoded.zeroize();
            return Err(ProverError::InvalidSecret(format!(
                "expected {} bytes, got {}",
                SECRET_EXPONENT_SIZE, len
            )));
        }
        let mut bytes = [0u8; SECRET_EXPONENT_SIZE];
        bytes.copy_from_slice(&decoded);
        decoded.zeroize();
        let exponent = Self::from_bytes(bytes);
        bytes.zeroize();
        exponent
    }

    /// Get the big-endian bytes
    pub fn as_bytes(&self) -> &[u8; SECRET_EXPONENT_SIZE] {
        &self.0
    }

    /// Convert to a k256 scalar for proof arithmetic
    pub fn to_nonzero_scalar(&self) -> Result<k256::NonZeroScalar> {
        let key = k256::SecretKey::from_slice(&self.0).map_err(|_| {
            ProverError::InvalidSecret(
                "exponent must be nonzero and below the group order".to_string(),
            )
        })?;
        Ok(key.to_nonzero_scalar())
    }
}

impl fmt::Debug for SecretExponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretExponent(<wiped on drop>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn exponent(fill: u8) -> SecretExponent {
        let mut bytes = [0u8; 32];
        bytes[31] = fill;
        SecretExponent::from_bytes(bytes).unwrap()
    }

    #[test]
    fn test_generator_round_trip() {
        let g = GroupElement::generator();
        let parsed = GroupElement::from_bytes(g.as_bytes()).unwrap();
        assert_eq!(g, parsed);
        assert_eq!(GroupElement::from_hex(&g.to_hex()).unwrap(), g);
    }

    #[test]
    fn test_invalid_encodings_rejected() {
        assert!(GroupElement::from_bytes(&[0u8; 33]).is_err());
        assert!(GroupElement::from_bytes(&[2u8; 12]).is_err());
        assert!(GroupElement::from_hex("zz").is_err());
        // valid prefix, x-coordinate not on the curve
        let mut bytes = [0xffu8; 33];
        bytes[0] = 0x02;
        assert!(GroupElement::from_bytes(&bytes).is_err());
    }

    #[test]
    fn test_zero_exponent_rejected() {
        let result = SecretExponent::from_bytes([0u8; 32]);
        assert!(matches!(result, Err(ProverError::InvalidSecret(_))));
    }

    #[test]
    fn test_order_overflow_rejected() {
        // 2^256 - 1 is far above the group order
        let result = SecretExponent::from_bytes([0xff; 32]);
        assert!(matches!(result, Err(ProverError::InvalidSecret(_))));
    }

    #[test]
    fn test_exp_matches_double_exponent() {
        // (g^2)^3 == g^6
        let g = GroupElement::generator();
        let two = exponent(2);
        let three = exponent(3);
        let six = exponent(6);
        assert_eq!(g.exp(&two).unwrap().exp(&three).unwrap(), g.exp(&six).unwrap());
    }

    #[test]
    fn test_serde_round_trip() {
        let h = GroupElement::generator().exp(&exponent(7)).unwrap();
        let json = serde_json::to_string(&h).unwrap();
        let back: GroupElement = serde_json::from_str(&json).unwrap();
        assert_eq!(h, back);
    }

    #[test]
    fn test_serde_rejects_invalid_point() {
        let json = format!("\"{}\"", hex::encode([0u8; 33]));
        assert!(serde_json::from_str::<GroupElement>(&json).is_err());
    }

    proptest! {
        #[test]
        fn prop_small_exponents_are_valid(n in 1u128..) {
            let mut bytes = [0u8; 32];
            bytes[16..].copy_from_slice(&n.to_be_bytes());
            let x = SecretExponent::from_bytes(bytes).unwrap();
            // g^x is always a well-formed element
            let image = GroupElement::generator().exp(&x).unwrap();
            prop_assert_eq!(image.as_bytes().len(), GROUP_ELEMENT_SIZE);
        }
    }
}
