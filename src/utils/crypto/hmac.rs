//! HMAC signature creation and verification

use crate::utils::error::{MetricsError, Result};
use hmac::{Hmac, Mac, digest::KeyInit as HmacKeyInit};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the hex encoded HMAC of the body
pub const HASH_HEADER: &str = "HashSHA256";

/// Create HMAC signature
pub fn create_hmac_signature(secret: &[u8], data: &[u8]) -> Result<String> {
    let mut mac = <HmacSha256 as HmacKeyInit>::new_from_slice(secret)
        .map_err(|e| MetricsError::Crypto(format!("Invalid HMAC key: {}", e)))?;

    mac.update(data);
    let result = mac.finalize();
    Ok(hex::encode(result.into_bytes()))
}

/// Verify HMAC signature
pub fn verify_hmac_signature(secret: &[u8], data: &[u8], signature: &str) -> Result<bool> {
    let expected_signature = create_hmac_signature(secret, data)?;
    Ok(constant_time_eq(
        &expected_signature,
        &signature.trim().to_ascii_lowercase(),
    ))
}

/// Constant-time string comparison
pub(crate) fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (a_byte, b_byte) in a.bytes().zip(b.bytes()) {
        result |= a_byte ^ b_byte;
    }

    result == 0
}

/// Pre-shared key holder used by both the agent and the server
#[derive(Clone)]
pub struct Signer {
    key: Vec<u8>,
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer").field("key", &"<redacted>").finish()
    }
}

impl Signer {
    /// Create a signer for a non-empty key
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        Self { key: key.into() }
    }

    /// Signer for a configured key, `None` when signing is disabled
    pub fn from_config(key: &str) -> Option<Self> {
        if key.is_empty() {
            None
        } else {
            Some(Self::new(key.as_bytes()))
        }
    }

    /// Hex encoded HMAC-SHA256 of `body`
    pub fn sign(&self, body: &[u8]) -> Result<String> {
        create_hmac_signature(&self.key, body)
    }

    /// Check `signature` against `body`, failing with `SignatureMismatch`
    pub fn verify(&self, body: &[u8], signature: &str) -> Result<()> {
        if verify_hmac_signature(&self.key, body, signature)? {
            Ok(())
        } else {
            Err(MetricsError::signature_mismatch(
                "HashSHA256 header does not match body",
            ))
        }
    }
}
