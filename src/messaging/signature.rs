//! LINE webhook signature creation and verification
//!
//! The platform signs every delivery with
//! `base64(HMAC-SHA256(channel_secret, raw_body))` in `X-Line-Signature`.

use crate::utils::error::{RelayError, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac, digest::KeyInit as HmacKeyInit};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the delivery signature
pub const SIGNATURE_HEADER: &str = "X-Line-Signature";

fn mac(channel_secret: &str) -> Result<HmacSha256> {
    <HmacSha256 as HmacKeyInit>::new_from_slice(channel_secret.as_bytes())
        .map_err(|e| RelayError::internal(format!("Invalid HMAC key: {}", e)))
}

/// Create the signature the platform would send for `body`
pub fn create_signature(channel_secret: &str, body: &[u8]) -> Result<String> {
    let mut mac = mac(channel_secret)?;
    mac.update(body);
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Verify a delivery signature in constant time
pub fn verify_signature(channel_secret: &str, body: &[u8], signature: &str) -> Result<()> {
    let provided = STANDARD
        .decode(signature.trim())
        .map_err(|_| RelayError::signature("Signature is not valid base64"))?;

    let mut mac = mac(channel_secret)?;
    mac.update(body);
    mac.verify_slice(&provided)
        .map_err(|_| RelayError::signature("Signature mismatch"))
}
