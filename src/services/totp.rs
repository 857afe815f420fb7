//! Time-based one-time passwords (RFC 6238) for the 2FA keys stored on
//! email records. Fixed profile: HMAC-SHA1, 6 digits, 30 second period.

use data_encoding::{BASE32, BASE32_NOPAD};
use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Code length in decimal digits.
pub const DIGITS: u32 = 6;

/// Time step in seconds. One code stays valid for this long.
pub const PERIOD: i64 = 30;

/// Sentinel shown in place of a code when the secret is unusable.
/// The display path must never fail, so bad input degrades to this.
pub const CODE_UNAVAILABLE: &str = "ERROR!";

#[derive(Debug, thiserror::Error)]
pub enum TotpError {
    #[error("2FA secret cannot be empty")]
    EmptySecret,

    #[error("2FA secret must be valid base32")]
    InvalidBase32,
}

/// Uppercase the secret and strip whitespace and dashes. Secrets are pasted
/// by users out of provisioning screens, so both show up in practice.
pub fn normalize_secret(secret: &str) -> Result<String, TotpError> {
    let normalized: String = secret
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect::<String>()
        .to_ascii_uppercase();

    if normalized.is_empty() {
        return Err(TotpError::EmptySecret);
    }

    Ok(normalized)
}

fn decode_secret(secret: &str) -> Result<Vec<u8>, TotpError> {
    let normalized = normalize_secret(secret)?;

    let decoded = BASE32_NOPAD
        .decode(normalized.as_bytes())
        .or_else(|_| BASE32.decode(normalized.as_bytes()))
        .map_err(|_| TotpError::InvalidBase32)?;

    if decoded.is_empty() {
        return Err(TotpError::EmptySecret);
    }

    Ok(decoded)
}

/// Generate the code for the window containing `timestamp` (epoch seconds).
/// Pure function of `(secret, timestamp / 30)`.
pub fn generate_code(secret: &str, timestamp: i64) -> Result<String, TotpError> {
    let key = decode_secret(secret)?;
    let counter = (timestamp.max(0) as u64) / PERIOD as u64;

    let mut mac = HmacSha1::new_from_slice(&key).map_err(|_| TotpError::InvalidBase32)?;
    mac.update(&counter.to_be_bytes());
    let digest = mac.finalize().into_bytes();

    // RFC 4226 dynamic truncation.
    let offset = (digest[digest.len() - 1] & 0x0f) as usize;
    let binary = ((digest[offset] as u32 & 0x7f) << 24)
        | ((digest[offset + 1] as u32) << 16)
        | ((digest[offset + 2] as u32) << 8)
        | (digest[offset + 3] as u32);

    let code = binary % 10u32.pow(DIGITS);
    Ok(format!("{:0width$}", code, width = DIGITS as usize))
}

/// Fail-soft variant for display surfaces: an unusable secret yields the
/// [`CODE_UNAVAILABLE`] sentinel instead of an error.
pub fn display_code(secret: &str, timestamp: i64) -> String {
    match generate_code(secret, timestamp) {
        Ok(code) => code,
        Err(err) => {
            tracing::debug!(error = %err, "cannot derive 2FA code");
            CODE_UNAVAILABLE.to_string()
        }
    }
}

/// Seconds left until the current window rolls over. Always in `1..=30`,
/// resetting to 30 exactly at each window boundary.
pub fn seconds_remaining(timestamp: i64) -> u32 {
    (PERIOD - timestamp.rem_euclid(PERIOD)) as u32
}

/// The window counter for `timestamp`. Two timestamps map to the same code
/// exactly when their counters match.
pub fn window(timestamp: i64) -> u64 {
    (timestamp.max(0) as u64) / PERIOD as u64
}
