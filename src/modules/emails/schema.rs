use serde::{Deserialize, Serialize};

use super::model::VerifyStatus;

// =============================================================================
// IMPORT
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ImportResponse {
    pub message: String,
    pub imported: u64,
    pub import_id: u64,
    pub import_name: String,
}

// =============================================================================
// VERIFY
// =============================================================================

#[derive(Debug, Serialize)]
pub struct VerifyRequest {
    /// Addresses to verify. The backend calls this field `mail`.
    pub mail: Vec<String>,
    pub method: &'static str,
    /// Third-party API key; only sent for the `api` method.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyResult {
    pub email: String,
    pub status: VerifyStatus,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VerifySummary {
    pub results: Vec<VerifyResult>,
    pub total: u64,
    pub method: String,
}

// =============================================================================
// LICENSE KEY CHECK
// =============================================================================

#[derive(Debug, Serialize)]
pub struct CheckKeyRequest {
    pub key_code: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct KeyInfo {
    #[serde(default)]
    pub key_code: String,
    #[serde(default)]
    pub product_type: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub quota_total: i64,
    #[serde(default)]
    pub quota_used: i64,
}

#[derive(Debug, Deserialize)]
pub struct CheckKeyResponse {
    #[serde(default)]
    pub key: KeyInfo,
    pub quota_remaining: i64,
}

// =============================================================================
// ERROR BODY
// =============================================================================

/// Conventional error body shape shared by every backend endpoint. `code` is
/// the structured error kind newer backends emit alongside the message.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}
