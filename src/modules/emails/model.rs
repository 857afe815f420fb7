use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Verification outcome for one email account. The backend owns the value;
/// the client only copies whatever the last verification batch reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerifyStatus {
    Unknown,
    Live,
    Verify,
    Dead,
    /// Per-address failure during verification, e.g. a provider timeout.
    Error,
}

impl Default for VerifyStatus {
    fn default() -> Self {
        VerifyStatus::Unknown
    }
}

impl std::fmt::Display for VerifyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            VerifyStatus::Unknown => "unknown",
            VerifyStatus::Live => "live",
            VerifyStatus::Verify => "verify",
            VerifyStatus::Dead => "dead",
            VerifyStatus::Error => "error",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmailMeta {
    #[serde(default)]
    pub banned: bool,
    #[serde(default)]
    pub sold: bool,
    #[serde(default)]
    pub need_repair: bool,
    #[serde(default)]
    pub price: i64,
    /// Where the account came from; the backend exposes this as `from`.
    #[serde(rename = "from", default)]
    pub source: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Family-slot credentials attached to a main account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilySlot {
    pub id: u64,
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub issue: String,
}

/// One email account as held in the client-side cache. Backend-owned; the
/// only field the client ever mutates locally is `status`, via the
/// merge-after-verify step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailRecord {
    pub id: u64,
    pub main: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub deputy: String,
    #[serde(rename = "key_2FA", default)]
    pub key_2fa: String,
    #[serde(default)]
    pub status: VerifyStatus,
    #[serde(default)]
    pub meta: EmailMeta,
    #[serde(default)]
    pub familys: Vec<FamilySlot>,
}

/// Summary of one prior bulk-import batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportSummary {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub count: u64,
}

/// How a verification batch is carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyMethod {
    Smtp,
    Api,
}

impl VerifyMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerifyMethod::Smtp => "smtp",
            VerifyMethod::Api => "api",
        }
    }
}

impl std::str::FromStr for VerifyMethod {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "smtp" => Ok(VerifyMethod::Smtp),
            "api" => Ok(VerifyMethod::Api),
            other => Err(format!("Invalid method '{}'. Use 'smtp' or 'api'", other)),
        }
    }
}
