use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use mailpool::modules::emails::interface::EmailGateway;
use mailpool::modules::emails::model::{EmailRecord, ImportSummary, VerifyStatus};
use mailpool::modules::emails::schema::{
    CheckKeyResponse, ImportResponse, KeyInfo, VerifyRequest, VerifyResult, VerifySummary,
};
use mailpool::services::api::{ApiError, ErrorKind};

// Allow dead_code for utilities used by other test files
#[allow(dead_code)]
pub fn record(id: u64, main: &str) -> EmailRecord {
    EmailRecord {
        id,
        main: main.to_string(),
        password: "pw".to_string(),
        deputy: String::new(),
        key_2fa: String::new(),
        status: VerifyStatus::Unknown,
        meta: Default::default(),
        familys: Vec::new(),
    }
}

#[allow(dead_code)]
pub fn verify_result(email: &str, status: VerifyStatus) -> VerifyResult {
    VerifyResult {
        email: email.to_string(),
        status,
        error: None,
    }
}

#[allow(dead_code)]
pub fn backend_error(status: u16, message: &str) -> ApiError {
    ApiError::Backend {
        status,
        message: message.to_string(),
        kind: ErrorKind::classify(None, message),
    }
}

#[allow(dead_code)]
pub fn check_key_ok(quota_remaining: i64) -> CheckKeyResponse {
    CheckKeyResponse {
        key: KeyInfo::default(),
        quota_remaining,
    }
}

/// Record of one dispatched verification call.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct SeenVerify {
    pub mail: Vec<String>,
    pub method: String,
    pub api_key: Option<String>,
    pub license_key: String,
}

/// Scripted gateway: every endpoint pops its next canned response, and every
/// call lands in an ordered log so tests can assert exactly what went over
/// the wire (or that nothing did).
#[derive(Default)]
pub struct MockGateway {
    pub calls: Mutex<Vec<String>>,
    pub emails_responses: Mutex<VecDeque<Result<Vec<EmailRecord>, ApiError>>>,
    pub imports_responses: Mutex<VecDeque<Result<Vec<ImportSummary>, ApiError>>>,
    pub upload_responses: Mutex<VecDeque<Result<ImportResponse, ApiError>>>,
    pub verify_responses: Mutex<VecDeque<Result<VerifySummary, ApiError>>>,
    pub check_key_responses: Mutex<VecDeque<Result<CheckKeyResponse, ApiError>>>,
    pub verify_seen: Mutex<Vec<SeenVerify>>,
}

#[allow(dead_code)]
impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_emails(&self, response: Result<Vec<EmailRecord>, ApiError>) {
        self.emails_responses.lock().unwrap().push_back(response);
    }

    pub fn push_imports(&self, response: Result<Vec<ImportSummary>, ApiError>) {
        self.imports_responses.lock().unwrap().push_back(response);
    }

    pub fn push_upload(&self, response: Result<ImportResponse, ApiError>) {
        self.upload_responses.lock().unwrap().push_back(response);
    }

    pub fn push_verify(&self, response: Result<VerifySummary, ApiError>) {
        self.verify_responses.lock().unwrap().push_back(response);
    }

    pub fn push_check_key(&self, response: Result<CheckKeyResponse, ApiError>) {
        self.check_key_responses.lock().unwrap().push_back(response);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn seen_verifies(&self) -> Vec<SeenVerify> {
        self.verify_seen.lock().unwrap().clone()
    }

    fn log(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn unscripted(endpoint: &str) -> ApiError {
        ApiError::Transport(format!("unscripted call to {}", endpoint))
    }
}

#[async_trait]
impl EmailGateway for MockGateway {
    async fn fetch_emails(&self, import_id: Option<u64>) -> Result<Vec<EmailRecord>, ApiError> {
        match import_id {
            Some(id) => self.log(format!("emails?import_id={}", id)),
            None => self.log("emails".to_string()),
        }
        self.emails_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Self::unscripted("emails")))
    }

    async fn fetch_imports(&self) -> Result<Vec<ImportSummary>, ApiError> {
        self.log("imports".to_string());
        self.imports_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Self::unscripted("imports")))
    }

    async fn upload_import(&self, filename: &str, _bytes: Vec<u8>) -> Result<ImportResponse, ApiError> {
        self.log(format!("upload:{}", filename));
        self.upload_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Self::unscripted("upload")))
    }

    async fn dispatch_verify(
        &self,
        request: &VerifyRequest,
        license_key: &str,
    ) -> Result<VerifySummary, ApiError> {
        self.log("verify".to_string());
        self.verify_seen.lock().unwrap().push(SeenVerify {
            mail: request.mail.clone(),
            method: request.method.to_string(),
            api_key: request.key.clone(),
            license_key: license_key.to_string(),
        });
        self.verify_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Self::unscripted("verify")))
    }

    async fn check_key(&self, _key_code: &str) -> Result<CheckKeyResponse, ApiError> {
        self.log("check_key".to_string());
        self.check_key_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Self::unscripted("check_key")))
    }
}
