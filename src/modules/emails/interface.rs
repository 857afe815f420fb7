use async_trait::async_trait;

use super::model::{EmailRecord, ImportSummary};
use super::schema::{CheckKeyResponse, ImportResponse, VerifyRequest, VerifySummary};
use crate::services::api::{ApiClient, ApiError};

pub type Result<T> = std::result::Result<T, ApiError>;

/// Backend operations the workflow controller depends on. The production
/// implementation is [`ApiClient`]; tests substitute a scripted gateway to
/// observe exactly which calls are issued.
#[async_trait]
pub trait EmailGateway: Send + Sync {
    async fn fetch_emails(&self, import_id: Option<u64>) -> Result<Vec<EmailRecord>>;
    async fn fetch_imports(&self) -> Result<Vec<ImportSummary>>;
    async fn upload_import(&self, filename: &str, bytes: Vec<u8>) -> Result<ImportResponse>;
    async fn dispatch_verify(&self, request: &VerifyRequest, license_key: &str) -> Result<VerifySummary>;
    async fn check_key(&self, key_code: &str) -> Result<CheckKeyResponse>;
}

#[async_trait]
impl EmailGateway for ApiClient {
    async fn fetch_emails(&self, import_id: Option<u64>) -> Result<Vec<EmailRecord>> {
        self.get_emails(import_id).await
    }

    async fn fetch_imports(&self) -> Result<Vec<ImportSummary>> {
        self.get_imports().await
    }

    async fn upload_import(&self, filename: &str, bytes: Vec<u8>) -> Result<ImportResponse> {
        self.import_emails(filename, bytes).await
    }

    async fn dispatch_verify(&self, request: &VerifyRequest, license_key: &str) -> Result<VerifySummary> {
        self.verify_emails(request, license_key).await
    }

    async fn check_key(&self, key_code: &str) -> Result<CheckKeyResponse> {
        ApiClient::check_key(self, key_code).await
    }
}
