//! REST gateway for the mailpool backend (`/api/v1`). Attaches the bearer
//! token from the session store to every request and handles the global
//! sign-out rule: any 401 wipes the stored token before surfacing.

use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::modules::emails::model::{EmailRecord, ImportSummary};
use crate::modules::emails::schema::{
    CheckKeyRequest, CheckKeyResponse, ErrorBody, ImportResponse, VerifyRequest, VerifySummary,
};
use crate::services::session::SessionStore;

/// Structured classification of a backend failure. Newer backends send it as
/// a `code` field; for older ones we fall back to matching the message text
/// against a fixed vocabulary, which keeps the historical branching intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    CredentialInvalid,
    QuotaExhausted,
    Other,
}

const CREDENTIAL_MARKERS: &[&str] = &["License Key", "license key", "Key is required"];
const QUOTA_MARKERS: &[&str] = &["quota", "Quota"];

impl ErrorKind {
    pub fn classify(code: Option<&str>, message: &str) -> Self {
        match code {
            Some("credential_invalid") => return ErrorKind::CredentialInvalid,
            Some("quota_exhausted") => return ErrorKind::QuotaExhausted,
            _ => {}
        }
        if QUOTA_MARKERS.iter().any(|m| message.contains(m)) {
            ErrorKind::QuotaExhausted
        } else if CREDENTIAL_MARKERS.iter().any(|m| message.contains(m)) {
            ErrorKind::CredentialInvalid
        } else {
            ErrorKind::Other
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("Session expired. Please sign in again")]
    Unauthorized,

    #[error("{message}")]
    Backend {
        status: u16,
        message: String,
        kind: ErrorKind,
    },
}

impl ApiError {
    /// Whether this failure should open the license-input affordance.
    pub fn is_credential_error(&self) -> bool {
        matches!(
            self,
            ApiError::Backend {
                kind: ErrorKind::CredentialInvalid | ErrorKind::QuotaExhausted,
                ..
            }
        )
    }
}

pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: Arc<dyn SessionStore>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.client.request(method, url);
        if let Some(token) = self.session.token() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn handle<T: DeserializeOwned>(&self, response: Response) -> Result<T, ApiError> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            // Global sign-out: the token is gone before the caller hears
            // about the failure.
            self.session.clear();
            tracing::warn!("backend returned 401, session cleared");
            return Err(ApiError::Unauthorized);
        }

        if !status.is_success() {
            let body: ErrorBody = response.json().await.unwrap_or_default();
            let message = body
                .error
                .or(body.message)
                .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
            let kind = ErrorKind::classify(body.code.as_deref(), &message);
            return Err(ApiError::Backend {
                status: status.as_u16(),
                message,
                kind,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))
    }

    /// GET /emails, optionally filtered to one import batch.
    pub async fn get_emails(&self, import_id: Option<u64>) -> Result<Vec<EmailRecord>, ApiError> {
        let mut builder = self.request(Method::GET, "/emails");
        if let Some(id) = import_id {
            builder = builder.query(&[("import_id", id)]);
        }
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        self.handle(response).await
    }

    /// GET /emails/imports.
    pub async fn get_imports(&self) -> Result<Vec<ImportSummary>, ApiError> {
        let response = self
            .request(Method::GET, "/emails/imports")
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        self.handle(response).await
    }

    /// POST /emails/import as a single multipart upload.
    pub async fn import_emails(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<ImportResponse, ApiError> {
        let part = Part::bytes(bytes).file_name(filename.to_string());
        let form = Form::new().part("file", part);
        let response = self
            .request(Method::POST, "/emails/import")
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        self.handle(response).await
    }

    /// POST /emails/verify with the license key in `X-License-Key`.
    pub async fn verify_emails(
        &self,
        request: &VerifyRequest,
        license_key: &str,
    ) -> Result<VerifySummary, ApiError> {
        let response = self
            .request(Method::POST, "/emails/verify")
            .header("X-License-Key", license_key)
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        self.handle(response).await
    }

    /// POST /keys/check.
    pub async fn check_key(&self, key_code: &str) -> Result<CheckKeyResponse, ApiError> {
        let response = self
            .request(Method::POST, "/keys/check")
            .json(&CheckKeyRequest {
                key_code: key_code.to_string(),
            })
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        self.handle(response).await
    }
}
