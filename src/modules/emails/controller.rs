//! Import/verification workflow over the email-record cache.
//!
//! Every operation runs to completion on the caller's task, converts any
//! backend failure into a user-visible message, and never panics the
//! process. Retry is always a fresh user action; nothing here retries on
//! its own.

use std::sync::Arc;

use super::interface::EmailGateway;
use super::merge::merge_verify_results;
use super::model::{EmailRecord, ImportSummary, VerifyMethod};
use super::schema::VerifyRequest;
use super::selection::SelectionSet;
use crate::modules::license::{LicenseState, LicenseStore};
use crate::Liveness;

pub const MSG_NO_DATASET: &str = "Please select a saved dataset to load";
pub const MSG_NO_SELECTION: &str = "Please select emails to verify";
pub const MSG_NO_LICENSE: &str = "Please activate a license key first";
pub const MSG_NO_API_KEY: &str = "Please enter your verification API key";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportPhase {
    Idle,
    Importing,
    Imported,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyPhase {
    Idle,
    Verifying,
    Verified,
}

pub struct WorkflowController {
    gateway: Arc<dyn EmailGateway>,
    license_store: Arc<dyn LicenseStore>,
    liveness: Liveness,

    records: Vec<EmailRecord>,
    imports: Vec<ImportSummary>,
    selection: SelectionSet,
    active_import: Option<u64>,

    import_phase: ImportPhase,
    verify_phase: VerifyPhase,
    license: LicenseState,
    license_prompt_open: bool,
    message: Option<String>,
}

impl WorkflowController {
    pub fn new(gateway: Arc<dyn EmailGateway>, license_store: Arc<dyn LicenseStore>) -> Self {
        let license = LicenseState::with_key(license_store.load());
        Self {
            gateway,
            license_store,
            liveness: Liveness::new(),
            records: Vec::new(),
            imports: Vec::new(),
            selection: SelectionSet::new(),
            active_import: None,
            import_phase: ImportPhase::Idle,
            verify_phase: VerifyPhase::Idle,
            license,
            license_prompt_open: false,
            message: None,
        }
    }

    // -------------------------------------------------------------------------
    // STATE ACCESSORS
    // -------------------------------------------------------------------------

    pub fn records(&self) -> &[EmailRecord] {
        &self.records
    }

    pub fn imports(&self) -> &[ImportSummary] {
        &self.imports
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn license(&self) -> &LicenseState {
        &self.license
    }

    pub fn license_prompt_open(&self) -> bool {
        self.license_prompt_open
    }

    pub fn import_phase(&self) -> ImportPhase {
        self.import_phase
    }

    pub fn verify_phase(&self) -> VerifyPhase {
        self.verify_phase
    }

    pub fn active_import(&self) -> Option<u64> {
        self.active_import
    }

    /// Handle for the owning surface to revoke at teardown.
    pub fn liveness(&self) -> Liveness {
        self.liveness.clone()
    }

    fn live(&self) -> bool {
        self.liveness.is_live()
    }

    // -------------------------------------------------------------------------
    // SELECTION
    // -------------------------------------------------------------------------

    pub fn toggle(&mut self, id: u64) {
        self.selection.toggle(id);
    }

    /// Select-all over the currently cached records.
    pub fn select_all(&mut self) {
        let visible: Vec<u64> = self.records.iter().map(|r| r.id).collect();
        self.selection.select_all(&visible);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // -------------------------------------------------------------------------
    // OPERATIONS
    // -------------------------------------------------------------------------

    /// Upload one dataset file. On success the import list is refreshed and
    /// the record cache reloads scoped to the new batch, strictly after the
    /// upload response is observed.
    pub async fn upload(&mut self, filename: &str, bytes: Vec<u8>) {
        let previous = self.import_phase;
        self.import_phase = ImportPhase::Importing;
        self.message = None;

        match self.gateway.upload_import(filename, bytes).await {
            Ok(response) => {
                if !self.live() {
                    return;
                }
                tracing::info!(
                    import_id = response.import_id,
                    imported = response.imported,
                    name = %response.import_name,
                    "import finished"
                );
                self.import_phase = ImportPhase::Imported;
                self.active_import = Some(response.import_id);
                self.message = Some(response.message);
                self.refresh_imports().await;
                self.reload_records(Some(response.import_id)).await;
            }
            Err(err) => {
                if !self.live() {
                    return;
                }
                tracing::warn!(error = %err, "import failed");
                self.import_phase = previous;
                self.fail(err);
            }
        }
    }

    /// Refresh the list of prior import batches. Read-only, safe to retry.
    pub async fn list_imports(&mut self) {
        self.message = None;
        self.refresh_imports().await;
    }

    /// Load one saved dataset, replacing the record cache wholesale.
    pub async fn load_import(&mut self, dataset: Option<u64>) {
        let Some(id) = dataset else {
            self.message = Some(MSG_NO_DATASET.to_string());
            return;
        };
        self.message = None;
        self.reload_records(Some(id)).await;
    }

    /// Load the full record list, unscoped.
    pub async fn load_all(&mut self) {
        self.message = None;
        self.reload_records(None).await;
    }

    /// Check a credential against the backend and persist it if the backend
    /// accepts it. Advisory: the verify gate does not depend on the outcome.
    pub async fn check_license(&mut self, key: &str) {
        match self.gateway.check_key(key).await {
            Ok(response) => {
                if !self.live() {
                    return;
                }
                tracing::info!(quota_remaining = response.quota_remaining, "license key accepted");
                self.license.key = Some(key.to_string());
                self.license.confirm(response.quota_remaining);
                self.license_store.save(key);
                self.license_prompt_open = false;
            }
            Err(err) => {
                if !self.live() {
                    return;
                }
                tracing::warn!(error = %err, "license check failed");
                self.license.invalidate();
                self.message = Some(err.to_string());
            }
        }
    }

    /// Dispatch a verification batch for the current selection.
    ///
    /// Preconditions fail locally, each with its own message and without a
    /// network call: a stored credential, an API key when the method is
    /// `api`, and a non-empty selection.
    pub async fn verify(&mut self, method: VerifyMethod, api_key: Option<&str>) {
        if !self.license.has_key() {
            self.message = Some(MSG_NO_LICENSE.to_string());
            self.license_prompt_open = true;
            return;
        }
        let api_key = api_key.map(str::trim).filter(|k| !k.is_empty());
        if method == VerifyMethod::Api && api_key.is_none() {
            self.message = Some(MSG_NO_API_KEY.to_string());
            return;
        }

        // Snapshot of the selection at dispatch time; ids selected across an
        // earlier search that no longer resolve to cached records drop out.
        let addresses: Vec<String> = self
            .selection
            .ids()
            .into_iter()
            .filter_map(|id| self.records.iter().find(|r| r.id == id))
            .map(|r| r.main.clone())
            .collect();
        if addresses.is_empty() {
            self.message = Some(MSG_NO_SELECTION.to_string());
            return;
        }

        let license_key = self.license.key.clone().unwrap_or_default();
        let request = VerifyRequest {
            mail: addresses,
            method: method.as_str(),
            key: api_key.map(str::to_string),
        };

        let previous = self.verify_phase;
        self.verify_phase = VerifyPhase::Verifying;
        self.message = None;

        match self.gateway.dispatch_verify(&request, &license_key).await {
            Ok(summary) => {
                if !self.live() {
                    return;
                }
                tracing::info!(total = summary.total, method = %summary.method, "verification finished");
                merge_verify_results(&mut self.records, &summary.results);
                self.selection.clear();
                self.verify_phase = VerifyPhase::Verified;
                self.message = Some(format!(
                    "Verified {} emails via {}",
                    summary.total, summary.method
                ));
                // Refresh the quota display now that the batch consumed some.
                self.check_license(&license_key).await;
            }
            Err(err) => {
                if !self.live() {
                    return;
                }
                tracing::warn!(error = %err, "verification failed");
                self.verify_phase = previous;
                self.fail(err);
            }
        }
    }

    // -------------------------------------------------------------------------
    // INTERNAL
    // -------------------------------------------------------------------------

    async fn refresh_imports(&mut self) {
        match self.gateway.fetch_imports().await {
            Ok(imports) => {
                if !self.live() {
                    return;
                }
                self.imports = imports;
            }
            Err(err) => {
                if !self.live() {
                    return;
                }
                tracing::warn!(error = %err, "failed to list imports");
                self.fail(err);
            }
        }
    }

    async fn reload_records(&mut self, import_id: Option<u64>) {
        match self.gateway.fetch_emails(import_id).await {
            Ok(records) => {
                if !self.live() {
                    return;
                }
                tracing::debug!(count = records.len(), ?import_id, "record cache replaced");
                self.records = records;
                self.active_import = import_id;
            }
            Err(err) => {
                if !self.live() {
                    return;
                }
                tracing::warn!(error = %err, "failed to load emails");
                self.fail(err);
            }
        }
    }

    fn fail(&mut self, err: crate::services::api::ApiError) {
        if err.is_credential_error() {
            self.license_prompt_open = true;
        }
        self.message = Some(err.to_string());
    }
}
