/// Advisory view of the license credential as of the last backend check.
/// The real gate is enforced by the verify operation; this only feeds the
/// quota display and the license-prompt affordance.
#[derive(Debug, Clone, Default)]
pub struct LicenseState {
    pub key: Option<String>,
    pub valid: bool,
    pub quota_remaining: Option<i64>,
}

impl LicenseState {
    pub fn with_key(key: Option<String>) -> Self {
        Self {
            key,
            valid: false,
            quota_remaining: None,
        }
    }

    pub fn confirm(&mut self, quota_remaining: i64) {
        self.valid = true;
        self.quota_remaining = Some(quota_remaining);
    }

    pub fn invalidate(&mut self) {
        self.valid = false;
        self.quota_remaining = None;
    }

    pub fn has_key(&self) -> bool {
        self.key.as_deref().map(|k| !k.is_empty()).unwrap_or(false)
    }
}
