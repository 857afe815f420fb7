//! Persistent slot for the license credential. The key used to live in an
//! ambient browser-storage global; here it is explicit state with a load/save
//! interface, injected into the workflow controller.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

pub trait LicenseStore: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, key: &str);
}

/// Key persisted to a plain file so it survives sessions.
pub struct FileLicenseStore {
    path: PathBuf,
}

impl FileLicenseStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LicenseStore for FileLicenseStore {
    fn load(&self) -> Option<String> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    fn save(&self, key: &str) {
        if let Err(err) = fs::write(&self.path, key) {
            tracing::warn!(path = %self.path.display(), error = %err, "failed to persist license key");
        }
    }
}

/// In-memory slot for tests.
#[derive(Default)]
pub struct MemoryLicenseStore {
    key: Mutex<Option<String>>,
}

impl MemoryLicenseStore {
    pub fn new(key: Option<String>) -> Self {
        Self {
            key: Mutex::new(key),
        }
    }
}

impl LicenseStore for MemoryLicenseStore {
    fn load(&self) -> Option<String> {
        self.key.lock().unwrap().clone()
    }

    fn save(&self, key: &str) {
        *self.key.lock().unwrap() = Some(key.to_string());
    }
}
