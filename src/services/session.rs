//! Bearer-token session storage. The gateway reads the token before every
//! request and wipes it when the backend answers 401, which is how global
//! sign-out propagates.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

pub trait SessionStore: Send + Sync {
    fn token(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// Token persisted as a plain file, surviving restarts.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionStore for FileSessionStore {
    fn token(&self) -> Option<String> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    fn save(&self, token: &str) {
        if let Err(err) = fs::write(&self.path, token) {
            tracing::warn!(path = %self.path.display(), error = %err, "failed to persist session token");
        }
    }

    fn clear(&self) {
        if let Err(err) = fs::remove_file(&self.path) {
            if err.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %self.path.display(), error = %err, "failed to remove session token");
            }
        }
    }
}

/// In-memory store for tests and one-shot console runs.
#[derive(Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: Mutex::new(token),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn token(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    fn save(&self, token: &str) {
        *self.token.lock().unwrap() = Some(token.to_string());
    }

    fn clear(&self) {
        *self.token.lock().unwrap() = None;
    }
}
