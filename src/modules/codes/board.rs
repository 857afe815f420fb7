//! Displayed 2FA codes and their refresh cycle.
//!
//! A code appears only after an explicit show request. Once shown it follows
//! the global 30 second window: a 1 second tick drives the countdown, and
//! when the window counter rolls over every shown code is recomputed in one
//! pass, with no further user action.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::services::totp;
use crate::Liveness;

#[derive(Debug, Clone)]
pub struct CodeEntry {
    pub id: u64,
    secret: String,
    pub code: String,
}

#[derive(Debug, Default)]
pub struct CodeBoard {
    entries: Vec<CodeEntry>,
    window: Option<u64>,
    seconds_remaining: u32,
}

impl CodeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the code for one record's secret. Re-showing replaces the entry.
    /// A bad secret shows the sentinel rather than failing.
    pub fn show(&mut self, id: u64, secret: &str, now: i64) {
        // A show can observe a window boundary before the 1 second ticker
        // does; every code already on the board has to cross it too.
        self.tick(now);
        let code = totp::display_code(secret, now);
        self.hide(id);
        self.entries.push(CodeEntry {
            id,
            secret: secret.to_string(),
            code,
        });
    }

    pub fn hide(&mut self, id: u64) {
        self.entries.retain(|e| e.id != id);
    }

    pub fn is_shown(&self, id: u64) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn code_for(&self, id: u64) -> Option<&str> {
        self.entries.iter().find(|e| e.id == id).map(|e| e.code.as_str())
    }

    pub fn entries(&self) -> &[CodeEntry] {
        &self.entries
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    /// Advance the clock. Refreshes the countdown every call and recomputes
    /// all shown codes exactly when the 30 second window counter changes.
    pub fn tick(&mut self, now: i64) {
        self.seconds_remaining = totp::seconds_remaining(now);

        let window = totp::window(now);
        if self.window == Some(window) {
            return;
        }
        self.window = Some(window);
        for entry in &mut self.entries {
            entry.code = totp::display_code(&entry.secret, now);
        }
    }
}

/// Drive a board with a 1 second tick until the liveness guard is revoked.
pub async fn run_ticker(board: Arc<Mutex<CodeBoard>>, liveness: Liveness) {
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    loop {
        interval.tick().await;
        if !liveness.is_live() {
            break;
        }
        let now = chrono::Utc::now().timestamp();
        board.lock().unwrap().tick(now);
    }
}
