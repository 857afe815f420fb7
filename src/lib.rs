pub mod config;
pub mod modules;
pub mod services;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use config::environment::Config;
use modules::codes::board::CodeBoard;
use modules::emails::controller::WorkflowController;
use modules::license::FileLicenseStore;
use services::api::ApiClient;
use services::session::FileSessionStore;

/// Teardown guard shared by the workflow controller and the code ticker.
/// The owning surface revokes it when it goes away; any response or tick
/// that lands afterwards is dropped instead of mutating state.
#[derive(Clone)]
pub struct Liveness {
    alive: Arc<AtomicBool>,
}

impl Liveness {
    pub fn new() -> Self {
        Self {
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn revoke(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }

    pub fn is_live(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

/// Wired-up client core: gateway, workflow controller, and code board.
pub struct App {
    pub controller: WorkflowController,
    pub codes: Arc<Mutex<CodeBoard>>,
}

/// Build the client core from configuration, with file-backed session and
/// license storage.
pub fn create_app(config: &Config) -> App {
    let session = Arc::new(FileSessionStore::new(&config.session_token_file));
    let license = Arc::new(FileLicenseStore::new(&config.license_key_file));
    let gateway = Arc::new(ApiClient::new(config.api_base_url.clone(), session));

    App {
        controller: WorkflowController::new(gateway, license),
        codes: Arc::new(Mutex::new(CodeBoard::new())),
    }
}
