use std::env;
use std::path::PathBuf;

/// Environment configuration
/// Loads and validates environment variables
pub struct Config {
    pub api_base_url: String,
    pub session_token_file: PathBuf,
    pub license_key_file: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        let api_base_url = env::var("API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000/api/v1".to_string());

        let state_dir = match env::var("MAILPOOL_STATE_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => default_state_dir()?,
        };
        std::fs::create_dir_all(&state_dir)
            .map_err(|e| format!("Cannot create state dir {}: {}", state_dir.display(), e))?;

        let session_token_file = match env::var("SESSION_TOKEN_FILE") {
            Ok(path) => PathBuf::from(path),
            Err(_) => state_dir.join("session_token"),
        };
        let license_key_file = match env::var("LICENSE_KEY_FILE") {
            Ok(path) => PathBuf::from(path),
            Err(_) => state_dir.join("license_key"),
        };

        Ok(Self {
            api_base_url,
            session_token_file,
            license_key_file,
        })
    }
}

fn default_state_dir() -> Result<PathBuf, String> {
    let home = env::var("HOME").map_err(|_| "HOME must be set".to_string())?;
    Ok(PathBuf::from(home).join(".mailpool"))
}
