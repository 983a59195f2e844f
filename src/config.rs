// src/config.rs

use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the persisted collections (one JSON file each).
    pub data_dir: PathBuf,

    pub rust_log: String,

    /// Recovery policy inherited from the original client: when no session
    /// exists and the store holds exactly one user, establish a session for
    /// that sole user instead of demanding a login. Off by default; opt in
    /// explicitly via SINGLE_USER_AUTO_LOGIN=true.
    pub single_user_auto_login: bool,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let data_dir = env::var("DATA_DIR")
            .unwrap_or_else(|_| "data".to_string())
            .into();

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let single_user_auto_login = env::var("SINGLE_USER_AUTO_LOGIN")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Self {
            data_dir,
            rust_log,
            single_user_auto_login,
        }
    }
}
