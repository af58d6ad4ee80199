//! Server settings, read once from the environment at startup.

use common::config::{ConfigError, DashboardEnv};
use std::path::PathBuf;

const DATABASE_FILE: &str = "dashboard.sqlite";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// `APP_DEBUG_MODE=True` turns on debug logging.
    pub debug: bool,
    pub database_path: PathBuf,
    pub static_dir: PathBuf,
    pub dashboard: DashboardEnv,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let dashboard = DashboardEnv::from_env()?;
        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let debug = std::env::var("APP_DEBUG_MODE").is_ok_and(|v| v == "True");
        let database_dir = std::env::var("APP_DATABASE_DIR").unwrap_or_else(|_| "./data".to_string());

        Ok(Self {
            host,
            port: dashboard.api_port()?,
            debug,
            database_path: PathBuf::from(database_dir).join(DATABASE_FILE),
            static_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(dashboard.build_output_dir()),
            dashboard,
        })
    }

    pub fn base_path(&self) -> String {
        self.dashboard.base_path()
    }
}
