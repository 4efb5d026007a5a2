use std::{
    env,
    path::{Path, PathBuf},
};

const DEFAULT_BIND: &str = "127.0.0.1:8080";
const DEFAULT_SCALER: &str = "artifacts/scaler.json";
const DEFAULT_FOREST: &str = "artifacts/forest.json";

/// Immutable process configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    bind_addr: String,
    scaler_path: PathBuf,
    forest_path: PathBuf,
}

impl ServerConfig {
    /// Reads the configuration from the environment, falling back to
    /// defaults: `CHURN_BIND`, `CHURN_SCALER`, `CHURN_FOREST`.
    pub fn from_env() -> Self {
        Self {
            bind_addr: env::var("CHURN_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string()),
            scaler_path: env::var("CHURN_SCALER")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_SCALER)),
            forest_path: env::var("CHURN_FOREST")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_FOREST)),
        }
    }

    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }

    pub fn scaler_path(&self) -> &Path {
        &self.scaler_path
    }

    pub fn forest_path(&self) -> &Path {
        &self.forest_path
    }
}
