//! Runtime configuration.
//!
//! Layers, lowest first: built-in defaults, `<config dir>/hoshi/config.json`,
//! `HOSHI_*` environment variables, then command line flags (applied by the
//! binary).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};

const APP_NAME: &str = "hoshi";
const CONFIG_FILE: &str = "config.json";

pub const PROJECT_ENV: &str = "HOSHI_PROJECT";
pub const HOST_ENV: &str = "HOSHI_HOST";
pub const PORT_ENV: &str = "HOSHI_PORT";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Project root directory or path of its `project.hoshi`.
    pub project: Option<PathBuf>,
    /// Address the HTTP API binds to.
    pub host: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project: None,
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Config {
    /// Load the config file and apply environment overrides.
    /// Falls back to defaults if the file doesn't exist or fails to parse.
    pub fn load() -> Self {
        let config = match Self::try_load() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {:#}", e);
                Self::default()
            }
        };
        config.with_env()
    }

    fn try_load() -> Result<Self> {
        let config_path = get_config_path()?;
        if !config_path.exists() {
            return Ok(Self::default());
        }
        Self::from_file(&config_path)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config = serde_json::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    pub fn with_env(self) -> Self {
        self.apply_env(|key| std::env::var(key).ok())
    }

    fn apply_env(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(project) = var(PROJECT_ENV).filter(|s| !s.is_empty()) {
            self.project = Some(PathBuf::from(project));
        }
        if let Some(host) = var(HOST_ENV).filter(|s| !s.is_empty()) {
            self.host = host;
        }
        if let Some(port) = var(PORT_ENV) {
            match port.parse() {
                Ok(port) => self.port = port,
                Err(_) => tracing::warn!("Ignoring invalid {}: {:?}", PORT_ENV, port),
            }
        }
        self
    }

    /// The configured project, or the current directory.
    pub fn project_path(&self) -> PathBuf {
        self.project.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn get_config_path() -> Result<PathBuf> {
    let mut path =
        config_dir().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Ok(path)
}
