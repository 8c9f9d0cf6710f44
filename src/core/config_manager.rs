// src/core/config_manager.rs
//! Unified configuration management: `config.yaml` plus environment overrides

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::utils::parse_flag;

const DEFAULT_API_URL: &str = "http://localhost:3001";
const DEFAULT_INTERVIEW_URL: &str = "http://localhost:5173/entrevista";
const DEFAULT_BROWSER_COMMAND: &str = "xdg-open";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CHECK_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigManager {
    pub environment: String,
    pub backend: BackendConfig,
    pub gate: GateConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub api_url: String,
    pub timeout_seconds: u64,
    /// Upper bound for a single requirement check; expiry counts as unmet.
    pub check_timeout_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    pub interview_url: String,
    pub browser_command: String,
    pub auto_close_on_valid: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Session file holding `user`, `accessToken` and `refreshToken`.
    pub session_path: Option<PathBuf>,
    /// Persistent token store consulted after the session (`accessToken`, then `authToken`).
    pub token_store_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct EnvironmentSection {
    backend: BackendConfig,
    gate: GateConfig,
    storage: StorageConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    local: EnvironmentSection,
    production: EnvironmentSection,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_seconds: DEFAULT_HTTP_TIMEOUT_SECS,
            check_timeout_seconds: DEFAULT_CHECK_TIMEOUT_SECS,
        }
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            interview_url: DEFAULT_INTERVIEW_URL.to_string(),
            browser_command: DEFAULT_BROWSER_COMMAND.to_string(),
            auto_close_on_valid: true,
        }
    }
}

impl BackendConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn check_timeout(&self) -> Duration {
        Duration::from_secs(self.check_timeout_seconds)
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self {
            environment: "local".to_string(),
            backend: BackendConfig::default(),
            gate: GateConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl ConfigManager {
    /// Load `config.yaml` from the working directory (if present) and the process environment
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("config.yaml"))
    }

    /// Load from an explicit YAML file; a missing file falls back to defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        let yaml = if path.exists() {
            Some(
                std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
            )
        } else {
            None
        };

        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_sources(yaml.as_deref(), &vars)
    }

    /// Build the configuration from YAML text and a variable map
    pub fn from_sources(yaml: Option<&str>, vars: &HashMap<String, String>) -> Result<Self> {
        let environment = Self::environment_name(vars);
        info!("Loading configuration for environment: {}", environment);

        let section = match yaml {
            Some(content) => {
                let file: ConfigFile =
                    serde_yaml::from_str(content).context("Failed to parse config.yaml")?;
                match environment.as_str() {
                    "production" => file.production,
                    _ => file.local,
                }
            }
            None => EnvironmentSection::default(),
        };

        let mut config = Self {
            environment,
            backend: section.backend,
            gate: section.gate,
            storage: section.storage,
        };
        config.apply_overrides(vars)?;
        config.validate()?;
        Ok(config)
    }

    /// A zero timeout would expire every check before it starts.
    fn validate(&self) -> Result<()> {
        if self.backend.check_timeout_seconds == 0 {
            anyhow::bail!("check_timeout_seconds (CHECK_TIMEOUT_SECONDS) must be at least 1 second");
        }
        if self.backend.timeout_seconds == 0 {
            anyhow::bail!("timeout_seconds (HTTP_TIMEOUT_SECONDS) must be at least 1 second");
        }
        Ok(())
    }

    fn environment_name(vars: &HashMap<String, String>) -> String {
        vars.get("INTERVIEW_GATE_ENV")
            .or_else(|| vars.get("ENVIRONMENT"))
            .cloned()
            .unwrap_or_else(|| "local".to_string())
    }

    fn apply_overrides(&mut self, vars: &HashMap<String, String>) -> Result<()> {
        if let Some(url) = vars.get("API_URL") {
            self.backend.api_url = url.clone();
        }
        if let Some(secs) = vars.get("HTTP_TIMEOUT_SECONDS") {
            self.backend.timeout_seconds = secs
                .parse()
                .context("HTTP_TIMEOUT_SECONDS must be a whole number of seconds")?;
        }
        if let Some(secs) = vars.get("CHECK_TIMEOUT_SECONDS") {
            self.backend.check_timeout_seconds = secs
                .parse()
                .context("CHECK_TIMEOUT_SECONDS must be a whole number of seconds")?;
        }
        if let Some(url) = vars.get("INTERVIEW_URL") {
            self.gate.interview_url = url.clone();
        }
        if let Some(command) = vars.get("BROWSER_COMMAND") {
            self.gate.browser_command = command.clone();
        }
        if let Some(flag) = vars.get("AUTO_CLOSE_ON_VALID") {
            self.gate.auto_close_on_valid = parse_flag(flag)
                .ok_or_else(|| anyhow::anyhow!("AUTO_CLOSE_ON_VALID must be a boolean flag"))?;
        }
        if let Some(path) = vars.get("SESSION_FILE") {
            self.storage.session_path = Some(PathBuf::from(path));
        }
        if let Some(path) = vars.get("TOKEN_STORE_FILE") {
            self.storage.token_store_path = Some(PathBuf::from(path));
        }
        Ok(())
    }
}
