use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crawler_admin_core::{AppOptions, ResultBinding, SchedulerPolicy};
use crawler_gateway::GatewaySettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::LogDestination;

pub const DEFAULT_CONFIG_FILE: &str = "crawler_admin.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("cannot parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Contents of the RON config file. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub base_url: String,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub max_body_bytes: u64,
    pub scheduler_policy: SchedulerPolicy,
    pub result_binding: ResultBinding,
    pub log_destination: LogDestination,
}

impl Default for AdminConfig {
    fn default() -> Self {
        let gateway = GatewaySettings::default();
        Self {
            base_url: gateway.base_url,
            connect_timeout_ms: gateway.connect_timeout.as_millis() as u64,
            request_timeout_ms: gateway.request_timeout.as_millis() as u64,
            max_body_bytes: gateway.max_body_bytes,
            scheduler_policy: SchedulerPolicy::default(),
            result_binding: ResultBinding::default(),
            log_destination: LogDestination::default(),
        }
    }
}

impl AdminConfig {
    pub fn gateway_settings(&self) -> GatewaySettings {
        GatewaySettings {
            base_url: self.base_url.clone(),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            max_body_bytes: self.max_body_bytes,
        }
    }

    pub fn app_options(&self) -> AppOptions {
        AppOptions {
            scheduler_policy: self.scheduler_policy,
            result_binding: self.result_binding,
        }
    }
}

/// Reads the config file; a missing file means all defaults.
pub fn load_config(path: &Path) -> Result<AdminConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Ok(AdminConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}
