//! Application-level configuration: remote endpoint and the admin shared secret.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the host looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/bolao.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "BOLAO_CONFIG_PATH";
/// Baked-in admin secret used when the configuration provides none.
///
/// The admin gate is a convenience toggle shared among a handful of friends,
/// not a security boundary; the secret is compared client-side.
const DEFAULT_ADMIN_SECRET: &str = "admin";

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    endpoint_url: Option<String>,
    admin_secret: String,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to built-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let config: Self = raw.into();
                    info!(path = %path.display(), "loaded configuration");
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// URL of the remote document endpoint, when one is configured.
    pub fn endpoint_url(&self) -> Option<&str> {
        self.endpoint_url.as_deref()
    }

    /// Compare a candidate secret against the configured admin secret.
    pub fn verify_admin_secret(&self, candidate: &str) -> bool {
        candidate == self.admin_secret
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint_url: None,
            admin_secret: DEFAULT_ADMIN_SECRET.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    #[serde(default)]
    endpoint_url: Option<String>,
    #[serde(default)]
    admin_secret: Option<String>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        Self {
            endpoint_url: value.endpoint_url,
            admin_secret: value
                .admin_secret
                .unwrap_or_else(|| DEFAULT_ADMIN_SECRET.into()),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
