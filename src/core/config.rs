use crate::core::error::{ConvertError, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

/// Environment variable holding the ExchangeRate-API key.
pub const API_KEY_VAR: &str = "EXCHANGE_RATE_API_KEY";
pub const DEFAULT_BASE_URL: &str = "https://v6.exchangerate-api.com";
pub const DEFAULT_ENV_FILE: &str = ".env";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExchangeRateApiConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub exchangerate_api: Option<ExchangeRateApiConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            exchangerate_api: Some(ExchangeRateApiConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
            }),
        }
    }
}

fn default_delay_ms() -> u64 {
    500
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RetryConfig {
    #[serde(default)]
    pub retries: usize,
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        RetryConfig {
            retries: 0,
            delay_ms: default_delay_ms(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    pub timeout_secs: Option<u64>,
}

impl AppConfig {
    /// Loads the config from the default location. A missing file yields
    /// the defaults.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("", "", "fxc").ok_or_else(|| {
            ConvertError::Config("Could not determine project directories".to_string())
        })?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config_str = fs::read_to_string(path).map_err(|e| {
            ConvertError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;

        let config: Self = serde_yaml::from_str(&config_str).map_err(|e| {
            ConvertError::Config(format!("Failed to parse {}: {e}", path.display()))
        })?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn base_url(&self) -> &str {
        self.providers
            .exchangerate_api
            .as_ref()
            .map_or(DEFAULT_BASE_URL, |p| &p.base_url)
    }
}

/// Secrets resolved once at startup. The env file is parsed into this
/// struct; the process environment is never modified.
#[derive(Clone)]
pub struct Secrets {
    pub api_key: String,
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets").field("api_key", &"***").finish()
    }
}

impl Secrets {
    /// Resolves the API key from the process environment, falling back to
    /// the env file. An explicitly named env file must exist; the default
    /// `.env` is optional.
    pub fn load(env_file: Option<&Path>) -> Result<Self> {
        let file_vars = match env_file {
            Some(path) => read_env_file(path, true)?,
            None => read_env_file(Path::new(DEFAULT_ENV_FILE), false)?,
        };
        Self::resolve(std::env::var(API_KEY_VAR).ok(), &file_vars)
    }

    /// Reads the API key from `path` only, ignoring the process environment.
    pub fn from_env_file(path: &Path) -> Result<Self> {
        Self::resolve(None, &read_env_file(path, true)?)
    }

    pub fn resolve(process_value: Option<String>, file_vars: &HashMap<String, String>) -> Result<Self> {
        let api_key = process_value
            .filter(|v| !v.trim().is_empty())
            .or_else(|| {
                file_vars
                    .get(API_KEY_VAR)
                    .filter(|v| !v.trim().is_empty())
                    .cloned()
            })
            .ok_or(ConvertError::MissingApiKey(API_KEY_VAR))?;

        Ok(Secrets {
            api_key: api_key.trim().to_string(),
        })
    }
}

fn read_env_file(path: &Path, required: bool) -> Result<HashMap<String, String>> {
    let env_error = |source| ConvertError::EnvFile {
        path: path.to_path_buf(),
        source,
    };

    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) if e.not_found() && !required => {
            debug!("No env file at {}", path.display());
            return Ok(HashMap::new());
        }
        Err(e) => return Err(env_error(e)),
    };

    let mut vars = HashMap::new();
    for item in iter {
        let (key, value) = item.map_err(env_error)?;
        vars.insert(key, value);
    }
    debug!("Loaded {} entries from {}", vars.len(), path.display());
    Ok(vars)
}
