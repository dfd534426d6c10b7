use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::code::{FIXED_PART_LEN, MAX_SERIAL};
use crate::error::InputValidationError;
use crate::request::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use crate::retry::{RetryPolicy, DEFAULT_BACKOFF, DEFAULT_MAX_ATTEMPTS};

/// Retry policy parameters (optional section in config.toml).
/// Missing keys take their default values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of attempts per code (including the first).
    pub max_attempts: u32,
    /// Fixed pause between attempts, in seconds (e.g. 0.5 = 500ms).
    pub backoff_secs: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff_secs: DEFAULT_BACKOFF.as_secs_f64(),
        }
    }
}

/// Global configuration loaded from `~/.config/ilusiona/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IlusionaConfig {
    /// Rendering service endpoint; the code and display options go in the query string.
    pub base_url: String,
    /// `User-Agent` sent with every request.
    pub user_agent: String,
    /// Per-attempt timeout in seconds for the whole GET.
    pub timeout_secs: u64,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

impl Default for IlusionaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
            retry: None,
        }
    }
}

impl IlusionaConfig {
    /// Rejects a zero timeout, which curl treats as no timeout at all.
    pub fn validate(&self) -> Result<(), InputValidationError> {
        if self.timeout_secs == 0 {
            return Err(InputValidationError::Timeout);
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Retry policy from the `[retry]` section, falling back to defaults.
    /// A negative or non-finite backoff is replaced with the default.
    pub fn retry_policy(&self) -> RetryPolicy {
        let retry = self.retry.clone().unwrap_or_default();
        let backoff = Duration::try_from_secs_f64(retry.backoff_secs).unwrap_or_else(|_| {
            tracing::warn!(
                backoff_secs = retry.backoff_secs,
                "invalid backoff in config, using default"
            );
            DEFAULT_BACKOFF
        });
        RetryPolicy::new(retry.max_attempts, backoff)
    }
}

/// Validated parameters for one generation batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    fixed_part: String,
    start_serial: u32,
    quantity: u32,
}

impl BatchConfig {
    pub fn new(
        fixed_part: &str,
        start_serial: u32,
        quantity: u32,
    ) -> Result<Self, InputValidationError> {
        if fixed_part.len() != FIXED_PART_LEN || !fixed_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InputValidationError::FixedPart(fixed_part.to_string()));
        }
        if start_serial > MAX_SERIAL {
            return Err(InputValidationError::StartSerial(start_serial));
        }
        if quantity == 0 {
            return Err(InputValidationError::Quantity);
        }
        Ok(Self {
            fixed_part: fixed_part.to_string(),
            start_serial,
            quantity,
        })
    }

    pub fn fixed_part(&self) -> &str {
        &self.fixed_part
    }

    pub fn start_serial(&self) -> u32 {
        self.start_serial
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("ilusiona")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<IlusionaConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = IlusionaConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg: IlusionaConfig = toml::from_str(&data)
        .with_context(|| format!("parsing config {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}
