use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use gaspad_types::*;

use crate::error::LaunchpadResult;

/// Launchpad configuration loaded from TOML file
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LaunchpadConfig {
    /// Persistence settings
    pub storage: StorageConfig,

    /// Launch flow timing and scoring
    pub flow: FlowConfig,

    /// Mock wallet identity shape
    pub wallet: WalletConfig,

    /// Price ticker settings
    pub prices: PriceConfig,

    /// Log output settings
    pub logging: LoggingConfig,
}

/// Persistence configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding one JSON file per storage key
    pub data_dir: PathBuf,

    /// Storage key of the launch list
    pub launches_key: String,
}

/// Which score is stored on a freshly launched token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QualityScorePolicy {
    /// Randomized value in [85, 100) for the success screen
    #[default]
    Cosmetic,
    /// The estimator total computed from the draft
    Estimated,
}

/// Launch flow configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Simulated audit duration in milliseconds
    pub validating_delay_ms: u64,

    /// Simulated mint duration in milliseconds
    pub minting_delay_ms: u64,

    /// Score stored on the created token
    pub quality_score: QualityScorePolicy,
}

/// Mock wallet configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Fixed prefix of synthetic addresses
    pub mock_prefix: String,

    /// Fixed suffix of synthetic addresses
    pub mock_suffix: String,

    /// Number of random characters in the middle
    pub mock_body_len: usize,
}

/// Price ticker configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PriceConfig {
    /// Quote endpoint
    pub endpoint: String,

    /// Seconds between quote refreshes
    pub refresh_interval_secs: u64,

    /// Seconds between cosmetic jitter steps
    pub jitter_interval_secs: u64,

    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive (overridden by RUST_LOG)
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl LaunchpadConfig {
    /// Load configuration from TOML file
    pub fn load(path: &str) -> LaunchpadResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: LaunchpadConfig = toml::from_str(&content)?;

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: &str) -> LaunchpadResult<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> LaunchpadResult<()> {
        self.storage.validate()?;
        self.wallet.validate()?;
        self.prices.validate()?;
        Ok(())
    }
}

impl StorageConfig {
    fn validate(&self) -> LaunchpadResult<()> {
        if self.launches_key.trim().is_empty() {
            return Err(GasPadError::invalid_parameter("launches_key", "empty", "non-empty string").into());
        }
        Ok(())
    }
}

impl FlowConfig {
    /// Duration of the Validating step
    pub fn validating_delay(&self) -> Duration {
        Duration::from_millis(self.validating_delay_ms)
    }

    /// Duration of the Minting step
    pub fn minting_delay(&self) -> Duration {
        Duration::from_millis(self.minting_delay_ms)
    }
}

impl WalletConfig {
    fn validate(&self) -> LaunchpadResult<()> {
        if self.mock_body_len == 0 || self.mock_body_len > 32 {
            return Err(GasPadError::invalid_parameter(
                "mock_body_len",
                &self.mock_body_len.to_string(),
                "between 1 and 32",
            ).into());
        }

        let affixes = format!("{}{}", self.mock_prefix, self.mock_suffix);
        if !affixes.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(GasPadError::invalid_parameter("mock_prefix/mock_suffix", &affixes, "ASCII alphanumeric").into());
        }

        Ok(())
    }
}

impl PriceConfig {
    fn validate(&self) -> LaunchpadResult<()> {
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(GasPadError::invalid_parameter("endpoint", &self.endpoint, "http(s) URL").into());
        }

        if self.refresh_interval_secs == 0 {
            return Err(GasPadError::invalid_parameter("refresh_interval_secs", "0", "greater than 0").into());
        }

        if self.jitter_interval_secs == 0 {
            return Err(GasPadError::invalid_parameter("jitter_interval_secs", "0", "greater than 0").into());
        }

        if self.request_timeout_secs == 0 {
            return Err(GasPadError::invalid_parameter("request_timeout_secs", "0", "greater than 0").into());
        }

        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn jitter_interval(&self) -> Duration {
        Duration::from_secs(self.jitter_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "./data".into(),
            launches_key: LAUNCHES_STORAGE_KEY.to_string(),
        }
    }
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            validating_delay_ms: VALIDATING_DELAY_MS,
            minting_delay_ms: MINTING_DELAY_MS,
            quality_score: QualityScorePolicy::Cosmetic,
        }
    }
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            mock_prefix: MOCK_ADDRESS_PREFIX.to_string(),
            mock_suffix: MOCK_ADDRESS_SUFFIX.to_string(),
            mock_body_len: MOCK_ADDRESS_BODY_LEN,
        }
    }
}

impl Default for PriceConfig {
    fn default() -> Self {
        Self {
            endpoint: PRICE_ENDPOINT.to_string(),
            refresh_interval_secs: PRICE_REFRESH_SECS,
            jitter_interval_secs: PRICE_JITTER_SECS,
            request_timeout_secs: 10,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Create example configuration file
pub fn create_example_config(path: &str) -> LaunchpadResult<()> {
    let example_config = LaunchpadConfig {
        storage: StorageConfig {
            data_dir: "./gaspad-data".into(),
            launches_key: LAUNCHES_STORAGE_KEY.to_string(),
        },
        flow: FlowConfig::default(),
        wallet: WalletConfig::default(),
        prices: PriceConfig::default(),
        logging: LoggingConfig {
            level: "gaspad_launchpad=debug,info".to_string(),
            json: false,
        },
    };

    example_config.save(path)?;
    Ok(())
}
