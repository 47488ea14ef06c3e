//! Engine configuration
//!
//! [`EngineConfig`] fixes the account id and the enumerable set of regions a
//! [`Regions`](crate::Regions) table is built with. It can be constructed in
//! code or loaded from TOML:
//!
//! ```toml
//! account_id = "123456789012"
//! regions = ["us-east-1", "eu-west-1"]
//! default_region = "us-east-1"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Account id used when none is configured.
pub const DEFAULT_ACCOUNT_ID: &str = "123456789012";

/// Region used when none is configured.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Regions available when none are configured.
pub const DEFAULT_REGIONS: &[&str] = &[
    "us-east-1",
    "us-east-2",
    "us-west-1",
    "us-west-2",
    "eu-west-1",
    "eu-central-1",
    "ap-northeast-1",
    "ap-southeast-1",
    "ap-southeast-2",
    "sa-east-1",
];

/// Configuration could not be loaded or is inconsistent
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the file failed
    #[error("failed to read config {path}: {source}")]
    Io {
        /// File that was read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for [`EngineConfig`]
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    /// Values are present but inconsistent
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Account and region settings for the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// 12-digit account id embedded in stack ids
    pub account_id: String,
    /// Regions that get a backend, in enumeration order
    pub regions: Vec<String>,
    /// Region used by callers that do not name one
    pub default_region: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            account_id: DEFAULT_ACCOUNT_ID.to_string(),
            regions: DEFAULT_REGIONS.iter().map(|r| r.to_string()).collect(),
            default_region: DEFAULT_REGION.to_string(),
        }
    }
}

impl EngineConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the account id
    pub fn account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = account_id.into();
        self
    }

    /// Replace the region set
    pub fn regions<I, S>(mut self, regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.regions = regions.into_iter().map(Into::into).collect();
        self
    }

    /// Set the default region
    pub fn default_region(mut self, region: impl Into<String>) -> Self {
        self.default_region = region.into();
        self
    }

    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Check internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.account_id.len() != 12 || !self.account_id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ConfigError::Invalid(format!(
                "account_id must be 12 digits, got '{}'",
                self.account_id
            )));
        }
        if self.regions.is_empty() {
            return Err(ConfigError::Invalid("at least one region is required".into()));
        }
        let mut seen = HashSet::new();
        for region in &self.regions {
            if region.is_empty() {
                return Err(ConfigError::Invalid("region names must not be empty".into()));
            }
            if !seen.insert(region.as_str()) {
                return Err(ConfigError::Invalid(format!("duplicate region '{}'", region)));
            }
        }
        if !seen.contains(self.default_region.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "default_region '{}' is not in regions",
                self.default_region
            )));
        }
        Ok(())
    }
}
