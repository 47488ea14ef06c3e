//! Process-wide region table
//!
//! [`Regions`] is built once from an [`EngineConfig`] and holds one
//! independently lockable [`Backend`] per configured region. The set of
//! regions is fixed at construction; callers receive it by handle rather than
//! through global state.

use crate::backend::Backend;
use crate::config::{ConfigError, EngineConfig};
use crate::error::{Result, StackError};
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use stratus_template::ResourceResolver;
use tracing::info;

/// One backend per configured region
pub struct Regions {
    names: Vec<String>,
    backends: FxHashMap<String, Mutex<Backend>>,
    default_region: String,
}

impl Regions {
    /// Build the table, validating `config` first.
    pub fn new(
        config: &EngineConfig,
        resolver: Arc<dyn ResourceResolver>,
    ) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        let backends = config
            .regions
            .iter()
            .map(|region| {
                let backend =
                    Backend::new(region.clone(), config.account_id.clone(), resolver.clone());
                (region.clone(), Mutex::new(backend))
            })
            .collect();
        info!(
            regions = config.regions.len(),
            account_id = %config.account_id,
            "region table ready"
        );
        Ok(Self {
            names: config.regions.clone(),
            backends,
            default_region: config.default_region.clone(),
        })
    }

    /// Backend for `region`
    ///
    /// # Errors
    ///
    /// [`StackError::UnknownRegion`] if `region` is not configured.
    pub fn backend(&self, region: &str) -> Result<&Mutex<Backend>> {
        self.backends
            .get(region)
            .ok_or_else(|| StackError::UnknownRegion {
                region: region.to_string(),
            })
    }

    /// Backend for the default region
    pub fn default_backend(&self) -> Result<&Mutex<Backend>> {
        self.backend(&self.default_region)
    }

    /// Configured region names, in configuration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Default region name
    pub fn default_region(&self) -> &str {
        &self.default_region
    }
}

impl std::fmt::Debug for Regions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Regions")
            .field("names", &self.names)
            .field("default_region", &self.default_region)
            .finish()
    }
}
