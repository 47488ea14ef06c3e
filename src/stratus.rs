//! Main entry point for Stratus.
//!
//! This module provides the `Stratus` struct, which owns the region table
//! and hands out per-region [`Stacks`] handles.

use crate::error::Result;
use crate::stacks::Stacks;
use std::path::Path;
use std::sync::Arc;
use stratus_engine::{EngineConfig, Regions};
use stratus_template::{ResourceResolver, SimulatedResolver};
use tracing::debug;

/// The Stratus stack simulator.
///
/// Cheap to clone; clones share the same region table.
///
/// # Example
///
/// ```ignore
/// use stratus::prelude::*;
///
/// let sim = Stratus::open()?;
/// let stacks = sim.stacks("us-east-1")?;
/// let web = stacks.create(CreateStack::new("web", r#"{"Resources":{}}"#))?;
/// stacks.delete(web.stack_id.as_str())?;
/// ```
#[derive(Clone)]
pub struct Stratus {
    regions: Arc<Regions>,
}

impl Stratus {
    /// Open with default settings and the built-in simulated resolver.
    pub fn open() -> Result<Self> {
        Self::builder().open()
    }

    /// Open with settings loaded from a TOML file.
    pub fn open_with_config(path: impl AsRef<Path>) -> Result<Self> {
        let config = EngineConfig::load(path)?;
        Self::builder().config(config).open()
    }

    /// Create a builder for configuration.
    pub fn builder() -> StratusBuilder {
        StratusBuilder::new()
    }

    /// Stack operations for `region`.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`](crate::Error::NotFound) if the region is not configured.
    pub fn stacks(&self, region: &str) -> Result<Stacks<'_>> {
        Ok(Stacks::new(self.regions.backend(region)?))
    }

    /// Stack operations for the default region.
    pub fn default_stacks(&self) -> Result<Stacks<'_>> {
        Ok(Stacks::new(self.regions.default_backend()?))
    }

    /// Configured region names, in configuration order.
    pub fn region_names(&self) -> Vec<String> {
        self.regions.names().map(str::to_string).collect()
    }

    /// Default region name.
    pub fn default_region(&self) -> &str {
        self.regions.default_region()
    }
}

impl std::fmt::Debug for Stratus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stratus").field("regions", &self.regions).finish()
    }
}

/// Builder for Stratus configuration.
///
/// # Example
///
/// ```ignore
/// let sim = Stratus::builder()
///     .account_id("000000000000")
///     .regions(["us-east-1", "eu-west-1"])
///     .open()?;
/// ```
pub struct StratusBuilder {
    config: EngineConfig,
    resolver: Option<Arc<dyn ResourceResolver>>,
}

impl StratusBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            resolver: None,
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the account id embedded in stack ids.
    pub fn account_id(mut self, account_id: impl Into<String>) -> Self {
        self.config = self.config.account_id(account_id);
        self
    }

    /// Set the region set.
    ///
    /// If the current default region is not in the new set, the first region
    /// becomes the default.
    pub fn regions<I, S>(mut self, regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config = self.config.regions(regions);
        if !self.config.regions.contains(&self.config.default_region) {
            if let Some(first) = self.config.regions.first().cloned() {
                self.config.default_region = first;
            }
        }
        self
    }

    /// Set the default region.
    pub fn default_region(mut self, region: impl Into<String>) -> Self {
        self.config = self.config.default_region(region);
        self
    }

    /// Use a custom resource resolver instead of the simulated one.
    pub fn resolver(mut self, resolver: Arc<dyn ResourceResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Validate the configuration and build the region table.
    pub fn open(self) -> Result<Stratus> {
        debug!(
            account_id = %self.config.account_id,
            default_region = %self.config.default_region,
            custom_resolver = self.resolver.is_some(),
            "opening stratus"
        );
        let resolver = self
            .resolver
            .unwrap_or_else(|| Arc::new(SimulatedResolver::new()));
        let regions = Regions::new(&self.config, resolver)?;
        Ok(Stratus {
            regions: Arc::new(regions),
        })
    }
}

impl Default for StratusBuilder {
    fn default() -> Self {
        Self::new()
    }
}
