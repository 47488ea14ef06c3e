//! Stack engine for Stratus
//!
//! This crate implements the stack lifecycle and the registries that track
//! stacks:
//! - [`Stack`]: create / update / delete state machine with an event log
//! - [`Backend`]: per-region registry with active and deleted indexes
//! - [`Regions`]: the fixed table of backends, one per configured region
//! - [`EngineConfig`]: account and region settings
//!
//! # Concurrency
//!
//! Each region's backend sits behind its own `parking_lot::Mutex`. Stacks are
//! only reachable through their backend, so one lock serialises every
//! transition of every stack in that region.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod config;
pub mod error;
pub mod regions;
pub mod stack;

pub use backend::Backend;
pub use config::{ConfigError, EngineConfig, DEFAULT_ACCOUNT_ID, DEFAULT_REGION, DEFAULT_REGIONS};
pub use error::{Result, StackError};
pub use regions::Regions;
pub use stack::{CreateStack, Stack, UpdateStack};
