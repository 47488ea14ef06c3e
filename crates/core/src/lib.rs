//! Core types for Stratus
//!
//! This crate defines the identity and record types shared by the template
//! and engine layers:
//! - [`StackId`], [`EventId`]: identifiers
//! - [`StackStatus`]: lifecycle states
//! - [`StackEvent`], [`EventLog`]: the append-only transition history

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod event;
pub mod status;
pub mod types;

pub use event::{EventDraft, EventLog, StackEvent, STACK_RESOURCE_TYPE, USER_INITIATED};
pub use status::StackStatus;
pub use types::{EventId, Parameters, StackId, Tags};
