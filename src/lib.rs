//! # Stratus
//!
//! In-memory simulator for infrastructure-as-code stacks.
//!
//! Stratus materialises named templates into simulated stacks, records every
//! status transition, and keeps deleted stacks around for historical queries.
//!
//! ## Quick Start
//!
//! ```ignore
//! use stratus::prelude::*;
//!
//! let sim = Stratus::open()?;
//! let stacks = sim.stacks("us-east-1")?;
//!
//! let web = stacks.create(CreateStack::new("web", r#"{"Resources":{}}"#))?;
//! assert_eq!(web.status, StackStatus::CreateComplete);
//!
//! stacks.update("web", UpdateStack::new(r#"{"Resources":{}}"#))?;
//! stacks.delete("web")?;
//!
//! // Still describable by id after deletion
//! let gone = stacks.describe(Some(web.stack_id.as_str()))?;
//! assert_eq!(gone[0].status, StackStatus::DeleteComplete);
//! ```
//!
//! ## Layers
//!
//! - `stratus-core`: ids, statuses, events
//! - `stratus-template`: parsing and the resolver seam
//! - `stratus-engine`: stack state machine and registries
//! - this crate: [`Stratus`] entry point and [`Stacks`] per-region handle

#![warn(missing_docs)]

mod descriptor;
mod error;
mod stacks;
mod stratus;
mod types;

pub mod prelude;

// Re-export main entry points
pub use crate::stratus::{Stratus, StratusBuilder};
pub use descriptor::StackDescriptor;
pub use error::{Error, Result};
pub use stacks::Stacks;

// Re-export types
pub use types::*;
