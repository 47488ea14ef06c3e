//! Convenient imports for Stratus.
//!
//! ```ignore
//! use stratus::prelude::*;
//!
//! let sim = Stratus::open()?;
//! sim.stacks("us-east-1")?.create(CreateStack::new("web", "{}"))?;
//! ```

// Main entry point
pub use crate::descriptor::StackDescriptor;
pub use crate::stacks::Stacks;
pub use crate::stratus::{Stratus, StratusBuilder};

// Error handling
pub use crate::error::{Error, Result};

// Requests and core types
pub use crate::types::{CreateStack, Parameters, StackId, StackStatus, Tags, UpdateStack};
