//! Template layer for Stratus
//!
//! This crate turns raw template text into a [`TemplateTree`] and defines the
//! [`ResourceResolver`] seam the stack lifecycle drives:
//! - [`parse_template`]: JSON first, YAML on syntax-class failure
//! - [`ResourceResolver`]: create / update / delete resources, resolve outputs
//! - [`SimulatedResolver`]: in-memory resolver used by default

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod parser;
pub mod resolver;
pub mod simulated;

pub use error::{ResolveError, TemplateError};
pub use parser::{parse_template, TemplateFormat, TemplateTree};
pub use resolver::{
    Output, OutputMap, ResolveContext, ResolvedResource, ResourceMap, ResourceResolver,
    ResourceState,
};
pub use simulated::SimulatedResolver;
