//! Public types for the Stratus API.
//!
//! This module re-exports types from internal crates with a clean public interface.

// Identity and history
pub use stratus_core::{EventId, Parameters, StackEvent, StackId, StackStatus, Tags};
pub use stratus_core::{STACK_RESOURCE_TYPE, USER_INITIATED};

// Requests
pub use stratus_engine::{CreateStack, UpdateStack};

// Engine access
pub use stratus_engine::{Backend, EngineConfig, Stack};

// Resolution
pub use stratus_template::{
    Output, OutputMap, ResolveContext, ResolveError, ResolvedResource, ResourceMap,
    ResourceResolver, ResourceState, SimulatedResolver, TemplateError, TemplateFormat,
    TemplateTree,
};
