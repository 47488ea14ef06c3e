//! Resource resolution seam
//!
//! A [`ResourceResolver`] turns a [`TemplateTree`] into concrete simulated
//! resources and computes exported outputs from them. The stack lifecycle
//! only talks to this trait; how each resource type is simulated is the
//! resolver's business.

use crate::error::ResolveError;
use crate::parser::TemplateTree;
use serde::Serialize;
use std::collections::BTreeMap;
use stratus_core::{Parameters, StackId, Tags};

/// Stack-level inputs handed to the resolver
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    /// Owning stack id
    pub stack_id: &'a StackId,
    /// Owning stack name
    pub stack_name: &'a str,
    /// Region the stack lives in
    pub region: &'a str,
    /// Caller-supplied parameter values
    pub parameters: &'a Parameters,
    /// Stack tags
    pub tags: &'a Tags,
}

/// Lifecycle state of a single resolved resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceState {
    /// Allocated by the current template
    Created,
    /// Kept across an update with new properties
    Updated,
    /// Torn down with the stack
    Deleted,
}

/// A template resource materialised as a simulated object
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedResource {
    /// Key under `Resources` in the template
    pub logical_id: String,
    /// Simulated physical id
    pub physical_id: String,
    /// Declared resource type, e.g. `AWS::SQS::Queue`
    pub resource_type: String,
    /// Declared properties, unevaluated
    pub properties: serde_json::Value,
    /// Current state
    pub state: ResourceState,
}

/// Resolved resources of one stack, keyed by logical id
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResourceMap {
    resources: BTreeMap<String, ResolvedResource>,
    parameters: Parameters,
}

impl ResourceMap {
    /// Create an empty map with the given resolved parameters
    pub fn new(parameters: Parameters) -> Self {
        Self {
            resources: BTreeMap::new(),
            parameters,
        }
    }

    /// Insert or replace a resource
    pub fn insert(&mut self, resource: ResolvedResource) {
        self.resources.insert(resource.logical_id.clone(), resource);
    }

    /// Look up a resource by logical id
    pub fn get(&self, logical_id: &str) -> Option<&ResolvedResource> {
        self.resources.get(logical_id)
    }

    /// Resources in logical-id order
    pub fn values(&self) -> impl Iterator<Item = &ResolvedResource> {
        self.resources.values()
    }

    /// Mutable access, for resolvers
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut ResolvedResource> {
        self.resources.values_mut()
    }

    /// Parameter values after defaults were applied
    pub fn resolved_parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Number of resources
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

/// One exported stack output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Output {
    /// Key under `Outputs` in the template
    pub key: String,
    /// Resolved value
    pub value: String,
    /// Optional description
    pub description: Option<String>,
    /// Optional export name
    pub export_name: Option<String>,
}

/// Resolved outputs of one stack, keyed by output key
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OutputMap {
    outputs: BTreeMap<String, Output>,
}

impl OutputMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an output
    pub fn insert(&mut self, output: Output) {
        self.outputs.insert(output.key.clone(), output);
    }

    /// Look up an output by key
    pub fn get(&self, key: &str) -> Option<&Output> {
        self.outputs.get(key)
    }

    /// Outputs in key order
    pub fn values(&self) -> impl Iterator<Item = &Output> {
        self.outputs.values()
    }

    /// Number of outputs
    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}

/// Builds, updates and tears down the resources behind a stack.
///
/// Implementations must be side-effect free on error: a rejected call leaves
/// any map it was given untouched so the caller can keep the previous state.
pub trait ResourceResolver: Send + Sync {
    /// Materialise every resource in `tree`.
    fn create_resources(
        &self,
        ctx: &ResolveContext<'_>,
        tree: &TemplateTree,
    ) -> Result<ResourceMap, ResolveError>;

    /// Apply the change set between `previous` and `next` to `current`,
    /// returning the new map.
    fn update_resources(
        &self,
        ctx: &ResolveContext<'_>,
        current: &ResourceMap,
        previous: &TemplateTree,
        next: &TemplateTree,
    ) -> Result<ResourceMap, ResolveError>;

    /// Deallocate every resource in `resources`.
    fn delete_resources(&self, resources: &mut ResourceMap) -> Result<(), ResolveError>;

    /// Compute exported outputs from resolved resources.
    fn resolve_outputs(
        &self,
        resources: &ResourceMap,
        tree: &TemplateTree,
    ) -> Result<OutputMap, ResolveError>;
}
