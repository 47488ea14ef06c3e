//! Per-region stack operations.
//!
//! [`Stacks`] is the call surface for one region. Every method takes the
//! region's lock for the duration of the call and returns owned snapshots.

use crate::descriptor::StackDescriptor;
use crate::error::Result;
use parking_lot::Mutex;
use stratus_core::{StackEvent, StackStatus};
use stratus_engine::{Backend, CreateStack, UpdateStack};
use stratus_template::ResolvedResource;

/// Stack operations for one region.
///
/// Obtain via [`Stratus::stacks`](crate::Stratus::stacks).
#[derive(Debug)]
pub struct Stacks<'a> {
    backend: &'a Mutex<Backend>,
}

impl<'a> Stacks<'a> {
    pub(crate) fn new(backend: &'a Mutex<Backend>) -> Self {
        Self { backend }
    }

    /// Region these operations act on.
    pub fn region(&self) -> String {
        self.backend.lock().region().to_string()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Create a stack.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let stack = db.stacks("us-east-1")?.create(CreateStack::new("web", "{}"))?;
    /// assert_eq!(stack.status, StackStatus::CreateComplete);
    /// ```
    pub fn create(&self, request: CreateStack) -> Result<StackDescriptor> {
        let mut backend = self.backend.lock();
        let stack = backend.create_stack(request)?;
        Ok(StackDescriptor::from(stack))
    }

    /// Update the stack `key` (name or id) resolves to.
    pub fn update(&self, key: &str, request: UpdateStack) -> Result<StackDescriptor> {
        let mut backend = self.backend.lock();
        let stack = backend.update_stack(key, request)?;
        Ok(StackDescriptor::from(stack))
    }

    /// Delete by id, or every active stack named `key`.
    ///
    /// Unknown keys are ignored.
    pub fn delete(&self, key: &str) -> Result<()> {
        self.backend.lock().delete_stack(key)?;
        Ok(())
    }

    /// Record a transition of one resource inside a stack.
    ///
    /// The stack's status is unchanged. Fails on deleted stacks.
    pub fn add_resource_event(
        &self,
        key: &str,
        logical_id: &str,
        status: StackStatus,
        reason: Option<&str>,
        properties: Option<serde_json::Value>,
    ) -> Result<StackEvent> {
        let mut backend = self.backend.lock();
        let event = backend.add_resource_event(key, logical_id, status, reason, properties)?;
        Ok(event.clone())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Describe one stack, or every active stack when `key` is `None`.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`](crate::Error::Validation) if `key` matches nothing.
    pub fn describe(&self, key: Option<&str>) -> Result<Vec<StackDescriptor>> {
        let backend = self.backend.lock();
        let stacks = backend.describe_stacks(key)?;
        Ok(stacks.into_iter().map(StackDescriptor::from).collect())
    }

    /// Every active stack in creation order.
    pub fn list(&self) -> Vec<StackDescriptor> {
        let backend = self.backend.lock();
        backend
            .list_stacks()
            .into_iter()
            .map(StackDescriptor::from)
            .collect()
    }

    /// Look up a stack by id (active or deleted) or by active name.
    pub fn get(&self, key: &str) -> Option<StackDescriptor> {
        let backend = self.backend.lock();
        backend.get_stack(key).map(StackDescriptor::from)
    }

    /// Resolved resources of a stack.
    pub fn list_resources(&self, key: &str) -> Result<Vec<ResolvedResource>> {
        let backend = self.backend.lock();
        let resources = backend.list_stack_resources(key)?;
        Ok(resources.into_iter().cloned().collect())
    }

    /// Event history of a stack, oldest first.
    pub fn events(&self, key: &str) -> Result<Vec<StackEvent>> {
        let backend = self.backend.lock();
        Ok(backend.describe_stack_events(key)?.to_vec())
    }

    /// Raw template text of a stack.
    pub fn template(&self, key: &str) -> Result<String> {
        let backend = self.backend.lock();
        Ok(backend.get_template(key)?.to_string())
    }

    // =========================================================================
    // Escape hatch
    // =========================================================================

    /// Run `f` against the locked backend.
    ///
    /// Use for registry queries the facade does not wrap, such as listing
    /// deleted stacks.
    pub fn with_backend<R>(&self, f: impl FnOnce(&mut Backend) -> R) -> R {
        let mut backend = self.backend.lock();
        f(&mut backend)
    }
}
