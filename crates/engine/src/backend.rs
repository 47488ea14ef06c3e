//! Per-region stack registry
//!
//! A [`Backend`] exclusively owns two disjoint indexes:
//! - **active**: live stacks, insertion-ordered
//! - **deleted**: stacks moved here by `delete_stack`, never removed
//!
//! Deletion relocates a stack, it never erases it, so id lookups keep working
//! after a stack is gone. Names are not unique; name lookups are first match
//! in insertion order and only consider active stacks.

use crate::error::{Result, StackError};
use crate::stack::{CreateStack, Stack, UpdateStack};
use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use stratus_core::{StackEvent, StackId, StackStatus};
use stratus_template::{ResolvedResource, ResourceResolver};
use tracing::{debug, info};

/// Insertion-ordered map from stack id to stack
#[derive(Debug, Default)]
struct StackIndex {
    order: Vec<StackId>,
    stacks: FxHashMap<StackId, Stack>,
}

impl StackIndex {
    fn insert(&mut self, stack: Stack) -> &mut Stack {
        match self.stacks.entry(stack.id().clone()) {
            Entry::Vacant(slot) => {
                self.order.push(slot.key().clone());
                slot.insert(stack)
            }
            Entry::Occupied(mut slot) => {
                slot.insert(stack);
                slot.into_mut()
            }
        }
    }

    fn remove(&mut self, id: &StackId) -> Option<Stack> {
        let stack = self.stacks.remove(id)?;
        self.order.retain(|existing| existing != id);
        Some(stack)
    }

    fn contains(&self, id: &StackId) -> bool {
        self.stacks.contains_key(id)
    }

    fn get(&self, id: &StackId) -> Option<&Stack> {
        self.stacks.get(id)
    }

    fn get_mut(&mut self, id: &StackId) -> Option<&mut Stack> {
        self.stacks.get_mut(id)
    }

    fn iter(&self) -> impl Iterator<Item = &Stack> {
        self.order.iter().filter_map(|id| self.stacks.get(id))
    }

    fn find_by_name(&self, name: &str) -> Option<&Stack> {
        self.iter().find(|stack| stack.name() == name)
    }

    fn ids_named(&self, name: &str) -> Vec<StackId> {
        self.iter()
            .filter(|stack| stack.name() == name)
            .map(|stack| stack.id().clone())
            .collect()
    }

    fn len(&self) -> usize {
        self.order.len()
    }
}

/// Which index a key resolved into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Active,
    Deleted,
}

/// Stack registry for one region
pub struct Backend {
    region: String,
    account_id: String,
    resolver: Arc<dyn ResourceResolver>,
    active: StackIndex,
    deleted: StackIndex,
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backend")
            .field("region", &self.region)
            .field("account_id", &self.account_id)
            .field("active", &self.active.len())
            .field("deleted", &self.deleted.len())
            .finish()
    }
}

impl Backend {
    /// Create an empty registry for `region`
    pub fn new(
        region: impl Into<String>,
        account_id: impl Into<String>,
        resolver: Arc<dyn ResourceResolver>,
    ) -> Self {
        Self {
            region: region.into(),
            account_id: account_id.into(),
            resolver,
            active: StackIndex::default(),
            deleted: StackIndex::default(),
        }
    }

    /// Region this registry serves
    pub fn region(&self) -> &str {
        &self.region
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Create and register a stack.
    ///
    /// The id is unique across both indexes. If the creation sequence fails
    /// nothing is registered and the error is returned unchanged.
    pub fn create_stack(&mut self, request: CreateStack) -> Result<&Stack> {
        let id = self.fresh_id(&request.name);
        let stack = Stack::create(id, self.region.clone(), request, self.resolver.as_ref())?;
        info!(
            stack_id = %stack.id(),
            stack_name = stack.name(),
            region = %self.region,
            "stack registered"
        );
        Ok(&*self.active.insert(stack))
    }

    /// Describe one stack or all active stacks.
    ///
    /// With a key, active stacks are searched by name or id (first match),
    /// then deleted stacks by id only.
    ///
    /// # Errors
    ///
    /// [`StackError::Validation`] carrying `key` if nothing matches.
    pub fn describe_stacks(&self, key: Option<&str>) -> Result<Vec<&Stack>> {
        let Some(key) = key else {
            return Ok(self.active.iter().collect());
        };
        if let Some(stack) = self
            .active
            .iter()
            .find(|stack| stack.name() == key || stack.id().as_str() == key)
        {
            return Ok(vec![stack]);
        }
        if let Some(stack) = self.deleted.get(&StackId::from_raw(key)) {
            return Ok(vec![stack]);
        }
        debug!(key, "describe matched no stack");
        Err(StackError::Validation {
            key: key.to_string(),
        })
    }

    /// All active stacks in creation order
    pub fn list_stacks(&self) -> Vec<&Stack> {
        self.active.iter().collect()
    }

    /// All deleted stacks in deletion order
    pub fn list_deleted_stacks(&self) -> Vec<&Stack> {
        self.deleted.iter().collect()
    }

    /// Look up a stack without failing.
    ///
    /// An exact id match in either index wins; otherwise the first active
    /// stack with that name.
    pub fn get_stack(&self, key: &str) -> Option<&Stack> {
        let (slot, id) = self.locate(key)?;
        match slot {
            Slot::Active => self.active.get(&id),
            Slot::Deleted => self.deleted.get(&id),
        }
    }

    /// Apply a new template to the stack `key` resolves to.
    ///
    /// # Errors
    ///
    /// - [`StackError::NotFound`] if `key` resolves to nothing
    /// - [`StackError::InvalidState`] if the stack was deleted
    /// - parser/resolver errors from the update itself
    pub fn update_stack(&mut self, key: &str, request: UpdateStack) -> Result<&Stack> {
        let resolver = Arc::clone(&self.resolver);
        let stack = self.resolve_mut(key).ok_or_else(|| not_found(key))?;
        stack.update(request, resolver.as_ref())?;
        Ok(&*stack)
    }

    /// Delete by id, or every active stack with the given name.
    ///
    /// An unknown key is a no-op. Deleted stacks move to the deleted index.
    /// If teardown fails the stack stays active and the error is returned.
    ///
    /// Namesakes are deleted in creation order and the first teardown error
    /// stops the sweep: earlier namesakes stay deleted, the failing one is
    /// left `DELETE_FAILED` and later ones are untouched.
    pub fn delete_stack(&mut self, key: &str) -> Result<()> {
        let id = StackId::from_raw(key);
        if self.active.contains(&id) {
            return self.delete_active(&id);
        }
        let ids = self.active.ids_named(key);
        if ids.is_empty() {
            debug!(key, "delete matched no active stack");
        }
        for id in ids {
            self.delete_active(&id)?;
        }
        Ok(())
    }

    /// Resources of the stack `key` resolves to
    pub fn list_stack_resources(&self, key: &str) -> Result<Vec<&ResolvedResource>> {
        let stack = self.get_stack(key).ok_or_else(|| not_found(key))?;
        Ok(stack.stack_resources())
    }

    /// Event history of the stack `key` resolves to
    pub fn describe_stack_events(&self, key: &str) -> Result<&[StackEvent]> {
        let stack = self.get_stack(key).ok_or_else(|| not_found(key))?;
        Ok(stack.events())
    }

    /// Raw template text of the stack `key` resolves to
    pub fn get_template(&self, key: &str) -> Result<&str> {
        let stack = self.get_stack(key).ok_or_else(|| not_found(key))?;
        Ok(stack.template())
    }

    /// Record a resource-scoped event on the stack `key` resolves to.
    ///
    /// The stack's status is unchanged.
    ///
    /// # Errors
    ///
    /// - [`StackError::NotFound`] if `key` or `logical_id` resolves to nothing
    /// - [`StackError::InvalidState`] if the stack was deleted
    pub fn add_resource_event(
        &mut self,
        key: &str,
        logical_id: &str,
        status: StackStatus,
        reason: Option<&str>,
        properties: Option<serde_json::Value>,
    ) -> Result<&StackEvent> {
        let stack = self.resolve_mut(key).ok_or_else(|| not_found(key))?;
        stack.add_resource_event(logical_id, status, reason, properties)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn locate(&self, key: &str) -> Option<(Slot, StackId)> {
        let id = StackId::from_raw(key);
        if self.active.contains(&id) {
            return Some((Slot::Active, id));
        }
        if self.deleted.contains(&id) {
            return Some((Slot::Deleted, id));
        }
        self.active
            .find_by_name(key)
            .map(|stack| (Slot::Active, stack.id().clone()))
    }

    fn resolve_mut(&mut self, key: &str) -> Option<&mut Stack> {
        let (slot, id) = self.locate(key)?;
        match slot {
            Slot::Active => self.active.get_mut(&id),
            Slot::Deleted => self.deleted.get_mut(&id),
        }
    }

    fn fresh_id(&self, name: &str) -> StackId {
        loop {
            let id = StackId::generate(&self.region, &self.account_id, name);
            if !self.active.contains(&id) && !self.deleted.contains(&id) {
                return id;
            }
        }
    }

    fn delete_active(&mut self, id: &StackId) -> Result<()> {
        let Some(stack) = self.active.get_mut(id) else {
            return Ok(());
        };
        stack.delete(self.resolver.as_ref())?;
        if let Some(stack) = self.active.remove(id) {
            info!(stack_id = %id, stack_name = stack.name(), "stack moved to deleted index");
            self.deleted.insert(stack);
        }
        Ok(())
    }
}

fn not_found(key: &str) -> StackError {
    StackError::NotFound {
        key: key.to_string(),
    }
}
