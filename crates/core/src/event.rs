//! Stack events and the append-only event log
//!
//! Every lifecycle transition of a stack, or of a resource inside it, is
//! recorded as a [`StackEvent`]. Events are immutable once appended and the
//! log is never reordered or pruned: insertion order is chronological order.

use crate::status::StackStatus;
use crate::types::{EventId, StackId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Resource type recorded on events that describe the stack itself.
pub const STACK_RESOURCE_TYPE: &str = "AWS::CloudFormation::Stack";

/// Reason recorded on the `*_IN_PROGRESS` event of a caller-driven transition.
pub const USER_INITIATED: &str = "User Initiated";

/// An event in a stack's log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackEvent {
    /// Owning stack
    pub stack_id: StackId,
    /// Owning stack's name
    pub stack_name: String,
    /// Logical id of the subject (the stack name for stack-scoped events)
    pub logical_resource_id: String,
    /// Physical id of the subject (the stack id for stack-scoped events)
    pub physical_resource_id: String,
    /// Type of the subject, [`STACK_RESOURCE_TYPE`] for the stack itself
    pub resource_type: String,
    /// Status entered by this transition
    pub status: StackStatus,
    /// Optional human-readable reason
    pub status_reason: Option<String>,
    /// Optional resource properties snapshot
    pub resource_properties: Option<serde_json::Value>,
    /// When the event was appended
    pub timestamp: DateTime<Utc>,
    /// Unique event id
    pub event_id: EventId,
}

impl StackEvent {
    /// Check if this event describes the stack rather than one of its resources
    pub fn is_stack_event(&self) -> bool {
        self.resource_type == STACK_RESOURCE_TYPE
    }
}

/// Subject and status of an event that has not been appended yet.
///
/// The log fills in stack identity, timestamp and event id on append.
#[derive(Debug, Clone)]
pub struct EventDraft {
    /// Logical id of the subject
    pub logical_resource_id: String,
    /// Physical id of the subject
    pub physical_resource_id: String,
    /// Type of the subject
    pub resource_type: String,
    /// Status entered
    pub status: StackStatus,
    /// Optional reason
    pub status_reason: Option<String>,
    /// Optional properties snapshot
    pub resource_properties: Option<serde_json::Value>,
}

/// Append-only, chronologically ordered event sequence for one stack
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<StackEvent>,
}

impl EventLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Append an event for `stack_id`/`stack_name`.
    ///
    /// Timestamps are clamped so they never go backwards within the log,
    /// even if the wall clock does.
    pub fn append(&mut self, stack_id: &StackId, stack_name: &str, draft: EventDraft) -> &StackEvent {
        let now = Utc::now();
        let timestamp = match self.events.last() {
            Some(last) if last.timestamp > now => last.timestamp,
            _ => now,
        };
        self.events.push(StackEvent {
            stack_id: stack_id.clone(),
            stack_name: stack_name.to_string(),
            logical_resource_id: draft.logical_resource_id,
            physical_resource_id: draft.physical_resource_id,
            resource_type: draft.resource_type,
            status: draft.status,
            status_reason: draft.status_reason,
            resource_properties: draft.resource_properties,
            timestamp,
            event_id: EventId::new(),
        });
        &self.events[self.events.len() - 1]
    }

    /// Most recent event
    pub fn last(&self) -> Option<&StackEvent> {
        self.events.last()
    }

    /// All events, oldest first
    pub fn as_slice(&self) -> &[StackEvent] {
        &self.events
    }

    /// Iterate events, oldest first
    pub fn iter(&self) -> std::slice::Iter<'_, StackEvent> {
        self.events.iter()
    }

    /// Number of events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a StackEvent;
    type IntoIter = std::slice::Iter<'a, StackEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
