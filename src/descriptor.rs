//! Owned stack snapshots returned by the facade.

use serde::Serialize;
use stratus_core::{Parameters, StackEvent, StackId, StackStatus, Tags};
use stratus_engine::Stack;
use stratus_template::{Output, ResolvedResource};

/// Point-in-time copy of a stack.
///
/// Detached from the registry lock, so it can be held, serialised or sent
/// across threads freely.
#[derive(Debug, Clone, Serialize)]
pub struct StackDescriptor {
    /// Stack id
    pub stack_id: StackId,
    /// Stack name
    pub stack_name: String,
    /// Region the stack lives in
    pub region: String,
    /// Template `Description`
    pub description: Option<String>,
    /// Current status
    pub status: StackStatus,
    /// Resolved parameter values (template defaults applied)
    pub parameters: Parameters,
    /// Stack tags
    pub tags: Tags,
    /// Notification ARNs
    pub notification_arns: Vec<String>,
    /// Role ARN
    pub role_arn: Option<String>,
    /// Event history, oldest first
    pub events: Vec<StackEvent>,
    /// Resolved resources in logical-id order
    pub resources: Vec<ResolvedResource>,
    /// Resolved outputs in key order
    pub outputs: Vec<Output>,
    /// Raw template text as supplied
    pub template: String,
}

impl From<&Stack> for StackDescriptor {
    fn from(stack: &Stack) -> Self {
        Self {
            stack_id: stack.id().clone(),
            stack_name: stack.name().to_string(),
            region: stack.region().to_string(),
            description: stack.description().map(str::to_string),
            status: stack.status(),
            parameters: stack.stack_parameters().clone(),
            tags: stack.tags().clone(),
            notification_arns: stack.notification_arns().to_vec(),
            role_arn: stack.role_arn().map(str::to_string),
            events: stack.events().to_vec(),
            resources: stack.stack_resources().into_iter().cloned().collect(),
            outputs: stack.stack_outputs().values().cloned().collect(),
            template: stack.template().to_string(),
        }
    }
}
