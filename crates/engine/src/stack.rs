//! Stack lifecycle state machine
//!
//! A [`Stack`] owns its template, parameters, tags and event log, and holds
//! the resource and output maps produced by a [`ResourceResolver`]. It is the
//! only writer of its own status.
//!
//! ## Transitions
//!
//! ```text
//! create: CREATE_IN_PROGRESS -> parse -> resources -> outputs -> CREATE_COMPLETE
//! update: parse -> UPDATE_IN_PROGRESS -> resources -> outputs -> UPDATE_COMPLETE
//!                                     \-> UPDATE_FAILED (previous state restored)
//! delete: DELETE_IN_PROGRESS -> teardown -> DELETE_COMPLETE
//!                                       \-> DELETE_FAILED (resources untouched)
//! ```
//!
//! Creation is all-or-nothing: if parsing or resolution fails no `Stack` is
//! returned. Status always equals the status of the last stack-scoped event.

use crate::error::{Result, StackError};
use stratus_core::{
    EventDraft, EventLog, Parameters, StackEvent, StackId, StackStatus, Tags,
    STACK_RESOURCE_TYPE, USER_INITIATED,
};
use stratus_template::{
    parse_template, OutputMap, ResolveContext, ResolveError, ResolvedResource, ResourceMap,
    ResourceResolver, TemplateTree,
};
use tracing::{info, warn};

/// Arguments for creating a stack
#[derive(Debug, Clone, Default)]
pub struct CreateStack {
    /// Stack name (not required to be unique)
    pub name: String,
    /// Raw template text
    pub template: String,
    /// Parameter values
    pub parameters: Parameters,
    /// Notification topic ARNs, passed through
    pub notification_arns: Vec<String>,
    /// Stack tags
    pub tags: Tags,
    /// Service role ARN, passed through
    pub role_arn: Option<String>,
}

impl CreateStack {
    /// Start a request with a name and template
    pub fn new(name: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            template: template.into(),
            ..Self::default()
        }
    }

    /// Set parameter values
    pub fn parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = parameters;
        self
    }

    /// Set notification ARNs
    pub fn notification_arns(mut self, arns: Vec<String>) -> Self {
        self.notification_arns = arns;
        self
    }

    /// Set tags
    pub fn tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    /// Set the role ARN
    pub fn role_arn(mut self, role_arn: impl Into<String>) -> Self {
        self.role_arn = Some(role_arn.into());
        self
    }
}

/// Arguments for updating a stack
///
/// `role_arn` always overwrites (so `None` clears it). `parameters` and
/// `tags` are only applied when `Some`; an empty map still counts as supplied.
#[derive(Debug, Clone, Default)]
pub struct UpdateStack {
    /// Replacement template text
    pub template: String,
    /// New role ARN, or `None` to clear
    pub role_arn: Option<String>,
    /// New parameter values, or `None` to keep the current ones
    pub parameters: Option<Parameters>,
    /// New tags, or `None` to keep the current ones
    pub tags: Option<Tags>,
}

impl UpdateStack {
    /// Start a request with the replacement template
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            ..Self::default()
        }
    }

    /// Set the role ARN
    pub fn role_arn(mut self, role_arn: impl Into<String>) -> Self {
        self.role_arn = Some(role_arn.into());
        self
    }

    /// Replace parameter values
    pub fn parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = Some(parameters);
        self
    }

    /// Replace tags
    pub fn tags(mut self, tags: Tags) -> Self {
        self.tags = Some(tags);
        self
    }
}

/// A simulated stack
#[derive(Debug, Clone)]
pub struct Stack {
    id: StackId,
    name: String,
    region: String,
    description: Option<String>,
    template: String,
    template_tree: TemplateTree,
    parameters: Parameters,
    tags: Tags,
    notification_arns: Vec<String>,
    role_arn: Option<String>,
    status: StackStatus,
    events: EventLog,
    resources: ResourceMap,
    outputs: OutputMap,
}

impl Stack {
    /// Run the full creation sequence.
    ///
    /// # Errors
    ///
    /// Returns the parser or resolver error unchanged. Nothing is retained.
    pub(crate) fn create(
        id: StackId,
        region: impl Into<String>,
        request: CreateStack,
        resolver: &dyn ResourceResolver,
    ) -> Result<Self> {
        let region = region.into();
        let mut events = EventLog::new();
        events.append(
            &id,
            &request.name,
            stack_draft(&id, &request.name, StackStatus::CreateInProgress, Some(USER_INITIATED)),
        );

        let built = build_initial(&id, &region, &request, resolver);
        let (template_tree, resources, outputs) = match built {
            Ok(parts) => parts,
            Err(e) => {
                warn!(stack_id = %id, stack_name = %request.name, error = %e, "stack creation rejected");
                return Err(e);
            }
        };

        let mut stack = Stack {
            description: template_tree.description().map(str::to_string),
            id,
            name: request.name,
            region,
            template: request.template,
            template_tree,
            parameters: request.parameters,
            tags: request.tags,
            notification_arns: request.notification_arns,
            role_arn: request.role_arn,
            status: StackStatus::CreateInProgress,
            events,
            resources,
            outputs,
        };
        stack.transition(StackStatus::CreateComplete, None);
        Ok(stack)
    }

    /// Apply a new template.
    ///
    /// The template is parsed before any event is appended, so a parse error
    /// leaves the stack untouched. A resolver error appends `UPDATE_FAILED`
    /// and keeps the previous template, parameters, resources and outputs.
    pub(crate) fn update(
        &mut self,
        request: UpdateStack,
        resolver: &dyn ResourceResolver,
    ) -> Result<()> {
        self.ensure_accepts("update")?;
        let next_tree = parse_template(&request.template)?;

        self.transition(StackStatus::UpdateInProgress, Some(USER_INITIATED));

        let parameters = request
            .parameters
            .unwrap_or_else(|| self.parameters.clone());
        let tags = request.tags.as_ref().unwrap_or(&self.tags);
        let resolved = self.resolve_update(&parameters, tags, &next_tree, resolver);

        match resolved {
            Ok((resources, outputs)) => {
                self.template = request.template;
                self.description = next_tree.description().map(str::to_string);
                self.template_tree = next_tree;
                self.parameters = parameters;
                self.resources = resources;
                self.outputs = outputs;
                self.role_arn = request.role_arn;
                if let Some(tags) = request.tags {
                    self.tags = tags;
                }
                self.transition(StackStatus::UpdateComplete, None);
                Ok(())
            }
            Err(e) => {
                warn!(stack_id = %self.id, error = %e, "update rejected, previous resources kept");
                self.transition(StackStatus::UpdateFailed, Some(&e.to_string()));
                Err(e.into())
            }
        }
    }

    /// Tear down every resource.
    ///
    /// On success the stack is terminal (`DELETE_COMPLETE`) but stays
    /// queryable. A resolver error appends `DELETE_FAILED`.
    pub(crate) fn delete(&mut self, resolver: &dyn ResourceResolver) -> Result<()> {
        self.ensure_accepts("delete")?;
        self.transition(StackStatus::DeleteInProgress, Some(USER_INITIATED));

        let mut resources = self.resources.clone();
        match resolver.delete_resources(&mut resources) {
            Ok(()) => {
                self.resources = resources;
                self.transition(StackStatus::DeleteComplete, None);
                Ok(())
            }
            Err(e) => {
                warn!(stack_id = %self.id, error = %e, "teardown rejected");
                self.transition(StackStatus::DeleteFailed, Some(&e.to_string()));
                Err(e.into())
            }
        }
    }

    /// Record a transition of one resource in this stack.
    ///
    /// Physical id and type come from the resource map. The stack's own
    /// status is not changed. A deleted stack's log is closed.
    pub(crate) fn add_resource_event(
        &mut self,
        logical_id: &str,
        status: StackStatus,
        reason: Option<&str>,
        properties: Option<serde_json::Value>,
    ) -> Result<&StackEvent> {
        if self.status.is_deleted() {
            return Err(self.invalid_state("record a resource event"));
        }
        let Some(resource) = self.resources.get(logical_id) else {
            return Err(StackError::NotFound {
                key: logical_id.to_string(),
            });
        };
        let draft = EventDraft {
            logical_resource_id: logical_id.to_string(),
            physical_resource_id: resource.physical_id.clone(),
            resource_type: resource.resource_type.clone(),
            status,
            status_reason: reason.map(str::to_string),
            resource_properties: properties,
        };
        Ok(self.events.append(&self.id, &self.name, draft))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Stack id
    pub fn id(&self) -> &StackId {
        &self.id
    }

    /// Stack name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Region the stack lives in
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Template `Description`, if any
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Raw text of the most recently applied template
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Structured form of [`template`](Self::template)
    pub fn template_tree(&self) -> &TemplateTree {
        &self.template_tree
    }

    /// Parameter values as supplied by the caller
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Parameter values after template defaults were applied
    pub fn stack_parameters(&self) -> &Parameters {
        self.resources.resolved_parameters()
    }

    /// Stack tags
    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    /// Notification ARNs
    pub fn notification_arns(&self) -> &[String] {
        &self.notification_arns
    }

    /// Role ARN
    pub fn role_arn(&self) -> Option<&str> {
        self.role_arn.as_deref()
    }

    /// Current status
    pub fn status(&self) -> StackStatus {
        self.status
    }

    /// Event history, oldest first
    pub fn events(&self) -> &[StackEvent] {
        self.events.as_slice()
    }

    /// Resolved resources in logical-id order
    pub fn stack_resources(&self) -> Vec<&ResolvedResource> {
        self.resources.values().collect()
    }

    /// Full resource map
    pub fn resource_map(&self) -> &ResourceMap {
        &self.resources
    }

    /// Resolved outputs
    pub fn stack_outputs(&self) -> &OutputMap {
        &self.outputs
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn ensure_accepts(&self, operation: &'static str) -> Result<()> {
        if self.status.accepts_transition() {
            Ok(())
        } else {
            Err(self.invalid_state(operation))
        }
    }

    fn invalid_state(&self, operation: &'static str) -> StackError {
        StackError::InvalidState {
            stack_id: self.id.clone(),
            status: self.status,
            operation,
        }
    }

    fn transition(&mut self, status: StackStatus, reason: Option<&str>) {
        let draft = stack_draft(&self.id, &self.name, status, reason);
        self.events.append(&self.id, &self.name, draft);
        self.status = status;
        info!(stack_id = %self.id, stack_name = %self.name, status = %status, "stack transition");
    }

    fn resolve_update(
        &self,
        parameters: &Parameters,
        tags: &Tags,
        next_tree: &TemplateTree,
        resolver: &dyn ResourceResolver,
    ) -> std::result::Result<(ResourceMap, OutputMap), ResolveError> {
        let ctx = ResolveContext {
            stack_id: &self.id,
            stack_name: &self.name,
            region: &self.region,
            parameters,
            tags,
        };
        let resources =
            resolver.update_resources(&ctx, &self.resources, &self.template_tree, next_tree)?;
        let outputs = resolver.resolve_outputs(&resources, next_tree)?;
        Ok((resources, outputs))
    }
}

fn build_initial(
    id: &StackId,
    region: &str,
    request: &CreateStack,
    resolver: &dyn ResourceResolver,
) -> Result<(TemplateTree, ResourceMap, OutputMap)> {
    let tree = parse_template(&request.template)?;
    let ctx = ResolveContext {
        stack_id: id,
        stack_name: &request.name,
        region,
        parameters: &request.parameters,
        tags: &request.tags,
    };
    let resources = resolver.create_resources(&ctx, &tree)?;
    let outputs = resolver.resolve_outputs(&resources, &tree)?;
    Ok((tree, resources, outputs))
}

fn stack_draft(id: &StackId, name: &str, status: StackStatus, reason: Option<&str>) -> EventDraft {
    EventDraft {
        logical_resource_id: name.to_string(),
        physical_resource_id: id.to_string(),
        resource_type: STACK_RESOURCE_TYPE.to_string(),
        status,
        status_reason: reason.map(str::to_string),
        resource_properties: None,
    }
}
