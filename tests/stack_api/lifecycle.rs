//! Lifecycle Tests
//!
//! Create, update and delete transitions and the events they append.

use crate::*;
use stratus::{ResourceState, STACK_RESOURCE_TYPE, USER_INITIATED};

fn statuses(stack: &StackDescriptor) -> Vec<StackStatus> {
    stack.events.iter().map(|e| e.status).collect()
}

// =============================================================================
// Create
// =============================================================================

#[test]
fn create_empty_stack() {
    with_stacks(|stacks| {
        let stack = stacks.create(CreateStack::new("web", EMPTY)).unwrap();

        assert_eq!(stack.status, StackStatus::CreateComplete);
        assert_eq!(stack.events.len(), 2);
        assert!(stack.parameters.is_empty());
        assert!(stack.resources.is_empty());
        assert!(stack.outputs.is_empty());
        assert_eq!(stack.stack_name, "web");
        assert_eq!(stack.region, REGION);
    });
}

#[test]
fn create_events_describe_the_stack() {
    with_stacks(|stacks| {
        let stack = stacks.create(CreateStack::new("web", EMPTY)).unwrap();

        assert_eq!(
            statuses(&stack),
            vec![StackStatus::CreateInProgress, StackStatus::CreateComplete]
        );
        for event in &stack.events {
            assert_eq!(event.stack_id, stack.stack_id);
            assert_eq!(event.stack_name, "web");
            assert_eq!(event.logical_resource_id, "web");
            assert_eq!(event.physical_resource_id, stack.stack_id.as_str());
            assert_eq!(event.resource_type, STACK_RESOURCE_TYPE);
        }
        assert_eq!(stack.events[0].status_reason.as_deref(), Some(USER_INITIATED));
        assert_eq!(stack.events[1].status_reason, None);
        assert_ne!(stack.events[0].event_id, stack.events[1].event_id);
    });
}

#[test]
fn create_with_resources_and_outputs() {
    with_stacks(|stacks| {
        let stack = stacks.create(CreateStack::new("jobs", QUEUE)).unwrap();

        assert_eq!(stack.description.as_deref(), Some("queue stack"));
        assert_eq!(stack.parameters.get("Env").map(String::as_str), Some("dev"));
        assert_eq!(stack.resources.len(), 1);
        let queue = &stack.resources[0];
        assert_eq!(queue.logical_id, "Queue");
        assert_eq!(queue.state, ResourceState::Created);
        assert!(queue.physical_id.starts_with("jobs-Queue-"));
        assert_eq!(stack.outputs[0].value, queue.physical_id);

        let listed = stacks.list_resources("jobs").unwrap();
        assert_eq!(listed, stack.resources);
    });
}

#[test]
fn create_keeps_pass_through_fields() {
    with_stacks(|stacks| {
        let mut tags = Tags::new();
        tags.insert("team".into(), "infra".into());
        let request = CreateStack::new("web", EMPTY)
            .tags(tags.clone())
            .notification_arns(vec!["arn:aws:sns:us-east-1:123456789012:topic".into()])
            .role_arn("arn:aws:iam::123456789012:role/deployer");

        let stack = stacks.create(request).unwrap();
        assert_eq!(stack.tags, tags);
        assert_eq!(stack.notification_arns.len(), 1);
        assert_eq!(
            stack.role_arn.as_deref(),
            Some("arn:aws:iam::123456789012:role/deployer")
        );
    });
}

#[test]
fn create_yaml_template() {
    with_stacks(|stacks| {
        let yaml = "Resources:\n  Bucket:\n    Type: AWS::S3::Bucket\n";
        let stack = stacks.create(CreateStack::new("web", yaml)).unwrap();
        assert_eq!(stack.template, yaml);
        assert_eq!(stack.resources.len(), 1);
        assert_eq!(stacks.template("web").unwrap(), yaml);
    });
}

// =============================================================================
// Update
// =============================================================================

#[test]
fn update_appends_two_events_and_keeps_identity() {
    with_stacks(|stacks| {
        let created = stacks.create(CreateStack::new("web", EMPTY)).unwrap();
        let updated = stacks.update("web", UpdateStack::new(QUEUE)).unwrap();

        assert_eq!(updated.stack_id, created.stack_id);
        assert_eq!(updated.stack_name, created.stack_name);
        assert_eq!(updated.template, QUEUE);
        assert_eq!(updated.status, StackStatus::UpdateComplete);
        assert_eq!(updated.events.len(), 4);
        assert_eq!(&updated.events[..2], &created.events[..]);
        assert_eq!(
            statuses(&updated)[2..],
            [StackStatus::UpdateInProgress, StackStatus::UpdateComplete]
        );
        assert_eq!(updated.events[2].status_reason.as_deref(), Some(USER_INITIATED));
        assert_eq!(updated.resources.len(), 1);
    });
}

#[test]
fn update_by_id() {
    with_stacks(|stacks| {
        let created = stacks.create(CreateStack::new("web", EMPTY)).unwrap();
        let updated = stacks
            .update(created.stack_id.as_str(), UpdateStack::new(QUEUE))
            .unwrap();
        assert_eq!(updated.stack_id, created.stack_id);
    });
}

// =============================================================================
// Delete
// =============================================================================

#[test]
fn delete_appends_two_events() {
    with_stacks(|stacks| {
        let created = stacks.create(CreateStack::new("jobs", QUEUE)).unwrap();
        stacks.delete(created.stack_id.as_str()).unwrap();

        let deleted = stacks.get(created.stack_id.as_str()).unwrap();
        assert_eq!(deleted.status, StackStatus::DeleteComplete);
        assert_eq!(
            statuses(&deleted)[2..],
            [StackStatus::DeleteInProgress, StackStatus::DeleteComplete]
        );
        assert_eq!(deleted.resources.len(), 1);
        assert!(deleted.resources.iter().all(|r| r.state == ResourceState::Deleted));
    });
}

#[test]
fn events_query_matches_descriptor() {
    with_stacks(|stacks| {
        let created = stacks.create(CreateStack::new("web", EMPTY)).unwrap();
        assert_eq!(stacks.events("web").unwrap(), created.events);
        assert!(stacks.events("nope").unwrap_err().is_not_found());
    });
}

#[test]
fn resource_scoped_event() {
    with_stacks(|stacks| {
        let created = stacks.create(CreateStack::new("jobs", QUEUE)).unwrap();

        let event = stacks
            .add_resource_event(
                "jobs",
                "Queue",
                StackStatus::UpdateInProgress,
                Some("drift"),
                Some(serde_json::json!({"QueueName": "jobs"})),
            )
            .unwrap();
        assert_eq!(event.resource_type, "AWS::SQS::Queue");
        assert_eq!(event.physical_resource_id, created.resources[0].physical_id);
        assert!(!event.is_stack_event());

        let stack = stacks.get("jobs").unwrap();
        assert_eq!(stack.events.len(), 3);
        assert_eq!(stack.events[2], event);
        assert_eq!(stack.status, StackStatus::CreateComplete);

        let err = stacks
            .add_resource_event("jobs", "Missing", StackStatus::UpdateInProgress, None, None)
            .unwrap_err();
        assert!(err.is_not_found());
    });
}

#[test]
fn descriptor_serializes_with_wire_statuses() {
    with_stacks(|stacks| {
        let stack = stacks.create(CreateStack::new("jobs", QUEUE)).unwrap();
        let json = serde_json::to_value(&stack).unwrap();

        assert_eq!(json["stack_name"], "jobs");
        assert_eq!(json["status"], "CREATE_COMPLETE");
        assert_eq!(json["events"][0]["status"], "CREATE_IN_PROGRESS");
        assert_eq!(json["resources"][0]["state"], "CREATED");
        assert_eq!(json["stack_id"], stack.stack_id.as_str());
    });
}
