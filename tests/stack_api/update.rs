//! Update Tests
//!
//! Semantics of the optional update arguments:
//! - role_arn always overwrites, so omitting it clears it
//! - tags and parameters are replaced only when supplied

use crate::*;
use stratus::ResourceState;

fn tags(pairs: &[(&str, &str)]) -> Tags {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn omitted_tags_are_kept() {
    with_stacks(|stacks| {
        let original = tags(&[("team", "infra")]);
        stacks
            .create(CreateStack::new("web", EMPTY).tags(original.clone()))
            .unwrap();

        let updated = stacks.update("web", UpdateStack::new(EMPTY)).unwrap();
        assert_eq!(updated.tags, original);
    });
}

#[test]
fn supplied_tags_replace() {
    with_stacks(|stacks| {
        stacks
            .create(CreateStack::new("web", EMPTY).tags(tags(&[("team", "infra")])))
            .unwrap();

        let replacement = tags(&[("owner", "ops")]);
        let updated = stacks
            .update("web", UpdateStack::new(EMPTY).tags(replacement.clone()))
            .unwrap();
        assert_eq!(updated.tags, replacement);

        let cleared = stacks
            .update("web", UpdateStack::new(EMPTY).tags(Tags::new()))
            .unwrap();
        assert!(cleared.tags.is_empty());
    });
}

#[test]
fn role_arn_always_overwrites() {
    with_stacks(|stacks| {
        stacks
            .create(CreateStack::new("web", EMPTY).role_arn("arn:aws:iam::123456789012:role/a"))
            .unwrap();

        let updated = stacks
            .update(
                "web",
                UpdateStack::new(EMPTY).role_arn("arn:aws:iam::123456789012:role/b"),
            )
            .unwrap();
        assert_eq!(
            updated.role_arn.as_deref(),
            Some("arn:aws:iam::123456789012:role/b")
        );

        let cleared = stacks.update("web", UpdateStack::new(EMPTY)).unwrap();
        assert_eq!(cleared.role_arn, None);
    });
}

#[test]
fn parameters_kept_or_replaced() {
    with_stacks(|stacks| {
        let mut prod = Parameters::new();
        prod.insert("Env".into(), "prod".into());
        let created = stacks
            .create(CreateStack::new("jobs", QUEUE).parameters(prod))
            .unwrap();
        assert_eq!(created.parameters.get("Env").map(String::as_str), Some("prod"));

        let kept = stacks.update("jobs", UpdateStack::new(QUEUE)).unwrap();
        assert_eq!(kept.parameters.get("Env").map(String::as_str), Some("prod"));

        let reset = stacks
            .update("jobs", UpdateStack::new(QUEUE).parameters(Parameters::new()))
            .unwrap();
        assert_eq!(reset.parameters.get("Env").map(String::as_str), Some("dev"));
    });
}

#[test]
fn update_keeps_physical_ids_of_unchanged_resources() {
    with_stacks(|stacks| {
        let created = stacks.create(CreateStack::new("jobs", QUEUE)).unwrap();
        let updated = stacks.update("jobs", UpdateStack::new(QUEUE)).unwrap();

        assert_eq!(updated.resources[0].physical_id, created.resources[0].physical_id);
        assert_eq!(updated.resources[0].state, ResourceState::Updated);
        assert_eq!(updated.outputs, created.outputs);
    });
}

#[test]
fn update_drops_removed_resources() {
    with_stacks(|stacks| {
        stacks.create(CreateStack::new("jobs", QUEUE)).unwrap();
        let updated = stacks.update("jobs", UpdateStack::new(EMPTY)).unwrap();

        assert!(updated.resources.is_empty());
        assert!(updated.outputs.is_empty());
        assert_eq!(updated.description, None);
    });
}

#[test]
fn update_unknown_stack() {
    with_stacks(|stacks| {
        let err = stacks.update("ghost", UpdateStack::new(EMPTY)).unwrap_err();
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    });
}

#[test]
fn update_first_namesake_only() {
    with_stacks(|stacks| {
        let first = stacks.create(CreateStack::new("web", EMPTY)).unwrap();
        let second = stacks.create(CreateStack::new("web", EMPTY)).unwrap();

        let updated = stacks.update("web", UpdateStack::new(QUEUE)).unwrap();
        assert_eq!(updated.stack_id, first.stack_id);

        let untouched = stacks.get(second.stack_id.as_str()).unwrap();
        assert_eq!(untouched.status, StackStatus::CreateComplete);
        assert_eq!(untouched.template, EMPTY);
    });
}
