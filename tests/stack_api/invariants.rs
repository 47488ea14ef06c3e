//! Invariant Tests
//!
//! Random operation sequences against one region, checking after every step:
//! - status equals the last stack-scoped event's status
//! - event logs only grow, and existing entries never change
//! - active and deleted stacks are disjoint; deleted stacks are terminal
//! - describe(None) follows creation order

use crate::*;
use proptest::prelude::*;
use std::collections::HashMap;
use stratus::StackEvent;

#[derive(Debug, Clone)]
enum Op {
    Create(usize),
    Update(usize),
    Delete(usize),
    DeleteById(usize),
}

const NAMES: [&str; 3] = ["web", "api", "db"];

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..NAMES.len()).prop_map(Op::Create),
        (0..NAMES.len()).prop_map(Op::Update),
        (0..NAMES.len()).prop_map(Op::Delete),
        (0..8usize).prop_map(Op::DeleteById),
    ]
}

fn apply(stacks: &Stacks<'_>, created: &[StackId], op: &Op) -> Option<StackId> {
    match op {
        Op::Create(n) => {
            let template = if n % 2 == 0 { EMPTY } else { QUEUE };
            let stack = stacks.create(CreateStack::new(NAMES[*n], template)).unwrap();
            Some(stack.stack_id)
        }
        Op::Update(n) => {
            // Missing or deleted targets are expected failures here.
            let _ = stacks.update(NAMES[*n], UpdateStack::new(QUEUE));
            None
        }
        Op::Delete(n) => {
            stacks.delete(NAMES[*n]).unwrap();
            None
        }
        Op::DeleteById(i) => {
            if let Some(id) = created.get(*i) {
                stacks.delete(id.as_str()).unwrap();
            }
            None
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_registry_invariants(ops in prop::collection::vec(op(), 1..30)) {
        let sim = sim();
        let stacks = sim.stacks(REGION).unwrap();
        let mut created: Vec<StackId> = Vec::new();
        let mut history: HashMap<StackId, Vec<StackEvent>> = HashMap::new();

        for op in &ops {
            if let Some(id) = apply(&stacks, &created, op) {
                created.push(id);
            }

            let active = stacks.list();
            let active_ids: Vec<StackId> = active.iter().map(|s| s.stack_id.clone()).collect();

            // Creation order among survivors.
            let expected: Vec<StackId> = created
                .iter()
                .filter(|id| active_ids.contains(id))
                .cloned()
                .collect();
            prop_assert_eq!(&active_ids, &expected);

            for id in &created {
                let stack = stacks.get(id.as_str()).unwrap();

                let last = stack.events.iter().rev().find(|e| e.is_stack_event()).unwrap();
                prop_assert_eq!(last.status, stack.status);

                let is_active = active_ids.contains(id);
                prop_assert_eq!(stack.status == StackStatus::DeleteComplete, !is_active);

                let previous = history.entry(id.clone()).or_default();
                prop_assert!(stack.events.len() >= previous.len());
                prop_assert_eq!(&stack.events[..previous.len()], &previous[..]);
                for pair in stack.events.windows(2) {
                    prop_assert!(pair[0].timestamp <= pair[1].timestamp);
                }
                *previous = stack.events.clone();
            }
        }
    }
}
