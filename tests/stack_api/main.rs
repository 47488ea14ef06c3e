//! Stack API Comprehensive Test Suite
//!
//! Tests organized by functionality:
//! - lifecycle: create/update/delete transitions and the event log
//! - describe: describe, list and get lookup rules
//! - delete: relocation into the deleted index, name fan-out, no-op deletes
//! - update: tag/role/parameter semantics
//! - failures: parse and resolver errors, FAILED states, terminal deletes
//! - regions: region table, config and builder
//! - concurrency: shared access across threads
//! - invariants: properties that must hold after any operation sequence

mod concurrency;
mod invariants;
mod lifecycle;
mod update;

use stratus::prelude::*;

pub const EMPTY: &str = r#"{"Resources":{}}"#;

pub const QUEUE: &str = r#"{
    "Description": "queue stack",
    "Parameters": {"Env": {"Type": "String", "Default": "dev"}},
    "Resources": {"Queue": {"Type": "AWS::SQS::Queue", "Properties": {"QueueName": "jobs"}}},
    "Outputs": {"QueueUrl": {"Value": {"Ref": "Queue"}}}
}"#;

pub const REGION: &str = "us-east-1";

/// Fresh simulator with default settings and test logging.
pub fn sim() -> Stratus {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
    Stratus::open().unwrap()
}

/// Run `f` against the default test region.
pub fn with_stacks<R>(f: impl FnOnce(&Stacks<'_>) -> R) -> R {
    let sim = sim();
    let stacks = sim.stacks(REGION).unwrap();
    f(&stacks)
}
