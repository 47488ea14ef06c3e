//! Concurrency Tests
//!
//! Clones of [`Stratus`] share one region table. Each region serialises its
//! own operations; different regions do not contend.

use crate::*;
use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn concurrent_creates_in_one_region() {
    let sim = sim();
    let threads = 8;
    let per_thread = 25;
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let sim = sim.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let stacks = sim.stacks(REGION).unwrap();
                (0..per_thread)
                    .map(|i| {
                        stacks
                            .create(CreateStack::new(format!("s-{}-{}", t, i), EMPTY))
                            .unwrap()
                            .stack_id
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        for id in handle.join().unwrap() {
            assert!(ids.insert(id), "stack ids must be unique");
        }
    }

    let listed = sim.stacks(REGION).unwrap().list();
    assert_eq!(listed.len(), threads * per_thread);
    assert!(listed.iter().all(|s| s.events.len() == 2));
}

#[test]
fn concurrent_create_and_delete_same_name() {
    let sim = sim();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let sim = sim.clone();
            thread::spawn(move || {
                let stacks = sim.stacks(REGION).unwrap();
                for _ in 0..20 {
                    stacks.create(CreateStack::new("web", EMPTY)).unwrap();
                    stacks.delete("web").unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let stacks = sim.stacks(REGION).unwrap();
    assert!(stacks.list().is_empty());
    stacks.with_backend(|backend| {
        let deleted = backend.list_deleted_stacks();
        assert_eq!(deleted.len(), 80);
        assert!(deleted
            .iter()
            .all(|s| s.status() == StackStatus::DeleteComplete && s.events().len() == 4));
    });
}

#[test]
fn regions_progress_independently() {
    let sim = sim();
    let regions: Vec<String> = sim.region_names().into_iter().take(4).collect();

    let handles: Vec<_> = regions
        .iter()
        .cloned()
        .map(|region| {
            let sim = sim.clone();
            thread::spawn(move || {
                let stacks = sim.stacks(&region).unwrap();
                for i in 0..10 {
                    stacks
                        .create(CreateStack::new(format!("{}-{}", region, i), EMPTY))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    for region in &regions {
        let stacks = sim.stacks(region).unwrap();
        let listed = stacks.list();
        assert_eq!(listed.len(), 10);
        assert!(listed.iter().all(|s| &s.region == region));
    }
}

#[test]
fn descriptors_are_sendable() {
    fn assert_send<T: Send + Sync + 'static>() {}
    assert_send::<StackDescriptor>();
    assert_send::<Stratus>();
}
