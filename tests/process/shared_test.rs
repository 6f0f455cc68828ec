/*!
 * Shared Manager Tests
 * Concurrent submission through the single-writer handle
 */

use pretty_assertions::assert_eq;
use std::collections::HashSet;
use std::thread;
use timeslice_vm::asm::programs;
use timeslice_vm::{ProcessManager, ProcessState, RunOutcome, SharedProcessManager};

#[test]
fn test_concurrent_submission() {
    let shared = SharedProcessManager::new(ProcessManager::new("RR"));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let shared = shared.clone();
            thread::spawn(move || {
                (0..5)
                    .map(|j| {
                        let program = programs::by_name("sum").unwrap();
                        let name = format!("t{}-{}", i, j);
                        shared.create_process(program, &name, 50).unwrap()
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut pids = HashSet::new();
    for handle in handles {
        for pid in handle.join().unwrap() {
            assert!(pids.insert(pid), "duplicate pid {}", pid);
        }
    }
    assert_eq!(pids.len(), 20);

    let summary = shared.run(10_000, false);
    assert_eq!(summary.outcome, RunOutcome::Completed);

    let info = shared.process_info();
    assert_eq!(info.len(), 20);
    assert!(info.iter().all(|p| p.state == ProcessState::Terminated));
    assert_eq!(shared.snapshot().clock, 20 * 6);
}

#[test]
fn test_with_gives_exclusive_access() {
    let shared: SharedProcessManager = ProcessManager::new("FCFS").into();
    let hello = programs::by_name("hello").unwrap();
    let pid = shared.with(|pm| pm.create_process(hello, "hello")).unwrap();

    let reader = shared.clone();
    thread::spawn(move || {
        reader.run(100, false);
    })
    .join()
    .unwrap();

    assert_eq!(shared.with(|pm| pm.output_of(pid)), vec![72, 105]);
}
