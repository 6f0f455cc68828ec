/*!
 * Process Manager Tests
 * Context switching, preemption, and run-loop termination
 */

use pretty_assertions::assert_eq;
use timeslice_vm::asm::programs;
use timeslice_vm::{
    assemble, OutputRecord, Pid, Priority, ProcessManager, ProcessState, RunOutcome,
    SchedulingPolicy,
};

fn submit(pm: &mut ProcessManager, source: &str, name: &str) -> Pid {
    pm.create_process(assemble(source), name).unwrap()
}

fn submit_with_priority(
    pm: &mut ProcessManager,
    source: &str,
    name: &str,
    priority: Priority,
) -> Pid {
    pm.create_process_with_priority(assemble(source), name, priority).unwrap()
}

fn manager(policy: SchedulingPolicy, time_slice: u64) -> ProcessManager {
    ProcessManager::builder()
        .with_policy(policy)
        .with_time_slice(time_slice)
        .build()
}

#[test]
fn test_sum_runs_to_completion() {
    let mut pm = ProcessManager::new("RR");
    let pid = submit(&mut pm, programs::SUM, "sum");

    let summary = pm.run(1000, false);

    assert_eq!(summary.outcome, RunOutcome::Completed);
    assert_eq!(summary.cycles, 6);
    assert_eq!(pm.clock(), 6);
    assert_eq!(pm.output_of(pid), vec![15]);

    let pcb = pm.process(pid).unwrap();
    assert_eq!(pcb.state(), ProcessState::Terminated);
    assert_eq!(pcb.total_cycles(), 6);
    assert!(pcb.terminated_at().is_some());
    assert_eq!(pm.scheduler().terminated(), &[pid]);
    assert_eq!(pm.running_pid(), None);
}

#[test]
fn test_round_robin_slice_one_interleaves() {
    let mut pm = manager(SchedulingPolicy::RoundRobin, 1);
    // 3 instructions in 4 cells
    let a = submit(&mut pm, "LOAD 7\nPRINT\nHALT", "a");
    // 11 instructions in 14 cells
    let b = submit(
        &mut pm,
        "LOAD 1\nPRINT\nLOAD 2\nPRINT\nLOAD 3\nPRINT\nMOV\nMOV\nMOV\nMOV\nHALT",
        "b",
    );

    let summary = pm.run(1000, false);

    assert_eq!(summary.outcome, RunOutcome::Completed);
    assert_eq!(pm.clock(), 3 + 11);
    assert_eq!(pm.process(a).unwrap().total_cycles(), 3);
    assert_eq!(pm.process(b).unwrap().total_cycles(), 11);

    // a and b alternate until a halts on its third step
    assert_eq!(
        pm.outputs(),
        &[
            OutputRecord { pid: a, value: 7 },
            OutputRecord { pid: b, value: 1 },
            OutputRecord { pid: b, value: 2 },
            OutputRecord { pid: b, value: 3 },
        ]
    );

    let stats = pm.scheduler().stats();
    assert_eq!(stats.context_switches, 6);
    assert_eq!(stats.preemptions, 4);
    assert_eq!(stats.terminated, 2);
}

#[test]
fn test_halt_on_slice_boundary_terminates() {
    let mut pm = manager(SchedulingPolicy::RoundRobin, 2);
    let a = submit(&mut pm, "LOAD 1\nHALT", "a");
    let b = submit(&mut pm, "MOV\nMOV\nMOV\nHALT", "b");

    pm.run(1000, false);

    assert_eq!(pm.process(a).unwrap().state(), ProcessState::Terminated);
    assert_eq!(pm.process(b).unwrap().state(), ProcessState::Terminated);
    assert_eq!(pm.scheduler().terminated(), &[a, b]);
    assert_eq!(pm.clock(), 6);
}

#[test]
fn test_cycle_budget_leaves_process_running() {
    let mut pm = manager(SchedulingPolicy::Fcfs, 10);
    let spinner = submit(&mut pm, "top:\nJMP top", "spinner");

    let summary = pm.run(50, false);

    assert_eq!(summary.outcome, RunOutcome::CycleBudgetExhausted);
    assert_eq!(summary.cycles, 50);
    assert_eq!(pm.process(spinner).unwrap().state(), ProcessState::Running);
    assert_eq!(pm.running_pid(), Some(spinner));

    // A later run resumes the same process
    let summary = pm.run(10, false);
    assert_eq!(summary.cycles, 10);
    assert_eq!(summary.clock, 60);
    assert_eq!(pm.process(spinner).unwrap().total_cycles(), 60);
}

#[test]
fn test_zero_budget_runs_nothing() {
    let mut pm = ProcessManager::new("FCFS");
    let pid = submit(&mut pm, programs::HELLO, "hello");

    let summary = pm.run(0, false);

    assert_eq!(summary.cycles, 0);
    assert_eq!(summary.outcome, RunOutcome::CycleBudgetExhausted);
    assert_eq!(pm.process(pid).unwrap().total_cycles(), 0);
}

#[test]
fn test_no_processes() {
    let mut pm = ProcessManager::default();
    let summary = pm.run(100, true);
    assert_eq!(summary.outcome, RunOutcome::NoProcesses);
    assert_eq!(summary.cycles, 0);
    assert!(summary.recommendation.is_none());
}

#[test]
fn test_fcfs_runs_in_arrival_order() {
    let mut pm = ProcessManager::new("FCFS");
    for name in programs::NAMES {
        pm.create_process(programs::by_name(name).unwrap(), name).unwrap();
    }

    pm.run_to_completion();

    let values: Vec<i64> = pm.outputs().iter().map(|r| r.value).collect();
    assert_eq!(values, vec![5, 15, 20, 72, 105]);
    assert_eq!(pm.scheduler().stats().preemptions, 0);
}

#[test]
fn test_sjf_runs_shortest_first() {
    let mut pm = ProcessManager::new("SJF");
    let long = submit(&mut pm, programs::FIBONACCI, "fib");
    let short = submit(&mut pm, programs::HELLO, "hello");

    pm.run_to_completion();

    assert_eq!(pm.scheduler().terminated(), &[short, long]);
}

#[test]
fn test_priority_runs_highest_first() {
    let mut pm = ProcessManager::new("PRIORITY");
    let low = submit_with_priority(&mut pm, "LOAD 1\nPRINT\nHALT", "low", 10);
    let high = submit_with_priority(&mut pm, "LOAD 2\nPRINT\nHALT", "high", 90);

    pm.run_to_completion();

    assert_eq!(pm.scheduler().terminated(), &[high, low]);
    assert_eq!(pm.outputs()[0], OutputRecord { pid: high, value: 2 });
}

#[test]
fn test_set_priority_before_run() {
    let mut pm = ProcessManager::new("PRIORITY");
    let a = submit(&mut pm, "HALT", "a");
    let b = submit(&mut pm, "HALT", "b");

    pm.set_priority(b, 99).unwrap();
    pm.run_to_completion();

    assert_eq!(pm.scheduler().terminated(), &[b, a]);
    assert_eq!(pm.process(b).unwrap().priority(), 99);
}

#[test]
fn test_context_survives_preemption() {
    // Both processes keep state in ACC across many preemptions
    let mut pm = manager(SchedulingPolicy::RoundRobin, 1);
    let a = submit(&mut pm, "LOAD 3\nMOV\nMOV\nMOV\nPRINT\nHALT", "a");
    let b = submit(&mut pm, "LOAD 4\nMOV\nMOV\nMOV\nPRINT\nHALT", "b");

    pm.run_to_completion();

    assert_eq!(pm.output_of(a), vec![3]);
    assert_eq!(pm.output_of(b), vec![4]);
}

#[test]
fn test_recommendation_is_advisory() {
    let mut pm = ProcessManager::new("FCFS");
    for name in programs::NAMES {
        pm.create_process(programs::by_name(name).unwrap(), name).unwrap();
    }

    let summary = pm.run_to_completion();

    let rec = summary.recommendation.unwrap();
    assert_eq!(rec.policy, SchedulingPolicy::ShortestJobFirst);
    assert_eq!(pm.scheduler().policy(), SchedulingPolicy::Fcfs);
}

#[test]
fn test_process_table_text() {
    let mut pm = ProcessManager::new("RR");
    submit(&mut pm, programs::SUM, "sum");
    pm.run_to_completion();

    let table = pm.get_process_info();
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("PID"));
    assert!(lines[0].contains("CYCLES"));
    assert_eq!(lines[1], "-".repeat(52));
    assert!(lines[2].starts_with("1000"));
    assert!(lines[2].contains("TERMINATED"));
    assert!(lines[2].ends_with('6'));
}

#[test]
fn test_snapshot_serializes() {
    let mut pm = ProcessManager::new("RR");
    submit(&mut pm, programs::MULTIPLY, "multiply");
    pm.run_to_completion();

    let json = serde_json::to_value(pm.snapshot()).unwrap();
    assert_eq!(json["clock"], 6);
    assert_eq!(json["scheduler"]["policy"], "RR");
    assert_eq!(json["processes"][0]["state"], "terminated");
    assert_eq!(json["cpu"]["instructions"]["MUL"], 1);
    assert!(json.get("running").is_none());
}

#[test]
fn test_snapshot_reports_zero_cycles_before_run() {
    let mut pm = ProcessManager::new("FCFS");
    submit(&mut pm, programs::SUM, "sum");

    let json = serde_json::to_value(pm.snapshot()).unwrap();
    assert_eq!(json["processes"][0]["cycles"], 0);
    assert_eq!(json["processes"][0]["state"], "ready");
}

#[test]
fn test_table_in_creation_order_at_pid_ceiling() {
    let mut pm = ProcessManager::builder()
        .with_pid_allocator(timeslice_vm::PidAllocator::new(Pid::MAX - 1))
        .build();
    let first = submit(&mut pm, "HALT", "first");
    let second = submit(&mut pm, "HALT", "second");
    assert!(first < second);
    assert!(pm.create_process(assemble("HALT"), "third").is_err());

    let names: Vec<String> = pm.process_info().into_iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["first", "second"]);
}
