/*!
 * Property Tests
 * Run-loop invariants over generated workloads
 */

use proptest::prelude::*;
use timeslice_vm::cpu::{Instruction, Opcode};
use timeslice_vm::{
    assemble, disassemble, Cycles, Pid, ProcessManager, ProcessState, RunOutcome,
    SchedulingPolicy, Word,
};

fn policy() -> impl Strategy<Value = SchedulingPolicy> {
    prop::sample::select(SchedulingPolicy::ALL.to_vec())
}

/// Raw images: mostly valid opcodes, some unknown cells, loops allowed
fn program() -> impl Strategy<Value = Vec<Word>> {
    prop::collection::vec(0..=12i64, 1..24)
}

/// Run one cycle. Returns the PID that executed it and whether any other
/// live process was waiting for the CPU at the time.
fn step_one(pm: &mut ProcessManager) -> (Option<Pid>, bool) {
    let before: Vec<(Pid, Cycles, ProcessState)> = pm
        .processes()
        .map(|p| (p.pid(), p.total_cycles(), p.state()))
        .collect();

    pm.run(1, false);

    let stepped = before
        .iter()
        .find(|(pid, cycles, _)| pm.process(*pid).map(|p| p.total_cycles()) > Some(*cycles))
        .map(|(pid, _, _)| *pid);
    let others_waiting = before
        .iter()
        .any(|(pid, _, state)| Some(*pid) != stepped && *state != ProcessState::Terminated);
    (stepped, others_waiting)
}

fn halting(len: usize) -> Vec<Word> {
    let mut program = vec![Opcode::Mov.word(); len];
    program.push(Opcode::Halt.word());
    program
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn run_respects_budget_and_accounting(
        programs in prop::collection::vec(program(), 1..5),
        policy in policy(),
        time_slice in 1u64..5,
        max_cycles in 0u64..300,
    ) {
        let mut pm = ProcessManager::builder()
            .with_policy(policy)
            .with_time_slice(time_slice)
            .with_memory_size(64)
            .build();
        for (i, program) in programs.into_iter().enumerate() {
            pm.create_process(program, &format!("p{}", i)).unwrap();
        }

        let summary = pm.run(max_cycles, false);

        prop_assert!(summary.cycles <= max_cycles);
        let per_process: u64 = pm.processes().map(|p| p.total_cycles()).sum();
        prop_assert_eq!(pm.clock(), per_process);

        let running = pm
            .processes()
            .filter(|p| p.state() == ProcessState::Running)
            .count();
        prop_assert!(running <= 1);

        match summary.outcome {
            RunOutcome::Completed => {
                prop_assert!(pm.processes().all(|p| p.state() == ProcessState::Terminated));
            }
            RunOutcome::CycleBudgetExhausted => {
                prop_assert_eq!(summary.cycles, max_cycles);
                prop_assert_eq!(running, 1);
            }
            RunOutcome::NoProcesses => prop_assert!(false, "processes were submitted"),
        }
    }

    #[test]
    fn round_robin_rotates_full_slices(
        count in 2usize..5,
        time_slice in 1u64..6,
        rounds in 1u64..4,
    ) {
        let mut pm = ProcessManager::builder()
            .with_policy(SchedulingPolicy::RoundRobin)
            .with_time_slice(time_slice)
            .build();
        let pids: Vec<_> = (0..count)
            .map(|i| {
                let name = format!("spin{}", i);
                pm.create_process(assemble("top:\nJMP top"), &name).unwrap()
            })
            .collect();

        let mut trace = Vec::new();
        for _ in 0..(count as u64 * time_slice * rounds) {
            let (pid, _) = step_one(&mut pm);
            trace.push(pid);
        }

        // Every process gets exactly `rounds` slices
        for pid in &pids {
            prop_assert_eq!(pm.process(*pid).unwrap().total_cycles(), time_slice * rounds);
        }
        prop_assert_eq!(pm.scheduler().stats().preemptions, count as u64 * rounds);
        prop_assert!(trace.iter().all(Option::is_some));

        // Consecutive steps by one process never exceed the slice
        let longest = trace
            .chunk_by(|a, b| a == b)
            .map(|streak| streak.len() as u64)
            .max()
            .unwrap_or(0);
        prop_assert_eq!(longest, time_slice);
    }

    #[test]
    fn round_robin_slice_bound_while_others_wait(
        programs in prop::collection::vec(program(), 2..5),
        time_slice in 1u64..5,
        steps in 1usize..200,
    ) {
        let mut pm = ProcessManager::builder()
            .with_policy(SchedulingPolicy::RoundRobin)
            .with_time_slice(time_slice)
            .with_memory_size(64)
            .build();
        for (i, program) in programs.into_iter().enumerate() {
            pm.create_process(program, &format!("p{}", i)).unwrap();
        }

        let mut streak = (None, 0u64);
        for _ in 0..steps {
            let (pid, others_waiting) = step_one(&mut pm);
            let Some(pid) = pid else { break };
            streak = match streak {
                (Some(prev), n) if prev == pid && others_waiting => (Some(pid), n + 1),
                _ if others_waiting => (Some(pid), 1),
                _ => (Some(pid), 0),
            };
            prop_assert!(
                streak.1 <= time_slice,
                "pid {} ran {} consecutive cycles with others waiting (slice {})",
                pid,
                streak.1,
                time_slice
            );
        }
    }

    #[test]
    fn sjf_completes_in_length_order(lens in prop::collection::vec(0usize..30, 1..6)) {
        let mut pm = ProcessManager::new("SJF");
        let pids: Vec<_> = lens
            .iter()
            .map(|&len| pm.create_process(halting(len), "job").unwrap())
            .collect();

        pm.run(10_000, false);

        let mut expected: Vec<(usize, _)> = lens.iter().copied().zip(pids).collect();
        expected.sort_by_key(|(len, _)| *len);
        let expected: Vec<_> = expected.into_iter().map(|(_, pid)| pid).collect();
        prop_assert_eq!(pm.scheduler().terminated(), expected.as_slice());
    }

    #[test]
    fn priority_completes_highest_first(prios in prop::collection::vec(-5i32..5, 1..6)) {
        let mut pm = ProcessManager::new("PRIORITY");
        let pids: Vec<_> = prios
            .iter()
            .map(|&p| pm.create_process_with_priority(halting(2), "job", p).unwrap())
            .collect();

        pm.run(10_000, false);

        let mut expected: Vec<(i32, _)> = prios.iter().copied().zip(pids).collect();
        expected.sort_by_key(|(p, _)| std::cmp::Reverse(*p));
        let expected: Vec<_> = expected.into_iter().map(|(_, pid)| pid).collect();
        prop_assert_eq!(pm.scheduler().terminated(), expected.as_slice());
    }

    #[test]
    fn assemble_disassemble_round_trip(
        body in prop::collection::vec(
            (prop::sample::select(Opcode::ALL.to_vec()), -1000i64..1000),
            0..20,
        )
    ) {
        let mut source = String::new();
        let mut expected = Vec::new();
        for (opcode, operand) in &body {
            let instruction = Instruction::decode(*opcode, Some(*operand));
            source.push_str(&instruction.to_string());
            source.push('\n');
            expected.push(instruction.to_string());
        }

        let listing: Vec<String> = disassemble(&assemble(&source))
            .into_iter()
            .map(|line| line.text)
            .collect();
        prop_assert_eq!(listing, expected);
    }
}
