/*!
 * Process Management
 * Multiplexes the single CPU among processes: creation, context switches,
 * the preemptive run loop, and status reporting
 */

use super::manager_builder::ProcessManagerBuilder;
use super::pcb::Pcb;
use super::types::{
    ManagerSnapshot, OutputRecord, ProcessInfo, ProcessState, RunOutcome, RunSummary,
};
use crate::core::errors::{ProcessError, ProcessResult};
use crate::core::id::{IdGenerator, PidAllocator};
use crate::core::limits::{
    DEFAULT_MAX_CYCLES, DEFAULT_MEMORY_SIZE, DEFAULT_PRIORITY, DEFAULT_TIME_SLICE,
};
use crate::core::types::{Cycles, Pid, Priority, Word};
use crate::cpu::Cpu;
use crate::monitoring::span_run;
use crate::scheduler::{recommend_policy, Entry, Scheduler, SchedulingPolicy};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::time::SystemTime;
use tracing::{debug, info};

/// Scheduling events go to info when the caller asked for verbose output
macro_rules! sched_event {
    ($verbose:expr, $($arg:tt)+) => {
        if $verbose {
            info!($($arg)+);
        } else {
            debug!($($arg)+);
        }
    };
}

pub struct ProcessManager {
    cpu: Cpu,
    scheduler: Scheduler,
    // PIDs strictly increase (the allocator never wraps), so key order is
    // creation order
    processes: BTreeMap<Pid, Pcb>,
    pids: PidAllocator,
    clock: Cycles,
    outputs: Vec<OutputRecord>,
    verbose: bool,
    max_cycles: Cycles,
}

impl ProcessManager {
    /// Manager over a fresh default-sized CPU. Unrecognized policy tags fall
    /// back to FCFS.
    pub fn new(policy_tag: &str) -> Self {
        Self::from_parts(
            Cpu::new(DEFAULT_MEMORY_SIZE),
            Scheduler::with_time_slice(SchedulingPolicy::from_tag(policy_tag), DEFAULT_TIME_SLICE),
            PidAllocator::default(),
            false,
            DEFAULT_MAX_CYCLES,
        )
    }

    /// Create a builder for constructing a ProcessManager
    pub fn builder() -> ProcessManagerBuilder {
        ProcessManagerBuilder::new()
    }

    pub(super) fn from_parts(
        cpu: Cpu,
        scheduler: Scheduler,
        pids: PidAllocator,
        verbose: bool,
        max_cycles: Cycles,
    ) -> Self {
        debug!(
            policy = %scheduler.policy(),
            time_slice = scheduler.time_slice(),
            memory = cpu.memory().len(),
            first_pid = ?pids.peek(),
            "Process manager initialized"
        );
        Self {
            cpu,
            scheduler,
            processes: BTreeMap::new(),
            pids,
            clock: 0,
            outputs: Vec::new(),
            verbose,
            max_cycles,
        }
    }

    /// Submit a program with the default priority
    pub fn create_process(
        &mut self,
        program: impl Into<Vec<Word>>,
        name: &str,
    ) -> ProcessResult<Pid> {
        self.create_process_with_priority(program, name, DEFAULT_PRIORITY)
    }

    /// Submit a program. The image is accepted as-is and only truncated when
    /// loaded into memory; the one failure is running out of PIDs.
    pub fn create_process_with_priority(
        &mut self,
        program: impl Into<Vec<Word>>,
        name: &str,
        priority: Priority,
    ) -> ProcessResult<Pid> {
        let pid = self.pids.next().ok_or(ProcessError::PidsExhausted)?;
        let pcb = Pcb::new(pid, name, program.into(), priority);
        self.scheduler.add_process(&pcb);
        sched_event!(
            self.verbose,
            pid,
            name,
            priority,
            len = pcb.program().len(),
            "Process created"
        );
        self.processes.insert(pid, pcb);
        Ok(pid)
    }

    /// Save the running process (re-queueing it unless it halted), then
    /// dispatch the next one. Returns the newly running PID.
    pub fn switch_process(&mut self) -> Option<Pid> {
        if let Some(entry) = self.scheduler.take_running() {
            if self.cpu.is_halted() {
                self.terminate(entry);
            } else if let Some(pcb) = self.processes.get_mut(&entry.pid) {
                pcb.save_context(&self.cpu);
                pcb.state = ProcessState::Ready;
                self.scheduler.add_process(&*pcb);
            }
        }

        let next = self.scheduler.schedule()?;
        let pcb = self.processes.get_mut(&next.pid)?;

        self.cpu.load_program(pcb.program());
        pcb.restore_context(&mut self.cpu);
        pcb.state = ProcessState::Running;
        self.cpu.set_halted(false);
        self.scheduler.dispatch(next);

        sched_event!(
            self.verbose,
            pid = next.pid,
            name = pcb.name(),
            pc = pcb.saved_pc(),
            "Process dispatched"
        );
        Some(next.pid)
    }

    fn terminate(&mut self, entry: Entry) {
        if let Some(pcb) = self.processes.get_mut(&entry.pid) {
            pcb.save_context(&self.cpu);
            pcb.state = ProcessState::Terminated;
            pcb.terminated_at = Some(SystemTime::now());
            sched_event!(
                self.verbose,
                pid = entry.pid,
                name = pcb.name(),
                cycles = pcb.total_cycles(),
                clock = self.clock,
                "Process completed"
            );
        }
        self.scheduler.record_terminated(entry.pid);
    }

    /// Drive the CPU until every process has terminated or `max_cycles`
    /// steps have run, whichever comes first.
    pub fn run(&mut self, max_cycles: Cycles, verbose: bool) -> RunSummary {
        let _span = span_run(self.scheduler.policy().as_tag(), max_cycles).entered();
        let configured_verbose = self.verbose;
        self.verbose |= verbose;
        let summary = self.run_loop(max_cycles);
        self.verbose = configured_verbose;
        summary
    }

    fn run_loop(&mut self, max_cycles: Cycles) -> RunSummary {
        if self.processes.is_empty() {
            info!("No processes to run");
            return RunSummary {
                cycles: 0,
                clock: self.clock,
                outcome: RunOutcome::NoProcesses,
                recommendation: None,
            };
        }

        let recommendation = recommend_policy(self.scheduler.ready());
        info!(
            recommended = %recommendation.policy,
            reason = %recommendation.reason,
            configured = %self.scheduler.policy(),
            "Policy recommendation"
        );

        if self.scheduler.running().is_none() {
            self.switch_process();
        }

        let mut cycles: Cycles = 0;
        while cycles < max_cycles && !self.scheduler.is_idle() {
            if self.scheduler.running().is_none() {
                self.switch_process();
            }
            let Some(pid) = self.scheduler.running().map(|e| e.pid) else {
                break;
            };

            self.cpu.step();
            cycles += 1;
            self.clock += 1;
            if let Some(pcb) = self.processes.get_mut(&pid) {
                pcb.total_cycles += 1;
            }
            let printed = self.cpu.take_output();
            self.outputs
                .extend(printed.into_iter().map(|value| OutputRecord { pid, value }));

            if self.cpu.is_halted() {
                if let Some(entry) = self.scheduler.take_running() {
                    self.terminate(entry);
                }
                self.switch_process();
            } else if self.scheduler.policy().is_preemptive() && self.scheduler.tick() {
                sched_event!(
                    self.verbose,
                    pid,
                    slice = self.scheduler.current_slice(),
                    "Time slice expired, switching process"
                );
                self.scheduler.record_preemption();
                self.switch_process();
            }
        }

        let outcome = if self.scheduler.is_idle() {
            RunOutcome::Completed
        } else {
            RunOutcome::CycleBudgetExhausted
        };
        info!(cycles, clock = self.clock, ?outcome, "Execution finished");

        RunSummary {
            cycles,
            clock: self.clock,
            outcome,
            recommendation: Some(recommendation),
        }
    }

    /// `run` with the configured cycle ceiling and verbosity
    pub fn run_to_completion(&mut self) -> RunSummary {
        self.run(self.max_cycles, self.verbose)
    }

    /// Change a live process's priority. Takes effect at its next dispatch.
    pub fn set_priority(&mut self, pid: Pid, priority: Priority) -> ProcessResult<()> {
        let pcb = self.processes.get_mut(&pid).ok_or(ProcessError::NotFound(pid))?;
        if pcb.state == ProcessState::Terminated {
            return Err(ProcessError::InvalidState {
                pid,
                state: pcb.state,
                priority,
            });
        }
        pcb.priority = priority;
        self.scheduler.set_priority(pid, priority);
        debug!(pid, priority, "Priority updated");
        Ok(())
    }

    pub fn process(&self, pid: Pid) -> Option<&Pcb> {
        self.processes.get(&pid)
    }

    /// All known processes in creation order
    pub fn processes(&self) -> impl Iterator<Item = &Pcb> + '_ {
        self.processes.values()
    }

    pub fn running_pid(&self) -> Option<Pid> {
        self.scheduler.running().map(|e| e.pid)
    }

    /// Total cycles executed across all processes
    pub fn clock(&self) -> Cycles {
        self.clock
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Every printed value in emission order
    pub fn outputs(&self) -> &[OutputRecord] {
        &self.outputs
    }

    pub fn output_of(&self, pid: Pid) -> Vec<Word> {
        self.outputs
            .iter()
            .filter(|r| r.pid == pid)
            .map(|r| r.value)
            .collect()
    }

    pub fn process_info(&self) -> Vec<ProcessInfo> {
        self.processes.values().map(Pcb::info).collect()
    }

    /// Process table as text
    pub fn get_process_info(&self) -> String {
        let mut out = format!("{:<8} {:<20} {:<12} {}\n", "PID", "NAME", "STATE", "CYCLES");
        out.push_str(&"-".repeat(52));
        for pcb in self.processes.values() {
            let _ = write!(
                out,
                "\n{:<8} {:<20} {:<12} {}",
                pcb.pid(),
                pcb.name(),
                pcb.state(),
                pcb.total_cycles()
            );
        }
        out
    }

    pub fn snapshot(&self) -> ManagerSnapshot {
        ManagerSnapshot {
            processes: self.process_info(),
            scheduler: self.scheduler.stats(),
            cpu: self.cpu.stats(),
            clock: self.clock,
            running: self.running_pid(),
        }
    }
}

impl Default for ProcessManager {
    fn default() -> Self {
        Self::builder().build()
    }
}
