/*!
 * Process Manager Builder
 * Builder pattern for ProcessManager construction
 */

use super::manager::ProcessManager;
use crate::core::config::VmConfig;
use crate::core::id::PidAllocator;
use crate::core::types::Cycles;
use crate::cpu::Cpu;
use crate::scheduler::{Scheduler, SchedulingPolicy};

/// Builder for ProcessManager
#[derive(Debug, Clone)]
pub struct ProcessManagerBuilder {
    config: VmConfig,
    pids: Option<PidAllocator>,
}

impl ProcessManagerBuilder {
    /// Create a new ProcessManager builder with default settings
    pub fn new() -> Self {
        Self {
            config: VmConfig::default(),
            pids: None,
        }
    }

    /// Take every setting from a loaded configuration
    pub fn with_config(mut self, config: VmConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_policy(mut self, policy: SchedulingPolicy) -> Self {
        self.config.policy = policy;
        self
    }

    /// Policy from a configuration tag; unrecognized tags mean FCFS
    pub fn with_policy_tag(mut self, tag: &str) -> Self {
        self.config.policy = SchedulingPolicy::from_tag(tag);
        self
    }

    /// Round-robin slice length in cycles
    pub fn with_time_slice(mut self, time_slice: u64) -> Self {
        self.config.time_slice = time_slice;
        self
    }

    pub fn with_memory_size(mut self, memory_size: usize) -> Self {
        self.config.memory_size = memory_size;
        self
    }

    /// Cycle ceiling used by `run_to_completion`
    pub fn with_max_cycles(mut self, max_cycles: Cycles) -> Self {
        self.config.max_cycles = max_cycles;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    /// Inject the PID source, e.g. for deterministic tests
    pub fn with_pid_allocator(mut self, pids: PidAllocator) -> Self {
        self.pids = Some(pids);
        self
    }

    /// Build the ProcessManager
    pub fn build(self) -> ProcessManager {
        let config = self.config;
        let pids = self
            .pids
            .unwrap_or_else(|| PidAllocator::new(config.first_pid));

        ProcessManager::from_parts(
            Cpu::new(config.memory_size),
            Scheduler::with_time_slice(config.policy, config.time_slice),
            pids,
            config.verbose,
            config.max_cycles,
        )
    }
}

impl Default for ProcessManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
