/*!
 * CPU Scheduler
 * Ready queue, running slot, and terminated log for the single CPU
 */

mod entry;
mod operations;
mod policy;
mod traits;
mod types;

pub use entry::Entry;
pub use policy::recommend_policy;
pub use traits::Schedulable;
pub use types::{PolicyRecommendation, SchedulerStats, SchedulingPolicy};

use crate::core::limits::DEFAULT_TIME_SLICE;
use crate::core::types::Pid;
use std::collections::VecDeque;
use tracing::debug;

/// Dispatch counters
#[derive(Debug, Clone, Copy, Default)]
struct Counters {
    total_scheduled: u64,
    context_switches: u64,
    preemptions: u64,
}

/// CPU Scheduler
///
/// A PID sits in at most one of the ready queue, the running slot, or the
/// terminated log.
#[derive(Debug, Clone)]
pub struct Scheduler {
    policy: SchedulingPolicy,
    time_slice: u64,

    // Insertion-ordered; SJF and PRIORITY remove from the middle
    ready_queue: VecDeque<Entry>,

    running: Option<Entry>,
    terminated: Vec<Pid>,

    // Cycles the running process has used in its current RR slice
    current_slice: u64,

    counters: Counters,
}

impl Scheduler {
    /// Create new scheduler with the default time slice
    pub fn new(policy: SchedulingPolicy) -> Self {
        Self::with_time_slice(policy, DEFAULT_TIME_SLICE)
    }

    /// Create scheduler with a custom time slice (clamped to at least 1)
    pub fn with_time_slice(policy: SchedulingPolicy, time_slice: u64) -> Self {
        debug!(%policy, time_slice, "Scheduler initialized");

        Self {
            policy,
            time_slice: time_slice.max(1),
            ready_queue: VecDeque::new(),
            running: None,
            terminated: Vec::new(),
            current_slice: 0,
            counters: Counters::default(),
        }
    }

    pub fn policy(&self) -> SchedulingPolicy {
        self.policy
    }

    pub fn time_slice(&self) -> u64 {
        self.time_slice
    }

    pub fn stats(&self) -> SchedulerStats {
        SchedulerStats {
            total_scheduled: self.counters.total_scheduled,
            context_switches: self.counters.context_switches,
            preemptions: self.counters.preemptions,
            terminated: self.terminated.len(),
            ready: self.ready_queue.len(),
            policy: self.policy,
            time_slice: self.time_slice,
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(SchedulingPolicy::RoundRobin)
    }
}
