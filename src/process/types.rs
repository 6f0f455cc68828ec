/*!
 * Process Types
 * Common types for process management
 */

use crate::core::types::{Cycles, Pid, Priority, Word};
use crate::cpu::CpuStats;
use crate::scheduler::{PolicyRecommendation, SchedulerStats};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Process state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Allocated but not yet submitted
    New,
    /// Waiting in the ready queue
    Ready,
    /// Holding the CPU
    Running,
    /// Blocked on an event
    Waiting,
    /// Halted; never rescheduled
    Terminated,
}

impl ProcessState {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Ready => "READY",
            Self::Running => "RUNNING",
            Self::Waiting => "WAITING",
            Self::Terminated => "TERMINATED",
        }
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the process table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessInfo {
    pub pid: Pid,
    pub name: String,
    pub state: ProcessState,
    pub priority: Priority,
    pub cycles: Cycles,
}

/// A value printed by a process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OutputRecord {
    pub pid: Pid,
    pub value: Word,
}

/// Why `ProcessManager::run` returned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// Nothing had ever been submitted
    NoProcesses,
    /// Every submitted process has terminated
    Completed,
    /// The cycle ceiling was reached with work left; the last process stays RUNNING
    CycleBudgetExhausted,
}

/// Result of one `ProcessManager::run` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RunSummary {
    /// Steps executed during this call
    pub cycles: Cycles,
    /// Global clock after the call
    pub clock: Cycles,
    pub outcome: RunOutcome,
    /// Advisory only; the configured policy is never changed
    #[serde(skip_serializing_if = "crate::core::serde::is_none")]
    pub recommendation: Option<PolicyRecommendation>,
}

/// Read-only view of the whole manager
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ManagerSnapshot {
    pub processes: Vec<ProcessInfo>,
    pub scheduler: SchedulerStats,
    pub cpu: CpuStats,
    pub clock: Cycles,
    #[serde(skip_serializing_if = "crate::core::serde::is_none")]
    pub running: Option<Pid>,
}
