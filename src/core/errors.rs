/*!
 * Error Types
 * Edge-of-system errors with thiserror, miette, and serde support
 *
 * The execution core itself never fails: unknown opcodes, division by zero,
 * and end-of-memory fetches all degrade to no-ops or implicit halts. These
 * types cover configuration, strict policy parsing, and process lookups.
 */

use crate::core::types::{Pid, Priority};
use crate::process::types::ProcessState;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Process-related errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ProcessError {
    #[error("Process {0} not found")]
    #[diagnostic(
        code(process::not_found),
        help("The PID was never allocated by this process manager.")
    )]
    NotFound(Pid),

    #[error("Process {pid} is {state:?}, cannot set priority {priority}")]
    #[diagnostic(
        code(process::invalid_state),
        help("Terminated processes are never rescheduled and cannot be modified.")
    )]
    InvalidState {
        pid: Pid,
        state: ProcessState,
        priority: Priority,
    },

    #[error("PID space exhausted")]
    #[diagnostic(
        code(process::pids_exhausted),
        help("Every PID up to the maximum has been handed out; start from a lower first_pid.")
    )]
    PidsExhausted,
}

/// Scheduler-related errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SchedulerError {
    #[error("Invalid scheduling policy: {0}")]
    #[diagnostic(
        code(scheduler::invalid_policy),
        help("Use one of RR, FCFS, SJF, or PRIORITY.")
    )]
    InvalidPolicy(String),
}

/// Configuration errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    #[diagnostic(
        code(config::invalid_value),
        help("Check the VM_* environment variables or the config file.")
    )]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Failed to read config file {path}: {reason}")]
    #[diagnostic(code(config::io), help("Check that the file exists and is readable."))]
    Io { path: String, reason: String },

    #[error("Malformed config file {path}: {reason}")]
    #[diagnostic(code(config::parse), help("The config file must be a JSON object."))]
    Parse { path: String, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ConfigError::InvalidValue {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Unified VM error type with miette diagnostics
#[derive(Error, Debug, Diagnostic)]
pub enum VmError {
    #[error("Process error: {0}")]
    #[diagnostic(transparent)]
    Process(#[from] ProcessError),

    #[error("Scheduler error: {0}")]
    #[diagnostic(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error("Configuration error: {0}")]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

/// Process operation result
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Configuration result
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Common result type for VM operations
pub type VmResult<T> = Result<T, VmError>;
