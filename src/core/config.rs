/*!
 * VM Configuration
 *
 * Runtime configuration for the machine and scheduler, loaded from defaults,
 * `VM_*` environment variables, or a JSON file.
 */

use super::errors::{ConfigError, ConfigResult};
use super::limits::{
    DEFAULT_MAX_CYCLES, DEFAULT_MEMORY_SIZE, DEFAULT_TIME_SLICE, FIRST_PID,
};
use super::types::Pid;
use crate::scheduler::SchedulingPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

pub const ENV_MEMORY_SIZE: &str = "VM_MEMORY_SIZE";
pub const ENV_POLICY: &str = "VM_POLICY";
pub const ENV_TIME_SLICE: &str = "VM_TIME_SLICE";
pub const ENV_MAX_CYCLES: &str = "VM_MAX_CYCLES";
pub const ENV_VERBOSE: &str = "VM_VERBOSE";
pub const ENV_FIRST_PID: &str = "VM_FIRST_PID";

/// Machine and scheduler configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct VmConfig {
    /// Cells in the shared memory array
    pub memory_size: usize,
    /// Dispatch policy
    pub policy: SchedulingPolicy,
    /// Round-robin slice length in cycles
    pub time_slice: u64,
    /// Default cycle ceiling for a run
    pub max_cycles: u64,
    /// Log scheduling events at info level instead of debug
    pub verbose: bool,
    /// First PID handed out
    pub first_pid: Pid,
}

impl Default for VmConfig {
    fn default() -> Self {
        Self {
            memory_size: DEFAULT_MEMORY_SIZE,
            policy: SchedulingPolicy::RoundRobin,
            time_slice: DEFAULT_TIME_SLICE,
            max_cycles: DEFAULT_MAX_CYCLES,
            verbose: false,
            first_pid: FIRST_PID,
        }
    }
}

impl VmConfig {
    /// Defaults overlaid with `VM_*` environment variables
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = lookup(ENV_MEMORY_SIZE) {
            config.memory_size = parse_number(ENV_MEMORY_SIZE, &v)?;
        }
        if let Some(v) = lookup(ENV_POLICY) {
            config.policy = SchedulingPolicy::from_tag(&v);
        }
        if let Some(v) = lookup(ENV_TIME_SLICE) {
            config.time_slice = parse_number(ENV_TIME_SLICE, &v)?;
        }
        if let Some(v) = lookup(ENV_MAX_CYCLES) {
            config.max_cycles = parse_number(ENV_MAX_CYCLES, &v)?;
        }
        if let Some(v) = lookup(ENV_VERBOSE) {
            config.verbose = parse_flag(ENV_VERBOSE, &v)?;
        }
        if let Some(v) = lookup(ENV_FIRST_PID) {
            config.first_pid = parse_number(ENV_FIRST_PID, &v)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file; missing fields take defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: display.clone(),
            reason: e.to_string(),
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: display,
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the machine cannot run with
    pub fn validate(&self) -> ConfigResult<()> {
        if self.memory_size == 0 {
            return Err(ConfigError::invalid(
                "memory_size",
                "0",
                "memory must hold at least one cell",
            ));
        }
        if self.time_slice == 0 {
            return Err(ConfigError::invalid(
                "time_slice",
                "0",
                "time slice must be at least one cycle",
            ));
        }
        Ok(())
    }
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> ConfigResult<T>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::invalid(key, value, e.to_string()))
}

fn parse_flag(key: &str, value: &str) -> ConfigResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::invalid(key, value, "expected a boolean flag")),
    }
}
