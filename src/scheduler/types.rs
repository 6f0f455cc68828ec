/*!
 * Scheduler Types
 * Policy tags, recommendations, and statistics
 */

use crate::core::errors::SchedulerError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Dispatch policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchedulingPolicy {
    /// First come, first served; runs each process to completion
    Fcfs,
    /// Front-of-queue dispatch with time-slice preemption
    RoundRobin,
    /// Shortest program image first
    ShortestJobFirst,
    /// Largest priority value first
    Priority,
}

impl SchedulingPolicy {
    pub const ALL: [SchedulingPolicy; 4] = [
        SchedulingPolicy::Fcfs,
        SchedulingPolicy::RoundRobin,
        SchedulingPolicy::ShortestJobFirst,
        SchedulingPolicy::Priority,
    ];

    /// Configuration tag
    #[inline(always)]
    pub const fn as_tag(&self) -> &'static str {
        match self {
            Self::Fcfs => "FCFS",
            Self::RoundRobin => "RR",
            Self::ShortestJobFirst => "SJF",
            Self::Priority => "PRIORITY",
        }
    }

    /// Lenient parse of a configuration tag. Only the exact tags `RR`,
    /// `FCFS`, `SJF` and `PRIORITY` are recognized; anything else, including
    /// other spellings such as `rr`, falls back to FCFS.
    pub fn from_tag(tag: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|policy| policy.as_tag() == tag.trim())
            .unwrap_or_else(|| {
                warn!(tag = %tag, "Unrecognized scheduling policy, falling back to FCFS");
                Self::Fcfs
            })
    }

    /// Whether the process manager enforces time slices under this policy
    #[inline(always)]
    pub const fn is_preemptive(&self) -> bool {
        matches!(self, Self::RoundRobin)
    }
}

impl FromStr for SchedulingPolicy {
    type Err = SchedulerError;

    /// Strict parse: the four tags, case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|policy| policy.as_tag().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SchedulerError::InvalidPolicy(s.to_string()))
    }
}

impl fmt::Display for SchedulingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl Serialize for SchedulingPolicy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_tag())
    }
}

impl<'de> Deserialize<'de> for SchedulingPolicy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Advisory policy suggestion. Never applied automatically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PolicyRecommendation {
    pub policy: SchedulingPolicy,
    pub reason: String,
}

impl fmt::Display for PolicyRecommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.policy, self.reason)
    }
}

/// Scheduler statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SchedulerStats {
    pub total_scheduled: u64,
    pub context_switches: u64,
    pub preemptions: u64,
    pub terminated: usize,
    pub ready: usize,
    pub policy: SchedulingPolicy,
    pub time_slice: u64,
}
