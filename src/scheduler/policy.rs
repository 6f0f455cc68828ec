/*!
 * Scheduler Policy
 * Dispatch selection and the advisory policy heuristic
 */

use super::traits::Schedulable;
use super::types::{PolicyRecommendation, SchedulingPolicy};
use crate::core::limits::{MANY_PROCESSES, SHORT_JOB_LENGTH, SHORT_JOB_SHARE_TENTHS};
use std::cmp::Reverse;

/// Queue index of the entry the policy dispatches next. Ties go to the
/// earliest queued entry.
pub(super) fn select<P: Schedulable>(
    policy: SchedulingPolicy,
    queue: impl IntoIterator<Item = P>,
) -> Option<usize> {
    let mut queue = queue.into_iter().enumerate();
    match policy {
        SchedulingPolicy::Fcfs | SchedulingPolicy::RoundRobin => queue.next().map(|(i, _)| i),
        SchedulingPolicy::ShortestJobFirst => queue
            .min_by_key(|(_, p)| p.program_len())
            .map(|(i, _)| i),
        SchedulingPolicy::Priority => queue
            .min_by_key(|(_, p)| Reverse(p.priority()))
            .map(|(i, _)| i),
    }
}

/// Suggest a policy for a workload: SJF when more than 70% of the programs
/// are short, RR for more than five processes, FCFS otherwise.
pub fn recommend_policy<P, I>(processes: I) -> PolicyRecommendation
where
    P: Schedulable,
    I: IntoIterator<Item = P>,
{
    let (short, total) = processes.into_iter().fold((0usize, 0usize), |(s, t), p| {
        (s + usize::from(p.program_len() < SHORT_JOB_LENGTH), t + 1)
    });

    if total == 0 {
        return PolicyRecommendation {
            policy: SchedulingPolicy::RoundRobin,
            reason: "default round-robin".to_string(),
        };
    }

    if short * 10 > total * SHORT_JOB_SHARE_TENTHS {
        PolicyRecommendation {
            policy: SchedulingPolicy::ShortestJobFirst,
            reason: format!("short jobs: {}/{}", short, total),
        }
    } else if total > MANY_PROCESSES {
        PolicyRecommendation {
            policy: SchedulingPolicy::RoundRobin,
            reason: format!("many processes: {}", total),
        }
    } else {
        PolicyRecommendation {
            policy: SchedulingPolicy::Fcfs,
            reason: format!("few processes: {}", total),
        }
    }
}
