/*!
 * System Limits and Constants
 *
 * Defaults for the machine, the scheduler, and the policy recommendation
 * heuristic, grouped by domain.
 */

// =============================================================================
// MACHINE
// =============================================================================

/// Number of memory cells in the shared memory array
pub const DEFAULT_MEMORY_SIZE: usize = 256;

/// Default ceiling for `ProcessManager::run`
pub const DEFAULT_MAX_CYCLES: u64 = 1000;

// =============================================================================
// SCHEDULING
// =============================================================================

/// Round-robin time slice, in executed instructions
pub const DEFAULT_TIME_SLICE: u64 = 10;

/// Priority assigned when the caller does not choose one
pub const DEFAULT_PRIORITY: i32 = 50;

/// First PID handed out by the default allocator
pub const FIRST_PID: u32 = 1000;

// =============================================================================
// POLICY RECOMMENDATION
// =============================================================================

/// Programs shorter than this many cells count as short jobs
pub const SHORT_JOB_LENGTH: usize = 20;

/// Short jobs must exceed this share (in tenths) of the workload to suggest SJF
pub const SHORT_JOB_SHARE_TENTHS: usize = 7;

/// More processes than this suggests round-robin
pub const MANY_PROCESSES: usize = 5;
