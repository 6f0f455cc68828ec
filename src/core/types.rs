/*!
 * Core Types
 * Primitive types shared by the engine, scheduler, and process manager
 */

/// Memory cell / register value. Cells are unbounded in the machine model,
/// so a wide signed integer is used and arithmetic wraps instead of panicking.
pub type Word = i64;

/// Index into the memory array
pub type Address = usize;

/// Process ID type
pub type Pid = u32;

/// Scheduling priority (higher is more urgent)
pub type Priority = i32;

/// Executed-instruction counter
pub type Cycles = u64;
