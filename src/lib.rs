/*!
 * Timeslice VM Library
 * A single simulated CPU time-multiplexed among assembled programs
 */

pub mod asm;
pub mod core;
pub mod cpu;
pub mod monitoring;
pub mod process;
pub mod scheduler;

// Re-exports
pub use asm::{assemble, disassemble, disassemble_listing, DisassembledLine};
pub use self::core::{
    ConfigError, ConfigResult, Cycles, Pid, PidAllocator, Priority, ProcessError, ProcessResult,
    SchedulerError, VmConfig, VmError, VmResult, Word,
};
pub use cpu::{Cpu, CpuStats, Instruction, Opcode, Registers};
pub use monitoring::init_tracing;
pub use process::{
    ManagerSnapshot, OutputRecord, Pcb, ProcessInfo, ProcessManager, ProcessManagerBuilder,
    ProcessState, RunOutcome, RunSummary, SharedProcessManager,
};
pub use scheduler::{
    recommend_policy, PolicyRecommendation, Schedulable, Scheduler, SchedulerStats,
    SchedulingPolicy,
};
