/*!
 * Process Module
 * Process control blocks, the process manager, and its run loop
 */

pub mod manager;
pub mod manager_builder;
pub mod pcb;
pub mod shared;
pub mod types;

// Re-export for convenience
pub use manager::ProcessManager;
pub use manager_builder::ProcessManagerBuilder;
pub use pcb::Pcb;
pub use shared::SharedProcessManager;
pub use types::{ManagerSnapshot, OutputRecord, ProcessInfo, ProcessState, RunOutcome, RunSummary};
