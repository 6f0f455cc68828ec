/*!
 * Shared Process Manager
 * Single-writer handle for callers on multiple threads
 */

use super::manager::ProcessManager;
use super::types::{ManagerSnapshot, ProcessInfo, RunSummary};
use crate::core::errors::ProcessResult;
use crate::core::types::{Cycles, Pid, Priority, Word};
use parking_lot::Mutex;
use std::sync::Arc;

/// Cloneable handle around one `ProcessManager`
///
/// Every step, context switch, and dispatch mutates the shared memory array
/// and running slot in place, so all access goes through one mutex. A `run`
/// holds the lock for its whole duration.
#[derive(Clone)]
pub struct SharedProcessManager {
    inner: Arc<Mutex<ProcessManager>>,
}

impl SharedProcessManager {
    pub fn new(manager: ProcessManager) -> Self {
        Self {
            inner: Arc::new(Mutex::new(manager)),
        }
    }

    pub fn create_process(
        &self,
        program: Vec<Word>,
        name: &str,
        priority: Priority,
    ) -> ProcessResult<Pid> {
        self.inner
            .lock()
            .create_process_with_priority(program, name, priority)
    }

    pub fn run(&self, max_cycles: Cycles, verbose: bool) -> RunSummary {
        self.inner.lock().run(max_cycles, verbose)
    }

    pub fn process_info(&self) -> Vec<ProcessInfo> {
        self.inner.lock().process_info()
    }

    pub fn snapshot(&self) -> ManagerSnapshot {
        self.inner.lock().snapshot()
    }

    /// Run a closure with exclusive access to the manager
    pub fn with<R>(&self, f: impl FnOnce(&mut ProcessManager) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl From<ProcessManager> for SharedProcessManager {
    fn from(manager: ProcessManager) -> Self {
        Self::new(manager)
    }
}
