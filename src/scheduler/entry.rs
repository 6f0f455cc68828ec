/*!
 * Scheduler Entry Types
 * Ready-queue entries carrying only what dispatch needs
 */

use super::traits::Schedulable;
use crate::core::types::{Pid, Priority};
use serde::Serialize;

/// Ready-queue / running-slot entry. The PCB itself stays with the process
/// manager; the scheduler only tracks identity and dispatch keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub pid: Pid,
    pub priority: Priority,
    pub program_len: usize,
}

impl Entry {
    pub fn of<P: Schedulable>(process: &P) -> Self {
        Self {
            pid: process.pid(),
            priority: process.priority(),
            program_len: process.program_len(),
        }
    }
}

impl Schedulable for Entry {
    fn pid(&self) -> Pid {
        self.pid
    }

    fn priority(&self) -> Priority {
        self.priority
    }

    fn program_len(&self) -> usize {
        self.program_len
    }
}
