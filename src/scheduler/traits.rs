/*!
 * Scheduler Traits
 * What the scheduler needs to know about a process
 */

use crate::core::types::{Pid, Priority};

/// Dispatch-relevant view of a process
pub trait Schedulable {
    fn pid(&self) -> Pid;

    fn priority(&self) -> Priority;

    /// Program image length in cells (the SJF job size)
    fn program_len(&self) -> usize;
}

impl<T: Schedulable + ?Sized> Schedulable for &T {
    fn pid(&self) -> Pid {
        (**self).pid()
    }

    fn priority(&self) -> Priority {
        (**self).priority()
    }

    fn program_len(&self) -> usize {
        (**self).program_len()
    }
}
