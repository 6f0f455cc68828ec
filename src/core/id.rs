/*!
 * ID Generation
 * Explicit PID allocation owned by the process manager
 */

use super::limits::FIRST_PID;
use super::types::Pid;

/// Generic ID generator interface
pub trait IdGenerator<T> {
    /// Generate next ID, or `None` once the ID space is used up
    fn next(&mut self) -> Option<T>;

    /// Value the next call to `next` will return
    fn peek(&self) -> Option<T>;
}

/// Monotonic PID counter, owned by one process manager
///
/// Never wraps: after `Pid::MAX` has been handed out the allocator is
/// exhausted, so PIDs stay unique and strictly increasing.
#[derive(Debug, Clone)]
pub struct PidAllocator {
    next: Option<Pid>,
}

impl PidAllocator {
    /// Create allocator starting at the given PID
    pub fn new(start: Pid) -> Self {
        Self { next: Some(start) }
    }

    pub fn is_exhausted(&self) -> bool {
        self.next.is_none()
    }
}

impl Default for PidAllocator {
    fn default() -> Self {
        Self::new(FIRST_PID)
    }
}

impl IdGenerator<Pid> for PidAllocator {
    fn next(&mut self) -> Option<Pid> {
        let pid = self.next?;
        self.next = pid.checked_add(1);
        Some(pid)
    }

    fn peek(&self) -> Option<Pid> {
        self.next
    }
}
