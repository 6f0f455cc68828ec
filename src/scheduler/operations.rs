/*!
 * Scheduler Core Operations
 * Enqueue, dispatch, slice accounting, and bookkeeping
 */

use super::entry::Entry;
use super::policy::select;
use super::traits::Schedulable;
use super::Scheduler;
use crate::core::types::{Pid, Priority};
use tracing::trace;

impl Scheduler {
    /// Append a process to the tail of the ready queue. The caller owns the
    /// PCB state change.
    pub fn add_process<P: Schedulable>(&mut self, process: &P) {
        let entry = Entry::of(process);
        trace!(pid = entry.pid, policy = %self.policy, "Process queued");
        self.ready_queue.push_back(entry);
    }

    /// Remove and return the next process per the active policy, or `None`
    /// when the ready queue is empty. Does not touch the running slot.
    pub fn schedule(&mut self) -> Option<Entry> {
        let idx = select(self.policy, &self.ready_queue)?;
        let entry = self.ready_queue.remove(idx)?;
        self.counters.total_scheduled += 1;
        Some(entry)
    }

    /// Occupy the running slot with a dispatched entry and start a fresh slice
    pub fn dispatch(&mut self, entry: Entry) {
        debug_assert!(self.running.is_none(), "running slot already occupied");
        self.running = Some(entry);
        self.current_slice = 0;
        self.counters.context_switches += 1;
    }

    pub fn running(&self) -> Option<&Entry> {
        self.running.as_ref()
    }

    /// Vacate the running slot
    pub fn take_running(&mut self) -> Option<Entry> {
        self.running.take()
    }

    /// Count one cycle against the current slice. True when the slice is used
    /// up and someone else is waiting.
    pub fn tick(&mut self) -> bool {
        self.current_slice += 1;
        self.current_slice >= self.time_slice && !self.ready_queue.is_empty()
    }

    pub fn current_slice(&self) -> u64 {
        self.current_slice
    }

    pub fn record_preemption(&mut self) {
        self.counters.preemptions += 1;
    }

    /// Append to the terminated log. Terminated processes never re-enter the
    /// ready queue.
    pub fn record_terminated(&mut self, pid: Pid) {
        self.terminated.push(pid);
    }

    pub fn terminated(&self) -> &[Pid] {
        &self.terminated
    }

    pub fn ready(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.ready_queue.iter()
    }

    pub fn ready_len(&self) -> usize {
        self.ready_queue.len()
    }

    pub fn has_ready(&self) -> bool {
        !self.ready_queue.is_empty()
    }

    /// Nothing running and nothing waiting
    pub fn is_idle(&self) -> bool {
        self.running.is_none() && self.ready_queue.is_empty()
    }

    /// Update the dispatch priority of a queued or running process
    pub fn set_priority(&mut self, pid: Pid, priority: Priority) -> bool {
        let entry = self
            .running
            .iter_mut()
            .chain(self.ready_queue.iter_mut())
            .find(|e| e.pid == pid);
        match entry {
            Some(e) => {
                e.priority = priority;
                true
            }
            None => false,
        }
    }

    /// Whether the PID is in the ready queue, the running slot, or the log
    pub fn contains(&self, pid: Pid) -> bool {
        self.running.map(|e| e.pid) == Some(pid)
            || self.ready_queue.iter().any(|e| e.pid == pid)
            || self.terminated.contains(&pid)
    }
}
