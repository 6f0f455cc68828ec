/*!
 * Process Control Block
 * Saved machine context and scheduling metadata for one program
 */

use super::types::{ProcessInfo, ProcessState};
use crate::core::serde::{optional_system_time_micros, system_time_micros};
use crate::core::types::{Address, Cycles, Pid, Priority, Word};
use crate::cpu::{Cpu, Registers};
use crate::scheduler::Schedulable;
use serde::Serialize;
use std::time::SystemTime;

/// Process Control Block
///
/// The saved PC and registers are only meaningful while the process is not
/// RUNNING; while it runs, the CPU's live state is its context.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Pcb {
    pid: Pid,
    name: String,
    pub(crate) state: ProcessState,
    program: Vec<Word>,
    pc: Address,
    registers: Registers,
    #[serde(with = "system_time_micros")]
    created_at: SystemTime,
    #[serde(with = "optional_system_time_micros")]
    pub(crate) terminated_at: Option<SystemTime>,
    pub(crate) total_cycles: Cycles,
    pub(crate) priority: Priority,
}

impl Pcb {
    /// New READY process with a zeroed context
    pub fn new(pid: Pid, name: impl Into<String>, program: Vec<Word>, priority: Priority) -> Self {
        Self {
            pid,
            name: name.into(),
            state: ProcessState::Ready,
            program,
            pc: 0,
            registers: Registers::default(),
            created_at: SystemTime::now(),
            terminated_at: None,
            total_cycles: 0,
            priority,
        }
    }

    /// Copy the CPU's PC and registers into this PCB
    pub fn save_context(&mut self, cpu: &Cpu) {
        self.pc = cpu.pc();
        self.registers = cpu.registers();
    }

    /// Load this PCB's PC and registers into the CPU
    pub fn restore_context(&self, cpu: &mut Cpu) {
        cpu.set_pc(self.pc);
        cpu.set_registers(self.registers);
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> ProcessState {
        self.state
    }

    pub fn program(&self) -> &[Word] {
        &self.program
    }

    pub fn saved_pc(&self) -> Address {
        self.pc
    }

    pub fn saved_registers(&self) -> Registers {
        self.registers
    }

    pub fn created_at(&self) -> SystemTime {
        self.created_at
    }

    pub fn terminated_at(&self) -> Option<SystemTime> {
        self.terminated_at
    }

    pub fn total_cycles(&self) -> Cycles {
        self.total_cycles
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn info(&self) -> ProcessInfo {
        ProcessInfo {
            pid: self.pid,
            name: self.name.clone(),
            state: self.state,
            priority: self.priority,
            cycles: self.total_cycles,
        }
    }
}

impl Schedulable for Pcb {
    fn pid(&self) -> Pid {
        self.pid
    }

    fn priority(&self) -> Priority {
        self.priority
    }

    fn program_len(&self) -> usize {
        self.program.len()
    }
}
