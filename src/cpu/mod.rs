/*!
 * CPU
 * Fetch-decode-execute engine over one register file and one memory array
 */

pub mod isa;
pub mod memory;
pub mod registers;

pub use isa::{Instruction, Opcode};
pub use memory::Memory;
pub use registers::{ProgramCounter, Register, Registers};

use crate::core::limits::DEFAULT_MEMORY_SIZE;
use crate::core::types::{Address, Cycles, Word};
use crate::monitoring::OUTPUT_TARGET;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use tracing::{info, trace, warn};

/// Engine statistics snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CpuStats {
    pub cycles: Cycles,
    /// Executions per mnemonic; unknown opcodes are not counted
    pub instructions: BTreeMap<&'static str, u64>,
    pub registers: Registers,
}

/// The single simulated CPU
#[derive(Debug, Clone)]
pub struct Cpu {
    memory: Memory,
    registers: Registers,
    pc: ProgramCounter,
    halted: bool,
    cycles: Cycles,
    histogram: BTreeMap<&'static str, u64>,
    output: Vec<Word>,
}

impl Cpu {
    pub fn new(memory_size: usize) -> Self {
        Self {
            memory: Memory::new(memory_size),
            registers: Registers::default(),
            pc: ProgramCounter::default(),
            halted: false,
            cycles: 0,
            histogram: BTreeMap::new(),
            output: Vec::new(),
        }
    }

    /// Copy a program image to address 0, truncating to the memory size.
    /// PC and registers are left alone.
    pub fn load_program(&mut self, program: &[Word]) {
        let loaded = self.memory.load(program);
        if loaded < program.len() {
            warn!(
                len = program.len(),
                loaded, "Program truncated to memory size"
            );
        }
    }

    /// Run until the halted flag is set. Unbounded: callers that need a
    /// ceiling step manually.
    pub fn run(&mut self) {
        while !self.halted {
            self.step();
        }
    }

    /// Execute exactly one instruction and count one cycle. A halted CPU does
    /// not step.
    pub fn step(&mut self) {
        if self.halted {
            return;
        }
        self.execute();
        self.cycles += 1;
    }

    /// Read the cell at PC. Past the end of memory the CPU halts instead.
    pub fn fetch(&mut self) -> Option<Word> {
        let word = self.memory.get(self.pc.value());
        if word.is_none() {
            trace!(pc = self.pc.value(), "Fetch past end of memory, halting");
            self.halted = true;
        }
        word
    }

    fn execute(&mut self) {
        let Some(word) = self.fetch() else {
            return;
        };

        let Some(opcode) = Opcode::from_word(word) else {
            warn!(opcode = word, pc = self.pc.value(), "Unknown opcode, skipping");
            self.pc.advance(1);
            return;
        };

        *self.histogram.entry(opcode.mnemonic()).or_insert(0) += 1;

        let operand = if opcode.operand_width() > 0 {
            match self.memory.get(self.pc.value().saturating_add(1)) {
                Some(v) => Some(v),
                None => {
                    trace!(pc = self.pc.value(), %opcode, "Operand past end of memory, halting");
                    self.halted = true;
                    return;
                }
            }
        } else {
            None
        };

        self.apply(Instruction::decode(opcode, operand));
    }

    fn apply(&mut self, instruction: Instruction) {
        let width = instruction.width();
        match instruction {
            Instruction::Load(value) => {
                self.registers.acc = value;
            }
            Instruction::Add(addr) => {
                let v = self.read_data(addr);
                self.registers.acc = self.registers.acc.wrapping_add(v);
            }
            Instruction::Sub(addr) => {
                let v = self.read_data(addr);
                self.registers.acc = self.registers.acc.wrapping_sub(v);
            }
            Instruction::Mul(addr) => {
                let v = self.read_data(addr);
                self.registers.acc = self.registers.acc.wrapping_mul(v);
            }
            Instruction::Div(addr) => {
                let v = self.read_data(addr);
                if v != 0 {
                    self.registers.acc = floor_div(self.registers.acc, v);
                }
            }
            Instruction::Store(addr) => {
                if !self.memory.write(addr, self.registers.acc) {
                    warn!(address = addr, pc = self.pc.value(), "STORE out of range, dropped");
                }
            }
            Instruction::Jmp(addr) => {
                self.pc.jump(addr);
                return;
            }
            Instruction::Jz(addr) => {
                if self.registers.acc == 0 {
                    self.pc.jump(addr);
                    return;
                }
            }
            Instruction::Print => {
                info!(target: OUTPUT_TARGET, value = self.registers.acc, "Output");
                self.output.push(self.registers.acc);
            }
            Instruction::Mov => {}
            Instruction::Halt => {
                self.halted = true;
                return;
            }
        }
        self.pc.advance(width);
    }

    fn read_data(&self, addr: Word) -> Word {
        self.memory.read(addr).unwrap_or_else(|| {
            warn!(address = addr, pc = self.pc.value(), "Read out of range, using 0");
            0
        })
    }

    #[inline(always)]
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn set_halted(&mut self, halted: bool) {
        self.halted = halted;
    }

    #[inline(always)]
    pub fn pc(&self) -> Address {
        self.pc.value()
    }

    pub fn set_pc(&mut self, value: Address) {
        self.pc.set(value);
    }

    pub fn registers(&self) -> Registers {
        self.registers
    }

    pub fn set_registers(&mut self, registers: Registers) {
        self.registers = registers;
    }

    pub fn cycles(&self) -> Cycles {
        self.cycles
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    /// Values emitted by PRINT, oldest first
    pub fn output(&self) -> &[Word] {
        &self.output
    }

    pub fn take_output(&mut self) -> Vec<Word> {
        std::mem::take(&mut self.output)
    }

    pub fn stats(&self) -> CpuStats {
        CpuStats {
            cycles: self.cycles,
            instructions: self.histogram.clone(),
            registers: self.registers,
        }
    }

    /// Zero all machine state
    pub fn reset(&mut self) {
        self.memory.clear();
        self.registers = Registers::default();
        self.pc.reset();
        self.halted = false;
        self.cycles = 0;
        self.histogram.clear();
        self.output.clear();
    }

    pub fn dump_registers(&self) -> String {
        let mut out = String::from("CPU State\n");
        out.push_str(&"-".repeat(30));
        out.push('\n');
        for reg in Register::ALL {
            let _ = writeln!(out, "  {:<5}: {}", reg.name(), self.registers.get(reg));
        }
        let _ = writeln!(out, "  PC   : {}", self.pc.value());
        let _ = writeln!(out, "  HALT : {}", self.halted);
        let _ = write!(out, "  CYCLE: {}", self.cycles);
        out
    }

    /// Cells in `[start, end)`, clamped to the memory size
    pub fn dump_memory(&self, start: Address, end: Address) -> String {
        let end = end.min(self.memory.len());
        let mut out = format!("Memory [{}:{}]\n", start, end);
        out.push_str(&"-".repeat(30));
        for (offset, value) in self.memory.cells()[start.min(end)..end].iter().enumerate() {
            let _ = write!(out, "\n  [{:3}]: {}", start + offset, value);
        }
        out
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new(DEFAULT_MEMORY_SIZE)
    }
}

/// Integer division rounding toward negative infinity
fn floor_div(a: Word, b: Word) -> Word {
    let q = a.wrapping_div(b);
    if a.wrapping_rem(b) != 0 && ((a < 0) != (b < 0)) {
        q - 1
    } else {
        q
    }
}
