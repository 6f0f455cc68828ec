/*!
 * Register File
 * Accumulator, flags, general registers, and the program counter
 */

use crate::core::types::{Address, Word};
use serde::{Deserialize, Serialize};

/// Named registers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    Acc,
    Flags,
    R1,
    R2,
}

impl Register {
    pub const ALL: [Register; 4] = [Register::Acc, Register::Flags, Register::R1, Register::R2];

    pub const fn name(self) -> &'static str {
        match self {
            Register::Acc => "ACC",
            Register::Flags => "FLAGS",
            Register::R1 => "R1",
            Register::R2 => "R2",
        }
    }
}

/// Register snapshot. Plain value type: saving and restoring a context is a copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Registers {
    pub acc: Word,
    /// Reserved; no instruction reads or writes it yet
    pub flags: Word,
    pub r1: Word,
    pub r2: Word,
}

impl Registers {
    pub fn get(&self, reg: Register) -> Word {
        match reg {
            Register::Acc => self.acc,
            Register::Flags => self.flags,
            Register::R1 => self.r1,
            Register::R2 => self.r2,
        }
    }

    pub fn set(&mut self, reg: Register, value: Word) {
        match reg {
            Register::Acc => self.acc = value,
            Register::Flags => self.flags = value,
            Register::R1 => self.r1 = value,
            Register::R2 => self.r2 = value,
        }
    }
}

/// Program counter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgramCounter {
    value: Address,
}

impl ProgramCounter {
    #[inline(always)]
    pub const fn value(&self) -> Address {
        self.value
    }

    #[inline]
    pub fn advance(&mut self, cells: usize) {
        self.value = self.value.saturating_add(cells);
    }

    #[inline]
    pub fn set(&mut self, value: Address) {
        self.value = value;
    }

    /// Jump target from a memory word; negative targets land out of range
    pub fn jump(&mut self, target: Word) {
        self.value = Address::try_from(target).unwrap_or(Address::MAX);
    }

    pub fn reset(&mut self) {
        self.value = 0;
    }
}
