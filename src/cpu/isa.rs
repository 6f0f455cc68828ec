/*!
 * Instruction Set
 * Opcode table and decoded instruction forms
 */

use crate::core::types::Word;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Machine opcodes and their byte encodings
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Opcode {
    Load = 0x01,
    Add = 0x02,
    Sub = 0x03,
    Jmp = 0x04,
    Div = 0x05,
    Print = 0x06,
    Store = 0x07,
    Jz = 0x08,
    Halt = 0x09,
    Mul = 0x0A,
    Mov = 0x0B,
}

impl Opcode {
    /// Every opcode, in encoding order
    pub const ALL: [Opcode; 11] = [
        Opcode::Load,
        Opcode::Add,
        Opcode::Sub,
        Opcode::Jmp,
        Opcode::Div,
        Opcode::Print,
        Opcode::Store,
        Opcode::Jz,
        Opcode::Halt,
        Opcode::Mul,
        Opcode::Mov,
    ];

    /// Decode an encoded byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        Self::from_word(Word::from(byte))
    }

    /// Decode a memory cell into an opcode
    pub fn from_word(word: Word) -> Option<Self> {
        match word {
            0x01 => Some(Opcode::Load),
            0x02 => Some(Opcode::Add),
            0x03 => Some(Opcode::Sub),
            0x04 => Some(Opcode::Jmp),
            0x05 => Some(Opcode::Div),
            0x06 => Some(Opcode::Print),
            0x07 => Some(Opcode::Store),
            0x08 => Some(Opcode::Jz),
            0x09 => Some(Opcode::Halt),
            0x0A => Some(Opcode::Mul),
            0x0B => Some(Opcode::Mov),
            _ => None,
        }
    }

    /// Encoded value
    #[inline(always)]
    pub const fn byte(self) -> u8 {
        self as u8
    }

    #[inline(always)]
    pub const fn word(self) -> Word {
        self as u8 as Word
    }

    pub const fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Load => "LOAD",
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Jmp => "JMP",
            Opcode::Div => "DIV",
            Opcode::Print => "PRINT",
            Opcode::Store => "STORE",
            Opcode::Jz => "JZ",
            Opcode::Halt => "HALT",
            Opcode::Mul => "MUL",
            Opcode::Mov => "MOV",
        }
    }

    /// Case-insensitive mnemonic lookup
    pub fn from_mnemonic(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.mnemonic().eq_ignore_ascii_case(name))
    }

    /// Operand cells following the opcode cell. Fixed per opcode, never inferred.
    pub const fn operand_width(self) -> usize {
        match self {
            Opcode::Print | Opcode::Halt | Opcode::Mov => 0,
            _ => 1,
        }
    }

    /// Total cells consumed by the instruction
    #[inline(always)]
    pub const fn width(self) -> usize {
        1 + self.operand_width()
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// A fully decoded instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// ACC := value
    Load(Word),
    /// ACC := ACC + memory[address]
    Add(Word),
    /// ACC := ACC - memory[address]
    Sub(Word),
    /// ACC := ACC * memory[address]
    Mul(Word),
    /// ACC := floor(ACC / memory[address]); skipped when the divisor is 0
    Div(Word),
    /// memory[address] := ACC
    Store(Word),
    /// PC := address
    Jmp(Word),
    /// PC := address when ACC == 0
    Jz(Word),
    Print,
    Mov,
    Halt,
}

impl Instruction {
    /// Combine an opcode with its operand cell. `operand` is ignored for
    /// zero-width opcodes and treated as 0 when missing.
    pub fn decode(opcode: Opcode, operand: Option<Word>) -> Self {
        let arg = operand.unwrap_or(0);
        match opcode {
            Opcode::Load => Instruction::Load(arg),
            Opcode::Add => Instruction::Add(arg),
            Opcode::Sub => Instruction::Sub(arg),
            Opcode::Mul => Instruction::Mul(arg),
            Opcode::Div => Instruction::Div(arg),
            Opcode::Store => Instruction::Store(arg),
            Opcode::Jmp => Instruction::Jmp(arg),
            Opcode::Jz => Instruction::Jz(arg),
            Opcode::Print => Instruction::Print,
            Opcode::Mov => Instruction::Mov,
            Opcode::Halt => Instruction::Halt,
        }
    }

    pub const fn opcode(&self) -> Opcode {
        match self {
            Instruction::Load(_) => Opcode::Load,
            Instruction::Add(_) => Opcode::Add,
            Instruction::Sub(_) => Opcode::Sub,
            Instruction::Mul(_) => Opcode::Mul,
            Instruction::Div(_) => Opcode::Div,
            Instruction::Store(_) => Opcode::Store,
            Instruction::Jmp(_) => Opcode::Jmp,
            Instruction::Jz(_) => Opcode::Jz,
            Instruction::Print => Opcode::Print,
            Instruction::Mov => Opcode::Mov,
            Instruction::Halt => Opcode::Halt,
        }
    }

    pub const fn operand(&self) -> Option<Word> {
        match *self {
            Instruction::Load(v)
            | Instruction::Add(v)
            | Instruction::Sub(v)
            | Instruction::Mul(v)
            | Instruction::Div(v)
            | Instruction::Store(v)
            | Instruction::Jmp(v)
            | Instruction::Jz(v) => Some(v),
            Instruction::Print | Instruction::Mov | Instruction::Halt => None,
        }
    }

    #[inline(always)]
    pub const fn width(&self) -> usize {
        self.opcode().width()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.operand() {
            Some(v) => write!(f, "{} {}", self.opcode(), v),
            None => write!(f, "{}", self.opcode()),
        }
    }
}
