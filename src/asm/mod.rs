/*!
 * Assembler
 * Two-pass text assembler and disassembler over the engine's opcode table
 *
 * Source is line oriented:
 *
 * ```text
 * # comment
 * start:
 *     LOAD 5
 *     JZ start
 *     HALT
 * ```
 *
 * Operand cells are emitted only for opcodes whose operand width is 1, so
 * label addresses computed in the first pass always match the emitted code.
 */

pub mod programs;

use crate::core::types::{Address, Word};
use crate::cpu::{Instruction, Opcode};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::str::FromStr;
use tracing::{debug, warn};

/// An operand as written in source
#[derive(Debug, Clone, PartialEq, Eq)]
enum Operand {
    Integer(Word),
    Label(String),
}

impl FromStr for Operand {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let token = input.trim();
        if let Ok(num) = token.parse::<Word>() {
            Ok(Operand::Integer(num))
        } else if !token.is_empty() {
            Ok(Operand::Label(token.to_string()))
        } else {
            Err(format!("Invalid operand: {:?}", input))
        }
    }
}

/// One classified source line
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Blank,
    Label(&'a str),
    Statement {
        opcode: Opcode,
        operand: Option<&'a str>,
    },
    Unknown(&'a str),
}

fn parse_line(raw: &str) -> Line<'_> {
    let line = raw.split('#').next().unwrap_or_default().trim();
    if line.is_empty() {
        return Line::Blank;
    }
    if let Some(label) = line.strip_suffix(':') {
        return Line::Label(label.trim());
    }

    let mut tokens = line.split_whitespace();
    let Some(mnemonic) = tokens.next() else {
        return Line::Blank;
    };
    match Opcode::from_mnemonic(mnemonic) {
        Some(opcode) => Line::Statement {
            opcode,
            operand: tokens.next(),
        },
        None => Line::Unknown(mnemonic),
    }
}

fn resolve(operand: Option<&str>, symbols: &HashMap<&str, Address>) -> Word {
    let Some(token) = operand else {
        return 0;
    };
    if let Some(&address) = symbols.get(token) {
        return address as Word;
    }
    match token.parse::<Operand>() {
        Ok(Operand::Integer(value)) => value,
        Ok(Operand::Label(label)) => {
            warn!(label = %label, "Undefined label, assembling as 0");
            0
        }
        Err(_) => 0,
    }
}

/// Assemble source text into a program image
pub fn assemble(source: &str) -> Vec<Word> {
    let lines: Vec<Line<'_>> = source.lines().map(parse_line).collect();

    // Pass 1: bind labels to addresses
    let mut symbols = HashMap::new();
    let mut address: Address = 0;
    for line in &lines {
        match line {
            Line::Label(name) => {
                symbols.insert(*name, address);
            }
            Line::Statement { opcode, .. } => address += opcode.width(),
            Line::Blank | Line::Unknown(_) => {}
        }
    }

    // Pass 2: emit code
    let mut program = Vec::with_capacity(address);
    for (number, line) in lines.iter().enumerate() {
        match *line {
            Line::Statement { opcode, operand } => {
                program.push(opcode.word());
                if opcode.operand_width() == 1 {
                    program.push(resolve(operand, &symbols));
                }
            }
            Line::Unknown(mnemonic) => {
                warn!(line = number + 1, mnemonic, "Unknown mnemonic skipped");
            }
            Line::Blank | Line::Label(_) => {}
        }
    }

    debug!(len = program.len(), labels = symbols.len(), "Assembled program");
    program
}

/// One disassembled instruction or data cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisassembledLine {
    pub address: Address,
    pub text: String,
}

/// Walk a program image with the engine's decode widths
pub fn disassemble(program: &[Word]) -> Vec<DisassembledLine> {
    let mut lines = Vec::new();
    let mut address = 0;

    while address < program.len() {
        let cell = program[address];
        let (text, width) = match Opcode::from_word(cell) {
            Some(opcode) if opcode.operand_width() == 1 => match program.get(address + 1) {
                Some(&operand) => (
                    Instruction::decode(opcode, Some(operand)).to_string(),
                    2,
                ),
                // Trailing opcode missing its operand
                None => (opcode.mnemonic().to_string(), 1),
            },
            Some(opcode) => (opcode.mnemonic().to_string(), 1),
            None => (format!("DATA {}", cell), 1),
        };
        lines.push(DisassembledLine { address, text });
        address += width;
    }

    lines
}

/// Disassembly as `"  0: LOAD 5"` lines
pub fn disassemble_listing(program: &[Word]) -> String {
    let mut out = String::new();
    for (i, line) in disassemble(program).iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = write!(out, "{:3}: {}", line.address, line.text);
    }
    out
}
