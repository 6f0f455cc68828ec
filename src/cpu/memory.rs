/*!
 * Memory
 * Fixed-size linear cell array shared by every process
 */

use crate::core::types::{Address, Word};

/// Linear memory. Out-of-range accesses return `None` / `false`, never panic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
    cells: Vec<Word>,
}

impl Memory {
    pub fn new(size: usize) -> Self {
        Self {
            cells: vec![0; size],
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Map a memory word used as an address to a valid index
    #[inline]
    pub fn index(&self, address: Word) -> Option<Address> {
        Address::try_from(address)
            .ok()
            .filter(|&idx| idx < self.cells.len())
    }

    #[inline]
    pub fn get(&self, index: Address) -> Option<Word> {
        self.cells.get(index).copied()
    }

    /// Read through a word-valued address
    pub fn read(&self, address: Word) -> Option<Word> {
        self.index(address).map(|idx| self.cells[idx])
    }

    /// Write through a word-valued address; returns false when out of range
    pub fn write(&mut self, address: Word, value: Word) -> bool {
        match self.index(address) {
            Some(idx) => {
                self.cells[idx] = value;
                true
            }
            None => false,
        }
    }

    /// Copy a program image to address 0, truncated to the memory size.
    /// Cells past the image keep their previous contents.
    pub fn load(&mut self, image: &[Word]) -> usize {
        let n = image.len().min(self.cells.len());
        self.cells[..n].copy_from_slice(&image[..n]);
        n
    }

    pub fn cells(&self) -> &[Word] {
        &self.cells
    }

    pub fn clear(&mut self) {
        self.cells.fill(0);
    }
}
