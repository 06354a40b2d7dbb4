//! CH55x special-function-register storage.
//!
//! The SFR space is one flat array, one cell per address:
//!
//! | Address Range | Content                          |
//! |---------------|----------------------------------|
//! | 0x00–0x7F     | internal RAM (not modelled here) |
//! | 0x80–0xFF     | SFR cells (128 bytes)            |
//!
//! Every name in the register map, aliases included, resolves to one of
//! these cells. Access here is raw: no access classes, no side effects.

use crate::sfr::{SFR_BASE, SFR_COUNT};

/// Canonical storage for the SFR space.
#[derive(Clone, PartialEq, Eq)]
pub struct SfrFile {
    cells: [u8; SFR_COUNT],
}

impl SfrFile {
    pub fn new() -> Self {
        SfrFile { cells: [0u8; SFR_COUNT] }
    }

    #[inline(always)]
    fn index(addr: u8) -> Option<usize> {
        addr.checked_sub(SFR_BASE).map(|i| i as usize)
    }

    /// Read a cell. Addresses below 0x80 read as zero.
    #[inline(always)]
    pub fn get(&self, addr: u8) -> u8 {
        match Self::index(addr) {
            Some(i) => self.cells[i],
            None => 0,
        }
    }

    /// Write a cell. Addresses below 0x80 are ignored.
    #[inline(always)]
    pub fn set(&mut self, addr: u8, v: u8) {
        if let Some(i) = Self::index(addr) {
            self.cells[i] = v;
        }
    }

    /// Read a little-endian pair: `addr` is the low byte, `addr + 1` the high byte.
    #[inline(always)]
    pub fn pair(&self, addr: u8) -> u16 {
        self.get(addr) as u16 | ((self.get(addr.wrapping_add(1)) as u16) << 8)
    }

    /// Write a little-endian pair, low byte first.
    #[inline(always)]
    pub fn set_pair(&mut self, addr: u8, v: u16) {
        self.set(addr, v as u8);
        self.set(addr.wrapping_add(1), (v >> 8) as u8);
    }

    #[inline(always)]
    pub fn test_bit(&self, addr: u8, bit: u8) -> bool {
        self.get(addr) & (1 << (bit & 7)) != 0
    }

    pub fn set_bit(&mut self, addr: u8, bit: u8, on: bool) {
        let mask = 1 << (bit & 7);
        let v = self.get(addr);
        self.set(addr, if on { v | mask } else { v & !mask });
    }

    pub fn clear(&mut self) {
        self.cells = [0u8; SFR_COUNT];
    }

    /// All cells, index 0 = address 0x80.
    pub fn as_bytes(&self) -> &[u8] {
        &self.cells
    }

    /// Replace all cells. Returns false, leaving the file untouched, if
    /// `bytes` is not exactly 128 long.
    pub fn load(&mut self, bytes: &[u8]) -> bool {
        if bytes.len() != SFR_COUNT {
            return false;
        }
        self.cells.copy_from_slice(bytes);
        true
    }
}

impl Default for SfrFile {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SfrFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let nonzero = self.cells.iter().filter(|&&c| c != 0).count();
        write!(f, "SfrFile {{ {} non-zero cells }}", nonzero)
    }
}
