//! Debugging facilities.
//!
//! - **SFR Viewer**: Named register display, hex dump and diff of the register file
//! - **Watchpoints**: Trigger on bus writes to specified SFR addresses
//!
//! Watchpoints are checked in the chip's `write_addr` path when any are set.
//! Raw `poke` writes are hardware-side and never trigger them.

use log::info;

use crate::map;
use crate::memory::SfrFile;
use crate::sfr::{SFR_BASE, SFR_COUNT};

/// A write watchpoint on one SFR address.
#[derive(Debug, Clone)]
pub struct Watchpoint {
    /// SFR address to watch
    pub addr: u8,
    /// Optional: only trigger when this value is written
    pub value_match: Option<u8>,
    /// Hit count
    pub hits: u64,
    /// Enabled
    pub enabled: bool,
}

/// Watchpoint trigger event.
#[derive(Debug)]
pub struct WatchHit {
    /// Watchpoint index
    pub index: usize,
    /// Address that triggered
    pub addr: u8,
    /// Cell value before the write
    pub old_val: u8,
    /// Value written by firmware
    pub new_val: u8,
}

/// Debugger state.
pub struct Debugger {
    /// Active watchpoints
    pub watchpoints: Vec<Watchpoint>,
    /// First hit since the last `take_hit`
    pub watch_hit: Option<WatchHit>,
}

impl Debugger {
    pub fn new() -> Self {
        Debugger {
            watchpoints: Vec::new(),
            watch_hit: None,
        }
    }

    /// Add a watchpoint. Returns its index.
    pub fn add_watchpoint(&mut self, addr: u8) -> usize {
        let idx = self.watchpoints.len();
        self.watchpoints.push(Watchpoint {
            addr,
            value_match: None,
            hits: 0,
            enabled: true,
        });
        idx
    }

    /// Add a watchpoint that only triggers when `value` is written.
    pub fn add_value_watchpoint(&mut self, addr: u8, value: u8) -> usize {
        let idx = self.add_watchpoint(addr);
        self.watchpoints[idx].value_match = Some(value);
        idx
    }

    /// Remove a watchpoint by index.
    pub fn remove_watchpoint(&mut self, idx: usize) -> bool {
        if idx < self.watchpoints.len() {
            self.watchpoints.remove(idx);
            true
        } else {
            false
        }
    }

    /// Check watchpoints for a bus write. Call before the cell is updated.
    #[inline]
    pub fn check_write(&mut self, addr: u8, old_val: u8, new_val: u8) {
        for (i, wp) in self.watchpoints.iter_mut().enumerate() {
            if !wp.enabled || wp.addr != addr { continue; }
            if let Some(v) = wp.value_match {
                if new_val != v { continue; }
            }
            wp.hits += 1;
            info!("watchpoint {} hit: {} 0x{:02X} -> 0x{:02X}", i, sfr_name(addr), old_val, new_val);
            if self.watch_hit.is_none() {
                self.watch_hit = Some(WatchHit { index: i, addr, old_val, new_val });
            }
        }
    }

    /// Take pending watchpoint hit (returns and clears it).
    pub fn take_hit(&mut self) -> Option<WatchHit> {
        self.watch_hit.take()
    }

    /// Format watchpoints list.
    pub fn list_watchpoints(&self) -> String {
        if self.watchpoints.is_empty() { return "No watchpoints set.\n".into(); }
        let mut s = String::new();
        for (i, wp) in self.watchpoints.iter().enumerate() {
            let en = if wp.enabled { " " } else { "!" };
            let vm = if let Some(v) = wp.value_match {
                format!(" =0x{:02X}", v)
            } else { String::new() };
            s.push_str(&format!("  [{}]{} 0x{:02X} {:<10} hits={}{}\n",
                i, en, wp.addr, sfr_name(wp.addr), wp.hits, vm));
        }
        s
    }
}

impl Default for Debugger {
    fn default() -> Self {
        Self::new()
    }
}

// ─── SFR Viewer ─────────────────────────────────────────────────────────────

/// Every name declared at `addr`, joined with `/`, or the hex address if none.
pub fn sfr_name(addr: u8) -> String {
    let names: Vec<&str> = map::names_at(addr).map(|r| r.name).collect();
    if names.is_empty() { format!("0x{:02X}", addr) } else { names.join("/") }
}

/// Mapped addresses with their joined names, in address order.
fn named_addresses() -> impl Iterator<Item = (u8, String)> {
    (SFR_BASE..=0xFF).filter_map(|addr| {
        if map::names_at(addr).next().is_none() { return None; }
        Some((addr, sfr_name(addr)))
    })
}

/// Format named register dump, non-zero registers only.
pub fn dump_sfrs(file: &SfrFile) -> String {
    let mut s = String::new();
    for (addr, name) in named_addresses() {
        let val = file.get(addr);
        if val == 0 { continue; }
        s.push_str(&format!("  {:>16} (0x{:02X}) = 0x{:02X}  {:08b}\n", name, addr, val, val));
    }
    if s.is_empty() { s.push_str("  (all zero)\n"); }
    s
}

/// Format a compact dump showing every named register.
pub fn dump_sfrs_all(file: &SfrFile) -> String {
    let mut s = String::new();
    let mut col = 0;
    for (addr, name) in named_addresses() {
        s.push_str(&format!("{:>16}={:02X}", name, file.get(addr)));
        col += 1;
        if col % 4 == 0 { s.push('\n'); } else { s.push_str("  "); }
    }
    if col % 4 != 0 { s.push('\n'); }
    s
}

/// Hex dump of the whole SFR space, 16 cells per line.
pub fn dump_sfr_hex(file: &SfrFile) -> String {
    let mut s = String::new();
    for (row, chunk) in file.as_bytes().chunks(16).enumerate() {
        s.push_str(&format!("{:02X}: ", SFR_BASE as usize + row * 16));
        for (i, v) in chunk.iter().enumerate() {
            s.push_str(&format!("{:02X} ", v));
            if i == 7 { s.push(' '); }
        }
        s.push('\n');
    }
    s
}

/// Cells that differ between two register files.
pub fn dump_sfr_diff(old: &SfrFile, new: &SfrFile) -> String {
    let mut s = String::new();
    for i in 0..SFR_COUNT {
        let addr = SFR_BASE + i as u8;
        let (a, b) = (old.get(addr), new.get(addr));
        if a == b { continue; }
        s.push_str(&format!("  {:>16} (0x{:02X}): {:02X} → {:02X}\n", sfr_name(addr), addr, a, b));
    }
    if s.is_empty() { s.push_str("  (no changes)\n"); }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sfr_name_joins_aliases() {
        assert_eq!(sfr_name(0xA1), "SAFE_MOD/CHIP_ID");
        assert_eq!(sfr_name(0xE0), "ACC");
        assert_eq!(sfr_name(0x94), "0x94");
    }

    #[test]
    fn test_dump_sfrs() {
        let mut file = SfrFile::new();
        assert!(dump_sfrs(&file).contains("(all zero)"));
        file.set(0xE0, 0x41);
        let dump = dump_sfrs(&file);
        assert!(dump.contains("ACC (0xE0) = 0x41  01000001"));
        assert!(!dump.contains("PSW"));
    }

    #[test]
    fn test_dump_sfrs_all_lists_every_address_once() {
        let file = SfrFile::new();
        let dump = dump_sfrs_all(&file);
        assert_eq!(dump.matches("SAFE_MOD/CHIP_ID=00").count(), 1);
        assert!(dump.contains("ACC=00"));
        assert!(dump.ends_with('\n'));
    }

    #[test]
    fn test_dump_sfr_hex() {
        let mut file = SfrFile::new();
        file.set(0x81, 0x07);
        let dump = dump_sfr_hex(&file);
        assert_eq!(dump.lines().count(), 8);
        assert!(dump.starts_with("80: 00 07 "));
        assert!(dump.contains("F0: "));
    }

    #[test]
    fn test_dump_sfr_diff() {
        let old = SfrFile::new();
        let mut new = SfrFile::new();
        assert!(dump_sfr_diff(&old, &new).contains("(no changes)"));
        new.set(0x81, 0x07);
        assert!(dump_sfr_diff(&old, &new).contains("SP (0x81): 00 → 07"));
    }

    #[test]
    fn test_watchpoint_value_match() {
        let mut dbg = Debugger::new();
        let idx = dbg.add_value_watchpoint(0xE2, 0x80);
        dbg.check_write(0xE2, 0x00, 0x06);
        assert!(dbg.take_hit().is_none());
        dbg.check_write(0xE2, 0x06, 0x80);
        let hit = dbg.take_hit().unwrap();
        assert_eq!(hit.index, idx);
        assert_eq!(hit.old_val, 0x06);
        assert_eq!(dbg.watchpoints[idx].hits, 1);
    }

    #[test]
    fn test_watchpoint_disable_and_remove() {
        let mut dbg = Debugger::new();
        dbg.add_watchpoint(0xA1);
        dbg.watchpoints[0].enabled = false;
        dbg.check_write(0xA1, 0, 0x55);
        assert!(dbg.take_hit().is_none());
        assert!(dbg.list_watchpoints().contains("[0]! 0xA1 SAFE_MOD/CHIP_ID"));
        assert!(dbg.remove_watchpoint(0));
        assert!(!dbg.remove_watchpoint(0));
        assert_eq!(dbg.list_watchpoints(), "No watchpoints set.\n");
    }

    #[test]
    fn test_first_hit_is_kept() {
        let mut dbg = Debugger::new();
        dbg.add_watchpoint(0x81);
        dbg.check_write(0x81, 0, 1);
        dbg.check_write(0x81, 1, 2);
        assert_eq!(dbg.take_hit().unwrap().new_val, 1);
        assert_eq!(dbg.watchpoints[0].hits, 2);
    }
}
