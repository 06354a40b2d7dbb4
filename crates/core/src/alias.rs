//! Alias groups: names that denote one storage cell.
//!
//! An alias never owns storage. Each group lists the names that share an
//! address (or a bit position) and says how the active name is chosen:
//!
//! - **Direction**: the first name is the write view (write-only), the second
//!   the read view (read-only). `SAFE_MOD`/`CHIP_ID`, `ROM_CTRL`/`ROM_STATUS`.
//! - **Mode**: a selector bit elsewhere picks the name. Clear selects the
//!   first name, set selects the second.
//! - **PinFunction**: every name of a multiplexed port pin. The first name is
//!   reported; which function is driving the pin is up to the peripheral
//!   configuration.

use crate::memory::SfrFile;

/// Direction of a bus access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusDirection {
    Read,
    Write,
}

/// A single bit elsewhere in the register file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selector {
    pub addr: u8,
    pub mask: u8,
}

impl Selector {
    pub fn is_set(&self, file: &SfrFile) -> bool {
        file.get(self.addr) & self.mask != 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasKind {
    Direction,
    Mode(Selector),
    PinFunction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AliasGroup {
    pub kind: AliasKind,
    pub names: &'static [&'static str],
}

impl AliasGroup {
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| *n == name)
    }

    /// Name in effect for an access in `dir` given the current register state.
    pub fn resolve(&self, file: &SfrFile, dir: BusDirection) -> &'static str {
        let idx = match self.kind {
            AliasKind::Direction => match dir {
                BusDirection::Write => 0,
                BusDirection::Read => 1,
            },
            AliasKind::Mode(sel) => sel.is_set(file) as usize,
            AliasKind::PinFunction => 0,
        };
        self.names.get(idx).or(self.names.first()).copied().unwrap_or("")
    }
}

// USB_CTRL.bUC_HOST_MODE
const HOST_MODE: Selector = Selector { addr: 0xE2, mask: 0x80 };
// SPI0_SETUP.bS0_MODE_SLV
const SPI_SLAVE: Selector = Selector { addr: 0xFC, mask: 0x80 };
// T2MOD.bT2_CAP1_EN
const T2_CAPTURE1: Selector = Selector { addr: 0xC9, mask: 0x01 };

const fn direction(names: &'static [&'static str]) -> AliasGroup {
    AliasGroup { kind: AliasKind::Direction, names }
}

const fn mode(sel: Selector, names: &'static [&'static str]) -> AliasGroup {
    AliasGroup { kind: AliasKind::Mode(sel), names }
}

const fn pin(names: &'static [&'static str]) -> AliasGroup {
    AliasGroup { kind: AliasKind::PinFunction, names }
}

/// Every alias the chip defines.
pub const ALIASES: &[AliasGroup] = &[
    direction(&["SAFE_MOD", "CHIP_ID"]),
    direction(&["ROM_CTRL", "ROM_STATUS"]),
    mode(HOST_MODE, &["UDEV_CTRL", "UHOST_CTRL"]),
    mode(HOST_MODE, &["UIF_BUS_RST", "UIF_DETECT"]),
    mode(SPI_SLAVE, &["SPI0_CK_SE", "SPI0_S_PRE"]),
    mode(T2_CAPTURE1, &["TF2", "CAP1F"]),
    // P1
    pin(&["SCK", "TXD1", "TIN5"]),
    pin(&["MISO", "RXD1", "TIN4"]),
    pin(&["MOSI", "PWM1", "TIN3", "UCC2", "AIN2"]),
    pin(&["T2_", "CAP1_", "SCS", "TIN2", "UCC1", "AIN1"]),
    pin(&["T2EX", "CAP2", "TIN1", "VBUS2", "AIN0"]),
    pin(&["T2", "CAP1", "TIN0"]),
    // P3
    pin(&["PWM2", "RXD1_", "T0"]),
    pin(&["TXD1_", "INT0", "VBUS1", "AIN3"]),
    pin(&["PWM2_", "TXD"]),
    pin(&["PWM1_", "RXD"]),
];

/// The alias group `name` belongs to, if any.
pub fn group_of(name: &str) -> Option<&'static AliasGroup> {
    ALIASES.iter().find(|g| g.contains(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_of() {
        let g = group_of("CHIP_ID").unwrap();
        assert_eq!(g.kind, AliasKind::Direction);
        assert_eq!(g.names[0], "SAFE_MOD");
        assert!(group_of("ACC").is_none());
        assert_eq!(group_of("AIN1").unwrap().names.len(), 6);
    }

    #[test]
    fn test_resolve_direction() {
        let file = SfrFile::new();
        let g = group_of("ROM_STATUS").unwrap();
        assert_eq!(g.resolve(&file, BusDirection::Write), "ROM_CTRL");
        assert_eq!(g.resolve(&file, BusDirection::Read), "ROM_STATUS");
    }

    #[test]
    fn test_resolve_mode() {
        let mut file = SfrFile::new();
        let g = group_of("UHOST_CTRL").unwrap();
        assert_eq!(g.resolve(&file, BusDirection::Read), "UDEV_CTRL");
        file.set(0xE2, 0x80);
        assert_eq!(g.resolve(&file, BusDirection::Read), "UHOST_CTRL");
        assert_eq!(group_of("UIF_DETECT").unwrap().resolve(&file, BusDirection::Read), "UIF_DETECT");

        let t2 = group_of("TF2").unwrap();
        assert_eq!(t2.resolve(&file, BusDirection::Read), "TF2");
        file.set(0xC9, 0x01);
        assert_eq!(t2.resolve(&file, BusDirection::Read), "CAP1F");
    }

    #[test]
    fn test_pin_function_reports_first_name() {
        let file = SfrFile::new();
        let g = group_of("RXD").unwrap();
        assert_eq!(g.resolve(&file, BusDirection::Write), "PWM1_");
    }
}
