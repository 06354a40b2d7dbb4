//! Typed special-function-register declarations.
//!
//! Every register of the chip is declared once (see [`crate::map`]) as a
//! small `Copy` value carrying its address and name, with its access class in
//! the type:
//!
//! | Marker | Read | Write |
//! |--------|------|-------|
//! | [`RW`] | yes  | yes   |
//! | [`RO`] | yes  | no    |
//! | [`WO`] | no   | yes   |
//!
//! The accessors on [`Ch55x`](crate::Ch55x) are bounded on [`Readable`] and
//! [`Writable`], so a read of a write-only register is a compile error:
//!
//! ```compile_fail
//! let chip = ch55x_core::Ch55x::new();
//! let _ = chip.read(ch55x_core::map::SAFE_MOD);
//! ```
//!
//! and so is a write to a read-only one:
//!
//! ```compile_fail
//! let mut chip = ch55x_core::Ch55x::new();
//! chip.write(ch55x_core::map::CHIP_ID, 0x55);
//! ```
//!
//! ```compile_fail
//! let mut chip = ch55x_core::Ch55x::new();
//! chip.set_bit(ch55x_core::map::P, true);
//! ```
//!
//! Construction is `const` and asserts the silicon rules, so a bad
//! declaration fails the build:
//!
//! ```compile_fail
//! use ch55x_core::sfr::{SBit, ClearMode, RW};
//! const BAD: SBit<RW> = SBit::new(0xD1, 0, "BAD", ClearMode::Software);
//! let _ = BAD;
//! ```

use core::fmt;
use core::marker::PhantomData;

use crate::interrupt::Interrupt;

/// Lowest address of the special-function-register space.
pub const SFR_BASE: u8 = 0x80;
/// Number of byte cells in the SFR space (0x80..=0xFF).
pub const SFR_COUNT: usize = 128;

/// Runtime view of an access class, used by the map tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    ReadWrite,
    ReadOnly,
    WriteOnly,
}

impl Access {
    pub const fn readable(self) -> bool {
        !matches!(self, Access::WriteOnly)
    }

    pub const fn writable(self) -> bool {
        !matches!(self, Access::ReadOnly)
    }

    /// True if every access `other` allows is also allowed by `self`.
    pub const fn permits(self, other: Access) -> bool {
        (self.readable() || !other.readable()) && (self.writable() || !other.writable())
    }

    pub const fn same_as(self, other: Access) -> bool {
        self as u8 == other as u8
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Access::ReadWrite => "RW",
            Access::ReadOnly => "RO",
            Access::WriteOnly => "WO",
        })
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::RW {}
    impl Sealed for super::RO {}
    impl Sealed for super::WO {}
}

/// Type-level access class.
pub trait AccessClass: sealed::Sealed {
    const ACCESS: Access;
}

/// Access classes that may be read.
pub trait Readable: AccessClass {}

/// Access classes that may be written.
pub trait Writable: AccessClass {}

/// Read-write.
#[derive(Debug)]
pub enum RW {}
/// Read-only.
#[derive(Debug)]
pub enum RO {}
/// Write-only.
#[derive(Debug)]
pub enum WO {}

impl AccessClass for RW {
    const ACCESS: Access = Access::ReadWrite;
}
impl AccessClass for RO {
    const ACCESS: Access = Access::ReadOnly;
}
impl AccessClass for WO {
    const ACCESS: Access = Access::WriteOnly;
}

impl Readable for RW {}
impl Readable for RO {}
impl Writable for RW {}
impl Writable for WO {}

/// How a flag bit returns to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearMode {
    /// Hardware never clears it; software writes it (direct bit clear or byte write).
    Software,
    /// Hardware clears it when the CPU vectors to the given interrupt.
    OnInterruptEntry(Interrupt),
    /// Hardware clears it when the operation it started completes.
    OnCompletion,
}

impl ClearMode {
    /// True if a read-modify-write racing with an interrupt handler can lose
    /// this flag, i.e. software must clear it and protect the access.
    pub const fn needs_software_clear(self) -> bool {
        matches!(self, ClearMode::Software)
    }
}

// ─── Byte registers ─────────────────────────────────────────────────────────

/// An 8-bit special function register.
pub struct Sfr<A> {
    addr: u8,
    name: &'static str,
    _access: PhantomData<fn() -> A>,
}

impl<A> Clone for Sfr<A> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<A> Copy for Sfr<A> {}

impl<A: AccessClass> Sfr<A> {
    pub const fn new(addr: u8, name: &'static str) -> Self {
        assert!(addr >= SFR_BASE, "SFR address below 0x80");
        Sfr { addr, name, _access: PhantomData }
    }

    #[inline(always)]
    pub const fn addr(self) -> u8 {
        self.addr
    }

    pub const fn name(self) -> &'static str {
        self.name
    }

    pub const fn access(self) -> Access {
        A::ACCESS
    }

    pub const fn info(self) -> SfrInfo {
        SfrInfo { name: self.name, addr: self.addr, access: A::ACCESS }
    }
}

impl<A: AccessClass> fmt::Debug for Sfr<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@0x{:02X}({})", self.name, self.addr, A::ACCESS)
    }
}

// ─── 16-bit pairs ───────────────────────────────────────────────────────────

/// A 16-bit register made of two adjacent byte registers, low byte first.
///
/// Both halves stay available as ordinary [`Sfr`]s. A 16-bit access is two
/// byte accesses and is not atomic with respect to interrupts.
pub struct Sfr16<A> {
    name: &'static str,
    low: Sfr<A>,
    high: Sfr<A>,
}

impl<A> Clone for Sfr16<A> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<A> Copy for Sfr16<A> {}

impl<A: AccessClass> Sfr16<A> {
    pub const fn new(name: &'static str, low: Sfr<A>, high: Sfr<A>) -> Self {
        assert!(low.addr < 0xFF, "16-bit SFR must not start at 0xFF");
        assert!(high.addr == low.addr + 1, "16-bit SFR halves must be adjacent");
        Sfr16 { name, low, high }
    }

    /// Address of the low byte.
    pub const fn addr(self) -> u8 {
        self.low.addr
    }

    pub const fn name(self) -> &'static str {
        self.name
    }

    pub const fn low(self) -> Sfr<A> {
        self.low
    }

    pub const fn high(self) -> Sfr<A> {
        self.high
    }

    pub const fn info(self) -> WideInfo {
        WideInfo { name: self.name, addr: self.low.addr, access: A::ACCESS }
    }
}

impl<A: AccessClass> fmt::Debug for Sfr16<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@0x{:02X}:{:02X}({})", self.name, self.high.addr, self.low.addr, A::ACCESS)
    }
}

// ─── Bit-addressable flags ──────────────────────────────────────────────────

/// A single bit of a bit-addressable register.
///
/// Only registers at addresses divisible by 8 are bit-addressable. The bit
/// has no storage of its own: it is a mask over its owning byte.
pub struct SBit<A> {
    addr: u8,
    bit: u8,
    name: &'static str,
    clear: ClearMode,
    _access: PhantomData<fn() -> A>,
}

impl<A> Clone for SBit<A> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<A> Copy for SBit<A> {}

impl<A: AccessClass> SBit<A> {
    pub const fn new(addr: u8, bit: u8, name: &'static str, clear: ClearMode) -> Self {
        assert!(addr >= SFR_BASE, "SFR address below 0x80");
        assert!(addr % 8 == 0, "register is not bit-addressable");
        assert!(bit < 8, "bit index outside 0..=7");
        SBit { addr, bit, name, clear, _access: PhantomData }
    }

    /// Address of the owning byte register.
    #[inline(always)]
    pub const fn addr(self) -> u8 {
        self.addr
    }

    pub const fn bit(self) -> u8 {
        self.bit
    }

    #[inline(always)]
    pub const fn mask(self) -> u8 {
        1 << self.bit
    }

    pub const fn name(self) -> &'static str {
        self.name
    }

    pub const fn clear_mode(self) -> ClearMode {
        self.clear
    }

    /// Bit address in the 8051 bit space (owner address + bit index).
    pub const fn bit_address(self) -> u8 {
        self.addr + self.bit
    }

    pub const fn info(self) -> BitInfo {
        BitInfo {
            name: self.name,
            addr: self.addr,
            bit: self.bit,
            access: A::ACCESS,
            clear: self.clear,
        }
    }
}

impl<A: AccessClass> fmt::Debug for SBit<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@0x{:02X}.{}({})", self.name, self.addr, self.bit, A::ACCESS)
    }
}

// ─── Table records ──────────────────────────────────────────────────────────

/// Table entry for a byte register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SfrInfo {
    pub name: &'static str,
    pub addr: u8,
    pub access: Access,
}

/// Table entry for a 16-bit register; `addr` is the low byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WideInfo {
    pub name: &'static str,
    pub addr: u8,
    pub access: Access,
}

/// Table entry for a bit-addressable flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitInfo {
    pub name: &'static str,
    pub addr: u8,
    pub bit: u8,
    pub access: Access,
    pub clear: ClearMode,
}

impl BitInfo {
    pub const fn mask(&self) -> u8 {
        1 << (self.bit & 7)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_permits() {
        assert!(Access::ReadWrite.permits(Access::ReadOnly));
        assert!(Access::ReadWrite.permits(Access::WriteOnly));
        assert!(Access::ReadOnly.permits(Access::ReadOnly));
        assert!(!Access::ReadOnly.permits(Access::ReadWrite));
        assert!(!Access::WriteOnly.permits(Access::ReadOnly));
    }

    #[test]
    fn test_bit_mask_and_address() {
        const CY: SBit<RW> = SBit::new(0xD0, 7, "CY", ClearMode::Software);
        assert_eq!(CY.mask(), 0x80);
        assert_eq!(CY.bit_address(), 0xD7);
        assert_eq!(CY.info().access, Access::ReadWrite);
    }

    #[test]
    fn test_pair_halves() {
        const LO: Sfr<RW> = Sfr::new(0x82, "DPL");
        const HI: Sfr<RW> = Sfr::new(0x83, "DPH");
        const PAIR: Sfr16<RW> = Sfr16::new("DPTR", LO, HI);
        assert_eq!(PAIR.addr(), 0x82);
        assert_eq!(PAIR.high().addr(), 0x83);
        assert_eq!(format!("{:?}", PAIR), "DPTR@0x83:82(RW)");
    }

    #[test]
    fn test_clear_mode() {
        assert!(ClearMode::Software.needs_software_clear());
        assert!(!ClearMode::OnInterruptEntry(Interrupt::Timer0).needs_software_clear());
        assert!(!ClearMode::OnCompletion.needs_software_clear());
    }
}
