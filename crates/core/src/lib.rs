//! # ch55x-core
//!
//! Special-function-register model and USB protocol layer for the WCH CH552
//! and CH554, 8051-core microcontrollers with a full-speed USB device/host
//! engine, 16 KB code flash, 1 KB xRAM, timers 0/1/2, two UARTs, SPI, PWM,
//! ADC and touch-key.
//!
//! ## Architecture
//!
//! - [`Ch55x`]: Owned register-file handle with typed accessors and the
//!   hardware side effects of the bus write path
//! - [`ChipType`]: Target chip selection (CH552 or CH554)
//! - [`sfr`]: Access-class markers and typed `Sfr`/`Sfr16`/`SBit` declarations
//! - [`map`]: Every register, 16-bit pair and bit-addressable flag of the chip
//! - [`fields`]: Bit masks and field values of the byte registers
//! - [`alias`]: Names that share one storage cell
//! - [`validate`]: Register-map checks, run at compile time on the built-in map
//! - [`memory`]: Canonical 128-byte SFR storage
//! - [`interrupt`]: Interrupt numbers, vectors, enable bits and [`IrqGuard`]
//! - [`debugger`]: Named register dumps and write watchpoints
//! - [`savestate`]: Register-file snapshots
//! - [`usb`]: USB protocol constants, descriptors and bulk-only wrappers
//!
//! ## Bus semantics
//!
//! [`Ch55x::read`] and [`Ch55x::write`] model what firmware sees:
//!
//! 1. **SAFE_MOD / CHIP_ID**: writes drive the safe-mode unlock sequence,
//!    reads return the chip identifier
//! 2. **Write@SafeMode**: `GLOBAL_CFG`, `CLOCK_CFG` and `WAKE_CTRL` drop
//!    writes unless safe mode is open
//! 3. **ROM_CTRL / ROM_STATUS**: writes latch a flash command, reads return
//!    the command status
//! 4. **Read-only bits**: preserved on byte writes to their register
//!
//! [`Ch55x::peek`] and [`Ch55x::poke`] are the hardware side: raw cell access
//! for peripheral models and tests.

pub mod alias;
pub mod debugger;
pub mod fields;
pub mod interrupt;
pub mod map;
pub mod memory;
pub mod savestate;
pub mod sfr;
pub mod usb;
pub mod validate;

use log::{debug, warn};

pub use alias::BusDirection;
pub use debugger::Debugger;
pub use interrupt::{Interrupt, IrqGuard};
pub use memory::SfrFile;
pub use savestate::{SfrState, StateError};
pub use sfr::{Readable, SBit, Sfr, Sfr16, Writable, RO, RW, WO};
pub use usb::UsbError;
pub use validate::MapError;

use fields::{global_cfg, pcon, rom_ctrl, rom_status, safe_mod, tkey_ctrl, xbus_aux};

// CH55x constants
/// Size of the on-chip xRAM
pub const XDATA_RAM_SIZE: usize = 0x0400;
/// `CHIP_ID` of the CH552
pub const ID_CH552: u8 = 0x52;
/// `CHIP_ID` of the CH554
pub const ID_CH554: u8 = 0x54;
/// Start of the boot loader in code space
pub const BOOT_LOAD_ADDR: u16 = 0x3800;
/// Chip configuration word
pub const ROM_CFG_ADDR: u16 = 0x3FF8;
/// Chip ID number highest byte (only the low byte is valid)
pub const ROM_CHIP_ID_HX: u16 = 0x3FFA;
/// Chip ID number low word
pub const ROM_CHIP_ID_LO: u16 = 0x3FFC;
/// Chip ID number high word
pub const ROM_CHIP_ID_HI: u16 = 0x3FFE;
/// Start of the 128-byte Data-Flash (even addresses only)
pub const DATA_FLASH_ADDR: u16 = 0xC000;
const DATA_FLASH_END: u16 = 0xC100;

// SFR addresses with bus side effects
const SAFE_MOD_ADDR: u8 = map::SAFE_MOD.addr();
const ROM_CTRL_ADDR: u8 = map::ROM_CTRL.addr();
const GLOBAL_CFG_ADDR: u8 = map::GLOBAL_CFG.addr();
const TKEY_CTRL_ADDR: u8 = map::TKEY_CTRL.addr();

/// Values loaded by every reset; all other cells reset to zero.
const RESET_VALUES: [(u8, u8); 10] = [
    (map::SP.addr(), 0x07),
    (map::P1.addr(), 0xFF),
    (map::P1_MOD_OC.addr(), 0xFF),
    (map::P1_DIR_PU.addr(), 0xFF),
    (map::P2.addr(), 0xFF),
    (map::P3.addr(), 0xFF),
    (map::P3_MOD_OC.addr(), 0xFF),
    (map::P3_DIR_PU.addr(), 0xFF),
    (map::CLOCK_CFG.addr(), 0x83),
    (map::USB_CTRL.addr(), 0x06),
];

/// Target chip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChipType {
    Ch552,
    Ch554,
}

impl ChipType {
    /// Value read back through `CHIP_ID`.
    pub const fn id(self) -> u8 {
        match self {
            ChipType::Ch552 => ID_CH552,
            ChipType::Ch554 => ID_CH554,
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            ID_CH552 => Some(ChipType::Ch552),
            ID_CH554 => Some(ChipType::Ch554),
            _ => None,
        }
    }
}

/// Cause of a reset, as reported in `PCON`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetKind {
    PowerOn,
    /// `GLOBAL_CFG.bSW_RESET`
    Software,
    Watchdog,
    /// RST pin
    Pin,
}

impl ResetKind {
    pub const fn pcon_flag(self) -> u8 {
        match self {
            ResetKind::PowerOn => pcon::RST_FLAG_POR,
            ResetKind::Software => pcon::RST_FLAG_SW,
            ResetKind::Watchdog => pcon::RST_FLAG_WDOG,
            ResetKind::Pin => pcon::RST_FLAG_PIN,
        }
    }
}

/// Progress through the `SAFE_MOD` unlock sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafeMode {
    Locked,
    /// First key written
    Armed,
    /// Both keys written; Write@SafeMode registers accept writes
    Open,
}

impl SafeMode {
    pub const fn as_u8(self) -> u8 {
        match self {
            SafeMode::Locked => 0,
            SafeMode::Armed => 1,
            SafeMode::Open => 2,
        }
    }

    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(SafeMode::Locked),
            1 => Some(SafeMode::Armed),
            2 => Some(SafeMode::Open),
            _ => None,
        }
    }
}

/// The chip's register file.
///
/// One instance per chip; hand it by reference to whatever needs register
/// access. Every register name resolves to a cell of [`Ch55x::mem`], so
/// aliases always observe the same value.
pub struct Ch55x {
    pub chip_type: ChipType,
    pub mem: SfrFile,
    safe_mode: SafeMode,
    rom_command: Option<u8>,
    pub debugger: Debugger,
}

impl Ch55x {
    /// A CH552 after power-on reset.
    pub fn new() -> Self {
        Self::new_with_chip(ChipType::Ch552)
    }

    pub fn new_with_chip(chip_type: ChipType) -> Self {
        let mut chip = Ch55x {
            chip_type,
            mem: SfrFile::new(),
            safe_mode: SafeMode::Locked,
            rom_command: None,
            debugger: Debugger::new(),
        };
        chip.reset(ResetKind::PowerOn);
        chip
    }

    /// Load reset values.
    ///
    /// `RESET_KEEP` survives every reset except power-on. `bBOOT_LOAD` is set
    /// by power-on, cleared by a software reset and kept otherwise.
    pub fn reset(&mut self, kind: ResetKind) {
        let keep = self.mem.get(map::RESET_KEEP.addr());
        let boot = self.mem.get(GLOBAL_CFG_ADDR) & global_cfg::BOOT_LOAD;

        self.mem.clear();
        for &(addr, v) in RESET_VALUES.iter() {
            self.mem.set(addr, v);
        }
        self.mem.set(map::CHIP_ID.addr(), self.chip_type.id());
        self.mem.set(map::PCON.addr(), kind.pcon_flag());
        let boot = match kind {
            ResetKind::PowerOn => global_cfg::BOOT_LOAD,
            ResetKind::Software => 0,
            ResetKind::Watchdog | ResetKind::Pin => boot,
        };
        self.mem.set(GLOBAL_CFG_ADDR, boot);
        if kind != ResetKind::PowerOn {
            self.mem.set(map::RESET_KEEP.addr(), keep);
        }

        self.safe_mode = SafeMode::Locked;
        self.rom_command = None;
        debug!("{:?} reset ({:?})", self.chip_type, kind);
    }

    // ─── Typed access ───────────────────────────────────────────────────────

    #[inline]
    pub fn read<A: Readable>(&self, reg: Sfr<A>) -> u8 {
        self.read_addr(reg.addr())
    }

    #[inline]
    pub fn write<A: Writable>(&mut self, reg: Sfr<A>, value: u8) {
        self.write_addr(reg.addr(), value);
    }

    /// Low byte, then high byte.
    pub fn read16<A: Readable>(&self, reg: Sfr16<A>) -> u16 {
        let lo = self.read(reg.low());
        let hi = self.read(reg.high());
        lo as u16 | ((hi as u16) << 8)
    }

    /// Low byte, then high byte. Two bus writes; mask interrupts around it
    /// if a handler touches the same register.
    pub fn write16<A: Writable>(&mut self, reg: Sfr16<A>, value: u16) {
        self.write(reg.low(), value as u8);
        self.write(reg.high(), (value >> 8) as u8);
    }

    #[inline]
    pub fn bit<A: Readable>(&self, flag: SBit<A>) -> bool {
        self.mem.test_bit(flag.addr(), flag.bit())
    }

    /// Read-modify-write of the owning byte.
    #[inline]
    pub fn set_bit<A: Writable>(&mut self, flag: SBit<A>, on: bool) {
        self.write_bit(flag.addr(), flag.bit(), on);
    }

    // ─── Bus access ─────────────────────────────────────────────────────────

    /// Read an SFR address as firmware sees it.
    #[inline]
    pub fn read_addr(&self, addr: u8) -> u8 {
        self.mem.get(addr)
    }

    /// Write an SFR address as firmware does, with hardware side effects.
    pub fn write_addr(&mut self, addr: u8, value: u8) {
        if addr < sfr::SFR_BASE {
            return;
        }
        let old = self.mem.get(addr);

        if !self.debugger.watchpoints.is_empty() {
            self.debugger.check_write(addr, old, value);
        }

        match addr {
            SAFE_MOD_ADDR => {
                self.write_safe_mod(value);
                return;
            }
            ROM_CTRL_ADDR => {
                self.write_rom_ctrl(value);
                return;
            }
            _ => {}
        }

        if let Some(access) = map::access_at(addr) {
            if !access.writable() {
                warn!("write 0x{:02X} to read-only {} dropped", value, debugger::sfr_name(addr));
                return;
            }
        }
        if map::SAFE_MODE_GUARDED.contains(&addr) && self.safe_mode != SafeMode::Open {
            warn!(
                "write 0x{:02X} to {} dropped outside safe mode",
                value,
                debugger::sfr_name(addr)
            );
            return;
        }

        let ro = map::read_only_mask(addr);
        let mut new = (old & ro) | (value & !ro);
        if addr == TKEY_CTRL_ADDR {
            new &= !tkey_ctrl::TKC_IF;
        }
        self.mem.set(addr, new);

        if addr == GLOBAL_CFG_ADDR && value & global_cfg::SW_RESET != 0 {
            self.reset(ResetKind::Software);
        }
    }

    /// Write one bit of an SFR address through the bus.
    pub fn write_bit(&mut self, addr: u8, bit: u8, on: bool) {
        let mask = 1u8 << (bit & 7);
        let v = self.read_addr(addr);
        let new = if on { v | mask } else { v & !mask };
        self.write_addr(addr, new);
    }

    fn write_safe_mod(&mut self, value: u8) {
        self.safe_mode = match (self.safe_mode, value) {
            (_, safe_mod::KEY1) => SafeMode::Armed,
            (SafeMode::Armed, safe_mod::KEY2) => SafeMode::Open,
            _ => SafeMode::Locked,
        };
        let xbus = map::XBUS_AUX.addr();
        let v = self.mem.get(xbus);
        let v = if self.safe_mode == SafeMode::Open {
            v | xbus_aux::SAFE_MOD_ACT
        } else {
            v & !xbus_aux::SAFE_MOD_ACT
        };
        self.mem.set(xbus, v);
        debug!("SAFE_MOD <- 0x{:02X}: {:?}", value, self.safe_mode);
    }

    /// Latch a flash command and report it in `ROM_STATUS`.
    ///
    /// Writes may target code flash below the boot loader or Data-Flash;
    /// reads only Data-Flash.
    fn write_rom_ctrl(&mut self, value: u8) {
        let rom_addr = self.mem.pair(map::ROM_ADDR.addr());
        let data_flash = (DATA_FLASH_ADDR..DATA_FLASH_END).contains(&rom_addr);
        let mut status = self.mem.get(ROM_CTRL_ADDR) & !(rom_status::CMD_ERR | rom_status::ADDR_OK);
        match value {
            rom_ctrl::CMD_WRITE if rom_addr < BOOT_LOAD_ADDR || data_flash => status |= rom_status::ADDR_OK,
            rom_ctrl::CMD_READ if data_flash => status |= rom_status::ADDR_OK,
            rom_ctrl::CMD_WRITE | rom_ctrl::CMD_READ => {}
            _ => status |= rom_status::CMD_ERR,
        }
        self.mem.set(ROM_CTRL_ADDR, status);
        self.rom_command = Some(value);
        debug!("ROM_CTRL <- 0x{:02X}, ROM_ADDR=0x{:04X}", value, rom_addr);
    }

    pub fn safe_mode(&self) -> SafeMode {
        self.safe_mode
    }

    pub fn safe_mode_active(&self) -> bool {
        self.safe_mode == SafeMode::Open
    }

    /// Take the last command written to `ROM_CTRL`, for a flash model to execute.
    pub fn take_rom_command(&mut self) -> Option<u8> {
        self.rom_command.take()
    }

    // ─── Hardware side ──────────────────────────────────────────────────────

    /// Raw cell read.
    #[inline]
    pub fn peek(&self, addr: u8) -> u8 {
        self.mem.get(addr)
    }

    /// Raw cell write: no access checks, no side effects.
    #[inline]
    pub fn poke(&mut self, addr: u8, value: u8) {
        self.mem.set(addr, value);
    }

    pub fn poke_bit(&mut self, addr: u8, bit: u8, on: bool) {
        self.mem.set_bit(addr, bit, on);
    }

    pub fn poke16(&mut self, addr: u8, value: u16) {
        self.mem.set_pair(addr, value);
    }

    // ─── Interrupts ─────────────────────────────────────────────────────────

    /// `EA` set, `E_DIS` clear and the source's enable bit set.
    pub fn interrupt_enabled(&self, irq: Interrupt) -> bool {
        self.bit(map::EA) && !self.bit(map::E_DIS) && self.bit(irq.enable_bit())
    }

    /// Apply the flag clears hardware performs on entry and return the vector.
    pub fn enter_interrupt(&mut self, irq: Interrupt) -> u16 {
        for (addr, mask) in interrupt::entry_clears(irq) {
            let v = self.mem.get(addr);
            self.mem.set(addr, v & !mask);
        }
        debug!("enter {:?} -> 0x{:04X}", irq, irq.vector());
        irq.vector()
    }

    /// Clear `EA` until the returned guard is dropped.
    pub fn mask_interrupts(&mut self) -> IrqGuard<'_> {
        IrqGuard::new(self)
    }

    /// Run `f` with interrupts masked; `EA` is restored afterwards.
    pub fn without_interrupts<R>(&mut self, f: impl FnOnce(&mut Ch55x) -> R) -> R {
        let mut guard = self.mask_interrupts();
        f(&mut *guard)
    }

    // ─── Naming and dumps ───────────────────────────────────────────────────

    /// Name in effect for an access to `addr`, following direction and mode aliases.
    pub fn register_name(&self, addr: u8, dir: BusDirection) -> Option<&'static str> {
        let first = map::names_at(addr).next()?.name;
        match alias::group_of(first) {
            Some(group) => Some(group.resolve(&self.mem, dir)),
            None => Some(first),
        }
    }

    /// Name in effect for bit `bit` of `addr`.
    pub fn bit_name(&self, addr: u8, bit: u8) -> Option<&'static str> {
        let first = map::bits_at(addr, bit).next()?.name;
        match alias::group_of(first) {
            Some(group) => Some(group.resolve(&self.mem, BusDirection::Read)),
            None => Some(first),
        }
    }

    /// Non-zero registers with names.
    pub fn dump_sfrs(&self) -> String {
        debugger::dump_sfrs(&self.mem)
    }

    /// Every named register, four per line.
    pub fn dump_sfrs_all(&self) -> String {
        debugger::dump_sfrs_all(&self.mem)
    }

    /// Raw cells, index 0 = address 0x80.
    pub fn sfrs(&self) -> &[u8] {
        self.mem.as_bytes()
    }

    // ─── Save state ─────────────────────────────────────────────────────────

    pub fn save_state(&self) -> SfrState {
        SfrState {
            cells: self.mem.as_bytes().to_vec(),
            safe_mode: self.safe_mode.as_u8(),
            rom_command: self.rom_command,
        }
    }

    pub fn load_state(&mut self, state: &SfrState) -> Result<(), StateError> {
        let safe_mode = SafeMode::from_u8(state.safe_mode).ok_or(StateError::BadSafeMode(state.safe_mode))?;
        if !self.mem.load(&state.cells) {
            return Err(StateError::BadLength(state.cells.len()));
        }
        self.safe_mode = safe_mode;
        self.rom_command = state.rom_command;
        Ok(())
    }
}

impl Default for Ch55x {
    fn default() -> Self {
        Self::new()
    }
}
