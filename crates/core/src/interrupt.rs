//! CH55x interrupt sources and interrupt masking.
//!
//! The 8051 core vectors interrupt number `n` to code address `8 * n + 3`.
//! Scheduling and priorities belong to the consumer; this module only carries
//! the fixed numbering, each source's enable bit, the flags hardware clears on
//! entry, and [`IrqGuard`], the scoped "interrupts masked" resource.
//!
//! Flags cleared on entry (TF0, TF1, IE0, IE1 and the watchdog timeout flag)
//! need no software protection. Every other flag is cleared by software with
//! a read-modify-write that an interrupt can split; bracket those accesses
//! with [`Ch55x::mask_interrupts`](crate::Ch55x::mask_interrupts).

use core::ops::{Deref, DerefMut};

use crate::fields::clock_cfg;
use crate::map;
use crate::sfr::{SBit, RW};
use crate::Ch55x;

// Interrupt vector addresses (code space)
pub const INT_ADDR_INT0: u16 = 0x0003;
pub const INT_ADDR_TMR0: u16 = 0x000B;
pub const INT_ADDR_INT1: u16 = 0x0013;
pub const INT_ADDR_TMR1: u16 = 0x001B;
pub const INT_ADDR_UART0: u16 = 0x0023;
pub const INT_ADDR_TMR2: u16 = 0x002B;
pub const INT_ADDR_SPI0: u16 = 0x0033;
pub const INT_ADDR_TKEY: u16 = 0x003B;
pub const INT_ADDR_USB: u16 = 0x0043;
pub const INT_ADDR_ADC: u16 = 0x004B;
pub const INT_ADDR_UART1: u16 = 0x0053;
pub const INT_ADDR_PWMX: u16 = 0x005B;
pub const INT_ADDR_GPIO: u16 = 0x0063;
pub const INT_ADDR_WDOG: u16 = 0x006B;

/// Interrupt source, numbered as the `__interrupt(n)` index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Interrupt {
    Int0 = 0,
    Timer0 = 1,
    Int1 = 2,
    Timer1 = 3,
    Uart0 = 4,
    Timer2 = 5,
    Spi0 = 6,
    TouchKey = 7,
    Usb = 8,
    Adc = 9,
    Uart1 = 10,
    Pwm = 11,
    Gpio = 12,
    Watchdog = 13,
}

impl Interrupt {
    pub const ALL: [Interrupt; 14] = [
        Interrupt::Int0,
        Interrupt::Timer0,
        Interrupt::Int1,
        Interrupt::Timer1,
        Interrupt::Uart0,
        Interrupt::Timer2,
        Interrupt::Spi0,
        Interrupt::TouchKey,
        Interrupt::Usb,
        Interrupt::Adc,
        Interrupt::Uart1,
        Interrupt::Pwm,
        Interrupt::Gpio,
        Interrupt::Watchdog,
    ];

    pub const fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.get(n as usize).copied()
    }

    /// Code address the CPU jumps to.
    pub const fn vector(self) -> u16 {
        match self {
            Interrupt::Int0 => INT_ADDR_INT0,
            Interrupt::Timer0 => INT_ADDR_TMR0,
            Interrupt::Int1 => INT_ADDR_INT1,
            Interrupt::Timer1 => INT_ADDR_TMR1,
            Interrupt::Uart0 => INT_ADDR_UART0,
            Interrupt::Timer2 => INT_ADDR_TMR2,
            Interrupt::Spi0 => INT_ADDR_SPI0,
            Interrupt::TouchKey => INT_ADDR_TKEY,
            Interrupt::Usb => INT_ADDR_USB,
            Interrupt::Adc => INT_ADDR_ADC,
            Interrupt::Uart1 => INT_ADDR_UART1,
            Interrupt::Pwm => INT_ADDR_PWMX,
            Interrupt::Gpio => INT_ADDR_GPIO,
            Interrupt::Watchdog => INT_ADDR_WDOG,
        }
    }

    /// Per-source enable bit in `IE` or `IE_EX`.
    pub const fn enable_bit(self) -> SBit<RW> {
        match self {
            Interrupt::Int0 => map::EX0,
            Interrupt::Timer0 => map::ET0,
            Interrupt::Int1 => map::EX1,
            Interrupt::Timer1 => map::ET1,
            Interrupt::Uart0 => map::ES,
            Interrupt::Timer2 => map::ET2,
            Interrupt::Spi0 => map::IE_SPI0,
            Interrupt::TouchKey => map::IE_TKEY,
            Interrupt::Usb => map::IE_USB,
            Interrupt::Adc => map::IE_ADC,
            Interrupt::Uart1 => map::IE_UART1,
            Interrupt::Pwm => map::IE_PWMX,
            Interrupt::Gpio => map::IE_GPIO,
            Interrupt::Watchdog => map::IE_WDOG,
        }
    }
}

/// Flags hardware clears when the CPU enters an interrupt routine:
/// (source, register address, mask).
pub const ENTRY_CLEARS: [(Interrupt, u8, u8); 5] = [
    (Interrupt::Int0, map::IE0.addr(), map::IE0.mask()),
    (Interrupt::Timer0, map::TF0.addr(), map::TF0.mask()),
    (Interrupt::Int1, map::IE1.addr(), map::IE1.mask()),
    (Interrupt::Timer1, map::TF1.addr(), map::TF1.mask()),
    (Interrupt::Watchdog, map::CLOCK_CFG.addr(), clock_cfg::WDOG_IF_TO),
];

/// (address, mask) pairs cleared on entry to `irq`.
pub fn entry_clears(irq: Interrupt) -> impl Iterator<Item = (u8, u8)> {
    ENTRY_CLEARS
        .iter()
        .filter(move |(source, _, _)| *source == irq)
        .map(|&(_, addr, mask)| (addr, mask))
}

/// Interrupts masked for as long as the guard lives.
///
/// Acquiring clears `EA`; dropping restores the value `EA` had on acquisition,
/// on every exit path including unwinding. The guard derefs to the chip so
/// the protected accesses go through it.
pub struct IrqGuard<'a> {
    chip: &'a mut Ch55x,
    saved_ea: bool,
}

impl<'a> IrqGuard<'a> {
    pub(crate) fn new(chip: &'a mut Ch55x) -> Self {
        let saved_ea = chip.bit(map::EA);
        chip.set_bit(map::EA, false);
        IrqGuard { chip, saved_ea }
    }

    /// `EA` as it was when the guard was taken.
    pub fn saved_ea(&self) -> bool {
        self.saved_ea
    }
}

impl Deref for IrqGuard<'_> {
    type Target = Ch55x;

    fn deref(&self) -> &Ch55x {
        self.chip
    }
}

impl DerefMut for IrqGuard<'_> {
    fn deref_mut(&mut self) -> &mut Ch55x {
        self.chip
    }
}

impl Drop for IrqGuard<'_> {
    fn drop(&mut self) {
        self.chip.set_bit(map::EA, self.saved_ea);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vectors_follow_numbering() {
        for irq in Interrupt::ALL {
            assert_eq!(irq.vector(), 8 * irq.number() as u16 + 3);
            assert_eq!(Interrupt::from_number(irq.number()), Some(irq));
        }
        assert_eq!(Interrupt::from_number(14), None);
        assert_eq!(Interrupt::Usb.vector(), 0x0043);
        assert_eq!(Interrupt::Watchdog.number(), 13);
    }

    #[test]
    fn test_enable_bits() {
        assert_eq!(Interrupt::Int0.enable_bit().addr(), 0xA8);
        assert_eq!(Interrupt::Int0.enable_bit().bit(), 0);
        assert_eq!(Interrupt::Timer2.enable_bit().bit(), 5);
        assert_eq!(Interrupt::Usb.enable_bit().addr(), 0xE8);
        assert_eq!(Interrupt::Usb.enable_bit().bit(), 2);
        assert_eq!(Interrupt::Watchdog.enable_bit().bit(), 7);
    }

    #[test]
    fn test_entry_clears() {
        let timer1: Vec<_> = entry_clears(Interrupt::Timer1).collect();
        assert_eq!(timer1, vec![(0x88, 0x80)]);
        let wdog: Vec<_> = entry_clears(Interrupt::Watchdog).collect();
        assert_eq!(wdog, vec![(0xB9, 0x20)]);
        assert_eq!(entry_clears(Interrupt::Usb).count(), 0);
    }

    #[test]
    fn test_guard_restores_ea() {
        let mut chip = Ch55x::new();
        chip.set_bit(map::EA, true);
        {
            let mut guard = chip.mask_interrupts();
            assert!(guard.saved_ea());
            assert!(!guard.bit(map::EA));
            guard.write(map::TL0, 0x12);
        }
        assert!(chip.bit(map::EA));
        assert_eq!(chip.read(map::TL0), 0x12);
    }

    #[test]
    fn test_guard_keeps_ea_off_when_it_was_off() {
        let mut chip = Ch55x::new();
        chip.set_bit(map::EA, false);
        {
            let _guard = chip.mask_interrupts();
        }
        assert!(!chip.bit(map::EA));
    }

    #[test]
    fn test_guard_restores_on_unwind() {
        let mut chip = Ch55x::new();
        chip.set_bit(map::EA, true);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = chip.mask_interrupts();
            panic!("handler failed");
        }));
        assert!(result.is_err());
        assert!(chip.bit(map::EA));
    }
}
