//! CH552/CH554 special-function-register map.
//!
//! Every register, 16-bit pair and bit-addressable flag of the chip, declared
//! once with its silicon address and access class:
//!
//! | Address Range | Content                                  |
//! |---------------|------------------------------------------|
//! | 0x80–0xFF     | byte registers (`SFRS`)                  |
//! | N:N+1         | little-endian pairs (`WIDE`)             |
//! | 0x80, 0x88, … | bit-addressable owners (`BITS`)          |
//!
//! Names that share an address or a bit position are aliases of one storage
//! cell and are listed in [`crate::alias::ALIASES`]. The whole map is checked
//! by [`crate::validate::assert_valid`] in a `const` item below, so an
//! undeclared overlap or a bad bit index fails the build.

use crate::alias;
use crate::sfr::{Access, BitInfo, ClearMode, SBit, Sfr, Sfr16, SfrInfo, WideInfo, RO, RW, WO};
use crate::interrupt::Interrupt;
use crate::validate::{self, MapTables};

macro_rules! sfrs {
    ($($name:ident = $addr:literal, $acc:ident;)*) => {
        $(pub const $name: Sfr<$acc> = Sfr::new($addr, stringify!($name));)*

        /// Every byte register, in declaration order.
        pub const SFRS: &[SfrInfo] = &[$($name.info()),*];
    };
}

macro_rules! sfr16s {
    ($($name:ident = $low:ident, $high:ident, $acc:ident;)*) => {
        $(pub const $name: Sfr16<$acc> = Sfr16::new(stringify!($name), $low, $high);)*

        /// Every 16-bit register.
        pub const WIDE: &[WideInfo] = &[$($name.info()),*];
    };
}

macro_rules! sbits {
    (@clear) => { ClearMode::Software };
    (@clear $clear:expr) => { $clear };
    ($($name:ident = $owner:ident . $bit:literal, $acc:ident $(, $clear:expr)?;)*) => {
        $(pub const $name: SBit<$acc> =
            SBit::new($owner.addr(), $bit, stringify!($name), sbits!(@clear $($clear)?));)*

        /// Every bit-addressable flag.
        pub const BITS: &[BitInfo] = &[$($name.info()),*];
    };
}

sfrs! {
    // ─── System ─────────────────────────────────────────────────────────────
    PSW = 0xD0, RW;
    ACC = 0xE0, RW;
    B = 0xF0, RW;
    SP = 0x81, RW;
    DPL = 0x82, RW;
    DPH = 0x83, RW;
    SAFE_MOD = 0xA1, WO;
    CHIP_ID = 0xA1, RO;
    GLOBAL_CFG = 0xB1, RW;

    // ─── Clock, sleep and power ─────────────────────────────────────────────
    PCON = 0x87, RW;
    CLOCK_CFG = 0xB9, RW;
    WAKE_CTRL = 0xA9, RW;
    RESET_KEEP = 0xFE, RW;
    WDOG_COUNT = 0xFF, RW;

    // ─── Interrupts ─────────────────────────────────────────────────────────
    IE = 0xA8, RW;
    IP = 0xB8, RW;
    IE_EX = 0xE8, RW;
    IP_EX = 0xE9, RW;
    GPIO_IE = 0xC7, RW;

    // ─── Flash-ROM and Data-Flash ───────────────────────────────────────────
    ROM_ADDR_L = 0x84, RW;
    ROM_ADDR_H = 0x85, RW;
    ROM_DATA_L = 0x8E, RW;
    ROM_DATA_H = 0x8F, RW;
    ROM_CTRL = 0x86, WO;
    ROM_STATUS = 0x86, RO;

    // ─── Ports ──────────────────────────────────────────────────────────────
    P1 = 0x90, RW;
    P1_MOD_OC = 0x92, RW;
    P1_DIR_PU = 0x93, RW;
    P2 = 0xA0, RW;
    P3 = 0xB0, RW;
    P3_MOD_OC = 0x96, RW;
    P3_DIR_PU = 0x97, RW;
    PIN_FUNC = 0xC6, RW;
    XBUS_AUX = 0xA2, RW;

    // ─── Timer0/1 ───────────────────────────────────────────────────────────
    TCON = 0x88, RW;
    TMOD = 0x89, RW;
    TL0 = 0x8A, RW;
    TL1 = 0x8B, RW;
    TH0 = 0x8C, RW;
    TH1 = 0x8D, RW;

    // ─── UART0 ──────────────────────────────────────────────────────────────
    SCON = 0x98, RW;
    SBUF = 0x99, RW;

    // ─── Timer2 / capture ───────────────────────────────────────────────────
    T2CON = 0xC8, RW;
    T2MOD = 0xC9, RW;
    RCAP2L = 0xCA, RW;
    RCAP2H = 0xCB, RW;
    TL2 = 0xCC, RW;
    TH2 = 0xCD, RW;
    T2CAP1L = 0xCE, RO;
    T2CAP1H = 0xCF, RO;

    // ─── PWM1/2 ─────────────────────────────────────────────────────────────
    PWM_DATA2 = 0x9B, RW;
    PWM_DATA1 = 0x9C, RW;
    PWM_CTRL = 0x9D, RW;
    PWM_CK_SE = 0x9E, RW;

    // ─── SPI0 ───────────────────────────────────────────────────────────────
    SPI0_STAT = 0xF8, RW;
    SPI0_DATA = 0xF9, RW;
    SPI0_CTRL = 0xFA, RW;
    SPI0_CK_SE = 0xFB, RW;
    SPI0_S_PRE = 0xFB, RW;
    SPI0_SETUP = 0xFC, RW;

    // ─── UART1 ──────────────────────────────────────────────────────────────
    SCON1 = 0xC0, RW;
    SBUF1 = 0xC1, RW;
    SBAUD1 = 0xC2, RW;

    // ─── ADC and comparator ─────────────────────────────────────────────────
    ADC_CTRL = 0x80, RW;
    ADC_CFG = 0x9A, RW;
    ADC_DATA = 0x9F, RO;

    // ─── Touch-key timer ────────────────────────────────────────────────────
    TKEY_CTRL = 0xC3, RW;
    TKEY_DATL = 0xC4, RO;
    TKEY_DATH = 0xC5, RO;

    // ─── USB ────────────────────────────────────────────────────────────────
    USB_C_CTRL = 0x91, RW;
    UDEV_CTRL = 0xD1, RW;
    UHOST_CTRL = 0xD1, RW;
    UEP1_CTRL = 0xD2, RW;
    UEP1_T_LEN = 0xD3, RW;
    UEP2_CTRL = 0xD4, RW;
    UEP2_T_LEN = 0xD5, RW;
    UEP3_CTRL = 0xD6, RW;
    UEP3_T_LEN = 0xD7, RW;
    USB_INT_FG = 0xD8, RW;
    USB_INT_ST = 0xD9, RO;
    USB_MIS_ST = 0xDA, RO;
    USB_RX_LEN = 0xDB, RO;
    UEP0_CTRL = 0xDC, RW;
    UEP0_T_LEN = 0xDD, RW;
    UEP4_CTRL = 0xDE, RW;
    UEP4_T_LEN = 0xDF, RW;
    USB_INT_EN = 0xE1, RW;
    USB_CTRL = 0xE2, RW;
    USB_DEV_AD = 0xE3, RW;
    UEP2_DMA_L = 0xE4, RW;
    UEP2_DMA_H = 0xE5, RW;
    UEP3_DMA_L = 0xE6, RW;
    UEP3_DMA_H = 0xE7, RW;
    UEP4_1_MOD = 0xEA, RW;
    UEP2_3_MOD = 0xEB, RW;
    UEP0_DMA_L = 0xEC, RW;
    UEP0_DMA_H = 0xED, RW;
    UEP1_DMA_L = 0xEE, RW;
    UEP1_DMA_H = 0xEF, RW;
}

sfr16s! {
    DPTR = DPL, DPH, RW;
    ROM_ADDR = ROM_ADDR_L, ROM_ADDR_H, RW;
    ROM_DATA = ROM_DATA_L, ROM_DATA_H, RW;
    RCAP2 = RCAP2L, RCAP2H, RW;
    T2COUNT = TL2, TH2, RW;
    T2CAP1 = T2CAP1L, T2CAP1H, RO;
    TKEY_DAT = TKEY_DATL, TKEY_DATH, RO;
    UEP2_DMA = UEP2_DMA_L, UEP2_DMA_H, RW;
    UEP3_DMA = UEP3_DMA_L, UEP3_DMA_H, RW;
    UEP0_DMA = UEP0_DMA_L, UEP0_DMA_H, RW;
    UEP1_DMA = UEP1_DMA_L, UEP1_DMA_H, RW;
}

sbits! {
    // PSW
    CY = PSW.7, RW;
    AC = PSW.6, RW;
    F0 = PSW.5, RW;
    RS1 = PSW.4, RW;
    RS0 = PSW.3, RW;
    OV = PSW.2, RW;
    F1 = PSW.1, RW;
    P = PSW.0, RO;

    // IE
    EA = IE.7, RW;
    E_DIS = IE.6, RW;
    ET2 = IE.5, RW;
    ES = IE.4, RW;
    ET1 = IE.3, RW;
    EX1 = IE.2, RW;
    ET0 = IE.1, RW;
    EX0 = IE.0, RW;

    // IP
    PH_FLAG = IP.7, RO;
    PL_FLAG = IP.6, RO;
    PT2 = IP.5, RW;
    PS = IP.4, RW;
    PT1 = IP.3, RW;
    PX1 = IP.2, RW;
    PT0 = IP.1, RW;
    PX0 = IP.0, RW;

    // IE_EX
    IE_WDOG = IE_EX.7, RW;
    IE_GPIO = IE_EX.6, RW;
    IE_PWMX = IE_EX.5, RW;
    IE_UART1 = IE_EX.4, RW;
    IE_ADC = IE_EX.3, RW;
    IE_USB = IE_EX.2, RW;
    IE_TKEY = IE_EX.1, RW;
    IE_SPI0 = IE_EX.0, RW;

    // P1 pin functions
    SCK = P1.7, RW;
    TXD1 = P1.7, RW;
    TIN5 = P1.7, RW;
    MISO = P1.6, RW;
    RXD1 = P1.6, RW;
    TIN4 = P1.6, RW;
    MOSI = P1.5, RW;
    PWM1 = P1.5, RW;
    TIN3 = P1.5, RW;
    UCC2 = P1.5, RW;
    AIN2 = P1.5, RW;
    T2_ = P1.4, RW;
    CAP1_ = P1.4, RW;
    SCS = P1.4, RW;
    TIN2 = P1.4, RW;
    UCC1 = P1.4, RW;
    AIN1 = P1.4, RW;
    TXD_ = P1.3, RW;
    RXD_ = P1.2, RW;
    T2EX = P1.1, RW;
    CAP2 = P1.1, RW;
    TIN1 = P1.1, RW;
    VBUS2 = P1.1, RW;
    AIN0 = P1.1, RW;
    T2 = P1.0, RW;
    CAP1 = P1.0, RW;
    TIN0 = P1.0, RW;

    // P3 pin functions
    UDM = P3.7, RO;
    UDP = P3.6, RO;
    T1 = P3.5, RW;
    PWM2 = P3.4, RW;
    RXD1_ = P3.4, RW;
    T0 = P3.4, RW;
    INT1 = P3.3, RW;
    TXD1_ = P3.2, RW;
    INT0 = P3.2, RW;
    VBUS1 = P3.2, RW;
    AIN3 = P3.2, RW;
    PWM2_ = P3.1, RW;
    TXD = P3.1, RW;
    PWM1_ = P3.0, RW;
    RXD = P3.0, RW;

    // TCON
    TF1 = TCON.7, RW, ClearMode::OnInterruptEntry(Interrupt::Timer1);
    TR1 = TCON.6, RW;
    TF0 = TCON.5, RW, ClearMode::OnInterruptEntry(Interrupt::Timer0);
    TR0 = TCON.4, RW;
    IE1 = TCON.3, RW, ClearMode::OnInterruptEntry(Interrupt::Int1);
    IT1 = TCON.2, RW;
    IE0 = TCON.1, RW, ClearMode::OnInterruptEntry(Interrupt::Int0);
    IT0 = TCON.0, RW;

    // SCON
    SM0 = SCON.7, RW;
    SM1 = SCON.6, RW;
    SM2 = SCON.5, RW;
    REN = SCON.4, RW;
    TB8 = SCON.3, RW;
    RB8 = SCON.2, RW;
    TI = SCON.1, RW;
    RI = SCON.0, RW;

    // T2CON
    TF2 = T2CON.7, RW;
    CAP1F = T2CON.7, RW;
    EXF2 = T2CON.6, RW;
    RCLK = T2CON.5, RW;
    TCLK = T2CON.4, RW;
    EXEN2 = T2CON.3, RW;
    TR2 = T2CON.2, RW;
    C_T2 = T2CON.1, RW;
    CP_RL2 = T2CON.0, RW;

    // SPI0_STAT
    S0_FST_ACT = SPI0_STAT.7, RO;
    S0_IF_OV = SPI0_STAT.6, RW;
    S0_IF_FIRST = SPI0_STAT.5, RW;
    S0_IF_BYTE = SPI0_STAT.4, RW;
    S0_FREE = SPI0_STAT.3, RO;
    S0_T_FIFO = SPI0_STAT.2, RO;
    S0_R_FIFO = SPI0_STAT.0, RO;

    // SCON1
    U1SM0 = SCON1.7, RW;
    U1SMOD = SCON1.5, RW;
    U1REN = SCON1.4, RW;
    U1TB8 = SCON1.3, RW;
    U1RB8 = SCON1.2, RW;
    U1TI = SCON1.1, RW;
    U1RI = SCON1.0, RW;

    // ADC_CTRL
    CMPO = ADC_CTRL.7, RO;
    CMP_IF = ADC_CTRL.6, RW;
    ADC_IF = ADC_CTRL.5, RW;
    ADC_START = ADC_CTRL.4, RW, ClearMode::OnCompletion;
    CMP_CHAN = ADC_CTRL.3, RW;
    ADC_CHAN1 = ADC_CTRL.1, RW;
    ADC_CHAN0 = ADC_CTRL.0, RW;

    // USB_INT_FG
    U_IS_NAK = USB_INT_FG.7, RO;
    U_TOG_OK = USB_INT_FG.6, RO;
    U_SIE_FREE = USB_INT_FG.5, RO;
    UIF_FIFO_OV = USB_INT_FG.4, RW;
    UIF_HST_SOF = USB_INT_FG.3, RW;
    UIF_SUSPEND = USB_INT_FG.2, RW;
    UIF_TRANSFER = USB_INT_FG.1, RW;
    UIF_DETECT = USB_INT_FG.0, RW;
    UIF_BUS_RST = USB_INT_FG.0, RW;
}

/// The complete map, as checked by the validator.
pub const MAP: MapTables = MapTables {
    sfrs: SFRS,
    wide: WIDE,
    bits: BITS,
    aliases: alias::ALIASES,
};

const _: () = validate::assert_valid(&MAP);

/// Registers that only accept writes while safe mode is active.
pub const SAFE_MODE_GUARDED: [u8; 3] = [GLOBAL_CFG.addr(), CLOCK_CFG.addr(), WAKE_CTRL.addr()];

/// Read-only bits inside otherwise writable byte registers.
const READ_ONLY_FIELDS: [(u8, u8); 9] = [
    (GLOBAL_CFG.addr(), 0x20),
    (PCON.addr(), 0x30),
    (CLOCK_CFG.addr(), 0x28),
    (IP_EX.addr(), 0x80),
    (PIN_FUNC.addr(), 0x40),
    (XBUS_AUX.addr(), 0xE0),
    (SPI0_SETUP.addr(), 0x03),
    (TKEY_CTRL.addr(), 0x80),
    (UDEV_CTRL.addr(), 0x30),
];

const fn build_read_only_masks() -> [u8; 128] {
    let mut masks = [0u8; 128];
    let mut i = 0;
    while i < BITS.len() {
        let b = BITS[i];
        if !b.access.writable() {
            masks[(b.addr - 0x80) as usize] |= b.mask();
        }
        i += 1;
    }
    let mut j = 0;
    while j < READ_ONLY_FIELDS.len() {
        let (addr, mask) = READ_ONLY_FIELDS[j];
        masks[(addr - 0x80) as usize] |= mask;
        j += 1;
    }
    masks
}

/// Per-address mask of bits a bus write leaves untouched, indexed by `addr - 0x80`.
pub const READ_ONLY_MASKS: [u8; 128] = build_read_only_masks();

/// Bits of `addr` that a bus write must preserve.
pub fn read_only_mask(addr: u8) -> u8 {
    if addr < 0x80 {
        return 0;
    }
    READ_ONLY_MASKS[(addr - 0x80) as usize]
}

// ─── Lookup ─────────────────────────────────────────────────────────────────

/// Anything the map declares under a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Named {
    Register(SfrInfo),
    Wide(WideInfo),
    Bit(BitInfo),
}

/// Find a register, 16-bit pair or flag by its name.
pub fn lookup(name: &str) -> Option<Named> {
    if let Some(r) = SFRS.iter().find(|r| r.name == name) {
        return Some(Named::Register(*r));
    }
    if let Some(w) = WIDE.iter().find(|w| w.name == name) {
        return Some(Named::Wide(*w));
    }
    BITS.iter().find(|b| b.name == name).map(|b| Named::Bit(*b))
}

/// Byte-register names declared at `addr`, in declaration order.
pub fn names_at(addr: u8) -> impl Iterator<Item = &'static SfrInfo> {
    SFRS.iter().filter(move |r| r.addr == addr)
}

/// Flag names declared at `addr` bit `bit`.
pub fn bits_at(addr: u8, bit: u8) -> impl Iterator<Item = &'static BitInfo> {
    BITS.iter().filter(move |b| b.addr == addr && b.bit == bit)
}

/// Combined access of every name at `addr`, or `None` for an unmapped cell.
pub fn access_at(addr: u8) -> Option<Access> {
    let mut readable = false;
    let mut writable = false;
    let mut any = false;
    for r in names_at(addr) {
        any = true;
        readable |= r.access.readable();
        writable |= r.access.writable();
    }
    match (any, readable, writable) {
        (false, _, _) => None,
        (true, true, true) => Some(Access::ReadWrite),
        (true, true, false) => Some(Access::ReadOnly),
        (true, false, _) => Some(Access::WriteOnly),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_addresses() {
        assert_eq!(PSW.addr(), 0xD0);
        assert_eq!(SP.addr(), 0x81);
        assert_eq!(SAFE_MOD.addr(), CHIP_ID.addr());
        assert_eq!(ROM_CTRL.addr(), 0x86);
        assert_eq!(USB_CTRL.addr(), 0xE2);
        assert_eq!(UEP1_DMA_H.addr(), 0xEF);
        assert_eq!(WDOG_COUNT.addr(), 0xFF);
        assert_eq!(ADC_CTRL.addr(), 0x80);
    }

    #[test]
    fn test_bit_positions() {
        assert_eq!((CY.addr(), CY.bit()), (0xD0, 7));
        assert_eq!((P.addr(), P.bit()), (0xD0, 0));
        assert_eq!((EA.addr(), EA.bit()), (0xA8, 7));
        assert_eq!((S0_R_FIFO.addr(), S0_R_FIFO.bit()), (0xF8, 0));
        assert_eq!((UIF_BUS_RST.addr(), UIF_BUS_RST.bit()), (0xD8, 0));
        assert_eq!(TF1.clear_mode(), ClearMode::OnInterruptEntry(Interrupt::Timer1));
        assert_eq!(ADC_START.clear_mode(), ClearMode::OnCompletion);
        assert!(TI.clear_mode().needs_software_clear());
    }

    #[test]
    fn test_wide_halves() {
        assert_eq!(DPTR.low().addr(), 0x82);
        assert_eq!(DPTR.high().addr(), 0x83);
        assert_eq!(UEP0_DMA.addr(), 0xEC);
        assert_eq!(T2CAP1.info().access, Access::ReadOnly);
        assert_eq!(WIDE.len(), 11);
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("TKEY_CTRL"), Some(Named::Register(TKEY_CTRL.info())));
        assert_eq!(lookup("ROM_ADDR"), Some(Named::Wide(ROM_ADDR.info())));
        assert_eq!(lookup("CAP1F"), Some(Named::Bit(CAP1F.info())));
        assert_eq!(lookup("NOPE"), None);
    }

    #[test]
    fn test_names_at_alias_address() {
        let names: Vec<_> = names_at(0xD1).map(|r| r.name).collect();
        assert_eq!(names, vec!["UDEV_CTRL", "UHOST_CTRL"]);
        let pins: Vec<_> = bits_at(0x90, 5).map(|b| b.name).collect();
        assert_eq!(pins, vec!["MOSI", "PWM1", "TIN3", "UCC2", "AIN2"]);
    }

    #[test]
    fn test_access_at() {
        assert_eq!(access_at(0xA1), Some(Access::ReadWrite));
        assert_eq!(access_at(0x9F), Some(Access::ReadOnly));
        assert_eq!(access_at(0xD0), Some(Access::ReadWrite));
        assert_eq!(access_at(0x94), None);
    }

    #[test]
    fn test_read_only_masks() {
        assert_eq!(read_only_mask(PSW.addr()), 0x01);
        assert_eq!(read_only_mask(SPI0_STAT.addr()), 0x8D);
        assert_eq!(read_only_mask(USB_INT_FG.addr()), 0xE0);
        assert_eq!(read_only_mask(XBUS_AUX.addr()), 0xE0);
        assert_eq!(read_only_mask(ACC.addr()), 0x00);
        assert_eq!(read_only_mask(0x10), 0x00);
    }
}
