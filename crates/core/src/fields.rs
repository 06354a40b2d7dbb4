//! Bit masks and field values of the byte registers.
//!
//! One module per register (or per group of registers sharing a layout).
//! Masks are plain `u8` and combine with `|`. Multi-bit fields carry a
//! `MASK_*` constant next to their encoded values.

/// `PSW`
pub mod psw {
    pub const MASK_RS: u8 = 0x18;
}

/// `GLOBAL_CFG` (Write@SafeMode)
pub mod global_cfg {
    /// Read-only. Set by power-on reset, cleared by software reset.
    pub const BOOT_LOAD: u8 = 0x20;
    /// Cleared by hardware.
    pub const SW_RESET: u8 = 0x10;
    pub const CODE_WE: u8 = 0x08;
    pub const DATA_WE: u8 = 0x04;
    pub const LDO3V3_OFF: u8 = 0x02;
    pub const WDOG_EN: u8 = 0x01;
}

/// `PCON`
pub mod pcon {
    pub const SMOD: u8 = 0x80;
    pub const RST_FLAG1: u8 = 0x20;
    pub const RST_FLAG0: u8 = 0x10;
    pub const MASK_RST_FLAG: u8 = 0x30;
    pub const RST_FLAG_SW: u8 = 0x00;
    pub const RST_FLAG_POR: u8 = 0x10;
    pub const RST_FLAG_WDOG: u8 = 0x20;
    pub const RST_FLAG_PIN: u8 = 0x30;
    pub const GF1: u8 = 0x08;
    pub const GF0: u8 = 0x04;
    pub const PD: u8 = 0x02;
}

/// `CLOCK_CFG` (Write@SafeMode)
///
/// `MASK_SYS_CK_SEL` picks Fsys from Fpll = 96 MHz:
///
/// | SEL | Fsys     |
/// |-----|----------|
/// | 7   | 32 MHz   |
/// | 6   | 24 MHz   |
/// | 5   | 16 MHz   |
/// | 4   | 12 MHz   |
/// | 3   | 6 MHz    |
/// | 2   | 3 MHz    |
/// | 1   | 750 kHz  |
/// | 0   | 187.5 kHz|
pub mod clock_cfg {
    pub const OSC_EN_INT: u8 = 0x80;
    pub const OSC_EN_XT: u8 = 0x40;
    /// Read-only; cleared on watchdog interrupt entry or count reload.
    pub const WDOG_IF_TO: u8 = 0x20;
    pub const ROM_CLK_FAST: u8 = 0x10;
    pub const RST: u8 = 0x08;
    pub const T2EX_: u8 = 0x08;
    pub const CAP2_: u8 = 0x08;
    pub const MASK_SYS_CK_SEL: u8 = 0x07;
}

/// `WAKE_CTRL` (Write@SafeMode)
pub mod wake_ctrl {
    pub const WAK_BY_USB: u8 = 0x80;
    pub const WAK_RXD1_LO: u8 = 0x40;
    pub const WAK_P1_5_LO: u8 = 0x20;
    pub const WAK_P1_4_LO: u8 = 0x10;
    pub const WAK_P1_3_LO: u8 = 0x08;
    pub const WAK_RST_HI: u8 = 0x04;
    pub const WAK_P3_2E_3L: u8 = 0x02;
    pub const WAK_RXD0_LO: u8 = 0x01;
}

/// `IP_EX`
pub mod ip_ex {
    pub const IP_LEVEL: u8 = 0x80;
    pub const IP_GPIO: u8 = 0x40;
    pub const IP_PWMX: u8 = 0x20;
    pub const IP_UART1: u8 = 0x10;
    pub const IP_ADC: u8 = 0x08;
    pub const IP_USB: u8 = 0x04;
    pub const IP_TKEY: u8 = 0x02;
    pub const IP_SPI0: u8 = 0x01;
}

/// `GPIO_IE`
pub mod gpio_ie {
    pub const IE_IO_EDGE: u8 = 0x80;
    pub const IE_RXD1_LO: u8 = 0x40;
    pub const IE_P1_5_LO: u8 = 0x20;
    pub const IE_P1_4_LO: u8 = 0x10;
    pub const IE_P1_3_LO: u8 = 0x08;
    pub const IE_RST_HI: u8 = 0x04;
    pub const IE_P3_1_LO: u8 = 0x02;
    pub const IE_RXD0_LO: u8 = 0x01;
}

/// `ROM_CTRL` commands
pub mod rom_ctrl {
    /// Flash-ROM word or Data-Flash byte write.
    pub const CMD_WRITE: u8 = 0x9A;
    /// Data-Flash byte read.
    pub const CMD_READ: u8 = 0x8E;
}

/// `ROM_STATUS`
pub mod rom_status {
    pub const ADDR_OK: u8 = 0x40;
    pub const CMD_ERR: u8 = 0x02;
}

/// `P1`, `P1_MOD_OC`, `P1_DIR_PU` pin masks
///
/// `Pn_MOD_OC`/`Pn_DIR_PU` per pin: 00 input, 01 push-pull, 10 open-drain,
/// 11 quasi-bidirectional.
pub mod port1 {
    pub const SCK: u8 = 0x80;
    pub const TXD1: u8 = 0x80;
    pub const MISO: u8 = 0x40;
    pub const RXD1: u8 = 0x40;
    pub const MOSI: u8 = 0x20;
    pub const PWM1: u8 = 0x20;
    pub const UCC2: u8 = 0x20;
    pub const AIN2: u8 = 0x20;
    pub const T2_: u8 = 0x10;
    pub const CAP1_: u8 = 0x10;
    pub const SCS: u8 = 0x10;
    pub const UCC1: u8 = 0x10;
    pub const AIN1: u8 = 0x10;
    pub const TXD_: u8 = 0x08;
    pub const RXD_: u8 = 0x04;
    pub const T2EX: u8 = 0x02;
    pub const CAP2: u8 = T2EX;
    pub const VBUS2: u8 = 0x02;
    pub const AIN0: u8 = 0x02;
    pub const T2: u8 = 0x01;
    pub const CAP1: u8 = T2;
}

/// `P3`, `P3_MOD_OC`, `P3_DIR_PU` pin masks
pub mod port3 {
    pub const UDM: u8 = 0x80;
    pub const UDP: u8 = 0x40;
    pub const T1: u8 = 0x20;
    pub const PWM2: u8 = 0x10;
    pub const RXD1_: u8 = 0x10;
    pub const T0: u8 = 0x10;
    pub const INT1: u8 = 0x08;
    pub const TXD1_: u8 = 0x04;
    pub const INT0: u8 = 0x04;
    pub const VBUS1: u8 = 0x04;
    pub const AIN3: u8 = 0x04;
    pub const PWM2_: u8 = 0x02;
    pub const TXD: u8 = 0x02;
    pub const PWM1_: u8 = 0x01;
    pub const RXD: u8 = 0x01;
}

/// `PIN_FUNC`
pub mod pin_func {
    pub const USB_IO_EN: u8 = 0x80;
    pub const IO_INT_ACT: u8 = 0x40;
    pub const UART1_PIN_X: u8 = 0x20;
    pub const UART0_PIN_X: u8 = 0x10;
    pub const PWM2_PIN_X: u8 = 0x08;
    pub const PWM1_PIN_X: u8 = 0x04;
    pub const T2EX_PIN_X: u8 = 0x02;
    pub const T2_PIN_X: u8 = 0x01;
}

/// `XBUS_AUX`
pub mod xbus_aux {
    pub const UART0_TX: u8 = 0x80;
    pub const UART0_RX: u8 = 0x40;
    pub const SAFE_MOD_ACT: u8 = 0x20;
    pub const GF2: u8 = 0x08;
    pub const DPTR_AUTO_INC: u8 = 0x04;
    pub const DPS: u8 = 0x01;
}

/// `TMOD`
///
/// Mode field: 0 = 13-bit, 1 = 16-bit, 2 = 8-bit auto-reload,
/// 3 = timer1 stopped / timer0 split.
pub mod tmod {
    pub const T1_GATE: u8 = 0x80;
    pub const T1_CT: u8 = 0x40;
    pub const T1_M1: u8 = 0x20;
    pub const T1_M0: u8 = 0x10;
    pub const MASK_T1_MOD: u8 = 0x30;
    pub const T0_GATE: u8 = 0x08;
    pub const T0_CT: u8 = 0x04;
    pub const T0_M1: u8 = 0x02;
    pub const T0_M0: u8 = 0x01;
    pub const MASK_T0_MOD: u8 = 0x03;
}

/// `SCON`
pub mod scon {
    pub const MASK_UART0_MOD: u8 = 0xE0;
}

/// `T2MOD`
pub mod t2mod {
    pub const TMR_CLK: u8 = 0x80;
    pub const T2_CLK: u8 = 0x40;
    pub const T1_CLK: u8 = 0x20;
    pub const T0_CLK: u8 = 0x10;
    pub const T2_CAP_M1: u8 = 0x08;
    pub const T2_CAP_M0: u8 = 0x04;
    pub const T2OE: u8 = 0x02;
    pub const T2_CAP1_EN: u8 = 0x01;
}

/// `PWM_CTRL`
pub mod pwm_ctrl {
    pub const PWM_IE_END: u8 = 0x80;
    pub const PWM2_POLAR: u8 = 0x40;
    pub const PWM1_POLAR: u8 = 0x20;
    pub const PWM_IF_END: u8 = 0x10;
    pub const PWM2_OUT_EN: u8 = 0x08;
    pub const PWM1_OUT_EN: u8 = 0x04;
    pub const PWM_CLR_ALL: u8 = 0x02;
}

/// `SPI0_CTRL`
pub mod spi0_ctrl {
    pub const S0_MISO_OE: u8 = 0x80;
    pub const S0_MOSI_OE: u8 = 0x40;
    pub const S0_SCK_OE: u8 = 0x20;
    pub const S0_DATA_DIR: u8 = 0x10;
    pub const S0_MST_CLK: u8 = 0x08;
    pub const S0_2_WIRE: u8 = 0x04;
    pub const S0_CLR_ALL: u8 = 0x02;
    pub const S0_AUTO_IF: u8 = 0x01;
}

/// `SPI0_SETUP`
pub mod spi0_setup {
    pub const S0_MODE_SLV: u8 = 0x80;
    pub const S0_IE_FIFO_OV: u8 = 0x40;
    pub const S0_IE_FIRST: u8 = 0x20;
    pub const S0_IE_BYTE: u8 = 0x10;
    pub const S0_BIT_ORDER: u8 = 0x08;
    pub const S0_SLV_SELT: u8 = 0x02;
    pub const S0_SLV_PRELOAD: u8 = 0x01;
}

/// `ADC_CFG`
pub mod adc_cfg {
    pub const ADC_EN: u8 = 0x08;
    pub const CMP_EN: u8 = 0x04;
    pub const ADC_CLK: u8 = 0x01;
}

/// `TKEY_CTRL`
///
/// Channel field: 0 off, 1–6 TIN0–TIN5, 7 enabled with no channel.
pub mod tkey_ctrl {
    /// Read-only; cleared by any write to `TKEY_CTRL`.
    pub const TKC_IF: u8 = 0x80;
    pub const TKC_2MS: u8 = 0x10;
    pub const TKC_CHAN2: u8 = 0x04;
    pub const TKC_CHAN1: u8 = 0x02;
    pub const TKC_CHAN0: u8 = 0x01;
}

/// `TKEY_DATH`
pub mod tkey_dath {
    pub const TKD_CHG: u8 = 0x80;
}

/// `USB_C_CTRL`
pub mod usb_c_ctrl {
    pub const VBUS2_PD_EN: u8 = 0x80;
    pub const UCC2_PD_EN: u8 = 0x40;
    pub const UCC2_PU1_EN: u8 = 0x20;
    pub const UCC2_PU0_EN: u8 = 0x10;
    pub const VBUS1_PD_EN: u8 = 0x08;
    pub const UCC1_PD_EN: u8 = 0x04;
    pub const UCC1_PU1_EN: u8 = 0x02;
    pub const UCC1_PU0_EN: u8 = 0x01;
}

/// `UDEV_CTRL` (device mode view of 0xD1)
pub mod udev_ctrl {
    pub const UD_PD_DIS: u8 = 0x80;
    pub const UD_DP_PIN: u8 = 0x20;
    pub const UD_DM_PIN: u8 = 0x10;
    pub const UD_LOW_SPEED: u8 = 0x04;
    pub const UD_GP_BIT: u8 = 0x02;
    pub const UD_PORT_EN: u8 = 0x01;
}

/// `UHOST_CTRL` (host mode view of 0xD1)
pub mod uhost_ctrl {
    pub const UH_PD_DIS: u8 = 0x80;
    pub const UH_DP_PIN: u8 = 0x20;
    pub const UH_DM_PIN: u8 = 0x10;
    pub const UH_LOW_SPEED: u8 = 0x04;
    pub const UH_BUS_RESET: u8 = 0x02;
    pub const UH_PORT_EN: u8 = 0x01;
}

/// `UEPn_CTRL`, shared by endpoints 0–4
pub mod uep_ctrl {
    pub const UEP_R_TOG: u8 = 0x80;
    pub const UEP_T_TOG: u8 = 0x40;
    pub const UEP_AUTO_TOG: u8 = 0x10;
    pub const UEP_R_RES1: u8 = 0x08;
    pub const UEP_R_RES0: u8 = 0x04;
    pub const MASK_UEP_R_RES: u8 = 0x0C;
    pub const UEP_R_RES_ACK: u8 = 0x00;
    pub const UEP_R_RES_TOUT: u8 = 0x04;
    pub const UEP_R_RES_NAK: u8 = 0x08;
    pub const UEP_R_RES_STALL: u8 = 0x0C;
    pub const UEP_T_RES1: u8 = 0x02;
    pub const UEP_T_RES0: u8 = 0x01;
    pub const MASK_UEP_T_RES: u8 = 0x03;
    pub const UEP_T_RES_ACK: u8 = 0x00;
    pub const UEP_T_RES_TOUT: u8 = 0x01;
    pub const UEP_T_RES_NAK: u8 = 0x02;
    pub const UEP_T_RES_STALL: u8 = 0x03;
}

/// `USB_INT_ST`
pub mod usb_int_st {
    pub const UIS_IS_NAK: u8 = 0x80;
    pub const UIS_TOG_OK: u8 = 0x40;
    pub const UIS_TOKEN1: u8 = 0x20;
    pub const UIS_TOKEN0: u8 = 0x10;
    pub const MASK_UIS_TOKEN: u8 = 0x30;
    pub const UIS_TOKEN_OUT: u8 = 0x00;
    pub const UIS_TOKEN_SOF: u8 = 0x10;
    pub const UIS_TOKEN_IN: u8 = 0x20;
    pub const UIS_TOKEN_SETUP: u8 = 0x30;
    pub const MASK_UIS_ENDP: u8 = 0x0F;
    pub const MASK_UIS_H_RES: u8 = 0x0F;
}

/// `USB_MIS_ST`
pub mod usb_mis_st {
    pub const UMS_SOF_PRES: u8 = 0x80;
    pub const UMS_SOF_ACT: u8 = 0x40;
    pub const UMS_SIE_FREE: u8 = 0x20;
    pub const UMS_R_FIFO_RDY: u8 = 0x10;
    pub const UMS_BUS_RESET: u8 = 0x08;
    pub const UMS_SUSPEND: u8 = 0x04;
    pub const UMS_DM_LEVEL: u8 = 0x02;
    pub const UMS_DEV_ATTACH: u8 = 0x01;
}

/// `USB_INT_EN`
pub mod usb_int_en {
    pub const UIE_DEV_SOF: u8 = 0x80;
    pub const UIE_DEV_NAK: u8 = 0x40;
    pub const UIE_FIFO_OV: u8 = 0x10;
    pub const UIE_HST_SOF: u8 = 0x08;
    pub const UIE_SUSPEND: u8 = 0x04;
    pub const UIE_TRANSFER: u8 = 0x02;
    pub const UIE_DETECT: u8 = 0x01;
    pub const UIE_BUS_RST: u8 = 0x01;
}

/// `USB_CTRL`
///
/// `HOST_MODE` with the system-control field:
///
/// | mode | SYS_CTRL | meaning                               |
/// |------|----------|---------------------------------------|
/// | 0    | 00       | device disabled, no pull-up           |
/// | 0    | 01       | device enabled, external pull-up      |
/// | 0    | 1x       | device enabled, internal pull-up      |
/// | 1    | 00       | host, normal                          |
/// | 1    | 01       | host, force SE0                       |
/// | 1    | 10       | host, force J                         |
/// | 1    | 11       | host, force K / resume                |
pub mod usb_ctrl {
    pub const UC_HOST_MODE: u8 = 0x80;
    pub const UC_LOW_SPEED: u8 = 0x40;
    pub const UC_DEV_PU_EN: u8 = 0x20;
    pub const UC_SYS_CTRL1: u8 = 0x20;
    pub const UC_SYS_CTRL0: u8 = 0x10;
    pub const MASK_UC_SYS_CTRL: u8 = 0x30;
    pub const UC_INT_BUSY: u8 = 0x08;
    pub const UC_RESET_SIE: u8 = 0x04;
    pub const UC_CLR_ALL: u8 = 0x02;
    pub const UC_DMA_EN: u8 = 0x01;
}

/// `USB_DEV_AD`
pub mod usb_dev_ad {
    pub const UDA_GP_BIT: u8 = 0x80;
    pub const MASK_USB_ADDR: u8 = 0x7F;
}

/// `UEP4_1_MOD`
pub mod uep4_1_mod {
    pub const UEP1_RX_EN: u8 = 0x80;
    pub const UEP1_TX_EN: u8 = 0x40;
    pub const UEP1_BUF_MOD: u8 = 0x10;
    pub const UEP4_RX_EN: u8 = 0x08;
    pub const UEP4_TX_EN: u8 = 0x04;
}

/// `UEP2_3_MOD`
pub mod uep2_3_mod {
    pub const UEP3_RX_EN: u8 = 0x80;
    pub const UEP3_TX_EN: u8 = 0x40;
    pub const UEP3_BUF_MOD: u8 = 0x10;
    pub const UEP2_RX_EN: u8 = 0x08;
    pub const UEP2_TX_EN: u8 = 0x04;
    pub const UEP2_BUF_MOD: u8 = 0x01;
}

/// `SAFE_MOD` unlock sequence
pub mod safe_mod {
    pub const KEY1: u8 = 0x55;
    pub const KEY2: u8 = 0xAA;
}
