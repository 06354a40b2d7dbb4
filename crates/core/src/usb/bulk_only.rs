//! Bulk-only mass-storage transport wrappers.
//!
//! ```text
//! CBW (31 bytes)                      CSW (13 bytes)
//! +-------------------+ 0             +-------------------+ 0
//! | "USBC"            |               | "USBS"            |
//! | dCBWTag           | 4             | dCSWTag           | 4
//! | dCBWDataTransfer  | 8             | dCSWDataResidue   | 8
//! | bmCBWFlags        | 12            | bCSWStatus        | 12
//! | bCBWLUN           | 13            +-------------------+
//! | bCBWCBLength      | 14
//! | CBWCB[16]         | 15
//! +-------------------+
//! ```
//!
//! Parsing rejects a wrapper whose signature differs; nothing else in it is
//! interpreted first.

use log::debug;

use super::consts::bulk_only::{
    CBW_FLAG_IN, CBW_SIG, CBW_SIZE, CB_MAX_LEN, CSW_SIG, CSW_SIZE, CSW_STATUS_FAILED, CSW_STATUS_PASSED,
    CSW_STATUS_PHASE_ERROR,
};
use super::types::Direction;
use super::wire::{Le32, WireRecord};
use super::UsbError;

u8_enum! {
    /// Result of a bulk-only command.
    pub enum CswStatus (UnknownCswStatus) {
        Passed = CSW_STATUS_PASSED,
        Failed = CSW_STATUS_FAILED,
        PhaseError = CSW_STATUS_PHASE_ERROR,
    }
}

wire_record! {
    /// Command block wrapper.
    pub struct Cbw [31] {
        pub signature: [u8; 4],
        pub tag: Le32,
        pub data_transfer_length: Le32,
        pub flags: u8,
        pub lun: u8,
        pub cb_length: u8,
        pub cb: [u8; 16],
    }
}

static_assertions::const_assert_eq!(core::mem::size_of::<Cbw>(), CBW_SIZE);

impl Cbw {
    pub fn new(tag: u32, data_transfer_length: u32, direction: Direction, lun: u8, command: &[u8]) -> Result<Self, UsbError> {
        if command.is_empty() || command.len() > CB_MAX_LEN {
            return Err(UsbError::InvalidCommandLength(command.len().min(u8::MAX as usize) as u8));
        }
        let mut cb = [0u8; CB_MAX_LEN];
        cb[..command.len()].copy_from_slice(command);
        Ok(Cbw {
            signature: CBW_SIG,
            tag: tag.into(),
            data_transfer_length: data_transfer_length.into(),
            flags: match direction {
                Direction::In => CBW_FLAG_IN,
                Direction::Out => 0,
            },
            lun,
            cb_length: command.len() as u8,
            cb,
        })
    }

    /// Parse and validate a CBW received on the bulk OUT endpoint.
    pub fn parse(bytes: &[u8]) -> Result<Self, UsbError> {
        let cbw = Self::read_from(bytes)?;
        if cbw.signature != CBW_SIG {
            debug!("CBW rejected: signature {:02X?}", cbw.signature);
            return Err(UsbError::BadSignature {
                expected: CBW_SIG,
                found: cbw.signature,
            });
        }
        if cbw.cb_length == 0 || cbw.cb_length as usize > CB_MAX_LEN {
            return Err(UsbError::InvalidCommandLength(cbw.cb_length));
        }
        Ok(cbw)
    }

    pub fn direction(&self) -> Direction {
        Direction::from_bit7(self.flags)
    }

    /// The valid part of the command block.
    pub fn command(&self) -> &[u8] {
        &self.cb[..(self.cb_length as usize).min(CB_MAX_LEN)]
    }
}

wire_record! {
    /// Command status wrapper.
    pub struct Csw [13] {
        pub signature: [u8; 4],
        pub tag: Le32,
        pub data_residue: Le32,
        pub status: u8,
    }
}

static_assertions::const_assert_eq!(core::mem::size_of::<Csw>(), CSW_SIZE);

impl Csw {
    pub fn new(tag: u32, data_residue: u32, status: CswStatus) -> Self {
        Csw {
            signature: CSW_SIG,
            tag: tag.into(),
            data_residue: data_residue.into(),
            status: status.into(),
        }
    }

    /// Status reply to `cbw`, echoing its tag.
    pub fn for_command(cbw: &Cbw, data_residue: u32, status: CswStatus) -> Self {
        Self::new(cbw.tag.get(), data_residue, status)
    }

    /// Parse and validate a CSW received on the bulk IN endpoint.
    pub fn parse(bytes: &[u8]) -> Result<Self, UsbError> {
        let csw = Self::read_from(bytes)?;
        if csw.signature != CSW_SIG {
            debug!("CSW rejected: signature {:02X?}", csw.signature);
            return Err(UsbError::BadSignature {
                expected: CSW_SIG,
                found: csw.signature,
            });
        }
        csw.status()?;
        Ok(csw)
    }

    pub fn status(&self) -> Result<CswStatus, UsbError> {
        CswStatus::try_from(self.status)
    }
}
