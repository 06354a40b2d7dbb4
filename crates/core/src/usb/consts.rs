//! USB protocol constants, bit-for-bit as the USB 2.0 and bulk-only
//! transport specifications define them.

/// Default address assigned by firmware during enumeration
pub const USB_DEVICE_ADDR: u8 = 0x02;
/// Default maximum packet size for endpoint 0
pub const DEFAULT_ENDP0_SIZE: u8 = 8;
/// Default maximum packet size for endpoint 1
pub const DEFAULT_ENDP1_SIZE: u8 = 8;
/// Largest full-speed packet the SIE handles
pub const MAX_PACKET_SIZE: u8 = 64;

/// Packet identifiers (4-bit codes).
pub mod pid {
    /// Reserved
    pub const NULL: u8 = 0x00;
    pub const SOF: u8 = 0x05;
    pub const SETUP: u8 = 0x0D;
    pub const IN: u8 = 0x09;
    pub const OUT: u8 = 0x01;
    pub const ACK: u8 = 0x02;
    pub const NAK: u8 = 0x0A;
    pub const STALL: u8 = 0x0E;
    pub const DATA0: u8 = 0x03;
    pub const DATA1: u8 = 0x0B;
    pub const PRE: u8 = 0x0C;
}

/// Standard device requests (`bRequest`).
pub mod request {
    pub const GET_STATUS: u8 = 0x00;
    pub const CLEAR_FEATURE: u8 = 0x01;
    pub const SET_FEATURE: u8 = 0x03;
    pub const SET_ADDRESS: u8 = 0x05;
    pub const GET_DESCRIPTOR: u8 = 0x06;
    pub const SET_DESCRIPTOR: u8 = 0x07;
    pub const GET_CONFIGURATION: u8 = 0x08;
    pub const SET_CONFIGURATION: u8 = 0x09;
    pub const GET_INTERFACE: u8 = 0x0A;
    pub const SET_INTERFACE: u8 = 0x0B;
    pub const SYNCH_FRAME: u8 = 0x0C;
}

/// HID class requests.
pub mod hid_request {
    pub const GET_REPORT: u8 = 0x01;
    pub const GET_IDLE: u8 = 0x02;
    pub const GET_PROTOCOL: u8 = 0x03;
    pub const SET_REPORT: u8 = 0x09;
    pub const SET_IDLE: u8 = 0x0A;
    pub const SET_PROTOCOL: u8 = 0x0B;
}

/// `bmRequestType` fields.
pub mod request_type {
    /// Device to host
    pub const IN: u8 = 0x80;
    /// Host to device
    pub const OUT: u8 = 0x00;
    pub const READ: u8 = 0x80;
    pub const WRITE: u8 = 0x00;

    pub const TYPE_MASK: u8 = 0x60;
    pub const STANDARD: u8 = 0x00;
    pub const CLASS: u8 = 0x20;
    pub const VENDOR: u8 = 0x40;
    pub const RESERVED: u8 = 0x60;

    pub const RECIP_MASK: u8 = 0x1F;
    pub const RECIP_DEVICE: u8 = 0x00;
    pub const RECIP_INTERF: u8 = 0x01;
    pub const RECIP_ENDP: u8 = 0x02;
    pub const RECIP_OTHER: u8 = 0x03;
}

/// `bDescriptorType` values.
pub mod descriptor_type {
    pub const DEVICE: u8 = 0x01;
    pub const CONFIG: u8 = 0x02;
    pub const STRING: u8 = 0x03;
    pub const INTERF: u8 = 0x04;
    pub const ENDP: u8 = 0x05;
    pub const QUALIF: u8 = 0x06;
    pub const SPEED: u8 = 0x07;
    pub const OTG: u8 = 0x09;
    pub const HID: u8 = 0x21;
    pub const REPORT: u8 = 0x22;
    pub const PHYSIC: u8 = 0x23;
    pub const CS_INTF: u8 = 0x24;
    pub const CS_ENDP: u8 = 0x25;
    pub const HUB: u8 = 0x29;
}

/// `bDeviceClass` / `bInterfaceClass` values.
pub mod device_class {
    pub const RESERVED: u8 = 0x00;
    pub const AUDIO: u8 = 0x01;
    pub const COMMUNIC: u8 = 0x02;
    pub const HID: u8 = 0x03;
    pub const MONITOR: u8 = 0x04;
    pub const PHYSIC_IF: u8 = 0x05;
    pub const POWER: u8 = 0x06;
    pub const PRINTER: u8 = 0x07;
    pub const STORAGE: u8 = 0x08;
    pub const HUB: u8 = 0x09;
    pub const VEN_SPEC: u8 = 0xFF;
}

/// `bEndpointAddress` and `bmAttributes` fields.
pub mod endpoint {
    pub const DIR_MASK: u8 = 0x80;
    pub const ADDR_MASK: u8 = 0x0F;
    pub const TYPE_MASK: u8 = 0x03;
    pub const TYPE_CTRL: u8 = 0x00;
    pub const TYPE_ISOCH: u8 = 0x01;
    pub const TYPE_BULK: u8 = 0x02;
    pub const TYPE_INTER: u8 = 0x03;
}

/// Bulk-only mass-storage transport.
pub mod bulk_only {
    /// Total length of a command block wrapper
    pub const CBW_SIZE: usize = 0x1F;
    /// Total length of a command status wrapper
    pub const CSW_SIZE: usize = 0x0D;
    /// "USBC"
    pub const CBW_SIG: [u8; 4] = [0x55, 0x53, 0x42, 0x43];
    /// "USBS"
    pub const CSW_SIG: [u8; 4] = [0x55, 0x53, 0x42, 0x53];
    /// `bmCBWFlags` direction bit, set for device to host
    pub const CBW_FLAG_IN: u8 = 0x80;
    pub const CB_MAX_LEN: usize = 16;

    pub const CSW_STATUS_PASSED: u8 = 0x00;
    pub const CSW_STATUS_FAILED: u8 = 0x01;
    pub const CSW_STATUS_PHASE_ERROR: u8 = 0x02;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_match_usb_spec() {
        assert_eq!(pid::SETUP, 0x0D);
        assert_eq!(pid::DATA1, 0x0B);
        assert_eq!(request::GET_DESCRIPTOR, 0x06);
        assert_eq!(request::SYNCH_FRAME, 0x0C);
        assert_eq!(hid_request::SET_IDLE, 0x0A);
        assert_eq!(descriptor_type::HID, 0x21);
        assert_eq!(descriptor_type::HUB, 0x29);
        assert_eq!(device_class::STORAGE, 0x08);
        assert_eq!(device_class::VEN_SPEC, 0xFF);
        assert_eq!(endpoint::TYPE_INTER, 0x03);
        assert_eq!(USB_DEVICE_ADDR, 2);
        assert_eq!(MAX_PACKET_SIZE, 64);
    }

    #[test]
    fn test_request_type_fields_are_disjoint() {
        assert_eq!(request_type::IN & request_type::TYPE_MASK, 0);
        assert_eq!(request_type::TYPE_MASK & request_type::RECIP_MASK, 0);
        assert_eq!(request_type::IN | request_type::TYPE_MASK | request_type::RECIP_MASK, 0xFF);
        assert_eq!(request_type::RESERVED, request_type::TYPE_MASK);
    }

    #[test]
    fn test_bulk_only_signatures() {
        assert_eq!(&bulk_only::CBW_SIG, b"USBC");
        assert_eq!(&bulk_only::CSW_SIG, b"USBS");
        assert_eq!(bulk_only::CBW_SIZE, 31);
        assert_eq!(bulk_only::CSW_SIZE, 13);
    }
}
