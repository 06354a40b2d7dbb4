//! Typed views of the protocol constants.

use super::consts::{descriptor_type, device_class, endpoint, hid_request, pid, request, request_type};
use super::UsbError;

u8_enum! {
    /// Packet identifier.
    pub enum Pid (UnknownPid) {
        Sof = pid::SOF,
        Setup = pid::SETUP,
        In = pid::IN,
        Out = pid::OUT,
        Ack = pid::ACK,
        Nak = pid::NAK,
        Stall = pid::STALL,
        Data0 = pid::DATA0,
        Data1 = pid::DATA1,
        Pre = pid::PRE,
    }
}

impl Pid {
    /// Packet byte: the code in the low nibble, its complement in the high nibble.
    pub const fn to_wire(self) -> u8 {
        let code = self as u8;
        code | ((!code & 0x0F) << 4)
    }

    /// Decode a packet byte, checking the complement nibble.
    pub fn from_wire(byte: u8) -> Result<Self, UsbError> {
        if byte >> 4 != !byte & 0x0F {
            return Err(UsbError::PidCheck(byte));
        }
        Pid::try_from(byte & 0x0F)
    }

    pub const fn is_token(self) -> bool {
        matches!(self, Pid::Sof | Pid::Setup | Pid::In | Pid::Out)
    }

    pub const fn is_handshake(self) -> bool {
        matches!(self, Pid::Ack | Pid::Nak | Pid::Stall)
    }
}

u8_enum! {
    /// Standard device request (`bRequest` with a standard request type).
    pub enum StandardRequest (UnknownRequest) {
        GetStatus = request::GET_STATUS,
        ClearFeature = request::CLEAR_FEATURE,
        SetFeature = request::SET_FEATURE,
        SetAddress = request::SET_ADDRESS,
        GetDescriptor = request::GET_DESCRIPTOR,
        SetDescriptor = request::SET_DESCRIPTOR,
        GetConfiguration = request::GET_CONFIGURATION,
        SetConfiguration = request::SET_CONFIGURATION,
        GetInterface = request::GET_INTERFACE,
        SetInterface = request::SET_INTERFACE,
        SynchFrame = request::SYNCH_FRAME,
    }
}

u8_enum! {
    /// HID class request.
    pub enum HidRequest (UnknownHidRequest) {
        GetReport = hid_request::GET_REPORT,
        GetIdle = hid_request::GET_IDLE,
        GetProtocol = hid_request::GET_PROTOCOL,
        SetReport = hid_request::SET_REPORT,
        SetIdle = hid_request::SET_IDLE,
        SetProtocol = hid_request::SET_PROTOCOL,
    }
}

u8_enum! {
    pub enum DescriptorType (UnknownDescriptorType) {
        Device = descriptor_type::DEVICE,
        Config = descriptor_type::CONFIG,
        String = descriptor_type::STRING,
        Interface = descriptor_type::INTERF,
        Endpoint = descriptor_type::ENDP,
        DeviceQualifier = descriptor_type::QUALIF,
        OtherSpeedConfig = descriptor_type::SPEED,
        Otg = descriptor_type::OTG,
        Hid = descriptor_type::HID,
        Report = descriptor_type::REPORT,
        Physical = descriptor_type::PHYSIC,
        ClassInterface = descriptor_type::CS_INTF,
        ClassEndpoint = descriptor_type::CS_ENDP,
        Hub = descriptor_type::HUB,
    }
}

u8_enum! {
    pub enum DeviceClass (UnknownDeviceClass) {
        /// Class defined per interface
        Reserved = device_class::RESERVED,
        Audio = device_class::AUDIO,
        Communication = device_class::COMMUNIC,
        Hid = device_class::HID,
        Monitor = device_class::MONITOR,
        PhysicalInterface = device_class::PHYSIC_IF,
        Power = device_class::POWER,
        Printer = device_class::PRINTER,
        Storage = device_class::STORAGE,
        Hub = device_class::HUB,
        VendorSpecific = device_class::VEN_SPEC,
    }
}

u8_enum! {
    /// Request recipient, the low five bits of `bmRequestType`.
    pub enum Recipient (UnknownRecipient) {
        Device = request_type::RECIP_DEVICE,
        Interface = request_type::RECIP_INTERF,
        Endpoint = request_type::RECIP_ENDP,
        Other = request_type::RECIP_OTHER,
    }
}

impl Recipient {
    pub fn from_request_type(bm_request_type: u8) -> Result<Self, UsbError> {
        Recipient::try_from(bm_request_type & request_type::RECIP_MASK)
    }
}

/// Data stage direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Host to device
    Out,
    /// Device to host
    In,
}

impl Direction {
    /// Direction from bit 7 of `bmRequestType`, `bEndpointAddress` or `bmCBWFlags`.
    pub const fn from_bit7(byte: u8) -> Self {
        if byte & request_type::IN != 0 {
            Direction::In
        } else {
            Direction::Out
        }
    }

    pub const fn bit7(self) -> u8 {
        match self {
            Direction::Out => request_type::OUT,
            Direction::In => request_type::IN,
        }
    }
}

/// Request type, bits 6..5 of `bmRequestType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Standard,
    Class,
    Vendor,
    Reserved,
}

impl RequestKind {
    pub const fn from_request_type(bm_request_type: u8) -> Self {
        match bm_request_type & request_type::TYPE_MASK {
            request_type::STANDARD => RequestKind::Standard,
            request_type::CLASS => RequestKind::Class,
            request_type::VENDOR => RequestKind::Vendor,
            _ => RequestKind::Reserved,
        }
    }

    pub const fn bits(self) -> u8 {
        match self {
            RequestKind::Standard => request_type::STANDARD,
            RequestKind::Class => request_type::CLASS,
            RequestKind::Vendor => request_type::VENDOR,
            RequestKind::Reserved => request_type::RESERVED,
        }
    }
}

/// Endpoint transfer type, bits 1..0 of `bmAttributes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferType {
    Control,
    Isochronous,
    Bulk,
    Interrupt,
}

impl TransferType {
    pub const fn from_attributes(bm_attributes: u8) -> Self {
        match bm_attributes & endpoint::TYPE_MASK {
            endpoint::TYPE_CTRL => TransferType::Control,
            endpoint::TYPE_ISOCH => TransferType::Isochronous,
            endpoint::TYPE_BULK => TransferType::Bulk,
            _ => TransferType::Interrupt,
        }
    }

    pub const fn bits(self) -> u8 {
        match self {
            TransferType::Control => endpoint::TYPE_CTRL,
            TransferType::Isochronous => endpoint::TYPE_ISOCH,
            TransferType::Bulk => endpoint::TYPE_BULK,
            TransferType::Interrupt => endpoint::TYPE_INTER,
        }
    }
}
