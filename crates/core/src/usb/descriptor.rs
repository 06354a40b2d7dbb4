//! Standard USB descriptors and the setup packet.
//!
//! Field order is the USB 2.0 chapter 9 order; every record is transmitted
//! and received as its raw bytes.
//!
//! | Record                | Bytes     |
//! |-----------------------|-----------|
//! | `SetupRequest`        | 8         |
//! | `DeviceDescriptor`    | 18        |
//! | `ConfigDescriptor`    | 9         |
//! | `InterfaceDescriptor` | 9         |
//! | `EndpointDescriptor`  | 7         |
//! | `HidDescriptor`       | 9         |
//! | `ConfigDescriptorLong`| 9 + 9 + 7·n |

use super::consts::{endpoint, request};
use super::types::{DescriptorType, Direction, HidRequest, Recipient, RequestKind, StandardRequest, TransferType};
use super::wire::{Le16, WireRecord};
use super::UsbError;

/// A descriptor with a fixed length and type header.
pub trait Descriptor: WireRecord {
    const DESCRIPTOR_TYPE: DescriptorType;

    /// Deserialize and check `bLength` and `bDescriptorType`.
    fn parse(bytes: &[u8]) -> Result<Self, UsbError> {
        let d = Self::read_from(bytes)?;
        let expected = u8::from(Self::DESCRIPTOR_TYPE);
        if bytes[1] != expected {
            return Err(UsbError::UnexpectedDescriptorType { expected, found: bytes[1] });
        }
        if bytes[0] as usize != Self::SIZE {
            return Err(UsbError::BadDescriptorLength {
                expected: Self::SIZE as u8,
                found: bytes[0],
            });
        }
        Ok(d)
    }
}

/// Type of the descriptor at the front of `bytes`.
pub fn peek_descriptor_type(bytes: &[u8]) -> Result<DescriptorType, UsbError> {
    if bytes.len() < 2 {
        return Err(UsbError::Truncated { needed: 2, got: bytes.len() });
    }
    DescriptorType::try_from(bytes[1])
}

// ─── Setup packet ───────────────────────────────────────────────────────────

wire_record! {
    /// Control transfer setup stage.
    pub struct SetupRequest [8] {
        pub request_type: u8,
        pub request: u8,
        pub value: Le16,
        pub index: Le16,
        pub length: Le16,
    }
}

impl SetupRequest {
    pub fn new(direction: Direction, kind: RequestKind, recipient: Recipient, request: u8, value: u16, index: u16, length: u16) -> Self {
        SetupRequest {
            request_type: direction.bit7() | kind.bits() | u8::from(recipient),
            request,
            value: value.into(),
            index: index.into(),
            length: length.into(),
        }
    }

    pub fn get_descriptor(descriptor_type: DescriptorType, descriptor_index: u8, length: u16) -> Self {
        Self::new(
            Direction::In,
            RequestKind::Standard,
            Recipient::Device,
            request::GET_DESCRIPTOR,
            (u8::from(descriptor_type) as u16) << 8 | descriptor_index as u16,
            0,
            length,
        )
    }

    pub fn set_address(address: u8) -> Self {
        Self::new(Direction::Out, RequestKind::Standard, Recipient::Device, request::SET_ADDRESS, address as u16, 0, 0)
    }

    pub fn set_configuration(config_value: u8) -> Self {
        Self::new(Direction::Out, RequestKind::Standard, Recipient::Device, request::SET_CONFIGURATION, config_value as u16, 0, 0)
    }

    pub fn direction(&self) -> Direction {
        Direction::from_bit7(self.request_type)
    }

    pub fn kind(&self) -> RequestKind {
        RequestKind::from_request_type(self.request_type)
    }

    pub fn recipient(&self) -> Result<Recipient, UsbError> {
        Recipient::from_request_type(self.request_type)
    }

    /// `bRequest` as a standard request. Only meaningful when `kind()` is standard.
    pub fn standard_request(&self) -> Result<StandardRequest, UsbError> {
        StandardRequest::try_from(self.request)
    }

    /// `bRequest` as a HID class request.
    pub fn hid_request(&self) -> Result<HidRequest, UsbError> {
        HidRequest::try_from(self.request)
    }

    /// Descriptor type and index requested by GET_DESCRIPTOR (`wValue` high and low).
    pub fn requested_descriptor(&self) -> Result<(DescriptorType, u8), UsbError> {
        Ok((DescriptorType::try_from(self.value.high())?, self.value.low()))
    }
}

// ─── Descriptors ────────────────────────────────────────────────────────────

wire_record! {
    pub struct DeviceDescriptor [18] {
        pub length: u8,
        pub descriptor_type: u8,
        pub bcd_usb: Le16,
        pub device_class: u8,
        pub device_sub_class: u8,
        pub device_protocol: u8,
        pub max_packet_size0: u8,
        pub id_vendor: Le16,
        pub id_product: Le16,
        pub bcd_device: Le16,
        pub i_manufacturer: u8,
        pub i_product: u8,
        pub i_serial_number: u8,
        pub num_configurations: u8,
    }
}

impl Descriptor for DeviceDescriptor {
    const DESCRIPTOR_TYPE: DescriptorType = DescriptorType::Device;
}

impl DeviceDescriptor {
    /// USB 1.1 full-speed device with no string descriptors and one configuration.
    pub fn new(device_class: u8, max_packet_size0: u8, id_vendor: u16, id_product: u16, bcd_device: u16) -> Self {
        DeviceDescriptor {
            length: Self::SIZE as u8,
            descriptor_type: u8::from(DescriptorType::Device),
            bcd_usb: Le16::new(0x0110),
            device_class,
            max_packet_size0,
            id_vendor: id_vendor.into(),
            id_product: id_product.into(),
            bcd_device: bcd_device.into(),
            num_configurations: 1,
            ..Default::default()
        }
    }
}

wire_record! {
    pub struct ConfigDescriptor [9] {
        pub length: u8,
        pub descriptor_type: u8,
        pub total_length: Le16,
        pub num_interfaces: u8,
        pub configuration_value: u8,
        pub i_configuration: u8,
        pub attributes: u8,
        /// In 2 mA units
        pub max_power: u8,
    }
}

impl Descriptor for ConfigDescriptor {
    const DESCRIPTOR_TYPE: DescriptorType = DescriptorType::Config;
}

impl ConfigDescriptor {
    pub fn new(configuration_value: u8, attributes: u8, max_power: u8) -> Self {
        ConfigDescriptor {
            length: Self::SIZE as u8,
            descriptor_type: u8::from(DescriptorType::Config),
            total_length: Le16::new(Self::SIZE as u16),
            num_interfaces: 1,
            configuration_value,
            i_configuration: 0,
            attributes,
            max_power,
        }
    }
}

wire_record! {
    pub struct InterfaceDescriptor [9] {
        pub length: u8,
        pub descriptor_type: u8,
        pub interface_number: u8,
        pub alternate_setting: u8,
        pub num_endpoints: u8,
        pub interface_class: u8,
        pub interface_sub_class: u8,
        pub interface_protocol: u8,
        pub i_interface: u8,
    }
}

impl Descriptor for InterfaceDescriptor {
    const DESCRIPTOR_TYPE: DescriptorType = DescriptorType::Interface;
}

impl InterfaceDescriptor {
    pub fn new(interface_number: u8, num_endpoints: u8, class: u8, sub_class: u8, protocol: u8) -> Self {
        InterfaceDescriptor {
            length: Self::SIZE as u8,
            descriptor_type: u8::from(DescriptorType::Interface),
            interface_number,
            alternate_setting: 0,
            num_endpoints,
            interface_class: class,
            interface_sub_class: sub_class,
            interface_protocol: protocol,
            i_interface: 0,
        }
    }
}

wire_record! {
    pub struct EndpointDescriptor [7] {
        pub length: u8,
        pub descriptor_type: u8,
        pub endpoint_address: u8,
        pub attributes: u8,
        pub max_packet_size: Le16,
        pub interval: u8,
    }
}

impl Descriptor for EndpointDescriptor {
    const DESCRIPTOR_TYPE: DescriptorType = DescriptorType::Endpoint;
}

impl EndpointDescriptor {
    pub fn new(number: u8, direction: Direction, transfer: TransferType, max_packet_size: u16, interval: u8) -> Self {
        EndpointDescriptor {
            length: Self::SIZE as u8,
            descriptor_type: u8::from(DescriptorType::Endpoint),
            endpoint_address: direction.bit7() | (number & endpoint::ADDR_MASK),
            attributes: transfer.bits(),
            max_packet_size: max_packet_size.into(),
            interval,
        }
    }

    pub fn number(&self) -> u8 {
        self.endpoint_address & endpoint::ADDR_MASK
    }

    pub fn direction(&self) -> Direction {
        Direction::from_bit7(self.endpoint_address & endpoint::DIR_MASK)
    }

    pub fn transfer_type(&self) -> TransferType {
        TransferType::from_attributes(self.attributes)
    }
}

wire_record! {
    /// HID class descriptor with one subordinate (report) descriptor.
    pub struct HidDescriptor [9] {
        pub length: u8,
        pub descriptor_type: u8,
        pub bcd_hid: Le16,
        pub country_code: u8,
        pub num_descriptors: u8,
        pub report_descriptor_type: u8,
        pub report_descriptor_length: Le16,
    }
}

impl Descriptor for HidDescriptor {
    const DESCRIPTOR_TYPE: DescriptorType = DescriptorType::Hid;
}

impl HidDescriptor {
    pub fn new(bcd_hid: u16, report_descriptor_length: u16) -> Self {
        HidDescriptor {
            length: Self::SIZE as u8,
            descriptor_type: u8::from(DescriptorType::Hid),
            bcd_hid: bcd_hid.into(),
            country_code: 0,
            num_descriptors: 1,
            report_descriptor_type: u8::from(DescriptorType::Report),
            report_descriptor_length: report_descriptor_length.into(),
        }
    }
}

// ─── Configuration bundle ───────────────────────────────────────────────────

/// Configuration, its single interface and that interface's endpoints, in
/// the order GET_DESCRIPTOR(CONFIG) returns them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDescriptorLong {
    pub config: ConfigDescriptor,
    pub interface: InterfaceDescriptor,
    pub endpoints: Vec<EndpointDescriptor>,
}

impl ConfigDescriptorLong {
    /// Bundle the parts, filling in `wTotalLength` and `bNumEndpoints`.
    ///
    /// `bNumEndpoints` is one byte, so at most 255 endpoints fit.
    pub fn new(
        mut config: ConfigDescriptor,
        mut interface: InterfaceDescriptor,
        endpoints: Vec<EndpointDescriptor>,
    ) -> Result<Self, UsbError> {
        let count = u8::try_from(endpoints.len()).map_err(|_| UsbError::TooManyEndpoints(endpoints.len()))?;
        // 255 endpoints is 1803 bytes
        config.total_length = Le16::new(Self::layout_len(count as usize) as u16);
        interface.num_endpoints = count;
        Ok(ConfigDescriptorLong { config, interface, endpoints })
    }

    fn layout_len(endpoints: usize) -> usize {
        ConfigDescriptor::SIZE + InterfaceDescriptor::SIZE + EndpointDescriptor::SIZE * endpoints
    }

    pub fn total_length(&self) -> usize {
        Self::layout_len(self.endpoints.len())
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.total_length());
        out.extend_from_slice(&self.config.to_bytes());
        out.extend_from_slice(&self.interface.to_bytes());
        for ep in &self.endpoints {
            out.extend_from_slice(&ep.to_bytes());
        }
        out
    }

    /// Parse a bundle. The endpoint count comes from the interface's `bNumEndpoints`.
    pub fn parse(bytes: &[u8]) -> Result<Self, UsbError> {
        let config = ConfigDescriptor::parse(bytes)?;
        let interface = InterfaceDescriptor::parse(&bytes[ConfigDescriptor::SIZE..])?;
        let mut pos = ConfigDescriptor::SIZE + InterfaceDescriptor::SIZE;
        let mut endpoints = Vec::with_capacity(interface.num_endpoints as usize);
        for _ in 0..interface.num_endpoints {
            endpoints.push(EndpointDescriptor::parse(&bytes[pos..])?);
            pos += EndpointDescriptor::SIZE;
        }
        let declared = config.total_length.get();
        if declared as usize != pos {
            return Err(UsbError::TotalLengthMismatch { declared, actual: pos });
        }
        Ok(ConfigDescriptorLong { config, interface, endpoints })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usb::consts::device_class;
    use static_assertions::const_assert_eq;

    const_assert_eq!(core::mem::size_of::<DeviceDescriptor>(), 18);
    const_assert_eq!(core::mem::size_of::<SetupRequest>(), 8);

    fn hid_config() -> ConfigDescriptorLong {
        ConfigDescriptorLong::new(
            ConfigDescriptor::new(1, 0x80, 50),
            InterfaceDescriptor::new(0, 0, device_class::HID, 1, 1),
            vec![
                EndpointDescriptor::new(1, Direction::In, TransferType::Interrupt, 8, 10),
                EndpointDescriptor::new(2, Direction::Out, TransferType::Interrupt, 8, 10),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_device_descriptor_bytes() {
        let d = DeviceDescriptor::new(0, 8, 0x1209, 0xC550, 0x0100);
        let bytes = d.to_bytes();
        assert_eq!(
            bytes,
            [18, 0x01, 0x10, 0x01, 0, 0, 0, 8, 0x09, 0x12, 0x50, 0xC5, 0x00, 0x01, 0, 0, 0, 1]
        );
        let back = DeviceDescriptor::parse(&bytes).unwrap();
        assert_eq!(back, d);
        assert_eq!(back.id_product.get(), 0xC550);
    }

    #[test]
    fn test_parse_checks_header() {
        let mut bytes = DeviceDescriptor::new(0, 8, 1, 2, 3).to_bytes();
        bytes[1] = 0x02;
        assert_eq!(
            DeviceDescriptor::parse(&bytes),
            Err(UsbError::UnexpectedDescriptorType { expected: 0x01, found: 0x02 })
        );
        bytes[1] = 0x01;
        bytes[0] = 17;
        assert_eq!(
            DeviceDescriptor::parse(&bytes),
            Err(UsbError::BadDescriptorLength { expected: 18, found: 17 })
        );
        assert_eq!(
            DeviceDescriptor::parse(&bytes[..10]),
            Err(UsbError::Truncated { needed: 18, got: 10 })
        );
    }

    #[test]
    fn test_write_to_small_buffer() {
        let ep = EndpointDescriptor::new(1, Direction::In, TransferType::Bulk, 64, 0);
        let mut buf = [0u8; 6];
        assert_eq!(ep.write_to(&mut buf), Err(UsbError::BufferTooSmall { needed: 7, got: 6 }));
        let mut buf = [0u8; 16];
        assert_eq!(ep.write_to(&mut buf), Ok(7));
        assert_eq!(&buf[..7], &[7, 0x05, 0x81, 0x02, 64, 0, 0]);
        assert_eq!(ep.to_vec(), buf[..7].to_vec());
    }

    #[test]
    fn test_endpoint_fields() {
        let ep = EndpointDescriptor::new(3, Direction::Out, TransferType::Bulk, 64, 0);
        assert_eq!(ep.endpoint_address, 0x03);
        assert_eq!(ep.number(), 3);
        assert_eq!(ep.direction(), Direction::Out);
        assert_eq!(ep.transfer_type(), TransferType::Bulk);
    }

    #[test]
    fn test_config_long_layout() {
        let cfg = hid_config();
        assert_eq!(cfg.interface.num_endpoints, 2);
        assert_eq!(cfg.total_length(), 9 + 9 + 7 * 2);
        let bytes = cfg.to_bytes();
        assert_eq!(bytes.len(), 32);
        assert_eq!(&bytes[0..4], &[9, 0x02, 32, 0]);
        assert_eq!(&bytes[9..11], &[9, 0x04]);
        assert_eq!(&bytes[18..21], &[7, 0x05, 0x81]);
        assert_eq!(&bytes[25..28], &[7, 0x05, 0x02]);
        assert_eq!(ConfigDescriptorLong::parse(&bytes).unwrap(), cfg);
    }

    #[test]
    fn test_config_long_rejects_bad_total() {
        let mut bytes = hid_config().to_bytes();
        bytes[2] = 40;
        assert_eq!(
            ConfigDescriptorLong::parse(&bytes),
            Err(UsbError::TotalLengthMismatch { declared: 40, actual: 32 })
        );
        let bytes = hid_config().to_bytes();
        assert_eq!(
            ConfigDescriptorLong::parse(&bytes[..30]),
            Err(UsbError::Truncated { needed: 7, got: 5 })
        );
    }

    #[test]
    fn test_config_long_endpoint_count_limit() {
        let ep = EndpointDescriptor::new(1, Direction::In, TransferType::Bulk, 64, 0);
        let make = |n: usize| {
            ConfigDescriptorLong::new(
                ConfigDescriptor::new(1, 0x80, 50),
                InterfaceDescriptor::new(0, 0, device_class::STORAGE, 6, 0x50),
                vec![ep; n],
            )
        };
        let full = make(255).unwrap();
        assert_eq!(full.interface.num_endpoints, 255);
        assert_eq!(full.config.total_length.get(), 9 + 9 + 7 * 255);
        assert_eq!(make(256), Err(UsbError::TooManyEndpoints(256)));
    }

    #[test]
    fn test_hid_descriptor() {
        let hid = HidDescriptor::new(0x0111, 0x34);
        assert_eq!(hid.to_bytes(), [9, 0x21, 0x11, 0x01, 0, 1, 0x22, 0x34, 0]);
        assert_eq!(peek_descriptor_type(&hid.to_bytes()), Ok(DescriptorType::Hid));
        assert_eq!(peek_descriptor_type(&[9]), Err(UsbError::Truncated { needed: 2, got: 1 }));
    }

    #[test]
    fn test_setup_request() {
        let bytes = [0x80, 0x06, 0x00, 0x01, 0x00, 0x00, 0x40, 0x00];
        let setup = SetupRequest::read_from(&bytes).unwrap();
        assert_eq!(setup.direction(), Direction::In);
        assert_eq!(setup.kind(), RequestKind::Standard);
        assert_eq!(setup.recipient(), Ok(Recipient::Device));
        assert_eq!(setup.standard_request(), Ok(StandardRequest::GetDescriptor));
        assert_eq!(setup.requested_descriptor(), Ok((DescriptorType::Device, 0)));
        assert_eq!(setup.length.get(), 64);
        assert_eq!(SetupRequest::get_descriptor(DescriptorType::Device, 0, 64).to_bytes(), bytes);

        let set_idle = SetupRequest::new(Direction::Out, RequestKind::Class, Recipient::Interface, 0x0A, 0, 0, 0);
        assert_eq!(set_idle.request_type, 0x21);
        assert_eq!(set_idle.hid_request(), Ok(HidRequest::SetIdle));
        assert_eq!(SetupRequest::set_address(2).to_bytes(), [0x00, 0x05, 0x02, 0, 0, 0, 0, 0]);
        assert_eq!(SetupRequest::set_configuration(1).value.get(), 1);
    }

    #[test]
    fn test_unknown_request_type_bits() {
        let setup = SetupRequest::read_from(&[0x1F, 0x02, 0, 0, 0, 0, 0, 0]).unwrap();
        assert_eq!(setup.recipient(), Err(UsbError::UnknownRecipient(0x1F)));
        assert_eq!(setup.standard_request(), Err(UsbError::UnknownRequest(0x02)));
    }
}
