use thiserror::Error;

/// Protocol-validation failures at the USB boundary.
///
/// Returned to the calling driver, which decides how to recover (usually by
/// stalling the endpoint).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsbError {
    #[error("input truncated: need {needed} bytes, got {got}")]
    Truncated { needed: usize, got: usize },
    #[error("output buffer too small: need {needed} bytes, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    #[error("descriptor type 0x{found:02X} where 0x{expected:02X} was expected")]
    UnexpectedDescriptorType { expected: u8, found: u8 },
    #[error("descriptor length {found} where {expected} was expected")]
    BadDescriptorLength { expected: u8, found: u8 },
    #[error("unknown descriptor type 0x{0:02X}")]
    UnknownDescriptorType(u8),
    #[error("unknown standard request 0x{0:02X}")]
    UnknownRequest(u8),
    #[error("unknown HID class request 0x{0:02X}")]
    UnknownHidRequest(u8),
    #[error("unknown PID 0x{0:02X}")]
    UnknownPid(u8),
    #[error("PID check bits do not match in 0x{0:02X}")]
    PidCheck(u8),
    #[error("unknown device class 0x{0:02X}")]
    UnknownDeviceClass(u8),
    #[error("unknown request recipient 0x{0:02X}")]
    UnknownRecipient(u8),
    #[error("unknown CSW status 0x{0:02X}")]
    UnknownCswStatus(u8),
    #[error("bad signature {found:02X?}, expected {expected:02X?}")]
    BadSignature { expected: [u8; 4], found: [u8; 4] },
    #[error("command block length {0} outside 1..=16")]
    InvalidCommandLength(u8),
    #[error("{0} endpoints do not fit in bNumEndpoints")]
    TooManyEndpoints(usize),
    #[error("configuration declares {declared} bytes, layout has {actual}")]
    TotalLengthMismatch { declared: u16, actual: usize },
}
