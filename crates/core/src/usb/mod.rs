//! USB protocol layer for the CH55x SIE.
//!
//! - [`consts`]: PID, request, descriptor, class and endpoint constants
//! - [`types`]: Typed enums over those constants
//! - [`descriptor`]: Setup packet and standard descriptors
//! - [`bulk_only`]: Mass-storage CBW/CSW
//!
//! Records are byte-exact and parse into `Result<_, UsbError>`; wire input
//! never panics.

#[macro_use]
mod wire;

pub mod bulk_only;
pub mod consts;
pub mod descriptor;
pub mod error;
pub mod types;

pub use bulk_only::{Cbw, Csw, CswStatus};
pub use descriptor::{
    ConfigDescriptor, ConfigDescriptorLong, Descriptor, DeviceDescriptor, EndpointDescriptor, HidDescriptor,
    InterfaceDescriptor, SetupRequest,
};
pub use error::UsbError;
pub use types::{DescriptorType, DeviceClass, Direction, HidRequest, Pid, Recipient, RequestKind, StandardRequest, TransferType};
pub use wire::{Le16, Le32, WireRecord};
