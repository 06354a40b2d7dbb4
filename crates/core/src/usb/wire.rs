//! Byte-exact wire records.
//!
//! Every record is `#[repr(C)]` over alignment-1 fields, so the in-memory
//! layout is the wire layout with no padding; the size of each record is
//! checked at compile time. Multi-byte fields are little-endian on the wire
//! and stored as [`Le16`]/[`Le32`].

use core::fmt;

use super::UsbError;

/// Little-endian `u16` stored as two bytes.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Le16([u8; 2]);

impl Le16 {
    pub const fn new(v: u16) -> Self {
        Le16(v.to_le_bytes())
    }

    pub const fn get(self) -> u16 {
        u16::from_le_bytes(self.0)
    }

    pub const fn low(self) -> u8 {
        self.0[0]
    }

    pub const fn high(self) -> u8 {
        self.0[1]
    }
}

impl From<u16> for Le16 {
    fn from(v: u16) -> Self {
        Le16::new(v)
    }
}

impl fmt::Debug for Le16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}", self.get())
    }
}

/// Little-endian `u32` stored as four bytes.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Le32([u8; 4]);

impl Le32 {
    pub const fn new(v: u32) -> Self {
        Le32(v.to_le_bytes())
    }

    pub const fn get(self) -> u32 {
        u32::from_le_bytes(self.0)
    }
}

impl From<u32> for Le32 {
    fn from(v: u32) -> Self {
        Le32::new(v)
    }
}

impl fmt::Debug for Le32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.get())
    }
}

/// A field of a wire record. `put`/`take` are only called with at least
/// `LEN` bytes available.
pub(crate) trait WireField: Sized {
    const LEN: usize;
    fn put(&self, out: &mut [u8]);
    fn take(bytes: &[u8]) -> Self;
}

impl WireField for u8 {
    const LEN: usize = 1;

    fn put(&self, out: &mut [u8]) {
        out[0] = *self;
    }

    fn take(bytes: &[u8]) -> Self {
        bytes[0]
    }
}

impl<const N: usize> WireField for [u8; N] {
    const LEN: usize = N;

    fn put(&self, out: &mut [u8]) {
        out[..N].copy_from_slice(self);
    }

    fn take(bytes: &[u8]) -> Self {
        let mut a = [0u8; N];
        a.copy_from_slice(&bytes[..N]);
        a
    }
}

impl WireField for Le16 {
    const LEN: usize = 2;

    fn put(&self, out: &mut [u8]) {
        self.0.put(out);
    }

    fn take(bytes: &[u8]) -> Self {
        Le16(<[u8; 2]>::take(bytes))
    }
}

impl WireField for Le32 {
    const LEN: usize = 4;

    fn put(&self, out: &mut [u8]) {
        self.0.put(out);
    }

    fn take(bytes: &[u8]) -> Self {
        Le32(<[u8; 4]>::take(bytes))
    }
}

/// A fixed-size record with a byte-exact wire layout.
pub trait WireRecord: Sized {
    const SIZE: usize;

    /// Serialize into the front of `out`, returning the bytes written.
    fn write_to(&self, out: &mut [u8]) -> Result<usize, UsbError>;

    /// Deserialize from the front of `bytes`. Trailing bytes are ignored.
    fn read_from(bytes: &[u8]) -> Result<Self, UsbError>;

    /// The record as an owned byte vector of exactly `SIZE` bytes.
    fn to_vec(&self) -> Vec<u8>;
}

/// Declare a wire record: the struct, its compile-time size check and its
/// [`WireRecord`] impl. Fields are serialized in declaration order.
macro_rules! wire_record {
    (
        $(#[$meta:meta])*
        pub struct $name:ident [$size:literal] {
            $( $(#[$fmeta:meta])* pub $field:ident : $ty:ty, )*
        }
    ) => {
        $(#[$meta])*
        #[repr(C)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct $name {
            $( $(#[$fmeta])* pub $field: $ty, )*
        }

        static_assertions::const_assert_eq!(core::mem::size_of::<$name>(), $size);
        static_assertions::const_assert_eq!(core::mem::align_of::<$name>(), 1);

        impl $name {
            /// The record as it appears on the bus.
            pub fn to_bytes(&self) -> [u8; $size] {
                let mut out = [0u8; $size];
                let mut pos = 0;
                $(
                    $crate::usb::wire::WireField::put(&self.$field, &mut out[pos..]);
                    pos += <$ty as $crate::usb::wire::WireField>::LEN;
                )*
                debug_assert_eq!(pos, $size);
                out
            }
        }

        impl $crate::usb::wire::WireRecord for $name {
            const SIZE: usize = $size;

            fn write_to(&self, out: &mut [u8]) -> Result<usize, $crate::usb::UsbError> {
                if out.len() < $size {
                    return Err($crate::usb::UsbError::BufferTooSmall { needed: $size, got: out.len() });
                }
                out[..$size].copy_from_slice(&self.to_bytes());
                Ok($size)
            }

            fn to_vec(&self) -> Vec<u8> {
                self.to_bytes().to_vec()
            }

            fn read_from(bytes: &[u8]) -> Result<Self, $crate::usb::UsbError> {
                if bytes.len() < $size {
                    return Err($crate::usb::UsbError::Truncated { needed: $size, got: bytes.len() });
                }
                let mut pos = 0;
                $(
                    let $field = <$ty as $crate::usb::wire::WireField>::take(&bytes[pos..]);
                    pos += <$ty as $crate::usb::wire::WireField>::LEN;
                )*
                debug_assert_eq!(pos, $size);
                Ok($name { $($field,)* })
            }
        }
    };
}

/// A `#[repr(u8)]` enum over named constants, with a fallible `TryFrom<u8>`
/// that reports unknown values through the given [`UsbError`] variant.
macro_rules! u8_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident ($err:ident) {
            $( $(#[$vmeta:meta])* $variant:ident = $value:expr, )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $value, )*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),*];
        }

        impl TryFrom<u8> for $name {
            type Error = $crate::usb::UsbError;

            fn try_from(v: u8) -> Result<Self, Self::Error> {
                match v {
                    $( x if x == $value => Ok($name::$variant), )*
                    other => Err($crate::usb::UsbError::$err(other)),
                }
            }
        }

        impl From<$name> for u8 {
            fn from(v: $name) -> u8 {
                v as u8
            }
        }
    };
}
