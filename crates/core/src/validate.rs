//! Register-map validation.
//!
//! [`check`] is a `const fn` so the built-in map is verified while the crate
//! compiles (see the `const _` item in [`crate::map`]). The same checks are
//! available at run time through [`validate`] for tables built elsewhere.
//!
//! Rules:
//!
//! - every address lies in 0x80–0xFF
//! - bits sit on a bit-addressable owner (address divisible by 8) with an index 0–7
//! - a bit's owner is declared and permits the bit's access class
//! - two names at one address, or one bit position, belong to the same alias group
//! - alias names exist, share one location and agree on access class
//!   (direction aliases: exactly one write-only and one read-only name)
//! - a 16-bit register has byte halves declared at N and N+1 with its access class

use crate::alias::{AliasGroup, AliasKind};
use crate::sfr::{Access, BitInfo, SfrInfo, WideInfo, SFR_BASE};

/// The tables that make up a register map.
#[derive(Debug, Clone, Copy)]
pub struct MapTables {
    pub sfrs: &'static [SfrInfo],
    pub wide: &'static [WideInfo],
    pub bits: &'static [BitInfo],
    pub aliases: &'static [AliasGroup],
}

/// Model-definition error.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    #[error("{name} at 0x{addr:02X} is outside the SFR space")]
    OutsideSfrSpace { name: &'static str, addr: u8 },
    #[error("{first} and {second} share address 0x{addr:02X} without an alias declaration")]
    UndeclaredAlias { first: &'static str, second: &'static str, addr: u8 },
    #[error("{first} and {second} share bit 0x{addr:02X}.{bit} without an alias declaration")]
    UndeclaredBitAlias { first: &'static str, second: &'static str, addr: u8, bit: u8 },
    #[error("{name} uses bit index {bit}, outside 0..=7")]
    BitIndexOutOfRange { name: &'static str, bit: u8 },
    #[error("{name} is declared on 0x{addr:02X}, which is not bit-addressable")]
    NotBitAddressable { name: &'static str, addr: u8 },
    #[error("{name} has no owning register at 0x{addr:02X}")]
    MissingOwner { name: &'static str, addr: u8 },
    #[error("{name} is {bit} but its owner {owner} is {owner_access}")]
    AccessMismatch { name: &'static str, bit: Access, owner: &'static str, owner_access: Access },
    #[error("alias name {name} is not declared")]
    UnknownAliasName { name: &'static str },
    #[error("alias names {first} and {second} refer to different locations")]
    AliasLocationMismatch { first: &'static str, second: &'static str },
    #[error("inconsistent alias {name}: {reason}")]
    InconsistentAlias { name: &'static str, reason: &'static str },
    #[error("16-bit register {name} has no matching byte halves")]
    UnpairedWide { name: &'static str },
}

#[derive(Clone, Copy)]
struct Location {
    addr: u8,
    bit: Option<u8>,
    access: Access,
}

const fn str_eq(a: &str, b: &str) -> bool {
    let a = a.as_bytes();
    let b = b.as_bytes();
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

const fn group_has(g: &AliasGroup, name: &str) -> bool {
    let mut i = 0;
    while i < g.names.len() {
        if str_eq(g.names[i], name) {
            return true;
        }
        i += 1;
    }
    false
}

const fn aliased(t: &MapTables, a: &str, b: &str) -> bool {
    let mut i = 0;
    while i < t.aliases.len() {
        let g = &t.aliases[i];
        if group_has(g, a) && group_has(g, b) {
            return true;
        }
        i += 1;
    }
    false
}

const fn locate(t: &MapTables, name: &str) -> Option<Location> {
    let mut i = 0;
    while i < t.sfrs.len() {
        let r = t.sfrs[i];
        if str_eq(r.name, name) {
            return Some(Location { addr: r.addr, bit: None, access: r.access });
        }
        i += 1;
    }
    let mut j = 0;
    while j < t.bits.len() {
        let b = t.bits[j];
        if str_eq(b.name, name) {
            return Some(Location { addr: b.addr, bit: Some(b.bit), access: b.access });
        }
        j += 1;
    }
    None
}

const fn same_location(a: Location, b: Location) -> bool {
    if a.addr != b.addr {
        return false;
    }
    match (a.bit, b.bit) {
        (None, None) => true,
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

const fn find_sfr(t: &MapTables, addr: u8, access: Access) -> bool {
    let mut i = 0;
    while i < t.sfrs.len() {
        let r = t.sfrs[i];
        if r.addr == addr && r.access.same_as(access) {
            return true;
        }
        i += 1;
    }
    false
}

const fn check_registers(t: &MapTables) -> Result<(), MapError> {
    let mut i = 0;
    while i < t.sfrs.len() {
        let a = t.sfrs[i];
        if a.addr < SFR_BASE {
            return Err(MapError::OutsideSfrSpace { name: a.name, addr: a.addr });
        }
        let mut j = i + 1;
        while j < t.sfrs.len() {
            let b = t.sfrs[j];
            if a.addr == b.addr && !aliased(t, a.name, b.name) {
                return Err(MapError::UndeclaredAlias { first: a.name, second: b.name, addr: a.addr });
            }
            j += 1;
        }
        i += 1;
    }
    Ok(())
}

const fn check_bits(t: &MapTables) -> Result<(), MapError> {
    let mut i = 0;
    while i < t.bits.len() {
        let a = t.bits[i];
        if a.addr < SFR_BASE {
            return Err(MapError::OutsideSfrSpace { name: a.name, addr: a.addr });
        }
        if a.bit > 7 {
            return Err(MapError::BitIndexOutOfRange { name: a.name, bit: a.bit });
        }
        if a.addr % 8 != 0 {
            return Err(MapError::NotBitAddressable { name: a.name, addr: a.addr });
        }

        // owner: the first byte register at the address that allows the bit's access
        let mut owner: Option<SfrInfo> = None;
        let mut k = 0;
        while k < t.sfrs.len() {
            let r = t.sfrs[k];
            if r.addr == a.addr {
                if owner.is_none() || r.access.permits(a.access) {
                    owner = Some(r);
                }
            }
            k += 1;
        }
        match owner {
            None => return Err(MapError::MissingOwner { name: a.name, addr: a.addr }),
            Some(r) => {
                if !r.access.permits(a.access) {
                    return Err(MapError::AccessMismatch {
                        name: a.name,
                        bit: a.access,
                        owner: r.name,
                        owner_access: r.access,
                    });
                }
            }
        }

        let mut j = i + 1;
        while j < t.bits.len() {
            let b = t.bits[j];
            if a.addr == b.addr && a.bit == b.bit && !aliased(t, a.name, b.name) {
                return Err(MapError::UndeclaredBitAlias {
                    first: a.name,
                    second: b.name,
                    addr: a.addr,
                    bit: a.bit,
                });
            }
            j += 1;
        }
        i += 1;
    }
    Ok(())
}

const fn check_wide(t: &MapTables) -> Result<(), MapError> {
    let mut i = 0;
    while i < t.wide.len() {
        let w = t.wide[i];
        if w.addr < SFR_BASE || w.addr == 0xFF {
            return Err(MapError::OutsideSfrSpace { name: w.name, addr: w.addr });
        }
        if !find_sfr(t, w.addr, w.access) || !find_sfr(t, w.addr + 1, w.access) {
            return Err(MapError::UnpairedWide { name: w.name });
        }
        i += 1;
    }
    Ok(())
}

const fn check_aliases(t: &MapTables) -> Result<(), MapError> {
    let mut i = 0;
    while i < t.aliases.len() {
        let g = &t.aliases[i];
        if g.names.len() < 2 {
            return Err(MapError::InconsistentAlias {
                name: if g.names.is_empty() { "" } else { g.names[0] },
                reason: "an alias group needs at least two names",
            });
        }
        let first = match locate(t, g.names[0]) {
            Some(loc) => loc,
            None => return Err(MapError::UnknownAliasName { name: g.names[0] }),
        };
        let mut j = 1;
        while j < g.names.len() {
            let other = match locate(t, g.names[j]) {
                Some(loc) => loc,
                None => return Err(MapError::UnknownAliasName { name: g.names[j] }),
            };
            if !same_location(first, other) {
                return Err(MapError::AliasLocationMismatch { first: g.names[0], second: g.names[j] });
            }
            match g.kind {
                AliasKind::Direction => {}
                AliasKind::Mode(_) | AliasKind::PinFunction => {
                    if !first.access.same_as(other.access) {
                        return Err(MapError::InconsistentAlias {
                            name: g.names[j],
                            reason: "mode and pin-function aliases must share one access class",
                        });
                    }
                }
            }
            j += 1;
        }
        if let AliasKind::Direction = g.kind {
            if g.names.len() != 2 || first.bit.is_some() {
                return Err(MapError::InconsistentAlias {
                    name: g.names[0],
                    reason: "a direction alias is exactly one write view and one read view of a register",
                });
            }
            let read = match locate(t, g.names[1]) {
                Some(loc) => loc,
                None => return Err(MapError::UnknownAliasName { name: g.names[1] }),
            };
            if !first.access.same_as(Access::WriteOnly) || !read.access.same_as(Access::ReadOnly) {
                return Err(MapError::InconsistentAlias {
                    name: g.names[0],
                    reason: "a direction alias pairs a write-only name with a read-only name",
                });
            }
        }
        if let AliasKind::Mode(sel) = g.kind {
            if sel.addr < SFR_BASE || sel.mask.count_ones() != 1 {
                return Err(MapError::InconsistentAlias {
                    name: g.names[0],
                    reason: "a mode selector is a single bit of a register",
                });
            }
        }
        i += 1;
    }
    Ok(())
}

/// Check a register map.
pub const fn check(t: &MapTables) -> Result<(), MapError> {
    if let Err(e) = check_registers(t) {
        return Err(e);
    }
    if let Err(e) = check_bits(t) {
        return Err(e);
    }
    if let Err(e) = check_wide(t) {
        return Err(e);
    }
    check_aliases(t)
}

/// Panic, at compile time when used in a `const` item, if the map is malformed.
pub const fn assert_valid(t: &MapTables) {
    match check(t) {
        Ok(()) => {}
        Err(MapError::OutsideSfrSpace { .. }) => panic!("SFR map: address outside 0x80..=0xFF"),
        Err(MapError::UndeclaredAlias { .. }) => panic!("SFR map: two registers share an address without an alias"),
        Err(MapError::UndeclaredBitAlias { .. }) => panic!("SFR map: two flags share a bit without an alias"),
        Err(MapError::BitIndexOutOfRange { .. }) => panic!("SFR map: bit index outside 0..=7"),
        Err(MapError::NotBitAddressable { .. }) => panic!("SFR map: flag on a register that is not bit-addressable"),
        Err(MapError::MissingOwner { .. }) => panic!("SFR map: flag without an owning register"),
        Err(MapError::AccessMismatch { .. }) => panic!("SFR map: flag access not allowed by its owner"),
        Err(MapError::UnknownAliasName { .. }) => panic!("SFR map: alias names an undeclared register or flag"),
        Err(MapError::AliasLocationMismatch { .. }) => panic!("SFR map: alias names point at different locations"),
        Err(MapError::InconsistentAlias { .. }) => panic!("SFR map: alias access classes are inconsistent"),
        Err(MapError::UnpairedWide { .. }) => panic!("SFR map: 16-bit register without byte halves"),
    }
}

/// Run-time form of [`check`].
pub fn validate(t: &MapTables) -> Result<(), MapError> {
    let result = check(t);
    if let Err(e) = &result {
        log::debug!("register map rejected: {}", e);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alias::Selector;
    use crate::map;
    use crate::sfr::ClearMode;

    const fn reg(name: &'static str, addr: u8, access: Access) -> SfrInfo {
        SfrInfo { name, addr, access }
    }

    const fn flag(name: &'static str, addr: u8, bit: u8, access: Access) -> BitInfo {
        BitInfo { name, addr, bit, access, clear: ClearMode::Software }
    }

    fn tables(
        sfrs: &'static [SfrInfo],
        wide: &'static [WideInfo],
        bits: &'static [BitInfo],
        aliases: &'static [AliasGroup],
    ) -> MapTables {
        MapTables { sfrs, wide, bits, aliases }
    }

    #[test]
    fn test_builtin_map_is_valid() {
        assert_eq!(validate(&map::MAP), Ok(()));
    }

    #[test]
    fn test_register_below_sfr_space() {
        static SFRS: [SfrInfo; 1] = [reg("LOW", 0x7F, Access::ReadWrite)];
        let t = tables(&SFRS, &[], &[], &[]);
        assert_eq!(validate(&t), Err(MapError::OutsideSfrSpace { name: "LOW", addr: 0x7F }));
    }

    #[test]
    fn test_undeclared_overlap() {
        static SFRS: [SfrInfo; 2] = [
            reg("A", 0x90, Access::ReadWrite),
            reg("B", 0x90, Access::ReadWrite),
        ];
        let t = tables(&SFRS, &[], &[], &[]);
        assert!(matches!(validate(&t), Err(MapError::UndeclaredAlias { addr: 0x90, .. })));
    }

    #[test]
    fn test_bit_rules() {
        static SFRS: [SfrInfo; 2] = [
            reg("CTL", 0x88, Access::ReadWrite),
            reg("ODD", 0x89, Access::ReadWrite),
        ];
        static WIDE_BIT: [BitInfo; 1] = [flag("X", 0x88, 8, Access::ReadWrite)];
        static ODD_BIT: [BitInfo; 1] = [flag("Y", 0x89, 0, Access::ReadWrite)];
        static ORPHAN: [BitInfo; 1] = [flag("Z", 0x98, 0, Access::ReadWrite)];
        static DUP: [BitInfo; 2] = [
            flag("M", 0x88, 3, Access::ReadWrite),
            flag("N", 0x88, 3, Access::ReadWrite),
        ];

        assert_eq!(
            validate(&tables(&SFRS, &[], &WIDE_BIT, &[])),
            Err(MapError::BitIndexOutOfRange { name: "X", bit: 8 })
        );
        assert_eq!(
            validate(&tables(&SFRS, &[], &ODD_BIT, &[])),
            Err(MapError::NotBitAddressable { name: "Y", addr: 0x89 })
        );
        assert_eq!(
            validate(&tables(&SFRS, &[], &ORPHAN, &[])),
            Err(MapError::MissingOwner { name: "Z", addr: 0x98 })
        );
        assert!(matches!(
            validate(&tables(&SFRS, &[], &DUP, &[])),
            Err(MapError::UndeclaredBitAlias { bit: 3, .. })
        ));
    }

    #[test]
    fn test_writable_bit_on_read_only_owner() {
        static SFRS: [SfrInfo; 1] = [reg("STAT", 0xD8, Access::ReadOnly)];
        static BITS: [BitInfo; 1] = [flag("GO", 0xD8, 1, Access::ReadWrite)];
        assert!(matches!(
            validate(&tables(&SFRS, &[], &BITS, &[])),
            Err(MapError::AccessMismatch { name: "GO", .. })
        ));
    }

    #[test]
    fn test_direction_alias_must_be_write_then_read() {
        static SFRS: [SfrInfo; 2] = [
            reg("KEY", 0xA1, Access::WriteOnly),
            reg("ID", 0xA1, Access::ReadWrite),
        ];
        static ALIASES: [AliasGroup; 1] =
            [AliasGroup { kind: AliasKind::Direction, names: &["KEY", "ID"] }];
        assert!(matches!(
            validate(&tables(&SFRS, &[], &[], &ALIASES)),
            Err(MapError::InconsistentAlias { name: "KEY", .. })
        ));
    }

    #[test]
    fn test_mode_alias_access_must_agree() {
        static SFRS: [SfrInfo; 2] = [
            reg("DEV", 0xD1, Access::ReadWrite),
            reg("HOST", 0xD1, Access::ReadOnly),
        ];
        static ALIASES: [AliasGroup; 1] = [AliasGroup {
            kind: AliasKind::Mode(Selector { addr: 0xE2, mask: 0x80 }),
            names: &["DEV", "HOST"],
        }];
        assert!(matches!(
            validate(&tables(&SFRS, &[], &[], &ALIASES)),
            Err(MapError::InconsistentAlias { name: "HOST", .. })
        ));
    }

    #[test]
    fn test_alias_names_checked() {
        static SFRS: [SfrInfo; 2] = [
            reg("A", 0x90, Access::ReadWrite),
            reg("B", 0x91, Access::ReadWrite),
        ];
        static UNKNOWN: [AliasGroup; 1] =
            [AliasGroup { kind: AliasKind::PinFunction, names: &["A", "GHOST"] }];
        static APART: [AliasGroup; 1] =
            [AliasGroup { kind: AliasKind::PinFunction, names: &["A", "B"] }];
        assert_eq!(
            validate(&tables(&SFRS, &[], &[], &UNKNOWN)),
            Err(MapError::UnknownAliasName { name: "GHOST" })
        );
        assert_eq!(
            validate(&tables(&SFRS, &[], &[], &APART)),
            Err(MapError::AliasLocationMismatch { first: "A", second: "B" })
        );
    }

    #[test]
    fn test_wide_needs_halves() {
        static SFRS: [SfrInfo; 1] = [reg("LO", 0xCA, Access::ReadWrite)];
        static WIDE: [WideInfo; 1] = [WideInfo { name: "PAIR", addr: 0xCA, access: Access::ReadWrite }];
        assert_eq!(
            validate(&tables(&SFRS, &WIDE, &[], &[])),
            Err(MapError::UnpairedWide { name: "PAIR" })
        );
    }

    #[test]
    fn test_error_messages() {
        let e = MapError::UndeclaredAlias { first: "A", second: "B", addr: 0x90 };
        assert_eq!(e.to_string(), "A and B share address 0x90 without an alias declaration");
    }
}
