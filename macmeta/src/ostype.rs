// SPDX-License-Identifier: MIT

//! Four-character type codes.
//!
//! An `OSType` is a 4-byte value stored big-endian on disk and displayed as
//! four ASCII characters (`TEXT`, `MACS`, ...). A code of all zero bytes
//! means "not set" and renders as an empty string.

use core::fmt;
use core::str::FromStr;

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::error::MetaError;

#[derive(
    IntoBytes, FromBytes, KnownLayout, Immutable, Unaligned, Copy, Clone, PartialEq, Eq, Hash,
)]
#[repr(transparent)]
pub struct OsType(pub [u8; 4]);

impl OsType {
    pub const ZERO: OsType = OsType([0; 4]);

    /// Finder signature, also the creator reported for folders.
    pub const FINDER: OsType = OsType(*b"MACS");
    /// File type of an alias to a file.
    pub const ALIAS: OsType = OsType(*b"alis");
    /// File type of an alias to a folder.
    pub const FOLDER_ALIAS: OsType = OsType(*b"fdrp");
    /// Application bundles and executables.
    pub const APPLICATION: OsType = OsType(*b"APPL");
    /// Plain text documents.
    pub const TEXT: OsType = OsType(*b"TEXT");
    /// Icon family resources.
    pub const ICON_FAMILY: OsType = OsType(*b"icns");

    pub const fn as_u32(self) -> u32 {
        u32::from_be_bytes(self.0)
    }

    pub const fn is_zero(self) -> bool {
        self.as_u32() == 0
    }
}

impl Default for OsType {
    fn default() -> Self {
        OsType::ZERO
    }
}

impl fmt::Display for OsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return Ok(());
        }
        for b in self.0 {
            // Anything outside printable ASCII is masked rather than leaked
            // into terminal output.
            let c = if (0x20..0x7f).contains(&b) { b as char } else { '?' };
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for OsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OsType(\"{self}\")")
    }
}

impl FromStr for OsType {
    type Err = MetaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 4 || !s.is_ascii() {
            return Err(MetaError::BadTypeCode(s.to_string()));
        }
        Ok(OsType([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display_round_trip() {
        let t: OsType = "TEXT".parse().unwrap();
        assert_eq!(t, OsType::TEXT);
        assert_eq!(t.to_string(), "TEXT");
        assert_eq!(t.as_u32(), 0x5445_5854);
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert!("TOOLONG".parse::<OsType>().is_err());
        assert!("abc".parse::<OsType>().is_err());
        assert!("".parse::<OsType>().is_err());
        assert!("héhé".parse::<OsType>().is_err());
    }

    #[test]
    fn test_zero_renders_empty() {
        assert_eq!(OsType::ZERO.to_string(), "");
        assert!(OsType::ZERO.is_zero());
    }

    #[test]
    fn test_non_printable_bytes_are_masked() {
        let t = OsType([0x01, b'A', 0x7f, b'B']);
        assert_eq!(t.to_string(), "?A?B");
    }
}
