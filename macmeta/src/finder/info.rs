// SPDX-License-Identifier: MIT

//! On-disk images of the 32-byte finder-info blob.
//!
//! The blob is two 16-byte halves, stored big-endian. Files carry
//! `FInfo` + `FXInfo`, folders carry `DInfo` + `DXInfo`. The flag word sits
//! at offset 8 and the extended flag word at offset 24 in both layouts,
//! which is what lets [`FinderData`] expose them uniformly.

use zerocopy::byteorder::{BigEndian, I16, I32, U16};
use zerocopy::{FromBytes, FromZeros, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::error::{MetaError, Result};
use crate::finder::flags::{ExtendedFlags, FinderFlags};
use crate::finder::label::Label;
use crate::ostype::OsType;

pub const FINDER_INFO_LEN: usize = 32;

type Be16 = U16<BigEndian>;
type BeI16 = I16<BigEndian>;
type BeI32 = I32<BigEndian>;

#[derive(IntoBytes, FromBytes, KnownLayout, Immutable, Unaligned, Copy, Clone, Debug)]
#[repr(C, packed)]
pub struct Point {
    pub v: BeI16,
    pub h: BeI16,
}

#[derive(IntoBytes, FromBytes, KnownLayout, Immutable, Unaligned, Copy, Clone, Debug)]
#[repr(C, packed)]
pub struct Rect {
    pub top: BeI16,
    pub left: BeI16,
    pub bottom: BeI16,
    pub right: BeI16,
}

/// First half of a file's finder info.
#[derive(IntoBytes, FromBytes, KnownLayout, Immutable, Unaligned, Copy, Clone, Debug)]
#[repr(C, packed)]
pub struct FInfo {
    pub file_type: OsType,
    pub file_creator: OsType,
    pub finder_flags: Be16,
    pub location: Point,
    pub reserved: BeI16,
}

/// Second half of a file's finder info.
#[derive(IntoBytes, FromBytes, KnownLayout, Immutable, Unaligned, Copy, Clone, Debug)]
#[repr(C, packed)]
pub struct FXInfo {
    pub reserved1: [BeI16; 4],
    pub extended_flags: Be16,
    pub reserved2: BeI16,
    pub put_away_folder: BeI32,
}

/// First half of a folder's finder info.
#[derive(IntoBytes, FromBytes, KnownLayout, Immutable, Unaligned, Copy, Clone, Debug)]
#[repr(C, packed)]
pub struct DInfo {
    pub window_bounds: Rect,
    pub finder_flags: Be16,
    pub location: Point,
    pub reserved: Be16,
}

/// Second half of a folder's finder info.
#[derive(IntoBytes, FromBytes, KnownLayout, Immutable, Unaligned, Copy, Clone, Debug)]
#[repr(C, packed)]
pub struct DXInfo {
    pub scroll_position: Point,
    pub reserved1: BeI32,
    pub extended_flags: Be16,
    pub reserved2: BeI16,
    pub put_away_folder: BeI32,
}

#[derive(IntoBytes, FromBytes, KnownLayout, Immutable, Unaligned, Copy, Clone, Debug)]
#[repr(C, packed)]
pub struct FileFinderInfo {
    pub info: FInfo,
    pub ext: FXInfo,
}

#[derive(IntoBytes, FromBytes, KnownLayout, Immutable, Unaligned, Copy, Clone, Debug)]
#[repr(C, packed)]
pub struct FolderFinderInfo {
    pub info: DInfo,
    pub ext: DXInfo,
}

/// A parsed finder-info blob, file- or folder-shaped.
///
/// An item with no stored metadata behaves as an all-zero blob, so parsing
/// and the [`FinderData::empty`] constructor agree.
#[derive(Copy, Clone, Debug)]
pub enum FinderData {
    File(FileFinderInfo),
    Folder(FolderFinderInfo),
}

impl FinderData {
    pub fn empty(folder: bool) -> Self {
        if folder {
            FinderData::Folder(FolderFinderInfo::new_zeroed())
        } else {
            FinderData::File(FileFinderInfo::new_zeroed())
        }
    }

    pub fn parse(bytes: &[u8], folder: bool) -> Result<Self> {
        if bytes.len() != FINDER_INFO_LEN {
            return Err(MetaError::BadFinderInfo { len: bytes.len() });
        }
        let data = if folder {
            FinderData::Folder(
                FolderFinderInfo::read_from_bytes(bytes)
                    .map_err(|_| MetaError::BadFinderInfo { len: bytes.len() })?,
            )
        } else {
            FinderData::File(
                FileFinderInfo::read_from_bytes(bytes)
                    .map_err(|_| MetaError::BadFinderInfo { len: bytes.len() })?,
            )
        };
        Ok(data)
    }

    pub fn to_bytes(&self) -> [u8; FINDER_INFO_LEN] {
        let mut buf = [0u8; FINDER_INFO_LEN];
        match self {
            FinderData::File(v) => buf.copy_from_slice(v.as_bytes()),
            FinderData::Folder(v) => buf.copy_from_slice(v.as_bytes()),
        }
        buf
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, FinderData::Folder(_))
    }

    pub fn is_blank(&self) -> bool {
        self.to_bytes() == [0u8; FINDER_INFO_LEN]
    }

    pub fn flags(&self) -> FinderFlags {
        let raw = match self {
            FinderData::File(v) => v.info.finder_flags,
            FinderData::Folder(v) => v.info.finder_flags,
        };
        FinderFlags::from_bits_retain(raw.get())
    }

    pub fn set_flags(&mut self, flags: FinderFlags) {
        let raw = Be16::new(flags.bits());
        match self {
            FinderData::File(v) => v.info.finder_flags = raw,
            FinderData::Folder(v) => v.info.finder_flags = raw,
        }
    }

    pub fn extended_flags(&self) -> ExtendedFlags {
        let raw = match self {
            FinderData::File(v) => v.ext.extended_flags,
            FinderData::Folder(v) => v.ext.extended_flags,
        };
        ExtendedFlags::from_bits_retain(raw.get())
    }

    pub fn set_extended_flags(&mut self, flags: ExtendedFlags) {
        let raw = Be16::new(flags.bits());
        match self {
            FinderData::File(v) => v.ext.extended_flags = raw,
            FinderData::Folder(v) => v.ext.extended_flags = raw,
        }
    }

    pub fn label(&self) -> Label {
        Label::from_flags(self.flags())
    }

    pub fn set_label(&mut self, label: Label) {
        self.set_flags(label.apply(self.flags()));
    }

    /// Type code; folders have none.
    pub fn file_type(&self) -> Option<OsType> {
        match self {
            FinderData::File(v) => Some(v.info.file_type),
            FinderData::Folder(_) => None,
        }
    }

    /// Creator code; folders have none.
    pub fn file_creator(&self) -> Option<OsType> {
        match self {
            FinderData::File(v) => Some(v.info.file_creator),
            FinderData::Folder(_) => None,
        }
    }

    /// Sets the type code. Returns false (and changes nothing) on folders.
    pub fn set_file_type(&mut self, code: OsType) -> bool {
        match self {
            FinderData::File(v) => {
                v.info.file_type = code;
                true
            }
            FinderData::Folder(_) => false,
        }
    }

    /// Sets the creator code. Returns false (and changes nothing) on folders.
    pub fn set_file_creator(&mut self, code: OsType) -> bool {
        match self {
            FinderData::File(v) => {
                v.info.file_creator = code;
                true
            }
            FinderData::Folder(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_sizes() {
        assert_eq!(core::mem::size_of::<FInfo>(), 16);
        assert_eq!(core::mem::size_of::<FXInfo>(), 16);
        assert_eq!(core::mem::size_of::<DInfo>(), 16);
        assert_eq!(core::mem::size_of::<DXInfo>(), 16);
        assert_eq!(core::mem::size_of::<FileFinderInfo>(), FINDER_INFO_LEN);
        assert_eq!(core::mem::size_of::<FolderFinderInfo>(), FINDER_INFO_LEN);
    }

    #[test]
    fn test_blob_round_trip() {
        let mut data = FinderData::empty(false);
        assert!(data.is_blank());
        data.set_file_type("TEXT".parse().unwrap());
        data.set_file_creator("ttxt".parse().unwrap());
        data.set_flags(FinderFlags::IS_INVISIBLE | FinderFlags::HAS_CUSTOM_ICON);
        data.set_extended_flags(ExtendedFlags::EXTENSION_HIDDEN);

        let bytes = data.to_bytes();
        // Big-endian spot checks: type at 0, flags at 8, ext flags at 24.
        assert_eq!(&bytes[0..4], b"TEXT");
        assert_eq!(&bytes[4..8], b"ttxt");
        assert_eq!(u16::from_be_bytes([bytes[8], bytes[9]]), 0x4400);
        assert_eq!(u16::from_be_bytes([bytes[24], bytes[25]]), 0x0010);

        let back = FinderData::parse(&bytes, false).unwrap();
        assert_eq!(back.file_type(), Some(OsType::TEXT));
        assert_eq!(back.flags(), data.flags());
        assert_eq!(back.extended_flags(), data.extended_flags());
    }

    #[test]
    fn test_folder_blob_shares_flag_offsets() {
        let mut data = FinderData::empty(true);
        data.set_flags(FinderFlags::IS_INVISIBLE);
        data.set_extended_flags(ExtendedFlags::EXTENSION_HIDDEN);
        let bytes = data.to_bytes();
        assert_eq!(u16::from_be_bytes([bytes[8], bytes[9]]), 0x4000);
        assert_eq!(u16::from_be_bytes([bytes[24], bytes[25]]), 0x0010);

        assert_eq!(data.file_type(), None);
        assert!(!data.set_file_type(OsType::TEXT));
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert!(matches!(
            FinderData::parse(&[0u8; 16], false),
            Err(MetaError::BadFinderInfo { len: 16 })
        ));
        assert!(FinderData::parse(&[0u8; 33], true).is_err());
    }

    #[test]
    fn test_label_accessors() {
        let mut data = FinderData::empty(false);
        assert_eq!(data.label(), Label::None);
        data.set_label(Label::Orange);
        assert_eq!(data.label(), Label::Orange);
        let bytes = data.to_bytes();
        assert_eq!(u16::from_be_bytes([bytes[8], bytes[9]]), 0x000E);
    }
}
