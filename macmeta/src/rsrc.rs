// SPDX-License-Identifier: MIT

//! Classic resource-file codec.
//!
//! A resource fork is a small container: a 256-byte header, the resource
//! data blocks (each a big-endian u32 length plus payload), and a resource
//! map holding a type list and per-resource reference lists. This module
//! builds and parses the single-segment form with no resource names, which
//! is all the alias and custom-icon records need.

use zerocopy::byteorder::{BigEndian, I16, U16, U32};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::error::{MetaError, Result};
use crate::ostype::OsType;

/// Resource data always starts right after the 256-byte header.
pub const DATA_START: usize = 256;

/// Resource id the Finder uses for custom icon families.
pub const CUSTOM_ICON_ID: i16 = -16455;

/// Resource id used for alias records.
pub const ALIAS_RESOURCE_ID: i16 = 0;

type Be16 = U16<BigEndian>;
type Be32 = U32<BigEndian>;
type BeI16 = I16<BigEndian>;

const HEADER_LEN: usize = 16;
const MAP_HEADER_LEN: usize = 28;
const TYPE_ENTRY_LEN: usize = 8;
const REF_ENTRY_LEN: usize = 12;

#[derive(IntoBytes, FromBytes, KnownLayout, Immutable, Unaligned, Copy, Clone, Debug)]
#[repr(C, packed)]
struct RsrcHeader {
    data_offset: Be32,
    map_offset: Be32,
    data_len: Be32,
    map_len: Be32,
}

#[derive(IntoBytes, FromBytes, KnownLayout, Immutable, Unaligned, Copy, Clone, Debug)]
#[repr(C, packed)]
struct MapHeader {
    header_copy: [u8; 16],
    next_map: Be32,
    file_ref: Be16,
    attrs: Be16,
    type_list_offset: Be16,
    name_list_offset: Be16,
}

#[derive(IntoBytes, FromBytes, KnownLayout, Immutable, Unaligned, Copy, Clone, Debug)]
#[repr(C, packed)]
struct TypeEntry {
    code: OsType,
    count_minus_one: Be16,
    ref_list_offset: Be16,
}

#[derive(IntoBytes, FromBytes, KnownLayout, Immutable, Unaligned, Copy, Clone, Debug)]
#[repr(C, packed)]
struct RefEntry {
    id: BeI16,
    name_offset: Be16,
    // High byte resource attributes, low 24 bits data offset.
    packed_offset: Be32,
    handle: Be32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub rtype: OsType,
    pub id: i16,
    pub data: Vec<u8>,
}

impl Resource {
    pub fn new(rtype: OsType, id: i16, data: Vec<u8>) -> Self {
        Resource { rtype, id, data }
    }
}

/// An in-memory resource fork: an ordered set of typed, numbered blobs.
#[derive(Debug, Default, Clone)]
pub struct ResourceFork {
    resources: Vec<Resource>,
}

impl ResourceFork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, res: Resource) {
        // One resource per (type, id); the newest wins.
        self.resources
            .retain(|r| !(r.rtype == res.rtype && r.id == res.id));
        self.resources.push(res);
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn find(&self, rtype: OsType, id: i16) -> Option<&Resource> {
        self.resources
            .iter()
            .find(|r| r.rtype == rtype && r.id == id)
    }

    /// Removes a resource; reports whether it was present.
    pub fn remove(&mut self, rtype: OsType, id: i16) -> bool {
        let before = self.resources.len();
        self.resources
            .retain(|r| !(r.rtype == rtype && r.id == id));
        self.resources.len() != before
    }

    /// Encodes the fork. Types appear in first-use order, resources in
    /// insertion order within their type.
    pub fn build(&self) -> Result<Vec<u8>> {
        let mut types: Vec<(OsType, Vec<&Resource>)> = Vec::new();
        for res in &self.resources {
            match types.iter_mut().find(|(t, _)| *t == res.rtype) {
                Some((_, list)) => list.push(res),
                None => types.push((res.rtype, vec![res])),
            }
        }

        let data_len: usize = self.resources.iter().map(|r| 4 + r.data.len()).sum();
        let map_len = MAP_HEADER_LEN
            + 2
            + TYPE_ENTRY_LEN * types.len()
            + REF_ENTRY_LEN * self.resources.len();
        let total = DATA_START + data_len + map_len;

        let mut out = vec![0u8; total];

        let header = RsrcHeader {
            data_offset: Be32::new(DATA_START as u32),
            map_offset: Be32::new((DATA_START + data_len) as u32),
            data_len: Be32::new(data_len as u32),
            map_len: Be32::new(map_len as u32),
        };
        out[..HEADER_LEN].copy_from_slice(header.as_bytes());

        // Data blocks, remembering each resource's offset within the data
        // section for the reference list.
        let mut offsets: Vec<(OsType, i16, usize)> = Vec::new();
        let mut cursor = DATA_START;
        for res in &self.resources {
            let offset = cursor - DATA_START;
            if offset > 0x00FF_FFFF {
                return Err(MetaError::BadResourceFork("resource data exceeds 16 MiB"));
            }
            offsets.push((res.rtype, res.id, offset));
            out[cursor..cursor + 4].copy_from_slice(&(res.data.len() as u32).to_be_bytes());
            cursor += 4;
            out[cursor..cursor + res.data.len()].copy_from_slice(&res.data);
            cursor += res.data.len();
        }

        let map_start = cursor;
        let mut map_header = MapHeader {
            header_copy: [0u8; 16],
            next_map: Be32::new(0),
            file_ref: Be16::new(0),
            attrs: Be16::new(0),
            type_list_offset: Be16::new(MAP_HEADER_LEN as u16),
            name_list_offset: Be16::new(map_len as u16),
        };
        map_header.header_copy.copy_from_slice(&out[..HEADER_LEN]);
        out[map_start..map_start + MAP_HEADER_LEN].copy_from_slice(map_header.as_bytes());

        // Type list: count word, then one entry per type. Reference-list
        // offsets are measured from the count word.
        let type_list_start = map_start + MAP_HEADER_LEN;
        let count_word = (types.len() as u16).wrapping_sub(1);
        out[type_list_start..type_list_start + 2].copy_from_slice(&count_word.to_be_bytes());

        let mut ref_offset = 2 + TYPE_ENTRY_LEN * types.len();
        let mut ref_cursor = type_list_start + ref_offset;
        for (i, (code, list)) in types.iter().enumerate() {
            let entry = TypeEntry {
                code: *code,
                count_minus_one: Be16::new((list.len() as u16).wrapping_sub(1)),
                ref_list_offset: Be16::new(ref_offset as u16),
            };
            let at = type_list_start + 2 + TYPE_ENTRY_LEN * i;
            out[at..at + TYPE_ENTRY_LEN].copy_from_slice(entry.as_bytes());

            for res in list {
                let data_offset = offsets
                    .iter()
                    .find(|(t, id, _)| *t == res.rtype && *id == res.id)
                    .map(|(_, _, o)| *o)
                    .unwrap_or(0);
                let entry = RefEntry {
                    id: BeI16::new(res.id),
                    name_offset: Be16::new(0xFFFF),
                    packed_offset: Be32::new(data_offset as u32),
                    handle: Be32::new(0),
                };
                out[ref_cursor..ref_cursor + REF_ENTRY_LEN].copy_from_slice(entry.as_bytes());
                ref_cursor += REF_ENTRY_LEN;
            }
            ref_offset += REF_ENTRY_LEN * list.len();
        }

        Ok(out)
    }

    pub fn parse(bytes: &[u8]) -> Result<ResourceFork> {
        let header_bytes =
            slice(bytes, 0, HEADER_LEN).ok_or(MetaError::BadResourceFork("truncated header"))?;
        let header = RsrcHeader::read_from_bytes(header_bytes)
            .map_err(|_| MetaError::BadResourceFork("truncated header"))?;

        let data_start = header.data_offset.get() as usize;
        let map_start = header.map_offset.get() as usize;
        let map_len = header.map_len.get() as usize;

        if map_len < MAP_HEADER_LEN + 2 {
            return Err(MetaError::BadResourceFork("map too small"));
        }
        let map = slice(bytes, map_start, map_len)
            .ok_or(MetaError::BadResourceFork("map outside fork"))?;
        let map_header = MapHeader::read_from_bytes(&map[..MAP_HEADER_LEN])
            .map_err(|_| MetaError::BadResourceFork("truncated map"))?;

        let type_list_start = map_header.type_list_offset.get() as usize;
        let count_word = slice(map, type_list_start, 2)
            .ok_or(MetaError::BadResourceFork("type list outside map"))?;
        let n_types = u16::from_be_bytes([count_word[0], count_word[1]]).wrapping_add(1) as usize;

        let mut fork = ResourceFork::new();
        for i in 0..n_types {
            let at = type_list_start + 2 + TYPE_ENTRY_LEN * i;
            let entry_bytes = slice(map, at, TYPE_ENTRY_LEN)
                .ok_or(MetaError::BadResourceFork("type entry outside map"))?;
            let entry = TypeEntry::read_from_bytes(entry_bytes)
                .map_err(|_| MetaError::BadResourceFork("truncated type entry"))?;
            let n_refs = entry.count_minus_one.get().wrapping_add(1) as usize;

            let ref_list = type_list_start + entry.ref_list_offset.get() as usize;
            for j in 0..n_refs {
                let at = ref_list + REF_ENTRY_LEN * j;
                let ref_bytes = slice(map, at, REF_ENTRY_LEN)
                    .ok_or(MetaError::BadResourceFork("reference outside map"))?;
                let reference = RefEntry::read_from_bytes(ref_bytes)
                    .map_err(|_| MetaError::BadResourceFork("truncated reference"))?;

                let offset = (reference.packed_offset.get() & 0x00FF_FFFF) as usize;
                let len_bytes = slice(bytes, data_start + offset, 4)
                    .ok_or(MetaError::BadResourceFork("resource data outside fork"))?;
                let len = u32::from_be_bytes([
                    len_bytes[0],
                    len_bytes[1],
                    len_bytes[2],
                    len_bytes[3],
                ]) as usize;
                let data = slice(bytes, data_start + offset + 4, len)
                    .ok_or(MetaError::BadResourceFork("resource data outside fork"))?;

                fork.push(Resource::new(entry.code, reference.id.get(), data.to_vec()));
            }
        }
        Ok(fork)
    }
}

fn slice(buf: &[u8], offset: usize, len: usize) -> Option<&[u8]> {
    let end = offset.checked_add(len)?;
    if end > buf.len() {
        return None;
    }
    Some(&buf[offset..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn icns() -> OsType {
        OsType::ICON_FAMILY
    }

    fn alis() -> OsType {
        OsType::ALIAS
    }

    #[test]
    fn test_single_resource_round_trip() {
        let mut fork = ResourceFork::new();
        fork.push(Resource::new(icns(), CUSTOM_ICON_ID, vec![1, 2, 3, 4, 5]));

        let bytes = fork.build().unwrap();
        assert_eq!(&bytes[..4], &(DATA_START as u32).to_be_bytes());

        let back = ResourceFork::parse(&bytes).unwrap();
        assert_eq!(back.resources().len(), 1);
        let res = back.find(icns(), CUSTOM_ICON_ID).unwrap();
        assert_eq!(res.data, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_multi_type_round_trip() {
        let mut fork = ResourceFork::new();
        fork.push(Resource::new(alis(), ALIAS_RESOURCE_ID, b"record".to_vec()));
        fork.push(Resource::new(icns(), CUSTOM_ICON_ID, vec![9u8; 1000]));
        fork.push(Resource::new(alis(), 1, b"second".to_vec()));

        let bytes = fork.build().unwrap();
        let back = ResourceFork::parse(&bytes).unwrap();
        assert_eq!(back.resources().len(), 3);
        assert_eq!(back.find(alis(), 0).unwrap().data, b"record");
        assert_eq!(back.find(alis(), 1).unwrap().data, b"second");
        assert_eq!(back.find(icns(), CUSTOM_ICON_ID).unwrap().data.len(), 1000);
        assert!(back.find(icns(), 0).is_none());
    }

    #[test]
    fn test_push_replaces_same_type_and_id() {
        let mut fork = ResourceFork::new();
        fork.push(Resource::new(icns(), CUSTOM_ICON_ID, vec![1]));
        fork.push(Resource::new(icns(), CUSTOM_ICON_ID, vec![2]));
        assert_eq!(fork.resources().len(), 1);
        assert_eq!(fork.find(icns(), CUSTOM_ICON_ID).unwrap().data, vec![2]);
    }

    #[test]
    fn test_remove() {
        let mut fork = ResourceFork::new();
        fork.push(Resource::new(icns(), CUSTOM_ICON_ID, vec![1]));
        assert!(fork.remove(icns(), CUSTOM_ICON_ID));
        assert!(!fork.remove(icns(), CUSTOM_ICON_ID));
        assert!(fork.is_empty());
    }

    #[test]
    fn test_empty_fork_round_trip() {
        let bytes = ResourceFork::new().build().unwrap();
        let back = ResourceFork::parse(&bytes).unwrap();
        assert!(back.is_empty());
    }

    #[test]
    fn test_parse_rejects_truncation() {
        let mut fork = ResourceFork::new();
        fork.push(Resource::new(icns(), 7, vec![0u8; 64]));
        let bytes = fork.build().unwrap();

        assert!(ResourceFork::parse(&[]).is_err());
        assert!(ResourceFork::parse(&bytes[..10]).is_err());
        assert!(ResourceFork::parse(&bytes[..bytes.len() - 8]).is_err());
    }

    #[test]
    fn test_parse_rejects_wild_map_offset() {
        let mut fork = ResourceFork::new();
        fork.push(Resource::new(icns(), 7, vec![0u8; 8]));
        let mut bytes = fork.build().unwrap();
        // Point the map somewhere far outside the buffer.
        bytes[4..8].copy_from_slice(&0x00FF_0000u32.to_be_bytes());
        assert!(ResourceFork::parse(&bytes).is_err());
    }
}
