// SPDX-License-Identifier: MIT

//! Alias records.
//!
//! An alias is an ordinary file whose Finder flags carry `IS_ALIAS` and
//! whose resource fork holds an `alis` resource with the target path. Both
//! the producer (`mkalias`) and the consumers live in this crate, so the
//! record layout is defined here: an 8-byte big-endian header followed by
//! the target path bytes. Relative records (the TN1188 case) resolve
//! against the alias's parent directory.

use std::path::{Component, Path, PathBuf};

use zerocopy::byteorder::{BigEndian, U16};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::error::{MetaError, Result};
use crate::finder::{FinderData, FinderFlags};
use crate::ostype::OsType;
use crate::rsrc::{ALIAS_RESOURCE_ID, CUSTOM_ICON_ID, Resource, ResourceFork};
use crate::store::{Item, MetaStore};

pub const ALIAS_VERSION: u16 = 2;

const FLAG_RELATIVE: u16 = 0x0001;

type Be16 = U16<BigEndian>;

#[derive(IntoBytes, FromBytes, KnownLayout, Immutable, Unaligned, Copy, Clone, Debug)]
#[repr(C, packed)]
struct AliasHeader {
    version: Be16,
    kind: Be16,
    flags: Be16,
    path_len: Be16,
}

const ALIAS_HEADER_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasKind {
    File,
    Folder,
}

/// A decoded `alis` resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasRecord {
    pub kind: AliasKind,
    pub relative: bool,
    pub target: PathBuf,
}

impl AliasRecord {
    pub fn encode(&self) -> Result<Vec<u8>> {
        let path = path_bytes(&self.target);
        if path.len() > u16::MAX as usize {
            return Err(MetaError::BadAliasRecord("target path too long"));
        }
        let header = AliasHeader {
            version: Be16::new(ALIAS_VERSION),
            kind: Be16::new(match self.kind {
                AliasKind::File => 0,
                AliasKind::Folder => 1,
            }),
            flags: Be16::new(if self.relative { FLAG_RELATIVE } else { 0 }),
            path_len: Be16::new(path.len() as u16),
        };
        let mut out = Vec::with_capacity(ALIAS_HEADER_LEN + path.len());
        out.extend_from_slice(header.as_bytes());
        out.extend_from_slice(&path);
        Ok(out)
    }

    pub fn decode(bytes: &[u8]) -> Result<AliasRecord> {
        if bytes.len() < ALIAS_HEADER_LEN {
            return Err(MetaError::BadAliasRecord("truncated header"));
        }
        let header = AliasHeader::read_from_bytes(&bytes[..ALIAS_HEADER_LEN])
            .map_err(|_| MetaError::BadAliasRecord("truncated header"))?;
        if header.version.get() != ALIAS_VERSION {
            return Err(MetaError::BadAliasRecord("unknown version"));
        }
        let kind = match header.kind.get() {
            0 => AliasKind::File,
            1 => AliasKind::Folder,
            _ => return Err(MetaError::BadAliasRecord("unknown kind")),
        };
        let len = header.path_len.get() as usize;
        let path = bytes
            .get(ALIAS_HEADER_LEN..ALIAS_HEADER_LEN + len)
            .ok_or(MetaError::BadAliasRecord("path beyond record"))?;
        Ok(AliasRecord {
            kind,
            relative: header.flags.get() & FLAG_RELATIVE != 0,
            target: bytes_path(path),
        })
    }
}

#[cfg(unix)]
fn path_bytes(path: &Path) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;
    path.as_os_str().as_bytes().to_vec()
}

#[cfg(not(unix))]
fn path_bytes(path: &Path) -> Vec<u8> {
    path.to_string_lossy().into_owned().into_bytes()
}

#[cfg(unix)]
fn bytes_path(bytes: &[u8]) -> PathBuf {
    use std::os::unix::ffi::OsStrExt;
    PathBuf::from(std::ffi::OsStr::from_bytes(bytes))
}

#[cfg(not(unix))]
fn bytes_path(bytes: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
}

#[derive(Debug, Clone, Copy)]
pub struct AliasOptions {
    /// Store the target path relative to the alias file.
    pub relative: bool,
    /// Carry the source's custom icon family over to the alias.
    pub copy_icon: bool,
    /// Give the alias the source file's type and creator codes.
    pub copy_types: bool,
}

impl Default for AliasOptions {
    fn default() -> Self {
        AliasOptions {
            relative: false,
            copy_icon: true,
            copy_types: true,
        }
    }
}

/// Creates an alias file at `target` pointing to `source`.
///
/// The target must not exist. Folder aliases get the Finder's folder-alias
/// type and creator; file aliases inherit the source's codes unless
/// `copy_types` is off.
pub fn create<S: MetaStore>(
    store: &mut S,
    source: &Path,
    target: &Path,
    opts: &AliasOptions,
) -> Result<()> {
    let mut src_item = Item::new(store, source);
    let folder = src_item.is_folder()?;
    let src_data = src_item.finder_data()?;
    let src_fork = src_item.resource_fork()?;

    let abs_source =
        std::path::absolute(source).map_err(|e| MetaError::io(source, e))?;
    let record = AliasRecord {
        kind: if folder { AliasKind::Folder } else { AliasKind::File },
        relative: opts.relative,
        target: if opts.relative {
            let abs_target =
                std::path::absolute(target).map_err(|e| MetaError::io(target, e))?;
            let base = abs_target.parent().unwrap_or(Path::new("/"));
            relative_from(&abs_source, base)
        } else {
            abs_source
        },
    };

    // The data fork of an alias is empty; create_new keeps us from
    // clobbering an existing file.
    std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(target)
        .map_err(|e| MetaError::io(target, e))?;

    let mut fork = ResourceFork::new();
    fork.push(Resource::new(
        OsType::ALIAS,
        ALIAS_RESOURCE_ID,
        record.encode()?,
    ));

    let icon = if opts.copy_icon {
        src_fork
            .map(|bytes| ResourceFork::parse(&bytes))
            .transpose()?
            .and_then(|f| f.find(OsType::ICON_FAMILY, CUSTOM_ICON_ID).cloned())
    } else {
        None
    };
    let has_icon = icon.is_some();
    if let Some(icon) = icon {
        fork.push(icon);
    }

    let mut data = FinderData::empty(false);
    let mut flags = FinderFlags::IS_ALIAS;
    if has_icon {
        flags |= FinderFlags::HAS_CUSTOM_ICON;
    }
    data.set_flags(flags);
    if folder {
        data.set_file_type(OsType::FOLDER_ALIAS);
        data.set_file_creator(OsType::FINDER);
    } else if opts.copy_types {
        data.set_file_type(src_data.file_type().unwrap_or(OsType::ALIAS));
        if let Some(creator) = src_data.file_creator() {
            data.set_file_creator(creator);
        }
    } else {
        data.set_file_type(OsType::ALIAS);
    }

    let mut dst_item = Item::new(store, target);
    dst_item.set_resource_fork(&fork.build()?)?;
    dst_item.set_finder_data(&data)
}

/// Reads the alias record of `item` and returns the path it points to.
pub fn resolve<S: MetaStore>(item: &mut Item<'_, S>) -> Result<PathBuf> {
    if !item.finder_data()?.flags().contains(FinderFlags::IS_ALIAS) {
        return Err(MetaError::NotAnAlias);
    }
    let fork = item.resource_fork()?.ok_or(MetaError::NotAnAlias)?;
    let record = ResourceFork::parse(&fork)?
        .find(OsType::ALIAS, ALIAS_RESOURCE_ID)
        .ok_or(MetaError::NotAnAlias)
        .and_then(|res| AliasRecord::decode(&res.data))?;

    if record.relative {
        let base = item.path().parent().unwrap_or(Path::new("."));
        Ok(base.join(&record.target))
    } else {
        Ok(record.target)
    }
}

/// Path of `path` as seen from `base`. Both must be absolute.
fn relative_from(path: &Path, base: &Path) -> PathBuf {
    let path_parts: Vec<Component<'_>> = path.components().collect();
    let base_parts: Vec<Component<'_>> = base.components().collect();

    let common = path_parts
        .iter()
        .zip(base_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut out = PathBuf::new();
    for _ in common..base_parts.len() {
        out.push("..");
    }
    for part in &path_parts[common..] {
        out.push(part);
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemStore;

    #[test]
    fn test_record_round_trip() {
        let record = AliasRecord {
            kind: AliasKind::File,
            relative: false,
            target: PathBuf::from("/Users/sv/Documents/report.txt"),
        };
        let bytes = record.encode().unwrap();
        assert_eq!(AliasRecord::decode(&bytes).unwrap(), record);

        let relative = AliasRecord {
            kind: AliasKind::Folder,
            relative: true,
            target: PathBuf::from("../Shared"),
        };
        let bytes = relative.encode().unwrap();
        assert_eq!(AliasRecord::decode(&bytes).unwrap(), relative);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(AliasRecord::decode(&[]).is_err());
        assert!(AliasRecord::decode(&[0u8; 4]).is_err());

        let record = AliasRecord {
            kind: AliasKind::File,
            relative: false,
            target: PathBuf::from("/x"),
        };
        let mut bytes = record.encode().unwrap();
        bytes[1] = 9; // version
        assert!(AliasRecord::decode(&bytes).is_err());

        let mut bytes = record.encode().unwrap();
        bytes.truncate(ALIAS_HEADER_LEN); // path cut off
        assert!(AliasRecord::decode(&bytes).is_err());
    }

    #[test]
    fn test_create_and_resolve() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("original.txt");
        std::fs::write(&source, b"content").unwrap();
        let target = dir.path().join("original alias");

        let mut store = MemStore::new();
        create(&mut store, &source, &target, &AliasOptions::default()).unwrap();

        let mut item = Item::new(&mut store, &target);
        let data = item.finder_data().unwrap();
        assert!(data.flags().contains(FinderFlags::IS_ALIAS));

        let resolved = resolve(&mut item).unwrap();
        assert_eq!(resolved, std::path::absolute(&source).unwrap());
    }

    #[test]
    fn test_create_relative_alias() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("sub").join("original.txt");
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(&source, b"content").unwrap();
        let target = dir.path().join("link");

        let mut store = MemStore::new();
        let opts = AliasOptions {
            relative: true,
            ..Default::default()
        };
        create(&mut store, &source, &target, &opts).unwrap();

        let mut item = Item::new(&mut store, &target);
        let resolved = resolve(&mut item).unwrap();
        assert_eq!(resolved, dir.path().join("sub").join("original.txt"));
    }

    #[test]
    fn test_folder_alias_types() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("stuff");
        std::fs::create_dir(&source).unwrap();
        let target = dir.path().join("stuff alias");

        let mut store = MemStore::new();
        create(&mut store, &source, &target, &AliasOptions::default()).unwrap();

        let mut item = Item::new(&mut store, &target);
        let data = item.finder_data().unwrap();
        assert_eq!(data.file_type(), Some(OsType::FOLDER_ALIAS));
        assert_eq!(data.file_creator(), Some(OsType::FINDER));
    }

    #[test]
    fn test_create_refuses_existing_target() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("a");
        let target = dir.path().join("b");
        std::fs::write(&source, b"").unwrap();
        std::fs::write(&target, b"").unwrap();

        let mut store = MemStore::new();
        let err = create(&mut store, &source, &target, &AliasOptions::default()).unwrap_err();
        assert!(matches!(err, MetaError::Io { .. }));
    }

    #[test]
    fn test_resolve_rejects_plain_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain");
        std::fs::write(&file, b"").unwrap();

        let mut store = MemStore::new();
        let mut item = Item::new(&mut store, &file);
        assert!(matches!(resolve(&mut item), Err(MetaError::NotAnAlias)));
    }

    #[test]
    fn test_relative_from() {
        let rel = relative_from(Path::new("/a/b/c.txt"), Path::new("/a/d"));
        assert_eq!(rel, PathBuf::from("../b/c.txt"));
        let rel = relative_from(Path::new("/a/b"), Path::new("/a"));
        assert_eq!(rel, PathBuf::from("b"));
        let rel = relative_from(Path::new("/a"), Path::new("/a"));
        assert_eq!(rel, PathBuf::from("."));
    }
}
