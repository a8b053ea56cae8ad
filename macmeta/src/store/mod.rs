// SPDX-License-Identifier: MIT

//! Metadata store: where the finder-info blob, resource fork and comment
//! actually live.
//!
//! [`MetaStore`] is the seam: [`XattrStore`] keeps every stream in extended
//! attributes under the `com.apple.*` names (the `user.`-prefixed spelling on
//! non-Apple kernels, as netatalk and Samba write them), [`MemStore`] keeps
//! them in a map for tests. [`Item`] binds a path to a store and exposes the
//! typed operations the tools are built from.

mod mem;
#[cfg(unix)]
pub mod xattr;

pub use mem::MemStore;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use crate::comment::{self, MAX_COMMENT_LEN};
use crate::error::{MetaError, Result};
use crate::finder::FinderData;
use crate::forks::{ForkSizes, physical_size};

#[cfg(target_os = "macos")]
pub const ATTR_FINDER_INFO: &str = "com.apple.FinderInfo";
#[cfg(not(target_os = "macos"))]
pub const ATTR_FINDER_INFO: &str = "user.com.apple.FinderInfo";

#[cfg(target_os = "macos")]
pub const ATTR_RESOURCE_FORK: &str = "com.apple.ResourceFork";
#[cfg(not(target_os = "macos"))]
pub const ATTR_RESOURCE_FORK: &str = "user.com.apple.ResourceFork";

#[cfg(target_os = "macos")]
pub const ATTR_COMMENT: &str = "com.apple.metadata:kMDItemFinderComment";
#[cfg(not(target_os = "macos"))]
pub const ATTR_COMMENT: &str = "user.com.apple.metadata:kMDItemFinderComment";

pub trait MetaStore {
    fn get_attr(&mut self, path: &Path, name: &str) -> Result<Option<Vec<u8>>>;
    fn set_attr(&mut self, path: &Path, name: &str, value: &[u8]) -> Result<()>;
    fn remove_attr(&mut self, path: &Path, name: &str) -> Result<()>;
    fn attr_size(&mut self, path: &Path, name: &str) -> Result<Option<u64>>;
    fn list_attrs(&mut self, path: &Path) -> Result<Vec<String>>;
}

/// The production backend: extended attributes on the real filesystem.
#[cfg(unix)]
#[derive(Debug, Default, Clone, Copy)]
pub struct XattrStore;

#[cfg(unix)]
impl XattrStore {
    fn wrap<T>(path: &Path, name: &str, res: std::io::Result<T>) -> Result<T> {
        res.map_err(|source| MetaError::Xattr {
            path: path.to_path_buf(),
            attr: name.to_string(),
            source,
        })
    }
}

#[cfg(unix)]
impl MetaStore for XattrStore {
    fn get_attr(&mut self, path: &Path, name: &str) -> Result<Option<Vec<u8>>> {
        Self::wrap(path, name, xattr::get(path, name))
    }

    fn set_attr(&mut self, path: &Path, name: &str, value: &[u8]) -> Result<()> {
        Self::wrap(path, name, xattr::set(path, name, value))
    }

    fn remove_attr(&mut self, path: &Path, name: &str) -> Result<()> {
        Self::wrap(path, name, xattr::remove(path, name))
    }

    fn attr_size(&mut self, path: &Path, name: &str) -> Result<Option<u64>> {
        Self::wrap(path, name, xattr::size(path, name))
    }

    fn list_attrs(&mut self, path: &Path) -> Result<Vec<String>> {
        Self::wrap(path, "", xattr::list(path))
    }
}

/// What `lstat` says an item is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    File,
    Folder,
    Symlink,
    CharDevice,
    BlockDevice,
    Fifo,
    Socket,
    Unknown,
}

impl ItemKind {
    pub fn of_file_type(t: fs::FileType) -> ItemKind {
        #[cfg(unix)]
        {
            use std::os::unix::fs::FileTypeExt;
            if t.is_char_device() {
                return ItemKind::CharDevice;
            }
            if t.is_block_device() {
                return ItemKind::BlockDevice;
            }
            if t.is_fifo() {
                return ItemKind::Fifo;
            }
            if t.is_socket() {
                return ItemKind::Socket;
            }
        }
        if t.is_dir() {
            ItemKind::Folder
        } else if t.is_symlink() {
            ItemKind::Symlink
        } else if t.is_file() {
            ItemKind::File
        } else {
            ItemKind::Unknown
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ItemKind::File => "File",
            ItemKind::Folder => "Folder",
            ItemKind::Symlink => "Symbolic Link",
            ItemKind::CharDevice => "Character Device",
            ItemKind::BlockDevice => "Block Device",
            ItemKind::Fifo => "Named Pipe (FIFO)",
            ItemKind::Socket => "UNIX Socket",
            ItemKind::Unknown => "Unknown File Type",
        }
    }
}

/// The four timestamps the tools report. `changed` is inode change time,
/// which is the closest thing to the old attribute-modification date.
/// Missing values stay `None` (not every platform exposes a birth time).
#[derive(Debug, Clone, Copy, Default)]
pub struct Timestamps {
    pub created: Option<SystemTime>,
    pub modified: Option<SystemTime>,
    pub accessed: Option<SystemTime>,
    pub changed: Option<SystemTime>,
}

impl Timestamps {
    fn of_metadata(meta: &fs::Metadata) -> Timestamps {
        let changed;
        #[cfg(unix)]
        {
            use std::os::unix::fs::MetadataExt;
            let secs = meta.ctime();
            let nanos = meta.ctime_nsec() as u32;
            changed = if secs >= 0 {
                Some(SystemTime::UNIX_EPOCH + Duration::new(secs as u64, nanos))
            } else {
                None
            };
        }
        #[cfg(not(unix))]
        {
            changed = None;
        }
        Timestamps {
            created: meta.created().ok(),
            modified: meta.modified().ok(),
            accessed: meta.accessed().ok(),
            changed,
        }
    }
}

/// A path bound to a metadata store.
pub struct Item<'a, S: MetaStore + ?Sized> {
    store: &'a mut S,
    path: PathBuf,
}

impl<'a, S: MetaStore + ?Sized> Item<'a, S> {
    pub fn new(store: &'a mut S, path: impl Into<PathBuf>) -> Self {
        Item {
            store,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: std::io::Error) -> MetaError {
        MetaError::io(&self.path, source)
    }

    /// Classifies the item itself, without following symlinks.
    pub fn kind(&self) -> Result<ItemKind> {
        let meta = fs::symlink_metadata(&self.path).map_err(|e| self.io_err(e))?;
        Ok(ItemKind::of_file_type(meta.file_type()))
    }

    /// True for folders, following symlinks (a link to a folder counts).
    pub fn is_folder(&self) -> Result<bool> {
        let meta = fs::metadata(&self.path).map_err(|e| self.io_err(e))?;
        Ok(meta.is_dir())
    }

    pub fn exists(&self) -> bool {
        fs::symlink_metadata(&self.path).is_ok()
    }

    /// Number of directory entries, for the `N items` listing column.
    pub fn entry_count(&self) -> Result<usize> {
        let entries = fs::read_dir(&self.path).map_err(|e| self.io_err(e))?;
        Ok(entries.count())
    }

    pub fn finder_data(&mut self) -> Result<FinderData> {
        let folder = self.is_folder()?;
        match self.store.get_attr(&self.path, ATTR_FINDER_INFO)? {
            Some(blob) => FinderData::parse(&blob, folder),
            None => Ok(FinderData::empty(folder)),
        }
    }

    pub fn set_finder_data(&mut self, data: &FinderData) -> Result<()> {
        self.store
            .set_attr(&self.path, ATTR_FINDER_INFO, &data.to_bytes())
    }

    pub fn comment(&mut self) -> Result<Option<String>> {
        Ok(self
            .store
            .get_attr(&self.path, ATTR_COMMENT)?
            .map(|raw| comment::decode(&raw)))
    }

    pub fn set_comment(&mut self, text: &str) -> Result<()> {
        let len = text.chars().count();
        if len > MAX_COMMENT_LEN {
            return Err(MetaError::CommentTooLong { len });
        }
        self.store
            .set_attr(&self.path, ATTR_COMMENT, &comment::encode(text))
    }

    pub fn remove_comment(&mut self) -> Result<()> {
        self.store.remove_attr(&self.path, ATTR_COMMENT)
    }

    pub fn resource_fork(&mut self) -> Result<Option<Vec<u8>>> {
        self.store.get_attr(&self.path, ATTR_RESOURCE_FORK)
    }

    pub fn set_resource_fork(&mut self, data: &[u8]) -> Result<()> {
        self.store.set_attr(&self.path, ATTR_RESOURCE_FORK, data)
    }

    pub fn remove_resource_fork(&mut self) -> Result<()> {
        self.store.remove_attr(&self.path, ATTR_RESOURCE_FORK)
    }

    pub fn fork_sizes(&mut self) -> Result<ForkSizes> {
        let meta = fs::metadata(&self.path).map_err(|e| self.io_err(e))?;
        let data_logical = if meta.is_dir() { 0 } else { meta.len() };
        let data_physical;
        #[cfg(unix)]
        {
            use std::os::unix::fs::MetadataExt;
            data_physical = if meta.is_dir() { 0 } else { meta.blocks() as u64 * 512 };
        }
        #[cfg(not(unix))]
        {
            data_physical = physical_size(data_logical);
        }
        let rsrc_logical = self
            .store
            .attr_size(&self.path, ATTR_RESOURCE_FORK)?
            .unwrap_or(0);
        Ok(ForkSizes {
            data_logical,
            data_physical,
            rsrc_logical,
            rsrc_physical: physical_size(rsrc_logical),
        })
    }

    pub fn timestamps(&self) -> Result<Timestamps> {
        let meta = fs::metadata(&self.path).map_err(|e| self.io_err(e))?;
        Ok(Timestamps::of_metadata(&meta))
    }

    /// Unix permission bits (the low 9 mode bits).
    pub fn mode(&self) -> Result<u32> {
        let meta = fs::metadata(&self.path).map_err(|e| self.io_err(e))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::MetadataExt;
            Ok(meta.mode() & 0o777)
        }
        #[cfg(not(unix))]
        {
            let _ = meta;
            Ok(0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finder::{FinderFlags, Label};

    #[test]
    fn test_item_finder_data_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("doc.txt");
        std::fs::write(&file, b"hello").unwrap();

        let mut store = MemStore::new();
        let mut item = Item::new(&mut store, &file);

        // No metadata yet: blank file-shaped blob.
        let mut data = item.finder_data().unwrap();
        assert!(data.is_blank());
        assert!(!data.is_folder());

        data.set_file_type("TEXT".parse().unwrap());
        data.set_label(Label::Green);
        data.set_flags(data.flags() | FinderFlags::IS_INVISIBLE);
        item.set_finder_data(&data).unwrap();

        let back = item.finder_data().unwrap();
        assert_eq!(back.file_type(), data.file_type());
        assert_eq!(back.label(), Label::Green);
        assert!(back.flags().contains(FinderFlags::IS_INVISIBLE));
    }

    #[test]
    fn test_folder_items_get_folder_shaped_data() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = MemStore::new();
        let mut item = Item::new(&mut store, dir.path());
        assert!(item.finder_data().unwrap().is_folder());
        assert_eq!(item.kind().unwrap(), ItemKind::Folder);
    }

    #[test]
    fn test_comment_cap() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("f");
        std::fs::write(&file, b"").unwrap();

        let mut store = MemStore::new();
        let mut item = Item::new(&mut store, &file);
        assert_eq!(item.comment().unwrap(), None);

        item.set_comment("a fine file").unwrap();
        assert_eq!(item.comment().unwrap().as_deref(), Some("a fine file"));

        let long = "x".repeat(MAX_COMMENT_LEN + 1);
        assert!(matches!(
            item.set_comment(&long),
            Err(MetaError::CommentTooLong { .. })
        ));

        item.remove_comment().unwrap();
        assert_eq!(item.comment().unwrap(), None);
    }

    #[test]
    fn test_fork_sizes() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("f");
        std::fs::write(&file, vec![0u8; 1000]).unwrap();

        let mut store = MemStore::new();
        let mut item = Item::new(&mut store, &file);
        let sizes = item.fork_sizes().unwrap();
        assert_eq!(sizes.data_logical, 1000);
        assert_eq!(sizes.rsrc_logical, 0);
        assert_eq!(sizes.rsrc_physical, 0);

        item.set_resource_fork(&[0u8; 300]).unwrap();
        let sizes = item.fork_sizes().unwrap();
        assert_eq!(sizes.rsrc_logical, 300);
        assert_eq!(sizes.rsrc_physical, 4096);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let mut store = MemStore::new();
        let item = Item::new(&mut store, "/no/such/file");
        let err = item.kind().unwrap_err();
        assert!(err.to_string().contains("/no/such/file"));
    }
}
