// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::store::MetaStore;

/// In-memory attribute store, keyed by path.
///
/// Backs tests and any caller that wants metadata without touching the
/// filesystem's attribute layer. The file itself (data fork, stat data) is
/// still whatever is on disk.
#[derive(Debug, Default)]
pub struct MemStore {
    attrs: HashMap<PathBuf, HashMap<String, Vec<u8>>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.values().all(|m| m.is_empty())
    }
}

impl MetaStore for MemStore {
    fn get_attr(&mut self, path: &Path, name: &str) -> Result<Option<Vec<u8>>> {
        Ok(self
            .attrs
            .get(path)
            .and_then(|m| m.get(name))
            .cloned())
    }

    fn set_attr(&mut self, path: &Path, name: &str, value: &[u8]) -> Result<()> {
        self.attrs
            .entry(path.to_path_buf())
            .or_default()
            .insert(name.to_string(), value.to_vec());
        Ok(())
    }

    fn remove_attr(&mut self, path: &Path, name: &str) -> Result<()> {
        if let Some(m) = self.attrs.get_mut(path) {
            m.remove(name);
        }
        Ok(())
    }

    fn attr_size(&mut self, path: &Path, name: &str) -> Result<Option<u64>> {
        Ok(self
            .attrs
            .get(path)
            .and_then(|m| m.get(name))
            .map(|v| v.len() as u64))
    }

    fn list_attrs(&mut self, path: &Path) -> Result<Vec<String>> {
        let mut names: Vec<String> = self
            .attrs
            .get(path)
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_set_get_remove() {
        let mut store = MemStore::new();
        let p = Path::new("/tmp/x");
        assert_eq!(store.get_attr(p, "a").unwrap(), None);

        store.set_attr(p, "a", b"hello").unwrap();
        assert_eq!(store.get_attr(p, "a").unwrap().as_deref(), Some(&b"hello"[..]));
        assert_eq!(store.attr_size(p, "a").unwrap(), Some(5));

        store.set_attr(p, "a", b"x").unwrap();
        assert_eq!(store.attr_size(p, "a").unwrap(), Some(1));

        store.remove_attr(p, "a").unwrap();
        assert_eq!(store.get_attr(p, "a").unwrap(), None);
        // Removing twice stays fine.
        store.remove_attr(p, "a").unwrap();
    }

    #[test]
    fn test_list_is_sorted_per_path() {
        let mut store = MemStore::new();
        let p = Path::new("/tmp/x");
        store.set_attr(p, "b", b"1").unwrap();
        store.set_attr(p, "a", b"2").unwrap();
        store.set_attr(Path::new("/tmp/y"), "c", b"3").unwrap();
        assert_eq!(store.list_attrs(p).unwrap(), vec!["a", "b"]);
    }
}
