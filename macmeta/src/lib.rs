//! Classic Mac Finder metadata: the model, the codecs, and the store.
//!
//! The 32-byte finder-info blob, Finder flag words, color labels, resource
//! forks, alias records and Finder comments, all addressed through a
//! [`store::MetaStore`] so tools can run against real extended attributes or
//! an in-memory map.

// === Sub-modules ===
pub mod alias;
pub mod comment;
pub mod error;
pub mod finder;
pub mod forks;
pub mod kind;
pub mod ostype;
pub mod rsrc;
pub mod store;
pub mod suffix;
pub mod util;

// === Error types ===
pub use error::{MetaError, Result};

// === Core model ===
pub use finder::{ExtendedFlags, FINDER_INFO_LEN, FinderData, FinderFlags, Label, SETTABLE_FLAGS};
pub use forks::{ForkSelect, ForkSizes};
pub use ostype::OsType;
pub use rsrc::{Resource, ResourceFork};

// === Store ===
pub use store::{Item, ItemKind, MemStore, MetaStore, Timestamps};
#[cfg(unix)]
pub use store::XattrStore;
