// === Sub-modules ===
pub mod flags;
pub mod info;
pub mod label;

pub use flags::{ExtendedFlags, FinderFlags, SETTABLE_FLAGS};
pub use info::{
    DInfo, DXInfo, FInfo, FXInfo, FINDER_INFO_LEN, FileFinderInfo, FinderData, FolderFinderInfo,
};
pub use label::Label;
