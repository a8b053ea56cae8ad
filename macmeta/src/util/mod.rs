// === Sub-modules ===
pub mod size;
pub mod time;

pub use size::{SizeFormat, bytes_exact, folder_placeholder};
pub use time::format_timestamp;
