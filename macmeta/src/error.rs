// SPDX-License-Identifier: MIT

use std::path::PathBuf;

/// Top-level error for metadata operations.
#[derive(Debug, thiserror::Error)]
pub enum MetaError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: attribute {attr}: {source}", path.display())]
    Xattr {
        path: PathBuf,
        attr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("finder info is {len} bytes, expected 32")]
    BadFinderInfo { len: usize },

    #[error("malformed resource fork: {0}")]
    BadResourceFork(&'static str),

    #[error("not an alias")]
    NotAnAlias,

    #[error("malformed alias record: {0}")]
    BadAliasRecord(&'static str),

    #[error("comment is {len} characters, maximum is 200")]
    CommentTooLong { len: usize },

    #[error("unknown label name: {0}")]
    UnknownLabel(String),

    #[error("type code must be exactly 4 ASCII characters: {0:?}")]
    BadTypeCode(String),

    #[error("fork must be one of data, rsrc, both: {0:?}")]
    BadForkSelector(String),

    #[error("invalid suffix: {0:?}")]
    BadSuffix(String),

    #[error("{}: is a folder", path.display())]
    IsAFolder { path: PathBuf },
}

impl MetaError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MetaError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T = ()> = core::result::Result<T, MetaError>;
