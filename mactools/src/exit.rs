//! Exit codes, sysexits-style.
//!
//! Tools that take several files keep going after a failure; the first
//! failure's code becomes the process exit code.

use std::io::ErrorKind;
use std::process::ExitCode;

use macmeta::MetaError;

pub const OK: u8 = 0;
pub const USAGE: u8 = 64;
pub const DATAERR: u8 = 65;
pub const NOINPUT: u8 = 66;
pub const CANTCREAT: u8 = 73;
pub const IOERR: u8 = 74;
pub const NOPERM: u8 = 77;

fn io_code(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::NotFound => NOINPUT,
        ErrorKind::PermissionDenied => NOPERM,
        ErrorKind::AlreadyExists => CANTCREAT,
        _ => IOERR,
    }
}

pub fn code_for(err: &MetaError) -> u8 {
    match err {
        MetaError::Io { source, .. } | MetaError::Xattr { source, .. } => io_code(source.kind()),
        MetaError::BadFinderInfo { .. }
        | MetaError::BadResourceFork(_)
        | MetaError::BadAliasRecord(_)
        | MetaError::NotAnAlias
        | MetaError::CommentTooLong { .. }
        | MetaError::BadTypeCode(_)
        | MetaError::BadSuffix(_)
        | MetaError::IsAFolder { .. } => DATAERR,
        MetaError::UnknownLabel(_) | MetaError::BadForkSelector(_) => USAGE,
    }
}

pub fn code_for_any(err: &anyhow::Error) -> u8 {
    if let Some(meta) = err.downcast_ref::<MetaError>() {
        code_for(meta)
    } else if let Some(io) = err.downcast_ref::<std::io::Error>() {
        io_code(io.kind())
    } else {
        IOERR
    }
}

/// Accumulates per-file outcomes into one process exit code.
#[derive(Debug, Default)]
pub struct Tally {
    code: u8,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, code: u8) {
        if self.code == OK {
            self.code = code;
        }
    }

    pub fn fail(&mut self, err: &MetaError) {
        self.record(code_for(err));
    }

    pub fn fail_any(&mut self, err: &anyhow::Error) {
        self.record(code_for_any(err));
    }

    pub fn finish(self) -> ExitCode {
        ExitCode::from(self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_io_mapping() {
        let err = MetaError::io(
            PathBuf::from("/x"),
            std::io::Error::from(ErrorKind::NotFound),
        );
        assert_eq!(code_for(&err), NOINPUT);

        let err = MetaError::io(
            PathBuf::from("/x"),
            std::io::Error::from(ErrorKind::PermissionDenied),
        );
        assert_eq!(code_for(&err), NOPERM);
    }

    #[test]
    fn test_data_errors() {
        assert_eq!(code_for(&MetaError::NotAnAlias), DATAERR);
        assert_eq!(code_for(&MetaError::CommentTooLong { len: 300 }), DATAERR);
        assert_eq!(code_for(&MetaError::UnknownLabel("Teal".into())), USAGE);
    }

    #[test]
    fn test_tally_keeps_first_failure() {
        let mut tally = Tally::new();
        tally.record(NOINPUT);
        tally.record(IOERR);
        assert_eq!(tally.code, NOINPUT);
    }
}
