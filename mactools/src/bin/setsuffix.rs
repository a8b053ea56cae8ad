// mactools/src/bin/setsuffix.rs

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use mactools::exit::{self, Tally};
use mactools::output::set_silent;
use mactools::status;
use macmeta::suffix::{self, DEFAULT_SUFFIX_LENGTH, MAX_SUFFIX_LENGTH};
use macmeta::{MetaError, Result};

#[derive(Parser)]
#[command(name = "setsuffix", version, about = "Set file name suffixes in batches")]
struct Cli {
    /// Silent mode
    #[arg(short = 's')]
    silent: bool,

    /// Leave files that already have a suffix alone
    #[arg(short = 'e')]
    exclude_suffixed: bool,

    /// Also rename folders
    #[arg(short = 'F')]
    include_folders: bool,

    /// Append the suffix even when the file already has one
    #[arg(short = 'a')]
    add: bool,

    /// Remove suffixes instead of setting them
    #[arg(short = 'r')]
    remove: bool,

    /// Longest suffix taken into account
    #[arg(short = 'l', value_name = "length", default_value_t = DEFAULT_SUFFIX_LENGTH)]
    length: usize,

    /// The suffix to set, without the dot
    #[arg(short = 'x', value_name = "suffix")]
    suffix: Option<String>,

    /// Files to rename
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    set_silent(cli.silent);

    if cli.length < 1 || cli.length > MAX_SUFFIX_LENGTH {
        eprintln!("setsuffix: length must be between 1 and {MAX_SUFFIX_LENGTH}");
        return ExitCode::from(exit::USAGE);
    }
    let suffix = match (&cli.suffix, cli.remove) {
        (Some(s), _) => {
            if let Err(err) = suffix::validate_suffix(s, cli.length) {
                eprintln!("setsuffix: {err}");
                return ExitCode::from(exit::DATAERR);
            }
            s.as_str()
        }
        (None, true) => "",
        (None, false) => {
            eprintln!("setsuffix: specify the suffix to set with -x");
            return ExitCode::from(exit::USAGE);
        }
    };

    let mut tally = Tally::new();
    for path in &cli.files {
        if let Err(err) = set_suffix(path, suffix, &cli) {
            eprintln!("setsuffix: {err}");
            tally.fail(&err);
        }
    }
    tally.finish()
}

fn set_suffix(path: &Path, suffix: &str, cli: &Cli) -> Result {
    let meta = std::fs::metadata(path).map_err(|e| MetaError::io(path, e))?;
    if meta.is_dir() && !cli.include_folders {
        return Ok(());
    }

    let name = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let new_name = match suffix::find_suffix(&name, cli.length) {
        None => {
            if cli.remove {
                status!("{}: file has no suffix", path.display());
                return Ok(());
            }
            suffix::append_suffix(&name, suffix)
        }
        Some(pos) => {
            if cli.remove {
                name[..pos].to_string()
            } else if cli.exclude_suffixed {
                return Ok(());
            } else if cli.add {
                suffix::append_suffix(&name, suffix)
            } else if suffix::suffix_of(&name, cli.length) == Some(suffix) {
                // Already carries the requested suffix.
                return Ok(());
            } else {
                suffix::replace_suffix(&name, suffix, cli.length)
            }
        }
    };

    if new_name == name {
        return Ok(());
    }
    let new_path = path.with_file_name(&new_name);
    std::fs::rename(path, &new_path).map_err(|e| MetaError::io(path, e))?;
    status!("{} --> {}", path.display(), new_path.display());
    Ok(())
}
