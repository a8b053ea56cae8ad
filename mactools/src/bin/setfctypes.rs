// mactools/src/bin/setfctypes.rs

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use mactools::exit::Tally;
use mactools::output::set_silent;
use mactools::status;
use macmeta::{Item, MetaError, OsType, Result, XattrStore};

#[derive(Parser)]
#[command(name = "setfctypes", version, about = "Set classic Mac file and creator type codes")]
struct Cli {
    /// Silent mode
    #[arg(short = 's')]
    silent: bool,

    /// File type code, exactly 4 characters
    #[arg(short = 'f', value_name = "type")]
    file_type: Option<OsType>,

    /// Creator type code, exactly 4 characters
    #[arg(short = 'c', value_name = "creator")]
    creator: Option<OsType>,

    /// Files to change
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    set_silent(cli.silent);

    if cli.file_type.is_none() && cli.creator.is_none() {
        eprintln!("setfctypes: specify a type with -f and/or a creator with -c");
        return ExitCode::from(mactools::exit::USAGE);
    }

    let mut store = XattrStore;
    let mut tally = Tally::new();
    for path in &cli.files {
        if let Err(err) = set_types(&mut store, path, cli.file_type, cli.creator) {
            eprintln!("setfctypes: {err}");
            tally.fail(&err);
        }
    }
    tally.finish()
}

fn set_types(
    store: &mut XattrStore,
    path: &PathBuf,
    file_type: Option<OsType>,
    creator: Option<OsType>,
) -> Result {
    let mut item = Item::new(store, path);
    if item.is_folder()? {
        return Err(MetaError::IsAFolder { path: path.clone() });
    }

    let mut data = item.finder_data()?;
    let mut changed = false;
    if let Some(code) = file_type {
        if data.file_type() != Some(code) {
            data.set_file_type(code);
            changed = true;
        }
    }
    if let Some(code) = creator {
        if data.file_creator() != Some(code) {
            data.set_file_creator(code);
            changed = true;
        }
    }

    // Nothing to write when the codes already match.
    if changed {
        item.set_finder_data(&data)?;
        status!("{}: types set", path.display());
    }
    Ok(())
}
