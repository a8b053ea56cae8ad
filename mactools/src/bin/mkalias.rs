// mactools/src/bin/mkalias.rs

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use mactools::exit::{self, code_for};
use macmeta::alias::{self, AliasOptions};
use macmeta::XattrStore;

#[derive(Parser)]
#[command(name = "mkalias", version, about = "Create a Finder alias to a file or folder")]
struct Cli {
    /// Don't copy the source's custom icon
    #[arg(short = 'c')]
    no_icon: bool,

    /// Don't apply the source's file and creator types
    #[arg(short = 't')]
    no_types: bool,

    /// Store the target path relative to the alias
    #[arg(short = 'r')]
    relative: bool,

    /// The file or folder to alias
    source: PathBuf,

    /// Where to create the alias
    target: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if !cli.source.exists() {
        eprintln!("mkalias: {}: No such file or directory", cli.source.display());
        return ExitCode::from(exit::NOINPUT);
    }
    if cli.target.exists() {
        eprintln!("mkalias: {}: File exists", cli.target.display());
        return ExitCode::from(exit::CANTCREAT);
    }

    let opts = AliasOptions {
        relative: cli.relative,
        copy_icon: !cli.no_icon,
        copy_types: !cli.no_types,
    };
    let mut store = XattrStore;
    match alias::create(&mut store, &cli.source, &cli.target, &opts) {
        Ok(()) => ExitCode::from(exit::OK),
        Err(err) => {
            eprintln!("mkalias: {err}");
            ExitCode::from(code_for(&err))
        }
    }
}
