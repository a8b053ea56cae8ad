// mactools/src/bin/setlabel.rs

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use mactools::exit::Tally;
use mactools::output::{paint_label, set_silent};
use mactools::status;
use macmeta::{Item, Label, Result, XattrStore};

#[derive(Parser)]
#[command(name = "setlabel", version, about = "Set the Finder color label of files")]
struct Cli {
    /// Silent mode
    #[arg(short = 's')]
    silent: bool,

    /// One of None, Red, Orange, Yellow, Green, Blue, Purple, Gray
    #[arg(value_name = "label")]
    label: Label,

    /// Files to label
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    set_silent(cli.silent);

    let mut store = XattrStore;
    let mut tally = Tally::new();
    for path in &cli.files {
        if let Err(err) = set_label(&mut store, path, cli.label) {
            eprintln!("setlabel: {err}");
            tally.fail(&err);
        }
    }
    tally.finish()
}

fn set_label(store: &mut XattrStore, path: &PathBuf, label: Label) -> Result {
    let mut item = Item::new(store, path);
    let mut data = item.finder_data()?;

    let current = data.label();
    if current == label {
        return Ok(());
    }

    data.set_label(label);
    item.set_finder_data(&data)?;
    status!(
        "{}:\n\t{} --> {}",
        path.display(),
        paint_label(current),
        paint_label(label)
    );
    Ok(())
}
