// mactools/src/bin/getfcomment.rs

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use mactools::exit::Tally;
use macmeta::{Item, XattrStore};

#[derive(Parser)]
#[command(name = "getfcomment", version, about = "Print the Finder comment of files")]
struct Cli {
    /// Prefix each comment with the file name
    #[arg(short = 'p')]
    with_name: bool,

    /// Files to read
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut store = XattrStore;
    let mut tally = Tally::new();
    for path in &cli.files {
        let mut item = Item::new(&mut store, path);
        match item.comment() {
            // An unset or empty comment prints nothing at all.
            Ok(Some(comment)) if !comment.is_empty() => {
                if cli.with_name {
                    println!("Comment for '{}':", path.display());
                }
                println!("{comment}");
            }
            Ok(_) => {}
            Err(err) => {
                eprintln!("getfcomment: {err}");
                tally.fail(&err);
            }
        }
    }
    tally.finish()
}
