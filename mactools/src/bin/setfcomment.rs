// mactools/src/bin/setfcomment.rs

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use mactools::exit::{self, Tally};
use mactools::output::set_silent;
use mactools::status;
use macmeta::comment::MAX_COMMENT_LEN;
use macmeta::{Item, XattrStore};

#[derive(Parser)]
#[command(name = "setfcomment", version, about = "Set the Finder comment of files")]
struct Cli {
    /// Silent mode
    #[arg(short = 's')]
    silent: bool,

    /// The comment to set, at most 200 characters
    #[arg(short = 'c', value_name = "comment", required = true)]
    comment: String,

    /// Files to comment
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    set_silent(cli.silent);

    if cli.comment.chars().count() > MAX_COMMENT_LEN {
        eprintln!("setfcomment: comment is longer than {MAX_COMMENT_LEN} characters");
        return ExitCode::from(exit::DATAERR);
    }

    let mut store = XattrStore;
    let mut tally = Tally::new();
    for path in &cli.files {
        let mut item = Item::new(&mut store, path);
        if !item.exists() {
            eprintln!("setfcomment: {}: No such file or directory", path.display());
            tally.record(exit::NOINPUT);
            continue;
        }
        match item.set_comment(&cli.comment) {
            Ok(()) => status!("Finder comment set for {}", path.display()),
            Err(err) => {
                eprintln!("setfcomment: {err}");
                tally.fail(&err);
            }
        }
    }
    tally.finish()
}
