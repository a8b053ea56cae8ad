// mactools/src/bin/hfsdata.rs

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgGroup, Parser};

use mactools::exit::code_for;
use macmeta::util::format_timestamp;
use macmeta::{
    ExtendedFlags, ForkSelect, Item, ItemKind, MetaError, OsType, Result, XattrStore, alias, kind,
};

#[derive(Parser)]
#[command(name = "hfsdata", version, about = "Print one piece of Finder metadata for a file")]
#[command(group = ArgGroup::new("field").required(true))]
struct Cli {
    /// Whether the file suffix is hidden
    #[arg(short = 'x', group = "field")]
    extension_hidden: bool,

    /// Application that opens the file
    #[arg(short = 'A', group = "field")]
    application: bool,

    /// Date created
    #[arg(short = 'c', group = "field")]
    created: bool,

    /// Date modified
    #[arg(short = 'm', group = "field")]
    modified: bool,

    /// Date accessed
    #[arg(short = 'a', group = "field")]
    accessed: bool,

    /// Date of attribute modification
    #[arg(short = 't', group = "field")]
    attr_modified: bool,

    /// Resource fork size, logical
    #[arg(short = 'r', group = "field")]
    rsrc_logical: bool,

    /// Resource fork size, physical
    #[arg(short = 'R', group = "field")]
    rsrc_physical: bool,

    /// Total size of both forks, logical
    #[arg(short = 's', group = "field")]
    total_logical: bool,

    /// Total size of both forks, physical
    #[arg(short = 'S', group = "field")]
    total_physical: bool,

    /// Data fork size, logical
    #[arg(short = 'd', group = "field")]
    data_logical: bool,

    /// Data fork size, physical
    #[arg(short = 'D', group = "field")]
    data_physical: bool,

    /// File type code
    #[arg(short = 'T', group = "field")]
    type_code: bool,

    /// Creator type code
    #[arg(short = 'C', group = "field")]
    creator_code: bool,

    /// File kind, as the Finder shows it
    #[arg(short = 'k', group = "field")]
    kind: bool,

    /// Label, numerically
    #[arg(short = 'l', group = "field")]
    label_number: bool,

    /// Label, by name
    #[arg(short = 'L', group = "field")]
    label_name: bool,

    /// Finder comment
    #[arg(short = 'o', group = "field")]
    comment: bool,

    /// File the alias points to
    #[arg(short = 'e', group = "field")]
    alias_target: bool,

    /// The file to query
    file: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut store = XattrStore;
    match run(&mut store, &cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("hfsdata: {err}");
            ExitCode::from(code_for(&err))
        }
    }
}

fn run(store: &mut XattrStore, cli: &Cli) -> Result {
    let mut item = Item::new(store, &cli.file);

    if cli.extension_hidden {
        let hidden = item
            .finder_data()?
            .extended_flags()
            .contains(ExtendedFlags::EXTENSION_HIDDEN);
        println!("{}", if hidden { "Yes" } else { "No" });
    } else if cli.application {
        let creator = item.finder_data()?.file_creator().unwrap_or(OsType::FINDER);
        match kind::application_for(creator) {
            Some(app) => println!("{app}"),
            None => println!("This file has no preferred application set."),
        }
    } else if cli.created {
        println!("{}", format_timestamp(item.timestamps()?.created));
    } else if cli.modified {
        println!("{}", format_timestamp(item.timestamps()?.modified));
    } else if cli.accessed {
        println!("{}", format_timestamp(item.timestamps()?.accessed));
    } else if cli.attr_modified {
        println!("{}", format_timestamp(item.timestamps()?.changed));
    } else if cli.rsrc_logical {
        println!("{}", item.fork_sizes()?.logical(ForkSelect::Rsrc));
    } else if cli.rsrc_physical {
        println!("{}", item.fork_sizes()?.physical(ForkSelect::Rsrc));
    } else if cli.total_logical {
        println!("{}", item.fork_sizes()?.logical(ForkSelect::Both));
    } else if cli.total_physical {
        println!("{}", item.fork_sizes()?.physical(ForkSelect::Both));
    } else if cli.data_logical {
        println!("{}", item.fork_sizes()?.logical(ForkSelect::Data));
    } else if cli.data_physical {
        println!("{}", item.fork_sizes()?.physical(ForkSelect::Data));
    } else if cli.type_code {
        match item.finder_data()?.file_type() {
            // Folders have no type code of their own.
            None => println!("fold"),
            Some(code) if !code.is_zero() => println!("{code}"),
            Some(_) => {}
        }
    } else if cli.creator_code {
        match item.finder_data()?.file_creator() {
            None => println!("{}", OsType::FINDER),
            Some(code) if !code.is_zero() => println!("{code}"),
            Some(_) => {}
        }
    } else if cli.kind {
        let data = item.finder_data()?;
        println!("{}", kind::kind_string(item.kind()?, &data));
    } else if cli.label_number {
        println!("{}", item.finder_data()?.label().number());
    } else if cli.label_name {
        println!("{}", item.finder_data()?.label().name());
    } else if cli.comment {
        if let Some(comment) = item.comment()? {
            if !comment.is_empty() {
                println!("{comment}");
            }
        }
    } else if cli.alias_target {
        let target = if item.kind()? == ItemKind::Symlink {
            std::fs::read_link(&cli.file).map_err(|e| MetaError::io(&cli.file, e))?
        } else {
            alias::resolve(&mut item)?
        };
        println!("{}", target.display());
    }
    Ok(())
}
