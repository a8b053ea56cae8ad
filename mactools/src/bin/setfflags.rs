// mactools/src/bin/setfflags.rs

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use mactools::exit::{self, Tally};
use mactools::output::set_silent;
use macmeta::{FinderFlags, Item, Result, SETTABLE_FLAGS, XattrStore};

fn parse_bool(arg: &str) -> std::result::Result<bool, String> {
    match arg {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        _ => Err(format!("{arg}: expected 0, 1, true or false")),
    }
}

#[derive(Parser)]
#[command(name = "setfflags", version, about = "Set or print Finder flags of files")]
struct Cli {
    /// Silent mode
    #[arg(short = 'm')]
    silent: bool,

    /// Print the flags instead of setting them
    #[arg(short = 'p')]
    print: bool,

    /// Has custom icon
    #[arg(short = 'c', value_name = "bool", value_parser = parse_bool)]
    custom_icon: Option<bool>,

    /// Is stationery
    #[arg(short = 's', value_name = "bool", value_parser = parse_bool)]
    stationery: Option<bool>,

    /// Name locked
    #[arg(short = 'l', value_name = "bool", value_parser = parse_bool)]
    name_locked: Option<bool>,

    /// Has bundle
    #[arg(short = 'b', value_name = "bool", value_parser = parse_bool)]
    bundle: Option<bool>,

    /// Is invisible
    #[arg(short = 'i', value_name = "bool", value_parser = parse_bool)]
    invisible: Option<bool>,

    /// Is alias
    #[arg(short = 'a', value_name = "bool", value_parser = parse_bool)]
    alias: Option<bool>,

    /// Files to inspect or change
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

impl Cli {
    /// Requested changes in `SETTABLE_FLAGS` order.
    fn changes(&self) -> Vec<(FinderFlags, &'static str, bool, bool)> {
        let values = [
            self.custom_icon,
            self.stationery,
            self.name_locked,
            self.bundle,
            self.invisible,
            self.alias,
        ];
        SETTABLE_FLAGS
            .iter()
            .zip(values)
            .filter_map(|(&(flag, name, folder_ok), value)| {
                value.map(|v| (flag, name, folder_ok, v))
            })
            .collect()
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    set_silent(cli.silent);

    let changes = cli.changes();
    if changes.is_empty() && !cli.print {
        eprintln!("setfflags: nothing to do; pass flag options or -p");
        return ExitCode::from(exit::USAGE);
    }
    if !changes.is_empty() && cli.print {
        eprintln!("setfflags: -p cannot be combined with flag options");
        return ExitCode::from(exit::USAGE);
    }

    let mut store = XattrStore;
    let mut tally = Tally::new();
    for path in &cli.files {
        let outcome = if cli.print {
            print_flags(&mut store, path)
        } else {
            set_flags(&mut store, path, &changes)
        };
        match outcome {
            Ok(code) => tally.record(code),
            Err(err) => {
                eprintln!("setfflags: {err}");
                tally.fail(&err);
            }
        }
    }
    tally.finish()
}

fn print_flags(store: &mut XattrStore, path: &PathBuf) -> Result<u8> {
    let mut item = Item::new(store, path);
    let folder = item.is_folder()?;
    let flags = item.finder_data()?.flags();

    println!("File: {}", path.display());
    println!("Flags:");
    for (flag, name, folder_ok) in SETTABLE_FLAGS {
        if folder && !folder_ok {
            continue;
        }
        let state = if flags.contains(flag) { "On" } else { "Off" };
        println!("{name:>22} - {state}");
    }
    println!();
    Ok(exit::OK)
}

fn set_flags(
    store: &mut XattrStore,
    path: &PathBuf,
    changes: &[(FinderFlags, &'static str, bool, bool)],
) -> Result<u8> {
    let mut item = Item::new(store, path);
    let folder = item.is_folder()?;
    let mut data = item.finder_data()?;
    let mut flags = data.flags();

    for &(flag, name, folder_ok, value) in changes {
        if folder && !folder_ok {
            eprintln!("setfflags: unsupported flag {name} for {}", path.display());
            return Ok(exit::USAGE);
        }
        flags.set(flag, value);
    }

    if flags != data.flags() {
        data.set_flags(flags);
        item.set_finder_data(&data)?;
    }
    Ok(exit::OK)
}
