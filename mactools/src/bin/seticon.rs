// mactools/src/bin/seticon.rs

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use mactools::exit::{self, Tally};
use mactools::output::set_silent;
use mactools::status;
use macmeta::rsrc::{CUSTOM_ICON_ID, Resource, ResourceFork};
use macmeta::{FinderFlags, Item, OsType, XattrStore};

#[derive(Parser)]
#[command(
    name = "seticon",
    version,
    about = "Set or remove the custom icon of files",
    after_help = "Without -r the first argument is an icon family (.icns) file."
)]
struct Cli {
    /// Silent mode
    #[arg(short = 's')]
    silent: bool,

    /// Remove the custom icon instead of setting one
    #[arg(short = 'r')]
    remove: bool,

    /// Icon file followed by targets, or just targets with -r
    #[arg(required = true)]
    args: Vec<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    set_silent(cli.silent);

    let (icon, targets): (Option<Vec<u8>>, &[PathBuf]) = if cli.remove {
        (None, &cli.args)
    } else {
        if cli.args.len() < 2 {
            eprintln!("seticon: an icon file and at least one target are required");
            return ExitCode::from(exit::USAGE);
        }
        match read_icon(&cli.args[0]) {
            Ok(data) => (Some(data), &cli.args[1..]),
            Err(err) => {
                eprintln!("seticon: {err:#}");
                return ExitCode::from(exit::code_for_any(&err));
            }
        }
    };

    let mut store = XattrStore;
    let mut tally = Tally::new();
    for path in targets {
        let outcome = match &icon {
            Some(data) => apply_icon(&mut store, path, data),
            None => remove_icon(&mut store, path),
        };
        if let Err(err) = outcome {
            eprintln!("seticon: {err:#}");
            tally.fail_any(&err);
        }
    }
    tally.finish()
}

fn read_icon(path: &Path) -> anyhow::Result<Vec<u8>> {
    let data = std::fs::read(path)
        .with_context(|| format!("{}: cannot read icon file", path.display()))?;
    // Icon family files start with their own type code.
    if data.len() < 8 || &data[..4] != b"icns" {
        anyhow::bail!("{}: not an icon family file", path.display());
    }
    Ok(data)
}

fn apply_icon(store: &mut XattrStore, path: &Path, icon: &[u8]) -> anyhow::Result<()> {
    let mut item = Item::new(store, path);

    let mut fork = match item.resource_fork()? {
        Some(bytes) => ResourceFork::parse(&bytes)?,
        None => ResourceFork::new(),
    };
    fork.push(Resource::new(
        OsType::ICON_FAMILY,
        CUSTOM_ICON_ID,
        icon.to_vec(),
    ));
    item.set_resource_fork(&fork.build()?)?;

    let mut data = item.finder_data()?;
    data.set_flags(data.flags() | FinderFlags::HAS_CUSTOM_ICON);
    item.set_finder_data(&data)?;

    status!("Custom icon set for {}", path.display());
    Ok(())
}

fn remove_icon(store: &mut XattrStore, path: &Path) -> anyhow::Result<()> {
    let mut item = Item::new(store, path);

    if let Some(bytes) = item.resource_fork()? {
        let mut fork = ResourceFork::parse(&bytes)?;
        if fork.remove(OsType::ICON_FAMILY, CUSTOM_ICON_ID) {
            if fork.is_empty() {
                item.remove_resource_fork()?;
            } else {
                item.set_resource_fork(&fork.build()?)?;
            }
        }
    }

    let mut data = item.finder_data()?;
    if data.flags().contains(FinderFlags::HAS_CUSTOM_ICON) {
        data.set_flags(data.flags() - FinderFlags::HAS_CUSTOM_ICON);
        item.set_finder_data(&data)?;
    }

    status!("Custom icon removed from {}", path.display());
    Ok(())
}
