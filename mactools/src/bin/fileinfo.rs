// mactools/src/bin/fileinfo.rs

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use mactools::exit::Tally;
use macmeta::util::{SizeFormat, format_timestamp};
use macmeta::{Item, ItemKind, Result, XattrStore, alias, kind};

#[derive(Parser)]
#[command(name = "fileinfo", version, about = "List Finder metadata of files")]
struct Cli {
    /// Files to describe
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut store = XattrStore;
    let mut tally = Tally::new();
    for (i, path) in cli.files.iter().enumerate() {
        if i > 0 {
            println!();
        }
        if let Err(err) = print_info(&mut store, path) {
            eprintln!("fileinfo: {err}");
            tally.fail(&err);
        }
    }
    tally.finish()
}

fn print_info(store: &mut XattrStore, path: &Path) -> Result {
    let mut item = Item::new(store, path);
    let item_kind = item.kind()?;
    let data = item.finder_data()?;
    let sizes = item.fork_sizes()?;
    let stamps = item.timestamps()?;
    let mode = item.mode()?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());
    let kind_str = kind::kind_string(item_kind, &data);

    println!("     Name: \"{name}\"");
    println!("     Path: \"{}\"", path.display());
    match link_target(&mut item, item_kind) {
        Some(target) => println!("     Kind:  {kind_str} --> \"{}\"", target.display()),
        None => println!("     Kind:  {kind_str}"),
    }
    // Human-readable size reflects what the item occupies on disk; the
    // exact count is the logical length.
    println!(
        "     Size: {} ({} bytes)",
        SizeFormat::Human.format(sizes.total_physical()).trim_start(),
        sizes.total_logical()
    );
    println!(
        "    Forks:  Data ({} bytes), Resource ({} bytes)",
        sizes.data_logical, sizes.rsrc_logical
    );
    println!();

    println!("     Type: \"{}\"", data.file_type().unwrap_or_default());
    println!("  Creator: \"{}\"", data.file_creator().unwrap_or_default());
    println!("    Label:  {}", data.label().name());
    let flag_names = data.flags().describe();
    if flag_names.is_empty() {
        println!("    Flags:  None");
    } else {
        println!("    Flags:  {}", flag_names.join(" "));
    }
    println!();

    println!("  Created:  {}", format_timestamp(stamps.created));
    println!(" Modified:  {}", format_timestamp(stamps.modified));
    println!(" Accessed:  {}", format_timestamp(stamps.accessed));
    println!("Attr. Mod:  {}", format_timestamp(stamps.changed));
    println!();

    println!("           Read Write Exec");
    println!(
        "    Owner:  [{}]  [{}]  [{}]",
        perm(mode, 0o400),
        perm(mode, 0o200),
        perm(mode, 0o100)
    );
    println!(
        "    Group:  [{}]  [{}]  [{}]",
        perm(mode, 0o040),
        perm(mode, 0o020),
        perm(mode, 0o010)
    );
    println!(
        "   Others:  [{}]  [{}]  [{}]",
        perm(mode, 0o004),
        perm(mode, 0o002),
        perm(mode, 0o001)
    );
    Ok(())
}

fn link_target(item: &mut Item<'_, XattrStore>, item_kind: ItemKind) -> Option<PathBuf> {
    match item_kind {
        ItemKind::Symlink => std::fs::read_link(item.path()).ok(),
        _ => alias::resolve(item).ok(),
    }
}

fn perm(mode: u32, bit: u32) -> char {
    if mode & bit != 0 { '*' } else { ' ' }
}
