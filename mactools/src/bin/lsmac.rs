// mactools/src/bin/lsmac.rs

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use mactools::exit::Tally;
use mactools::output::label_color;
use macmeta::util::{SizeFormat, folder_placeholder};
use macmeta::{FinderFlags, ForkSelect, Item, MetaError, Result, XattrStore, alias};

#[derive(Parser)]
#[command(name = "lsmac", version, about = "ls-like listing of classic Mac file metadata")]
struct Cli {
    /// List entries whose names start with a dot
    #[arg(short = 'a')]
    all: bool,

    /// List folders only
    #[arg(short = 'F')]
    folders_only: bool,

    /// Omit folders (folder aliases are still listed)
    #[arg(short = 'o')]
    omit_folders: bool,

    /// Print full paths instead of names
    #[arg(short = 'p')]
    full_path: bool,

    /// Report physical instead of logical sizes
    #[arg(short = 'l')]
    physical: bool,

    /// Report sizes as exact byte counts
    #[arg(short = 'b')]
    bytes: bool,

    /// Quote names
    #[arg(short = 'Q')]
    quote: bool,

    /// Prepend the label name to every line
    #[arg(short = 'L')]
    label: bool,

    /// Which fork the size column covers: data, rsrc or both
    #[arg(short = 'f', value_name = "fork", default_value = "both")]
    fork: ForkSelect,

    /// Recurse into subfolders
    #[arg(short = 'R')]
    recursive: bool,

    /// Folders to list
    dirs: Vec<PathBuf>,
}

impl Cli {
    fn size_format(&self) -> SizeFormat {
        if self.bytes {
            SizeFormat::Bytes
        } else {
            SizeFormat::Human
        }
    }

    fn quote_char(&self) -> char {
        if self.quote { '"' } else { ' ' }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let dirs = if cli.dirs.is_empty() {
        match std::env::current_dir() {
            Ok(cwd) => vec![cwd],
            Err(err) => {
                eprintln!("lsmac: cannot get working directory: {err}");
                return ExitCode::from(mactools::exit::IOERR);
            }
        }
    } else {
        cli.dirs.clone()
    };
    let headers = dirs.len() > 1 || cli.recursive;

    let mut store = XattrStore;
    let mut tally = Tally::new();
    let mut queue: Vec<PathBuf> = dirs;
    let mut first = true;
    while !queue.is_empty() {
        let dir = queue.remove(0);
        if !first {
            println!();
        }
        first = false;
        if headers {
            println!("{}:", dir.display());
        }
        match list_directory(&mut store, &dir, &cli, &mut tally) {
            Ok(subdirs) => {
                if cli.recursive {
                    // Depth-first: walk into this folder's children before
                    // any sibling already queued.
                    for (i, sub) in subdirs.into_iter().enumerate() {
                        queue.insert(i, sub);
                    }
                }
            }
            Err(err) => {
                eprintln!("lsmac: {err}");
                tally.fail(&err);
            }
        }
    }
    tally.finish()
}

fn list_directory(
    store: &mut XattrStore,
    dir: &Path,
    cli: &Cli,
    tally: &mut Tally,
) -> Result<Vec<PathBuf>> {
    let reader = std::fs::read_dir(dir).map_err(|e| MetaError::io(dir, e))?;
    let mut entries: Vec<(String, PathBuf)> = Vec::new();
    for entry in reader {
        let entry = entry.map_err(|e| MetaError::io(dir, e))?;
        entries.push((entry.file_name().to_string_lossy().into_owned(), entry.path()));
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    let mut total: u64 = 0;
    let mut subdirs: Vec<PathBuf> = Vec::new();
    for (name, path) in &entries {
        if name.starts_with('.') && !cli.all {
            continue;
        }
        let meta = match std::fs::symlink_metadata(path) {
            Ok(meta) => meta,
            Err(err) => {
                let err = MetaError::io(path, err);
                eprintln!("lsmac: {err}");
                tally.fail(&err);
                continue;
            }
        };
        let is_folder = !meta.is_symlink() && meta.is_dir();

        let listed = if is_folder {
            subdirs.push(path.clone());
            if cli.omit_folders {
                continue;
            }
            list_folder(store, path, name, cli)
        } else {
            if cli.folders_only {
                continue;
            }
            list_file(store, path, name, cli).map(|size| total += size)
        };
        if let Err(err) = listed {
            eprintln!("lsmac: {err}");
            tally.fail(&err);
        }
    }

    let total_str = cli.size_format().format(total);
    println!("{}", "-".repeat(46));
    println!("{total_str} Total Size of Files in Folder");
    Ok(subdirs)
}

fn label_column<S: macmeta::MetaStore>(item: &mut Item<'_, S>, cli: &Cli) -> Result<String> {
    if !cli.label {
        return Ok(String::new());
    }
    let label = item.finder_data()?.label();
    let padded = format!("{:<7}", label.name());
    Ok(format!("{} ", label_color(label, &padded)))
}

fn list_folder(store: &mut XattrStore, path: &Path, name: &str, cli: &Cli) -> Result {
    let mut item = Item::new(store, path);
    let count = item.entry_count()?.min(9999);
    let flags = item.finder_data()?.flags();
    let label = label_column(&mut item, cli)?;

    let size = folder_placeholder(cli.size_format());
    let q = cli.quote_char();
    let shown = if cli.full_path {
        path.display().to_string()
    } else {
        name.to_string()
    };
    println!(
        "{label}{} {count:>4} items     {size} {q}{shown}/{q}",
        flags.short_string()
    );
    Ok(())
}

/// Prints one file line and returns its contribution to the folder total.
fn list_file(store: &mut XattrStore, path: &Path, name: &str, cli: &Cli) -> Result<u64> {
    let mut item = Item::new(store, path);
    let data = item.finder_data()?;
    let sizes = item.fork_sizes()?;
    let label = label_column(&mut item, cli)?;

    let shown_size = if cli.physical {
        sizes.physical(cli.fork)
    } else {
        sizes.logical(cli.fork)
    };
    let size_str = cli.size_format().format(shown_size);
    let q = cli.quote_char();
    let shown = if cli.full_path {
        path.display().to_string()
    } else {
        name.to_string()
    };
    let line = format!(
        "{label}{}  {:>4} {:>4}  {size_str} {q}{shown}{q}",
        data.flags().short_string(),
        data.file_type().unwrap_or_default().to_string(),
        data.file_creator().unwrap_or_default().to_string(),
    );

    let target = if std::fs::symlink_metadata(path)
        .map(|m| m.is_symlink())
        .unwrap_or(false)
    {
        std::fs::read_link(path).ok()
    } else if data.flags().contains(FinderFlags::IS_ALIAS) {
        alias::resolve(&mut item).ok()
    } else {
        None
    };
    match target {
        Some(target) => println!("{line}-->{q}{}{q}", target.display()),
        None => println!("{line}"),
    }
    Ok(sizes.logical(cli.fork))
}
