//! Builds a tree from the command line, removes some elements from it and prints what is left.

use clap::Parser;
use parented_bst::{Error, Tree};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Add values to a binary search tree, then remove some of them
#[derive(Parser, Debug)]
#[command(name = "bst-demo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Values to add, in order
    #[arg(
        long,
        value_delimiter = ',',
        allow_hyphen_values = true,
        default_values_t = vec![100, 50, 150, 25, 125, 175, 200, 210]
    )]
    values: Vec<i64>,

    /// Values to remove after adding, in order
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, default_values_t = vec![100])]
    remove: Vec<i64>,

    /// Look up a value after removing; fails if it is gone
    #[arg(long, allow_hyphen_values = true)]
    get: Option<i64>,

    /// Turn debugging information on (-d info, -dd debug, -ddd trace). `RUST_LOG` wins if set
    #[arg(short, long, action = clap::ArgAction::Count)]
    debug: u8,
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Error> {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    let mut tree: Tree<i64> = cli.values.iter().copied().collect();
    info!(size = tree.size(), height = tree.height(), "built tree");

    for value in &cli.remove {
        match tree.remove(value) {
            Some(_) => info!(value, size = tree.size(), "removed"),
            None => warn!(value, "not in tree, nothing removed"),
        }
    }

    let mut contents = Vec::with_capacity(tree.size());
    tree.in_order(|element| contents.push(*element));
    println!("size: {}", tree.size());
    println!("in order: {contents:?}");

    if let Some(value) = cli.get {
        let found = tree.get(&value)?;
        println!("found: {found}");
    }

    Ok(())
}
