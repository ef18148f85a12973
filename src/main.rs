//! Blueprint Store - Entry Point
//!
//! Builds a store from configuration and prints its contents as JSON.
//! The store only lives for this process, so the binary is a read-only
//! inspector: seed files are the way to add records.

use blueprint_store::blueprints::{Blueprint, BlueprintPersistence, InMemoryBlueprintStore};
use blueprint_store::core::config::StoreConfig;
use blueprint_store::core::error::Result;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Inspect an in-memory blueprint store
#[derive(Parser, Debug)]
#[command(name = "blueprint-store")]
#[command(about = "Inspect an in-memory blueprint store built from seed data")]
struct Args {
    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Extra seed file or directory (repeatable, appended to the config's list)
    #[arg(long = "seed")]
    seeds: Vec<PathBuf>,

    /// Skip the built-in sample blueprints
    #[arg(long)]
    no_default_seed: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// All blueprints, sorted by author then name
    List,
    /// One blueprint by author and name
    Get { author: String, name: String },
    /// Every blueprint by one author
    Author { author: String },
    /// Distinct authors
    Authors,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => StoreConfig::load(path)?,
        None => StoreConfig::default(),
    };
    config.seed_paths.extend(args.seeds.iter().cloned());
    if args.no_default_seed {
        config.seed_defaults = false;
    }

    init_tracing(&config);

    let store = InMemoryBlueprintStore::from_config(&config)?;

    match args.command {
        Command::List => print_json(&sorted(store.get_all()))?,
        Command::Get { author, name } => print_json(&store.get(&author, &name)?)?,
        Command::Author { author } => print_json(&sorted(store.get_by_author(&author)?))?,
        Command::Authors => print_json(&store.authors())?,
    }

    Ok(())
}

/// `RUST_LOG` wins over the configured filter; logs go to stderr
fn init_tracing(config: &StoreConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn sorted(blueprints: impl IntoIterator<Item = Blueprint>) -> Vec<Blueprint> {
    let mut list: Vec<Blueprint> = blueprints.into_iter().collect();
    list.sort_by(|a, b| (a.author(), a.name()).cmp(&(b.author(), b.name())));
    list
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
