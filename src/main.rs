//! Aberred Controls inspector.
//!
//! Loads designer-facing control tables (JSON) and the controls configuration
//! (INI), builds the controls and prints what each one aggregates to. Useful
//! for checking level data without starting the game.
//!
//! # Running
//!
//! ```sh
//! cargo run -- --config controls.ini --bools can_move.json --priorities camera.json --long
//! ```

use aberredcontrols::components::boolcontrol::BoolControl;
use aberredcontrols::components::controlkey::ControlKey;
use aberredcontrols::components::intcontrol::IntControl;
use aberredcontrols::components::prioritycontrol::{PriorityControl, PriorityEntry};
use aberredcontrols::resources::controlsconfig::ControlsConfig;
use aberredcontrols::resources::controltable::ControlTable;
use clap::Parser;
use std::path::{Path, PathBuf};

/// Aberred Controls inspector
#[derive(Parser)]
#[command(version, about = "Prints the aggregate of designer-defined control tables.")]
struct Cli {
    /// INI file with control defaults. Missing file means built-in defaults.
    #[arg(long, value_name = "PATH", default_value = "./controls.ini")]
    config: PathBuf,

    /// JSON table of boolean votes.
    #[arg(long, value_name = "PATH")]
    bools: Option<PathBuf>,

    /// JSON table of named integer votes.
    #[arg(long, value_name = "PATH")]
    ints: Option<PathBuf>,

    /// JSON table of prioritized text payloads.
    #[arg(long, value_name = "PATH")]
    priorities: Option<PathBuf>,

    /// Print every entry, not only the aggregate.
    #[arg(long)]
    long: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = ControlsConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        log::warn!("{}, using defaults", e);
    }

    if let Some(path) = &cli.bools {
        let table = load_or_exit::<ControlKey, bool>(path);
        let mut control = config.bool_control();
        control.apply_table(&table);
        print_bools(path, &control, cli.long);
    }

    if let Some(path) = &cli.ints {
        let table = load_or_exit::<String, i32>(path);
        let mut control = config.int_control();
        control.apply_table(&table);
        print_ints(path, &control, cli.long);
    }

    if let Some(path) = &cli.priorities {
        let table = load_or_exit::<ControlKey, PriorityEntry<String>>(path);
        let mut control: PriorityControl<String> = config.priority_control();
        control.apply_table(&table);
        print_priorities(path, &control, cli.long);
    }

    if cli.bools.is_none() && cli.ints.is_none() && cli.priorities.is_none() {
        log::info!("Nothing to inspect, pass --bools, --ints or --priorities");
    }
}

fn load_or_exit<K, V>(path: &Path) -> ControlTable<K, V>
where
    K: for<'de> serde::Deserialize<'de> + serde::Serialize,
    V: for<'de> serde::Deserialize<'de> + serde::Serialize,
{
    match ControlTable::load_from_file(path) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("Error loading {}: {e}", path.display());
            std::process::exit(1);
        }
    }
}

fn print_bools(path: &Path, control: &BoolControl, long: bool) {
    if long {
        print!("{}: {}", path.display(), control.describe());
    } else {
        println!("{}: {}", path.display(), control);
    }
}

fn print_ints(path: &Path, control: &IntControl, long: bool) {
    match control.try_aggregate() {
        Some(value) => println!("{}: IntControl ({:?}) -> {}", path.display(), control.mode(), value),
        None => println!("{}: IntControl ({:?}) -> no votes", path.display(), control.mode()),
    }
    if long {
        for (key, value) in control.iter() {
            println!("{}> {}", key, value);
        }
    }
}

fn print_priorities(path: &Path, control: &PriorityControl<String>, long: bool) {
    match control.winner() {
        Some((key, entry)) => println!(
            "{}: PriorityControl -> {} (\"{}\" from {} at priority {})",
            path.display(),
            !control.avoid_true(),
            entry.payload,
            key,
            entry.priority
        ),
        None => println!(
            "{}: PriorityControl -> {} (nothing qualifies)",
            path.display(),
            control.avoid_true()
        ),
    }
    if long {
        for (key, entry) in control.iter() {
            println!(
                "{}> active={} priority={} payload=\"{}\"",
                key, entry.active, entry.priority, entry.payload
            );
        }
    }
}
