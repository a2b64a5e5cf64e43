// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ElemID - number doors, windows and zones of a project snapshot.
//!
//! Loads a JSON snapshot, runs one numbering batch, writes the snapshot back
//! and prints the `(element, value)` pairs sorted by value.
//!
//! Usage:
//!   elemid <command> <snapshot.json> [--output <path>] [--dry-run]

use anyhow::{bail, Context, Result};
use elemid_core::{MemoryStore, Snapshot};
use elemid_numbering::{
    dimension_zones, number_exterior, number_interior_by_distance, number_interior_by_zone,
    number_zones, NumberingConfig, RunReport,
};
use std::env;
use std::fs;

mod config;

use config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Exterior,
    InteriorDistance,
    InteriorZone,
    Zones,
    Dimensions,
}

impl Command {
    fn parse(name: &str) -> Option<Command> {
        match name {
            "exterior" => Some(Command::Exterior),
            "interior-distance" => Some(Command::InteriorDistance),
            "interior-zone" => Some(Command::InteriorZone),
            "zones" => Some(Command::Zones),
            "dimensions" => Some(Command::Dimensions),
            _ => None,
        }
    }

    fn run(
        self,
        store: &mut MemoryStore,
        config: &NumberingConfig,
    ) -> elemid_core::Result<RunReport> {
        match self {
            Command::Exterior => number_exterior(store, config),
            Command::InteriorDistance => number_interior_by_distance(store, config),
            Command::InteriorZone => number_interior_by_zone(store, config),
            Command::Zones => number_zones(store, config),
            Command::Dimensions => dimension_zones(store, config),
        }
    }
}

struct Args {
    command: Command,
    snapshot: String,
    output: Option<String>,
    dry_run: bool,
}

fn parse_args(args: &[String]) -> Result<Option<Args>> {
    if args.len() < 3 || args[1] == "--help" || args[1] == "-h" {
        return Ok(None);
    }

    let Some(command) = Command::parse(&args[1]) else {
        bail!("unknown command: {}", args[1]);
    };
    let mut parsed = Args {
        command,
        snapshot: args[2].clone(),
        output: None,
        dry_run: false,
    };

    let mut i = 3;
    while i < args.len() {
        match args[i].as_str() {
            "--output" => {
                i += 1;
                let path = args.get(i).context("--output needs a path")?;
                parsed.output = Some(path.clone());
            }
            "--dry-run" => {
                parsed.dry_run = true;
            }
            other => bail!("unknown option: {other}"),
        }
        i += 1;
    }
    Ok(Some(parsed))
}

fn print_usage() {
    println!("Usage: elemid <command> <snapshot.json> [--output <path>] [--dry-run]");
    println!();
    println!("Commands:");
    println!("  exterior           Number exterior doors and windows around the perimeter");
    println!("  interior-distance  Number interior doors by distance from the first door");
    println!("  interior-zone      Label interior doors by their related zone");
    println!("  zones              Number zones by distance from the first zone");
    println!("  dimensions         Write true dimensions of rotated zones");
    println!();
    println!("Environment:");
    println!("  ELEMID_STORIES, ELEMID_STORY_GROUPING_LIMIT,");
    println!("  ELEMID_LABEL_PREFIX, ELEMID_DEFAULT_ZONE");
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            env::var("RUST_LOG").unwrap_or_else(|_| "info,elemid_numbering=debug".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let Some(args) = parse_args(&args)? else {
        print_usage();
        return Ok(());
    };

    let config = Config::from_env();
    tracing::info!(
        command = ?args.command,
        snapshot = %args.snapshot,
        number_of_stories = config.number_of_stories,
        label_prefix = %config.label_prefix,
        "Starting ElemID"
    );

    let json = fs::read_to_string(&args.snapshot)
        .with_context(|| format!("failed to read {}", args.snapshot))?;
    let mut store = Snapshot::from_json(&json)
        .with_context(|| format!("failed to load {}", args.snapshot))?
        .into_store();

    let report = args
        .command
        .run(&mut store, &config.numbering())
        .with_context(|| format!("{:?} run aborted, nothing was written", args.command))?;

    for (element, value) in &report.labels {
        println!("({element}, {value})");
    }
    for (element, err) in &report.skipped {
        eprintln!("skipped {element}: {err}");
    }

    if args.dry_run {
        tracing::info!("Dry run, snapshot not saved");
        return Ok(());
    }

    let output = args.output.as_deref().unwrap_or(&args.snapshot);
    let json = Snapshot::from_store(&store).to_json()?;
    fs::write(output, json).with_context(|| format!("failed to write {output}"))?;
    tracing::info!(output, "Snapshot saved");

    Ok(())
}
