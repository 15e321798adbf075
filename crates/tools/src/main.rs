use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use champ_core::{
    Encounter, EncounterEvent, Point, SandboxWorld, SaveFile, SkullDisplay, WorldHost,
};
use clap::Parser;
use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};
use tools::{choose, init_tracing, load_config};
use tracing::info;

/// Run one champion spawn against the in-memory world with a steady kill rate.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML engine config; defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Override the configured spawn type
    #[arg(long)]
    spawn_type: Option<String>,
    /// Simulated seconds to run
    #[arg(short, long, default_value_t = 1800)]
    seconds: u64,
    /// Creatures killed per simulated second
    #[arg(short, long, default_value_t = 1)]
    kill_rate: usize,
    /// Seed for the kill driver
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Write the final state to this save file
    #[arg(long)]
    save: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut config = load_config(args.config.as_deref())?;
    if let Some(spawn_type) = args.spawn_type {
        config.spawn_type = spawn_type;
        config.validate().context("Invalid spawn type override")?;
    }

    let mut world = SandboxWorld::new();
    let mut encounter = Encounter::new("simulated", Point::new(0, 0, 0), &config);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    encounter.set_running(&mut world, true);

    for _ in 0..args.seconds {
        for _ in 0..args.kill_rate {
            let active = encounter.ledger().active().to_vec();
            if active.is_empty() {
                break;
            }
            world.kill(choose(&mut rng, &active));
        }
        world.advance(Duration::from_secs(1));
        encounter.poll(&mut world);
    }

    let progress = encounter.progress();
    let skulls = SkullDisplay::from_progress(&progress);
    let defeats = encounter
        .log()
        .iter()
        .filter(|event| matches!(event, EncounterEvent::ChampionDefeated))
        .count();
    info!(seconds = args.seconds, created = world.created(), "simulation finished");

    println!("Simulation complete.");
    println!("Spawn Type: {}", encounter.table().spawn_type);
    println!("Tier: {} of {}", progress.tier_index + 1, progress.tier_count);
    println!("Kills: {} / {} ({:.0}%)", progress.kills, progress.quota, progress.percent());
    println!("Running: {}", progress.running);
    println!("Champions Defeated: {defeats}");
    println!(
        "Skulls: {} major, {} minor, hue {:#06x}",
        skulls.lit_major, skulls.lit_minor, skulls.altar_hue
    );
    println!("Living Creatures: {}", world.living());
    if let Some(fault) = encounter.spawn_fault() {
        println!("Spawn Fault: {fault}");
    }
    println!("Snapshot Hash: {}", encounter.snapshot_hash());

    if let Some(path) = args.save {
        let now = world.now();
        SaveFile::new(now, vec![encounter.save(now)])
            .write_atomic(&path)
            .with_context(|| format!("Failed to write save file: {}", path.display()))?;
        println!("Saved to {}", path.display());
    }

    Ok(())
}
