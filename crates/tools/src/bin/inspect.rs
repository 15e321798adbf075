use std::path::PathBuf;

use anyhow::{Context, Result};
use champ_core::{Encounter, SaveFile, SkullDisplay};
use clap::Parser;
use tools::init_tracing;

/// Print the encounters stored in a save file.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the save file
    #[arg(short, long)]
    save: PathBuf,
    /// Also dump each record as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let file = SaveFile::load(&args.save)
        .with_context(|| format!("Failed to load save file: {}", args.save.display()))?;
    println!("Saved At: {} ms", file.saved_at.as_millis());
    println!("Encounters: {}", file.encounters.len());

    for save in file.encounters {
        if args.json {
            println!("{}", serde_json::to_string_pretty(&save)?);
        }
        let restart_in = save.restart_in;
        let encounter = Encounter::restore(save, file.saved_at)
            .context("Failed to restore encounter record")?;
        let progress = encounter.progress();
        let skulls = SkullDisplay::from_progress(&progress);

        println!();
        println!("[{}] {}", encounter.name(), encounter.table().spawn_type);
        println!("  Tier: {} of {}", progress.tier_index + 1, progress.tier_count);
        println!("  Kills: {} / {}", progress.kills, progress.quota);
        println!("  Running: {}", progress.running);
        println!(
            "  Population: {} active, {} carryover",
            encounter.ledger().active().len(),
            encounter.ledger().carryover().len()
        );
        println!("  Expires In: {:?}", encounter.expire_at().remaining_from(file.saved_at));
        if let Some(remaining) = restart_in {
            println!("  Restart In: {remaining:?}");
        }
        println!("  Skulls: {} major, {} minor", skulls.lit_major, skulls.lit_minor);
        if let Some(fault) = encounter.spawn_fault() {
            println!("  Spawn Fault: {fault}");
        }
    }

    Ok(())
}
