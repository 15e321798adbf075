use std::time::Duration;

use anyhow::{Result, bail};
use champ_core::catalog::spawn_type_names;
use champ_core::{Encounter, EngineConfig, Point, SandboxWorld};
use clap::Parser;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tools::{choose, init_tracing};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short = 't', long, default_value_t = 3600)]
    seconds: u32,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    println!("Starting Fuzz harness on seed {} for {} simulated seconds...", args.seed, args.seconds);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let config = EngineConfig {
        spawn_type: choose(&mut rng, &spawn_type_names()).to_string(),
        level_scale: choose(&mut rng, &[0.5, 1.0, 2.0]),
        restart_delay_secs: Some(30),
        rng_seed: args.seed,
        ..EngineConfig::default()
    };
    let mut world = SandboxWorld::new();
    let mut encounter = Encounter::new("fuzz", Point::new(0, 0, 0), &config);
    encounter.set_running(&mut world, true);

    for second in 0..args.seconds {
        match rng.next_u64() % 50 {
            0 => world.block_placement(true),
            1 => world.block_placement(false),
            2 => {
                // Flap the factory for a random roster member
                let roster = &encounter.current_level().monsters;
                if !roster.is_empty() {
                    world.fail_type(&choose(&mut rng, roster));
                }
            }
            3 => world.clear_failures(),
            4 => {
                let running = encounter.is_running();
                encounter.set_running(&mut world, !running);
            }
            _ => {}
        }

        let active = encounter.ledger().active().to_vec();
        for _ in 0..(rng.next_u64() % 4) {
            if active.is_empty() {
                break;
            }
            world.kill(choose(&mut rng, &active));
        }

        let before = encounter.ledger().population();
        world.advance(Duration::from_secs(1));
        encounter.poll(&mut world);

        // Assert invariants
        if encounter.tier_index() >= encounter.tier_count() {
            bail!("Invariant failed: tier out of range at second {second}");
        }
        if encounter.kills() > encounter.effective_quota() {
            bail!("Invariant failed: kills above quota at second {second}");
        }
        let population = encounter.ledger().population();
        if population > before && population > encounter.effective_cap() as usize {
            bail!("Invariant failed: population grew past cap at second {second}");
        }
    }

    println!(
        "Fuzzing completed successfully: {} events, final tier {} of {}.",
        encounter.log().len(),
        encounter.tier_index() + 1,
        encounter.tier_count()
    );
    Ok(())
}
