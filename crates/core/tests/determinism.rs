use std::time::Duration;

use champ_core::{Encounter, EncounterEvent, EngineConfig, Point, SandboxWorld};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

struct Trace {
    snapshot_hash: u64,
    spawned_types: Vec<String>,
    log_len: usize,
}

fn run_trace(rng_seed: u64, kill_seed: u64, seconds: u64) -> Trace {
    let config = EngineConfig { rng_seed, ..EngineConfig::default() };
    let mut world = SandboxWorld::new();
    let mut encounter = Encounter::new("crypt", Point::new(0, 0, 0), &config);
    let mut killer = ChaCha8Rng::seed_from_u64(kill_seed);
    encounter.set_running(&mut world, true);

    for _ in 0..seconds {
        let active = encounter.ledger().active().to_vec();
        if !active.is_empty() {
            let victim = active[killer.next_u64() as usize % active.len()];
            world.kill(victim);
        }
        world.advance(Duration::from_secs(1));
        encounter.poll(&mut world);
    }

    let spawned_types = encounter
        .log()
        .iter()
        .filter_map(|event| match event {
            EncounterEvent::Spawned { type_name, .. } => Some(type_name.clone()),
            _ => None,
        })
        .collect();
    Trace { snapshot_hash: encounter.snapshot_hash(), spawned_types, log_len: encounter.log().len() }
}

#[test]
fn test_determinism_identical_seeds_produce_same_hash() {
    let first = run_trace(12345, 7, 400);
    let second = run_trace(12345, 7, 400);

    assert_eq!(
        first.snapshot_hash, second.snapshot_hash,
        "Identical runs must produce identical hashes"
    );
    assert_eq!(first.spawned_types, second.spawned_types);
    assert_eq!(first.log_len, second.log_len);
}

#[test]
fn test_determinism_different_seeds_pick_different_creatures() {
    let first = run_trace(123, 7, 200);
    let second = run_trace(456, 7, 200);

    let prefix = first.spawned_types.len().min(second.spawned_types.len()).min(40);
    assert!(prefix >= 20, "expected a steady stream of spawns");
    assert_ne!(
        first.spawned_types[..prefix],
        second.spawned_types[..prefix],
        "different seeds should pick different creature sequences"
    );
}
