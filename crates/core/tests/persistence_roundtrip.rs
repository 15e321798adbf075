use std::fs;
use std::time::Duration;

use champ_core::catalog::keys;
use champ_core::{
    Encounter, EncounterId, EngineConfig, Point, SandboxWorld, SaveFile, SaveFileError, Shard,
    WorldHost,
};
use tempfile::tempdir;

fn config(spawn_type: &str, rng_seed: u64) -> EngineConfig {
    EngineConfig { spawn_type: spawn_type.to_string(), rng_seed, ..EngineConfig::default() }
}

fn busy_shard(world: &mut SandboxWorld) -> (Shard, Vec<EncounterId>) {
    let mut shard = Shard::new();
    let ids = vec![
        shard.add(Encounter::new("crypt", Point::new(0, 0, 0), &config(keys::UNDEAD, 1))),
        shard.add(Encounter::new("nest", Point::new(400, 0, 0), &config(keys::ARACHNID, 2))),
        shard.add(Encounter::new("pit", Point::new(800, 0, 0), &config(keys::ABYSS, 3))),
    ];
    for id in &ids[..2] {
        shard.get_mut(*id).expect("registered").set_running(world, true);
    }
    for _ in 0..90 {
        for id in &ids {
            let ledger = shard.get(*id).expect("registered").ledger();
            if let Some(victim) = ledger.active().first().copied() {
                world.kill(victim);
            }
        }
        world.advance(Duration::from_secs(1));
        shard.pulse(world);
    }
    (shard, ids)
}

#[test]
fn test_shard_survives_a_save_file_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("champions.json");
    let mut world = SandboxWorld::new();
    let (shard, ids) = busy_shard(&mut world);

    let now = world.now();
    let saves = ids.iter().map(|id| shard.get(*id).expect("registered").save(now)).collect();
    SaveFile::new(now, saves).write_atomic(&path).unwrap();

    let loaded = SaveFile::load(&path).unwrap();
    assert_eq!(loaded.saved_at, now);
    assert_eq!(loaded.encounters.len(), ids.len());

    for (id, save) in ids.iter().zip(loaded.encounters) {
        let original = shard.get(*id).expect("registered");
        let restored = Encounter::restore(save, now).unwrap();
        assert_eq!(restored.name(), original.name());
        assert_eq!(restored.tier_index(), original.tier_index());
        assert_eq!(restored.kills(), original.kills());
        assert_eq!(restored.is_running(), original.is_running());
        assert_eq!(
            restored.expire_at().remaining_from(now),
            original.expire_at().remaining_from(now)
        );
        assert_eq!(restored.restart_at(), original.restart_at());
        assert_eq!(restored.ledger(), original.ledger());
    }
}

#[test]
fn test_restored_shard_keeps_ticking_after_downtime() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("champions.json");
    let mut world = SandboxWorld::new();
    let (shard, ids) = busy_shard(&mut world);
    let saved_at = world.now();
    let saves = ids.iter().map(|id| shard.get(*id).expect("registered").save(saved_at)).collect();
    SaveFile::new(saved_at, saves).write_atomic(&path).unwrap();

    world.advance(Duration::from_secs(6 * 3600));
    let resumed_at = world.now();
    let mut restored = Shard::new();
    for save in SaveFile::load(&path).unwrap().encounters {
        let remaining = save.expire_in;
        let encounter = Encounter::restore(save, resumed_at).unwrap();
        assert_eq!(encounter.expire_at(), resumed_at.saturating_add(remaining));
        restored.add(encounter);
    }

    for _ in 0..30 {
        world.advance(Duration::from_secs(1));
        restored.pulse(&mut world);
    }
    let running = restored.iter().filter(|(_, encounter)| encounter.is_running()).count();
    assert_eq!(running, 2);
    for (_, encounter) in restored.iter() {
        if encounter.is_running() {
            assert!(encounter.ledger().population() > 0);
        }
    }
}

#[test]
fn test_corrupted_save_file_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("champions.json");
    fs::write(&path, "{ not json").unwrap();
    assert!(matches!(SaveFile::load(&path), Err(SaveFileError::Json(_))));
}
