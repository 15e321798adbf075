//! Operator setters and table swaps.

use super::support::*;

use crate::error::ConfigError;

fn two_tiers() -> LevelTable {
    LevelTable::new("Test", vec![tier(&["Zombie"], 10, 4, 2), tier(&["Lich"], 12, 6, 3)])
}

#[test]
fn lowering_the_quota_clamps_banked_kills() {
    let (mut encounter, _world) = start(two_tiers());
    encounter.ledger.kills = 8;

    encounter.set_kill_quota(5);

    assert_eq!(encounter.kills(), 5);
    assert_eq!(encounter.table().levels[0].kill_quota, 5);
    assert_eq!(encounter.table().levels[1].kill_quota, 12);
}

#[test]
fn tier_setters_only_touch_the_current_tier() {
    let (mut encounter, _world) = start(two_tiers());
    encounter.tier_index = 1;

    encounter.set_population_cap(9);
    encounter.set_spawn_batch(5);
    encounter.set_spawn_radius(12);
    encounter.set_spawn_delay(Duration::from_secs(3));
    encounter.set_expire_delay(Duration::from_secs(90));

    let current = &encounter.table().levels[1];
    assert_eq!(
        (current.population_cap, current.spawn_batch, current.spawn_radius),
        (9, 5, 12)
    );
    assert_eq!(current.spawn_delay, Duration::from_secs(3));
    assert_eq!(current.expire_delay, Duration::from_secs(90));
    assert_eq!(encounter.table().levels[0], two_tiers().levels[0]);
}

#[test]
fn level_scale_rejects_non_finite_and_clamps_the_rest() {
    let (mut encounter, _world) = start(two_tiers());

    assert!(!encounter.set_level_scale(f32::NAN));
    assert_eq!(encounter.level_scale(), 1.0);

    assert!(encounter.set_level_scale(2.0));
    assert_eq!(encounter.effective_quota(), 20);
    assert_eq!(encounter.current_level().kill_quota, 10);

    assert!(encounter.set_level_scale(25.0));
    assert_eq!(encounter.level_scale(), 10.0);
}

#[test]
fn shrinking_the_scale_clamps_kills() {
    let (mut encounter, _world) = start(two_tiers());
    encounter.ledger.kills = 8;
    assert!(encounter.set_level_scale(0.5));
    assert_eq!(encounter.kills(), 5);
}

#[test]
fn swapping_spawn_type_restarts_on_the_new_ladder() {
    let (mut encounter, mut world) = start(two_tiers());
    encounter.tier_index = 1;
    let stale = encounter.ledger().active().to_vec();

    encounter.set_spawn_type(&mut world, "abyss").expect("builtin spawn type");

    assert_eq!(encounter.table().spawn_type, keys::ABYSS);
    assert_eq!(encounter.tier_index(), 0);
    assert!(stale.iter().all(|creature| !world.is_alive(*creature)));
    assert!(!encounter.ledger().active().is_empty());
    let roster = &encounter.current_level().monsters;
    for creature in encounter.ledger().active() {
        let entry = world.creature(*creature).expect("alive");
        assert!(roster.contains(&entry.type_name));
    }
}

#[test]
fn unknown_spawn_type_leaves_the_encounter_alone() {
    let (mut encounter, mut world) = start(two_tiers());
    let population = encounter.ledger().clone();

    let result = encounter.set_spawn_type(&mut world, "Pirates");

    assert_eq!(result, Err(ConfigError::UnknownSpawnType("Pirates".into())));
    assert_eq!(encounter.table().spawn_type, "Test");
    assert_eq!(encounter.ledger(), &population);
}

#[test]
fn empty_custom_tables_are_rejected() {
    let (mut encounter, mut world) = start(two_tiers());
    let result = encounter.set_level_table(&mut world, LevelTable::new("Hollow", Vec::new()));
    assert_eq!(result, Err(ConfigError::EmptyLevelTable("Hollow".into())));
    assert_eq!(encounter.tier_count(), 2);
}

#[test]
fn table_swap_on_a_dormant_encounter_does_not_spawn() {
    let mut world = SandboxWorld::new();
    let mut encounter = Encounter::new("crypt", ORIGIN, &EngineConfig::default());

    encounter.set_level_table(&mut world, two_tiers()).expect("non-empty table");

    assert_eq!(world.created(), 0);
    assert_eq!(encounter.tier_count(), 2);
}

#[test]
fn spawn_fault_can_be_cleared_by_hand() {
    let (mut encounter, _world) = start(LevelTable::new("Test", vec![tier(&[], 10, 4, 4)]));
    assert!(encounter.spawn_fault().is_some());
    encounter.clear_spawn_fault();
    assert_eq!(encounter.spawn_fault(), None);
}
