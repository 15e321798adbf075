//! Shared fixtures for the encounter test suites.

use super::*;
use crate::sandbox::SandboxWorld;

pub(super) const ORIGIN: Point = Point::new(1000, 1000, 0);
pub(super) const EXPIRE: Duration = Duration::from_secs(60);
pub(super) const TICK: Duration = Duration::from_secs(1);

/// A tier with no spawn delay so every heartbeat may top up.
pub(super) fn tier(monsters: &[&str], quota: u32, cap: u32, batch: u32) -> LevelDefinition {
    LevelDefinition::new(monsters)
        .with_limits(quota, cap, batch)
        .with_radius(6)
        .with_delays(Duration::ZERO, EXPIRE)
}

pub(super) fn start(table: LevelTable) -> (Encounter, SandboxWorld) {
    start_with(table, &EngineConfig::default())
}

pub(super) fn start_with(table: LevelTable, config: &EngineConfig) -> (Encounter, SandboxWorld) {
    let mut world = SandboxWorld::new();
    let mut encounter = Encounter::with_table("test spawn", ORIGIN, table, config);
    encounter.set_running(&mut world, true);
    (encounter, world)
}

pub(super) fn step(encounter: &mut Encounter, world: &mut SandboxWorld, elapsed: Duration) {
    world.advance(elapsed);
    encounter.on_heartbeat(world);
}

pub(super) fn kill_active(encounter: &Encounter, world: &mut SandboxWorld, count: usize) -> usize {
    let victims: Vec<CreatureId> =
        encounter.ledger().active().iter().take(count).copied().collect();
    world.kill_all(&victims)
}

pub(super) fn spawned_events(encounter: &Encounter) -> usize {
    encounter.log().iter().filter(|event| matches!(event, EncounterEvent::Spawned { .. })).count()
}

pub(super) fn last_retreat(encounter: &Encounter) -> Option<RetreatKind> {
    encounter.log().iter().rev().find_map(|event| match event {
        EncounterEvent::LevelRetreated { kind, .. } => Some(*kind),
        _ => None,
    })
}
