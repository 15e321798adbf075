//! One champion spawn point: tier ladder, population ledger, timers.
//! Behaviour is split across focused submodules; this file owns the state and
//! the read-only accessors.

use std::time::Duration;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};
use tracing::{debug, error, info, trace, warn};

use crate::catalog;
use crate::config::{CreatureOverrides, EngineConfig};
use crate::error::SpawnError;
use crate::feedback::Progress;
use crate::host::{CreatureSetup, RewardRange, WorldHost};
use crate::ledger::Ledger;
use crate::levels::{LevelDefinition, LevelTable, sanitize_level_scale};
use crate::timer::OneShot;
use crate::types::*;

mod admin;
mod hash;
mod heartbeat;
mod lifecycle;
mod persist;
mod transition;

#[cfg(test)]
mod test_support;
#[cfg(test)]
mod tests;

pub use persist::{EncounterSave, SAVE_FORMAT_VERSION};

/// Progress strictly above this percentage advances the tier.
pub const ADVANCE_THRESHOLD_PCT: f64 = 90.0;
/// Progress below this percentage at expiry regresses the tier.
pub const RETREAT_THRESHOLD_PCT: f64 = 20.0;

pub struct Encounter {
    name: String,
    origin: Point,
    table: LevelTable,
    level_scale: f32,
    tier_index: usize,
    ledger: Ledger,
    running: bool,
    deleted: bool,
    expire_at: Timestamp,
    next_spawn_at: Timestamp,
    heartbeat: OneShot,
    heartbeat_interval: Duration,
    restart: OneShot,
    restart_delay: Option<Duration>,
    spawn_fault: Option<SpawnError>,
    overrides: CreatureOverrides,
    rng_seed: u64,
    rng: ChaCha8Rng,
    log: Vec<EncounterEvent>,
}

impl Encounter {
    /// Build an inert encounter: tier 0, no kills, no population, not running.
    pub fn new(name: &str, origin: Point, config: &EngineConfig) -> Self {
        let table = catalog::lookup_or_default(&config.spawn_type);
        Self::with_table(name, origin, table, config)
    }

    pub fn with_table(name: &str, origin: Point, table: LevelTable, config: &EngineConfig) -> Self {
        let table = if table.is_empty() {
            warn!(encounter = name, spawn_type = %table.spawn_type, "empty level table, using default");
            catalog::lookup_or_default(&table.spawn_type)
        } else {
            table
        };
        Self {
            name: name.to_string(),
            origin,
            table,
            level_scale: sanitize_level_scale(config.level_scale).unwrap_or(1.0),
            tier_index: 0,
            ledger: Ledger::default(),
            running: false,
            deleted: false,
            expire_at: Timestamp::ZERO,
            next_spawn_at: Timestamp::ZERO,
            heartbeat: OneShot::idle(),
            heartbeat_interval: config.heartbeat_interval(),
            restart: OneShot::idle(),
            restart_delay: config.restart_delay(),
            spawn_fault: None,
            overrides: config.creature.clone(),
            rng_seed: config.rng_seed,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            log: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn table(&self) -> &LevelTable {
        &self.table
    }

    pub fn level_scale(&self) -> f32 {
        self.level_scale
    }

    pub fn tier_index(&self) -> usize {
        self.tier_index
    }

    pub fn tier_count(&self) -> usize {
        self.table.tier_count()
    }

    pub fn is_final_tier(&self) -> bool {
        self.table.is_final(self.tier_index)
    }

    pub fn kills(&self) -> u32 {
        self.ledger.kills
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub fn expire_at(&self) -> Timestamp {
        self.expire_at
    }

    pub fn next_spawn_at(&self) -> Timestamp {
        self.next_spawn_at
    }

    pub fn restart_at(&self) -> Option<Timestamp> {
        self.restart.due()
    }

    pub fn restart_delay(&self) -> Option<Duration> {
        self.restart_delay
    }

    pub fn next_heartbeat_at(&self) -> Option<Timestamp> {
        self.heartbeat.due()
    }

    pub fn spawn_fault(&self) -> Option<&SpawnError> {
        self.spawn_fault.as_ref()
    }

    pub fn log(&self) -> &[EncounterEvent] {
        &self.log
    }

    pub fn current_level(&self) -> &LevelDefinition {
        &self.table.levels[self.tier_index]
    }

    pub fn effective_quota(&self) -> u32 {
        self.current_level().effective_quota(self.level_scale)
    }

    pub fn effective_cap(&self) -> u32 {
        self.current_level().effective_cap(self.level_scale)
    }

    pub fn effective_batch(&self) -> u32 {
        self.current_level().effective_batch(self.level_scale)
    }

    pub fn effective_radius(&self) -> u32 {
        self.current_level().effective_radius(self.level_scale)
    }

    /// Snapshot for the decoration layer. Side-effect free.
    pub fn progress(&self) -> Progress {
        Progress {
            kills: self.ledger.kills,
            quota: self.effective_quota(),
            tier_index: self.tier_index,
            tier_count: self.tier_count(),
            is_final: self.is_final_tier(),
            running: self.running,
            spawn_fault: self.spawn_fault.as_ref().map(ToString::to_string),
        }
    }

    fn progress_percent(&self) -> f64 {
        self.progress().percent()
    }

    fn expire_delay(&self, tier_index: usize) -> Duration {
        self.table.level(tier_index).map_or(Duration::ZERO, |level| level.expire_delay)
    }

    fn random_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "random_index requires a non-empty range");
        (self.rng.next_u64() % len as u64) as usize
    }

    /// Remove every tracked creature from the ledger and the world.
    fn wipe(&mut self, host: &mut dyn WorldHost) -> usize {
        let drained = self.ledger.drain_all();
        for creature in &drained {
            host.remove(*creature);
        }
        if !drained.is_empty() {
            debug!(encounter = %self.name, removed = drained.len(), "wiped population");
        }
        drained.len()
    }

    fn notify(&self, host: &mut dyn WorldHost, severity: Severity, message: &str) {
        host.notify(severity, &format!("[{}] {message}", self.name));
    }
}
