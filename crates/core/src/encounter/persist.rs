//! Save record for one encounter. Deadlines are stored relative to the save
//! time so a restored encounter resumes with the same time remaining.

use serde::{Deserialize, Serialize};

use super::*;
use crate::error::SaveFileError;

pub const SAVE_FORMAT_VERSION: u16 = 1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncounterSave {
    pub format_version: u16,
    pub name: String,
    pub origin: Point,
    pub table: LevelTable,
    pub level_scale: f32,
    pub tier_index: usize,
    pub ledger: Ledger,
    pub running: bool,
    pub expire_in: Duration,
    pub next_spawn_in: Duration,
    /// Time left on a pending restart, if one is armed.
    pub restart_in: Option<Duration>,
    pub restart_delay: Option<Duration>,
    pub heartbeat_interval: Duration,
    pub spawn_fault: Option<SpawnError>,
    pub overrides: CreatureOverrides,
    pub rng_seed: u64,
}

impl Encounter {
    pub fn save(&self, now: Timestamp) -> EncounterSave {
        EncounterSave {
            format_version: SAVE_FORMAT_VERSION,
            name: self.name.clone(),
            origin: self.origin,
            table: self.table.clone(),
            level_scale: self.level_scale,
            tier_index: self.tier_index,
            ledger: self.ledger.clone(),
            running: self.running,
            expire_in: self.expire_at.remaining_from(now),
            next_spawn_in: self.next_spawn_at.remaining_from(now),
            restart_in: self.restart.remaining(now),
            restart_delay: self.restart_delay,
            heartbeat_interval: self.heartbeat_interval,
            spawn_fault: self.spawn_fault.clone(),
            overrides: self.overrides.clone(),
            rng_seed: self.rng_seed,
        }
    }

    /// Rebuild an encounter from a save record, repairing out-of-range state.
    pub fn restore(save: EncounterSave, now: Timestamp) -> Result<Self, SaveFileError> {
        if save.format_version != SAVE_FORMAT_VERSION {
            return Err(SaveFileError::UnsupportedVersion(save.format_version));
        }

        let table = if save.table.is_empty() {
            warn!(encounter = %save.name, spawn_type = %save.table.spawn_type, "saved level table is empty, using catalog");
            catalog::lookup_or_default(&save.table.spawn_type)
        } else {
            save.table
        };
        let tier_index = save.tier_index.min(table.tier_count() - 1);
        if tier_index != save.tier_index {
            warn!(encounter = %save.name, saved = save.tier_index, tier = tier_index, "clamped saved tier index");
        }
        let level_scale = sanitize_level_scale(save.level_scale).unwrap_or(1.0);
        let heartbeat_interval = save.heartbeat_interval.max(Duration::from_millis(1));

        let mut heartbeat = OneShot::idle();
        if save.running {
            heartbeat.arm(now, heartbeat_interval);
        }
        let mut restart = OneShot::idle();
        if let Some(remaining) = save.restart_in {
            restart.arm(now, remaining);
        }

        let mut encounter = Self {
            name: save.name,
            origin: save.origin,
            table,
            level_scale,
            tier_index,
            ledger: save.ledger,
            running: save.running,
            deleted: false,
            expire_at: now.saturating_add(save.expire_in),
            next_spawn_at: now.saturating_add(save.next_spawn_in),
            heartbeat,
            heartbeat_interval,
            restart,
            restart_delay: save.restart_delay,
            spawn_fault: save.spawn_fault,
            overrides: save.overrides,
            rng_seed: save.rng_seed,
            rng: ChaCha8Rng::seed_from_u64(save.rng_seed),
            log: Vec::new(),
        };
        let quota = encounter.effective_quota();
        encounter.ledger.kills = encounter.ledger.kills.min(quota);
        debug!(encounter = %encounter.name, tier = tier_index, running = encounter.running, "encounter restored");
        Ok(encounter)
    }
}
