//! Per-tier spawn parameters and the difficulty scalar applied on top of them.
//! Base records stay untouched; every consumer reads the `effective_*` values.

use std::collections::BTreeSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::SpawnFlags;

pub const MIN_LEVEL_SCALE: f32 = 0.0;
pub const MAX_LEVEL_SCALE: f32 = 10.0;

/// Spawn types whose tiers look identical on paper but must still churn.
const NEVER_SAME_ROSTER: [&str; 2] = ["Doppelganger", "PolymorphicBob"];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameTitle {
    pub name: String,
    pub title: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelDefinition {
    pub monsters: Vec<String>,
    pub captain: Option<String>,
    pub name_title: Option<NameTitle>,
    pub kill_quota: u32,
    pub population_cap: u32,
    pub spawn_batch: u32,
    pub spawn_radius: u32,
    pub spawn_delay: Duration,
    pub expire_delay: Duration,
    pub flags: SpawnFlags,
}

impl LevelDefinition {
    pub fn new(monsters: &[&str]) -> Self {
        Self {
            monsters: monsters.iter().map(|name| (*name).to_string()).collect(),
            captain: None,
            name_title: None,
            kill_quota: 0,
            population_cap: 0,
            spawn_batch: 0,
            spawn_radius: 0,
            spawn_delay: Duration::ZERO,
            expire_delay: Duration::ZERO,
            flags: SpawnFlags::NONE,
        }
    }

    pub fn with_captain(mut self, captain: &str) -> Self {
        self.captain = Some(captain.to_string());
        self
    }

    pub fn with_name_title(mut self, name: &str, title: &str) -> Self {
        self.name_title = Some(NameTitle { name: name.to_string(), title: title.to_string() });
        self
    }

    pub fn with_limits(mut self, kill_quota: u32, population_cap: u32, spawn_batch: u32) -> Self {
        self.kill_quota = kill_quota;
        self.population_cap = population_cap;
        self.spawn_batch = spawn_batch;
        self
    }

    pub fn with_radius(mut self, spawn_radius: u32) -> Self {
        self.spawn_radius = spawn_radius;
        self
    }

    pub fn with_delays(mut self, spawn_delay: Duration, expire_delay: Duration) -> Self {
        self.spawn_delay = spawn_delay;
        self.expire_delay = expire_delay;
        self
    }

    pub fn with_flags(mut self, flags: SpawnFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn effective_quota(&self, scale: f32) -> u32 {
        scaled(self.kill_quota, scale)
    }

    pub fn effective_cap(&self, scale: f32) -> u32 {
        scaled(self.population_cap, scale)
    }

    pub fn effective_batch(&self, scale: f32) -> u32 {
        scaled(self.spawn_batch, scale)
    }

    pub fn effective_radius(&self, scale: f32) -> u32 {
        scaled(self.spawn_radius, scale)
    }

    fn roster_key(&self) -> BTreeSet<String> {
        self.monsters.iter().map(|name| name.to_ascii_lowercase()).collect()
    }
}

fn scaled(base: u32, scale: f32) -> u32 {
    let value = (f64::from(base) * f64::from(scale)).round();
    if value <= 0.0 || value.is_nan() {
        return 0;
    }
    if value >= f64::from(u32::MAX) {
        return u32::MAX;
    }
    value as u32
}

/// Clamp an administrative scale into the supported range. `None` for NaN/inf.
pub fn sanitize_level_scale(scale: f32) -> Option<f32> {
    scale.is_finite().then(|| scale.clamp(MIN_LEVEL_SCALE, MAX_LEVEL_SCALE))
}

/// The full tier ladder for one spawn type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelTable {
    pub spawn_type: String,
    pub levels: Vec<LevelDefinition>,
}

impl LevelTable {
    pub fn new(spawn_type: &str, levels: Vec<LevelDefinition>) -> Self {
        Self { spawn_type: spawn_type.to_string(), levels }
    }

    pub fn tier_count(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn level(&self, tier_index: usize) -> Option<&LevelDefinition> {
        self.levels.get(tier_index)
    }

    pub fn is_final(&self, tier_index: usize) -> bool {
        tier_index + 1 >= self.levels.len()
    }

    /// Case-insensitive roster comparison between two tiers.
    pub fn same_roster(&self, left: usize, right: usize) -> bool {
        if NEVER_SAME_ROSTER.iter().any(|name| self.spawn_type.eq_ignore_ascii_case(name)) {
            return false;
        }
        match (self.levels.get(left), self.levels.get(right)) {
            (Some(a), Some(b)) => a.roster_key() == b.roster_key(),
            _ => false,
        }
    }
}
