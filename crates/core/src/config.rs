//! Engine-wide tuning knobs. Every field has a default so partial config files work.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::error::ConfigError;
use crate::host::SpeedOverride;
use crate::levels::{MAX_LEVEL_SCALE, MIN_LEVEL_SCALE};

pub const DEFAULT_HEARTBEAT_INTERVAL_MS: u64 = 1_000;

/// Overrides stamped onto every creature the encounter spawns.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatureOverrides {
    pub team: Option<u32>,
    pub slayer: Option<String>,
    pub debug: bool,
    pub speed: Option<SpeedOverride>,
    pub boss_reward_min: u32,
    pub boss_reward_max: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub spawn_type: String,
    pub level_scale: f32,
    /// `None` disables automatic restarts after the champion falls.
    pub restart_delay_secs: Option<u64>,
    pub heartbeat_interval_ms: u64,
    pub rng_seed: u64,
    pub creature: CreatureOverrides,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            spawn_type: catalog::DEFAULT_SPAWN_TYPE.to_string(),
            level_scale: 1.0,
            restart_delay_secs: None,
            heartbeat_interval_ms: DEFAULT_HEARTBEAT_INTERVAL_MS,
            rng_seed: 0,
            creature: CreatureOverrides {
                boss_reward_min: 3,
                boss_reward_max: 6,
                ..Default::default()
            },
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.level_scale.is_finite()
            || !(MIN_LEVEL_SCALE..=MAX_LEVEL_SCALE).contains(&self.level_scale)
        {
            return Err(ConfigError::InvalidLevelScale {
                value: self.level_scale,
                min: MIN_LEVEL_SCALE,
                max: MAX_LEVEL_SCALE,
            });
        }
        if catalog::lookup(&self.spawn_type).is_none() {
            return Err(ConfigError::UnknownSpawnType(self.spawn_type.clone()));
        }
        if self.heartbeat_interval_ms == 0 {
            return Err(ConfigError::ZeroHeartbeat);
        }
        Ok(())
    }

    pub fn restart_delay(&self) -> Option<Duration> {
        self.restart_delay_secs.map(Duration::from_secs)
    }

    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_millis(self.heartbeat_interval_ms.max(1))
    }
}
