//! Read-only progress contract polled by the altar/skull decoration layer.

use serde::{Deserialize, Serialize};

pub const MINOR_SKULLS_PER_TIER: u32 = 4;
pub const DEFAULT_ALTAR_HUE: u16 = 0x0455;
pub const FINAL_TIER_HUE: u16 = 0x0026;
pub const INACTIVE_ALTAR_HUE: u16 = 0x0000;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub kills: u32,
    pub quota: u32,
    pub tier_index: usize,
    pub tier_count: usize,
    pub is_final: bool,
    pub running: bool,
    /// Last spawn failure, kept until the encounter is re-activated.
    pub spawn_fault: Option<String>,
}

impl Progress {
    /// Completion of the current tier in percent. A zero quota is already complete.
    pub fn percent(&self) -> f64 {
        if self.quota == 0 {
            return 100.0;
        }
        f64::from(self.kills) / f64::from(self.quota) * 100.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SkullDisplay {
    pub lit_major: usize,
    pub lit_minor: u32,
    pub altar_hue: u16,
}

impl SkullDisplay {
    pub fn from_progress(progress: &Progress) -> Self {
        if !progress.running {
            return Self { lit_major: 0, lit_minor: 0, altar_hue: INACTIVE_ALTAR_HUE };
        }
        let lit_minor = if progress.quota == 0 {
            MINOR_SKULLS_PER_TIER
        } else {
            progress.kills.min(progress.quota) * MINOR_SKULLS_PER_TIER / progress.quota
        };
        let altar_hue = if progress.is_final { FINAL_TIER_HUE } else { DEFAULT_ALTAR_HUE };
        Self { lit_major: progress.tier_index, lit_minor, altar_hue }
    }
}
