use std::time::Duration;

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

use crate::error::SpawnError;

new_key_type! {
    /// Host-owned creature handle. The engine only holds references.
    pub struct CreatureId;
    pub struct EncounterId;
}

/// Milliseconds on the host clock.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub const ZERO: Self = Self(0);

    pub fn from_secs(secs: u64) -> Self {
        Self(secs.saturating_mul(1000))
    }

    pub fn as_millis(self) -> u64 {
        self.0
    }

    pub fn saturating_add(self, delay: Duration) -> Self {
        let millis = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        Self(self.0.saturating_add(millis))
    }

    /// Time left until `self`, measured from `now`. Zero once `now` has passed it.
    pub fn remaining_from(self, now: Timestamp) -> Duration {
        Duration::from_millis(self.0.saturating_sub(now.0))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Chebyshev distance on the ground plane, the metric spawn radii use.
    pub fn ground_distance(self, other: Point) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

/// Placement hints forwarded to the host's spawn location query.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpawnFlags {
    pub prefer_far: bool,
    pub avoid_players: bool,
    pub require_clear_path: bool,
}

impl SpawnFlags {
    pub const NONE: Self =
        Self { prefer_far: false, avoid_players: false, require_clear_path: false };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Why a tier regression ran, recorded in the encounter log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetreatKind {
    /// Poor progress on tier 0; nothing to fall back to.
    HeldAtFloor,
    /// Previous tier shares the roster, population kept.
    SteppedDown,
    /// Population wiped and tier decremented.
    Wiped,
    /// Reasonable progress; only the kill counter was reset.
    KillsReset,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncounterEvent {
    Activated,
    Paused,
    Spawned { creature: CreatureId, type_name: String, captain: bool },
    Converted { old: CreatureId, new: CreatureId },
    LevelAdvanced { tier_index: usize, carried_over: usize },
    LevelRetreated { tier_index: usize, kind: RetreatKind },
    ChampionDefeated,
    RestartArmed { at: Timestamp },
    RestartFired,
    SpawnFault(SpawnError),
    Deleted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remaining_from_saturates_once_deadline_passed() {
        let deadline = Timestamp(5_000);
        assert_eq!(deadline.remaining_from(Timestamp(2_000)), Duration::from_secs(3));
        assert_eq!(deadline.remaining_from(Timestamp(9_000)), Duration::ZERO);
    }

    #[test]
    fn ground_distance_ignores_height() {
        let origin = Point::new(10, 10, 0);
        assert_eq!(origin.ground_distance(Point::new(13, 8, 40)), 3);
    }
}
