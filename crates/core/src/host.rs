//! Outbound contract: everything the engine needs from the world server.
//! The engine never owns creature lifetimes beyond asking the host to remove them.

use serde::{Deserialize, Serialize};

use crate::error::SpawnError;
use crate::levels::NameTitle;
use crate::types::{CreatureId, Point, Severity, SpawnFlags, Timestamp};

/// Per-creature configuration applied right after a successful spawn.
#[derive(Clone, Debug, PartialEq)]
pub struct CreatureSetup {
    pub home: Point,
    pub home_range: u32,
    pub tier_index: usize,
    pub team: Option<u32>,
    pub slayer: Option<String>,
    pub debug: bool,
    pub speed: Option<SpeedOverride>,
    pub name_title: Option<NameTitle>,
    pub boss_reward: Option<RewardRange>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpeedOverride {
    pub active: f32,
    pub passive: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RewardRange {
    pub min: u32,
    pub max: u32,
}

pub trait WorldHost {
    fn now(&self) -> Timestamp;

    fn create(&mut self, type_name: &str) -> Result<CreatureId, SpawnError>;

    fn is_alive(&self, creature: CreatureId) -> bool;

    /// Delete the creature from the world. Unknown or dead handles are ignored.
    fn remove(&mut self, creature: CreatureId);

    fn find_spawn_location(
        &mut self,
        origin: Point,
        radius: u32,
        flags: SpawnFlags,
        creature: CreatureId,
    ) -> Option<Point>;

    fn location(&self, creature: CreatureId) -> Option<Point>;

    fn move_to(&mut self, creature: CreatureId, location: Point);

    fn configure(&mut self, creature: CreatureId, setup: &CreatureSetup);

    fn players_nearby(&self, creature: CreatureId) -> bool;

    /// Whether `incoming` can stand where `outgoing` stands (land vs water).
    fn can_share_terrain(&self, incoming: CreatureId, outgoing: CreatureId) -> bool;

    fn is_tier_boss(&self, creature: CreatureId) -> bool;

    /// Permission/cooldown gate for trigger-style activation.
    fn trigger_permitted(&self, encounter: &str) -> bool;

    fn notify(&mut self, severity: Severity, message: &str);
}
