//! In-memory `WorldHost` used by the simulator, the fuzzer and the test suites.
//! Placement is deterministic: candidates walk the square around the origin in
//! row-major order, so runs with the same inputs lay creatures out identically.

use std::collections::BTreeSet;
use std::time::Duration;

use slotmap::SlotMap;

use crate::error::SpawnError;
use crate::host::{CreatureSetup, WorldHost};
use crate::types::{CreatureId, Point, Severity, SpawnFlags, Timestamp};

#[derive(Clone, Debug)]
pub struct SandboxCreature {
    pub type_name: String,
    pub location: Option<Point>,
    pub setup: Option<CreatureSetup>,
    pub observed: bool,
}

#[derive(Debug, Default)]
pub struct SandboxWorld {
    clock: Timestamp,
    creatures: SlotMap<CreatureId, SandboxCreature>,
    notices: Vec<(Severity, String)>,
    failing_types: BTreeSet<String>,
    water_types: BTreeSet<String>,
    boss_types: BTreeSet<String>,
    placement_blocked: bool,
    trigger_denied: bool,
    placements: u64,
    created: u64,
    removed: u64,
}

impl SandboxWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(clock: Timestamp) -> Self {
        Self { clock, ..Self::default() }
    }

    pub fn advance(&mut self, elapsed: Duration) {
        self.clock = self.clock.saturating_add(elapsed);
    }

    pub fn set_now(&mut self, clock: Timestamp) {
        self.clock = clock;
    }

    /// Kill a creature. Returns `false` if it was already gone.
    pub fn kill(&mut self, creature: CreatureId) -> bool {
        self.creatures.remove(creature).is_some()
    }

    pub fn kill_all(&mut self, creatures: &[CreatureId]) -> usize {
        creatures.iter().filter(|creature| self.kill(**creature)).count()
    }

    pub fn living(&self) -> usize {
        self.creatures.len()
    }

    pub fn creature(&self, creature: CreatureId) -> Option<&SandboxCreature> {
        self.creatures.get(creature)
    }

    pub fn notices(&self) -> &[(Severity, String)] {
        &self.notices
    }

    pub fn created(&self) -> u64 {
        self.created
    }

    pub fn removed(&self) -> u64 {
        self.removed
    }

    /// Make `create` fail for this type until cleared.
    pub fn fail_type(&mut self, type_name: &str) {
        self.failing_types.insert(type_name.to_ascii_lowercase());
    }

    pub fn clear_failures(&mut self) {
        self.failing_types.clear();
    }

    pub fn mark_water(&mut self, type_name: &str) {
        self.water_types.insert(type_name.to_ascii_lowercase());
    }

    pub fn mark_boss(&mut self, type_name: &str) {
        self.boss_types.insert(type_name.to_ascii_lowercase());
    }

    pub fn block_placement(&mut self, blocked: bool) {
        self.placement_blocked = blocked;
    }

    pub fn deny_triggers(&mut self, denied: bool) {
        self.trigger_denied = denied;
    }

    pub fn set_observed(&mut self, creature: CreatureId, observed: bool) {
        if let Some(entry) = self.creatures.get_mut(creature) {
            entry.observed = observed;
        }
    }

    fn type_of(&self, creature: CreatureId) -> Option<String> {
        self.creatures.get(creature).map(|entry| entry.type_name.to_ascii_lowercase())
    }

    fn is_water(&self, creature: CreatureId) -> bool {
        self.type_of(creature).is_some_and(|name| self.water_types.contains(&name))
    }
}

impl WorldHost for SandboxWorld {
    fn now(&self) -> Timestamp {
        self.clock
    }

    fn create(&mut self, type_name: &str) -> Result<CreatureId, SpawnError> {
        if self.failing_types.contains(&type_name.to_ascii_lowercase()) {
            return Err(SpawnError::UnknownCreatureType(type_name.to_string()));
        }
        self.created += 1;
        Ok(self.creatures.insert(SandboxCreature {
            type_name: type_name.to_string(),
            location: None,
            setup: None,
            observed: false,
        }))
    }

    fn is_alive(&self, creature: CreatureId) -> bool {
        self.creatures.contains_key(creature)
    }

    fn remove(&mut self, creature: CreatureId) {
        if self.creatures.remove(creature).is_some() {
            self.removed += 1;
        }
    }

    fn find_spawn_location(
        &mut self,
        origin: Point,
        radius: u32,
        _flags: SpawnFlags,
        _creature: CreatureId,
    ) -> Option<Point> {
        if self.placement_blocked {
            return None;
        }
        let radius = i64::from(radius.min(1_000));
        let side = 2 * radius + 1;
        let slot = (self.placements % (side * side) as u64) as i64;
        self.placements += 1;
        let dx = (slot % side - radius) as i32;
        let dy = (slot / side - radius) as i32;
        Some(Point::new(origin.x.saturating_add(dx), origin.y.saturating_add(dy), origin.z))
    }

    fn location(&self, creature: CreatureId) -> Option<Point> {
        self.creatures.get(creature).and_then(|entry| entry.location)
    }

    fn move_to(&mut self, creature: CreatureId, location: Point) {
        if let Some(entry) = self.creatures.get_mut(creature) {
            entry.location = Some(location);
        }
    }

    fn configure(&mut self, creature: CreatureId, setup: &CreatureSetup) {
        if let Some(entry) = self.creatures.get_mut(creature) {
            entry.setup = Some(setup.clone());
        }
    }

    fn players_nearby(&self, creature: CreatureId) -> bool {
        self.creatures.get(creature).is_some_and(|entry| entry.observed)
    }

    fn can_share_terrain(&self, incoming: CreatureId, outgoing: CreatureId) -> bool {
        self.is_water(incoming) == self.is_water(outgoing)
    }

    fn is_tier_boss(&self, creature: CreatureId) -> bool {
        self.type_of(creature).is_some_and(|name| self.boss_types.contains(&name))
    }

    fn trigger_permitted(&self, _encounter: &str) -> bool {
        !self.trigger_denied
    }

    fn notify(&mut self, severity: Severity, message: &str) {
        self.notices.push((severity, message.to_string()));
    }
}
