//! Registry of the encounters living on one world shard.

use slotmap::SlotMap;
use tracing::debug;

use crate::encounter::Encounter;
use crate::host::WorldHost;
use crate::types::EncounterId;

#[derive(Default)]
pub struct Shard {
    encounters: SlotMap<EncounterId, Encounter>,
}

impl Shard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, encounter: Encounter) -> EncounterId {
        let id = self.encounters.insert(encounter);
        debug!(?id, encounter = %self.encounters[id].name(), "encounter registered");
        id
    }

    pub fn get(&self, id: EncounterId) -> Option<&Encounter> {
        self.encounters.get(id)
    }

    pub fn get_mut(&mut self, id: EncounterId) -> Option<&mut Encounter> {
        self.encounters.get_mut(id)
    }

    /// Tear the encounter down (removing its creatures) and drop it.
    pub fn remove(&mut self, host: &mut dyn WorldHost, id: EncounterId) -> Option<Encounter> {
        let mut encounter = self.encounters.remove(id)?;
        encounter.delete(host);
        Some(encounter)
    }

    pub fn len(&self) -> usize {
        self.encounters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.encounters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EncounterId, &Encounter)> {
        self.encounters.iter()
    }

    /// Fire due timers on every encounter. Each one owns its own ledger,
    /// timers and RNG, so the visiting order has no effect on the outcome.
    pub fn pulse(&mut self, host: &mut dyn WorldHost) {
        for (_, encounter) in &mut self.encounters {
            encounter.poll(host);
        }
    }
}
