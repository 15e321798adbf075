//! Population bookkeeping for one encounter: who is alive for this tier, who is
//! left over from the previous one, and how many kills the tier has banked.

use std::mem;

use serde::{Deserialize, Serialize};

use crate::types::CreatureId;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    pub(crate) active: Vec<CreatureId>,
    pub(crate) carryover: Vec<CreatureId>,
    pub(crate) kills: u32,
    pub(crate) captain: Option<CreatureId>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReapOutcome {
    pub credited: u32,
    pub silent: u32,
}

impl Ledger {
    pub fn active(&self) -> &[CreatureId] {
        &self.active
    }

    pub fn carryover(&self) -> &[CreatureId] {
        &self.carryover
    }

    pub fn kills(&self) -> u32 {
        self.kills
    }

    pub fn captain(&self) -> Option<CreatureId> {
        self.captain
    }

    pub fn population(&self) -> usize {
        self.active.len() + self.carryover.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.carryover.is_empty()
    }

    /// Drop dead handles. Active deaths are credited up to `quota`.
    pub(crate) fn reap(
        &mut self,
        quota: u32,
        is_alive: impl Fn(CreatureId) -> bool,
    ) -> ReapOutcome {
        let mut outcome = ReapOutcome::default();
        self.active.retain(|creature| {
            let alive = is_alive(*creature);
            if !alive {
                outcome.credited += 1;
            }
            alive
        });
        self.carryover.retain(|creature| {
            let alive = is_alive(*creature);
            if !alive {
                outcome.silent += 1;
            }
            alive
        });
        if let Some(captain) = self.captain
            && !self.active.contains(&captain)
            && !self.carryover.contains(&captain)
        {
            self.captain = None;
        }
        self.kills = self.kills.saturating_add(outcome.credited).min(quota);
        outcome
    }

    /// Move up to `limit` active members into carryover; the rest stay active.
    pub(crate) fn shift_to_carryover(&mut self, limit: usize) -> usize {
        let room = limit.saturating_sub(self.carryover.len());
        let moved = room.min(self.active.len());
        self.carryover.extend(self.active.drain(..moved));
        // The old tier's captain no longer leads, even when it stays active.
        self.captain = None;
        moved
    }

    /// Empty both sets, handing back every handle so the caller can delete them.
    pub(crate) fn drain_all(&mut self) -> Vec<CreatureId> {
        self.captain = None;
        let mut drained = mem::take(&mut self.active);
        drained.append(&mut self.carryover);
        drained
    }

    pub(crate) fn remove_carryover(&mut self, creature: CreatureId) -> bool {
        let before = self.carryover.len();
        self.carryover.retain(|member| *member != creature);
        before != self.carryover.len()
    }
}
