//! Tier changes: advance on success, retreat on timeout, terminal completion.

use super::*;

impl Encounter {
    pub(super) fn advance(&mut self, host: &mut dyn WorldHost, now: Timestamp) {
        self.ledger.kills = 0;
        if self.is_final_tier() {
            self.complete(host, now);
            return;
        }

        let next = self.tier_index + 1;
        let carried_over = if self.table.same_roster(self.tier_index, next) {
            0
        } else {
            let limit = self.table.levels[next].effective_cap(self.level_scale) as usize;
            self.ledger.shift_to_carryover(limit)
        };

        self.tier_index = next;
        self.expire_at = now.saturating_add(self.expire_delay(next));
        self.next_spawn_at = now;
        self.log.push(EncounterEvent::LevelAdvanced { tier_index: next, carried_over });
        info!(encounter = %self.name, tier = next, carried_over, "champion spawn advanced");
        let message = format!("advanced to level {} of {}", next + 1, self.tier_count());
        self.notify(host, Severity::Info, &message);
    }

    pub(super) fn retreat(&mut self, host: &mut dyn WorldHost, now: Timestamp) {
        let kind = if self.progress_percent() < RETREAT_THRESHOLD_PCT {
            if self.tier_index > 0 {
                let previous = self.tier_index - 1;
                let kind = if self.table.same_roster(previous, self.tier_index) {
                    RetreatKind::SteppedDown
                } else {
                    self.wipe(host);
                    RetreatKind::Wiped
                };
                self.tier_index = previous;
                kind
            } else {
                RetreatKind::HeldAtFloor
            }
        } else {
            RetreatKind::KillsReset
        };
        self.ledger.kills = 0;
        self.expire_at = now.saturating_add(self.expire_delay(self.tier_index));
        self.log.push(EncounterEvent::LevelRetreated { tier_index: self.tier_index, kind });

        match kind {
            RetreatKind::SteppedDown | RetreatKind::Wiped => {
                warn!(encounter = %self.name, tier = self.tier_index, ?kind, "champion spawn retreated");
                let message = format!("fell back to level {}", self.tier_index + 1);
                self.notify(host, Severity::Warning, &message);
            }
            RetreatKind::HeldAtFloor | RetreatKind::KillsReset => {
                debug!(encounter = %self.name, tier = self.tier_index, ?kind, "level expired");
            }
        }
    }

    /// The champion fell: stop, clear the field, optionally schedule a restart.
    fn complete(&mut self, host: &mut dyn WorldHost, now: Timestamp) {
        self.heartbeat.cancel();
        self.wipe(host);
        self.tier_index = 0;
        self.ledger.kills = 0;
        self.running = false;
        self.log.push(EncounterEvent::ChampionDefeated);
        info!(encounter = %self.name, "champion defeated");
        self.notify(host, Severity::Info, "champion defeated");

        if let Some(delay) = self.restart_delay {
            let at = self.restart.arm(now, delay);
            self.log.push(EncounterEvent::RestartArmed { at });
            debug!(encounter = %self.name, restart_at = at.as_millis(), "restart armed");
        }
    }
}
