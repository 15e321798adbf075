//! Activation state machine: dormant, active, completed, waiting to restart.

use super::*;

impl Encounter {
    /// Toggle the encounter. Turning it on resets to tier 0 and spawns at once;
    /// turning it off pauses without touching the population and always
    /// cancels a pending restart.
    pub fn set_running(&mut self, host: &mut dyn WorldHost, running: bool) {
        if self.deleted {
            debug!(encounter = %self.name, "ignoring toggle on deleted encounter");
            return;
        }
        match (self.running, running) {
            (false, true) => self.activate(host),
            (true, false) => self.pause(host),
            (false, false) => {
                self.heartbeat.cancel();
                if self.restart.is_armed() {
                    self.restart.cancel();
                    info!(encounter = %self.name, "pending restart cancelled");
                }
            }
            (true, true) => {}
        }
    }

    /// Trigger-style activation gated by the host's permission check.
    pub fn trigger(&mut self, host: &mut dyn WorldHost) -> bool {
        if self.deleted || self.running || !host.trigger_permitted(&self.name) {
            return false;
        }
        self.activate(host);
        true
    }

    /// Fire due timers: the restart timer first, then the heartbeat slice.
    pub fn poll(&mut self, host: &mut dyn WorldHost) {
        if self.deleted {
            return;
        }
        self.poll_restart(host);
        let now = host.now();
        if self.running && self.heartbeat.fire_if_due(now) {
            self.on_heartbeat(host);
            if self.running {
                self.heartbeat.arm(now, self.heartbeat_interval);
            }
        }
    }

    /// Fire the restart timer if it is due. Returns whether the encounter restarted.
    pub fn poll_restart(&mut self, host: &mut dyn WorldHost) -> bool {
        if self.deleted || !self.restart.fire_if_due(host.now()) {
            return false;
        }
        self.log.push(EncounterEvent::RestartFired);
        if self.running {
            return false;
        }
        self.activate(host);
        true
    }

    /// Replace the restart policy. A pending restart is re-armed with the new
    /// delay (or cancelled when the policy is removed).
    pub fn set_restart_delay(&mut self, now: Timestamp, delay: Option<Duration>) {
        self.restart_delay = delay;
        if !self.restart.is_armed() {
            return;
        }
        match delay {
            Some(delay) => {
                let at = self.restart.arm(now, delay);
                self.log.push(EncounterEvent::RestartArmed { at });
            }
            None => self.restart.cancel(),
        }
    }

    /// Tear the encounter down. Every later heartbeat or toggle is ignored.
    pub fn delete(&mut self, host: &mut dyn WorldHost) {
        if self.deleted {
            return;
        }
        self.heartbeat.cancel();
        self.restart.cancel();
        self.running = false;
        self.wipe(host);
        self.deleted = true;
        self.log.push(EncounterEvent::Deleted);
        info!(encounter = %self.name, "encounter deleted");
    }

    pub(super) fn activate(&mut self, host: &mut dyn WorldHost) {
        let now = host.now();
        self.restart.cancel();
        self.wipe(host);
        self.tier_index = 0;
        self.ledger.kills = 0;
        self.spawn_fault = None;
        self.running = true;
        self.expire_at = now.saturating_add(self.expire_delay(0));
        self.next_spawn_at = now;
        self.heartbeat.arm(now, self.heartbeat_interval);
        self.log.push(EncounterEvent::Activated);
        info!(encounter = %self.name, spawn_type = %self.table.spawn_type, "champion spawn activated");
        self.notify(host, Severity::Info, "champion spawn activated");
        self.repopulate(host, now);
    }

    fn pause(&mut self, host: &mut dyn WorldHost) {
        self.running = false;
        self.heartbeat.cancel();
        self.restart.cancel();
        self.log.push(EncounterEvent::Paused);
        info!(encounter = %self.name, tier = self.tier_index, "champion spawn paused");
        self.notify(host, Severity::Info, "champion spawn paused");
    }
}
