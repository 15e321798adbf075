//! The once-per-second spawn director: reap, decide, repopulate.

use super::*;

impl Encounter {
    /// Run one heartbeat. Never panics or propagates host failures; anything
    /// that goes wrong is retried on the next tick.
    pub fn on_heartbeat(&mut self, host: &mut dyn WorldHost) {
        if !self.running || self.deleted {
            return;
        }
        let now = host.now();

        self.reap(host);

        if self.progress_percent() > ADVANCE_THRESHOLD_PCT {
            self.advance(host, now);
            return;
        }
        if now >= self.expire_at {
            self.retreat(host, now);
        }
        self.repopulate(host, now);
    }

    fn reap(&mut self, host: &dyn WorldHost) {
        let quota = self.effective_quota();
        let outcome = self.ledger.reap(quota, |creature| host.is_alive(creature));
        if outcome.credited > 0 || outcome.silent > 0 {
            trace!(
                encounter = %self.name,
                credited = outcome.credited,
                silent = outcome.silent,
                kills = self.ledger.kills,
                "reaped dead creatures"
            );
        }
    }

    /// Top the tier up to its cap and convert one carryover creature.
    pub(super) fn repopulate(&mut self, host: &mut dyn WorldHost, now: Timestamp) {
        let result = self.top_up(host, now).and_then(|()| self.convert_carryover(host));
        if let Err(error) = result {
            self.record_spawn_fault(host, error);
        }
    }

    fn top_up(&mut self, host: &mut dyn WorldHost, now: Timestamp) -> Result<(), SpawnError> {
        if now < self.next_spawn_at {
            return Ok(());
        }
        let cap = self.effective_cap() as usize;
        let batch = self.effective_batch();
        let mut spawned = 0u32;
        for _ in 0..batch {
            if self.ledger.population() >= cap {
                break;
            }
            let (creature, type_name, captain) = self.instantiate(host)?;
            let radius = self.effective_radius();
            let flags = self.current_level().flags;
            let Some(location) = host.find_spawn_location(self.origin, radius, flags, creature)
            else {
                trace!(encounter = %self.name, "no spawn location found, skipping attempt");
                host.remove(creature);
                continue;
            };
            self.place(host, creature, type_name, captain, location);
            spawned += 1;
        }
        if spawned > 0 {
            self.next_spawn_at = now.saturating_add(self.current_level().spawn_delay);
        }
        Ok(())
    }

    /// Replace one creature left over from the previous tier with a fresh one.
    fn convert_carryover(&mut self, host: &mut dyn WorldHost) -> Result<(), SpawnError> {
        if self.ledger.carryover.is_empty() {
            return Ok(());
        }
        let old = self.pick_carryover(host);
        let (new, type_name, captain) = self.instantiate(host)?;

        let mut location = None;
        if host.can_share_terrain(new, old) {
            location = host.location(old);
        }
        if location.is_none() {
            let radius = self.effective_radius();
            let flags = self.current_level().flags;
            location = host.find_spawn_location(self.origin, radius, flags, new);
        }
        let Some(location) = location else {
            trace!(encounter = %self.name, "no location for carryover replacement");
            host.remove(new);
            return Ok(());
        };

        self.place(host, new, type_name, captain, location);
        self.ledger.remove_carryover(old);
        host.remove(old);
        self.log.push(EncounterEvent::Converted { old, new });
        Ok(())
    }

    /// Prefer a carryover member nobody is watching; otherwise any member.
    fn pick_carryover(&mut self, host: &dyn WorldHost) -> CreatureId {
        let unobserved: Vec<CreatureId> = self
            .ledger
            .carryover
            .iter()
            .copied()
            .filter(|creature| !host.players_nearby(*creature))
            .collect();
        if unobserved.is_empty() {
            let len = self.ledger.carryover.len();
            let index = self.random_index(len);
            self.ledger.carryover[index]
        } else {
            let index = self.random_index(unobserved.len());
            unobserved[index]
        }
    }

    fn pick_creature_type(&mut self) -> Result<(String, bool), SpawnError> {
        let level = self.current_level();
        if let Some(captain) = &level.captain
            && self.ledger.captain.is_none()
        {
            return Ok((captain.clone(), true));
        }
        if level.monsters.is_empty() {
            return Err(SpawnError::EmptyRoster { tier_index: self.tier_index });
        }
        let len = level.monsters.len();
        let index = self.random_index(len);
        Ok((self.current_level().monsters[index].clone(), false))
    }

    fn instantiate(
        &mut self,
        host: &mut dyn WorldHost,
    ) -> Result<(CreatureId, String, bool), SpawnError> {
        let (type_name, captain) = self.pick_creature_type()?;
        let creature = host.create(&type_name)?;
        Ok((creature, type_name, captain))
    }

    fn place(
        &mut self,
        host: &mut dyn WorldHost,
        creature: CreatureId,
        type_name: String,
        captain: bool,
        location: Point,
    ) {
        host.move_to(creature, location);
        let setup = self.creature_setup(host, creature);
        host.configure(creature, &setup);
        self.ledger.active.push(creature);
        if captain {
            self.ledger.captain = Some(creature);
        }
        self.log.push(EncounterEvent::Spawned { creature, type_name, captain });
    }

    fn creature_setup(&self, host: &dyn WorldHost, creature: CreatureId) -> CreatureSetup {
        let level = self.current_level();
        let boss = self.is_final_tier() || host.is_tier_boss(creature);
        CreatureSetup {
            home: self.origin,
            home_range: self.effective_radius(),
            tier_index: self.tier_index,
            team: self.overrides.team,
            slayer: self.overrides.slayer.clone(),
            debug: self.overrides.debug,
            speed: self.overrides.speed,
            name_title: level.name_title.clone(),
            boss_reward: boss.then_some(RewardRange {
                min: self.overrides.boss_reward_min,
                max: self.overrides.boss_reward_max.max(self.overrides.boss_reward_min),
            }),
        }
    }

    fn record_spawn_fault(&mut self, host: &mut dyn WorldHost, fault: SpawnError) {
        error!(encounter = %self.name, tier = self.tier_index, %fault, "creature spawn failed");
        self.notify(host, Severity::Error, &format!("spawn failed: {fault}"));
        self.log.push(EncounterEvent::SpawnFault(fault.clone()));
        self.spawn_fault = Some(fault);
    }
}
