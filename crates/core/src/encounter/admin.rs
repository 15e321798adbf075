//! Operator knobs. Tier setters edit the current tier's base record only.

use super::*;

use crate::error::ConfigError;

impl Encounter {
    /// Lowering the quota below the banked kills clamps the kills too.
    pub fn set_kill_quota(&mut self, kill_quota: u32) {
        self.current_level_mut().kill_quota = kill_quota;
        self.clamp_kills();
    }

    pub fn set_population_cap(&mut self, population_cap: u32) {
        self.current_level_mut().population_cap = population_cap;
    }

    pub fn set_spawn_batch(&mut self, spawn_batch: u32) {
        self.current_level_mut().spawn_batch = spawn_batch;
    }

    pub fn set_spawn_radius(&mut self, spawn_radius: u32) {
        self.current_level_mut().spawn_radius = spawn_radius;
    }

    pub fn set_spawn_delay(&mut self, spawn_delay: Duration) {
        self.current_level_mut().spawn_delay = spawn_delay;
    }

    pub fn set_expire_delay(&mut self, expire_delay: Duration) {
        self.current_level_mut().expire_delay = expire_delay;
    }

    /// Returns `false` (scale unchanged) for NaN or infinite input; finite
    /// values are clamped into range.
    pub fn set_level_scale(&mut self, level_scale: f32) -> bool {
        let Some(level_scale) = sanitize_level_scale(level_scale) else {
            warn!(encounter = %self.name, level_scale, "rejected non-finite level scale");
            return false;
        };
        self.level_scale = level_scale;
        self.clamp_kills();
        true
    }

    /// Swap in a built-in ladder by name.
    pub fn set_spawn_type(
        &mut self,
        host: &mut dyn WorldHost,
        spawn_type: &str,
    ) -> Result<(), ConfigError> {
        let table = catalog::lookup(spawn_type)
            .ok_or_else(|| ConfigError::UnknownSpawnType(spawn_type.to_string()))?;
        self.replace_table(host, table);
        Ok(())
    }

    pub fn set_level_table(
        &mut self,
        host: &mut dyn WorldHost,
        table: LevelTable,
    ) -> Result<(), ConfigError> {
        if table.is_empty() {
            return Err(ConfigError::EmptyLevelTable(table.spawn_type));
        }
        self.replace_table(host, table);
        Ok(())
    }

    pub fn clear_spawn_fault(&mut self) {
        self.spawn_fault = None;
    }

    fn replace_table(&mut self, host: &mut dyn WorldHost, table: LevelTable) {
        info!(encounter = %self.name, from = %self.table.spawn_type, to = %table.spawn_type, "level table replaced");
        self.wipe(host);
        self.table = table;
        self.tier_index = 0;
        self.ledger.kills = 0;
        if self.running {
            let now = host.now();
            self.expire_at = now.saturating_add(self.expire_delay(0));
            self.next_spawn_at = now;
            self.repopulate(host, now);
        }
    }

    fn current_level_mut(&mut self) -> &mut LevelDefinition {
        &mut self.table.levels[self.tier_index]
    }

    fn clamp_kills(&mut self) {
        self.ledger.kills = self.ledger.kills.min(self.effective_quota());
    }
}
