//! Stable snapshot hashing for determinism checks.

use std::hash::Hasher;

use slotmap::Key;
use xxhash_rust::xxh3::Xxh3;

use super::*;

impl Encounter {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write(self.table.spawn_type.as_bytes());
        hasher.write_u64(self.tier_index as u64);
        hasher.write_u32(self.ledger.kills);
        hasher.write_u32(self.level_scale.to_bits());
        hasher.write_u8(u8::from(self.running));
        hasher.write_u8(u8::from(self.deleted));
        hasher.write_u64(self.expire_at.as_millis());
        hasher.write_u64(self.next_spawn_at.as_millis());
        hasher.write_u64(self.restart.due().map_or(u64::MAX, Timestamp::as_millis));
        hasher.write_u64(self.ledger.active.len() as u64);
        for creature in &self.ledger.active {
            hasher.write_u64(creature.data().as_ffi());
        }
        hasher.write_u64(self.ledger.carryover.len() as u64);
        for creature in &self.ledger.carryover {
            hasher.write_u64(creature.data().as_ffi());
        }
        hasher.write_u64(self.ledger.captain.map_or(0, |captain| captain.data().as_ffi()));
        hasher.write_u8(u8::from(self.spawn_fault.is_some()));
        hasher.finish()
    }
}
