//! Built-in spawn-type ladders.
//!
//! Each spawn type is a handful of roster groups; every group is repeated for
//! `SUBLEVELS_PER_GROUP` consecutive tiers with a rising kill quota, so
//! neighbouring tiers inside a group share a roster and the engine can skip
//! population churn across those boundaries.

use std::time::Duration;

use crate::levels::{LevelDefinition, LevelTable};
use crate::types::SpawnFlags;

pub mod keys {
    pub const UNDEAD: &str = "Undead";
    pub const ARACHNID: &str = "Arachnid";
    pub const COLD_BLOOD: &str = "ColdBlood";
    pub const ABYSS: &str = "Abyss";
    pub const VERMIN: &str = "Vermin";
    pub const DOPPELGANGER: &str = "Doppelganger";
    pub const POLYMORPHIC_BOB: &str = "PolymorphicBob";
}

pub const DEFAULT_SPAWN_TYPE: &str = keys::UNDEAD;
pub const SUBLEVELS_PER_GROUP: usize = 3;

const DEFAULT_SPAWN_RADIUS: u32 = 24;
const DEFAULT_SPAWN_DELAY: Duration = Duration::from_secs(5);
const DEFAULT_EXPIRE_DELAY: Duration = Duration::from_secs(10 * 60);

struct RosterGroup {
    monsters: &'static [&'static str],
    captain: Option<&'static str>,
    base_quota: u32,
}

const UNDEAD_GROUPS: [RosterGroup; 4] = [
    RosterGroup { monsters: &["Skeleton", "Zombie"], captain: None, base_quota: 16 },
    RosterGroup {
        monsters: &["BoneMagi", "SkeletalMage", "BoneKnight", "SkeletalKnight"],
        captain: None,
        base_quota: 24,
    },
    RosterGroup {
        monsters: &["WailingBanshee", "Wraith", "Spectre"],
        captain: Some("SkeletalLich"),
        base_quota: 32,
    },
    RosterGroup {
        monsters: &["RottingCorpse", "LichLord", "BoneDemon"],
        captain: Some("AncientLich"),
        base_quota: 40,
    },
];

const ARACHNID_GROUPS: [RosterGroup; 4] = [
    RosterGroup { monsters: &["Scorpion", "GiantSpider"], captain: None, base_quota: 16 },
    RosterGroup {
        monsters: &["TerathanDrone", "TerathanWarrior"],
        captain: None,
        base_quota: 24,
    },
    RosterGroup {
        monsters: &["DreadSpider", "TerathanMatriarch"],
        captain: Some("TerathanAvenger"),
        base_quota: 32,
    },
    RosterGroup {
        monsters: &["PoisonElemental", "TerathanAvenger"],
        captain: Some("TerathanMatriarch"),
        base_quota: 40,
    },
];

const COLD_BLOOD_GROUPS: [RosterGroup; 4] = [
    RosterGroup { monsters: &["Lizardman", "Snake"], captain: None, base_quota: 16 },
    RosterGroup {
        monsters: &["LavaLizard", "OphidianWarrior"],
        captain: None,
        base_quota: 24,
    },
    RosterGroup {
        monsters: &["Drake", "OphidianArchmage"],
        captain: Some("OphidianKnight"),
        base_quota: 32,
    },
    RosterGroup { monsters: &["Dragon", "OphidianKnight"], captain: Some("Wyrm"), base_quota: 40 },
];

const ABYSS_GROUPS: [RosterGroup; 4] = [
    RosterGroup { monsters: &["Mongbat", "Imp"], captain: None, base_quota: 16 },
    RosterGroup { monsters: &["Gargoyle", "Harpy"], captain: None, base_quota: 24 },
    RosterGroup {
        monsters: &["FireGargoyle", "StoneGargoyle"],
        captain: Some("GargoyleEnforcer"),
        base_quota: 32,
    },
    RosterGroup { monsters: &["Daemon", "Succubus"], captain: Some("Balron"), base_quota: 40 },
];

const VERMIN_GROUPS: [RosterGroup; 4] = [
    RosterGroup { monsters: &["GiantRat", "Slime"], captain: None, base_quota: 16 },
    RosterGroup { monsters: &["DireWolf", "Ratman"], captain: None, base_quota: 24 },
    RosterGroup {
        monsters: &["HellHound", "RatmanMage"],
        captain: Some("RatmanArcher"),
        base_quota: 32,
    },
    RosterGroup {
        monsters: &["RatmanArcher", "SilverSerpent"],
        captain: Some("PlagueBeast"),
        base_quota: 40,
    },
];

const DOPPELGANGER_GROUPS: [RosterGroup; 4] = [
    RosterGroup { monsters: &["Doppleganger"], captain: None, base_quota: 12 },
    RosterGroup { monsters: &["Doppleganger"], captain: None, base_quota: 18 },
    RosterGroup { monsters: &["Doppleganger"], captain: None, base_quota: 24 },
    RosterGroup { monsters: &["Doppleganger"], captain: None, base_quota: 30 },
];

const POLYMORPHIC_BOB_GROUPS: [RosterGroup; 4] = [
    RosterGroup { monsters: &["PolymorphicBob"], captain: None, base_quota: 12 },
    RosterGroup { monsters: &["PolymorphicBob"], captain: None, base_quota: 18 },
    RosterGroup { monsters: &["PolymorphicBob"], captain: None, base_quota: 24 },
    RosterGroup { monsters: &["PolymorphicBob"], captain: None, base_quota: 30 },
];

pub fn spawn_type_names() -> [&'static str; 7] {
    [
        keys::UNDEAD,
        keys::ARACHNID,
        keys::COLD_BLOOD,
        keys::ABYSS,
        keys::VERMIN,
        keys::DOPPELGANGER,
        keys::POLYMORPHIC_BOB,
    ]
}

/// Case-insensitive lookup of a built-in ladder.
pub fn lookup(spawn_type: &str) -> Option<LevelTable> {
    let name = spawn_type_names().into_iter().find(|name| name.eq_ignore_ascii_case(spawn_type))?;
    let groups: &[RosterGroup] = match name {
        keys::UNDEAD => &UNDEAD_GROUPS,
        keys::ARACHNID => &ARACHNID_GROUPS,
        keys::COLD_BLOOD => &COLD_BLOOD_GROUPS,
        keys::ABYSS => &ABYSS_GROUPS,
        keys::VERMIN => &VERMIN_GROUPS,
        keys::DOPPELGANGER => &DOPPELGANGER_GROUPS,
        _ => &POLYMORPHIC_BOB_GROUPS,
    };
    Some(build_ladder(name, groups))
}

/// Like [`lookup`], falling back to the default ladder for unknown names.
pub fn lookup_or_default(spawn_type: &str) -> LevelTable {
    lookup(spawn_type).unwrap_or_else(default_table)
}

pub fn default_table() -> LevelTable {
    build_ladder(DEFAULT_SPAWN_TYPE, &UNDEAD_GROUPS)
}

fn build_ladder(spawn_type: &str, groups: &[RosterGroup]) -> LevelTable {
    let mut levels = Vec::with_capacity(groups.len() * SUBLEVELS_PER_GROUP);
    for (group_index, group) in groups.iter().enumerate() {
        let is_last_group = group_index + 1 == groups.len();
        for sublevel in 0..SUBLEVELS_PER_GROUP {
            let kill_quota = group.base_quota + (sublevel as u32) * 4;
            let population_cap = kill_quota / 2;
            let mut level = LevelDefinition::new(group.monsters)
                .with_limits(kill_quota, population_cap, 4)
                .with_radius(DEFAULT_SPAWN_RADIUS)
                .with_delays(DEFAULT_SPAWN_DELAY, DEFAULT_EXPIRE_DELAY)
                .with_flags(SpawnFlags { avoid_players: true, ..SpawnFlags::NONE });
            if let Some(captain) = group.captain {
                level = level.with_captain(captain);
            }
            if is_last_group && sublevel + 1 == SUBLEVELS_PER_GROUP {
                level = level
                    .with_name_title("the Champion", &format!("of the {spawn_type}"))
                    .with_flags(SpawnFlags { prefer_far: true, ..SpawnFlags::NONE });
            }
            levels.push(level);
        }
    }
    LevelTable::new(spawn_type, levels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_ladder_is_well_formed() {
        for name in spawn_type_names() {
            let table = lookup(name).expect("builtin ladder should resolve");
            assert_eq!(table.spawn_type, name);
            assert_eq!(table.tier_count(), 4 * SUBLEVELS_PER_GROUP);
            for level in &table.levels {
                assert!(!level.monsters.is_empty(), "{name} has an empty roster");
                assert!(level.kill_quota >= level.population_cap);
            }
        }
    }

    #[test]
    fn lookup_is_case_insensitive_and_falls_back() {
        assert_eq!(lookup("coldblood").map(|table| table.spawn_type), Some("ColdBlood".into()));
        assert!(lookup("Pirates").is_none());
        assert_eq!(lookup_or_default("Pirates").spawn_type, DEFAULT_SPAWN_TYPE);
    }

    #[test]
    fn sublevels_share_rosters_and_groups_do_not() {
        let table = lookup(keys::ABYSS).expect("abyss ladder");
        assert!(table.same_roster(0, 1));
        assert!(table.same_roster(1, 2));
        assert!(!table.same_roster(2, 3));
    }

    #[test]
    fn shapeshifter_ladders_churn_on_every_tier() {
        let table = lookup(keys::DOPPELGANGER).expect("doppelganger ladder");
        assert!(!table.same_roster(0, 1));
    }
}
