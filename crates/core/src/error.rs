use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Creature instantiation failures. Kept as the encounter's sticky spawn fault.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum SpawnError {
    #[error("no creature factory registered for type `{0}`")]
    UnknownCreatureType(String),
    #[error("factory for `{type_name}` failed: {reason}")]
    FactoryFailed { type_name: String, reason: String },
    #[error("tier {tier_index} has no candidate creature types")]
    EmptyRoster { tier_index: usize },
}

#[derive(Debug, Error)]
pub enum SaveFileError {
    #[error("save file I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("save file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("save payload checksum mismatch (expected {expected}, found {found})")]
    ChecksumMismatch { expected: String, found: String },
    #[error("unsupported save format version {0}")]
    UnsupportedVersion(u16),
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("level scale must be finite and within [{min}, {max}], got {value}")]
    InvalidLevelScale { value: f32, min: f32, max: f32 },
    #[error("unknown spawn type `{0}`")]
    UnknownSpawnType(String),
    #[error("heartbeat interval must be positive")]
    ZeroHeartbeat,
    #[error("level table `{0}` has no tiers")]
    EmptyLevelTable(String),
}
