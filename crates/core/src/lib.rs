pub mod catalog;
pub mod config;
pub mod encounter;
pub mod error;
pub mod feedback;
pub mod host;
pub mod ledger;
pub mod levels;
pub mod sandbox;
pub mod save_file;
pub mod shard;
pub mod timer;
pub mod types;

pub use config::{CreatureOverrides, EngineConfig};
pub use encounter::{Encounter, EncounterSave};
pub use error::{ConfigError, SaveFileError, SpawnError};
pub use feedback::{Progress, SkullDisplay};
pub use host::{CreatureSetup, WorldHost};
pub use levels::{LevelDefinition, LevelTable};
pub use sandbox::SandboxWorld;
pub use save_file::SaveFile;
pub use shard::Shard;
pub use types::*;
