//! On-disk snapshot of a shard's encounters.
//!
//! The file is a single JSON envelope: `format_version`, `saved_at`, the
//! encounter records serialized to a string, and `sha256_hex` over exactly that
//! string. Writes go to a temporary sibling first and are renamed into place.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::encounter::{EncounterSave, SAVE_FORMAT_VERSION};
use crate::error::SaveFileError;
use crate::types::Timestamp;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
struct Envelope {
    format_version: u16,
    saved_at: Timestamp,
    sha256_hex: String,
    payload: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SaveFile {
    pub saved_at: Timestamp,
    pub encounters: Vec<EncounterSave>,
}

fn payload_sha256(payload: &str) -> String {
    let digest = Sha256::digest(payload.as_bytes());
    format!("{digest:064x}")
}

impl SaveFile {
    pub fn new(saved_at: Timestamp, encounters: Vec<EncounterSave>) -> Self {
        Self { saved_at, encounters }
    }

    pub fn write_atomic(&self, path: &Path) -> Result<(), SaveFileError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let payload = serde_json::to_string(&self.encounters)?;
        let envelope = Envelope {
            format_version: SAVE_FORMAT_VERSION,
            saved_at: self.saved_at,
            sha256_hex: payload_sha256(&payload),
            payload,
        };
        let json = serde_json::to_string_pretty(&envelope)?;

        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;
        debug!(path = %path.display(), encounters = self.encounters.len(), "save file written");
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, SaveFileError> {
        let content = fs::read_to_string(path)?;
        let envelope: Envelope = serde_json::from_str(&content)?;
        if envelope.format_version != SAVE_FORMAT_VERSION {
            return Err(SaveFileError::UnsupportedVersion(envelope.format_version));
        }
        let found = payload_sha256(&envelope.payload);
        if found != envelope.sha256_hex {
            return Err(SaveFileError::ChecksumMismatch { expected: envelope.sha256_hex, found });
        }
        let encounters = serde_json::from_str(&envelope.payload)?;
        Ok(Self { saved_at: envelope.saved_at, encounters })
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::config::EngineConfig;
    use crate::encounter::Encounter;
    use crate::host::WorldHost;
    use crate::sandbox::SandboxWorld;
    use crate::types::Point;

    fn running_save(world: &mut SandboxWorld) -> EncounterSave {
        let mut encounter =
            Encounter::new("crypt", Point::new(10, 20, 0), &EngineConfig::default());
        encounter.set_running(world, true);
        encounter.save(world.now())
    }

    #[test]
    fn write_then_load_preserves_records() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shard").join("spawns.json");
        let mut world = SandboxWorld::new();
        let file = SaveFile::new(Timestamp(42), vec![running_save(&mut world)]);

        file.write_atomic(&path).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());

        assert_eq!(SaveFile::load(&path).unwrap(), file);
    }

    #[test]
    fn tampered_payload_fails_checksum() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("spawns.json");
        let mut world = SandboxWorld::new();
        SaveFile::new(Timestamp(0), vec![running_save(&mut world)]).write_atomic(&path).unwrap();

        let mut envelope: Envelope =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        envelope.payload = envelope.payload.replace("crypt", "tomb!");
        fs::write(&path, serde_json::to_string(&envelope).unwrap()).unwrap();

        assert!(matches!(SaveFile::load(&path), Err(SaveFileError::ChecksumMismatch { .. })));
    }

    #[test]
    fn future_versions_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("spawns.json");
        let envelope = Envelope {
            format_version: SAVE_FORMAT_VERSION + 1,
            saved_at: Timestamp(0),
            sha256_hex: payload_sha256("[]"),
            payload: "[]".to_string(),
        };
        fs::write(&path, serde_json::to_string(&envelope).unwrap()).unwrap();

        assert!(matches!(SaveFile::load(&path), Err(SaveFileError::UnsupportedVersion(2))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            SaveFile::load(&dir.path().join("absent.json")),
            Err(SaveFileError::Io(_))
        ));
    }
}
