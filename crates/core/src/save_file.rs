use std::fs;
use std::io;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::snapshot::ProgressionSnapshot;

pub const SAVE_FORMAT_VERSION: u32 = 1;

/// A progression snapshot on disk, wrapped with the metadata a loader needs
/// to reject files it does not understand.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SaveFile {
    pub format_version: u32,
    pub saved_at_unix_ms: u64,
    pub progression: ProgressionSnapshot,
}

impl SaveFile {
    pub fn new(progression: ProgressionSnapshot) -> Self {
        let saved_at_unix_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_millis() as u64);
        Self { format_version: SAVE_FORMAT_VERSION, saved_at_unix_ms, progression }
    }

    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;

        fs::write(&tmp_path, json)?;
        if let Err(err) = fs::rename(&tmp_path, path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(err);
        }

        tracing::debug!(path = %path.display(), "save file written");
        Ok(())
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        let save: Self = serde_json::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        if save.format_version != SAVE_FORMAT_VERSION {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("unsupported save format version {}", save.format_version),
            ));
        }
        Ok(save)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::AreaProgress;
    use tempfile::tempdir;

    fn sample() -> SaveFile {
        SaveFile {
            format_version: SAVE_FORMAT_VERSION,
            saved_at_unix_ms: 1_760_000_000_000,
            progression: ProgressionSnapshot {
                current_area_id: Some("ruins".into()),
                unlocked_areas: vec!["caverns".into(), "ruins".into()],
                completed_areas: vec!["caverns".into()],
                area_progress: vec![("ruins".into(), AreaProgress { current_floor: 2, highest_floor: 2 })],
            },
        }
    }

    #[test]
    fn atomic_write_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("saves").join("progress.json");

        let save = sample();
        save.write_atomic(&path).unwrap();
        assert!(path.exists());

        let loaded = SaveFile::load(&path).unwrap();
        assert_eq!(save, loaded);

        let tmp_path = path.with_extension("json.tmp");
        assert!(!tmp_path.exists());
    }

    #[test]
    fn failed_rename_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("progress.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("occupied"), "x").unwrap();

        assert!(sample().write_atomic(&path).is_err());
        assert!(!path.with_extension("json.tmp").exists());
        assert!(path.is_dir());
    }

    #[test]
    fn rejects_unknown_format_version() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("progress.json");

        let mut save = sample();
        save.format_version = SAVE_FORMAT_VERSION + 1;
        save.write_atomic(&path).unwrap();

        let err = SaveFile::load(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn garbage_is_invalid_data() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("progress.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(SaveFile::load(&path).unwrap_err().kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn new_stamps_current_version() {
        let save = SaveFile::new(ProgressionSnapshot::default());
        assert_eq!(save.format_version, SAVE_FORMAT_VERSION);
        assert!(save.saved_at_unix_ms > 0);
    }
}
