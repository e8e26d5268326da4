use std::fs::{rename, File};
use std::io::{Read, Write};
use std::path::Path;

use super::error::SaveError;
use super::format::EditorSave;
use super::migration::{migrate_save, upgrade_legacy};

/// File-backed persistence for the editor document.
///
/// Writes are atomic (temp file, fsync, rename). Reads transparently upgrade
/// the legacy pre-playbook layout and run version migrations; the upgraded
/// form replaces the legacy one on the next write. Last-writer-wins, single
/// active session assumed.
pub struct SaveManager;

impl SaveManager {
    pub fn save_to_path(path: &Path, save: &EditorSave) -> Result<(), SaveError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = serde_json::to_vec_pretty(save)?;

        // Atomic save: write to temp file, then rename
        let temp_path = path.with_extension("tmp");

        {
            let mut file = File::create(&temp_path)?;
            file.write_all(&data)?;
            file.flush()?;

            // sync_all ensures data is written to disk (portable fsync)
            file.sync_all()?;
        }

        rename(&temp_path, path)?;

        log::debug!("Saved {} bytes to {:?}", data.len(), path);
        Ok(())
    }

    pub fn load_from_path(path: &Path) -> Result<EditorSave, SaveError> {
        if !path.exists() {
            return Err(SaveError::FileNotFound { path: path.display().to_string() });
        }

        let mut file = File::open(path)?;
        let mut data = String::new();
        file.read_to_string(&mut data)?;

        let value: serde_json::Value = serde_json::from_str(&data)?;
        let save = if value.get("version").is_some() && value.get("playbooks").is_some() {
            serde_json::from_value(value)?
        } else if let Some(upgraded) = upgrade_legacy(&value) {
            upgraded
        } else {
            return Err(SaveError::Corrupted);
        };

        let save = migrate_save(save)?;
        save.validate()?;

        log::debug!("Loaded {} playbooks from {:?}", save.playbooks.len(), path);
        Ok(save)
    }
}
