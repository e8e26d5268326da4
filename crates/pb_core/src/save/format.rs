use std::collections::HashSet;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::error::SaveError;
use crate::models::Playbook;

/// Current persisted document version.
pub const SAVE_VERSION: u32 = 1;

/// Unix-millisecond timestamp for save documents.
pub fn current_timestamp() -> u64 {
    Utc::now().timestamp_millis() as u64
}

/// Full persisted editor document: every playbook plus the current-playbook
/// pointer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorSave {
    /// Save format version for migration.
    pub version: u32,

    /// Save timestamp (unix milliseconds).
    pub timestamp: u64,

    pub playbooks: Vec<Playbook>,

    #[serde(default)]
    pub current_playbook_id: Option<String>,
}

impl Default for EditorSave {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSave {
    pub fn new() -> Self {
        let playbook = Playbook::new("My Playbook");
        let current_playbook_id = Some(playbook.id.clone());
        Self {
            version: SAVE_VERSION,
            timestamp: current_timestamp(),
            playbooks: vec![playbook],
            current_playbook_id,
        }
    }

    pub fn update_timestamp(&mut self) {
        self.timestamp = current_timestamp();
    }

    /// Structural sanity checks on a loaded document.
    pub fn validate(&self) -> Result<(), SaveError> {
        let mut playbook_ids = HashSet::new();
        for playbook in &self.playbooks {
            if !playbook_ids.insert(&playbook.id) {
                return Err(SaveError::Corrupted);
            }
            let mut play_ids = HashSet::new();
            for play in &playbook.plays {
                if !play_ids.insert(&play.id) {
                    return Err(SaveError::Corrupted);
                }
                let mut player_ids = HashSet::new();
                for player in &play.players {
                    if !player_ids.insert(&player.id) {
                        return Err(SaveError::Corrupted);
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Play;

    #[test]
    fn test_new_save_is_valid() {
        let save = EditorSave::new();
        assert_eq!(save.version, SAVE_VERSION);
        assert_eq!(save.playbooks.len(), 1);
        assert!(save.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_duplicate_playbook_ids() {
        let mut save = EditorSave::new();
        let dup = save.playbooks[0].clone();
        save.playbooks.push(dup);
        assert!(matches!(save.validate(), Err(SaveError::Corrupted)));
    }

    #[test]
    fn test_validate_rejects_duplicate_play_ids() {
        let mut save = EditorSave::new();
        let play = Play::new("Once");
        save.playbooks[0].plays.push(play.clone());
        save.playbooks[0].plays.push(play);
        assert!(matches!(save.validate(), Err(SaveError::Corrupted)));
    }
}
