//! Save-document migration and legacy-layout upgrade.

use serde_json::Value;

use super::error::SaveError;
use super::format::{current_timestamp, EditorSave, SAVE_VERSION};
use crate::models::{GridConfig, Play, Playbook};

/// Migrate a save document from an older version to the current one.
pub fn migrate_save(mut save: EditorSave) -> Result<EditorSave, SaveError> {
    let original_version = save.version;

    save = match save.version {
        0 => migrate_v0_to_v1(save)?,
        1 => save, // Current version, no migration needed
        v if v > SAVE_VERSION => {
            // Future version - might be compatible
            log::warn!("Loading save from future version {} (current: {})", v, SAVE_VERSION);
            save
        }
        _ => {
            return Err(SaveError::VersionMismatch { found: save.version, expected: SAVE_VERSION });
        }
    };

    save.version = SAVE_VERSION;
    save.update_timestamp();

    if original_version != SAVE_VERSION {
        log::info!("Migrated save from version {} to {}", original_version, SAVE_VERSION);
    }

    Ok(save)
}

/// Migrate from version 0 to version 1.
///
/// v0 documents predate the grid config and could carry a dangling
/// current-playbook pointer.
fn migrate_v0_to_v1(mut save: EditorSave) -> Result<EditorSave, SaveError> {
    log::info!("Migrating save from version 0 to 1");

    for playbook in &mut save.playbooks {
        if playbook.grid_config.column_names.is_empty() {
            playbook.grid_config = GridConfig::default();
        }
    }

    let current_is_valid = match &save.current_playbook_id {
        Some(id) => save.playbooks.iter().any(|p| &p.id == id),
        None => false,
    };
    if !current_is_valid {
        if save.current_playbook_id.is_some() {
            log::warn!("Current playbook pointer is dangling, resetting");
        }
        save.current_playbook_id = save.playbooks.first().map(|p| p.id.clone());
    }

    Ok(save)
}

/// Check if a save document needs migration.
pub fn needs_migration(save: &EditorSave) -> bool {
    save.version < SAVE_VERSION
}

/// Detect and upgrade a pre-playbook document.
///
/// The earliest layout persisted a bare array of plays, optionally an object
/// holding `plays` plus the grid `columnNames` alongside. Ids are preserved:
/// this is the same user's data changing shape, not an import.
pub fn upgrade_legacy(value: &Value) -> Option<EditorSave> {
    let (plays_value, column_names) = match value {
        Value::Array(_) => (value.clone(), None),
        Value::Object(map) if map.contains_key("plays") && !map.contains_key("playbooks") => {
            (map.get("plays")?.clone(), map.get("columnNames").cloned())
        }
        _ => return None,
    };

    let plays: Vec<Play> = serde_json::from_value(plays_value).ok()?;

    let mut playbook = Playbook::new("My Playbook");
    playbook.plays = plays;
    if let Some(names) = column_names.and_then(|v| serde_json::from_value::<Vec<String>>(v).ok()) {
        if !names.is_empty() {
            playbook.grid_config.column_names = names;
        }
    }

    log::info!("Upgraded legacy play-list document ({} plays)", playbook.plays.len());

    let current_playbook_id = Some(playbook.id.clone());
    Some(EditorSave {
        version: SAVE_VERSION,
        timestamp: current_timestamp(),
        playbooks: vec![playbook],
        current_playbook_id,
    })
}
