//! Playbook exchange documents.
//!
//! Import accepts three shapes: a bare JSON array of plays (documents from
//! the earliest exports), an array of playbooks, or a single playbook
//! object. Every id at every level is regenerated on import so merged data
//! can never collide with existing identities.

use chrono::NaiveDate;
use serde_json::Value;

use crate::error::{PlaybookError, Result};
use crate::models::{Play, Playbook};

/// Recognized top-level layouts of an import document.
enum DocumentShape {
    EmptyArray,
    PlaybookArray,
    PlayArray,
    PlaybookObject,
    Unknown,
}

fn classify(value: &Value) -> DocumentShape {
    match value {
        Value::Array(items) if items.is_empty() => DocumentShape::EmptyArray,
        // Playbooks carry a `plays` key; bare plays carry `players` instead.
        Value::Array(items) if items[0].get("plays").is_some() => DocumentShape::PlaybookArray,
        Value::Array(_) => DocumentShape::PlayArray,
        Value::Object(map) if map.contains_key("plays") => DocumentShape::PlaybookObject,
        _ => DocumentShape::Unknown,
    }
}

/// Parse an import document into playbooks ready to merge.
pub fn import_playbooks(raw: &str) -> Result<Vec<Playbook>> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| PlaybookError::ImportParse(e.to_string()))?;

    let mut playbooks = match classify(&value) {
        DocumentShape::EmptyArray => Vec::new(),
        DocumentShape::PlaybookArray => serde_json::from_value::<Vec<Playbook>>(value)
            .map_err(|e| PlaybookError::ImportParse(e.to_string()))?,
        DocumentShape::PlayArray => {
            let plays: Vec<Play> = serde_json::from_value(value)
                .map_err(|e| PlaybookError::ImportParse(e.to_string()))?;
            vec![wrap_legacy_plays(plays)]
        }
        DocumentShape::PlaybookObject => vec![serde_json::from_value::<Playbook>(value)
            .map_err(|e| PlaybookError::ImportParse(e.to_string()))?],
        DocumentShape::Unknown => {
            return Err(PlaybookError::ImportParse("unrecognized document shape".to_string()));
        }
    };

    for playbook in &mut playbooks {
        playbook.regenerate_ids();
    }
    Ok(playbooks)
}

/// Wrap legacy bare plays in a fresh playbook. Their grid placements refer
/// to a grid that did not travel with them, so the plays arrive unplaced.
fn wrap_legacy_plays(mut plays: Vec<Play>) -> Playbook {
    for play in &mut plays {
        play.grid_position = None;
    }
    let mut playbook = Playbook::new("Imported Plays");
    playbook.plays = plays;
    playbook
}

/// Serialize a playbook as a shareable document.
pub fn export_playbook(playbook: &Playbook) -> String {
    serde_json::to_string_pretty(playbook).expect("playbook document serialization")
}

/// Suggested download filename carrying the export date.
pub fn export_filename(date: NaiveDate) -> String {
    format!("playbook-{}.json", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Play, RouteType};
    use crate::routes::RoutePreset;

    fn sample_playbook() -> Playbook {
        let mut playbook = Playbook::new("Offense");
        let mut play = Play::new_default("Opener");
        let receiver = play.players[2].id.clone();
        play.apply_route_preset(&receiver, RouteType::Primary, RoutePreset::Post);
        playbook.add_play(play);
        playbook
    }

    #[test]
    fn test_import_single_playbook_regenerates_ids() {
        let playbook = sample_playbook();
        let doc = export_playbook(&playbook);

        let imported = import_playbooks(&doc).unwrap();
        assert_eq!(imported.len(), 1);
        let copy = &imported[0];
        assert_eq!(copy.name, "Offense");
        assert_ne!(copy.id, playbook.id);
        assert_eq!(copy.plays.len(), 1);
        assert_ne!(copy.plays[0].id, playbook.plays[0].id);
        for (p, c) in playbook.plays[0].players.iter().zip(&copy.plays[0].players) {
            assert_ne!(p.id, c.id);
            assert_eq!(p.position, c.position);
        }
    }

    #[test]
    fn test_import_playbook_array() {
        let doc = format!(
            "[{},{}]",
            export_playbook(&sample_playbook()),
            export_playbook(&Playbook::new("Empty"))
        );
        let imported = import_playbooks(&doc).unwrap();
        assert_eq!(imported.len(), 2);
        assert_eq!(imported[0].plays.len(), 1);
    }

    #[test]
    fn test_import_legacy_play_array() {
        let mut play = Play::new_default("Legacy");
        play.grid_position = Some(crate::models::GridPosition { row: 0, column: 1 });
        let doc = serde_json::to_string(&vec![play.clone()]).unwrap();

        let imported = import_playbooks(&doc).unwrap();
        assert_eq!(imported.len(), 1);
        assert_eq!(imported[0].name, "Imported Plays");
        assert_eq!(imported[0].plays.len(), 1);
        assert_ne!(imported[0].plays[0].id, play.id);
        // Foreign grid placements do not travel.
        assert_eq!(imported[0].plays[0].grid_position, None);
    }

    #[test]
    fn test_import_empty_array_is_empty() {
        assert!(import_playbooks("[]").unwrap().is_empty());
    }

    #[test]
    fn test_import_rejects_malformed_documents() {
        assert!(matches!(import_playbooks("{"), Err(PlaybookError::ImportParse(_))));
        assert!(matches!(import_playbooks("42"), Err(PlaybookError::ImportParse(_))));
        assert!(matches!(
            import_playbooks(r#"{"name":"no plays key"}"#),
            Err(PlaybookError::ImportParse(_))
        ));
    }

    #[test]
    fn test_export_uses_camel_case_wire_names() {
        let doc = export_playbook(&sample_playbook());
        assert!(doc.contains("\"gridConfig\""));
        assert!(doc.contains("\"columnNames\""));
        assert!(doc.contains("\"createdAt\""));
    }

    #[test]
    fn test_export_filename_carries_date() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        assert_eq!(export_filename(date), "playbook-2026-08-06.json");
    }
}
