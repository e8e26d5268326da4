use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::play::{GridPosition, Play};

/// Column labels for the playbook display grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridConfig {
    pub column_names: Vec<String>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            column_names: vec![
                "Column 1".to_string(),
                "Column 2".to_string(),
                "Column 3".to_string(),
            ],
        }
    }
}

/// A named collection of plays plus their grid assignment.
///
/// Grid invariant: at most one play occupies a given (row, column) cell;
/// assigning a second play to an occupied cell evicts the first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playbook {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub plays: Vec<Play>,
    #[serde(default)]
    pub grid_config: GridConfig,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Playbook {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            plays: Vec::new(),
            grid_config: GridConfig::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn play(&self, play_id: &str) -> Option<&Play> {
        self.plays.iter().find(|p| p.id == play_id)
    }

    pub fn play_mut(&mut self, play_id: &str) -> Option<&mut Play> {
        self.plays.iter_mut().find(|p| p.id == play_id)
    }

    pub fn add_play(&mut self, play: Play) -> String {
        let id = play.id.clone();
        self.plays.push(play);
        self.touch();
        id
    }

    pub fn remove_play(&mut self, play_id: &str) -> Option<Play> {
        let idx = self.plays.iter().position(|p| p.id == play_id)?;
        let play = self.plays.remove(idx);
        self.touch();
        Some(play)
    }

    /// Deep-copy a play with fresh ids; the copy arrives unplaced. Returns
    /// the copy's id.
    pub fn duplicate_play(&mut self, play_id: &str) -> Option<String> {
        let copy = self.play(play_id)?.duplicate();
        let id = copy.id.clone();
        self.plays.push(copy);
        self.touch();
        Some(id)
    }

    /// Place a play in a grid cell, evicting any current occupant.
    pub fn assign_play_to_cell(&mut self, play_id: &str, row: u32, column: u32) {
        if self.play(play_id).is_none() {
            return;
        }
        let cell = GridPosition { row, column };
        for play in &mut self.plays {
            if play.id != play_id && play.grid_position == Some(cell) {
                play.grid_position = None;
            }
        }
        if let Some(play) = self.play_mut(play_id) {
            play.grid_position = Some(cell);
        }
        self.touch();
    }

    pub fn clear_play_cell(&mut self, play_id: &str) {
        if let Some(play) = self.play_mut(play_id) {
            play.grid_position = None;
            self.touch();
        }
    }

    pub fn play_at_cell(&self, row: u32, column: u32) -> Option<&Play> {
        self.plays.iter().find(|p| p.grid_position == Some(GridPosition { row, column }))
    }

    /// Regenerate this playbook's id and the ids of everything it owns.
    /// Grid placements and names are untouched.
    pub fn regenerate_ids(&mut self) {
        self.id = Uuid::new_v4().to_string();
        for play in &mut self.plays {
            play.regenerate_ids();
        }
    }

    /// Deep copy with fresh ids at every level.
    pub fn duplicate(&self) -> Playbook {
        let mut copy = self.clone();
        copy.regenerate_ids();
        copy.name = format!("{} (Copy)", self.name);
        let now = Utc::now();
        copy.created_at = now;
        copy.updated_at = now;
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playbook_with_plays(n: usize) -> Playbook {
        let mut playbook = Playbook::new("Test Book");
        for i in 0..n {
            playbook.add_play(Play::new(format!("Play {}", i + 1)));
        }
        playbook
    }

    #[test]
    fn test_grid_single_occupancy() {
        let mut playbook = playbook_with_plays(2);
        let a = playbook.plays[0].id.clone();
        let b = playbook.plays[1].id.clone();

        playbook.assign_play_to_cell(&a, 0, 0);
        playbook.assign_play_to_cell(&b, 0, 0);

        assert_eq!(playbook.play(&a).unwrap().grid_position, None);
        assert_eq!(
            playbook.play(&b).unwrap().grid_position,
            Some(GridPosition { row: 0, column: 0 })
        );
        assert_eq!(playbook.play_at_cell(0, 0).unwrap().id, b);
    }

    #[test]
    fn test_assign_unknown_play_is_noop() {
        let mut playbook = playbook_with_plays(1);
        let a = playbook.plays[0].id.clone();
        playbook.assign_play_to_cell(&a, 1, 1);
        playbook.assign_play_to_cell("ghost", 1, 1);
        // The existing occupant is not evicted by a failed assignment.
        assert_eq!(playbook.play_at_cell(1, 1).unwrap().id, a);
    }

    #[test]
    fn test_duplicate_play_is_unplaced() {
        let mut playbook = playbook_with_plays(1);
        let a = playbook.plays[0].id.clone();
        playbook.assign_play_to_cell(&a, 2, 1);

        let copy_id = playbook.duplicate_play(&a).unwrap();
        assert_ne!(copy_id, a);
        assert_eq!(playbook.play(&copy_id).unwrap().grid_position, None);
        assert_eq!(playbook.play(&a).unwrap().grid_position, Some(GridPosition { row: 2, column: 1 }));
    }

    #[test]
    fn test_duplicate_playbook_regenerates_all_ids() {
        let mut playbook = playbook_with_plays(2);
        playbook.plays[0].players.push(crate::models::Player::new(
            "QB",
            "",
            "#ef4444",
            crate::field::yards_to_point(0.0, -4.0),
        ));

        let copy = playbook.duplicate();

        assert_ne!(copy.id, playbook.id);
        assert_eq!(copy.name, "Test Book (Copy)");
        assert_eq!(copy.plays.len(), 2);
        for (p, c) in playbook.plays.iter().zip(&copy.plays) {
            assert_ne!(p.id, c.id);
            assert_eq!(p.name, c.name);
        }
        assert_ne!(copy.plays[0].players[0].id, playbook.plays[0].players[0].id);
    }
}
