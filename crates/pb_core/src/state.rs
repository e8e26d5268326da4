//! Editing session state.
//!
//! `EditorState` is an explicit context object passed to (or owned by) the
//! host UI for the duration of an editing session. It holds every playbook,
//! the current-playbook/play/player selection, and the modal interaction
//! state. It is rehydrated from the persisted document at startup and
//! converted back after every change.
//!
//! Invariants: at least one playbook always exists, and exactly one of them
//! is current. Selection-dependent operations are no-ops when nothing is
//! selected.

use crate::error::{PlaybookError, Result};
use crate::field::{clamp_point, Point};
use crate::formation::{self, FormationSide};
use crate::models::{Play, Playbook, Player, RouteType};
use crate::routes::RoutePreset;
use crate::save::{current_timestamp, EditorSave, SAVE_VERSION};
use crate::transfer;

/// Modal input states for the editing session.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionMode {
    /// No modal interaction active.
    Idle,
    /// Free-hand route drawing for the selected player.
    Drawing { route_type: RouteType, points: Vec<Point> },
    /// Waiting for a motion-target player click.
    MotionTarget,
}

#[derive(Debug, Clone)]
pub struct EditorState {
    pub playbooks: Vec<Playbook>,
    current_playbook_id: String,
    current_play_id: Option<String>,
    selected_player_id: Option<String>,
    mode: InteractionMode,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorState {
    /// A fresh session with one empty playbook.
    pub fn new() -> Self {
        let playbook = Playbook::new("My Playbook");
        let current_playbook_id = playbook.id.clone();
        Self {
            playbooks: vec![playbook],
            current_playbook_id,
            current_play_id: None,
            selected_player_id: None,
            mode: InteractionMode::Idle,
        }
    }

    /// Rehydrate a session from a persisted document.
    pub fn from_save(save: &EditorSave) -> Self {
        let mut playbooks = save.playbooks.clone();
        if playbooks.is_empty() {
            playbooks.push(Playbook::new("My Playbook"));
        }
        let current_playbook_id = save
            .current_playbook_id
            .as_ref()
            .filter(|id| playbooks.iter().any(|p| p.id == **id))
            .cloned()
            .unwrap_or_else(|| playbooks[0].id.clone());
        Self {
            playbooks,
            current_playbook_id,
            current_play_id: None,
            selected_player_id: None,
            mode: InteractionMode::Idle,
        }
    }

    /// Convert the session to its persisted form.
    pub fn to_save(&self) -> EditorSave {
        EditorSave {
            version: SAVE_VERSION,
            timestamp: current_timestamp(),
            playbooks: self.playbooks.clone(),
            current_playbook_id: Some(self.current_playbook_id.clone()),
        }
    }

    // ========================
    // Playbook Management
    // ========================

    pub fn playbook(&self, id: &str) -> Option<&Playbook> {
        self.playbooks.iter().find(|p| p.id == id)
    }

    pub fn playbook_mut(&mut self, id: &str) -> Option<&mut Playbook> {
        self.playbooks.iter_mut().find(|p| p.id == id)
    }

    pub fn current_playbook(&self) -> &Playbook {
        self.playbooks
            .iter()
            .find(|p| p.id == self.current_playbook_id)
            .expect("current playbook id is always valid")
    }

    pub fn current_playbook_mut(&mut self) -> &mut Playbook {
        let id = self.current_playbook_id.clone();
        self.playbooks
            .iter_mut()
            .find(|p| p.id == id)
            .expect("current playbook id is always valid")
    }

    /// Create a playbook and make it current. Returns its id.
    pub fn create_playbook(&mut self, name: &str) -> String {
        let playbook = Playbook::new(name);
        let id = playbook.id.clone();
        self.playbooks.push(playbook);
        self.set_current_playbook(&id);
        id
    }

    pub fn rename_playbook(&mut self, id: &str, name: &str) {
        if let Some(playbook) = self.playbook_mut(id) {
            playbook.name = name.to_string();
            playbook.touch();
        }
    }

    /// Delete a playbook. The last remaining playbook cannot be deleted;
    /// deleting the current one moves "current" to the first remaining.
    pub fn delete_playbook(&mut self, id: &str) -> Result<()> {
        if self.playbooks.len() <= 1 {
            return Err(PlaybookError::LastPlaybook);
        }
        let idx = self
            .playbooks
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| PlaybookError::PlaybookNotFound(id.to_string()))?;
        self.playbooks.remove(idx);
        if self.current_playbook_id == id {
            self.current_playbook_id = self.playbooks[0].id.clone();
            self.clear_selection();
        }
        Ok(())
    }

    /// Deep-copy a playbook with fresh ids and make the copy current.
    pub fn duplicate_playbook(&mut self, id: &str) -> Option<String> {
        let copy = self.playbook(id)?.duplicate();
        let copy_id = copy.id.clone();
        self.playbooks.push(copy);
        self.set_current_playbook(&copy_id);
        Some(copy_id)
    }

    pub fn set_current_playbook(&mut self, id: &str) {
        if self.playbooks.iter().any(|p| p.id == id) {
            self.current_playbook_id = id.to_string();
            self.clear_selection();
        }
    }

    pub fn current_playbook_id(&self) -> &str {
        &self.current_playbook_id
    }

    // ========================
    // Play Management
    // ========================

    pub fn current_play(&self) -> Option<&Play> {
        let id = self.current_play_id.as_ref()?;
        self.current_playbook().play(id)
    }

    pub fn current_play_mut(&mut self) -> Option<&mut Play> {
        let id = self.current_play_id.clone()?;
        self.current_playbook_mut().play_mut(&id)
    }

    pub fn current_play_id(&self) -> Option<&str> {
        self.current_play_id.as_deref()
    }

    /// Create a play with the default alignment in the current playbook and
    /// make it current. Returns its id.
    pub fn new_play(&mut self) -> String {
        let name = format!("Play {}", self.current_playbook().plays.len() + 1);
        let play = Play::new_default(name);
        let id = self.current_playbook_mut().add_play(play);
        self.current_play_id = Some(id.clone());
        self.selected_player_id = None;
        self.mode = InteractionMode::Idle;
        id
    }

    pub fn delete_play(&mut self, play_id: &str) {
        if self.current_playbook_mut().remove_play(play_id).is_some()
            && self.current_play_id.as_deref() == Some(play_id)
        {
            self.clear_selection();
        }
    }

    /// Duplicate a play in the current playbook and select the copy.
    pub fn duplicate_play(&mut self, play_id: &str) -> Option<String> {
        let copy_id = self.current_playbook_mut().duplicate_play(play_id)?;
        self.current_play_id = Some(copy_id.clone());
        self.selected_player_id = None;
        Some(copy_id)
    }

    pub fn rename_play(&mut self, play_id: &str, name: &str) {
        let playbook = self.current_playbook_mut();
        if let Some(play) = playbook.play_mut(play_id) {
            play.name = name.to_string();
            playbook.touch();
        }
    }

    pub fn set_current_play(&mut self, play_id: Option<&str>) {
        match play_id {
            Some(id) if self.current_playbook().play(id).is_some() => {
                self.current_play_id = Some(id.to_string());
            }
            _ => self.current_play_id = None,
        }
        self.selected_player_id = None;
        self.mode = InteractionMode::Idle;
    }

    // ========================
    // Player Selection & Edits
    // ========================

    pub fn selected_player(&self) -> Option<&Player> {
        let play = self.current_play()?;
        play.player(self.selected_player_id.as_deref()?)
    }

    pub fn selected_player_id(&self) -> Option<&str> {
        self.selected_player_id.as_deref()
    }

    pub fn select_player(&mut self, player_id: Option<&str>) {
        self.selected_player_id = match player_id {
            Some(id) if self.current_play().map_or(false, |p| p.player(id).is_some()) => {
                Some(id.to_string())
            }
            _ => None,
        };
    }

    fn clear_selection(&mut self) {
        self.current_play_id = None;
        self.selected_player_id = None;
        self.mode = InteractionMode::Idle;
    }

    /// Add a player to the current play and select it.
    pub fn add_player(&mut self) -> Option<String> {
        let id = self.current_play_mut()?.add_player();
        self.selected_player_id = Some(id.clone());
        Some(id)
    }

    pub fn apply_formation_to_current(&mut self, side: FormationSide) {
        if let Some(play) = self.current_play_mut() {
            formation::apply_formation(play, side);
        }
        // The rebuild may have dropped the selected player.
        self.selected_player_id = None;
    }

    pub fn set_selected_player_role(&mut self, role_tag: &str) {
        let Some(player_id) = self.selected_player_id.clone() else { return };
        if let Some(play) = self.current_play_mut() {
            formation::set_player_to_role(play, &player_id, role_tag);
        }
    }

    pub fn apply_preset_to_selection(&mut self, route_type: RouteType, preset: RoutePreset) {
        let Some(player_id) = self.selected_player_id.clone() else { return };
        if let Some(play) = self.current_play_mut() {
            play.apply_route_preset(&player_id, route_type, preset);
        }
    }

    pub fn clear_selected_routes(&mut self) {
        let Some(player_id) = self.selected_player_id.clone() else { return };
        if let Some(play) = self.current_play_mut() {
            play.clear_routes(&player_id);
        }
    }

    pub fn clear_selected_motion(&mut self) {
        let Some(player_id) = self.selected_player_id.clone() else { return };
        if let Some(play) = self.current_play_mut() {
            play.clear_motion(&player_id);
        }
    }

    // ========================
    // Modal Interactions
    // ========================

    pub fn mode(&self) -> &InteractionMode {
        &self.mode
    }

    /// Enter drawing mode for the selected player, seeding the polyline at
    /// the player's route anchor.
    pub fn start_drawing(&mut self, route_type: RouteType) {
        let Some(anchor) = self.selected_player().map(|p| p.route_anchor()) else { return };
        self.mode = InteractionMode::Drawing { route_type, points: vec![anchor] };
    }

    /// Append a raw field click to the in-progress polyline.
    pub fn add_draw_point(&mut self, raw: Point) {
        if let InteractionMode::Drawing { points, .. } = &mut self.mode {
            points.push(clamp_point(raw));
        }
    }

    /// Install the in-progress polyline on the selected player and leave
    /// drawing mode.
    pub fn finish_drawing(&mut self) {
        let mode = std::mem::replace(&mut self.mode, InteractionMode::Idle);
        match mode {
            InteractionMode::Drawing { route_type, points } => {
                let Some(player_id) = self.selected_player_id.clone() else { return };
                if let Some(play) = self.current_play_mut() {
                    play.install_route(&player_id, route_type, points);
                }
            }
            other => self.mode = other,
        }
    }

    /// Enter motion-targeting mode for the selected player.
    pub fn begin_motion_target(&mut self) {
        if self.selected_player().is_some() {
            self.mode = InteractionMode::MotionTarget;
        }
    }

    /// Resolve motion-targeting with the clicked player and leave the mode.
    pub fn complete_motion_target(&mut self, target_player_id: &str) {
        if self.mode != InteractionMode::MotionTarget {
            return;
        }
        self.mode = InteractionMode::Idle;
        let Some(player_id) = self.selected_player_id.clone() else { return };
        if let Some(play) = self.current_play_mut() {
            play.set_motion(&player_id, target_player_id);
        }
    }

    /// Leave any modal interaction, discarding in-progress drawing points.
    pub fn cancel(&mut self) {
        self.mode = InteractionMode::Idle;
    }

    // ========================
    // Exchange
    // ========================

    /// Merge an import document into the collection. Every imported id is
    /// regenerated; malformed input leaves the collection untouched.
    /// Returns the number of imported plays.
    pub fn import_document(&mut self, raw: &str) -> Result<usize> {
        let imported = transfer::import_playbooks(raw)?;
        let count = imported.iter().map(|p| p.plays.len()).sum();
        self.playbooks.extend(imported);
        log::info!("Imported {} plays", count);
        Ok(count)
    }

    /// Export the current playbook as a shareable document.
    pub fn export_current_playbook(&self) -> String {
        transfer::export_playbook(self.current_playbook())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_has_one_current_playbook() {
        let state = EditorState::new();
        assert_eq!(state.playbooks.len(), 1);
        assert_eq!(state.current_playbook().id, state.current_playbook_id().to_string());
    }

    #[test]
    fn test_last_playbook_cannot_be_deleted() {
        let mut state = EditorState::new();
        let id = state.current_playbook_id().to_string();
        let result = state.delete_playbook(&id);
        assert!(matches!(result, Err(PlaybookError::LastPlaybook)));
        assert_eq!(state.playbooks.len(), 1);
    }

    #[test]
    fn test_delete_current_playbook_falls_back() {
        let mut state = EditorState::new();
        let first = state.current_playbook_id().to_string();
        let second = state.create_playbook("Second");
        assert_eq!(state.current_playbook_id(), second);

        state.new_play();
        state.delete_playbook(&second).unwrap();

        assert_eq!(state.current_playbook_id(), first);
        assert!(state.current_play().is_none());
    }

    #[test]
    fn test_new_play_becomes_current() {
        let mut state = EditorState::new();
        let id = state.new_play();
        assert_eq!(state.current_play().unwrap().id, id);
        assert_eq!(state.current_play().unwrap().players.len(), 5);
    }

    #[test]
    fn test_delete_current_play_clears_selection() {
        let mut state = EditorState::new();
        let id = state.new_play();
        let player_id = state.current_play().unwrap().players[0].id.clone();
        state.select_player(Some(&player_id));
        assert!(state.selected_player().is_some());

        state.delete_play(&id);

        assert!(state.current_play().is_none());
        assert!(state.selected_player().is_none());
    }

    #[test]
    fn test_selection_ops_without_selection_are_noops() {
        let mut state = EditorState::new();
        state.new_play();
        let before = state.current_play().unwrap().clone();

        state.apply_preset_to_selection(RouteType::Primary, RoutePreset::Go);
        state.clear_selected_routes();
        state.set_selected_player_role("QB");
        state.start_drawing(RouteType::Primary);

        assert_eq!(state.current_play().unwrap(), &before);
        assert_eq!(state.mode(), &InteractionMode::Idle);
    }

    #[test]
    fn test_drawing_flow_installs_hand_drawn_route() {
        let mut state = EditorState::new();
        state.new_play();
        let player_id = state.current_play().unwrap().players[2].id.clone();
        state.select_player(Some(&player_id));

        state.start_drawing(RouteType::Option);
        state.add_draw_point(Point::new(200.0, 300.0));
        state.add_draw_point(Point::new(-50.0, 250.0)); // clamped
        state.finish_drawing();

        let play = state.current_play().unwrap();
        let route = play.player(&player_id).unwrap().route(RouteType::Option).unwrap();
        assert_eq!(route.points.len(), 3);
        assert_eq!(route.points[0], play.player(&player_id).unwrap().route_anchor());
        assert_eq!(route.points[2].x, crate::field::BOUNDARY_PADDING);
        assert_eq!(route.preset, None);
        assert_eq!(state.mode(), &InteractionMode::Idle);
    }

    #[test]
    fn test_cancel_discards_drawing() {
        let mut state = EditorState::new();
        state.new_play();
        let player_id = state.current_play().unwrap().players[2].id.clone();
        state.select_player(Some(&player_id));

        state.start_drawing(RouteType::Primary);
        state.add_draw_point(Point::new(200.0, 300.0));
        state.cancel();

        assert_eq!(state.mode(), &InteractionMode::Idle);
        assert!(state.current_play().unwrap().player(&player_id).unwrap().routes.is_empty());
    }

    #[test]
    fn test_motion_target_flow() {
        let mut state = EditorState::new();
        state.new_play();
        let mover = state.current_play().unwrap().players[2].id.clone();
        let target = state.current_play().unwrap().players[4].id.clone();
        state.select_player(Some(&mover));

        state.begin_motion_target();
        assert_eq!(state.mode(), &InteractionMode::MotionTarget);
        state.complete_motion_target(&target);

        let play = state.current_play().unwrap();
        let motion = play.player(&mover).unwrap().motion.unwrap();
        assert_eq!(motion.x, play.player(&target).unwrap().position.x);
        assert_eq!(state.mode(), &InteractionMode::Idle);
    }

    #[test]
    fn test_import_merges_and_counts() {
        let mut state = EditorState::new();
        let doc = state.export_current_playbook();
        // Seed the exported book with a play first.
        state.new_play();
        let doc_with_play = state.export_current_playbook();

        let count = state.import_document(&doc_with_play).unwrap();
        assert_eq!(count, 1);
        assert_eq!(state.playbooks.len(), 2);

        let count = state.import_document(&doc).unwrap();
        assert_eq!(count, 0);
        assert_eq!(state.playbooks.len(), 3);
    }

    #[test]
    fn test_import_failure_leaves_state_untouched() {
        let mut state = EditorState::new();
        state.new_play();
        let before = state.playbooks.clone();

        let result = state.import_document("not json at all{");
        assert!(matches!(result, Err(PlaybookError::ImportParse(_))));
        assert_eq!(state.playbooks, before);
    }

    #[test]
    fn test_save_round_trip_preserves_current_pointer() {
        let mut state = EditorState::new();
        state.create_playbook("Second");
        state.new_play();
        let save = state.to_save();

        let restored = EditorState::from_save(&save);
        assert_eq!(restored.current_playbook_id(), state.current_playbook_id());
        assert_eq!(restored.playbooks.len(), 2);
        // Selection is session-local and does not survive rehydration.
        assert!(restored.current_play().is_none());
    }
}
