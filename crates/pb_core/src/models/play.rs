use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::player::Player;
use super::route::{RouteSegment, RouteType};
use crate::field::{clamp_point, yards_to_point, Point};
use crate::formation::{apply_formation, FormationSide};
use crate::routes::{generate_route, RoutePreset};

/// Grid cell placement inside the parent playbook's display grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPosition {
    pub row: u32,
    pub column: u32,
}

/// One diagrammed play: a set of players with positions, optional pre-snap
/// motion, and per-layer routes.
///
/// All mutation methods are total: unknown player ids leave the play
/// unchanged. Route-translation invariant: moving a player's alignment or
/// motion endpoint rigidly translates every route point anchored to it, so
/// drawn routes stay attached to the release point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Play {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ball_position: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_position: Option<GridPosition>,
}

impl Play {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: None,
            players: Vec::new(),
            ball_position: None,
            grid_position: None,
        }
    }

    /// A fresh play populated with the default five-player alignment.
    pub fn new_default(name: impl Into<String>) -> Self {
        let mut play = Self::new(name);
        apply_formation(&mut play, FormationSide::StrongRight);
        play
    }

    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    pub fn player_mut(&mut self, player_id: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == player_id)
    }

    /// Append a new receiver with default styling; returns its id.
    pub fn add_player(&mut self) -> String {
        let player = Player::new("WR-L", "", "#3b82f6", yards_to_point(-5.0, 0.0));
        let id = player.id.clone();
        self.players.push(player);
        id
    }

    pub fn remove_player(&mut self, player_id: &str) -> Option<Player> {
        let idx = self.players.iter().position(|p| p.id == player_id)?;
        Some(self.players.remove(idx))
    }

    /// Move a player's base alignment, dragging any attached routes along.
    pub fn move_player(&mut self, player_id: &str, new_position: Point) {
        let Some(player) = self.player_mut(player_id) else { return };
        let new_position = clamp_point(new_position);
        let dx = new_position.x - player.position.x;
        let dy = new_position.y - player.position.y;
        player.position = new_position;
        player.shift_routes(dx, dy);
    }

    /// Send a player in motion: the endpoint aligns horizontally with the
    /// target player while keeping the mover's own depth. Existing routes
    /// translate with the anchor so they stay attached to the release point.
    pub fn set_motion(&mut self, player_id: &str, target_player_id: &str) {
        let Some(target_x) = self.player(target_player_id).map(|p| p.position.x) else { return };
        let Some(player) = self.player_mut(player_id) else { return };
        let end = clamp_point(Point::new(target_x, player.position.y));
        let anchor = player.route_anchor();
        player.motion = Some(end);
        player.shift_routes(end.x - anchor.x, end.y - anchor.y);
    }

    /// Remove a player's motion, re-anchoring routes to the base alignment.
    pub fn clear_motion(&mut self, player_id: &str) {
        let Some(player) = self.player_mut(player_id) else { return };
        let Some(motion) = player.motion.take() else { return };
        player.shift_routes(player.position.x - motion.x, player.position.y - motion.y);
    }

    /// Generate a preset route from the player's anchor and install it on
    /// `route_type`. Re-applying the preset already on that layer removes it
    /// instead (second click clears).
    pub fn apply_route_preset(
        &mut self,
        player_id: &str,
        route_type: RouteType,
        preset: RoutePreset,
    ) {
        let Some(player) = self.player_mut(player_id) else { return };
        if player.route(route_type).map_or(false, |r| r.preset == Some(preset)) {
            player.remove_route(route_type);
            return;
        }
        let points = generate_route(player.route_anchor(), preset);
        player.set_route(RouteSegment::new(route_type, points, Some(preset)));
    }

    /// Install a hand-drawn polyline as the unique occupant of `route_type`.
    pub fn install_route(&mut self, player_id: &str, route_type: RouteType, points: Vec<Point>) {
        let Some(player) = self.player_mut(player_id) else { return };
        player.set_route(RouteSegment::new(route_type, points, None));
    }

    /// Remove every route layer for a player.
    pub fn clear_routes(&mut self, player_id: &str) {
        if let Some(player) = self.player_mut(player_id) {
            player.routes.clear();
        }
    }

    /// Regenerate this play's id and the ids of everything it owns.
    pub fn regenerate_ids(&mut self) {
        self.id = Uuid::new_v4().to_string();
        for player in &mut self.players {
            player.regenerate_ids();
        }
    }

    /// Deep copy with fresh ids at every level. The copy is left unplaced in
    /// the grid.
    pub fn duplicate(&self) -> Play {
        let mut copy = self.clone();
        copy.regenerate_ids();
        copy.name = format!("{} (Copy)", self.name);
        copy.grid_position = None;
        copy
    }
}
