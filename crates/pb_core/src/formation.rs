//! Formation slots and role-based placement.
//!
//! Roles are a closed set: unknown tags make the calling operation a no-op
//! rather than trusting arbitrary strings. Each role maps to a canonical
//! alignment (yard offsets from center and the line of scrimmage) and a
//! default token color.

use serde::{Deserialize, Serialize};

use crate::field::{clamp_point, yards_to_point, Point, PX_PER_YARD};
use crate::models::{Play, Player};

/// Closed set of formation slot roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "C")]
    Center,
    #[serde(rename = "QB")]
    Quarterback,
    #[serde(rename = "WR-L")]
    WideLeft,
    #[serde(rename = "WR-R")]
    WideRight,
    #[serde(rename = "SL")]
    SlotLeft,
    #[serde(rename = "SR")]
    SlotRight,
}

/// Canonical alignment and default styling for a formation slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoleConfig {
    pub x_offset_yards: f32,
    pub depth_yards: f32,
    pub label: &'static str,
    pub color: &'static str,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Center,
        Role::Quarterback,
        Role::WideLeft,
        Role::WideRight,
        Role::SlotLeft,
        Role::SlotRight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Center => "C",
            Self::Quarterback => "QB",
            Self::WideLeft => "WR-L",
            Self::WideRight => "WR-R",
            Self::SlotLeft => "SL",
            Self::SlotRight => "SR",
        }
    }

    pub fn parse(tag: &str) -> Option<Role> {
        Self::ALL.iter().copied().find(|r| r.as_str() == tag)
    }

    pub fn config(&self) -> RoleConfig {
        match self {
            Self::Center => {
                RoleConfig { x_offset_yards: 0.0, depth_yards: -1.0, label: "", color: "#eab308" }
            }
            Self::Quarterback => {
                RoleConfig { x_offset_yards: 0.0, depth_yards: -4.0, label: "", color: "#ef4444" }
            }
            Self::WideLeft => {
                RoleConfig { x_offset_yards: -10.0, depth_yards: -1.0, label: "", color: "#3b82f6" }
            }
            Self::WideRight => {
                RoleConfig { x_offset_yards: 10.0, depth_yards: -1.0, label: "", color: "#ef4444" }
            }
            Self::SlotLeft => {
                RoleConfig { x_offset_yards: -5.0, depth_yards: -1.0, label: "", color: "#22c55e" }
            }
            Self::SlotRight => {
                RoleConfig { x_offset_yards: 5.0, depth_yards: -1.0, label: "", color: "#22c55e" }
            }
        }
    }

    /// Canonical drawing-space alignment for this slot.
    pub fn target_point(&self) -> Point {
        let cfg = self.config();
        yards_to_point(cfg.x_offset_yards, cfg.depth_yards)
    }
}

/// Which side of the formation the slot receiver lines up on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormationSide {
    StrongLeft,
    StrongRight,
}

/// Another player closer than this on both axes counts as occupying the spot.
pub const COLLISION_TOLERANCE_PX: f32 = 5.0;

/// Sideline-axis step taken per stacking attempt.
pub const STACK_STEP_YARDS: f32 = 1.5;

const MAX_STACK_ATTEMPTS: u32 = 5;

/// The fixed five-slot base formation for `side`.
fn formation_slots(side: FormationSide) -> [Role; 5] {
    let slot = match side {
        FormationSide::StrongLeft => Role::SlotLeft,
        FormationSide::StrongRight => Role::SlotRight,
    };
    [Role::Center, Role::Quarterback, Role::WideLeft, Role::WideRight, slot]
}

/// Rebuild a play's players as the five-slot base formation.
///
/// Slot `i` reuses the id and label of `players[i]` when present; role,
/// position and color come from the slot config. Routes and motion are
/// discarded: they were anchored to the alignment the formation just
/// replaced. Players beyond the slot count are dropped.
pub fn apply_formation(play: &mut Play, side: FormationSide) {
    let new_players = formation_slots(side)
        .iter()
        .enumerate()
        .map(|(i, role)| {
            let cfg = role.config();
            let mut player = Player::new(role.as_str(), cfg.label, cfg.color, role.target_point());
            if let Some(existing) = play.players.get(i) {
                player.id = existing.id.clone();
                player.label = existing.label.clone();
            }
            player
        })
        .collect();
    play.players = new_players;
}

/// Move one player to a role's canonical spot, restyling it for the role.
///
/// Collision avoidance: while any other player sits within the tolerance box
/// of the target on both axes, the target steps one stack increment along
/// the sideline axis, up to a bounded number of attempts; the final spot is
/// accepted even if still contested.
pub fn set_player_to_role(play: &mut Play, player_id: &str, role_tag: &str) {
    let Some(role) = Role::parse(role_tag) else { return };
    if play.player(player_id).is_none() {
        return;
    }

    let cfg = role.config();
    let mut target = role.target_point();
    for _ in 0..MAX_STACK_ATTEMPTS {
        let occupied = play.players.iter().any(|p| {
            p.id != player_id
                && (p.position.x - target.x).abs() < COLLISION_TOLERANCE_PX
                && (p.position.y - target.y).abs() < COLLISION_TOLERANCE_PX
        });
        if !occupied {
            break;
        }
        target.x += STACK_STEP_YARDS * PX_PER_YARD;
    }

    if let Some(player) = play.player_mut(player_id) {
        player.role = role.as_str().to_string();
        player.label = cfg.label.to_string();
        player.color = cfg.color.to_string();
        player.position = clamp_point(target);
    }
}
