use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::route::{RouteSegment, RouteType};
use crate::field::{clamp_point, Point, PX_PER_YARD};

/// A player token on the field.
///
/// `role` is an advisory formation-slot tag ("C", "QB", "WR-L", ...); the
/// closed role set lives in [`crate::formation::Role`] and unknown tags are
/// simply never matched by formation lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub role: String,
    #[serde(default)]
    pub label: String,
    pub color: String,
    pub position: Point,
    /// Pre-snap relocation endpoint. When set, routes start here instead of
    /// at `position`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motion: Option<Point>,
    #[serde(default)]
    pub routes: Vec<RouteSegment>,
}

impl Player {
    pub fn new(role: &str, label: &str, color: &str, position: Point) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: role.to_string(),
            label: label.to_string(),
            color: color.to_string(),
            position,
            motion: None,
            routes: Vec::new(),
        }
    }

    /// The point routes are anchored to: the motion endpoint if one is set,
    /// else the base alignment.
    pub fn route_anchor(&self) -> Point {
        self.motion.unwrap_or(self.position)
    }

    /// Display polyline for the pre-snap motion: one yard back, across, then
    /// forward to the endpoint. `None` when the player has no motion.
    pub fn motion_display_path(&self) -> Option<Vec<Point>> {
        let end = self.motion?;
        let start = self.position;
        let offset = PX_PER_YARD;
        Some(vec![
            start,
            Point::new(start.x, start.y + offset),
            Point::new(end.x, end.y + offset),
            end,
        ])
    }

    pub fn route(&self, route_type: RouteType) -> Option<&RouteSegment> {
        self.routes.iter().find(|r| r.route_type == route_type)
    }

    /// Install `segment` as the unique occupant of its layer.
    pub fn set_route(&mut self, segment: RouteSegment) {
        self.routes.retain(|r| r.route_type != segment.route_type);
        self.routes.push(segment);
    }

    pub fn remove_route(&mut self, route_type: RouteType) -> bool {
        let before = self.routes.len();
        self.routes.retain(|r| r.route_type != route_type);
        self.routes.len() != before
    }

    /// Rigidly translate every route point, clamping each to field bounds.
    pub fn shift_routes(&mut self, dx: f32, dy: f32) {
        if dx == 0.0 && dy == 0.0 {
            return;
        }
        for route in &mut self.routes {
            for pt in &mut route.points {
                *pt = clamp_point(Point::new(pt.x + dx, pt.y + dy));
            }
        }
    }

    /// Regenerate this player's id and every owned route id.
    pub fn regenerate_ids(&mut self) {
        self.id = Uuid::new_v4().to_string();
        for route in &mut self.routes {
            route.regenerate_id();
        }
    }
}
