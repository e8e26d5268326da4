//! Route preset catalog and polyline generation.
//!
//! Each preset is a fixed script of one to three pen moves in yard units.
//! Horizontal deltas are expressed relative to which side of the field center
//! the start point lies: `dir_in` points toward the ball, `dir_out` toward
//! the near sideline. The same preset therefore breaks mirror-image when
//! applied from the opposite half of the field.

use serde::{Deserialize, Serialize};

use crate::field::{clamp_point, depth_to_y, field_center_x, Point, PX_PER_YARD};

/// Named route presets offered by the editor.
///
/// Wire ids are pinned for document compatibility; the yard scripts live in
/// [`generate_route`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoutePreset {
    #[serde(rename = "hitch")]
    Hitch,
    #[serde(rename = "out-5")]
    Out5,
    #[serde(rename = "out-10")]
    Out10,
    #[serde(rename = "in-5")]
    In5,
    #[serde(rename = "in-10")]
    In10,
    #[serde(rename = "inside-release-in-5")]
    InsideReleaseIn5,
    #[serde(rename = "slant")]
    Slant,
    #[serde(rename = "post")]
    Post,
    #[serde(rename = "post-in")]
    PostIn,
    #[serde(rename = "post-hook")]
    PostHook,
    #[serde(rename = "corner")]
    Corner,
    #[serde(rename = "go")]
    Go,
    #[serde(rename = "comeback")]
    Comeback,
    #[serde(rename = "cross")]
    Cross,
}

impl RoutePreset {
    /// Catalog order, as presented to route pickers.
    pub const ALL: [RoutePreset; 14] = [
        RoutePreset::Hitch,
        RoutePreset::Out5,
        RoutePreset::Out10,
        RoutePreset::In5,
        RoutePreset::In10,
        RoutePreset::InsideReleaseIn5,
        RoutePreset::Slant,
        RoutePreset::Post,
        RoutePreset::PostIn,
        RoutePreset::PostHook,
        RoutePreset::Corner,
        RoutePreset::Go,
        RoutePreset::Comeback,
        RoutePreset::Cross,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hitch => "hitch",
            Self::Out5 => "out-5",
            Self::Out10 => "out-10",
            Self::In5 => "in-5",
            Self::In10 => "in-10",
            Self::InsideReleaseIn5 => "inside-release-in-5",
            Self::Slant => "slant",
            Self::Post => "post",
            Self::PostIn => "post-in",
            Self::PostHook => "post-hook",
            Self::Corner => "corner",
            Self::Go => "go",
            Self::Comeback => "comeback",
            Self::Cross => "cross",
        }
    }

    pub fn parse(id: &str) -> Option<RoutePreset> {
        Self::ALL.iter().copied().find(|p| p.as_str() == id)
    }

    /// Human-facing picker label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Hitch => "Stop",
            Self::Out5 => "Out (5)",
            Self::Out10 => "Out (10)",
            Self::In5 => "In (5)",
            Self::In10 => "In (10)",
            Self::InsideReleaseIn5 => "Inside Release In (5)",
            Self::Slant => "Slant",
            Self::Post => "Post",
            Self::PostIn => "Post In",
            Self::PostHook => "Post Hook",
            Self::Corner => "Corner",
            Self::Go => "Go",
            Self::Comeback => "Comeback",
            Self::Cross => "Cross",
        }
    }
}

/// Pen state while scripting a route.
struct Pen {
    points: Vec<Point>,
}

impl Pen {
    fn new(start: Point) -> Self {
        Self { points: vec![start] }
    }

    fn last(&self) -> Point {
        *self.points.last().expect("pen always holds the start point")
    }

    /// Move by a relative yard delta; positive dy is upfield.
    fn rel(&mut self, dx_yards: f32, dy_yards: f32) {
        let last = self.last();
        self.points.push(clamp_point(Point::new(
            last.x + dx_yards * PX_PER_YARD,
            last.y - dy_yards * PX_PER_YARD,
        )));
    }

    /// Move to an absolute yards-gained depth, shifting X by a yard delta.
    fn abs_depth(&mut self, dx_yards: f32, depth_yards: f32) {
        let last = self.last();
        self.points.push(clamp_point(Point::new(
            last.x + dx_yards * PX_PER_YARD,
            depth_to_y(depth_yards),
        )));
    }
}

/// Generate the polyline for `preset` starting at `start`.
///
/// Pure and deterministic. The first point is always exactly `start`; every
/// generated point is clamped to the padded field bounds.
pub fn generate_route(start: Point, preset: RoutePreset) -> Vec<Point> {
    let is_left = start.x < field_center_x();
    let dir_in: f32 = if is_left { 1.0 } else { -1.0 };
    let dir_out: f32 = if is_left { -1.0 } else { 1.0 };

    let mut pen = Pen::new(start);
    match preset {
        RoutePreset::Hitch => {
            pen.abs_depth(0.0, 6.0);
            pen.rel(1.0 * dir_in, -1.0);
        }
        RoutePreset::Out5 => {
            pen.abs_depth(0.0, 5.0);
            pen.rel(5.0 * dir_out, 0.0);
        }
        RoutePreset::Out10 => {
            pen.abs_depth(0.0, 10.0);
            pen.rel(5.0 * dir_out, 0.0);
        }
        RoutePreset::In5 => {
            pen.abs_depth(0.0, 5.0);
            pen.rel(5.0 * dir_in, 0.0);
        }
        RoutePreset::In10 => {
            pen.abs_depth(0.0, 10.0);
            pen.rel(5.0 * dir_in, 0.0);
        }
        RoutePreset::InsideReleaseIn5 => {
            pen.rel(1.0 * dir_in, 1.0);
            pen.abs_depth(0.0, 5.0);
            pen.rel(5.0 * dir_in, 0.0);
        }
        RoutePreset::Slant => {
            pen.abs_depth(0.0, 1.0);
            pen.rel(3.0 * dir_in, 2.0);
        }
        RoutePreset::Post => {
            pen.abs_depth(0.0, 7.0);
            pen.rel(5.0 * dir_in, 7.0);
        }
        RoutePreset::PostIn => {
            pen.abs_depth(0.0, 7.0);
            pen.rel(3.0 * dir_in, 3.0);
            pen.rel(4.0 * dir_in, 0.0);
        }
        RoutePreset::PostHook => {
            pen.abs_depth(0.0, 7.0);
            pen.rel(2.0 * dir_in, 2.0);
            pen.rel(1.0 * dir_in, -1.0);
        }
        RoutePreset::Corner => {
            pen.abs_depth(0.0, 7.0);
            pen.rel(5.0 * dir_out, 5.0);
        }
        RoutePreset::Go => {
            pen.abs_depth(0.0, 7.0);
            pen.rel(1.0 * dir_out, 7.0);
        }
        RoutePreset::Comeback => {
            pen.abs_depth(0.0, 12.0);
            pen.rel(2.0 * dir_out, 2.0);
            pen.rel(2.0 * dir_out, -2.0);
        }
        RoutePreset::Cross => {
            pen.abs_depth(0.0, 2.0);
            pen.rel(8.0 * dir_in, 2.0);
        }
    }

    pen.points
}
