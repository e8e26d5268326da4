//! Field geometry and coordinate transforms.
//!
//! The field is a fixed 25x25 yard rectangle drawn at a fixed pixel scale,
//! with the line of scrimmage 5 yards up from the bottom edge. Yard offsets
//! on X are measured from the field center, yard depths on Y as yards gained
//! upfield from the line of scrimmage. Drawing-space Y grows downward from
//! the top edge.

use serde::{Deserialize, Serialize};

/// Pixels per yard at the fixed drawing scale.
pub const PX_PER_YARD: f32 = 25.0;

/// Field width in yards.
pub const FIELD_WIDTH_YARDS: f32 = 25.0;

/// Field height in yards.
pub const FIELD_HEIGHT_YARDS: f32 = 25.0;

/// Line of scrimmage offset from the bottom edge, in yards.
pub const LOS_OFFSET_YARDS: f32 = 5.0;

/// Drawing-space field width in pixels.
pub const FIELD_PIXEL_WIDTH: f32 = FIELD_WIDTH_YARDS * PX_PER_YARD;

/// Drawing-space field height in pixels.
pub const FIELD_PIXEL_HEIGHT: f32 = FIELD_HEIGHT_YARDS * PX_PER_YARD;

/// Boundary padding keeping players and routes inside the field image (1 yard).
pub const BOUNDARY_PADDING: f32 = PX_PER_YARD;

/// A drawing-space point in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Drawing-space X of the field center line.
pub fn field_center_x() -> f32 {
    FIELD_PIXEL_WIDTH / 2.0
}

/// Convert a yard offset from center and a depth in yards relative to the
/// line of scrimmage into a drawing-space point.
///
/// Negative depths place points behind the line (the backfield).
pub fn yards_to_point(x_yards_from_center: f32, y_yards_from_los: f32) -> Point {
    Point {
        x: (FIELD_WIDTH_YARDS / 2.0 + x_yards_from_center) * PX_PER_YARD,
        y: (FIELD_HEIGHT_YARDS - (LOS_OFFSET_YARDS + y_yards_from_los)) * PX_PER_YARD,
    }
}

/// Drawing-space Y for an absolute depth in yards gained upfield.
pub fn depth_to_y(yards_gained: f32) -> f32 {
    (FIELD_HEIGHT_YARDS - LOS_OFFSET_YARDS - yards_gained) * PX_PER_YARD
}

/// Clamp a point into the padded field rectangle on both axes.
pub fn clamp_point(p: Point) -> Point {
    Point {
        x: p.x.clamp(BOUNDARY_PADDING, FIELD_PIXEL_WIDTH - BOUNDARY_PADDING),
        y: p.y.clamp(BOUNDARY_PADDING, FIELD_PIXEL_HEIGHT - BOUNDARY_PADDING),
    }
}

/// Reflect a point across the vertical field center line.
pub fn mirror_across_center(p: Point) -> Point {
    Point { x: 2.0 * field_center_x() - p.x, y: p.y }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_yards_to_point_center_los() {
        let p = yards_to_point(0.0, 0.0);
        assert_eq!(p.x, 312.5);
        assert_eq!(p.y, 500.0);
    }

    #[test]
    fn test_yards_to_point_backfield() {
        // QB alignment: 4 yards behind the line, on the center line.
        let p = yards_to_point(0.0, -4.0);
        assert_eq!(p.x, 312.5);
        assert_eq!(p.y, 600.0);
    }

    #[test]
    fn test_depth_to_y_matches_yards_to_point() {
        assert_eq!(depth_to_y(5.0), yards_to_point(0.0, 5.0).y);
        assert_eq!(depth_to_y(12.0), yards_to_point(3.0, 12.0).y);
    }

    #[test]
    fn test_mirror_across_center() {
        let p = Point::new(100.0, 200.0);
        let m = mirror_across_center(p);
        assert_eq!(m.x, 525.0);
        assert_eq!(m.y, 200.0);
        assert_eq!(mirror_across_center(m).x, p.x);
    }

    proptest! {
        #[test]
        fn test_clamp_idempotent(x in -2000.0f32..2000.0, y in -2000.0f32..2000.0) {
            let once = clamp_point(Point::new(x, y));
            let twice = clamp_point(once);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn test_clamp_in_bounds(x in -2000.0f32..2000.0, y in -2000.0f32..2000.0) {
            let p = clamp_point(Point::new(x, y));
            prop_assert!(p.x >= BOUNDARY_PADDING && p.x <= FIELD_PIXEL_WIDTH - BOUNDARY_PADDING);
            prop_assert!(p.y >= BOUNDARY_PADDING && p.y <= FIELD_PIXEL_HEIGHT - BOUNDARY_PADDING);
        }
    }
}
