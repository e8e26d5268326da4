use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::field::Point;
use crate::routes::RoutePreset;

/// Route layers. A player holds at most one segment per type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteType {
    Primary,
    Option,
    Check,
    Endzone,
}

impl RouteType {
    pub const ALL: [RouteType; 4] =
        [RouteType::Primary, RouteType::Option, RouteType::Check, RouteType::Endzone];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Option => "option",
            Self::Check => "check",
            Self::Endzone => "endzone",
        }
    }

    /// Stroke styling consumers use when painting this layer.
    pub fn line_style(&self) -> LineStyle {
        match self {
            Self::Primary => LineStyle { dash: None, opacity: 1.0, color_override: None },
            Self::Option => LineStyle { dash: Some((10.0, 5.0)), opacity: 1.0, color_override: None },
            Self::Check => LineStyle { dash: Some((2.0, 2.0)), opacity: 0.7, color_override: None },
            Self::Endzone => {
                LineStyle { dash: Some((4.0, 3.0)), opacity: 1.0, color_override: Some("#f97316") }
            }
        }
    }
}

/// Rendering hints for one route layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Dash pattern (on, off) in pixels; solid when absent.
    pub dash: Option<(f32, f32)>,
    pub opacity: f32,
    /// Layer-wide color replacing the player color, if any.
    pub color_override: Option<&'static str>,
}

/// One route polyline on a layer, drawn start-to-end with an arrow at the
/// final segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSegment {
    pub id: String,
    #[serde(rename = "type")]
    pub route_type: RouteType,
    #[serde(default)]
    pub points: Vec<Point>,
    /// Generating preset; absent for hand-drawn segments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<RoutePreset>,
}

impl RouteSegment {
    pub fn new(route_type: RouteType, points: Vec<Point>, preset: Option<RoutePreset>) -> Self {
        Self { id: Uuid::new_v4().to_string(), route_type, points, preset }
    }

    pub fn regenerate_id(&mut self) {
        self.id = Uuid::new_v4().to_string();
    }
}
