//! # pb_core - Football Play Diagram Core
//!
//! Geometric route/formation engine and playbook data model for an
//! interactive American-football play-diagram editor.
//!
//! ## Features
//! - Yard-space to drawing-space coordinate transforms with field clamping
//! - Deterministic route-preset generation with side-relative mirroring
//! - Formation placement with bounded collision stacking
//! - Pre-snap motion with rigid route-translation propagation
//! - Grid-indexed playbooks with id-regenerating copy and import
//!
//! Rendering, input widgets and print layout are external collaborators:
//! they consume the data exposed here and drive the mutation operations.

pub mod error;
pub mod field;
pub mod formation;
pub mod models;
pub mod routes;
pub mod save;
pub mod state;
pub mod transfer;

pub use error::{PlaybookError, Result};
pub use field::{clamp_point, yards_to_point, Point};
pub use formation::{apply_formation, set_player_to_role, FormationSide, Role};
pub use models::{GridConfig, GridPosition, Play, Playbook, Player, RouteSegment, RouteType};
pub use routes::{generate_route, RoutePreset};
pub use save::{EditorSave, SaveError, SaveManager};
pub use state::{EditorState, InteractionMode};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
