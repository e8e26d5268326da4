//! Core data model: route segments, players, plays and playbooks.
//!
//! Mutations flow bottom-up: a player edit happens inside its owning play,
//! a play edit inside its owning playbook. Owned `Vec` storage means a
//! mutation to one entity can never alias another's data.

pub mod play;
pub mod playbook;
pub mod player;
pub mod route;

pub use play::{GridPosition, Play};
pub use playbook::{GridConfig, Playbook};
pub use player::Player;
pub use route::{LineStyle, RouteSegment, RouteType};
