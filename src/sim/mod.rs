//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::Aabb;
pub use spawn::{maintain_pools, spawn_can, spawn_pile};
pub use state::{
    CameraMode, GameEvent, GameState, Player, PlayerState, ScorePopup, ThrownItem, TrashCan,
    TrashPile,
};
pub use tick::{TickInput, tick};
