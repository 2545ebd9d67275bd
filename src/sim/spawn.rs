//! Entity pool maintenance
//!
//! Cans and piles are recycled rather than accumulated: once an entity
//! scrolls past the left edge it is dropped and a replacement spawns at a
//! randomized offset past the right edge of the visible area. Placement is
//! the only consumer of the seeded RNG, so runs replay exactly.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, TrashCan, TrashPile};
use crate::consts::*;
use crate::ground_y;

/// Right edge of the visible area in world coordinates
fn view_right(state: &GameState) -> f32 {
    state.camera + WORLD_WIDTH
}

/// Spawn a trash can ahead of the visible area
pub fn spawn_can(state: &mut GameState) -> TrashCan {
    let offset: f32 = state.rng.random_range(0.0..CAN_SPAWN_RANGE);
    TrashCan {
        id: state.next_entity_id(),
        pos: Vec2::new(view_right(state) + offset, ground_y(CAN_HEIGHT)),
    }
}

/// Spawn a litter pile ahead of the visible area
pub fn spawn_pile(state: &mut GameState) -> TrashPile {
    let offset: f32 = state.rng.random_range(0.0..PILE_SPAWN_RANGE);
    TrashPile {
        id: state.next_entity_id(),
        pos: Vec2::new(view_right(state) + offset, ground_y(PILE_HEIGHT)),
    }
}

/// Top up both pools to their configured minimums
pub fn maintain_pools(state: &mut GameState) {
    while state.cans.len() < MIN_CANS {
        let can = spawn_can(state);
        state.cans.push(can);
    }
    while state.piles.len() < MIN_PILES {
        let pile = spawn_pile(state);
        state.piles.push(pile);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pools_filled_at_start() {
        let state = GameState::new(42);
        assert_eq!(state.cans.len(), MIN_CANS);
        assert_eq!(state.piles.len(), MIN_PILES);
    }

    #[test]
    fn test_spawns_land_ahead_of_view() {
        let mut state = GameState::new(7);
        for _ in 0..50 {
            let can = spawn_can(&mut state);
            assert!(can.pos.x >= WORLD_WIDTH);
            assert!(can.pos.x < WORLD_WIDTH + CAN_SPAWN_RANGE);
            let pile = spawn_pile(&mut state);
            assert!(pile.pos.x >= WORLD_WIDTH);
            assert!(pile.pos.x < WORLD_WIDTH + PILE_SPAWN_RANGE);
        }
    }

    #[test]
    fn test_spawns_rest_on_ground() {
        let mut state = GameState::new(7);
        let can = spawn_can(&mut state);
        assert_eq!(can.pos.y, ground_y(CAN_HEIGHT));
        let pile = spawn_pile(&mut state);
        assert_eq!(pile.pos.y, ground_y(PILE_HEIGHT));
    }

    #[test]
    fn test_same_seed_same_placement() {
        let a = GameState::new(12345);
        let b = GameState::new(12345);
        for (x, y) in a.cans.iter().zip(b.cans.iter()) {
            assert_eq!(x.pos, y.pos);
        }
        for (x, y) in a.piles.iter().zip(b.piles.iter()) {
            assert_eq!(x.pos, y.pos);
        }
    }
}
