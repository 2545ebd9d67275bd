//! Game state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;
use crate::ground_y;

/// Player movement state machine
///
/// `Grounded -> Jumping` on jump input with the cooldown satisfied,
/// `Jumping -> Grounded` when progress reaches 1.0. No other states.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlayerState {
    Grounded,
    /// Airborne along a half-sine arc from `start`
    Jumping {
        start: Vec2,
        /// Normalized progress 0..1
        progress: f32,
    },
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub state: PlayerState,
    /// Tick of the last jump start, for the jump cooldown
    pub last_jump_tick: Option<u64>,
    /// Invulnerability window after a pile collision (ticks remaining)
    pub hurt_cooldown: u64,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(50.0, ground_y(PLAYER_HEIGHT)),
            state: PlayerState::Grounded,
            last_jump_tick: None,
            hurt_cooldown: 0,
        }
    }
}

impl Player {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos(self.pos, PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    pub fn is_airborne(&self) -> bool {
        matches!(self.state, PlayerState::Jumping { .. })
    }

    /// Whether a jump may start this tick
    pub fn can_jump(&self, now: u64) -> bool {
        if self.is_airborne() {
            return false;
        }
        match self.last_jump_tick {
            None => true,
            Some(last) => now.saturating_sub(last) > JUMP_COOLDOWN_TICKS,
        }
    }

    /// Begin a jump from the current position
    pub fn start_jump(&mut self, now: u64) {
        self.state = PlayerState::Jumping {
            start: self.pos,
            progress: 0.0,
        };
        self.last_jump_tick = Some(now);
    }
}

/// A piece of litter in flight (or grounded after a miss)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThrownItem {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub on_ground: bool,
    /// Set on can hit (+1) or ground miss (-1); blocks further scoring
    pub scored: bool,
}

impl ThrownItem {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos(self.pos, ITEM_WIDTH, ITEM_HEIGHT)
    }
}

/// A trash can target, recycled as it scrolls off-screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrashCan {
    pub id: u32,
    pub pos: Vec2,
}

impl TrashCan {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos(self.pos, CAN_WIDTH, CAN_HEIGHT)
    }
}

/// A litter pile obstacle, same lifecycle as cans
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrashPile {
    pub id: u32,
    pub pos: Vec2,
}

impl TrashPile {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos(self.pos, PILE_WIDTH, PILE_HEIGHT)
    }
}

/// Floating score text spawned on a penalty
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorePopup {
    pub value: i64,
    pub pos: Vec2,
    /// 1.0 at spawn, removed at 0.0
    pub opacity: f32,
}

/// Discrete triggers for the audio collaborator, drained each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Thrown item landed in a can (+1)
    CanHit,
    /// Thrown item hit the sand unscored (-1)
    GroundMiss,
    /// Player walked into a pile (-100)
    PilePenalty,
}

/// Horizontal camera behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CameraMode {
    /// Camera pinned at the world origin, player clamped to the screen
    #[default]
    Fixed,
    /// Camera re-centers on the player with exponential smoothing
    Follow,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG, only consumed by spawn placement
    pub rng: Pcg32,
    /// Signed score (penalties can push it negative)
    pub score: i64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Background scroll distance, wrapped to [0, WORLD_WIDTH)
    pub scroll_offset: f32,
    /// Camera x offset subtracted from world coordinates at render time
    pub camera: f32,
    pub camera_mode: CameraMode,
    pub player: Player,
    /// Thrown litter (sorted by id for determinism)
    pub items: Vec<ThrownItem>,
    /// Trash can targets (sorted by id)
    pub cans: Vec<TrashCan>,
    /// Litter pile obstacles (sorted by id)
    pub piles: Vec<TrashPile>,
    pub popups: Vec<ScorePopup>,
    /// Events emitted this tick; cleared at the start of the next tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            score: 0,
            time_ticks: 0,
            scroll_offset: 0.0,
            camera: 0.0,
            camera_mode: CameraMode::Fixed,
            player: Player::default(),
            items: Vec::new(),
            cans: Vec::new(),
            piles: Vec::new(),
            popups: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        };

        // Fill the can/pile pools so the first frame has targets ahead
        super::spawn::maintain_pools(&mut state);

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Ensure entities are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.items.sort_by_key(|i| i.id);
        self.cans.sort_by_key(|c| c.id);
        self.piles.sort_by_key(|p| p.id);
    }
}
