//! Fixed timestep simulation tick
//!
//! Advances one frame of the game deterministically: player movement and
//! jump arc, litter projectiles, world scroll, pool recycling, scoring,
//! and the pile penalty.

use glam::Vec2;

use super::spawn::maintain_pools;
use super::state::{CameraMode, GameEvent, GameState, PlayerState, ScorePopup, ThrownItem};
use crate::consts::*;
use crate::ground_y;

/// Input snapshot for a single tick (deterministic)
///
/// The shell captures key/touch state into this struct once per tick; the
/// sim never reads ambient input state.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Walk left (held)
    pub left: bool,
    /// Walk right (held)
    pub right: bool,
    /// Jump (held; gated by the jump cooldown)
    pub jump: bool,
    /// Throw litter (held; spawns one item per tick)
    pub throw: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Events are per-tick: read them between calls, they never accumulate
    state.events.clear();

    state.time_ticks += 1;
    let now = state.time_ticks;

    state.player.hurt_cooldown = state.player.hurt_cooldown.saturating_sub(1);

    // --- Player movement (grounded only; the jump arc owns the position
    // while airborne) ---
    if !state.player.is_airborne() {
        if input.left {
            state.player.pos.x -= RUN_SPEED * dt;
        }
        if input.right {
            state.player.pos.x += RUN_SPEED * dt;
        }
    }

    // --- Jump start ---
    if input.jump && state.player.can_jump(now) {
        state.player.start_jump(now);
    }

    // --- Jump arc: linear x, half-sine y, snap to ground on completion ---
    if let PlayerState::Jumping { start, progress } = state.player.state {
        let progress = progress + dt / JUMP_DURATION_SECS;
        if progress >= 1.0 {
            state.player.pos = Vec2::new(start.x + JUMP_DISTANCE, ground_y(PLAYER_HEIGHT));
            state.player.state = PlayerState::Grounded;
        } else {
            state.player.pos = Vec2::new(
                start.x + JUMP_DISTANCE * progress,
                start.y - JUMP_HEIGHT * (std::f32::consts::PI * progress).sin(),
            );
            state.player.state = PlayerState::Jumping { start, progress };
        }
    }

    clamp_player_x(state);

    // --- Throw: fixed launch angle plus the player's forward speed ---
    if input.throw {
        let id = state.next_entity_id();
        state.items.push(ThrownItem {
            id,
            pos: Vec2::new(state.player.pos.x + PLAYER_WIDTH / 2.0, state.player.pos.y),
            vel: Vec2::new(
                THROW_ANGLE.cos() * THROW_SPEED + RUN_SPEED,
                THROW_ANGLE.sin() * THROW_SPEED,
            ),
            on_ground: false,
            scored: false,
        });
    }

    // --- World scroll: background wraps, ground entities drift left ---
    let scroll = SCROLL_SPEED * dt;
    state.scroll_offset = (state.scroll_offset + scroll) % WORLD_WIDTH;

    let left_edge = state.camera;
    for can in &mut state.cans {
        can.pos.x -= scroll;
    }
    state.cans.retain(|c| c.pos.x > left_edge - CAN_WIDTH);
    for pile in &mut state.piles {
        pile.pos.x -= scroll;
    }
    state.piles.retain(|p| p.pos.x > left_edge - PILE_WIDTH);
    maintain_pools(state);

    // --- Projectile physics ---
    for item in state.items.iter_mut() {
        if item.on_ground {
            // Grounded litter only rides the scroll until off-screen
            item.pos.x -= scroll;
            continue;
        }

        item.vel.y += GRAVITY * dt;
        item.vel.x *= THROW_FRICTION;
        item.pos += item.vel * dt;
        item.pos.x -= scroll;

        if item.pos.y >= ground_y(ITEM_HEIGHT) {
            item.pos.y = ground_y(ITEM_HEIGHT);
            item.vel = Vec2::ZERO;
            item.on_ground = true;
            if !item.scored {
                // Missed everything: -1, and no further scoring possible
                item.scored = true;
                state.score -= 1;
                state.events.push(GameEvent::GroundMiss);
            }
        }
    }
    state.items.retain(|i| i.pos.x > left_edge - ITEM_WIDTH);

    // --- Can scoring: airborne unscored litter inside a can's box ---
    let cans = &state.cans;
    let mut can_hits: i64 = 0;
    state.items.retain(|item| {
        if item.scored || item.on_ground {
            return true;
        }
        let item_box = item.bounds();
        if cans.iter().any(|c| item_box.intersects(&c.bounds())) {
            can_hits += 1;
            false
        } else {
            true
        }
    });
    state.score += can_hits;
    for _ in 0..can_hits {
        state.events.push(GameEvent::CanHit);
    }

    // --- Pile penalty: grounded contact outside the hurt window ---
    if !state.player.is_airborne() && state.player.hurt_cooldown == 0 {
        let player_box = state.player.bounds();
        if state.piles.iter().any(|p| player_box.intersects(&p.bounds())) {
            state.score += PILE_PENALTY;
            state.popups.push(ScorePopup {
                value: PILE_PENALTY,
                pos: state.player.pos,
                opacity: 1.0,
            });
            state.events.push(GameEvent::PilePenalty);
            // Forced escape jump plus an invulnerability window so one
            // contact cannot penalize on consecutive ticks
            state.player.hurt_cooldown = HURT_COOLDOWN_TICKS;
            state.player.start_jump(now);
        }
    }

    // --- Score popups: float up and fade out ---
    for popup in state.popups.iter_mut() {
        popup.pos.y -= POPUP_RISE_SPEED * dt;
        popup.opacity -= POPUP_FADE_RATE * dt;
    }
    state.popups.retain(|p| p.opacity > 0.0);

    // --- Camera: updated after movement, same tick ---
    if state.camera_mode == CameraMode::Follow {
        let target =
            (state.player.pos.x + PLAYER_WIDTH / 2.0 - WORLD_WIDTH / 2.0).max(0.0);
        state.camera += (target - state.camera) * CAMERA_SMOOTHING;
    }

    // Ensure deterministic ordering
    state.normalize_order();
}

/// Keep the player inside world bounds. The fixed camera also clamps at
/// the right screen edge; the follow camera only pins the world origin.
fn clamp_player_x(state: &mut GameState) {
    let max_x = match state.camera_mode {
        CameraMode::Fixed => WORLD_WIDTH - PLAYER_WIDTH,
        CameraMode::Follow => f32::INFINITY,
    };
    state.player.pos.x = state.player.pos.x.clamp(0.0, max_x);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{TrashCan, TrashPile};
    use proptest::prelude::*;

    const HOLD_NONE: TickInput = TickInput {
        left: false,
        right: false,
        jump: false,
        throw: false,
    };

    fn throw_once(state: &mut GameState) {
        let input = TickInput {
            throw: true,
            ..Default::default()
        };
        tick(state, &input, SIM_DT);
    }

    /// A state with no cans or piles near the player, so nothing scores
    /// or penalizes by accident
    fn quiet_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        for can in &mut state.cans {
            can.pos.x += 2000.0;
        }
        for pile in &mut state.piles {
            pile.pos.x += 2000.0;
        }
        state
    }

    #[test]
    fn test_throw_spawns_item_with_launch_velocity() {
        let mut state = quiet_state(1);
        assert!(state.items.is_empty());

        throw_once(&mut state);

        assert_eq!(state.items.len(), 1);
        let item = &state.items[0];
        let expected = Vec2::new(
            THROW_ANGLE.cos() * THROW_SPEED + RUN_SPEED,
            THROW_ANGLE.sin() * THROW_SPEED,
        );
        // One tick of gravity/friction has already applied
        assert!((item.vel.x - expected.x * THROW_FRICTION).abs() < 0.001);
        assert!((item.vel.y - (expected.y + GRAVITY * SIM_DT)).abs() < 0.001);
        assert!(item.vel.y < 0.0, "launch velocity points upward");
    }

    #[test]
    fn test_worked_example_miss_costs_one_point() {
        // Player at x=50 throws with no can under the arc: the item lands
        // and the score drops by exactly 1.
        let mut state = quiet_state(2);
        state.player.pos.x = 50.0;
        throw_once(&mut state);

        for _ in 0..60 {
            tick(&mut state, &HOLD_NONE, SIM_DT);
        }
        assert_eq!(state.score, -1);
        let item = &state.items[0];
        assert!(item.on_ground);
        assert!(item.scored);
        assert_eq!(item.pos.y, ground_y(ITEM_HEIGHT));

        // Grounded litter never scores again
        for _ in 0..60 {
            tick(&mut state, &HOLD_NONE, SIM_DT);
        }
        assert_eq!(state.score, -1);
    }

    #[test]
    fn test_gravity_strictly_increases_fall_speed() {
        let mut state = quiet_state(3);
        throw_once(&mut state);

        let mut prev_vy = state.items[0].vel.y;
        loop {
            tick(&mut state, &HOLD_NONE, SIM_DT);
            let item = &state.items[0];
            if item.on_ground {
                break;
            }
            assert!(item.vel.y > prev_vy, "vertical velocity must grow every tick");
            prev_vy = item.vel.y;
        }
    }

    #[test]
    fn test_can_hit_scores_once_and_removes_item() {
        let mut state = quiet_state(4);
        let can_id = state.next_entity_id();
        state.cans.push(TrashCan {
            id: can_id,
            pos: Vec2::new(400.0, ground_y(CAN_HEIGHT)),
        });
        // An airborne item falling inside the can's box
        let item_id = state.next_entity_id();
        state.items.push(ThrownItem {
            id: item_id,
            pos: Vec2::new(420.0, 360.0),
            vel: Vec2::ZERO,
            on_ground: false,
            scored: false,
        });

        tick(&mut state, &HOLD_NONE, SIM_DT);

        assert!(state.items.is_empty(), "item is removed on can hit");
        assert_eq!(state.score, 1);
        assert!(state.events.contains(&GameEvent::CanHit));

        // Nothing left to score
        tick(&mut state, &HOLD_NONE, SIM_DT);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_jump_returns_to_ground_at_fixed_distance() {
        let mut state = quiet_state(5);
        state.player.pos.x = 100.0;
        let start_x = state.player.pos.x;

        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &jump, SIM_DT);
        assert!(state.player.is_airborne());

        let mut peaked_above_ground = false;
        while state.player.is_airborne() {
            if state.player.pos.y < ground_y(PLAYER_HEIGHT) - JUMP_HEIGHT / 2.0 {
                peaked_above_ground = true;
            }
            tick(&mut state, &HOLD_NONE, SIM_DT);
        }

        assert!(peaked_above_ground);
        assert_eq!(state.player.pos.y, ground_y(PLAYER_HEIGHT));
        assert!((state.player.pos.x - (start_x + JUMP_DISTANCE)).abs() < 0.001);
    }

    #[test]
    fn test_jump_cooldown_gate() {
        let mut state = quiet_state(6);
        state.player.last_jump_tick = Some(state.time_ticks);

        // Within the cooldown window: jump input is ignored
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &jump, SIM_DT);
        assert!(!state.player.is_airborne());

        // Past the window it triggers
        for _ in 0..JUMP_COOLDOWN_TICKS {
            tick(&mut state, &HOLD_NONE, SIM_DT);
        }
        tick(&mut state, &jump, SIM_DT);
        assert!(state.player.is_airborne());
    }

    #[test]
    fn test_pile_penalty_once_with_forced_jump() {
        let mut state = quiet_state(7);
        let pile_id = state.next_entity_id();
        state.piles.push(TrashPile {
            id: pile_id,
            pos: Vec2::new(state.player.pos.x, ground_y(PILE_HEIGHT)),
        });

        tick(&mut state, &HOLD_NONE, SIM_DT);

        assert_eq!(state.score, PILE_PENALTY);
        assert_eq!(state.popups.len(), 1);
        assert!(state.player.is_airborne(), "penalty forces an escape jump");
        assert!(state.events.contains(&GameEvent::PilePenalty));

        // Ride out the jump; the hurt window blocks a second penalty even
        // if the player comes down still overlapping a pile
        while state.player.is_airborne() {
            tick(&mut state, &HOLD_NONE, SIM_DT);
        }
        state.piles.push(TrashPile {
            id: 9999,
            pos: Vec2::new(state.player.pos.x, ground_y(PILE_HEIGHT)),
        });
        tick(&mut state, &HOLD_NONE, SIM_DT);
        assert_eq!(state.score, PILE_PENALTY, "no re-trigger inside hurt window");
    }

    #[test]
    fn test_events_cleared_each_tick() {
        let mut state = quiet_state(12);
        let pile_id = state.next_entity_id();
        state.piles.push(TrashPile {
            id: pile_id,
            pos: Vec2::new(state.player.pos.x, ground_y(PILE_HEIGHT)),
        });

        tick(&mut state, &HOLD_NONE, SIM_DT);
        assert_eq!(state.events, vec![GameEvent::PilePenalty]);

        // A quiet tick leaves no stale events behind
        tick(&mut state, &HOLD_NONE, SIM_DT);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_pools_never_below_minimum() {
        let mut state = GameState::new(8);
        for _ in 0..3000 {
            tick(&mut state, &HOLD_NONE, SIM_DT);
            assert!(state.cans.len() >= MIN_CANS);
            assert!(state.piles.len() >= MIN_PILES);
        }
    }

    #[test]
    fn test_scroll_offset_wraps() {
        let mut state = GameState::new(9);
        for _ in 0..5000 {
            tick(&mut state, &HOLD_NONE, SIM_DT);
            assert!(state.scroll_offset >= 0.0);
            assert!(state.scroll_offset < WORLD_WIDTH);
        }
    }

    #[test]
    fn test_popup_rises_and_fades_out() {
        let mut state = quiet_state(10);
        state.popups.push(ScorePopup {
            value: PILE_PENALTY,
            pos: Vec2::new(100.0, 300.0),
            opacity: 1.0,
        });

        tick(&mut state, &HOLD_NONE, SIM_DT);
        assert!(state.popups[0].pos.y < 300.0);
        assert!(state.popups[0].opacity < 1.0);

        for _ in 0..120 {
            tick(&mut state, &HOLD_NONE, SIM_DT);
        }
        assert!(state.popups.is_empty());
    }

    #[test]
    fn test_follow_camera_recenters_on_player() {
        let mut state = quiet_state(11);
        state.camera_mode = CameraMode::Follow;
        let run = TickInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..600 {
            tick(&mut state, &run, SIM_DT);
        }
        let target = state.player.pos.x + PLAYER_WIDTH / 2.0 - WORLD_WIDTH / 2.0;
        // Exponential smoothing trails the target but stays close while
        // the player runs at constant speed
        assert!(state.camera > 0.0);
        assert!((state.camera - target).abs() < 100.0);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            TickInput {
                right: true,
                ..Default::default()
            },
            TickInput {
                throw: true,
                ..Default::default()
            },
            TickInput {
                jump: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..200 {
            for input in &inputs {
                tick(&mut state1, input, SIM_DT);
                tick(&mut state2, input, SIM_DT);
            }
        }

        let snap1 = serde_json::to_string(&state1).unwrap();
        let snap2 = serde_json::to_string(&state2).unwrap();
        assert_eq!(snap1, snap2);
    }

    proptest! {
        /// Player x stays within world bounds under any input sequence
        /// (fixed camera), and pools hold their minimums after every tick.
        #[test]
        fn prop_bounds_and_pools_hold(
            seed in 0u64..10_000,
            inputs in prop::collection::vec((any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()), 1..400)
        ) {
            let mut state = GameState::new(seed);
            for (left, right, jump, throw) in inputs {
                let input = TickInput { left, right, jump, throw };
                tick(&mut state, &input, SIM_DT);

                prop_assert!(state.player.pos.x >= 0.0);
                prop_assert!(state.player.pos.x <= WORLD_WIDTH - PLAYER_WIDTH);
                prop_assert!(state.cans.len() >= MIN_CANS);
                prop_assert!(state.piles.len() >= MIN_PILES);

                // Grounded means exactly on the ground line
                if !state.player.is_airborne() {
                    prop_assert_eq!(state.player.pos.y, ground_y(PLAYER_HEIGHT));
                }
            }
        }
    }
}
