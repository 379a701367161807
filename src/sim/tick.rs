//! Per-frame simulation tick
//!
//! Order within a tick is fixed: timers, input, spawning, movement and
//! recycling, physics, collisions, bookkeeping.

use super::autopilot;
use super::collision;
use super::kind::BoostKind;
use super::lane::Shift;
use super::physics;
use super::spawn;
use super::state::{GameEvent, GamePhase, GameState, JumpState};

/// Input edges for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// "Move left" was just pressed
    pub move_left: bool,
    /// "Move right" was just pressed
    pub move_right: bool,
    /// "Jump" was just pressed
    pub jump: bool,
    /// Pause toggle
    pub pause: bool,
    /// Idle/demo mode - the autopilot plays the game
    pub idle_mode: bool,
}

impl TickInput {
    /// Any gameplay edge (used to leave the ready screen)
    pub fn any_action(&self) -> bool {
        self.move_left || self.move_right || self.jump
    }
}

/// Count down boost and penalty timers, applying expiry effects
fn expire_timers(state: &mut GameState) {
    let boosts = &mut state.player.boosts;

    if boosts.jump_ticks > 0 {
        boosts.jump_ticks -= 1;
        if boosts.jump_ticks == 0 {
            state.events.push(GameEvent::BoostExpired(BoostKind::Jump));
        }
    }

    if boosts.fly_ticks > 0 {
        boosts.fly_ticks -= 1;
        if boosts.fly_ticks == 0 {
            if state.player.airborne(&state.tuning) {
                state.player.jump = JumpState::Falling;
            }
            state.events.push(GameEvent::BoostExpired(BoostKind::Fly));
        }
    }

    if state.penalty_ticks > 0 {
        state.penalty_ticks -= 1;
        if state.penalty_ticks == 0 {
            state.chaser.closing = false;
            state.speed = state.tuning.world_speed;
            state.wall_speed = state.tuning.wall_speed;
            state.events.push(GameEvent::PenaltyExpired);
            log::info!("Barrier penalty over, speed restored");
        }
    }
}

/// Apply lane and jump edges to the player
fn apply_input(state: &mut GameState, input: &TickInput) {
    let player = &mut state.player;
    // Right wins when both edges arrive together
    if input.move_right {
        player.lane = player.lane.shifted(Shift::Right);
    } else if input.move_left {
        player.lane = player.lane.shifted(Shift::Left);
    }
    if input.jump {
        physics::jump(player);
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Running => {
                state.phase = GamePhase::Paused;
                log::info!("Paused");
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Running;
                log::info!("Resumed");
            }
            _ => {}
        }
    }

    if state.phase == GamePhase::Ready && (input.any_action() || input.idle_mode) {
        state.phase = GamePhase::Running;
        state.events.clear();
        state.events.push(GameEvent::RunStarted);
        log::info!("Run started (seed {})", state.seed);
    } else if state.is_running() {
        state.events.clear();
    }

    // Nothing moves unless the run is live
    if !state.is_running() {
        return;
    }

    state.time_ticks += 1;

    expire_timers(state);

    let input = if input.idle_mode {
        autopilot::steer(state)
    } else {
        *input
    };
    apply_input(state, &input);

    spawn::spawn_gated(state);
    spawn::spawn_finish_line(state);

    spawn::advance_and_recycle(state);

    physics::step(state);
    state.chaser.advance(state.player.lane, &state.tuning);

    collision::resolve(state);

    state.distance += state.speed;
}
