//! Idle/demo pilot
//!
//! Steers away from hazards coming down the current lane and drifts toward
//! coins when it is safe to do so. Produces the same edges a keyboard would.

use super::kind::{Effect, EntityKind};
use super::lane::{Lane, Shift};
use super::state::{GameState, JumpState};
use super::tick::TickInput;

/// How far ahead of the player hazards are considered
const LOOKAHEAD: f32 = 6.0;
/// How far behind the player a hazard still blocks a lane
const TRAILING: f32 = 1.0;
/// How far ahead coins attract the pilot
const COIN_LOOKAHEAD: f32 = 4.0;

fn in_window(state: &GameState, z: f32, ahead: f32) -> bool {
    let depth = state.tuning.player_depth;
    z > depth - ahead && z < depth + TRAILING
}

/// Lanes with an obstacle or barrier close ahead
fn blocked_lanes(state: &GameState) -> [bool; 3] {
    let mut blocked = [false; 3];
    for kind in EntityKind::ALL {
        let effect = state.tuning.kinds.get(kind).effect;
        if !matches!(effect, Effect::Crash | Effect::Slow) {
            continue;
        }
        for entity in state.pool(kind).iter() {
            if let Some(lane) = entity.lane() {
                if in_window(state, entity.z, LOOKAHEAD) {
                    blocked[lane.index()] = true;
                }
            }
        }
    }
    blocked
}

fn has_coin(state: &GameState, lane: Lane) -> bool {
    state
        .pool(EntityKind::Coin)
        .iter()
        .any(|coin| coin.lane() == Some(lane) && in_window(state, coin.z, COIN_LOOKAHEAD))
}

fn shift_toward(from: Lane, to: Lane) -> Option<Shift> {
    match to.index().cmp(&from.index()) {
        std::cmp::Ordering::Less => Some(Shift::Left),
        std::cmp::Ordering::Greater => Some(Shift::Right),
        std::cmp::Ordering::Equal => None,
    }
}

/// Pick this tick's input
pub fn steer(state: &GameState) -> TickInput {
    let mut input = TickInput::default();
    let lane = state.player.lane;
    let blocked = blocked_lanes(state);

    let target = if blocked[lane.index()] {
        lane.neighbors().iter().copied().find(|n| !blocked[n.index()])
    } else if !has_coin(state, lane) {
        lane.neighbors()
            .iter()
            .copied()
            .find(|n| !blocked[n.index()] && has_coin(state, *n))
    } else {
        None
    };

    match target.and_then(|to| shift_toward(lane, to)) {
        Some(Shift::Left) => input.move_left = true,
        Some(Shift::Right) => input.move_right = true,
        None => {
            // Boxed in: jumping is the only option left
            if blocked[lane.index()] && state.player.jump == JumpState::Grounded {
                input.jump = true;
            }
        }
    }

    input
}
