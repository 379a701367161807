//! Collision detection and response
//!
//! Every check is lane equality plus a depth-window overlap. Height is only
//! considered where a kind has a clearance (obstacles) and for the chaser.

use super::kind::{BoostKind, Effect, EntityKind, KindSpec};
use super::spawn::recycle;
use super::state::{Entity, GameEvent, GameState, JumpState, Outcome, Player};
use crate::secs_to_ticks;
use crate::tuning::Tuning;

/// `|a - b| < half_a + half_b`
#[inline]
pub fn depth_overlap(a_z: f32, a_half: f32, b_z: f32, b_half: f32) -> bool {
    (a_z - b_z).abs() < a_half + b_half
}

/// Whether the player touches a pooled entity
pub fn player_hits(player: &Player, entity: &Entity, spec: &KindSpec, tuning: &Tuning) -> bool {
    entity.lane() == Some(player.lane)
        && depth_overlap(
            tuning.player_depth,
            tuning.player_half_extent,
            entity.z,
            spec.half_depth,
        )
        && spec
            .clearance
            .is_none_or(|clearance| player.y < entity.y + clearance)
}

/// Whether the closing chaser has caught the player
pub fn chaser_catches(state: &GameState) -> bool {
    let tuning = &state.tuning;
    let chaser = &state.chaser;
    let player = &state.player;
    let reach = tuning.chaser.half_extent + tuning.player_half_extent;
    chaser.closing
        && chaser.lane == player.lane
        && depth_overlap(
            chaser.z,
            tuning.chaser.half_extent,
            tuning.player_depth,
            tuning.player_half_extent,
        )
        && (player.y - tuning.ground_height).abs() < reach
}

/// Whether the player crossed the finish line (any lane)
pub fn crosses_finish(state: &GameState) -> bool {
    state.finish_line.as_ref().is_some_and(|finish| {
        depth_overlap(
            finish.z,
            state.tuning.finish.half_depth,
            state.tuning.player_depth,
            state.tuning.player_half_extent,
        )
    })
}

/// Start (or refresh) a boost
pub fn apply_boost(state: &mut GameState, boost: BoostKind) {
    let tuning = &state.tuning;
    let player = &mut state.player;
    match boost {
        BoostKind::Jump => {
            player.boosts.jump_ticks = secs_to_ticks(tuning.jump_boost_secs);
        }
        BoostKind::Fly => {
            player.boosts.fly_ticks = secs_to_ticks(tuning.fly_boost_secs);
            player.jump = JumpState::Rising;
        }
    }
    state.events.push(GameEvent::BoostCollected(boost));
    log::info!("{:?} boost collected", boost);
}

/// Slow the world down and send the chaser after the player
pub fn apply_barrier_penalty(state: &mut GameState) {
    let tuning = &state.tuning;
    state.speed = (state.speed - tuning.barrier_speed_penalty).max(tuning.min_world_speed);
    state.wall_speed = (state.wall_speed - tuning.barrier_wall_penalty).max(tuning.min_wall_speed);
    state.penalty_ticks = secs_to_ticks(tuning.penalty_secs);
    state.chaser.closing = true;
    state.events.push(GameEvent::BarrierHit);
    log::info!(
        "Barrier hit: speed {:.3}, wall speed {:.3}, chaser closing",
        state.speed,
        state.wall_speed
    );
}

fn apply_effect(state: &mut GameState, kind: EntityKind, index: usize, effect: Effect) {
    match effect {
        Effect::None => {}
        Effect::Collect => {
            state.score += 1;
            state.events.push(GameEvent::CoinCollected);
            recycle(state, kind, index);
        }
        Effect::PowerUp => {
            let boost = state.pool(kind).entities[index].boost_kind();
            if let Some(boost) = boost {
                apply_boost(state, boost);
            }
            recycle(state, kind, index);
        }
        Effect::Slow => {
            apply_barrier_penalty(state);
            recycle(state, kind, index);
        }
        Effect::Crash => {
            state.events.push(GameEvent::Crashed);
            state.end(Outcome::GameOver);
            recycle(state, kind, index);
        }
    }
}

/// Check the player against every pool, the chaser and the finish line.
///
/// Stops as soon as the run ends.
pub fn resolve(state: &mut GameState) {
    for kind in EntityKind::ALL {
        let spec = state.tuning.kinds.get(kind);
        let effect = spec.effect;
        if effect == Effect::None {
            continue;
        }

        let hits: Vec<usize> = state
            .pool(kind)
            .iter()
            .enumerate()
            .filter(|(_, entity)| player_hits(&state.player, entity, spec, &state.tuning))
            .map(|(index, _)| index)
            .collect();

        for index in hits {
            apply_effect(state, kind, index, effect);
            if !state.is_running() {
                return;
            }
        }
    }

    if chaser_catches(state) {
        state.events.push(GameEvent::Caught);
        state.end(Outcome::GameOver);
        return;
    }

    if crosses_finish(state) {
        state.events.push(GameEvent::Finished);
        state.end(Outcome::Finished);
    }
}
