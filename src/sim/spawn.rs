//! Spawner and recycler
//!
//! Pools grow until their cap and then only ever reuse slots. A recycled
//! slot gets a fresh id, lane and depth in one step, so it cannot be hit a
//! second time in the same tick.

use rand::Rng;
use rand_pcg::Pcg32;

use super::kind::{BoostKind, EntityKind, KindSpec, LateralRule, Motion, Restart, SpawnRule};
use super::lane::Lane;
use super::state::{Entity, FinishLine, GameEvent, GameState, Lateral, Payload};
use crate::render::Textures;
use crate::tuning::Tuning;

/// Random kind-specific data for a fresh instance
fn roll_payload(kind: EntityKind, tuning: &Tuning, rng: &mut Pcg32) -> Payload {
    match kind {
        EntityKind::Boost => {
            if rng.random_bool(0.5) {
                Payload::Boost(BoostKind::Fly)
            } else {
                Payload::Boost(BoostKind::Jump)
            }
        }
        EntityKind::WallLeft | EntityKind::WallRight => {
            let (lo, hi) = tuning.wall_height_range;
            Payload::Wall {
                height_scale: if hi > lo { rng.random_range(lo..hi) } else { lo },
            }
        }
        _ => Payload::None,
    }
}

fn roll_lateral(spec: &KindSpec, lane: Option<Lane>, rng: &mut Pcg32) -> Lateral {
    match spec.lateral {
        LateralRule::RandomLane => Lateral::Lane(Lane::random(rng)),
        LateralRule::EveryLane => Lateral::Lane(lane.unwrap_or_default()),
        LateralRule::Fixed { x } => Lateral::Offset(x),
    }
}

/// Build one instance. `lane` is only used for row kinds.
fn build(
    spec: &KindSpec,
    id: u32,
    lane: Option<Lane>,
    z: f32,
    tuning: &Tuning,
    textures: &Textures,
    rng: &mut Pcg32,
) -> Entity {
    let lateral = roll_lateral(spec, lane, rng);
    let payload = roll_payload(spec.kind, tuning, rng);
    let boost = match payload {
        Payload::Boost(kind) => Some(kind),
        _ => None,
    };
    Entity {
        id,
        kind: spec.kind,
        lateral,
        y: spec.height,
        z,
        rotation: 0.0,
        payload,
        texture: textures.for_kind(spec.kind, boost),
    }
}

/// Push one batch (a single instance, or a full row) at depth `z`
fn push_batch(state: &mut GameState, kind: EntityKind, z: f32) {
    let batch = state.tuning.kinds.get(kind).batch();
    for slot in 0..batch {
        let id = state.next_entity_id();
        let GameState {
            tuning,
            textures,
            pools,
            rng,
            ..
        } = state;
        let spec = tuning.kinds.get(kind);
        let lane = Lane::from_index(slot);
        let entity = build(spec, id, lane, z, tuning, textures, rng);
        pools[kind.index()].entities.push(entity);
    }
}

/// Lay out every prewarmed strip (tracks, ground, walls)
pub fn prewarm(state: &mut GameState) {
    for kind in EntityKind::ALL {
        let spec = state.tuning.kinds.get(kind);
        if !spec.prewarmed() {
            continue;
        }
        let rows = spec.cap / spec.batch();
        let first = spec.first_depth;
        let spacing = spec.spacing.unwrap_or_default();
        for row in 0..rows {
            push_batch(state, kind, first - row as f32 * spacing);
        }
        log::debug!("Prewarmed {:?}: {} instances", kind, state.pool(kind).len());
    }
}

/// Depth for a new spawn of `kind`
fn spawn_depth(state: &GameState, kind: EntityKind) -> f32 {
    let spec = state.tuning.kinds.get(kind);
    match (spec.spacing, state.pool(kind).furthest_depth()) {
        (Some(spacing), Some(furthest)) => furthest - spacing,
        _ => spec.first_depth,
    }
}

/// Run every gated kind's spawn trial for this tick
pub fn spawn_gated(state: &mut GameState) {
    for kind in EntityKind::ALL {
        let spec = state.tuning.kinds.get(kind);
        let SpawnRule::Gated { chance } = spec.spawn else {
            continue;
        };
        let cap = spec.cap;

        // Roll even when capped so the random stream does not depend on pool sizes
        let passed = state.rng.random::<f32>() < chance;
        if !passed || state.pool(kind).len() >= cap {
            continue;
        }

        let z = spawn_depth(state, kind);
        push_batch(state, kind, z);
        log::debug!(
            "Spawned {:?} at depth {:.2} ({} live)",
            kind,
            z,
            state.pool(kind).len()
        );
    }
}

/// Spawn the finish line once the score threshold is reached
pub fn spawn_finish_line(state: &mut GameState) {
    if state.finish_line.is_some() || state.score < state.tuning.finish.score {
        return;
    }
    state.finish_line = Some(FinishLine {
        z: state.tuning.finish.depth,
        texture: state.textures.finish,
    });
    state.events.push(GameEvent::FinishLineSpawned);
    log::info!("Finish line spawned at score {}", state.score);
}

/// Reuse the batch starting at `index` as a fresh spawn far ahead
pub fn recycle(state: &mut GameState, kind: EntityKind, index: usize) {
    let spec = state.tuning.kinds.get(kind);
    let batch = spec.batch();
    let start = index - index % batch;
    let z = match spec.restart {
        Restart::Fixed { depth } => depth,
        Restart::BehindFurthest { spacing } => {
            state.pool(kind).furthest_depth().unwrap_or(spec.first_depth) - spacing
        }
    };

    for slot in start..start + batch {
        let id = state.next_entity_id();
        let GameState {
            tuning,
            textures,
            pools,
            rng,
            ..
        } = state;
        let Some(old) = pools[kind.index()].entities.get(slot) else {
            break;
        };
        let spec = tuning.kinds.get(kind);
        let fresh = build(spec, id, old.lane(), z, tuning, textures, rng);
        pools[kind.index()].entities[slot] = fresh;
    }
    log::debug!("Recycled {:?} slot {} to depth {:.2}", kind, start, z);
}

/// Move every pooled instance one tick toward the player and recycle the
/// ones that passed behind it.
pub fn advance_and_recycle(state: &mut GameState) {
    for kind in EntityKind::ALL {
        let spec = state.tuning.kinds.get(kind);
        let speed = match spec.motion {
            Motion::World => state.speed,
            Motion::Wall => state.wall_speed,
        };
        let spin = spec.spin;
        let recycle_depth = spec.recycle_depth;
        let batch = spec.batch();

        for entity in &mut state.pools[kind.index()].entities {
            entity.z += speed;
            entity.rotation += spin;
        }

        let len = state.pool(kind).len();
        for start in (0..len).step_by(batch) {
            if state.pool(kind).entities[start].z > recycle_depth {
                recycle(state, kind, start);
            }
        }
    }

    if let Some(finish) = state.finish_line.as_mut() {
        finish.z += state.speed;
    }
}
