//! Player vertical motion
//!
//! Grounded -> Rising on a jump edge (or while flying). Rising slows down
//! until the apex, then Falling speeds up until the ground. Over an obstacle
//! the player may keep climbing but never drops.

use super::collision::depth_overlap;
use super::kind::EntityKind;
use super::state::{GameState, JumpState, Player};
use crate::tuning::Tuning;

/// Whether an obstacle in the player's lane is close enough that the
/// player must not drop onto it
pub fn over_obstacle(state: &GameState) -> bool {
    let tuning = &state.tuning;
    state.pool(EntityKind::Obstacle).iter().any(|obstacle| {
        obstacle.lane() == Some(state.player.lane)
            && depth_overlap(tuning.player_depth, 0.0, obstacle.z, tuning.obstacle_window)
    })
}

/// Start a jump. Only possible from the ground.
pub fn jump(player: &mut Player) -> bool {
    if player.jump != JumpState::Grounded {
        return false;
    }
    player.jump = JumpState::Rising;
    true
}

fn land(player: &mut Player, tuning: &Tuning) {
    player.y = tuning.ground_height;
    player.vy = tuning.rise_speed;
    player.jump = JumpState::Grounded;
}

/// Advance the player's vertical motion by one tick
pub fn integrate(player: &mut Player, tuning: &Tuning, over_obstacle: bool) {
    let apex = player.apex(tuning);
    let flying = player.boosts.flying();
    if flying {
        player.jump = JumpState::Rising;
    }

    if player.jump == JumpState::Rising && player.y < apex {
        player.vy = (player.vy - tuning.rise_decel).max(tuning.min_rise_speed);
        player.y = (player.y + player.vy).min(apex);
    }

    let below_apex = player.y < apex;
    let mut hold = false;
    if over_obstacle {
        let climbing = player.jump == JumpState::Rising && below_apex;
        if !climbing && player.airborne(tuning) {
            hold = true;
            if !flying {
                player.jump = JumpState::Falling;
            }
        }
    } else if !below_apex && !flying && player.jump == JumpState::Rising {
        player.jump = JumpState::Falling;
    }

    if player.jump == JumpState::Falling && !hold {
        player.vy += tuning.fall_accel;
        player.y -= player.vy;
        if player.y <= tuning.ground_height {
            land(player, tuning);
        }
    }
}

/// Integrate the player for one tick against the current obstacles
pub fn step(state: &mut GameState) {
    let blocked = over_obstacle(state);
    integrate(&mut state.player, &state.tuning, blocked);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{TextureHandle, Textures};
    use crate::sim::kind::SpawnRule;
    use crate::sim::lane::Lane;
    use crate::sim::spawn::spawn_gated;
    use crate::sim::state::Lateral;

    fn player(tuning: &Tuning) -> Player {
        Player::new(tuning, TextureHandle::default())
    }

    /// Run until grounded again, returning the number of ticks and the peak height
    fn run_jump(player: &mut Player, tuning: &Tuning) -> (u32, f32) {
        let mut ticks = 0;
        let mut peak = player.y;
        loop {
            integrate(player, tuning, false);
            ticks += 1;
            peak = peak.max(player.y);
            if player.jump == JumpState::Grounded || ticks > 10_000 {
                return (ticks, peak);
            }
        }
    }

    #[test]
    fn test_jump_only_from_ground() {
        let tuning = Tuning::default();
        let mut p = player(&tuning);
        assert!(jump(&mut p));
        assert_eq!(p.jump, JumpState::Rising);
        assert!(!jump(&mut p));
    }

    #[test]
    fn test_grounded_player_stays_put() {
        let tuning = Tuning::default();
        let mut p = player(&tuning);
        for _ in 0..10 {
            integrate(&mut p, &tuning, false);
        }
        assert_eq!(p.y, tuning.ground_height);
        assert_eq!(p.jump, JumpState::Grounded);
    }

    #[test]
    fn test_jump_round_trip() {
        let tuning = Tuning::default();
        let mut p = player(&tuning);
        jump(&mut p);
        let (ticks, peak) = run_jump(&mut p, &tuning);
        assert!(ticks < 10_000);
        assert_eq!(peak, tuning.jump_apex);
        assert_eq!(p.y, tuning.ground_height);
        assert_eq!(p.vy, tuning.rise_speed);
        assert_eq!(p.jump, JumpState::Grounded);
    }

    #[test]
    fn test_rising_velocity_never_below_floor() {
        let tuning = Tuning::default();
        let mut p = player(&tuning);
        jump(&mut p);
        while p.jump == JumpState::Rising {
            let before = p.y;
            integrate(&mut p, &tuning, false);
            if p.jump == JumpState::Rising {
                assert!(p.vy >= tuning.min_rise_speed);
                assert!(p.y > before);
            }
        }
    }

    #[test]
    fn test_jump_boost_raises_apex() {
        let tuning = Tuning::default();
        let mut p = player(&tuning);
        p.boosts.jump_ticks = 1_000;
        jump(&mut p);
        let (_, peak) = run_jump(&mut p, &tuning);
        assert_eq!(peak, tuning.boosted_apex);
    }

    #[test]
    fn test_flying_hovers_at_apex() {
        let tuning = Tuning::default();
        let mut p = player(&tuning);
        p.boosts.fly_ticks = 1_000;
        for _ in 0..500 {
            integrate(&mut p, &tuning, false);
        }
        assert_eq!(p.y, tuning.boosted_apex);
        assert_eq!(p.jump, JumpState::Rising);
    }

    #[test]
    fn test_no_drop_over_obstacle() {
        let tuning = Tuning::default();
        let mut p = player(&tuning);
        jump(&mut p);
        // Climb to the apex with an obstacle underneath
        for _ in 0..200 {
            integrate(&mut p, &tuning, true);
        }
        assert_eq!(p.y, tuning.jump_apex);
        assert_eq!(p.jump, JumpState::Falling);

        // Clear of the obstacle the fall resumes
        integrate(&mut p, &tuning, false);
        assert!(p.y < tuning.jump_apex);
    }

    #[test]
    fn test_climb_continues_over_obstacle() {
        let tuning = Tuning::default();
        let mut p = player(&tuning);
        jump(&mut p);
        let before = p.y;
        integrate(&mut p, &tuning, true);
        assert!(p.y > before);
        assert_eq!(p.jump, JumpState::Rising);
    }

    #[test]
    fn test_grounded_over_obstacle_is_unaffected() {
        let tuning = Tuning::default();
        let mut p = player(&tuning);
        integrate(&mut p, &tuning, true);
        assert_eq!(p.jump, JumpState::Grounded);
        assert_eq!(p.y, tuning.ground_height);
    }

    #[test]
    fn test_expired_boost_falls_from_high_apex() {
        let tuning = Tuning::default();
        let mut p = player(&tuning);
        p.boosts.jump_ticks = 1_000;
        jump(&mut p);
        while p.y < tuning.boosted_apex {
            integrate(&mut p, &tuning, true);
        }
        p.boosts.jump_ticks = 0;
        let before = p.y;
        integrate(&mut p, &tuning, false);
        assert_eq!(p.jump, JumpState::Falling);
        assert!(p.y < before);
    }

    #[test]
    fn test_over_obstacle_needs_same_lane() {
        let mut tuning = Tuning::default();
        tuning.kinds.obstacle.spawn = SpawnRule::Gated { chance: 1.0 };
        let mut state = GameState::with_tuning(5, tuning, Textures::default());
        spawn_gated(&mut state);

        let obstacle = &mut state.pool_mut(EntityKind::Obstacle).entities[0];
        obstacle.z = -3.0;
        obstacle.lateral = Lateral::Lane(Lane::Left);
        assert!(!over_obstacle(&state));

        state.player.lane = Lane::Left;
        assert!(over_obstacle(&state));

        state.pool_mut(EntityKind::Obstacle).entities[0].z = -10.0;
        assert!(!over_obstacle(&state));
    }
}
