//! Collision detection and response
//!
//! Everything here is a circle. Hits never remove anything structurally:
//! they flip `live` flags and report score, and the tick settles afterwards.

use glam::Vec2;
use rand::Rng;

use super::state::{Color, Enemy, GameState, Particle};
use crate::{Tuning, distance};

/// What a projectile hit did to an enemy
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitOutcome {
    /// Enemy survives and animates down to `target_radius`
    Shrunk { target_radius: f32 },
    /// Enemy destroyed
    Destroyed,
}

/// Tally of one collision pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitReport {
    pub score_gained: u64,
    pub enemies_destroyed: u32,
    pub enemies_shrunk: u32,
    pub projectiles_spent: u32,
}

/// Strict overlap test: touching circles do not collide
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    distance(a, b) < a_radius + b_radius
}

/// True if any live enemy touches the player
pub fn player_contact(state: &GameState) -> bool {
    let player = &state.player;
    state
        .enemies
        .iter()
        .filter(|e| e.live)
        .any(|e| circles_overlap(e.pos, e.radius, player.pos, player.radius))
}

/// Burst of `ceil(2 * radius)` particles at `at` in the enemy's color
pub fn spawn_explosion(
    particles: &mut Vec<Particle>,
    rng: &mut impl Rng,
    at: Vec2,
    radius: f32,
    color: Color,
    tuning: &Tuning,
) {
    let count = (radius * 2.0).ceil().max(0.0) as usize;
    let speed = tuning.particle_burst_speed;
    particles.reserve(count);
    for _ in 0..count {
        let vx = (rng.random::<f32>() - 0.5) * (rng.random::<f32>() * speed);
        let vy = (rng.random::<f32>() - 0.5) * (rng.random::<f32>() * speed);
        particles.push(Particle {
            pos: at,
            vel: Vec2::new(vx, vy),
            radius: (rng.random::<f32>() * tuning.particle_max_radius).max(f32::EPSILON),
            color,
            alpha: 1.0,
            friction: tuning.particle_friction,
            fade: tuning.particle_fade,
        });
    }
}

/// Apply one projectile hit to an enemy.
///
/// The shrink-vs-destroy decision uses the enemy's current radius, which may
/// be mid-animation from an earlier hit.
pub fn apply_hit(enemy: &mut Enemy, tuning: &Tuning) -> HitOutcome {
    let shrunk = enemy.radius - tuning.hit_shrink;
    if shrunk > tuning.shrink_threshold {
        enemy.start_shrink(shrunk, tuning.shrink_ticks);
        HitOutcome::Shrunk {
            target_radius: shrunk,
        }
    } else {
        enemy.live = false;
        HitOutcome::Destroyed
    }
}

/// Test every live (enemy, projectile) pair and resolve hits.
///
/// Pairs are visited enemy-major. A projectile is spent by its first hit and a
/// destroyed enemy is skipped for the rest of the pass, so nothing is hit or
/// scored twice in one tick. Score is reported, not applied.
pub fn resolve_projectile_hits(state: &mut GameState, tuning: &Tuning) -> HitReport {
    let mut report = HitReport::default();
    let GameState {
        enemies,
        projectiles,
        particles,
        rng,
        ..
    } = state;

    for enemy in enemies.iter_mut() {
        for projectile in projectiles.iter_mut() {
            if !enemy.live {
                break;
            }
            if !projectile.live
                || !circles_overlap(enemy.pos, enemy.radius, projectile.pos, projectile.radius)
            {
                continue;
            }

            spawn_explosion(particles, rng, enemy.pos, enemy.radius, enemy.color, tuning);
            projectile.live = false;
            report.projectiles_spent += 1;

            match apply_hit(enemy, tuning) {
                HitOutcome::Shrunk { .. } => report.enemies_shrunk += 1,
                HitOutcome::Destroyed => {
                    report.enemies_destroyed += 1;
                    report.score_gained += tuning.kill_score;
                }
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Viewport;
    use crate::sim::state::Projectile;
    use proptest::prelude::*;

    fn state() -> GameState {
        GameState::new(11, Viewport::new(1000.0, 1000.0), &Tuning::default())
    }

    fn push_enemy(state: &mut GameState, pos: Vec2, radius: f32) -> u32 {
        let id = state.next_entity_id();
        state.enemies.push(Enemy {
            id,
            pos,
            vel: Vec2::ZERO,
            radius,
            color: Color::hsl(40.0, 50.0, 50.0),
            live: true,
            shrink: None,
        });
        id
    }

    fn push_projectile(state: &mut GameState, pos: Vec2) {
        let id = state.next_entity_id();
        state.projectiles.push(Projectile {
            id,
            pos,
            vel: Vec2::ZERO,
            radius: 5.0,
            color: Color::WHITE,
            live: true,
        });
    }

    #[test]
    fn test_touching_is_not_overlap() {
        assert!(!circles_overlap(Vec2::ZERO, 5.0, Vec2::new(10.0, 0.0), 5.0));
        assert!(circles_overlap(Vec2::ZERO, 5.0, Vec2::new(9.99, 0.0), 5.0));
    }

    #[test]
    fn test_large_enemy_shrinks() {
        let tuning = Tuning::default();
        let mut state = state();
        push_enemy(&mut state, Vec2::new(100.0, 100.0), 30.0);
        push_projectile(&mut state, Vec2::new(105.0, 100.0));

        let report = resolve_projectile_hits(&mut state, &tuning);
        assert_eq!(report.enemies_shrunk, 1);
        assert_eq!(report.projectiles_spent, 1);
        assert_eq!(report.score_gained, 0);
        assert!(state.enemies[0].live);
        assert_eq!(state.enemies[0].target_radius(), 20.0);
        assert!(!state.projectiles[0].live);
    }

    #[test]
    fn test_small_enemy_destroyed() {
        let tuning = Tuning::default();
        let mut state = state();
        push_enemy(&mut state, Vec2::new(100.0, 100.0), 15.0);
        push_projectile(&mut state, Vec2::new(100.0, 100.0));

        let report = resolve_projectile_hits(&mut state, &tuning);
        assert_eq!(report.enemies_destroyed, 1);
        assert_eq!(report.score_gained, 100);
        assert!(!state.enemies[0].live);
        assert!(!state.projectiles[0].live);
    }

    #[test]
    fn test_explosion_particles() {
        let tuning = Tuning::default();
        let mut state = state();
        push_enemy(&mut state, Vec2::new(100.0, 100.0), 12.4);
        push_projectile(&mut state, Vec2::new(100.0, 100.0));

        resolve_projectile_hits(&mut state, &tuning);
        assert_eq!(state.particles.len(), 25);
        for p in &state.particles {
            assert_eq!(p.pos, Vec2::new(100.0, 100.0));
            assert_eq!(p.color, Color::hsl(40.0, 50.0, 50.0));
            assert_eq!(p.alpha, 1.0);
            assert!(p.radius > 0.0 && p.radius < 2.0);
            assert!(p.vel.x.abs() <= 4.0 && p.vel.y.abs() <= 4.0);
        }
    }

    #[test]
    fn test_explosion_with_tiny_particle_radius() {
        // Unvalidated tuning must still produce usable particles
        let tuning = Tuning {
            particle_max_radius: 1e-9,
            ..Tuning::default()
        };
        let mut state = state();
        spawn_explosion(
            &mut state.particles,
            &mut state.rng,
            Vec2::ZERO,
            10.0,
            Color::WHITE,
            &tuning,
        );
        assert_eq!(state.particles.len(), 20);
        assert!(state.particles.iter().all(|p| p.radius > 0.0));
    }

    #[test]
    fn test_destroyed_enemy_not_scored_twice() {
        let tuning = Tuning::default();
        let mut state = state();
        push_enemy(&mut state, Vec2::new(100.0, 100.0), 12.0);
        push_projectile(&mut state, Vec2::new(100.0, 100.0));
        push_projectile(&mut state, Vec2::new(102.0, 100.0));

        let report = resolve_projectile_hits(&mut state, &tuning);
        assert_eq!(report.score_gained, 100);
        assert_eq!(report.projectiles_spent, 1);
        assert!(state.projectiles[1].live);
    }

    #[test]
    fn test_projectile_spent_by_first_enemy_only() {
        let tuning = Tuning::default();
        let mut state = state();
        push_enemy(&mut state, Vec2::new(100.0, 100.0), 20.0);
        push_enemy(&mut state, Vec2::new(110.0, 100.0), 20.0);
        push_projectile(&mut state, Vec2::new(105.0, 100.0));

        let report = resolve_projectile_hits(&mut state, &tuning);
        assert_eq!(report.projectiles_spent, 1);
        assert_eq!(report.enemies_shrunk, 1);
        assert!(state.enemies[0].shrink.is_some());
        assert!(state.enemies[1].shrink.is_none());
    }

    #[test]
    fn test_player_contact() {
        let mut state = state();
        push_enemy(&mut state, Vec2::new(520.0, 500.0), 10.0);
        assert!(!player_contact(&state));
        state.enemies[0].pos.x = 519.0;
        assert!(player_contact(&state));
        state.enemies[0].live = false;
        assert!(!player_contact(&state));
    }

    proptest! {
        #[test]
        fn hit_partitions_on_radius(radius in 5.5f32..60.0) {
            let tuning = Tuning::default();
            let mut enemy = Enemy {
                id: 1,
                pos: Vec2::ZERO,
                vel: Vec2::ZERO,
                radius,
                color: Color::WHITE,
                live: true,
                shrink: None,
            };
            match apply_hit(&mut enemy, &tuning) {
                HitOutcome::Shrunk { target_radius } => {
                    prop_assert!(radius > 15.0);
                    prop_assert_eq!(target_radius, radius - 10.0);
                    prop_assert!(enemy.live);
                }
                HitOutcome::Destroyed => {
                    prop_assert!(radius <= 15.0);
                    prop_assert!(!enemy.live);
                }
            }
        }
    }
}
