//! Per-frame simulation tick
//!
//! One call per display frame while a round is running. Work happens in a
//! fixed order: player, particles, projectiles, enemies, player contact,
//! projectile hits, then a settle phase that compacts dead entities and
//! applies score. Nothing marked dead survives into the next tick.

use super::collision::{player_contact, resolve_projectile_hits};
use super::state::{Body, GameState};
use crate::renderer::Canvas;
use crate::{Tuning, Viewport};

/// What one tick did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub score_gained: u64,
    pub enemies_destroyed: u32,
    pub enemies_shrunk: u32,
    pub projectiles_spent: u32,
    /// Projectiles that left the viewport this tick
    pub projectiles_lost: u32,
    /// An enemy reached the player; the round is over
    pub player_hit: bool,
}

/// Advance the game state by one frame
pub fn tick(
    state: &mut GameState,
    tuning: &Tuning,
    viewport: Viewport,
    canvas: &mut dyn Canvas,
) -> TickOutcome {
    let mut outcome = TickOutcome::default();

    canvas.fade(viewport, tuning.trail_fade);

    state.player.draw(canvas);
    state.player.step();

    // Faded-out particles are gone before they can be drawn again
    state.particles.retain(|p| p.alpha > 0.0);
    for particle in &mut state.particles {
        particle.draw(canvas);
        particle.step();
    }

    for projectile in &mut state.projectiles {
        projectile.draw(canvas);
        projectile.step();
        if projectile.is_offscreen(viewport) {
            projectile.live = false;
            outcome.projectiles_lost += 1;
        }
    }

    for enemy in &mut state.enemies {
        enemy.draw(canvas);
        enemy.step();
    }

    if player_contact(state) {
        outcome.player_hit = true;
    } else {
        let hits = resolve_projectile_hits(state, tuning);
        outcome.score_gained = hits.score_gained;
        outcome.enemies_destroyed = hits.enemies_destroyed;
        outcome.enemies_shrunk = hits.enemies_shrunk;
        outcome.projectiles_spent = hits.projectiles_spent;
    }

    // Settle
    state.compact();
    state.score += outcome.score_gained;
    state.time_ticks += 1;

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCall, RecordingCanvas};
    use crate::sim::state::{Color, Enemy, Particle, Projectile};
    use glam::Vec2;

    fn setup() -> (GameState, Tuning, Viewport) {
        let tuning = Tuning::default();
        let viewport = Viewport::new(1000.0, 1000.0);
        (GameState::new(5, viewport, &tuning), tuning, viewport)
    }

    fn enemy(state: &mut GameState, pos: Vec2, vel: Vec2, radius: f32) {
        let id = state.next_entity_id();
        state.enemies.push(Enemy {
            id,
            pos,
            vel,
            radius,
            color: Color::hsl(200.0, 50.0, 50.0),
            live: true,
            shrink: None,
        });
    }

    fn run_ticks(
        state: &mut GameState,
        tuning: &Tuning,
        viewport: Viewport,
        n: usize,
    ) -> Vec<TickOutcome> {
        let mut canvas = RecordingCanvas::new();
        (0..n)
            .map(|_| tick(state, tuning, viewport, &mut canvas))
            .collect()
    }

    #[test]
    fn test_fade_then_player_drawn_first() {
        let (mut state, tuning, viewport) = setup();
        let mut canvas = RecordingCanvas::new();
        tick(&mut state, &tuning, viewport, &mut canvas);
        assert_eq!(canvas.calls[0], DrawCall::Fade { alpha: 0.1 });
        assert!(matches!(
            canvas.calls[1],
            DrawCall::Circle { radius, alpha, .. } if radius == 10.0 && alpha == 1.0
        ));
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_projectile_removed_when_offscreen() {
        let (mut state, tuning, viewport) = setup();
        let id = state.next_entity_id();
        state.projectiles.push(Projectile {
            id,
            pos: Vec2::new(996.0, 500.0),
            vel: Vec2::new(5.0, 0.0),
            radius: 5.0,
            color: Color::WHITE,
            live: true,
        });

        // 1001 - 5 = 996, still touching the right edge
        let outcome = tick(&mut state, &tuning, viewport, &mut RecordingCanvas::new());
        assert_eq!(outcome.projectiles_lost, 0);
        assert_eq!(state.projectiles.len(), 1);

        // 1006 - 5 = 1001 > 1000: gone on this very tick
        let outcome = tick(&mut state, &tuning, viewport, &mut RecordingCanvas::new());
        assert_eq!(outcome.projectiles_lost, 1);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_particle_fades_out_then_removed() {
        let (mut state, tuning, viewport) = setup();
        state.particles.push(Particle {
            pos: Vec2::new(10.0, 10.0),
            vel: Vec2::ZERO,
            radius: 1.0,
            color: Color::WHITE,
            alpha: 0.05,
            friction: tuning.particle_friction,
            fade: tuning.particle_fade,
        });

        let mut last = 0.05;
        let mut ticks = 0;
        while !state.particles.is_empty() {
            tick(&mut state, &tuning, viewport, &mut RecordingCanvas::new());
            ticks += 1;
            if let Some(p) = state.particles.first() {
                assert!((last - p.alpha - 0.01).abs() < 1e-5);
                last = p.alpha;
            }
            assert!(ticks < 10, "particle never removed");
        }

        // A removed particle is not drawn: only fade + player remain
        let mut canvas = RecordingCanvas::new();
        tick(&mut state, &tuning, viewport, &mut canvas);
        assert_eq!(canvas.circle_count(), 1);
    }

    #[test]
    fn test_enemy_contact_ends_round_without_collisions() {
        let (mut state, tuning, viewport) = setup();
        enemy(&mut state, Vec2::new(520.0, 500.0), Vec2::new(-1.0, 0.0), 12.0);
        state.fire_projectile(Vec2::new(600.0, 500.0), &tuning);

        let outcome = tick(&mut state, &tuning, viewport, &mut RecordingCanvas::new());
        assert!(outcome.player_hit);
        assert_eq!(outcome.projectiles_spent, 0);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_enemy_radius_sequence_and_kill_score() {
        let (mut state, tuning, viewport) = setup();
        enemy(&mut state, Vec2::new(200.0, 200.0), Vec2::ZERO, 30.0);

        let mut radii = vec![state.enemies[0].radius];
        for hit in 0..3 {
            let id = state.next_entity_id();
            state.projectiles.push(Projectile {
                id,
                pos: Vec2::new(200.0, 200.0),
                vel: Vec2::ZERO,
                radius: 5.0,
                color: Color::WHITE,
                live: true,
            });
            let outcome = tick(&mut state, &tuning, viewport, &mut RecordingCanvas::new());
            assert_eq!(outcome.projectiles_spent, 1);
            assert!(state.projectiles.is_empty());

            if hit < 2 {
                assert_eq!(outcome.score_gained, 0);
                // Let the shrink animation finish
                run_ticks(&mut state, &tuning, viewport, tuning.shrink_ticks as usize);
                radii.push(state.enemies[0].radius);
            } else {
                assert_eq!(outcome.score_gained, 100);
                assert!(state.enemies.is_empty());
            }
        }

        assert_eq!(radii, vec![30.0, 20.0, 10.0]);
        assert_eq!(state.score, 100);
    }

    #[test]
    fn test_dead_entities_settled_before_next_tick() {
        let (mut state, tuning, viewport) = setup();
        enemy(&mut state, Vec2::new(200.0, 200.0), Vec2::ZERO, 10.0);
        state.projectiles.push(Projectile {
            id: 99,
            pos: Vec2::new(200.0, 200.0),
            vel: Vec2::ZERO,
            radius: 5.0,
            color: Color::WHITE,
            live: true,
        });

        let outcome = tick(&mut state, &tuning, viewport, &mut RecordingCanvas::new());
        assert_eq!(outcome.enemies_destroyed, 1);
        assert!(state.enemies.iter().all(|e| e.live));
        assert!(state.projectiles.iter().all(|p| p.live));
        assert_eq!(state.live_enemies(), 0);
        assert_eq!(state.particles.len(), 20);
    }
}
