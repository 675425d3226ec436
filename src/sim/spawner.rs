//! Periodic enemy spawning
//!
//! The interval itself is a platform timer; [`Spawner`] owns its handle so the
//! round can tear it down, and rejects callbacks from any other handle.

use glam::Vec2;
use rand::Rng;

use super::state::{Color, Enemy, GameState};
use crate::platform::{Platform, TimerId};
use crate::{Tuning, Viewport, random_in_range, velocity_from_angle};

/// Owner of the spawn interval handle
#[derive(Debug, Default)]
pub struct Spawner {
    timer: Option<TimerId>,
}

impl Spawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the spawn interval, replacing any interval already running
    pub fn start(&mut self, platform: &mut impl Platform, period_ms: u32) {
        self.stop(platform);
        self.timer = Some(platform.start_interval(period_ms));
    }

    /// Cancel the interval; no further callbacks are accepted after this
    pub fn stop(&mut self, platform: &mut impl Platform) {
        if let Some(id) = self.timer.take() {
            platform.clear_interval(id);
        }
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Whether a timer callback with `id` should spawn
    pub fn accepts(&self, id: TimerId) -> bool {
        self.timer == Some(id)
    }
}

/// Pick a start point just outside a random viewport edge.
///
/// Left/right and top/bottom are equally likely; the point sits `radius`
/// beyond the chosen edge so the enemy starts fully hidden.
pub fn edge_spawn_point(rng: &mut impl Rng, radius: f32, viewport: Viewport) -> Vec2 {
    if rng.random_bool(0.5) {
        let x = if rng.random_bool(0.5) {
            -radius
        } else {
            viewport.width + radius
        };
        let y = random_in_range(rng, 0.0, viewport.height);
        Vec2::new(x, y)
    } else {
        let x = random_in_range(rng, 0.0, viewport.width);
        // Bottom edge is offset from the height (not the width)
        let y = if rng.random_bool(0.5) {
            -radius
        } else {
            viewport.height + radius
        };
        Vec2::new(x, y)
    }
}

/// Random hue at the tuned saturation/lightness
pub fn random_enemy_color(rng: &mut impl Rng, tuning: &Tuning) -> Color {
    Color::hsl(
        rng.random_range(0.0..360.0),
        tuning.enemy_saturation,
        tuning.enemy_lightness,
    )
}

/// Create one enemy aimed at the viewport center and append it to the state
pub fn spawn_enemy(state: &mut GameState, tuning: &Tuning, viewport: Viewport) -> u32 {
    let radius = random_in_range(
        &mut state.rng,
        tuning.enemy_min_radius,
        tuning.enemy_max_radius,
    );
    let pos = edge_spawn_point(&mut state.rng, radius, viewport);
    let vel = velocity_from_angle(pos, viewport.center(), tuning.enemy_speed);
    let color = random_enemy_color(&mut state.rng, tuning);

    let id = state.next_entity_id();
    state.enemies.push(Enemy {
        id,
        pos,
        vel,
        radius,
        color,
        live: true,
        shrink: None,
    });

    log::debug!(
        "Spawned enemy {} r={:.1} at ({:.0}, {:.0})",
        id,
        radius,
        pos.x,
        pos.y
    );
    id
}
