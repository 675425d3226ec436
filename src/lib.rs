//! Orb Siege - A center-defense arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, round state)
//! - `renderer`: Drawing surface abstraction (2D canvas on the web)
//! - `platform`: Frame/timer scheduling and UI hooks (browser or headless)
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

use glam::Vec2;
use rand::Rng;

/// Game configuration constants
pub mod consts {
    /// Milliseconds between enemy spawns
    pub const SPAWN_INTERVAL_MS: u32 = 1000;

    /// Enemy radius is drawn from this range at spawn
    pub const ENEMY_MIN_RADIUS: f32 = 10.0;
    pub const ENEMY_MAX_RADIUS: f32 = 30.0;
    /// Enemy speed toward the center (units per tick)
    pub const ENEMY_SPEED: f32 = 1.0;
    /// HSL saturation/lightness for enemy colors (percent)
    pub const ENEMY_SATURATION: f32 = 50.0;
    pub const ENEMY_LIGHTNESS: f32 = 50.0;

    pub const PLAYER_RADIUS: f32 = 10.0;

    pub const PROJECTILE_SPEED: f32 = 5.0;
    pub const PROJECTILE_RADIUS: f32 = 5.0;

    /// Radius removed from an enemy per hit
    pub const HIT_SHRINK: f32 = 10.0;
    /// A hit that would leave the enemy at or below this radius destroys it
    pub const SHRINK_THRESHOLD: f32 = 5.0;
    /// Shrink animation length (0.5s at 60 Hz)
    pub const SHRINK_TICKS: u32 = 30;
    /// Score awarded per destroyed enemy
    pub const KILL_SCORE: u64 = 100;

    /// Particle velocity multiplier per tick
    pub const PARTICLE_FRICTION: f32 = 0.985;
    /// Particle alpha lost per tick
    pub const PARTICLE_FADE: f32 = 0.01;
    /// Explosion burst speed scale
    pub const PARTICLE_BURST_SPEED: f32 = 8.0;
    /// Explosion particle radius upper bound (exclusive)
    pub const PARTICLE_MAX_RADIUS: f32 = 2.0;

    /// Alpha of the black fill laid over each frame (motion trails)
    pub const TRAIL_FADE: f32 = 0.1;

    /// Frame period the headless platform simulates (60 Hz)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
}

/// Visible drawing area in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        debug_assert!(width > 0.0 && height > 0.0, "viewport must be positive");
        Self { width, height }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Uniform float in `[ceil(min), floor(max)]`, both ends inclusive.
///
/// The bounds are rounded to whole numbers but the draw itself is continuous.
pub fn random_in_range(rng: &mut impl Rng, min: f32, max: f32) -> f32 {
    let min = min.ceil();
    let max = max.floor();
    if max <= min {
        return min;
    }
    rng.random_range(min..=max)
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Velocity of magnitude `speed` pointing from `from` toward `to`
///
/// Coincident points yield an angle of 0 (`atan2(0, 0)`), i.e. `(speed, 0)`.
#[inline]
pub fn velocity_from_angle(from: Vec2, to: Vec2, speed: f32) -> Vec2 {
    debug_assert!(speed > 0.0, "speed must be positive");
    let delta = to - from;
    let angle = delta.y.atan2(delta.x);
    Vec2::new(angle.cos() * speed, angle.sin() * speed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_fire_direction_example() {
        let v = velocity_from_angle(Vec2::new(500.0, 500.0), Vec2::new(100.0, 100.0), 5.0);
        assert!((v.x - -3.5355).abs() < 0.001);
        assert!((v.y - -3.5355).abs() < 0.001);
    }

    #[test]
    fn test_velocity_degenerate_points() {
        let p = Vec2::new(42.0, 7.0);
        let v = velocity_from_angle(p, p, 2.0);
        assert_eq!(v, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_random_in_range_collapsed_bounds() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(random_in_range(&mut rng, 3.2, 3.8), 4.0);
    }

    #[test]
    fn test_viewport_center() {
        assert_eq!(Viewport::new(800.0, 600.0).center(), Vec2::new(400.0, 300.0));
    }

    proptest! {
        #[test]
        fn distance_is_symmetric(ax in -1e3f32..1e3, ay in -1e3f32..1e3, bx in -1e3f32..1e3, by in -1e3f32..1e3) {
            let a = Vec2::new(ax, ay);
            let b = Vec2::new(bx, by);
            prop_assert!(distance(a, b) >= 0.0);
            prop_assert!((distance(a, b) - distance(b, a)).abs() < 1e-3);
        }

        #[test]
        fn velocity_has_requested_speed(fx in -1e3f32..1e3, fy in -1e3f32..1e3, tx in -1e3f32..1e3, ty in -1e3f32..1e3, speed in 0.1f32..20.0) {
            let v = velocity_from_angle(Vec2::new(fx, fy), Vec2::new(tx, ty), speed);
            prop_assert!((v.length() - speed).abs() < 1e-3);
        }

        #[test]
        fn random_in_range_stays_in_bounds(seed: u64, min in 0.0f32..50.0, span in 1.0f32..50.0) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let max = min + span;
            let value = random_in_range(&mut rng, min, max);
            prop_assert!(value >= min.ceil() && value <= max.floor());
        }
    }
}
