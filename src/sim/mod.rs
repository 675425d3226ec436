//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per display frame, fixed per-tick velocities
//! - Seeded RNG only
//! - Stable iteration order (insertion order)
//! - No rendering or platform dependencies beyond the `Canvas`/`Platform` seams

pub mod collision;
pub mod round;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod tween;

pub use collision::{
    HitOutcome, HitReport, apply_hit, circles_overlap, player_contact, resolve_projectile_hits,
    spawn_explosion,
};
pub use round::{Round, RoundPhase};
pub use spawner::{Spawner, edge_spawn_point, random_enemy_color, spawn_enemy};
pub use state::{Body, Color, Enemy, GameState, Particle, Player, Projectile};
pub use tick::{TickOutcome, tick};
pub use tween::{Easing, Tween};
