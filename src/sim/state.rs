//! Game state and core simulation types
//!
//! Entities are plain structs held in flat `Vec`s owned by [`GameState`].
//! Projectiles and enemies carry a `live` flag: collision marks them dead
//! mid-tick and the tick's settle phase compacts them away.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::tween::{Easing, Tween};
use crate::renderer::Canvas;
use crate::{Tuning, Viewport, velocity_from_angle};

/// Display color as HSL (hue in degrees, saturation/lightness in percent)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl Color {
    pub const WHITE: Color = Color {
        hue: 0.0,
        saturation: 0.0,
        lightness: 100.0,
    };

    pub fn hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    /// CSS color string, e.g. `hsl(210, 50%, 50%)`
    pub fn css(&self) -> String {
        format!(
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

/// Shared behavior of everything the tick moves and draws
pub trait Body {
    fn pos(&self) -> Vec2;
    fn radius(&self) -> f32;
    fn color(&self) -> Color;

    /// Opacity used when drawing
    fn alpha(&self) -> f32 {
        1.0
    }

    /// Advance one tick
    fn step(&mut self);

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.fill_circle(self.pos(), self.radius(), self.color(), self.alpha());
    }
}

/// The stationary player at the viewport center
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Color,
}

impl Body for Player {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn color(&self) -> Color {
        self.color
    }

    fn step(&mut self) {}
}

/// A shot fired by the player
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Color,
    pub live: bool,
}

impl Projectile {
    /// True once the whole circle is past any viewport edge
    pub fn is_offscreen(&self, viewport: Viewport) -> bool {
        self.pos.x + self.radius < 0.0
            || self.pos.x - self.radius > viewport.width
            || self.pos.y + self.radius < 0.0
            || self.pos.y - self.radius > viewport.height
    }
}

impl Body for Projectile {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn color(&self) -> Color {
        self.color
    }

    fn step(&mut self) {
        self.pos += self.vel;
    }
}

/// An enemy converging on the player
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Color,
    pub live: bool,
    /// In-flight shrink animation (set by a non-lethal hit)
    pub shrink: Option<Tween>,
}

impl Enemy {
    /// Animate the radius down to `target` over `ticks`, replacing any shrink
    /// already in flight. Starts from the current (possibly mid-animation) radius.
    pub fn start_shrink(&mut self, target: f32, ticks: u32) {
        debug_assert!(target > 0.0, "shrink target must stay positive");
        self.shrink = Some(Tween::new(self.radius, target, ticks, Easing::QuadOut));
    }

    /// Radius the enemy is heading toward
    pub fn target_radius(&self) -> f32 {
        self.shrink.map(|t| t.to).unwrap_or(self.radius)
    }
}

impl Body for Enemy {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn color(&self) -> Color {
        self.color
    }

    fn step(&mut self) {
        if let Some(tween) = self.shrink.as_mut() {
            self.radius = tween.advance();
            if tween.is_finished() {
                self.shrink = None;
            }
        }
        debug_assert!(self.radius > 0.0, "live enemy radius must be positive");
        self.pos += self.vel;
    }
}

/// A fading explosion fragment (visual only)
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Color,
    /// 1.0 at birth, removed once it reaches 0
    pub alpha: f32,
    /// Velocity multiplier per tick
    pub friction: f32,
    /// Alpha lost per tick
    pub fade: f32,
}

impl Body for Particle {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn color(&self) -> Color {
        self.color
    }

    fn alpha(&self) -> f32 {
        self.alpha
    }

    fn step(&mut self) {
        self.vel *= self.friction;
        self.pos += self.vel;
        self.alpha -= self.fade;
    }
}

/// Everything one round mutates
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed this round was started with
    pub seed: u64,
    pub rng: Pcg32,
    pub score: u64,
    /// Ticks run so far
    pub time_ticks: u64,
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub particles: Vec<Particle>,
    next_id: u32,
}

impl GameState {
    /// Fresh round: zero score, no enemies/projectiles/particles, player at center
    pub fn new(seed: u64, viewport: Viewport, tuning: &Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            score: 0,
            time_ticks: 0,
            player: Player {
                pos: viewport.center(),
                radius: tuning.player_radius,
                color: Color::WHITE,
            },
            projectiles: Vec::new(),
            enemies: Vec::new(),
            particles: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Fire a projectile from the player toward `target`
    pub fn fire_projectile(&mut self, target: Vec2, tuning: &Tuning) -> u32 {
        let id = self.next_entity_id();
        let origin = self.player.pos;
        self.projectiles.push(Projectile {
            id,
            pos: origin,
            vel: velocity_from_angle(origin, target, tuning.projectile_speed),
            radius: tuning.projectile_radius,
            color: Color::WHITE,
            live: true,
        });
        id
    }

    /// Drop projectiles and enemies marked dead during the current tick
    pub fn compact(&mut self) {
        self.projectiles.retain(|p| p.live);
        self.enemies.retain(|e| e.live);
    }

    /// Live enemy count
    pub fn live_enemies(&self) -> usize {
        self.enemies.iter().filter(|e| e.live).count()
    }
}
