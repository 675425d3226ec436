//! Drawing surface abstraction
//!
//! The simulation only ever needs two primitives: a translucent full-screen
//! fade and a filled circle with alpha.

#[cfg(target_arch = "wasm32")]
pub mod canvas2d;

#[cfg(target_arch = "wasm32")]
pub use canvas2d::Canvas2d;

use glam::Vec2;

use crate::Viewport;
use crate::sim::Color;

/// A surface the simulation draws onto
pub trait Canvas {
    /// Cover the whole viewport with black at `alpha` (leaves motion trails)
    fn fade(&mut self, viewport: Viewport, alpha: f32);

    /// Draw a filled circle
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32);
}

/// A single recorded draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCall {
    Fade {
        alpha: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
        alpha: f32,
    },
}

/// Canvas that records draws instead of rasterizing (headless runs, tests)
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub calls: Vec<DrawCall>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything recorded so far
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Number of circles drawn since the last clear
    pub fn circle_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Circle { .. }))
            .count()
    }
}

impl Canvas for RecordingCanvas {
    fn fade(&mut self, _viewport: Viewport, alpha: f32) {
        self.calls.push(DrawCall::Fade { alpha });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32) {
        self.calls.push(DrawCall::Circle {
            center,
            radius,
            color,
            alpha,
        });
    }
}
