//! Time-bounded property animation
//!
//! A [`Tween`] interpolates one scalar from a start value to an end value over
//! a fixed number of ticks. It is advanced exactly once per simulation tick by
//! whoever owns it; there is no global animation scheduler.

/// Easing curve applied to normalized progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    /// Quadratic ease-out: fast start, gentle landing
    #[default]
    QuadOut,
}

impl Easing {
    /// Map progress `t` in [0, 1] onto the curve
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

/// Scalar animation from `from` to `to` over `duration` ticks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    pub duration: u32,
    pub elapsed: u32,
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: u32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration: duration.max(1),
            elapsed: 0,
            easing,
        }
    }

    /// Current interpolated value
    pub fn value(&self) -> f32 {
        if self.is_finished() {
            return self.to;
        }
        let t = self.elapsed as f32 / self.duration as f32;
        self.from + (self.to - self.from) * self.easing.apply(t)
    }

    /// Step one tick and return the new value
    pub fn advance(&mut self) -> f32 {
        if self.elapsed < self.duration {
            self.elapsed += 1;
        }
        self.value()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}
