//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame scheduling (next-frame callbacks)
//! - The spawn interval timer
//! - Viewport size
//! - UI readouts (score, game over)

pub mod headless;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use headless::HeadlessPlatform;
#[cfg(target_arch = "wasm32")]
pub use web::WebPlatform;

use crate::Viewport;

/// Handle to a running interval timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u32);

/// Handle to a pending next-frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(pub u32);

/// A due callback, as delivered by a platform's event source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledEvent {
    Frame(FrameId),
    Timer(TimerId),
}

/// Services the round needs from its host
pub trait Platform {
    /// Current drawable area
    fn viewport(&self) -> Viewport;

    /// Start a repeating timer firing every `period_ms`
    fn start_interval(&mut self, period_ms: u32) -> TimerId;

    /// Stop a repeating timer; it must not fire again
    fn clear_interval(&mut self, id: TimerId);

    /// Ask for one callback on the next display frame
    fn request_frame(&mut self) -> FrameId;

    /// Withdraw a frame request; it must not fire
    fn cancel_frame(&mut self, id: FrameId);

    /// A round just started
    fn round_started(&mut self) {}

    /// Score readout changed
    fn score_changed(&mut self, _score: u64) {}

    /// Round ended with `final_score`
    fn round_over(&mut self, _final_score: u64) {}
}
