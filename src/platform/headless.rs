//! Virtual-clock platform for native runs and tests
//!
//! Nothing fires on its own: the owner pulls due callbacks with
//! [`HeadlessPlatform::next_event`], which jumps the clock forward to the
//! earliest one.

use super::{FrameId, Platform, ScheduledEvent, TimerId};
use crate::Viewport;
use crate::consts::FRAME_MS;

#[derive(Debug, Clone, Copy)]
struct Interval {
    id: TimerId,
    period_ms: f64,
    next_due: f64,
}

/// Deterministic scheduler with a simulated clock
#[derive(Debug)]
pub struct HeadlessPlatform {
    viewport: Viewport,
    now_ms: f64,
    frame_ms: f64,
    next_token: u32,
    frames: Vec<(FrameId, f64)>,
    intervals: Vec<Interval>,
    /// Every score the round reported, in order
    pub score_updates: Vec<u64>,
    /// Score reported at game over
    pub final_score: Option<u64>,
    pub rounds_started: u32,
}

impl HeadlessPlatform {
    /// 60 Hz frames
    pub fn new(viewport: Viewport) -> Self {
        Self::with_frame_ms(viewport, FRAME_MS)
    }

    pub fn with_frame_ms(viewport: Viewport, frame_ms: f64) -> Self {
        Self {
            viewport,
            now_ms: 0.0,
            frame_ms,
            next_token: 0,
            frames: Vec::new(),
            intervals: Vec::new(),
            score_updates: Vec::new(),
            final_score: None,
            rounds_started: 0,
        }
    }

    /// Simulated time in milliseconds
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Outstanding frame requests plus running intervals
    pub fn pending(&self) -> usize {
        self.frames.len() + self.intervals.len()
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Advance the clock to the earliest due callback and return it.
    ///
    /// Frames win ties against timers. Returns `None` once nothing is scheduled.
    pub fn next_event(&mut self) -> Option<ScheduledEvent> {
        let frame = self
            .frames
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.1.total_cmp(&b.1.1))
            .map(|(idx, &(id, due))| (idx, id, due));
        let timer = self
            .intervals
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.next_due.total_cmp(&b.1.next_due))
            .map(|(idx, t)| (idx, t.id, t.next_due));

        match (frame, timer) {
            (Some((idx, id, due)), Some((_, _, timer_due))) if due <= timer_due => {
                Some(self.fire_frame(idx, id, due))
            }
            (Some((idx, id, due)), None) => Some(self.fire_frame(idx, id, due)),
            (_, Some((idx, id, due))) => {
                self.now_ms = due;
                let interval = &mut self.intervals[idx];
                interval.next_due += interval.period_ms;
                Some(ScheduledEvent::Timer(id))
            }
            (None, None) => None,
        }
    }

    fn fire_frame(&mut self, idx: usize, id: FrameId, due: f64) -> ScheduledEvent {
        self.now_ms = due;
        self.frames.swap_remove(idx);
        ScheduledEvent::Frame(id)
    }

    fn next_token(&mut self) -> u32 {
        let token = self.next_token;
        self.next_token += 1;
        token
    }
}

impl Platform for HeadlessPlatform {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn start_interval(&mut self, period_ms: u32) -> TimerId {
        let id = TimerId(self.next_token());
        let period_ms = period_ms as f64;
        self.intervals.push(Interval {
            id,
            period_ms,
            next_due: self.now_ms + period_ms,
        });
        id
    }

    fn clear_interval(&mut self, id: TimerId) {
        self.intervals.retain(|t| t.id != id);
    }

    fn request_frame(&mut self) -> FrameId {
        let id = FrameId(self.next_token());
        self.frames.push((id, self.now_ms + self.frame_ms));
        id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        self.frames.retain(|&(f, _)| f != id);
    }

    fn round_started(&mut self) {
        self.rounds_started += 1;
        self.final_score = None;
    }

    fn score_changed(&mut self, score: u64) {
        self.score_updates.push(score);
    }

    fn round_over(&mut self, final_score: u64) {
        self.final_score = Some(final_score);
    }
}
