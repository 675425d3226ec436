//! Round state machine
//!
//! Idle -> Running on start, Running -> GameOver on player contact, and
//! GameOver -> Running on the next start. A running round owns exactly one
//! spawn interval and one pending frame; both are torn down together when it
//! ends. Callbacks carrying any other handle are ignored.

use glam::Vec2;

use super::spawner::{Spawner, spawn_enemy};
use super::state::GameState;
use super::tick::{TickOutcome, tick};
use crate::Tuning;
use crate::platform::{FrameId, Platform, ScheduledEvent, TimerId};
use crate::renderer::Canvas;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundPhase {
    /// No round played yet
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Round ended; waiting for another start
    GameOver,
}

/// Owns the simulation state and its scheduling handles
#[derive(Debug)]
pub struct Round {
    tuning: Tuning,
    phase: RoundPhase,
    state: Option<GameState>,
    spawner: Spawner,
    frame: Option<FrameId>,
}

impl Round {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            tuning,
            phase: RoundPhase::Idle,
            state: None,
            spawner: Spawner::new(),
            frame: None,
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == RoundPhase::GameOver
    }

    /// Score of the current (or last finished) round
    pub fn score(&self) -> u64 {
        self.state.as_ref().map(|s| s.score).unwrap_or(0)
    }

    /// Simulation state, absent until the first start
    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Begin a new round: fresh state, spawner running, first frame requested
    pub fn start(&mut self, seed: u64, platform: &mut impl Platform) {
        if self.phase == RoundPhase::Running {
            log::warn!("Restarting a round that is still running");
            self.cancel_schedules(platform);
        }

        let viewport = platform.viewport();
        self.state = Some(GameState::new(seed, viewport, &self.tuning));
        self.phase = RoundPhase::Running;

        platform.round_started();
        platform.score_changed(0);

        self.spawner.start(platform, self.tuning.spawn_interval_ms);
        self.frame = Some(platform.request_frame());

        log::info!(
            "Round started (seed {}, viewport {}x{})",
            seed,
            viewport.width,
            viewport.height
        );
    }

    /// Fire toward `target`. Only accepted while running.
    pub fn fire(&mut self, target: Vec2) -> bool {
        if self.phase != RoundPhase::Running {
            return false;
        }
        match self.state.as_mut() {
            Some(state) => {
                state.fire_projectile(target, &self.tuning);
                true
            }
            None => false,
        }
    }

    /// Frame callback: run one tick and schedule the next (or end the round)
    pub fn on_frame(
        &mut self,
        id: FrameId,
        platform: &mut impl Platform,
        canvas: &mut dyn Canvas,
    ) -> Option<TickOutcome> {
        if self.phase != RoundPhase::Running || self.frame != Some(id) {
            log::debug!("Ignoring stale frame {:?}", id);
            return None;
        }
        self.frame = None;

        let state = self.state.as_mut()?;
        let outcome = tick(state, &self.tuning, platform.viewport(), canvas);

        if outcome.score_gained > 0 {
            platform.score_changed(state.score);
        }

        if outcome.player_hit {
            self.end_round(platform);
        } else {
            self.frame = Some(platform.request_frame());
        }

        Some(outcome)
    }

    /// Spawn timer callback: add one enemy
    pub fn on_spawn_timer(&mut self, id: TimerId, platform: &mut impl Platform) -> Option<u32> {
        if self.phase != RoundPhase::Running || !self.spawner.accepts(id) {
            log::debug!("Ignoring stale spawn timer {:?}", id);
            return None;
        }
        let state = self.state.as_mut()?;
        Some(spawn_enemy(state, &self.tuning, platform.viewport()))
    }

    /// Route a scheduled event to the matching callback
    pub fn dispatch(
        &mut self,
        event: ScheduledEvent,
        platform: &mut impl Platform,
        canvas: &mut dyn Canvas,
    ) {
        match event {
            ScheduledEvent::Frame(id) => {
                self.on_frame(id, platform, canvas);
            }
            ScheduledEvent::Timer(id) => {
                self.on_spawn_timer(id, platform);
            }
        }
    }

    fn cancel_schedules(&mut self, platform: &mut impl Platform) {
        if let Some(id) = self.frame.take() {
            platform.cancel_frame(id);
        }
        self.spawner.stop(platform);
    }

    fn end_round(&mut self, platform: &mut impl Platform) {
        self.cancel_schedules(platform);
        self.phase = RoundPhase::GameOver;
        let score = self.score();
        platform.round_over(score);
        log::info!("Game over - final score {}", score);
    }
}
