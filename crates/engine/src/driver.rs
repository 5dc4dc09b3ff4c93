//! GameDriver: the body of the frame loop.
//!
//! Owns the engine and the gravity clock. Each frame it advances gravity (only while
//! running); input is applied immediately through [`GameDriver::dispatch`].

use tracing::debug;

use crate::core::{DropStep, GameSnapshot, GameState, Phase, ScoringRules};
use crate::gravity::GravityClock;
use crate::types::GameAction;

/// What a frame did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameOutcome {
    /// Gravity moved or locked the piece this frame.
    pub gravity_step: bool,
    /// A piece locked this frame.
    pub locked: bool,
}

#[derive(Debug, Clone)]
pub struct GameDriver {
    state: GameState,
    gravity: GravityClock,
}

impl GameDriver {
    pub fn new(seed: u32, rules: ScoringRules) -> Self {
        Self::from_state(GameState::new(seed, rules))
    }

    pub fn from_state(state: GameState) -> Self {
        Self {
            state,
            gravity: GravityClock::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn gravity(&self) -> &GravityClock {
        &self.gravity
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.state.snapshot_into(out);
    }

    /// Advance game time by `elapsed_ms`.
    pub fn frame(&mut self, elapsed_ms: u32) -> FrameOutcome {
        if self.state.phase() != Phase::Running {
            return FrameOutcome::default();
        }
        if !self
            .gravity
            .advance(elapsed_ms, self.state.drop_interval_ms())
        {
            return FrameOutcome::default();
        }

        let step = self.state.soft_drop();
        if step == DropStep::Locked {
            if let Some(event) = self.state.last_event() {
                debug!(
                    lines = event.lines_cleared,
                    score = self.state.score(),
                    "gravity lock"
                );
            }
        }
        FrameOutcome {
            gravity_step: step != DropStep::Ignored,
            locked: step == DropStep::Locked,
        }
    }

    /// Apply a player command immediately. Returns whether anything changed.
    pub fn dispatch(&mut self, action: GameAction) -> bool {
        let changed = self.state.apply_action(action);
        // A fresh session or an unpause starts a full gravity interval.
        if changed && !action.is_piece_action() {
            self.gravity.reset();
        }
        changed
    }
}
