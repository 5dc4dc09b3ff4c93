//! Held-key handler for terminal environments.
//!
//! Left, right and soft drop each own a [`RepeatTimer`]. Terminals that never report
//! key releases are handled with a timeout: a key that has not been re-reported within
//! the timeout counts as released.

use arrayvec::ArrayVec;

use crate::repeat::RepeatTimer;
use crate::types::{
    GameAction, KEY_RELEASE_TIMEOUT_MS, MOVE_REPEAT_DELAY_MS, MOVE_REPEAT_INTERVAL_MS,
    SOFT_DROP_REPEAT_DELAY_MS, SOFT_DROP_REPEAT_INTERVAL_MS,
};

/// Upper bound on repeats produced by one update.
pub const MAX_ACTIONS_PER_UPDATE: usize = 32;

pub type Actions = ArrayVec<GameAction, MAX_ACTIONS_PER_UPDATE>;

/// Tracks which repeatable keys are held and emits their repeats.
#[derive(Debug, Clone)]
pub struct InputHandler {
    left: RepeatTimer,
    right: RepeatTimer,
    down: RepeatTimer,
    since_last_key_ms: u32,
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            left: RepeatTimer::new(MOVE_REPEAT_DELAY_MS, MOVE_REPEAT_INTERVAL_MS),
            right: RepeatTimer::new(MOVE_REPEAT_DELAY_MS, MOVE_REPEAT_INTERVAL_MS),
            down: RepeatTimer::new(SOFT_DROP_REPEAT_DELAY_MS, SOFT_DROP_REPEAT_INTERVAL_MS),
            since_last_key_ms: 0,
            key_release_timeout_ms: KEY_RELEASE_TIMEOUT_MS,
        }
    }

    /// Override the implicit-release timeout. Zero disables it, for terminals that
    /// report releases.
    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    fn timer_mut(&mut self, action: GameAction) -> Option<&mut RepeatTimer> {
        match action {
            GameAction::MoveLeft => Some(&mut self.left),
            GameAction::MoveRight => Some(&mut self.right),
            GameAction::SoftDrop => Some(&mut self.down),
            _ => None,
        }
    }

    /// Whether the key for `action` is currently held.
    pub fn is_held(&self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.left.is_held(),
            GameAction::MoveRight => self.right.is_held(),
            GameAction::SoftDrop => self.down.is_held(),
            _ => false,
        }
    }

    /// Register a press (or a terminal's auto-repeat of one).
    ///
    /// Returns the action to perform now: the first press of a repeatable key, or any
    /// non-repeatable action unchanged. Re-reports of a held key return `None`.
    pub fn press(&mut self, action: GameAction) -> Option<GameAction> {
        match action {
            GameAction::MoveLeft => self.right.release(),
            GameAction::MoveRight => self.left.release(),
            _ => {}
        }
        match self.timer_mut(action) {
            Some(timer) => {
                let fresh = timer.press();
                self.since_last_key_ms = 0;
                fresh.then_some(action)
            }
            None => Some(action),
        }
    }

    pub fn release(&mut self, action: GameAction) {
        if let Some(timer) = self.timer_mut(action) {
            timer.release();
        }
    }

    /// Release every held key.
    pub fn clear(&mut self) {
        self.left.release();
        self.right.release();
        self.down.release();
        self.since_last_key_ms = 0;
    }

    /// Advance held keys by `elapsed_ms` and collect the repeats that fired.
    pub fn update(&mut self, elapsed_ms: u32) -> Actions {
        let mut actions = Actions::new();

        if self.key_release_timeout_ms > 0 {
            self.since_last_key_ms = self.since_last_key_ms.saturating_add(elapsed_ms);
            if self.since_last_key_ms > self.key_release_timeout_ms {
                self.left.release();
                self.right.release();
                self.down.release();
                return actions;
            }
        }

        for (timer, action) in [
            (&mut self.left, GameAction::MoveLeft),
            (&mut self.right, GameAction::MoveRight),
            (&mut self.down, GameAction::SoftDrop),
        ] {
            let fired = timer.update(elapsed_ms);
            for _ in 0..fired {
                if actions.try_push(action).is_err() {
                    break;
                }
            }
        }
        actions
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
