//! Press-and-hold auto-repeat.
//!
//! A press fires once immediately. If the key is still held after `delay_ms` it fires
//! again, then every `interval_ms` until released. Release cancels any pending repeat.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatTimer {
    delay_ms: u32,
    interval_ms: u32,
    held: bool,
    /// Time held since the press, capped once repeating starts.
    held_ms: u32,
    repeating: bool,
}

impl RepeatTimer {
    pub fn new(delay_ms: u32, interval_ms: u32) -> Self {
        Self {
            delay_ms,
            // A zero interval would fire without bound.
            interval_ms: interval_ms.max(1),
            held: false,
            held_ms: 0,
            repeating: false,
        }
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Start holding. Returns true when this press should fire (not already held).
    pub fn press(&mut self) -> bool {
        if self.held {
            return false;
        }
        self.held = true;
        self.held_ms = 0;
        self.repeating = false;
        true
    }

    /// Stop holding and cancel pending repeats.
    pub fn release(&mut self) {
        self.held = false;
        self.held_ms = 0;
        self.repeating = false;
    }

    /// Advance by `elapsed_ms`; returns how many repeats fired.
    pub fn update(&mut self, elapsed_ms: u32) -> u32 {
        if !self.held {
            return 0;
        }
        self.held_ms = self.held_ms.saturating_add(elapsed_ms);

        let mut fired = 0;
        if !self.repeating {
            if self.held_ms < self.delay_ms {
                return 0;
            }
            self.repeating = true;
            self.held_ms -= self.delay_ms;
            fired += 1;
        }
        fired += self.held_ms / self.interval_ms;
        self.held_ms %= self.interval_ms;
        fired
    }
}
