//! Gravity accumulator.
//!
//! Elapsed frame time is summed; once the sum exceeds the drop interval the piece
//! takes one forced step and the sum starts again from zero.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GravityClock {
    accumulated_ms: u32,
}

impl GravityClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accumulated_ms(&self) -> u32 {
        self.accumulated_ms
    }

    /// Add `elapsed_ms`; returns true when a gravity step is due.
    pub fn advance(&mut self, elapsed_ms: u32, interval_ms: u32) -> bool {
        self.accumulated_ms = self.accumulated_ms.saturating_add(elapsed_ms);
        if self.accumulated_ms > interval_ms {
            self.accumulated_ms = 0;
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.accumulated_ms = 0;
    }
}
