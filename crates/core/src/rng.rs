//! RNG module - 7-bag piece generation
//!
//! The bag holds one of each piece kind in shuffled order and is drawn until empty,
//! then refilled with a fresh shuffle. Between refills no kind repeats.
//!
//! Shuffling uses a small seeded LCG so a session can be replayed from its seed.

use arrayvec::ArrayVec;

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // A zero state would stay zero forever.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Random value in `[0, max)`. Uses the high bits, which have the longest period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Fisher-Yates shuffle
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// 7-bag piece generator.
///
/// Starts empty; the first draw fills it.
#[derive(Debug, Clone)]
pub struct Bag {
    pieces: ArrayVec<PieceKind, 7>,
    rng: SimpleRng,
}

impl Bag {
    pub fn new(seed: u32) -> Self {
        Self {
            pieces: ArrayVec::new(),
            rng: SimpleRng::new(seed),
        }
    }

    /// Kinds left before the next refill.
    pub fn remaining(&self) -> usize {
        self.pieces.len()
    }

    /// Drop the current contents so the next draw starts a fresh bag.
    ///
    /// The RNG keeps running, so consecutive sessions get different sequences.
    pub fn empty(&mut self) {
        self.pieces.clear();
    }

    fn refill(&mut self) {
        self.pieces.clear();
        self.pieces.extend(PieceKind::ALL);
        self.rng.shuffle(&mut self.pieces);
    }

    /// Take the next kind, refilling first if the bag is exhausted.
    pub fn draw(&mut self) -> PieceKind {
        if self.pieces.is_empty() {
            self.refill();
        }
        match self.pieces.pop() {
            Some(kind) => kind,
            // refill() always leaves seven pieces.
            None => PieceKind::I,
        }
    }
}
