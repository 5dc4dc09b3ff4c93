//! Read-only view of a game for renderers.

use crate::game_state::{ActivePiece, LockEvent};
use crate::types::{drop_interval_ms, Cell, BOARD_HEIGHT, BOARD_WIDTH, START_LEVEL};

pub type BoardGrid = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Locked cells, `[row][col]`, top row first.
    pub board: BoardGrid,
    pub active: Option<ActivePiece>,
    /// Anchor row of the ghost preview. `None` after game over.
    pub ghost_y: Option<i8>,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub drop_interval_ms: u32,
    pub paused: bool,
    pub game_over: bool,
    pub session_id: u32,
    /// Most recent lock in this session.
    pub last_lock: Option<LockEvent>,
}

impl GameSnapshot {
    /// Cheap fingerprint for "did anything visible change".
    pub fn fingerprint(&self) -> u64 {
        use std::hash::{Hash, Hasher};
        let mut h = std::collections::hash_map::DefaultHasher::new();
        self.hash(&mut h);
        h.finish()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            score: 0,
            lines: 0,
            level: START_LEVEL,
            drop_interval_ms: drop_interval_ms(START_LEVEL),
            paused: false,
            game_over: false,
            session_id: 0,
            last_lock: None,
        }
    }
}
