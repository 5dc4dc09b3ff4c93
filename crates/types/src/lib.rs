//! Shared types and constants for the falling-block game.
//!
//! Everything here is plain data with no dependencies, so it can be used by the
//! engine, the renderer and the input layer alike.
//!
//! # Board
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//! - **Spawn anchor**: (3, -1), i.e. the top row of a piece's 4x4 frame starts one
//!   row above the visible well
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 16 | Frame period of the driving loop (~60 FPS) |
//! | `BASE_DROP_MS` | 1000 | Gravity interval at level 1 |
//! | `DROP_STEP_MS` | 75 | Interval reduction per level |
//! | `DROP_INTERVAL_MIN_MS` | 100 | Fastest gravity |
//! | `MOVE_REPEAT_DELAY_MS` | 220 | Hold time before a held move repeats |
//! | `MOVE_REPEAT_INTERVAL_MS` | 120 | Interval between repeated moves |
//! | `SOFT_DROP_REPEAT_DELAY_MS` | 120 | Hold time before a held soft drop repeats |
//! | `SOFT_DROP_REPEAT_INTERVAL_MS` | 70 | Interval between repeated soft drops |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//! assert_eq!((BOARD_WIDTH, BOARD_HEIGHT), (10, 20));
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Side length of the square frame every piece shape is embedded in.
pub const SHAPE_SIZE: usize = 4;

/// Column of the spawn anchor (left edge of the 4x4 frame).
pub const SPAWN_X: i8 = 3;

/// Row of the spawn anchor. Negative so that part of the frame sits above the well.
pub const SPAWN_Y: i8 = -1;

/// Horizontal offsets tried, in order, when a rotation collides in place.
///
/// No shift first, then one column, then two; left before right at each distance.
pub const KICK_OFFSETS: [i8; 5] = [0, -1, 1, -2, 2];

/// Frame period of the driving loop in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Gravity interval at level 1 (one row per second)
pub const BASE_DROP_MS: u32 = 1000;

/// Gravity interval reduction per level above 1
pub const DROP_STEP_MS: u32 = 75;

/// Gravity interval floor
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Cleared lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Level at the start of a session
pub const START_LEVEL: u32 = 1;

/// Initial delay before a held horizontal move starts repeating.
pub const MOVE_REPEAT_DELAY_MS: u32 = 220;

/// Interval between repeated horizontal moves while held.
pub const MOVE_REPEAT_INTERVAL_MS: u32 = 120;

/// Initial delay before a held soft drop starts repeating.
pub const SOFT_DROP_REPEAT_DELAY_MS: u32 = 120;

/// Interval between repeated soft drops while held.
pub const SOFT_DROP_REPEAT_INTERVAL_MS: u32 = 70;

/// Terminals without key-release events: a held key counts as released after this
/// long without a press or repeat event.
pub const KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Classic line clear table, multiplied by the level.
pub const CLASSIC_LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Flat line clear table, no level multiplier.
pub const FLAT_LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Gravity interval for a level: `max(100, 1000 - (level - 1) * 75)`.
///
/// ```
/// use blockfall_types::drop_interval_ms;
///
/// assert_eq!(drop_interval_ms(1), 1000);
/// assert_eq!(drop_interval_ms(2), 925);
/// assert_eq!(drop_interval_ms(13), 100);
/// assert_eq!(drop_interval_ms(50), 100);
/// ```
pub const fn drop_interval_ms(level: u32) -> u32 {
    let step = level.saturating_sub(1).saturating_mul(DROP_STEP_MS);
    let interval = BASE_DROP_MS.saturating_sub(step);
    if interval < DROP_INTERVAL_MIN_MS {
        DROP_INTERVAL_MIN_MS
    } else {
        interval
    }
}

/// Level for a cumulative line count: `1 + lines / 10`.
pub const fn level_for_lines(lines: u32) -> u32 {
    START_LEVEL + lines / LINES_PER_LEVEL
}

/// The seven tetromino kinds.
///
/// Each kind has one canonical spawn layout and one display colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds, in the order a fresh bag is filled before shuffling.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("Z"), Some(PieceKind::Z));
    /// assert_eq!(PieceKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }

    /// Uppercase letter for HUD display.
    pub fn letter(&self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::T => 'T',
            PieceKind::Z => 'Z',
        }
    }
}

/// Direction of a quarter turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotateDir {
    /// 90° clockwise
    Cw,
    /// 90° counter-clockwise
    Ccw,
}

/// Discrete player commands.
///
/// Keyboard keys and held-key repeats are all translated into these before they
/// reach the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Move piece one row down, locking it if it cannot move
    SoftDrop,
    /// Drop piece to its resting row and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Toggle pause
    Pause,
    /// Start a new session (only honoured after game over)
    Restart,
}

impl GameAction {
    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("ROTATECCW"), Some(GameAction::RotateCcw));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }

    /// Whether this action changes the piece or board (as opposed to session control).
    pub fn is_piece_action(&self) -> bool {
        !matches!(self, GameAction::Pause | GameAction::Restart)
    }
}

/// A cell on the game board
///
/// - `None`: empty
/// - `Some(kind)`: locked cell, tagged with the piece kind that placed it
pub type Cell = Option<PieceKind>;
