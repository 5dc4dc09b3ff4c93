//! Game state module - the falling-piece engine
//!
//! `GameState` owns the board, the active piece, the bag and the session counters.
//! Every operation is synchronous and takes effect before it returns. Illegal moves
//! are not errors: they leave the state untouched and report `false`.
//!
//! Gravity is not driven from here. The caller steps the piece with [`GameState::soft_drop`]
//! once per [`GameState::drop_interval_ms`] while the game is running.

use tracing::{debug, info};

use crate::board::Board;
use crate::pieces::Shape;
use crate::rng::Bag;
use crate::scoring::ScoringRules;
use crate::snapshot::GameSnapshot;
use crate::types::{
    drop_interval_ms, level_for_lines, GameAction, PieceKind, RotateDir, KICK_OFFSETS, SPAWN_X,
    SPAWN_Y, START_LEVEL,
};

/// The falling piece: its kind, current (rotated) shape and frame anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// A piece in its spawn layout at the spawn anchor.
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: Shape::from_kind(kind),
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    /// Absolute `(x, y)` of every filled cell, including rows above the well.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .cells()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}

/// Session phase, derived from the pause and game-over flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Running,
    Paused,
    GameOver,
}

/// Outcome of a one-row soft drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropStep {
    /// The piece moved down one row.
    Moved,
    /// The piece could not move and was locked.
    Locked,
    /// Paused or game over; nothing happened.
    Ignored,
}

/// Result of one line clear pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineClear {
    pub lines: u32,
    pub points: u32,
    pub leveled_up: bool,
}

/// Recorded when a piece locks. Carried in snapshots for the side panel's last-clear
/// readout; cleared on reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    pub line_clear_score: u32,
    pub leveled_up: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<ActivePiece>,
    bag: Bag,
    rules: ScoringRules,
    /// Increments on every reset.
    session_id: u32,
    /// Pieces spawned in this session, including a blocked final spawn.
    pieces_spawned: u32,
    last_event: Option<LockEvent>,
    score: u32,
    lines: u32,
    level: u32,
    drop_interval_ms: u32,
    paused: bool,
    game_over: bool,
}

impl GameState {
    /// Start a session on an empty well and spawn the first piece.
    pub fn new(seed: u32, rules: ScoringRules) -> Self {
        Self::with_board(seed, rules, Board::new())
    }

    /// Start a session on a prefilled well.
    ///
    /// If the first piece cannot spawn the session starts in game over.
    pub fn with_board(seed: u32, rules: ScoringRules, board: Board) -> Self {
        let mut state = Self {
            board,
            active: None,
            bag: Bag::new(seed),
            rules,
            session_id: 0,
            pieces_spawned: 0,
            last_event: None,
            score: 0,
            lines: 0,
            level: START_LEVEL,
            drop_interval_ms: drop_interval_ms(START_LEVEL),
            paused: false,
            game_over: false,
        };
        state.spawn_piece();
        state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn session_id(&self) -> u32 {
        self.session_id
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Milliseconds between forced one-row drops at the current level.
    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else if self.paused {
            Phase::Paused
        } else {
            Phase::Running
        }
    }

    pub fn last_event(&self) -> Option<LockEvent> {
        self.last_event
    }

    /// Piece-mutating operations are only honoured while running with a live piece.
    fn can_act(&self) -> bool {
        !self.paused && !self.game_over && self.active.is_some()
    }

    /// Draw the next kind from the bag and place it at the spawn anchor.
    ///
    /// If the spawn placement collides the session ends. The blocked piece stays
    /// visible as the active piece but can no longer move.
    pub fn spawn_piece(&mut self) -> bool {
        if self.game_over {
            return false;
        }

        let kind = self.bag.draw();
        let piece = ActivePiece::spawn(kind);
        self.active = Some(piece);
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);

        if self.board.collides(&piece.shape, piece.x, piece.y) {
            self.game_over = true;
            info!(
                score = self.score,
                lines = self.lines,
                level = self.level,
                pieces = self.pieces_spawned,
                kind = kind.as_str(),
                "spawn blocked, game over"
            );
            return false;
        }

        debug!(kind = kind.as_str(), bag_left = self.bag.remaining(), "spawned piece");
        true
    }

    /// Whether `shape`, placed at the active anchor shifted by `(dx, dy)`, is illegal.
    ///
    /// With no active piece everything collides.
    pub fn collides(&self, dx: i8, dy: i8, shape: &Shape) -> bool {
        match self.active {
            Some(active) => self.board.collides(
                shape,
                active.x.saturating_add(dx),
                active.y.saturating_add(dy),
            ),
            None => true,
        }
    }

    /// Shift the active piece by `dx` columns if the target is free.
    pub fn move_horizontal(&mut self, dx: i8) -> bool {
        if !self.can_act() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };
        if self.collides(dx, 0, &active.shape) {
            return false;
        }
        self.active = Some(ActivePiece {
            x: active.x + dx,
            ..active
        });
        true
    }

    /// Move the active piece down one row, or lock it if the row below is blocked.
    pub fn soft_drop(&mut self) -> DropStep {
        if !self.can_act() {
            return DropStep::Ignored;
        }
        let Some(active) = self.active else {
            return DropStep::Ignored;
        };
        if self.collides(0, 1, &active.shape) {
            self.lock_piece();
            return DropStep::Locked;
        }
        self.active = Some(ActivePiece {
            y: active.y + 1,
            ..active
        });
        DropStep::Moved
    }

    /// Rows the active piece can fall before the next step would collide.
    fn drop_distance(&self) -> i8 {
        let Some(active) = self.active else {
            return 0;
        };
        let mut rows: i8 = 0;
        while !self.collides(0, rows + 1, &active.shape) {
            rows += 1;
        }
        rows
    }

    /// Drop the active piece to its resting row, award drop points and lock it.
    ///
    /// Returns the number of rows dropped.
    pub fn hard_drop(&mut self) -> u32 {
        if !self.can_act() {
            return 0;
        }
        let Some(active) = self.active else {
            return 0;
        };
        let rows = self.drop_distance();
        self.active = Some(ActivePiece {
            y: active.y + rows,
            ..active
        });
        self.score = self
            .score
            .saturating_add(self.rules.hard_drop_points(rows as u32));
        self.lock_piece();
        rows as u32
    }

    /// Rotate the active piece a quarter turn, trying each horizontal kick offset in
    /// order. The first free placement wins; if none is free nothing changes.
    pub fn rotate(&mut self, dir: RotateDir) -> bool {
        if !self.can_act() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };
        let rotated = active.shape.rotated(dir);
        for dx in KICK_OFFSETS {
            if !self.collides(dx, 0, &rotated) {
                self.active = Some(ActivePiece {
                    shape: rotated,
                    x: active.x + dx,
                    ..active
                });
                return true;
            }
        }
        false
    }

    /// Commit the active piece to the board, clear lines and spawn the next piece.
    ///
    /// Cells above the well are discarded.
    pub fn lock_piece(&mut self) {
        if !self.can_act() {
            return;
        }
        let Some(active) = self.active.take() else {
            return;
        };

        self.board
            .lock_shape(&active.shape, active.x, active.y, active.kind);
        let clear = self.clear_lines();

        debug!(
            kind = active.kind.as_str(),
            x = active.x,
            y = active.y,
            lines = clear.lines,
            points = clear.points,
            "locked piece"
        );

        self.last_event = Some(LockEvent {
            kind: active.kind,
            lines_cleared: clear.lines,
            line_clear_score: clear.points,
            leveled_up: clear.leveled_up,
        });

        self.spawn_piece();
    }

    /// Remove full rows and apply scoring, line count, level and gravity updates.
    ///
    /// Points use the level in force before this clear.
    pub fn clear_lines(&mut self) -> LineClear {
        let cleared = self.board.clear_full_rows().len();
        if cleared == 0 {
            return LineClear::default();
        }

        let points = self.rules.line_clear_points(cleared, self.level);
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(cleared as u32);

        let level = level_for_lines(self.lines);
        let leveled_up = level > self.level;
        if leveled_up {
            info!(level, lines = self.lines, "level up");
        }
        self.level = level;
        self.drop_interval_ms = drop_interval_ms(level);

        LineClear {
            lines: cleared as u32,
            points,
            leveled_up,
        }
    }

    /// Flip the pause flag. Ignored after game over.
    pub fn toggle_pause(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        self.paused = !self.paused;
        info!(paused = self.paused, "pause toggled");
        true
    }

    /// Start a new session. Only honoured after game over.
    pub fn reset(&mut self) -> bool {
        if !self.game_over {
            return false;
        }

        info!(
            session = self.session_id,
            score = self.score,
            lines = self.lines,
            pieces = self.pieces_spawned,
            "session reset"
        );

        self.board.clear();
        self.bag.empty();
        self.active = None;
        self.last_event = None;
        self.score = 0;
        self.lines = 0;
        self.level = START_LEVEL;
        self.drop_interval_ms = drop_interval_ms(START_LEVEL);
        self.paused = false;
        self.game_over = false;
        self.pieces_spawned = 0;
        self.session_id = self.session_id.wrapping_add(1);
        self.spawn_piece();
        true
    }

    /// Row the active piece would rest on if dropped now. Pure: nothing is mutated.
    pub fn ghost_y(&self) -> Option<i8> {
        let active = self.active?;
        Some(active.y + self.drop_distance())
    }

    /// Apply a player command. Returns whether anything changed.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_horizontal(-1),
            GameAction::MoveRight => self.move_horizontal(1),
            GameAction::SoftDrop => match self.soft_drop() {
                DropStep::Moved => {
                    self.score = self.score.saturating_add(self.rules.soft_drop_points);
                    true
                }
                DropStep::Locked => true,
                DropStep::Ignored => false,
            },
            GameAction::HardDrop => {
                if !self.can_act() {
                    return false;
                }
                self.hard_drop();
                true
            }
            GameAction::RotateCw => self.rotate(RotateDir::Cw),
            GameAction::RotateCcw => self.rotate(RotateDir::Ccw),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Restart => self.reset(),
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        for (dst, src) in out.board.iter_mut().zip(self.board.rows()) {
            dst.copy_from_slice(src);
        }
        out.active = self.active;
        out.ghost_y = if self.game_over { None } else { self.ghost_y() };
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level;
        out.drop_interval_ms = self.drop_interval_ms;
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.session_id = self.session_id;
        out.last_lock = self.last_event;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1, ScoringRules::default())
    }
}
