//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the rules of the game and nothing else: no terminal, no clock,
//! no input handling. Everything mutates through [`GameState`].
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 well with collision and line clearing
//! - [`pieces`]: 4x4 shape matrices and quarter-turn rotation
//! - [`rng`]: seeded 7-bag randomizer
//! - [`scoring`]: line clear and drop point rules
//! - [`game_state`]: the engine (spawn, move, drop, rotate, lock, pause, reset)
//! - [`snapshot`]: read-only copy of the state for renderers
//!
//! # Rules
//!
//! - **7-Bag Randomizer**: each run of seven spawns contains every kind once
//! - **Rotation**: 90° matrix turn, then horizontal kicks tried in the order 0, -1, +1, -2, +2
//! - **Lock**: a piece locks as soon as a one-row drop is blocked (no lock delay)
//! - **Levels**: one level per 10 lines, gravity `max(100, 1000 - (level - 1) * 75)` ms
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameState, ScoringRules};
//! use blockfall_types::GameAction;
//!
//! let mut game = GameState::new(12345, ScoringRules::classic());
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert!(game.score() > 0); // Hard drop awards points
//! ```

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

pub use board::Board;
pub use game_state::{ActivePiece, DropStep, GameState, LineClear, LockEvent, Phase};
pub use pieces::Shape;
pub use rng::{Bag, SimpleRng};
pub use scoring::ScoringRules;
pub use snapshot::{BoardGrid, GameSnapshot};
