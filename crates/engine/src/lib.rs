//! Driving loop for the game engine.
//!
//! The core crate only changes state when asked. This crate supplies time:
//!
//! - [`gravity`]: accumulates frame time into forced one-row drops
//! - [`driver`]: one frame of the game loop plus immediate input dispatch
//! - [`scheduler`]: a cancelable repeating frame task with start/stop lifecycle
//!
//! ```
//! use blockfall_core::ScoringRules;
//! use blockfall_engine::GameDriver;
//! use blockfall_types::{GameAction, FRAME_MS};
//!
//! let mut driver = GameDriver::new(7, ScoringRules::classic());
//! driver.dispatch(GameAction::MoveLeft);
//! let outcome = driver.frame(FRAME_MS);
//! assert!(!outcome.locked);
//! ```

pub mod driver;
pub mod gravity;
pub mod scheduler;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use driver::{FrameOutcome, GameDriver};
pub use gravity::GravityClock;
pub use scheduler::{FrameTick, Ticker};
