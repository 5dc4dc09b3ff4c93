//! Blockfall: a falling-block puzzle game for the terminal (workspace facade crate).
//!
//! Re-exports the workspace crates under short names and hosts the binary's
//! configuration and logging setup.
//!
//! - [`core`]: rules engine (board, pieces, bag, scoring, game state)
//! - [`engine`]: gravity clock, frame driver and the cancelable frame ticker
//! - [`input`]: key mapping and held-key repeat
//! - [`term`]: framebuffer renderer
//! - [`types`]: shared constants and enums

pub mod config;
pub mod logging;

pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub use config::{Config, ConfigError};
