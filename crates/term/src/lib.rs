//! Terminal rendering.
//!
//! A small, game-oriented rendering layer: [`GameView`] paints a
//! [`core::GameSnapshot`] into a [`FrameBuffer`] of styled cells, and
//! [`TerminalRenderer`] flushes that buffer to the terminal as full redraws or
//! changed-run diffs.
//!
//! Board cells are drawn two columns wide to compensate for terminal glyph aspect ratio.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{piece_color, GameView, Viewport, WellRect, PAGE_BG, WELL_BG};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
