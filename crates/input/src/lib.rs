//! Terminal input.
//!
//! Maps `crossterm` key events into [`types::GameAction`] and tracks held keys so
//! movement and soft drop auto-repeat, including on terminals without key-release
//! events.

pub mod handler;
pub mod map;
pub mod repeat;

pub use blockfall_types as types;

pub use handler::InputHandler;
pub use map::{handle_key_event, is_repeatable, should_quit};
pub use repeat::RepeatTimer;
