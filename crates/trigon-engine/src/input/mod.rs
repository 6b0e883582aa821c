//! Keyboard input.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! The window runtime translates platform key events into `KeyEvent`s.

mod state;
mod types;

pub use state::Keyboard;
pub use types::{Key, KeyEvent, KeyState};
