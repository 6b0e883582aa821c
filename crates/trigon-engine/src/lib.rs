//! Trigon engine crate.
//!
//! Owns the platform + GPU pieces needed to put one triangle on screen:
//! window runtime, GPU context, keyboard input, frame timing, and the
//! triangle renderer itself.

pub mod gpu;
pub mod window;
pub mod input;
pub mod render;
pub mod time;

pub mod color;
pub mod logging;
