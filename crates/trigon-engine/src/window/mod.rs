//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, and wires them to the GPU and
//! render layers.

mod runtime;

pub use runtime::{Runtime, WindowConfig};
