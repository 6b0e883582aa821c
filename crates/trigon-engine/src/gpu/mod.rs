//! GPU context + surface management.
//!
//! Responsible for:
//! - acquiring the wgpu Adapter/Device/Queue for the window's surface
//! - configuring the surface (swapchain) and tracking resizes
//! - acquiring frames and submitting recorded commands

mod context;
mod surface;

pub use context::{Frame, GpuConfig, GpuContext, SurfaceAction};
