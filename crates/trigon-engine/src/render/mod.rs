//! Triangle rendering.
//!
//! One fixed pipeline, one static vertex buffer, one draw call per frame.
//! Vertex positions are already in normalized device coordinates, so the
//! output is resolution-independent by construction.

mod triangle;

pub use triangle::{TriangleRenderer, Vertex, TRIANGLE};
