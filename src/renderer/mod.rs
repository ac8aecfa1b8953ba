//! WebGPU rendering module
//!
//! Geometry is built on the CPU as coloured triangles in board pixels and
//! mapped to clip space by the pipeline.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::{frame, segment_colors};
pub use vertex::Vertex;
