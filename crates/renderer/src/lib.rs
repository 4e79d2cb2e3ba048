//! wgpu backend for the dynamic terrain ribbon.

pub mod gpu;
pub mod mesh;
pub mod vertex;

pub use gpu::*;
pub use mesh::*;
pub use vertex::*;
