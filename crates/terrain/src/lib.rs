//! Dynamic terrain tiling.
//!
//! A fixed-resolution patch of `(S+1)²` vertices stays centred under a
//! camera and samples its heights from a larger [`HeightField`] with
//! wraparound addressing, so the visible surface never runs out while the
//! vertex count stays constant.

pub mod camera;
pub mod controller;
pub mod error;
pub mod height_field;
pub mod mesh;
pub mod patch;
pub mod wrap;

pub use camera::*;
pub use controller::*;
pub use error::*;
pub use height_field::*;
pub use mesh::*;
pub use patch::*;
pub use wrap::*;
