//! Core engine types and utilities for the dynamic terrain demo.
//!
//! This crate provides the foundational types used across all engine systems:
//! - Transform and world placement
//! - Frame time management

pub mod time;
pub mod transform;

pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Vec2, Vec3};
