//! Camera position sources the terrain follows.

use std::cell::RefCell;
use std::rc::Rc;

use engine_core::Transform;
use glam::Vec3;

/// Anything that can report a world-space viewpoint once per tick.
///
/// Only `x` and `z` are used for recentring.
pub trait CameraSource {
    fn position(&self) -> Vec3;
}

impl CameraSource for Vec3 {
    fn position(&self) -> Vec3 {
        *self
    }
}

impl CameraSource for Transform {
    fn position(&self) -> Vec3 {
        self.position
    }
}

/// A camera shared with the host, which keeps moving it between ticks.
impl<T: CameraSource> CameraSource for Rc<RefCell<T>> {
    fn position(&self) -> Vec3 {
        self.borrow().position()
    }
}
