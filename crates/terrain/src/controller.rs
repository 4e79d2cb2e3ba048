//! Per-frame driver that keeps the terrain patch under the camera.

use crate::camera::CameraSource;
use crate::error::TerrainError;
use crate::height_field::HeightField;
use crate::mesh::MeshBuilder;
use crate::patch::{PatchSettings, TerrainPatch};

/// Owns a [`TerrainPatch`] and recentres it on the tracked camera each tick.
pub struct TerrainController<B: MeshBuilder> {
    patch: TerrainPatch<B>,
    camera: Box<dyn CameraSource>,
    ticks: u64,
}

impl<B: MeshBuilder> TerrainController<B> {
    /// Build the patch and place it under `camera`.
    pub fn new(
        field: HeightField,
        settings: PatchSettings,
        builder: B,
        camera: impl CameraSource + 'static,
    ) -> Result<Self, TerrainError> {
        let mut patch = TerrainPatch::new(field, settings, builder)?;
        patch.recenter(camera.position());
        Ok(Self {
            patch,
            camera: Box::new(camera),
            ticks: 0,
        })
    }

    /// Follow a different camera from the next tick on.
    pub fn attach(&mut self, camera: impl CameraSource + 'static) {
        self.camera = Box::new(camera);
        log::debug!("Terrain controller attached to new camera");
    }

    /// Force a patch update, then recentre it on the camera's latest position.
    pub fn tick(&mut self) {
        self.patch.update(true);
        let camera = self.camera.position();
        self.patch.recenter(camera);
        self.ticks += 1;
        log::trace!(
            "Terrain tick {}: camera ({:.2}, {:.2}), offset {:?}",
            self.ticks,
            camera.x,
            camera.z,
            self.patch.world_offset()
        );
    }

    pub fn patch(&self) -> &TerrainPatch<B> {
        &self.patch
    }

    pub fn builder(&self) -> &B {
        self.patch.builder()
    }

    pub fn builder_mut(&mut self) -> &mut B {
        self.patch.builder_mut()
    }

    pub fn handle(&self) -> &B::Handle {
        self.patch.handle()
    }

    /// Ticks run since construction.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
