//! The fixed-resolution terrain patch.
//!
//! The patch is a ribbon of `(S+1)²` vertices built once. Vertex `(i, j)`
//! takes its height from the field sample at
//! `(wrap(j * step, rows), wrap(i * step, columns))`, so a patch whose
//! logical span exceeds the field simply repeats it. Geometry lives in unit
//! grid space (`x = i`, `z = j`); physical size only drives placement.

use engine_core::Transform;
use glam::{Vec2, Vec3};

use crate::error::TerrainError;
use crate::height_field::HeightField;
use crate::mesh::{flatten_paths, MeshBuilder, SideOrientation};
use crate::wrap::wrap_index;

/// Field rows/columns advanced per patch grid step.
pub const DEFAULT_STEP: u32 = 3;

/// Construction parameters for a [`TerrainPatch`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatchSettings {
    /// Grid steps per axis; the patch has `subdivisions + 1` vertices per axis.
    pub subdivisions: u32,
    /// Field samples skipped per grid step before wrapping.
    pub step: u32,
    pub orientation: SideOrientation,
}

impl Default for PatchSettings {
    fn default() -> Self {
        Self {
            subdivisions: 5,
            step: DEFAULT_STEP,
            orientation: SideOrientation::Back,
        }
    }
}

impl PatchSettings {
    pub fn with_subdivisions(subdivisions: u32) -> Self {
        Self {
            subdivisions,
            ..Default::default()
        }
    }

    fn validate(&self) -> Result<(), TerrainError> {
        if self.subdivisions == 0 {
            return Err(TerrainError::InvalidSubdivisions(self.subdivisions));
        }
        if self.step == 0 {
            return Err(TerrainError::InvalidStep(self.step));
        }
        let per_axis = self.subdivisions as u64 + 1;
        if per_axis.checked_mul(per_axis).map_or(true, |n| n > u32::MAX as u64) {
            return Err(TerrainError::TooManyVertices {
                subdivisions: self.subdivisions,
            });
        }
        Ok(())
    }
}

/// Pending-work state of a patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchState {
    Idle,
    /// A resize has been requested but not yet applied.
    SizeDirty,
}

/// World offset that centres a patch of the given half-extent on `camera`.
#[inline]
pub fn centered_offset(camera: Vec3, half_size_x: f32, half_size_z: f32) -> Vec2 {
    Vec2::new(camera.x - half_size_x, camera.z - half_size_z)
}

/// Terrain mesh with a constant vertex count, resampled from a [`HeightField`].
pub struct TerrainPatch<B: MeshBuilder> {
    field: HeightField,
    subdivisions: u32,
    step: u32,
    positions: Vec<f32>,
    transform: Transform,
    average_sub_size_x: f32,
    average_sub_size_z: f32,
    size_x: f32,
    size_z: f32,
    half_size_x: f32,
    half_size_z: f32,
    state: PatchState,
    builder: B,
    handle: B::Handle,
}

impl<B: MeshBuilder> TerrainPatch<B> {
    /// Build the ribbon through `builder` and run the initial forced update.
    pub fn new(
        field: HeightField,
        settings: PatchSettings,
        mut builder: B,
    ) -> Result<Self, TerrainError> {
        settings.validate()?;

        let subdivisions = settings.subdivisions;
        let step = settings.step;
        let paths: Vec<Vec<Vec3>> = (0..=subdivisions)
            .map(|j| {
                (0..=subdivisions)
                    .map(|i| {
                        let index = Self::wrapped_sample(&field, step, i, j);
                        Vec3::new(i as f32, field.elevation(index), j as f32)
                    })
                    .collect()
            })
            .collect();
        let handle = builder.build_ribbon(&paths, settings.orientation);
        let positions = flatten_paths(&paths);

        let mut patch = Self {
            average_sub_size_x: field.spacing_x(),
            average_sub_size_z: field.spacing_z(),
            field,
            subdivisions,
            step,
            positions,
            transform: Transform::default(),
            size_x: 0.0,
            size_z: 0.0,
            half_size_x: 0.0,
            half_size_z: 0.0,
            state: PatchState::Idle,
            builder,
            handle,
        };
        patch.update(true);

        log::info!(
            "Terrain patch: {} vertices from {}x{} field (step {}), size {:.2} x {:.2}",
            patch.vertex_count(),
            patch.field.columns(),
            patch.field.rows(),
            step,
            patch.size_x,
            patch.size_z
        );
        Ok(patch)
    }

    fn wrapped_sample(field: &HeightField, step: u32, i: u32, j: u32) -> usize {
        let row = wrap_index(j as i64 * step as i64, field.rows());
        let column = wrap_index(i as i64 * step as i64, field.columns());
        field.sample_index(row, column)
    }

    /// Recompute the patch if `force` is set. Returns whether anything ran.
    ///
    /// Unforced updates are no-ops: only full regeneration is supported.
    pub fn update(&mut self, force: bool) -> bool {
        if !force {
            return false;
        }
        self.state = PatchState::SizeDirty;
        self.update_terrain(true);
        self.state = PatchState::Idle;
        true
    }

    fn update_terrain(&mut self, update_size: bool) {
        if update_size {
            self.update_terrain_size();
        }

        let per_axis = self.subdivisions + 1;
        for j in 0..per_axis {
            for i in 0..per_axis {
                let index = Self::wrapped_sample(&self.field, self.step, i, j);
                let p = (j as usize * per_axis as usize + i as usize) * 3;
                self.positions[p] = i as f32;
                self.positions[p + 1] = self.field.elevation(index);
                self.positions[p + 2] = j as f32;
            }
        }
        self.builder.update_vertex_positions(&self.handle, &self.positions);
        log::trace!("Terrain patch regenerated ({} vertices)", self.vertex_count());
    }

    /// Recompute physical size and half-size from subdivisions and field spacing.
    pub fn update_terrain_size(&mut self) -> &mut Self {
        let subdivisions = self.subdivisions as f32;
        self.size_x = subdivisions * self.average_sub_size_x;
        self.size_z = subdivisions * self.average_sub_size_z;
        self.half_size_x = self.size_x * 0.5;
        self.half_size_z = self.size_z * 0.5;
        self
    }

    /// Move the patch so it is centred on `camera` in x/z.
    pub fn recenter(&mut self, camera: Vec3) {
        let offset = centered_offset(camera, self.half_size_x, self.half_size_z);
        self.transform.set_ground_offset(offset);
    }

    /// Field sample that vertex `(i, j)` reads.
    pub fn sample_index(&self, i: u32, j: u32) -> usize {
        Self::wrapped_sample(&self.field, self.step, i, j)
    }

    /// Local-space position of vertex `(i, j)`.
    pub fn vertex_position(&self, i: u32, j: u32) -> Vec3 {
        let p = (j as usize * (self.subdivisions as usize + 1) + i as usize) * 3;
        Vec3::from_slice(&self.positions[p..p + 3])
    }

    pub fn subdivisions(&self) -> u32 {
        self.subdivisions
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    pub fn state(&self) -> PatchState {
        self.state
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Flat xyz buffer as last uploaded.
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.size_x, self.size_z)
    }

    pub fn half_size(&self) -> Vec2 {
        Vec2::new(self.half_size_x, self.half_size_z)
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Ground-plane translation applied to the whole mesh.
    pub fn world_offset(&self) -> Vec2 {
        self.transform.ground_offset()
    }

    pub fn field(&self) -> &HeightField {
        &self.field
    }

    pub fn builder(&self) -> &B {
        &self.builder
    }

    pub fn builder_mut(&mut self) -> &mut B {
        &mut self.builder
    }

    pub fn handle(&self) -> &B::Handle {
        &self.handle
    }
}
