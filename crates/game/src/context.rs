//! Explicit terrain session context.
//!
//! Created by [`TerrainContext::init`] and consumed by
//! [`TerrainContext::shutdown`]; whoever needs the scene receives it directly.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result};
use engine_core::{Time, Transform, Vec2, Vec3};
use renderer::{GpuContext, GpuRibbon, GpuRibbonBuilder};
use terrain::{
    CpuMeshBuilder, HeightField, MeshBuilder, MeshId, PatchSettings, SideOrientation,
    TerrainController,
};

use crate::config::{Backend, TerrainDemoConfig};

/// Simulated frame length for the headless loop.
pub const FRAME_TIME: Duration = Duration::from_micros(16_667);

/// Height of the full map ribbon drawn beneath the moving patch.
pub const MAP_DEPTH: f32 = -1.0;

/// Terrain controller and the static map ribbon, on whichever backend was selected.
enum Terrain {
    Cpu {
        controller: TerrainController<CpuMeshBuilder>,
        map: MeshId,
    },
    Gpu {
        controller: TerrainController<GpuRibbonBuilder>,
        /// Held so the map's GPU buffers live as long as the session.
        #[allow(dead_code)]
        map: GpuRibbon,
    },
}

impl Terrain {
    fn tick(&mut self) {
        match self {
            Terrain::Cpu { controller, .. } => controller.tick(),
            Terrain::Gpu { controller, .. } => {
                controller.tick();
                // Flush the staged vertex write before the next draw.
                controller.builder().context().queue.submit(std::iter::empty());
            }
        }
    }

    fn world_offset(&self) -> Vec2 {
        match self {
            Terrain::Cpu { controller, .. } => controller.patch().world_offset(),
            Terrain::Gpu { controller, .. } => controller.patch().world_offset(),
        }
    }

    fn vertex_count(&self) -> usize {
        match self {
            Terrain::Cpu { controller, .. } => controller.patch().vertex_count(),
            Terrain::Gpu { controller, .. } => controller.patch().vertex_count(),
        }
    }
}

/// Build the patch controller, then the whole map as a double-sided ribbon on
/// the same builder.
fn build_terrain<B: MeshBuilder>(
    field: HeightField,
    settings: PatchSettings,
    builder: B,
    camera: &Rc<RefCell<Transform>>,
) -> Result<(TerrainController<B>, B::Handle)> {
    let map_paths = field.paths();
    let mut controller = TerrainController::new(field, settings, builder, Rc::clone(camera))
        .context("terrain construction failed")?;
    let map = controller
        .builder_mut()
        .build_ribbon(&map_paths, SideOrientation::Double);
    Ok((controller, map))
}

/// Everything a running terrain session owns.
pub struct TerrainContext {
    config: TerrainDemoConfig,
    camera: Rc<RefCell<Transform>>,
    terrain: Terrain,
    map_transform: Transform,
    time: Time,
}

impl TerrainContext {
    /// Generate the map, build the terrain and place it under the camera.
    pub fn init(config: TerrainDemoConfig) -> Result<Self> {
        let field =
            procgen::generate_map(&config.map()).context("height map generation failed")?;
        let map_vertices = field.columns() * field.rows();
        let start = Transform::from_position(Vec3::from(config.camera_start));
        let camera = Rc::new(RefCell::new(start));
        let settings = config.patch();

        let terrain = match config.backend {
            Backend::Cpu => {
                let (controller, map) =
                    build_terrain(field, settings, CpuMeshBuilder::new(), &camera)?;
                Terrain::Cpu { controller, map }
            }
            Backend::Gpu => match pollster::block_on(GpuContext::headless()) {
                Ok(gpu) => {
                    let (controller, map) =
                        build_terrain(field, settings, GpuRibbonBuilder::new(gpu), &camera)?;
                    Terrain::Gpu { controller, map }
                }
                Err(e) => {
                    log::warn!("GPU backend unavailable ({}), using CPU meshes", e);
                    let (controller, map) =
                        build_terrain(field, settings, CpuMeshBuilder::new(), &camera)?;
                    Terrain::Cpu { controller, map }
                }
            },
        };

        let map_transform = Transform::from_position(Vec3::new(0.0, MAP_DEPTH, 0.0));
        log::info!(
            "Terrain session ready: {} patch vertices, {} map vertices at y={}, camera at {:?}",
            terrain.vertex_count(),
            map_vertices,
            map_transform.position.y,
            camera.borrow().position
        );

        Ok(Self {
            config,
            camera,
            terrain,
            map_transform,
            time: Time::new(),
        })
    }

    /// Advance one frame: move the camera, then tick the terrain.
    pub fn frame(&mut self, delta: Duration) {
        self.time.advance(delta);
        let velocity = Vec3::from(self.config.camera_velocity);
        self.camera.borrow_mut().translate(velocity * self.time.delta_seconds());
        self.terrain.tick();
    }

    /// Simulate the configured number of frames.
    pub fn run(&mut self) {
        for _ in 0..self.config.frames {
            self.frame(FRAME_TIME);
            if self.time.frame_count() % 60 == 0 {
                log::debug!(
                    "Frame {}: terrain offset {:?}",
                    self.time.frame_count(),
                    self.terrain.world_offset()
                );
            }
        }
    }

    pub fn camera(&self) -> Vec3 {
        self.camera.borrow().position
    }

    pub fn terrain_offset(&self) -> Vec2 {
        self.terrain.world_offset()
    }

    /// Placement of the static map ribbon.
    pub fn map_transform(&self) -> &Transform {
        &self.map_transform
    }

    pub fn frame_count(&self) -> u64 {
        self.time.frame_count()
    }

    /// Tear the session down, returning its configuration.
    pub fn shutdown(self) -> TerrainDemoConfig {
        log::info!(
            "Terrain session finished after {} frames ({:.1}s simulated), camera at {:?}",
            self.time.frame_count(),
            self.time.elapsed_seconds(),
            self.camera.borrow().position
        );
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> TerrainDemoConfig {
        TerrainDemoConfig {
            map_columns: 8,
            map_rows: 6,
            subdivisions: 4,
            frames: 30,
            camera_start: [0.0, 10.0, 0.0],
            camera_velocity: [60.0, 0.0, -30.0],
            ..Default::default()
        }
    }

    #[test]
    fn terrain_follows_camera_through_run() {
        let mut ctx = TerrainContext::init(small_config()).unwrap();
        let offset = ctx.terrain_offset();
        let half = ctx.camera() - Vec3::new(offset.x, 0.0, offset.y);

        ctx.run();
        assert_eq!(ctx.frame_count(), 30);

        let camera = ctx.camera();
        assert!(camera.x > 25.0 && camera.z < -12.0);
        let offset = ctx.terrain_offset();
        assert!((camera.x - offset.x - half.x).abs() < 1e-3);
        assert!((camera.z - offset.y - half.z).abs() < 1e-3);

        let config = ctx.shutdown();
        assert_eq!(config.frames, 30);
    }

    #[test]
    fn map_ribbon_sits_under_patch() {
        let mut ctx = TerrainContext::init(small_config()).unwrap();
        assert_eq!(ctx.map_transform().position, Vec3::new(0.0, MAP_DEPTH, 0.0));

        let (map_positions, map_indices) = match &ctx.terrain {
            Terrain::Cpu { controller, map } => {
                let mesh = controller.builder().mesh(*map).unwrap();
                (mesh.positions.clone(), mesh.indices.clone())
            }
            Terrain::Gpu { .. } => panic!("default backend is cpu"),
        };
        assert_eq!(map_positions.len() / 3, 8 * 6);
        // double-sided: both windings for each of the 7 x 5 cells
        assert_eq!(map_indices.len(), 7 * 5 * 12);
        assert_eq!(&map_indices[..12], &[0, 8, 1, 1, 8, 9, 0, 1, 8, 1, 9, 8]);

        // Ticking rewrites only the patch; the map keeps its first upload.
        ctx.run();
        if let Terrain::Cpu { controller, map } = &ctx.terrain {
            let mesh = controller.builder().mesh(*map).unwrap();
            assert_eq!(mesh.revision, 0);
            assert_eq!(mesh.positions, map_positions);
        }
    }

    #[test]
    fn invalid_patch_fails_init() {
        let config = TerrainDemoConfig {
            subdivisions: 0,
            ..small_config()
        };
        assert!(TerrainContext::init(config).is_err());
    }
}
