//! GPU ribbon meshes with rewritable vertex buffers.

use glam::Vec3;
use terrain::{flatten_paths, ribbon_indices, MeshBuilder, SideOrientation};
use wgpu::util::DeviceExt;

use crate::gpu::GpuContext;
use crate::vertex::RibbonVertex;

/// A GPU ribbon with vertex and index buffers.
pub struct GpuRibbon {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_vertices: u32,
    pub num_indices: u32,
}

/// [`MeshBuilder`] that uploads ribbons to a wgpu device.
///
/// Position updates go through `queue.write_buffer`, which wgpu applies
/// before the next submitted command buffer, so a frame never sees a
/// half-written terrain.
pub struct GpuRibbonBuilder {
    gpu: GpuContext,
}

impl GpuRibbonBuilder {
    pub fn new(gpu: GpuContext) -> Self {
        Self { gpu }
    }

    pub fn context(&self) -> &GpuContext {
        &self.gpu
    }
}

impl MeshBuilder for GpuRibbonBuilder {
    type Handle = GpuRibbon;

    fn build_ribbon(&mut self, paths: &[Vec<Vec3>], orientation: SideOrientation) -> GpuRibbon {
        let path_len = paths.first().map_or(0, Vec::len);
        let positions = flatten_paths(paths);
        let vertices: &[RibbonVertex] = bytemuck::cast_slice(&positions);
        let indices = ribbon_indices(paths.len(), path_len, orientation);

        let vertex_buffer = self.gpu.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Terrain Vertex Buffer"),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        let index_buffer = self.gpu.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Terrain Index Buffer"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        log::debug!(
            "Uploaded terrain ribbon: {} vertices, {} indices",
            vertices.len(),
            indices.len()
        );

        GpuRibbon {
            vertex_buffer,
            index_buffer,
            num_vertices: vertices.len() as u32,
            num_indices: indices.len() as u32,
        }
    }

    fn update_vertex_positions(&mut self, handle: &GpuRibbon, positions: &[f32]) {
        debug_assert_eq!(positions.len(), handle.num_vertices as usize * 3);
        self.gpu
            .queue
            .write_buffer(&handle.vertex_buffer, 0, bytemuck::cast_slice(positions));
    }
}
