//! Renderer-agnostic ribbon mesh building.
//!
//! The terrain core never talks to a graphics API directly. A backend
//! implements [`MeshBuilder`] to turn a grid of paths into a renderable mesh
//! and to accept rewritten vertex positions afterwards.

use glam::Vec3;

/// Which faces of the ribbon are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SideOrientation {
    Front,
    /// Reversed winding; the terrain is built this way by default.
    #[default]
    Back,
    Double,
}

/// Capability for building and updating ribbon meshes.
pub trait MeshBuilder {
    /// Backend-specific mesh reference.
    type Handle;

    /// Build an updatable ribbon from equal-length `paths`.
    fn build_ribbon(&mut self, paths: &[Vec<Vec3>], orientation: SideOrientation) -> Self::Handle;

    /// Replace every vertex position of `handle` with the flat xyz `positions`.
    fn update_vertex_positions(&mut self, handle: &Self::Handle, positions: &[f32]);
}

/// Flatten a path grid into an xyz buffer, path after path.
pub fn flatten_paths(paths: &[Vec<Vec3>]) -> Vec<f32> {
    paths
        .iter()
        .flat_map(|path| path.iter().flat_map(|p| p.to_array()))
        .collect()
}

/// Triangle indices for a ribbon of `path_count` paths of `path_len` points.
///
/// Vertex `i` of path `j` has index `j * path_len + i`.
pub fn ribbon_indices(
    path_count: usize,
    path_len: usize,
    orientation: SideOrientation,
) -> Vec<u32> {
    if path_count < 2 || path_len < 2 {
        return Vec::new();
    }
    let cells = (path_count - 1) * (path_len - 1);
    let per_cell = match orientation {
        SideOrientation::Double => 12,
        _ => 6,
    };
    let mut indices = Vec::with_capacity(cells * per_cell);

    for j in 0..(path_count - 1) {
        for i in 0..(path_len - 1) {
            let top_left = (j * path_len + i) as u32;
            let top_right = top_left + 1;
            let bottom_left = ((j + 1) * path_len + i) as u32;
            let bottom_right = bottom_left + 1;

            let front = [top_left, bottom_left, top_right, top_right, bottom_left, bottom_right];
            let back = [top_left, top_right, bottom_left, top_right, bottom_right, bottom_left];
            match orientation {
                SideOrientation::Front => indices.extend(front),
                SideOrientation::Back => indices.extend(back),
                SideOrientation::Double => {
                    indices.extend(front);
                    indices.extend(back);
                }
            }
        }
    }
    indices
}

/// Handle into a [`CpuMeshBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshId(usize);

/// Mesh kept in system memory.
#[derive(Debug, Clone)]
pub struct CpuMesh {
    pub positions: Vec<f32>,
    pub indices: Vec<u32>,
    /// Bumped on every position upload.
    pub revision: u64,
}

impl CpuMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }
}

/// In-memory [`MeshBuilder`], used headless and in tests.
#[derive(Debug, Default)]
pub struct CpuMeshBuilder {
    meshes: Vec<CpuMesh>,
}

impl CpuMeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mesh(&self, id: MeshId) -> Option<&CpuMesh> {
        self.meshes.get(id.0)
    }
}

impl MeshBuilder for CpuMeshBuilder {
    type Handle = MeshId;

    fn build_ribbon(&mut self, paths: &[Vec<Vec3>], orientation: SideOrientation) -> MeshId {
        let path_len = paths.first().map_or(0, Vec::len);
        debug_assert!(paths.iter().all(|p| p.len() == path_len), "ragged ribbon paths");

        self.meshes.push(CpuMesh {
            positions: flatten_paths(paths),
            indices: ribbon_indices(paths.len(), path_len, orientation),
            revision: 0,
        });
        MeshId(self.meshes.len() - 1)
    }

    fn update_vertex_positions(&mut self, handle: &MeshId, positions: &[f32]) {
        let Some(mesh) = self.meshes.get_mut(handle.0) else {
            log::warn!("Position update for unknown mesh {:?}", handle);
            return;
        };
        // Vertex count is fixed for the lifetime of a mesh.
        mesh.positions.copy_from_slice(positions);
        mesh.revision += 1;
    }
}
