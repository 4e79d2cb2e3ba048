//! Demo configuration (map, terrain patch, camera flight). Loaded from dynterrain.ron at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use procgen::MapConfig;
use terrain::{PatchSettings, SideOrientation};

/// Mesh backend the terrain uploads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Keep meshes in system memory.
    #[default]
    Cpu,
    /// Upload to a headless wgpu device; falls back to `Cpu` if none is found.
    Gpu,
}

/// Persistent demo settings. Loaded from `dynterrain.ron` in the current directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainDemoConfig {
    /// Height map samples along X.
    #[serde(default = "default_map_sub")]
    pub map_columns: usize,
    /// Height map samples along Z.
    #[serde(default = "default_map_sub")]
    pub map_rows: usize,
    #[serde(default)]
    pub seed: u32,
    /// Noise frequency (lower = smoother).
    #[serde(default = "default_noise_scale")]
    pub noise_scale: f64,
    #[serde(default = "default_elevation_scale")]
    pub elevation_scale: f64,
    /// World distance between map samples.
    #[serde(default = "default_spacing")]
    pub spacing: f32,
    /// Terrain patch steps per axis.
    #[serde(default = "default_subdivisions")]
    pub subdivisions: u32,
    /// Map samples advanced per patch step.
    #[serde(default = "default_step")]
    pub step: u32,
    /// Frames simulated before shutdown.
    #[serde(default = "default_frames")]
    pub frames: u32,
    #[serde(default = "default_camera_start")]
    pub camera_start: [f32; 3],
    /// Camera velocity in world units per second.
    #[serde(default = "default_camera_velocity")]
    pub camera_velocity: [f32; 3],
    #[serde(default)]
    pub backend: Backend,
}

fn default_map_sub() -> usize {
    20
}
fn default_noise_scale() -> f64 {
    0.03
}
fn default_elevation_scale() -> f64 {
    6.0
}
fn default_spacing() -> f32 {
    2.0
}
fn default_subdivisions() -> u32 {
    5
}
fn default_step() -> u32 {
    terrain::DEFAULT_STEP
}
fn default_frames() -> u32 {
    600
}
fn default_camera_start() -> [f32; 3] {
    [0.0, 50.0, 0.0]
}
fn default_camera_velocity() -> [f32; 3] {
    [4.0, 0.0, 2.5]
}

impl Default for TerrainDemoConfig {
    fn default() -> Self {
        Self {
            map_columns: default_map_sub(),
            map_rows: default_map_sub(),
            seed: 0,
            noise_scale: default_noise_scale(),
            elevation_scale: default_elevation_scale(),
            spacing: default_spacing(),
            subdivisions: default_subdivisions(),
            step: default_step(),
            frames: default_frames(),
            camera_start: default_camera_start(),
            camera_velocity: default_camera_velocity(),
            backend: Backend::default(),
        }
    }
}

impl TerrainDemoConfig {
    /// Load config from `dynterrain.ron`.
    /// If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if let Ok(data) = std::fs::read_to_string(path) {
            match ron::from_str(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }

    /// Save current config to `dynterrain.ron`. Logs on error.
    pub fn save(&self) {
        self.save_to(&config_path());
    }

    pub fn save_to(&self, path: &Path) {
        if let Ok(s) = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            if let Err(e) = std::fs::write(path, s) {
                log::warn!("Could not write config to {:?}: {}", path, e);
            }
        }
    }

    pub fn map(&self) -> MapConfig {
        MapConfig {
            columns: self.map_columns,
            rows: self.map_rows,
            seed: self.seed,
            noise_scale: self.noise_scale,
            elevation_scale: self.elevation_scale,
            spacing: self.spacing,
        }
    }

    pub fn patch(&self) -> PatchSettings {
        PatchSettings {
            subdivisions: self.subdivisions,
            step: self.step,
            orientation: SideOrientation::Back,
        }
    }
}

pub fn config_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join("dynterrain.ron")
}
