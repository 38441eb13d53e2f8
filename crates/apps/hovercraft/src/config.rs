//! Game configuration loaded from `hovercraft.toml`
//!
//! Every section and field is optional; anything missing takes the value of
//! [`GameConfig::default`].

use std::path::{Path, PathBuf};

use glam::Vec3;
use hovercraft_physics::PhysicsConfig;
use hovercraft_renderer::{Projection, StencilStrategy};
use hovercraft_world::TerrainConfig;
use serde::Deserialize;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub terrain: TerrainConfig,
    #[serde(default)]
    pub physics: PhysicsConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub light: LightConfig,
    #[serde(default)]
    pub particles: ParticleConfig,
    #[serde(default)]
    pub shadow: ShadowConfig,
    #[serde(default)]
    pub vehicle: VehicleConfig,
}

impl GameConfig {
    /// Load from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text)?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

/// Chase camera and projection
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CameraConfig {
    /// Follow distance in the close camera mode
    #[serde(default = "default_near_distance")]
    pub near_distance: f32,
    /// Follow distance in the default camera mode
    #[serde(default = "default_far_distance")]
    pub far_distance: f32,
    /// Height kept above the vehicle
    #[serde(default = "default_follow_height")]
    pub height: f32,
    /// Spring stiffness
    #[serde(default = "default_omega_sq")]
    pub omega_sq: f32,
    /// Camera start position relative to the vehicle
    #[serde(default = "default_start_offset")]
    pub start_offset: Vec3,
    /// Minimum clearance above the terrain
    #[serde(default = "default_ground_clearance")]
    pub ground_clearance: f32,
    #[serde(default = "default_fov_degrees")]
    pub fov_degrees: f32,
    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,
    #[serde(default = "default_viewport_height")]
    pub viewport_height: u32,
    #[serde(default = "default_near_plane")]
    pub near_plane: f32,
    #[serde(default = "default_far_plane")]
    pub far_plane: f32,
}

fn default_near_distance() -> f32 {
    10.0
}

fn default_far_distance() -> f32 {
    30.0
}

fn default_follow_height() -> f32 {
    8.0
}

fn default_omega_sq() -> f32 {
    100.0
}

fn default_start_offset() -> Vec3 {
    Vec3::new(-30.0, 10.0, -30.0)
}

fn default_ground_clearance() -> f32 {
    3.0
}

fn default_fov_degrees() -> f32 {
    45.0
}

fn default_viewport_width() -> u32 {
    800
}

fn default_viewport_height() -> u32 {
    600
}

fn default_near_plane() -> f32 {
    1.0
}

fn default_far_plane() -> f32 {
    350.0
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            near_distance: default_near_distance(),
            far_distance: default_far_distance(),
            height: default_follow_height(),
            omega_sq: default_omega_sq(),
            start_offset: default_start_offset(),
            ground_clearance: default_ground_clearance(),
            fov_degrees: default_fov_degrees(),
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            near_plane: default_near_plane(),
            far_plane: default_far_plane(),
        }
    }
}

impl CameraConfig {
    pub fn projection(&self) -> Projection {
        Projection {
            fov: self.fov_degrees.to_radians(),
            aspect: self.viewport_width as f32 / self.viewport_height.max(1) as f32,
            near: self.near_plane,
            far: self.far_plane,
        }
    }
}

/// Sun and ambient light
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LightConfig {
    /// Direction the sunlight travels; normalized on use
    #[serde(default = "default_sun_direction")]
    pub direction: Vec3,
    #[serde(default = "default_sun_colour")]
    pub colour: Vec3,
    #[serde(default = "default_ambient")]
    pub ambient: Vec3,
}

fn default_sun_direction() -> Vec3 {
    Vec3::new(5.0, -5.0, 5.0)
}

fn default_sun_colour() -> Vec3 {
    Vec3::splat(0.6)
}

fn default_ambient() -> Vec3 {
    Vec3::splat(0.4)
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            direction: default_sun_direction(),
            colour: default_sun_colour(),
            ambient: default_ambient(),
        }
    }
}

/// Dust trail
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ParticleConfig {
    #[serde(default = "default_particle_count")]
    pub count: usize,
    /// Seconds each particle lives
    #[serde(default = "default_particle_lifetime")]
    pub lifetime: f32,
    /// Random seed (0 = seed from the clock)
    #[serde(default)]
    pub seed: u64,
}

fn default_particle_count() -> usize {
    10000
}

fn default_particle_lifetime() -> f32 {
    2.0
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: default_particle_count(),
            lifetime: default_particle_lifetime(),
            seed: 0,
        }
    }
}

/// How shadow volumes are counted into the stencil buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShadowStrategy {
    #[default]
    TwoSided,
    TwoPass,
}

impl From<ShadowStrategy> for StencilStrategy {
    fn from(strategy: ShadowStrategy) -> Self {
        match strategy {
            ShadowStrategy::TwoSided => StencilStrategy::TwoSided,
            ShadowStrategy::TwoPass => StencilStrategy::TwoPass,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ShadowConfig {
    #[serde(default)]
    pub strategy: ShadowStrategy,
    /// Vertex capacity of the shadow volume
    #[serde(default = "default_shadow_capacity")]
    pub capacity: usize,
}

fn default_shadow_capacity() -> usize {
    hovercraft_renderer::shadow_volume::DEFAULT_CAPACITY
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            strategy: ShadowStrategy::default(),
            capacity: default_shadow_capacity(),
        }
    }
}

/// Vehicle hull
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct VehicleConfig {
    /// Wavefront OBJ hull; a box of the physics size when absent
    #[serde(default)]
    pub mesh: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config = GameConfig::from_toml("").expect("Empty config should parse");
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = GameConfig::from_toml(
            r#"
            [camera]
            far_distance = 50.0

            [physics]
            mass = 300.0

            [shadow]
            strategy = "two-pass"
            "#,
        )
        .expect("Partial config should parse");

        assert_eq!(config.camera.far_distance, 50.0);
        assert_eq!(config.camera.near_distance, 10.0, "Unset fields keep defaults");
        assert_eq!(config.physics.mass, 300.0);
        assert_eq!(config.physics.gravity, 100.0);
        assert_eq!(config.shadow.strategy, ShadowStrategy::TwoPass);
        assert_eq!(config.shadow.capacity, 32000);
    }

    #[test]
    fn test_vectors_and_mesh_path() {
        let config = GameConfig::from_toml(
            r#"
            [light]
            direction = [0.0, -1.0, 0.0]

            [vehicle]
            mesh = "assets/hull.obj"
            "#,
        )
        .expect("Config should parse");

        assert_eq!(config.light.direction, Vec3::NEG_Y);
        assert_eq!(config.light.colour, Vec3::splat(0.6));
        assert_eq!(config.vehicle.mesh, Some(PathBuf::from("assets/hull.obj")));
    }

    #[test]
    fn test_invalid_config() {
        let result = GameConfig::from_toml("[camera]\nheight = \"high\"");
        assert!(matches!(result, Err(Error::ConfigParse(_))));
    }

    #[test]
    fn test_projection() {
        let projection = CameraConfig::default().projection();
        assert!((projection.fov - std::f32::consts::FRAC_PI_4).abs() < 1e-6);
        assert!((projection.aspect - 4.0 / 3.0).abs() < 1e-6);
        assert_eq!(projection.near, 1.0);
        assert_eq!(projection.far, 350.0);
    }
}
