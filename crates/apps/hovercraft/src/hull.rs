//! Renderable hull of the hovercraft and its shadow volume

use std::path::Path;

use glam::Vec3;
use hovercraft_physics::Vehicle;
use hovercraft_renderer::{Mesh, Scene, ShadowSink, ShadowVolume, StencilStrategy};

use crate::error::Result;

#[derive(Debug, Clone)]
pub struct Hull {
    mesh: Mesh,
    shadow: ShadowVolume,
}

impl Hull {
    /// Box hull matching the vehicle's physical size
    pub fn boxed(size: Vec3, shadow_capacity: usize) -> Self {
        Self {
            mesh: Mesh::cuboid(size),
            shadow: ShadowVolume::new(shadow_capacity),
        }
    }

    /// Hull loaded from a Wavefront OBJ file
    pub fn load(path: impl AsRef<Path>, shadow_capacity: usize) -> Result<Self> {
        Ok(Self {
            mesh: Mesh::load_obj(path)?,
            shadow: ShadowVolume::new(shadow_capacity),
        })
    }

    /// Rebuild the shadow volume for the vehicle's current orientation
    ///
    /// The first light of the scene is rotated into the hull's object space.
    /// With no light the volume is left empty.
    pub fn update_shadow_volume(
        &mut self,
        vehicle: &Vehicle,
        scene: &Scene,
        show_volumes: bool,
    ) -> Result<()> {
        self.shadow.set_show_volumes(show_volumes);
        self.shadow.reset();

        let Some(light) = scene.light(0) else {
            return Ok(());
        };
        let local_light = vehicle.direction_to_local(light.direction);
        self.shadow.build_from_mesh(&self.mesh, local_light)?;
        Ok(())
    }

    pub fn render_shadow(&self, sink: &mut impl ShadowSink, strategy: StencilStrategy) {
        self.shadow.render(sink, strategy);
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn shadow_volume(&self) -> &ShadowVolume {
        &self.shadow
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hovercraft_physics::PhysicsConfig;
    use hovercraft_renderer::Light;

    fn sunlit_scene(direction: Vec3) -> Scene {
        let mut scene = Scene::default();
        scene.add_light(Light::new(direction, Vec3::splat(0.6)));
        scene
    }

    #[test]
    fn test_shadow_volume_from_first_light() {
        let vehicle = Vehicle::new(Vec3::new(10.0, 5.0, 10.0), PhysicsConfig::default());
        let mut hull = Hull::boxed(vehicle.config().size, 32000);

        let scene = sunlit_scene(Vec3::new(5.0, -5.0, 5.0).normalize());
        hull.update_shadow_volume(&vehicle, &scene, true).unwrap();

        assert_eq!(hull.shadow_volume().vertex_count(), 36, "Oblique light outlines six edges");
        assert!(hull.shadow_volume().show_volumes());

        // Rebuilding replaces the previous volume
        hull.update_shadow_volume(&vehicle, &scene, false).unwrap();
        assert_eq!(hull.shadow_volume().vertex_count(), 36);
        assert!(!hull.shadow_volume().show_volumes());
    }

    #[test]
    fn test_no_light_no_volume() {
        let vehicle = Vehicle::new(Vec3::ZERO, PhysicsConfig::default());
        let mut hull = Hull::boxed(Vec3::ONE, 32000);
        hull.update_shadow_volume(&vehicle, &Scene::default(), false).unwrap();
        assert_eq!(hull.shadow_volume().vertex_count(), 0);
    }

    #[test]
    fn test_overflow_leaves_volume_empty() {
        let vehicle = Vehicle::new(Vec3::ZERO, PhysicsConfig::default());
        let mut hull = Hull::boxed(Vec3::ONE, 12);
        let scene = sunlit_scene(Vec3::NEG_Y);

        assert!(hull.update_shadow_volume(&vehicle, &scene, false).is_err());
        assert_eq!(hull.shadow_volume().vertex_count(), 0);
    }
}
