//! Lights, ambient colour and the active camera

use glam::Vec3;

use crate::camera::Camera;

/// Most lights a scene holds
pub const MAX_LIGHTS: usize = 8;

/// Directional light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    /// Direction the light travels
    pub direction: Vec3,
    /// RGB intensity
    pub colour: Vec3,
}

impl Light {
    pub fn new(direction: Vec3, colour: Vec3) -> Self {
        Self { direction, colour }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Scene {
    ambient: Vec3,
    lights: Vec<Light>,
    camera: Camera,
}

impl Scene {
    pub fn new(camera: Camera) -> Self {
        Self {
            ambient: Vec3::ZERO,
            lights: Vec::with_capacity(MAX_LIGHTS),
            camera,
        }
    }

    pub fn set_ambient_light(&mut self, colour: Vec3) {
        self.ambient = colour;
    }

    pub fn ambient_light(&self) -> Vec3 {
        self.ambient
    }

    /// Add a light; returns false when the scene already holds [`MAX_LIGHTS`]
    pub fn add_light(&mut self, light: Light) -> bool {
        if self.lights.len() >= MAX_LIGHTS {
            return false;
        }
        self.lights.push(light);
        true
    }

    pub fn light(&self, index: usize) -> Option<&Light> {
        self.lights.get(index)
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_light_until_full() {
        let mut scene = Scene::default();
        let light = Light::new(Vec3::NEG_Y, Vec3::splat(0.6));
        for i in 0..MAX_LIGHTS {
            assert!(scene.add_light(light), "Light {} should fit", i);
        }
        assert!(!scene.add_light(light), "Ninth light must be rejected");
        assert_eq!(scene.light_count(), MAX_LIGHTS);
    }

    #[test]
    fn test_light_lookup() {
        let mut scene = Scene::default();
        assert!(scene.light(0).is_none());
        scene.add_light(Light::new(Vec3::X, Vec3::ONE));
        assert_eq!(scene.light(0).map(|l| l.direction), Some(Vec3::X));
    }

    #[test]
    fn test_ambient() {
        let mut scene = Scene::default();
        assert_eq!(scene.ambient_light(), Vec3::ZERO);
        scene.set_ambient_light(Vec3::splat(0.4));
        assert_eq!(scene.ambient_light(), Vec3::splat(0.4));
    }
}
