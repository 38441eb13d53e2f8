//! One hovercraft over the generated terrain, advanced a frame at a time

use glam::{Mat4, Vec3};
use hovercraft_audio::EngineSound;
use hovercraft_physics::Vehicle;
use hovercraft_renderer::{Camera, ChaseCam, Light, Mesh, Scene, ShadowSink};
use hovercraft_world::{CellSink, Terrain};

use crate::config::GameConfig;
use crate::error::Result;
use crate::hull::Hull;
use crate::input::{FrameInput, Toggle, Toggles};
use crate::particles::DustTrail;

/// Longest frame time fed to the simulation
pub const MAX_FRAME_TIME: f32 = 0.1;

/// Height above the terrain the vehicle starts at
const START_CLEARANCE: f32 = 2.0;

/// Distance below the vehicle centre the dust is emitted from
const DUST_DROP: f32 = 1.8;

const HELP: [(&str, &str); 7] = [
    ("Up / Down", "Forwards / Backwards"),
    ("Left / Right", "Turn"),
    ("Space", "Center camera (hold)"),
    ("P", "Pause physics simulation"),
    ("C", "Toggle camera distance"),
    ("W", "Toggle wireframe mode"),
    ("S", "Show shadow volumes"),
];

/// Lighting passes of a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightingPass {
    /// Ambient light only, depth writes on. The vehicle's shadow volume is
    /// counted into the stencil during this pass.
    Ambient,
    /// Sunlight, blended additively where the stencil is below 1; depth test
    /// equal with depth writes off.
    Diffuse,
}

/// Graphics backend driven by [`Simulation::render`]
pub trait FrameSink: CellSink + ShadowSink {
    fn begin_pass(&mut self, pass: LightingPass, scene: &Scene, wireframe: bool);

    fn draw_vehicle(&mut self, mesh: &Mesh, world: Mat4, pass: LightingPass);

    /// Object-to-world transform for the shadow volume draws that follow
    fn begin_shadow(&mut self, world: Mat4);

    fn end_pass(&mut self, _pass: LightingPass) {}

    fn draw_particles(&mut self, positions: &[Vec3]);

    fn draw_text(&mut self, row: usize, text: &str);
}

pub struct Simulation {
    config: GameConfig,
    terrain: Terrain,
    vehicle: Vehicle,
    hull: Hull,
    chase_cam: ChaseCam,
    scene: Scene,
    dust: DustTrail,
    engine: EngineSound,
    toggles: Toggles,
    frame: u64,
}

impl Simulation {
    pub fn new(config: GameConfig) -> Result<Self> {
        let mut terrain = Terrain::new(config.terrain)?;

        let centre = terrain.terrain_size() * 0.5;
        let start = Vec3::new(
            centre,
            terrain.height_map_point(centre, centre) + START_CLEARANCE,
            centre,
        );
        let vehicle = Vehicle::new(start, config.physics);

        let hull = match &config.vehicle.mesh {
            Some(path) => Hull::load(path, config.shadow.capacity)?,
            None => Hull::boxed(config.physics.size, config.shadow.capacity),
        };

        let camera_config = config.camera;
        let eye = start + camera_config.start_offset;
        let mut chase_cam = ChaseCam::new(
            camera_config.far_distance,
            camera_config.height,
            camera_config.omega_sq,
        );
        chase_cam.set_chase_position(start);
        chase_cam.set_chase_direction(vehicle.direction());
        chase_cam.set_camera_position(eye);

        let mut camera = Camera::new(camera_config.projection());
        camera.set_camera(eye, start, Vec3::Y);
        let mut scene = Scene::new(camera);
        scene.set_ambient_light(config.light.ambient);
        scene.add_light(Light::new(
            config.light.direction.normalize_or_zero(),
            config.light.colour,
        ));

        terrain.cull_view_proj(&scene.camera().view_proj());

        let dust = DustTrail::new(
            config.particles.count,
            config.particles.lifetime,
            config.particles.seed,
        );

        tracing::info!(
            "Simulation ready: terrain {:.0} units, vehicle at ({:.1}, {:.1}, {:.1})",
            terrain.terrain_size(),
            start.x,
            start.y,
            start.z
        );

        let mut simulation = Self {
            config,
            terrain,
            vehicle,
            hull,
            chase_cam,
            scene,
            dust,
            engine: EngineSound::new(),
            toggles: Toggles::new(),
            frame: 0,
        };
        simulation.update_shadow();
        Ok(simulation)
    }

    /// Advance one frame
    ///
    /// `dt` is clamped to [`MAX_FRAME_TIME`]. While paused only the toggles
    /// and the shadow volume are updated.
    pub fn frame(&mut self, dt: f32, input: &FrameInput) {
        let dt = dt.min(MAX_FRAME_TIME);

        for toggle in self.toggles.update(input) {
            if toggle == Toggle::CameraDistance {
                let camera = self.config.camera;
                let distance = if self.toggles.camera_near() {
                    camera.near_distance
                } else {
                    camera.far_distance
                };
                self.chase_cam.set_parameters(distance, camera.height);
            }
            tracing::info!(
                "{:?} {}",
                toggle,
                if self.toggles.is_on(toggle) { "on" } else { "off" }
            );
        }

        if !self.toggles.paused() {
            self.advance(dt, input);
        }

        self.update_shadow();
        self.frame += 1;
    }

    fn advance(&mut self, dt: f32, input: &FrameInput) {
        self.vehicle.step(dt, &self.terrain, input.thrust);

        let position = self.vehicle.position();
        let velocity = self.vehicle.velocity();
        let on_ground = self.vehicle.is_on_ground();

        let emitter = position - Vec3::new(0.0, DUST_DROP, 0.0);
        if on_ground {
            self.dust.set_emitter(emitter, -velocity);
            self.dust.update(dt);
        } else {
            self.dust.set_emitter(emitter, Vec3::ZERO);
        }

        self.chase_cam.set_chase_position(position);
        self.chase_cam.set_chase_direction(self.vehicle.direction());
        self.chase_cam.set_chase_velocity(velocity);
        self.chase_cam.set_camera_velocity(velocity);
        self.chase_cam.update_position(dt, input.center_camera);

        let mut eye = self.chase_cam.camera_position();
        let floor = self.terrain.height_map_point(eye.x, eye.z) + self.config.camera.ground_clearance;
        if eye.y < floor {
            eye.y = floor;
        }

        self.scene
            .camera_mut()
            .set_camera(eye, self.chase_cam.chase_position(), Vec3::Y);
        self.terrain.cull_view_proj(&self.scene.camera().view_proj());

        let thrusting = input.thrust.forward || input.thrust.reverse;
        self.engine
            .update(dt, thrusting, on_ground, position.distance(eye));
    }

    fn update_shadow(&mut self) {
        let show = self.toggles.show_shadow_volumes();
        if let Err(err) = self.hull.update_shadow_volume(&self.vehicle, &self.scene, show) {
            tracing::debug!("Vehicle shadow skipped: {}", err);
        }
    }

    /// Issue the draws for the current frame
    pub fn render(&self, sink: &mut impl FrameSink) {
        let wireframe = self.toggles.wireframe();
        let world = self.vehicle.transform();

        sink.begin_pass(LightingPass::Ambient, &self.scene, wireframe);
        self.terrain.render(sink);
        sink.draw_vehicle(self.hull.mesh(), world, LightingPass::Ambient);
        sink.begin_shadow(world);
        self.hull
            .render_shadow(sink, self.config.shadow.strategy.into());
        sink.end_pass(LightingPass::Ambient);

        sink.begin_pass(LightingPass::Diffuse, &self.scene, wireframe);
        self.terrain.render(sink);
        sink.draw_vehicle(self.hull.mesh(), world, LightingPass::Diffuse);
        sink.end_pass(LightingPass::Diffuse);

        sink.draw_particles(self.dust.positions());

        for (row, line) in self.overlay_lines().iter().enumerate() {
            sink.draw_text(row, line);
        }
    }

    /// Statistics and help text shown over the frame
    pub fn overlay_lines(&self) -> Vec<String> {
        let position = self.vehicle.position();
        let mut lines = vec![
            format!(
                "Frame {}  position ({:.1}, {:.1}, {:.1})  speed {:.1}",
                self.frame,
                position.x,
                position.y,
                position.z,
                self.vehicle.velocity().length()
            ),
            format!("Visible terrain cells: {}", self.terrain.visible_cell_count()),
        ];

        if self.toggles.show_help() {
            lines.push("Press F1 to hide help".to_string());
            lines.extend(HELP.iter().map(|(key, action)| format!("{:<14}{}", key, action)));
        } else {
            lines.push("Press F1 to show help".to_string());
        }
        lines
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    pub fn hull(&self) -> &Hull {
        &self.hull
    }

    pub fn chase_cam(&self) -> &ChaseCam {
        &self.chase_cam
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Eye position after the terrain clearance is applied
    pub fn camera_position(&self) -> Vec3 {
        self.scene.camera().position()
    }

    pub fn dust(&self) -> &DustTrail {
        &self.dust
    }

    pub fn engine_sound(&self) -> &EngineSound {
        &self.engine
    }

    pub fn toggles(&self) -> &Toggles {
        &self.toggles
    }

    /// Frames advanced so far, paused ones included
    pub fn frame_count(&self) -> u64 {
        self.frame
    }
}
