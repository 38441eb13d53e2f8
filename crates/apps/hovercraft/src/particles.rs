//! Dust kicked up behind the hovercraft
//!
//! A fixed pool of point particles. Each lives for `lifetime` seconds, falls
//! under a weak gravity and is respawned at the emitter. Respawns per update
//! are rate limited so the pool spreads evenly along the trail.

use glam::{Mat3, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const GRAVITY: Vec3 = Vec3::new(0.0, -1.0, 0.0);

/// Emitter speed below which respawned particles are hidden
pub const MIN_EMIT_SPEED: f32 = 17.0;

/// Height respawned particles are parked at while the emitter is too slow
pub const HIDDEN_Y: f32 = -1000.0;

/// Standard deviation of the yaw jitter applied to each respawn, in radians
const JITTER_ANGLE: f32 = 2.0;

#[derive(Debug, Clone)]
pub struct DustTrail {
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
    ages: Vec<f32>,
    lifetime: f32,
    emitter_position: Vec3,
    emitter_direction: Vec3,
    emitter_speed: f32,
    rng: StdRng,
}

impl DustTrail {
    /// # Arguments
    /// * `count` - Number of particles in the pool
    /// * `lifetime` - Seconds each particle lives
    /// * `seed` - Random seed; 0 seeds from the clock
    pub fn new(count: usize, lifetime: f32, seed: u64) -> Self {
        let seed = if seed == 0 {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs()
        } else {
            seed
        };
        let mut rng = StdRng::seed_from_u64(seed);
        let ages = (0..count).map(|_| rng.random::<f32>() * lifetime).collect();
        tracing::debug!("Dust trail: {} particles, seed {}", count, seed);

        Self {
            positions: vec![Vec3::ZERO; count],
            velocities: vec![Vec3::ZERO; count],
            ages,
            lifetime,
            emitter_position: Vec3::ZERO,
            emitter_direction: Vec3::ZERO,
            emitter_speed: 0.0,
            rng,
        }
    }

    /// Move the emitter; `velocity` sets both the launch direction and the speed
    pub fn set_emitter(&mut self, position: Vec3, velocity: Vec3) {
        self.emitter_position = position;
        self.emitter_speed = velocity.length();
        self.emitter_direction = velocity.normalize_or_zero();
    }

    pub fn update(&mut self, dt: f32) {
        let velocity_delta = GRAVITY * dt;
        let max_created = (dt / (self.lifetime / self.positions.len() as f32)) as usize;
        let mut created = 0;

        for i in 0..self.positions.len() {
            self.ages[i] += dt;
            if self.ages[i] < self.lifetime {
                self.velocities[i] += velocity_delta;
                self.positions[i] += self.velocities[i] * dt;
                continue;
            }

            // The check runs before counting, so one extra respawn gets through
            if created > max_created {
                continue;
            }
            created += 1;

            self.ages[i] = 0.0;
            let mut position = self.emitter_position;
            if self.emitter_speed < MIN_EMIT_SPEED {
                position.y = HIDDEN_Y;
            }

            let angle = self.gaussian(0.0, JITTER_ANGLE);
            let mut velocity = Mat3::from_rotation_y(angle) * self.emitter_direction;
            velocity.y += self.rng.random::<f32>();

            self.positions[i] = position - self.emitter_direction + velocity;
            self.velocities[i] = velocity;
        }
    }

    /// Box-Muller sample from a normal distribution
    fn gaussian(&mut self, mean: f32, std_dev: f32) -> f32 {
        let u1 = 1.0 - self.rng.random::<f32>();
        let u2 = self.rng.random::<f32>();
        let z = (-2.0 * u1.ln()).sqrt() * (std::f32::consts::TAU * u2).cos();
        mean + std_dev * z
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }

    pub fn ages(&self) -> &[f32] {
        &self.ages
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn lifetime(&self) -> f32 {
        self.lifetime
    }

    pub fn emitter_speed(&self) -> f32 {
        self.emitter_speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_ages_within_lifetime() {
        let trail = DustTrail::new(500, 2.0, 7);
        assert_eq!(trail.len(), 500);
        assert!(trail.ages().iter().all(|&a| (0.0..2.0).contains(&a)));
        assert!(trail.ages().iter().any(|&a| a > 1.0), "Ages should be spread out");
    }

    #[test]
    fn test_emitter_direction_is_normalized() {
        let mut trail = DustTrail::new(10, 2.0, 1);
        trail.set_emitter(Vec3::ONE, Vec3::new(0.0, 0.0, -20.0));
        assert_eq!(trail.emitter_speed(), 20.0);
        assert_eq!(trail.emitter_direction, Vec3::NEG_Z);
    }

    #[test]
    fn test_respawn_rate_limit() {
        let mut trail = DustTrail::new(100, 2.0, 3);
        // Every particle dies this update
        for age in trail.ages.iter_mut() {
            *age = 2.0;
        }
        trail.set_emitter(Vec3::new(0.0, 5.0, 0.0), Vec3::new(30.0, 0.0, 0.0));

        // dt / (lifetime / count) = 0.1 / 0.02 = 5; the limit lets 6 through
        trail.update(0.1);
        let respawned = trail.ages().iter().filter(|&&a| a == 0.0).count();
        assert_eq!(respawned, 6);
    }

    #[test]
    fn test_slow_emitter_hides_particles() {
        let mut trail = DustTrail::new(10, 1.0, 5);
        for age in trail.ages.iter_mut() {
            *age = 1.0;
        }
        trail.set_emitter(Vec3::new(0.0, 5.0, 0.0), Vec3::new(5.0, 0.0, 0.0));
        trail.update(1.0);

        for (age, p) in trail.ages().iter().zip(trail.positions()) {
            if *age == 0.0 {
                assert!(p.y < -990.0, "Respawn below the speed threshold is parked, got {:?}", p);
            }
        }
    }

    #[test]
    fn test_fast_emitter_spawns_near_emitter() {
        let mut trail = DustTrail::new(10, 1.0, 11);
        for age in trail.ages.iter_mut() {
            *age = 1.0;
        }
        let emitter = Vec3::new(100.0, 5.0, 100.0);
        trail.set_emitter(emitter, Vec3::new(0.0, 0.0, 20.0));
        trail.update(1.0);

        for (i, p) in trail.positions().iter().enumerate() {
            if trail.ages()[i] == 0.0 {
                let v = trail.velocities()[i];
                let horizontal = Vec3::new(v.x, 0.0, v.z).length();
                assert!((horizontal - 1.0).abs() < 1e-4, "Jitter only rotates about y: {:?}", v);
                assert!((0.0..1.0).contains(&v.y), "Vertical kick in [0, 1), got {}", v.y);
                assert!((*p - emitter).length() < 3.0, "Particle {} at {:?}", i, p);
            }
        }
    }

    #[test]
    fn test_live_particles_fall() {
        let mut trail = DustTrail::new(1, 10.0, 2);
        trail.ages[0] = 0.0;
        trail.positions[0] = Vec3::ZERO;
        trail.velocities[0] = Vec3::ZERO;

        trail.update(0.5);
        assert_eq!(trail.velocities()[0], Vec3::new(0.0, -0.5, 0.0));
        assert_eq!(trail.positions()[0], Vec3::new(0.0, -0.25, 0.0));
    }

    #[test]
    fn test_same_seed_same_trail() {
        let mut a = DustTrail::new(50, 1.0, 42);
        let mut b = DustTrail::new(50, 1.0, 42);
        for trail in [&mut a, &mut b] {
            trail.set_emitter(Vec3::ZERO, Vec3::new(20.0, 0.0, 0.0));
            trail.update(0.5);
        }
        assert_eq!(a.positions(), b.positions());
    }
}
