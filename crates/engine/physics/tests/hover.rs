//! End-to-end hover behaviour of the vehicle integrator

use glam::Vec3;
use hovercraft_physics::{FlatGround, HeightField, PhysicsConfig, ThrustInput, Vehicle};

const DT: f32 = 0.016;

/// Rolling hills with a constant incline
struct Slope;

impl HeightField for Slope {
    fn height_at(&self, x: f32, z: f32) -> f32 {
        0.3 * x + 0.1 * z + 5.0 * (z * 0.05).sin()
    }

    fn size(&self) -> f32 {
        320.0
    }
}

fn settled_vehicle(ground: &FlatGround) -> Vehicle {
    let mut vehicle = Vehicle::new(Vec3::new(160.0, 2.0, 160.0), PhysicsConfig::default());
    for _ in 0..200 {
        vehicle.step(DT, ground, ThrustInput::default());
    }
    vehicle
}

#[test]
fn test_settles_on_flat_ground() {
    let ground = FlatGround::new(0.0, 320.0);
    let mut vehicle = settled_vehicle(&ground);

    let y = vehicle.position().y;
    for _ in 0..50 {
        vehicle.step(DT, &ground, ThrustInput::default());
        assert!(vehicle.is_on_ground(), "Settled vehicle should stay grounded");
        assert!(
            (vehicle.position().y - y).abs() < 1e-3,
            "Height should be stable, drifted from {} to {}",
            y,
            vehicle.position().y
        );
    }

    let position = vehicle.position();
    assert!(
        y > 0.5 && y < 1.5,
        "Body should rest near hover height, got {}",
        y
    );
    assert!((position.x - 160.0).abs() < 1e-3, "x drifted: {}", position.x);
    assert!((position.z - 160.0).abs() < 1e-3, "z drifted: {}", position.z);

    // Only the gravity residual of the last step remains
    let velocity = vehicle.velocity();
    assert!(velocity.y.abs() < 1.5, "Vertical velocity too large: {}", velocity.y);
    assert!(
        Vec3::new(velocity.x, 0.0, velocity.z).length() < 1e-3,
        "Horizontal velocity should vanish: {:?}",
        velocity
    );
}

#[test]
fn test_forward_thrust_moves_along_forward_axis() {
    let ground = FlatGround::new(0.0, 320.0);
    let mut vehicle = settled_vehicle(&ground);

    let start = vehicle.position();
    let forward = vehicle.direction();
    let input = ThrustInput {
        forward: true,
        ..Default::default()
    };

    for frame in 0..63 {
        vehicle.step(DT, &ground, input);
        assert!(vehicle.is_on_ground(), "Lost ground contact at frame {}", frame);
    }

    let displacement = (vehicle.position() - start).dot(forward);
    assert!(
        displacement > 20.0,
        "Expected solid forward progress, got {}",
        displacement
    );
    assert!(vehicle.velocity().z > 0.0);
}

#[test]
fn test_rotation_stays_orthonormal_on_slope() {
    let terrain = Slope;
    let start = Vec3::new(100.0, terrain.height_at(100.0, 100.0) + 2.0, 100.0);
    let mut vehicle = Vehicle::new(start, PhysicsConfig::default());

    for frame in 0..500 {
        let input = ThrustInput {
            forward: frame % 2 == 0,
            reverse: false,
            left: frame % 7 < 2,
            right: frame % 11 < 2,
        };
        vehicle.step(DT, &terrain, input);

        let m = vehicle.orientation();
        let axes = [m.x_axis, m.y_axis, m.z_axis];
        for (i, a) in axes.iter().enumerate() {
            assert!(
                (a.length() - 1.0).abs() < 1e-4,
                "Frame {}: axis {} has length {}",
                frame,
                i,
                a.length()
            );
            for b in axes.iter().skip(i + 1) {
                assert!(a.dot(*b).abs() < 1e-4, "Frame {}: axes not orthogonal", frame);
            }
        }

        let position = vehicle.position();
        assert!(
            (5.0..=315.0).contains(&position.x) && (5.0..=315.0).contains(&position.z),
            "Frame {}: left the terrain bounds at {:?}",
            frame,
            position
        );
    }
}

#[test]
fn test_thrust_loses_lift_when_airborne() {
    let ground = FlatGround::new(0.0, 320.0);
    let mut vehicle = Vehicle::new(Vec3::new(160.0, 100.0, 160.0), PhysicsConfig::default());
    let input = ThrustInput {
        forward: true,
        ..Default::default()
    };

    vehicle.step(DT, &ground, input);
    vehicle.step(DT, &ground, input);

    assert!(!vehicle.is_on_ground());
    assert!(vehicle.velocity().z > 0.0, "Thrust still pushes forward in the air");
    assert!(vehicle.velocity().y < 0.0, "Vehicle keeps falling");
}
