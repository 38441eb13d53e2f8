//! Engine loop pitch and loudness

use crate::Volume;

/// Playback frequency with no thrust, in Hz
pub const IDLE_FREQUENCY: i32 = 22050;
/// Playback frequency while thrusting on the ground
pub const GROUND_FREQUENCY: i32 = 23500;
/// Playback frequency while thrusting in the air
pub const AIR_FREQUENCY: i32 = 24500;
/// Largest frequency change per second
pub const SLEW_RATE: f32 = 3500.0;

/// Attenuation per unit of distance, in hundredths of a decibel
const MILLIBELS_PER_UNIT: f32 = 30.0;

/// Frequency the engine heads for given the current thrust and ground contact
pub fn target_frequency(thrusting: bool, on_ground: bool) -> i32 {
    match (thrusting, on_ground) {
        (false, _) => IDLE_FREQUENCY,
        (true, true) => GROUND_FREQUENCY,
        (true, false) => AIR_FREQUENCY,
    }
}

/// Volume for a listener `distance` away from the vehicle, in hundredths of a decibel
pub fn attenuation_millibels(distance: f32) -> i32 {
    -((distance * MILLIBELS_PER_UNIT) as i32)
}

/// State of the looping engine sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSound {
    frequency: i32,
    volume_millibels: i32,
}

impl Default for EngineSound {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineSound {
    pub fn new() -> Self {
        Self {
            frequency: IDLE_FREQUENCY,
            volume_millibels: 0,
        }
    }

    /// Advance one frame
    ///
    /// # Arguments
    /// * `dt` - Frame time in seconds
    /// * `thrusting` - Forward or reverse thrust is applied
    /// * `on_ground` - The vehicle touches the terrain
    /// * `distance` - Distance from the listener to the vehicle
    pub fn update(&mut self, dt: f32, thrusting: bool, on_ground: bool, distance: f32) {
        self.volume_millibels = attenuation_millibels(distance);

        let target = target_frequency(thrusting, on_ground);
        if self.frequency == target {
            return;
        }

        let step = (SLEW_RATE * dt) as i32;
        let difference = self.frequency - target;
        if difference.abs() <= step {
            self.frequency = target;
        } else if difference > 0 {
            self.frequency -= step;
        } else {
            self.frequency += step;
        }
        tracing::trace!("Engine frequency {} Hz (target {} Hz)", self.frequency, target);
    }

    /// Current playback frequency in Hz
    pub fn frequency(&self) -> i32 {
        self.frequency
    }

    pub fn volume_millibels(&self) -> i32 {
        self.volume_millibels
    }

    pub fn volume(&self) -> Volume {
        Volume::from_millibels(self.volume_millibels)
    }
}
