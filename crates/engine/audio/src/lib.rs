//! Audio model for the hovercraft
//!
//! Nothing here plays sound. The crate computes the volume and playback
//! frequency a looping engine sample should use each frame, so any backend
//! can apply them:
//! - Volume falls off with the distance between camera and vehicle
//! - Pitch rises with thrust, and further when the vehicle is airborne
//!
//! # Example
//!
//! ```
//! use hovercraft_audio::{EngineSound, IDLE_FREQUENCY};
//!
//! let mut engine = EngineSound::new();
//! engine.update(0.1, true, true, 30.0);
//! assert!(engine.frequency() > IDLE_FREQUENCY);
//! assert_eq!(engine.volume_millibels(), -900);
//! ```

pub mod engine;

pub use engine::{
    attenuation_millibels, target_frequency, EngineSound, AIR_FREQUENCY, GROUND_FREQUENCY,
    IDLE_FREQUENCY, SLEW_RATE,
};

/// Volume level (0.0 = silent, 1.0 = full volume)
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Volume(f32);

impl Volume {
    /// Silent (0.0)
    pub const SILENT: Self = Self(0.0);
    /// Full volume (1.0)
    pub const FULL: Self = Self(1.0);

    /// Create a new volume level, clamped to [0.0, 1.0]
    pub fn new(value: f32) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    pub fn value(&self) -> f32 {
        self.0
    }

    /// Convert to decibels
    pub fn to_db(&self) -> f32 {
        if self.0 <= 0.0 {
            f32::NEG_INFINITY
        } else {
            20.0 * self.0.log10()
        }
    }

    /// Create from decibel value
    pub fn from_db(db: f32) -> Self {
        Self::new(10.0_f32.powf(db / 20.0))
    }

    /// Create from hundredths of a decibel
    pub fn from_millibels(millibels: i32) -> Self {
        Self::from_db(millibels as f32 / 100.0)
    }

    /// Hundredths of a decibel, rounded towards zero
    pub fn to_millibels(&self) -> i32 {
        if self.0 <= 0.0 {
            i32::MIN
        } else {
            (self.to_db() * 100.0) as i32
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::FULL
    }
}

impl From<f32> for Volume {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_clamping() {
        assert_eq!(Volume::new(-0.5).value(), 0.0);
        assert_eq!(Volume::new(0.5).value(), 0.5);
        assert_eq!(Volume::new(1.5).value(), 1.0);
    }

    #[test]
    fn test_volume_db_conversion() {
        let vol = Volume::FULL;
        assert!((vol.to_db() - 0.0).abs() < 0.001);

        let half = Volume::from_db(-6.0);
        assert!((half.value() - 0.501).abs() < 0.01, "-6 dB is about half amplitude");

        assert_eq!(Volume::SILENT.to_db(), f32::NEG_INFINITY);
    }

    #[test]
    fn test_volume_millibels() {
        assert_eq!(Volume::from_millibels(0), Volume::FULL);
        let v = Volume::from_millibels(-2000);
        assert!((v.value() - 0.1).abs() < 1e-4, "-20 dB is a tenth, got {}", v.value());
        assert_eq!(Volume::SILENT.to_millibels(), i32::MIN);
        assert!((Volume::new(0.1).to_millibels() + 2000).abs() <= 1);
    }
}
