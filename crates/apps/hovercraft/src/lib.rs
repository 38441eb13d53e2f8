//! Hovercraft simulation
//!
//! Wires the engine crates into a game loop: a [`Simulation`] owns the
//! terrain, vehicle, chase camera, dust trail and engine sound, advances them
//! with [`Simulation::frame`] and describes each frame to a [`FrameSink`].

pub mod config;
mod error;
pub mod hull;
pub mod input;
pub mod particles;
pub mod simulation;

pub use config::GameConfig;
pub use error::{Error, Result};
pub use hull::Hull;
pub use input::{FrameInput, Toggle, Toggles};
pub use particles::DustTrail;
pub use simulation::{FrameSink, LightingPass, Simulation, MAX_FRAME_TIME};
