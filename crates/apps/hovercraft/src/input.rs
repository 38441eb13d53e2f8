//! Per-frame controls and the latched toggles they drive

use hovercraft_physics::ThrustInput;

/// Keys held down during a frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub thrust: ThrustInput,
    /// Swing the camera behind the vehicle's heading while held
    pub center_camera: bool,
    pub pause: bool,
    pub help: bool,
    pub camera_distance: bool,
    pub wireframe: bool,
    pub shadow_volumes: bool,
}

impl FrameInput {
    pub fn with_thrust(thrust: ThrustInput) -> Self {
        Self {
            thrust,
            ..Default::default()
        }
    }
}

/// Settings flipped by a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Toggle {
    Pause,
    Help,
    CameraDistance,
    Wireframe,
    ShadowVolumes,
}

impl Toggle {
    pub const ALL: [Toggle; 5] = [
        Toggle::Pause,
        Toggle::Help,
        Toggle::CameraDistance,
        Toggle::Wireframe,
        Toggle::ShadowVolumes,
    ];

    fn held(self, input: &FrameInput) -> bool {
        match self {
            Toggle::Pause => input.pause,
            Toggle::Help => input.help,
            Toggle::CameraDistance => input.camera_distance,
            Toggle::Wireframe => input.wireframe,
            Toggle::ShadowVolumes => input.shadow_volumes,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Toggle state, flipped once per press rather than every frame a key is held
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Toggles {
    state: [bool; 5],
    held: [bool; 5],
}

impl Toggles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one frame of input; returns the toggles that flipped
    pub fn update(&mut self, input: &FrameInput) -> Vec<Toggle> {
        let mut flipped = Vec::new();
        for toggle in Toggle::ALL {
            let i = toggle.index();
            let down = toggle.held(input);
            if down && !self.held[i] {
                self.state[i] = !self.state[i];
                flipped.push(toggle);
            }
            self.held[i] = down;
        }
        flipped
    }

    pub fn is_on(&self, toggle: Toggle) -> bool {
        self.state[toggle.index()]
    }

    pub fn paused(&self) -> bool {
        self.is_on(Toggle::Pause)
    }

    pub fn show_help(&self) -> bool {
        self.is_on(Toggle::Help)
    }

    /// Close camera mode
    pub fn camera_near(&self) -> bool {
        self.is_on(Toggle::CameraDistance)
    }

    pub fn wireframe(&self) -> bool {
        self.is_on(Toggle::Wireframe)
    }

    pub fn show_shadow_volumes(&self) -> bool {
        self.is_on(Toggle::ShadowVolumes)
    }
}
