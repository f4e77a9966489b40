use tnav_transport::{StepSize, WindowBounds};

/// Tunables supplied by the host when building the controllers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerSettings {
    pub window_bounds: WindowBounds,
    pub step: StepSize,
    /// Multiplier applied by one press of the scale buttons.
    pub scale_factor: f64,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            window_bounds: WindowBounds::default(),
            step: StepSize::default(),
            scale_factor: 1.2,
        }
    }
}
