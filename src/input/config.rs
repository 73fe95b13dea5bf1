// Input configuration: gamepad limits and analog deadzone

/// Maximum number of gamepads tracked at the same time.
/// Rarely needs to exceed 4, but large local co-op setups can raise it.
pub const MAX_GAMEPADS: usize = 4;

/// Default analog deadzone: 15% of the maximum signed axis magnitude
pub const DEFAULT_DEADZONE: u16 = (i16::MAX as f32 * 0.15) as u16;

/// Runtime configuration for the device state tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputConfig {
    /// Axis magnitude that must be exceeded before a stick or trigger
    /// counts as a pseudo-button press
    pub deadzone: u16,
}

impl InputConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self {
            deadzone: DEFAULT_DEADZONE,
        }
    }

    /// Override the analog deadzone
    pub fn with_deadzone(mut self, deadzone: u16) -> Self {
        self.deadzone = deadzone;
        self
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_deadzone_is_fifteen_percent() {
        assert_eq!(DEFAULT_DEADZONE, 4915);
        assert_eq!(InputConfig::default().deadzone, DEFAULT_DEADZONE);
    }

    #[test]
    fn test_with_deadzone() {
        let config = InputConfig::new().with_deadzone(8000);
        assert_eq!(config.deadzone, 8000);
    }
}
