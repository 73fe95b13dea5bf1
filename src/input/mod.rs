// Input handling system
//
// This module tracks raw device state frame by frame and resolves numbered
// actions on top of it.
//
// ## Architecture
//
// - `platform`: The narrow interface to the platform's device subsystem
// - `keyboard`, `mouse`, `gamepad`, `touch`: Per-device value types
// - `buffer`: Geometric growth policy shared by the dynamic buffers
// - `config`: Gamepad limits and deadzone configuration
// - `device`: Double-buffered device state tracker
// - `action`: Physical input bindings for an action
// - `resolver`: Action table resolved against the device state every frame
// - `winit_backend`: A `Platform` fed by winit window events
//
// ## Usage Example
//
// ```rust
// use rusted_input::input::{ActionResolver, DeviceState, InputConfig, Scancode};
//
// let mut devices = DeviceState::new(platform, InputConfig::default())?;
// let mut actions = ActionResolver::new(2)?;
// actions.add_key(0, Scancode::SPACE)?;
//
// // In your event loop, forward device-change events
// devices.handle_event(event)?;
//
// // Once per frame, after all events were delivered
// devices.update();
// actions.update(&devices);
//
// if actions.pressed(0) {
//     // Action 0 was just pressed!
// }
// ```

pub mod action;
pub mod buffer;
pub mod config;
pub mod device;
pub mod gamepad;
pub mod keyboard;
pub mod mouse;
pub mod platform;
pub mod resolver;
pub mod touch;
pub mod winit_backend;

use std::collections::TryReserveError;

// Re-export commonly used types
pub use action::ActionBinding;
pub use config::{InputConfig, DEFAULT_DEADZONE, MAX_GAMEPADS};
pub use device::{DeviceEvent, DeviceState};
pub use gamepad::{GamepadAxis, GamepadButton, GamepadButtons, GamepadTarget};
pub use keyboard::{KeyboardState, Scancode, KEY_COUNT};
pub use mouse::{MouseButton, MouseButtons, WheelDirection, WheelEvent};
pub use platform::{MouseSample, Platform};
pub use resolver::ActionResolver;
pub use touch::{TouchFinger, TouchPhase};
pub use winit_backend::WinitPlatform;

/// Input system errors
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Allocation failed: {0}")]
    Allocation(#[from] TryReserveError),

    #[error("Controller subsystem unavailable: {0}")]
    Subsystem(String),

    #[error("Action {action} out of range (table holds {count} actions)")]
    ActionOutOfRange { action: usize, count: usize },

    #[error("Gamepad index {0} exceeds the supported gamepad count")]
    GamepadIndexOutOfRange(u32),

    #[error("Gamepad slot {0} is already in use")]
    GamepadSlotOccupied(u32),

    #[error("Failed to open gamepad {0}")]
    GamepadOpen(u32),

    #[error("Gamepad {0} is not attached")]
    GamepadNotAttached(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_display() {
        let err = InputError::ActionOutOfRange {
            action: 7,
            count: 3,
        };
        assert_eq!(
            err.to_string(),
            "Action 7 out of range (table holds 3 actions)"
        );
    }

    #[test]
    fn test_allocation_error_converts() {
        let mut buffer: Vec<u64> = Vec::new();
        let reserve = buffer.try_reserve(usize::MAX);
        let err: InputError = reserve.unwrap_err().into();
        assert!(matches!(err, InputError::Allocation(_)));
    }
}
