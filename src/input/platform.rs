// Interface to the platform's device subsystem

use super::gamepad::{GamepadAxis, GamepadButton};
use super::keyboard::KeyboardState;
use super::mouse::MouseButtons;
use super::InputError;
use glam::IVec2;

/// Snapshot of the mouse returned by the platform
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MouseSample {
    pub buttons: MouseButtons,
    /// Cursor position relative to the application window
    pub position: IVec2,
}

/// Synchronous access to the platform's input devices.
///
/// The device state tracker only ever samples through this trait; event
/// delivery and the window loop stay with the caller.
pub trait Platform {
    /// Open gamepad device. Owned by the tracker from attach until it is
    /// handed back through `close_gamepad`.
    type Gamepad;

    /// Check if the controller subsystem is already running
    fn controller_subsystem_active(&self) -> bool;

    /// Start the controller subsystem
    fn init_controller_subsystem(&mut self) -> Result<(), InputError>;

    /// Stop the controller subsystem
    fn quit_controller_subsystem(&mut self);

    /// Current down state of every key
    fn sample_keyboard(&mut self) -> KeyboardState;

    /// Current mouse buttons and cursor position
    fn sample_mouse(&mut self) -> MouseSample;

    /// Open the gamepad at a platform device index
    fn open_gamepad(&mut self, index: u32) -> Option<Self::Gamepad>;

    /// Release a gamepad handle
    fn close_gamepad(&mut self, gamepad: Self::Gamepad);

    /// Check if a native button is down. Only called with native buttons.
    fn gamepad_button(&self, gamepad: &Self::Gamepad, button: GamepadButton) -> bool;

    /// Raw axis value
    fn gamepad_axis(&self, gamepad: &Self::Gamepad, axis: GamepadAxis) -> i16;
}
