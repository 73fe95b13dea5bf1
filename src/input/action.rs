// Action bindings - physical inputs an action can be triggered by

use super::buffer::{try_push, MIN_BINDING_CAPACITY};
use super::device::DeviceState;
use super::gamepad::{GamepadButton, GamepadTarget};
use super::keyboard::Scancode;
use super::mouse::MouseButton;
use super::platform::Platform;
use std::collections::TryReserveError;

/// Represents a physical input bound to an action
/// (keyboard key, mouse button, or gamepad button on a given gamepad)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionBinding {
    Key(Scancode),
    Mouse(MouseButton),
    Gamepad {
        button: GamepadButton,
        target: GamepadTarget,
    },
}

impl ActionBinding {
    /// Create a keyboard binding
    pub fn key(key: Scancode) -> Self {
        Self::Key(key)
    }

    /// Create a mouse button binding
    pub fn mouse(button: MouseButton) -> Self {
        Self::Mouse(button)
    }

    /// Create a gamepad button binding
    pub fn gamepad(button: GamepadButton, target: GamepadTarget) -> Self {
        Self::Gamepad { button, target }
    }

    /// Check if the bound input is down in the current frame
    pub fn is_down<P: Platform>(&self, devices: &DeviceState<P>) -> bool {
        match *self {
            ActionBinding::Key(key) => devices.key_check(key),
            ActionBinding::Mouse(button) => devices.mouse_check(button),
            ActionBinding::Gamepad { button, target } => devices.gamepad_check(button, target),
        }
    }
}

/// Bindings and resolved state of a single action
#[derive(Debug, Default)]
pub(crate) struct ActionEntry {
    bindings: Vec<ActionBinding>,
    current: bool,
    previous: bool,
}

impl ActionEntry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append a binding, growing the list geometrically
    pub(crate) fn push(&mut self, binding: ActionBinding) -> Result<(), TryReserveError> {
        try_push(&mut self.bindings, binding, MIN_BINDING_CAPACITY)
    }

    /// Drop every binding but keep the allocation
    pub(crate) fn clear(&mut self) {
        self.bindings.clear();
    }

    /// Re-evaluate against the current device state.
    /// The first binding that is down wins; later ones are not consulted.
    pub(crate) fn resolve<P: Platform>(&mut self, devices: &DeviceState<P>) {
        self.previous = self.current;
        self.current = self.bindings.iter().any(|binding| binding.is_down(devices));
    }

    pub(crate) fn bindings(&self) -> &[ActionBinding] {
        &self.bindings
    }

    pub(crate) fn capacity(&self) -> usize {
        self.bindings.capacity()
    }

    pub(crate) fn current(&self) -> bool {
        self.current
    }

    pub(crate) fn previous(&self) -> bool {
        self.previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::config::InputConfig;
    use crate::input::platform::mock::MockPlatform;

    #[test]
    fn test_binding_constructors() {
        assert_eq!(ActionBinding::key(Scancode::A), ActionBinding::Key(Scancode::A));
        assert_eq!(
            ActionBinding::mouse(MouseButton::Left),
            ActionBinding::Mouse(MouseButton::Left)
        );
        assert_eq!(
            ActionBinding::gamepad(GamepadButton::X, GamepadTarget::Slot(2)),
            ActionBinding::Gamepad {
                button: GamepadButton::X,
                target: GamepadTarget::Slot(2),
            }
        );
    }

    #[test]
    fn test_mouse_binding_reads_mouse_state() {
        let mut platform = MockPlatform::new();
        platform.set_mouse_button(MouseButton::Right, true);
        let devices = DeviceState::new(platform, InputConfig::default()).unwrap();

        assert!(ActionBinding::mouse(MouseButton::Right).is_down(&devices));
        assert!(!ActionBinding::mouse(MouseButton::Left).is_down(&devices));
        // Mouse button 3 must not be read as scancode 3
        assert!(!ActionBinding::key(Scancode(3)).is_down(&devices));
    }

    #[test]
    fn test_entry_growth_keeps_bindings() {
        let mut entry = ActionEntry::new();
        let keys: Vec<Scancode> = (4..13).map(Scancode).collect();
        let mut last_capacity = 0;

        for (i, key) in keys.iter().enumerate() {
            entry.push(ActionBinding::key(*key)).unwrap();
            assert!(entry.capacity() >= last_capacity);
            assert!(entry.capacity() > i);
            last_capacity = entry.capacity();
        }

        let expected: Vec<ActionBinding> = keys.into_iter().map(ActionBinding::key).collect();
        assert_eq!(entry.bindings(), expected.as_slice());
        assert_eq!(entry.capacity(), 16);
    }

    #[test]
    fn test_failed_push_keeps_bindings() {
        let mut entry = ActionEntry::new();
        entry.push(ActionBinding::key(Scancode::A)).unwrap();
        entry.push(ActionBinding::mouse(MouseButton::Left)).unwrap();

        crate::input::buffer::fail_next_growth();
        assert!(entry.push(ActionBinding::key(Scancode::D)).is_err());
        assert_eq!(
            entry.bindings(),
            &[
                ActionBinding::key(Scancode::A),
                ActionBinding::mouse(MouseButton::Left)
            ]
        );
        assert_eq!(entry.capacity(), MIN_BINDING_CAPACITY);
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut entry = ActionEntry::new();
        for key in 4..9 {
            entry.push(ActionBinding::key(Scancode(key))).unwrap();
        }
        let capacity = entry.capacity();

        entry.clear();
        assert!(entry.bindings().is_empty());
        assert_eq!(entry.capacity(), capacity);
    }
}
