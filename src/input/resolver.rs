// Action resolver - numbered actions resolved from their bindings every frame

use super::action::{ActionBinding, ActionEntry};
use super::device::DeviceState;
use super::gamepad::{GamepadButton, GamepadTarget};
use super::keyboard::Scancode;
use super::mouse::MouseButton;
use super::platform::Platform;
use super::InputError;
use log::{debug, warn};

/// Table of actions, each bound to any number of physical inputs.
///
/// Action ids are indices into a table whose size is fixed at creation.
/// Call `update` once per frame, after `DeviceState::update`.
#[derive(Debug)]
pub struct ActionResolver {
    actions: Box<[ActionEntry]>,
}

impl ActionResolver {
    /// Create a resolver with `action_count` actions and no bindings
    pub fn new(action_count: usize) -> Result<Self, InputError> {
        let mut actions = Vec::new();
        actions.try_reserve_exact(action_count)?;
        actions.extend((0..action_count).map(|_| ActionEntry::new()));

        debug!("Action table created with {} actions", action_count);

        Ok(Self {
            actions: actions.into_boxed_slice(),
        })
    }

    /// Create a resolver from a list of (action, binding) pairs
    pub fn from_bindings<I>(action_count: usize, bindings: I) -> Result<Self, InputError>
    where
        I: IntoIterator<Item = (usize, ActionBinding)>,
    {
        let mut resolver = Self::new(action_count)?;
        for (action, binding) in bindings {
            resolver.add_binding(action, binding)?;
        }
        Ok(resolver)
    }

    fn entry_mut(&mut self, action: usize) -> Result<&mut ActionEntry, InputError> {
        let count = self.actions.len();
        self.actions
            .get_mut(action)
            .ok_or(InputError::ActionOutOfRange { action, count })
    }

    /// Bind a physical input to an action.
    /// Bindings are evaluated in the order they were added.
    pub fn add_binding(&mut self, action: usize, binding: ActionBinding) -> Result<(), InputError> {
        self.entry_mut(action)?.push(binding).map_err(|err| {
            warn!("Failed to bind {:?} to action {}: {}", binding, action, err);
            InputError::from(err)
        })
    }

    /// Bind a keyboard key to an action
    pub fn add_key(&mut self, action: usize, key: Scancode) -> Result<(), InputError> {
        self.add_binding(action, ActionBinding::key(key))
    }

    /// Bind a mouse button to an action
    pub fn add_mouse_button(
        &mut self,
        action: usize,
        button: MouseButton,
    ) -> Result<(), InputError> {
        self.add_binding(action, ActionBinding::mouse(button))
    }

    /// Bind a gamepad button to an action
    pub fn add_gamepad_button(
        &mut self,
        action: usize,
        button: GamepadButton,
        target: GamepadTarget,
    ) -> Result<(), InputError> {
        self.add_binding(action, ActionBinding::gamepad(button, target))
    }

    /// Remove every binding of an action, keeping the list's capacity
    pub fn clear_action(&mut self, action: usize) -> Result<(), InputError> {
        self.entry_mut(action)?.clear();
        Ok(())
    }

    /// Resolve every action against the current device state
    pub fn update<P: Platform>(&mut self, devices: &DeviceState<P>) {
        for entry in self.actions.iter_mut() {
            entry.resolve(devices);
        }
    }

    /// Check if an action is active
    pub fn check(&self, action: usize) -> bool {
        self.actions.get(action).is_some_and(|entry| entry.current())
    }

    /// Check if an action became active this frame
    pub fn pressed(&self, action: usize) -> bool {
        self.actions
            .get(action)
            .is_some_and(|entry| entry.current() && !entry.previous())
    }

    /// Check if an action stopped being active this frame
    pub fn released(&self, action: usize) -> bool {
        self.actions
            .get(action)
            .is_some_and(|entry| !entry.current() && entry.previous())
    }

    /// Bindings of an action, in evaluation order
    pub fn bindings(&self, action: usize) -> &[ActionBinding] {
        self.actions
            .get(action)
            .map(|entry| entry.bindings())
            .unwrap_or(&[])
    }

    /// Number of bindings the action can hold without reallocating
    pub fn binding_capacity(&self, action: usize) -> usize {
        self.actions
            .get(action)
            .map(|entry| entry.capacity())
            .unwrap_or(0)
    }

    /// Check if an action has any bindings
    pub fn has_binding(&self, action: usize) -> bool {
        !self.bindings(action).is_empty()
    }

    /// Number of actions in the table
    pub fn action_count(&self) -> usize {
        self.actions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::config::InputConfig;
    use crate::input::platform::mock::MockPlatform;

    const JUMP: usize = 0;
    const FIRE: usize = 1;
    const PAUSE: usize = 2;

    fn devices() -> DeviceState<MockPlatform> {
        let mut platform = MockPlatform::new();
        platform.connect(0);
        let mut devices = DeviceState::new(platform, InputConfig::default()).unwrap();
        devices.attach_gamepad(0).unwrap();
        devices
    }

    fn frame(devices: &mut DeviceState<MockPlatform>, actions: &mut ActionResolver) {
        devices.update();
        actions.update(devices);
    }

    #[test]
    fn test_resolver_creation() {
        let actions = ActionResolver::new(3).unwrap();
        assert_eq!(actions.action_count(), 3);
        assert!(!actions.has_binding(JUMP));
        assert!(!actions.check(PAUSE));
    }

    #[test]
    fn test_empty_table() {
        let mut actions = ActionResolver::new(0).unwrap();
        assert_eq!(actions.action_count(), 0);
        assert!(matches!(
            actions.add_key(0, Scancode::A),
            Err(InputError::ActionOutOfRange { action: 0, count: 0 })
        ));
    }

    #[test]
    fn test_key_action_edges() {
        let mut devices = devices();
        let mut actions = ActionResolver::new(3).unwrap();
        actions.add_key(JUMP, Scancode::SPACE).unwrap();

        devices.platform_mut().set_key(Scancode::SPACE, true);
        frame(&mut devices, &mut actions);
        assert!(actions.pressed(JUMP));
        assert!(actions.check(JUMP));

        frame(&mut devices, &mut actions);
        assert!(!actions.pressed(JUMP));
        assert!(actions.check(JUMP));

        devices.platform_mut().set_key(Scancode::SPACE, false);
        frame(&mut devices, &mut actions);
        assert!(actions.released(JUMP));
        assert!(!actions.check(JUMP));
    }

    #[test]
    fn test_mouse_and_gamepad_bindings() {
        let mut devices = devices();
        let mut actions = ActionResolver::new(3).unwrap();
        actions.add_mouse_button(FIRE, MouseButton::Left).unwrap();
        actions
            .add_gamepad_button(PAUSE, GamepadButton::Start, GamepadTarget::First)
            .unwrap();

        devices
            .platform_mut()
            .set_mouse_button(MouseButton::Left, true);
        devices
            .platform_mut()
            .set_pad_button(0, GamepadButton::Start, true);
        frame(&mut devices, &mut actions);

        assert!(actions.pressed(FIRE));
        assert!(actions.pressed(PAUSE));
        assert!(!actions.check(JUMP));
    }

    #[test]
    fn test_scroll_binding() {
        let mut devices = devices();
        let mut actions = ActionResolver::new(1).unwrap();
        actions.add_mouse_button(0, MouseButton::ScrollUp).unwrap();

        devices.mouse_wheel(crate::input::WheelEvent::new(0, 3));
        frame(&mut devices, &mut actions);
        assert!(actions.pressed(0));

        frame(&mut devices, &mut actions);
        assert!(actions.released(0));
    }

    #[test]
    fn test_any_binding_activates_action() {
        let mut devices = devices();
        let mut actions = ActionResolver::new(1).unwrap();
        actions.add_key(0, Scancode::A).unwrap();
        actions.add_key(0, Scancode::LEFT).unwrap();

        devices.platform_mut().set_key(Scancode::LEFT, true);
        frame(&mut devices, &mut actions);
        assert!(actions.check(0));
    }

    #[test]
    fn test_binding_order_does_not_change_result() {
        let mut devices = devices();
        devices.platform_mut().set_key(Scancode::A, true);
        devices.update();

        let matching = ActionBinding::key(Scancode::A);
        let idle = ActionBinding::key(Scancode::B);

        let mut forward = ActionResolver::from_bindings(1, [(0, matching), (0, idle)]).unwrap();
        let mut reverse = ActionResolver::from_bindings(1, [(0, idle), (0, matching)]).unwrap();
        forward.update(&devices);
        reverse.update(&devices);

        assert!(forward.check(0));
        assert!(reverse.check(0));
    }

    #[test]
    fn test_action_releases_when_no_binding_matches() {
        let mut devices = devices();
        let mut actions = ActionResolver::new(1).unwrap();
        actions.add_key(0, Scancode::A).unwrap();
        actions.add_key(0, Scancode::B).unwrap();

        devices.platform_mut().set_key(Scancode::B, true);
        frame(&mut devices, &mut actions);
        assert!(actions.check(0));

        devices.platform_mut().set_key(Scancode::B, false);
        frame(&mut devices, &mut actions);
        assert!(!actions.check(0));
        assert!(actions.released(0));
    }

    #[test]
    fn test_gamepad_binding_follows_unplug() {
        let mut devices = devices();
        let mut actions = ActionResolver::new(1).unwrap();
        actions
            .add_gamepad_button(0, GamepadButton::A, GamepadTarget::Slot(0))
            .unwrap();

        devices
            .platform_mut()
            .set_pad_button(0, GamepadButton::A, true);
        frame(&mut devices, &mut actions);
        assert!(actions.check(0));

        devices.detach_gamepad(0).unwrap();
        frame(&mut devices, &mut actions);
        assert!(!actions.check(0));
        assert!(actions.released(0));
    }

    #[test]
    fn test_binding_growth() {
        let mut actions = ActionResolver::new(1).unwrap();
        let mut capacity = 0;

        for key in 4..14 {
            actions.add_key(0, Scancode(key)).unwrap();
            let grown = actions.binding_capacity(0);
            assert!(grown >= capacity);
            assert!(grown >= actions.bindings(0).len());
            capacity = grown;
        }

        assert_eq!(actions.bindings(0).len(), 10);
        assert_eq!(actions.bindings(0)[0], ActionBinding::key(Scancode(4)));
        assert_eq!(actions.bindings(0)[9], ActionBinding::key(Scancode(13)));
    }

    #[test]
    fn test_clear_action_keeps_capacity() {
        let mut devices = devices();
        let mut actions = ActionResolver::new(1).unwrap();
        actions.add_key(0, Scancode::A).unwrap();
        actions.add_key(0, Scancode::B).unwrap();
        actions.add_key(0, Scancode::C).unwrap();
        let capacity = actions.binding_capacity(0);

        actions.clear_action(0).unwrap();
        assert!(!actions.has_binding(0));
        assert_eq!(actions.binding_capacity(0), capacity);

        devices.platform_mut().set_key(Scancode::A, true);
        frame(&mut devices, &mut actions);
        assert!(!actions.check(0));

        actions.add_key(0, Scancode::A).unwrap();
        assert_eq!(actions.binding_capacity(0), capacity);
        frame(&mut devices, &mut actions);
        assert!(actions.pressed(0));
    }

    #[test]
    fn test_out_of_range_action() {
        let mut actions = ActionResolver::new(2).unwrap();
        assert!(matches!(
            actions.add_key(5, Scancode::A),
            Err(InputError::ActionOutOfRange { action: 5, count: 2 })
        ));
        assert!(actions.clear_action(5).is_err());
        assert!(!actions.check(5));
        assert!(!actions.pressed(5));
        assert!(!actions.released(5));
        assert!(actions.bindings(5).is_empty());
    }
}
