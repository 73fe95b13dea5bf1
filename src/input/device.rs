// Device state tracker - double-buffered keyboard, mouse, gamepad and touch state

use super::config::{InputConfig, MAX_GAMEPADS};
use super::gamepad::{GamepadAxis, GamepadButton, GamepadSlot, GamepadTarget};
use super::keyboard::{KeyboardState, Scancode};
use super::mouse::{MouseButton, MouseButtons, WheelEvent};
use super::platform::Platform;
use super::touch::{TouchBuffers, TouchFinger};
use super::InputError;
use glam::IVec2;
use log::{debug, info, trace, warn};

/// Device-change events the caller forwards before advancing the frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeviceEvent {
    /// A gamepad was plugged in at this platform index
    GamepadAdded(u32),
    /// The gamepad at this platform index was unplugged
    GamepadRemoved(u32),
    MouseWheel(WheelEvent),
    TouchFinger(TouchFinger),
}

/// Raw device state for the current and the previous frame.
///
/// Forward every device-change event of a frame to the event hooks, then call
/// `update` exactly once. Queries compare the two most recent samples.
pub struct DeviceState<P: Platform> {
    platform: P,

    /// Whether creation started the controller subsystem (and so must stop it)
    owns_subsystem: bool,

    keyboard_current: KeyboardState,
    keyboard_previous: KeyboardState,

    mouse_current: MouseButtons,
    mouse_previous: MouseButtons,
    mouse_position_current: IVec2,
    mouse_position_previous: IVec2,

    /// Wheel movement collected since the last update
    wheel_pending: IVec2,
    /// Wheel movement folded into the current mouse sample
    wheel: IVec2,

    gamepads: [GamepadSlot<P::Gamepad>; MAX_GAMEPADS],

    /// Active slots in attach order; the first entry is the default gamepad
    active_order: Vec<usize>,

    deadzone: u16,

    touch: TouchBuffers,
}

impl<P: Platform> DeviceState<P> {
    /// Create the tracker, starting the controller subsystem if needed and
    /// taking an initial keyboard and mouse sample
    pub fn new(mut platform: P, config: InputConfig) -> Result<Self, InputError> {
        let mut active_order = Vec::new();
        active_order.try_reserve_exact(MAX_GAMEPADS)?;

        let owns_subsystem = if platform.controller_subsystem_active() {
            false
        } else {
            platform.init_controller_subsystem()?;
            true
        };

        let mouse = platform.sample_mouse();
        let keyboard = platform.sample_keyboard();

        info!(
            "Input device state created (deadzone {}, up to {} gamepads)",
            config.deadzone, MAX_GAMEPADS
        );

        Ok(Self {
            platform,
            owns_subsystem,
            keyboard_current: keyboard,
            keyboard_previous: keyboard,
            mouse_current: mouse.buttons,
            mouse_previous: mouse.buttons,
            mouse_position_current: mouse.position,
            mouse_position_previous: mouse.position,
            wheel_pending: IVec2::ZERO,
            wheel: IVec2::ZERO,
            gamepads: std::array::from_fn(|_| GamepadSlot::empty()),
            active_order,
            deadzone: config.deadzone,
            touch: TouchBuffers::new(),
        })
    }

    /// Advance to a new frame.
    /// Call this once per frame after forwarding all device events.
    pub fn update(&mut self) {
        self.mouse_previous = self.mouse_current;
        self.mouse_position_previous = self.mouse_position_current;
        self.keyboard_previous = self.keyboard_current;

        self.wheel = std::mem::take(&mut self.wheel_pending);
        let mouse = self.platform.sample_mouse();
        self.mouse_current = mouse.buttons.with_scroll(self.wheel);
        self.mouse_position_current = mouse.position;
        if self.wheel != IVec2::ZERO {
            trace!("Folded wheel delta {} into mouse state", self.wheel);
        }

        self.keyboard_current = self.platform.sample_keyboard();

        for &slot in &self.active_order {
            self.gamepads[slot].update(&self.platform, self.deadzone);
        }

        self.touch.swap();
    }

    /// Dispatch a device-change event to its hook
    pub fn handle_event(&mut self, event: DeviceEvent) -> Result<(), InputError> {
        match event {
            DeviceEvent::GamepadAdded(index) => self.attach_gamepad(index),
            DeviceEvent::GamepadRemoved(index) => self.detach_gamepad(index),
            DeviceEvent::MouseWheel(wheel) => {
                self.mouse_wheel(wheel);
                Ok(())
            }
            DeviceEvent::TouchFinger(finger) => self.touch_finger(finger),
        }
    }

    /// Open the gamepad at a platform index and start tracking it
    pub fn attach_gamepad(&mut self, index: u32) -> Result<(), InputError> {
        let slot = index as usize;
        if slot >= MAX_GAMEPADS {
            return Err(InputError::GamepadIndexOutOfRange(index));
        }
        if self.gamepads[slot].is_active() {
            return Err(InputError::GamepadSlotOccupied(index));
        }

        let handle = self
            .platform
            .open_gamepad(index)
            .ok_or(InputError::GamepadOpen(index))?;
        self.gamepads[slot].attach(&self.platform, handle, self.deadzone);
        self.active_order.push(slot);

        debug!(
            "Gamepad {} attached ({} active)",
            index,
            self.active_order.len()
        );
        Ok(())
    }

    /// Stop tracking a gamepad and release its handle
    pub fn detach_gamepad(&mut self, index: u32) -> Result<(), InputError> {
        let slot = index as usize;
        let handle = self
            .gamepads
            .get_mut(slot)
            .and_then(|pad| pad.detach())
            .ok_or(InputError::GamepadNotAttached(index))?;
        self.platform.close_gamepad(handle);

        if let Some(position) = self.active_order.iter().position(|s| *s == slot) {
            self.active_order.remove(position);
        }

        debug!(
            "Gamepad {} detached ({} active)",
            index,
            self.active_order.len()
        );
        Ok(())
    }

    /// Accumulate a wheel movement for the frame being polled
    pub fn mouse_wheel(&mut self, event: WheelEvent) {
        self.wheel_pending = self.wheel_pending.saturating_add(event.delta());
    }

    /// Collect a touch finger event for the frame being polled.
    /// The event is dropped if the buffer cannot grow.
    pub fn touch_finger(&mut self, event: TouchFinger) -> Result<(), InputError> {
        self.touch.push(event).map_err(|err| {
            warn!("Dropping touch event for finger {}: {}", event.finger_id, err);
            InputError::from(err)
        })
    }

    // Keyboard queries

    /// Check if a key is down
    pub fn key_check(&self, key: Scancode) -> bool {
        self.keyboard_current.is_down(key)
    }

    /// Check if a key went down this frame
    pub fn key_pressed(&self, key: Scancode) -> bool {
        self.keyboard_current.is_down(key) && !self.keyboard_previous.is_down(key)
    }

    /// Check if a key went up this frame
    pub fn key_released(&self, key: Scancode) -> bool {
        !self.keyboard_current.is_down(key) && self.keyboard_previous.is_down(key)
    }

    // Mouse queries

    /// Check if a mouse button (or scroll direction) is down
    pub fn mouse_check(&self, button: MouseButton) -> bool {
        self.mouse_current.contains(button)
    }

    /// Check if a mouse button went down this frame
    pub fn mouse_pressed(&self, button: MouseButton) -> bool {
        self.mouse_current.contains(button) && !self.mouse_previous.contains(button)
    }

    /// Check if a mouse button went up this frame
    pub fn mouse_released(&self, button: MouseButton) -> bool {
        !self.mouse_current.contains(button) && self.mouse_previous.contains(button)
    }

    /// Check if the cursor moved since the previous frame
    pub fn mouse_moved(&self) -> bool {
        self.mouse_position_current != self.mouse_position_previous
    }

    /// Cursor position relative to the window
    pub fn mouse_position(&self) -> IVec2 {
        self.mouse_position_current
    }

    /// Cursor position in the previous frame
    pub fn mouse_position_previous(&self) -> IVec2 {
        self.mouse_position_previous
    }

    /// Wheel movement of the current frame
    pub fn mouse_wheel_delta(&self) -> IVec2 {
        self.wheel
    }

    // Gamepad queries

    fn gamepad_slot(&self, target: GamepadTarget) -> Option<&GamepadSlot<P::Gamepad>> {
        let slot = match target {
            GamepadTarget::First => *self.active_order.first()?,
            GamepadTarget::Slot(slot) => slot,
        };
        self.gamepads.get(slot).filter(|pad| pad.is_active())
    }

    /// Check if a gamepad button is down. Inactive gamepads report nothing down.
    pub fn gamepad_check(&self, button: GamepadButton, target: GamepadTarget) -> bool {
        self.gamepad_slot(target)
            .is_some_and(|pad| pad.current().contains(button))
    }

    /// Check if a gamepad button went down this frame
    pub fn gamepad_pressed(&self, button: GamepadButton, target: GamepadTarget) -> bool {
        self.gamepad_slot(target).is_some_and(|pad| {
            pad.current().contains(button) && !pad.previous().contains(button)
        })
    }

    /// Check if a gamepad button went up this frame
    pub fn gamepad_released(&self, button: GamepadButton, target: GamepadTarget) -> bool {
        self.gamepad_slot(target).is_some_and(|pad| {
            !pad.current().contains(button) && pad.previous().contains(button)
        })
    }

    /// Live axis value, 0 for an inactive gamepad
    pub fn gamepad_axis(&self, axis: GamepadAxis, target: GamepadTarget) -> i16 {
        self.gamepad_slot(target)
            .and_then(|pad| pad.handle())
            .map(|handle| self.platform.gamepad_axis(handle, axis))
            .unwrap_or(0)
    }

    /// Axis magnitude required to synthesize a pseudo-button
    pub fn deadzone(&self) -> u16 {
        self.deadzone
    }

    /// Change the deadzone; takes effect at the next sample
    pub fn set_deadzone(&mut self, deadzone: u16) {
        self.deadzone = deadzone;
    }

    /// Number of attached gamepads
    pub fn gamepad_count(&self) -> usize {
        self.active_order.len()
    }

    /// Attached gamepad slots, oldest first
    pub fn active_gamepads(&self) -> &[usize] {
        &self.active_order
    }

    /// Check if a slot holds an attached gamepad
    pub fn is_gamepad_active(&self, slot: usize) -> bool {
        self.gamepads.get(slot).is_some_and(|pad| pad.is_active())
    }

    // Touch queries

    /// Touch events delivered during the last completed frame
    pub fn touch_current(&self) -> &[TouchFinger] {
        self.touch.current()
    }

    /// Touch events of the frame before that.
    /// Once a touch event arrives for the frame being polled, this buffer is
    /// reused for collecting and holds the events received so far instead.
    pub fn touch_previous(&self) -> &[TouchFinger] {
        self.touch.previous()
    }

    /// The platform backend
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Mutable access to the platform backend
    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }
}

impl<P: Platform> Drop for DeviceState<P> {
    fn drop(&mut self) {
        for pad in self.gamepads.iter_mut() {
            if let Some(handle) = pad.detach() {
                self.platform.close_gamepad(handle);
            }
        }
        self.active_order.clear();

        if self.owns_subsystem {
            self.platform.quit_controller_subsystem();
        }

        info!("Input device state shut down");
    }
}
