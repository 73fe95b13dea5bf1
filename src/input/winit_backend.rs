// Platform backend fed by winit window events

use super::device::DeviceEvent;
use super::gamepad::{GamepadAxis, GamepadButton};
use super::keyboard::{KeyboardState, Scancode};
use super::mouse::{MouseButton, WheelEvent};
use super::platform::{MouseSample, Platform};
use super::touch::{TouchFinger, TouchPhase};
use super::InputError;
use glam::{IVec2, Vec2};
use log::debug;
use std::convert::Infallible;
use winit::dpi::PhysicalPosition;
use winit::event::{
    ElementState, MouseScrollDelta, Touch, TouchPhase as WinitTouchPhase, WindowEvent,
};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Pixels of smooth scrolling that count as one wheel step
const PIXELS_PER_LINE: f64 = 40.0;

/// Keeps a live keyboard and mouse snapshot from winit window events.
///
/// winit has no gamepad support, so no gamepad can ever be opened.
#[derive(Debug, Default)]
pub struct WinitPlatform {
    keyboard: KeyboardState,
    mouse: MouseSample,
    subsystem_active: bool,
}

impl WinitPlatform {
    /// Create a backend with nothing held
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a window event from winit.
    ///
    /// Key, button and cursor events update the live snapshot; wheel and touch
    /// events come back as device events to forward to the tracker.
    pub fn process_window_event(&mut self, event: &WindowEvent) -> Option<DeviceEvent> {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                self.key_input(event.physical_key, event.state);
                None
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.mouse_input(*button, *state);
                None
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(*position);
                None
            }
            WindowEvent::Focused(false) => {
                // Releases happening while unfocused are never reported
                self.release_all();
                None
            }
            WindowEvent::MouseWheel { delta, .. } => {
                wheel_event(*delta).map(DeviceEvent::MouseWheel)
            }
            WindowEvent::Touch(touch) => Some(DeviceEvent::TouchFinger(touch_finger(touch))),
            _ => None,
        }
    }

    /// Record a physical key changing state
    pub fn key_input(&mut self, key: PhysicalKey, state: ElementState) {
        if let PhysicalKey::Code(code) = key {
            if let Some(scancode) = scancode_from_winit(code) {
                self.keyboard.set(scancode, state == ElementState::Pressed);
            }
        }
    }

    /// Record a mouse button changing state
    pub fn mouse_input(&mut self, button: winit::event::MouseButton, state: ElementState) {
        if let Some(button) = mouse_button_from_winit(button) {
            match state {
                ElementState::Pressed => self.mouse.buttons.insert(button),
                ElementState::Released => self.mouse.buttons.remove(button),
            }
        }
    }

    /// Record the cursor position
    pub fn cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        self.mouse.position = IVec2::new(position.x as i32, position.y as i32);
    }

    /// Release every key and button
    pub fn release_all(&mut self) {
        self.keyboard.clear();
        self.mouse.buttons = Default::default();
    }
}

impl Platform for WinitPlatform {
    type Gamepad = Infallible;

    fn controller_subsystem_active(&self) -> bool {
        self.subsystem_active
    }

    fn init_controller_subsystem(&mut self) -> Result<(), InputError> {
        self.subsystem_active = true;
        Ok(())
    }

    fn quit_controller_subsystem(&mut self) {
        self.subsystem_active = false;
    }

    fn sample_keyboard(&mut self) -> KeyboardState {
        self.keyboard
    }

    fn sample_mouse(&mut self) -> MouseSample {
        self.mouse
    }

    fn open_gamepad(&mut self, index: u32) -> Option<Infallible> {
        debug!("winit backend cannot open gamepad {}", index);
        None
    }

    fn close_gamepad(&mut self, gamepad: Infallible) {
        match gamepad {}
    }

    fn gamepad_button(&self, gamepad: &Infallible, _button: GamepadButton) -> bool {
        match *gamepad {}
    }

    fn gamepad_axis(&self, gamepad: &Infallible, _axis: GamepadAxis) -> i16 {
        match *gamepad {}
    }
}

/// Whole wheel steps for a scroll amount; any movement counts as at least one
fn wheel_steps(amount: f64) -> i32 {
    if amount == 0.0 {
        0
    } else if amount.abs() < 1.0 {
        amount.signum() as i32
    } else {
        amount.round() as i32
    }
}

/// Convert a winit scroll delta, `None` if it does not move
pub fn wheel_event(delta: MouseScrollDelta) -> Option<WheelEvent> {
    let (x, y) = match delta {
        MouseScrollDelta::LineDelta(x, y) => (wheel_steps(x.into()), wheel_steps(y.into())),
        MouseScrollDelta::PixelDelta(position) => (
            wheel_steps(position.x / PIXELS_PER_LINE),
            wheel_steps(position.y / PIXELS_PER_LINE),
        ),
    };

    if x == 0 && y == 0 {
        None
    } else {
        Some(WheelEvent::new(x, y))
    }
}

/// Convert a winit touch event
pub fn touch_finger(touch: &Touch) -> TouchFinger {
    TouchFinger {
        finger_id: touch.id,
        phase: touch_phase_from_winit(touch.phase),
        position: Vec2::new(touch.location.x as f32, touch.location.y as f32),
        pressure: touch
            .force
            .map(|force| force.normalized() as f32)
            .unwrap_or(1.0),
    }
}

fn touch_phase_from_winit(phase: WinitTouchPhase) -> TouchPhase {
    match phase {
        WinitTouchPhase::Started => TouchPhase::Down,
        WinitTouchPhase::Moved => TouchPhase::Motion,
        WinitTouchPhase::Ended => TouchPhase::Up,
        WinitTouchPhase::Cancelled => TouchPhase::Cancelled,
    }
}

/// Map a winit mouse button; extra buttons beyond back/forward are not tracked
pub fn mouse_button_from_winit(button: winit::event::MouseButton) -> Option<MouseButton> {
    use winit::event::MouseButton as Winit;

    match button {
        Winit::Left => Some(MouseButton::Left),
        Winit::Middle => Some(MouseButton::Middle),
        Winit::Right => Some(MouseButton::Right),
        Winit::Back => Some(MouseButton::X1),
        Winit::Forward => Some(MouseButton::X2),
        Winit::Other(_) => None,
    }
}

/// Map a winit key code to its scancode
pub fn scancode_from_winit(code: KeyCode) -> Option<Scancode> {
    let scancode = match code {
        KeyCode::KeyA => Scancode::A,
        KeyCode::KeyB => Scancode::B,
        KeyCode::KeyC => Scancode::C,
        KeyCode::KeyD => Scancode::D,
        KeyCode::KeyE => Scancode::E,
        KeyCode::KeyF => Scancode::F,
        KeyCode::KeyG => Scancode::G,
        KeyCode::KeyH => Scancode::H,
        KeyCode::KeyI => Scancode::I,
        KeyCode::KeyJ => Scancode::J,
        KeyCode::KeyK => Scancode::K,
        KeyCode::KeyL => Scancode::L,
        KeyCode::KeyM => Scancode::M,
        KeyCode::KeyN => Scancode::N,
        KeyCode::KeyO => Scancode::O,
        KeyCode::KeyP => Scancode::P,
        KeyCode::KeyQ => Scancode::Q,
        KeyCode::KeyR => Scancode::R,
        KeyCode::KeyS => Scancode::S,
        KeyCode::KeyT => Scancode::T,
        KeyCode::KeyU => Scancode::U,
        KeyCode::KeyV => Scancode::V,
        KeyCode::KeyW => Scancode::W,
        KeyCode::KeyX => Scancode::X,
        KeyCode::KeyY => Scancode::Y,
        KeyCode::KeyZ => Scancode::Z,

        KeyCode::Digit1 => Scancode::NUM_1,
        KeyCode::Digit2 => Scancode::NUM_2,
        KeyCode::Digit3 => Scancode::NUM_3,
        KeyCode::Digit4 => Scancode::NUM_4,
        KeyCode::Digit5 => Scancode::NUM_5,
        KeyCode::Digit6 => Scancode::NUM_6,
        KeyCode::Digit7 => Scancode::NUM_7,
        KeyCode::Digit8 => Scancode::NUM_8,
        KeyCode::Digit9 => Scancode::NUM_9,
        KeyCode::Digit0 => Scancode::NUM_0,

        KeyCode::Enter => Scancode::RETURN,
        KeyCode::Escape => Scancode::ESCAPE,
        KeyCode::Backspace => Scancode::BACKSPACE,
        KeyCode::Tab => Scancode::TAB,
        KeyCode::Space => Scancode::SPACE,
        KeyCode::Minus => Scancode::MINUS,
        KeyCode::Equal => Scancode::EQUALS,
        KeyCode::BracketLeft => Scancode::LEFT_BRACKET,
        KeyCode::BracketRight => Scancode::RIGHT_BRACKET,
        KeyCode::Backslash => Scancode::BACKSLASH,
        KeyCode::Semicolon => Scancode::SEMICOLON,
        KeyCode::Quote => Scancode::APOSTROPHE,
        KeyCode::Backquote => Scancode::GRAVE,
        KeyCode::Comma => Scancode::COMMA,
        KeyCode::Period => Scancode::PERIOD,
        KeyCode::Slash => Scancode::SLASH,
        KeyCode::CapsLock => Scancode::CAPS_LOCK,

        KeyCode::F1 => Scancode::F1,
        KeyCode::F2 => Scancode::F2,
        KeyCode::F3 => Scancode::F3,
        KeyCode::F4 => Scancode::F4,
        KeyCode::F5 => Scancode::F5,
        KeyCode::F6 => Scancode::F6,
        KeyCode::F7 => Scancode::F7,
        KeyCode::F8 => Scancode::F8,
        KeyCode::F9 => Scancode::F9,
        KeyCode::F10 => Scancode::F10,
        KeyCode::F11 => Scancode::F11,
        KeyCode::F12 => Scancode::F12,

        KeyCode::PrintScreen => Scancode::PRINT_SCREEN,
        KeyCode::ScrollLock => Scancode::SCROLL_LOCK,
        KeyCode::Pause => Scancode::PAUSE,
        KeyCode::Insert => Scancode::INSERT,
        KeyCode::Home => Scancode::HOME,
        KeyCode::PageUp => Scancode::PAGE_UP,
        KeyCode::Delete => Scancode::DELETE,
        KeyCode::End => Scancode::END,
        KeyCode::PageDown => Scancode::PAGE_DOWN,
        KeyCode::ArrowRight => Scancode::RIGHT,
        KeyCode::ArrowLeft => Scancode::LEFT,
        KeyCode::ArrowDown => Scancode::DOWN,
        KeyCode::ArrowUp => Scancode::UP,
        KeyCode::NumLock => Scancode::NUM_LOCK,

        KeyCode::ControlLeft => Scancode::LEFT_CTRL,
        KeyCode::ShiftLeft => Scancode::LEFT_SHIFT,
        KeyCode::AltLeft => Scancode::LEFT_ALT,
        KeyCode::SuperLeft => Scancode::LEFT_GUI,
        KeyCode::ControlRight => Scancode::RIGHT_CTRL,
        KeyCode::ShiftRight => Scancode::RIGHT_SHIFT,
        KeyCode::AltRight => Scancode::RIGHT_ALT,
        KeyCode::SuperRight => Scancode::RIGHT_GUI,

        _ => return None,
    };
    Some(scancode)
}
