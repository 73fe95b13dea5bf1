// Gamepad buttons, axes and per-slot state

use super::platform::Platform;

/// Represents a gamepad button.
///
/// The native buttons come first; the remaining variants are pseudo-buttons
/// synthesized from stick and trigger axes so they can be queried and bound
/// like any other button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum GamepadButton {
    // Native buttons
    A,
    B,
    X,
    Y,
    Back,
    Guide,
    Start,
    LeftStick,
    RightStick,
    LeftShoulder,
    RightShoulder,
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
    Misc1,
    Paddle1,
    Paddle2,
    Paddle3,
    Paddle4,
    Touchpad,

    // Stick directions
    LeftStickUp,
    LeftStickLeft,
    LeftStickDown,
    LeftStickRight,
    RightStickUp,
    RightStickLeft,
    RightStickDown,
    RightStickRight,

    // Triggers
    LeftTrigger,
    RightTrigger,
}

impl GamepadButton {
    /// Buttons sampled directly from the device
    pub const NATIVE: [GamepadButton; 21] = [
        GamepadButton::A,
        GamepadButton::B,
        GamepadButton::X,
        GamepadButton::Y,
        GamepadButton::Back,
        GamepadButton::Guide,
        GamepadButton::Start,
        GamepadButton::LeftStick,
        GamepadButton::RightStick,
        GamepadButton::LeftShoulder,
        GamepadButton::RightShoulder,
        GamepadButton::DpadUp,
        GamepadButton::DpadDown,
        GamepadButton::DpadLeft,
        GamepadButton::DpadRight,
        GamepadButton::Misc1,
        GamepadButton::Paddle1,
        GamepadButton::Paddle2,
        GamepadButton::Paddle3,
        GamepadButton::Paddle4,
        GamepadButton::Touchpad,
    ];

    /// Bit for this button inside a `GamepadButtons` set
    pub fn mask(self) -> u32 {
        1 << (self as u32)
    }

    /// Check if this button is synthesized from an axis
    #[cfg(test)]
    pub(crate) fn is_pseudo(self) -> bool {
        self as u8 >= GamepadButton::LeftStickUp as u8
    }
}

/// Represents an analog gamepad axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadAxis {
    LeftX,
    LeftY,
    RightX,
    RightY,
    TriggerLeft,
    TriggerRight,
}

impl GamepadAxis {
    /// Every axis, in sampling order
    pub const ALL: [GamepadAxis; 6] = [
        GamepadAxis::LeftX,
        GamepadAxis::LeftY,
        GamepadAxis::RightX,
        GamepadAxis::RightY,
        GamepadAxis::TriggerLeft,
        GamepadAxis::TriggerRight,
    ];

    /// Pseudo-button this axis produces at `value`, if it is outside the deadzone.
    /// Negative Y points up, matching the platform's stick orientation.
    pub fn pseudo_button(self, value: i16, deadzone: u16) -> Option<GamepadButton> {
        if i32::from(value).abs() <= i32::from(deadzone) {
            return None;
        }

        let negative = value < 0;
        let button = match self {
            GamepadAxis::LeftX if negative => GamepadButton::LeftStickLeft,
            GamepadAxis::LeftX => GamepadButton::LeftStickRight,
            GamepadAxis::LeftY if negative => GamepadButton::LeftStickUp,
            GamepadAxis::LeftY => GamepadButton::LeftStickDown,
            GamepadAxis::RightX if negative => GamepadButton::RightStickLeft,
            GamepadAxis::RightX => GamepadButton::RightStickRight,
            GamepadAxis::RightY if negative => GamepadButton::RightStickUp,
            GamepadAxis::RightY => GamepadButton::RightStickDown,
            GamepadAxis::TriggerLeft => GamepadButton::LeftTrigger,
            GamepadAxis::TriggerRight => GamepadButton::RightTrigger,
        };
        Some(button)
    }
}

/// Bitset of gamepad buttons (native and pseudo) that are down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GamepadButtons(u32);

impl GamepadButtons {
    /// No buttons down
    pub const NONE: GamepadButtons = GamepadButtons(0);

    #[cfg(test)]
    pub(crate) fn bits(self) -> u32 {
        self.0
    }

    /// Check if a button is in the set
    pub fn contains(self, button: GamepadButton) -> bool {
        self.0 & button.mask() != 0
    }

    /// Add a button to the set
    pub fn insert(&mut self, button: GamepadButton) {
        self.0 |= button.mask();
    }

    /// Remove a button from the set
    pub fn remove(&mut self, button: GamepadButton) {
        self.0 &= !button.mask();
    }
}

/// Which gamepad a query or binding refers to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum GamepadTarget {
    /// The gamepad that has been connected the longest
    #[default]
    First,
    /// A specific gamepad slot (the platform index it was attached with)
    Slot(usize),
}

/// State of one gamepad slot
#[derive(Debug)]
pub(crate) struct GamepadSlot<G> {
    /// Open device handle; `None` while the slot is unused
    handle: Option<G>,
    current: GamepadButtons,
    previous: GamepadButtons,
}

impl<G> GamepadSlot<G> {
    pub(crate) fn empty() -> Self {
        Self {
            handle: None,
            current: GamepadButtons::NONE,
            previous: GamepadButtons::NONE,
        }
    }

    pub(crate) fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    pub(crate) fn handle(&self) -> Option<&G> {
        self.handle.as_ref()
    }

    pub(crate) fn current(&self) -> GamepadButtons {
        self.current
    }

    pub(crate) fn previous(&self) -> GamepadButtons {
        self.previous
    }

    /// Take ownership of an opened device and sample it immediately
    pub(crate) fn attach<P>(&mut self, platform: &P, handle: G, deadzone: u16)
    where
        P: Platform<Gamepad = G>,
    {
        self.previous = GamepadButtons::NONE;
        self.current = sample(platform, &handle, deadzone);
        self.handle = Some(handle);
    }

    /// Give the device handle back and reset the slot
    pub(crate) fn detach(&mut self) -> Option<G> {
        self.current = GamepadButtons::NONE;
        self.previous = GamepadButtons::NONE;
        self.handle.take()
    }

    /// Promote current to previous and re-sample the device
    pub(crate) fn update<P>(&mut self, platform: &P, deadzone: u16)
    where
        P: Platform<Gamepad = G>,
    {
        self.previous = self.current;
        if let Some(handle) = &self.handle {
            self.current = sample(platform, handle, deadzone);
        }
    }
}

/// Sample every native button and synthesize pseudo-buttons from the axes
fn sample<P: Platform>(platform: &P, handle: &P::Gamepad, deadzone: u16) -> GamepadButtons {
    let mut buttons = GamepadButtons::NONE;

    for button in GamepadButton::NATIVE {
        if platform.gamepad_button(handle, button) {
            buttons.insert(button);
        }
    }

    for axis in GamepadAxis::ALL {
        let value = platform.gamepad_axis(handle, axis);
        if let Some(button) = axis.pseudo_button(value, deadzone) {
            buttons.insert(button);
        }
    }

    buttons
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_buttons_fit_in_bitset() {
        assert!((GamepadButton::RightTrigger as u32) < 32);
        assert_eq!(GamepadButton::A.mask(), 1);
    }

    #[test]
    fn test_native_buttons_are_not_pseudo() {
        assert!(GamepadButton::NATIVE.iter().all(|b| !b.is_pseudo()));
        assert!(GamepadButton::LeftStickUp.is_pseudo());
        assert!(GamepadButton::RightTrigger.is_pseudo());
    }

    #[test]
    fn test_axis_inside_deadzone_is_ignored() {
        assert_eq!(GamepadAxis::LeftX.pseudo_button(100, 4915), None);
        assert_eq!(GamepadAxis::LeftX.pseudo_button(-4915, 4915), None);
        assert_eq!(GamepadAxis::LeftX.pseudo_button(4915, 4915), None);
    }

    #[test]
    fn test_stick_sign_picks_direction() {
        assert_eq!(
            GamepadAxis::LeftX.pseudo_button(-20000, 4915),
            Some(GamepadButton::LeftStickLeft)
        );
        assert_eq!(
            GamepadAxis::LeftX.pseudo_button(20000, 4915),
            Some(GamepadButton::LeftStickRight)
        );
        assert_eq!(
            GamepadAxis::RightY.pseudo_button(i16::MIN, 4915),
            Some(GamepadButton::RightStickUp)
        );
        assert_eq!(
            GamepadAxis::RightY.pseudo_button(i16::MAX, 4915),
            Some(GamepadButton::RightStickDown)
        );
    }

    #[test]
    fn test_trigger_ignores_sign() {
        assert_eq!(
            GamepadAxis::TriggerLeft.pseudo_button(-30000, 4915),
            Some(GamepadButton::LeftTrigger)
        );
        assert_eq!(
            GamepadAxis::TriggerRight.pseudo_button(30000, 4915),
            Some(GamepadButton::RightTrigger)
        );
    }

    #[test]
    fn test_button_set() {
        let mut set = GamepadButtons::NONE;
        set.insert(GamepadButton::Start);
        set.insert(GamepadButton::LeftTrigger);
        assert!(set.contains(GamepadButton::Start));
        assert!(set.contains(GamepadButton::LeftTrigger));
        assert!(!set.contains(GamepadButton::A));
        assert_eq!(set.bits().count_ones(), 2);
    }

    #[test]
    fn test_default_target_is_first() {
        assert_eq!(GamepadTarget::default(), GamepadTarget::First);
    }
}
