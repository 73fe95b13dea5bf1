// Mouse buttons, scroll pseudo-buttons and wheel events

use glam::IVec2;

/// Represents a mouse button, including the four scroll directions
/// which are reported like buttons for the frame the wheel moved in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MouseButton {
    Left = 1,
    Middle = 2,
    Right = 3,
    X1 = 4,
    X2 = 5,
    ScrollLeft = 6,
    ScrollRight = 7,
    ScrollUp = 8,
    ScrollDown = 9,
}

impl MouseButton {
    /// Bit for this button inside a `MouseButtons` set
    pub fn mask(self) -> u32 {
        1 << (self as u32 - 1)
    }
}

/// Bitset of mouse buttons that are down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MouseButtons(u32);

impl MouseButtons {
    /// No buttons down
    pub const NONE: MouseButtons = MouseButtons(0);

    /// Check if a button is in the set
    pub fn contains(self, button: MouseButton) -> bool {
        self.0 & button.mask() == button.mask()
    }

    /// Add a button to the set
    pub fn insert(&mut self, button: MouseButton) {
        self.0 |= button.mask();
    }

    /// Remove a button from the set
    pub fn remove(&mut self, button: MouseButton) {
        self.0 &= !button.mask();
    }

    /// Copy of the set with the scroll pseudo-buttons for `wheel` added
    pub fn with_scroll(mut self, wheel: IVec2) -> Self {
        if wheel.x < 0 {
            self.insert(MouseButton::ScrollLeft);
        } else if wheel.x > 0 {
            self.insert(MouseButton::ScrollRight);
        }

        if wheel.y < 0 {
            self.insert(MouseButton::ScrollDown);
        } else if wheel.y > 0 {
            self.insert(MouseButton::ScrollUp);
        }

        self
    }
}

/// Whether the platform reports the wheel inverted ("natural" scrolling)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WheelDirection {
    #[default]
    Normal,
    Flipped,
}

/// A single wheel movement. Positive y scrolls up, positive x scrolls right.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WheelEvent {
    pub x: i32,
    pub y: i32,
    pub direction: WheelDirection,
}

impl WheelEvent {
    /// Create a wheel event with the normal direction
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            direction: WheelDirection::Normal,
        }
    }

    /// Mark this event as coming from an inverted wheel
    pub fn flipped(mut self) -> Self {
        self.direction = WheelDirection::Flipped;
        self
    }

    /// Delta this event contributes to the accumulator.
    /// Only one axis is taken per event; horizontal wins when both are set.
    pub fn delta(&self) -> IVec2 {
        let sign = match self.direction {
            WheelDirection::Normal => 1,
            WheelDirection::Flipped => -1,
        };

        if self.x != 0 {
            IVec2::new(self.x.saturating_mul(sign), 0)
        } else {
            IVec2::new(0, self.y.saturating_mul(sign))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_masks_are_distinct() {
        let buttons = [
            MouseButton::Left,
            MouseButton::Middle,
            MouseButton::Right,
            MouseButton::X1,
            MouseButton::X2,
            MouseButton::ScrollLeft,
            MouseButton::ScrollRight,
            MouseButton::ScrollUp,
            MouseButton::ScrollDown,
        ];
        let combined = buttons.iter().fold(0, |acc, b| acc | b.mask());
        assert_eq!(combined.count_ones() as usize, buttons.len());
        assert_eq!(MouseButton::Left.mask(), 1);
    }

    #[test]
    fn test_insert_remove_contains() {
        let mut set = MouseButtons::NONE;
        set.insert(MouseButton::Right);
        assert!(set.contains(MouseButton::Right));
        assert!(!set.contains(MouseButton::Left));

        set.remove(MouseButton::Right);
        assert_eq!(set, MouseButtons::NONE);
    }

    #[test]
    fn test_with_scroll_sets_direction_bits() {
        let set = MouseButtons::NONE.with_scroll(IVec2::new(-1, 3));
        assert!(set.contains(MouseButton::ScrollLeft));
        assert!(set.contains(MouseButton::ScrollUp));
        assert!(!set.contains(MouseButton::ScrollRight));
        assert!(!set.contains(MouseButton::ScrollDown));

        let set = MouseButtons::NONE.with_scroll(IVec2::ZERO);
        assert_eq!(set, MouseButtons::NONE);
    }

    #[test]
    fn test_wheel_delta_takes_one_axis() {
        assert_eq!(WheelEvent::new(2, 5).delta(), IVec2::new(2, 0));
        assert_eq!(WheelEvent::new(0, 5).delta(), IVec2::new(0, 5));
    }

    #[test]
    fn test_flipped_wheel_negates() {
        assert_eq!(WheelEvent::new(0, 3).flipped().delta(), IVec2::new(0, -3));
        assert_eq!(WheelEvent::new(-1, 0).flipped().delta(), IVec2::new(1, 0));
    }

    #[test]
    fn test_flipped_extreme_delta_saturates() {
        assert_eq!(
            WheelEvent::new(0, i32::MIN).flipped().delta(),
            IVec2::new(0, i32::MAX)
        );
        assert_eq!(
            WheelEvent::new(i32::MIN, 0).flipped().delta(),
            IVec2::new(i32::MAX, 0)
        );
    }
}
