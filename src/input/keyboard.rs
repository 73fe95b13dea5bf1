// Keyboard scancodes and keyboard snapshots

/// Size of the scancode space
pub const KEY_COUNT: usize = 512;

/// A physical key position, numbered by USB HID usage id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Scancode(pub u16);

impl Scancode {
    pub const A: Scancode = Scancode(4);
    pub const B: Scancode = Scancode(5);
    pub const C: Scancode = Scancode(6);
    pub const D: Scancode = Scancode(7);
    pub const E: Scancode = Scancode(8);
    pub const F: Scancode = Scancode(9);
    pub const G: Scancode = Scancode(10);
    pub const H: Scancode = Scancode(11);
    pub const I: Scancode = Scancode(12);
    pub const J: Scancode = Scancode(13);
    pub const K: Scancode = Scancode(14);
    pub const L: Scancode = Scancode(15);
    pub const M: Scancode = Scancode(16);
    pub const N: Scancode = Scancode(17);
    pub const O: Scancode = Scancode(18);
    pub const P: Scancode = Scancode(19);
    pub const Q: Scancode = Scancode(20);
    pub const R: Scancode = Scancode(21);
    pub const S: Scancode = Scancode(22);
    pub const T: Scancode = Scancode(23);
    pub const U: Scancode = Scancode(24);
    pub const V: Scancode = Scancode(25);
    pub const W: Scancode = Scancode(26);
    pub const X: Scancode = Scancode(27);
    pub const Y: Scancode = Scancode(28);
    pub const Z: Scancode = Scancode(29);

    pub const NUM_1: Scancode = Scancode(30);
    pub const NUM_2: Scancode = Scancode(31);
    pub const NUM_3: Scancode = Scancode(32);
    pub const NUM_4: Scancode = Scancode(33);
    pub const NUM_5: Scancode = Scancode(34);
    pub const NUM_6: Scancode = Scancode(35);
    pub const NUM_7: Scancode = Scancode(36);
    pub const NUM_8: Scancode = Scancode(37);
    pub const NUM_9: Scancode = Scancode(38);
    pub const NUM_0: Scancode = Scancode(39);

    pub const RETURN: Scancode = Scancode(40);
    pub const ESCAPE: Scancode = Scancode(41);
    pub const BACKSPACE: Scancode = Scancode(42);
    pub const TAB: Scancode = Scancode(43);
    pub const SPACE: Scancode = Scancode(44);
    pub const MINUS: Scancode = Scancode(45);
    pub const EQUALS: Scancode = Scancode(46);
    pub const LEFT_BRACKET: Scancode = Scancode(47);
    pub const RIGHT_BRACKET: Scancode = Scancode(48);
    pub const BACKSLASH: Scancode = Scancode(49);
    pub const SEMICOLON: Scancode = Scancode(51);
    pub const APOSTROPHE: Scancode = Scancode(52);
    pub const GRAVE: Scancode = Scancode(53);
    pub const COMMA: Scancode = Scancode(54);
    pub const PERIOD: Scancode = Scancode(55);
    pub const SLASH: Scancode = Scancode(56);
    pub const CAPS_LOCK: Scancode = Scancode(57);

    pub const F1: Scancode = Scancode(58);
    pub const F2: Scancode = Scancode(59);
    pub const F3: Scancode = Scancode(60);
    pub const F4: Scancode = Scancode(61);
    pub const F5: Scancode = Scancode(62);
    pub const F6: Scancode = Scancode(63);
    pub const F7: Scancode = Scancode(64);
    pub const F8: Scancode = Scancode(65);
    pub const F9: Scancode = Scancode(66);
    pub const F10: Scancode = Scancode(67);
    pub const F11: Scancode = Scancode(68);
    pub const F12: Scancode = Scancode(69);

    pub const PRINT_SCREEN: Scancode = Scancode(70);
    pub const SCROLL_LOCK: Scancode = Scancode(71);
    pub const PAUSE: Scancode = Scancode(72);
    pub const INSERT: Scancode = Scancode(73);
    pub const HOME: Scancode = Scancode(74);
    pub const PAGE_UP: Scancode = Scancode(75);
    pub const DELETE: Scancode = Scancode(76);
    pub const END: Scancode = Scancode(77);
    pub const PAGE_DOWN: Scancode = Scancode(78);
    pub const RIGHT: Scancode = Scancode(79);
    pub const LEFT: Scancode = Scancode(80);
    pub const DOWN: Scancode = Scancode(81);
    pub const UP: Scancode = Scancode(82);
    pub const NUM_LOCK: Scancode = Scancode(83);

    pub const LEFT_CTRL: Scancode = Scancode(224);
    pub const LEFT_SHIFT: Scancode = Scancode(225);
    pub const LEFT_ALT: Scancode = Scancode(226);
    pub const LEFT_GUI: Scancode = Scancode(227);
    pub const RIGHT_CTRL: Scancode = Scancode(228);
    pub const RIGHT_SHIFT: Scancode = Scancode(229);
    pub const RIGHT_ALT: Scancode = Scancode(230);
    pub const RIGHT_GUI: Scancode = Scancode(231);

    /// Index into a keyboard snapshot
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Per-key down flags for the whole scancode space
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct KeyboardState {
    keys: [bool; KEY_COUNT],
}

impl KeyboardState {
    /// Create a snapshot with every key up
    pub fn new() -> Self {
        Self {
            keys: [false; KEY_COUNT],
        }
    }

    /// Check if a key is down. Scancodes outside the key space are never down.
    pub fn is_down(&self, key: Scancode) -> bool {
        self.keys.get(key.index()).copied().unwrap_or(false)
    }

    /// Set a key's state. Scancodes outside the key space are ignored.
    pub fn set(&mut self, key: Scancode, down: bool) {
        if let Some(slot) = self.keys.get_mut(key.index()) {
            *slot = down;
        }
    }

    /// Release every key
    pub fn clear(&mut self) {
        self.keys = [false; KEY_COUNT];
    }

    #[cfg(test)]
    pub(crate) fn down_count(&self) -> usize {
        self.keys.iter().filter(|down| **down).count()
    }
}

impl Default for KeyboardState {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for KeyboardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let down: Vec<usize> = (0..KEY_COUNT).filter(|i| self.keys[*i]).collect();
        f.debug_struct("KeyboardState").field("down", &down).finish()
    }
}
