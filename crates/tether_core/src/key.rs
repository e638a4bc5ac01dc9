//! Hardware key codes

use serde::{Deserialize, Serialize};

/// Platform key code
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const UNKNOWN: KeyCode = KeyCode(0);
    pub const BACK: KeyCode = KeyCode(4);
    pub const DPAD_UP: KeyCode = KeyCode(19);
    pub const DPAD_DOWN: KeyCode = KeyCode(20);
    pub const DPAD_LEFT: KeyCode = KeyCode(21);
    pub const DPAD_RIGHT: KeyCode = KeyCode(22);
    pub const VOLUME_UP: KeyCode = KeyCode(24);
    pub const VOLUME_DOWN: KeyCode = KeyCode(25);
    pub const A: KeyCode = KeyCode(29);
    pub const SPACE: KeyCode = KeyCode(62);
    pub const ENTER: KeyCode = KeyCode(66);
    pub const MENU: KeyCode = KeyCode(82);

    // Gamepad buttons
    pub const BUTTON_A: KeyCode = KeyCode(96);
    pub const BUTTON_B: KeyCode = KeyCode(97);
    pub const BUTTON_X: KeyCode = KeyCode(99);
    pub const BUTTON_Y: KeyCode = KeyCode(100);
    pub const BUTTON_L1: KeyCode = KeyCode(102);
    pub const BUTTON_R1: KeyCode = KeyCode(103);
    pub const BUTTON_START: KeyCode = KeyCode(108);
    pub const BUTTON_SELECT: KeyCode = KeyCode(109);
    pub const BUTTON_MODE: KeyCode = KeyCode(110);
    pub const BUTTON_1: KeyCode = KeyCode(188);
    pub const BUTTON_16: KeyCode = KeyCode(203);

    /// Highest key code the platform defines
    pub const MAX: KeyCode = KeyCode(288);

    pub const fn code(self) -> u32 {
        self.0
    }

    /// Whether the code belongs to a gamepad button rather than a keyboard key
    pub const fn is_gamepad_button(self) -> bool {
        let code = self.0;
        (code >= Self::BUTTON_A.0 && code <= Self::BUTTON_MODE.0)
            || (code >= Self::BUTTON_1.0 && code <= Self::BUTTON_16.0)
    }
}

/// Direction of a key transition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Down,
    Up,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gamepad_button_ranges() {
        assert!(KeyCode::BUTTON_A.is_gamepad_button());
        assert!(KeyCode::BUTTON_MODE.is_gamepad_button());
        assert!(KeyCode(190).is_gamepad_button());
        assert!(!KeyCode::A.is_gamepad_button());
        assert!(!KeyCode::BACK.is_gamepad_button());
        assert!(!KeyCode(111).is_gamepad_button());
        assert!(!KeyCode(204).is_gamepad_button());
    }
}
