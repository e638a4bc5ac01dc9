//! Motion actions and input source classes
//!
//! Numeric values follow the Android `MotionEvent` / `InputDevice` constants,
//! which is also what JNI hosts hand over as raw integers.

use serde::{Deserialize, Serialize};

/// Masked motion action
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum MotionAction {
    Down = 0,
    Up = 1,
    Move = 2,
    Cancel = 3,
    Outside = 4,
    PointerDown = 5,
    PointerUp = 6,
    HoverMove = 7,
    Scroll = 8,
    HoverEnter = 9,
    HoverExit = 10,
}

const ACTION_MASK: i32 = 0xff;
const ACTION_POINTER_INDEX_MASK: i32 = 0xff00;
const ACTION_POINTER_INDEX_SHIFT: i32 = 8;

impl MotionAction {
    /// Parse an already-masked action code
    pub fn from_masked(code: i32) -> Option<Self> {
        Some(match code {
            0 => Self::Down,
            1 => Self::Up,
            2 => Self::Move,
            3 => Self::Cancel,
            4 => Self::Outside,
            5 => Self::PointerDown,
            6 => Self::PointerUp,
            7 => Self::HoverMove,
            8 => Self::Scroll,
            9 => Self::HoverEnter,
            10 => Self::HoverExit,
            _ => return None,
        })
    }

    /// Split a raw action word into the action and its pointer index
    ///
    /// `ACTION_POINTER_2_UP` (0x106) becomes `(PointerUp, 1)`.
    pub fn from_raw(raw: i32) -> Option<(Self, usize)> {
        let action = Self::from_masked(raw & ACTION_MASK)?;
        let index = ((raw & ACTION_POINTER_INDEX_MASK) >> ACTION_POINTER_INDEX_SHIFT) as usize;
        Some((action, index))
    }

    /// Numeric code handed to the engine sink
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Whether this action ends the sequence of the pointer it designates
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Up | Self::PointerUp | Self::Cancel)
    }

    pub const fn is_up(self) -> bool {
        matches!(self, Self::Up | Self::PointerUp)
    }

    pub const fn is_down(self) -> bool {
        matches!(self, Self::Down | Self::PointerDown)
    }
}

/// Bit mask of input source classes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceMask(pub u32);

impl SourceMask {
    pub const NONE: SourceMask = SourceMask(0);

    pub const CLASS_BUTTON: u32 = 0x0000_0001;
    pub const CLASS_POINTER: u32 = 0x0000_0002;
    pub const CLASS_TRACKBALL: u32 = 0x0000_0004;
    pub const CLASS_POSITION: u32 = 0x0000_0008;
    pub const CLASS_JOYSTICK: u32 = 0x0000_0010;

    pub const KEYBOARD: SourceMask = SourceMask(0x0000_0100 | Self::CLASS_BUTTON);
    pub const GAMEPAD: SourceMask = SourceMask(0x0000_0400 | Self::CLASS_BUTTON);
    pub const TOUCHSCREEN: SourceMask = SourceMask(0x0000_1000 | Self::CLASS_POINTER);
    pub const MOUSE: SourceMask = SourceMask(0x0000_2000 | Self::CLASS_POINTER);
    pub const JOYSTICK: SourceMask = SourceMask(0x0100_0000 | Self::CLASS_JOYSTICK);

    /// Bare joystick class, used for controller-peripheral samples
    pub const JOYSTICK_CLASS: SourceMask = SourceMask(Self::CLASS_JOYSTICK);

    pub const fn from_raw(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_pointer(self) -> bool {
        self.0 & Self::CLASS_POINTER != 0
    }

    pub const fn is_joystick(self) -> bool {
        self.0 & Self::CLASS_JOYSTICK != 0
    }

    pub const fn union(self, other: SourceMask) -> Self {
        Self(self.0 | other.0)
    }
}

/// What the host should do with an input callback after the bridge saw it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputStatus {
    /// The bridge consumed the event
    Handled,
    /// Fall through to the host's default handling
    Unhandled,
}
