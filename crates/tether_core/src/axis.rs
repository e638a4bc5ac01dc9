//! Joystick axis identifiers
//!
//! Discriminants are the platform axis codes reported in device motion ranges.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum AxisId {
    X = 0,
    Y = 1,
    Z = 11,
    Rx = 12,
    Ry = 13,
    Rz = 14,
    LeftTrigger = 17,
    RightTrigger = 18,
    Gas = 22,
    Brake = 23,
}

/// Axes the pipeline tracks, in ascending code order
pub const SUPPORTED_AXES: [AxisId; 10] = [
    AxisId::X,
    AxisId::Y,
    AxisId::Z,
    AxisId::Rx,
    AxisId::Ry,
    AxisId::Rz,
    AxisId::LeftTrigger,
    AxisId::RightTrigger,
    AxisId::Gas,
    AxisId::Brake,
];

impl AxisId {
    /// Look up a supported axis by its platform code
    ///
    /// Codes outside the allowlist yield `None`.
    pub fn from_code(code: u32) -> Option<Self> {
        SUPPORTED_AXES.iter().copied().find(|axis| axis.code() == code)
    }

    pub const fn code(self) -> u32 {
        self as u32
    }

    /// Vertical axes are reported to the engine with their sign flipped
    pub const fn is_inverted(self) -> bool {
        matches!(self, Self::Y | Self::Ry | Self::Rz)
    }

    /// Apply the fixed sign policy to a raw platform value
    pub fn engine_value(self, raw: f32) -> f32 {
        if self.is_inverted() {
            -raw
        } else {
            raw
        }
    }

    /// Trigger-class axes; a device exposes either the trigger or the brake/gas pair
    pub const fn is_trigger(self) -> bool {
        matches!(self, Self::LeftTrigger | Self::Brake)
    }
}
