//! Tether Core
//!
//! Shared vocabulary of the input bridge:
//!
//! - **Sources**: masked motion actions and input source classes
//! - **Axes and keys**: tracked joystick axes with their sign policy, key codes
//! - **Events**: atomic input events, batches and device snapshots
//! - **Capabilities**: the [`MotionSource`] and [`ControllerSource`] traits
//!   platform adapters implement

pub mod axis;
pub mod error;
pub mod event;
pub mod key;
pub mod motion;
pub mod source;

pub use axis::{AxisId, SUPPORTED_AXES};
pub use error::{BridgeError, Result};
pub use event::{
    AtomicInputEvent, DeviceId, DeviceSnapshot, GamepadElement, InputBatch, InputTarget,
    PointerInput, RawPointerId, StableId,
};
pub use key::{KeyAction, KeyCode};
pub use motion::{
    ControllerSample, ControllerSource, JoystickMotion, MotionSnapshot, MotionSource,
    PeripheralAxes, PointerCoords, PERIPHERAL_AXES,
};
pub use source::{InputStatus, MotionAction, SourceMask};
