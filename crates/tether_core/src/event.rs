//! Atomic input events and the batches that carry them across the thread hop

use smallvec::SmallVec;

use crate::axis::AxisId;
use crate::key::KeyCode;
use crate::source::{MotionAction, SourceMask};

/// Pointer id as issued by the platform; may be reused or shuffled mid-gesture
pub type RawPointerId = i32;

/// Small identifier handed to the engine, stable for one touch sequence
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StableId(pub u32);

impl StableId {
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Platform input device identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeviceId(pub i32);

/// What an atomic event refers to
///
/// Pointer targets still carry the raw platform id; the render thread remaps
/// them to a [`StableId`] when the batch is consumed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputTarget {
    Pointer(RawPointerId),
    Axis(AxisId),
}

/// One sample of one pointer or one axis
///
/// For axis events `x` holds the raw axis value and `y` is zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AtomicInputEvent {
    pub target: InputTarget,
    pub x: f32,
    pub y: f32,
    pub timestamp_nanos: i64,
    pub source: SourceMask,
    pub tap_count: u8,
}

impl AtomicInputEvent {
    pub fn touch(
        pointer: RawPointerId,
        x: f32,
        y: f32,
        timestamp_nanos: i64,
        source: SourceMask,
        tap_count: u8,
    ) -> Self {
        Self {
            target: InputTarget::Pointer(pointer),
            x,
            y,
            timestamp_nanos,
            source,
            tap_count,
        }
    }

    pub fn axis(axis: AxisId, value: f32, timestamp_nanos: i64, source: SourceMask, tap_count: u8) -> Self {
        Self {
            target: InputTarget::Axis(axis),
            x: value,
            y: 0.0,
            timestamp_nanos,
            source,
            tap_count,
        }
    }

    pub fn is_axis(&self) -> bool {
        matches!(self.target, InputTarget::Axis(_))
    }
}

/// Ordered output of one decomposition, consumed as a unit on the render thread
#[derive(Clone, Debug, PartialEq)]
pub struct InputBatch {
    pub action: MotionAction,
    pub events: SmallVec<[AtomicInputEvent; 4]>,
}

impl InputBatch {
    pub fn new(action: MotionAction) -> Self {
        Self {
            action,
            events: SmallVec::new(),
        }
    }

    pub fn push(&mut self, event: AtomicInputEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AtomicInputEvent> {
        self.events.iter()
    }
}

/// Positional input as delivered to the engine sink
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerInput {
    pub action: MotionAction,
    pub id: StableId,
    pub x: f32,
    pub y: f32,
    pub timestamp_nanos: i64,
    pub source: SourceMask,
    pub tap_count: u8,
}

/// A gamepad control reported through the element channel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GamepadElement {
    Axis(AxisId),
    Button(KeyCode),
}

impl GamepadElement {
    /// Numeric element id the engine keys its gamepad state by
    pub const fn code(self) -> u32 {
        match self {
            Self::Axis(axis) => axis.code(),
            Self::Button(key) => key.code(),
        }
    }
}

/// Read-only description of an attached input device
#[derive(Clone, Debug, PartialEq)]
pub struct DeviceSnapshot {
    pub id: DeviceId,
    pub sources: SourceMask,
    /// Platform axis codes of every motion range the device reports
    pub motion_axes: SmallVec<[u32; 8]>,
}

impl DeviceSnapshot {
    pub fn new(id: DeviceId, sources: SourceMask, motion_axes: impl IntoIterator<Item = u32>) -> Self {
        Self {
            id,
            sources,
            motion_axes: motion_axes.into_iter().collect(),
        }
    }

    pub fn is_joystick(&self) -> bool {
        self.sources.is_joystick()
    }
}
