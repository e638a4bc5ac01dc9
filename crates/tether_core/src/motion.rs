//! Motion capability interfaces
//!
//! Platform adapters expose their native motion events through [`MotionSource`]
//! and external game controllers through [`ControllerSource`]. The pipeline
//! never looks at a concrete platform type.

use smallvec::SmallVec;

use crate::axis::AxisId;
use crate::event::RawPointerId;
use crate::source::{MotionAction, SourceMask};

/// A batched platform motion notification
///
/// Index arguments are pointer indices in `0..pointer_count()`; history
/// indices are in `0..history_size()`, oldest first.
pub trait MotionSource {
    fn action(&self) -> MotionAction;
    /// Pointer index the action refers to (meaningful for non-move actions)
    fn action_index(&self) -> usize;
    fn source(&self) -> SourceMask;
    fn pointer_count(&self) -> usize;
    fn pointer_id(&self, index: usize) -> RawPointerId;
    fn history_size(&self) -> usize;

    fn x(&self, index: usize) -> f32;
    fn y(&self, index: usize) -> f32;
    fn historical_x(&self, index: usize, pos: usize) -> f32;
    fn historical_y(&self, index: usize, pos: usize) -> f32;

    fn axis_value(&self, axis: AxisId, index: usize) -> f32;
    fn historical_axis_value(&self, axis: AxisId, index: usize, pos: usize) -> f32;

    fn event_time_nanos(&self) -> i64;
    fn historical_event_time_nanos(&self, pos: usize) -> i64;
}

/// An external game-controller event source feeding the decomposer
///
/// Generic joysticks ([`JoystickMotion`]) and fixed-layout controller
/// peripherals ([`ControllerSample`]) both implement this.
pub trait ControllerSource {
    fn source(&self) -> SourceMask;
    /// Axes to emit, in emission order
    fn tracked_axes(&self) -> &[AxisId];
    /// Number of independent controls sampled (pointers, for joysticks)
    fn sample_count(&self) -> usize;
    fn history_size(&self) -> usize;
    fn axis_value(&self, axis: AxisId, index: usize) -> f32;
    fn historical_axis_value(&self, axis: AxisId, index: usize, pos: usize) -> f32;
    fn event_time_nanos(&self) -> i64;
    fn historical_event_time_nanos(&self, pos: usize) -> i64;
}

/// Coordinates of one pointer in one sample
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointerCoords {
    pub x: f32,
    pub y: f32,
    pub axes: SmallVec<[(AxisId, f32); 4]>,
}

impl PointerCoords {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            axes: SmallVec::new(),
        }
    }

    pub fn with_axis(mut self, axis: AxisId, value: f32) -> Self {
        match self.axes.iter_mut().find(|(a, _)| *a == axis) {
            Some(slot) => slot.1 = value,
            None => self.axes.push((axis, value)),
        }
        self
    }

    /// Axis lookup; X and Y alias the positional coordinates, absent axes read as zero
    pub fn axis(&self, axis: AxisId) -> f32 {
        match axis {
            AxisId::X => self.x,
            AxisId::Y => self.y,
            _ => self
                .axes
                .iter()
                .find(|(a, _)| *a == axis)
                .map(|(_, v)| *v)
                .unwrap_or(0.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct MotionSample {
    timestamp_nanos: i64,
    pointers: SmallVec<[PointerCoords; 2]>,
}

/// Owned copy of a platform motion event
///
/// Hosts copy recycled platform events into this before they leave the
/// callback; it is also the fixture the tests drive the pipeline with.
///
/// ```
/// use tether_core::motion::{MotionSnapshot, MotionSource, PointerCoords};
/// use tether_core::{MotionAction, SourceMask};
///
/// let event = MotionSnapshot::new(MotionAction::Move, SourceMask::TOUCHSCREEN)
///     .pointer(7)
///     .sample(100, [PointerCoords::new(1.0, 2.0)])
///     .sample(200, [PointerCoords::new(3.0, 4.0)]);
///
/// assert_eq!(event.history_size(), 1);
/// assert_eq!(event.x(0), 3.0);
/// assert_eq!(event.historical_x(0, 0), 1.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct MotionSnapshot {
    action: MotionAction,
    action_index: usize,
    source: SourceMask,
    pointer_ids: SmallVec<[RawPointerId; 2]>,
    /// History first, current sample last
    samples: Vec<MotionSample>,
}

impl MotionSnapshot {
    pub fn new(action: MotionAction, source: SourceMask) -> Self {
        Self {
            action,
            action_index: 0,
            source,
            pointer_ids: SmallVec::new(),
            samples: Vec::new(),
        }
    }

    pub fn with_action_index(mut self, index: usize) -> Self {
        self.action_index = index;
        self
    }

    /// Register the next pointer slot
    pub fn pointer(mut self, id: RawPointerId) -> Self {
        self.pointer_ids.push(id);
        self
    }

    /// Append a sample; the last sample appended is the current one
    pub fn sample(mut self, timestamp_nanos: i64, coords: impl IntoIterator<Item = PointerCoords>) -> Self {
        self.samples.push(MotionSample {
            timestamp_nanos,
            pointers: coords.into_iter().collect(),
        });
        self
    }

    fn current(&self) -> Option<&MotionSample> {
        self.samples.last()
    }

    fn historical(&self, pos: usize) -> Option<&MotionSample> {
        if pos < self.history_size() {
            self.samples.get(pos)
        } else {
            None
        }
    }

    fn coords(sample: Option<&MotionSample>, index: usize) -> Option<&PointerCoords> {
        sample.and_then(|s| s.pointers.get(index))
    }
}

impl MotionSource for MotionSnapshot {
    fn action(&self) -> MotionAction {
        self.action
    }

    fn action_index(&self) -> usize {
        self.action_index
    }

    fn source(&self) -> SourceMask {
        self.source
    }

    fn pointer_count(&self) -> usize {
        self.pointer_ids.len()
    }

    fn pointer_id(&self, index: usize) -> RawPointerId {
        self.pointer_ids.get(index).copied().unwrap_or_default()
    }

    fn history_size(&self) -> usize {
        self.samples.len().saturating_sub(1)
    }

    fn x(&self, index: usize) -> f32 {
        Self::coords(self.current(), index).map_or(0.0, |c| c.x)
    }

    fn y(&self, index: usize) -> f32 {
        Self::coords(self.current(), index).map_or(0.0, |c| c.y)
    }

    fn historical_x(&self, index: usize, pos: usize) -> f32 {
        Self::coords(self.historical(pos), index).map_or(0.0, |c| c.x)
    }

    fn historical_y(&self, index: usize, pos: usize) -> f32 {
        Self::coords(self.historical(pos), index).map_or(0.0, |c| c.y)
    }

    fn axis_value(&self, axis: AxisId, index: usize) -> f32 {
        Self::coords(self.current(), index).map_or(0.0, |c| c.axis(axis))
    }

    fn historical_axis_value(&self, axis: AxisId, index: usize, pos: usize) -> f32 {
        Self::coords(self.historical(pos), index).map_or(0.0, |c| c.axis(axis))
    }

    fn event_time_nanos(&self) -> i64 {
        self.current().map_or(0, |s| s.timestamp_nanos)
    }

    fn historical_event_time_nanos(&self, pos: usize) -> i64 {
        self.historical(pos).map_or(0, |s| s.timestamp_nanos)
    }
}

/// A joystick-class motion event viewed through the inventory's axis set
pub struct JoystickMotion<'a, M: MotionSource + ?Sized> {
    motion: &'a M,
    axes: &'a [AxisId],
}

impl<'a, M: MotionSource + ?Sized> JoystickMotion<'a, M> {
    pub fn new(motion: &'a M, axes: &'a [AxisId]) -> Self {
        Self { motion, axes }
    }
}

impl<M: MotionSource + ?Sized> ControllerSource for JoystickMotion<'_, M> {
    fn source(&self) -> SourceMask {
        self.motion.source()
    }

    fn tracked_axes(&self) -> &[AxisId] {
        self.axes
    }

    fn sample_count(&self) -> usize {
        self.motion.pointer_count()
    }

    fn history_size(&self) -> usize {
        self.motion.history_size()
    }

    fn axis_value(&self, axis: AxisId, index: usize) -> f32 {
        self.motion.axis_value(axis, index)
    }

    fn historical_axis_value(&self, axis: AxisId, index: usize, pos: usize) -> f32 {
        self.motion.historical_axis_value(axis, index, pos)
    }

    fn event_time_nanos(&self) -> i64 {
        self.motion.event_time_nanos()
    }

    fn historical_event_time_nanos(&self, pos: usize) -> i64 {
        self.motion.historical_event_time_nanos(pos)
    }
}

/// Axes a controller peripheral reports, in emission order
pub const PERIPHERAL_AXES: [AxisId; 6] = [
    AxisId::X,
    AxisId::Y,
    AxisId::Z,
    AxisId::Rz,
    AxisId::LeftTrigger,
    AxisId::RightTrigger,
];

/// Stick and trigger readings of one peripheral control
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PeripheralAxes {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub rz: f32,
    pub left_trigger: f32,
    pub right_trigger: f32,
}

/// Motion sample from an auxiliary controller peripheral
///
/// Peripherals never batch history and always report the fixed
/// [`PERIPHERAL_AXES`] layout.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ControllerSample {
    pub timestamp_nanos: i64,
    pub controls: SmallVec<[PeripheralAxes; 1]>,
}

impl ControllerSample {
    pub fn new(timestamp_nanos: i64, controls: impl IntoIterator<Item = PeripheralAxes>) -> Self {
        Self {
            timestamp_nanos,
            controls: controls.into_iter().collect(),
        }
    }
}

impl ControllerSource for ControllerSample {
    fn source(&self) -> SourceMask {
        SourceMask::JOYSTICK_CLASS
    }

    fn tracked_axes(&self) -> &[AxisId] {
        &PERIPHERAL_AXES
    }

    fn sample_count(&self) -> usize {
        self.controls.len()
    }

    fn history_size(&self) -> usize {
        0
    }

    fn axis_value(&self, axis: AxisId, index: usize) -> f32 {
        let Some(c) = self.controls.get(index) else {
            return 0.0;
        };
        match axis {
            AxisId::X => c.x,
            AxisId::Y => c.y,
            AxisId::Z => c.z,
            AxisId::Rz => c.rz,
            AxisId::LeftTrigger => c.left_trigger,
            AxisId::RightTrigger => c.right_trigger,
            _ => 0.0,
        }
    }

    fn historical_axis_value(&self, _axis: AxisId, _index: usize, _pos: usize) -> f32 {
        0.0
    }

    fn event_time_nanos(&self) -> i64 {
        self.timestamp_nanos
    }

    fn historical_event_time_nanos(&self, _pos: usize) -> i64 {
        self.timestamp_nanos
    }
}
