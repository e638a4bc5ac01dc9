//! Gamepad axis inventory
//!
//! Tracks which joystick-class devices are attached and the union of the
//! supported axes they expose. Every topology change rebuilds the inventory
//! from a full device snapshot, so nothing survives a device removal.

use std::sync::Arc;

use parking_lot::RwLock;
use smallvec::SmallVec;
use tether_core::{AxisId, DeviceId, DeviceSnapshot};

/// Set of tracked axes, kept in ascending axis-code order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GamepadAxisSet {
    axes: SmallVec<[AxisId; 10]>,
}

impl GamepadAxisSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_axes(axes: impl IntoIterator<Item = AxisId>) -> Self {
        let mut set = Self::new();
        for axis in axes {
            set.insert(axis);
        }
        set
    }

    pub fn insert(&mut self, axis: AxisId) {
        if let Err(pos) = self.axes.binary_search(&axis) {
            self.axes.insert(pos, axis);
        }
    }

    pub fn contains(&self, axis: AxisId) -> bool {
        self.axes.binary_search(&axis).is_ok()
    }

    pub fn as_slice(&self) -> &[AxisId] {
        &self.axes
    }

    pub fn iter(&self) -> impl Iterator<Item = AxisId> + '_ {
        self.axes.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.axes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    /// Devices expose either a left trigger or a brake axis
    pub fn has_trigger_axes(&self) -> bool {
        self.iter().any(AxisId::is_trigger)
    }
}

/// Axis set shared read-only with the UI thread for decomposition
pub type SharedAxisSet = Arc<RwLock<GamepadAxisSet>>;

/// Result of one inventory rebuild
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AxisReport {
    pub gamepad_present: bool,
    pub axes: GamepadAxisSet,
    pub has_trigger_axes: bool,
    /// Joystick-class devices seen, in snapshot order
    pub gamepads: SmallVec<[DeviceId; 2]>,
}

/// Compute presence, axes and trigger capability from scratch
pub fn recompute(devices: &[DeviceSnapshot]) -> AxisReport {
    let mut report = AxisReport::default();
    for device in devices.iter().filter(|d| d.is_joystick()) {
        report.gamepad_present = true;
        report.gamepads.push(device.id);
        for axis in device.motion_axes.iter().copied().filter_map(AxisId::from_code) {
            report.axes.insert(axis);
        }
    }
    report.has_trigger_axes = report.axes.has_trigger_axes();
    report
}

/// Render-thread owner of the current axis report
///
/// The set of known gamepads outlives [`GamepadAxisInventory::clear`], so a
/// device unplugged while the axes are flushed is still recognized.
#[derive(Debug, Default)]
pub struct GamepadAxisInventory {
    report: AxisReport,
    known: SmallVec<[DeviceId; 2]>,
}

impl GamepadAxisInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the inventory with a fresh computation over `devices`
    pub fn rebuild(&mut self, devices: &[DeviceSnapshot]) -> &AxisReport {
        self.report = recompute(devices);
        self.known = self.report.gamepads.clone();
        tracing::debug!(
            "gamepad inventory: present={} axes={:?} triggers={}",
            self.report.gamepad_present,
            self.report.axes.as_slice(),
            self.report.has_trigger_axes
        );
        &self.report
    }

    pub fn report(&self) -> &AxisReport {
        &self.report
    }

    pub fn axes(&self) -> &GamepadAxisSet {
        &self.report.axes
    }

    pub fn gamepad_present(&self) -> bool {
        self.report.gamepad_present
    }

    pub fn has_trigger_axes(&self) -> bool {
        self.report.has_trigger_axes
    }

    /// Refresh the known gamepads only; the axis report stays as it is
    pub fn track(&mut self, devices: &[DeviceSnapshot]) {
        self.known = recompute(devices).gamepads;
    }

    /// Whether `device` was joystick-class as of the last rebuild or track
    pub fn is_gamepad(&self, device: DeviceId) -> bool {
        self.known.contains(&device)
    }

    /// Flush axes and presence; known gamepads are kept
    pub fn clear(&mut self) {
        self.report = AxisReport::default();
    }

    /// Flush everything, known gamepads included
    pub fn forget(&mut self) {
        self.clear();
        self.known.clear();
    }
}
