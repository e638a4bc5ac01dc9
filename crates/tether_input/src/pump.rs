//! Render-thread side of the bridge
//!
//! [`InputContext`] owns every mutable table of the pipeline; queued tasks
//! mutate it and talk to the sink. [`EventPump`] is what the render loop
//! holds: one [`EventPump::drain`] per frame.

use tether_core::{
    DeviceId, DeviceSnapshot, GamepadElement, InputBatch, InputTarget, KeyCode, PointerInput,
};

use crate::dispatch::{DispatchQueue, DrainReport};
use crate::inventory::{GamepadAxisInventory, SharedAxisSet};
use crate::keys::KeyStateTracker;
use crate::pointer::PointerIdTable;
use crate::sink::EventSink;

pub struct InputContext {
    pointers: PointerIdTable,
    keys: KeyStateTracker,
    inventory: GamepadAxisInventory,
    published_axes: SharedAxisSet,
    sink: Box<dyn EventSink>,
    /// Paused: axes stay flushed, only gamepad identity is tracked
    suspended: bool,
}

impl InputContext {
    pub(crate) fn new(sink: Box<dyn EventSink>, key_table_size: usize, published_axes: SharedAxisSet) -> Self {
        Self {
            pointers: PointerIdTable::new(),
            keys: KeyStateTracker::new(key_table_size),
            inventory: GamepadAxisInventory::new(),
            published_axes,
            sink,
            suspended: false,
        }
    }

    pub fn pointers(&self) -> &PointerIdTable {
        &self.pointers
    }

    pub fn keys(&self) -> &KeyStateTracker {
        &self.keys
    }

    pub fn inventory(&self) -> &GamepadAxisInventory {
        &self.inventory
    }

    pub fn sink_mut(&mut self) -> &mut dyn EventSink {
        self.sink.as_mut()
    }

    /// Deliver a decomposed batch to the sink
    ///
    /// Pointer ids are remapped here, at consumption time. A terminal batch
    /// releases its pointer only after all of its events went out, so the
    /// stable id cannot be reissued while events that carry it are in flight.
    pub fn dispatch_batch(&mut self, batch: &InputBatch) {
        let mut ended = None;

        for event in batch.iter() {
            match event.target {
                InputTarget::Axis(axis) => {
                    self.sink
                        .on_gamepad_element(GamepadElement::Axis(axis), axis.engine_value(event.x));
                }
                InputTarget::Pointer(raw) => {
                    let id = self.pointers.resolve(raw);
                    self.sink.on_input(PointerInput {
                        action: batch.action,
                        id,
                        x: event.x,
                        y: event.y,
                        timestamp_nanos: event.timestamp_nanos,
                        source: event.source,
                        tap_count: event.tap_count,
                    });
                    if batch.action.is_terminal() {
                        ended = Some(raw);
                    }
                }
            }
        }

        if let Some(raw) = ended {
            self.pointers.release(raw);
        }
    }

    pub fn key_down(&mut self, key: KeyCode) {
        if !self.keys.on_down(key) {
            tracing::trace!("suppressed repeated down for key {}", key.code());
            return;
        }
        if key.is_gamepad_button() {
            self.sink.on_gamepad_element(GamepadElement::Button(key), 1.0);
        } else {
            self.sink.on_key_down(key);
        }
    }

    pub fn key_up(&mut self, key: KeyCode) {
        self.keys.on_up(key);
        if key.is_gamepad_button() {
            self.sink.on_gamepad_element(GamepadElement::Button(key), 0.0);
        } else {
            self.sink.on_key_up(key);
        }
    }

    /// Recompute the inventory and announce both capabilities
    pub fn rebuild_inventory(&mut self, devices: &[DeviceSnapshot]) {
        let report = self.inventory.rebuild(devices);
        *self.published_axes.write() = report.axes.clone();
        let (present, triggers) = (report.gamepad_present, report.has_trigger_axes);
        self.sink.on_gamepad_available(present);
        self.sink.on_gamepad_triggers_available(triggers);
    }

    /// Announce every gamepad attached when the surface comes up
    pub fn attach_devices(&mut self, devices: &[DeviceSnapshot]) {
        self.rebuild_inventory(devices);
        let gamepads = self.inventory.report().gamepads.clone();
        for device in gamepads {
            tracing::info!("gamepad connected: {:?}", device);
            self.sink.on_gamepad_connected(device);
        }
    }

    fn refresh_inventory(&mut self, devices: &[DeviceSnapshot]) {
        if self.suspended {
            self.inventory.track(devices);
        } else {
            self.rebuild_inventory(devices);
        }
    }

    pub fn device_added(&mut self, device: DeviceId, devices: &[DeviceSnapshot]) {
        self.refresh_inventory(devices);
        if self.inventory.is_gamepad(device) {
            tracing::info!("gamepad connected: {:?}", device);
            self.sink.on_gamepad_connected(device);
        }
    }

    pub fn device_changed(&mut self, device: DeviceId, devices: &[DeviceSnapshot]) {
        tracing::debug!("input device changed: {:?}", device);
        self.refresh_inventory(devices);
    }

    pub fn device_removed(&mut self, device: DeviceId, devices: &[DeviceSnapshot]) {
        let was_gamepad = self.inventory.is_gamepad(device);
        self.refresh_inventory(devices);
        if was_gamepad {
            tracing::info!("gamepad disconnected: {:?}", device);
            self.sink.on_gamepad_disconnected(device);
        }
    }

    /// Drop the axes without announcing; known gamepads are kept
    pub fn clear_inventory(&mut self) {
        self.inventory.clear();
        *self.published_axes.write() = Default::default();
    }

    /// Enter the paused state: axes flushed until [`InputContext::resume`]
    pub fn suspend(&mut self) {
        self.suspended = true;
        self.clear_inventory();
    }

    /// Leave the paused state and announce the current inventory
    pub fn resume(&mut self, devices: &[DeviceSnapshot]) {
        self.suspended = false;
        self.rebuild_inventory(devices);
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Return every table to its freshly created state
    pub fn reset(&mut self) {
        self.pointers.clear();
        self.keys.clear();
        self.clear_inventory();
        self.inventory.forget();
        self.suspended = false;
    }
}

/// Render-thread consumer of the dispatch queue
pub struct EventPump {
    queue: DispatchQueue<InputContext>,
    context: InputContext,
}

impl EventPump {
    pub(crate) fn new(queue: DispatchQueue<InputContext>, context: InputContext) -> Self {
        Self { queue, context }
    }

    /// Execute everything queued so far; call once per frame
    pub fn drain(&mut self) -> DrainReport {
        let report = self.queue.drain(&mut self.context);
        if report.failed > 0 {
            tracing::warn!("{} of {} input tasks failed", report.failed, report.executed);
        }
        report
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn context(&self) -> &InputContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut InputContext {
        &mut self.context
    }
}
