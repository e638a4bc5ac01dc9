//! UI-thread side of the bridge
//!
//! [`InputBridge`] receives platform callbacks, turns them into decomposed
//! batches or lifecycle tasks and queues them for the render thread. It never
//! touches the pointer, key or inventory tables itself; those belong to the
//! [`InputContext`] the [`EventPump`] drains into.

use std::sync::Arc;

use parking_lot::RwLock;
use tether_core::{
    ControllerSource, DeviceId, DeviceSnapshot, InputBatch, InputStatus, KeyAction, KeyCode,
    MotionSource, Result,
};

use crate::config::BridgeConfig;
use crate::decompose::{decompose, decompose_controller};
use crate::dispatch::{DispatchQueue, Task};
use crate::gesture::{DoubleTapDetector, GestureDisambiguator};
use crate::inventory::{GamepadAxisSet, SharedAxisSet};
use crate::pump::{EventPump, InputContext};
use crate::sink::EventSink;

/// Enumerates the input devices currently attached
///
/// Injected by the host; the bridge calls it on the UI thread whenever the
/// device topology may have changed and ships the snapshot to the render
/// thread.
pub trait DeviceEnumerator: Send {
    fn snapshot(&self) -> Vec<DeviceSnapshot>;
}

impl<F> DeviceEnumerator for F
where
    F: Fn() -> Vec<DeviceSnapshot> + Send,
{
    fn snapshot(&self) -> Vec<DeviceSnapshot> {
        self()
    }
}

/// Render cadence the host should run its frame loop with
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    /// Render every vsync
    Continuously,
    /// Render only on explicit request
    WhenDirty,
}

pub struct InputBridge {
    config: BridgeConfig,
    queue: DispatchQueue<InputContext>,
    gestures: GestureDisambiguator,
    devices: Box<dyn DeviceEnumerator>,
    axes: SharedAxisSet,
    surface_alive: bool,
    render_mode: RenderMode,
    resume_on_window_ready: Option<Task<InputContext>>,
}

impl InputBridge {
    /// Create a bridge and the pump the render thread drains it with
    pub fn new(
        config: BridgeConfig,
        sink: impl EventSink + 'static,
        devices: impl DeviceEnumerator + 'static,
    ) -> (Self, EventPump) {
        let queue = DispatchQueue::new();
        let axes: SharedAxisSet = Arc::new(RwLock::new(GamepadAxisSet::new()));
        let context = InputContext::new(Box::new(sink), config.keys.table_size, Arc::clone(&axes));
        let pump = EventPump::new(queue.clone(), context);

        let bridge = Self {
            gestures: GestureDisambiguator::with_config(config.gesture.clone()),
            config,
            queue,
            devices: Box::new(devices),
            axes,
            surface_alive: false,
            render_mode: RenderMode::Continuously,
            resume_on_window_ready: None,
        };
        (bridge, pump)
    }

    /// Replace the built-in double-tap recognizer, e.g. with the platform's own
    pub fn with_detector(mut self, detector: impl DoubleTapDetector + 'static) -> Self {
        self.gestures = GestureDisambiguator::new(detector);
        self
    }

    /// Producer handle for queuing work from other threads
    pub fn handle(&self) -> DispatchQueue<InputContext> {
        self.queue.clone()
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    pub fn has_surface(&self) -> bool {
        self.surface_alive
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Queue a task if a surface exists to consume it
    fn post<F>(&self, what: &str, task: F) -> bool
    where
        F: FnOnce(&mut InputContext) -> Result<()> + Send + 'static,
    {
        if !self.surface_alive {
            tracing::debug!("no surface, dropping {}", what);
            return false;
        }
        self.queue.enqueue(task);
        true
    }

    fn post_batch(&self, batch: InputBatch) {
        if batch.is_empty() {
            tracing::trace!("empty {:?} batch skipped", batch.action);
            return;
        }
        self.post("input batch", move |ctx| {
            ctx.dispatch_batch(&batch);
            Ok(())
        });
    }

    fn post_motion<M: MotionSource>(&self, event: &M, tap_count: u8) {
        let batch = {
            let axes = self.axes.read();
            decompose(event, tap_count, &axes)
        };
        match batch {
            Ok(batch) => self.post_batch(batch),
            Err(e) => tracing::warn!("dropping motion event: {}", e),
        }
    }

    // Surface lifecycle

    pub fn surface_created(&mut self, width: u32, height: u32) {
        tracing::info!("surface created: {}x{}", width, height);
        self.surface_alive = true;
        self.gestures.reset();

        let devices = self.devices.snapshot();
        self.queue.enqueue(move |ctx| {
            ctx.reset();
            ctx.attach_devices(&devices);
            ctx.sink_mut().on_surface_recreated();
            Ok(())
        });

        self.surface_changed(width, height);
    }

    pub fn surface_changed(&mut self, width: u32, height: u32) {
        if self.config.surface.landscape_only && width <= height {
            tracing::debug!("ignoring portrait size {}x{}", width, height);
            return;
        }
        self.post("resize", move |ctx| {
            let sink = ctx.sink_mut();
            sink.on_resize(width, height);
            sink.on_resume_view();
            Ok(())
        });
    }

    /// Discard all pending work and reset every table
    ///
    /// Returns the number of discarded tasks.
    pub fn surface_destroyed(&mut self) -> usize {
        self.surface_alive = false;
        self.gestures.reset();
        let discarded = self.queue.flush_and_enqueue(|ctx| {
            ctx.reset();
            Ok(())
        });
        tracing::info!("surface destroyed, discarded {} pending tasks", discarded);
        discarded
    }

    pub fn pause(&mut self, screen_locked: bool) {
        tracing::info!("pause (screen locked: {})", screen_locked);
        self.render_mode = RenderMode::WhenDirty;
        self.gestures.reset();
        self.post("pause", move |ctx| {
            ctx.sink_mut().on_pause_view(screen_locked);
            ctx.suspend();
            Ok(())
        });
    }

    pub fn resume(&mut self) {
        tracing::info!("resume");
        self.render_mode = RenderMode::Continuously;
        let devices = self.devices.snapshot();
        self.post("inventory rebuild", move |ctx| {
            ctx.resume(&devices);
            Ok(())
        });
    }

    /// One-shot action to run on the render thread once the window has focus
    pub fn set_resume_action_on_window_ready<F>(&mut self, action: F)
    where
        F: FnOnce(&mut InputContext) -> Result<()> + Send + 'static,
    {
        self.resume_on_window_ready = Some(Box::new(action));
    }

    pub fn window_focus_changed(&mut self, has_focus: bool) {
        if !has_focus {
            return;
        }
        if let Some(action) = self.resume_on_window_ready.take() {
            tracing::debug!("window ready, queuing deferred resume");
            self.queue.enqueue(action);
        }
    }

    // Input

    /// Touch-screen motion; runs through double-tap disambiguation
    ///
    /// Without a surface the event goes back to the host.
    pub fn touch_event<M: MotionSource>(&mut self, event: &M) -> InputStatus {
        if !self.surface_alive {
            tracing::debug!("no surface, touch passed to host");
            return InputStatus::Unhandled;
        }
        let tap_count = self.gestures.tap_count(event);
        self.post_motion(event, tap_count);
        InputStatus::Handled
    }

    /// Joystick, mouse hover and other non-touch motion
    pub fn generic_motion_event<M: MotionSource>(&mut self, event: &M) -> InputStatus {
        if !self.surface_alive {
            tracing::debug!("no surface, motion passed to host");
            return InputStatus::Unhandled;
        }
        self.post_motion(event, 1);
        InputStatus::Handled
    }

    /// Motion from an auxiliary controller peripheral
    pub fn controller_motion<C: ControllerSource + ?Sized>(&mut self, sample: &C) {
        self.post_batch(decompose_controller(sample));
    }

    fn tracks(&self, key: KeyCode) -> bool {
        (key.code() as usize) < self.config.keys.table_size
    }

    /// Hardware key down
    ///
    /// Untracked codes go straight back to the host, as does everything
    /// while no surface exists. System keys are forwarded and also left to
    /// the host's default handling.
    pub fn key_down(&mut self, key: KeyCode, is_system: bool) -> InputStatus {
        if !self.tracks(key) {
            tracing::debug!("untracked key {} passed to host", key.code());
            return InputStatus::Unhandled;
        }
        let queued = self.post("key down", move |ctx| {
            ctx.key_down(key);
            Ok(())
        });
        if !queued || is_system {
            InputStatus::Unhandled
        } else {
            InputStatus::Handled
        }
    }

    /// Hardware key up; the host's default handling always runs as well
    pub fn key_up(&mut self, key: KeyCode) -> InputStatus {
        if self.tracks(key) {
            self.post("key up", move |ctx| {
                ctx.key_up(key);
                Ok(())
            });
        } else {
            tracing::debug!("untracked key {} passed to host", key.code());
        }
        InputStatus::Unhandled
    }

    /// Button event from a controller peripheral; shares the key tracker
    pub fn controller_key(&mut self, key: KeyCode, action: KeyAction) {
        if !self.tracks(key) {
            tracing::warn!("controller key {} outside tracked range, dropped", key.code());
            return;
        }
        match action {
            KeyAction::Down => self.post("controller key down", move |ctx| {
                ctx.key_down(key);
                Ok(())
            }),
            KeyAction::Up => self.post("controller key up", move |ctx| {
                ctx.key_up(key);
                Ok(())
            }),
        };
    }

    // Device hot-plug

    pub fn device_added(&mut self, device: DeviceId) {
        let devices = self.devices.snapshot();
        self.post("device added", move |ctx| {
            ctx.device_added(device, &devices);
            Ok(())
        });
    }

    pub fn device_changed(&mut self, device: DeviceId) {
        let devices = self.devices.snapshot();
        self.post("device changed", move |ctx| {
            ctx.device_changed(device, &devices);
            Ok(())
        });
    }

    pub fn device_removed(&mut self, device: DeviceId) {
        let devices = self.devices.snapshot();
        self.post("device removed", move |ctx| {
            ctx.device_removed(device, &devices);
            Ok(())
        });
    }
}
