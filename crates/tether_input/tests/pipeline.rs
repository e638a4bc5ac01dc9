//! End-to-end tests: UI-thread bridge, queue hop, render-thread pump, sink

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use parking_lot::Mutex;
use tether_core::{
    AxisId, ControllerSample, DeviceId, DeviceSnapshot, GamepadElement, InputStatus, KeyAction,
    KeyCode, MotionAction, MotionSnapshot, PeripheralAxes, PointerCoords, PointerInput, SourceMask,
    StableId,
};
use tether_input::{
    decompose, BridgeConfig, BridgeError, EventPump, EventSink, GamepadAxisSet, InputBridge,
    RenderMode,
};

const MS: i64 = 1_000_000;

#[derive(Clone, Debug, PartialEq)]
enum Record {
    Input(PointerInput),
    Element(GamepadElement, f32),
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    Connected(DeviceId),
    Disconnected(DeviceId),
    GamepadAvailable(bool),
    TriggersAvailable(bool),
    SurfaceRecreated,
    Resize(u32, u32),
    ResumeView,
    PauseView(bool),
}

#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Vec<Record>>>);

impl Recorder {
    fn take(&self) -> Vec<Record> {
        std::mem::take(&mut *self.0.lock())
    }

    fn push(&self, record: Record) {
        self.0.lock().push(record);
    }
}

impl EventSink for Recorder {
    fn on_input(&mut self, input: PointerInput) {
        self.push(Record::Input(input));
    }

    fn on_gamepad_element(&mut self, element: GamepadElement, value: f32) {
        self.push(Record::Element(element, value));
    }

    fn on_key_down(&mut self, key: KeyCode) {
        self.push(Record::KeyDown(key));
    }

    fn on_key_up(&mut self, key: KeyCode) {
        self.push(Record::KeyUp(key));
    }

    fn on_gamepad_connected(&mut self, device: DeviceId) {
        self.push(Record::Connected(device));
    }

    fn on_gamepad_disconnected(&mut self, device: DeviceId) {
        self.push(Record::Disconnected(device));
    }

    fn on_gamepad_available(&mut self, available: bool) {
        self.push(Record::GamepadAvailable(available));
    }

    fn on_gamepad_triggers_available(&mut self, available: bool) {
        self.push(Record::TriggersAvailable(available));
    }

    fn on_surface_recreated(&mut self) {
        self.push(Record::SurfaceRecreated);
    }

    fn on_resize(&mut self, width: u32, height: u32) {
        self.push(Record::Resize(width, height));
    }

    fn on_resume_view(&mut self) {
        self.push(Record::ResumeView);
    }

    fn on_pause_view(&mut self, screen_locked: bool) {
        self.push(Record::PauseView(screen_locked));
    }
}

type Devices = Arc<Mutex<Vec<DeviceSnapshot>>>;

struct Harness {
    bridge: InputBridge,
    pump: EventPump,
    recorder: Recorder,
    devices: Devices,
}

impl Harness {
    fn with_config(config: BridgeConfig) -> Self {
        let recorder = Recorder::default();
        let devices: Devices = Arc::new(Mutex::new(Vec::new()));
        let enumerate = {
            let devices = Arc::clone(&devices);
            move || devices.lock().clone()
        };
        let (bridge, pump) = InputBridge::new(config, recorder.clone(), enumerate);
        Self {
            bridge,
            pump,
            recorder,
            devices,
        }
    }

    fn new() -> Self {
        Self::with_config(BridgeConfig::default())
    }

    /// Harness with a live surface and the startup notifications consumed
    fn started() -> Self {
        let mut h = Self::new();
        h.bridge.surface_created(1280, 720);
        h.pump.drain();
        h.recorder.take();
        h
    }

    fn set_devices(&self, devices: Vec<DeviceSnapshot>) {
        *self.devices.lock() = devices;
    }

    fn drain(&mut self) -> Vec<Record> {
        self.pump.drain();
        self.recorder.take()
    }
}

fn inputs(records: &[Record]) -> Vec<PointerInput> {
    records
        .iter()
        .filter_map(|r| match r {
            Record::Input(input) => Some(*input),
            _ => None,
        })
        .collect()
}

fn joystick(id: i32, axes: &[AxisId]) -> DeviceSnapshot {
    DeviceSnapshot::new(
        DeviceId(id),
        SourceMask::GAMEPAD.union(SourceMask::JOYSTICK),
        axes.iter().map(|a| a.code()),
    )
}

fn touch(action: MotionAction, pointer: i32, time: i64, x: f32, y: f32) -> MotionSnapshot {
    MotionSnapshot::new(action, SourceMask::TOUCHSCREEN)
        .pointer(pointer)
        .sample(time, [PointerCoords::new(x, y)])
}

#[test]
fn test_decompose_is_deterministic() {
    let event = MotionSnapshot::new(MotionAction::Move, SourceMask::TOUCHSCREEN)
        .pointer(2)
        .pointer(8)
        .sample(10, [PointerCoords::new(1.0, 1.0), PointerCoords::new(5.0, 5.0)])
        .sample(20, [PointerCoords::new(2.0, 2.0), PointerCoords::new(6.0, 6.0)]);
    let axes = GamepadAxisSet::new();

    let first = decompose(&event, 1, &axes).unwrap();
    let second = decompose(&event, 1, &axes).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 4);
}

#[test]
fn test_stable_id_holds_for_whole_sequence() {
    let mut h = Harness::started();

    h.bridge.touch_event(&touch(MotionAction::Down, 5, 0, 10.0, 10.0));
    let moved = MotionSnapshot::new(MotionAction::Move, SourceMask::TOUCHSCREEN)
        .pointer(5)
        .sample(1 * MS, [PointerCoords::new(11.0, 10.0)])
        .sample(2 * MS, [PointerCoords::new(12.0, 10.0)])
        .sample(3 * MS, [PointerCoords::new(13.0, 10.0)]);
    h.bridge.touch_event(&moved);

    // A second finger lands while the first is live
    let second_down = MotionSnapshot::new(MotionAction::PointerDown, SourceMask::TOUCHSCREEN)
        .with_action_index(1)
        .pointer(5)
        .pointer(9)
        .sample(4 * MS, [PointerCoords::new(13.0, 10.0), PointerCoords::new(50.0, 50.0)]);
    h.bridge.touch_event(&second_down);

    let first_up = MotionSnapshot::new(MotionAction::PointerUp, SourceMask::TOUCHSCREEN)
        .with_action_index(0)
        .pointer(5)
        .pointer(9)
        .sample(5 * MS, [PointerCoords::new(13.0, 10.0), PointerCoords::new(50.0, 50.0)]);
    h.bridge.touch_event(&first_up);

    let records = h.drain();
    let events = inputs(&records);
    assert_eq!(events.len(), 6);

    let first_id = events[0].id;
    for event in &events[..4] {
        assert_eq!(event.id, first_id);
    }
    assert_ne!(events[4].id, first_id);
    assert_eq!(events[5].id, first_id);
    assert_eq!(events[5].action, MotionAction::PointerUp);

    // Raw id 5 is released; the second finger keeps its id
    assert_eq!(h.pump.context().pointers().get(5), None);
    assert_eq!(h.pump.context().pointers().get(9), Some(events[4].id));

    h.bridge.touch_event(&touch(MotionAction::Down, 5, 6 * MS, 0.0, 0.0));
    let records = h.drain();
    let again = inputs(&records);
    assert_ne!(again[0].id, events[4].id);
}

#[test]
fn test_history_is_emitted_oldest_first() {
    let mut h = Harness::started();

    let event = MotionSnapshot::new(MotionAction::Move, SourceMask::TOUCHSCREEN)
        .pointer(0)
        .sample(100, [PointerCoords::new(1.0, 0.0)])
        .sample(200, [PointerCoords::new(2.0, 0.0)])
        .sample(300, [PointerCoords::new(3.0, 0.0)])
        .sample(400, [PointerCoords::new(4.0, 0.0)]);
    h.bridge.touch_event(&event);

    let records = h.drain();
    let events = inputs(&records);
    let times: Vec<i64> = events.iter().map(|e| e.timestamp_nanos).collect();
    let xs: Vec<f32> = events.iter().map(|e| e.x).collect();
    assert_eq!(times, vec![100, 200, 300, 400]);
    assert_eq!(xs, vec![1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_repeated_key_down_notifies_once() {
    let mut h = Harness::started();

    assert_eq!(h.bridge.key_down(KeyCode::A, false), InputStatus::Handled);
    assert_eq!(h.bridge.key_down(KeyCode::A, false), InputStatus::Handled);
    assert_eq!(h.bridge.key_up(KeyCode::A), InputStatus::Unhandled);
    h.bridge.key_down(KeyCode::A, false);

    assert_eq!(
        h.drain(),
        vec![
            Record::KeyDown(KeyCode::A),
            Record::KeyUp(KeyCode::A),
            Record::KeyDown(KeyCode::A),
        ]
    );
}

#[test]
fn test_double_tap_is_one_interaction() {
    let mut h = Harness::started();

    h.bridge.touch_event(&touch(MotionAction::Down, 0, 0, 100.0, 100.0));
    h.bridge.touch_event(&touch(MotionAction::Up, 0, 50 * MS, 100.0, 100.0));
    let first = inputs(&h.drain());
    assert!(first.iter().all(|e| e.tap_count == 1));

    h.bridge.touch_event(&touch(MotionAction::Down, 0, 150 * MS, 104.0, 102.0));
    h.bridge.touch_event(&touch(MotionAction::Up, 0, 200 * MS, 104.0, 102.0));
    let second = inputs(&h.drain());

    assert_eq!(second.len(), 2);
    assert_eq!(second[0].action, MotionAction::Down);
    assert_eq!(second[1].action, MotionAction::Up);
    assert!(second.iter().all(|e| e.tap_count == 2));
}

#[test]
fn test_slow_second_tap_is_single() {
    let mut h = Harness::started();

    h.bridge.touch_event(&touch(MotionAction::Down, 0, 0, 100.0, 100.0));
    h.bridge.touch_event(&touch(MotionAction::Up, 0, 50 * MS, 100.0, 100.0));
    h.bridge.touch_event(&touch(MotionAction::Down, 0, 900 * MS, 100.0, 100.0));
    h.bridge.touch_event(&touch(MotionAction::Up, 0, 950 * MS, 100.0, 100.0));

    let events = inputs(&h.drain());
    assert_eq!(events.len(), 4);
    assert!(events.iter().all(|e| e.tap_count == 1));
}

#[test]
fn test_hot_unplug_leaves_no_residual_axes() {
    let mut h = Harness::new();
    h.set_devices(vec![
        joystick(1, &[AxisId::X, AxisId::Y]),
        joystick(2, &[AxisId::Y, AxisId::Z]),
        DeviceSnapshot::new(DeviceId(3), SourceMask::TOUCHSCREEN, [0, 1]),
    ]);
    h.bridge.surface_created(1280, 720);
    let records = h.drain();
    assert!(records.contains(&Record::GamepadAvailable(true)));
    assert_eq!(
        h.pump.context().inventory().axes().as_slice(),
        &[AxisId::X, AxisId::Y, AxisId::Z]
    );

    h.set_devices(vec![
        joystick(2, &[AxisId::Y, AxisId::Z]),
        DeviceSnapshot::new(DeviceId(3), SourceMask::TOUCHSCREEN, [0, 1]),
    ]);
    h.bridge.device_removed(DeviceId(1));
    let records = h.drain();

    assert!(records.contains(&Record::Disconnected(DeviceId(1))));
    assert_eq!(h.pump.context().inventory().axes().as_slice(), &[AxisId::Y, AxisId::Z]);
    assert!(h.pump.context().inventory().gamepad_present());
}

#[test]
fn test_connect_announced_only_for_joysticks() {
    let mut h = Harness::started();

    h.set_devices(vec![DeviceSnapshot::new(DeviceId(7), SourceMask::KEYBOARD, [])]);
    h.bridge.device_added(DeviceId(7));
    let records = h.drain();
    assert!(!records.iter().any(|r| matches!(r, Record::Connected(_))));
    assert!(records.contains(&Record::GamepadAvailable(false)));

    h.set_devices(vec![
        DeviceSnapshot::new(DeviceId(7), SourceMask::KEYBOARD, []),
        joystick(8, &[AxisId::X, AxisId::Brake]),
    ]);
    h.bridge.device_added(DeviceId(8));
    let records = h.drain();
    assert!(records.contains(&Record::Connected(DeviceId(8))));
    assert!(records.contains(&Record::TriggersAvailable(true)));

    h.set_devices(vec![joystick(8, &[AxisId::X, AxisId::Brake])]);
    h.bridge.device_removed(DeviceId(7));
    let records = h.drain();
    assert!(!records.iter().any(|r| matches!(r, Record::Disconnected(_))));
}

#[test]
fn test_joystick_axes_follow_inventory_and_sign_policy() {
    let mut h = Harness::new();
    h.set_devices(vec![joystick(1, &[AxisId::Y, AxisId::Z])]);
    h.bridge.surface_created(1280, 720);
    h.drain();

    let event = MotionSnapshot::new(MotionAction::Move, SourceMask::JOYSTICK)
        .pointer(0)
        .sample(5, [PointerCoords::new(0.25, 0.5).with_axis(AxisId::Z, 0.75)]);
    assert_eq!(h.bridge.generic_motion_event(&event), InputStatus::Handled);

    assert_eq!(
        h.drain(),
        vec![
            Record::Element(GamepadElement::Axis(AxisId::Y), -0.5),
            Record::Element(GamepadElement::Axis(AxisId::Z), 0.75),
        ]
    );
}

#[test]
fn test_controller_peripheral_reports_fixed_axes() {
    let mut h = Harness::started();

    let sample = ControllerSample::new(
        42,
        [PeripheralAxes {
            x: 0.1,
            y: 0.2,
            z: 0.3,
            rz: 0.4,
            left_trigger: 0.5,
            right_trigger: 0.6,
        }],
    );
    h.bridge.controller_motion(&sample);

    assert_eq!(
        h.drain(),
        vec![
            Record::Element(GamepadElement::Axis(AxisId::X), 0.1),
            Record::Element(GamepadElement::Axis(AxisId::Y), -0.2),
            Record::Element(GamepadElement::Axis(AxisId::Z), 0.3),
            Record::Element(GamepadElement::Axis(AxisId::Rz), -0.4),
            Record::Element(GamepadElement::Axis(AxisId::LeftTrigger), 0.5),
            Record::Element(GamepadElement::Axis(AxisId::RightTrigger), 0.6),
        ]
    );
}

#[test]
fn test_gamepad_buttons_are_elements() {
    let mut h = Harness::started();

    h.bridge.key_down(KeyCode::BUTTON_A, false);
    h.bridge.controller_key(KeyCode::BUTTON_A, KeyAction::Down);
    h.bridge.controller_key(KeyCode::BUTTON_A, KeyAction::Up);

    assert_eq!(
        h.drain(),
        vec![
            Record::Element(GamepadElement::Button(KeyCode::BUTTON_A), 1.0),
            Record::Element(GamepadElement::Button(KeyCode::BUTTON_A), 0.0),
        ]
    );
}

#[test]
fn test_system_and_untracked_keys() {
    let mut h = Harness::started();

    assert_eq!(h.bridge.key_down(KeyCode::VOLUME_UP, true), InputStatus::Unhandled);
    assert_eq!(h.bridge.key_down(KeyCode(400), false), InputStatus::Unhandled);
    assert_eq!(h.bridge.key_up(KeyCode(400)), InputStatus::Unhandled);
    assert_eq!(h.pump.pending(), 1);

    assert_eq!(h.drain(), vec![Record::KeyDown(KeyCode::VOLUME_UP)]);
}

#[test]
fn test_task_failure_does_not_break_order() {
    let h = Harness::started();
    let mut pump = h.pump;
    let order = Arc::new(Mutex::new(Vec::new()));
    let queue = h.bridge.handle();

    for n in 1..=3u32 {
        let order = Arc::clone(&order);
        queue.enqueue(move |_ctx| {
            order.lock().push(n);
            if n == 2 {
                return Err(BridgeError::TaskFailed("second task".into()));
            }
            Ok(())
        });
    }

    let report = pump.drain();
    assert_eq!(report.executed, 3);
    assert_eq!(report.failed, 1);
    assert_eq!(*order.lock(), vec![1, 2, 3]);
}

#[test]
fn test_invalid_action_index_is_dropped() {
    let mut h = Harness::started();

    let event = MotionSnapshot::new(MotionAction::PointerUp, SourceMask::TOUCHSCREEN)
        .with_action_index(3)
        .pointer(0)
        .sample(0, [PointerCoords::new(1.0, 1.0)]);
    assert_eq!(h.bridge.touch_event(&event), InputStatus::Handled);
    assert_eq!(h.pump.pending(), 0);
}

#[test]
fn test_surface_destroy_discards_and_resets() {
    let mut h = Harness::started();

    h.bridge.touch_event(&touch(MotionAction::Down, 3, 0, 1.0, 1.0));
    h.drain();
    assert_eq!(h.pump.context().pointers().len(), 1);

    h.bridge.key_down(KeyCode::A, false);
    h.bridge.touch_event(&touch(MotionAction::Move, 3, MS, 2.0, 2.0));
    assert_eq!(h.bridge.surface_destroyed(), 2);

    assert!(h.drain().is_empty());
    assert!(h.pump.context().pointers().is_empty());
    assert_eq!(h.pump.context().keys().pressed_count(), 0);

    // Nothing is queued without a surface; the host keeps the input
    let up = touch(MotionAction::Up, 3, 2 * MS, 2.0, 2.0);
    assert_eq!(h.bridge.touch_event(&up), InputStatus::Unhandled);
    assert_eq!(h.bridge.generic_motion_event(&up), InputStatus::Unhandled);
    assert_eq!(h.bridge.key_down(KeyCode::A, false), InputStatus::Unhandled);
    assert_eq!(h.pump.pending(), 0);

    h.bridge.surface_created(1280, 720);
    let records = h.drain();
    assert!(records.contains(&Record::SurfaceRecreated));
    h.bridge.touch_event(&touch(MotionAction::Down, 3, 3 * MS, 1.0, 1.0));
    let events = inputs(&h.drain());
    assert_eq!(events[0].id, StableId(1));
}

#[test]
fn test_surface_change_respects_orientation() {
    let config = BridgeConfig::from_toml_str("[surface]\nlandscape_only = true\n").unwrap();
    let mut h = Harness::with_config(config);

    h.bridge.surface_created(720, 1280);
    let records = h.drain();
    assert!(records.contains(&Record::SurfaceRecreated));
    assert!(!records.iter().any(|r| matches!(r, Record::Resize(..))));

    h.bridge.surface_changed(1280, 720);
    assert_eq!(h.drain(), vec![Record::Resize(1280, 720), Record::ResumeView]);
}

#[test]
fn test_pause_and_resume() {
    let mut h = Harness::new();
    h.set_devices(vec![joystick(1, &[AxisId::X, AxisId::LeftTrigger])]);
    h.bridge.surface_created(1280, 720);
    h.drain();
    assert_eq!(h.bridge.render_mode(), RenderMode::Continuously);

    h.bridge.pause(true);
    assert_eq!(h.bridge.render_mode(), RenderMode::WhenDirty);
    assert_eq!(h.drain(), vec![Record::PauseView(true)]);
    assert!(!h.pump.context().inventory().gamepad_present());

    h.bridge.resume();
    assert_eq!(h.bridge.render_mode(), RenderMode::Continuously);
    assert_eq!(
        h.drain(),
        vec![Record::GamepadAvailable(true), Record::TriggersAvailable(true)]
    );
}

#[test]
fn test_gamepads_attached_at_startup_are_announced() {
    let mut h = Harness::new();
    h.set_devices(vec![
        joystick(1, &[AxisId::X]),
        DeviceSnapshot::new(DeviceId(2), SourceMask::TOUCHSCREEN, [0, 1]),
        joystick(3, &[AxisId::Y]),
    ]);
    h.bridge.surface_created(1280, 720);
    let records = h.drain();

    let connected: Vec<_> = records
        .iter()
        .filter_map(|r| match r {
            Record::Connected(id) => Some(*id),
            _ => None,
        })
        .collect();
    assert_eq!(connected, vec![DeviceId(1), DeviceId(3)]);

    h.set_devices(vec![joystick(3, &[AxisId::Y])]);
    h.bridge.device_removed(DeviceId(1));
    assert!(h.drain().contains(&Record::Disconnected(DeviceId(1))));
}

#[test]
fn test_unplug_while_paused_is_announced() {
    let mut h = Harness::new();
    h.set_devices(vec![joystick(1, &[AxisId::X, AxisId::LeftTrigger])]);
    h.bridge.surface_created(1280, 720);
    h.drain();

    h.bridge.pause(false);
    h.drain();

    h.set_devices(Vec::new());
    h.bridge.device_removed(DeviceId(1));
    assert_eq!(h.drain(), vec![Record::Disconnected(DeviceId(1))]);

    h.bridge.resume();
    assert_eq!(
        h.drain(),
        vec![Record::GamepadAvailable(false), Record::TriggersAvailable(false)]
    );
}

#[test]
fn test_plug_while_paused_keeps_axes_flushed() {
    let mut h = Harness::started();
    h.bridge.pause(true);
    h.drain();

    h.set_devices(vec![joystick(4, &[AxisId::X, AxisId::Z])]);
    h.bridge.device_added(DeviceId(4));
    assert_eq!(h.drain(), vec![Record::Connected(DeviceId(4))]);
    assert!(h.pump.context().is_suspended());
    assert!(h.pump.context().inventory().axes().is_empty());

    h.bridge.resume();
    assert_eq!(
        h.drain(),
        vec![Record::GamepadAvailable(true), Record::TriggersAvailable(false)]
    );
    assert_eq!(h.pump.context().inventory().axes().as_slice(), &[AxisId::X, AxisId::Z]);
}

#[test]
fn test_resume_action_waits_for_focus() {
    let mut h = Harness::started();

    h.bridge.set_resume_action_on_window_ready(|ctx| {
        ctx.sink_mut().on_resume_view();
        Ok(())
    });
    h.bridge.window_focus_changed(false);
    assert_eq!(h.pump.pending(), 0);

    h.bridge.window_focus_changed(true);
    h.bridge.window_focus_changed(true);
    assert_eq!(h.drain(), vec![Record::ResumeView]);
}

#[test]
fn test_render_thread_handoff() {
    let mut h = Harness::started();
    let recorder = h.recorder.clone();
    let done = Arc::new(AtomicBool::new(false));

    let mut pump = h.pump;
    let render = {
        let done = Arc::clone(&done);
        thread::spawn(move || {
            loop {
                let finished = done.load(Ordering::SeqCst);
                pump.drain();
                if finished {
                    break;
                }
                thread::yield_now();
            }
            pump
        })
    };

    for seq in 0..50i64 {
        let base = seq * 10 * MS;
        h.bridge.touch_event(&touch(MotionAction::Down, 0, base, 0.0, 0.0));
        h.bridge.touch_event(&touch(MotionAction::Move, 0, base + MS, 20.0, 0.0));
        h.bridge.touch_event(&touch(MotionAction::Up, 0, base + 2 * MS, 20.0, 0.0));
    }
    done.store(true, Ordering::SeqCst);

    let pump = render.join().unwrap();
    assert!(pump.context().pointers().is_empty());

    let events = inputs(&recorder.take());
    assert_eq!(events.len(), 150);
    for (seq, chunk) in events.chunks(3).enumerate() {
        let actions: Vec<_> = chunk.iter().map(|e| e.action).collect();
        assert_eq!(actions, vec![MotionAction::Down, MotionAction::Move, MotionAction::Up]);
        assert!(chunk.iter().all(|e| e.id == chunk[0].id));
        assert_eq!(chunk[0].timestamp_nanos, seq as i64 * 10 * MS);
    }
}
