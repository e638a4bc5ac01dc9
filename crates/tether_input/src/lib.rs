//! Tether input pipeline
//!
//! Normalizes platform input on the UI thread and hands it to the render
//! thread through a task queue.
//!
//! # Threads
//!
//! - [`InputBridge`] lives on the UI thread. It receives touch, motion, key,
//!   device and lifecycle callbacks, decomposes motion into batches and
//!   queues work.
//! - [`EventPump`] lives on the render thread. [`EventPump::drain`] runs the
//!   queued tasks in FIFO order against the [`InputContext`], which owns the
//!   pointer id table, the key tracker and the gamepad axis inventory, and
//!   forwards everything to the host's [`EventSink`].
//!
//! # Example
//!
//! ```
//! use tether_core::{DeviceSnapshot, MotionAction, MotionSnapshot, PointerCoords, SourceMask};
//! use tether_input::{BridgeConfig, EventSink, InputBridge};
//!
//! struct Printer;
//!
//! impl EventSink for Printer {
//!     fn on_input(&mut self, input: tether_input::PointerInput) {
//!         println!("{:?}", input);
//!     }
//!     fn on_gamepad_element(&mut self, _: tether_input::GamepadElement, _: f32) {}
//!     fn on_key_down(&mut self, _: tether_core::KeyCode) {}
//!     fn on_key_up(&mut self, _: tether_core::KeyCode) {}
//!     fn on_gamepad_connected(&mut self, _: tether_core::DeviceId) {}
//!     fn on_gamepad_disconnected(&mut self, _: tether_core::DeviceId) {}
//!     fn on_gamepad_available(&mut self, _: bool) {}
//!     fn on_gamepad_triggers_available(&mut self, _: bool) {}
//! }
//!
//! let (mut bridge, mut pump) =
//!     InputBridge::new(BridgeConfig::default(), Printer, Vec::<DeviceSnapshot>::new);
//! bridge.surface_created(1280, 720);
//!
//! let down = MotionSnapshot::new(MotionAction::Down, SourceMask::TOUCHSCREEN)
//!     .pointer(0)
//!     .sample(0, [PointerCoords::new(10.0, 20.0)]);
//! bridge.touch_event(&down);
//!
//! let report = pump.drain();
//! assert_eq!(report.failed, 0);
//! ```

pub mod bridge;
pub mod config;
pub mod decompose;
pub mod dispatch;
pub mod gesture;
pub mod inventory;
pub mod keys;
pub mod logging;
pub mod pointer;
pub mod pump;
pub mod sink;

pub use bridge::{DeviceEnumerator, InputBridge, RenderMode};
pub use config::{BridgeConfig, GestureConfig, KeyConfig, LoggingConfig, SurfaceConfig};
pub use decompose::{decompose, decompose_controller};
pub use dispatch::{DispatchQueue, DrainReport, Task};
pub use gesture::{DoubleTapDetector, GestureDisambiguator, TapState, TimedDoubleTapDetector};
pub use inventory::{recompute, AxisReport, GamepadAxisInventory, GamepadAxisSet, SharedAxisSet};
pub use keys::KeyStateTracker;
pub use logging::init_logging;
pub use pointer::PointerIdTable;
pub use pump::{EventPump, InputContext};
pub use sink::EventSink;

pub use tether_core::{
    BridgeError, GamepadElement, InputStatus, PointerInput, Result,
};
