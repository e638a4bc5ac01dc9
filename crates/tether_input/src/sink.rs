//! Native engine sink
//!
//! Everything the render thread delivers to the engine goes through this
//! trait. It is only ever called from the thread that drains the queue, but
//! it must be able to move there.

use tether_core::{DeviceId, GamepadElement, KeyCode, PointerInput};

pub trait EventSink: Send {
    /// Positional input with a stable pointer id
    fn on_input(&mut self, input: PointerInput);

    /// Gamepad axis value (sign policy applied) or button state (1.0 / 0.0)
    fn on_gamepad_element(&mut self, element: GamepadElement, value: f32);

    fn on_key_down(&mut self, key: KeyCode);

    fn on_key_up(&mut self, key: KeyCode);

    fn on_gamepad_connected(&mut self, device: DeviceId);

    fn on_gamepad_disconnected(&mut self, device: DeviceId);

    /// Capability announcement: any joystick-class device attached
    fn on_gamepad_available(&mut self, available: bool);

    /// Capability announcement: attached devices expose trigger axes
    fn on_gamepad_triggers_available(&mut self, available: bool);

    /// The rendering surface was (re)created and all input state reset
    fn on_surface_recreated(&mut self) {}

    fn on_resize(&mut self, _width: u32, _height: u32) {}

    fn on_resume_view(&mut self) {}

    fn on_pause_view(&mut self, _screen_locked: bool) {}
}
