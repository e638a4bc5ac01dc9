//! Gesture disambiguation
//!
//! A double-tap must surface as one semantic interaction: the second down and
//! its matching up are both delivered with `tap_count == 2`, and neither is
//! also delivered as an ordinary single tap.
//!
//! The double-tap *recognizer* is pluggable through [`DoubleTapDetector`], so a
//! host can feed the platform's own recognizer instead of the built-in
//! [`TimedDoubleTapDetector`].

use tether_core::{MotionAction, MotionSource};

use crate::config::GestureConfig;

const NANOS_PER_MILLI: i64 = 1_000_000;

/// Recognizes double taps from the raw touch stream
pub trait DoubleTapDetector: Send {
    /// Feed one touch event; `true` when it is the down that completes a double tap
    fn on_touch_event(&mut self, event: &dyn MotionSource) -> bool;

    /// Forget any partial gesture
    fn reset(&mut self) {}
}

#[derive(Clone, Copy, Debug)]
struct TapRecord {
    x: f32,
    y: f32,
}

/// Timing and distance based double-tap recognizer
///
/// A second down counts as a double tap when it lands within
/// `double_tap_slop` of the first down, between `double_tap_min_time_ms` and
/// `double_tap_timeout_ms` after the first up, and the first touch never left
/// its `touch_slop` region. Multi-touch or a cancel abandons the candidate.
#[derive(Debug)]
pub struct TimedDoubleTapDetector {
    config: GestureConfig,
    current_down: Option<TapRecord>,
    in_tap_region: bool,
    double_tapping: bool,
    /// First tap of a potential double tap, with its up time
    previous_tap: Option<(TapRecord, i64)>,
}

impl TimedDoubleTapDetector {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            current_down: None,
            in_tap_region: false,
            double_tapping: false,
            previous_tap: None,
        }
    }

    fn is_considered_double_tap(&self, first: TapRecord, up_time: i64, x: f32, y: f32, time: i64) -> bool {
        let delta = time - up_time;
        let min = self.config.double_tap_min_time_ms as i64 * NANOS_PER_MILLI;
        let max = self.config.double_tap_timeout_ms as i64 * NANOS_PER_MILLI;
        if delta < min || delta > max {
            return false;
        }
        let dx = x - first.x;
        let dy = y - first.y;
        let slop = self.config.double_tap_slop;
        dx * dx + dy * dy < slop * slop
    }
}

impl Default for TimedDoubleTapDetector {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

impl DoubleTapDetector for TimedDoubleTapDetector {
    fn on_touch_event(&mut self, event: &dyn MotionSource) -> bool {
        let index = event.action_index();
        let time = event.event_time_nanos();

        match event.action() {
            MotionAction::Down => {
                let (x, y) = (event.x(index), event.y(index));
                let is_double = self
                    .previous_tap
                    .take()
                    .is_some_and(|(first, up_time)| self.is_considered_double_tap(first, up_time, x, y, time));

                self.current_down = Some(TapRecord { x, y });
                self.in_tap_region = true;
                self.double_tapping = is_double;
                is_double
            }
            MotionAction::PointerDown => {
                self.in_tap_region = false;
                self.previous_tap = None;
                false
            }
            MotionAction::Move => {
                if let (Some(down), true) = (self.current_down, self.in_tap_region) {
                    let dx = event.x(0) - down.x;
                    let dy = event.y(0) - down.y;
                    let slop = self.config.touch_slop;
                    if dx * dx + dy * dy > slop * slop {
                        self.in_tap_region = false;
                    }
                }
                false
            }
            MotionAction::Up => {
                if let Some(down) = self.current_down.take() {
                    if self.in_tap_region && !self.double_tapping {
                        self.previous_tap = Some((down, time));
                    }
                }
                self.double_tapping = false;
                false
            }
            MotionAction::Cancel => {
                self.reset();
                false
            }
            _ => false,
        }
    }

    fn reset(&mut self) {
        self.current_down = None;
        self.in_tap_region = false;
        self.double_tapping = false;
        self.previous_tap = None;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TapState {
    Idle,
    /// A double tap was recognized on the down at this action index;
    /// the matching up still has to arrive
    PendingDoubleTap { action_index: usize },
}

/// Assigns the tap count each touch event is delivered with
pub struct GestureDisambiguator {
    detector: Box<dyn DoubleTapDetector>,
    state: TapState,
}

impl GestureDisambiguator {
    pub fn new(detector: impl DoubleTapDetector + 'static) -> Self {
        Self {
            detector: Box::new(detector),
            state: TapState::Idle,
        }
    }

    pub fn with_config(config: GestureConfig) -> Self {
        Self::new(TimedDoubleTapDetector::new(config))
    }

    pub fn state(&self) -> TapState {
        self.state
    }

    /// Tap count to decompose `event` with
    pub fn tap_count<M: MotionSource>(&mut self, event: &M) -> u8 {
        let action = event.action();
        let index = event.action_index();

        if self.detector.on_touch_event(event) {
            tracing::debug!("double tap recognized at action index {}", index);
            self.state = TapState::PendingDoubleTap { action_index: index };
            return 2;
        }

        match self.state {
            TapState::Idle => 1,
            TapState::PendingDoubleTap { action_index }
                if action == MotionAction::Up && action_index == index =>
            {
                self.state = TapState::Idle;
                2
            }
            // Moves between the second down and its up keep the gesture open
            TapState::PendingDoubleTap { .. } if action == MotionAction::Move => 1,
            TapState::PendingDoubleTap { action_index } => {
                tracing::debug!(
                    "discarding stale double tap (pending index {}, got {:?} at {})",
                    action_index,
                    action,
                    index
                );
                self.state = TapState::Idle;
                1
            }
        }
    }

    pub fn reset(&mut self) {
        self.state = TapState::Idle;
        self.detector.reset();
    }
}

impl Default for GestureDisambiguator {
    fn default() -> Self {
        Self::new(TimedDoubleTapDetector::default())
    }
}
