//! Key state tracker
//!
//! Fixed-size pressed table shared by hardware keys and controller buttons.
//! A held key produces one down notification no matter how often the
//! platform repeats it.

use tether_core::KeyCode;

#[derive(Debug)]
pub struct KeyStateTracker {
    pressed: Box<[bool]>,
}

impl KeyStateTracker {
    /// Tracker covering key codes `0..table_size`
    pub fn new(table_size: usize) -> Self {
        Self {
            pressed: vec![false; table_size].into_boxed_slice(),
        }
    }

    /// Whether `key` falls inside the tracked range
    pub fn tracks(&self, key: KeyCode) -> bool {
        (key.code() as usize) < self.pressed.len()
    }

    /// Record a down transition; returns whether the sink should hear about it
    ///
    /// Untracked codes always report `true` and leave no state behind.
    pub fn on_down(&mut self, key: KeyCode) -> bool {
        match self.pressed.get_mut(key.code() as usize) {
            Some(slot) if *slot => false,
            Some(slot) => {
                *slot = true;
                true
            }
            None => true,
        }
    }

    /// Record an up transition
    ///
    /// Ups are never deduplicated; the caller always forwards them.
    pub fn on_up(&mut self, key: KeyCode) {
        if let Some(slot) = self.pressed.get_mut(key.code() as usize) {
            *slot = false;
        }
    }

    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.pressed.get(key.code() as usize).copied().unwrap_or(false)
    }

    pub fn pressed_count(&self) -> usize {
        self.pressed.iter().filter(|p| **p).count()
    }

    pub fn table_size(&self) -> usize {
        self.pressed.len()
    }

    pub fn clear(&mut self) {
        self.pressed.iter_mut().for_each(|p| *p = false);
    }
}

impl Default for KeyStateTracker {
    fn default() -> Self {
        Self::new(KeyCode::MAX.code() as usize + 1)
    }
}
