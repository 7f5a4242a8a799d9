//! Direction sense for the free-run mode
//!
//! The button task records raw line levels here on every edge; the tick
//! handler reads them without waiting. Each line is a single atomic flag, so
//! a reader never blocks the writer.

use halfstep_core::config::SenseLevel;
use halfstep_core::motion::Button;
use halfstep_core::traits::DirectionSense;
use portable_atomic::{AtomicBool, Ordering};

/// Latest level of both button lines
pub struct ButtonSense {
    a_high: AtomicBool,
    b_high: AtomicBool,
    reverse_level: SenseLevel,
}

impl ButtonSense {
    /// Create with both lines released (pulled up, reading high)
    pub const fn new(reverse_level: SenseLevel) -> Self {
        Self {
            a_high: AtomicBool::new(true),
            b_high: AtomicBool::new(true),
            reverse_level,
        }
    }

    /// Record the current level of one line
    pub fn update(&self, button: Button, high: bool) {
        let line = match button {
            Button::A => &self.a_high,
            Button::B => &self.b_high,
        };
        line.store(high, Ordering::Relaxed);
    }

    /// Last recorded level of one line
    pub fn is_high(&self, button: Button) -> bool {
        match button {
            Button::A => self.a_high.load(Ordering::Relaxed),
            Button::B => self.b_high.load(Ordering::Relaxed),
        }
    }
}

impl DirectionSense for ButtonSense {
    /// Reversal is requested while either line reads the configured level
    fn reversal_requested(&self) -> bool {
        self.reverse_level.matches(self.is_high(Button::A))
            || self.reverse_level.matches(self.is_high(Button::B))
    }
}
