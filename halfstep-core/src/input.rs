//! Button input filtering
//!
//! Buttons are active-low (pulled up, pressed reads low). A press is a
//! falling edge, accepted only when at least the debounce window has elapsed
//! since the previously accepted press of the same button. Rejected edges do
//! not restart the window, so a bouncing contact cannot hold a button off
//! indefinitely.

use crate::motion::Button;

/// Time-window debouncer over a wrapping millisecond clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Debouncer {
    window_ms: u32,
    last_accepted: Option<u32>,
}

impl Debouncer {
    /// Create a debouncer; the first press is always accepted
    pub const fn new(window_ms: u32) -> Self {
        Self {
            window_ms,
            last_accepted: None,
        }
    }

    /// Offer a press edge seen at `now_ms`; returns whether it counts
    pub fn accept(&mut self, now_ms: u32) -> bool {
        let accepted = match self.last_accepted {
            None => true,
            Some(last) => now_ms.wrapping_sub(last) >= self.window_ms,
        };
        if accepted {
            self.last_accepted = Some(now_ms);
        }
        accepted
    }
}

/// Turns raw line samples of both buttons into debounced presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PressDetector {
    a_high: bool,
    b_high: bool,
    debounce_a: Debouncer,
    debounce_b: Debouncer,
}

impl PressDetector {
    /// Create with both buttons released
    pub const fn new(window_ms: u32) -> Self {
        Self {
            a_high: true,
            b_high: true,
            debounce_a: Debouncer::new(window_ms),
            debounce_b: Debouncer::new(window_ms),
        }
    }

    /// Feed the current level of both lines (`true` = high)
    ///
    /// Returns the button whose press was accepted. When both lines fall in
    /// the same sample, button A wins and B's edge is dropped.
    pub fn sample(&mut self, a_high: bool, b_high: bool, now_ms: u32) -> Option<Button> {
        let a_fell = self.a_high && !a_high;
        let b_fell = self.b_high && !b_high;
        self.a_high = a_high;
        self.b_high = b_high;

        if a_fell && self.debounce_a.accept(now_ms) {
            return Some(Button::A);
        }
        if b_fell && self.debounce_b.accept(now_ms) {
            return Some(Button::B);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_press_accepted() {
        let mut debouncer = Debouncer::new(50);
        assert!(debouncer.accept(0));
    }

    #[test]
    fn test_bounce_rejected() {
        let mut debouncer = Debouncer::new(50);
        assert!(debouncer.accept(100));
        assert!(!debouncer.accept(101));
        assert!(!debouncer.accept(149));
        assert!(debouncer.accept(150));
    }

    #[test]
    fn test_rejected_edges_do_not_extend_window() {
        let mut debouncer = Debouncer::new(50);
        assert!(debouncer.accept(0));
        for t in (5..50).step_by(5) {
            assert!(!debouncer.accept(t));
        }
        assert!(debouncer.accept(50));
    }

    #[test]
    fn test_clock_wrap() {
        let mut debouncer = Debouncer::new(50);
        assert!(debouncer.accept(u32::MAX - 10));
        assert!(!debouncer.accept(20));
        assert!(debouncer.accept(40));
    }

    #[test]
    fn test_zero_window_accepts_everything() {
        let mut debouncer = Debouncer::new(0);
        assert!(debouncer.accept(7));
        assert!(debouncer.accept(7));
    }

    #[test]
    fn test_press_is_falling_edge() {
        let mut detector = PressDetector::new(50);
        assert_eq!(detector.sample(false, true, 0), Some(Button::A));
        // Still held: no new edge
        assert_eq!(detector.sample(false, true, 100), None);
        // Release is not a press
        assert_eq!(detector.sample(true, true, 200), None);
        assert_eq!(detector.sample(true, false, 300), Some(Button::B));
    }

    #[test]
    fn test_contact_bounce_filtered() {
        let mut detector = PressDetector::new(50);
        assert_eq!(detector.sample(false, true, 1000), Some(Button::A));
        assert_eq!(detector.sample(true, true, 1002), None);
        assert_eq!(detector.sample(false, true, 1004), None);
        assert_eq!(detector.sample(true, true, 1200), None);
        assert_eq!(detector.sample(false, true, 1300), Some(Button::A));
    }

    #[test]
    fn test_buttons_debounced_separately() {
        let mut detector = PressDetector::new(50);
        assert_eq!(detector.sample(false, true, 0), Some(Button::A));
        assert_eq!(detector.sample(false, false, 10), Some(Button::B));
    }

    #[test]
    fn test_a_has_priority() {
        let mut detector = PressDetector::new(50);
        assert_eq!(detector.sample(false, false, 0), Some(Button::A));
        // B's edge in the same sample was consumed
        assert_eq!(detector.sample(false, false, 100), None);
    }
}
