//! Start/stop button inputs
//!
//! Both buttons are wired to ground with the internal pull-up enabled, so a
//! press reads low. Every edge refreshes the shared [`ButtonSense`]; falling
//! edges are debounced into presses.

use embassy_futures::select::select;
use embassy_rp::gpio::{Input, Pin, Pull};
use embassy_rp::Peri;
use embassy_time::Instant;

use halfstep_core::input::PressDetector;
use halfstep_core::motion::Button;
use halfstep_drivers::ButtonSense;

/// The two start/stop buttons
pub struct ButtonPair<'d> {
    a: Input<'d>,
    b: Input<'d>,
    detector: PressDetector,
    sense: &'d ButtonSense,
}

impl<'d> ButtonPair<'d> {
    /// Set up both inputs with pull-ups
    pub fn new<A: Pin, B: Pin>(
        a_pin: Peri<'d, A>,
        b_pin: Peri<'d, B>,
        debounce_ms: u32,
        sense: &'d ButtonSense,
    ) -> Self {
        let a = Input::new(a_pin, Pull::Up);
        let b = Input::new(b_pin, Pull::Up);

        let pair = Self {
            a,
            b,
            detector: PressDetector::new(debounce_ms),
            sense,
        };
        pair.refresh_sense();
        pair
    }

    /// Wait for the next debounced press
    pub async fn next_press(&mut self) -> Button {
        loop {
            select(self.a.wait_for_any_edge(), self.b.wait_for_any_edge()).await;

            let (a_high, b_high) = self.refresh_sense();
            let now_ms = Instant::now().as_millis() as u32;

            if let Some(button) = self.detector.sample(a_high, b_high, now_ms) {
                return button;
            }
        }
    }

    /// Copy both line levels into the direction sense
    fn refresh_sense(&self) -> (bool, bool) {
        let a_high = self.a.is_high();
        let b_high = self.b.is_high();
        self.sense.update(Button::A, a_high);
        self.sense.update(Button::B, b_high);
        (a_high, b_high)
    }
}
