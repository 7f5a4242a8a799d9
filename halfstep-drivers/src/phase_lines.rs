//! Coil phase lines
//!
//! Four GPIO outputs, one per coil line of the driver stage. Line `n` carries
//! bit `n` of the phase pattern.

use core::convert::Infallible;

use embedded_hal::digital::OutputPin;
use halfstep_core::phase::PhasePattern;
use halfstep_core::traits::DriveOutput;

/// Number of coil lines
pub const LINE_COUNT: usize = 4;

/// Four-line phase output
///
/// Lines can be active-high (default) or active-low for drivers that sink
/// current on a low level.
pub struct PhaseLines<P> {
    lines: [P; LINE_COUNT],
    /// If true, an energised coil line is driven LOW
    inverted: bool,
    /// Last pattern written
    current: PhasePattern,
}

impl<P: OutputPin<Error = Infallible>> PhaseLines<P> {
    /// Create the phase output; all coils start released
    ///
    /// `lines[n]` carries bit `n` of each pattern.
    pub fn new(lines: [P; LINE_COUNT], inverted: bool) -> Self {
        let mut output = Self {
            lines,
            inverted,
            current: PhasePattern::OFF,
        };
        output.set_output(PhasePattern::OFF);
        output
    }

    /// Create an active-high phase output
    pub fn new_active_high(lines: [P; LINE_COUNT]) -> Self {
        Self::new(lines, false)
    }

    /// Create an active-low phase output
    pub fn new_active_low(lines: [P; LINE_COUNT]) -> Self {
        Self::new(lines, true)
    }

    /// Last pattern written
    pub fn current(&self) -> PhasePattern {
        self.current
    }
}

impl<P: OutputPin<Error = Infallible>> DriveOutput for PhaseLines<P> {
    fn set_output(&mut self, pattern: PhasePattern) {
        self.current = pattern;

        for (n, line) in self.lines.iter_mut().enumerate() {
            let energised = pattern.line(n as u8);
            let result = if energised != self.inverted {
                line.set_high()
            } else {
                line.set_low()
            };
            result.unwrap_or_else(|e| match e {});
        }
    }
}
