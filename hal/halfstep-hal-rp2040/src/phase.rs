//! Coil phase lines on RP2040 GPIO

use embassy_rp::gpio::{Level, Output, Pin};
use embassy_rp::Peri;

use halfstep_drivers::PhaseLines;

/// Phase output on four RP2040 GPIOs
pub type RpPhaseLines<'d> = PhaseLines<Output<'d>>;

/// Set up four coil lines, released
///
/// `inverted` selects active-low lines.
pub fn phase_lines<'d, P0: Pin, P1: Pin, P2: Pin, P3: Pin>(
    line0: Peri<'d, P0>,
    line1: Peri<'d, P1>,
    line2: Peri<'d, P2>,
    line3: Peri<'d, P3>,
    inverted: bool,
) -> RpPhaseLines<'d> {
    let idle = if inverted { Level::High } else { Level::Low };
    PhaseLines::new(
        [
            Output::new(line0, idle),
            Output::new(line1, idle),
            Output::new(line2, idle),
            Output::new(line3, idle),
        ],
        inverted,
    )
}
