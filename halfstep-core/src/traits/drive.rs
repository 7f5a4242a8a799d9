//! Motor drive seams
//!
//! The motor is driven directly through four phase lines; there is no
//! step/dir driver chip in between.

use crate::phase::PhasePattern;

/// Motor rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Clockwise rotation (phase index counts up)
    Clockwise,
    /// Counter-clockwise rotation (phase index counts down)
    CounterClockwise,
}

impl Direction {
    /// Get the opposite direction
    pub fn opposite(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// 4-bit parallel output feeding the motor phase lines
///
/// Writes never fail from the core's point of view; an implementation that
/// can fail must swallow or latch the error itself.
pub trait DriveOutput {
    /// Assert the given pattern on the phase lines
    fn set_output(&mut self, pattern: PhasePattern);
}

/// Direction-reversal input sampled once per tick in oscillate mode
pub trait DirectionSense {
    /// True while a reversal is requested
    fn reversal_requested(&self) -> bool;
}

impl DirectionSense for bool {
    fn reversal_requested(&self) -> bool {
        *self
    }
}
