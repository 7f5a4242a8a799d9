//! Half-step phase sequencer
//!
//! Eight commutation states for a 4-wire (unipolar or bipolar via H-bridge)
//! stepper. Neighbouring entries differ in exactly one bit, alternating
//! between one and two energised coils.

use crate::traits::Direction;

/// Number of entries in the commutation table
pub const PHASE_COUNT: u8 = 8;

/// Commutation table, indexed by [`PhaseIndex`]
pub const PHASE_TABLE: [PhasePattern; PHASE_COUNT as usize] = [
    PhasePattern(0b0001),
    PhasePattern(0b0011),
    PhasePattern(0b0010),
    PhasePattern(0b0110),
    PhasePattern(0b0100),
    PhasePattern(0b1100),
    PhasePattern(0b1000),
    PhasePattern(0b1001),
];

/// 4-bit drive pattern, bit *n* drives phase line *n*
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhasePattern(u8);

impl PhasePattern {
    /// All phase lines de-energised
    pub const OFF: Self = Self(0);

    /// Raw 4-bit value
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Whether phase line `line` (0-3) is energised
    pub fn line(self, line: u8) -> bool {
        line < 4 && self.0 & (1 << line) != 0
    }

    /// Whether all lines are off
    pub fn is_off(self) -> bool {
        self.0 == 0
    }
}

/// Position in the commutation table, always in `0..8`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhaseIndex(u8);

impl PhaseIndex {
    /// First table entry
    pub const ZERO: Self = Self(0);

    /// Create an index, wrapping values outside the table
    pub fn new(index: u8) -> Self {
        Self(index % PHASE_COUNT)
    }

    /// Raw index value
    pub fn get(self) -> u8 {
        self.0
    }

    /// Next index in the given direction (7 -> 0 going up, 0 -> 7 going down)
    pub fn advance(self, direction: Direction) -> Self {
        match direction {
            Direction::Clockwise => Self((self.0 + 1) % PHASE_COUNT),
            Direction::CounterClockwise => Self((self.0 + PHASE_COUNT - 1) % PHASE_COUNT),
        }
    }

    /// Drive pattern for this index
    pub fn pattern(self) -> PhasePattern {
        PHASE_TABLE[self.0 as usize]
    }
}

/// Advance one step and return the new index with its drive pattern
pub fn step(index: PhaseIndex, direction: Direction) -> (PhaseIndex, PhasePattern) {
    let next = index.advance(direction);
    (next, next.pattern())
}
