//! Percentage scaling of step counts

/// A percentage in `0..=100`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Percentage(u8);

impl Percentage {
    /// 100 %, used when the operator sends an empty percentage line
    pub const FULL: Self = Self(100);

    /// Create a percentage, returning `None` above 100
    pub fn new(value: u8) -> Option<Self> {
        (value <= 100).then_some(Self(value))
    }

    /// Create a percentage, clamping values above 100
    pub fn saturating(value: u32) -> Self {
        Self(value.min(100) as u8)
    }

    /// Raw value in `0..=100`
    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Self::FULL
    }
}

/// Scale `base` by `percentage`: floor division, then clamp to at least one
/// step so a move is never zero-length.
pub fn scaled_steps(base: u32, percentage: Percentage) -> u32 {
    let steps = (base as u64) * (percentage.get() as u64) / 100;
    (steps as u32).max(1)
}
