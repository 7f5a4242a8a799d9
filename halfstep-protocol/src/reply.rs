//! Text replies written back on the command channel

/// Line terminator appended to every reply
pub const LINE_ENDING: &str = "\r\n";

/// Replies sent from the controller to the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reply {
    /// Command token was not one of 0, 1, 2, 3
    InvalidCommand,
    /// Percentage token was not an integer in 0..=100
    InvalidPercentage,
    /// Input line was too long to be a token
    LineTooLong,
}

impl Reply {
    /// Reply text without line terminator
    pub fn as_str(&self) -> &'static str {
        match self {
            Reply::InvalidCommand => "ERR invalid command (expected 0, 1, 2 or 3)",
            Reply::InvalidPercentage => "ERR invalid percentage (expected 0-100)",
            Reply::LineTooLong => "ERR line too long",
        }
    }
}
