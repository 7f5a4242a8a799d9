//! Serial command interpreter
//!
//! Grammar, one token per line:
//!
//! ```text
//! cycle      ::= "0" | "3" | ("1" | "2") percentage
//! percentage ::= "" | integer in 0..=100      (empty means 100)
//! ```
//!
//! Commands 0 and 3 take no percentage.

pub mod interpreter;
pub mod parser;

pub use interpreter::{CommandInterpreter, Outcome};
pub use parser::CommandParser;

use halfstep_protocol::Reply;

use crate::motion::{MotionRequest, Percentage};
use crate::traits::Direction;

/// Input errors detected by the interpreter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Command token not in 0..=3, or not a number
    InvalidCommand,
    /// Percentage token not in 0..=100, or not a number
    InvalidPercentage,
}

impl CommandError {
    /// Reply reported back on the command channel
    pub fn reply(&self) -> Reply {
        match self {
            CommandError::InvalidCommand => Reply::InvalidCommand,
            CommandError::InvalidPercentage => Reply::InvalidPercentage,
        }
    }
}

/// Operator commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// 0: stop
    Stop,
    /// 1: bounded clockwise move
    Clockwise,
    /// 2: bounded counter-clockwise move
    CounterClockwise,
    /// 3: free run
    Oscillate,
}

impl Command {
    /// Parse a command token
    pub fn parse(token: &str) -> Result<Self, CommandError> {
        let value: u8 = token
            .trim()
            .parse()
            .map_err(|_| CommandError::InvalidCommand)?;

        match value {
            0 => Ok(Command::Stop),
            1 => Ok(Command::Clockwise),
            2 => Ok(Command::CounterClockwise),
            3 => Ok(Command::Oscillate),
            _ => Err(CommandError::InvalidCommand),
        }
    }

    /// Direction of a bounded move, `None` for commands without a percentage
    pub fn move_direction(&self) -> Option<Direction> {
        match self {
            Command::Clockwise => Some(Direction::Clockwise),
            Command::CounterClockwise => Some(Direction::CounterClockwise),
            Command::Stop | Command::Oscillate => None,
        }
    }

    /// Request for a command that takes no percentage
    pub fn immediate_request(&self) -> Option<MotionRequest> {
        match self {
            Command::Stop => Some(MotionRequest::Stop),
            Command::Oscillate => Some(MotionRequest::Oscillate),
            Command::Clockwise | Command::CounterClockwise => None,
        }
    }
}

impl Percentage {
    /// Parse a percentage token; an empty token means 100 %
    pub fn parse(token: &str) -> Result<Self, CommandError> {
        let token = token.trim();
        if token.is_empty() {
            return Ok(Percentage::FULL);
        }

        let value: u32 = token.parse().map_err(|_| CommandError::InvalidPercentage)?;
        u8::try_from(value)
            .ok()
            .and_then(Percentage::new)
            .ok_or(CommandError::InvalidPercentage)
    }
}
