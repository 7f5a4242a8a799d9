//! Token-driven command cycle state machine

use crate::motion::{MotionRequest, Percentage};
use crate::traits::Direction;

use super::{Command, CommandError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    /// Waiting for a command token
    Command,
    /// Got command 1 or 2, waiting for its percentage
    Percentage(Direction),
}

/// Assembles command-channel tokens into motion requests
///
/// Any error returns the parser to waiting for a command, so the next token
/// always starts a fresh cycle.
#[derive(Debug, Clone)]
pub struct CommandParser {
    expect: Expect,
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandParser {
    /// Create a parser waiting for a command
    pub const fn new() -> Self {
        Self {
            expect: Expect::Command,
        }
    }

    /// Abandon a partially entered cycle
    pub fn reset(&mut self) {
        self.expect = Expect::Command;
    }

    /// Check if the next token is a percentage
    pub fn awaiting_percentage(&self) -> bool {
        matches!(self.expect, Expect::Percentage(_))
    }

    /// Feed one token
    ///
    /// Returns `Ok(Some(request))` when a cycle completes, `Ok(None)` when a
    /// percentage is still needed.
    pub fn feed(&mut self, token: &str) -> Result<Option<MotionRequest>, CommandError> {
        match self.expect {
            Expect::Command => {
                let command = Command::parse(token)?;
                if let Some(request) = command.immediate_request() {
                    return Ok(Some(request));
                }
                if let Some(direction) = command.move_direction() {
                    self.expect = Expect::Percentage(direction);
                }
                Ok(None)
            }
            Expect::Percentage(direction) => {
                self.expect = Expect::Command;
                let percentage = Percentage::parse(token)?;
                Ok(Some(MotionRequest::Move {
                    direction,
                    percentage,
                }))
            }
        }
    }
}
