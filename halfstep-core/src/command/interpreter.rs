//! Command interpreter loop body

use halfstep_protocol::Reply;

use crate::config::CommandPolicy;
use crate::control::ControlCore;
use crate::motion::Dispatch;
use crate::traits::{ChannelError, CommandChannel, DriveOutput};

use super::{CommandError, CommandParser};

/// Result of one command cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// A request was applied to the motion state
    Applied(Dispatch),
    /// The cycle was rejected; motion state untouched unless the
    /// fail-safe policy stopped the motor
    Rejected(CommandError),
    /// An input line overflowed the token buffer and was dropped
    Overlong,
}

/// Reads commands from a channel and applies them to the control core
#[derive(Debug, Clone)]
pub struct CommandInterpreter {
    parser: CommandParser,
    policy: CommandPolicy,
}

impl CommandInterpreter {
    /// Create an interpreter with the given invalid-input policy
    pub const fn new(policy: CommandPolicy) -> Self {
        Self {
            parser: CommandParser::new(),
            policy,
        }
    }

    /// Run one command cycle
    ///
    /// Reads tokens until a cycle completes or fails. Rejections are
    /// reported on the channel and returned as [`Outcome::Rejected`]; only
    /// transport failures surface as `Err`.
    pub async fn run_cycle<C, D>(
        &mut self,
        channel: &mut C,
        core: &ControlCore<D>,
    ) -> Result<Outcome, ChannelError>
    where
        C: CommandChannel,
        D: DriveOutput,
    {
        loop {
            let token = match channel.read_token().await {
                Ok(token) => token,
                Err(ChannelError::LineTooLong) => {
                    self.parser.reset();
                    channel.write_line(Reply::LineTooLong.as_str()).await?;
                    return Ok(Outcome::Overlong);
                }
                Err(e) => {
                    self.parser.reset();
                    return Err(e);
                }
            };

            match self.parser.feed(&token) {
                Ok(None) => continue,
                Ok(Some(request)) => return Ok(Outcome::Applied(core.submit(request))),
                Err(error) => {
                    if error == CommandError::InvalidCommand && self.policy.stop_on_invalid {
                        core.stop();
                    }
                    channel.write_line(error.reply().as_str()).await?;
                    return Ok(Outcome::Rejected(error));
                }
            }
        }
    }
}
