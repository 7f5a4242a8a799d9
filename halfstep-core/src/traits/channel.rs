//! Command channel seam
//!
//! A line-oriented text transport. The interpreter only ever reads one token
//! at a time and writes whole lines back.

use halfstep_protocol::Token;

/// Errors reported by a command channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelError {
    /// Transport-level read or write failure
    Io,
    /// Received line did not fit in a token
    LineTooLong,
}

/// Line-oriented command transport
#[allow(async_fn_in_trait)]
pub trait CommandChannel {
    /// Wait for the next token (one input line, trimmed)
    async fn read_token(&mut self) -> Result<Token, ChannelError>;

    /// Write one line of text; the implementation appends the line ending
    async fn write_line(&mut self, text: &str) -> Result<(), ChannelError>;
}
