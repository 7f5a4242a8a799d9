//! Token framing for the command channel.
//!
//! Bytes are accumulated until a line terminator:
//! - CR or LF ends a token
//! - an LF directly after a CR is swallowed, so CRLF yields one token
//! - non-printable bytes are dropped
//! - surrounding spaces are trimmed, an empty line is a valid (empty) token

use heapless::String;

/// Maximum token length in bytes
pub const MAX_TOKEN_LEN: usize = 8;

/// A single line of input, trimmed
pub type Token = String<MAX_TOKEN_LEN>;

/// Errors that can occur while assembling a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Line exceeded [`MAX_TOKEN_LEN`] and was discarded
    TooLong,
}

/// Assembles command-channel bytes into tokens
#[derive(Debug, Clone)]
pub struct LineReader {
    buffer: Token,
    overflowed: bool,
    last_was_cr: bool,
}

impl Default for LineReader {
    fn default() -> Self {
        Self::new()
    }
}

impl LineReader {
    /// Create a new line reader
    pub const fn new() -> Self {
        Self {
            buffer: String::new(),
            overflowed: false,
            last_was_cr: false,
        }
    }

    /// Drop any partially received line
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.overflowed = false;
        self.last_was_cr = false;
    }

    /// Feed a single byte to the reader
    ///
    /// Returns `Ok(Some(token))` when a line terminator completes a token,
    /// `Ok(None)` when more bytes are needed, or `Err` if the completed line
    /// was too long.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Token>, LineError> {
        let after_cr = self.last_was_cr;
        self.last_was_cr = byte == b'\r';

        match byte {
            b'\n' if after_cr => Ok(None),
            b'\r' | b'\n' => self.finish(),
            b' '..=b'~' => {
                if self.buffer.push(byte as char).is_err() {
                    self.overflowed = true;
                }
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    /// Feed multiple bytes to the reader
    ///
    /// Returns the first complete token found, if any, together with the
    /// number of bytes consumed. Bytes after a complete token are left for
    /// the next call.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> (usize, Result<Option<Token>, LineError>) {
        for (i, &byte) in bytes.iter().enumerate() {
            match self.feed(byte) {
                Ok(None) => {}
                done => return (i + 1, done),
            }
        }
        (bytes.len(), Ok(None))
    }

    fn finish(&mut self) -> Result<Option<Token>, LineError> {
        if self.overflowed {
            self.buffer.clear();
            self.overflowed = false;
            return Err(LineError::TooLong);
        }

        let mut token = Token::new();
        // Cannot fail: the trimmed line is never longer than the buffer
        let _ = token.push_str(self.buffer.trim());
        self.buffer.clear();
        Ok(Some(token))
    }
}
