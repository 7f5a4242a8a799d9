//! Command channel over a serial byte stream

use embedded_io_async::{Read, Write};
use halfstep_core::traits::{ChannelError, CommandChannel};
use halfstep_protocol::{LineError, LineReader, Token, LINE_ENDING};

/// Receive chunk size
const RX_BUF_SIZE: usize = 32;

/// Line-oriented command channel on top of async serial halves
///
/// Bytes received past the end of a token are kept for the next read.
pub struct SerialChannel<R, W> {
    rx: R,
    tx: W,
    reader: LineReader,
    buf: [u8; RX_BUF_SIZE],
    pos: usize,
    len: usize,
}

impl<R: Read, W: Write> SerialChannel<R, W> {
    /// Create a channel from receive and transmit halves
    pub fn new(rx: R, tx: W) -> Self {
        Self {
            rx,
            tx,
            reader: LineReader::new(),
            buf: [0; RX_BUF_SIZE],
            pos: 0,
            len: 0,
        }
    }
}

impl<R: Read, W: Write> CommandChannel for SerialChannel<R, W> {
    async fn read_token(&mut self) -> Result<Token, ChannelError> {
        loop {
            let (used, result) = self.reader.feed_bytes(&self.buf[self.pos..self.len]);
            self.pos += used;

            match result {
                Ok(Some(token)) => return Ok(token),
                Ok(None) => {}
                Err(LineError::TooLong) => return Err(ChannelError::LineTooLong),
            }

            let read = self.rx.read(&mut self.buf).await;
            self.pos = 0;
            self.len = 0;
            match read {
                // End of stream: no further bytes will arrive
                Ok(0) | Err(_) => {
                    self.reader.reset();
                    return Err(ChannelError::Io);
                }
                Ok(n) => self.len = n,
            }
        }
    }

    async fn write_line(&mut self, text: &str) -> Result<(), ChannelError> {
        self.tx
            .write_all(text.as_bytes())
            .await
            .map_err(|_| ChannelError::Io)?;
        self.tx
            .write_all(LINE_ENDING.as_bytes())
            .await
            .map_err(|_| ChannelError::Io)?;
        self.tx.flush().await.map_err(|_| ChannelError::Io)
    }
}
