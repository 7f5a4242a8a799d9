//! Serial command channel protocol
//!
//! The controller is driven over a plain 8N1 UART by a human or a script.
//! Input is line oriented: every line carries exactly one token.
//!
//! ```text
//! "1\r\n"    command token   (0 = stop, 1 = cw, 2 = ccw, 3 = oscillate)
//! "50\r\n"   percentage token (commands 1 and 2 only, empty line = 100)
//! ```
//!
//! Anything the controller sends back is a single text line (see [`Reply`]).

#![no_std]
#![deny(unsafe_code)]

pub mod line;
pub mod reply;

pub use line::{LineError, LineReader, Token, MAX_TOKEN_LEN};
pub use reply::{Reply, LINE_ENDING};
