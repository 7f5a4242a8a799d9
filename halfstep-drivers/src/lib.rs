//! Hardware driver implementations for the halfstep controller
//!
//! Drivers are generic over `embedded-hal` pin traits so they can be
//! exercised on the host with mock pins.
//!
//! - [`PhaseLines`]: four coil lines driven from a phase pattern
//! - [`ButtonSense`]: latest button line levels, read by the tick handler
//! - [`SerialChannel`]: line-oriented command channel over a byte stream

#![no_std]
#![deny(unsafe_code)]

pub mod phase_lines;
pub mod sense;
pub mod serial;

pub use phase_lines::PhaseLines;
pub use sense::ButtonSense;
pub use serial::SerialChannel;
