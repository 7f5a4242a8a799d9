//! RP2040-specific HAL for the halfstep controller
//!
//! This crate binds the board-agnostic drivers to RP2040 peripherals:
//!
//! - Start/stop buttons on GPIO inputs with edge interrupts
//! - Command channel on a buffered UART
//! - Coil phase lines on GPIO outputs

#![no_std]

pub mod buttons;
pub mod phase;
pub mod uart;

pub use buttons::ButtonPair;
pub use phase::RpPhaseLines;
pub use uart::UartChannel;
