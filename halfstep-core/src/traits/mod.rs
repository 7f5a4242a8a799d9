//! Hardware abstraction traits
//!
//! These traits define the interface between the control core
//! and hardware-specific implementations.

pub mod channel;
pub mod drive;

pub use channel::{ChannelError, CommandChannel};
pub use drive::{Direction, DirectionSense, DriveOutput};
