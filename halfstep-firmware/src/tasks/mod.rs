//! Embassy async tasks
//!
//! The tick and button tasks run on the interrupt executor and never
//! preempt each other; the command task runs in thread mode.

pub mod buttons;
pub mod command;
pub mod tick;

pub use buttons::button_task;
pub use command::command_task;
pub use tick::tick_task;

use halfstep_core::ControlCore;
use halfstep_hal_rp2040::RpPhaseLines;

/// Control core driving the board's phase lines
pub type Core = ControlCore<RpPhaseLines<'static>>;
