//! Motion state and its transitions
//!
//! [`MotionState`] is the single aggregate shared by the tick, button and
//! command contexts. It is plain data here; [`crate::control::ControlCore`]
//! is what makes access to it atomic.

pub mod scaling;
pub mod state;

pub use scaling::{scaled_steps, Percentage};
pub use state::{
    Button, Dispatch, Mode, MotionRequest, MotionSnapshot, MotionState, PressOutcome, RunLimit,
    StepSource, DEFAULT_BASELINE_STEPS,
};
