//! Board-agnostic control core for the halfstep controller
//!
//! This crate contains all motion logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware seam traits (drive output, direction sense, command channel)
//! - Half-step phase sequencer
//! - Motion state and its tick / button / command transitions
//! - Shared control core guarding the state across execution contexts
//! - Serial command interpreter
//! - Button debounce filter
//! - Configuration types and parser

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod config;
pub mod control;
pub mod input;
pub mod motion;
pub mod phase;
pub mod traits;

pub use control::ControlCore;
