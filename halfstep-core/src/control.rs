//! Shared control core
//!
//! Owns the [`MotionState`] together with the drive output and serialises
//! every access through a critical section. The tick handler, the button
//! handler and the command interpreter each perform their whole
//! read-modify-write (plus the drive write that goes with it) inside one
//! critical section, so no context can observe a half-applied transition,
//! e.g. a running mode paired with the step budget of a previous run.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::motion::{
    Button, Dispatch, Mode, MotionRequest, MotionSnapshot, MotionState, PressOutcome,
};
use crate::phase::PhasePattern;
use crate::traits::{DirectionSense, DriveOutput};

struct Shared<D> {
    state: MotionState,
    drive: D,
}

/// Motion state plus drive output, shared between execution contexts
pub struct ControlCore<D> {
    inner: Mutex<CriticalSectionRawMutex, RefCell<Shared<D>>>,
}

impl<D: DriveOutput> ControlCore<D> {
    /// Create the control core; the motor starts idle
    pub const fn new(drive: D, baseline_steps: u32) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Shared {
                state: MotionState::new(baseline_steps),
                drive,
            })),
        }
    }

    /// Drive the outputs to the idle pattern
    ///
    /// Call once at boot before the tick source is started.
    pub fn init(&self) {
        self.with(|shared| shared.drive.set_output(PhasePattern::OFF));
    }

    /// Periodic tick: exactly one drive write per call
    ///
    /// `sense` is consulted only in oscillate mode.
    pub fn on_tick<S: DirectionSense>(&self, sense: &S) {
        self.with(|shared| {
            let reverse = shared.state.mode() == Mode::Oscillate
                && sense.reversal_requested();
            let pattern = shared.state.tick(reverse);
            shared.drive.set_output(pattern);
        })
    }

    /// Debounced button press
    ///
    /// A stopping press forces the output off immediately rather than
    /// waiting for the next tick.
    pub fn on_button_press(&self, button: Button) -> PressOutcome {
        self.with(|shared| {
            let outcome = shared.state.press(button);
            if matches!(outcome, PressOutcome::Stopped { .. }) {
                shared.drive.set_output(PhasePattern::OFF);
            }
            outcome
        })
    }

    /// Apply a validated motion request from the command interpreter
    pub fn submit(&self, request: MotionRequest) -> Dispatch {
        self.with(|shared| {
            let dispatch = shared.state.dispatch(request);
            if dispatch.forces_off() {
                shared.drive.set_output(PhasePattern::OFF);
            }
            dispatch
        })
    }

    /// Stop the motor (fail-safe path)
    pub fn stop(&self) {
        self.submit(MotionRequest::Stop);
    }

    /// Consistent copy of the motion state
    pub fn snapshot(&self) -> MotionSnapshot {
        self.with(|shared| shared.state)
    }

    /// Run `f` with exclusive access to the drive output
    pub fn with_drive<R>(&self, f: impl FnOnce(&mut D) -> R) -> R {
        self.with(|shared| f(&mut shared.drive))
    }

    fn with<R>(&self, f: impl FnOnce(&mut Shared<D>) -> R) -> R {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::{Percentage, RunLimit};
    use crate::traits::Direction;

    /// Drive output that records every write
    #[derive(Default)]
    struct RecordingDrive {
        last: Option<PhasePattern>,
        writes: u32,
    }

    impl DriveOutput for RecordingDrive {
        fn set_output(&mut self, pattern: PhasePattern) {
            self.last = Some(pattern);
            self.writes += 1;
        }
    }

    fn core() -> ControlCore<RecordingDrive> {
        ControlCore::new(RecordingDrive::default(), 1000)
    }

    #[test]
    fn test_one_write_per_tick() {
        let core = core();
        for _ in 0..5 {
            core.on_tick(&false);
        }
        core.with_drive(|d| {
            assert_eq!(d.writes, 5);
            assert_eq!(d.last, Some(PhasePattern::OFF));
        });
    }

    #[test]
    fn test_tick_writes_new_phase() {
        let core = core();
        core.on_button_press(Button::A); // ccw
        core.on_tick(&false);
        core.with_drive(|d| assert_eq!(d.last.map(PhasePattern::bits), Some(0b1001)));
    }

    #[test]
    fn test_button_stop_forces_off_without_tick() {
        let core = core();
        core.on_button_press(Button::A);
        core.on_tick(&false);
        core.on_tick(&false);

        let outcome = core.on_button_press(Button::B);
        assert_eq!(outcome, PressOutcome::Stopped { recorded: 2 });
        core.with_drive(|d| {
            assert_eq!(d.last, Some(PhasePattern::OFF));
            assert_eq!(d.writes, 3);
        });
    }

    #[test]
    fn test_button_start_does_not_write() {
        let core = core();
        core.on_button_press(Button::A);
        core.on_button_press(Button::A);
        core.with_drive(|d| assert_eq!(d.writes, 0));
    }

    #[test]
    fn test_stop_command_forces_off() {
        let core = core();
        core.submit(MotionRequest::Move {
            direction: Direction::Clockwise,
            percentage: Percentage::FULL,
        });
        core.on_tick(&false);

        core.stop();
        let snapshot = core.snapshot();
        assert_eq!(snapshot.mode(), Mode::Idle);
        assert_eq!(snapshot.limit(), RunLimit::Bounded(0));
        core.with_drive(|d| assert_eq!(d.last, Some(PhasePattern::OFF)));
    }

    #[test]
    fn test_sense_ignored_outside_oscillate() {
        let core = core();
        core.submit(MotionRequest::Move {
            direction: Direction::Clockwise,
            percentage: Percentage::FULL,
        });
        core.on_tick(&true);
        core.on_tick(&true);
        let snapshot = core.snapshot();
        assert_eq!(snapshot.direction(), Direction::Clockwise);
        assert_eq!(snapshot.phase().get(), 2);
    }

    #[test]
    fn test_init_writes_off() {
        let core = core();
        core.init();
        core.with_drive(|d| {
            assert_eq!(d.writes, 1);
            assert_eq!(d.last, Some(PhasePattern::OFF));
        });
    }
}
