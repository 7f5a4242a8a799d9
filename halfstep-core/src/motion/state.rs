//! Motion state aggregate
//!
//! Field ownership across contexts:
//! - tick handler: advances `phase`, counts `steps_taken`, consumes `limit`,
//!   ends exhausted runs
//! - button handler: starts indefinite runs, writes `last_button` and
//!   `recorded_interval` on stop
//! - command interpreter: starts bounded and oscillating runs, stops on
//!   command 0, consumes `recorded_interval`

use crate::phase::{PhaseIndex, PhasePattern};
use crate::traits::Direction;

use super::scaling::{scaled_steps, Percentage};

/// Baseline step count used when no recorded interval is available
pub const DEFAULT_BASELINE_STEPS: u32 = 1000;

/// Run mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Motor de-energised
    Idle,
    /// Stepping clockwise
    RunCw,
    /// Stepping counter-clockwise
    RunCcw,
    /// Free run, direction driven by the direction-sense input
    Oscillate,
}

impl Mode {
    /// Running mode for a fixed direction
    pub fn run(direction: Direction) -> Self {
        match direction {
            Direction::Clockwise => Mode::RunCw,
            Direction::CounterClockwise => Mode::RunCcw,
        }
    }

    /// Check if the motor is being stepped in this mode
    pub fn is_running(&self) -> bool {
        !matches!(self, Mode::Idle)
    }
}

/// How many more steps a run may take
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunLimit {
    /// Countdown; the tick that brings it to `Bounded(0)` ends the run
    Bounded(u32),
    /// Run until stopped externally
    Unbounded,
}

impl RunLimit {
    /// Check if no steps remain
    pub fn is_exhausted(&self) -> bool {
        matches!(self, RunLimit::Bounded(0))
    }

    /// Limit after one step has been taken
    fn consume_one(self) -> Self {
        match self {
            RunLimit::Bounded(n) => RunLimit::Bounded(n.saturating_sub(1)),
            RunLimit::Unbounded => RunLimit::Unbounded,
        }
    }
}

/// Physical start/stop buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    A,
    B,
}

/// Motion request issued by the command interpreter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionRequest {
    /// Command 0: stop immediately
    Stop,
    /// Commands 1 and 2: bounded move scaled by a percentage
    Move {
        direction: Direction,
        percentage: Percentage,
    },
    /// Command 3: free run
    Oscillate,
}

/// Base a bounded move was scaled from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepSource {
    /// Interval recorded between two button presses (consumed)
    Recorded,
    /// Fixed baseline / calibration count
    Baseline,
}

/// Result of applying a [`MotionRequest`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Dispatch {
    /// Motor stopped, output forced off
    Stopped,
    /// Bounded move started
    Move {
        direction: Direction,
        steps: u32,
        source: StepSource,
    },
    /// Free run started; carries the recorded interval it consumed, if any
    Oscillate { consumed: Option<u32> },
}

impl Dispatch {
    /// Check if the drive output must be forced off right away
    pub fn forces_off(&self) -> bool {
        matches!(self, Dispatch::Stopped)
    }
}

/// Result of a button press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressOutcome {
    /// Indefinite run started in the given direction
    Started(Direction),
    /// Same button pressed again while running
    Ignored,
    /// Run stopped, step count recorded
    Stopped { recorded: u32 },
}

/// The shared motion state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionState {
    phase: PhaseIndex,
    mode: Mode,
    direction: Direction,
    limit: RunLimit,
    steps_taken: u32,
    recorded_interval: u32,
    last_button: Option<Button>,
    baseline_steps: u32,
}

/// Consistent copy of the state, as handed to foreground readers
pub type MotionSnapshot = MotionState;

impl Default for MotionState {
    fn default() -> Self {
        Self::new(DEFAULT_BASELINE_STEPS)
    }
}

impl MotionState {
    /// Power-on state: idle, nothing recorded
    pub const fn new(baseline_steps: u32) -> Self {
        Self {
            phase: PhaseIndex::ZERO,
            mode: Mode::Idle,
            direction: Direction::Clockwise,
            limit: RunLimit::Bounded(0),
            steps_taken: 0,
            recorded_interval: 0,
            last_button: None,
            baseline_steps,
        }
    }

    /// Current phase index
    pub fn phase(&self) -> PhaseIndex {
        self.phase
    }

    /// Current mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Direction of the current (or most recent) run
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Remaining step budget
    pub fn limit(&self) -> RunLimit {
        self.limit
    }

    /// Steps taken since the current run started
    pub fn steps_taken(&self) -> u32 {
        self.steps_taken
    }

    /// Button that started the current run, if a button did
    pub fn last_button(&self) -> Option<Button> {
        self.last_button
    }

    /// Baseline step count (also the oscillate calibration counter)
    pub fn baseline_steps(&self) -> u32 {
        self.baseline_steps
    }

    /// Check if the motor is being stepped
    pub fn is_running(&self) -> bool {
        self.mode.is_running()
    }

    /// Interval recorded by the last button stop
    ///
    /// Only meaningful while idle; returns `None` whenever a run is active.
    pub fn recorded_interval(&self) -> Option<u32> {
        (!self.is_running()).then_some(self.recorded_interval)
    }

    /// Tick handler body: one step of the active run
    ///
    /// Returns the pattern to write to the drive output this tick.
    pub fn tick(&mut self, reverse_requested: bool) -> PhasePattern {
        match self.mode {
            Mode::RunCw | Mode::RunCcw => {
                if self.limit.is_exhausted() {
                    self.mode = Mode::Idle;
                    return PhasePattern::OFF;
                }
                let pattern = self.advance(self.direction);
                self.limit = self.limit.consume_one();
                if self.limit.is_exhausted() {
                    // last budgeted step taken: the run ends this tick
                    self.mode = Mode::Idle;
                    return PhasePattern::OFF;
                }
                pattern
            }
            Mode::Oscillate => {
                if reverse_requested {
                    self.direction = self.direction.opposite();
                }
                let pattern = self.advance(self.direction);
                self.baseline_steps = self.baseline_steps.saturating_add(1);
                pattern
            }
            Mode::Idle => PhasePattern::OFF,
        }
    }

    /// Button handler body
    ///
    /// While idle any button starts an indefinite run, alternating direction
    /// from the previous run. While running, the other button stops the run
    /// and records the steps taken; the same button again is a no-op.
    pub fn press(&mut self, button: Button) -> PressOutcome {
        if !self.is_running() {
            let direction = self.direction.opposite();
            self.start(Mode::run(direction), direction, RunLimit::Unbounded);
            self.recorded_interval = 0;
            self.last_button = Some(button);
            return PressOutcome::Started(direction);
        }

        if self.last_button == Some(button) {
            return PressOutcome::Ignored;
        }

        self.halt();
        self.recorded_interval = self.steps_taken;
        self.last_button = None;
        PressOutcome::Stopped {
            recorded: self.recorded_interval,
        }
    }

    /// Command interpreter body for a validated request
    pub fn dispatch(&mut self, request: MotionRequest) -> Dispatch {
        match request {
            MotionRequest::Stop => {
                self.halt();
                Dispatch::Stopped
            }
            MotionRequest::Move {
                direction,
                percentage,
            } => {
                let (base, source) = match self.take_recorded() {
                    Some(recorded) => (recorded, StepSource::Recorded),
                    None => (self.baseline_steps, StepSource::Baseline),
                };
                let steps = scaled_steps(base, percentage);
                self.start(Mode::run(direction), direction, RunLimit::Bounded(steps));
                Dispatch::Move {
                    direction,
                    steps,
                    source,
                }
            }
            MotionRequest::Oscillate => {
                let consumed = self.take_recorded();
                self.baseline_steps = 0;
                self.start(Mode::Oscillate, Direction::Clockwise, RunLimit::Unbounded);
                Dispatch::Oscillate { consumed }
            }
        }
    }

    /// Consume the recorded interval if one is usable
    fn take_recorded(&mut self) -> Option<u32> {
        let recorded = self.recorded_interval().filter(|&steps| steps > 0);
        if recorded.is_some() {
            self.recorded_interval = 0;
        }
        recorded
    }

    fn start(&mut self, mode: Mode, direction: Direction, limit: RunLimit) {
        self.mode = mode;
        self.direction = direction;
        self.limit = limit;
        self.steps_taken = 0;
    }

    fn halt(&mut self) {
        self.mode = Mode::Idle;
        self.limit = RunLimit::Bounded(0);
    }

    fn advance(&mut self, direction: Direction) -> PhasePattern {
        self.phase = self.phase.advance(direction);
        self.steps_taken = self.steps_taken.saturating_add(1);
        self.phase.pattern()
    }
}
