//! End-to-end scenarios through the control core and command interpreter

use embassy_futures::block_on;
use halfstep_core::command::{CommandError, CommandInterpreter, Outcome};
use halfstep_core::config::CommandPolicy;
use halfstep_core::motion::{Button, Dispatch, Mode, PressOutcome, RunLimit, StepSource};
use halfstep_core::phase::PhasePattern;
use halfstep_core::traits::{ChannelError, CommandChannel, Direction, DriveOutput};
use halfstep_core::ControlCore;
use halfstep_protocol::{Reply, Token};

/// Drive output that keeps the last pattern and a write count
#[derive(Default)]
struct Coils {
    last: Option<PhasePattern>,
    writes: u32,
}

impl DriveOutput for Coils {
    fn set_output(&mut self, pattern: PhasePattern) {
        self.last = Some(pattern);
        self.writes += 1;
    }
}

/// Command channel replaying a fixed script
struct Script<'a> {
    lines: &'a [&'a str],
    next: usize,
    replies: heapless::Vec<&'static str, 4>,
}

impl<'a> Script<'a> {
    fn new(lines: &'a [&'a str]) -> Self {
        Self {
            lines,
            next: 0,
            replies: heapless::Vec::new(),
        }
    }
}

impl CommandChannel for Script<'_> {
    async fn read_token(&mut self) -> Result<Token, ChannelError> {
        let line = self.lines.get(self.next).ok_or(ChannelError::Io)?;
        self.next += 1;
        Token::try_from(*line).map_err(|_| ChannelError::LineTooLong)
    }

    async fn write_line(&mut self, text: &str) -> Result<(), ChannelError> {
        let reply = [Reply::InvalidCommand, Reply::InvalidPercentage, Reply::LineTooLong]
            .into_iter()
            .map(|r| r.as_str())
            .find(|r| *r == text)
            .ok_or(ChannelError::Io)?;
        self.replies.push(reply).map_err(|_| ChannelError::Io)
    }
}

fn controller() -> ControlCore<Coils> {
    let core = ControlCore::new(Coils::default(), 1000);
    core.init();
    core
}

fn ticks(core: &ControlCore<Coils>, n: u32) {
    for _ in 0..n {
        core.on_tick(&false);
    }
}

/// Record an interval of `steps` with a button start/stop pair
fn record(core: &ControlCore<Coils>, steps: u32) {
    assert!(matches!(core.on_button_press(Button::A), PressOutcome::Started(_)));
    ticks(core, steps);
    assert_eq!(
        core.on_button_press(Button::B),
        PressOutcome::Stopped { recorded: steps }
    );
}

fn run(core: &ControlCore<Coils>, lines: &[&str]) -> (Result<Outcome, ChannelError>, usize) {
    let mut script = Script::new(lines);
    let mut interpreter = CommandInterpreter::new(CommandPolicy::default());
    let outcome = block_on(interpreter.run_cycle(&mut script, core));
    (outcome, script.replies.len())
}

#[test]
fn test_half_of_recorded_interval() {
    let core = controller();
    record(&core, 200);
    assert_eq!(core.snapshot().recorded_interval(), Some(200));

    let (outcome, replies) = run(&core, &["1", "50"]);
    assert_eq!(
        outcome,
        Ok(Outcome::Applied(Dispatch::Move {
            direction: Direction::Clockwise,
            steps: 100,
            source: StepSource::Recorded,
        }))
    );
    assert_eq!(replies, 0);

    let state = core.snapshot();
    assert_eq!(state.mode(), Mode::RunCw);
    assert_eq!(state.limit(), RunLimit::Bounded(100));
    assert_eq!(state.steps_taken(), 0);
    // Consumed
    assert_eq!(state.recorded_interval(), None);
    core.stop();
    assert_eq!(core.snapshot().recorded_interval(), Some(0));
}

#[test]
fn test_small_interval_clamps_to_one_step() {
    let core = controller();
    record(&core, 3);

    let (outcome, _) = run(&core, &["2", "10"]);
    assert_eq!(
        outcome,
        Ok(Outcome::Applied(Dispatch::Move {
            direction: Direction::CounterClockwise,
            steps: 1,
            source: StepSource::Recorded,
        }))
    );
    assert_eq!(core.snapshot().limit(), RunLimit::Bounded(1));
}

#[test]
fn test_unknown_command_leaves_state_alone() {
    let core = controller();
    record(&core, 42);
    let before = core.snapshot();

    let (outcome, replies) = run(&core, &["9"]);
    assert_eq!(outcome, Ok(Outcome::Rejected(CommandError::InvalidCommand)));
    assert_eq!(replies, 1);
    assert_eq!(core.snapshot(), before);
    assert_eq!(core.snapshot().recorded_interval(), Some(42));
    core.with_drive(|coils| assert_eq!(coils.last, Some(PhasePattern::OFF)));
}

#[test]
fn test_unknown_command_stops_running_motor() {
    let core = controller();
    run(&core, &["1", "100"]).0.unwrap();
    ticks(&core, 20);
    assert_eq!(core.snapshot().mode(), Mode::RunCw);

    let (outcome, replies) = run(&core, &["7"]);
    assert_eq!(outcome, Ok(Outcome::Rejected(CommandError::InvalidCommand)));
    assert_eq!(replies, 1);
    let state = core.snapshot();
    assert_eq!(state.mode(), Mode::Idle);
    assert_eq!(state.limit(), RunLimit::Bounded(0));
    assert_eq!(state.steps_taken(), 20);
    core.with_drive(|coils| assert_eq!(coils.last, Some(PhasePattern::OFF)));
}

#[test]
fn test_thousand_step_run_from_phase_zero() {
    let core = controller();
    let (outcome, _) = run(&core, &["1", ""]);
    assert!(matches!(
        outcome,
        Ok(Outcome::Applied(Dispatch::Move { steps: 1000, .. }))
    ));
    assert_eq!(core.snapshot().phase().get(), 0);

    ticks(&core, 999);
    let state = core.snapshot();
    assert_eq!(state.mode(), Mode::RunCw);
    assert_eq!(state.limit(), RunLimit::Bounded(1));
    core.with_drive(|coils| assert_eq!(coils.last, Some(state.phase().pattern())));

    // The 1000th step ends the run in the same tick
    ticks(&core, 1);
    let state = core.snapshot();
    assert_eq!(state.mode(), Mode::Idle);
    assert!(state.limit().is_exhausted());
    assert_eq!(state.steps_taken(), 1000);
    // 1000 is a multiple of 8
    assert_eq!(state.phase().get(), 0);
    core.with_drive(|coils| assert_eq!(coils.last, Some(PhasePattern::OFF)));
}

#[test]
fn test_stop_twice_matches_stop_once() {
    let core = controller();
    run(&core, &["3"]).0.unwrap();
    ticks(&core, 17);

    run(&core, &["0"]).0.unwrap();
    let once = core.snapshot();
    run(&core, &["0"]).0.unwrap();

    assert_eq!(core.snapshot(), once);
    assert_eq!(once.mode(), Mode::Idle);
    assert_eq!(once.limit(), RunLimit::Bounded(0));
    core.with_drive(|coils| assert_eq!(coils.last, Some(PhasePattern::OFF)));
}

#[test]
fn test_button_start_stop_protocol() {
    let core = controller();

    // Initial direction is clockwise, so the first press flips to CCW
    assert_eq!(
        core.on_button_press(Button::A),
        PressOutcome::Started(Direction::CounterClockwise)
    );
    ticks(&core, 5);
    assert_eq!(core.on_button_press(Button::A), PressOutcome::Ignored);
    ticks(&core, 7);

    let writes = core.with_drive(|coils| coils.writes);
    assert_eq!(
        core.on_button_press(Button::B),
        PressOutcome::Stopped { recorded: 12 }
    );
    // Stop is applied immediately, not on the next tick
    core.with_drive(|coils| {
        assert_eq!(coils.writes, writes + 1);
        assert_eq!(coils.last, Some(PhasePattern::OFF));
    });

    // Next start flips back to clockwise
    assert_eq!(
        core.on_button_press(Button::B),
        PressOutcome::Started(Direction::Clockwise)
    );
}

#[test]
fn test_free_run_calibrates_baseline() {
    let core = controller();
    let (outcome, _) = run(&core, &["3"]);
    assert_eq!(
        outcome,
        Ok(Outcome::Applied(Dispatch::Oscillate { consumed: None }))
    );
    assert_eq!(core.snapshot().baseline_steps(), 0);

    // No reversal requested: steady clockwise rotation
    ticks(&core, 400);
    let state = core.snapshot();
    assert_eq!(state.baseline_steps(), 400);
    assert_eq!(state.direction(), Direction::Clockwise);

    let (outcome, _) = run(&core, &["2", "25"]);
    assert_eq!(
        outcome,
        Ok(Outcome::Applied(Dispatch::Move {
            direction: Direction::CounterClockwise,
            steps: 100,
            source: StepSource::Baseline,
        }))
    );
}

#[test]
fn test_held_button_dithers_free_run() {
    let core = controller();
    run(&core, &["3"]).0.unwrap();

    // A button held for six ticks reverses on every one of them
    for _ in 0..6 {
        core.on_tick(&true);
    }
    let state = core.snapshot();
    // Alternating directions: ccw, cw, ccw, ...
    assert_eq!(state.phase().get(), 0);
    assert_eq!(state.steps_taken(), 6);
}

#[test]
fn test_button_stops_free_run() {
    let core = controller();
    run(&core, &["3"]).0.unwrap();
    ticks(&core, 9);

    assert_eq!(
        core.on_button_press(Button::B),
        PressOutcome::Stopped { recorded: 9 }
    );
    assert_eq!(core.snapshot().mode(), Mode::Idle);
}

#[test]
fn test_command_retarget_keeps_button_protocol() {
    let core = controller();
    core.on_button_press(Button::A);
    ticks(&core, 4);

    let (outcome, _) = run(&core, &["1", ""]);
    assert!(matches!(outcome, Ok(Outcome::Applied(Dispatch::Move { .. }))));
    ticks(&core, 6);

    // The button that started the run is still the active one
    assert_eq!(core.on_button_press(Button::A), PressOutcome::Ignored);
    assert_eq!(core.snapshot().mode(), Mode::RunCw);
    assert_eq!(
        core.on_button_press(Button::B),
        PressOutcome::Stopped { recorded: 6 }
    );
}
