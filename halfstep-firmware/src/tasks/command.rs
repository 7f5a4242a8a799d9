//! Serial command task

use defmt::*;

use halfstep_core::command::{CommandInterpreter, Outcome};
use halfstep_core::config::CommandPolicy;
use halfstep_core::motion::Dispatch;
use halfstep_hal_rp2040::UartChannel;

use super::Core;

/// Command task - runs command cycles from the UART
#[embassy_executor::task]
pub async fn command_task(core: &'static Core, mut channel: UartChannel, policy: CommandPolicy) {
    info!("Command task started");

    let mut interpreter = CommandInterpreter::new(policy);

    loop {
        match interpreter.run_cycle(&mut channel, core).await {
            Ok(Outcome::Applied(dispatch)) => log_dispatch(dispatch),
            Ok(Outcome::Rejected(e)) => {
                warn!("Command rejected: {:?}", e);
            }
            Ok(Outcome::Overlong) => {
                warn!("Command line too long, dropped");
            }
            Err(e) => {
                warn!("UART error: {:?}", e);
            }
        }
    }
}

fn log_dispatch(dispatch: Dispatch) {
    match dispatch {
        Dispatch::Stopped => info!("Stop"),
        Dispatch::Move {
            direction,
            steps,
            source,
        } => {
            info!("Move {:?} {} steps (from {:?})", direction, steps, source);
        }
        Dispatch::Oscillate { consumed } => {
            info!("Free run (consumed interval: {:?})", consumed);
        }
    }
}
