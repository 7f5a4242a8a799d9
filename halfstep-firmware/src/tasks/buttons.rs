//! Start/stop button task

use defmt::*;

use halfstep_core::motion::PressOutcome;
use halfstep_hal_rp2040::ButtonPair;

use super::Core;

/// Button task - applies debounced presses to the control core
#[embassy_executor::task]
pub async fn button_task(core: &'static Core, mut buttons: ButtonPair<'static>) {
    info!("Button task started");

    loop {
        let button = buttons.next_press().await;

        match core.on_button_press(button) {
            PressOutcome::Started(direction) => {
                info!("Button {:?}: run started {:?}", button, direction);
            }
            PressOutcome::Ignored => {
                debug!("Button {:?}: already running", button);
            }
            PressOutcome::Stopped { recorded } => {
                info!("Button {:?}: stopped, recorded {} steps", button, recorded);
            }
        }
    }
}
