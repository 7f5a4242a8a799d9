//! Stepping tick
//!
//! Advances the active run by one half-step per period.

use defmt::*;
use embassy_time::{Duration, Ticker};

use halfstep_drivers::ButtonSense;

use super::Core;

/// Tick task - one control core tick per period
#[embassy_executor::task]
pub async fn tick_task(core: &'static Core, sense: &'static ButtonSense, period_us: u32) {
    info!("Tick task started ({} us)", period_us);

    let mut ticker = Ticker::every(Duration::from_micros(period_us as u64));

    loop {
        ticker.next().await;
        core.on_tick(sense);
    }
}
