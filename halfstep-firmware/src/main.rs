//! Halfstep - Half-step stepper motor controller
//!
//! Main firmware binary for RP2040-based boards. A unipolar stepper is
//! driven through four phase lines, started and stopped from two buttons,
//! and moved by percentage from serial commands.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_rp::bind_interrupts;
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use halfstep_drivers::ButtonSense;
use halfstep_hal_rp2040::phase::phase_lines;
use halfstep_hal_rp2040::uart::uart_channel;
use halfstep_hal_rp2040::ButtonPair;

use crate::tasks::Core;

mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

/// Executor for the tick and button tasks
static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_HIGH.on_interrupt()
}

// Static cells for state shared across executors (must live forever)
static CORE: StaticCell<Core> = StaticCell::new();
static SENSE: StaticCell<ButtonSense> = StaticCell::new();

// Static cells for UART buffers
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Halfstep firmware starting...");

    let p = embassy_rp::init(Default::default());
    let config = config::load();

    // Phase lines: GPIO2..GPIO5 carry pattern bits 0..3
    let drive = phase_lines(p.PIN_2, p.PIN_3, p.PIN_4, p.PIN_5, false);
    let core: &'static Core = CORE.init(Core::new(drive, config.motion.baseline_steps));
    core.init();
    info!("Phase lines initialized");

    // Buttons: A on GPIO6, B on GPIO7, both to ground
    let sense: &'static ButtonSense = SENSE.init(ButtonSense::new(config.buttons.reverse_level));
    let buttons = ButtonPair::new(p.PIN_6, p.PIN_7, config.buttons.debounce_ms, sense);
    info!("Buttons initialized");

    // Command channel on UART0 (GPIO0 TX, GPIO1 RX)
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = config.serial.baudrate;

    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 64]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();
    let channel = uart_channel(rx, tx);
    info!("UART initialized at {} baud", config.serial.baudrate);

    // Tick and button handlers preempt the command loop but not each other
    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let high = EXECUTOR_HIGH.start(interrupt::SWI_IRQ_1);

    high.spawn(tasks::tick_task(core, sense, config.motion.tick_period_us))
        .unwrap();
    high.spawn(tasks::button_task(core, buttons)).unwrap();
    spawner
        .spawn(tasks::command_task(core, channel, config.commands))
        .unwrap();

    info!("All tasks spawned, firmware running");
}
