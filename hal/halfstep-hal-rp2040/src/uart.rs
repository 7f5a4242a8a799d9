//! Command channel on a buffered UART

use embassy_rp::uart::{BufferedUartRx, BufferedUartTx};

use halfstep_drivers::SerialChannel;

/// Command channel on the RP2040 buffered UART halves
pub type UartChannel = SerialChannel<BufferedUartRx, BufferedUartTx>;

/// Wrap the halves of a split buffered UART
pub fn uart_channel(rx: BufferedUartRx, tx: BufferedUartTx) -> UartChannel {
    SerialChannel::new(rx, tx)
}
