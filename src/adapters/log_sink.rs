//! Log-based message sink adapter.
//!
//! Implements [`MessageSink`] by writing outbound messages to the
//! logger (which goes to UART / USB-CDC in production).  The wire
//! codec adapter implements the same trait; this one stands in for it
//! during bring-up and on the host.

use log::info;

use crate::app::messages::OutboundMessage;
use crate::app::ports::MessageSink;

/// Adapter that logs every [`OutboundMessage`] to the serial console.
pub struct LogMessageSink;

impl LogMessageSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogMessageSink {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageSink for LogMessageSink {
    fn send(&mut self, message: &OutboundMessage) {
        match message {
            OutboundMessage::JoystickXy { x, y } => {
                info!("JOY   | x={:+.3} y={:+.3}", x, y);
            }
            OutboundMessage::Counter(n) => {
                info!("COUNT | {}", n);
            }
            OutboundMessage::ButtonPressed(button) => {
                info!("BTN   | {:?} pressed", button);
            }
            OutboundMessage::Fault(msg) => {
                info!("FAULT | {}", msg);
            }
        }
    }
}
