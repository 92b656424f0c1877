//! Inbound commands to the panel.
//!
//! These represent actions requested by the host over the serial link.
//! Decoding bytes into a [`Command`] is the codec adapter's job; this
//! module only defines the command set and how it drives the actuators.

use log::info;

use crate::app::ports::OutputPort;

/// Commands the host can send to the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Switch the indicator LED on or off.
    SetLed(bool),

    /// Drive the buzzer at the given frequency in Hz; 0 silences it.
    SetTone(u32),
}

/// Apply a decoded command to the actuators.
pub fn apply(command: Command, outputs: &mut impl OutputPort) {
    match command {
        Command::SetLed(on) => {
            info!("command: LED {}", if on { "on" } else { "off" });
            outputs.set_led(on);
        }
        Command::SetTone(frequency_hz) => {
            if frequency_hz == 0 {
                info!("command: tone off");
            } else {
                info!("command: tone {frequency_hz} Hz");
            }
            outputs.set_tone(frequency_hz);
        }
    }
}
