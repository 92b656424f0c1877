//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ dispatch runtime / tasks (domain)
//! ```
//!
//! Driven adapters (GPIO, ADC, actuators, the wire codec) implement
//! these traits.  The dispatch runtime and the reporting tasks consume
//! them via generics or trait objects, so the domain core never touches
//! hardware directly.

use crate::app::messages::OutboundMessage;

// ───────────────────────────────────────────────────────────────
// Digital input port (driven adapter: hardware → trigger engine)
// ───────────────────────────────────────────────────────────────

/// Read-side port for digital input channels.
///
/// The [`EdgeTrigger`](crate::trigger::EdgeTrigger) configures and
/// samples its channels exclusively through this trait.
pub trait InputPort {
    /// Configure the channel as a digital input with internal pull-up.
    fn configure_pullup(&mut self, channel: i32);

    /// Sample the channel's current level (`true` = high).
    fn read(&mut self, channel: i32) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Analog input port (driven adapter: hardware → reporting tasks)
// ───────────────────────────────────────────────────────────────

/// Read-side port for analog channels (joystick axes).
pub trait AnalogPort {
    /// Raw ADC reading for the channel, right-aligned.
    fn read_raw(&mut self, channel: u32) -> u16;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the panel's actuators, driven by inbound
/// commands.
pub trait OutputPort {
    /// Switch the indicator LED.
    fn set_led(&mut self, on: bool);

    /// Drive the piezo buzzer at `frequency_hz`; 0 silences it.
    fn set_tone(&mut self, frequency_hz: u32);
}

// ───────────────────────────────────────────────────────────────
// Message sink port (driven adapter: domain → codec/transport)
// ───────────────────────────────────────────────────────────────

/// The domain emits [`OutboundMessage`]s through this port.  Adapters
/// on the other side decide what to do with them — encode onto the
/// serial link, log to the console, buffer for a test.  Encoding and
/// framing are entirely the adapter's concern.
pub trait MessageSink {
    fn send(&mut self, message: &OutboundMessage);
}
