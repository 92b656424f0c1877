//! Periodic reporting tasks.
//!
//! Each task owns the state behind one outbound message stream and is
//! bound to the dispatch runtime during setup: the wiring layer wraps
//! a task in a closure and registers it with the
//! [`PeriodicScheduler`](crate::scheduler::PeriodicScheduler) at the
//! configured rate.

use crate::app::messages::OutboundMessage;
use crate::app::ports::{AnalogPort, MessageSink};

// ───────────────────────────────────────────────────────────────
// Joystick
// ───────────────────────────────────────────────────────────────

/// Samples both joystick axes and reports the deflection.
///
/// The very first reading is captured as the zero offset — the stick
/// is assumed to be at rest during setup — and every reading after
/// that is offset-corrected, then scaled to −1.0..+1.0 using the ADC
/// resolution.
pub struct JoystickTask {
    x_channel: u32,
    y_channel: u32,
    offset: Option<(i32, i32)>,
    scale: f32,
}

impl JoystickTask {
    pub fn new(x_channel: u32, y_channel: u32, adc_resolution_bits: u8) -> Self {
        Self {
            x_channel,
            y_channel,
            offset: None,
            scale: 2.0 / (1u32 << adc_resolution_bits) as f32,
        }
    }

    /// Read, correct, scale, and emit one `JoystickXy` message.
    pub fn run(&mut self, analog: &mut dyn AnalogPort, sink: &mut dyn MessageSink) {
        let x = i32::from(analog.read_raw(self.x_channel));
        let y = i32::from(analog.read_raw(self.y_channel));

        let (x_offset, y_offset) = *self.offset.get_or_insert((x, y));

        sink.send(&OutboundMessage::JoystickXy {
            x: (x - x_offset) as f32 * self.scale,
            y: (y - y_offset) as f32 * self.scale,
        });
    }
}

// ───────────────────────────────────────────────────────────────
// Counter
// ───────────────────────────────────────────────────────────────

/// Emits a counter that increments with each send, so the host can
/// spot dropped messages and confirm the link is alive.
pub struct CounterTask {
    count: i32,
}

impl CounterTask {
    pub fn new() -> Self {
        Self { count: 0 }
    }

    pub fn run(&mut self, sink: &mut dyn MessageSink) {
        sink.send(&OutboundMessage::Counter(self.count));
        self.count = self.count.wrapping_add(1);
    }
}
