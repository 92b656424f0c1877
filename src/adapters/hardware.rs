//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Exposes the panel's GPIO, ADC, and actuator surface through
//! [`InputPort`], [`AnalogPort`], and [`OutputPort`].  This is the only
//! module in the system that touches actual hardware.  On non-espidf
//! targets the underlying driver layer uses cfg-gated simulation stubs,
//! so the adapter compiles and runs (inertly) on the host.

use log::warn;

use crate::app::ports::{AnalogPort, InputPort, OutputPort};
use crate::drivers::hw_init;
use crate::pins;

/// Concrete adapter over the panel board's peripherals.
pub struct PanelAdapter;

impl PanelAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PanelAdapter {
    fn default() -> Self {
        Self::new()
    }
}

// ── InputPort implementation ──────────────────────────────────

impl InputPort for PanelAdapter {
    fn configure_pullup(&mut self, channel: i32) {
        // The port is infallible by contract; a refused pin is a board
        // wiring problem, surfaced loudly and then sampled as idle-high.
        if let Err(e) = hw_init::gpio_config_pullup(channel) {
            warn!("hardware: pull-up config for GPIO {} failed: {}", channel, e);
        }
    }

    fn read(&mut self, channel: i32) -> bool {
        hw_init::gpio_read(channel)
    }
}

// ── AnalogPort implementation ─────────────────────────────────

impl AnalogPort for PanelAdapter {
    fn read_raw(&mut self, channel: u32) -> u16 {
        hw_init::adc1_read(channel)
    }
}

// ── OutputPort implementation ─────────────────────────────────

impl OutputPort for PanelAdapter {
    fn set_led(&mut self, on: bool) {
        hw_init::gpio_write(pins::LED_GPIO, on);
    }

    fn set_tone(&mut self, frequency_hz: u32) {
        hw_init::set_tone(frequency_hz);
    }
}
