//! System configuration parameters
//!
//! All tunable parameters for the IOPanel firmware.  Values can be
//! overridden by a host-side provisioning tool; the serde derives give
//! them a JSON form for debugging and a postcard form for storage.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Reporting rates ---
    /// Joystick XY report rate (Hz)
    pub joystick_rate_hz: f32,
    /// Link-alive counter report rate (Hz)
    pub counter_rate_hz: f32,

    // --- Analog front end ---
    /// ADC resolution the joystick scaling assumes (bits)
    pub adc_resolution_bits: u8,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            joystick_rate_hz: 10.0,
            counter_rate_hz: 1.0,
            adc_resolution_bits: 13,
        }
    }
}

impl SystemConfig {
    /// Reject configurations the dispatch runtime cannot honour.
    ///
    /// Rates must be positive because the scheduler treats a
    /// non-positive frequency as a caller contract violation; catching
    /// it here turns a panic into a typed setup error.
    pub fn validate(&self) -> Result<()> {
        if !(self.joystick_rate_hz.is_finite() && self.joystick_rate_hz > 0.0) {
            return Err(Error::Config("joystick_rate_hz must be positive"));
        }
        if !(self.counter_rate_hz.is_finite() && self.counter_rate_hz > 0.0) {
            return Err(Error::Config("counter_rate_hz must be positive"));
        }
        if !(8..=16).contains(&self.adc_resolution_bits) {
            return Err(Error::Config("adc_resolution_bits must be 8..=16"));
        }
        Ok(())
    }
}
