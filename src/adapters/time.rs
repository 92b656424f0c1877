//! Monotonic clock adapter.
//!
//! Supplies the wrapping microsecond counter the dispatch runtime is
//! polled with.
//!
//! - **`target_os = "espidf"`** — wraps `esp_timer_get_time()` from the
//!   ESP-IDF high-resolution timer (microsecond precision, monotonic).
//! - **`not(target_os = "espidf")`** — uses `std::time::Instant` for
//!   host-side testing and simulation.

/// Monotonic microsecond clock.
///
/// `now_us()` truncates the underlying 64-bit counter to `u32`, so the
/// value wraps roughly every 71.6 minutes.  That is fine by contract:
/// every consumer computes durations with wrapping subtraction.
pub struct MonotonicClock {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }

    /// Microseconds since boot, truncated to the wrapping `u32` the
    /// dispatch runtime works in.
    #[cfg(target_os = "espidf")]
    pub fn now_us(&self) -> u32 {
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u32
    }

    /// Microseconds since construction, same wrapping contract.
    #[cfg(not(target_os = "espidf"))]
    pub fn now_us(&self) -> u32 {
        self.start.elapsed().as_micros() as u32
    }
}
