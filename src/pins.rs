//! GPIO / peripheral channel assignments for the IOPanel main board.
//!
//! Single source of truth — every adapter references this module rather
//! than hard-coding pin numbers.  Change a pin here and it propagates
//! everywhere.

// ---------------------------------------------------------------------------
// Push-buttons (active-low momentary switches, internal pull-up)
// ---------------------------------------------------------------------------

/// Button A — reported as `ButtonPressed(Button::A)`.
pub const BUTTON_A_GPIO: i32 = 10;
/// Button B — reported as `ButtonPressed(Button::B)`.
pub const BUTTON_B_GPIO: i32 = 11;
/// Button C — reported as `ButtonPressed(Button::C)`.
pub const BUTTON_C_GPIO: i32 = 12;

// ---------------------------------------------------------------------------
// Joystick (2-axis analog, ADC1)
// ---------------------------------------------------------------------------

/// X axis — ADC1 channel 0.
pub const JOY_X_ADC_CHANNEL: u32 = 0;
/// Y axis — ADC1 channel 1.
pub const JOY_Y_ADC_CHANNEL: u32 = 1;

// ---------------------------------------------------------------------------
// Actuators
// ---------------------------------------------------------------------------

/// Indicator LED (digital output, active HIGH).
pub const LED_GPIO: i32 = 13;
/// Piezo buzzer — LEDC PWM output.
pub const BUZZER_GPIO: i32 = 9;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC timer resolution for the buzzer (bits).
pub const BUZZER_PWM_RESOLUTION_BITS: u32 = 8;
/// LEDC base frequency the buzzer timer is configured with before the
/// first tone command arrives.
pub const BUZZER_IDLE_FREQ_HZ: u32 = 1_000;
