//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements        | Connects to              |
//! |------------|-------------------|--------------------------|
//! | `hardware` | InputPort         | ESP32 GPIO               |
//! |            | AnalogPort        | ESP32 ADC1               |
//! |            | OutputPort        | ESP32 GPIO, LEDC         |
//! | `log_sink` | MessageSink       | Serial log output        |
//! | `time`     | monotonic clock   | ESP32 system timer       |

pub mod hardware;
pub mod log_sink;
pub mod time;
