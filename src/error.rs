//! Unified error types for the IOPanel firmware.
//!
//! A single `Error` enum that every subsystem can convert into, keeping
//! the top-level setup path's error handling uniform. All variants are
//! `Copy` so they can be passed around without allocation.

use core::fmt;

/// Identifies which bounded event table refused a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registry {
    /// The periodic scheduler's event table.
    Scheduler,
    /// The edge trigger's event table.
    Trigger,
}

impl fmt::Display for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scheduler => write!(f, "scheduler"),
            Self::Trigger => write!(f, "trigger"),
        }
    }
}

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A registration was attempted on a full event table.  The setup
    /// layer decides whether to log, assert, or ignore — the table
    /// itself is left untouched.
    CapacityExceeded(Registry),
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded(registry) => {
                write!(f, "{registry} registry full")
            }
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
