//! Shared registry vocabulary for the two dispatch components.
//!
//! Both the [`PeriodicScheduler`](crate::scheduler::PeriodicScheduler)
//! and the [`EdgeTrigger`](crate::trigger::EdgeTrigger) keep their
//! registered events in a fixed-capacity, insertion-ordered, append-only
//! table.  Entries are registered once during setup and never move or
//! get removed for the lifetime of the process.

/// Maximum number of events per component (stack-allocated table).
///
/// Registration beyond this count returns
/// [`Error::CapacityExceeded`](crate::error::Error::CapacityExceeded);
/// sizing the tables is a setup-time capacity-planning concern.
pub const REGISTRY_CAPACITY: usize = 32;

/// Opaque handle to a registered event.
///
/// Handles are table indices; they are only meaningful to the component
/// that issued them and cannot be used to deregister an event (there is
/// no removal).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventHandle(pub(crate) usize);

impl EventHandle {
    /// Position of the event in its registry, in registration order.
    pub fn index(self) -> usize {
        self.0
    }
}
