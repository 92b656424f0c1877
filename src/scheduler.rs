//! Periodic event scheduler.
//!
//! Invokes registered callbacks at fixed frequencies from a polled,
//! cooperative control loop — no interrupts, no preemption.  The main
//! loop calls [`PeriodicScheduler::poll`] once per iteration with the
//! current monotonic microsecond counter; any event whose interval has
//! elapsed fires synchronously, in registration order.
//!
//! ```text
//! setup:   register(10.0, joystick_report)   ─┐
//!          register( 1.0, counter_report)    ─┤ append-only table
//!                                             ▼
//! loop:    poll(now_us) ──▶ elapsed >= interval? ──▶ callback()
//! ```
//!
//! Re-arming is from the firing poll's timestamp, not from the previous
//! deadline: a late poll produces one fire, not a burst of catch-up
//! fires, so the effective rate degrades gracefully under load.

use log::info;

use crate::error::{Error, Registry, Result};
use crate::registry::{EventHandle, REGISTRY_CAPACITY};

// ═══════════════════════════════════════════════════════════════
//  Event table
// ═══════════════════════════════════════════════════════════════

/// A single scheduled event.  Owned by the table for the process
/// lifetime; only `last_fired_us` mutates after registration.
struct ScheduledEvent {
    callback: Box<dyn FnMut()>,
    /// Repeat interval in microseconds, fixed at registration.
    interval_us: u32,
    /// Timestamp used by the most recent firing decision.
    last_fired_us: u32,
}

/// The periodic scheduler engine.
///
/// Single-threaded contract: registration happens during setup, before
/// polling begins; both are driven by the one main-loop thread, so the
/// table needs no synchronization.
pub struct PeriodicScheduler {
    events: heapless::Vec<ScheduledEvent, REGISTRY_CAPACITY>,
}

impl PeriodicScheduler {
    pub fn new() -> Self {
        Self {
            events: heapless::Vec::new(),
        }
    }

    /// Register `callback` to repeat at `frequency_hz`.
    ///
    /// The interval is `1_000_000 / frequency_hz` microseconds,
    /// truncated toward zero.  A non-positive or non-finite frequency
    /// is a caller contract violation and panics; a full table is the
    /// one recoverable error and returns
    /// [`Error::CapacityExceeded`] leaving the table untouched.
    ///
    /// An event's elapsed time is measured from counter value 0 until
    /// its first fire, so an event whose interval has already elapsed
    /// at the first poll fires on that poll.
    pub fn register(
        &mut self,
        frequency_hz: f32,
        callback: impl FnMut() + 'static,
    ) -> Result<EventHandle> {
        assert!(
            frequency_hz.is_finite() && frequency_hz > 0.0,
            "repeat frequency must be positive, got {frequency_hz} Hz"
        );

        let interval_us = (1_000_000.0 / frequency_hz) as u32;
        let index = self.events.len();
        self.events
            .push(ScheduledEvent {
                callback: Box::new(callback),
                interval_us,
                last_fired_us: 0,
            })
            .map_err(|_| Error::CapacityExceeded(Registry::Scheduler))?;

        info!(
            "scheduler: event {} registered at {} Hz ({} us interval)",
            index, frequency_hz, interval_us
        );
        Ok(EventHandle(index))
    }

    /// Evaluate every event against `now_us` and fire the due ones.
    ///
    /// Call once per main-loop iteration.  `now_us` is a wrapping
    /// monotonic microsecond counter; elapsed time is computed with
    /// wrapping subtraction so a counter rollover between polls
    /// self-corrects.  Each event fires at most once per poll, and
    /// `last_fired_us` is only written when the event fires.
    pub fn poll(&mut self, now_us: u32) {
        for event in &mut self.events {
            let elapsed_us = now_us.wrapping_sub(event.last_fired_us);
            if elapsed_us >= event.interval_us {
                (event.callback)();
                event.last_fired_us = now_us;
            }
        }
    }

    /// Number of registered events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    use core::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn fires_once_interval_elapsed() {
        let mut sched = PeriodicScheduler::new();
        let fires = Rc::new(RefCell::new(0u32));

        let counter = fires.clone();
        sched
            .register(1_000.0, move || *counter.borrow_mut() += 1)
            .unwrap();

        sched.poll(999);
        assert_eq!(*fires.borrow(), 0, "must not fire below the interval");

        sched.poll(1_000);
        assert_eq!(*fires.borrow(), 1);
    }

    #[test]
    fn non_firing_poll_is_idempotent() {
        let mut sched = PeriodicScheduler::new();
        let fires = Rc::new(RefCell::new(0u32));

        let counter = fires.clone();
        sched
            .register(1_000.0, move || *counter.borrow_mut() += 1)
            .unwrap();

        sched.poll(1_000);
        assert_eq!(*fires.borrow(), 1);

        // Re-polling with the same counter value must not fire again:
        // elapsed is 0, and last_fired_us is untouched, so the next
        // genuine interval still fires on time.
        sched.poll(1_000);
        sched.poll(1_000);
        assert_eq!(*fires.borrow(), 1);

        sched.poll(2_000);
        assert_eq!(*fires.borrow(), 2);
    }

    #[test]
    fn late_poll_fires_once_not_in_bursts() {
        let mut sched = PeriodicScheduler::new();
        let fires = Rc::new(RefCell::new(0u32));

        let counter = fires.clone();
        sched
            .register(1_000.0, move || *counter.borrow_mut() += 1)
            .unwrap();

        // Ten intervals elapse before the loop gets around to polling.
        sched.poll(10_000);
        assert_eq!(*fires.borrow(), 1, "a slow loop must not trigger catch-up bursts");

        // Re-armed from the firing poll, not from the missed deadlines.
        sched.poll(10_500);
        assert_eq!(*fires.borrow(), 1);
        sched.poll(11_000);
        assert_eq!(*fires.borrow(), 2);
    }

    #[test]
    fn counter_wraparound_fires_exactly_once() {
        let mut sched = PeriodicScheduler::new();
        let fires = Rc::new(RefCell::new(0u32));

        let counter = fires.clone();
        sched
            .register(1_000.0, move || *counter.borrow_mut() += 1)
            .unwrap();

        // Arm just below the rollover.
        sched.poll(u32::MAX - 400);
        assert_eq!(*fires.borrow(), 1);

        // 1000 us elapse across the wrap: 401 before, 599 after.
        sched.poll(599);
        assert_eq!(*fires.borrow(), 2, "interval elapsed across the wrap must fire");

        sched.poll(600);
        assert_eq!(*fires.borrow(), 2, "wrap must not double-fire");
    }

    #[test]
    fn first_poll_fires_when_interval_already_elapsed() {
        let mut sched = PeriodicScheduler::new();
        let fires = Rc::new(RefCell::new(0u32));

        let counter = fires.clone();
        sched
            .register(10.0, move || *counter.borrow_mut() += 1)
            .unwrap();

        // Elapsed time is measured from 0 until the first fire.
        sched.poll(200_000);
        assert_eq!(*fires.borrow(), 1);
    }

    #[test]
    fn capacity_boundary_rejects_thirty_third() {
        let mut sched = PeriodicScheduler::new();

        for i in 0..REGISTRY_CAPACITY {
            let handle = sched.register(1.0, || {}).unwrap();
            assert_eq!(handle.index(), i);
        }
        assert_eq!(sched.len(), REGISTRY_CAPACITY);

        let err = sched.register(1.0, || {}).unwrap_err();
        assert_eq!(err, Error::CapacityExceeded(Registry::Scheduler));
        assert_eq!(sched.len(), REGISTRY_CAPACITY, "failed registration must not grow the table");
    }

    #[test]
    fn co_due_events_fire_in_registration_order() {
        let mut sched = PeriodicScheduler::new();
        let log: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let log = log.clone();
            sched
                .register(100.0, move || log.borrow_mut().push(tag))
                .unwrap();
        }

        // All three share an interval and are due on the same poll.
        sched.poll(10_000);
        assert_eq!(*log.borrow(), vec!["first", "second", "third"]);

        sched.poll(20_000);
        assert_eq!(
            *log.borrow(),
            vec!["first", "second", "third", "first", "second", "third"]
        );
    }

    #[test]
    fn interval_conversion_truncates_toward_zero() {
        let mut sched = PeriodicScheduler::new();
        let fires = Rc::new(RefCell::new(0u32));

        // 3 Hz → 333_333.33.. us, truncated to 333_333.
        let counter = fires.clone();
        sched
            .register(3.0, move || *counter.borrow_mut() += 1)
            .unwrap();

        sched.poll(333_332);
        assert_eq!(*fires.borrow(), 0);
        sched.poll(333_333);
        assert_eq!(*fires.borrow(), 1);
    }

    #[test]
    #[should_panic(expected = "repeat frequency must be positive")]
    fn zero_frequency_is_a_contract_violation() {
        let mut sched = PeriodicScheduler::new();
        let _ = sched.register(0.0, || {});
    }

    #[test]
    #[should_panic(expected = "repeat frequency must be positive")]
    fn negative_frequency_is_a_contract_violation() {
        let mut sched = PeriodicScheduler::new();
        let _ = sched.register(-5.0, || {});
    }
}
