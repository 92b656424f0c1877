//! Edge-trigger engine for digital inputs.
//!
//! Samples every registered channel once per poll and invokes the
//! event's callback on a qualifying transition.  Registration
//! configures the channel as a pulled-up input through the
//! [`InputPort`], so an idle channel reads high and a pressed
//! active-low switch reads low.
//!
//! ## Detection policies
//!
//! Two policies coexist in the field and are selected per event at
//! registration time by the shape of the registered response:
//!
//! | Response     | Fires on                                  | Callback payload |
//! |--------------|-------------------------------------------|------------------|
//! | [`EdgeResponse::OnChange`] | every transition, both directions | new level |
//! | [`EdgeResponse::OnPress`]  | low sample after a 10 ms quiet gap | none      |
//!
//! `OnChange` suits held switches where both edges matter; it applies
//! no debounce, so a bouncy contact fires once per bounce.  `OnPress`
//! suppresses mechanical bounce by requiring the channel to have been
//! released (no low sample observed) for [`PRESS_QUIET_US`] before it
//! fires again; only the "pressed" edge is reported.

use log::info;

use crate::app::ports::InputPort;
use crate::error::{Error, Registry, Result};
use crate::registry::{EventHandle, REGISTRY_CAPACITY};

/// Minimum quiet period between qualifying low samples for
/// [`EdgeResponse::OnPress`] events, in microseconds.
///
/// The window is measured from the most recent low sample, not from
/// the last fire: a button held down keeps refreshing the timestamp
/// and fires only once per press.
pub const PRESS_QUIET_US: u32 = 10_000;

// ═══════════════════════════════════════════════════════════════
//  Registration surface
// ═══════════════════════════════════════════════════════════════

/// How a registered event reacts to its channel, fixed at registration.
///
/// The variant selects both the detection policy and the callback
/// signature; the two cannot be mismatched.
pub enum EdgeResponse {
    /// Fire on every transition, passing the newly sampled level
    /// (`true` = high).
    OnChange(Box<dyn FnMut(bool)>),
    /// Fire on an active-low sample once per debounced press.
    OnPress(Box<dyn FnMut()>),
}

impl EdgeResponse {
    fn kind(&self) -> &'static str {
        match self {
            Self::OnChange(_) => "on-change",
            Self::OnPress(_) => "on-press",
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Event table
// ═══════════════════════════════════════════════════════════════

/// Per-event detector state.  Which variant an event carries never
/// changes; the fields inside mutate on every sample.
enum Detector {
    Change {
        callback: Box<dyn FnMut(bool)>,
        /// Level observed by the previous sample (seeded at
        /// registration so startup does not produce a phantom edge).
        previous: bool,
    },
    Press {
        callback: Box<dyn FnMut()>,
        /// Timestamp of the most recent low sample, fired or not.
        last_low_us: u32,
    },
}

struct TriggerEvent {
    channel: i32,
    detector: Detector,
}

/// The edge-trigger engine.
///
/// Same single-threaded contract as the scheduler: registration during
/// setup, polling from the one main-loop thread.
pub struct EdgeTrigger {
    events: heapless::Vec<TriggerEvent, REGISTRY_CAPACITY>,
}

impl EdgeTrigger {
    pub fn new() -> Self {
        Self {
            events: heapless::Vec::new(),
        }
    }

    /// Register `response` against `channel`.
    ///
    /// Configures the channel as a pulled-up digital input as a side
    /// effect.  On a full table the call returns
    /// [`Error::CapacityExceeded`] without touching the channel or the
    /// table.
    pub fn register(
        &mut self,
        inputs: &mut impl InputPort,
        channel: i32,
        response: EdgeResponse,
    ) -> Result<EventHandle> {
        if self.events.is_full() {
            return Err(Error::CapacityExceeded(Registry::Trigger));
        }

        let kind = response.kind();
        inputs.configure_pullup(channel);

        let detector = match response {
            // Seed the edge detector with the channel's current level.
            EdgeResponse::OnChange(callback) => Detector::Change {
                previous: inputs.read(channel),
                callback,
            },
            EdgeResponse::OnPress(callback) => Detector::Press {
                callback,
                last_low_us: 0,
            },
        };

        let index = self.events.len();
        self.events
            .push(TriggerEvent { channel, detector })
            .map_err(|_| Error::CapacityExceeded(Registry::Trigger))?;

        info!(
            "trigger: channel {} registered as {} (event {})",
            channel, kind, index
        );
        Ok(EventHandle(index))
    }

    /// Sample every registered channel against `now_us` and fire the
    /// qualifying transitions.
    ///
    /// Sampling is unconditional and in registration order; it updates
    /// each event's stored state even when no callback fires.  All
    /// time comparisons use wrapping subtraction on the microsecond
    /// counter.
    pub fn poll(&mut self, inputs: &mut impl InputPort, now_us: u32) {
        for event in &mut self.events {
            let level = inputs.read(event.channel);
            match &mut event.detector {
                Detector::Change { callback, previous } => {
                    if level != *previous {
                        callback(level);
                    }
                    *previous = level;
                }
                Detector::Press {
                    callback,
                    last_low_us,
                } => {
                    if !level {
                        if now_us.wrapping_sub(*last_low_us) >= PRESS_QUIET_US {
                            callback();
                        }
                        *last_low_us = now_us;
                    }
                }
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
    use std::collections::HashMap;
    use std::rc::Rc;

    /// Scripted input port: tests set channel levels between polls and
    /// assert on the pull-up configuration side effect.
    struct ScriptedInputs {
        levels: HashMap<i32, bool>,
        configured: Vec<i32>,
    }

    impl ScriptedInputs {
        fn new() -> Self {
            Self {
                levels: HashMap::new(),
                configured: Vec::new(),
            }
        }

        fn set_level(&mut self, channel: i32, high: bool) {
            self.levels.insert(channel, high);
        }
    }

    impl InputPort for ScriptedInputs {
        fn configure_pullup(&mut self, channel: i32) {
            self.configured.push(channel);
        }

        fn read(&mut self, channel: i32) -> bool {
            // Unscripted channels idle high, as a pulled-up input does.
            *self.levels.get(&channel).unwrap_or(&true)
        }
    }

    fn on_change_recorder() -> (Rc<RefCell<Vec<bool>>>, EdgeResponse) {
        let log: Rc<RefCell<Vec<bool>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let response = EdgeResponse::OnChange(Box::new(move |level| {
            sink.borrow_mut().push(level);
        }));
        (log, response)
    }

    fn on_press_counter() -> (Rc<RefCell<u32>>, EdgeResponse) {
        let count = Rc::new(RefCell::new(0u32));
        let sink = count.clone();
        let response = EdgeResponse::OnPress(Box::new(move || {
            *sink.borrow_mut() += 1;
        }));
        (count, response)
    }

    #[test]
    fn registration_configures_pullup() {
        let mut inputs = ScriptedInputs::new();
        let mut trigger = EdgeTrigger::new();

        let (_, response) = on_press_counter();
        let handle = trigger.register(&mut inputs, 10, response).unwrap();

        assert_eq!(handle.index(), 0);
        assert_eq!(inputs.configured, vec![10]);
    }

    #[test]
    fn on_change_fires_on_both_edges_with_new_level() {
        let mut inputs = ScriptedInputs::new();
        let mut trigger = EdgeTrigger::new();

        inputs.set_level(10, false);
        let (log, response) = on_change_recorder();
        trigger.register(&mut inputs, 10, response).unwrap();

        // Samples: low, low, high, high, low → exactly two transitions.
        for (t, level) in [(100, false), (200, false), (300, true), (400, true), (500, false)] {
            inputs.set_level(10, level);
            trigger.poll(&mut inputs, t);
        }

        assert_eq!(*log.borrow(), vec![true, false]);
    }

    #[test]
    fn on_change_startup_level_is_not_an_edge() {
        let mut inputs = ScriptedInputs::new();
        let mut trigger = EdgeTrigger::new();

        // Channel already high at registration; the first poll sees the
        // same level and must stay silent.
        inputs.set_level(11, true);
        let (log, response) = on_change_recorder();
        trigger.register(&mut inputs, 11, response).unwrap();

        trigger.poll(&mut inputs, 100);
        assert!(log.borrow().is_empty());

        inputs.set_level(11, false);
        trigger.poll(&mut inputs, 200);
        assert_eq!(*log.borrow(), vec![false]);
    }

    #[test]
    fn on_press_suppresses_samples_within_quiet_window() {
        let mut inputs = ScriptedInputs::new();
        let mut trigger = EdgeTrigger::new();

        let (count, response) = on_press_counter();
        trigger.register(&mut inputs, 10, response).unwrap();

        // Two low samples 5 ms apart: bounce, at most one fire.
        inputs.set_level(10, false);
        trigger.poll(&mut inputs, 20_000);
        trigger.poll(&mut inputs, 25_000);
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn on_press_fires_again_after_quiet_window() {
        let mut inputs = ScriptedInputs::new();
        let mut trigger = EdgeTrigger::new();

        let (count, response) = on_press_counter();
        trigger.register(&mut inputs, 10, response).unwrap();

        // Two low samples 15 ms apart: two distinct presses.
        inputs.set_level(10, false);
        trigger.poll(&mut inputs, 20_000);
        trigger.poll(&mut inputs, 35_000);
        assert_eq!(*count.borrow(), 2);
    }

    #[test]
    fn quiet_window_measured_from_last_low_sample_not_last_fire() {
        let mut inputs = ScriptedInputs::new();
        let mut trigger = EdgeTrigger::new();

        let (count, response) = on_press_counter();
        trigger.register(&mut inputs, 10, response).unwrap();

        inputs.set_level(10, false);
        trigger.poll(&mut inputs, 20_000); // fires
        trigger.poll(&mut inputs, 25_000); // held: refreshes timestamp, no fire
        // 11 ms after the fire but only 6 ms after the last low sample.
        trigger.poll(&mut inputs, 31_000);
        assert_eq!(*count.borrow(), 1, "a held button must fire once per press");
    }

    #[test]
    fn high_samples_do_not_refresh_quiet_window() {
        let mut inputs = ScriptedInputs::new();
        let mut trigger = EdgeTrigger::new();

        let (count, response) = on_press_counter();
        trigger.register(&mut inputs, 10, response).unwrap();

        inputs.set_level(10, false);
        trigger.poll(&mut inputs, 20_000); // fires

        inputs.set_level(10, true);
        trigger.poll(&mut inputs, 25_000); // released

        inputs.set_level(10, false);
        trigger.poll(&mut inputs, 30_500); // 10.5 ms after the last low
        assert_eq!(*count.borrow(), 2);
    }

    #[test]
    fn on_press_quiet_window_spans_counter_wraparound() {
        let mut inputs = ScriptedInputs::new();
        let mut trigger = EdgeTrigger::new();

        let (count, response) = on_press_counter();
        trigger.register(&mut inputs, 10, response).unwrap();

        inputs.set_level(10, false);
        trigger.poll(&mut inputs, u32::MAX - 4_000); // fires, arms near rollover
        assert_eq!(*count.borrow(), 1);

        // 12 ms later in wrapping time: 4 ms before the wrap, 8 ms after.
        trigger.poll(&mut inputs, 8_000);
        assert_eq!(*count.borrow(), 2);

        // 5 ms after that: inside the refreshed quiet window.
        trigger.poll(&mut inputs, 13_000);
        assert_eq!(*count.borrow(), 2);
    }

    #[test]
    fn capacity_boundary_rejects_thirty_third_without_touching_channel() {
        let mut inputs = ScriptedInputs::new();
        let mut trigger = EdgeTrigger::new();

        for i in 0..REGISTRY_CAPACITY {
            let (_, response) = on_press_counter();
            trigger.register(&mut inputs, i as i32, response).unwrap();
        }
        assert_eq!(trigger.len(), REGISTRY_CAPACITY);
        assert_eq!(inputs.configured.len(), REGISTRY_CAPACITY);

        let (_, response) = on_press_counter();
        let err = trigger.register(&mut inputs, 99, response).unwrap_err();
        assert_eq!(err, Error::CapacityExceeded(Registry::Trigger));
        assert_eq!(trigger.len(), REGISTRY_CAPACITY);
        assert!(
            !inputs.configured.contains(&99),
            "rejected registration must not configure the channel"
        );
    }

    #[test]
    fn co_due_events_fire_in_registration_order() {
        let mut inputs = ScriptedInputs::new();
        let mut trigger = EdgeTrigger::new();
        let log: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));

        for (channel, tag) in [(10, "a"), (11, "b"), (12, "c")] {
            let sink = log.clone();
            trigger
                .register(
                    &mut inputs,
                    channel,
                    EdgeResponse::OnPress(Box::new(move || sink.borrow_mut().push(tag))),
                )
                .unwrap();
            inputs.set_level(channel, false);
        }

        trigger.poll(&mut inputs, 50_000);
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn mixed_policies_coexist_independently() {
        let mut inputs = ScriptedInputs::new();
        let mut trigger = EdgeTrigger::new();

        inputs.set_level(10, true);
        let (changes, on_change) = on_change_recorder();
        let (presses, on_press) = on_press_counter();
        trigger.register(&mut inputs, 10, on_change).unwrap();
        trigger.register(&mut inputs, 11, on_press).unwrap();

        inputs.set_level(10, false);
        inputs.set_level(11, false);
        trigger.poll(&mut inputs, 20_000);

        assert_eq!(*changes.borrow(), vec![false]);
        assert_eq!(*presses.borrow(), 1);
    }
}
