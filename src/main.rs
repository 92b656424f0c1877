//! IOPanel Firmware — Main Entry Point
//!
//! Polled, cooperative, single-threaded control loop:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  PanelAdapter          LogMessageSink        MonotonicClock  │
//! │  (Input+Analog+Output) (MessageSink)         (clock source)  │
//! │                                                              │
//! │  ───────────────── Port Trait Boundary ─────────────────     │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │  PeriodicScheduler · EdgeTrigger  (dispatch runtime)   │  │
//! │  │  JoystickTask · CounterTask       (reporting tasks)    │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Setup registers every event once, then the unbounded loop polls
//! both dispatch components each iteration.  Callbacks run
//! synchronously on this one thread; nothing here preempts anything.

#![deny(unused_must_use)]

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use log::{error, info};

use iopanel::adapters::hardware::PanelAdapter;
use iopanel::adapters::log_sink::LogMessageSink;
use iopanel::adapters::time::MonotonicClock;
use iopanel::app::messages::{Button, OutboundMessage};
use iopanel::app::ports::MessageSink;
use iopanel::app::tasks::{CounterTask, JoystickTask};
use iopanel::config::SystemConfig;
use iopanel::drivers::hw_init;
use iopanel::error::Result as PanelResult;
use iopanel::pins;
use iopanel::registry::EventHandle;
use iopanel::scheduler::PeriodicScheduler;
use iopanel::trigger::{EdgeResponse, EdgeTrigger};

/// Registration failures must never crash the loop, but they must not
/// vanish either: a refused event means the capacity plan is wrong, so
/// it is logged and reported to the host as a fault.
fn report_registration(
    what: &'static str,
    result: PanelResult<EventHandle>,
    sink: &mut impl MessageSink,
) {
    match result {
        Ok(handle) => info!("setup: {} registered (event {})", what, handle.index()),
        Err(e) => {
            error!("setup: {} registration refused: {}", what, e);
            sink.send(&OutboundMessage::Fault("event registration refused"));
        }
    }
}

fn main() -> Result<()> {
    // ── 1. Platform bootstrap ─────────────────────────────────
    #[cfg(target_os = "espidf")]
    {
        esp_idf_svc::sys::link_patches();
        esp_idf_logger::init()?;
    }

    info!("IOPanel v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Peripheral init ────────────────────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    // ── 3. Configuration ──────────────────────────────────────
    let config = SystemConfig::default();
    config.validate().map_err(|e| anyhow::anyhow!("{e}"))?;

    // ── 4. Adapters ───────────────────────────────────────────
    // Shared between the registered closures and the loop below; all
    // of it runs on this one thread.
    let clock = MonotonicClock::new();
    let panel = Rc::new(RefCell::new(PanelAdapter::new()));
    let sink = Rc::new(RefCell::new(LogMessageSink::new()));

    // ── 5. Setup phase: register every event once ─────────────
    let mut scheduler = PeriodicScheduler::new();
    let mut trigger = EdgeTrigger::new();

    {
        let mut joystick = JoystickTask::new(
            pins::JOY_X_ADC_CHANNEL,
            pins::JOY_Y_ADC_CHANNEL,
            config.adc_resolution_bits,
        );
        let task_panel = panel.clone();
        let task_sink = sink.clone();
        let result = scheduler.register(config.joystick_rate_hz, move || {
            joystick.run(&mut *task_panel.borrow_mut(), &mut *task_sink.borrow_mut());
        });
        report_registration("joystick report", result, &mut *sink.borrow_mut());
    }

    {
        let mut counter = CounterTask::new();
        let task_sink = sink.clone();
        let result = scheduler.register(config.counter_rate_hz, move || {
            counter.run(&mut *task_sink.borrow_mut());
        });
        report_registration("counter report", result, &mut *sink.borrow_mut());
    }

    for (gpio, button) in [
        (pins::BUTTON_A_GPIO, Button::A),
        (pins::BUTTON_B_GPIO, Button::B),
        (pins::BUTTON_C_GPIO, Button::C),
    ] {
        let task_sink = sink.clone();
        let result = trigger.register(
            &mut *panel.borrow_mut(),
            gpio,
            EdgeResponse::OnPress(Box::new(move || {
                task_sink
                    .borrow_mut()
                    .send(&OutboundMessage::ButtonPressed(button));
            })),
        );
        report_registration("button press", result, &mut *sink.borrow_mut());
    }

    info!(
        "System ready: {} scheduled + {} triggered events. Entering polling loop.",
        scheduler.len(),
        trigger.len()
    );

    // ── 6. Polling loop ───────────────────────────────────────
    loop {
        // Simulation pacing only; on the device the loop free-runs and
        // the ESP-IDF scheduler preempts it for housekeeping.
        #[cfg(not(target_os = "espidf"))]
        std::thread::sleep(std::time::Duration::from_millis(1));

        let now_us = clock.now_us();
        scheduler.poll(now_us);
        trigger.poll(&mut *panel.borrow_mut(), now_us);

        // A wire codec adapter would be polled here, decoding inbound
        // bytes into app::commands::Command values.
    }
}
