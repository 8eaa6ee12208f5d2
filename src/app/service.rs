//! Monitor service — the control loop core.
//!
//! [`MonitorService`] owns the loop timing state and failure containment.
//! It exposes a clean, hardware-agnostic API. All I/O flows through port
//! traits injected at call sites, making the entire service testable with
//! mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                 │     MonitorService     │
//! IndicatorPort ◀─│  sample · alert ·      │──▶ PublishPort
//!   DisplayPort ◀─│  present · publish     │
//!                 └────────────────────────┘
//! ```
//!
//! One cycle is a single linear pass: sample → evaluate → signal →
//! present → publish, followed by an unconditional cooldown. The cycle
//! body is a `Result`-returning function; the driver treats success and
//! failure uniformly and always proceeds to cooldown, so a sensor fault
//! still advances the publish window and still sleeps the full quiescent
//! period before the next attempt.

use core::time::Duration;

use log::{debug, warn};

use crate::app::alert::AlertState;
use crate::app::channel::Channels;
use crate::app::events::AppEvent;
use crate::app::ports::{DisplayPort, EventSink, IndicatorPort, PublishPort, SensorPort, TimePort};
use crate::app::sample::Sample;
use crate::config::SystemConfig;
use crate::error::Result;

// ───────────────────────────────────────────────────────────────
// Cycle outcome
// ───────────────────────────────────────────────────────────────

/// What a cycle body did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The body ran: a sample was taken and presented.
    Completed { sample: Sample, alert: AlertState },
    /// The publish window had fully elapsed; the body was skipped.
    Skipped { elapsed: Duration },
}

// ───────────────────────────────────────────────────────────────
// Indicator scope guard
// ───────────────────────────────────────────────────────────────

/// Forces colour and buzzer back to neutral when the alert sequence scope
/// ends, on every exit path.
struct IndicatorGuard<'a, H: IndicatorPort> {
    hw: &'a mut H,
}

impl<'a, H: IndicatorPort> IndicatorGuard<'a, H> {
    fn new(hw: &'a mut H) -> Self {
        Self { hw }
    }

    fn hw(&mut self) -> &mut H {
        self.hw
    }
}

impl<H: IndicatorPort> Drop for IndicatorGuard<'_, H> {
    fn drop(&mut self) {
        self.hw.colour_off();
        self.hw.buzzer(false);
    }
}

// ───────────────────────────────────────────────────────────────
// MonitorService
// ───────────────────────────────────────────────────────────────

/// Orchestrates the sample-alert-publish cycle.
pub struct MonitorService {
    config: SystemConfig,
    channels: Channels,
    /// Uptime at the end of the last cycle. Written only in [`cooldown`],
    /// read only at the top of [`run_cycle`]. Single thread of control —
    /// no synchronisation needed.
    last_publish: Duration,
    cycle_count: u64,
}

impl MonitorService {
    /// Construct the service. Does **not** seed the publish window —
    /// call [`start`](Self::start) next.
    pub fn new(config: SystemConfig, channels: Channels) -> Self {
        Self {
            config,
            channels,
            last_publish: Duration::ZERO,
            cycle_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Put every indicator in a known state and open the publish window.
    pub fn start(&mut self, hw: &mut impl IndicatorPort, clock: &impl TimePort, sink: &mut impl EventSink) {
        hw.all_off();
        self.last_publish = clock.uptime();
        sink.emit(&AppEvent::Started);
    }

    // ── Cycle driver ──────────────────────────────────────────

    /// One uniform driver step: run the cycle body, log any failure, then
    /// cooldown unconditionally. This is the only place the body's
    /// `Result` is interpreted — success and failure take the same path
    /// out.
    pub fn run_once(
        &mut self,
        hw: &mut (impl SensorPort + IndicatorPort + DisplayPort),
        publisher: &mut impl PublishPort,
        clock: &impl TimePort,
        sink: &mut impl EventSink,
    ) -> Result<CycleOutcome> {
        let result = self.run_cycle(hw, publisher, clock, sink);
        if let Err(e) = &result {
            warn!("Cycle {} failed: {}", self.cycle_count, e);
        }
        self.cooldown(hw, clock);
        result
    }

    /// The cycle body: sample → evaluate → signal → present → publish.
    ///
    /// Any error aborts the remainder of the body and propagates to the
    /// driver; publish failures are the exception — they are contained
    /// per-channel (see [`publish_sample`](Self::publish_sample)) so the
    /// local indicators keep working when telemetry is down.
    pub fn run_cycle(
        &mut self,
        hw: &mut (impl SensorPort + IndicatorPort + DisplayPort),
        publisher: &mut impl PublishPort,
        clock: &impl TimePort,
        sink: &mut impl EventSink,
    ) -> Result<CycleOutcome> {
        self.cycle_count += 1;

        // Guarded fast-path: the body runs only while the last publish is
        // still younger than the window. Once the window lapses the cycle
        // idles until cooldown reopens it (see DESIGN.md on this gate's
        // direction).
        let elapsed = clock.uptime().saturating_sub(self.last_publish);
        if elapsed >= Duration::from_secs(self.config.publish_interval_secs) {
            debug!(
                "cycle {}: window elapsed ({}s), body skipped",
                self.cycle_count,
                elapsed.as_secs()
            );
            return Ok(CycleOutcome::Skipped { elapsed });
        }

        hw.clear();
        hw.activity(true);

        let sample = hw.measure(clock.uptime())?;
        let alert = AlertState::classify(sample.temperature_c, self.config.alert_threshold_c);
        sink.emit(&AppEvent::Sampled { sample, alert });

        if alert.is_exceeded() {
            self.signal_alert(hw, clock, sink, sample.temperature_c);
        }

        hw.show_reading(&sample);
        self.publish_sample(&sample, publisher, sink);

        Ok(CycleOutcome::Completed { sample, alert })
    }

    /// Cooldown — runs exactly once per cycle, success or failure:
    /// activity LED off, publish window reset, fixed quiescent sleep.
    pub fn cooldown(&mut self, hw: &mut impl IndicatorPort, clock: &impl TimePort) {
        hw.activity(false);
        self.last_publish = clock.uptime();
        clock.sleep(Duration::from_secs(self.config.cooldown_secs));
    }

    // ── Queries ───────────────────────────────────────────────

    /// Uptime recorded at the end of the last cycle.
    pub fn last_publish(&self) -> Duration {
        self.last_publish
    }

    /// Total cycles attempted since startup.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    // ── Internal ──────────────────────────────────────────────

    /// The full alert sequence: colour hold, audible pulse, alert screen.
    ///
    /// The holds block the control thread for their full duration. The
    /// guard returns colour and buzzer to neutral on every exit path, so
    /// back-to-back invocations always start and end dark and silent.
    fn signal_alert(
        &self,
        hw: &mut (impl IndicatorPort + DisplayPort),
        clock: &impl TimePort,
        sink: &mut impl EventSink,
        temperature_c: i8,
    ) {
        sink.emit(&AppEvent::AlertSignalled {
            temperature_c,
            threshold_c: self.config.alert_threshold_c,
        });

        {
            let mut guard = IndicatorGuard::new(hw);
            guard.hw().set_colour(false, true, false);
            clock.sleep(Duration::from_secs(self.config.colour_hold_secs));
            guard.hw().colour_off();
            guard.hw().buzzer(true);
            clock.sleep(Duration::from_secs(self.config.buzzer_pulse_secs));
            guard.hw().buzzer(false);
        }

        hw.show_alert(self.config.alert_threshold_c);
        clock.sleep(Duration::from_secs(self.config.alert_hold_secs));
        hw.clear();
    }

    /// Publish temperature then humidity, each attempt independent. A
    /// failed channel is reported through the sink and dropped; the other
    /// channel is still attempted.
    fn publish_sample(&self, sample: &Sample, publisher: &mut impl PublishPort, sink: &mut impl EventSink) {
        let attempts = [
            (&self.channels.temperature, i32::from(sample.temperature_c)),
            (&self.channels.humidity, i32::from(sample.humidity_pct)),
        ];

        for (channel, value) in attempts {
            match publisher.publish(channel, value) {
                Ok(()) => sink.emit(&AppEvent::Published {
                    topic: channel.topic.clone(),
                    value,
                }),
                Err(error) => sink.emit(&AppEvent::PublishFailed {
                    topic: channel.topic.clone(),
                    value,
                    error,
                }),
            }
        }
    }
}
