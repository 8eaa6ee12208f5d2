//! Port traits — the boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ MonitorService (domain)
//! ```
//!
//! Driven adapters (sensor, indicators, display, broker, clock, event sink)
//! implement these traits. The [`MonitorService`](super::service::MonitorService)
//! consumes them via generics, so the domain core never touches hardware
//! directly.

use core::time::Duration;

use crate::app::channel::PublishChannel;
use crate::app::events::AppEvent;
use crate::app::sample::Sample;
use crate::error::{PublishError, SensorError};

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to obtain one climate sample.
///
/// Each call triggers a fresh hardware measurement. Callers must respect
/// the sensor's minimum sampling interval — the loop cadence guarantees
/// this; the port does not.
pub trait SensorPort {
    /// Take one measurement, stamped with the given capture instant.
    fn measure(&mut self, taken_at: Duration) -> Result<Sample, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Indicator port (driven adapter: domain → signal hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the physical signalling surface.
///
/// All calls are single discrete writes; sequencing and hold timing live
/// in the domain layer.
pub trait IndicatorPort {
    /// Set the RGB indicator (each element on/off — the LED is not dimmed).
    fn set_colour(&mut self, r: bool, g: bool, b: bool);

    /// All colour elements off.
    fn colour_off(&mut self);

    /// Drive the buzzer line.
    fn buzzer(&mut self, on: bool);

    /// Drive the on-board activity LED.
    fn activity(&mut self, on: bool);

    /// Every indicator output to its neutral/off state.
    fn all_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → character panel)
// ───────────────────────────────────────────────────────────────

/// Two-row textual display. Writes are row-oriented and overwrite prior
/// content; there is no partial-refresh path.
pub trait DisplayPort {
    /// Render the numeric reading screen (temperature + humidity rows).
    fn show_reading(&mut self, sample: &Sample);

    /// Render the threshold-exceeded screen.
    fn show_alert(&mut self, threshold_c: i8);

    /// Blank the panel.
    fn clear(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Publish port (driven adapter: domain → broker session)
// ───────────────────────────────────────────────────────────────

/// Fire-and-forget delivery of one value to one channel.
///
/// Implementations hold a persistent broker session opened at startup and
/// do **not** reconnect on failure — a lost session surfaces as
/// [`PublishError::ConnectionLost`] on every subsequent call.
pub trait PublishPort {
    /// Send `value` as its decimal text form to the channel's topic,
    /// at-most-once. No acknowledgment wait, no retry.
    fn publish(&mut self, channel: &PublishChannel, value: i32) -> Result<(), PublishError>;
}

// ───────────────────────────────────────────────────────────────
// Time port (driven adapter: domain → monotonic clock)
// ───────────────────────────────────────────────────────────────

/// Monotonic time source plus blocking delay.
///
/// `sleep` runs on the control thread to completion, with no
/// cancellation. The indicator hold durations and the cooldown all pass
/// through here, which is what lets tests run cycles on a virtual clock.
pub trait TimePort {
    /// Monotonic time since boot.
    fn uptime(&self) -> Duration;

    /// Block the control thread for the given duration.
    fn sleep(&self, duration: Duration);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port. Adapters
/// decide where they go (serial log today).
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}
