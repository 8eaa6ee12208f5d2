//! The unit of measurement flowing through one cycle.

use core::time::Duration;

/// One (temperature, humidity) reading with its capture instant.
///
/// Produced by the sensor port at the top of a cycle, consumed by the
/// display and publish steps, and dropped when the cycle ends. Never
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    /// Temperature in whole degrees Celsius (DHT11 resolution).
    pub temperature_c: i8,
    /// Relative humidity in whole percent.
    pub humidity_pct: u8,
    /// Monotonic uptime at which the measurement was taken.
    pub taken_at: Duration,
}
