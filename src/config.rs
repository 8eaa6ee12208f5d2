//! System configuration parameters
//!
//! All tunable parameters for the ClimaSense monitor. There is no runtime
//! configuration surface — values are fixed at startup.

use serde::{Deserialize, Serialize};

/// Telemetry broker host (Adafruit IO).
pub const BROKER_HOST: &str = "io.adafruit.com";
/// Telemetry broker port (plain MQTT).
pub const BROKER_PORT: u16 = 1883;

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Alerting ---
    /// Temperature (Celsius) above which a sample is classed as exceeded.
    pub alert_threshold_c: i8,

    // --- Timing ---
    /// Publish window length (seconds). The cycle body runs only while the
    /// last publish is younger than this.
    pub publish_interval_secs: u64,
    /// Quiescent sleep at the end of every cycle (seconds).
    pub cooldown_secs: u64,

    // --- Alert sequence holds ---
    /// How long the alert colour stays lit (seconds).
    pub colour_hold_secs: u64,
    /// Length of the audible pulse (seconds).
    pub buzzer_pulse_secs: u64,
    /// How long the alert screen stays up before clearing (seconds).
    pub alert_hold_secs: u64,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Alerting
            alert_threshold_c: 23,

            // Timing
            publish_interval_secs: 40,
            cooldown_secs: 15,

            // Alert sequence
            colour_hold_secs: 2,
            buzzer_pulse_secs: 1,
            alert_hold_secs: 5,
        }
    }
}
