//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production). The
//! publish lines mirror what an operator watching the serial console
//! expects: one line per attempt with its outcome.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => {
                info!("START | monitor loop running");
            }
            AppEvent::Sampled { sample, alert } => {
                info!(
                    "SAMPLE | T={}\u{00b0}C H={}% | {:?}",
                    sample.temperature_c, sample.humidity_pct, alert
                );
            }
            AppEvent::AlertSignalled {
                temperature_c,
                threshold_c,
            } => {
                warn!(
                    "ALERT | temperature {}\u{00b0}C exceeded {}\u{00b0}C",
                    temperature_c, threshold_c
                );
            }
            AppEvent::Published { topic, value } => {
                info!("Publishing: {} to {}... Done", value, topic);
            }
            AppEvent::PublishFailed {
                topic,
                value,
                error,
            } => {
                warn!("Publishing: {} to {}... failed: {}", value, topic, error);
            }
        }
    }
}
