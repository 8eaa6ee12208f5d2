//! Outbound application events.
//!
//! [`MonitorService`](super::service::MonitorService) emits these through
//! the [`EventSink`](super::ports::EventSink) port. Adapters on the other
//! side decide what to do with them — today they go to the serial log.

use crate::app::alert::AlertState;
use crate::app::sample::Sample;
use crate::error::PublishError;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The monitor loop has started.
    Started,

    /// A sample was taken and classified.
    Sampled { sample: Sample, alert: AlertState },

    /// The alert sequence is about to run for an exceeded sample.
    AlertSignalled { temperature_c: i8, threshold_c: i8 },

    /// A value was delivered to a broker topic.
    Published {
        topic: heapless::String<64>,
        value: i32,
    },

    /// A publish attempt failed; the value was dropped, not queued.
    PublishFailed {
        topic: heapless::String<64>,
        value: i32,
        error: PublishError,
    },
}
