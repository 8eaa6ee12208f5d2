//! Mock adapters for integration tests.
//!
//! Records every port call so tests can assert on the full command
//! history without touching real GPIO, I2C, or the network.

use core::cell::{Cell, RefCell};
use core::time::Duration;

use climasense::app::channel::PublishChannel;
use climasense::app::events::AppEvent;
use climasense::app::ports::{
    DisplayPort, EventSink, IndicatorPort, PublishPort, SensorPort, TimePort,
};
use climasense::app::sample::Sample;
use climasense::error::{PublishError, SensorError};

// ── Hardware call record ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HwCall {
    Clear,
    ShowReading { temperature_c: i8, humidity_pct: u8 },
    ShowAlert { threshold_c: i8 },
    SetColour { r: bool, g: bool, b: bool },
    ColourOff,
    Buzzer(bool),
    Activity(bool),
    AllOff,
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub calls: Vec<HwCall>,
    /// What the next `measure()` returns.
    pub reading: Result<(i8, u8), SensorError>,
    pub measure_count: u32,
    pub colour: (bool, bool, bool),
    pub buzzer_on: bool,
    pub activity_on: bool,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            reading: Ok((21, 40)),
            measure_count: 0,
            colour: (false, false, false),
            buzzer_on: false,
            activity_on: false,
        }
    }

    /// Index of the first call matching `predicate`, if any.
    pub fn position(&self, predicate: impl Fn(&HwCall) -> bool) -> Option<usize> {
        self.calls.iter().position(predicate)
    }

    pub fn contains(&self, call: &HwCall) -> bool {
        self.calls.contains(call)
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockHardware {
    fn measure(&mut self, taken_at: Duration) -> Result<Sample, SensorError> {
        self.measure_count += 1;
        let (temperature_c, humidity_pct) = self.reading?;
        Ok(Sample {
            temperature_c,
            humidity_pct,
            taken_at,
        })
    }
}

impl IndicatorPort for MockHardware {
    fn set_colour(&mut self, r: bool, g: bool, b: bool) {
        self.colour = (r, g, b);
        self.calls.push(HwCall::SetColour { r, g, b });
    }

    fn colour_off(&mut self) {
        self.colour = (false, false, false);
        self.calls.push(HwCall::ColourOff);
    }

    fn buzzer(&mut self, on: bool) {
        self.buzzer_on = on;
        self.calls.push(HwCall::Buzzer(on));
    }

    fn activity(&mut self, on: bool) {
        self.activity_on = on;
        self.calls.push(HwCall::Activity(on));
    }

    fn all_off(&mut self) {
        self.colour = (false, false, false);
        self.buzzer_on = false;
        self.activity_on = false;
        self.calls.push(HwCall::AllOff);
    }
}

impl DisplayPort for MockHardware {
    fn show_reading(&mut self, sample: &Sample) {
        self.calls.push(HwCall::ShowReading {
            temperature_c: sample.temperature_c,
            humidity_pct: sample.humidity_pct,
        });
    }

    fn show_alert(&mut self, threshold_c: i8) {
        self.calls.push(HwCall::ShowAlert { threshold_c });
    }

    fn clear(&mut self) {
        self.calls.push(HwCall::Clear);
    }
}

// ── MockPublisher ─────────────────────────────────────────────

pub struct MockPublisher {
    pub sent: Vec<(String, i32)>,
    /// Topics whose publish attempts fail with `ConnectionLost`.
    pub failing_topics: Vec<String>,
    pub attempts: u32,
}

#[allow(dead_code)]
impl MockPublisher {
    pub fn new() -> Self {
        Self {
            sent: Vec::new(),
            failing_topics: Vec::new(),
            attempts: 0,
        }
    }

    pub fn fail_topic(&mut self, topic: &str) {
        self.failing_topics.push(topic.to_string());
    }
}

impl Default for MockPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl PublishPort for MockPublisher {
    fn publish(&mut self, channel: &PublishChannel, value: i32) -> Result<(), PublishError> {
        self.attempts += 1;
        if self
            .failing_topics
            .iter()
            .any(|t| t.as_str() == channel.topic.as_str())
        {
            return Err(PublishError::ConnectionLost);
        }
        self.sent.push((channel.topic.as_str().to_string(), value));
        Ok(())
    }
}

// ── MockClock ─────────────────────────────────────────────────

/// Virtual monotonic clock: sleeps are recorded and advance virtual time
/// instead of blocking the test.
pub struct MockClock {
    now: Cell<Duration>,
    pub sleeps: RefCell<Vec<Duration>>,
}

#[allow(dead_code)]
impl MockClock {
    pub fn new() -> Self {
        Self {
            now: Cell::new(Duration::ZERO),
            sleeps: RefCell::new(Vec::new()),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    /// How many recorded sleeps have exactly this length.
    pub fn sleep_count(&self, of: Duration) -> usize {
        self.sleeps.borrow().iter().filter(|d| **d == of).count()
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimePort for MockClock {
    fn uptime(&self) -> Duration {
        self.now.get()
    }

    fn sleep(&self, duration: Duration) {
        self.sleeps.borrow_mut().push(duration);
        self.advance(duration);
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn published_topics(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::Published { topic, .. } => Some(topic.as_str().to_string()),
                _ => None,
            })
            .collect()
    }

    pub fn failed_topics(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::PublishFailed { topic, .. } => Some(topic.as_str().to_string()),
                _ => None,
            })
            .collect()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
