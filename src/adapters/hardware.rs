//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the climate sensor, the indicator drivers, and the display
//! presenter, exposing them through [`SensorPort`], [`IndicatorPort`],
//! and [`DisplayPort`]. This is the only module in the system that touches
//! actual hardware. On non-espidf targets, the underlying drivers use
//! cfg-gated simulation stubs.

use core::time::Duration;

use crate::app::ports::{DisplayPort, IndicatorPort, SensorPort};
use crate::app::sample::Sample;
use crate::drivers::activity_led::ActivityLed;
use crate::drivers::buzzer::Buzzer;
use crate::drivers::display::DisplayPresenter;
use crate::drivers::rgb_led::RgbLed;
use crate::error::SensorError;
use crate::sensors::dht::DhtSensor;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    sensor: DhtSensor,
    rgb: RgbLed,
    buzzer: Buzzer,
    activity: ActivityLed,
    display: DisplayPresenter,
}

impl HardwareAdapter {
    pub fn new(
        sensor: DhtSensor,
        rgb: RgbLed,
        buzzer: Buzzer,
        activity: ActivityLed,
        display: DisplayPresenter,
    ) -> Self {
        Self {
            sensor,
            rgb,
            buzzer,
            activity,
            display,
        }
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for HardwareAdapter {
    fn measure(&mut self, taken_at: Duration) -> Result<Sample, SensorError> {
        self.sensor.measure(taken_at)
    }
}

// ── IndicatorPort implementation ──────────────────────────────

impl IndicatorPort for HardwareAdapter {
    fn set_colour(&mut self, r: bool, g: bool, b: bool) {
        self.rgb.set(r, g, b);
    }

    fn colour_off(&mut self) {
        self.rgb.off();
    }

    fn buzzer(&mut self, on: bool) {
        self.buzzer.set(on);
    }

    fn activity(&mut self, on: bool) {
        self.activity.set(on);
    }

    fn all_off(&mut self) {
        self.rgb.off();
        self.buzzer.set(false);
        self.activity.set(false);
    }
}

// ── DisplayPort implementation ────────────────────────────────

impl DisplayPort for HardwareAdapter {
    fn show_reading(&mut self, sample: &Sample) {
        self.display.show_reading(sample);
    }

    fn show_alert(&mut self, threshold_c: i8) {
        self.display.show_alert(threshold_c);
    }

    fn clear(&mut self) {
        self.display.clear();
    }
}
