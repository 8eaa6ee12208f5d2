//! DHT11 temperature/humidity sensor (single-wire protocol).
//!
//! Each read triggers the host-side start pulse, then samples the 40-bit
//! response frame. The sensor needs at least a second between reads; the
//! monitor's cooldown enforces a far larger gap, so the driver does not
//! rate-limit itself.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: bit-bangs the protocol through an open-drain GPIO via the
//! `dht-sensor` crate.
//! On host/test: reads from static atomics for injection.

use core::sync::atomic::{AtomicBool, AtomicI16, AtomicU16};
#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::Ordering;
use core::time::Duration;

#[cfg(target_os = "espidf")]
use dht_sensor::dht11;
#[cfg(target_os = "espidf")]
use esp_idf_hal::delay::Ets;
#[cfg(target_os = "espidf")]
use esp_idf_hal::gpio::{AnyIOPin, InputOutput, PinDriver, Pull};

use crate::app::sample::Sample;
use crate::error::SensorError;

static SIM_TEMP_C: AtomicI16 = AtomicI16::new(21);
static SIM_HUMIDITY_PCT: AtomicU16 = AtomicU16::new(40);
static SIM_FAILING: AtomicBool = AtomicBool::new(false);

/// Inject the reading the next `measure()` will return (host only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_reading(temperature_c: i8, humidity_pct: u8) {
    SIM_TEMP_C.store(i16::from(temperature_c), Ordering::Relaxed);
    SIM_HUMIDITY_PCT.store(u16::from(humidity_pct), Ordering::Relaxed);
}

/// Make every `measure()` fail with a timeout (host only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_failing(failing: bool) {
    SIM_FAILING.store(failing, Ordering::Relaxed);
}

pub struct DhtSensor {
    #[cfg(target_os = "espidf")]
    pin: PinDriver<'static, AnyIOPin, InputOutput>,
    #[cfg(target_os = "espidf")]
    delay: Ets,
}

impl DhtSensor {
    #[cfg(target_os = "espidf")]
    pub fn new(pin: AnyIOPin) -> Result<Self, SensorError> {
        let mut pin = PinDriver::input_output_od(pin).map_err(|_| SensorError::GpioFault)?;
        pin.set_pull(Pull::Up).map_err(|_| SensorError::GpioFault)?;
        pin.set_high().map_err(|_| SensorError::GpioFault)?;
        Ok(Self { pin, delay: Ets })
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new() -> Result<Self, SensorError> {
        Ok(Self {})
    }

    /// Take one measurement, stamped with the given capture instant.
    #[cfg(target_os = "espidf")]
    pub fn measure(&mut self, taken_at: Duration) -> Result<Sample, SensorError> {
        self.pin.set_high().map_err(|_| SensorError::GpioFault)?;
        let reading = dht11::blocking::read(&mut self.delay, &mut self.pin).map_err(|e| match e {
            dht_sensor::DhtError::Timeout => SensorError::Timeout,
            dht_sensor::DhtError::ChecksumMismatch => SensorError::ChecksumMismatch,
            dht_sensor::DhtError::PinError(_) => SensorError::GpioFault,
        })?;
        Ok(Sample {
            temperature_c: reading.temperature,
            humidity_pct: reading.relative_humidity,
            taken_at,
        })
    }

    /// Host measurement: returns the injected values.
    #[cfg(not(target_os = "espidf"))]
    pub fn measure(&mut self, taken_at: Duration) -> Result<Sample, SensorError> {
        if SIM_FAILING.load(Ordering::Relaxed) {
            return Err(SensorError::Timeout);
        }
        Ok(Sample {
            temperature_c: SIM_TEMP_C.load(Ordering::Relaxed) as i8,
            humidity_pct: SIM_HUMIDITY_PCT.load(Ordering::Relaxed) as u8,
            taken_at,
        })
    }
}
