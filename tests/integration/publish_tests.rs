//! Integration tests: telemetry path through the real (simulated) adapters.

use climasense::adapters::hardware::HardwareAdapter;
use climasense::adapters::mqtt::MqttTelemetry;
use climasense::app::alert::AlertState;
use climasense::app::channel::Channels;
use climasense::app::service::{CycleOutcome, MonitorService};
use climasense::config::SystemConfig;
use climasense::drivers::activity_led::ActivityLed;
use climasense::drivers::buzzer::Buzzer;
use climasense::drivers::display::DisplayPresenter;
use climasense::drivers::lcd1602::I2cLcd;
use climasense::drivers::rgb_led::RgbLed;
use climasense::sensors::dht::{self, DhtSensor};

use crate::mock_hw::{MockClock, RecordingSink};

fn host_hardware() -> HardwareAdapter {
    HardwareAdapter::new(
        DhtSensor::new().unwrap(),
        RgbLed::new(),
        Buzzer::new(),
        ActivityLed::new(),
        DisplayPresenter::new(I2cLcd::new(0x27).unwrap()),
    )
}

/// Drives the whole stack on the host: simulated DHT reading in, decimal
/// MQTT payloads out, with only the clock mocked.
#[test]
fn full_stack_cycle_delivers_decimal_payloads() {
    let mut svc = MonitorService::new(SystemConfig::default(), Channels::for_account("ada"));
    let mut hw = host_hardware();
    let mut telemetry = MqttTelemetry::new();
    let clock = MockClock::new();
    let mut sink = RecordingSink::new();

    dht::sim_set_reading(24, 55);
    svc.start(&mut hw, &clock, &mut sink);

    let outcome = svc
        .run_cycle(&mut hw, &mut telemetry, &clock, &mut sink)
        .unwrap();
    assert!(matches!(
        outcome,
        CycleOutcome::Completed {
            alert: AlertState::Exceeded,
            ..
        }
    ));

    assert_eq!(
        telemetry.sent(),
        &[
            ("ada/feeds/temperature".to_string(), "24".to_string()),
            ("ada/feeds/humidity".to_string(), "55".to_string()),
        ]
    );
}

#[test]
fn offline_broker_degrades_to_local_only_operation() {
    let mut svc = MonitorService::new(SystemConfig::default(), Channels::for_account("ada"));
    let mut hw = host_hardware();
    let mut telemetry = MqttTelemetry::new();
    let clock = MockClock::new();
    let mut sink = RecordingSink::new();

    // Reading values are irrelevant here; whatever the sim holds is fine.
    telemetry.sim_set_offline(true);
    svc.start(&mut hw, &clock, &mut sink);

    let outcome = svc.run_once(&mut hw, &mut telemetry, &clock, &mut sink);
    assert!(outcome.is_ok(), "a dead session must not abort the cycle");
    assert!(telemetry.sent().is_empty());
    assert_eq!(sink.failed_topics().len(), 2);
}
