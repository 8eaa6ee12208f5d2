//! ClimaSense Firmware — Main Entry Point
//!
//! Ports-and-adapters wiring around the monitor loop:
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                   │
//! │                                                            │
//! │  HardwareAdapter      MqttTelemetry       SystemClock      │
//! │  (Sensor+Indicator    (PublishPort)       (TimePort)       │
//! │   +Display)           LogEventSink        WiFi bring-up    │
//! │                       (EventSink)                          │
//! │                                                            │
//! │  ──────────────── Port Trait Boundary ──────────────       │
//! │                                                            │
//! │  ┌──────────────────────────────────────────────────┐      │
//! │  │        MonitorService (pure logic)               │      │
//! │  │  sample · alert · present · publish · cooldown   │      │
//! │  └──────────────────────────────────────────────────┘      │
//! └────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    use anyhow::anyhow;
    use esp_idf_hal::gpio::IOPin;
    use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
    use esp_idf_hal::peripherals::Peripherals;
    use esp_idf_hal::units::Hertz;
    use esp_idf_svc::eventloop::EspSystemEventLoop;
    use log::info;

    use climasense::adapters::device_id;
    use climasense::adapters::hardware::HardwareAdapter;
    use climasense::adapters::log_sink::LogEventSink;
    use climasense::adapters::mqtt::MqttTelemetry;
    use climasense::adapters::secrets;
    use climasense::adapters::time::SystemClock;
    use climasense::adapters::wifi;
    use climasense::app::channel::Channels;
    use climasense::app::service::MonitorService;
    use climasense::config::SystemConfig;
    use climasense::drivers::activity_led::ActivityLed;
    use climasense::drivers::buzzer::Buzzer;
    use climasense::drivers::display::DisplayPresenter;
    use climasense::drivers::hw_init;
    use climasense::drivers::lcd1602::{self, I2cLcd};
    use climasense::drivers::rgb_led::RgbLed;
    use climasense::pins;
    use climasense::sensors::dht::DhtSensor;

    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("ClimaSense v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Peripherals ────────────────────────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }
    let peripherals = Peripherals::take()?;

    // ── 3. Display: bus scan, then panel init ─────────────────
    let i2c_config = I2cConfig::new().baudrate(Hertz(pins::I2C_FREQ_HZ));
    let mut i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio8,
        peripherals.pins.gpio9,
        &i2c_config,
    )?;
    let addr = lcd1602::scan_bus(&mut i2c)
        .ok_or_else(|| anyhow!("no device answered the I2C bus scan — is the panel wired?"))?;
    info!("LCD found at 0x{:02x}", addr);
    let display = DisplayPresenter::new(I2cLcd::new(i2c, addr)?);

    // ── 4. Climate sensor ─────────────────────────────────────
    let dht = DhtSensor::new(peripherals.pins.gpio21.downgrade())?;

    // ── 5. Network + broker session ───────────────────────────
    let sysloop = EspSystemEventLoop::take()?;
    let wifi_credentials = secrets::wifi_credentials()?;
    let _wifi = wifi::connect_station(peripherals.modem, sysloop, &wifi_credentials)?;

    let credentials = secrets::aio_credentials()?;
    let client_id = device_id::client_id(&device_id::read_mac());
    info!("Device ID: {}", client_id);

    let channels = Channels::for_account(credentials.username);
    let mut telemetry = MqttTelemetry::connect(client_id.as_str(), &credentials)?;

    // ── 6. Assemble the monitor ───────────────────────────────
    let mut hw = HardwareAdapter::new(
        dht,
        RgbLed::new(),
        Buzzer::new(),
        ActivityLed::new(),
        display,
    );
    let clock = SystemClock::new();
    let mut sink = LogEventSink::new();

    let mut service = MonitorService::new(SystemConfig::default(), channels);
    service.start(&mut hw, &clock, &mut sink);

    info!("System ready. Entering monitor loop.");

    // ── 7. Drive loop ─────────────────────────────────────────
    // run_once reports failures itself and always cooldowns; success and
    // failure leave this loop identically.
    loop {
        let _ = service.run_once(&mut hw, &mut telemetry, &clock, &mut sink);
    }
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    eprintln!("climasense targets the ESP32-S3; host builds only run the test suite");
}
