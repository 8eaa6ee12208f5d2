//! MQTT telemetry adapter.
//!
//! Implements [`PublishPort`] over a persistent session to the Adafruit IO
//! broker. The session is opened once at startup; this adapter never
//! reconnects — a dropped session surfaces as `ConnectionLost` on every
//! publish until the board is reset.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: wraps `EspMqttClient` plus a background thread that drives
//! the connection event stream.
//! On host/test: records `(topic, payload)` pairs in memory and honours an
//! injected offline flag.

use core::fmt::Write;

#[cfg(target_os = "espidf")]
use esp_idf_svc::mqtt::client::{EspMqttClient, MqttClientConfiguration, QoS};
#[cfg(target_os = "espidf")]
use log::{info, warn};

use crate::app::channel::PublishChannel;
use crate::app::ports::PublishPort;
#[cfg(target_os = "espidf")]
use crate::adapters::secrets::Credentials;
#[cfg(target_os = "espidf")]
use crate::config;
use crate::error::PublishError;

/// Decimal text form of a published value.
type Payload = heapless::String<12>;

fn encode(value: i32) -> Result<Payload, PublishError> {
    let mut payload = Payload::new();
    write!(payload, "{}", value).map_err(|_| PublishError::Encoding)?;
    Ok(payload)
}

pub struct MqttTelemetry {
    #[cfg(target_os = "espidf")]
    client: EspMqttClient<'static>,
    #[cfg(not(target_os = "espidf"))]
    sent: Vec<(String, String)>,
    #[cfg(not(target_os = "espidf"))]
    offline: bool,
}

impl MqttTelemetry {
    /// Open the broker session and spawn the connection poll thread.
    #[cfg(target_os = "espidf")]
    pub fn connect(client_id: &str, credentials: &Credentials) -> anyhow::Result<Self> {
        let url = format!("mqtt://{}:{}", config::BROKER_HOST, config::BROKER_PORT);
        let conf = MqttClientConfiguration {
            client_id: Some(client_id),
            username: Some(credentials.username),
            password: Some(credentials.key),
            ..Default::default()
        };

        let (client, mut connection) = EspMqttClient::new(&url, &conf)?;

        // The ESP-IDF client delivers connection events through a pull
        // stream that must be drained or the session stalls.
        std::thread::Builder::new()
            .name("mqtt-poll".to_string())
            .stack_size(8192)
            .spawn(move || loop {
                match connection.next() {
                    Ok(_event) => {
                        // Publish-only client: nothing to dispatch.
                    }
                    Err(e) => {
                        warn!("mqtt poll error: {:?}", e);
                        std::thread::sleep(std::time::Duration::from_secs(2));
                    }
                }
            })?;

        info!("MQTT: session open to {} as '{}'", url, client_id);
        Ok(Self { client })
    }

    /// Host construction: an in-memory broker stand-in.
    #[cfg(not(target_os = "espidf"))]
    pub fn new() -> Self {
        Self {
            sent: Vec::new(),
            offline: false,
        }
    }

    /// Simulate a dropped broker connection (host only).
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    /// Everything delivered so far, as `(topic, payload)` (host only).
    #[cfg(not(target_os = "espidf"))]
    pub fn sent(&self) -> &[(String, String)] {
        &self.sent
    }
}

#[cfg(not(target_os = "espidf"))]
impl Default for MqttTelemetry {
    fn default() -> Self {
        Self::new()
    }
}

// ── PublishPort implementation ────────────────────────────────

impl PublishPort for MqttTelemetry {
    #[cfg(target_os = "espidf")]
    fn publish(&mut self, channel: &PublishChannel, value: i32) -> Result<(), PublishError> {
        let payload = encode(value)?;
        self.client
            .publish(
                channel.topic.as_str(),
                QoS::AtMostOnce,
                false,
                payload.as_bytes(),
            )
            .map(|_message_id| ())
            .map_err(|_| PublishError::ConnectionLost)
    }

    #[cfg(not(target_os = "espidf"))]
    fn publish(&mut self, channel: &PublishChannel, value: i32) -> Result<(), PublishError> {
        let payload = encode(value)?;
        if self.offline {
            return Err(PublishError::ConnectionLost);
        }
        self.sent
            .push((channel.topic.as_str().to_string(), payload.as_str().to_string()));
        Ok(())
    }
}
