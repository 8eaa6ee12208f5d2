//! Named telemetry destinations.
//!
//! Two channels exist for the lifetime of the process — temperature and
//! humidity — each bound to an Adafruit IO feed topic derived from the
//! account username (`<user>/feeds/<name>`). Built once at startup,
//! immutable afterwards.

use core::fmt::Write;

/// A named telemetry destination with its fixed remote topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishChannel {
    /// Short channel name (also the feed key).
    pub name: &'static str,
    /// Fully-qualified broker topic.
    pub topic: heapless::String<64>,
}

impl PublishChannel {
    /// Bind a feed name to the account's topic namespace.
    pub fn new(name: &'static str, username: &str) -> Self {
        let mut topic = heapless::String::new();
        let _ = write!(topic, "{}/feeds/{}", username, name);
        Self { name, topic }
    }
}

/// The full set of channels the monitor publishes to.
#[derive(Debug, Clone)]
pub struct Channels {
    pub temperature: PublishChannel,
    pub humidity: PublishChannel,
}

impl Channels {
    /// Build both channels for an Adafruit IO account.
    pub fn for_account(username: &str) -> Self {
        Self {
            temperature: PublishChannel::new("temperature", username),
            humidity: PublishChannel::new("humidity", username),
        }
    }
}
