//! Build-time credential source.
//!
//! The broker account and WiFi credentials are baked into the image at
//! compile time (`AIO_USERNAME`, `AIO_KEY`, `WIFI_SSID`, `WIFI_PASS`
//! environment variables at build). This module only checks presence —
//! the values themselves are opaque to the firmware.

use crate::error::Error;

/// Adafruit IO account credentials.
#[derive(Debug, Clone, Copy)]
pub struct Credentials {
    pub username: &'static str,
    pub key: &'static str,
}

/// WiFi station credentials.
#[derive(Debug, Clone, Copy)]
pub struct WifiCredentials {
    pub ssid: &'static str,
    pub psk: &'static str,
}

/// Load the broker credentials, failing if either is missing.
pub fn aio_credentials() -> Result<Credentials, Error> {
    let username =
        option_env!("AIO_USERNAME").ok_or(Error::Init("AIO_USERNAME not set at build time"))?;
    let key = option_env!("AIO_KEY").ok_or(Error::Init("AIO_KEY not set at build time"))?;
    Ok(Credentials { username, key })
}

/// Load the WiFi credentials, failing if the SSID is missing. An empty
/// PSK is allowed (open network).
pub fn wifi_credentials() -> Result<WifiCredentials, Error> {
    let ssid = option_env!("WIFI_SSID").ok_or(Error::Init("WIFI_SSID not set at build time"))?;
    let psk = option_env!("WIFI_PASS").unwrap_or("");
    Ok(WifiCredentials { ssid, psk })
}
