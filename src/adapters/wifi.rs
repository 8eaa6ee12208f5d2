//! WiFi station bring-up.
//!
//! The monitor needs the network once, at startup, before the broker
//! session opens. Connection is blocking with a bounded retry budget;
//! exhausting it aborts startup. There is no runtime reconnect logic —
//! a session lost later surfaces as failed publishes, and local
//! monitoring continues.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: real ESP-IDF WiFi driver calls.
//! - **all other targets**: only the credential validation helpers are
//!   compiled (exercised by host tests).

use crate::adapters::secrets::WifiCredentials;
use crate::error::Error;

#[cfg(target_os = "espidf")]
use anyhow::anyhow;
#[cfg(target_os = "espidf")]
use esp_idf_hal::modem::Modem;
#[cfg(target_os = "espidf")]
use esp_idf_svc::eventloop::EspSystemEventLoop;
#[cfg(target_os = "espidf")]
use esp_idf_svc::wifi::{AuthMethod, BlockingWifi, ClientConfiguration, Configuration, EspWifi};
#[cfg(target_os = "espidf")]
use log::{info, warn};

#[cfg(target_os = "espidf")]
const CONNECT_ATTEMPTS: u32 = 5;
#[cfg(target_os = "espidf")]
const RETRY_DELAY_MS: u64 = 3_000;

// ───────────────────────────────────────────────────────────────
// Validation
// ───────────────────────────────────────────────────────────────

fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

pub fn validate_ssid(ssid: &str) -> Result<(), Error> {
    if ssid.is_empty() || ssid.len() > 32 || !is_printable_ascii(ssid) {
        return Err(Error::Init("SSID must be 1-32 printable ASCII bytes"));
    }
    Ok(())
}

pub fn validate_psk(psk: &str) -> Result<(), Error> {
    if psk.is_empty() {
        return Ok(());
    }
    if psk.len() < 8 || psk.len() > 64 {
        return Err(Error::Init(
            "passphrase must be 8-64 bytes for WPA2, or empty for open",
        ));
    }
    Ok(())
}

pub fn validate(credentials: &WifiCredentials) -> Result<(), Error> {
    validate_ssid(credentials.ssid)?;
    validate_psk(credentials.psk)
}

// ───────────────────────────────────────────────────────────────
// Station connect
// ───────────────────────────────────────────────────────────────

/// Bring the station interface up and block until it has an address.
/// The returned handle must be kept alive for the process lifetime.
#[cfg(target_os = "espidf")]
pub fn connect_station(
    modem: Modem,
    sysloop: EspSystemEventLoop,
    credentials: &WifiCredentials,
) -> anyhow::Result<EspWifi<'static>> {
    validate(credentials)?;

    let mut esp_wifi = EspWifi::new(modem, sysloop.clone(), None)?;
    let mut wifi = BlockingWifi::wrap(&mut esp_wifi, sysloop)?;

    let auth_method = if credentials.psk.is_empty() {
        AuthMethod::None
    } else {
        AuthMethod::WPAWPA2Personal
    };

    wifi.set_configuration(&Configuration::Client(ClientConfiguration {
        ssid: credentials
            .ssid
            .try_into()
            .map_err(|_| anyhow!("wifi ssid too long"))?,
        password: credentials
            .psk
            .try_into()
            .map_err(|_| anyhow!("wifi passphrase too long"))?,
        auth_method,
        ..Default::default()
    }))?;

    wifi.start()?;
    info!("wifi started, connecting to '{}'", credentials.ssid);

    let mut last_err = None;
    for attempt in 1..=CONNECT_ATTEMPTS {
        match wifi.connect().and_then(|()| wifi.wait_netif_up()) {
            Ok(()) => {
                info!("wifi connected and netif up on attempt {attempt}");
                last_err = None;
                break;
            }
            Err(e) => {
                warn!("wifi connect attempt {attempt}/{CONNECT_ATTEMPTS} failed: {e}");
                last_err = Some(e);
                if attempt < CONNECT_ATTEMPTS {
                    let _ = wifi.disconnect();
                    std::thread::sleep(std::time::Duration::from_millis(RETRY_DELAY_MS));
                }
            }
        }
    }

    match last_err {
        None => Ok(esp_wifi),
        Some(e) => Err(e.into()),
    }
}
