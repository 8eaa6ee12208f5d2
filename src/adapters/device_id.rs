//! Device identity derived from the ESP32 factory MAC address.
//!
//! The broker client id is the full 6-byte MAC in lowercase hex
//! (e.g. `deadbeefcafe`) — stable across reboots (factory-burned eFuse
//! MAC) and unique per board, which is all the broker needs.

/// Hex-encoded client id: 12 chars.
pub type ClientIdString = heapless::String<16>;

/// Full 6-byte MAC address.
pub type MacAddress = [u8; 6];

/// Read the factory MAC address from eFuse.
#[cfg(target_os = "espidf")]
pub fn read_mac() -> MacAddress {
    let mut mac: MacAddress = [0u8; 6];
    unsafe {
        esp_idf_svc::sys::esp_efuse_mac_get_default(mac.as_mut_ptr());
    }
    mac
}

/// Simulation: returns a deterministic fake MAC.
#[cfg(not(target_os = "espidf"))]
pub fn read_mac() -> MacAddress {
    [0xDE, 0xAD, 0xBE, 0xEF, 0xCA, 0xFE]
}

/// Hex-encode the MAC into the broker client id.
pub fn client_id(mac: &MacAddress) -> ClientIdString {
    let mut id = ClientIdString::new();
    use core::fmt::Write;
    for byte in mac {
        let _ = write!(id, "{:02x}", byte);
    }
    id
}
