//! Adapters — concrete implementations of the port traits.
//!
//! | Adapter     | Implements       | Connects to                |
//! |-------------|------------------|----------------------------|
//! | `hardware`  | SensorPort       | DHT11 on GPIO              |
//! |             | IndicatorPort    | RGB LED, buzzer, board LED |
//! |             | DisplayPort      | 16x2 I2C character LCD     |
//! | `mqtt`      | PublishPort      | Adafruit IO MQTT broker    |
//! | `time`      | TimePort         | ESP32 system timer         |
//! | `log_sink`  | EventSink        | Serial log output          |
//! | `device_id` | —                | eFuse factory MAC          |
//! | `secrets`   | —                | Build-time credentials     |
//! | `wifi`      | —                | ESP-IDF WiFi STA bring-up  |

pub mod device_id;
pub mod hardware;
pub mod log_sink;
pub mod mqtt;
pub mod secrets;
pub mod time;
pub mod wifi;
