//! The checked-in secrets template.
//!
//! Copy it to `secrets.env` (git-ignored), then replace every `<...>`
//! placeholder. Loading the template unchanged fails on the first
//! placeholder, so a node never boots with dummy credentials.

/// File name the node and `check-config` look for by default.
pub const SECRETS_FILE: &str = "secrets.env";

/// Placeholders shipped in [`SECRETS_TEMPLATE`]. A value still containing
/// one of them was never filled in.
pub const PLACEHOLDERS: &[&str] = &[
    "<YOUR_WIFI_SSID>",
    "<YOUR_WIFI_PASSWORD>",
    "<INFLUX_SERVER_IP>",
    "<INFLUXDB_ORGANIZATION>",
    "<INFLUXDB_BUCKET>",
    "<INFLUXDB_TOKEN>",
    "<NODE_LOCATION>",
];

/// Template for the per-node secrets file.
pub const SECRETS_TEMPLATE: &str = r#"# Per-node configuration for the climate monitoring system.
#
# 1. Copy this file to "secrets.env" next to it.
# 2. Replace every <PLACEHOLDER>.
# secrets.env is ignored by git and stays local.

# WiFi
WIFI_SSID="<YOUR_WIFI_SSID>"
WIFI_PASSWORD="<YOUR_WIFI_PASSWORD>"

# InfluxDB
INFLUX_HOST="http://<INFLUX_SERVER_IP>:8086"
INFLUX_ORG="<INFLUXDB_ORGANIZATION>"
INFLUX_BUCKET="<INFLUXDB_BUCKET>"
INFLUX_TOKEN="<INFLUXDB_TOKEN>"

# I2C wiring (ESP8266: SDA = 4, SCL = 5; ESP32: SDA = 21, SCL = 22)
I2C_SDA=4
I2C_SCL=5

# Node
TIME_TO_SLEEP=(30 * 60)           # sleep interval in seconds
NODE_LOCATION="<NODE_LOCATION>"   # e.g. livingroom, office
NTP_SERVER=pool.ntp.org           # https://www.ntppool.org/en/

# Static IP
#   0 = DHCP (recommended)
#   1 = use the addresses below
USE_STATIC_IP=0

# Replace the last octet with a free address in your LAN
WIFI_STATIC_IP=192,168,0,100
WIFI_DNS=192,168,0,1
WIFI_GATEWAY=192,168,0,1
WIFI_SUBNET=255,255,255,0
"#;
