//! The node configuration and its loader.
//!
//! [`NodeConfig::load`] reads every key from a [`ConfigSource`], validates
//! it and fails on the first problem with a [`ConfigError`] naming the key.
//! Keys are checked in [`ConfigKey::ALL`] order, so the reported key is
//! always the first bad line of the template.
//!
//! # Examples
//!
//! ```
//! use climate_node::{NetworkMode, NodeConfig};
//!
//! let config = NodeConfig::from_env_text(
//!     r#"
//!     WIFI_SSID=office
//!     WIFI_PASSWORD=hunter22
//!     INFLUX_HOST=http://10.0.0.5:8086
//!     INFLUX_ORG=home
//!     INFLUX_BUCKET=climate
//!     INFLUX_TOKEN=s3cr3t
//!     I2C_SDA=4
//!     I2C_SCL=5
//!     TIME_TO_SLEEP=30 * 60
//!     NODE_LOCATION=office
//!     NTP_SERVER=pool.ntp.org
//!     USE_STATIC_IP=0
//!     "#,
//! )?;
//!
//! assert_eq!(config.influx.host.as_str(), "http://10.0.0.5:8086");
//! assert_eq!(config.sleep.as_secs(), 1800);
//! assert_eq!(config.network, NetworkMode::Dhcp);
//! # Ok::<(), climate_node::ConfigError>(())
//! ```

use core::fmt;

use heapless::String;

use crate::error::{ConfigError, ConfigErrorKind, Result};
use crate::hardware::I2cPins;
use crate::influx::{InfluxConfig, InfluxHost};
use crate::interval::SleepInterval;
use crate::key::ConfigKey;
use crate::net::{Ipv4Addr, NetworkMode, StaticIpConfig};
use crate::source::{ConfigSource, EnvText};
use crate::template::PLACEHOLDERS;

/// Maximum SSID length (802.11 limit)
pub const SSID_CAPACITY: usize = 32;
/// Maximum WPA2 passphrase length
pub const PASSWORD_CAPACITY: usize = 64;
/// Maximum length of `NODE_LOCATION`
pub const LOCATION_CAPACITY: usize = 32;
/// Maximum length of `NTP_SERVER`
pub const NTP_SERVER_CAPACITY: usize = 64;

/// Credentials for the access point.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WifiCredentials {
    /// Network name
    pub ssid: String<SSID_CAPACITY>,
    /// Passphrase; never log this
    #[cfg_attr(feature = "serde", serde(skip_serializing))]
    pub password: String<PASSWORD_CAPACITY>,
}

impl fmt::Debug for WifiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WifiCredentials")
            .field("ssid", &self.ssid)
            .field("password", &format_args!("{}", Redacted))
            .finish()
    }
}

/// Complete, validated configuration of one sensor node.
///
/// `Debug` and `Display` never print the WiFi password or the Influx token.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NodeConfig {
    /// `WIFI_SSID`, `WIFI_PASSWORD`
    pub wifi: WifiCredentials,
    /// `INFLUX_HOST`, `INFLUX_ORG`, `INFLUX_BUCKET`, `INFLUX_TOKEN`
    pub influx: InfluxConfig,
    /// `I2C_SDA`, `I2C_SCL`
    pub i2c: I2cPins,
    /// `TIME_TO_SLEEP`
    pub sleep: SleepInterval,
    /// `NODE_LOCATION`, a free text label such as "livingroom"
    pub location: String<LOCATION_CAPACITY>,
    /// `NTP_SERVER`
    pub ntp_server: String<NTP_SERVER_CAPACITY>,
    /// `USE_STATIC_IP` plus the four address tuples when it is set
    pub network: NetworkMode,
}

impl NodeConfig {
    /// Load and validate every key from `source`.
    pub fn load<S: ConfigSource + ?Sized>(source: &S) -> Result<Self> {
        let wifi = WifiCredentials {
            ssid: text(source, ConfigKey::WifiSsid)?,
            password: text(source, ConfigKey::WifiPassword)?,
        };

        let host = parse::<InfluxHost, _>(source, ConfigKey::InfluxHost)?;
        let influx = InfluxConfig {
            host,
            org: text(source, ConfigKey::InfluxOrg)?,
            bucket: text(source, ConfigKey::InfluxBucket)?,
            token: text(source, ConfigKey::InfluxToken)?,
        };

        let sda = pin(source, ConfigKey::I2cSda)?;
        let scl = pin(source, ConfigKey::I2cScl)?;
        let i2c = I2cPins::new(sda, scl).ok_or(ConfigError::conflict(ConfigKey::I2cScl))?;

        let sleep = parse::<SleepInterval, _>(source, ConfigKey::TimeToSleep)?;
        let location = text(source, ConfigKey::NodeLocation)?;

        let ntp_server: String<NTP_SERVER_CAPACITY> = text(source, ConfigKey::NtpServer)?;
        if !is_hostname(&ntp_server) {
            return Err(ConfigError::malformed(ConfigKey::NtpServer));
        }

        let network = if flag(source, ConfigKey::UseStaticIp)? {
            let config = StaticIpConfig {
                address: parse::<Ipv4Addr, _>(source, ConfigKey::WifiStaticIp)?,
                dns: parse(source, ConfigKey::WifiDns)?,
                gateway: parse(source, ConfigKey::WifiGateway)?,
                subnet: parse(source, ConfigKey::WifiSubnet)?,
            };
            if config.subnet.prefix_len().is_none() {
                return Err(ConfigError::malformed(ConfigKey::WifiSubnet));
            }
            NetworkMode::Static(config)
        } else {
            NetworkMode::Dhcp
        };

        let config = Self {
            wifi,
            influx,
            i2c,
            sleep,
            location,
            ntp_server,
            network,
        };
        node_log!(
            info,
            "Configuration loaded for node '{}' ({})",
            config.location.as_str(),
            config.network
        );
        Ok(config)
    }

    /// Load from secrets file text in `KEY=VALUE` form.
    ///
    /// Names that are not configuration keys are ignored with a warning.
    pub fn from_env_text(text: &str) -> Result<Self> {
        let source = EnvText::new(text);
        for name in source.unknown_names() {
            node_log!(warn, "Ignoring unknown configuration key {}", name);
        }
        Self::load(&source)
    }

    /// Load from process environment variables named `<prefix><KEY>`.
    #[cfg(feature = "std")]
    pub fn from_env(prefix: &str) -> Result<Self> {
        Self::load(&crate::source::EnvVars::capture(prefix))
    }

    /// Load from a secrets file on disk.
    #[cfg(feature = "std")]
    pub fn from_file(
        path: impl AsRef<std::path::Path>,
    ) -> core::result::Result<Self, crate::error::LoadError> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_env_text(&text)?)
    }
}

/// Redacted summary, safe for boot logs.
impl fmt::Display for NodeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "node:     {}", self.location)?;
        writeln!(f, "wifi:     ssid={} password={}", self.wifi.ssid, Redacted)?;
        writeln!(
            f,
            "influx:   {} org={} bucket={} token={}",
            self.influx.host,
            self.influx.org,
            self.influx.bucket,
            Redacted
        )?;
        writeln!(f, "i2c:      sda={} scl={}", self.i2c.sda, self.i2c.scl)?;
        writeln!(f, "sleep:    {}", self.sleep)?;
        writeln!(f, "ntp:      {}", self.ntp_server)?;
        write!(f, "network:  {}", self.network)
    }
}

/// Stands in for a secret. Loaded secrets are never empty, so nothing about
/// the value (not even its length) needs to be shown.
pub(crate) struct Redacted;

impl fmt::Display for Redacted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

// =============================================================================
// Field readers
// =============================================================================

/// The raw, trimmed value of a required key.
fn required<S: ConfigSource + ?Sized>(source: &S, key: ConfigKey) -> Result<&str> {
    let value = source.get(key).ok_or(ConfigError::missing(key))?.trim();
    if value.is_empty() {
        return Err(ConfigError::empty(key));
    }
    if has_placeholder(value) {
        return Err(ConfigError::placeholder(key));
    }
    Ok(value)
}

fn text<const N: usize, S: ConfigSource + ?Sized>(source: &S, key: ConfigKey) -> Result<String<N>> {
    let value = required(source, key)?;
    String::try_from(value).map_err(|_| ConfigError::too_long(key))
}

fn parse<T, S>(source: &S, key: ConfigKey) -> Result<T>
where
    T: core::str::FromStr<Err = ConfigErrorKind>,
    S: ConfigSource + ?Sized,
{
    required(source, key)?
        .parse()
        .map_err(|kind| ConfigError::new(key, kind))
}

fn pin<S: ConfigSource + ?Sized>(source: &S, key: ConfigKey) -> Result<u8> {
    let value = required(source, key)?;
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ConfigError::malformed(key));
    }
    value.parse().map_err(|_| ConfigError::malformed(key))
}

fn flag<S: ConfigSource + ?Sized>(source: &S, key: ConfigKey) -> Result<bool> {
    match required(source, key)? {
        "0" | "false" => Ok(false),
        "1" | "true" => Ok(true),
        _ => Err(ConfigError::malformed(key)),
    }
}

/// Whether `value` still contains one of the template's placeholders, such
/// as `<YOUR_WIFI_SSID>`. Other bracketed text is a legitimate value.
fn has_placeholder(value: &str) -> bool {
    PLACEHOLDERS.iter().any(|token| value.contains(token))
}

/// Hostname or dotted IPv4 address: dot-separated labels of ASCII
/// alphanumerics and hyphens, no label starting or ending with a hyphen.
fn is_hostname(value: &str) -> bool {
    value.len() <= 253
        && value.trim_end_matches('.').split('.').all(|label| {
            !label.is_empty()
                && label.len() <= 63
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
        })
}
