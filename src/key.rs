//! The closed set of node configuration keys.
//!
//! Key names are the ones used in the secrets file and in environment
//! variables (`WIFI_SSID`, `INFLUX_HOST`, ...).

use core::fmt;

/// A configuration key.
///
/// Variants are declared in the order the loader validates them, which is
/// also the order they appear in the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigKey {
    WifiSsid,
    WifiPassword,
    InfluxHost,
    InfluxOrg,
    InfluxBucket,
    InfluxToken,
    I2cSda,
    I2cScl,
    TimeToSleep,
    NodeLocation,
    NtpServer,
    UseStaticIp,
    WifiStaticIp,
    WifiDns,
    WifiGateway,
    WifiSubnet,
}

impl ConfigKey {
    /// Every key, in validation order.
    pub const ALL: [ConfigKey; 16] = [
        Self::WifiSsid,
        Self::WifiPassword,
        Self::InfluxHost,
        Self::InfluxOrg,
        Self::InfluxBucket,
        Self::InfluxToken,
        Self::I2cSda,
        Self::I2cScl,
        Self::TimeToSleep,
        Self::NodeLocation,
        Self::NtpServer,
        Self::UseStaticIp,
        Self::WifiStaticIp,
        Self::WifiDns,
        Self::WifiGateway,
        Self::WifiSubnet,
    ];

    /// Keys only read when `USE_STATIC_IP` is set.
    pub const STATIC_IP: [ConfigKey; 4] = [
        Self::WifiStaticIp,
        Self::WifiDns,
        Self::WifiGateway,
        Self::WifiSubnet,
    ];

    /// The key's name as written in the secrets file.
    pub const fn name(self) -> &'static str {
        match self {
            Self::WifiSsid => "WIFI_SSID",
            Self::WifiPassword => "WIFI_PASSWORD",
            Self::InfluxHost => "INFLUX_HOST",
            Self::InfluxOrg => "INFLUX_ORG",
            Self::InfluxBucket => "INFLUX_BUCKET",
            Self::InfluxToken => "INFLUX_TOKEN",
            Self::I2cSda => "I2C_SDA",
            Self::I2cScl => "I2C_SCL",
            Self::TimeToSleep => "TIME_TO_SLEEP",
            Self::NodeLocation => "NODE_LOCATION",
            Self::NtpServer => "NTP_SERVER",
            Self::UseStaticIp => "USE_STATIC_IP",
            Self::WifiStaticIp => "WIFI_STATIC_IP",
            Self::WifiDns => "WIFI_DNS",
            Self::WifiGateway => "WIFI_GATEWAY",
            Self::WifiSubnet => "WIFI_SUBNET",
        }
    }

    /// Look a key up by its name. Matching is exact (case-sensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.name() == name)
    }

    /// Whether the value is a credential that must never be logged.
    pub const fn is_secret(self) -> bool {
        matches!(self, Self::WifiPassword | Self::InfluxToken)
    }

    /// Whether the key is one of the four static-IP tuples.
    pub const fn is_static_ip(self) -> bool {
        matches!(
            self,
            Self::WifiStaticIp | Self::WifiDns | Self::WifiGateway | Self::WifiSubnet
        )
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
