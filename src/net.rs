//! Network addressing for the node's WiFi interface.
//!
//! This module provides the IPv4 octet-tuple type used by the static-IP
//! keys and the [`NetworkMode`] selected by `USE_STATIC_IP`.

use core::fmt;

use crate::error::ConfigErrorKind;

/// IPv4 address representation.
///
/// A lightweight wrapper around a 4-byte array. Parses both the template's
/// comma notation (`192,168,0,100`) and dotted notation (`192.168.0.100`).
///
/// # Examples
///
/// ```
/// use climate_node::net::Ipv4Addr;
///
/// let addr: Ipv4Addr = "192, 168, 0, 100".parse().unwrap();
/// assert_eq!(addr, Ipv4Addr::new(192, 168, 0, 100));
/// assert_eq!(addr.to_string(), "192.168.0.100");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ipv4Addr {
    octets: [u8; 4],
}

impl Ipv4Addr {
    /// Create a new IPv4 address from individual octets.
    #[inline]
    pub const fn new(a: u8, b: u8, c: u8, d: u8) -> Self {
        Self {
            octets: [a, b, c, d],
        }
    }

    /// Returns the four octets that make up this address.
    #[inline]
    pub const fn octets(&self) -> [u8; 4] {
        self.octets
    }

    /// The unspecified address (0.0.0.0).
    pub const UNSPECIFIED: Self = Self::new(0, 0, 0, 0);

    /// Prefix length of this address read as a netmask.
    ///
    /// Returns `None` if the set bits are not contiguous from the top.
    ///
    /// ```
    /// use climate_node::net::Ipv4Addr;
    ///
    /// assert_eq!(Ipv4Addr::new(255, 255, 255, 0).prefix_len(), Some(24));
    /// assert_eq!(Ipv4Addr::new(255, 0, 255, 0).prefix_len(), None);
    /// ```
    pub fn prefix_len(&self) -> Option<u8> {
        let bits = u32::from(*self);
        let ones = bits.leading_ones();
        let rest = bits.checked_shl(ones).unwrap_or(0);
        if rest == 0 {
            u8::try_from(ones).ok()
        } else {
            None
        }
    }
}

impl From<[u8; 4]> for Ipv4Addr {
    #[inline]
    fn from(octets: [u8; 4]) -> Self {
        Self { octets }
    }
}

impl From<(u8, u8, u8, u8)> for Ipv4Addr {
    #[inline]
    fn from((a, b, c, d): (u8, u8, u8, u8)) -> Self {
        Self::new(a, b, c, d)
    }
}

impl From<Ipv4Addr> for [u8; 4] {
    #[inline]
    fn from(addr: Ipv4Addr) -> [u8; 4] {
        addr.octets
    }
}

impl From<Ipv4Addr> for u32 {
    #[inline]
    fn from(addr: Ipv4Addr) -> u32 {
        u32::from_be_bytes(addr.octets)
    }
}

impl From<core::net::Ipv4Addr> for Ipv4Addr {
    #[inline]
    fn from(addr: core::net::Ipv4Addr) -> Self {
        Self {
            octets: addr.octets(),
        }
    }
}

impl From<Ipv4Addr> for core::net::Ipv4Addr {
    #[inline]
    fn from(addr: Ipv4Addr) -> Self {
        core::net::Ipv4Addr::from(addr.octets)
    }
}

impl fmt::Display for Ipv4Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.octets[0], self.octets[1], self.octets[2], self.octets[3]
        )
    }
}

impl core::str::FromStr for Ipv4Addr {
    type Err = ConfigErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let separator = if s.contains(',') { ',' } else { '.' };
        let mut parts = s.split(separator);
        let mut octets = [0u8; 4];

        for octet in &mut octets {
            let part = parts.next().ok_or(ConfigErrorKind::Malformed)?;
            *octet = parse_octet(part.trim())?;
        }

        // Ensure no extra parts
        if parts.next().is_some() {
            return Err(ConfigErrorKind::Malformed);
        }

        Ok(Self { octets })
    }
}

/// Parse one decimal octet. Anything numeric but outside 0-255 (including
/// negative numbers) is out of range rather than malformed.
fn parse_octet(part: &str) -> Result<u8, ConfigErrorKind> {
    let (negative, digits) = match part.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, part),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ConfigErrorKind::Malformed);
    }
    if negative {
        return Err(ConfigErrorKind::OctetOutOfRange);
    }
    // Leading zeros are fine; overlong digit strings are out of range.
    let value = digits.trim_start_matches('0');
    if value.len() > 3 {
        return Err(ConfigErrorKind::OctetOutOfRange);
    }
    let value: u16 = if value.is_empty() {
        0
    } else {
        value.parse().map_err(|_| ConfigErrorKind::Malformed)?
    };
    u8::try_from(value).map_err(|_| ConfigErrorKind::OctetOutOfRange)
}

/// Manually assigned address configuration for the WiFi interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StaticIpConfig {
    /// Address assigned to the node
    pub address: Ipv4Addr,
    /// DNS server
    pub dns: Ipv4Addr,
    /// Default gateway
    pub gateway: Ipv4Addr,
    /// Netmask, guaranteed contiguous
    pub subnet: Ipv4Addr,
}

impl StaticIpConfig {
    /// Prefix length derived from the subnet mask (`255.255.255.0` is 24).
    pub fn prefix_len(&self) -> u8 {
        // The loader rejects non-contiguous masks.
        self.subnet.prefix_len().unwrap_or(32)
    }
}

/// How the node obtains its address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum NetworkMode {
    /// Address assigned by the network (`USE_STATIC_IP=0`)
    Dhcp,
    /// Address from the four static-IP keys (`USE_STATIC_IP=1`)
    Static(StaticIpConfig),
}

impl NetworkMode {
    /// The static configuration, if any.
    pub fn static_config(&self) -> Option<&StaticIpConfig> {
        match self {
            NetworkMode::Dhcp => None,
            NetworkMode::Static(config) => Some(config),
        }
    }

    /// Build the network stack configuration for this mode.
    #[cfg(feature = "embassy-net")]
    pub fn to_embassy_config(&self) -> embassy_net::Config {
        match self {
            NetworkMode::Dhcp => embassy_net::Config::dhcpv4(Default::default()),
            NetworkMode::Static(config) => {
                let dns: embassy_net::Ipv4Address = config.dns.into();
                embassy_net::Config::ipv4_static(embassy_net::StaticConfigV4 {
                    address: embassy_net::Ipv4Cidr::new(
                        config.address.into(),
                        config.prefix_len(),
                    ),
                    gateway: Some(config.gateway.into()),
                    dns_servers: core::iter::once(dns).collect(),
                })
            }
        }
    }
}

impl fmt::Display for NetworkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkMode::Dhcp => f.write_str("dhcp"),
            NetworkMode::Static(config) => write!(
                f,
                "static {}/{} gw {} dns {}",
                config.address,
                config.prefix_len(),
                config.gateway,
                config.dns
            ),
        }
    }
}
