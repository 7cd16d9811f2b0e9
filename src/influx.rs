//! InfluxDB connection settings.
//!
//! Only the connection parameters live here; talking to the server is the
//! firmware's job.

use core::fmt;

use heapless::String;

use crate::config::Redacted;
use crate::error::ConfigErrorKind;

/// Maximum length of `INFLUX_HOST`
pub const HOST_CAPACITY: usize = 128;
/// Maximum length of `INFLUX_ORG`
pub const ORG_CAPACITY: usize = 64;
/// Maximum length of `INFLUX_BUCKET`
pub const BUCKET_CAPACITY: usize = 64;
/// Maximum length of `INFLUX_TOKEN`
pub const TOKEN_CAPACITY: usize = 128;

/// Port assumed when `INFLUX_HOST` does not name one.
pub const DEFAULT_PORT: u16 = 8086;

/// URL scheme of the InfluxDB endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    /// The scheme as it appears before `://`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

/// Parsed `INFLUX_HOST` value: `scheme://host[:port]`.
///
/// The URL text is kept so the firmware can hand it to an HTTP client
/// unchanged.
///
/// # Examples
///
/// ```
/// use climate_node::influx::{InfluxHost, Scheme};
///
/// let host: InfluxHost = "http://10.0.0.5:8086".parse().unwrap();
/// assert_eq!(host.scheme(), Scheme::Http);
/// assert_eq!(host.host(), "10.0.0.5");
/// assert_eq!(host.port(), 8086);
/// assert_eq!(host.as_str(), "http://10.0.0.5:8086");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InfluxHost {
    url: String<HOST_CAPACITY>,
    scheme: Scheme,
    host_start: usize,
    host_end: usize,
    port: u16,
}

impl InfluxHost {
    /// The URL as configured (without a trailing slash).
    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// URL scheme
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Host name or address, without brackets for IPv6 literals.
    pub fn host(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }

    /// TCP port, [`DEFAULT_PORT`] if the URL omits it.
    pub fn port(&self) -> u16 {
        self.port
    }
}

impl core::str::FromStr for InfluxHost {
    type Err = ConfigErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().trim_end_matches('/');
        let url: String<HOST_CAPACITY> =
            String::try_from(s).map_err(|_| ConfigErrorKind::TooLong)?;

        let (scheme, rest) = s.split_once("://").ok_or(ConfigErrorKind::Malformed)?;
        let scheme = match scheme {
            "http" => Scheme::Http,
            "https" => Scheme::Https,
            _ => return Err(ConfigErrorKind::Malformed),
        };
        let authority_start = s.len() - rest.len();

        // No paths, queries or credentials; the firmware appends the API path.
        if rest.is_empty() || rest.contains(['/', '?', '#', '@']) {
            return Err(ConfigErrorKind::Malformed);
        }
        if rest.bytes().any(|b| b.is_ascii_whitespace()) {
            return Err(ConfigErrorKind::Malformed);
        }

        let (host_start, host_end, port) = if let Some(bracketed) = rest.strip_prefix('[') {
            // IPv6 literal: [addr] or [addr]:port
            let close = bracketed.find(']').ok_or(ConfigErrorKind::Malformed)?;
            let after = &bracketed[close + 1..];
            let port = match after {
                "" => None,
                _ => Some(after.strip_prefix(':').ok_or(ConfigErrorKind::Malformed)?),
            };
            (authority_start + 1, authority_start + 1 + close, port)
        } else {
            match rest.rsplit_once(':') {
                Some((host, port)) => (authority_start, authority_start + host.len(), Some(port)),
                None => (authority_start, s.len(), None),
            }
        };

        let host = &s[host_start..host_end];
        if host.is_empty() || (!s[authority_start..].starts_with('[') && host.contains(':')) {
            return Err(ConfigErrorKind::Malformed);
        }

        let port = match port {
            None => DEFAULT_PORT,
            Some(port) => parse_port(port)?,
        };

        Ok(Self {
            url,
            scheme,
            host_start,
            host_end,
            port,
        })
    }
}

fn parse_port(port: &str) -> Result<u16, ConfigErrorKind> {
    if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ConfigErrorKind::Malformed);
    }
    match port.parse::<u16>() {
        Ok(0) | Err(_) => Err(ConfigErrorKind::Malformed),
        Ok(port) => Ok(port),
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for InfluxHost {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for InfluxHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Everything the node needs to write points to InfluxDB.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InfluxConfig {
    /// Server URL
    pub host: InfluxHost,
    /// Organization name
    pub org: String<ORG_CAPACITY>,
    /// Destination bucket
    pub bucket: String<BUCKET_CAPACITY>,
    /// API token; never log this
    #[cfg_attr(feature = "serde", serde(skip_serializing))]
    pub token: String<TOKEN_CAPACITY>,
}

impl fmt::Debug for InfluxConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfluxConfig")
            .field("host", &self.host)
            .field("org", &self.org)
            .field("bucket", &self.bucket)
            .field("token", &format_args!("{}", Redacted))
            .finish()
    }
}
