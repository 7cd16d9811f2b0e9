//! Where configuration values come from.
//!
//! The loader only needs "give me the raw text for this key", so every
//! origin (a secrets file baked into flash, process environment on a host,
//! values captured at build time) implements [`ConfigSource`].
//!
//! # Secrets file format
//!
//! ```text
//! # comment
//! WIFI_SSID=my network
//! WIFI_PASSWORD="quoted # keeps the hash"
//! export NTP_SERVER=pool.ntp.org   # trailing comment
//! ```

use crate::key::ConfigKey;

/// A provider of raw configuration values.
pub trait ConfigSource {
    /// Raw value for `key`, or `None` if the source does not define it.
    fn get(&self, key: ConfigKey) -> Option<&str>;
}

impl<S: ConfigSource + ?Sized> ConfigSource for &S {
    fn get(&self, key: ConfigKey) -> Option<&str> {
        S::get(*self, key)
    }
}

/// Key/value pairs held in a slice, handy for tests and for firmware that
/// assembles values itself.
impl ConfigSource for [(ConfigKey, &str)] {
    fn get(&self, key: ConfigKey) -> Option<&str> {
        self.iter()
            .rev()
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, value)| *value)
    }
}

impl<const N: usize> ConfigSource for [(ConfigKey, &str); N] {
    fn get(&self, key: ConfigKey) -> Option<&str> {
        ConfigSource::get(self.as_slice(), key)
    }
}

// =============================================================================
// KEY=VALUE text
// =============================================================================

/// A secrets file in `KEY=VALUE` form, borrowed as text.
///
/// Lines are scanned on every lookup; the text is small and read once at
/// boot. When a key appears twice the later line wins.
///
/// # Examples
///
/// ```
/// use climate_node::key::ConfigKey;
/// use climate_node::source::{ConfigSource, EnvText};
///
/// let text = EnvText::new("WIFI_SSID = \"office\"\nWIFI_SSID=lab\n");
/// assert_eq!(text.get(ConfigKey::WifiSsid), Some("lab"));
/// assert_eq!(text.get(ConfigKey::WifiPassword), None);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct EnvText<'a> {
    text: &'a str,
}

impl<'a> EnvText<'a> {
    /// Wrap secrets file text.
    pub const fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Every `(name, value)` pair in file order, including unknown names.
    pub fn entries(&self) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.lines().map(|line| (line.name, line.value))
    }

    fn lines(&self) -> impl Iterator<Item = Line<'a>> {
        self.text.lines().filter_map(parse_line)
    }

    /// Names present in the text that are not configuration keys.
    pub fn unknown_names(&self) -> impl Iterator<Item = &'a str> {
        self.entries()
            .map(|(name, _)| name)
            .filter(|name| ConfigKey::from_name(name).is_none())
    }
}

impl ConfigSource for EnvText<'_> {
    fn get(&self, key: ConfigKey) -> Option<&str> {
        let line = self.lines().filter(|line| line.name == key.name()).last()?;
        if line.comment_stripped && key.is_secret() {
            node_log!(
                warn,
                "{}: text after ' #' was read as a comment, quote the value to keep it",
                key.name()
            );
        }
        Some(line.value)
    }
}

/// One `KEY=VALUE` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Line<'a> {
    name: &'a str,
    value: &'a str,
    /// An unquoted value lost a trailing ` # ...`
    comment_stripped: bool,
}

/// Split one line into name and value. Returns `None` for blank lines,
/// comments, and lines without `=`.
fn parse_line(line: &str) -> Option<Line<'_>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let line = line.strip_prefix("export ").map_or(line, str::trim_start);
    let (name, value) = line.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    let (value, comment_stripped) = unquote(value.trim());
    Some(Line {
        name,
        value,
        comment_stripped,
    })
}

/// Strip matching quotes, or a trailing ` # comment` from an unquoted value.
/// The flag tells whether a comment was cut from an unquoted value.
fn unquote(value: &str) -> (&str, bool) {
    for quote in ['"', '\''] {
        if let Some(inner) = value.strip_prefix(quote) {
            if let Some(end) = inner.find(quote) {
                return (&inner[..end], false);
            }
        }
    }
    match value.find(" #").or_else(|| value.find("\t#")) {
        Some(comment) => (value[..comment].trim_end(), true),
        None => (value, false),
    }
}

// =============================================================================
// Build-time environment
// =============================================================================

/// Values captured from the build environment with `option_env!`.
///
/// Each key is read from `CLIMATE_<KEY>` when the crate is compiled, e.g.
///
/// ```bash
/// CLIMATE_WIFI_SSID=office CLIMATE_WIFI_PASSWORD=secret cargo build --release
/// ```
///
/// This keeps credentials out of the source tree on targets without a
/// filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildEnv;

impl BuildEnv {
    /// Prefix prepended to key names in the build environment.
    pub const PREFIX: &'static str = "CLIMATE_";
}

impl ConfigSource for BuildEnv {
    fn get(&self, key: ConfigKey) -> Option<&str> {
        match key {
            ConfigKey::WifiSsid => option_env!("CLIMATE_WIFI_SSID"),
            ConfigKey::WifiPassword => option_env!("CLIMATE_WIFI_PASSWORD"),
            ConfigKey::InfluxHost => option_env!("CLIMATE_INFLUX_HOST"),
            ConfigKey::InfluxOrg => option_env!("CLIMATE_INFLUX_ORG"),
            ConfigKey::InfluxBucket => option_env!("CLIMATE_INFLUX_BUCKET"),
            ConfigKey::InfluxToken => option_env!("CLIMATE_INFLUX_TOKEN"),
            ConfigKey::I2cSda => option_env!("CLIMATE_I2C_SDA"),
            ConfigKey::I2cScl => option_env!("CLIMATE_I2C_SCL"),
            ConfigKey::TimeToSleep => option_env!("CLIMATE_TIME_TO_SLEEP"),
            ConfigKey::NodeLocation => option_env!("CLIMATE_NODE_LOCATION"),
            ConfigKey::NtpServer => option_env!("CLIMATE_NTP_SERVER"),
            ConfigKey::UseStaticIp => option_env!("CLIMATE_USE_STATIC_IP"),
            ConfigKey::WifiStaticIp => option_env!("CLIMATE_WIFI_STATIC_IP"),
            ConfigKey::WifiDns => option_env!("CLIMATE_WIFI_DNS"),
            ConfigKey::WifiGateway => option_env!("CLIMATE_WIFI_GATEWAY"),
            ConfigKey::WifiSubnet => option_env!("CLIMATE_WIFI_SUBNET"),
        }
    }
}

// =============================================================================
// Process environment (std)
// =============================================================================

/// A snapshot of process environment variables.
///
/// Values are captured once by [`EnvVars::capture`]; later changes to the
/// environment are not seen.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Default)]
pub struct EnvVars {
    values: std::vec::Vec<(ConfigKey, std::string::String)>,
}

#[cfg(feature = "std")]
impl EnvVars {
    /// Read `<prefix><KEY>` for every key. Variables that are unset or not
    /// valid Unicode are treated as missing.
    pub fn capture(prefix: &str) -> Self {
        let values = ConfigKey::ALL
            .into_iter()
            .filter_map(|key| {
                let name = std::format!("{prefix}{}", key.name());
                std::env::var(name).ok().map(|value| (key, value))
            })
            .collect();
        Self { values }
    }
}

#[cfg(feature = "std")]
impl ConfigSource for EnvVars {
    fn get(&self, key: ConfigKey) -> Option<&str> {
        self.values
            .iter()
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, value)| value.as_str())
    }
}
