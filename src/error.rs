//! Error types for configuration loading.
//!
//! Every failure names the [`ConfigKey`] that caused it, so a node that
//! refuses to boot can tell the operator exactly which line of the secrets
//! file to fix.

use core::fmt;

use crate::key::ConfigKey;

/// Result type alias for configuration operations.
pub type Result<T> = core::result::Result<T, ConfigError>;

// =============================================================================
// Error Kind
// =============================================================================

/// What went wrong with a configuration value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigErrorKind {
    /// The key is not present in the source
    Missing,
    /// The key is present but its value is empty
    Empty,
    /// The value still carries a `<...>` template placeholder
    Placeholder,
    /// The value does not fit the fixed-capacity field
    TooLong,
    /// The value cannot be parsed as the expected type
    Malformed,
    /// An address component is above 255
    OctetOutOfRange,
    /// A duration is zero or negative
    NotPositive,
    /// The value contradicts another key (e.g. SDA and SCL on the same pin)
    Conflict,
}

impl ConfigErrorKind {
    /// Short human-readable reason.
    pub const fn reason(self) -> &'static str {
        match self {
            Self::Missing => "missing required key",
            Self::Empty => "value is empty",
            Self::Placeholder => "template placeholder was not replaced",
            Self::TooLong => "value is too long",
            Self::Malformed => "malformed value",
            Self::OctetOutOfRange => "octet out of range (0-255)",
            Self::NotPositive => "value must be positive",
            Self::Conflict => "value conflicts with another key",
        }
    }
}

// =============================================================================
// Main Error Type
// =============================================================================

/// Configuration error: the offending key plus what was wrong with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigError {
    key: ConfigKey,
    kind: ConfigErrorKind,
}

impl ConfigError {
    /// Create an error for `key`.
    pub const fn new(key: ConfigKey, kind: ConfigErrorKind) -> Self {
        Self { key, kind }
    }

    /// The key that failed validation
    pub const fn key(&self) -> ConfigKey {
        self.key
    }

    /// The failure category
    pub const fn kind(&self) -> ConfigErrorKind {
        self.kind
    }

    /// Check if the key was absent from the source
    pub fn is_missing(&self) -> bool {
        matches!(self.kind, ConfigErrorKind::Missing)
    }

    /// Check if an address octet was out of range
    pub fn is_out_of_range(&self) -> bool {
        matches!(self.kind, ConfigErrorKind::OctetOutOfRange)
    }

    /// Check if a template placeholder was left in place
    pub fn is_placeholder(&self) -> bool {
        matches!(self.kind, ConfigErrorKind::Placeholder)
    }

    // Convenience constructors

    #[inline]
    pub(crate) const fn missing(key: ConfigKey) -> Self {
        Self::new(key, ConfigErrorKind::Missing)
    }

    #[inline]
    pub(crate) const fn empty(key: ConfigKey) -> Self {
        Self::new(key, ConfigErrorKind::Empty)
    }

    #[inline]
    pub(crate) const fn placeholder(key: ConfigKey) -> Self {
        Self::new(key, ConfigErrorKind::Placeholder)
    }

    #[inline]
    pub(crate) const fn too_long(key: ConfigKey) -> Self {
        Self::new(key, ConfigErrorKind::TooLong)
    }

    #[inline]
    pub(crate) const fn malformed(key: ConfigKey) -> Self {
        Self::new(key, ConfigErrorKind::Malformed)
    }

    #[inline]
    pub(crate) const fn conflict(key: ConfigKey) -> Self {
        Self::new(key, ConfigErrorKind::Conflict)
    }
}

// =============================================================================
// Display Implementation
// =============================================================================

impl fmt::Display for ConfigErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.kind)
    }
}

impl core::error::Error for ConfigError {}

// =============================================================================
// File Loading (std)
// =============================================================================

/// Failure to load a secrets file from disk.
#[cfg(feature = "std")]
#[derive(Debug)]
pub enum LoadError {
    /// The file could not be read
    Io(std::io::Error),
    /// The file was read but a value is invalid
    Config(ConfigError),
}

#[cfg(feature = "std")]
impl LoadError {
    /// The configuration error, if the file was readable.
    pub fn config_error(&self) -> Option<&ConfigError> {
        match self {
            LoadError::Io(_) => None,
            LoadError::Config(e) => Some(e),
        }
    }
}

#[cfg(feature = "std")]
impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "cannot read secrets file: {e}"),
            LoadError::Config(e) => write!(f, "invalid configuration: {e}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Config(e) => Some(e),
        }
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::Io(e)
    }
}

#[cfg(feature = "std")]
impl From<ConfigError> for LoadError {
    fn from(e: ConfigError) -> Self {
        LoadError::Config(e)
    }
}
