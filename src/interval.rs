//! Deep-sleep interval between measurements.

use core::fmt;
use core::num::NonZeroU32;
use core::time::Duration;

use crate::error::ConfigErrorKind;

/// Time the node sleeps between two measurement cycles. Always positive.
///
/// `TIME_TO_SLEEP` may be written as a plain number of seconds or as a
/// product, the way the template does it:
///
/// ```
/// use climate_node::interval::SleepInterval;
///
/// let interval: SleepInterval = "(30 * 60)".parse().unwrap();
/// assert_eq!(interval.as_secs(), 1800);
/// assert_eq!(interval, "1800".parse().unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SleepInterval(NonZeroU32);

impl SleepInterval {
    /// Half an hour, the template default.
    pub const DEFAULT: Self = match NonZeroU32::new(30 * 60) {
        Some(secs) => Self(secs),
        None => unreachable!(),
    };

    /// Create from seconds. Returns `None` for zero.
    pub const fn from_secs(secs: u32) -> Option<Self> {
        match NonZeroU32::new(secs) {
            Some(secs) => Some(Self(secs)),
            None => None,
        }
    }

    /// Seconds
    pub const fn as_secs(&self) -> u32 {
        self.0.get()
    }

    /// Microseconds, the unit deep-sleep timers take.
    pub const fn as_micros(&self) -> u64 {
        self.0.get() as u64 * 1_000_000
    }

    /// As a [`Duration`].
    pub const fn as_duration(&self) -> Duration {
        Duration::from_secs(self.0.get() as u64)
    }
}

impl Default for SleepInterval {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<SleepInterval> for Duration {
    fn from(interval: SleepInterval) -> Self {
        interval.as_duration()
    }
}

impl core::str::FromStr for SleepInterval {
    type Err = ConfigErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut expr = s.trim();
        if let Some(inner) = expr.strip_prefix('(') {
            expr = inner.strip_suffix(')').ok_or(ConfigErrorKind::Malformed)?;
        }

        let mut negative = false;
        let mut zero = false;
        // `None` once the magnitude no longer fits in u32
        let mut product: Option<u32> = Some(1);
        for factor in expr.split('*') {
            let factor = factor.trim();
            let digits = match factor.strip_prefix('-') {
                Some(rest) => {
                    negative = !negative;
                    rest
                }
                None => factor,
            };
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ConfigErrorKind::Malformed);
            }
            let value = digits.parse::<u32>().ok();
            zero |= value == Some(0);
            product = product.zip(value).and_then(|(p, v)| p.checked_mul(v));
        }

        // Sign and zero are known even when the magnitude overflows.
        if negative || zero {
            return Err(ConfigErrorKind::NotPositive);
        }
        let secs = product.ok_or(ConfigErrorKind::Malformed)?;
        Self::from_secs(secs).ok_or(ConfigErrorKind::NotPositive)
    }
}

impl fmt::Display for SleepInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.as_secs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_seconds() {
        let interval: SleepInterval = "600".parse().unwrap();
        assert_eq!(interval.as_secs(), 600);
        assert_eq!(interval.as_duration(), Duration::from_secs(600));
        assert_eq!(interval.as_micros(), 600_000_000);
    }

    #[test]
    fn test_product_forms() {
        assert_eq!("30 * 60".parse::<SleepInterval>().unwrap().as_secs(), 1800);
        assert_eq!("(30 * 60)".parse::<SleepInterval>().unwrap().as_secs(), 1800);
        assert_eq!("2*60*60".parse::<SleepInterval>().unwrap().as_secs(), 7200);
        assert_eq!("-5 * -2".parse::<SleepInterval>().unwrap().as_secs(), 10);
    }

    #[test]
    fn test_default_matches_template() {
        assert_eq!(SleepInterval::default(), "(30 * 60)".parse().unwrap());
        assert_eq!(SleepInterval::DEFAULT.to_string(), "1800s");
    }

    #[test]
    fn test_not_positive() {
        for value in [
            "0",
            "-1",
            "-30 * 60",
            "0 * 60",
            "(0)",
            "-0",
            "-4294967296",
            "-65536 * 65536",
            "0 * 4294967296",
        ] {
            assert_eq!(
                value.parse::<SleepInterval>(),
                Err(ConfigErrorKind::NotPositive),
                "{value}"
            );
        }
    }

    #[test]
    fn test_malformed() {
        for value in ["", "abc", "30 *", "* 60", "30 + 60", "(30 * 60", "1.5", "4294967296", "65536 * 65536"] {
            assert_eq!(
                value.parse::<SleepInterval>(),
                Err(ConfigErrorKind::Malformed),
                "{value}"
            );
        }
    }
}
