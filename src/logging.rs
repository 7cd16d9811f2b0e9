//! Unified logging macro for the node.
//!
//! `node_log!` selects between the `log` facade (default, works on hosts and
//! with any `log` implementation such as a serial or USB logger) and
//! `defmt` (feature `defmt`, for RTT over a debug adapter).
//!
//! # Usage
//!
//! ```rust
//! use climate_node::node_log;
//!
//! node_log!(info, "Configuration loaded");
//! node_log!(debug, "Sleeping for {} s", 1800);
//! node_log!(warn, "Ignoring unknown configuration key {}", "WIFI_PSK");
//! ```
//!
//! Format strings must stay within the subset both backends accept:
//! plain `{}` placeholders.

/// Unified logging macro - selects `log::` or `defmt::` based on features.
#[macro_export]
#[cfg(not(feature = "defmt"))]
macro_rules! node_log {
    (info, $($arg:tt)*) => { $crate::__log::info!($($arg)*) };
    (debug, $($arg:tt)*) => { $crate::__log::debug!($($arg)*) };
    (warn, $($arg:tt)*) => { $crate::__log::warn!($($arg)*) };
    (error, $($arg:tt)*) => { $crate::__log::error!($($arg)*) };
    (trace, $($arg:tt)*) => { $crate::__log::trace!($($arg)*) };
}

#[macro_export]
#[cfg(feature = "defmt")]
macro_rules! node_log {
    (info, $($arg:tt)*) => { ::defmt::info!($($arg)*) };
    (debug, $($arg:tt)*) => { ::defmt::debug!($($arg)*) };
    (warn, $($arg:tt)*) => { ::defmt::warn!($($arg)*) };
    (error, $($arg:tt)*) => { ::defmt::error!($($arg)*) };
    (trace, $($arg:tt)*) => { ::defmt::trace!($($arg)*) };
}
