#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
#![doc = include_str!("../README.md")]

//! # climate-node
//!
//! Deployment configuration for climate-monitoring sensor nodes.
//!
//! This crate provides a `no_std` replacement for the hand-edited secrets
//! header of the node firmware: a typed [`NodeConfig`] loaded from a
//! `KEY=VALUE` secrets file (or build/process environment) and validated
//! once at boot, plus a debug output shim that compiles to nothing in
//! production builds.
//!
//! ## Features
//!
//! - `std` - process environment and file sources, `check-config` binary
//! - `defmt` - log through `defmt` instead of `log`
//! - `serde` - `Serialize` for the configuration types (secrets skipped)
//! - `debug` - compile `debug_print!` / `debug_println!` / `debug_block!` in
//! - `embassy-net` - turn the network mode into an `embassy_net::Config`
//!
//! ## Example
//!
//! ```rust,ignore
//! use climate_node::NodeConfig;
//!
//! static SECRETS: &str = include_str!("../secrets.env");
//!
//! let config = NodeConfig::from_env_text(SECRETS)?;
//! # Ok::<(), climate_node::ConfigError>(())
//! ```

// Macro modules (must be declared before use)
#[macro_use]
pub mod logging;
#[macro_use]
pub mod debug;

pub mod config;
pub mod error;
pub mod hardware;
pub mod influx;
pub mod interval;
pub mod key;
pub mod net;
pub mod source;
pub mod template;

#[cfg(all(test, not(feature = "defmt")))]
mod test_log;

#[doc(hidden)]
pub use log as __log;

// Re-export commonly used types
#[doc(inline)]
pub use config::{NodeConfig, WifiCredentials};
#[doc(inline)]
pub use error::{ConfigError, ConfigErrorKind, Result};
#[cfg(feature = "std")]
#[doc(inline)]
pub use error::LoadError;
#[doc(inline)]
pub use hardware::I2cPins;
#[doc(inline)]
pub use influx::{InfluxConfig, InfluxHost};
#[doc(inline)]
pub use interval::SleepInterval;
#[doc(inline)]
pub use key::ConfigKey;
#[doc(inline)]
pub use net::{Ipv4Addr, NetworkMode, StaticIpConfig};
#[doc(inline)]
pub use source::{BuildEnv, ConfigSource, EnvText};
#[cfg(feature = "std")]
#[doc(inline)]
pub use source::EnvVars;
