//! Integration tests for loading node configuration.
//!
//! These exercise the public API the firmware uses at boot: fill in the
//! checked-in template, load it, and check the typed result.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test config_loading
//! cargo test --test config_loading --features std   # file and env sources
//! ```

use climate_node::influx::Scheme;
use climate_node::template::SECRETS_TEMPLATE;
use climate_node::{
    ConfigErrorKind, ConfigKey, EnvText, I2cPins, Ipv4Addr, NetworkMode, NodeConfig,
    StaticIpConfig,
};

/// The template with every placeholder replaced by a real-looking value.
fn filled_template() -> String {
    SECRETS_TEMPLATE
        .replace("<YOUR_WIFI_SSID>", "greenhouse")
        .replace("<YOUR_WIFI_PASSWORD>", "correct horse battery")
        .replace("<INFLUX_SERVER_IP>", "10.0.0.5")
        .replace("<INFLUXDB_ORGANIZATION>", "home")
        .replace("<INFLUXDB_BUCKET>", "climate")
        .replace("<INFLUXDB_TOKEN>", "pFlhPKsrTfaJ6-iIKz46ww==")
        .replace("<NODE_LOCATION>", "livingroom")
}

fn set(text: &str, key: ConfigKey, value: &str) -> String {
    let prefix = format!("{}=", key.name());
    text.lines()
        .map(|line| {
            if line.starts_with(&prefix) {
                format!("{prefix}{value}")
            } else {
                line.to_owned()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn remove(text: &str, key: ConfigKey) -> String {
    let prefix = format!("{}=", key.name());
    text.lines()
        .filter(|line| !line.starts_with(&prefix))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_filled_template_loads() {
    let config = NodeConfig::from_env_text(&filled_template()).expect("filled template loads");

    assert_eq!(config.wifi.ssid, "greenhouse");
    assert_eq!(config.wifi.password, "correct horse battery");
    assert_eq!(config.influx.host.as_str(), "http://10.0.0.5:8086");
    assert_eq!(config.influx.host.scheme(), Scheme::Http);
    assert_eq!(config.influx.host.host(), "10.0.0.5");
    assert_eq!(config.influx.host.port(), 8086);
    assert_eq!(config.influx.org, "home");
    assert_eq!(config.influx.bucket, "climate");
    assert_eq!(config.influx.token, "pFlhPKsrTfaJ6-iIKz46ww==");
    assert_eq!(config.i2c, I2cPins { sda: 4, scl: 5 });
    assert_eq!(config.sleep.as_secs(), 30 * 60);
    assert_eq!(config.location, "livingroom");
    assert_eq!(config.ntp_server, "pool.ntp.org");
    assert_eq!(config.network, NetworkMode::Dhcp);
}

#[test]
fn test_filled_template_with_static_ip() {
    let text = set(&filled_template(), ConfigKey::UseStaticIp, "1");
    let config = NodeConfig::from_env_text(&text).unwrap();

    assert_eq!(
        config.network,
        NetworkMode::Static(StaticIpConfig {
            address: Ipv4Addr::new(192, 168, 0, 100),
            dns: Ipv4Addr::new(192, 168, 0, 1),
            gateway: Ipv4Addr::new(192, 168, 0, 1),
            subnet: Ipv4Addr::new(255, 255, 255, 0),
        })
    );
}

#[test]
fn test_every_required_key_is_reported_when_missing() {
    let text = filled_template();
    for key in ConfigKey::ALL {
        if key.is_static_ip() {
            continue;
        }
        let err = NodeConfig::from_env_text(&remove(&text, key)).unwrap_err();
        assert_eq!(err.key(), key);
        assert_eq!(err.kind(), ConfigErrorKind::Missing);
        assert!(err.to_string().starts_with(key.name()));
    }
}

#[test]
fn test_static_ip_requires_all_four_tuples() {
    let text = set(&filled_template(), ConfigKey::UseStaticIp, "1");
    for key in ConfigKey::STATIC_IP {
        let err = NodeConfig::from_env_text(&remove(&text, key)).unwrap_err();
        assert_eq!((err.key(), err.kind()), (key, ConfigErrorKind::Missing));
    }
}

#[test]
fn test_dhcp_does_not_need_tuples() {
    let mut text = filled_template();
    for key in ConfigKey::STATIC_IP {
        text = remove(&text, key);
    }
    let config = NodeConfig::from_env_text(&text).unwrap();
    assert_eq!(config.network, NetworkMode::Dhcp);
}

#[test]
fn test_octet_out_of_range_rejected() {
    let text = set(&filled_template(), ConfigKey::UseStaticIp, "1");
    let text = set(&text, ConfigKey::WifiDns, "192,168,0,300");
    let err = NodeConfig::from_env_text(&text).unwrap_err();
    assert_eq!(err.key(), ConfigKey::WifiDns);
    assert!(err.is_out_of_range());
}

#[test]
fn test_non_positive_sleep_rejected() {
    for value in ["0", "-60", "(0 * 60)"] {
        let text = set(&filled_template(), ConfigKey::TimeToSleep, value);
        let err = NodeConfig::from_env_text(&text).unwrap_err();
        assert_eq!((err.key(), err.kind()), (ConfigKey::TimeToSleep, ConfigErrorKind::NotPositive));
    }
}

#[test]
fn test_untouched_template_rejected() {
    let err = NodeConfig::from_env_text(SECRETS_TEMPLATE).unwrap_err();
    assert!(err.is_placeholder());
    assert_eq!(err.key(), ConfigKey::WifiSsid);
}

#[test]
fn test_load_through_source_trait() {
    let text = filled_template();
    let source = EnvText::new(&text);
    let config = NodeConfig::load(&source).unwrap();
    assert_eq!(config.location, "livingroom");
}

#[test]
fn test_summary_hides_secrets() {
    let config = NodeConfig::from_env_text(&filled_template()).unwrap();
    let summary = config.to_string();
    let debug = format!("{config:?}");
    for secret in ["correct horse battery", "pFlhPKsrTfaJ6"] {
        assert!(!summary.contains(secret));
        assert!(!debug.contains(secret));
    }
    assert!(summary.contains("greenhouse"));
}

#[cfg(feature = "std")]
mod std_sources {
    use super::*;
    use std::path::PathBuf;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("climate-node-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_from_file() {
        let path = temp_file("valid.env", &filled_template());
        let config = NodeConfig::from_file(&path).unwrap();
        assert_eq!(config.wifi.ssid, "greenhouse");
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_from_file_invalid_value() {
        let path = temp_file("invalid.env", SECRETS_TEMPLATE);
        let err = NodeConfig::from_file(&path).unwrap_err();
        let config_error = err.config_error().expect("config error");
        assert_eq!(config_error.key(), ConfigKey::WifiSsid);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_from_file_missing() {
        let err = NodeConfig::from_file("/nonexistent/climate-node/secrets.env").unwrap_err();
        assert!(err.config_error().is_none());
        assert!(err.to_string().starts_with("cannot read secrets file"));
    }

    #[test]
    fn test_from_env() {
        let prefix = format!("CLIMATE_NODE_TEST_{}_", std::process::id());
        let text = filled_template();
        let source = EnvText::new(&text);
        for (name, value) in source.entries() {
            std::env::set_var(format!("{prefix}{name}"), value);
        }

        let config = NodeConfig::from_env(&prefix).unwrap();
        assert_eq!(config, NodeConfig::from_env_text(&text).unwrap());

        std::env::remove_var(format!("{prefix}INFLUX_TOKEN"));
        let err = NodeConfig::from_env(&prefix).unwrap_err();
        assert_eq!((err.key(), err.kind()), (ConfigKey::InfluxToken, ConfigErrorKind::Missing));
    }
}
