use log::LevelFilter;
use serde::Deserialize;
use std::{
    env,
    fs::read_to_string,
    net::{IpAddr, Ipv4Addr},
    path::{Path, PathBuf},
};

/// The server version extracted from the Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Type alias for ports used by the server
pub type Port = u16;

/// Environment variable key to load the config from
const CONFIG_ENV_KEY: &str = "ORC_CONFIG_JSON";

pub fn load_config() -> Option<Config> {
    // Attempt to load the config from the env
    if let Ok(env) = env::var(CONFIG_ENV_KEY) {
        let config: Config = match serde_json::from_str(&env) {
            Ok(value) => value,
            Err(err) => {
                eprintln!("Failed to load env config (Using default): {:?}", err);
                return None;
            }
        };
        return Some(config);
    }

    // Attempt to load the config from disk
    let file = Path::new("config.json");
    if !file.exists() {
        return None;
    }

    let data = match read_to_string(file) {
        Ok(value) => value,
        Err(err) => {
            eprintln!("Failed to load config file (Using defaults): {:?}", err);
            return None;
        }
    };

    let config: Config = match serde_json::from_str(&data) {
        Ok(value) => value,
        Err(err) => {
            eprintln!("Failed to load config file (Using default): {:?}", err);
            return None;
        }
    };

    Some(config)
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub host: IpAddr,
    pub port: Port,
    pub tls: TlsConfig,
    pub upstream: UpstreamConfig,
    pub logging: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            tls: TlsConfig::default(),
            upstream: UpstreamConfig::default(),
            logging: LevelFilter::Info,
        }
    }
}

/// Paths to the PEM encoded TLS identity served by the HTTPS
/// listener. The defaults match the letsencrypt layout used by
/// the production deployment.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TlsConfig {
    pub key: PathBuf,
    pub certificate: PathBuf,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            key: PathBuf::from("/etc/letsencrypt/live/offroading.teto.dev/privkey.pem"),
            certificate: PathBuf::from("/etc/letsencrypt/live/offroading.teto.dev/fullchain.pem"),
        }
    }
}

/// Configuration for the upstream service that supplies the
/// leaderboard feeds. The leaderboard stays empty when no base
/// URL is set.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub base_url: Option<String>,
}

#[cfg(test)]
mod test {
    use super::Config;
    use log::LevelFilter;
    use std::net::{IpAddr, Ipv4Addr};

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.host, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(config.port, 3000);
        assert_eq!(config.logging, LevelFilter::Info);
        assert!(config.upstream.base_url.is_none());
        assert!(config
            .tls
            .key
            .to_string_lossy()
            .ends_with("privkey.pem"));
        assert!(config
            .tls
            .certificate
            .to_string_lossy()
            .ends_with("fullchain.pem"));
    }

    #[test]
    fn test_partial_config() {
        // Fields left out of the config JSON keep their defaults
        let config: Config = serde_json::from_str(
            r#"{
                "port": 8443,
                "upstream": { "base_url": "https://api.offroading.teto.dev" },
                "logging": "DEBUG"
            }"#,
        )
        .expect("Failed to parse config");

        assert_eq!(config.port, 8443);
        assert_eq!(config.host, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(
            config.upstream.base_url.as_deref(),
            Some("https://api.offroading.teto.dev")
        );
        assert_eq!(config.logging, LevelFilter::Debug);
    }
}
