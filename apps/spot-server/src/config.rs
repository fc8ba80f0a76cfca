use std::path::Path;

use anyhow::Context;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use spot_discovery::SpotDiscoveryConfig;

/// Prefix of environment overrides, e.g. `SPOTS__SERVER__PORT=9000`.
pub const ENV_PREFIX: &str = "SPOTS__";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub spot_discovery: SpotDiscoveryConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub port: u16,
    pub request_timeout_secs: u64,
    /// Reload the catalog on this period. Never when unset.
    pub catalog_refresh_secs: Option<u64>,
    /// `["*"]` allows any origin.
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".to_owned(),
            port: 8087,
            request_timeout_secs: 30,
            catalog_refresh_secs: None,
            cors_allowed_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is not set.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Text,
        }
    }
}

impl AppConfig {
    /// Layered load: defaults, then the YAML file (if any), then `SPOTS__*`
    /// environment variables.
    ///
    /// # Errors
    /// Fails when the file cannot be parsed or a value has the wrong shape.
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file_exact(path));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("invalid configuration")
    }

    /// Apply command-line overrides on top of the layered configuration.
    pub fn apply_cli_overrides(&mut self, port: Option<u16>, verbose: u8) {
        if let Some(port) = port {
            self.server.port = port;
        }
        match verbose {
            0 => {}
            1 => "info".clone_into(&mut self.logging.level),
            2 => "debug".clone_into(&mut self.logging.level),
            _ => "trace".clone_into(&mut self.logging.level),
        }
    }

    /// # Errors
    /// Fails only if serialization fails.
    pub fn to_pretty_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn yaml_file(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_without_file() {
        let cfg = AppConfig::load_or_default(None).unwrap();
        assert_eq!(cfg.server.bind_addr, "127.0.0.1");
        assert_eq!(cfg.logging.format, LogFormat::Text);
        assert!(cfg.spot_discovery.catalog_path.is_none());
    }

    #[test]
    fn yaml_overrides_defaults() {
        let file = yaml_file(
            "server:\n  port: 9100\n  catalog_refresh_secs: 60\nlogging:\n  format: json\n\
             spot_discovery:\n  catalog_path: /srv/spots.json\n  home:\n    sample_size: 2\n",
        );

        let cfg = AppConfig::load_or_default(Some(file.path())).unwrap();

        assert_eq!(cfg.server.port, 9100);
        assert_eq!(cfg.server.bind_addr, "127.0.0.1");
        assert_eq!(cfg.server.catalog_refresh_secs, Some(60));
        assert_eq!(cfg.logging.format, LogFormat::Json);
        assert_eq!(cfg.spot_discovery.home.sample_size, 2);
        assert_eq!(cfg.spot_discovery.reviews.max_comment_length, 1000);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let file = yaml_file("server:\n  prot: 9100\n");
        assert!(AppConfig::load_or_default(Some(file.path())).is_err());
    }

    #[test]
    fn cli_overrides_port_and_level() {
        let mut cfg = AppConfig::default();
        cfg.apply_cli_overrides(Some(4000), 2);
        assert_eq!(cfg.server.port, 4000);
        assert_eq!(cfg.logging.level, "debug");

        cfg.apply_cli_overrides(None, 0);
        assert_eq!(cfg.server.port, 4000);
        assert_eq!(cfg.logging.level, "debug");
    }
}
