use miette::Result;
use schematic::{Config, ConfigLoader};
use std::net::SocketAddr;
use tokio::net::lookup_host;

use crate::errors::ConfigError;

#[derive(Config, Clone, Debug)]
pub struct AppConfig {
    #[setting(default = "0.0.0.0", env = "HOST")]
    pub host: String,

    #[setting(default = 3000, env = "PORT")]
    pub port: u16,

    /// Shared secret clients present as `Authorization: Bearer <token>`.
    #[setting(env = "BEARER_TOKEN")]
    pub bearer_token: String,

    #[setting(default = "https://chat.akash.network/api", env = "UPSTREAM_BASE_URL")]
    pub upstream_base_url: String,

    #[setting(default = "info", env = "LOG_LEVEL")]
    pub log_level: String,
}

impl AppConfig {
    /// Resolves `host:port`; hostnames go through the system resolver and
    /// the first address returned is used.
    pub async fn listen_addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port);

        match lookup_host(addr.clone()).await {
            Ok(mut resolved) => resolved
                .next()
                .ok_or_else(|| ConfigError::InvalidListenAddress(addr).into()),
            Err(_) => Err(ConfigError::InvalidListenAddress(addr).into()),
        }
    }

    fn ensure_bearer_token(self) -> Result<Self> {
        if self.bearer_token.is_empty() {
            return Err(ConfigError::MissingBearerToken.into());
        }

        Ok(self)
    }
}

pub fn load_config() -> Result<AppConfig> {
    let result = ConfigLoader::<AppConfig>::new().load()?;

    result.config.ensure_bearer_token()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::block_on;

    fn config(host: &str, port: u16, bearer_token: &str) -> AppConfig {
        AppConfig {
            host: host.into(),
            port,
            bearer_token: bearer_token.into(),
            upstream_base_url: "http://upstream.test".into(),
            log_level: "info".into(),
        }
    }

    #[test]
    fn test_listen_addr() {
        let addr = block_on(config("127.0.0.1", 8080, "s3cr3t").listen_addr()).unwrap();

        assert_eq!(addr, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn test_listen_addr_resolves_hostnames() {
        let addr = block_on(config("localhost", 8080, "s3cr3t").listen_addr()).unwrap();

        assert!(addr.ip().is_loopback());
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_listen_addr_rejects_unresolvable_host() {
        let err = block_on(config("local\0host", 8080, "s3cr3t").listen_addr()).unwrap_err();

        assert_eq!(err.to_string(), "invalid listen address `local\0host:8080`");
    }

    #[test]
    fn test_empty_bearer_token_is_rejected() {
        let err = config("0.0.0.0", 3000, "").ensure_bearer_token().unwrap_err();

        assert_eq!(err.to_string(), "no bearer token configured");
    }

    #[test]
    fn test_bearer_token_is_kept() {
        let config = config("0.0.0.0", 3000, "s3cr3t").ensure_bearer_token().unwrap();

        assert_eq!(config.bearer_token, "s3cr3t");
    }
}
