//! Process configuration
//!
//! Read once at startup from the environment (after `.env` is loaded).

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use drive::DriveConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8081";
const DEFAULT_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Settings {
    /// Postgres when set, in-memory store otherwise
    pub database_url: Option<String>,
    pub max_connections: u32,
    /// Decoded `JWT_SECRET`
    jwt_secret: Option<Vec<u8>>,
    pub frontend_origins: Vec<String>,
    pub bind_addr: SocketAddr,
    pub request_timeout: Duration,
    pub default_drive_url: String,
    pub bootstrap_admin_email: Option<String>,
    pub cookie_secure: Option<bool>,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let jwt_secret = get("JWT_SECRET")
            .map(|s| platform::crypto::from_base64(&s))
            .transpose()
            .context("JWT_SECRET must be base64")?;
        if jwt_secret.as_ref().is_some_and(|s| s.is_empty()) {
            bail!("JWT_SECRET decodes to an empty key");
        }

        let max_connections = get("DATABASE_MAX_CONNECTIONS")
            .map(|v| v.parse::<u32>())
            .transpose()
            .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("BIND_ADDR must be host:port")?;

        let timeout_secs = get("REQUEST_TIMEOUT_SECS")
            .map(|v| v.parse::<u64>())
            .transpose()
            .context("REQUEST_TIMEOUT_SECS must be an integer")?
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let cookie_secure = get("COOKIE_SECURE")
            .map(|v| v.parse::<bool>())
            .transpose()
            .context("COOKIE_SECURE must be true or false")?;

        let frontend_origins = get("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_ORIGINS.to_string())
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();

        Ok(Self {
            database_url: get("DATABASE_URL"),
            max_connections,
            jwt_secret,
            frontend_origins,
            bind_addr,
            request_timeout: Duration::from_secs(timeout_secs),
            default_drive_url: get("DEFAULT_DRIVE_URL")
                .unwrap_or_else(|| drive::application::config::DEFAULT_DRIVE_URL.to_string()),
            bootstrap_admin_email: get("BOOTSTRAP_ADMIN_EMAIL"),
            cookie_secure,
        })
    }

    /// Accounts configuration.
    ///
    /// A missing secret is fatal in release builds; debug builds fall back
    /// to a random per-process key.
    pub fn auth_config(&self) -> anyhow::Result<AuthConfig> {
        let mut config = match &self.jwt_secret {
            Some(secret) => AuthConfig::with_secret(secret.clone()),
            None if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using a random key; sessions end on restart");
                AuthConfig::development()
            }
            None => bail!("JWT_SECRET must be set in production"),
        };

        if let Some(secure) = self.cookie_secure {
            config.cookie_secure = secure;
        }
        Ok(config)
    }

    pub fn drive_config(&self) -> DriveConfig {
        DriveConfig::with_default_url(self.default_drive_url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> anyhow::Result<Settings> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let s = settings(&[]).unwrap();
        assert!(s.database_url.is_none());
        assert_eq!(s.max_connections, 5);
        assert_eq!(s.bind_addr, "0.0.0.0:8081".parse::<SocketAddr>().unwrap());
        assert_eq!(s.request_timeout, Duration::from_secs(10));
        assert_eq!(
            s.default_drive_url,
            "https://drive.google.com/drive/folders/default"
        );
        assert_eq!(s.frontend_origins.len(), 2);
        assert!(s.bootstrap_admin_email.is_none());
    }

    #[test]
    fn test_blank_values_are_unset() {
        let s = settings(&[("DATABASE_URL", "  "), ("BOOTSTRAP_ADMIN_EMAIL", "")]).unwrap();
        assert!(s.database_url.is_none());
        assert!(s.bootstrap_admin_email.is_none());
    }

    #[test]
    fn test_secret_and_cookie_flags() {
        let s = settings(&[("JWT_SECRET", "aGVsbG8="), ("COOKIE_SECURE", "false")]).unwrap();
        let config = s.auth_config().unwrap();
        assert_eq!(config.token_secret, b"hello");
        assert!(!config.cookie_secure);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(settings(&[("JWT_SECRET", "%%%")]).is_err());
        assert!(settings(&[("BIND_ADDR", "nowhere")]).is_err());
        assert!(settings(&[("REQUEST_TIMEOUT_SECS", "soon")]).is_err());
        assert!(settings(&[("COOKIE_SECURE", "maybe")]).is_err());
    }

    #[test]
    fn test_origins_split() {
        let s = settings(&[("FRONTEND_ORIGINS", "https://a.example, ,https://b.example")]).unwrap();
        assert_eq!(s.frontend_origins, vec!["https://a.example", "https://b.example"]);
    }
}
