//! Server configuration, read from the environment at startup.

use anyhow::{anyhow, Context};

/// Authentication configuration.
///
/// The shared password never appears here: only its argon2 hash does, and
/// there is deliberately no compiled-in default for it.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Argon2 hash of the single shared password (`GW_AUTH_PASSWORD_HASH`).
    pub password_hash: String,
    /// Base64-encoded 32-byte key sealing the session cookie
    /// (`GW_SECRET_KEY`). When absent an ephemeral key is generated and
    /// sessions do not survive a restart.
    pub secret_key: Option<String>,
    /// Marks the session cookie `Secure` (`GW_COOKIE_SECURE`).
    pub cookie_secure: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub db_path: String,
    pub static_dir: String,
    pub auth: AuthConfig,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let password_hash = std::env::var("GW_AUTH_PASSWORD_HASH")
            .map_err(|_| anyhow!("GW_AUTH_PASSWORD_HASH must be set (argon2 hash of the shared password); refusing to start without a credential"))?;

        let cookie_secure = match std::env::var("GW_COOKIE_SECURE") {
            Ok(value) => parse_bool(&value).context("Invalid GW_COOKIE_SECURE value")?,
            Err(_) => false,
        };

        Ok(Self {
            listen_addr: std::env::var("GW_LISTEN_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            db_path: std::env::var("GW_DB_PATH").unwrap_or_else(|_| "giftwise.db".to_string()),
            static_dir: std::env::var("GW_STATIC_DIR").unwrap_or_else(|_| "public".to_string()),
            auth: AuthConfig {
                password_hash,
                secret_key: std::env::var("GW_SECRET_KEY").ok(),
                cookie_secure,
            },
        })
    }
}

fn parse_bool(value: &str) -> anyhow::Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        other => Err(anyhow!("expected a boolean, got '{other}'")),
    }
}
