//! The session gate: single shared-password login and the sealed session
//! cookie.
//!
//! There is exactly one credential for the whole system - no accounts, no
//! roles. The server stores only an argon2 hash of the shared password.
//! A successful login seals `{isLoggedIn, createdAt}` into a
//! ChaCha20-Poly1305 token carried in an HttpOnly cookie; the token dies
//! 7 days after issuance, checked both by the cookie's Max-Age and by
//! `createdAt` when opening the token.

use std::sync::Arc;

use argon2::{password_hash::PasswordHash, Argon2, PasswordVerifier};
use axum::{
    extract::{Request, State},
    http::header::COOKIE,
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Key, Nonce,
};
use chrono::Utc;
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::AuthConfig;
use crate::error::ApiError;
use crate::main_lib::AppState;
use giftwise_core::constants::{SESSION_COOKIE_NAME, SESSION_MAX_AGE_DAYS};
use giftwise_core::errors::Error;

const NONCE_LEN: usize = 12;

/// Payload sealed into the session cookie.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    pub is_logged_in: bool,
    /// Unix timestamp (seconds) of issuance; drives expiry.
    pub created_at: i64,
}

/// Verifies the shared password and seals/opens session tokens.
pub struct SessionManager {
    password_hash: String,
    cipher: ChaCha20Poly1305,
    cookie_secure: bool,
}

impl SessionManager {
    pub fn new(config: &AuthConfig) -> anyhow::Result<Self> {
        PasswordHash::new(&config.password_hash)
            .map_err(|e| anyhow::anyhow!("GW_AUTH_PASSWORD_HASH is not a valid argon2 hash: {e}"))?;

        let key_bytes = match config.secret_key.as_deref() {
            Some(value) if !value.trim().is_empty() => decode_secret_key(value)
                .map_err(|e| anyhow::anyhow!("Invalid GW_SECRET_KEY: {e}"))?,
            _ => {
                warn!("GW_SECRET_KEY not set; using an ephemeral session key - sessions will not survive a restart");
                let mut bytes = [0u8; 32];
                OsRng.fill_bytes(&mut bytes);
                bytes
            }
        };

        Ok(Self {
            password_hash: config.password_hash.clone(),
            cipher: ChaCha20Poly1305::new(Key::from_slice(&key_bytes)),
            cookie_secure: config.cookie_secure,
        })
    }

    /// Exact-match check of the submitted shared password against the
    /// stored hash.
    pub fn verify_password(&self, password: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.password_hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    /// Issues a fresh session token.
    pub fn issue(&self) -> Result<String, Error> {
        self.seal(&SessionData {
            is_logged_in: true,
            created_at: Utc::now().timestamp(),
        })
    }

    fn seal(&self, session: &SessionData) -> Result<String, Error> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let payload = serde_json::to_vec(session)?;
        let ciphertext = self
            .cipher
            .encrypt(nonce, payload.as_ref())
            .map_err(|_| Error::Unexpected("Failed to seal session token".to_string()))?;

        let mut envelope = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        envelope.extend_from_slice(&nonce_bytes);
        envelope.extend_from_slice(&ciphertext);
        Ok(BASE64.encode(envelope))
    }

    /// Opens a session token. Returns `None` for anything that is not a
    /// valid, unexpired token sealed with the current key.
    pub fn open(&self, token: &str) -> Option<SessionData> {
        let envelope = BASE64.decode(token).ok()?;
        if envelope.len() <= NONCE_LEN {
            return None;
        }
        let (nonce_bytes, ciphertext) = envelope.split_at(NONCE_LEN);
        let payload = self
            .cipher
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .ok()?;
        let session: SessionData = serde_json::from_slice(&payload).ok()?;

        if !session.is_logged_in {
            return None;
        }
        let age_seconds = Utc::now().timestamp() - session.created_at;
        if age_seconds < 0 || age_seconds > SESSION_MAX_AGE_DAYS * 24 * 60 * 60 {
            return None;
        }
        Some(session)
    }

    /// Set-Cookie value carrying the session token.
    pub fn cookie(&self, token: &str) -> String {
        format!(
            "{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}{}",
            SESSION_MAX_AGE_DAYS * 24 * 60 * 60,
            if self.cookie_secure { "; Secure" } else { "" }
        )
    }

    /// Set-Cookie value clearing the session.
    pub fn clear_cookie(&self) -> String {
        format!(
            "{SESSION_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0{}",
            if self.cookie_secure { "; Secure" } else { "" }
        )
    }

    /// Extracts and opens the session cookie from request headers.
    pub fn session_from_headers(&self, headers: &HeaderMap) -> Option<SessionData> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| {
                pair.trim()
                    .strip_prefix(SESSION_COOKIE_NAME)
                    .and_then(|rest| rest.strip_prefix('='))
            })
            .find_map(|token| self.open(token))
    }
}

fn decode_secret_key(value: &str) -> Result<[u8; 32], String> {
    let bytes = BASE64.decode(value.trim()).map_err(|e| e.to_string())?;
    let key: [u8; 32] = bytes
        .try_into()
        .map_err(|_| "key must decode to exactly 32 bytes".to_string())?;
    Ok(key)
}

/// Paths reachable without a session: the login page, the login/status
/// endpoints (logout merely clears the cookie), the health probe, and
/// static assets.
fn is_public_path(path: &str) -> bool {
    path == "/login"
        || path.starts_with("/api/v1/auth/")
        || path == "/api/v1/health"
        || path
            .rsplit('/')
            .next()
            .is_some_and(|segment| segment.contains('.'))
}

/// Gate middleware ahead of every route. API requests without a valid
/// session get 401 JSON; page navigations are redirected to the login
/// page instead.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path();
    if is_public_path(path) || state.sessions.session_from_headers(request.headers()).is_some() {
        return next.run(request).await;
    }

    if path.starts_with("/api/") {
        ApiError::from(Error::Unauthorized("Missing or expired session".to_string()))
            .into_response()
    } else {
        Redirect::to("/login").into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> SessionManager {
        let mut key = [0u8; 32];
        OsRng.fill_bytes(&mut key);
        // Hash of "secret" generated with argon2 defaults.
        let hash = argon2::PasswordHasher::hash_password(
            &Argon2::default(),
            b"secret",
            &argon2::password_hash::SaltString::generate(&mut OsRng),
        )
        .unwrap()
        .to_string();
        SessionManager::new(&AuthConfig {
            password_hash: hash,
            secret_key: Some(BASE64.encode(key)),
            cookie_secure: false,
        })
        .unwrap()
    }

    #[test]
    fn password_verification_is_exact_match() {
        let sessions = manager();
        assert!(sessions.verify_password("secret"));
        assert!(!sessions.verify_password("Secret"));
        assert!(!sessions.verify_password(""));
    }

    #[test]
    fn token_round_trip() {
        let sessions = manager();
        let token = sessions.issue().unwrap();
        let session = sessions.open(&token).expect("token should open");
        assert!(session.is_logged_in);
    }

    #[test]
    fn tampered_or_foreign_tokens_are_rejected() {
        let sessions = manager();
        let token = sessions.issue().unwrap();

        let mut tampered = BASE64.decode(&token).unwrap();
        let last = tampered.len() - 1;
        tampered[last] ^= 0x01;
        assert!(sessions.open(&BASE64.encode(tampered)).is_none());

        // Token sealed with a different key.
        let other = manager();
        let foreign = other.issue().unwrap();
        assert!(sessions.open(&foreign).is_none());

        assert!(sessions.open("not-base64!").is_none());
    }

    #[test]
    fn expired_sessions_do_not_open() {
        let sessions = manager();
        let stale = sessions
            .seal(&SessionData {
                is_logged_in: true,
                created_at: Utc::now().timestamp()
                    - (SESSION_MAX_AGE_DAYS * 24 * 60 * 60 + 1),
            })
            .unwrap();
        assert!(sessions.open(&stale).is_none());
    }

    #[test]
    fn cookie_attributes() {
        let sessions = manager();
        let cookie = sessions.cookie("tok");
        assert!(cookie.starts_with("giftwise_session=tok;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Max-Age=604800"));
        assert!(!cookie.contains("Secure"));

        assert!(sessions.clear_cookie().contains("Max-Age=0"));
    }

    #[test]
    fn public_paths() {
        assert!(is_public_path("/login"));
        assert!(is_public_path("/api/v1/auth/login"));
        assert!(is_public_path("/api/v1/health"));
        assert!(is_public_path("/favicon.ico"));
        assert!(is_public_path("/assets/app.js"));
        assert!(!is_public_path("/"));
        assert!(!is_public_path("/api/v1/gifts"));
    }
}
