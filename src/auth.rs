//! Authentication boundary.
//!
//! The document client never performs logins itself; it asks a [`TokenProvider`]
//! for the current bearer token right before each operation and fails fast with
//! [`Error::Auth`] when none is available. [`AuthClient`] covers the user-center
//! login/register endpoints, and [`KeyringTokenStore`] persists the resulting
//! token in the platform keyring with an environment-variable fallback.

use crate::config::ClientConfig;
use crate::transport::HttpTransport;
use crate::types::ApiEnvelope;
use crate::{Error, Result};
use keyring::Entry;
use serde::{Deserialize, Serialize};
use std::env;
use std::sync::RwLock;
use tracing::info;

/// Synchronous source of the current bearer token.
///
/// Synchronous on purpose: token lookup must be cheap and must happen before
/// any request is issued, so implementations should hold the token in memory
/// rather than fetch it on demand.
pub trait TokenProvider: Send + Sync {
    fn token(&self) -> Option<String>;
}

/// A fixed token, mainly for tests and server-to-server use.
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl TokenProvider for StaticToken {
    fn token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

const KEYRING_SERVICE: &str = "llmcenter";
const TOKEN_ENV_VAR: &str = "LLMCENTER_TOKEN";

/// Token store backed by the platform keyring, with `LLMCENTER_TOKEN` as a
/// fallback for headless environments. Reads are cached in memory so the
/// per-request [`TokenProvider::token`] call never touches the keyring.
pub struct KeyringTokenStore {
    account: String,
    cached: RwLock<Option<String>>,
}

impl KeyringTokenStore {
    /// `account` distinguishes multiple logins on one machine (the user's
    /// mobile number in the stock client).
    pub fn new(account: impl Into<String>) -> Self {
        let account = account.into();
        let cached = Self::load_initial(&account);
        Self {
            account,
            cached: RwLock::new(cached),
        }
    }

    fn load_initial(account: &str) -> Option<String> {
        if let Ok(entry) = Entry::new(KEYRING_SERVICE, account) {
            if let Ok(token) = entry.get_password() {
                return Some(token);
            }
        }
        env::var(TOKEN_ENV_VAR).ok()
    }

    /// Persist a freshly obtained token.
    pub fn save(&self, token: &str) -> Result<()> {
        let entry = Entry::new(KEYRING_SERVICE, &self.account)
            .map_err(|e| Error::CredentialStore(e.to_string()))?;
        entry
            .set_password(token)
            .map_err(|e| Error::CredentialStore(e.to_string()))?;
        *self.cached.write().expect("token cache poisoned") = Some(token.to_string());
        Ok(())
    }

    /// Forget the stored token (logout).
    pub fn clear(&self) -> Result<()> {
        if let Ok(entry) = Entry::new(KEYRING_SERVICE, &self.account) {
            // A missing entry is already the state we want.
            let _ = entry.delete_password();
        }
        *self.cached.write().expect("token cache poisoned") = None;
        Ok(())
    }
}

impl TokenProvider for KeyringTokenStore {
    fn token(&self) -> Option<String> {
        self.cached.read().expect("token cache poisoned").clone()
    }
}

/// Login/register credentials.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub mobile: String,
    pub password: String,
}

/// Token grant returned by the user-center.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokens {
    pub access_token: String,
    pub access_expire: i64,
    pub refresh_after: i64,
}

/// Client for the user-center auth endpoints.
pub struct AuthClient {
    transport: HttpTransport,
    config: ClientConfig,
}

impl AuthClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self { transport, config })
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<AuthTokens> {
        self.grant("/user/login", credentials).await
    }

    /// Register a new account. The user-center issues a token right away, so a
    /// successful registration doubles as a login.
    pub async fn register(&self, credentials: &Credentials) -> Result<AuthTokens> {
        self.grant("/user/register", credentials).await
    }

    async fn grant(&self, path: &str, credentials: &Credentials) -> Result<AuthTokens> {
        let url = self.config.auth_endpoint(path);
        let envelope: ApiEnvelope<AuthTokens> = self
            .transport
            .post_json_unauthenticated(&url, credentials)
            .await?;
        let tokens = envelope.into_data()?;
        info!("authenticated against user-center");
        Ok(tokens)
    }
}
