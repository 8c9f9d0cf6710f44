// src/credentials.rs
//! Bearer credential resolution for authenticated backend calls

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

use crate::app_log;
use crate::utils::is_filled;

/// Source of the bearer token used by the network checkers. Read-only.
pub trait CredentialProvider: Send + Sync {
    fn get_token(&self) -> Option<String>;
}

impl<T: CredentialProvider + ?Sized> CredentialProvider for Arc<T> {
    fn get_token(&self) -> Option<String> {
        (**self).get_token()
    }
}

/// Fixed token, mostly for tests and one-off CLI use.
#[derive(Debug, Clone, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl CredentialProvider for StaticToken {
    fn get_token(&self) -> Option<String> {
        self.0.clone().filter(|t| is_filled(Some(t.as_str())))
    }
}

/// Token read from an environment variable at lookup time.
#[derive(Debug, Clone)]
pub struct EnvToken {
    var: String,
}

impl EnvToken {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl CredentialProvider for EnvToken {
    fn get_token(&self) -> Option<String> {
        std::env::var(&self.var).ok().filter(|t| is_filled(Some(t.as_str())))
    }
}

/// Which key of the persistent token store to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKey {
    AccessToken,
    /// Key written by older releases of the web client.
    LegacyAuthToken,
}

/// Persistent token store kept as a small JSON file. Read once by
/// [`TokenStore::load`]; lookups never touch the filesystem.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TokenStore {
    #[serde(default, rename = "accessToken")]
    access_token: Option<String>,
    #[serde(default, rename = "authToken")]
    auth_token: Option<String>,
}

impl TokenStore {
    /// Missing or unreadable files load as an empty store.
    pub async fn load(path: &Path) -> Self {
        match Self::read(path).await {
            Ok(store) => store,
            Err(e) => {
                app_log!(warn, "Ignoring unreadable token store {}: {:#}", path.display(), e);
                Self::default()
            }
        }
    }

    async fn read(path: &Path) -> Result<Self> {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read token store: {}", path.display()))
            }
        };
        serde_json::from_str(&content).context("Token store is not valid JSON")
    }

    /// Provider for one key of the loaded store.
    pub fn token(&self, key: TokenKey) -> StaticToken {
        let token = match key {
            TokenKey::AccessToken => self.access_token.clone(),
            TokenKey::LegacyAuthToken => self.auth_token.clone(),
        };
        StaticToken(token)
    }
}

/// First provider yielding a token wins.
#[derive(Default)]
pub struct ChainedCredentials {
    providers: Vec<Box<dyn CredentialProvider>>,
}

impl ChainedCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, provider: impl CredentialProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Session token first, then the persistent store's `accessToken`, then the legacy `authToken`.
    pub fn session_then_store(
        session: impl CredentialProvider + 'static,
        store: Option<&TokenStore>,
    ) -> Self {
        let chain = Self::new().with(session);
        match store {
            Some(store) => chain
                .with(store.token(TokenKey::AccessToken))
                .with(store.token(TokenKey::LegacyAuthToken)),
            None => chain,
        }
    }
}

impl CredentialProvider for ChainedCredentials {
    fn get_token(&self) -> Option<String> {
        self.providers.iter().find_map(|p| p.get_token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_store(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "interview-gate-{}-{}.json",
            name,
            std::process::id()
        ));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_blank_static_token_is_absent() {
        assert_eq!(StaticToken::new("  ").get_token(), None);
        assert_eq!(StaticToken::none().get_token(), None);
        assert_eq!(StaticToken::new("abc").get_token().as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn test_chain_prefers_session_token() {
        let path = temp_store("chain-session", r#"{"accessToken": "persistent"}"#);
        let store = TokenStore::load(&path).await;
        let chain = ChainedCredentials::session_then_store(StaticToken::new("session"), Some(&store));
        assert_eq!(chain.get_token().as_deref(), Some("session"));
        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_chain_falls_back_to_legacy_key() {
        let path = temp_store("chain-legacy", r#"{"authToken": "legacy"}"#);
        let store = TokenStore::load(&path).await;
        let chain = ChainedCredentials::session_then_store(StaticToken::none(), Some(&store));
        assert_eq!(chain.get_token().as_deref(), Some("legacy"));
        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_unreadable_store_yields_nothing() {
        let path = temp_store("chain-broken", "not json");
        let store = TokenStore::load(&path).await;
        assert_eq!(store, TokenStore::default());
        let chain = ChainedCredentials::session_then_store(StaticToken::none(), Some(&store));
        assert_eq!(chain.get_token(), None);
        std::fs::remove_file(path).ok();

        let missing = TokenStore::load(Path::new("/nonexistent/tokens.json")).await;
        assert_eq!(missing.token(TokenKey::AccessToken).get_token(), None);
    }

    #[tokio::test]
    async fn test_store_is_read_once_at_load() {
        let path = temp_store("read-once", r#"{"accessToken": "first"}"#);
        let store = TokenStore::load(&path).await;

        std::fs::remove_file(&path).unwrap();
        let provider = store.token(TokenKey::AccessToken);
        assert_eq!(provider.get_token().as_deref(), Some("first"));
        assert_eq!(store.token(TokenKey::LegacyAuthToken).get_token(), None);
    }
}
