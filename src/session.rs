// src/session.rs
use anyhow::Result;
use serde::Deserialize;
use std::path::Path;

use crate::app_log;
use crate::credentials::CredentialProvider;
use crate::types::User;
use crate::utils::{is_filled, read_json_file};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionFile {
    #[serde(default)]
    user: Option<User>,
    #[serde(default)]
    access_token: Option<String>,
}

/// Signed-in user and their access token.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub user: Option<User>,
    pub access_token: Option<String>,
    pub is_loading: bool,
}

impl SessionState {
    pub fn new(user: User, access_token: impl Into<String>) -> Self {
        Self {
            user: Some(user),
            access_token: Some(access_token.into()),
            is_loading: false,
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn loading() -> Self {
        Self {
            is_loading: true,
            ..Self::default()
        }
    }

    /// Load a persisted session. A session missing either the user or the
    /// token is discarded as a whole.
    pub async fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            app_log!(info, "No session file at {}", path.display());
            return Ok(Self::anonymous());
        }

        let file: SessionFile = read_json_file(path).await?;
        match (file.user, file.access_token) {
            (Some(user), Some(token)) if is_filled(Some(token.as_str())) => {
                Ok(Self::new(user, token))
            }
            _ => {
                app_log!(warn, "Discarding incomplete session from {}", path.display());
                Ok(Self::anonymous())
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.access_token.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }
}

impl CredentialProvider for SessionState {
    fn get_token(&self) -> Option<String> {
        self.access_token.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn load_from(name: &str, content: &str) -> SessionState {
        let path = std::env::temp_dir().join(format!(
            "interview-gate-session-{}-{}.json",
            name,
            std::process::id()
        ));
        tokio::fs::write(&path, content).await.unwrap();
        let session = SessionState::load(&path).await.unwrap();
        tokio::fs::remove_file(&path).await.ok();
        session
    }

    #[tokio::test]
    async fn test_complete_session_is_authenticated() {
        let session = load_from(
            "complete",
            r#"{"user": {"id": 3, "name": "Ana"}, "accessToken": "tok", "refreshToken": "r"}"#,
        )
        .await;

        assert!(session.is_authenticated());
        assert_eq!(session.get_token().as_deref(), Some("tok"));
        assert_eq!(session.user().and_then(|u| u.name.as_deref()), Some("Ana"));
    }

    #[tokio::test]
    async fn test_session_without_token_is_discarded() {
        let session = load_from("no-token", r#"{"user": {"id": 3}}"#).await;
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
    }

    #[tokio::test]
    async fn test_missing_file_is_anonymous() {
        let session = SessionState::load(Path::new("/nonexistent/session.json"))
            .await
            .unwrap();
        assert!(!session.is_authenticated());
        assert!(!session.is_loading);
    }
}
