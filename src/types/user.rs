// src/types/user.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::utils::is_filled;

/// Backend user identifier. The API hands out numeric ids but older sessions
/// stored them as strings, so both are accepted and kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => UserId(n.to_string()),
            RawId::Text(s) => UserId(s),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Candidate,
    Company,
}

impl UserType {
    pub fn label(&self) -> &'static str {
        match self {
            UserType::Candidate => "Candidato",
            UserType::Company => "Empresa",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub status: String,
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Subscription {
    pub fn is_active(&self) -> bool {
        self.is_active_at(Utc::now())
    }

    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.status == "active" && self.expires_at.map_or(true, |expires| expires > now)
    }
}

/// Authenticated user as held by the session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<UserId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    /// Résumé reference; the backend may send a URL string or a raw buffer object.
    #[serde(default, alias = "curriculoUrl")]
    pub curriculo_url: Option<serde_json::Value>,
    #[serde(default, alias = "tipo")]
    pub user_type: Option<UserType>,
    #[serde(default)]
    pub subscription: Option<Subscription>,
}

impl User {
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(UserId::new(id)),
            ..Self::default()
        }
    }

    /// Type used for routing decisions; accounts without one are candidates.
    pub fn user_type(&self) -> UserType {
        self.user_type.unwrap_or(UserType::Candidate)
    }

    pub fn has_linkedin(&self) -> bool {
        is_filled(self.linkedin.as_deref())
    }

    /// Best-effort résumé guess from already-loaded data, without a request.
    pub fn has_resume_hint(&self) -> bool {
        matches!(
            self.curriculo_url,
            Some(serde_json::Value::String(_)) | Some(serde_json::Value::Object(_))
        )
    }

    pub fn has_active_subscription(&self) -> bool {
        self.subscription
            .as_ref()
            .is_some_and(Subscription::is_active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_user_id_accepts_numbers_and_strings() {
        let numeric: User = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        let textual: User = serde_json::from_str(r#"{"id": "abc-1"}"#).unwrap();

        assert_eq!(numeric.id, Some(UserId::new("42")));
        assert_eq!(textual.id, Some(UserId::new("abc-1")));
    }

    #[test]
    fn test_backend_field_aliases() {
        let user: User = serde_json::from_str(
            r#"{"id": 1, "curriculoUrl": {"type": "Buffer", "data": [1, 2]}, "tipo": "company"}"#,
        )
        .unwrap();

        assert!(user.has_resume_hint());
        assert_eq!(user.user_type(), UserType::Company);
    }

    #[test]
    fn test_resume_hint_ignores_null_and_scalars() {
        let mut user = User::with_id("1");
        assert!(!user.has_resume_hint());

        user.curriculo_url = Some(serde_json::Value::Null);
        assert!(!user.has_resume_hint());

        user.curriculo_url = Some(serde_json::json!(12));
        assert!(!user.has_resume_hint());

        user.curriculo_url = Some(serde_json::json!("https://cdn/cv.pdf"));
        assert!(user.has_resume_hint());
    }

    #[test]
    fn test_linkedin_must_not_be_blank() {
        let mut user = User::with_id("1");
        user.linkedin = Some("   ".to_string());
        assert!(!user.has_linkedin());

        user.linkedin = Some("https://linkedin.com/in/ana".to_string());
        assert!(user.has_linkedin());
    }

    #[test]
    fn test_subscription_expiry() {
        let now = Utc::now();
        let mut subscription = Subscription {
            status: "active".to_string(),
            plan: None,
            expires_at: Some(now + Duration::days(3)),
        };
        assert!(subscription.is_active_at(now));

        subscription.expires_at = Some(now - Duration::days(1));
        assert!(!subscription.is_active_at(now));

        subscription.expires_at = None;
        subscription.status = "canceled".to_string();
        assert!(!subscription.is_active_at(now));
    }
}
