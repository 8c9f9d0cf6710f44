// src/checkers/profile.rs
use async_trait::async_trait;

use super::{CheckError, RequirementChecker};
use crate::types::{Requirement, User};

/// Onboarding-chat completion.
///
/// The backend exposes no completion flag for the chat yet, so this stands in
/// with a profile heuristic: the chat is what fills `role` and `name`. Replace
/// the implementation once the backend reports completion directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct BotCompletionChecker;

impl BotCompletionChecker {
    /// Any non-empty value counts, whitespace included.
    pub fn evaluate(user: &User) -> bool {
        let present = |field: &Option<String>| field.as_deref().is_some_and(|s| !s.is_empty());
        present(&user.role) && present(&user.name)
    }
}

#[async_trait]
impl RequirementChecker for BotCompletionChecker {
    fn requirement(&self) -> Requirement {
        Requirement::Bot
    }

    async fn check(&self, user: &User) -> Result<bool, CheckError> {
        Ok(Self::evaluate(user))
    }
}

/// LinkedIn is read straight from the loaded profile.
pub fn linkedin_filled(user: &User) -> bool {
    user.has_linkedin()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Option<&str>, name: Option<&str>) -> User {
        User {
            role: role.map(String::from),
            name: name.map(String::from),
            ..User::with_id("1")
        }
    }

    #[tokio::test]
    async fn test_bot_needs_role_and_name() {
        let checker = BotCompletionChecker;
        assert!(checker.check(&user(Some("Engineer"), Some("Ana"))).await.unwrap());
        assert!(!checker.check(&user(Some("Engineer"), None)).await.unwrap());
        assert!(!checker.check(&user(None, Some("Ana"))).await.unwrap());
        assert!(!checker.check(&user(Some(""), Some("Ana"))).await.unwrap());
        assert!(!checker.check(&user(Some("Engineer"), Some(""))).await.unwrap());
    }

    #[tokio::test]
    async fn test_whitespace_role_counts_as_filled() {
        assert!(BotCompletionChecker.check(&user(Some(" "), Some("Ana"))).await.unwrap());

        let mut profile = user(Some(" "), Some("Ana"));
        profile.linkedin = Some("   ".to_string());
        assert!(BotCompletionChecker::evaluate(&profile));
        assert!(!linkedin_filled(&profile));
    }

    #[test]
    fn test_linkedin_filled() {
        let mut profile = User::with_id("1");
        assert!(!linkedin_filled(&profile));
        profile.linkedin = Some("linkedin.com/in/ana".to_string());
        assert!(linkedin_filled(&profile));
    }
}
