// src/checkers/disc.rs
use async_trait::async_trait;
use std::sync::Arc;

use super::{user_id, CheckError, RequirementChecker};
use crate::app_log;
use crate::core::BackendClient;
use crate::credentials::CredentialProvider;
use crate::types::{DiscTestsResponse, Requirement, User};

/// Asks the backend for at most one completed DISC test of the user.
pub struct DiscChecker {
    client: Arc<BackendClient>,
    credentials: Arc<dyn CredentialProvider>,
}

impl DiscChecker {
    pub fn new(client: Arc<BackendClient>, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            client,
            credentials,
        }
    }
}

#[async_trait]
impl RequirementChecker for DiscChecker {
    fn requirement(&self) -> Requirement {
        Requirement::Disc
    }

    async fn check(&self, user: &User) -> Result<bool, CheckError> {
        let id = user_id(user)?;
        let token = self
            .credentials
            .get_token()
            .ok_or(CheckError::MissingCredential)?;

        app_log!(debug, "Checking DISC test for user {}", id);
        let response: Option<DiscTestsResponse> = self
            .client
            .get_json_if_ok(
                &format!("/api/tests/psychological/user/{}", id),
                &[("status", "completed"), ("limit", "1")],
                &token,
            )
            .await?;

        // Any non-2xx answer means no completed test could be confirmed.
        let completed = response.is_some_and(|r| r.has_completed_test());
        app_log!(debug, "DISC completed for user {}: {}", id, completed);
        Ok(completed)
    }
}
