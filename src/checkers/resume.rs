// src/checkers/resume.rs
use async_trait::async_trait;
use std::sync::Arc;

use super::{user_id, CheckError, RequirementChecker};
use crate::app_log;
use crate::core::BackendClient;
use crate::credentials::CredentialProvider;
use crate::types::{Requirement, User};

/// Sends `HEAD /api/users/{id}/curriculo`; only a 2xx answer counts as an uploaded résumé.
pub struct ResumeChecker {
    client: Arc<BackendClient>,
    credentials: Arc<dyn CredentialProvider>,
}

impl ResumeChecker {
    pub fn new(client: Arc<BackendClient>, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            client,
            credentials,
        }
    }
}

#[async_trait]
impl RequirementChecker for ResumeChecker {
    fn requirement(&self) -> Requirement {
        Requirement::Curriculo
    }

    async fn check(&self, user: &User) -> Result<bool, CheckError> {
        let id = user_id(user)?;
        let token = self
            .credentials
            .get_token()
            .ok_or(CheckError::MissingCredential)?;

        app_log!(debug, "Checking résumé for user {}", id);
        let status = self
            .client
            .head(&format!("/api/users/{}/curriculo", id), &token)
            .await?;

        app_log!(debug, "Résumé lookup for user {} returned {}", id, status);
        Ok(status.is_success())
    }
}
