// src/checkers/mod.rs
//! Requirement checkers.
//!
//! Every checker resolves to a definite answer or a [`CheckError`]; the
//! validator maps any error to "requirement not met", so failures close the
//! gate instead of opening it.

use async_trait::async_trait;
use std::time::Duration;

use crate::types::{Requirement, User, UserId};

pub mod disc;
pub mod profile;
pub mod resume;

pub use disc::DiscChecker;
pub use profile::{linkedin_filled, BotCompletionChecker};
pub use resume::ResumeChecker;

#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("no bearer credential available")]
    MissingCredential,

    #[error("user has no identifier")]
    MissingUserId,

    #[error("check timed out after {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

#[async_trait]
pub trait RequirementChecker: Send + Sync {
    fn requirement(&self) -> Requirement;

    async fn check(&self, user: &User) -> Result<bool, CheckError>;
}

pub(crate) fn user_id(user: &User) -> Result<&UserId, CheckError> {
    user.id.as_ref().ok_or(CheckError::MissingUserId)
}
