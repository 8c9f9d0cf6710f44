// src/validation.rs
//! Interview requirement validation.
//!
//! A full pass runs the résumé, DISC and bot checks as concurrent tasks and
//! evaluates LinkedIn from the loaded profile. The quick pass only looks at
//! data already in memory and leaves DISC unresolved, so it can drive an
//! instant UI state but never opens the gate on its own.

use anyhow::Result;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tokio::task::{JoinError, JoinHandle};

use crate::app_log;
use crate::checkers::{
    linkedin_filled, BotCompletionChecker, CheckError, DiscChecker, RequirementChecker,
    ResumeChecker,
};
use crate::core::{BackendClient, ConfigManager};
use crate::credentials::CredentialProvider;
use crate::types::{RequirementStatus, User, ValidationResult};

pub struct InterviewValidator {
    resume: Arc<dyn RequirementChecker>,
    disc: Arc<dyn RequirementChecker>,
    bot: Arc<dyn RequirementChecker>,
    check_timeout: Duration,
    in_flight: AtomicUsize,
    last_result: RwLock<Option<ValidationResult>>,
}

/// Counts one running pass; released even when the validation future is dropped early.
struct InFlightGuard<'a>(&'a AtomicUsize);

impl<'a> InFlightGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl InterviewValidator {
    pub fn new(
        resume: Arc<dyn RequirementChecker>,
        disc: Arc<dyn RequirementChecker>,
        bot: Arc<dyn RequirementChecker>,
        check_timeout: Duration,
    ) -> Self {
        Self {
            resume,
            disc,
            bot,
            check_timeout,
            in_flight: AtomicUsize::new(0),
            last_result: RwLock::new(None),
        }
    }

    /// Wire the HTTP-backed checkers against the configured backend
    pub fn from_config(
        config: &ConfigManager,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self> {
        let client = Arc::new(BackendClient::from_config(&config.backend)?);

        Ok(Self::new(
            Arc::new(ResumeChecker::new(Arc::clone(&client), Arc::clone(&credentials))),
            Arc::new(DiscChecker::new(client, credentials)),
            Arc::new(BotCompletionChecker),
            config.backend.check_timeout(),
        ))
    }

    /// Run every requirement check for `user`.
    ///
    /// Never fails: checker errors and timeouts count as unmet, and a checker
    /// task that dies produces the generic failure result.
    pub async fn validate_interview_requirements(&self, user: Option<&User>) -> ValidationResult {
        let Some(user) = user.filter(|u| u.id.is_some()) else {
            app_log!(warn, "Interview validation requested without an identified user");
            return ValidationResult::unidentified();
        };

        let _guard = InFlightGuard::enter(&self.in_flight);
        app_log!(
            info,
            "Validating interview requirements for user {}",
            user.id.as_ref().map(|id| id.as_str()).unwrap_or_default()
        );

        let result = match self.run_checks(user).await {
            Ok(details) => ValidationResult::from_status(details),
            Err(e) => {
                app_log!(error, "Interview requirement validation failed: {}", e);
                ValidationResult::failed(e.to_string())
            }
        };

        app_log!(
            info,
            "Validation finished: valid={} missing={}",
            result.is_valid(),
            result.missing_requirements().len()
        );
        self.set_last_result(Some(result.clone()));
        result
    }

    /// Local-only pass over data already loaded for the user. DISC stays unknown.
    pub fn quick_validation(user: Option<&User>) -> ValidationResult {
        let Some(user) = user.filter(|u| u.id.is_some()) else {
            return ValidationResult::unidentified();
        };

        ValidationResult::quick(RequirementStatus {
            bot: Some(BotCompletionChecker::evaluate(user)),
            disc: None,
            curriculo: Some(user.has_resume_hint()),
            linkedin: Some(linkedin_filled(user)),
        })
    }

    /// True while at least one full pass is running.
    pub fn is_validating(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    pub fn last_result(&self) -> Option<ValidationResult> {
        self.last_result
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_last_result(&self, result: Option<ValidationResult>) {
        *self
            .last_result
            .write()
            .unwrap_or_else(PoisonError::into_inner) = result;
    }

    /// Forget the last result, as when the owning view goes away.
    pub fn clear(&self) {
        self.set_last_result(None);
    }

    async fn run_checks(&self, user: &User) -> Result<RequirementStatus, JoinError> {
        let shared = Arc::new(user.clone());

        let (resume, disc, bot) = tokio::join!(
            self.spawn_check(&self.resume, &shared),
            self.spawn_check(&self.disc, &shared),
            self.spawn_check(&self.bot, &shared),
        );
        let linkedin = linkedin_filled(user);

        Ok(RequirementStatus::new(bot?, disc?, resume?, linkedin))
    }

    fn spawn_check(
        &self,
        checker: &Arc<dyn RequirementChecker>,
        user: &Arc<User>,
    ) -> JoinHandle<bool> {
        let checker = Arc::clone(checker);
        let user = Arc::clone(user);
        let limit = self.check_timeout;

        tokio::spawn(async move {
            let requirement = checker.requirement();
            let outcome = tokio::time::timeout(limit, checker.check(&user))
                .await
                .unwrap_or(Err(CheckError::Timeout(limit)));

            match outcome {
                Ok(met) => met,
                Err(e) => {
                    app_log!(
                        warn,
                        "Requirement '{}' could not be verified, treating as unmet: {}",
                        requirement.id(),
                        e
                    );
                    false
                }
            }
        })
    }
}
