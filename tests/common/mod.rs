// Shared fakes for the integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use interview_gate::checkers::{CheckError, RequirementChecker};
use interview_gate::types::{Requirement, User};
use interview_gate::InterviewValidator;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

pub enum Behavior {
    Answer(bool),
    Fail,
    Panic,
    Hang,
    /// Waits for a permit before answering `true`.
    Gated(Arc<Semaphore>),
}

pub struct FakeChecker {
    requirement: Requirement,
    behavior: Behavior,
    calls: AtomicUsize,
}

impl FakeChecker {
    pub fn new(requirement: Requirement, behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            requirement,
            behavior,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RequirementChecker for FakeChecker {
    fn requirement(&self) -> Requirement {
        self.requirement
    }

    async fn check(&self, _user: &User) -> Result<bool, CheckError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            Behavior::Answer(met) => Ok(*met),
            Behavior::Fail => Err(CheckError::Backend(anyhow::anyhow!(
                "connection refused"
            ))),
            Behavior::Panic => panic!("checker blew up"),
            Behavior::Hang => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(true)
            }
            Behavior::Gated(permits) => {
                let permit = permits.acquire().await.map_err(|e| CheckError::Backend(e.into()))?;
                permit.forget();
                Ok(true)
            }
        }
    }
}

pub struct Fakes {
    pub resume: Arc<FakeChecker>,
    pub disc: Arc<FakeChecker>,
    pub bot: Arc<FakeChecker>,
}

impl Fakes {
    pub fn new(resume: Behavior, disc: Behavior, bot: Behavior) -> Self {
        Self {
            resume: FakeChecker::new(Requirement::Curriculo, resume),
            disc: FakeChecker::new(Requirement::Disc, disc),
            bot: FakeChecker::new(Requirement::Bot, bot),
        }
    }

    pub fn all_met() -> Self {
        Self::new(Behavior::Answer(true), Behavior::Answer(true), Behavior::Answer(true))
    }

    pub fn validator(&self) -> InterviewValidator {
        self.validator_with_timeout(Duration::from_secs(5))
    }

    pub fn validator_with_timeout(&self, timeout: Duration) -> InterviewValidator {
        InterviewValidator::new(
            self.resume.clone(),
            self.disc.clone(),
            self.bot.clone(),
            timeout,
        )
    }

    pub fn total_calls(&self) -> usize {
        self.resume.calls() + self.disc.calls() + self.bot.calls()
    }
}

pub fn candidate(linkedin: &str) -> User {
    User {
        name: Some("Ana".to_string()),
        role: Some("Engineer".to_string()),
        linkedin: Some(linkedin.to_string()),
        ..User::with_id("7")
    }
}
