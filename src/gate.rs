// src/gate.rs
//! Interview call-to-action: validates requirements, then opens the interview

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Url;
use std::sync::Arc;
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;

use crate::app_log;
use crate::core::ConfigManager;
use crate::remediation::RemediationDialog;
use crate::types::{JobPosting, User};
use crate::validation::InterviewValidator;

/// A browsing context opened by a [`Launcher`].
#[async_trait]
pub trait OpenedContext: Send {
    /// Resolves once the context has been closed.
    async fn closed(self: Box<Self>);
}

#[async_trait]
pub trait Launcher: Send + Sync {
    /// Open `url` in a new context. `Ok(None)` means the environment refused
    /// to open one (popup blocked, no opener available).
    async fn open_new(&self, url: &Url) -> Result<Option<Box<dyn OpenedContext>>>;

    /// Replace the current context with `url`.
    async fn navigate(&self, url: &Url) -> Result<()>;
}

pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

pub type CompletionCallback = Box<dyn FnOnce() + Send + 'static>;

#[derive(Debug)]
pub enum GateOutcome {
    /// Requirements unmet; the dialog is open with the result.
    Blocked(RemediationDialog),
    /// Interview opened in a new context. `monitor` finishes after the
    /// completion callback ran.
    Opened {
        url: Url,
        monitor: Option<JoinHandle<()>>,
    },
    /// New context refused; the current one was sent to the interview instead.
    Navigated { url: Url },
    /// Something went wrong after validation; the user has been alerted.
    Failed(String),
}

pub struct InterviewGate {
    validator: Arc<InterviewValidator>,
    launcher: Arc<dyn Launcher>,
    notifier: Arc<dyn Notifier>,
    interview_url: Url,
    auto_close_on_valid: bool,
}

impl InterviewGate {
    pub fn new(
        validator: Arc<InterviewValidator>,
        launcher: Arc<dyn Launcher>,
        notifier: Arc<dyn Notifier>,
        interview_url: Url,
    ) -> Self {
        Self {
            validator,
            launcher,
            notifier,
            interview_url,
            auto_close_on_valid: true,
        }
    }

    pub fn from_config(
        config: &ConfigManager,
        validator: Arc<InterviewValidator>,
        launcher: Arc<dyn Launcher>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        let interview_url = Url::parse(&config.gate.interview_url)
            .with_context(|| format!("Invalid interview URL: {}", config.gate.interview_url))?;

        Ok(Self {
            auto_close_on_valid: config.gate.auto_close_on_valid,
            ..Self::new(validator, launcher, notifier, interview_url)
        })
    }

    pub fn validator(&self) -> &Arc<InterviewValidator> {
        &self.validator
    }

    /// Interview location with the job serialized into `job` and the optional
    /// application id in `candidatura_id`.
    pub fn interview_location(&self, job: &JobPosting, application_id: Option<&str>) -> Result<Url> {
        let job_json = serde_json::to_string(job).context("Failed to serialize job context")?;

        let mut url = self.interview_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("job", &job_json);
            if let Some(id) = application_id.filter(|id| !id.is_empty()) {
                query.append_pair("candidatura_id", id);
            }
        }
        Ok(url)
    }

    /// Validate, then open the interview or hand back the remediation dialog.
    pub async fn trigger(
        &self,
        user: Option<&User>,
        job: &JobPosting,
        application_id: Option<&str>,
        on_complete: Option<CompletionCallback>,
    ) -> GateOutcome {
        let validation = self.validator.validate_interview_requirements(user).await;
        if !validation.is_valid() {
            app_log!(
                info,
                "Interview blocked, missing: {:?}",
                validation.missing_requirements()
            );
            return GateOutcome::Blocked(RemediationDialog::opened_with(
                validation,
                self.auto_close_on_valid,
            ));
        }

        match self.launch(job, application_id, on_complete).await {
            Ok(outcome) => outcome,
            Err(e) => {
                app_log!(error, "Failed to open interview: {:#}", e);
                let message = "Erro ao abrir entrevista. Tente novamente.".to_string();
                self.notifier.alert(&message);
                GateOutcome::Failed(message)
            }
        }
    }

    async fn launch(
        &self,
        job: &JobPosting,
        application_id: Option<&str>,
        on_complete: Option<CompletionCallback>,
    ) -> Result<GateOutcome> {
        let url = self.interview_location(job, application_id)?;
        app_log!(info, "Opening interview for job {}", job.id);

        match self.launcher.open_new(&url).await? {
            Some(context) => {
                let monitor = on_complete.map(|callback| {
                    tokio::spawn(async move {
                        context.closed().await;
                        app_log!(debug, "Interview context closed");
                        callback();
                    })
                });
                Ok(GateOutcome::Opened { url, monitor })
            }
            None => {
                app_log!(warn, "New context blocked, navigating current context");
                self.launcher.navigate(&url).await?;
                Ok(GateOutcome::Navigated { url })
            }
        }
    }
}

/// Opens URLs with a desktop opener command (`xdg-open`, `open`, ...).
pub struct SystemBrowserLauncher {
    program: String,
}

impl SystemBrowserLauncher {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

struct ChildContext(Child);

#[async_trait]
impl OpenedContext for ChildContext {
    async fn closed(self: Box<Self>) {
        let ChildContext(mut child) = *self;
        if let Err(e) = child.wait().await {
            app_log!(warn, "Lost track of opener process: {}", e);
        }
    }
}

#[async_trait]
impl Launcher for SystemBrowserLauncher {
    async fn open_new(&self, url: &Url) -> Result<Option<Box<dyn OpenedContext>>> {
        match Command::new(&self.program).arg(url.as_str()).spawn() {
            Ok(child) => Ok(Some(Box::new(ChildContext(child)))),
            Err(e) => {
                app_log!(warn, "Could not run {}: {}", self.program, e);
                Ok(None)
            }
        }
    }

    async fn navigate(&self, url: &Url) -> Result<()> {
        println!("➡️  Open the interview at: {}", url);
        Ok(())
    }
}

pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn alert(&self, message: &str) {
        app_log!(warn, "Alert shown: {}", message);
        eprintln!("❌ {}", message);
    }
}
