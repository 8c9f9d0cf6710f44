// src/remediation.rs
//! Dialog listing unmet interview requirements with a way to fix each one

use serde::Serialize;

use crate::app_log;
use crate::types::{Requirement, User, ValidationResult};
use crate::validation::InterviewValidator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogState {
    Closed,
    Open,
    Revalidating,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemediationAction {
    pub label: &'static str,
    pub route: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemediationItem {
    pub requirement: Requirement,
    pub title: &'static str,
    pub description: &'static str,
    pub status: Option<bool>,
    /// Present only while the requirement is not complete.
    pub action: Option<RemediationAction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        ((self.completed * 100) / self.total) as u8
    }
}

impl Requirement {
    pub fn title(&self) -> &'static str {
        match self {
            Requirement::Bot => "Questionário Inicial (Bot)",
            Requirement::Disc => "Teste DISC",
            Requirement::Curriculo => "Currículo",
            Requirement::Linkedin => "Perfil do LinkedIn",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Requirement::Bot => "Complete o questionário inicial para personalizar sua experiência",
            Requirement::Disc => "Complete o teste psicológico DISC para análise de perfil",
            Requirement::Curriculo => "Anexe seu currículo para análise pelas empresas",
            Requirement::Linkedin => "Adicione o link do seu perfil do LinkedIn",
        }
    }

    /// Page where the requirement is satisfied.
    pub fn remediation(&self) -> RemediationAction {
        match self {
            Requirement::Bot => RemediationAction {
                label: "Completar Bot",
                route: "/chat",
            },
            Requirement::Disc => RemediationAction {
                label: "Fazer Teste DISC",
                route: "/teste-disc",
            },
            Requirement::Curriculo => RemediationAction {
                label: "Anexar Currículo",
                route: "/profile",
            },
            Requirement::Linkedin => RemediationAction {
                label: "Adicionar LinkedIn",
                route: "/profile",
            },
        }
    }
}

/// `Closed -> Open -> [retry: Revalidating -> Open] -> Closed`. There is no
/// failure state: a dialog can always be retried or dismissed.
#[derive(Debug, Clone)]
pub struct RemediationDialog {
    state: DialogState,
    result: Option<ValidationResult>,
    auto_close_on_valid: bool,
}

impl Default for RemediationDialog {
    fn default() -> Self {
        Self {
            state: DialogState::Closed,
            result: None,
            auto_close_on_valid: true,
        }
    }
}

impl RemediationDialog {
    pub fn new(auto_close_on_valid: bool) -> Self {
        Self {
            auto_close_on_valid,
            ..Self::default()
        }
    }

    pub fn open(&mut self, result: ValidationResult) {
        self.result = Some(result);
        self.state = DialogState::Open;
    }

    pub fn opened_with(result: ValidationResult, auto_close_on_valid: bool) -> Self {
        let mut dialog = Self::new(auto_close_on_valid);
        dialog.open(result);
        dialog
    }

    pub fn close(&mut self) {
        self.state = DialogState::Closed;
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != DialogState::Closed
    }

    pub fn result(&self) -> Option<&ValidationResult> {
        self.result.as_ref()
    }

    pub fn headline(&self) -> (&'static str, &'static str) {
        match self.result.as_ref().map(ValidationResult::is_valid) {
            Some(true) => (
                "Requisitos Atendidos!",
                "Todos os requisitos foram atendidos. Você pode realizar a entrevista!",
            ),
            _ => (
                "Requisitos Pendentes",
                "Complete os requisitos abaixo para realizar entrevistas",
            ),
        }
    }

    pub fn items(&self) -> Vec<RemediationItem> {
        Requirement::ALL
            .iter()
            .map(|&requirement| {
                let status = self
                    .result
                    .as_ref()
                    .and_then(|result| result.details().get(requirement));
                RemediationItem {
                    requirement,
                    title: requirement.title(),
                    description: requirement.description(),
                    status,
                    action: (status != Some(true)).then(|| requirement.remediation()),
                }
            })
            .collect()
    }

    pub fn progress(&self) -> Progress {
        Progress {
            completed: self
                .result
                .as_ref()
                .map_or(0, |result| result.details().completed_count()),
            total: Requirement::ALL.len(),
        }
    }

    /// Route to navigate to for an incomplete requirement; following it closes the dialog.
    pub fn follow(&mut self, requirement: Requirement) -> Option<&'static str> {
        let action = self
            .items()
            .into_iter()
            .find(|item| item.requirement == requirement)
            .and_then(|item| item.action)?;
        self.close();
        Some(action.route)
    }

    /// Re-run the full validation and show the fresh result in place.
    pub async fn retry(
        &mut self,
        validator: &InterviewValidator,
        user: Option<&User>,
    ) -> &ValidationResult {
        self.state = DialogState::Revalidating;
        app_log!(info, "Re-checking interview requirements");

        let fresh = validator.validate_interview_requirements(user).await;
        let valid = fresh.is_valid();
        let result = self.result.insert(fresh);

        self.state = if valid && self.auto_close_on_valid {
            DialogState::Closed
        } else {
            DialogState::Open
        };
        result
    }
}
