// src/types/requirements.rs
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const UNIDENTIFIED_USER_MESSAGE: &str = "Usuário não identificado";
pub const VALIDATION_FAILED_MESSAGE: &str = "Erro ao validar requisitos. Tente novamente.";

/// The four prerequisites of the interview feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Requirement {
    Bot,
    Disc,
    Curriculo,
    Linkedin,
}

impl Requirement {
    /// Fixed reporting order for missing requirements.
    pub const ALL: [Requirement; 4] = [
        Requirement::Bot,
        Requirement::Disc,
        Requirement::Curriculo,
        Requirement::Linkedin,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Requirement::Bot => "bot",
            Requirement::Disc => "disc",
            Requirement::Curriculo => "curriculo",
            Requirement::Linkedin => "linkedin",
        }
    }

    /// Label listed in `missingRequirements`.
    pub fn missing_label(&self) -> &'static str {
        match self {
            Requirement::Bot => "Responder questionário inicial (Bot)",
            Requirement::Disc => "Completar teste DISC",
            Requirement::Curriculo => "Anexar currículo",
            Requirement::Linkedin => "Preencher perfil do LinkedIn",
        }
    }
}

/// Per-requirement outcome. `None` means the field has not been resolved yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RequirementStatus {
    pub bot: Option<bool>,
    pub disc: Option<bool>,
    pub curriculo: Option<bool>,
    pub linkedin: Option<bool>,
}

impl RequirementStatus {
    pub fn new(bot: bool, disc: bool, curriculo: bool, linkedin: bool) -> Self {
        Self {
            bot: Some(bot),
            disc: Some(disc),
            curriculo: Some(curriculo),
            linkedin: Some(linkedin),
        }
    }

    pub fn all_unmet() -> Self {
        Self::new(false, false, false, false)
    }

    pub fn get(&self, requirement: Requirement) -> Option<bool> {
        match requirement {
            Requirement::Bot => self.bot,
            Requirement::Disc => self.disc,
            Requirement::Curriculo => self.curriculo,
            Requirement::Linkedin => self.linkedin,
        }
    }

    pub fn is_met(&self, requirement: Requirement) -> bool {
        self.get(requirement) == Some(true)
    }

    pub fn completed_count(&self) -> usize {
        Requirement::ALL
            .iter()
            .filter(|requirement| self.is_met(**requirement))
            .count()
    }

    /// Requirements that are not definitely met, in reporting order.
    pub fn unmet(&self) -> impl Iterator<Item = Requirement> + '_ {
        Requirement::ALL
            .into_iter()
            .filter(move |requirement| !self.is_met(*requirement))
    }
}

/// Outcome of a validation pass.
///
/// Fields are private: every constructor derives `is_valid` from the missing
/// list so the two can never disagree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    is_valid: bool,
    missing_requirements: Vec<String>,
    details: RequirementStatus,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    is_quick_validation: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    checked_at: DateTime<Utc>,
}

impl ValidationResult {
    pub fn from_status(details: RequirementStatus) -> Self {
        let missing_requirements = details
            .unmet()
            .map(|requirement| requirement.missing_label().to_string())
            .collect();
        Self::assemble(missing_requirements, details)
    }

    /// Result of a local-only pass; the DISC field stays unresolved.
    pub fn quick(details: RequirementStatus) -> Self {
        Self {
            is_quick_validation: true,
            ..Self::from_status(details)
        }
    }

    pub fn unidentified() -> Self {
        Self::assemble(
            vec![UNIDENTIFIED_USER_MESSAGE.to_string()],
            RequirementStatus::all_unmet(),
        )
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::assemble(
                vec![VALIDATION_FAILED_MESSAGE.to_string()],
                RequirementStatus::all_unmet(),
            )
        }
    }

    fn assemble(missing_requirements: Vec<String>, details: RequirementStatus) -> Self {
        Self {
            is_valid: missing_requirements.is_empty(),
            missing_requirements,
            details,
            is_quick_validation: false,
            error: None,
            checked_at: Utc::now(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn missing_requirements(&self) -> &[String] {
        &self.missing_requirements
    }

    pub fn details(&self) -> &RequirementStatus {
        &self.details
    }

    pub fn is_quick_validation(&self) -> bool {
        self.is_quick_validation
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn checked_at(&self) -> DateTime<Utc> {
        self.checked_at
    }
}
